//! Error handling for the resume matcher

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ResumeMatcherError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("PDF extraction error: {0}")]
    PdfExtraction(String),

    /// No text could be read from the document. Always terminates an analysis request.
    #[error("Failed to extract text from document: {0}")]
    ExtractionFailed(String),

    #[error("File format not supported: {0}")]
    UnsupportedFormat(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Skill vocabulary error: {0}")]
    VocabularyLoad(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Server error: {0}")]
    Server(String),
}

impl ResumeMatcherError {
    /// True when the error means the input document could not be read as text.
    pub fn is_extraction_failure(&self) -> bool {
        matches!(
            self,
            ResumeMatcherError::ExtractionFailed(_)
                | ResumeMatcherError::PdfExtraction(_)
                | ResumeMatcherError::UnsupportedFormat(_)
        )
    }
}

pub type Result<T> = std::result::Result<T, ResumeMatcherError>;

/// Convert anyhow errors to our custom error type
impl From<anyhow::Error> for ResumeMatcherError {
    fn from(err: anyhow::Error) -> Self {
        ResumeMatcherError::Server(err.to_string())
    }
}
