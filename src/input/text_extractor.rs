//! Text extraction from in-memory documents

use crate::error::{Result, ResumeMatcherError};
use crate::input::file_detector::FileType;
use crate::processing::text_processor::normalize;
use log::{debug, warn};
use pulldown_cmark::{Event, Parser, Tag};
use std::fmt;
use std::panic;

/// A document buffer borrowed from the caller for the duration of one extraction.
#[derive(Debug, Clone, Copy)]
pub struct RawDocument<'a> {
    pub bytes: &'a [u8],
    pub format: FileType,
}

impl<'a> RawDocument<'a> {
    pub fn new(bytes: &'a [u8], format: FileType) -> Self {
        Self { bytes, format }
    }

    pub fn pdf(bytes: &'a [u8]) -> Self {
        Self::new(bytes, FileType::Pdf)
    }
}

/// Whitespace-collapsed text: no newlines, no repeated spaces, trimmed.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct NormalizedText(String);

impl NormalizedText {
    pub fn new(text: &str) -> Self {
        Self(normalize(text))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl AsRef<str> for NormalizedText {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for NormalizedText {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

pub trait TextExtractor {
    fn extract(&self, bytes: &[u8]) -> Result<String>;
}

pub struct PdfExtractor;

impl TextExtractor for PdfExtractor {
    fn extract(&self, bytes: &[u8]) -> Result<String> {
        // pdf-extract panics on some malformed inputs instead of returning an error
        let outcome = panic::catch_unwind(|| pdf_extract::extract_text_from_mem(bytes));

        match outcome {
            Ok(Ok(text)) => Ok(text),
            Ok(Err(e)) => Err(ResumeMatcherError::PdfExtraction(format!(
                "Failed to extract text from PDF: {}",
                e
            ))),
            Err(_) => Err(ResumeMatcherError::PdfExtraction(
                "PDF parser aborted on malformed input".to_string(),
            )),
        }
    }
}

pub struct PlainTextExtractor;

impl TextExtractor for PlainTextExtractor {
    fn extract(&self, bytes: &[u8]) -> Result<String> {
        std::str::from_utf8(bytes)
            .map(str::to_string)
            .map_err(|e| ResumeMatcherError::InvalidInput(format!("Text is not valid UTF-8: {}", e)))
    }
}

pub struct MarkdownExtractor;

impl TextExtractor for MarkdownExtractor {
    fn extract(&self, bytes: &[u8]) -> Result<String> {
        let markdown_content = PlainTextExtractor.extract(bytes)?;
        Ok(self.markdown_to_text(&markdown_content))
    }
}

impl MarkdownExtractor {
    fn markdown_to_text(&self, markdown: &str) -> String {
        let mut text = String::with_capacity(markdown.len());

        for event in Parser::new(markdown) {
            match event {
                Event::Text(content) | Event::Code(content) => text.push_str(&content),
                Event::End(tag) if Self::is_block(&tag) => text.push('\n'),
                Event::SoftBreak | Event::HardBreak | Event::Rule => text.push('\n'),
                _ => {}
            }
        }

        text
    }

    fn is_block(tag: &Tag<'_>) -> bool {
        matches!(
            tag,
            Tag::Paragraph
                | Tag::Heading(..)
                | Tag::BlockQuote
                | Tag::CodeBlock(_)
                | Tag::List(_)
                | Tag::Item
                | Tag::TableHead
                | Tag::TableRow
                | Tag::TableCell
        )
    }
}

/// Extract and normalize text from a document buffer.
///
/// Every internal failure, and a document that yields no text at all, is reported as
/// [`ResumeMatcherError::ExtractionFailed`]. The buffer is not retained.
pub fn extract_document(document: &RawDocument<'_>) -> Result<NormalizedText> {
    let raw = match document.format {
        FileType::Pdf => PdfExtractor.extract(document.bytes),
        FileType::Text => PlainTextExtractor.extract(document.bytes),
        FileType::Markdown => MarkdownExtractor.extract(document.bytes),
        FileType::Unknown => Err(ResumeMatcherError::UnsupportedFormat(
            "Unrecognized document format".to_string(),
        )),
    };

    let raw = raw.map_err(|e| {
        warn!("Error extracting text from {:?} document: {}", document.format, e);
        ResumeMatcherError::ExtractionFailed(e.to_string())
    })?;

    let text = NormalizedText::new(&raw);
    if text.is_empty() {
        warn!("No text found in {:?} document ({} bytes)", document.format, document.bytes.len());
        return Err(ResumeMatcherError::ExtractionFailed(
            "Document contains no extractable text".to_string(),
        ));
    }

    debug!("Extracted {} characters from {:?} document", text.len(), document.format);
    Ok(text)
}
