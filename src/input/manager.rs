//! Input manager for reading documents from disk

use crate::error::{Result, ResumeMatcherError};
use crate::input::file_detector::FileType;
use crate::input::text_extractor::{extract_document, NormalizedText, RawDocument};
use log::info;
use std::collections::HashMap;
use std::path::Path;
use tokio::fs;

pub struct InputManager {
    cache: HashMap<String, NormalizedText>,
    enable_cache: bool,
}

impl Default for InputManager {
    fn default() -> Self {
        Self::new()
    }
}

impl InputManager {
    pub fn new() -> Self {
        Self {
            cache: HashMap::new(),
            enable_cache: true,
        }
    }

    pub fn with_cache(mut self, enable: bool) -> Self {
        self.enable_cache = enable;
        self
    }

    /// Read a document from disk and return its normalized text.
    pub async fn extract_text(&mut self, path: &Path) -> Result<NormalizedText> {
        let path_str = path.to_string_lossy().to_string();

        if self.enable_cache {
            if let Some(cached_text) = self.cache.get(&path_str) {
                info!("Using cached text for: {}", path.display());
                return Ok(cached_text.clone());
            }
        }

        if !path.exists() {
            return Err(ResumeMatcherError::InvalidInput(format!(
                "File does not exist: {}",
                path.display()
            )));
        }

        let bytes = fs::read(path).await?;
        let file_type = self.detect_file_type(path, &bytes)?;

        info!("Extracting text from {:?} file: {}", file_type, path.display());
        let text = extract_document(&RawDocument::new(&bytes, file_type))?;

        if self.enable_cache {
            self.cache.insert(path_str, text.clone());
        }

        Ok(text)
    }

    fn detect_file_type(&self, path: &Path, bytes: &[u8]) -> Result<FileType> {
        let file_name = path.file_name().and_then(|name| name.to_str());

        match FileType::detect(file_name, bytes) {
            FileType::Unknown => Err(ResumeMatcherError::UnsupportedFormat(format!(
                "Unsupported file type for: {}",
                path.display()
            ))),
            file_type => Ok(file_type),
        }
    }

    pub fn clear_cache(&mut self) {
        self.cache.clear();
    }

    pub fn cache_size(&self) -> usize {
        self.cache.len()
    }
}
