//! Text normalization and tokenization

use regex::Regex;
use std::collections::HashSet;
use stop_words::{get, LANGUAGE};

/// Collapse every whitespace run (newlines and tabs included) into one ASCII space and trim.
pub fn normalize(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

pub struct TextProcessor {
    stop_words: HashSet<String>,
    token_regex: Regex,
}

impl Default for TextProcessor {
    fn default() -> Self {
        Self::new()
    }
}

impl TextProcessor {
    pub fn new() -> Self {
        let stop_words = get(LANGUAGE::English)
            .into_iter()
            .map(|word| word.to_lowercase())
            .collect();

        // Tokens are runs of two or more word characters
        let token_regex = Regex::new(r"\b\w\w+\b").expect("Invalid token regex");

        Self {
            stop_words,
            token_regex,
        }
    }

    /// Lowercased tokens in document order, stop words included.
    pub fn tokenize(&self, text: &str) -> Vec<String> {
        let lowered = text.to_lowercase();
        self.token_regex
            .find_iter(&lowered)
            .map(|m| m.as_str().to_string())
            .collect()
    }

    /// Lowercased tokens with English stop words removed.
    pub fn content_terms(&self, text: &str) -> Vec<String> {
        self.tokenize(text)
            .into_iter()
            .filter(|token| !self.is_stop_word(token))
            .collect()
    }

    pub fn is_stop_word(&self, word: &str) -> bool {
        self.stop_words.contains(word)
    }
}
