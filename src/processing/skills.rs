//! Skill vocabulary and keyword skill matching

use crate::error::{Result, ResumeMatcherError};
use log::{debug, info, warn};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeSet, HashSet};
use std::path::Path;
use std::sync::Arc;

const DEFAULT_SKILLS: &[&str] = &[
    "Python", "Java", "JavaScript", "TypeScript", "C++", "C#", "Go", "Rust", "SQL",
    "PostgreSQL", "MySQL", "MongoDB", "Redis", "Docker", "Kubernetes", "AWS", "Azure",
    "GCP", "Git", "Linux", "React", "Angular", "Vue", "Node.js", "Django", "Flask",
    "FastAPI", "Spring", "HTML", "CSS", "REST", "GraphQL", "Machine Learning",
    "Deep Learning", "TensorFlow", "PyTorch", "Pandas", "NumPy", "CI/CD", "Agile",
];

/// Ordered canonical skill labels, unique under case-insensitive comparison.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkillVocabulary {
    labels: Vec<String>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum VocabularyFile {
    List(Vec<String>),
    Table { skills: Vec<String> },
}

impl VocabularyFile {
    fn into_labels(self) -> Vec<String> {
        match self {
            VocabularyFile::List(labels) | VocabularyFile::Table { skills: labels } => labels,
        }
    }
}

impl Default for SkillVocabulary {
    fn default() -> Self {
        Self::from_labels(DEFAULT_SKILLS.iter().copied())
    }
}

impl SkillVocabulary {
    /// Build a vocabulary, keeping the first spelling of each label and dropping blanks.
    pub fn from_labels<I, S>(labels: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut seen = HashSet::new();
        let mut unique = Vec::new();

        for label in labels {
            let label = label.as_ref().trim();
            if label.is_empty() {
                continue;
            }
            if seen.insert(label.to_lowercase()) {
                unique.push(label.to_string());
            } else {
                debug!("Skipping duplicate skill label: {}", label);
            }
        }

        Self { labels: unique }
    }

    /// Load labels from a JSON list, a JSON `{"skills": [...]}` object, or a TOML `skills = [...]` file.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            ResumeMatcherError::VocabularyLoad(format!("Cannot read '{}': {}", path.display(), e))
        })?;

        let is_toml = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| ext.eq_ignore_ascii_case("toml"))
            .unwrap_or(false);

        let file: VocabularyFile = if is_toml {
            toml::from_str(&content).map_err(|e| {
                ResumeMatcherError::VocabularyLoad(format!("Invalid TOML in '{}': {}", path.display(), e))
            })?
        } else {
            serde_json::from_str(&content).map_err(|e| {
                ResumeMatcherError::VocabularyLoad(format!("Invalid JSON in '{}': {}", path.display(), e))
            })?
        };

        let vocabulary = Self::from_labels(file.into_labels());
        if vocabulary.is_empty() {
            return Err(ResumeMatcherError::VocabularyLoad(format!(
                "'{}' contains no skill labels",
                path.display()
            )));
        }

        Ok(vocabulary)
    }

    /// Load from `path`, substituting the built-in vocabulary when it is unset or unreadable.
    pub fn load_or_default(path: Option<&Path>) -> Self {
        let Some(path) = path else {
            info!("No skill vocabulary configured, using built-in list");
            return Self::default();
        };

        match Self::load(path) {
            Ok(vocabulary) => {
                info!("Loaded {} skills from {}", vocabulary.len(), path.display());
                vocabulary
            }
            Err(e) => {
                warn!("{}; falling back to built-in skill list", e);
                Self::default()
            }
        }
    }

    pub fn labels(&self) -> &[String] {
        &self.labels
    }

    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }
}

/// Canonical labels found in a text. Membership is all that matters.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct SkillSet(BTreeSet<String>);

impl SkillSet {
    pub fn contains(&self, label: &str) -> bool {
        self.0.contains(label)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }

    /// Labels in `self` that are absent from `other`.
    pub fn difference(&self, other: &SkillSet) -> SkillSet {
        SkillSet(self.0.difference(&other.0).cloned().collect())
    }

    pub fn into_vec(self) -> Vec<String> {
        self.0.into_iter().collect()
    }
}

impl<S: Into<String>> FromIterator<S> for SkillSet {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        SkillSet(iter.into_iter().map(Into::into).collect())
    }
}

/// Case-insensitive substring matcher over a shared vocabulary.
///
/// Matching is plain containment, not word-boundary aware: a label such as "Go" also
/// matches inside "Google", and "Java" inside "JavaScript".
#[derive(Debug, Clone)]
pub struct SkillMatcher {
    vocabulary: Arc<SkillVocabulary>,
    lowered: Vec<String>,
}

impl SkillMatcher {
    pub fn new(vocabulary: Arc<SkillVocabulary>) -> Self {
        let lowered = vocabulary.labels().iter().map(|l| l.to_lowercase()).collect();
        Self { vocabulary, lowered }
    }

    pub fn vocabulary(&self) -> &SkillVocabulary {
        &self.vocabulary
    }

    pub fn match_skills(&self, text: &str) -> SkillSet {
        let haystack = text.to_lowercase();

        self.vocabulary
            .labels()
            .iter()
            .zip(&self.lowered)
            .filter(|(_, needle)| haystack.contains(needle.as_str()))
            .map(|(label, _)| label.clone())
            .collect()
    }
}
