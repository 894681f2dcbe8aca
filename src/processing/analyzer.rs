//! Analysis engine: extraction, similarity scoring and skill gap detection

use crate::error::Result;
use crate::input::text_extractor::{extract_document, NormalizedText, RawDocument};
use crate::processing::similarity::SimilarityScorer;
use crate::processing::skills::{SkillMatcher, SkillSet, SkillVocabulary};
use log::{debug, info};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Outcome of matching one resume against one job description.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisResult {
    /// TF-IDF cosine similarity, 0–100 with two decimals.
    pub score: f64,
    /// Vocabulary skills found in the resume.
    pub resume_skills: Vec<String>,
    /// Skills the job description mentions that the resume does not.
    pub missing_skills: Vec<String>,
}

/// Stateless analysis pipeline. Safe to share across concurrent requests.
pub struct AnalysisEngine {
    scorer: SimilarityScorer,
    matcher: SkillMatcher,
}

impl AnalysisEngine {
    pub fn new(vocabulary: Arc<SkillVocabulary>) -> Self {
        Self {
            scorer: SimilarityScorer::new(),
            matcher: SkillMatcher::new(vocabulary),
        }
    }

    /// Extract the document and compare it with `job_description`.
    ///
    /// Extraction failures end the analysis before any scoring or matching happens.
    pub fn analyze(&self, document: &RawDocument<'_>, job_description: &str) -> Result<AnalysisResult> {
        let resume_text = extract_document(document)?;
        Ok(self.analyze_text(&resume_text, job_description))
    }

    /// Compare already extracted resume text with `job_description`.
    pub fn analyze_text(&self, resume_text: &NormalizedText, job_description: &str) -> AnalysisResult {
        let job_text = NormalizedText::new(job_description);

        let score = self.scorer.score(resume_text.as_str(), job_text.as_str());

        let resume_skills = self.matcher.match_skills(resume_text.as_str());
        let job_skills = self.matcher.match_skills(job_text.as_str());
        let missing_skills = job_skills.difference(&resume_skills);

        debug!(
            "Resume skills: {:?}, job skills: {:?}",
            resume_skills.iter().collect::<Vec<_>>(),
            job_skills.iter().collect::<Vec<_>>()
        );
        info!(
            "Analysis complete: score {:.2}, {} resume skills, {} missing",
            score,
            resume_skills.len(),
            missing_skills.len()
        );

        AnalysisResult {
            score,
            resume_skills: resume_skills.into_vec(),
            missing_skills: missing_skills.into_vec(),
        }
    }

    pub fn match_skills(&self, text: &str) -> SkillSet {
        self.matcher.match_skills(text)
    }

    pub fn vocabulary(&self) -> &SkillVocabulary {
        self.matcher.vocabulary()
    }
}
