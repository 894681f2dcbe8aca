//! Text processing and analysis module

pub mod text_processor;
pub mod skills;
pub mod similarity;
pub mod analyzer;

pub use analyzer::{AnalysisEngine, AnalysisResult};
pub use similarity::SimilarityScorer;
pub use skills::{SkillMatcher, SkillSet, SkillVocabulary};
