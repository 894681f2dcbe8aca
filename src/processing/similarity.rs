//! TF-IDF cosine similarity between two texts

use crate::processing::text_processor::TextProcessor;
use log::{debug, warn};
use std::collections::{BTreeMap, BTreeSet};

/// Scores how close two texts are, as a percentage in `[0, 100]` with two decimals.
///
/// The two inputs form a two-document corpus. Each is turned into a vector of raw term
/// counts (English stop words excluded) weighted by the smoothed inverse document
/// frequency `ln((1 + n) / (1 + df)) + 1`, L2-normalized, and compared by cosine.
pub struct SimilarityScorer {
    processor: TextProcessor,
}

impl Default for SimilarityScorer {
    fn default() -> Self {
        Self::new()
    }
}

impl SimilarityScorer {
    pub fn new() -> Self {
        Self {
            processor: TextProcessor::new(),
        }
    }

    /// Never fails: empty inputs, empty vocabularies and numerical problems all score 0.0.
    pub fn score(&self, document: &str, target: &str) -> f64 {
        if document.trim().is_empty() || target.trim().is_empty() {
            return 0.0;
        }

        match self.cosine(document, target) {
            Some(cosine) => to_percentage(cosine),
            None => {
                warn!("Similarity computation degraded, reporting 0.0");
                0.0
            }
        }
    }

    fn cosine(&self, document: &str, target: &str) -> Option<f64> {
        let doc_counts = term_counts(self.processor.content_terms(document));
        let target_counts = term_counts(self.processor.content_terms(target));

        let vocabulary: BTreeSet<&str> = doc_counts
            .keys()
            .chain(target_counts.keys())
            .map(String::as_str)
            .collect();

        if vocabulary.is_empty() {
            debug!("No content terms left after stop word removal");
            return Some(0.0);
        }

        let corpus_size = 2.0_f64;
        let idf: Vec<f64> = vocabulary
            .iter()
            .map(|term| {
                let df = [&doc_counts, &target_counts]
                    .iter()
                    .filter(|counts| counts.contains_key(*term))
                    .count() as f64;
                ((1.0 + corpus_size) / (1.0 + df)).ln() + 1.0
            })
            .collect();

        let doc_vector = l2_normalize(weigh(&vocabulary, &doc_counts, &idf))?;
        let target_vector = l2_normalize(weigh(&vocabulary, &target_counts, &idf))?;

        let dot: f64 = doc_vector
            .iter()
            .zip(&target_vector)
            .map(|(a, b)| a * b)
            .sum();

        dot.is_finite().then_some(dot)
    }
}

fn term_counts(terms: Vec<String>) -> BTreeMap<String, f64> {
    let mut counts = BTreeMap::new();
    for term in terms {
        *counts.entry(term).or_insert(0.0) += 1.0;
    }
    counts
}

fn weigh(vocabulary: &BTreeSet<&str>, counts: &BTreeMap<String, f64>, idf: &[f64]) -> Vec<f64> {
    vocabulary
        .iter()
        .zip(idf)
        .map(|(term, idf)| counts.get(*term).copied().unwrap_or(0.0) * idf)
        .collect()
}

/// A zero vector stays zero. `None` signals a non-finite norm.
fn l2_normalize(vector: Vec<f64>) -> Option<Vec<f64>> {
    let norm = vector.iter().map(|v| v * v).sum::<f64>().sqrt();

    if !norm.is_finite() {
        return None;
    }
    if norm == 0.0 {
        return Some(vector);
    }

    Some(vector.into_iter().map(|v| v / norm).collect())
}

fn to_percentage(cosine: f64) -> f64 {
    let percentage = (cosine * 100.0 * 100.0).round() / 100.0;
    percentage.clamp(0.0, 100.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    const PAIRS: &[(&str, &str)] = &[
        (
            "Experienced Python developer with Docker and AWS knowledge",
            "Looking for Python, Java, Docker, Kubernetes expert",
        ),
        ("Rust systems programming", "Kubernetes operators written in Go"),
        ("python python python docker", "docker"),
        ("PostgreSQL query tuning", "postgresql QUERY tuning"),
        ("the and of", "Python"),
    ];

    #[test]
    fn test_score_bounds() {
        let scorer = SimilarityScorer::new();
        for (a, b) in PAIRS {
            let score = scorer.score(a, b);
            assert!((0.0..=100.0).contains(&score), "{} out of bounds for {:?}", score, (a, b));
        }
    }

    #[test]
    fn test_empty_input_scores_zero() {
        let scorer = SimilarityScorer::new();
        assert_eq!(scorer.score("Python developer", ""), 0.0);
        assert_eq!(scorer.score("", "Python developer"), 0.0);
        assert_eq!(scorer.score("   ", "Python developer"), 0.0);
        assert_eq!(scorer.score("", ""), 0.0);
    }

    #[test]
    fn test_self_similarity_is_perfect() {
        let scorer = SimilarityScorer::new();
        for text in [
            "Python Docker Kubernetes",
            "Senior Rust engineer building PostgreSQL extensions and Kafka pipelines",
            "terraform terraform ansible",
        ] {
            assert_eq!(scorer.score(text, text), 100.0, "self similarity for {:?}", text);
        }
    }

    #[test]
    fn test_symmetry() {
        let scorer = SimilarityScorer::new();
        for (a, b) in PAIRS {
            assert_eq!(scorer.score(a, b), scorer.score(b, a), "asymmetric for {:?}", (a, b));
        }
    }

    #[test]
    fn test_disjoint_vocabularies_score_zero() {
        let scorer = SimilarityScorer::new();
        assert_eq!(scorer.score("Rust compilers", "Kubernetes operators"), 0.0);
    }

    #[test]
    fn test_stop_words_only_scores_zero() {
        let scorer = SimilarityScorer::new();
        assert_eq!(scorer.score("the and of", "and the of"), 0.0);
    }

    #[test]
    fn test_case_is_ignored() {
        let scorer = SimilarityScorer::new();
        assert_eq!(scorer.score("PostgreSQL query tuning", "postgresql QUERY tuning"), 100.0);
    }

    #[test]
    fn test_shared_terms_score_between() {
        let scorer = SimilarityScorer::new();
        let score = scorer.score(PAIRS[0].0, PAIRS[0].1);
        assert!(score > 0.0 && score < 100.0, "score was {}", score);
    }

    #[test]
    fn test_two_decimal_rounding() {
        assert_eq!(to_percentage(0.123456), 12.35);
        assert_eq!(to_percentage(1.0000000002), 100.0);
        assert_eq!(to_percentage(-0.0000001), 0.0);
    }
}
