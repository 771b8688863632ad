use recall_core::scoring::{ScoreReport, Scorer};

use crate::{jaccard, levenshtein, tfidf};

// TF-IDF dominates: it tracks term importance, the other two only
// vocabulary overlap and edit distance.
const W_TFIDF: f64 = 0.5;
const W_JACCARD: f64 = 0.3;
const W_LEVENSHTEIN: f64 = 0.2;

/// Weighted blend of all three similarities, reporting the components.
pub struct CombinedScorer;

impl Scorer for CombinedScorer {
    fn name(&self) -> &'static str {
        "combined"
    }

    fn score(&self, llm_answer: &str, original_answer: &str) -> ScoreReport {
        let tfidf = tfidf::similarity(llm_answer, original_answer);
        let jaccard = jaccard::similarity(llm_answer, original_answer);
        let levenshtein = levenshtein::similarity(llm_answer, original_answer);
        let score = W_TFIDF * tfidf + W_JACCARD * jaccard + W_LEVENSHTEIN * levenshtein;

        ScoreReport {
            score: score.clamp(0.0, 1.0),
            details: serde_json::json!({
                "tfidf": tfidf,
                "jaccard": jaccard,
                "levenshtein": levenshtein,
            }),
        }
    }
}
