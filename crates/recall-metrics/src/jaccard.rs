use std::collections::HashSet;

use recall_core::scoring::{ScoreReport, Scorer};

use crate::text::tokens;

/// Jaccard index over the word sets of the two answers: vocabulary
/// overlap, order-insensitive.
pub struct JaccardScorer;

pub fn similarity(a: &str, b: &str) -> f64 {
    let wa: HashSet<String> = tokens(a).into_iter().collect();
    let wb: HashSet<String> = tokens(b).into_iter().collect();
    if wa.is_empty() || wb.is_empty() {
        return 0.0;
    }
    let intersection = wa.intersection(&wb).count();
    let union = wa.union(&wb).count();
    intersection as f64 / union as f64
}

impl Scorer for JaccardScorer {
    fn name(&self) -> &'static str {
        "jaccard"
    }

    fn score(&self, llm_answer: &str, original_answer: &str) -> ScoreReport {
        ScoreReport::plain(similarity(llm_answer, original_answer))
    }
}
