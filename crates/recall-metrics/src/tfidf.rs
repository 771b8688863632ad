use std::collections::{HashMap, HashSet};

use recall_core::scoring::{ScoreReport, Scorer};

use crate::text::tokens;

/// TF-IDF weighted cosine similarity over the two answers, treating the
/// pair as a two-document corpus with smoothed document frequencies
/// (idf = ln((1 + n) / (1 + df)) + 1, n = 2).
pub struct TfidfScorer;

pub fn similarity(a: &str, b: &str) -> f64 {
    let ta = tokens(a);
    let tb = tokens(b);
    if ta.is_empty() || tb.is_empty() {
        return 0.0;
    }

    let counts_a = term_counts(&ta);
    let counts_b = term_counts(&tb);

    let vocab: HashSet<&str> = counts_a.keys().chain(counts_b.keys()).copied().collect();

    let mut dot = 0.0;
    let mut norm_a = 0.0;
    let mut norm_b = 0.0;
    for term in vocab {
        let tf_a = *counts_a.get(term).unwrap_or(&0) as f64;
        let tf_b = *counts_b.get(term).unwrap_or(&0) as f64;
        let df = (tf_a > 0.0) as u32 + (tf_b > 0.0) as u32;
        let idf = ((1.0 + 2.0) / (1.0 + df as f64)).ln() + 1.0;
        let wa = tf_a * idf;
        let wb = tf_b * idf;
        dot += wa * wb;
        norm_a += wa * wa;
        norm_b += wb * wb;
    }

    if norm_a == 0.0 || norm_b == 0.0 {
        return 0.0;
    }
    (dot / (norm_a.sqrt() * norm_b.sqrt())).clamp(0.0, 1.0)
}

fn term_counts(tokens: &[String]) -> HashMap<&str, u32> {
    let mut counts = HashMap::new();
    for t in tokens {
        *counts.entry(t.as_str()).or_insert(0) += 1;
    }
    counts
}

impl Scorer for TfidfScorer {
    fn name(&self) -> &'static str {
        "tfidf"
    }

    fn score(&self, llm_answer: &str, original_answer: &str) -> ScoreReport {
        ScoreReport::plain(similarity(llm_answer, original_answer))
    }
}
