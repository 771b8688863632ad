/// Result of scoring a model answer against its reference answer.
#[derive(Debug, Clone)]
pub struct ScoreReport {
    /// Similarity in `[0.0, 1.0]`, higher is better.
    pub score: f64,
    pub details: serde_json::Value,
}

impl ScoreReport {
    pub fn plain(score: f64) -> Self {
        Self {
            score,
            details: serde_json::json!({}),
        }
    }
}

/// Answer-similarity scorer. Implementations live in `recall-metrics`;
/// the service only depends on this seam.
pub trait Scorer: Send + Sync {
    fn name(&self) -> &'static str;
    fn score(&self, llm_answer: &str, original_answer: &str) -> ScoreReport;
}
