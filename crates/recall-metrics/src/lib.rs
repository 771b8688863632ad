use std::sync::Arc;

use recall_core::scoring::Scorer;

mod combined;
mod jaccard;
mod levenshtein;
mod text;
mod tfidf;

pub use combined::CombinedScorer;
pub use jaccard::JaccardScorer;
pub use levenshtein::LevenshteinScorer;
pub use tfidf::TfidfScorer;

/// Every scorer the service ships with. `tfidf` is the recommended
/// default; `combined` blends all three.
pub fn default_scorers() -> Vec<Arc<dyn Scorer>> {
    vec![
        Arc::new(tfidf::TfidfScorer),
        Arc::new(jaccard::JaccardScorer),
        Arc::new(levenshtein::LevenshteinScorer),
        Arc::new(combined::CombinedScorer),
    ]
}
