use serde::{Deserialize, Serialize};

/// A scored question/answer pair as persisted in `query_results`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QueryResult {
    pub id: i64,
    pub question_id: i64,
    pub question_title: String,
    pub question_content: String,
    pub original_answer: String,
    pub llm_answer: String,
    pub score: f64,
    pub access_count: i64,
    pub created_at: String,
    pub last_accessed: String,
}

/// Submission payload for a scored attempt.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewResult {
    pub question_id: i64,
    pub question_title: String,
    #[serde(default)]
    pub question_content: String,
    pub original_answer: String,
    pub llm_answer: String,
}

/// Outcome of persisting a submission. `created` is false when the
/// question was already stored and only its counters moved.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoreOutcome {
    pub id: i64,
    pub access_count: i64,
    pub created: bool,
}

/// Read-path result: the answer plus where it was served from.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LookupResult {
    pub question_id: i64,
    pub question_title: String,
    pub llm_answer: String,
    pub score: f64,
    pub access_count: i64,
    pub from_cache: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TopAccess {
    pub question_id: i64,
    pub question_title: String,
    pub access_count: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TopScore {
    pub question_id: i64,
    pub question_title: String,
    pub score: f64,
}

/// Aggregate analytics over the persisted results.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageStats {
    pub total_questions: u64,
    pub total_accesses: u64,
    pub average_score: f64,
    pub most_accessed: Option<TopAccess>,
    pub highest_score: Option<TopScore>,
    pub lowest_score: Option<TopScore>,
}
