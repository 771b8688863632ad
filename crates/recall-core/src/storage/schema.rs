/// DDL for the scored-answer store. Every statement carries an
/// IF NOT EXISTS guard, so re-applying the batch is a no-op.
pub const DDL: &str = "
CREATE TABLE IF NOT EXISTS query_results (
    id               INTEGER PRIMARY KEY,
    question_id      INTEGER NOT NULL,
    question_title   TEXT NOT NULL DEFAULT '',
    question_content TEXT NOT NULL DEFAULT '',
    original_answer  TEXT NOT NULL DEFAULT '',
    llm_answer       TEXT NOT NULL DEFAULT '',
    score            REAL NOT NULL DEFAULT 0.0,
    access_count     INTEGER NOT NULL DEFAULT 1,
    created_at       TEXT NOT NULL DEFAULT CURRENT_TIMESTAMP,
    last_accessed    TEXT NOT NULL DEFAULT CURRENT_TIMESTAMP
);

CREATE UNIQUE INDEX IF NOT EXISTS idx_question_id ON query_results(question_id);
CREATE INDEX IF NOT EXISTS idx_access_count ON query_results(access_count);
CREATE INDEX IF NOT EXISTS idx_created_at ON query_results(created_at);
";
