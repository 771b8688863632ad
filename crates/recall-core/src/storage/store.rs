use crate::model::{NewResult, QueryResult, StorageStats, StoreOutcome, TopAccess, TopScore};
use anyhow::Context;
use rusqlite::{params, Connection, OptionalExtension, Row};
use std::path::Path;
use std::sync::{Arc, Mutex};

#[derive(Clone)]
pub struct Store {
    conn: Arc<Mutex<Connection>>,
}

impl Store {
    pub fn open(path: &Path) -> anyhow::Result<Self> {
        let conn = Connection::open(path).context("failed to open sqlite db")?;
        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    pub fn open_in_memory() -> anyhow::Result<Self> {
        let conn =
            Connection::open_in_memory().context("failed to open in-memory sqlite db")?;
        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    pub fn init_schema(&self) -> anyhow::Result<()> {
        let conn = self.conn.lock().unwrap();
        conn.execute_batch(crate::storage::schema::DDL)
            .context("failed to apply schema")?;
        Ok(())
    }

    /// Persists a scored submission. A new `question_id` inserts a row
    /// with `access_count = 1`; a known one increments its counters and
    /// keeps the stored answer and score as first recorded.
    pub fn upsert_result(&self, new: &NewResult, score: f64) -> anyhow::Result<StoreOutcome> {
        let mut conn = self.conn.lock().unwrap();
        let tx = conn.transaction()?;

        let existing: Option<(i64, i64)> = tx
            .query_row(
                "SELECT id, access_count FROM query_results WHERE question_id = ?1",
                params![new.question_id],
                |r| Ok((r.get(0)?, r.get(1)?)),
            )
            .optional()?;

        let outcome = if let Some((id, access_count)) = existing {
            tx.execute(
                "UPDATE query_results
                 SET access_count = access_count + 1, last_accessed = ?1
                 WHERE id = ?2",
                params![now_rfc3339(), id],
            )?;
            StoreOutcome {
                id,
                access_count: access_count + 1,
                created: false,
            }
        } else {
            let now = now_rfc3339();
            tx.execute(
                "INSERT INTO query_results
                 (question_id, question_title, question_content, original_answer,
                  llm_answer, score, access_count, created_at, last_accessed)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, 1, ?7, ?7)",
                params![
                    new.question_id,
                    new.question_title,
                    new.question_content,
                    new.original_answer,
                    new.llm_answer,
                    score,
                    now
                ],
            )?;
            StoreOutcome {
                id: tx.last_insert_rowid(),
                access_count: 1,
                created: true,
            }
        };

        tx.commit()?;
        Ok(outcome)
    }

    /// Read-side accounting: bumps `access_count` and `last_accessed` in
    /// one statement. Returns the new count, or `None` for unknown ids.
    pub fn record_access(&self, question_id: i64) -> anyhow::Result<Option<i64>> {
        let conn = self.conn.lock().unwrap();
        let changed = conn.execute(
            "UPDATE query_results
             SET access_count = access_count + 1, last_accessed = ?1
             WHERE question_id = ?2",
            params![now_rfc3339(), question_id],
        )?;
        if changed == 0 {
            return Ok(None);
        }
        let count = conn.query_row(
            "SELECT access_count FROM query_results WHERE question_id = ?1",
            params![question_id],
            |r| r.get(0),
        )?;
        Ok(Some(count))
    }

    pub fn find_by_question_id(&self, question_id: i64) -> anyhow::Result<Option<QueryResult>> {
        let conn = self.conn.lock().unwrap();
        let row = conn
            .query_row(
                "SELECT id, question_id, question_title, question_content,
                        original_answer, llm_answer, score, access_count,
                        created_at, last_accessed
                 FROM query_results WHERE question_id = ?1",
                params![question_id],
                row_to_result,
            )
            .optional()?;
        Ok(row)
    }

    /// Recent rows, newest first.
    pub fn recent(&self, limit: u32, offset: u32) -> anyhow::Result<Vec<QueryResult>> {
        let conn = self.conn.lock().unwrap();
        let mut stmt = conn.prepare(
            "SELECT id, question_id, question_title, question_content,
                    original_answer, llm_answer, score, access_count,
                    created_at, last_accessed
             FROM query_results
             ORDER BY created_at DESC, id DESC
             LIMIT ?1 OFFSET ?2",
        )?;
        let rows = stmt.query_map(params![limit, offset], row_to_result)?;

        let mut results = Vec::new();
        for r in rows {
            results.push(r?);
        }
        Ok(results)
    }

    pub fn stats(&self) -> anyhow::Result<StorageStats> {
        let conn = self.conn.lock().unwrap();

        let total_questions: i64 =
            conn.query_row("SELECT COUNT(*) FROM query_results", [], |r| r.get(0))?;
        let total_accesses: Option<i64> = conn.query_row(
            "SELECT SUM(access_count) FROM query_results",
            [],
            |r| r.get(0),
        )?;
        let average_score: Option<f64> = conn.query_row(
            "SELECT AVG(score) FROM query_results WHERE score > 0",
            [],
            |r| r.get(0),
        )?;

        let most_accessed = conn
            .query_row(
                "SELECT question_id, question_title, access_count
                 FROM query_results ORDER BY access_count DESC LIMIT 1",
                [],
                |r| {
                    Ok(TopAccess {
                        question_id: r.get(0)?,
                        question_title: r.get(1)?,
                        access_count: r.get(2)?,
                    })
                },
            )
            .optional()?;

        let highest_score = top_score(&conn, "DESC")?;
        let lowest_score = top_score(&conn, "ASC")?;

        Ok(StorageStats {
            total_questions: total_questions as u64,
            total_accesses: total_accesses.unwrap_or(0) as u64,
            average_score: average_score.unwrap_or(0.0),
            most_accessed,
            highest_score,
            lowest_score,
        })
    }
}

fn top_score(conn: &Connection, order: &str) -> anyhow::Result<Option<TopScore>> {
    // order is a compile-time literal, never user input
    let sql = format!(
        "SELECT question_id, question_title, score
         FROM query_results WHERE score > 0
         ORDER BY score {} LIMIT 1",
        order
    );
    let row = conn
        .query_row(&sql, [], |r| {
            Ok(TopScore {
                question_id: r.get(0)?,
                question_title: r.get(1)?,
                score: r.get(2)?,
            })
        })
        .optional()?;
    Ok(row)
}

fn row_to_result(r: &Row) -> rusqlite::Result<QueryResult> {
    Ok(QueryResult {
        id: r.get(0)?,
        question_id: r.get(1)?,
        question_title: r.get(2)?,
        question_content: r.get(3)?,
        original_answer: r.get(4)?,
        llm_answer: r.get(5)?,
        score: r.get(6)?,
        access_count: r.get(7)?,
        created_at: r.get(8)?,
        last_accessed: r.get(9)?,
    })
}

fn now_rfc3339() -> String {
    chrono::Utc::now().to_rfc3339()
}
