use recall_core::model::NewResult;
use recall_core::storage::store::Store;
use tempfile::tempdir;

fn sample(question_id: i64, title: &str) -> NewResult {
    NewResult {
        question_id,
        question_title: title.to_string(),
        question_content: "some context".to_string(),
        original_answer: "the reference answer".to_string(),
        llm_answer: "the model answer".to_string(),
    }
}

#[test]
fn test_schema_applies_idempotently() -> anyhow::Result<()> {
    let dir = tempdir()?;
    let store = Store::open(&dir.path().join("recall.db"))?;
    store.init_schema()?;
    // Re-applying the DDL must be a no-op thanks to IF NOT EXISTS guards.
    store.init_schema()?;

    let conn = rusqlite::Connection::open(dir.path().join("recall.db"))?;
    let tables: i64 = conn.query_row(
        "SELECT COUNT(*) FROM sqlite_master WHERE type='table' AND name='query_results'",
        [],
        |r| r.get(0),
    )?;
    assert_eq!(tables, 1);

    let indexes: i64 = conn.query_row(
        "SELECT COUNT(*) FROM sqlite_master WHERE type='index'
         AND name IN ('idx_question_id', 'idx_access_count', 'idx_created_at')",
        [],
        |r| r.get(0),
    )?;
    assert_eq!(indexes, 3);
    Ok(())
}

#[test]
fn test_upsert_lifecycle() -> anyhow::Result<()> {
    let store = Store::open_in_memory()?;
    store.init_schema()?;

    let created = store.upsert_result(&sample(1, "first question"), 0.8)?;
    assert!(created.created);
    assert_eq!(created.access_count, 1);

    // Same question id again: counters move, nothing else.
    let updated = store.upsert_result(&sample(1, "first question"), 0.2)?;
    assert!(!updated.created);
    assert_eq!(updated.id, created.id);
    assert_eq!(updated.access_count, 2);

    let row = store.find_by_question_id(1)?.expect("row present");
    assert_eq!(row.access_count, 2);
    assert!((row.score - 0.8).abs() < 1e-12, "stored score stays as first recorded");
    assert!(row.last_accessed >= row.created_at);
    Ok(())
}

#[test]
fn test_record_access_increments() -> anyhow::Result<()> {
    let store = Store::open_in_memory()?;
    store.init_schema()?;
    store.upsert_result(&sample(7, "seventh"), 0.5)?;

    assert_eq!(store.record_access(7)?, Some(2));
    assert_eq!(store.record_access(7)?, Some(3));
    assert_eq!(store.record_access(999)?, None);

    let row = store.find_by_question_id(7)?.expect("row present");
    assert_eq!(row.access_count, 3);
    Ok(())
}

#[test]
fn test_recent_orders_newest_first() -> anyhow::Result<()> {
    let store = Store::open_in_memory()?;
    store.init_schema()?;
    for i in 1..=5 {
        store.upsert_result(&sample(i, &format!("q{}", i)), 0.1 * i as f64)?;
    }

    let page = store.recent(2, 0)?;
    assert_eq!(page.len(), 2);
    assert_eq!(page[0].question_id, 5);
    assert_eq!(page[1].question_id, 4);

    let next = store.recent(2, 2)?;
    assert_eq!(next[0].question_id, 3);
    Ok(())
}

#[test]
fn test_stats_aggregates() -> anyhow::Result<()> {
    let store = Store::open_in_memory()?;
    store.init_schema()?;
    store.upsert_result(&sample(1, "low"), 0.2)?;
    store.upsert_result(&sample(2, "high"), 0.9)?;
    store.record_access(2)?;
    store.record_access(2)?;

    let stats = store.stats()?;
    assert_eq!(stats.total_questions, 2);
    assert_eq!(stats.total_accesses, 4);
    assert!((stats.average_score - 0.55).abs() < 1e-9);
    assert_eq!(stats.most_accessed.as_ref().map(|t| t.question_id), Some(2));
    assert_eq!(stats.highest_score.as_ref().map(|t| t.question_id), Some(2));
    assert_eq!(stats.lowest_score.as_ref().map(|t| t.question_id), Some(1));
    Ok(())
}

#[test]
fn test_empty_store_stats() -> anyhow::Result<()> {
    let store = Store::open_in_memory()?;
    store.init_schema()?;
    let stats = store.stats()?;
    assert_eq!(stats.total_questions, 0);
    assert_eq!(stats.total_accesses, 0);
    assert_eq!(stats.average_score, 0.0);
    assert!(stats.most_accessed.is_none());
    Ok(())
}
