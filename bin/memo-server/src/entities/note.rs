use std::future::Future;

use crate::entities::{SqliteStore, dao::NoteRecord};

pub trait NoteStore: Send + Sync + 'static {
    fn insert_note(&self, note: NoteRecord) -> impl Future<Output = Result<(), sqlx::Error>> + Send;
    /// Every note, newest first.
    fn list_notes(&self) -> impl Future<Output = Result<Vec<NoteRecord>, sqlx::Error>> + Send;
    /// Remove the note keyed by `id`; returns the number of rows removed.
    fn delete_note(&self, id: &str) -> impl Future<Output = Result<u64, sqlx::Error>> + Send;
    /// Round-trip to the backend without touching any note.
    fn ping(&self) -> impl Future<Output = Result<(), sqlx::Error>> + Send;
}

impl NoteStore for SqliteStore {
    async fn insert_note(&self, note: NoteRecord) -> Result<(), sqlx::Error> {
        let created_at = note.created_at_column();
        sqlx::query("INSERT INTO notes (id, content, created_at) VALUES (?1, ?2, ?3)")
            .bind(&note.id)
            .bind(&note.content)
            .bind(&created_at)
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    async fn list_notes(&self) -> Result<Vec<NoteRecord>, sqlx::Error> {
        // rowid breaks ties between notes created within the same microsecond.
        let rows: Vec<(String, String, String)> = sqlx::query_as(
            "SELECT id, content, created_at FROM notes \
             ORDER BY created_at DESC, rowid DESC",
        )
        .fetch_all(&self.pool)
        .await?;
        rows.into_iter()
            .map(|(id, content, created_at)| {
                let created_at = created_at.parse().map_err(|e: chrono::ParseError| {
                    tracing::warn!(note_id = %id, raw = %created_at, "unreadable note created_at");
                    sqlx::Error::Decode(Box::new(e))
                })?;
                Ok(NoteRecord { id, content, created_at })
            })
            .collect()
    }

    async fn delete_note(&self, id: &str) -> Result<u64, sqlx::Error> {
        let result = sqlx::query("DELETE FROM notes WHERE id = ?1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected())
    }

    async fn ping(&self) -> Result<(), sqlx::Error> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }
}

// ── Tests ──────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod test {
    use super::*;
    use chrono::{Duration, SubsecRound, Utc};

    fn record(id: &str, content: &str, offset_secs: i64) -> NoteRecord {
        NoteRecord {
            id: id.into(),
            content: content.into(),
            created_at: (Utc::now() + Duration::seconds(offset_secs)).trunc_subsecs(6),
        }
    }

    #[tokio::test]
    async fn list_orders_by_created_at_descending() {
        let store = SqliteStore::connect("sqlite::memory:").await.unwrap();
        store.insert_note(record("b", "second", 10)).await.unwrap();
        store.insert_note(record("a", "first", 0)).await.unwrap();
        store.insert_note(record("c", "third", 20)).await.unwrap();

        let ids: Vec<String> = store.list_notes().await.unwrap().into_iter().map(|n| n.id).collect();
        assert_eq!(ids, ["c", "b", "a"]);
    }

    #[tokio::test]
    async fn created_at_survives_round_trip() {
        let store = SqliteStore::connect("sqlite::memory:").await.unwrap();
        let note = record("x", "hello", 0);
        store.insert_note(note.clone()).await.unwrap();
        assert_eq!(store.list_notes().await.unwrap(), vec![note]);
    }

    #[tokio::test]
    async fn delete_reports_affected_rows() {
        let store = SqliteStore::connect("sqlite::memory:").await.unwrap();
        store.insert_note(record("x", "hello", 0)).await.unwrap();
        assert_eq!(store.delete_note("x").await.unwrap(), 1);
        assert_eq!(store.delete_note("x").await.unwrap(), 0);
        assert!(store.list_notes().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn blank_content_is_rejected_by_schema() {
        let store = SqliteStore::connect("sqlite::memory:").await.unwrap();
        assert!(store.insert_note(record("x", "   ", 0)).await.is_err());
    }

    #[tokio::test]
    async fn closed_store_fails() {
        let store = SqliteStore::connect("sqlite::memory:").await.unwrap();
        store.ping().await.unwrap();
        store.close().await;
        assert!(matches!(store.list_notes().await, Err(sqlx::Error::PoolClosed)));
        assert!(matches!(store.ping().await, Err(sqlx::Error::PoolClosed)));
    }

    #[tokio::test]
    async fn unreadable_created_at_is_decode_error() {
        let store = SqliteStore::connect("sqlite::memory:").await.unwrap();
        sqlx::query("INSERT INTO notes (id, content, created_at) VALUES ('x', 'hello', 'yesterday')")
            .execute(&store.pool)
            .await
            .unwrap();
        assert!(matches!(store.list_notes().await, Err(sqlx::Error::Decode(_))));
    }
}
