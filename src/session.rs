// src/session.rs
//! Per-user JSON blob store under fixed keys.
//!
//! The client app persisted exactly two blobs in local storage: the active
//! outreach bundle and the past-searches list. The server keeps the same
//! key-value shape, scoped to the authenticated user.

use anyhow::{Context, Result};
use chrono::Utc;
use sqlx::{Row, SqlitePool};

use crate::history::SearchHistory;
use crate::outreach::OutreachBundle;

/// Key for the active bundle blob.
pub const OUTREACH_DATA_KEY: &str = "outreachData";
/// Key for the serialized search-history list.
pub const PAST_SEARCHES_KEY: &str = "hireloophole_past_searches";

pub struct SessionStore<'a> {
    pool: &'a SqlitePool,
}

impl<'a> SessionStore<'a> {
    pub fn new(pool: &'a SqlitePool) -> Self {
        Self { pool }
    }

    /// Fetch the raw blob stored under `key` for a user.
    pub async fn get_blob(&self, user_id: &str, key: &str) -> Result<Option<String>> {
        let row = sqlx::query(
            r#"
            SELECT value FROM client_state
            WHERE user_id = ? AND key = ?
            "#,
        )
        .bind(user_id)
        .bind(key)
        .fetch_optional(self.pool)
        .await?;

        Ok(row.map(|r| r.get::<String, _>("value")))
    }

    /// Store a blob under `key`, replacing any previous value.
    pub async fn put_blob(&self, user_id: &str, key: &str, value: &str) -> Result<()> {
        sqlx::query(
            r#"
            INSERT INTO client_state (user_id, key, value, updated_at)
            VALUES (?, ?, ?, ?)
            ON CONFLICT (user_id, key) DO UPDATE SET
                value = excluded.value,
                updated_at = excluded.updated_at
            "#,
        )
        .bind(user_id)
        .bind(key)
        .bind(value)
        .bind(Utc::now())
        .execute(self.pool)
        .await?;

        Ok(())
    }

    pub async fn delete_blob(&self, user_id: &str, key: &str) -> Result<()> {
        sqlx::query(
            r#"
            DELETE FROM client_state
            WHERE user_id = ? AND key = ?
            "#,
        )
        .bind(user_id)
        .bind(key)
        .execute(self.pool)
        .await?;

        Ok(())
    }

    /// The user's active bundle, if one has been generated or loaded.
    pub async fn load_active_bundle(&self, user_id: &str) -> Result<Option<OutreachBundle>> {
        match self.get_blob(user_id, OUTREACH_DATA_KEY).await? {
            Some(raw) => {
                let bundle = serde_json::from_str(&raw)
                    .context("Failed to deserialize stored outreach bundle")?;
                Ok(Some(bundle))
            }
            None => Ok(None),
        }
    }

    pub async fn store_active_bundle(&self, user_id: &str, bundle: &OutreachBundle) -> Result<()> {
        let raw = serde_json::to_string(bundle).context("Failed to serialize outreach bundle")?;
        self.put_blob(user_id, OUTREACH_DATA_KEY, &raw).await
    }

    /// The user's search history; an empty history when none is stored yet
    /// or the stored blob is unreadable.
    pub async fn load_history(&self, user_id: &str) -> Result<SearchHistory> {
        match self.get_blob(user_id, PAST_SEARCHES_KEY).await? {
            Some(raw) => Ok(serde_json::from_str(&raw).unwrap_or_default()),
            None => Ok(SearchHistory::new()),
        }
    }

    pub async fn store_history(&self, user_id: &str, history: &SearchHistory) -> Result<()> {
        let raw = serde_json::to_string(history).context("Failed to serialize search history")?;
        self.put_blob(user_id, PAST_SEARCHES_KEY, &raw).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::run_migrations;
    use crate::extraction::fallback::fallback_output;

    async fn test_pool() -> SqlitePool {
        // One connection: each in-memory SQLite connection is its own db.
        let pool = sqlx::sqlite::SqlitePoolOptions::new()
            .max_connections(1)
            .connect("sqlite::memory:")
            .await
            .unwrap();
        run_migrations(&pool).await.unwrap();
        pool
    }

    #[tokio::test]
    async fn test_blob_round_trip_and_overwrite() {
        let pool = test_pool().await;
        let store = SessionStore::new(&pool);

        assert!(store.get_blob("u1", "k").await.unwrap().is_none());

        store.put_blob("u1", "k", "{\"a\":1}").await.unwrap();
        assert_eq!(
            store.get_blob("u1", "k").await.unwrap().as_deref(),
            Some("{\"a\":1}")
        );

        store.put_blob("u1", "k", "{\"a\":2}").await.unwrap();
        assert_eq!(
            store.get_blob("u1", "k").await.unwrap().as_deref(),
            Some("{\"a\":2}")
        );

        store.delete_blob("u1", "k").await.unwrap();
        assert!(store.get_blob("u1", "k").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_blobs_are_scoped_per_user() {
        let pool = test_pool().await;
        let store = SessionStore::new(&pool);

        store.put_blob("u1", OUTREACH_DATA_KEY, "one").await.unwrap();
        assert!(store
            .get_blob("u2", OUTREACH_DATA_KEY)
            .await
            .unwrap()
            .is_none());
    }

    #[tokio::test]
    async fn test_active_bundle_round_trip() {
        let pool = test_pool().await;
        let store = SessionStore::new(&pool);

        let bundle =
            OutreachBundle::from_extraction(fallback_output("https://techcorp.com/careers/42"));
        store.store_active_bundle("u1", &bundle).await.unwrap();

        let loaded = store.load_active_bundle("u1").await.unwrap().unwrap();
        assert_eq!(
            loaded.job_details.unwrap().url,
            "https://techcorp.com/careers/42"
        );
    }

    #[tokio::test]
    async fn test_history_defaults_to_empty() {
        let pool = test_pool().await;
        let store = SessionStore::new(&pool);

        let history = store.load_history("nobody").await.unwrap();
        assert!(history.is_empty());
    }
}
