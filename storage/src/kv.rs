//! Key-value persistence behind a trait so the credential store never
//! depends on a concrete database.

use std::path::Path;

use async_trait::async_trait;
use dashmap::DashMap;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};
use tracing::info;
use wbot_core::{Result, WalletBotError};

/// Minimal string key-value surface. Implementations must be safe to share
/// across tasks.
#[async_trait]
pub trait KvStore: Send + Sync {
    async fn get(&self, key: &str) -> Result<Option<String>>;

    async fn put(&self, key: &str, value: &str) -> Result<()>;
}

// ---------------------------------------------------------------------------
// SQLite
// ---------------------------------------------------------------------------

/// SQLite-backed store. One row per key, last write wins.
pub struct SqliteKvStore {
    pool: SqlitePool,
}

impl SqliteKvStore {
    /// Opens (and creates if missing) the database file and ensures the
    /// credentials table exists.
    pub async fn new(database_path: impl AsRef<Path>) -> Result<Self> {
        let options = SqliteConnectOptions::new()
            .create_if_missing(true)
            .filename(database_path.as_ref());

        let pool = SqlitePoolOptions::new()
            .max_connections(5)
            .connect_with(options)
            .await
            .map_err(|e| WalletBotError::Store(format!("failed to open database: {}", e)))?;

        let store = Self { pool };
        store.init().await?;
        info!(path = %database_path.as_ref().display(), "Credential database ready");
        Ok(store)
    }

    async fn init(&self) -> Result<()> {
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS credentials (
                user_id TEXT PRIMARY KEY,
                value TEXT NOT NULL,
                updated_at TEXT NOT NULL
            )
            "#,
        )
        .execute(&self.pool)
        .await
        .map_err(|e| WalletBotError::Store(format!("failed to create table: {}", e)))?;
        Ok(())
    }
}

#[async_trait]
impl KvStore for SqliteKvStore {
    async fn get(&self, key: &str) -> Result<Option<String>> {
        let row: Option<(String,)> =
            sqlx::query_as("SELECT value FROM credentials WHERE user_id = ?")
                .bind(key)
                .fetch_optional(&self.pool)
                .await
                .map_err(|e| WalletBotError::Store(format!("read failed: {}", e)))?;
        Ok(row.map(|(value,)| value))
    }

    async fn put(&self, key: &str, value: &str) -> Result<()> {
        sqlx::query(
            "INSERT OR REPLACE INTO credentials (user_id, value, updated_at) VALUES (?, ?, ?)",
        )
        .bind(key)
        .bind(value)
        .bind(chrono::Utc::now().to_rfc3339())
        .execute(&self.pool)
        .await
        .map_err(|e| WalletBotError::Store(format!("write failed: {}", e)))?;
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// In-memory
// ---------------------------------------------------------------------------

/// Map-backed store for tests and ephemeral runs.
#[derive(Default)]
pub struct MemoryKvStore {
    entries: DashMap<String, String>,
}

impl MemoryKvStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[async_trait]
impl KvStore for MemoryKvStore {
    async fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.entries.get(key).map(|v| v.value().clone()))
    }

    async fn put(&self, key: &str, value: &str) -> Result<()> {
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn memory_store_get_put() {
        let store = MemoryKvStore::new();
        assert_eq!(store.get("u1").await.unwrap(), None);

        store.put("u1", "v1").await.unwrap();
        assert_eq!(store.get("u1").await.unwrap(), Some("v1".to_string()));

        store.put("u1", "v2").await.unwrap();
        assert_eq!(store.get("u1").await.unwrap(), Some("v2".to_string()));
        assert_eq!(store.len(), 1);
    }

    #[tokio::test]
    async fn sqlite_store_persists_across_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("credentials.db");

        {
            let store = SqliteKvStore::new(&path).await.unwrap();
            store.put("u1", "record").await.unwrap();
        }

        let store = SqliteKvStore::new(&path).await.unwrap();
        assert_eq!(store.get("u1").await.unwrap(), Some("record".to_string()));
        assert_eq!(store.get("u2").await.unwrap(), None);
    }

    #[tokio::test]
    async fn sqlite_store_replaces_existing_key() {
        let dir = tempfile::tempdir().unwrap();
        let store = SqliteKvStore::new(dir.path().join("kv.db")).await.unwrap();

        store.put("u1", "a").await.unwrap();
        store.put("u1", "b").await.unwrap();
        assert_eq!(store.get("u1").await.unwrap(), Some("b".to_string()));
    }
}
