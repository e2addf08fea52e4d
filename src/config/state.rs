//! Persistent key-value slot for state that outlives the process

use anyhow::{Context, Result};
use async_trait::async_trait;
use sqlx::SqlitePool;

/// Small key-value store holding JSON text
#[async_trait]
pub trait StateStore: Send + Sync {
    /// Stored JSON for `key`, or `default_json` if nothing was stored
    async fn get(&self, key: &str, default_json: &str) -> Result<String>;

    /// Store JSON under `key`, replacing any previous value
    async fn update(&self, key: &str, json: &str) -> Result<()>;
}

/// Database-backed state store
pub struct SqliteStateStore {
    pool: SqlitePool,
}

impl SqliteStateStore {
    /// Create a new state store; the tables must already exist
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Get raw value from database
    async fn get_raw(&self, key: &str) -> Result<Option<String>> {
        sqlx::query_scalar("SELECT value FROM global_state WHERE key = ?")
            .bind(key)
            .fetch_optional(&self.pool)
            .await
            .with_context(|| format!("Failed to read state '{}'", key))
    }
}

#[async_trait]
impl StateStore for SqliteStateStore {
    async fn get(&self, key: &str, default_json: &str) -> Result<String> {
        Ok(self
            .get_raw(key)
            .await?
            .unwrap_or_else(|| default_json.to_string()))
    }

    async fn update(&self, key: &str, json: &str) -> Result<()> {
        sqlx::query(
            "INSERT INTO global_state (key, value, updated_at) VALUES (?, ?, CURRENT_TIMESTAMP)
             ON CONFLICT(key) DO UPDATE SET value = ?, updated_at = CURRENT_TIMESTAMP",
        )
        .bind(key)
        .bind(json)
        .bind(json)
        .execute(&self.pool)
        .await
        .with_context(|| format!("Failed to write state '{}'", key))?;

        log::debug!("Set state: {} = {}", key, json);
        Ok(())
    }
}
