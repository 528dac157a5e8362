//! SQLite implementation of the settings repository.

use async_trait::async_trait;
use sqlx::SqlitePool;
use std::sync::Arc;

use crate::domain::entities::Setting;
use crate::domain::repositories::SettingRepository;
use crate::error::StoreError;

/// SQLite repository for the `Setting` table.
pub struct SqliteSettingRepository {
    pool: Arc<SqlitePool>,
}

impl SqliteSettingRepository {
    pub fn new(pool: Arc<SqlitePool>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl SettingRepository for SqliteSettingRepository {
    async fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        let value = sqlx::query_scalar::<_, Option<String>>("SELECT value FROM Setting WHERE key = ?")
            .bind(key)
            .fetch_optional(self.pool.as_ref())
            .await?;

        Ok(value.flatten())
    }

    async fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
        sqlx::query(
            r#"
            INSERT INTO Setting (key, value) VALUES (?, ?)
            ON CONFLICT(key) DO UPDATE SET value = excluded.value
            "#,
        )
        .bind(key)
        .bind(value)
        .execute(self.pool.as_ref())
        .await?;

        Ok(())
    }

    async fn list(&self) -> Result<Vec<Setting>, StoreError> {
        let rows = sqlx::query_as::<_, (String, Option<String>)>(
            "SELECT key, value FROM Setting ORDER BY key",
        )
        .fetch_all(self.pool.as_ref())
        .await?;

        Ok(rows
            .into_iter()
            .map(|(key, value)| Setting { key, value })
            .collect())
    }
}
