//! SQLite implementation of link repository.

use async_trait::async_trait;
use sqlx::SqlitePool;
use std::sync::Arc;

use crate::domain::entities::Link;
use crate::domain::repositories::LinkRepository;
use crate::error::StoreError;

/// SQLite repository for the `Link` table.
///
/// All statements bind their arguments, so arbitrary URL content (quotes
/// included) is stored verbatim.
pub struct SqliteLinkRepository {
    pool: Arc<SqlitePool>,
}

impl SqliteLinkRepository {
    /// Creates a new repository with a database connection pool.
    pub fn new(pool: Arc<SqlitePool>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl LinkRepository for SqliteLinkRepository {
    async fn insert(&self, endpoint: &str, expiration_date: i64) -> Result<i64, StoreError> {
        let result = sqlx::query("INSERT INTO Link (endpoint, expiration_date) VALUES (?, ?)")
            .bind(endpoint)
            .bind(expiration_date)
            .execute(self.pool.as_ref())
            .await?;

        Ok(result.last_insert_rowid())
    }

    async fn find_by_endpoint(&self, endpoint: &str) -> Result<Option<i64>, StoreError> {
        let id = sqlx::query_scalar::<_, i64>(
            "SELECT id FROM Link WHERE endpoint = ? ORDER BY id LIMIT 1",
        )
        .bind(endpoint)
        .fetch_optional(self.pool.as_ref())
        .await?;

        Ok(id)
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<String>, StoreError> {
        let endpoint = sqlx::query_scalar::<_, String>("SELECT endpoint FROM Link WHERE id = ?")
            .bind(id)
            .fetch_optional(self.pool.as_ref())
            .await?;

        Ok(endpoint)
    }

    async fn renew(&self, id: i64, expiration_date: i64) -> Result<(), StoreError> {
        sqlx::query("UPDATE Link SET expiration_date = ? WHERE id = ?")
            .bind(expiration_date)
            .bind(id)
            .execute(self.pool.as_ref())
            .await?;

        Ok(())
    }

    async fn delete_by_id(&self, id: i64) -> Result<bool, StoreError> {
        let result = sqlx::query("DELETE FROM Link WHERE id = ?")
            .bind(id)
            .execute(self.pool.as_ref())
            .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn sweep_expired(&self, now: i64) -> Result<u64, StoreError> {
        let result = sqlx::query("DELETE FROM Link WHERE expiration_date < ?")
            .bind(now)
            .execute(self.pool.as_ref())
            .await?;

        Ok(result.rows_affected())
    }

    async fn count(&self) -> Result<i64, StoreError> {
        let count = sqlx::query_scalar::<_, i64>("SELECT COUNT(id) FROM Link")
            .fetch_one(self.pool.as_ref())
            .await?;

        Ok(count)
    }

    async fn list(&self) -> Result<Vec<Link>, StoreError> {
        let rows = sqlx::query_as::<_, (i64, String, i64)>(
            "SELECT id, endpoint, expiration_date FROM Link ORDER BY id",
        )
        .fetch_all(self.pool.as_ref())
        .await?;

        Ok(rows
            .into_iter()
            .map(|(id, endpoint, expiration_date)| Link::new(id, endpoint, expiration_date))
            .collect())
    }
}
