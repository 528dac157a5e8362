//! Repository trait for key-value settings.

use crate::domain::entities::Setting;
use crate::error::StoreError;
use async_trait::async_trait;

/// Repository interface for the `Setting` table.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SettingRepository: Send + Sync {
    /// Returns the value for `key`, or `None` if the key is absent or has no value.
    async fn get(&self, key: &str) -> Result<Option<String>, StoreError>;

    /// Inserts or replaces the value for `key`.
    async fn set(&self, key: &str, value: &str) -> Result<(), StoreError>;

    /// Lists every setting ordered by key.
    async fn list(&self) -> Result<Vec<Setting>, StoreError>;
}
