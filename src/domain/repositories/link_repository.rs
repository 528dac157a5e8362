//! Repository trait for short link data access.

use crate::domain::entities::Link;
use crate::error::StoreError;
use async_trait::async_trait;

/// Repository interface for the `Link` table.
///
/// Every mutating call commits before returning. Implementations do not
/// serialize multi-step sequences themselves; callers that need
/// check-then-write atomicity (see [`crate::application::services::LinkService`])
/// hold their own writer lock.
///
/// # Implementations
///
/// - [`crate::infrastructure::persistence::SqliteLinkRepository`] - SQLite implementation
/// - Test mocks available with `cfg(test)`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait LinkRepository: Send + Sync {
    /// Appends a new link and returns its freshly assigned id.
    ///
    /// Ids grow monotonically and are never reused after deletion.
    async fn insert(&self, endpoint: &str, expiration_date: i64) -> Result<i64, StoreError>;

    /// Finds the id of the link whose encoded endpoint matches exactly.
    async fn find_by_endpoint(&self, endpoint: &str) -> Result<Option<i64>, StoreError>;

    /// Returns the encoded endpoint stored for `id`.
    async fn find_by_id(&self, id: i64) -> Result<Option<String>, StoreError>;

    /// Moves the expiration date of `id` to `expiration_date`.
    async fn renew(&self, id: i64, expiration_date: i64) -> Result<(), StoreError>;

    /// Deletes the link with `id`. Returns `false` if nothing was removed.
    async fn delete_by_id(&self, id: i64) -> Result<bool, StoreError>;

    /// Deletes every link whose expiration date is strictly before `now`.
    ///
    /// Returns the number of removed rows.
    async fn sweep_expired(&self, now: i64) -> Result<u64, StoreError>;

    /// Counts stored links.
    async fn count(&self) -> Result<i64, StoreError>;

    /// Lists all stored links ordered by id.
    async fn list(&self) -> Result<Vec<Link>, StoreError>;
}
