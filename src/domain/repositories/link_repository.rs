//! Repository trait for link data access.

use crate::domain::entities::{Link, NewLink, Visit};
use crate::error::AppError;
use async_trait::async_trait;

/// Repository interface for the link collection.
///
/// Links are keyed by their full short URL (`link`). Records are never deleted.
///
/// # Implementations
///
/// - [`crate::infrastructure::persistence::PgLinkRepository`] - PostgreSQL implementation
/// - [`crate::infrastructure::persistence::MemoryLinkRepository`] - in-process store
/// - Test mocks available with `cfg(test)`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait LinkRepository: Send + Sync {
    /// Inserts a new link without clicks or visits.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Conflict`] if the link already exists.
    /// Returns [`AppError::Internal`] on store errors.
    async fn create(&self, new_link: NewLink) -> Result<Link, AppError>;

    /// Finds a link by exact match on its full short URL.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on store errors.
    async fn find_by_link(&self, link: &str) -> Result<Option<Link>, AppError>;

    /// Returns whether a link with this full short URL exists.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on store errors.
    async fn exists(&self, link: &str) -> Result<bool, AppError>;

    /// Returns every link whose context matches `pattern`, in store order.
    ///
    /// `pattern` is an unanchored regular expression. Callers validate it first.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on store errors.
    async fn search_by_context(&self, pattern: &str) -> Result<Vec<Link>, AppError>;

    /// Appends a visit to a link and recomputes its click count.
    ///
    /// Append and recompute happen atomically. Returns the new click count.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if the link no longer exists.
    /// Returns [`AppError::Internal`] on store errors.
    async fn record_visit(&self, link_id: i64, visit: Visit) -> Result<i64, AppError>;

    /// Returns the number of stored links.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on store errors.
    async fn count(&self) -> Result<i64, AppError>;

    /// Checks that the store is reachable.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] if the store cannot be reached.
    async fn ping(&self) -> Result<(), AppError>;
}
