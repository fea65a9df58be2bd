//! Repository trait for short link storage.

use crate::domain::entities::{LinkRecord, NewLink};
use crate::error::AppError;
use async_trait::async_trait;

/// Storage contract for link records.
///
/// The store exclusively owns every [`LinkRecord`]; callers receive copies
/// and can only change a record through [`LinkRepository::record_visit_and_fetch`].
///
/// # Implementations
///
/// - [`crate::infrastructure::persistence::PgLinkRepository`] - PostgreSQL
/// - [`crate::infrastructure::persistence::InMemoryLinkRepository`] - in-process map
/// - Test mocks available with `cfg(test)`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait LinkRepository: Send + Sync {
    /// Creates a new link with an empty visit history.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::DuplicateKey`] if the short ID already exists.
    /// Returns [`AppError::Internal`] on storage errors.
    async fn create(&self, new_link: NewLink) -> Result<LinkRecord, AppError>;

    /// Finds a link by its short ID.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on storage errors.
    async fn find_by_short_id(&self, short_id: &str) -> Result<Option<LinkRecord>, AppError>;

    /// Appends a visit to the link's history and returns the updated record.
    ///
    /// The store stamps the visit with its own clock inside the same atomic
    /// step as the append and the read. Concurrent calls for the same short
    /// ID never lose an event, the history stays in non-decreasing timestamp
    /// order, and the returned record always ends with the new visit.
    /// Returns `Ok(None)` when the short ID is unknown.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on storage errors.
    async fn record_visit_and_fetch(&self, short_id: &str) -> Result<Option<LinkRecord>, AppError>;

    /// Checks that the backing store is reachable.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] if the store cannot be reached.
    async fn ping(&self) -> Result<(), AppError>;
}
