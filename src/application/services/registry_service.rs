//! Short link registry: shorten, resolve with visit tracking, analytics.

use std::sync::Arc;

use tracing::{debug, info, warn};

use crate::domain::entities::{NewLink, VisitEvent};
use crate::domain::repositories::LinkRepository;
use crate::error::AppError;
use crate::utils::id_generator::IdGenerator;

/// Default number of identifiers tried before `shorten` gives up.
pub const DEFAULT_MAX_ATTEMPTS: usize = 5;

const NOT_FOUND_MESSAGE: &str = "Short URL not found";

/// Visit summary for one short link.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Analytics {
    pub total_clicks: usize,
    pub events: Vec<VisitEvent>,
}

/// Service orchestrating identifier generation and link storage.
///
/// All mutation goes through the repository's atomic operations, so the
/// service holds no locks of its own and is shared freely across requests.
pub struct RegistryService<R: LinkRepository + ?Sized> {
    repository: Arc<R>,
    generator: Arc<dyn IdGenerator>,
    max_attempts: usize,
}

impl<R: LinkRepository + ?Sized> RegistryService<R> {
    /// Creates a new registry service.
    ///
    /// `max_attempts` is clamped to at least one.
    pub fn new(repository: Arc<R>, generator: Arc<dyn IdGenerator>, max_attempts: usize) -> Self {
        Self {
            repository,
            generator,
            max_attempts: max_attempts.max(1),
        }
    }

    /// Creates a short link for `target_url` and returns its identifier.
    ///
    /// # Collisions
    ///
    /// A fresh identifier is generated for every attempt. When the store
    /// reports [`AppError::DuplicateKey`], the service retries up to
    /// `max_attempts` times in total before surfacing the error.
    ///
    /// Any non-empty string is stored as given.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Validation`] if `target_url` is empty.
    /// Returns [`AppError::DuplicateKey`] if every attempt collided.
    /// Returns [`AppError::Internal`] on storage errors.
    pub async fn shorten(&self, target_url: &str) -> Result<String, AppError> {
        if target_url.is_empty() {
            return Err(AppError::bad_request("URL is required"));
        }

        for attempt in 1..=self.max_attempts {
            let new_link = NewLink {
                short_id: self.generator.generate(),
                redirect_url: target_url.to_string(),
            };

            match self.repository.create(new_link).await {
                Ok(link) => {
                    metrics::counter!("registry_links_created_total").increment(1);
                    info!(short_id = %link.short_id, "Short link created");
                    return Ok(link.short_id);
                }
                Err(AppError::DuplicateKey { .. }) => {
                    metrics::counter!("registry_id_collisions_total").increment(1);
                    warn!(
                        attempt,
                        max_attempts = self.max_attempts,
                        "Short ID collision, regenerating"
                    );
                }
                Err(e) => return Err(e),
            }
        }

        Err(AppError::duplicate_key(
            "Failed to allocate a unique short ID",
        ))
    }

    /// Records a visit and returns the target URL to redirect to.
    ///
    /// The visit is stamped by the store, so the history order always matches
    /// the order in which visits were accepted.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if the identifier is unknown.
    /// Returns [`AppError::Internal`] on storage errors.
    pub async fn resolve_and_track(&self, short_id: &str) -> Result<String, AppError> {
        let link = self
            .repository
            .record_visit_and_fetch(short_id)
            .await?
            .ok_or_else(|| AppError::not_found(NOT_FOUND_MESSAGE))?;

        metrics::counter!("registry_redirects_total").increment(1);
        debug!(
            short_id,
            total_clicks = link.total_clicks(),
            "Visit recorded"
        );

        Ok(link.redirect_url)
    }

    /// Returns the visit count and visit list for a short link.
    ///
    /// The count is recomputed from the stored history on every call.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if the identifier is unknown.
    /// Returns [`AppError::Internal`] on storage errors.
    pub async fn get_analytics(&self, short_id: &str) -> Result<Analytics, AppError> {
        let link = self
            .repository
            .find_by_short_id(short_id)
            .await?
            .ok_or_else(|| AppError::not_found(NOT_FOUND_MESSAGE))?;

        Ok(Analytics {
            total_clicks: link.total_clicks(),
            events: link.visit_history,
        })
    }

    /// Checks that the underlying store is reachable.
    pub async fn check_storage(&self) -> Result<(), AppError> {
        self.repository.ping().await
    }
}
