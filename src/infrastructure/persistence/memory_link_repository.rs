//! In-memory implementation of the link repository.

use async_trait::async_trait;
use dashmap::DashMap;
use dashmap::mapref::entry::Entry;

use crate::domain::entities::{LinkRecord, NewLink, VisitEvent};
use crate::domain::repositories::LinkRepository;
use crate::error::AppError;

/// Process-local link store backed by [`DashMap`].
///
/// Each operation runs under the shard lock of its key: `create` checks and
/// inserts through the entry API, and `record_visit_and_fetch` reads the
/// clock, pushes and clones while holding the write guard. Contents are lost
/// on restart.
#[derive(Debug, Default)]
pub struct InMemoryLinkRepository {
    links: DashMap<String, LinkRecord>,
}

impl InMemoryLinkRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored links.
    pub fn len(&self) -> usize {
        self.links.len()
    }

    pub fn is_empty(&self) -> bool {
        self.links.is_empty()
    }
}

#[async_trait]
impl LinkRepository for InMemoryLinkRepository {
    async fn create(&self, new_link: NewLink) -> Result<LinkRecord, AppError> {
        match self.links.entry(new_link.short_id.clone()) {
            Entry::Occupied(_) => Err(AppError::duplicate_key("Short ID already exists")),
            Entry::Vacant(slot) => {
                let record = LinkRecord::from(new_link);
                slot.insert(record.clone());
                Ok(record)
            }
        }
    }

    async fn find_by_short_id(&self, short_id: &str) -> Result<Option<LinkRecord>, AppError> {
        Ok(self.links.get(short_id).map(|entry| entry.value().clone()))
    }

    async fn record_visit_and_fetch(&self, short_id: &str) -> Result<Option<LinkRecord>, AppError> {
        let Some(mut entry) = self.links.get_mut(short_id) else {
            return Ok(None);
        };

        entry.record_visit(VisitEvent::now());
        Ok(Some(entry.value().clone()))
    }

    async fn ping(&self) -> Result<(), AppError> {
        Ok(())
    }
}
