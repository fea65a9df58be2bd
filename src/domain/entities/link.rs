//! Link record entity: the mapping from a short identifier to a target URL.

use super::visit::VisitEvent;

/// A stored short link together with its visit history.
///
/// `short_id` and `redirect_url` never change after creation. `visit_history`
/// only grows, in the order the store accepted the visits, and its timestamps
/// never decrease.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinkRecord {
    pub short_id: String,
    pub redirect_url: String,
    pub visit_history: Vec<VisitEvent>,
}

impl LinkRecord {
    /// Creates a record with an empty visit history.
    pub fn new(short_id: String, redirect_url: String) -> Self {
        Self {
            short_id,
            redirect_url,
            visit_history: Vec::new(),
        }
    }

    /// Appends a visit stamped `at` and returns the stored event.
    ///
    /// A clock that stepped backwards is clamped to the last recorded
    /// timestamp, so the history stays in chronological order.
    pub fn record_visit(&mut self, at: VisitEvent) -> VisitEvent {
        let timestamp = match self.visit_history.last() {
            Some(last) => at.timestamp.max(last.timestamp),
            None => at.timestamp,
        };

        let visit = VisitEvent::new(timestamp);
        self.visit_history.push(visit);
        visit
    }

    /// Number of recorded visits.
    pub fn total_clicks(&self) -> usize {
        self.visit_history.len()
    }
}

/// Input data for creating a new link.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewLink {
    pub short_id: String,
    pub redirect_url: String,
}

impl From<NewLink> for LinkRecord {
    fn from(new_link: NewLink) -> Self {
        LinkRecord::new(new_link.short_id, new_link.redirect_url)
    }
}
