//! Visit event entity representing one served redirect.

use chrono::Utc;
use serde::{Deserialize, Serialize};

/// A single redirect of a short link.
///
/// `timestamp` is epoch milliseconds, taken when the redirect is served.
/// Serialized as `{ "timestamp": <ms> }`, which is also the shape stored in
/// the `visit_history` JSONB column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct VisitEvent {
    pub timestamp: i64,
}

impl VisitEvent {
    pub fn new(timestamp: i64) -> Self {
        Self { timestamp }
    }

    /// Creates an event stamped with the current wall-clock time.
    pub fn now() -> Self {
        Self::new(Utc::now().timestamp_millis())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_visit_serializes_as_timestamp_object() {
        let json = serde_json::to_value(VisitEvent::new(1_700_000_000_000)).unwrap();
        assert_eq!(json, serde_json::json!({ "timestamp": 1_700_000_000_000i64 }));
    }

    #[test]
    fn test_visit_now_is_epoch_millis() {
        let before = Utc::now().timestamp_millis();
        let visit = VisitEvent::now();
        let after = Utc::now().timestamp_millis();

        assert!(visit.timestamp >= before);
        assert!(visit.timestamp <= after);
    }
}
