//! DTOs for the link analytics endpoint.

use serde::Serialize;

use crate::application::services::Analytics;
use crate::domain::entities::VisitEvent;

/// Visit count and raw visit list for one short link.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalyticsResponse {
    pub total_clicks: usize,
    pub analytics: Vec<VisitEvent>,
}

impl From<Analytics> for AnalyticsResponse {
    fn from(analytics: Analytics) -> Self {
        Self {
            total_clicks: analytics.total_clicks,
            analytics: analytics.events,
        }
    }
}
