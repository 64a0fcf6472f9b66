use chrono::{DateTime, Utc};
use plusfeed_core::model::TimelineEntry;
use serde::Serialize;

/// Response for a request for the whole timeline
///
/// `entries` are sorted most recent first, `date` is the time before upstream was queried
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TimelineResponse {
    pub date: DateTime<Utc>,
    pub entries: Vec<TimelineEntry>,
}
