use chrono::{DateTime, Utc};
use serde::Serialize;

use super::{ActivityId, Person};

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Attachment {
    pub display_name: String,
    pub url: String,
    pub image_url: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Activity {
    pub id: ActivityId,
    pub updated_at: DateTime<Utc>,
    pub author: Person,
    /// Markup as delivered by upstream, not escaped
    pub content: String,
    pub attachments: Vec<Attachment>,
    /// Reply count announced by the activity listing.
    /// The comment listing is only requested when this is nonzero.
    pub expected_comment_count: u32,
}
