use serde::Serialize;

use super::{Activity, Comment};

/// One activity together with its resolved comments.
///
/// `comments` is empty both when the activity has no comments and when fetching them
/// failed; the two cases are not distinguished.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TimelineEntry {
    pub activity: Activity,
    pub comments: Vec<Comment>,
}

impl TimelineEntry {
    pub fn new(activity: Activity, comments: Vec<Comment>) -> Self {
        TimelineEntry { activity, comments }
    }
}
