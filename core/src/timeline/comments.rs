use std::sync::Arc;

use tracing::{debug, warn};

use crate::{
    auth::Credential,
    model::{Activity, ActivityId, Comment},
    upstream::{UpstreamClient, UpstreamError},
};

#[derive(Clone)]
pub struct CommentFetcher {
    client: Arc<dyn UpstreamClient>,
}

impl CommentFetcher {
    pub fn new(client: Arc<dyn UpstreamClient>) -> Self {
        CommentFetcher { client }
    }

    /// Comments of one activity, or an empty list if it failed.
    /// A failure is only reported through the log.
    pub async fn fetch(&self, cred: &Credential, activity: &Activity) -> Vec<Comment> {
        match self.try_fetch(cred, activity).await {
            Ok(comments) => comments,
            Err(err) => {
                record_soft_failure(&activity.id, &err);
                Vec::new()
            }
        }
    }

    /// Skips the listing entirely when the activity announces no replies
    pub async fn try_fetch(
        &self,
        cred: &Credential,
        activity: &Activity,
    ) -> Result<Vec<Comment>, UpstreamError> {
        if activity.expected_comment_count == 0 {
            debug!(activity_id = %activity.id, "no comments expected, not listing");
            return Ok(Vec::new());
        }
        self.client.list_comments(cred, &activity.id).await
    }
}

pub(super) fn record_soft_failure(activity_id: &ActivityId, err: &UpstreamError) {
    warn!(
        soft_failure = true,
        %activity_id,
        error = %err,
        "Comment listing failed, showing activity without comments"
    );
}
