use std::sync::Arc;

use tracing::{debug, instrument};

use crate::{
    auth::Credential,
    model::{Person, TimelineEntry},
    upstream::{UpstreamClient, UpstreamError},
};

use super::{
    comments::{record_soft_failure, CommentFetcher},
    join::join_all_degrading,
};

#[derive(Clone)]
pub struct ActivityFetcher {
    client: Arc<dyn UpstreamClient>,
    comments: CommentFetcher,
}

impl ActivityFetcher {
    pub fn new(client: Arc<dyn UpstreamClient>) -> Self {
        ActivityFetcher {
            comments: CommentFetcher::new(client.clone()),
            client,
        }
    }

    /// Timeline entries for one person, in the order upstream lists the activities.
    ///
    /// Failing to list the activities is an error; failing to list the comments of one of
    /// them is not.
    #[instrument(skip_all, fields(person_id = %person.id))]
    pub async fn fetch(
        &self,
        cred: &Credential,
        person: &Person,
    ) -> Result<Vec<TimelineEntry>, UpstreamError> {
        let activities = self.client.list_activities(cred, &person.id).await?;
        debug!(count = activities.len(), "listed activities");
        let comment_sets = join_all_degrading(
            activities
                .iter()
                .map(|activity| self.comments.try_fetch(cred, activity)),
            |idx, err| record_soft_failure(&activities[idx].id, &err),
        )
        .await;
        Ok(activities
            .into_iter()
            .zip(comment_sets)
            .map(|(activity, comments)| TimelineEntry::new(activity, comments))
            .collect())
    }
}
