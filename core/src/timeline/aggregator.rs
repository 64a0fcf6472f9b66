use std::sync::Arc;

use tracing::{info, instrument};

use crate::{
    auth::{AuthContext, Session},
    model::TimelineEntry,
    upstream::UpstreamClient,
};

use super::{activities::ActivityFetcher, join::join_all_or_fail, TimelineError};

/// Builds the unsorted timeline of a session: every activity of every connection,
/// each paired with its comments.
#[derive(Clone)]
pub struct TimelineAggregator {
    auth: Arc<dyn AuthContext>,
    client: Arc<dyn UpstreamClient>,
    activities: ActivityFetcher,
}

impl TimelineAggregator {
    pub fn new(auth: Arc<dyn AuthContext>, client: Arc<dyn UpstreamClient>) -> Self {
        TimelineAggregator {
            auth,
            activities: ActivityFetcher::new(client.clone()),
            client,
        }
    }

    /// Entries are grouped by connection in listing order, and within a connection by
    /// activity listing order. If listing the connections or the activities of any single
    /// connection fails, nothing is returned.
    #[instrument(skip_all)]
    pub async fn build(&self, session: &Session) -> Result<Vec<TimelineEntry>, TimelineError> {
        let cred = self.auth.ensure_authenticated(session).await?;
        let people = self.client.list_connections(&cred).await?;
        let cred = &cred;
        let per_person = join_all_or_fail(
            people
                .iter()
                .map(|person| self.activities.fetch(cred, person)),
        )
        .await?;
        let entries: Vec<TimelineEntry> = per_person.into_iter().flatten().collect();
        info!(
            connections = people.len(),
            entries = entries.len(),
            "Built timeline"
        );
        Ok(entries)
    }
}
