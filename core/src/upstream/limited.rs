use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::Semaphore;

use crate::{
    auth::Credential,
    model::{Activity, ActivityId, Comment, Person, PersonId},
};

use super::{Operation, UpstreamClient, UpstreamError};

/// Caps the number of in-flight upstream calls.
///
/// A permit is held for the duration of one call only, so nested fan-out can not deadlock
/// on it. Results and their order are exactly those of the wrapped client.
pub struct LimitedClient<C> {
    inner: C,
    permits: Arc<Semaphore>,
}

impl<C: UpstreamClient> LimitedClient<C> {
    pub fn new(inner: C, max_concurrent_requests: usize) -> Self {
        LimitedClient {
            inner,
            permits: Arc::new(Semaphore::new(max_concurrent_requests.max(1))),
        }
    }

    async fn permit(
        &self,
        operation: Operation,
    ) -> Result<tokio::sync::SemaphorePermit<'_>, UpstreamError> {
        self.permits
            .acquire()
            .await
            .map_err(|_| UpstreamError::other(operation, "request limiter was closed"))
    }
}

#[async_trait]
impl<C: UpstreamClient> UpstreamClient for LimitedClient<C> {
    async fn list_connections(&self, cred: &Credential) -> Result<Vec<Person>, UpstreamError> {
        let _permit = self.permit(Operation::ListConnections).await?;
        self.inner.list_connections(cred).await
    }

    async fn list_activities(
        &self,
        cred: &Credential,
        person_id: &PersonId,
    ) -> Result<Vec<Activity>, UpstreamError> {
        let _permit = self.permit(Operation::ListActivities).await?;
        self.inner.list_activities(cred, person_id).await
    }

    async fn list_comments(
        &self,
        cred: &Credential,
        activity_id: &ActivityId,
    ) -> Result<Vec<Comment>, UpstreamError> {
        let _permit = self.permit(Operation::ListComments).await?;
        self.inner.list_comments(cred, activity_id).await
    }
}
