use async_trait::async_trait;

use crate::{
    auth::Credential,
    model::{Activity, ActivityId, Comment, Person, PersonId},
};

mod error;
mod google_plus;
mod limited;
mod wire;

pub use error::*;
pub use google_plus::GooglePlusClient;
pub use limited::LimitedClient;


/// The three read-only listings of the social graph API.
///
/// Every call is a single round trip: no retries, no caching.
#[async_trait]
pub trait UpstreamClient: Send + Sync {
    async fn list_connections(&self, cred: &Credential) -> Result<Vec<Person>, UpstreamError>;

    async fn list_activities(
        &self,
        cred: &Credential,
        person_id: &PersonId,
    ) -> Result<Vec<Activity>, UpstreamError>;

    async fn list_comments(
        &self,
        cred: &Credential,
        activity_id: &ActivityId,
    ) -> Result<Vec<Comment>, UpstreamError>;
}
