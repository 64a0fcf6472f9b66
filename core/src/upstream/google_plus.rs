use async_trait::async_trait;
use eyre::{Context, Result};
use reqwest::{Client, Url};
use serde::de::DeserializeOwned;
use tracing::{debug, instrument};

use crate::{
    auth::Credential,
    config::UpstreamConfig,
    model::{Activity, ActivityId, Comment, Person, PersonId},
};

use super::{
    wire::{ListResponse, WireActivity, WireComment, WirePerson},
    Operation, UpstreamCause, UpstreamClient, UpstreamError,
};

/// `UpstreamClient` talking to the Google+ `plus/v1` REST API
#[derive(Debug, Clone)]
pub struct GooglePlusClient {
    http_client: Client,
    base_url: Url,
    max_results: u32,
}

impl GooglePlusClient {
    pub fn new(config: &UpstreamConfig) -> Result<Self> {
        let http_client = Client::builder()
            .timeout(config.request_timeout)
            .build()
            .wrap_err("error building HTTP client")?;
        Self::with_client(http_client, &config.base_url, config.max_results)
    }

    pub fn with_client(http_client: Client, base_url: &str, max_results: u32) -> Result<Self> {
        let base_url = Url::parse(base_url).wrap_err("invalid upstream base url")?;
        if base_url.cannot_be_a_base() {
            eyre::bail!("upstream base url {} can not have a path", base_url);
        }
        Ok(GooglePlusClient {
            http_client,
            base_url,
            max_results,
        })
    }

    fn endpoint(&self, segments: &[&str]) -> Url {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .expect("checked in constructor")
            .pop_if_empty()
            .extend(segments);
        url
    }

    async fn get_items<W, M>(
        &self,
        operation: Operation,
        cred: &Credential,
        url: Url,
    ) -> Result<Vec<M>, UpstreamError>
    where
        W: DeserializeOwned,
        M: From<W>,
    {
        debug!(%url, %operation, "requesting");
        let response = self
            .http_client
            .get(url)
            .query(&[("maxResults", self.max_results)])
            .bearer_auth(&cred.access_token)
            .send()
            .await
            .map_err(|err| UpstreamError::new(operation, UpstreamCause::Transport(err)))?;
        let status = response.status();
        if !status.is_success() {
            return Err(UpstreamError::new(
                operation,
                UpstreamCause::Status(status.as_u16()),
            ));
        }
        let body = response
            .bytes()
            .await
            .map_err(|err| UpstreamError::new(operation, UpstreamCause::Transport(err)))?;
        let list: ListResponse<W> = serde_json::from_slice(&body)
            .map_err(|err| UpstreamError::new(operation, UpstreamCause::Decode(err.to_string())))?;
        Ok(list.items.into_iter().map(M::from).collect())
    }
}

#[async_trait]
impl UpstreamClient for GooglePlusClient {
    #[instrument(skip(self, cred), err)]
    async fn list_connections(&self, cred: &Credential) -> Result<Vec<Person>, UpstreamError> {
        let url = self.endpoint(&["people", "me", "people", "visible"]);
        self.get_items::<WirePerson, Person>(Operation::ListConnections, cred, url)
            .await
    }

    #[instrument(skip(self, cred), err)]
    async fn list_activities(
        &self,
        cred: &Credential,
        person_id: &PersonId,
    ) -> Result<Vec<Activity>, UpstreamError> {
        let url = self.endpoint(&["people", person_id.as_str(), "activities", "public"]);
        self.get_items::<WireActivity, Activity>(Operation::ListActivities, cred, url)
            .await
    }

    // failures here are soft, the caller logs them
    #[instrument(skip(self, cred))]
    async fn list_comments(
        &self,
        cred: &Credential,
        activity_id: &ActivityId,
    ) -> Result<Vec<Comment>, UpstreamError> {
        let url = self.endpoint(&["activities", activity_id.as_str(), "comments"]);
        self.get_items::<WireComment, Comment>(Operation::ListComments, cred, url)
            .await
    }
}
