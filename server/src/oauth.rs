use std::time::Duration;

use chrono::Utc;
use eyre::{bail, Context, Result};
use plusfeed_core::{auth::Credential, config::GoogleConfig};
use reqwest::{Client, Url};
use serde::Deserialize;
use tracing::instrument;

#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
    expires_in: Option<i64>,
}

/// Authorization code flow against the provider's OAuth2 endpoints
#[derive(Debug, Clone)]
pub struct OAuthClient {
    http_client: Client,
    config: GoogleConfig,
}

impl OAuthClient {
    pub fn new(config: GoogleConfig, request_timeout: Duration) -> Result<Self> {
        let http_client = Client::builder()
            .timeout(request_timeout)
            .build()
            .wrap_err("error building HTTP client")?;
        Ok(OAuthClient {
            http_client,
            config,
        })
    }

    pub fn redirect_path(&self) -> &str {
        &self.config.redirect_path
    }

    /// Where to send the browser to log in. Asks for offline access.
    pub fn authorization_url(&self) -> Result<Url> {
        Url::parse_with_params(
            &self.config.auth_url,
            &[
                ("response_type", "code"),
                ("client_id", self.config.client_id.as_str()),
                ("redirect_uri", self.config.redirect_url().as_str()),
                ("scope", self.config.scope.join(" ").as_str()),
                ("access_type", "offline"),
            ],
        )
        .wrap_err("invalid authorization url")
    }

    #[instrument(skip_all, err)]
    pub async fn exchange_code(&self, code: &str) -> Result<Credential> {
        let redirect_url = self.config.redirect_url();
        let response = self
            .http_client
            .post(&self.config.token_url)
            .form(&[
                ("code", code),
                ("client_id", self.config.client_id.as_str()),
                ("client_secret", self.config.client_secret.as_str()),
                ("redirect_uri", redirect_url.as_str()),
                ("grant_type", "authorization_code"),
            ])
            .send()
            .await
            .wrap_err("error requesting token")?;
        let status = response.status();
        if !status.is_success() {
            bail!("token endpoint responded with status {}", status);
        }
        let token: TokenResponse = response
            .json()
            .await
            .wrap_err("error decoding token response")?;
        Ok(Credential {
            access_token: token.access_token,
            expires_at: token
                .expires_in
                .map(|secs| Utc::now() + chrono::Duration::seconds(secs)),
        })
    }
}
