use std::collections::HashMap;

use async_trait::async_trait;
use axum::http::HeaderMap;
use axum_extra::extract::cookie::{Cookie, Key, SameSite, SignedCookieJar};
use chrono::Utc;
use eyre::{bail, eyre, Result};
use plusfeed_core::auth::{AuthContext, AuthError, Credential, Session};
use tokio::sync::RwLock;
use uuid::Uuid;

/// Credentials of logged in browser sessions, kept in memory for the life of the process
#[derive(Debug, Default)]
pub struct SessionStore {
    sessions: RwLock<HashMap<String, Credential>>,
}

impl SessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores `cred` under a fresh random session id and returns the id.
    /// Sessions whose credential has expired are dropped on the way.
    pub async fn create(&self, cred: Credential) -> String {
        let id = Uuid::new_v4().to_string();
        let now = Utc::now();
        let mut sessions = self.sessions.write().await;
        sessions.retain(|_, cred| !cred.is_expired_at(now));
        sessions.insert(id.clone(), cred);
        id
    }

    pub async fn count(&self) -> usize {
        self.sessions.read().await.len()
    }

    pub async fn remove(&self, id: &str) -> Option<Credential> {
        self.sessions.write().await.remove(id)
    }
}

#[async_trait]
impl AuthContext for SessionStore {
    async fn ensure_authenticated(&self, session: &Session) -> Result<Credential, AuthError> {
        let now = Utc::now();
        {
            let sessions = self.sessions.read().await;
            let cred = sessions.get(&session.id).ok_or(AuthError::NotLoggedIn)?;
            if !cred.is_expired_at(now) {
                return Ok(cred.clone());
            }
        }
        let mut sessions = self.sessions.write().await;
        if sessions
            .get(&session.id)
            .is_some_and(|cred| cred.is_expired_at(now))
        {
            sessions.remove(&session.id);
        }
        Err(AuthError::Expired)
    }
}

/// Signing and encryption keys are both taken from the secret
pub const MIN_SECRET_LEN: usize = 64;

/// Signs the session cookie
#[derive(Debug, Clone)]
pub struct SessionCookie {
    key: Key,
    name: String,
}

impl SessionCookie {
    pub fn new(secret: &str, name: impl Into<String>) -> Result<Self> {
        if secret.len() < MIN_SECRET_LEN {
            bail!("session secret must be at least {} bytes long", MIN_SECRET_LEN);
        }
        let key = Key::try_from(secret.as_bytes())
            .map_err(|err| eyre!("invalid session secret: {:?}", err))?;
        Ok(SessionCookie {
            key,
            name: name.into(),
        })
    }

    /// Session named by a validly signed cookie, or the anonymous session
    pub fn session(&self, headers: &HeaderMap) -> Session {
        SignedCookieJar::from_headers(headers, self.key.clone())
            .get(&self.name)
            .map(|cookie| Session::new(cookie.value()))
            .unwrap_or_else(|| Session::new(""))
    }

    pub fn jar_with_session(&self, session_id: String) -> SignedCookieJar {
        let cookie = Cookie::build((self.name.clone(), session_id))
            .path("/")
            .http_only(true)
            .same_site(SameSite::Lax);
        SignedCookieJar::new(self.key.clone()).add(cookie)
    }
}
