use std::sync::Arc;

use camino::Utf8PathBuf as PathBuf;
use eyre::{Context, Result};
use plusfeed_core::{
    config::Config,
    timeline::{HandlebarsTemplates, TimelineAggregator, TimelineRenderer},
    upstream::{GooglePlusClient, LimitedClient, UpstreamClient},
};

use crate::{
    oauth::OAuthClient,
    page::PageTemplates,
    session::{SessionCookie, SessionStore},
};

pub struct AppState {
    pub aggregator: TimelineAggregator,
    pub renderer: TimelineRenderer,
    pub pages: PageTemplates,
    pub sessions: Arc<SessionStore>,
    pub session_cookie: SessionCookie,
    pub oauth: OAuthClient,
    pub doc_root: PathBuf,
}

pub type SharedState = Arc<AppState>;

impl AppState {
    pub fn from_config(config: &Config) -> Result<Self> {
        let google_plus = GooglePlusClient::new(&config.upstream)?;
        let client: Arc<dyn UpstreamClient> = match config.upstream.max_concurrent_requests {
            Some(limit) => Arc::new(LimitedClient::new(google_plus, limit)),
            None => Arc::new(google_plus),
        };
        let templates =
            HandlebarsTemplates::bundled().wrap_err("error compiling bundled templates")?;
        let oauth = OAuthClient::new(config.google.clone(), config.upstream.request_timeout)?;
        let session_cookie =
            SessionCookie::new(&config.session.secret, config.session.cookie_name.clone())?;
        Self::with_parts(
            client,
            TimelineRenderer::new(Arc::new(templates)),
            session_cookie,
            oauth,
            config.server.doc_root.clone(),
        )
    }

    pub fn with_parts(
        client: Arc<dyn UpstreamClient>,
        renderer: TimelineRenderer,
        session_cookie: SessionCookie,
        oauth: OAuthClient,
        doc_root: PathBuf,
    ) -> Result<Self> {
        let pages = PageTemplates::bundled().wrap_err("error compiling page template")?;
        let sessions = Arc::new(SessionStore::new());
        Ok(AppState {
            aggregator: TimelineAggregator::new(sessions.clone(), client),
            renderer,
            pages,
            sessions,
            session_cookie,
            oauth,
            doc_root,
        })
    }
}
