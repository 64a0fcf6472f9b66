use std::{net::IpAddr, time::Duration};

use camino::{Utf8Path as Path, Utf8PathBuf as PathBuf};
use color_eyre::eyre::{bail, Context, Result};
use serde::Deserialize;

pub const DEFAULT_PORT: u16 = 3000;
pub const DEFAULT_UPSTREAM_BASE_URL: &str = "https://www.googleapis.com/plus/v1";
pub const DEFAULT_AUTH_URL: &str = "https://accounts.google.com/o/oauth2/auth";
pub const DEFAULT_TOKEN_URL: &str = "https://accounts.google.com/o/oauth2/token";
pub const DEFAULT_SESSION_COOKIE: &str = "plusfeed_session";

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
struct TomlServer {
    address: Option<String>,
    port: Option<u16>,
    doc_root: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
struct TomlSession {
    secret: String,
    cookie_name: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
enum TomlScope {
    Single(String),
    List(Vec<String>),
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
struct TomlGoogle {
    client_id: String,
    client_secret: String,
    redirect_host: String,
    redirect_path: String,
    scope: TomlScope,
    auth_url: Option<String>,
    token_url: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
struct TomlUpstream {
    base_url: Option<String>,
    request_timeout_secs: Option<u64>,
    max_results: Option<u32>,
    max_concurrent_requests: Option<usize>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
struct TomlConfig {
    #[serde(rename = "Server")]
    pub server: Option<TomlServer>,
    #[serde(rename = "Session")]
    pub session: TomlSession,
    #[serde(rename = "Google")]
    pub google: TomlGoogle,
    #[serde(rename = "Upstream")]
    pub upstream: Option<TomlUpstream>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    pub address: Option<IpAddr>,
    pub port: Option<u16>,
    pub doc_root: PathBuf,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionConfig {
    pub secret: String,
    pub cookie_name: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GoogleConfig {
    pub client_id: String,
    pub client_secret: String,
    pub redirect_host: String,
    pub redirect_path: String,
    pub scope: Vec<String>,
    pub auth_url: String,
    pub token_url: String,
}

impl GoogleConfig {
    pub fn redirect_url(&self) -> String {
        format!("{}{}", self.redirect_host, self.redirect_path)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpstreamConfig {
    pub base_url: String,
    pub request_timeout: Duration,
    pub max_results: u32,
    /// `None` leaves fan-out unbounded
    pub max_concurrent_requests: Option<usize>,
}

impl Default for UpstreamConfig {
    fn default() -> Self {
        UpstreamConfig {
            base_url: DEFAULT_UPSTREAM_BASE_URL.to_owned(),
            request_timeout: Duration::from_secs(10),
            max_results: 20,
            max_concurrent_requests: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub server: ServerConfig,
    pub session: SessionConfig,
    pub google: GoogleConfig,
    pub upstream: UpstreamConfig,
}

/// Reads and validates the config file.
/// Relative paths in the file are resolved against the directory containing it.
pub async fn read_config(path: &Path) -> Result<Config> {
    let toml_str = tokio::fs::read_to_string(path)
        .await
        .context(format!("Error reading config file {}", path))?;
    let config_dir = path.parent().unwrap_or(Path::new("."));
    parse_config(&toml_str, config_dir)
}

pub fn parse_config(toml_str: &str, config_dir: &Path) -> Result<Config> {
    let toml_config: TomlConfig = toml::from_str(toml_str).context("Error parsing config file")?;
    let server = match toml_config.server {
        Some(server) => {
            let address = server
                .address
                .as_deref()
                .map(|a| a.parse::<IpAddr>().wrap_err("error parsing listening address"))
                .transpose()?;
            let doc_root = PathBuf::from(server.doc_root.unwrap_or_else(|| "www".to_owned()));
            ServerConfig {
                address,
                port: server.port,
                doc_root,
            }
        }
        None => ServerConfig {
            address: None,
            port: None,
            doc_root: PathBuf::from("www"),
        },
    };
    let server = ServerConfig {
        doc_root: if server.doc_root.is_absolute() {
            server.doc_root
        } else {
            config_dir.join(&server.doc_root)
        },
        ..server
    };
    let session = SessionConfig {
        secret: toml_config.session.secret,
        cookie_name: toml_config
            .session
            .cookie_name
            .unwrap_or_else(|| DEFAULT_SESSION_COOKIE.to_owned()),
    };
    let google = toml_config.google;
    if !google.redirect_path.starts_with('/') {
        bail!("Google.redirect_path must start with '/'");
    }
    let scope = match google.scope {
        TomlScope::Single(s) => s.split_whitespace().map(str::to_owned).collect(),
        TomlScope::List(l) => l,
    };
    let google = GoogleConfig {
        client_id: google.client_id,
        client_secret: google.client_secret,
        redirect_host: google.redirect_host,
        redirect_path: google.redirect_path,
        scope,
        auth_url: google.auth_url.unwrap_or_else(|| DEFAULT_AUTH_URL.to_owned()),
        token_url: google.token_url.unwrap_or_else(|| DEFAULT_TOKEN_URL.to_owned()),
    };
    let defaults = UpstreamConfig::default();
    let upstream = match toml_config.upstream {
        Some(upstream) => UpstreamConfig {
            base_url: upstream.base_url.unwrap_or(defaults.base_url),
            request_timeout: upstream
                .request_timeout_secs
                .map(Duration::from_secs)
                .unwrap_or(defaults.request_timeout),
            max_results: upstream.max_results.unwrap_or(defaults.max_results),
            max_concurrent_requests: upstream.max_concurrent_requests.filter(|n| *n > 0),
        },
        None => defaults,
    };
    Ok(Config {
        server,
        session,
        google,
        upstream,
    })
}
