//! Source reader: stage 1 of the sync pipeline.
//!
//! Produces the raw JSON bytes for the decoder, either from a local fixture
//! (offline mode) or from the Storyblok CDN (online mode). The mode is picked
//! by an environment variable, `DEV` by default, so a site can be rebuilt
//! without network access:
//!
//! ```text
//! DEV=1 storyblok-hugo --dir content/posts              # reads stories.json
//! storyblok-hugo --token $TOKEN --dir content/posts     # GET endpoint?token=..&q=<now>
//! ```
//!
//! Online requests carry a `q` query parameter set to the current Unix time so
//! the CDN never answers from a stale cache. There are no retries and no
//! timeout beyond the transport default.
//!
//! HTTP goes through the [`Transport`] trait. [`HttpTransport`] is the
//! production implementation; tests substitute a stub.

use crate::config::SourceConfig;
use chrono::Utc;
use reqwest::Url;
use std::ffi::OsString;
use std::fs;
use std::path::PathBuf;
use thiserror::Error;
use tracing::{debug, info, warn};

#[derive(Error, Debug)]
pub enum SourceError {
    #[error("cannot read fixture {}: {source}", path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("HTTP request failed: {0}")]
    Network(#[source] reqwest::Error),
    #[error("stories endpoint returned HTTP {0}")]
    Status(u16),
    #[error("invalid endpoint {endpoint:?}: {reason}")]
    InvalidEndpoint { endpoint: String, reason: String },
    #[error("an API token is required in online mode (pass --token or set STORYBLOK_TOKEN)")]
    MissingToken,
}

/// Where the story JSON comes from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    /// Read the configured fixture file.
    Offline,
    /// Fetch from the CDN endpoint.
    Online,
}

impl Mode {
    /// Offline when the environment variable `var` is set and non-empty.
    pub fn from_env(var: &str) -> Self {
        Self::from_value(std::env::var_os(var))
    }

    fn from_value(value: Option<OsString>) -> Self {
        match value {
            Some(v) if !v.is_empty() => Mode::Offline,
            _ => Mode::Online,
        }
    }
}

/// Status and body of a completed HTTP exchange.
#[derive(Debug, Clone)]
pub struct HttpResponse {
    pub status: u16,
    pub body: Vec<u8>,
}

impl HttpResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// A blocking HTTP GET.
pub trait Transport {
    fn get(&self, url: &Url) -> Result<HttpResponse, SourceError>;
}

/// [`Transport`] backed by `reqwest`'s blocking client.
#[derive(Debug, Default)]
pub struct HttpTransport {
    client: reqwest::blocking::Client,
}

impl HttpTransport {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Transport for HttpTransport {
    fn get(&self, url: &Url) -> Result<HttpResponse, SourceError> {
        // `without_url` keeps the API token out of error messages.
        let response = self
            .client
            .get(url.clone())
            .send()
            .map_err(|e| SourceError::Network(e.without_url()))?;
        let status = response.status().as_u16();
        let body = response
            .bytes()
            .map_err(|e| SourceError::Network(e.without_url()))?;
        Ok(HttpResponse {
            status,
            body: body.to_vec(),
        })
    }
}

/// Build the stories URL: `<endpoint>?token=<token>&q=<timestamp>`.
pub fn stories_url(endpoint: &str, token: &str, timestamp: i64) -> Result<Url, SourceError> {
    let q = timestamp.to_string();
    Url::parse_with_params(endpoint, &[("token", token), ("q", q.as_str())]).map_err(|e| {
        SourceError::InvalidEndpoint {
            endpoint: endpoint.to_string(),
            reason: e.to_string(),
        }
    })
}

/// Read the raw story document for `mode`.
///
/// `token` is only consulted online, where it must be present and non-empty.
pub fn read_source(
    mode: Mode,
    config: &SourceConfig,
    token: Option<&str>,
    transport: &dyn Transport,
) -> Result<Vec<u8>, SourceError> {
    match mode {
        Mode::Offline => {
            info!(fixture = %config.fixture, "offline mode, reading fixture");
            let path = PathBuf::from(&config.fixture);
            let bytes = fs::read(&path).map_err(|source| SourceError::Io { path, source })?;
            debug!(bytes = bytes.len(), "fixture read");
            Ok(bytes)
        }
        Mode::Online => {
            let token = token
                .filter(|t| !t.is_empty())
                .ok_or(SourceError::MissingToken)?;
            let url = stories_url(&config.endpoint, token, Utc::now().timestamp())?;
            info!(host = url.host_str().unwrap_or(""), path = url.path(), "fetching stories");

            let response = transport.get(&url)?;
            debug!(status = response.status, bytes = response.body.len(), "response received");
            if !response.is_success() {
                if config.fail_on_status {
                    return Err(SourceError::Status(response.status));
                }
                warn!(status = response.status, "non-success status, decoding body anyway");
            }
            Ok(response.body)
        }
    }
}
