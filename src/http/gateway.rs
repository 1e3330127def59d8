use std::time::Duration;

use log::debug;
use reqwest::header::{ACCEPT, CONTENT_TYPE};
use serde_json::Value;
use url::Url;

use super::error::HttpError;
use super::types::JsonMap;

const JSON_CONTENT_TYPE: &str = "application/json";

/// The two kinds of exchange the gateway performs.
#[derive(Debug, Clone, Copy)]
enum RequestKind<'a> {
    Get,
    Post(&'a JsonMap),
}

impl RequestKind<'_> {
    fn method(&self) -> &'static str {
        match self {
            RequestKind::Get => "GET",
            RequestKind::Post(_) => "POST",
        }
    }
}

/// Transport settings for a [`RequestGateway`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GatewayConfig {
    /// Whole-request deadline. `None` keeps the transport default.
    pub timeout: Option<Duration>,
    pub user_agent: String,
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            timeout: None,
            user_agent: default_user_agent(),
        }
    }
}

pub(crate) fn default_user_agent() -> String {
    format!("fuego-api/{}", env!("CARGO_PKG_VERSION"))
}

/// Stateless HTTP transport bound to one gateway endpoint root.
///
/// Each call performs exactly one HTTP exchange. Cloning is cheap and clones
/// share the underlying connection handle, so a gateway can be handed to
/// any number of concurrent tasks.
#[derive(Debug, Clone)]
pub struct RequestGateway {
    base_url: String,
    client: reqwest::Client,
}

impl RequestGateway {
    /// Creates a gateway for `base_url` with the default transport settings.
    ///
    /// Trailing `/` characters are stripped from `base_url`, so
    /// `http://host:1234/` and `http://host:1234` are equivalent.
    ///
    /// # Errors
    ///
    /// Returns [`HttpError::InvalidBaseUrl`] if the normalized URL is empty
    /// or not absolute, and [`HttpError::Transport`] if the HTTP client
    /// cannot be initialized.
    pub fn new(base_url: &str) -> Result<Self, HttpError> {
        Self::with_config(base_url, &GatewayConfig::default())
    }

    pub fn with_config(base_url: &str, config: &GatewayConfig) -> Result<Self, HttpError> {
        let base_url = normalize_base_url(base_url)?;

        let mut builder = reqwest::Client::builder().user_agent(config.user_agent.as_str());
        if let Some(timeout) = config.timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder.build()?;

        Ok(Self { base_url, client })
    }

    /// The normalized endpoint root, without a trailing `/`.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Resolves `path` against the endpoint root.
    ///
    /// `path` must start with `/` and is appended verbatim.
    pub fn endpoint(&self, path: &str) -> Result<Url, HttpError> {
        if !path.starts_with('/') {
            return Err(HttpError::InvalidPath(path.to_string()));
        }
        Ok(Url::parse(&format!("{}{}", self.base_url, path))?)
    }

    /// Issues a `GET` to `path` and returns the decoded JSON body.
    ///
    /// # Errors
    ///
    /// - [`HttpError::Transport`] if no response was received
    /// - [`HttpError::Remote`] if the status is not 2xx
    /// - [`HttpError::Decode`] if the body is not JSON
    pub async fn query(&self, path: &str) -> Result<Value, HttpError> {
        self.send_request(RequestKind::Get, path).await
    }

    /// Issues a `POST` to `path` with `body` as the JSON request body.
    ///
    /// A missing body is sent as `{}`, byte for byte the same as an empty
    /// mapping. Failures are classified as for [`query`](Self::query).
    pub async fn command(&self, path: &str, body: Option<&JsonMap>) -> Result<Value, HttpError> {
        let empty = JsonMap::new();
        let body = body.unwrap_or(&empty);
        self.send_request(RequestKind::Post(body), path).await
    }

    async fn send_request(&self, kind: RequestKind<'_>, path: &str) -> Result<Value, HttpError> {
        let url = self.endpoint(path)?;
        debug!(method = kind.method(), url:% = url; "HTTP: Sending request");

        let req = match kind {
            RequestKind::Get => self.client.get(url),
            RequestKind::Post(body) => self
                .client
                .post(url)
                .body(serde_json::to_vec(body).map_err(HttpError::Encode)?)
                .header(CONTENT_TYPE, JSON_CONTENT_TYPE),
        };

        let resp = req.header(ACCEPT, JSON_CONTENT_TYPE).send().await?;
        let status = resp.status();
        let bytes = resp.bytes().await?;

        if !status.is_success() {
            debug!(status:% = status, path = path; "HTTP: Gateway returned an error status");
            return Err(HttpError::Remote {
                status,
                body: bytes.to_vec(),
            });
        }

        serde_json::from_slice(&bytes).map_err(HttpError::Decode)
    }
}

fn normalize_base_url(base_url: &str) -> Result<String, HttpError> {
    let trimmed = base_url.trim_end_matches('/');
    if trimmed.is_empty() {
        return Err(HttpError::InvalidBaseUrl(base_url.to_string()));
    }

    match Url::parse(trimmed) {
        Ok(url) if !url.cannot_be_a_base() => Ok(trimmed.to_string()),
        _ => Err(HttpError::InvalidBaseUrl(base_url.to_string())),
    }
}
