//! Error types for gateway client operations.
//!
//! This module defines the [`HttpError`] enum which classifies every way a
//! call against the Fuego API gateway can fail.

use thiserror::Error;

/// Errors that can occur while talking to the Fuego API gateway.
///
/// # Error Categories
///
/// - **Network errors**: [`Transport`](HttpError::Transport)
/// - **Server errors**: [`Remote`](HttpError::Remote)
/// - **Payload errors**: [`Decode`](HttpError::Decode),
///   [`Encode`](HttpError::Encode)
/// - **Caller errors**: [`InvalidBaseUrl`](HttpError::InvalidBaseUrl),
///   [`InvalidPath`](HttpError::InvalidPath), [`Url`](HttpError::Url)
///
/// None of these are retried by the client. Every variant is a normal
/// outcome the caller is expected to handle.
///
/// # Example
///
/// ```rust,no_run
/// use fuego_api::http::HttpError;
///
/// fn handle_error(err: HttpError) {
///     match &err {
///         HttpError::Remote { status, .. } => {
///             eprintln!("Gateway returned {}: {}", status, err.body_text().unwrap_or_default());
///         }
///         HttpError::Transport(e) => {
///             eprintln!("Network error: {}", e);
///         }
///         _ => eprintln!("Other error: {}", err),
///     }
/// }
/// ```
#[derive(Debug, Error)]
pub enum HttpError {
    /// No response was received from the gateway.
    ///
    /// Covers connection refused, DNS resolution failure, socket errors,
    /// timeouts and failures while reading the response body.
    #[error("Transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// The gateway answered with a non-2xx status.
    ///
    /// The body holds the response bytes exactly as received.
    #[error("Remote error {status}: {}", String::from_utf8_lossy(.body))]
    Remote {
        /// The HTTP status code returned by the gateway.
        status: reqwest::StatusCode,
        /// The raw response body.
        body: Vec<u8>,
    },

    /// The response body was not valid JSON.
    #[error("Response is not valid JSON: {0}")]
    Decode(#[source] serde_json::Error),

    /// A typed request could not be converted into a JSON mapping.
    #[error("Request could not be encoded: {0}")]
    Encode(#[source] serde_json::Error),

    /// The base URL is empty or not an absolute URL.
    #[error("Invalid base URL: {0:?}")]
    InvalidBaseUrl(String),

    /// The request path does not start with `/`.
    #[error("Invalid request path: {0:?}")]
    InvalidPath(String),

    /// Joining the base URL and the path produced an invalid URL.
    #[error("URL parse error: {0}")]
    Url(#[from] url::ParseError),
}

impl HttpError {
    /// Returns the HTTP status if the gateway answered with an error status.
    pub fn status(&self) -> Option<reqwest::StatusCode> {
        match self {
            HttpError::Remote { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// The error body as text, if the gateway answered with an error status.
    ///
    /// Invalid UTF-8 sequences are replaced for display; use the `body`
    /// field for the exact bytes.
    pub fn body_text(&self) -> Option<String> {
        match self {
            HttpError::Remote { body, .. } => Some(String::from_utf8_lossy(body).into_owned()),
            _ => None,
        }
    }
}
