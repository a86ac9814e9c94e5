//! Errors raised by the news and weather API clients.
//!
//! Both clients report failures through [`FetchError`]. Whether a failure is
//! shown to the reader or absorbed into an empty result is decided by the
//! caller, not by the client.

use reqwest::StatusCode;
use thiserror::Error;

/// A failed call against one of the external HTTP APIs.
#[derive(Debug, Error)]
pub enum FetchError {
    /// No API key was configured for the named endpoint.
    #[error("missing API key for {0}")]
    MissingApiKey(&'static str),

    /// The request could not be sent or the body could not be read.
    #[error("request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The API answered with a non-success status.
    #[error("{endpoint} returned {status}")]
    Status {
        status: StatusCode,
        endpoint: &'static str,
    },

    /// The body was not the JSON shape we expect.
    #[error("unexpected response body: {0}")]
    Decode(#[from] serde_json::Error),

    /// The configured base URL could not be turned into a request URL.
    #[error("invalid endpoint url: {0}")]
    InvalidUrl(#[from] url::ParseError),
}

impl FetchError {
    /// The HTTP status, when the failure came from the server.
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            FetchError::Status { status, .. } => Some(*status),
            FetchError::Request(e) => e.status(),
            _ => None,
        }
    }
}
