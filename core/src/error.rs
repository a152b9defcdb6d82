//! Error types for request building and transport.
//!
//! # Design
//! These errors never reach the caller as `Err`. The executor turns each of
//! them into a failed `TransportOutcome` whose message is the error's
//! `Display` text, so the wording here is user-visible.

use thiserror::Error;

/// Faults raised while turning a route into a request or performing it.
#[derive(Debug, Error)]
pub enum ApiError {
    /// base URL + path did not form a valid absolute URL.
    #[error("invalid URL '{url}': {source}")]
    InvalidUrl {
        url: String,
        #[source]
        source: url::ParseError,
    },

    /// The request body could not be serialized.
    #[error("serialization failed: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error(transparent)]
    Transport(#[from] TransportError),
}

/// The exchange did not complete: DNS, TLS, connect, timeout and the like.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{description}")]
pub struct TransportError {
    description: String,
}

impl TransportError {
    pub fn new(description: impl Into<String>) -> Self {
        Self {
            description: description.into(),
        }
    }

    pub fn description(&self) -> &str {
        &self.description
    }
}

impl From<reqwest::Error> for TransportError {
    fn from(err: reqwest::Error) -> Self {
        let description = if err.is_timeout() {
            format!("The request timed out: {err}")
        } else if err.is_connect() {
            format!("Could not connect to the server: {err}")
        } else {
            err.to_string()
        };
        Self::new(description)
    }
}
