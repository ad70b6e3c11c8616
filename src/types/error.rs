//! Error types for the stock synchronizer
//!
//! Errors are split along the two tiers the run distinguishes:
//!
//! - [`FeedError`]: run-fatal. The feed could not be fetched or its stream
//!   broke mid-way; synchronization never starts.
//! - [`RemoteError`]: record-local. A storefront call failed for one record;
//!   the record is retried or abandoned and the run continues.
//!
//! Malformed feed rows are neither: they are skipped by the feed reader
//! and never surface as errors.

use serde_json::Value;
use std::error::Error as StdError;
use std::fmt;
use thiserror::Error;

/// Run-fatal error raised while fetching or parsing the feed
#[derive(Debug, Clone, PartialEq, Error)]
pub enum FeedError {
    /// The feed endpoint could not be reached
    #[error("Failed to fetch feed from {url}: {message}")]
    Fetch {
        /// Feed URL with query and password removed
        url: String,
        /// Transport error description
        message: String,
    },

    /// The feed endpoint answered with a non-success status
    #[error("Feed request to {url} returned HTTP {status}")]
    Status { url: String, status: u16 },

    /// The stream was received but could not be decoded
    ///
    /// Any records parsed before this point are discarded.
    #[error("Feed parse error{}: {message}", line.map(|l| format!(" at line {}", l)).unwrap_or_default())]
    Parse {
        /// Line number where the error occurred (if available)
        line: Option<u64>,
        message: String,
    },

    /// I/O error while reading the feed body
    #[error("Feed I/O error: {message}")]
    Io { message: String },
}

impl From<csv_async::Error> for FeedError {
    fn from(error: csv_async::Error) -> Self {
        if let csv_async::ErrorKind::Io(io) = error.kind() {
            return FeedError::Io {
                message: io.to_string(),
            };
        }

        let line = error.position().map(|pos| pos.line());

        FeedError::Parse {
            line,
            message: error.to_string(),
        }
    }
}

impl From<std::io::Error> for FeedError {
    fn from(error: std::io::Error) -> Self {
        FeedError::Io {
            message: error.to_string(),
        }
    }
}

impl FeedError {
    /// Build a feed error from a failed HTTP request
    pub fn from_request(url: &str, error: reqwest::Error) -> Self {
        match error.status() {
            Some(status) => FeedError::Status {
                url: url.to_string(),
                status: status.as_u16(),
            },
            None => FeedError::Fetch {
                url: url.to_string(),
                message: error.to_string(),
            },
        }
    }
}

/// Body of a failed storefront response
#[derive(Debug, Clone, PartialEq)]
pub enum ErrorPayload {
    /// The body parsed as JSON (e.g. `{"errors": ...}`)
    Json(Value),
    /// Anything else, verbatim
    Text(String),
}

impl ErrorPayload {
    pub fn from_body(body: String) -> Self {
        match serde_json::from_str::<Value>(&body) {
            Ok(value) => ErrorPayload::Json(value),
            Err(_) => ErrorPayload::Text(body),
        }
    }

    fn is_empty(&self) -> bool {
        match self {
            ErrorPayload::Json(value) => value.is_null(),
            ErrorPayload::Text(text) => text.trim().is_empty(),
        }
    }
}

impl fmt::Display for ErrorPayload {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ErrorPayload::Json(value) => write!(f, "{}", value),
            ErrorPayload::Text(text) => f.write_str(text),
        }
    }
}

/// Record-local error raised by a storefront call
#[derive(Debug, Clone, PartialEq, Error)]
pub enum RemoteError {
    /// The connection was reset by the peer
    ///
    /// The only error class that is retried.
    #[error("Connection reset: {message}")]
    ConnectionReset { message: String },

    /// The storefront answered with a non-success status
    #[error("Storefront API returned HTTP {status}: {payload}")]
    Api { status: u16, payload: ErrorPayload },

    /// Any other transport failure (timeout, DNS, TLS, refused connection)
    #[error("Transport error: {message}")]
    Transport { message: String },

    /// The response body did not have the expected shape
    #[error("Failed to decode storefront response: {message}")]
    Decode { message: String },
}

impl RemoteError {
    /// Create a ConnectionReset error
    pub fn connection_reset(message: &str) -> Self {
        RemoteError::ConnectionReset {
            message: message.to_string(),
        }
    }

    /// Create an Api error from a raw response body
    pub fn api(status: u16, body: String) -> Self {
        RemoteError::Api {
            status,
            payload: ErrorPayload::from_body(body),
        }
    }

    /// Create a Transport error
    pub fn transport(message: &str) -> Self {
        RemoteError::Transport {
            message: message.to_string(),
        }
    }

    pub fn is_connection_reset(&self) -> bool {
        matches!(self, RemoteError::ConnectionReset { .. })
    }

    /// Richest available description of the failure
    ///
    /// The response payload when the storefront sent one, the error message
    /// otherwise.
    pub fn detail(&self) -> String {
        match self {
            RemoteError::Api { payload, .. } if !payload.is_empty() => payload.to_string(),
            other => other.to_string(),
        }
    }
}

impl From<reqwest::Error> for RemoteError {
    fn from(error: reqwest::Error) -> Self {
        if caused_by_connection_reset(&error) {
            RemoteError::ConnectionReset {
                message: error.to_string(),
            }
        } else if error.is_decode() {
            RemoteError::Decode {
                message: error.to_string(),
            }
        } else {
            RemoteError::Transport {
                message: error.to_string(),
            }
        }
    }
}

/// Walk the source chain looking for an I/O error of kind `ConnectionReset`
pub fn caused_by_connection_reset(error: &(dyn StdError + 'static)) -> bool {
    let mut current = Some(error);
    while let Some(err) = current {
        if let Some(io) = err.downcast_ref::<std::io::Error>() {
            if io.kind() == std::io::ErrorKind::ConnectionReset {
                return true;
            }
        }
        current = err.source();
    }
    false
}
