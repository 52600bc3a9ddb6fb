//! Client error type and failure classification.
//!
//! # Design
//! - Service failures carry the service's own message so callers can show it verbatim.
//! - Transport and decode failures keep their reqwest source for logging.

use reqwest::Response;
use serde_json::Value;
use thiserror::Error;

/// Errors raised by the HTTP clients.
#[derive(Debug, Error)]
pub enum ClientError {
    /// The HTTP client could not be constructed.
    #[error("failed to build HTTP client")]
    Builder {
        /// Underlying reqwest error.
        #[source]
        source: reqwest::Error,
    },
    /// An endpoint URL could not be composed.
    #[error("invalid endpoint '{value}': {reason}")]
    InvalidEndpoint {
        /// Offending URL or base.
        value: String,
        /// Why it was rejected.
        reason: String,
    },
    /// The request never produced a response.
    #[error("request to {operation} failed")]
    Transport {
        /// Operation identifier.
        operation: &'static str,
        /// Underlying reqwest error.
        #[source]
        source: reqwest::Error,
    },
    /// The service answered with a failure status.
    #[error("{message}")]
    Service {
        /// Operation identifier.
        operation: &'static str,
        /// HTTP status code.
        status: u16,
        /// Message extracted from the response body.
        message: String,
    },
    /// A success response could not be decoded.
    #[error("unexpected response from {operation}")]
    Decode {
        /// Operation identifier.
        operation: &'static str,
        /// Underlying reqwest error.
        #[source]
        source: reqwest::Error,
    },
}

impl ClientError {
    /// Message suitable for an alert or toast.
    ///
    /// Service failures return the service text unchanged; other failures
    /// include their source.
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            Self::Service { message, .. } => message.clone(),
            Self::Builder { source }
            | Self::Transport { source, .. }
            | Self::Decode { source, .. } => format!("{self}: {source}"),
            Self::InvalidEndpoint { .. } => self.to_string(),
        }
    }

    /// HTTP status for service failures.
    #[must_use]
    pub const fn status(&self) -> Option<u16> {
        match self {
            Self::Service { status, .. } => Some(*status),
            _ => None,
        }
    }
}

/// Convenience alias for client results.
pub type ClientResult<T> = Result<T, ClientError>;

/// Turn a failure response into [`ClientError::Service`].
pub(crate) async fn classify_failure(operation: &'static str, response: Response) -> ClientError {
    let status = response.status();
    let bytes = response.bytes().await.unwrap_or_default();
    let message = extract_message(&bytes)
        .unwrap_or_else(|| format!("request failed with status {}", status.as_u16()));
    ClientError::Service {
        operation,
        status: status.as_u16(),
        message,
    }
}

/// Pull a human-readable message out of a failure body.
///
/// Understands `{"error": {"message": ..}}` (identity API), `{"error": ..}`
/// (realtime database) and `{"message": ..}` (workflow API); falls back to the
/// trimmed body text.
pub(crate) fn extract_message(bytes: &[u8]) -> Option<String> {
    if let Ok(value) = serde_json::from_slice::<Value>(bytes) {
        let candidate = value
            .pointer("/error/message")
            .or_else(|| value.get("error"))
            .or_else(|| value.get("message"))
            .and_then(Value::as_str);
        if let Some(message) = candidate {
            return Some(message.to_string());
        }
    }
    let text = String::from_utf8_lossy(bytes).trim().to_string();
    if text.is_empty() { None } else { Some(text) }
}
