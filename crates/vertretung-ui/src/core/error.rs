//! Flow error taxonomy.
//!
//! # Design
//! - Every failure is caught at the action boundary and turned into one user-visible message.
//! - Nothing here retries; callers decide between alert, toast and button state.

use thiserror::Error;
use vertretung_client::ClientError;

use crate::core::text;

/// Input validation failures; they block the action before any side effect.
#[derive(Clone, Copy, Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    /// A required input was empty or blank.
    #[error("{}", text::MISSING_FIELDS)]
    MissingField {
        /// Name of the first empty field.
        field: &'static str,
    },
    /// The e-mail address does not match the accepted pattern.
    #[error("{}", text::INVALID_EMAIL)]
    InvalidEmail,
}

/// Failure reported by a remote service, carrying the service's message.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
#[error("{message}")]
pub struct RemoteError {
    /// Message shown to the user verbatim.
    pub message: String,
}

impl RemoteError {
    /// Wrap a service message.
    #[must_use]
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl From<ClientError> for RemoteError {
    fn from(err: ClientError) -> Self {
        Self::new(err.user_message())
    }
}

/// Browser storage failure.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
#[error("storage '{key}' unavailable: {message}")]
pub struct StorageError {
    /// Storage key involved.
    pub key: &'static str,
    /// Backend message.
    pub message: String,
}

/// Errors raised by the setup, dashboard and settings flows.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum FlowError {
    /// Input rejected before any side effect.
    #[error(transparent)]
    Validation(#[from] ValidationError),
    /// Remote service failure.
    #[error(transparent)]
    Remote(#[from] RemoteError),
    /// The page requires a profile or session that does not exist.
    #[error("no active profile")]
    NavigationPrecondition,
    /// A profile could not be read; rendering is aborted.
    #[error("{0}")]
    ReadFailure(String),
    /// Local storage could not be written.
    #[error("{0}")]
    Storage(String),
}

impl From<StorageError> for FlowError {
    fn from(err: StorageError) -> Self {
        Self::Storage(err.to_string())
    }
}

impl FlowError {
    /// Message for an alert, toast or banner.
    #[must_use]
    pub fn user_message(&self) -> String {
        self.to_string()
    }
}

/// Convenience alias for flow results.
pub type FlowResult<T> = Result<T, FlowError>;
