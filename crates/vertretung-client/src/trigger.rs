//! Workflow dispatch client.
//!
//! A dispatch is accepted only when the service answers `204 No Content`; any
//! other status is reported as a rejection with whatever message the body carries.

use reqwest::header::{ACCEPT, AUTHORIZATION};
use reqwest::{Client, StatusCode};
use serde_json::json;
use tracing::{info, instrument, warn};
use url::Url;
use vertretung_config::TriggerConfig;

use crate::error::{ClientError, ClientResult, extract_message};

const DISPATCH_ACCEPT: &str = "application/vnd.github.v3+json";

/// Result of a dispatch request that reached the service.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum DispatchStatus {
    /// The job was queued.
    Accepted,
    /// The service answered with something other than `204`.
    Rejected {
        /// HTTP status code.
        status: u16,
        /// Message from the response body, if any.
        message: Option<String>,
    },
}

/// Starts the substitution-check job.
#[derive(Clone)]
pub struct TriggerClient {
    http: Client,
    endpoint: Url,
    token: Option<String>,
    git_ref: String,
}

impl std::fmt::Debug for TriggerClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TriggerClient")
            .field("endpoint", &self.endpoint.as_str())
            .field("token", &self.token.as_ref().map(|_| "<redacted>"))
            .field("git_ref", &self.git_ref)
            .finish_non_exhaustive()
    }
}

impl TriggerClient {
    /// Build a client from configuration.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::InvalidEndpoint`] when the endpoint is not a URL.
    pub fn from_config(http: Client, config: &TriggerConfig) -> ClientResult<Self> {
        let endpoint = Url::parse(&config.endpoint).map_err(|err| ClientError::InvalidEndpoint {
            value: config.endpoint.clone(),
            reason: err.to_string(),
        })?;
        Ok(Self {
            http,
            endpoint,
            token: config.token.clone().filter(|token| !token.trim().is_empty()),
            git_ref: config.git_ref.clone(),
        })
    }

    /// Request one run of the job.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Transport`] when no response was received.
    #[instrument(skip(self), fields(endpoint = %self.endpoint))]
    pub async fn dispatch(&self) -> ClientResult<DispatchStatus> {
        let mut request = self
            .http
            .post(self.endpoint.clone())
            .header(ACCEPT, DISPATCH_ACCEPT)
            .json(&json!({ "ref": self.git_ref }));
        if let Some(token) = self.token.as_deref() {
            request = request.header(AUTHORIZATION, format!("token {token}"));
        }

        let response = request
            .send()
            .await
            .map_err(|source| ClientError::Transport {
                operation: "dispatch",
                source,
            })?;
        let status = response.status();
        if status == StatusCode::NO_CONTENT {
            info!("substitution check dispatched");
            return Ok(DispatchStatus::Accepted);
        }

        let body = response.bytes().await.unwrap_or_default();
        let message = extract_message(&body);
        warn!(status = status.as_u16(), message = ?message, "dispatch rejected");
        Ok(DispatchStatus::Rejected {
            status: status.as_u16(),
            message,
        })
    }
}
