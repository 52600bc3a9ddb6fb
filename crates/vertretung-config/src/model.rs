//! Typed configuration sections.
//!
//! # Design
//! - Pure data carriers; parsing lives in `loader.rs`, checks in `validate.rs`.
//! - Every struct deserializes with `#[serde(default)]` so partial documents work.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::defaults;

/// Where profiles and settings are persisted.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BackendMode {
    /// Browser storage only; a single implicit user per device.
    #[default]
    Local,
    /// Hosted identity and realtime database service.
    Remote,
}

/// How the substitution check is started.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TriggerMode {
    /// Resolve successfully after a fixed delay without any network call.
    #[default]
    Simulated,
    /// Authenticated workflow dispatch.
    Remote,
}

/// Top-level client configuration.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Persistence backend.
    pub backend: BackendMode,
    /// Identity/database service settings.
    pub identity: IdentityConfig,
    /// Trigger service settings.
    pub trigger: TriggerConfig,
    /// UI timings.
    pub timings: TimingConfig,
    /// Logging settings.
    pub logging: LoggingSettings,
}

/// Identity and realtime database endpoints.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct IdentityConfig {
    /// Public web API key sent as `?key=` to the identity API.
    pub api_key: String,
    /// Project identifier.
    pub project_id: String,
    /// Identity API base URL.
    pub identity_base_url: String,
    /// Realtime database URL; derived from the project id when unset.
    pub database_url: Option<String>,
}

impl Default for IdentityConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            project_id: defaults::PROJECT_ID.to_string(),
            identity_base_url: defaults::IDENTITY_BASE_URL.to_string(),
            database_url: None,
        }
    }
}

impl IdentityConfig {
    /// Effective realtime database base URL without a trailing slash.
    #[must_use]
    pub fn database_url(&self) -> String {
        self.database_url.as_ref().map_or_else(
            || format!("https://{}-default-rtdb.firebaseio.com", self.project_id),
            |url| url.trim_end_matches('/').to_string(),
        )
    }
}

/// Trigger endpoint settings.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TriggerConfig {
    /// Dispatch mode.
    pub mode: TriggerMode,
    /// Dispatch URL; may point at a server-side proxy.
    pub endpoint: String,
    /// Optional token sent as `Authorization: token ...`.
    pub token: Option<String>,
    /// Branch the job is dispatched on.
    pub git_ref: String,
    /// Delay used by the simulated trigger.
    pub simulated_delay_ms: u64,
}

impl Default for TriggerConfig {
    fn default() -> Self {
        Self {
            mode: TriggerMode::default(),
            endpoint: defaults::TRIGGER_ENDPOINT.to_string(),
            token: None,
            git_ref: defaults::TRIGGER_GIT_REF.to_string(),
            simulated_delay_ms: defaults::SIMULATED_DELAY_MS,
        }
    }
}

impl std::fmt::Debug for TriggerConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TriggerConfig")
            .field("mode", &self.mode)
            .field("endpoint", &self.endpoint)
            .field("token", &self.token.as_ref().map(|_| "<redacted>"))
            .field("git_ref", &self.git_ref)
            .field("simulated_delay_ms", &self.simulated_delay_ms)
            .finish()
    }
}

impl TriggerConfig {
    /// Simulated dispatch delay.
    #[must_use]
    pub const fn simulated_delay(&self) -> Duration {
        Duration::from_millis(self.simulated_delay_ms)
    }
}

/// Fixed UI durations.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TimingConfig {
    /// Success dwell of the check button.
    pub success_dwell_ms: u64,
    /// Error dwell of the check button.
    pub error_dwell_ms: u64,
    /// Toast display time.
    pub toast_ms: u64,
    /// Settings panel transition.
    pub panel_transition_ms: u64,
    /// Panel auto-close delay after a successful save.
    pub close_after_save_ms: u64,
}

impl Default for TimingConfig {
    fn default() -> Self {
        Self {
            success_dwell_ms: defaults::SUCCESS_DWELL_MS,
            error_dwell_ms: defaults::ERROR_DWELL_MS,
            toast_ms: defaults::TOAST_MS,
            panel_transition_ms: defaults::PANEL_TRANSITION_MS,
            close_after_save_ms: defaults::CLOSE_AFTER_SAVE_MS,
        }
    }
}

impl TimingConfig {
    /// Success dwell as a duration.
    #[must_use]
    pub const fn success_dwell(&self) -> Duration {
        Duration::from_millis(self.success_dwell_ms)
    }

    /// Error dwell as a duration.
    #[must_use]
    pub const fn error_dwell(&self) -> Duration {
        Duration::from_millis(self.error_dwell_ms)
    }

    /// Toast display time as a duration.
    #[must_use]
    pub const fn toast(&self) -> Duration {
        Duration::from_millis(self.toast_ms)
    }

    /// Panel transition as a duration.
    #[must_use]
    pub const fn panel_transition(&self) -> Duration {
        Duration::from_millis(self.panel_transition_ms)
    }

    /// Close-after-save delay as a duration.
    #[must_use]
    pub const fn close_after_save(&self) -> Duration {
        Duration::from_millis(self.close_after_save_ms)
    }
}

/// Logging filter and output format.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingSettings {
    /// `EnvFilter` directive, e.g. `info` or `vertretung_ui=debug`.
    pub level: String,
    /// `pretty` or `json`.
    pub format: String,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: defaults::LOG_LEVEL.to_string(),
            format: defaults::LOG_FORMAT.to_string(),
        }
    }
}
