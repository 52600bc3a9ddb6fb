//! Default endpoints, identifiers and timings.
//!
//! # Design
//! - Every section has a usable default so the UI boots without `/config.json`.
//! - Time-based defaults stay in milliseconds to match browser timers.

/// Identity Toolkit REST base URL.
pub const IDENTITY_BASE_URL: &str = "https://identitytoolkit.googleapis.com";
/// Project identifier used to derive the realtime database URL.
pub const PROJECT_ID: &str = "vertretungsplan-checker";
/// Workflow dispatch endpoint for the substitution check job.
pub const TRIGGER_ENDPOINT: &str = "https://api.github.com/repos/luka-loehr/substitution-checker/actions/workflows/check-substitutions.yml/dispatches";
/// Branch the workflow is dispatched on.
pub const TRIGGER_GIT_REF: &str = "main";
/// Delay before a simulated dispatch reports success.
pub const SIMULATED_DELAY_MS: u64 = 1_500;
/// How long the check button shows a success result.
pub const SUCCESS_DWELL_MS: u64 = 10_000;
/// How long the check button shows an error result.
pub const ERROR_DWELL_MS: u64 = 5_000;
/// Toast display duration.
pub const TOAST_MS: u64 = 3_000;
/// Settings panel enter/exit transition duration.
pub const PANEL_TRANSITION_MS: u64 = 300;
/// Delay before the settings panel closes after a successful save.
pub const CLOSE_AFTER_SAVE_MS: u64 = 1_500;
/// Default log filter.
pub const LOG_LEVEL: &str = "info";
/// Default log format.
pub const LOG_FORMAT: &str = "pretty";
