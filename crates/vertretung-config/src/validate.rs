//! Validation helpers for configuration documents.
//!
//! # Design
//! - Check only what the remote paths need; local mode ignores identity fields.
//! - Report the first failing field with its section for a readable boot error.

use url::Url;

use crate::error::{ConfigError, ConfigResult};
use crate::model::{AppConfig, BackendMode, TriggerMode};

/// Validate a parsed configuration.
///
/// # Errors
///
/// Returns [`ConfigError::InvalidField`] for the first field that fails.
pub fn validate(config: &AppConfig) -> ConfigResult<()> {
    if config.backend == BackendMode::Remote {
        require_non_empty("identity", "api_key", &config.identity.api_key)?;
        require_non_empty("identity", "project_id", &config.identity.project_id)?;
        require_http_url(
            "identity",
            "identity_base_url",
            &config.identity.identity_base_url,
        )?;
        if let Some(url) = config.identity.database_url.as_deref() {
            require_http_url("identity", "database_url", url)?;
        }
    }

    if config.trigger.mode == TriggerMode::Remote {
        require_http_url("trigger", "endpoint", &config.trigger.endpoint)?;
        require_non_empty("trigger", "git_ref", &config.trigger.git_ref)?;
    }

    let timings = &config.timings;
    require_positive("timings", "success_dwell_ms", timings.success_dwell_ms)?;
    require_positive("timings", "error_dwell_ms", timings.error_dwell_ms)?;
    require_positive("timings", "toast_ms", timings.toast_ms)?;
    require_positive("timings", "panel_transition_ms", timings.panel_transition_ms)?;
    require_positive("timings", "close_after_save_ms", timings.close_after_save_ms)?;

    match config.logging.format.as_str() {
        "pretty" | "json" => Ok(()),
        other => Err(ConfigError::invalid(
            "logging",
            "format",
            format!("must be 'pretty' or 'json', got '{other}'"),
        )),
    }
}

fn require_non_empty(section: &'static str, field: &'static str, value: &str) -> ConfigResult<()> {
    if value.trim().is_empty() {
        return Err(ConfigError::invalid(section, field, "must not be empty"));
    }
    Ok(())
}

fn require_positive(section: &'static str, field: &'static str, value: u64) -> ConfigResult<()> {
    if value == 0 {
        return Err(ConfigError::invalid(section, field, "must be greater than zero"));
    }
    Ok(())
}

#[allow(clippy::redundant_pub_crate)]
pub(crate) fn require_http_url(
    section: &'static str,
    field: &'static str,
    value: &str,
) -> ConfigResult<Url> {
    let url = Url::parse(value)
        .map_err(|err| ConfigError::invalid(section, field, format!("invalid URL: {err}")))?;
    match url.scheme() {
        "http" | "https" => Ok(url),
        scheme => Err(ConfigError::invalid(
            section,
            field,
            format!("unsupported scheme '{scheme}'"),
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{IdentityConfig, TriggerConfig};

    fn remote_config() -> AppConfig {
        AppConfig {
            backend: BackendMode::Remote,
            identity: IdentityConfig {
                api_key: "web-key".into(),
                ..IdentityConfig::default()
            },
            trigger: TriggerConfig {
                mode: TriggerMode::Remote,
                ..TriggerConfig::default()
            },
            ..AppConfig::default()
        }
    }

    #[test]
    fn defaults_are_valid() {
        assert!(validate(&AppConfig::default()).is_ok());
        assert!(validate(&remote_config()).is_ok());
    }

    #[test]
    fn remote_backend_requires_api_key() {
        let mut config = remote_config();
        config.identity.api_key = "  ".into();
        let err = validate(&config).err();
        assert!(matches!(
            err,
            Some(ConfigError::InvalidField {
                section: "identity",
                field: "api_key",
                ..
            })
        ));
    }

    #[test]
    fn local_backend_ignores_identity_fields() {
        let config = AppConfig {
            identity: IdentityConfig {
                identity_base_url: "not a url".into(),
                ..IdentityConfig::default()
            },
            ..AppConfig::default()
        };
        assert!(validate(&config).is_ok());
    }

    #[test]
    fn remote_trigger_rejects_non_http_endpoint() {
        let mut config = remote_config();
        config.trigger.endpoint = "ftp://example.test/dispatch".into();
        let err = validate(&config).err();
        assert!(matches!(
            err,
            Some(ConfigError::InvalidField {
                section: "trigger",
                field: "endpoint",
                ..
            })
        ));
    }

    #[test]
    fn zero_durations_are_rejected() {
        let mut config = AppConfig::default();
        config.timings.error_dwell_ms = 0;
        assert!(matches!(
            validate(&config),
            Err(ConfigError::InvalidField {
                field: "error_dwell_ms",
                ..
            })
        ));
    }

    #[test]
    fn unknown_log_format_is_rejected() {
        let mut config = AppConfig::default();
        config.logging.format = "xml".into();
        assert!(validate(&config).is_err());
    }
}
