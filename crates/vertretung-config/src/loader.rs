//! Parsing entry points for configuration documents.

use tracing::warn;

use crate::error::{ConfigError, ConfigResult};
use crate::model::AppConfig;
use crate::validate::validate;

impl AppConfig {
    /// Parse and validate a JSON configuration document.
    ///
    /// Missing sections and fields take their defaults.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Parse`] for malformed JSON and
    /// [`ConfigError::InvalidField`] when validation fails.
    pub fn from_json(document: &str) -> ConfigResult<Self> {
        let config: Self =
            serde_json::from_str(document).map_err(|source| ConfigError::Parse { source })?;
        validate(&config)?;
        Ok(config)
    }

    /// Parse an optional document, falling back to defaults when it is absent
    /// or invalid.
    #[must_use]
    pub fn from_json_or_default(document: Option<&str>) -> Self {
        let Some(document) = document else {
            return Self::default();
        };
        match Self::from_json(document) {
            Ok(config) => config,
            Err(err) => {
                warn!(error = %err, "configuration rejected; using defaults");
                Self::default()
            }
        }
    }
}
