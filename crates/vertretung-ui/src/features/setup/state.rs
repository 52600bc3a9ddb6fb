//! Setup form state.

use vertretung_models::UserProfile;

use crate::core::error::ValidationError;
use crate::core::validation::{require_filled, validate_inputs};

/// Raw setup inputs.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SetupForm {
    /// Display name.
    pub name: String,
    /// School class.
    pub class_name: String,
    /// Contact e-mail.
    pub email: String,
    /// Notification time (`HH:MM`).
    pub notification_time: String,
    /// Account password; only used with the remote backend.
    pub credential: String,
}

impl SetupForm {
    /// Step one: name and class.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::MissingField`] for the first blank input.
    pub fn validate_step_one(&self) -> Result<(), ValidationError> {
        require_filled(&[
            ("name", self.name.as_str()),
            ("class", self.class_name.as_str()),
        ])
    }

    /// Whole form; the credential is required only when `needs_credential`.
    ///
    /// # Errors
    ///
    /// Returns the first validation failure.
    pub fn validate(&self, needs_credential: bool) -> Result<(), ValidationError> {
        let mut fields = vec![
            ("name", self.name.as_str()),
            ("class", self.class_name.as_str()),
            ("email", self.email.as_str()),
            ("notificationTime", self.notification_time.as_str()),
        ];
        if needs_credential {
            fields.push(("credential", self.credential.as_str()));
        }
        validate_inputs(&fields, &self.email)
    }

    /// Profile built from the trimmed inputs.
    #[must_use]
    pub fn to_profile(&self) -> UserProfile {
        UserProfile::new(
            self.name.trim(),
            self.class_name.trim(),
            self.email.trim(),
            self.notification_time.trim(),
        )
    }
}

/// Visible setup step.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum SetupStep {
    /// Name and class.
    #[default]
    One,
    /// Contact details and credential.
    Two,
}

#[cfg(test)]
mod tests {
    use super::*;
    use vertretung_test_support::fixtures;

    fn anna() -> SetupForm {
        SetupForm {
            name: " Anna ".into(),
            class_name: "8b".into(),
            email: "anna@example.com".into(),
            notification_time: "19:00".into(),
            credential: String::new(),
        }
    }

    #[test]
    fn step_one_ignores_later_fields() {
        let form = SetupForm {
            name: "Anna".into(),
            class_name: "8b".into(),
            ..SetupForm::default()
        };
        assert_eq!(form.validate_step_one(), Ok(()));
        assert_eq!(
            form.validate(false),
            Err(ValidationError::MissingField { field: "email" })
        );
    }

    #[test]
    fn credential_only_required_when_remote() {
        let form = anna();
        assert_eq!(form.validate(false), Ok(()));
        assert_eq!(
            form.validate(true),
            Err(ValidationError::MissingField { field: "credential" })
        );
    }

    #[test]
    fn profile_is_trimmed_with_default_settings() {
        assert_eq!(anna().to_profile(), fixtures::anna_profile());
    }
}
