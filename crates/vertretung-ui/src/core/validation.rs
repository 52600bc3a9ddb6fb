//! Form validation shared by the setup and settings flows.
//!
//! # Design
//! - Inputs are checked in display order; the first blank field wins.
//! - Blank means empty after trimming.
//! - The e-mail pattern only requires `local@domain.tld` without whitespace.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::core::error::ValidationError;

const EMAIL_PATTERN: &str = r"^[^\s@]+@[^\s@]+\.[^\s@]+$";

static EMAIL_RE: Lazy<Result<Regex, regex::Error>> = Lazy::new(|| Regex::new(EMAIL_PATTERN));

/// Fail with [`ValidationError::MissingField`] for the first blank input.
///
/// # Errors
///
/// Returns the name of the first blank field.
pub fn require_filled(fields: &[(&'static str, &str)]) -> Result<(), ValidationError> {
    match fields.iter().find(|(_, value)| value.trim().is_empty()) {
        Some((field, _)) => Err(ValidationError::MissingField { field: *field }),
        None => Ok(()),
    }
}

/// Whether `email` looks like an address.
#[must_use]
pub fn is_valid_email(email: &str) -> bool {
    EMAIL_RE
        .as_ref()
        .is_ok_and(|pattern| pattern.is_match(email.trim()))
}

/// Required-field check followed by the e-mail pattern check.
///
/// # Errors
///
/// Returns [`ValidationError::MissingField`] or [`ValidationError::InvalidEmail`].
pub fn validate_inputs(fields: &[(&'static str, &str)], email: &str) -> Result<(), ValidationError> {
    require_filled(fields)?;
    if is_valid_email(email) {
        Ok(())
    } else {
        Err(ValidationError::InvalidEmail)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pattern_compiles() {
        assert!(EMAIL_RE.is_ok());
    }

    #[test]
    fn blank_field_is_reported_by_name() {
        let result = require_filled(&[("name", "Anna"), ("class", "  "), ("email", "")]);
        assert_eq!(result, Err(ValidationError::MissingField { field: "class" }));
        assert_eq!(require_filled(&[("name", "Anna")]), Ok(()));
        assert_eq!(require_filled(&[]), Ok(()));
    }

    #[test]
    fn fails_iff_some_field_is_blank() {
        let values = ["", " ", "x", "8b"];
        for a in values {
            for b in values {
                let fields = [("a", a), ("b", b)];
                let blank = a.trim().is_empty() || b.trim().is_empty();
                assert_eq!(
                    validate_inputs(&fields, "anna@example.com").is_err(),
                    blank,
                    "a={a:?} b={b:?}"
                );
            }
        }
    }

    #[test]
    fn email_pattern_accepts_and_rejects() {
        for good in ["anna@example.com", "a.b+c@school.example.de", "x@y.z"] {
            assert!(is_valid_email(good), "{good}");
        }
        for bad in ["not-an-email", "anna@example", "@example.com", "an na@example.com", "a@@b.c"] {
            assert!(!is_valid_email(bad), "{bad}");
        }
    }

    #[test]
    fn missing_field_takes_precedence_over_email() {
        assert_eq!(
            validate_inputs(&[("time", "")], "not-an-email"),
            Err(ValidationError::MissingField { field: "time" })
        );
        assert_eq!(
            validate_inputs(&[("time", "19:00")], "not-an-email"),
            Err(ValidationError::InvalidEmail)
        );
    }
}
