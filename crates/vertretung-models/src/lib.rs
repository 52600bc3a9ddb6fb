#![forbid(unsafe_code)]
#![warn(
    unreachable_pub,
    clippy::all,
    clippy::pedantic,
    clippy::nursery,
    rustdoc::broken_intra_doc_links,
    rustdoc::bare_urls,
    missing_docs
)]
//! Shared DTOs for the Vertretung client.
//!
//! These types are the wire shape of the profile document stored under
//! `users/{uid}` and of the locally persisted profile, so the browser store and
//! the remote database always agree on field names (`notificationTime`,
//! `emailNotifications`, `class`).

use std::fmt::{self, Debug, Formatter};

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Visual theme preference.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    /// Light palette.
    #[default]
    Light,
    /// Dark palette.
    Dark,
}

impl Theme {
    /// Theme selected by a dark-mode toggle.
    #[must_use]
    pub const fn from_dark(is_dark: bool) -> Self {
        if is_dark { Self::Dark } else { Self::Light }
    }

    /// Whether this is the dark palette.
    #[must_use]
    pub const fn is_dark(self) -> bool {
        matches!(self, Self::Dark)
    }

    /// Storage/wire representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Light => "light",
            Self::Dark => "dark",
        }
    }

    /// Parse a stored theme string; unknown values fall back to light.
    #[must_use]
    pub fn parse(value: &str) -> Self {
        match value.trim() {
            "dark" => Self::Dark,
            _ => Self::Light,
        }
    }
}

const fn notifications_enabled() -> bool {
    true
}

/// Settings sub-object stored under `users/{uid}/settings`.
///
/// Setup only writes `emailNotifications`; a full settings save also writes the
/// contact overrides and the theme.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileSettings {
    /// Whether notification e-mails are sent.
    #[serde(default = "notifications_enabled")]
    pub email_notifications: bool,
    /// Contact e-mail override.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    /// Notification time override (`HH:MM`).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notification_time: Option<String>,
    /// Theme override.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub theme: Option<Theme>,
}

impl Default for ProfileSettings {
    fn default() -> Self {
        Self {
            email_notifications: true,
            email: None,
            notification_time: None,
            theme: None,
        }
    }
}

impl ProfileSettings {
    /// Complete settings document as written by a settings save.
    #[must_use]
    pub fn full(
        email: impl Into<String>,
        notification_time: impl Into<String>,
        email_notifications: bool,
        theme: Theme,
    ) -> Self {
        Self {
            email_notifications,
            email: Some(email.into()),
            notification_time: Some(notification_time.into()),
            theme: Some(theme),
        }
    }
}

/// Settings node as read back from `users/{uid}/settings`; any field may be absent.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoredSettings {
    /// Notification e-mail flag, when written.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email_notifications: Option<bool>,
    /// Contact e-mail override.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    /// Notification time override (`HH:MM`).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notification_time: Option<String>,
    /// Theme override.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub theme: Option<Theme>,
}

impl From<ProfileSettings> for StoredSettings {
    fn from(settings: ProfileSettings) -> Self {
        Self {
            email_notifications: Some(settings.email_notifications),
            email: settings.email,
            notification_time: settings.notification_time,
            theme: settings.theme,
        }
    }
}

/// The persisted record of a user's name, class, contact e-mail and notification time.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    /// Display name.
    pub name: String,
    /// School class, e.g. `8b`.
    #[serde(rename = "class")]
    pub class_name: String,
    /// Contact e-mail.
    pub email: String,
    /// Daily notification time (`HH:MM`).
    pub notification_time: String,
    /// Settings sub-object.
    #[serde(default)]
    pub settings: ProfileSettings,
    /// Theme preference.
    #[serde(default)]
    pub theme: Theme,
}

impl UserProfile {
    /// New profile with notifications enabled and the light theme.
    #[must_use]
    pub fn new(
        name: impl Into<String>,
        class_name: impl Into<String>,
        email: impl Into<String>,
        notification_time: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            class_name: class_name.into(),
            email: email.into(),
            notification_time: notification_time.into(),
            settings: ProfileSettings::default(),
            theme: Theme::default(),
        }
    }

    /// Replace the settings sub-object and project its overrides onto the
    /// top-level fields.
    pub fn apply_settings(&mut self, settings: ProfileSettings) {
        self.settings = settings;
        self.reconcile();
    }

    /// Merge the fields present in a stored settings node, leaving the rest untouched.
    pub fn merge_settings(&mut self, stored: &StoredSettings) {
        if let Some(enabled) = stored.email_notifications {
            self.settings.email_notifications = enabled;
        }
        if stored.email.is_some() {
            self.settings.email.clone_from(&stored.email);
        }
        if stored.notification_time.is_some() {
            self.settings
                .notification_time
                .clone_from(&stored.notification_time);
        }
        if stored.theme.is_some() {
            self.settings.theme = stored.theme;
        }
        self.reconcile();
    }

    /// Project present settings overrides onto the top-level fields.
    pub fn reconcile(&mut self) {
        if let Some(email) = self.settings.email.as_ref() {
            self.email.clone_from(email);
        }
        if let Some(time) = self.settings.notification_time.as_ref() {
            self.notification_time.clone_from(time);
        }
        if let Some(theme) = self.settings.theme {
            self.theme = theme;
        }
    }

    /// Apply a single-field settings update.
    pub fn apply_patch(&mut self, patch: &SettingPatch) {
        match patch {
            SettingPatch::EmailNotifications(enabled) => {
                self.settings.email_notifications = *enabled;
            }
        }
    }
}

/// Single-field update addressed below `users/{uid}/settings`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SettingPatch {
    /// Toggle notification e-mails.
    EmailNotifications(bool),
}

impl SettingPatch {
    /// Field name below the settings node.
    #[must_use]
    pub const fn field(&self) -> &'static str {
        match self {
            Self::EmailNotifications(_) => "emailNotifications",
        }
    }

    /// JSON value written to the field.
    #[must_use]
    pub fn value(&self) -> Value {
        match self {
            Self::EmailNotifications(enabled) => Value::Bool(*enabled),
        }
    }
}

/// Authenticated account handle returned by sign-up and sign-in.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Account {
    /// Stable account identifier used as the `users/{uid}` key.
    pub uid: String,
    /// Bearer token for database calls.
    pub id_token: String,
    /// Account e-mail.
    pub email: String,
}

impl Debug for Account {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> fmt::Result {
        formatter
            .debug_struct("Account")
            .field("uid", &self.uid)
            .field("id_token", &"<redacted>")
            .field("email", &self.email)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn profile_uses_wire_field_names() -> Result<(), serde_json::Error> {
        let profile = UserProfile::new("Anna", "8b", "anna@example.com", "19:00");
        let value = serde_json::to_value(&profile)?;
        assert_eq!(value["class"], "8b");
        assert_eq!(value["notificationTime"], "19:00");
        assert_eq!(value["settings"], json!({"emailNotifications": true}));
        assert_eq!(value["theme"], "light");
        Ok(())
    }

    #[test]
    fn profile_without_settings_defaults_to_notifications_on() -> Result<(), serde_json::Error> {
        let profile: UserProfile = serde_json::from_value(json!({
            "name": "Ben",
            "class": "9a",
            "email": "ben@example.com",
            "notificationTime": "07:15"
        }))?;
        assert!(profile.settings.email_notifications);
        assert_eq!(profile.theme, Theme::Light);
        Ok(())
    }

    #[test]
    fn reconcile_projects_present_overrides_only() {
        let mut profile = UserProfile::new("Anna", "8b", "anna@example.com", "19:00");
        profile.apply_settings(ProfileSettings {
            email_notifications: false,
            email: Some("anna@school.example".into()),
            notification_time: None,
            theme: Some(Theme::Dark),
        });
        assert_eq!(profile.email, "anna@school.example");
        assert_eq!(profile.notification_time, "19:00");
        assert_eq!(profile.theme, Theme::Dark);
        assert!(!profile.settings.email_notifications);
    }

    #[test]
    fn merge_keeps_flag_when_node_omits_it() -> Result<(), serde_json::Error> {
        let stored: StoredSettings = serde_json::from_value(json!({"theme": "dark"}))?;
        assert_eq!(stored.email_notifications, None);

        let mut profile = UserProfile::new("Anna", "8b", "anna@example.com", "19:00");
        profile.settings.email_notifications = false;
        profile.merge_settings(&stored);

        assert!(!profile.settings.email_notifications);
        assert_eq!(profile.theme, Theme::Dark);
        assert_eq!(profile.email, "anna@example.com");
        Ok(())
    }

    #[test]
    fn setting_patch_addresses_single_field() {
        let patch = SettingPatch::EmailNotifications(false);
        assert_eq!(patch.field(), "emailNotifications");
        assert_eq!(patch.value(), json!(false));

        let mut profile = UserProfile::new("Anna", "8b", "anna@example.com", "19:00");
        profile.apply_patch(&patch);
        assert!(!profile.settings.email_notifications);
    }

    #[test]
    fn theme_parse_falls_back_to_light() {
        assert_eq!(Theme::parse("dark"), Theme::Dark);
        assert_eq!(Theme::parse("neon"), Theme::Light);
        assert_eq!(Theme::from_dark(true).as_str(), "dark");
    }

    #[test]
    fn account_debug_hides_token() {
        let account = Account {
            uid: "uid-1".into(),
            id_token: "secret-token".into(),
            email: "anna@example.com".into(),
        };
        let rendered = format!("{account:?}");
        assert!(rendered.contains("uid-1"));
        assert!(!rendered.contains("secret-token"));
    }
}
