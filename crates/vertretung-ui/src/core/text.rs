//! User-facing strings.

/// Required input left empty.
pub const MISSING_FIELDS: &str = "Bitte fülle alle Felder aus.";
/// E-mail rejected by the pattern.
pub const INVALID_EMAIL: &str = "Ungültige E-Mail-Adresse";

/// Check button, idle.
pub const CHECK_IDLE: &str = "Nach Vertretungen suchen";
/// Check button, request in flight.
pub const CHECK_LOADING: &str = "Überprüfe Vertretungen";
/// Check button, dispatch accepted.
pub const CHECK_SUCCESS: &str = "Vertretungsprüfung gestartet";
/// Check button, dispatch failed.
pub const CHECK_ERROR: &str = "Fehler bei der Überprüfung";

/// Settings save succeeded.
pub const SETTINGS_SAVED: &str = "Einstellungen gespeichert!";
/// Notification toggle switched on.
pub const NOTIFICATIONS_ON: &str = "E-Mail-Benachrichtigungen aktiviert";
/// Notification toggle switched off.
pub const NOTIFICATIONS_OFF: &str = "E-Mail-Benachrichtigungen deaktiviert";
/// Notification toggle could not be saved.
pub const NOTIFICATIONS_FAILED: &str = "Fehler beim Ändern der Benachrichtigungseinstellungen";
/// Settings save failed; the reason is appended.
pub const SETTINGS_FAILED: &str = "Fehler beim Speichern der Einstellungen";
/// Profile could not be loaded.
pub const LOAD_FAILED: &str = "Fehler beim Laden der Benutzerdaten";
/// Remote profile missing after sign-in.
pub const PROFILE_MISSING: &str = "Keine Benutzerdaten gefunden";

/// Dashboard greeting.
#[must_use]
pub fn welcome(name: &str) -> String {
    format!("Willkommen, {name}")
}

/// Class label.
#[must_use]
pub fn class_label(class_name: &str) -> String {
    format!("Klasse {class_name}")
}

/// Settings save failure with the service reason.
#[must_use]
pub fn settings_failed(reason: &str) -> String {
    format!("{SETTINGS_FAILED}: {reason}")
}
