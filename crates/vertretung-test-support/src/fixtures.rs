//! Canonical test data.
//!
//! The profile belongs to "Anna" in class `8b`; every suite uses the same
//! values so wire-shape assertions stay comparable across crates.

use serde_json::{Value, json};
use vertretung_models::{Account, UserProfile};

/// Id token handed out by [`auth_reply`] and [`anna_account`].
pub const ID_TOKEN: &str = "id-token-anna";

/// Profile as produced by a valid setup form.
#[must_use]
pub fn anna_profile() -> UserProfile {
    UserProfile::new("Anna", "8b", "anna@example.com", "19:00")
}

/// Wire form of [`anna_profile`].
#[must_use]
pub fn anna_profile_json() -> Value {
    json!({
        "name": "Anna",
        "class": "8b",
        "email": "anna@example.com",
        "notificationTime": "19:00",
        "settings": { "emailNotifications": true },
        "theme": "light"
    })
}

/// Signed-in account matching [`anna_profile`].
#[must_use]
pub fn anna_account() -> Account {
    Account {
        uid: "uid-anna".to_string(),
        id_token: ID_TOKEN.to_string(),
        email: "anna@example.com".to_string(),
    }
}

/// Successful sign-up/sign-in reply body.
#[must_use]
pub fn auth_reply(uid: &str, email: &str) -> Value {
    json!({
        "kind": "identitytoolkit#SignupNewUserResponse",
        "localId": uid,
        "idToken": ID_TOKEN,
        "email": email,
        "refreshToken": "refresh-token",
        "expiresIn": "3600"
    })
}

/// Identity API failure body, e.g. `EMAIL_EXISTS`.
#[must_use]
pub fn identity_error(message: &str) -> Value {
    json!({
        "error": {
            "code": 400,
            "message": message,
            "errors": [{ "message": message, "domain": "global", "reason": "invalid" }]
        }
    })
}

/// Realtime database failure body.
#[must_use]
pub fn database_error(message: &str) -> Value {
    json!({ "error": message })
}
