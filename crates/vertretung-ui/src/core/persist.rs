//! Key-value backed [`ProfileStore`].
//!
//! # Design
//! - Profile and session are stored as JSON; the theme as a bare `light`/`dark` string.
//! - Profile and theme go to the long-lived store, the session to the tab-scoped one.
//! - Unreadable values are logged and treated as absent, except the profile, whose
//!   decode failure is reported so the dashboard can show it.

use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::warn;
use vertretung_models::{Account, Theme, UserProfile};

use crate::core::error::StorageError;
use crate::core::ports::ProfileStore;

/// Profile key in long-lived storage.
pub const PROFILE_KEY: &str = "vertretung.profile";
/// Theme key in long-lived storage.
pub const THEME_KEY: &str = "vertretung.theme";
/// Session key in tab-scoped storage.
pub const SESSION_KEY: &str = "vertretung.session";

/// Raw string storage such as `localStorage`.
pub trait KeyValue {
    /// Stored value.
    fn get(&self, key: &str) -> Option<String>;
    /// Store a value.
    ///
    /// # Errors
    ///
    /// Returns the backend's message when the write is rejected.
    fn set(&self, key: &str, value: &str) -> Result<(), String>;
    /// Remove a value.
    fn delete(&self, key: &str);
}

/// [`ProfileStore`] over a long-lived and a tab-scoped [`KeyValue`].
#[derive(Debug, Default)]
pub struct PersistedStore<L, S> {
    local: L,
    session: S,
}

impl<L: KeyValue, S: KeyValue> PersistedStore<L, S> {
    /// Wrap the two backends.
    pub const fn new(local: L, session: S) -> Self {
        Self { local, session }
    }

    /// Long-lived backend.
    pub const fn local(&self) -> &L {
        &self.local
    }
}

fn write_json<T: Serialize>(
    backend: &impl KeyValue,
    key: &'static str,
    value: &T,
) -> Result<(), StorageError> {
    let encoded = serde_json::to_string(value).map_err(|err| StorageError {
        key,
        message: err.to_string(),
    })?;
    backend
        .set(key, &encoded)
        .map_err(|message| StorageError { key, message })
}

fn read_json<T: DeserializeOwned>(
    backend: &impl KeyValue,
    key: &'static str,
) -> Result<Option<T>, StorageError> {
    backend
        .get(key)
        .map(|raw| serde_json::from_str(&raw))
        .transpose()
        .map_err(|err| StorageError {
            key,
            message: err.to_string(),
        })
}

impl<L: KeyValue, S: KeyValue> ProfileStore for PersistedStore<L, S> {
    fn load_profile(&self) -> Result<Option<UserProfile>, StorageError> {
        read_json(&self.local, PROFILE_KEY)
    }

    fn save_profile(&self, profile: &UserProfile) -> Result<(), StorageError> {
        write_json(&self.local, PROFILE_KEY, profile)
    }

    fn clear_profile(&self) {
        self.local.delete(PROFILE_KEY);
    }

    fn load_theme(&self) -> Theme {
        self.local
            .get(THEME_KEY)
            .map_or_else(Theme::default, |raw| Theme::parse(&raw))
    }

    fn save_theme(&self, theme: Theme) -> Result<(), StorageError> {
        self.local
            .set(THEME_KEY, theme.as_str())
            .map_err(|message| StorageError {
                key: THEME_KEY,
                message,
            })
    }

    fn load_session(&self) -> Option<Account> {
        match read_json(&self.session, SESSION_KEY) {
            Ok(session) => session,
            Err(err) => {
                warn!(error = %err, "discarding unreadable session");
                self.session.delete(SESSION_KEY);
                None
            }
        }
    }

    fn save_session(&self, account: &Account) -> Result<(), StorageError> {
        write_json(&self.session, SESSION_KEY, account)
    }

    fn clear_session(&self) {
        self.session.delete(SESSION_KEY);
    }
}
