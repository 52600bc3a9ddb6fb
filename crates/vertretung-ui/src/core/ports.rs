//! Ports the flows depend on.
//!
//! # Design
//! - Storage is synchronous (browser storage is); remote services are async.
//! - Futures are `?Send`: everything runs on the single browser event loop.
//! - Browser adapters live in `app/`, HTTP adapters in `services/`, fakes in tests.

use std::rc::Rc;
use std::time::Duration;

use async_trait::async_trait;
use futures_util::future::LocalBoxFuture;
use vertretung_models::{
    Account, ProfileSettings, SettingPatch, StoredSettings, Theme, UserProfile,
};

use crate::core::error::{RemoteError, StorageError};

/// Local persistence of the profile, theme and session.
pub trait ProfileStore {
    /// Stored profile, if any.
    ///
    /// # Errors
    ///
    /// Returns a [`StorageError`] when the stored value cannot be read.
    fn load_profile(&self) -> Result<Option<UserProfile>, StorageError>;
    /// Persist the profile.
    ///
    /// # Errors
    ///
    /// Returns a [`StorageError`] when storage rejects the write.
    fn save_profile(&self, profile: &UserProfile) -> Result<(), StorageError>;
    /// Remove the stored profile.
    fn clear_profile(&self);
    /// Stored theme; light when unset or unreadable.
    fn load_theme(&self) -> Theme;
    /// Persist the theme.
    ///
    /// # Errors
    ///
    /// Returns a [`StorageError`] when storage rejects the write.
    fn save_theme(&self, theme: Theme) -> Result<(), StorageError>;
    /// Session-scoped account, if any.
    fn load_session(&self) -> Option<Account>;
    /// Persist the session for this browser tab.
    ///
    /// # Errors
    ///
    /// Returns a [`StorageError`] when storage rejects the write.
    fn save_session(&self, account: &Account) -> Result<(), StorageError>;
    /// Drop the session.
    fn clear_session(&self);
}

/// Hosted identity and per-user data service.
#[async_trait(?Send)]
pub trait IdentityService {
    /// Register a new account.
    async fn create_account(&self, email: &str, credential: &str)
    -> Result<Account, RemoteError>;
    /// Sign in to an existing account.
    async fn sign_in(&self, email: &str, credential: &str) -> Result<Account, RemoteError>;
    /// Read `users/{uid}`.
    async fn read_profile(&self, account: &Account) -> Result<Option<UserProfile>, RemoteError>;
    /// Replace `users/{uid}`.
    async fn write_profile(&self, account: &Account, profile: &UserProfile)
    -> Result<(), RemoteError>;
    /// Read `users/{uid}/settings`.
    async fn read_settings(&self, account: &Account)
    -> Result<Option<StoredSettings>, RemoteError>;
    /// Replace `users/{uid}/settings` in one write.
    async fn write_settings(
        &self,
        account: &Account,
        settings: &ProfileSettings,
    ) -> Result<(), RemoteError>;
    /// Write a single settings field.
    async fn write_setting(&self, account: &Account, patch: SettingPatch)
    -> Result<(), RemoteError>;
    /// End the account session.
    async fn sign_out(&self, account: &Account) -> Result<(), RemoteError>;
}

/// Answer from a dispatch that reached the trigger service.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DispatchOutcome {
    /// The job was queued (HTTP 204).
    Accepted,
    /// Any other status.
    Rejected {
        /// HTTP status code.
        status: u16,
    },
}

/// Starts the substitution-check job.
#[async_trait(?Send)]
pub trait TriggerService {
    /// Request one run.
    async fn dispatch(&self) -> Result<DispatchOutcome, RemoteError>;
}

/// Timer source.
#[async_trait(?Send)]
pub trait Sleeper {
    /// Resolve after `duration`.
    async fn sleep(&self, duration: Duration);
}

/// Detached task runner for the current event loop.
pub trait Spawner {
    /// Run `future` to completion in the background.
    fn spawn(&self, future: LocalBoxFuture<'static, ()>);
}

/// Persistence variant selected at boot.
#[derive(Clone)]
pub enum Backend {
    /// Browser storage only.
    Local,
    /// Hosted identity/data service.
    Remote(Rc<dyn IdentityService>),
}

impl Backend {
    /// Remote service handle, if any.
    #[must_use]
    pub fn remote(&self) -> Option<&Rc<dyn IdentityService>> {
        match self {
            Self::Local => None,
            Self::Remote(service) => Some(service),
        }
    }

    /// Whether accounts and sessions are in play.
    #[must_use]
    pub const fn is_remote(&self) -> bool {
        matches!(self, Self::Remote(_))
    }
}

impl std::fmt::Debug for Backend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Local => f.write_str("Local"),
            Self::Remote(_) => f.write_str("Remote"),
        }
    }
}
