//! Application state and the bundle of ports handed to every flow.
//!
//! # Design
//! - Session and profile live in [`AppState`], never in flow fields.
//! - Accessors clone out of the `RefCell`, so no borrow outlives a call.

use std::cell::RefCell;
use std::rc::Rc;

use tracing::debug;
use vertretung_config::TimingConfig;
use vertretung_models::{Account, UserProfile};

use crate::core::binding::{Shell, ViewBinding};
use crate::core::ports::{Backend, ProfileStore, Sleeper, Spawner, TriggerService};
use crate::core::toast::Toaster;

/// Session-scoped application state.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct AppState {
    /// Signed-in account (remote backend only).
    pub session: Option<Account>,
    /// The one authoritative profile for this session.
    pub profile: Option<UserProfile>,
}

/// Ports wired at boot.
#[derive(Clone)]
pub struct Ports {
    /// Browser storage.
    pub store: Rc<dyn ProfileStore>,
    /// Persistence variant.
    pub backend: Backend,
    /// Substitution-check trigger.
    pub trigger: Rc<dyn TriggerService>,
    /// Element updates.
    pub view: Rc<dyn ViewBinding>,
    /// Page-level effects.
    pub shell: Rc<dyn Shell>,
    /// Timers.
    pub sleeper: Rc<dyn Sleeper>,
    /// Background tasks.
    pub spawner: Rc<dyn Spawner>,
}

/// Everything a flow needs.
pub struct FlowContext {
    /// Wired ports.
    pub ports: Ports,
    /// UI durations.
    pub timings: TimingConfig,
    /// Toast scheduler.
    pub toasts: Toaster,
    state: RefCell<AppState>,
}

impl FlowContext {
    /// Build a context with empty state.
    #[must_use]
    pub fn new(ports: Ports, timings: TimingConfig) -> Rc<Self> {
        let toasts = Toaster::new(
            Rc::clone(&ports.shell),
            Rc::clone(&ports.sleeper),
            Rc::clone(&ports.spawner),
            timings.toast(),
        );
        Rc::new(Self {
            ports,
            timings,
            toasts,
            state: RefCell::new(AppState::default()),
        })
    }

    /// Snapshot of the state.
    #[must_use]
    pub fn snapshot(&self) -> AppState {
        self.state.borrow().clone()
    }

    /// Active profile.
    #[must_use]
    pub fn profile(&self) -> Option<UserProfile> {
        self.state.borrow().profile.clone()
    }

    /// Replace the active profile.
    pub fn set_profile(&self, profile: Option<UserProfile>) {
        self.state.borrow_mut().profile = profile;
    }

    /// Active session, restoring it from session storage when needed.
    #[must_use]
    pub fn session(&self) -> Option<Account> {
        if !self.ports.backend.is_remote() {
            return None;
        }
        if let Some(account) = self.state.borrow().session.clone() {
            return Some(account);
        }
        let restored = self.ports.store.load_session()?;
        debug!(uid = %restored.uid, "session restored");
        self.state.borrow_mut().session = Some(restored.clone());
        Some(restored)
    }

    /// Replace the active session.
    pub fn set_session(&self, session: Option<Account>) {
        self.state.borrow_mut().session = session;
    }

    /// Whether a profile (local) or a session (remote) exists.
    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        if self.ports.backend.is_remote() {
            self.session().is_some()
        } else {
            self.profile().is_some() || matches!(self.ports.store.load_profile(), Ok(Some(_)))
        }
    }

    /// Drop session and profile from state and storage.
    pub fn clear(&self) {
        *self.state.borrow_mut() = AppState::default();
        self.ports.store.clear_session();
    }
}
