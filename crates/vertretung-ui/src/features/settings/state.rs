//! Settings form and panel state.

use vertretung_models::{ProfileSettings, Theme};

use crate::core::error::ValidationError;
use crate::core::validation::validate_inputs;

/// Values read from the settings panel.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SettingsForm {
    /// Contact e-mail input.
    pub email: String,
    /// Notification time input (`HH:MM`).
    pub notification_time: String,
    /// E-mail toggle.
    pub email_notifications: bool,
    /// Dark theme toggle.
    pub dark: bool,
}

impl SettingsForm {
    /// Check required fields and the e-mail pattern.
    ///
    /// # Errors
    ///
    /// Returns the first validation failure.
    pub fn validate(&self) -> Result<(), ValidationError> {
        validate_inputs(
            &[
                ("email", self.email.as_str()),
                ("notificationTime", self.notification_time.as_str()),
            ],
            &self.email,
        )
    }

    /// Complete settings document for a save.
    #[must_use]
    pub fn to_settings(&self) -> ProfileSettings {
        ProfileSettings::full(
            self.email.trim(),
            self.notification_time.trim(),
            self.email_notifications,
            Theme::from_dark(self.dark),
        )
    }
}

/// Panel visibility.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum PanelState {
    /// Not rendered.
    #[default]
    Hidden,
    /// Fully shown.
    Shown,
    /// Exit transition running.
    Leaving,
}

/// Effect of a panel toggle.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PanelTransition {
    /// Shown immediately with the enter transition.
    Opened,
    /// Exit transition started; the hide must carry this epoch.
    Closing(u64),
}

/// Epoch-stamped panel machine.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct PanelMachine {
    state: PanelState,
    epoch: u64,
}

impl PanelMachine {
    /// Hidden panel.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            state: PanelState::Hidden,
            epoch: 0,
        }
    }

    /// Current state.
    #[must_use]
    pub const fn state(&self) -> PanelState {
        self.state
    }

    /// Hidden/Leaving → Shown, Shown → Leaving.
    pub const fn toggle(&mut self) -> PanelTransition {
        self.epoch += 1;
        match self.state {
            PanelState::Hidden | PanelState::Leaving => {
                self.state = PanelState::Shown;
                PanelTransition::Opened
            }
            PanelState::Shown => {
                self.state = PanelState::Leaving;
                PanelTransition::Closing(self.epoch)
            }
        }
    }

    /// Shown → Leaving; `None` when the panel is not shown.
    pub const fn close(&mut self) -> Option<u64> {
        if !matches!(self.state, PanelState::Shown) {
            return None;
        }
        self.epoch += 1;
        self.state = PanelState::Leaving;
        Some(self.epoch)
    }

    /// Leaving → Hidden for the matching epoch.
    pub const fn finish(&mut self, epoch: u64) -> bool {
        if epoch != self.epoch || !matches!(self.state, PanelState::Leaving) {
            return false;
        }
        self.state = PanelState::Hidden;
        true
    }
}
