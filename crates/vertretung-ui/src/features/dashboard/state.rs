//! Check button state machine.
//!
//! # Design
//! - `Loading` is only reachable from `Idle`; `Idle` only from `Success`/`Error` via `reset`.
//! - Every `begin` opens a new epoch; completions and resets for other epochs are ignored.

use std::time::Duration;

use vertretung_config::TimingConfig;

use crate::core::binding::Tone;
use crate::core::text;

/// Visible state of the check button.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ButtonState {
    /// Ready for a click.
    #[default]
    Idle,
    /// Dispatch in flight.
    Loading,
    /// Dispatch accepted; dwelling before reset.
    Success,
    /// Dispatch failed; dwelling before reset.
    Error,
}

impl ButtonState {
    /// Button label.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Idle => text::CHECK_IDLE,
            Self::Loading => text::CHECK_LOADING,
            Self::Success => text::CHECK_SUCCESS,
            Self::Error => text::CHECK_ERROR,
        }
    }

    /// Visual tone; `None` when idle.
    #[must_use]
    pub const fn tone(self) -> Option<Tone> {
        match self {
            Self::Idle => None,
            Self::Loading => Some(Tone::Loading),
            Self::Success => Some(Tone::Success),
            Self::Error => Some(Tone::Error),
        }
    }

    /// Only the idle button accepts clicks.
    #[must_use]
    pub const fn enabled(self) -> bool {
        matches!(self, Self::Idle)
    }

    /// Time spent in this state before the automatic reset.
    #[must_use]
    pub const fn dwell(self, timings: &TimingConfig) -> Option<Duration> {
        match self {
            Self::Success => Some(timings.success_dwell()),
            Self::Error => Some(timings.error_dwell()),
            Self::Idle | Self::Loading => None,
        }
    }
}

/// Epoch-stamped button machine.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ButtonMachine {
    state: ButtonState,
    epoch: u64,
}

impl ButtonMachine {
    /// Idle machine at epoch zero.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            state: ButtonState::Idle,
            epoch: 0,
        }
    }

    /// Current state.
    #[must_use]
    pub const fn state(&self) -> ButtonState {
        self.state
    }

    /// Current epoch.
    #[must_use]
    pub const fn epoch(&self) -> u64 {
        self.epoch
    }

    /// Idle → Loading; returns the new epoch, or `None` when not idle.
    pub const fn begin(&mut self) -> Option<u64> {
        if !matches!(self.state, ButtonState::Idle) {
            return None;
        }
        self.epoch += 1;
        self.state = ButtonState::Loading;
        Some(self.epoch)
    }

    /// Loading → Success/Error for the matching epoch.
    pub const fn complete(&mut self, epoch: u64, succeeded: bool) -> Option<ButtonState> {
        if epoch != self.epoch || !matches!(self.state, ButtonState::Loading) {
            return None;
        }
        self.state = if succeeded {
            ButtonState::Success
        } else {
            ButtonState::Error
        };
        Some(self.state)
    }

    /// Success/Error → Idle for the matching epoch.
    pub const fn reset(&mut self, epoch: u64) -> bool {
        if epoch != self.epoch || !matches!(self.state, ButtonState::Success | ButtonState::Error)
        {
            return false;
        }
        self.state = ButtonState::Idle;
        true
    }
}
