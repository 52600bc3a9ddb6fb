//! App-wide yewdux store for everything the flows render.
//!
//! # Design
//! - One store mirrors the [`ViewBinding`](crate::core::binding::ViewBinding) calls so components stay dumb.
//! - Elements default to visible, enabled and untoned; the hidden-by-default set is explicit.
//! - Toasts are capped; the oldest is dropped first.

use std::collections::{BTreeMap, BTreeSet};

use vertretung_models::Theme;
use yewdux::store::Store;

use crate::core::binding::{Binding, Toast, Tone};

const MAX_TOASTS: usize = 4;

const HIDDEN_BY_DEFAULT: [Binding; 3] = [
    Binding::SetupStepTwo,
    Binding::SettingsPanel,
    Binding::LoadError,
];

/// Rendered view state.
#[derive(Clone, Debug, PartialEq, Eq, Store)]
pub struct ViewStore {
    texts: BTreeMap<Binding, String>,
    disabled: BTreeSet<Binding>,
    hidden: BTreeSet<Binding>,
    checked: BTreeSet<Binding>,
    tones: BTreeMap<Binding, Tone>,
    /// Visible toasts, oldest first.
    pub toasts: Vec<Toast>,
    /// Applied theme.
    pub theme: Theme,
}

impl Default for ViewStore {
    fn default() -> Self {
        Self {
            texts: BTreeMap::new(),
            disabled: BTreeSet::new(),
            hidden: HIDDEN_BY_DEFAULT.into_iter().collect(),
            checked: BTreeSet::new(),
            tones: BTreeMap::new(),
            toasts: Vec::new(),
            theme: Theme::default(),
        }
    }
}

impl ViewStore {
    /// Text bound to an element; empty when never set.
    #[must_use]
    pub fn text(&self, binding: Binding) -> &str {
        self.texts.get(&binding).map_or("", String::as_str)
    }

    /// Whether the element accepts input.
    #[must_use]
    pub fn is_enabled(&self, binding: Binding) -> bool {
        !self.disabled.contains(&binding)
    }

    /// Whether the element is shown.
    #[must_use]
    pub fn is_visible(&self, binding: Binding) -> bool {
        !self.hidden.contains(&binding)
    }

    /// Whether the toggle is on.
    #[must_use]
    pub fn is_checked(&self, binding: Binding) -> bool {
        self.checked.contains(&binding)
    }

    /// Current tone.
    #[must_use]
    pub fn tone(&self, binding: Binding) -> Option<Tone> {
        self.tones.get(&binding).copied()
    }

    /// Store an element's text.
    pub fn put_text(&mut self, binding: Binding, text: &str) {
        self.texts.insert(binding, text.to_string());
    }

    /// Enable or disable an element.
    pub fn put_enabled(&mut self, binding: Binding, enabled: bool) {
        toggle(&mut self.disabled, binding, !enabled);
    }

    /// Show or hide an element.
    pub fn put_visible(&mut self, binding: Binding, visible: bool) {
        toggle(&mut self.hidden, binding, !visible);
    }

    /// Check or uncheck a toggle.
    pub fn put_checked(&mut self, binding: Binding, checked: bool) {
        toggle(&mut self.checked, binding, checked);
    }

    /// Apply or clear a tone.
    pub fn put_tone(&mut self, binding: Binding, tone: Option<Tone>) {
        match tone {
            Some(tone) => {
                self.tones.insert(binding, tone);
            }
            None => {
                self.tones.remove(&binding);
            }
        }
    }

    /// Append a toast, dropping the oldest beyond the cap.
    pub fn push_toast(&mut self, toast: Toast) {
        self.toasts.push(toast);
        if self.toasts.len() > MAX_TOASTS {
            let overflow = self.toasts.len() - MAX_TOASTS;
            self.toasts.drain(..overflow);
        }
    }

    /// Remove a toast by id.
    pub fn remove_toast(&mut self, id: u64) {
        self.toasts.retain(|toast| toast.id != id);
    }
}

fn toggle(set: &mut BTreeSet<Binding>, binding: Binding, present: bool) {
    if present {
        set.insert(binding);
    } else {
        set.remove(&binding);
    }
}
