//! View-binding abstraction between the flows and the page.
//!
//! # Design
//! - Flows address page elements by [`Binding`] and never touch the DOM.
//! - [`ViewBinding`] covers element state; [`Shell`] covers page-level effects.
//! - The browser implementation writes into the yewdux [`crate::core::store::ViewStore`].

use vertretung_models::Theme;

/// Page elements a flow can update.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Binding {
    /// Dashboard greeting.
    WelcomeMessage,
    /// Dashboard class label.
    UserClass,
    /// "Check substitutions" button.
    CheckButton,
    /// Settings e-mail input.
    EmailSetting,
    /// Settings notification time input.
    TimeSetting,
    /// E-mail notification toggle.
    EmailToggle,
    /// Dark theme toggle.
    ThemeToggle,
    /// Settings panel container.
    SettingsPanel,
    /// First setup step (name, class).
    SetupStepOne,
    /// Second setup step (e-mail, time, credential).
    SetupStepTwo,
    /// Dashboard load-error banner.
    LoadError,
}

/// Visual tone applied to an element.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Tone {
    /// Request in flight.
    Loading,
    /// Last action succeeded.
    Success,
    /// Last action failed.
    Error,
    /// Enter transition.
    Enter,
    /// Exit transition.
    Exit,
}

impl Tone {
    /// CSS class used by the components.
    #[must_use]
    pub const fn class(self) -> &'static str {
        match self {
            Self::Loading => "loading",
            Self::Success => "success",
            Self::Error => "error",
            Self::Enter => "panel-enter",
            Self::Exit => "panel-exit",
        }
    }
}

/// Top-level pages.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Page {
    /// Setup and sign-in.
    Entry,
    /// Dashboard with settings panel.
    Dashboard,
}

/// Toast severity.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ToastKind {
    /// Action succeeded.
    Success,
    /// Action failed.
    Error,
}

/// A transient notification.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Toast {
    /// Monotonic identifier.
    pub id: u64,
    /// Severity.
    pub kind: ToastKind,
    /// Message text.
    pub message: String,
}

/// Element-level view updates.
pub trait ViewBinding {
    /// Replace an element's text or input value.
    fn set_text(&self, binding: Binding, text: &str);
    /// Enable or disable an interactive element.
    fn set_enabled(&self, binding: Binding, enabled: bool);
    /// Show or hide an element.
    fn set_visible(&self, binding: Binding, visible: bool);
    /// Set a toggle's checked state.
    fn set_checked(&self, binding: Binding, checked: bool);
    /// Apply or clear a visual tone.
    fn set_tone(&self, binding: Binding, tone: Option<Tone>);
}

/// Page-level effects.
pub trait Shell {
    /// Replace the current page.
    fn navigate(&self, page: Page);
    /// Blocking alert.
    fn alert(&self, message: &str);
    /// Show a toast.
    fn show_toast(&self, toast: &Toast);
    /// Remove a toast by id; unknown ids are ignored.
    fn dismiss_toast(&self, id: u64);
    /// Apply a theme to the document.
    fn apply_theme(&self, theme: Theme);
}
