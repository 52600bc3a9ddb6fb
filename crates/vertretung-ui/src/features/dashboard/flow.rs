//! Dashboard flow: auth gate, profile render, check button and logout.

use std::cell::RefCell;
use std::rc::Rc;

use tracing::{debug, info, instrument, warn};
use vertretung_models::{Theme, UserProfile};

use crate::core::binding::{Binding, Page, ViewBinding};
use crate::core::context::FlowContext;
use crate::core::error::{FlowError, FlowResult};
use crate::core::ports::DispatchOutcome;
use crate::core::tasks::TaskSlot;
use crate::core::text;
use crate::features::dashboard::state::{ButtonMachine, ButtonState};

/// Dashboard page controller.
pub struct DashboardFlow {
    ctx: Rc<FlowContext>,
    button: Rc<RefCell<ButtonMachine>>,
    reset: TaskSlot,
}

impl DashboardFlow {
    /// Flow over a shared context.
    #[must_use]
    pub fn new(ctx: Rc<FlowContext>) -> Self {
        Self {
            ctx,
            button: Rc::new(RefCell::new(ButtonMachine::new())),
            reset: TaskSlot::new(),
        }
    }

    /// Current button state.
    #[must_use]
    pub fn button_state(&self) -> ButtonState {
        self.button.borrow().state()
    }

    /// Gate on authentication, then load and render the profile.
    ///
    /// # Errors
    ///
    /// [`FlowError::NavigationPrecondition`] after redirecting to the entry page,
    /// or [`FlowError::ReadFailure`] after showing the load-error banner.
    #[instrument(skip(self))]
    pub async fn open(&self) -> FlowResult<UserProfile> {
        if !self.ctx.is_authenticated() {
            info!("no profile or session; redirecting to entry");
            self.ctx.ports.shell.navigate(Page::Entry);
            return Err(FlowError::NavigationPrecondition);
        }

        let view = &self.ctx.ports.view;
        view.set_visible(Binding::LoadError, false);
        match self.load_profile().await {
            Ok(profile) => {
                self.ctx.set_profile(Some(profile.clone()));
                let theme = self.ctx.ports.store.load_theme();
                render_profile(view.as_ref(), &profile, theme);
                self.ctx.ports.shell.apply_theme(theme);
                render_button(view.as_ref(), self.button_state());
                debug!(name = %profile.name, "dashboard rendered");
                Ok(profile)
            }
            Err(err) => {
                warn!(error = %err, "profile load failed");
                view.set_text(
                    Binding::LoadError,
                    &format!("{}: {}", text::LOAD_FAILED, err.user_message()),
                );
                view.set_visible(Binding::LoadError, true);
                Err(err)
            }
        }
    }

    /// Dispatch the substitution check and drive the button through its states.
    ///
    /// Clicks outside `Idle` are ignored. Returns the state after the dispatch settled.
    #[instrument(skip(self))]
    pub async fn check_substitutions(&self) -> ButtonState {
        let begun = self.button.borrow_mut().begin();
        let Some(epoch) = begun else {
            debug!(state = ?self.button_state(), "check ignored");
            return self.button_state();
        };
        let view = Rc::clone(&self.ctx.ports.view);
        render_button(view.as_ref(), ButtonState::Loading);

        let succeeded = match self.ctx.ports.trigger.dispatch().await {
            Ok(DispatchOutcome::Accepted) => true,
            Ok(DispatchOutcome::Rejected { status }) => {
                warn!(status, "trigger rejected dispatch");
                false
            }
            Err(err) => {
                warn!(error = %err, "trigger dispatch failed");
                false
            }
        };

        let completed = self.button.borrow_mut().complete(epoch, succeeded);
        let Some(state) = completed else {
            return self.button_state();
        };
        render_button(view.as_ref(), state);

        if let Some(dwell) = state.dwell(&self.ctx.timings) {
            let button = Rc::clone(&self.button);
            let sleeper = Rc::clone(&self.ctx.ports.sleeper);
            self.reset
                .replace(self.ctx.ports.spawner.as_ref(), async move {
                    sleeper.sleep(dwell).await;
                    let reset = button.borrow_mut().reset(epoch);
                    if reset {
                        render_button(view.as_ref(), ButtonState::Idle);
                    }
                });
        }
        state
    }

    /// Sign out and return to the entry page; a no-op for the local backend.
    ///
    /// # Errors
    ///
    /// Never fails today; sign-out failures are logged and the session is dropped anyway.
    #[instrument(skip(self))]
    pub async fn logout(&self) -> FlowResult<()> {
        let Some(identity) = self.ctx.ports.backend.remote().cloned() else {
            debug!("logout ignored for local profile");
            return Ok(());
        };
        if let Some(account) = self.ctx.session() {
            if let Err(err) = identity.sign_out(&account).await {
                warn!(error = %err, "sign-out failed; dropping session anyway");
            }
        }
        self.reset.cancel();
        self.ctx.clear();
        info!("signed out");
        self.ctx.ports.shell.navigate(Page::Entry);
        Ok(())
    }

    async fn load_profile(&self) -> FlowResult<UserProfile> {
        if let Some(identity) = self.ctx.ports.backend.remote().cloned() {
            let account = self
                .ctx
                .session()
                .ok_or(FlowError::NavigationPrecondition)?;
            let mut profile = identity
                .read_profile(&account)
                .await
                .map_err(|err| FlowError::ReadFailure(err.message))?
                .ok_or_else(|| FlowError::ReadFailure(text::PROFILE_MISSING.to_string()))?;
            profile.reconcile();
            return Ok(profile);
        }

        match self.ctx.ports.store.load_profile() {
            Ok(Some(mut profile)) => {
                profile.reconcile();
                Ok(profile)
            }
            Ok(None) => self
                .ctx
                .profile()
                .ok_or(FlowError::NavigationPrecondition),
            Err(err) => Err(FlowError::ReadFailure(err.to_string())),
        }
    }
}

/// Project a profile onto the dashboard and settings elements.
pub(crate) fn render_profile(view: &dyn ViewBinding, profile: &UserProfile, theme: Theme) {
    view.set_text(Binding::WelcomeMessage, &text::welcome(&profile.name));
    view.set_text(Binding::UserClass, &text::class_label(&profile.class_name));
    view.set_text(Binding::EmailSetting, &profile.email);
    view.set_text(Binding::TimeSetting, &profile.notification_time);
    view.set_checked(Binding::EmailToggle, profile.settings.email_notifications);
    view.set_checked(Binding::ThemeToggle, theme.is_dark());
}

fn render_button(view: &dyn ViewBinding, state: ButtonState) {
    view.set_text(Binding::CheckButton, state.label());
    view.set_enabled(Binding::CheckButton, state.enabled());
    view.set_tone(Binding::CheckButton, state.tone());
}
