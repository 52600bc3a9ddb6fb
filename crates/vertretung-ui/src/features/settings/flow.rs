//! Settings flow: panel toggle, saves, theme and remote settings load.

use std::cell::RefCell;
use std::rc::Rc;
use std::time::Duration;

use tracing::{debug, info, instrument, warn};
use vertretung_models::{SettingPatch, StoredSettings, Theme, UserProfile};

use crate::core::binding::{Binding, Tone, ViewBinding};
use crate::core::context::FlowContext;
use crate::core::error::{FlowError, FlowResult};
use crate::core::ports::{Sleeper, Spawner};
use crate::core::tasks::TaskSlot;
use crate::core::text;
use crate::features::settings::state::{PanelMachine, PanelState, PanelTransition, SettingsForm};

/// Panel machine plus its pending hide.
struct Panel {
    machine: RefCell<PanelMachine>,
    hide: TaskSlot,
    view: Rc<dyn ViewBinding>,
    sleeper: Rc<dyn Sleeper>,
    spawner: Rc<dyn Spawner>,
    transition: Duration,
}

impl Panel {
    fn toggle(self: &Rc<Self>) {
        let transition = self.machine.borrow_mut().toggle();
        match transition {
            PanelTransition::Opened => {
                self.hide.cancel();
                self.view.set_visible(Binding::SettingsPanel, true);
                self.view.set_tone(Binding::SettingsPanel, Some(Tone::Enter));
            }
            PanelTransition::Closing(epoch) => self.leave(epoch),
        }
    }

    fn close(self: &Rc<Self>) {
        let closing = self.machine.borrow_mut().close();
        if let Some(epoch) = closing {
            self.leave(epoch);
        }
    }

    fn leave(self: &Rc<Self>, epoch: u64) {
        self.view.set_tone(Binding::SettingsPanel, Some(Tone::Exit));
        let panel = Rc::clone(self);
        self.hide.replace(self.spawner.as_ref(), async move {
            panel.sleeper.sleep(panel.transition).await;
            let finished = panel.machine.borrow_mut().finish(epoch);
            if finished {
                panel.view.set_visible(Binding::SettingsPanel, false);
                panel.view.set_tone(Binding::SettingsPanel, None);
            }
        });
    }
}

/// Settings panel controller.
pub struct SettingsFlow {
    ctx: Rc<FlowContext>,
    panel: Rc<Panel>,
    close_after_save: TaskSlot,
}

impl SettingsFlow {
    /// Flow over a shared context.
    #[must_use]
    pub fn new(ctx: Rc<FlowContext>) -> Self {
        let panel = Rc::new(Panel {
            machine: RefCell::new(PanelMachine::new()),
            hide: TaskSlot::new(),
            view: Rc::clone(&ctx.ports.view),
            sleeper: Rc::clone(&ctx.ports.sleeper),
            spawner: Rc::clone(&ctx.ports.spawner),
            transition: ctx.timings.panel_transition(),
        });
        Self {
            ctx,
            panel,
            close_after_save: TaskSlot::new(),
        }
    }

    /// Current panel state.
    #[must_use]
    pub fn panel_state(&self) -> PanelState {
        self.panel.machine.borrow().state()
    }

    /// Open or close the panel; a manual toggle cancels a pending post-save close.
    pub fn toggle_panel(&self) {
        self.close_after_save.cancel();
        self.panel.toggle();
    }

    /// Validate and persist the full settings object.
    ///
    /// # Errors
    ///
    /// Validation, remote and storage failures; each is also shown as an error toast.
    #[instrument(skip(self, form))]
    pub async fn save_settings(&self, form: &SettingsForm) -> FlowResult<()> {
        match self.persist_settings(form).await {
            Ok(profile) => {
                info!("settings saved");
                let view = &self.ctx.ports.view;
                view.set_text(Binding::EmailSetting, &profile.email);
                view.set_text(Binding::TimeSetting, &profile.notification_time);
                self.ctx.set_profile(Some(profile));
                self.ctx.toasts.success(text::SETTINGS_SAVED);
                let panel = Rc::clone(&self.panel);
                let sleeper = Rc::clone(&self.ctx.ports.sleeper);
                let delay = self.ctx.timings.close_after_save();
                self.close_after_save
                    .replace(self.ctx.ports.spawner.as_ref(), async move {
                        sleeper.sleep(delay).await;
                        panel.close();
                    });
                Ok(())
            }
            Err(err) => {
                warn!(error = %err, "settings save failed");
                let message = match &err {
                    FlowError::Validation(_) => err.user_message(),
                    _ => text::settings_failed(&err.user_message()),
                };
                self.ctx.toasts.error(message);
                Err(err)
            }
        }
    }

    /// Persist the e-mail notification flag on its own.
    ///
    /// # Errors
    ///
    /// Remote and storage failures; the toggle is reverted and an error toast shown.
    #[instrument(skip(self))]
    pub async fn toggle_email_notifications(&self, enabled: bool) -> FlowResult<()> {
        let patch = SettingPatch::EmailNotifications(enabled);
        match self.persist_patch(patch).await {
            Ok(profile) => {
                self.ctx.set_profile(Some(profile));
                self.ctx.ports.view.set_checked(Binding::EmailToggle, enabled);
                self.ctx.toasts.success(if enabled {
                    text::NOTIFICATIONS_ON
                } else {
                    text::NOTIFICATIONS_OFF
                });
                Ok(())
            }
            Err(err) => {
                warn!(error = %err, "notification toggle failed");
                self.ctx
                    .ports
                    .view
                    .set_checked(Binding::EmailToggle, !enabled);
                self.ctx.toasts.error(text::NOTIFICATIONS_FAILED);
                Err(err)
            }
        }
    }

    /// Apply and remember the theme in browser storage only.
    pub fn toggle_theme(&self, dark: bool) {
        let theme = Theme::from_dark(dark);
        if let Err(err) = self.ctx.ports.store.save_theme(theme) {
            warn!(error = %err, "theme not persisted");
        }
        self.ctx.ports.view.set_checked(Binding::ThemeToggle, dark);
        self.ctx.ports.shell.apply_theme(theme);
    }

    /// Read remote settings and apply the fields present; failures are only logged.
    #[instrument(skip(self))]
    pub async fn load_user_settings(&self) {
        let (Some(identity), Some(account)) =
            (self.ctx.ports.backend.remote().cloned(), self.ctx.session())
        else {
            return;
        };
        match identity.read_settings(&account).await {
            Ok(Some(settings)) => self.apply_settings(&settings),
            Ok(None) => debug!("no remote settings stored"),
            Err(err) => warn!(error = %err, "loading settings failed"),
        }
    }

    fn apply_settings(&self, settings: &StoredSettings) {
        let view = &self.ctx.ports.view;
        if let Some(email) = settings.email.as_deref() {
            view.set_text(Binding::EmailSetting, email);
        }
        if let Some(time) = settings.notification_time.as_deref() {
            view.set_text(Binding::TimeSetting, time);
        }
        if let Some(enabled) = settings.email_notifications {
            view.set_checked(Binding::EmailToggle, enabled);
        }
        if let Some(theme) = settings.theme {
            self.toggle_theme(theme.is_dark());
        }
        if let Some(mut profile) = self.ctx.profile() {
            profile.merge_settings(settings);
            self.ctx.set_profile(Some(profile));
        }
    }

    async fn persist_settings(&self, form: &SettingsForm) -> FlowResult<UserProfile> {
        form.validate()?;
        let settings = form.to_settings();
        let mut profile = self.active_profile()?;

        if let Some(identity) = self.ctx.ports.backend.remote().cloned() {
            let account = self
                .ctx
                .session()
                .ok_or(FlowError::NavigationPrecondition)?;
            identity.write_settings(&account, &settings).await?;
            profile.apply_settings(settings);
        } else {
            profile.apply_settings(settings);
            self.ctx.ports.store.save_profile(&profile)?;
        }
        Ok(profile)
    }

    async fn persist_patch(&self, patch: SettingPatch) -> FlowResult<UserProfile> {
        let mut profile = self.active_profile()?;
        if let Some(identity) = self.ctx.ports.backend.remote().cloned() {
            let account = self
                .ctx
                .session()
                .ok_or(FlowError::NavigationPrecondition)?;
            identity.write_setting(&account, patch).await?;
            profile.apply_patch(&patch);
        } else {
            profile.apply_patch(&patch);
            self.ctx.ports.store.save_profile(&profile)?;
        }
        Ok(profile)
    }

    fn active_profile(&self) -> FlowResult<UserProfile> {
        if let Some(profile) = self.ctx.profile() {
            return Ok(profile);
        }
        if self.ctx.ports.backend.is_remote() {
            return Err(FlowError::NavigationPrecondition);
        }
        self.ctx
            .ports
            .store
            .load_profile()?
            .ok_or(FlowError::NavigationPrecondition)
    }
}
