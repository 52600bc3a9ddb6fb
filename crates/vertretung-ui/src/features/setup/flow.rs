//! Setup flow: existing-user redirect, step navigation, registration and sign-in.

use std::cell::Cell;
use std::rc::Rc;

use tracing::{info, instrument, warn};
use vertretung_models::UserProfile;

use crate::core::binding::{Binding, Page};
use crate::core::context::FlowContext;
use crate::core::error::{FlowError, FlowResult};
use crate::core::text;
use crate::core::validation::validate_inputs;
use crate::features::setup::state::{SetupForm, SetupStep};

/// Entry page controller.
pub struct SetupFlow {
    ctx: Rc<FlowContext>,
    step: Cell<SetupStep>,
}

impl SetupFlow {
    /// Flow over a shared context.
    #[must_use]
    pub fn new(ctx: Rc<FlowContext>) -> Self {
        Self {
            ctx,
            step: Cell::new(SetupStep::One),
        }
    }

    /// Visible step.
    #[must_use]
    pub fn step(&self) -> SetupStep {
        self.step.get()
    }

    /// Redirect to the dashboard when a profile or session exists; returns whether it did.
    pub fn open(&self) -> bool {
        self.ctx
            .ports
            .shell
            .apply_theme(self.ctx.ports.store.load_theme());
        if self.ctx.is_authenticated() {
            info!("existing profile found; skipping setup");
            self.ctx.ports.shell.navigate(Page::Dashboard);
            return true;
        }
        self.show_step(SetupStep::One);
        false
    }

    /// Validate name and class, then reveal step two.
    ///
    /// # Errors
    ///
    /// [`FlowError::Validation`] after alerting the user.
    pub fn next_step(&self, form: &SetupForm) -> FlowResult<()> {
        if let Err(err) = form.validate_step_one() {
            return Err(self.fail(err.into()));
        }
        self.show_step(SetupStep::Two);
        Ok(())
    }

    /// Return to step one without clearing inputs.
    pub fn previous_step(&self) {
        self.show_step(SetupStep::One);
    }

    /// Validate everything and create the profile.
    ///
    /// # Errors
    ///
    /// Validation, remote or storage failures, each alerted before returning.
    #[instrument(skip(self, form))]
    pub async fn finish(&self, form: &SetupForm) -> FlowResult<UserProfile> {
        match self.register(form).await {
            Ok(profile) => {
                info!(name = %profile.name, "setup complete");
                self.ctx.set_profile(Some(profile.clone()));
                self.ctx.ports.shell.navigate(Page::Dashboard);
                Ok(profile)
            }
            Err(err) => Err(self.fail(err)),
        }
    }

    /// Sign in to an existing account and load its profile.
    ///
    /// # Errors
    ///
    /// [`FlowError::NavigationPrecondition`] for the local backend; otherwise
    /// validation, remote or read failures, each alerted before returning.
    #[instrument(skip(self, credential))]
    pub async fn sign_in(&self, email: &str, credential: &str) -> FlowResult<UserProfile> {
        let Some(identity) = self.ctx.ports.backend.remote().cloned() else {
            warn!("sign-in requested without a remote backend");
            return Err(FlowError::NavigationPrecondition);
        };
        let result = async {
            validate_inputs(&[("email", email), ("credential", credential)], email)?;
            let account = identity.sign_in(email.trim(), credential).await?;
            let mut profile = identity
                .read_profile(&account)
                .await?
                .ok_or_else(|| FlowError::ReadFailure(text::PROFILE_MISSING.to_string()))?;
            profile.reconcile();
            self.ctx.ports.store.save_session(&account)?;
            self.ctx.set_session(Some(account));
            Ok::<_, FlowError>(profile)
        }
        .await;

        match result {
            Ok(profile) => {
                info!("signed in");
                self.ctx.set_profile(Some(profile.clone()));
                self.ctx.ports.shell.navigate(Page::Dashboard);
                Ok(profile)
            }
            Err(err) => Err(self.fail(err)),
        }
    }

    async fn register(&self, form: &SetupForm) -> FlowResult<UserProfile> {
        let identity = self.ctx.ports.backend.remote().cloned();
        form.validate(identity.is_some())?;
        let mut profile = form.to_profile();
        profile.theme = self.ctx.ports.store.load_theme();

        match identity {
            None => self.ctx.ports.store.save_profile(&profile)?,
            Some(identity) => {
                let account = identity
                    .create_account(&profile.email, &form.credential)
                    .await?;
                identity.write_profile(&account, &profile).await?;
                self.ctx.ports.store.save_session(&account)?;
                self.ctx.set_session(Some(account));
            }
        }
        Ok(profile)
    }

    fn show_step(&self, step: SetupStep) {
        self.step.set(step);
        let view = &self.ctx.ports.view;
        view.set_visible(Binding::SetupStepOne, step == SetupStep::One);
        view.set_visible(Binding::SetupStepTwo, step == SetupStep::Two);
    }

    fn fail(&self, err: FlowError) -> FlowError {
        warn!(error = %err, "setup action failed");
        self.ctx.ports.shell.alert(&err.user_message());
        err
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::error::{RemoteError, ValidationError};
    use crate::testing::{Harness, run_local};
    use vertretung_models::Theme;
    use vertretung_test_support::fixtures;

    fn anna(credential: &str) -> SetupForm {
        SetupForm {
            name: "Anna".into(),
            class_name: "8b".into(),
            email: "anna@example.com".into(),
            notification_time: "19:00".into(),
            credential: credential.into(),
        }
    }

    #[test]
    fn open_redirects_existing_user() {
        let harness = Harness::local();
        harness.seed_profile(&fixtures::anna_profile());
        let flow = SetupFlow::new(Rc::clone(&harness.ctx));

        assert!(flow.open());
        assert_eq!(harness.shell.pages(), vec![Page::Dashboard]);
    }

    #[test]
    fn open_shows_step_one_for_new_user() {
        let harness = Harness::local();
        let flow = SetupFlow::new(Rc::clone(&harness.ctx));

        assert!(!flow.open());
        assert!(harness.shell.pages().is_empty());
        assert!(harness.view.is_visible(Binding::SetupStepOne));
        assert!(!harness.view.is_visible(Binding::SetupStepTwo));
    }

    #[test]
    fn next_step_requires_name_and_class() {
        let harness = Harness::local();
        let flow = SetupFlow::new(Rc::clone(&harness.ctx));
        let form = SetupForm {
            name: "Anna".into(),
            ..SetupForm::default()
        };

        assert_eq!(
            flow.next_step(&form),
            Err(FlowError::Validation(ValidationError::MissingField {
                field: "class"
            }))
        );
        assert_eq!(harness.shell.alerts(), vec!["Bitte fülle alle Felder aus.".to_string()]);
        assert_eq!(flow.step(), SetupStep::One);

        assert_eq!(flow.next_step(&anna("")), Ok(()));
        assert_eq!(flow.step(), SetupStep::Two);
        assert!(!harness.view.is_visible(Binding::SetupStepOne));
        assert!(harness.view.is_visible(Binding::SetupStepTwo));

        flow.previous_step();
        assert_eq!(flow.step(), SetupStep::One);
    }

    #[tokio::test]
    async fn local_setup_persists_and_greets() {
        run_local(async {
            let harness = Harness::local();
            let setup = SetupFlow::new(Rc::clone(&harness.ctx));

            let profile = setup.finish(&anna("")).await;

            assert_eq!(profile, Ok(fixtures::anna_profile()));
            assert_eq!(harness.stored_profile(), Some(fixtures::anna_profile()));
            assert_eq!(harness.shell.pages(), vec![Page::Dashboard]);

            let dashboard =
                crate::features::dashboard::flow::DashboardFlow::new(Rc::clone(&harness.ctx));
            assert!(dashboard.open().await.is_ok());
            assert_eq!(harness.view.text(Binding::WelcomeMessage), "Willkommen, Anna");
        })
        .await;
    }

    #[tokio::test]
    async fn blank_field_blocks_setup() {
        run_local(async {
            let harness = Harness::local();
            let flow = SetupFlow::new(Rc::clone(&harness.ctx));
            let form = SetupForm {
                notification_time: "  ".into(),
                ..anna("")
            };

            assert!(matches!(
                flow.finish(&form).await,
                Err(FlowError::Validation(ValidationError::MissingField { .. }))
            ));
            assert_eq!(harness.stored_profile(), None);
            assert!(harness.shell.pages().is_empty());
            assert_eq!(harness.shell.alerts().len(), 1);
        })
        .await;
    }

    #[tokio::test]
    async fn invalid_email_blocks_setup() {
        run_local(async {
            let harness = Harness::local();
            let flow = SetupFlow::new(Rc::clone(&harness.ctx));
            let form = SetupForm {
                email: "anna(at)example.com".into(),
                ..anna("")
            };

            assert_eq!(
                flow.finish(&form).await,
                Err(FlowError::Validation(ValidationError::InvalidEmail))
            );
            assert_eq!(harness.shell.alerts(), vec!["Ungültige E-Mail-Adresse".to_string()]);
        })
        .await;
    }

    #[tokio::test]
    async fn local_setup_keeps_stored_theme() {
        run_local(async {
            let harness = Harness::local();
            harness.seed_theme(Theme::Dark);
            let flow = SetupFlow::new(Rc::clone(&harness.ctx));

            let profile = flow.finish(&anna("")).await;
            assert_eq!(profile.map(|profile| profile.theme), Ok(Theme::Dark));
        })
        .await;
    }

    #[tokio::test]
    async fn remote_setup_registers_and_stores_session() {
        run_local(async {
            let harness = Harness::remote();
            let flow = SetupFlow::new(Rc::clone(&harness.ctx));

            assert!(flow.finish(&anna("pw-123456")).await.is_ok());

            assert_eq!(
                harness.identity().calls(),
                vec!["create_account".to_string(), "write_profile".to_string()]
            );
            assert_eq!(
                harness.identity().profile("uid-anna"),
                Some(fixtures::anna_profile())
            );
            assert_eq!(
                harness.ctx.ports.store.load_session().map(|account| account.uid),
                Some("uid-anna".to_string())
            );
            assert_eq!(harness.stored_profile(), None);
            assert_eq!(harness.shell.pages(), vec![Page::Dashboard]);
        })
        .await;
    }

    #[tokio::test]
    async fn remote_setup_requires_credential() {
        run_local(async {
            let harness = Harness::remote();
            let flow = SetupFlow::new(Rc::clone(&harness.ctx));

            assert!(flow.finish(&anna("")).await.is_err());
            assert!(harness.identity().calls().is_empty());
        })
        .await;
    }

    #[tokio::test]
    async fn remote_registration_error_is_alerted_verbatim() {
        run_local(async {
            let harness = Harness::remote();
            harness
                .identity()
                .register(&fixtures::anna_profile(), "pw-123456");
            let flow = SetupFlow::new(Rc::clone(&harness.ctx));

            let result = flow.finish(&anna("other-pw")).await;

            assert_eq!(result, Err(FlowError::Remote(RemoteError::new("EMAIL_EXISTS"))));
            assert_eq!(harness.shell.alerts(), vec!["EMAIL_EXISTS".to_string()]);
            assert!(harness.shell.pages().is_empty());
            assert_eq!(harness.ctx.session(), None);
        })
        .await;
    }

    #[tokio::test]
    async fn sign_in_loads_profile_and_session() {
        run_local(async {
            let harness = Harness::remote();
            harness
                .identity()
                .register(&fixtures::anna_profile(), "pw-123456");
            let flow = SetupFlow::new(Rc::clone(&harness.ctx));

            let profile = flow.sign_in("anna@example.com", "pw-123456").await;

            assert_eq!(profile, Ok(fixtures::anna_profile()));
            assert!(harness.ctx.is_authenticated());
            assert_eq!(harness.shell.pages(), vec![Page::Dashboard]);
        })
        .await;
    }

    #[tokio::test]
    async fn sign_in_with_wrong_credential_is_alerted() {
        run_local(async {
            let harness = Harness::remote();
            harness
                .identity()
                .register(&fixtures::anna_profile(), "pw-123456");
            let flow = SetupFlow::new(Rc::clone(&harness.ctx));

            assert!(flow.sign_in("anna@example.com", "nope").await.is_err());
            assert_eq!(
                harness.shell.alerts(),
                vec!["INVALID_LOGIN_CREDENTIALS".to_string()]
            );
            assert!(!harness.ctx.is_authenticated());
        })
        .await;
    }

    #[tokio::test]
    async fn sign_in_without_profile_is_read_failure() {
        run_local(async {
            let harness = Harness::remote();
            harness.identity().register_account_only("anna@example.com", "pw-123456");
            let flow = SetupFlow::new(Rc::clone(&harness.ctx));

            let result = flow.sign_in("anna@example.com", "pw-123456").await;

            assert_eq!(
                result,
                Err(FlowError::ReadFailure(text::PROFILE_MISSING.to_string()))
            );
            assert!(!harness.ctx.is_authenticated());
        })
        .await;
    }

    #[tokio::test]
    async fn sign_in_needs_remote_backend() {
        run_local(async {
            let harness = Harness::local();
            let flow = SetupFlow::new(Rc::clone(&harness.ctx));
            assert_eq!(
                flow.sign_in("anna@example.com", "pw").await,
                Err(FlowError::NavigationPrecondition)
            );
        })
        .await;
    }

}
