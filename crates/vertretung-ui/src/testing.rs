//! In-memory ports for flow tests.
//!
//! Tests run on a tokio `LocalSet` with paused time so dwell, toast and panel
//! timers can be stepped deterministically.

use std::cell::{Cell, RefCell};
use std::collections::{BTreeMap, VecDeque};
use std::future::Future;
use std::rc::Rc;
use std::time::Duration;

use async_trait::async_trait;
use futures_util::future::LocalBoxFuture;
use tokio::task::LocalSet;
use vertretung_config::TimingConfig;
use vertretung_models::{
    Account, ProfileSettings, SettingPatch, StoredSettings, Theme, UserProfile,
};
use vertretung_test_support::fixtures;

use crate::core::binding::{Binding, Page, Shell, Toast, Tone, ViewBinding};
use crate::core::context::{FlowContext, Ports};
use crate::core::error::RemoteError;
use crate::core::persist::{KeyValue, PersistedStore};
use crate::core::ports::{
    Backend, DispatchOutcome, IdentityService, ProfileStore, Sleeper, Spawner, TriggerService,
};
use crate::core::store::ViewStore;

/// Drive `future` on a fresh `LocalSet` so `spawn_local` works.
pub(crate) async fn run_local<F: Future>(future: F) -> F::Output {
    LocalSet::new().run_until(future).await
}

pub(crate) struct TokioSpawner;

impl Spawner for TokioSpawner {
    fn spawn(&self, future: LocalBoxFuture<'static, ()>) {
        drop(tokio::task::spawn_local(future));
    }
}

pub(crate) struct TokioSleeper;

#[async_trait(?Send)]
impl Sleeper for TokioSleeper {
    async fn sleep(&self, duration: Duration) {
        tokio::time::sleep(duration).await;
    }
}

#[derive(Default)]
pub(crate) struct MemoryKeyValue {
    values: RefCell<BTreeMap<String, String>>,
    failure: RefCell<Option<String>>,
}

impl MemoryKeyValue {
    pub(crate) fn fail_writes(&self, message: &str) {
        *self.failure.borrow_mut() = Some(message.to_string());
    }
}

impl KeyValue for MemoryKeyValue {
    fn get(&self, key: &str) -> Option<String> {
        self.values.borrow().get(key).cloned()
    }

    fn set(&self, key: &str, value: &str) -> Result<(), String> {
        if let Some(message) = self.failure.borrow().clone() {
            return Err(message);
        }
        self.values
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn delete(&self, key: &str) {
        self.values.borrow_mut().remove(key);
    }
}

pub(crate) type MemoryStore = PersistedStore<MemoryKeyValue, MemoryKeyValue>;

/// Records binding calls into a [`ViewStore`], exactly like the browser binding.
#[derive(Default)]
pub(crate) struct RecordingView {
    store: RefCell<ViewStore>,
}

impl RecordingView {
    pub(crate) fn text(&self, binding: Binding) -> String {
        self.store.borrow().text(binding).to_string()
    }

    pub(crate) fn is_visible(&self, binding: Binding) -> bool {
        self.store.borrow().is_visible(binding)
    }

    pub(crate) fn is_enabled(&self, binding: Binding) -> bool {
        self.store.borrow().is_enabled(binding)
    }

    pub(crate) fn is_checked(&self, binding: Binding) -> bool {
        self.store.borrow().is_checked(binding)
    }

    pub(crate) fn tone(&self, binding: Binding) -> Option<Tone> {
        self.store.borrow().tone(binding)
    }
}

impl ViewBinding for RecordingView {
    fn set_text(&self, binding: Binding, text: &str) {
        self.store.borrow_mut().put_text(binding, text);
    }

    fn set_enabled(&self, binding: Binding, enabled: bool) {
        self.store.borrow_mut().put_enabled(binding, enabled);
    }

    fn set_visible(&self, binding: Binding, visible: bool) {
        self.store.borrow_mut().put_visible(binding, visible);
    }

    fn set_checked(&self, binding: Binding, checked: bool) {
        self.store.borrow_mut().put_checked(binding, checked);
    }

    fn set_tone(&self, binding: Binding, tone: Option<Tone>) {
        self.store.borrow_mut().put_tone(binding, tone);
    }
}

#[derive(Default)]
pub(crate) struct RecordingShell {
    pages: RefCell<Vec<Page>>,
    alerts: RefCell<Vec<String>>,
    toasts: RefCell<Vec<Toast>>,
    theme: Cell<Option<Theme>>,
}

impl RecordingShell {
    pub(crate) fn pages(&self) -> Vec<Page> {
        self.pages.borrow().clone()
    }

    pub(crate) fn alerts(&self) -> Vec<String> {
        self.alerts.borrow().clone()
    }

    pub(crate) fn visible_toasts(&self) -> Vec<Toast> {
        self.toasts.borrow().clone()
    }

    pub(crate) fn theme(&self) -> Option<Theme> {
        self.theme.get()
    }
}

impl Shell for RecordingShell {
    fn navigate(&self, page: Page) {
        self.pages.borrow_mut().push(page);
    }

    fn alert(&self, message: &str) {
        self.alerts.borrow_mut().push(message.to_string());
    }

    fn show_toast(&self, toast: &Toast) {
        self.toasts.borrow_mut().push(toast.clone());
    }

    fn dismiss_toast(&self, id: u64) {
        self.toasts.borrow_mut().retain(|toast| toast.id != id);
    }

    fn apply_theme(&self, theme: Theme) {
        self.theme.set(Some(theme));
    }
}

/// Identity service over in-memory accounts and `users/{uid}` documents.
#[derive(Default)]
pub(crate) struct FakeIdentity {
    accounts: RefCell<BTreeMap<String, String>>,
    documents: RefCell<BTreeMap<String, UserProfile>>,
    settings_nodes: RefCell<BTreeMap<String, StoredSettings>>,
    failure: RefCell<Option<String>>,
    calls: RefCell<Vec<String>>,
}

fn uid_for(email: &str) -> String {
    format!("uid-{}", email.split('@').next().unwrap_or(email))
}

fn account_for(email: &str) -> Account {
    Account {
        uid: uid_for(email),
        id_token: fixtures::ID_TOKEN.to_string(),
        email: email.to_string(),
    }
}

impl FakeIdentity {
    pub(crate) fn register(&self, profile: &UserProfile, credential: &str) {
        self.register_account_only(&profile.email, credential);
        self.documents
            .borrow_mut()
            .insert(uid_for(&profile.email), profile.clone());
    }

    pub(crate) fn register_account_only(&self, email: &str, credential: &str) {
        self.accounts
            .borrow_mut()
            .insert(email.to_string(), credential.to_string());
    }

    /// Settings node served verbatim by `read_settings`, bypassing the profile document.
    pub(crate) fn store_settings_node(&self, uid: &str, node: StoredSettings) {
        self.settings_nodes
            .borrow_mut()
            .insert(uid.to_string(), node);
    }

    pub(crate) fn fail_with(&self, message: &str) {
        *self.failure.borrow_mut() = Some(message.to_string());
    }

    pub(crate) fn calls(&self) -> Vec<String> {
        self.calls.borrow().clone()
    }

    pub(crate) fn profile(&self, uid: &str) -> Option<UserProfile> {
        self.documents.borrow().get(uid).cloned()
    }

    fn enter(&self, operation: &str) -> Result<(), RemoteError> {
        self.calls.borrow_mut().push(operation.to_string());
        match self.failure.borrow().as_deref() {
            Some(message) => Err(RemoteError::new(message)),
            None => Ok(()),
        }
    }
}

#[async_trait(?Send)]
impl IdentityService for FakeIdentity {
    async fn create_account(&self, email: &str, credential: &str) -> Result<Account, RemoteError> {
        self.enter("create_account")?;
        if self.accounts.borrow().contains_key(email) {
            return Err(RemoteError::new("EMAIL_EXISTS"));
        }
        self.register_account_only(email, credential);
        Ok(account_for(email))
    }

    async fn sign_in(&self, email: &str, credential: &str) -> Result<Account, RemoteError> {
        self.enter("sign_in")?;
        let known = self.accounts.borrow().get(email).cloned();
        match known {
            Some(stored) if stored == credential => Ok(account_for(email)),
            _ => Err(RemoteError::new("INVALID_LOGIN_CREDENTIALS")),
        }
    }

    async fn read_profile(&self, account: &Account) -> Result<Option<UserProfile>, RemoteError> {
        self.enter("read_profile")?;
        Ok(self.profile(&account.uid))
    }

    async fn write_profile(
        &self,
        account: &Account,
        profile: &UserProfile,
    ) -> Result<(), RemoteError> {
        self.enter("write_profile")?;
        self.documents
            .borrow_mut()
            .insert(account.uid.clone(), profile.clone());
        Ok(())
    }

    async fn read_settings(
        &self,
        account: &Account,
    ) -> Result<Option<StoredSettings>, RemoteError> {
        self.enter("read_settings")?;
        if let Some(node) = self.settings_nodes.borrow().get(&account.uid) {
            return Ok(Some(node.clone()));
        }
        Ok(self
            .profile(&account.uid)
            .map(|profile| profile.settings.into()))
    }

    async fn write_settings(
        &self,
        account: &Account,
        settings: &ProfileSettings,
    ) -> Result<(), RemoteError> {
        self.enter("write_settings")?;
        if let Some(profile) = self.documents.borrow_mut().get_mut(&account.uid) {
            profile.settings = settings.clone();
        }
        Ok(())
    }

    async fn write_setting(
        &self,
        account: &Account,
        patch: SettingPatch,
    ) -> Result<(), RemoteError> {
        self.enter("write_setting")?;
        if let Some(profile) = self.documents.borrow_mut().get_mut(&account.uid) {
            profile.apply_patch(&patch);
        }
        Ok(())
    }

    async fn sign_out(&self, _account: &Account) -> Result<(), RemoteError> {
        self.enter("sign_out")
    }
}

/// Trigger answering from a script; accepts once the script runs out.
#[derive(Default)]
pub(crate) struct FakeTrigger {
    script: RefCell<VecDeque<Result<DispatchOutcome, RemoteError>>>,
    delay: Cell<Option<Duration>>,
    calls: Cell<u32>,
}

impl FakeTrigger {
    pub(crate) fn push(&self, outcome: Result<DispatchOutcome, RemoteError>) {
        self.script.borrow_mut().push_back(outcome);
    }

    pub(crate) fn set_delay(&self, delay: Duration) {
        self.delay.set(Some(delay));
    }

    pub(crate) fn calls(&self) -> u32 {
        self.calls.get()
    }
}

#[async_trait(?Send)]
impl TriggerService for FakeTrigger {
    async fn dispatch(&self) -> Result<DispatchOutcome, RemoteError> {
        self.calls.set(self.calls.get() + 1);
        if let Some(delay) = self.delay.get() {
            tokio::time::sleep(delay).await;
        }
        let next = self.script.borrow_mut().pop_front();
        next.unwrap_or(Ok(DispatchOutcome::Accepted))
    }
}

/// A wired [`FlowContext`] plus handles on every fake.
pub(crate) struct Harness {
    pub(crate) ctx: Rc<FlowContext>,
    pub(crate) view: Rc<RecordingView>,
    pub(crate) shell: Rc<RecordingShell>,
    pub(crate) store: Rc<MemoryStore>,
    pub(crate) trigger: Rc<FakeTrigger>,
    identity: Option<Rc<FakeIdentity>>,
}

impl Harness {
    pub(crate) fn local() -> Self {
        Self::build(None)
    }

    pub(crate) fn remote() -> Self {
        Self::build(Some(Rc::new(FakeIdentity::default())))
    }

    fn build(identity: Option<Rc<FakeIdentity>>) -> Self {
        let view = Rc::new(RecordingView::default());
        let shell = Rc::new(RecordingShell::default());
        let store = Rc::new(MemoryStore::default());
        let trigger = Rc::new(FakeTrigger::default());
        let backend = identity.clone().map_or(Backend::Local, |identity| {
            Backend::Remote(identity as Rc<dyn IdentityService>)
        });
        let ports = Ports {
            store: store.clone(),
            backend,
            trigger: trigger.clone(),
            view: view.clone(),
            shell: shell.clone(),
            sleeper: Rc::new(TokioSleeper),
            spawner: Rc::new(TokioSpawner),
        };
        Self {
            ctx: FlowContext::new(ports, TimingConfig::default()),
            view,
            shell,
            store,
            trigger,
            identity,
        }
    }

    pub(crate) fn identity(&self) -> &FakeIdentity {
        self.identity
            .as_deref()
            .expect("harness was built with the local backend")
    }

    pub(crate) fn seed_profile(&self, profile: &UserProfile) {
        assert!(self.store.save_profile(profile).is_ok());
    }

    pub(crate) fn seed_theme(&self, theme: Theme) {
        assert!(self.store.save_theme(theme).is_ok());
    }

    pub(crate) fn seed_session(&self, account: &Account) {
        assert!(self.store.save_session(account).is_ok());
    }

    pub(crate) fn stored_profile(&self) -> Option<UserProfile> {
        self.store.load_profile().ok().flatten()
    }
}
