//! Port adapters over the `vertretung-client` HTTP clients.

use async_trait::async_trait;
use tracing::debug;
use vertretung_client::{DispatchStatus, IdentityClient, TriggerClient};
use vertretung_models::{Account, ProfileSettings, SettingPatch, StoredSettings, UserProfile};

use crate::core::error::RemoteError;
use crate::core::ports::{DispatchOutcome, IdentityService, TriggerService};

/// [`IdentityService`] backed by the identity REST API and realtime database.
#[derive(Clone, Debug)]
pub struct RemoteIdentity {
    client: IdentityClient,
}

impl RemoteIdentity {
    /// Wrap a configured client.
    #[must_use]
    pub const fn new(client: IdentityClient) -> Self {
        Self { client }
    }
}

#[async_trait(?Send)]
impl IdentityService for RemoteIdentity {
    async fn create_account(&self, email: &str, credential: &str) -> Result<Account, RemoteError> {
        Ok(self.client.sign_up(email, credential).await?)
    }

    async fn sign_in(&self, email: &str, credential: &str) -> Result<Account, RemoteError> {
        Ok(self.client.sign_in(email, credential).await?)
    }

    async fn read_profile(&self, account: &Account) -> Result<Option<UserProfile>, RemoteError> {
        Ok(self.client.get_profile(account).await?)
    }

    async fn write_profile(
        &self,
        account: &Account,
        profile: &UserProfile,
    ) -> Result<(), RemoteError> {
        Ok(self.client.put_profile(account, profile).await?)
    }

    async fn read_settings(
        &self,
        account: &Account,
    ) -> Result<Option<StoredSettings>, RemoteError> {
        Ok(self.client.get_settings(account).await?)
    }

    async fn write_settings(
        &self,
        account: &Account,
        settings: &ProfileSettings,
    ) -> Result<(), RemoteError> {
        Ok(self.client.put_settings(account, settings).await?)
    }

    async fn write_setting(
        &self,
        account: &Account,
        patch: SettingPatch,
    ) -> Result<(), RemoteError> {
        Ok(self.client.put_setting(account, &patch).await?)
    }

    async fn sign_out(&self, account: &Account) -> Result<(), RemoteError> {
        // ID tokens are stateless; dropping the session is all signing out takes.
        debug!(uid = %account.uid, "signed out");
        Ok(())
    }
}

/// [`TriggerService`] backed by the workflow dispatch endpoint.
#[derive(Clone, Debug)]
pub struct RemoteTrigger {
    client: TriggerClient,
}

impl RemoteTrigger {
    /// Wrap a configured client.
    #[must_use]
    pub const fn new(client: TriggerClient) -> Self {
        Self { client }
    }
}

#[async_trait(?Send)]
impl TriggerService for RemoteTrigger {
    async fn dispatch(&self) -> Result<DispatchOutcome, RemoteError> {
        let status = self.client.dispatch().await?;
        Ok(outcome(status))
    }
}

fn outcome(status: DispatchStatus) -> DispatchOutcome {
    match status {
        DispatchStatus::Accepted => DispatchOutcome::Accepted,
        DispatchStatus::Rejected { status, .. } => DispatchOutcome::Rejected { status },
    }
}
