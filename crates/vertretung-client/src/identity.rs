//! Identity Toolkit and realtime database REST client.
//!
//! # Design
//! - One client per app boot; it only holds the endpoints and the API key.
//! - Database calls authenticate with the account's id token (`?auth=`).
//! - `null` documents decode to `None` rather than an error.

use reqwest::{Client, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};
use url::Url;
use vertretung_config::IdentityConfig;
use vertretung_models::{Account, ProfileSettings, SettingPatch, StoredSettings, UserProfile};

use crate::error::{ClientError, ClientResult, classify_failure};

/// Client for account management and per-user documents.
#[derive(Clone, Debug)]
pub struct IdentityClient {
    http: Client,
    identity_base: String,
    api_key: String,
    database_base: Url,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct Credentials<'a> {
    email: &'a str,
    password: &'a str,
    return_secure_token: bool,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct AuthReply {
    local_id: String,
    id_token: String,
    email: String,
}

impl From<AuthReply> for Account {
    fn from(reply: AuthReply) -> Self {
        Self {
            uid: reply.local_id,
            id_token: reply.id_token,
            email: reply.email,
        }
    }
}

impl IdentityClient {
    /// Build a client from configuration.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::InvalidEndpoint`] when the database URL cannot be parsed.
    pub fn from_config(http: Client, config: &IdentityConfig) -> ClientResult<Self> {
        let database_url = config.database_url();
        let database_base =
            Url::parse(&database_url).map_err(|err| ClientError::InvalidEndpoint {
                value: database_url.clone(),
                reason: err.to_string(),
            })?;
        Ok(Self {
            http,
            identity_base: config.identity_base_url.trim_end_matches('/').to_string(),
            api_key: config.api_key.clone(),
            database_base,
        })
    }

    /// Create an account with e-mail and password.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Service`] with the service message (e.g. `EMAIL_EXISTS`).
    #[instrument(skip(self, password), fields(email = %email))]
    pub async fn sign_up(&self, email: &str, password: &str) -> ClientResult<Account> {
        self.authenticate("sign_up", "signUp", email, password).await
    }

    /// Sign in with e-mail and password.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Service`] with the service message (e.g. `INVALID_PASSWORD`).
    #[instrument(skip(self, password), fields(email = %email))]
    pub async fn sign_in(&self, email: &str, password: &str) -> ClientResult<Account> {
        self.authenticate("sign_in", "signInWithPassword", email, password)
            .await
    }

    /// Read `users/{uid}`.
    ///
    /// # Errors
    ///
    /// Returns transport, service or decode failures.
    pub async fn get_profile(&self, account: &Account) -> ClientResult<Option<UserProfile>> {
        let url = self.document_url(account, &[])?;
        self.get_json("get_profile", url).await
    }

    /// Replace `users/{uid}`.
    ///
    /// # Errors
    ///
    /// Returns transport or service failures.
    pub async fn put_profile(&self, account: &Account, profile: &UserProfile) -> ClientResult<()> {
        let url = self.document_url(account, &[])?;
        self.put_json("put_profile", url, profile).await
    }

    /// Read `users/{uid}/settings`.
    ///
    /// # Errors
    ///
    /// Returns transport, service or decode failures.
    pub async fn get_settings(&self, account: &Account) -> ClientResult<Option<StoredSettings>> {
        let url = self.document_url(account, &["settings"])?;
        self.get_json("get_settings", url).await
    }

    /// Replace the whole settings node in one write.
    ///
    /// # Errors
    ///
    /// Returns transport or service failures.
    pub async fn put_settings(
        &self,
        account: &Account,
        settings: &ProfileSettings,
    ) -> ClientResult<()> {
        let url = self.document_url(account, &["settings"])?;
        self.put_json("put_settings", url, settings).await
    }

    /// Write a single settings field.
    ///
    /// # Errors
    ///
    /// Returns transport or service failures.
    pub async fn put_setting(&self, account: &Account, patch: &SettingPatch) -> ClientResult<()> {
        let url = self.document_url(account, &["settings", patch.field()])?;
        self.put_json("put_setting", url, &patch.value()).await
    }

    async fn authenticate(
        &self,
        operation: &'static str,
        action: &str,
        email: &str,
        password: &str,
    ) -> ClientResult<Account> {
        let raw = format!("{}/v1/accounts:{action}", self.identity_base);
        let mut url = Url::parse(&raw).map_err(|err| ClientError::InvalidEndpoint {
            value: raw.clone(),
            reason: err.to_string(),
        })?;
        url.query_pairs_mut().append_pair("key", &self.api_key);

        let request = self.http.post(url).json(&Credentials {
            email,
            password,
            return_secure_token: true,
        });
        let response = send(operation, request).await?;
        let reply: AuthReply = decode(operation, response).await?;
        debug!(uid = %reply.local_id, operation, "account authenticated");
        Ok(reply.into())
    }

    /// `{db}/users/{uid}[/{segments}].json?auth={token}`
    fn document_url(&self, account: &Account, segments: &[&str]) -> ClientResult<Url> {
        let mut url = self.database_base.clone();
        let mut path: Vec<String> = vec!["users".to_string(), account.uid.clone()];
        path.extend(segments.iter().map(|segment| (*segment).to_string()));
        if let Some(last) = path.last_mut() {
            last.push_str(".json");
        }
        url.path_segments_mut()
            .map_err(|()| ClientError::InvalidEndpoint {
                value: self.database_base.to_string(),
                reason: "database URL cannot carry a path".to_string(),
            })?
            .pop_if_empty()
            .extend(path.iter());
        url.query_pairs_mut().append_pair("auth", &account.id_token);
        Ok(url)
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        operation: &'static str,
        url: Url,
    ) -> ClientResult<Option<T>> {
        let response = send(operation, self.http.get(url)).await?;
        decode(operation, response).await
    }

    async fn put_json<T: Serialize + ?Sized>(
        &self,
        operation: &'static str,
        url: Url,
        body: &T,
    ) -> ClientResult<()> {
        send(operation, self.http.put(url).json(body)).await?;
        debug!(operation, "document written");
        Ok(())
    }
}

async fn send(operation: &'static str, request: RequestBuilder) -> ClientResult<Response> {
    let response = request
        .send()
        .await
        .map_err(|source| ClientError::Transport { operation, source })?;
    if response.status().is_success() {
        Ok(response)
    } else {
        Err(classify_failure(operation, response).await)
    }
}

async fn decode<T: DeserializeOwned>(operation: &'static str, response: Response) -> ClientResult<T> {
    response
        .json::<T>()
        .await
        .map_err(|source| ClientError::Decode { operation, source })
}

#[cfg(test)]
mod tests {
    use super::*;
    use httpmock::prelude::*;
    use serde_json::json;
    use vertretung_test_support::fixtures;

    fn client_for(server: &MockServer) -> ClientResult<IdentityClient> {
        let config = IdentityConfig {
            api_key: "web-key".into(),
            identity_base_url: server.base_url(),
            database_url: Some(server.base_url()),
            ..IdentityConfig::default()
        };
        IdentityClient::from_config(Client::new(), &config)
    }

    #[tokio::test]
    async fn sign_up_posts_credentials_with_api_key() -> Result<(), ClientError> {
        let server = MockServer::start_async().await;
        let mock = server.mock(|when, then| {
            when.method(POST)
                .path("/v1/accounts:signUp")
                .query_param("key", "web-key")
                .json_body(json!({
                    "email": "anna@example.com",
                    "password": "pw-123456",
                    "returnSecureToken": true
                }));
            then.status(200)
                .header("content-type", "application/json")
                .json_body(fixtures::auth_reply("uid-anna", "anna@example.com"));
        });

        let account = client_for(&server)?
            .sign_up("anna@example.com", "pw-123456")
            .await?;

        mock.assert();
        assert_eq!(account.uid, "uid-anna");
        assert_eq!(account.email, "anna@example.com");
        assert_eq!(account.id_token, fixtures::ID_TOKEN);
        Ok(())
    }

    #[tokio::test]
    async fn sign_in_surfaces_service_message() -> Result<(), ClientError> {
        let server = MockServer::start_async().await;
        server.mock(|when, then| {
            when.method(POST).path("/v1/accounts:signInWithPassword");
            then.status(400)
                .header("content-type", "application/json")
                .json_body(fixtures::identity_error("INVALID_LOGIN_CREDENTIALS"));
        });

        let err = client_for(&server)?
            .sign_in("anna@example.com", "wrong")
            .await
            .err();
        assert!(matches!(
            err,
            Some(ClientError::Service { status: 400, ref message, .. })
                if message == "INVALID_LOGIN_CREDENTIALS"
        ));
        Ok(())
    }

    #[tokio::test]
    async fn get_profile_reads_user_document() -> Result<(), ClientError> {
        let server = MockServer::start_async().await;
        let account = fixtures::anna_account();
        let mock = server.mock(|when, then| {
            when.method(GET)
                .path("/users/uid-anna.json")
                .query_param("auth", fixtures::ID_TOKEN);
            then.status(200)
                .header("content-type", "application/json")
                .json_body(fixtures::anna_profile_json());
        });

        let profile = client_for(&server)?.get_profile(&account).await?;

        mock.assert();
        assert_eq!(profile, Some(fixtures::anna_profile()));
        Ok(())
    }

    #[tokio::test]
    async fn missing_document_reads_as_none() -> Result<(), ClientError> {
        let server = MockServer::start_async().await;
        server.mock(|when, then| {
            when.method(GET).path("/users/uid-anna/settings.json");
            then.status(200)
                .header("content-type", "application/json")
                .body("null");
        });

        let settings = client_for(&server)?
            .get_settings(&fixtures::anna_account())
            .await?;
        assert_eq!(settings, None);
        Ok(())
    }

    #[tokio::test]
    async fn put_settings_writes_full_node() -> Result<(), ClientError> {
        let server = MockServer::start_async().await;
        let mock = server.mock(|when, then| {
            when.method(PUT)
                .path("/users/uid-anna/settings.json")
                .query_param("auth", fixtures::ID_TOKEN)
                .json_body(json!({
                    "emailNotifications": true,
                    "email": "anna@school.example",
                    "notificationTime": "18:30",
                    "theme": "dark"
                }));
            then.status(200).json_body(json!({}));
        });

        let settings = ProfileSettings::full(
            "anna@school.example",
            "18:30",
            true,
            vertretung_models::Theme::Dark,
        );
        client_for(&server)?
            .put_settings(&fixtures::anna_account(), &settings)
            .await?;
        mock.assert();
        Ok(())
    }

    #[tokio::test]
    async fn put_setting_targets_single_field() -> Result<(), ClientError> {
        let server = MockServer::start_async().await;
        let mock = server.mock(|when, then| {
            when.method(PUT)
                .path("/users/uid-anna/settings/emailNotifications.json")
                .body("false");
            then.status(200).body("false");
        });

        client_for(&server)?
            .put_setting(
                &fixtures::anna_account(),
                &SettingPatch::EmailNotifications(false),
            )
            .await?;
        mock.assert();
        Ok(())
    }

    #[tokio::test]
    async fn database_denial_keeps_message() -> Result<(), ClientError> {
        let server = MockServer::start_async().await;
        server.mock(|when, then| {
            when.method(PUT).path("/users/uid-anna.json");
            then.status(401)
                .header("content-type", "application/json")
                .json_body(fixtures::database_error("Permission denied"));
        });

        let err = client_for(&server)?
            .put_profile(&fixtures::anna_account(), &fixtures::anna_profile())
            .await
            .err();
        assert_eq!(
            err.map(|err| err.user_message()).as_deref(),
            Some("Permission denied")
        );
        Ok(())
    }
}
