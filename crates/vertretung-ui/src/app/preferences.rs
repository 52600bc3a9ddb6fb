//! Browser storage and runtime configuration for the app shell.

use gloo::storage::{LocalStorage, SessionStorage, Storage};
use gloo_net::http::Request;
use tracing::{debug, warn};
use vertretung_config::AppConfig;

use crate::core::persist::{KeyValue, PersistedStore};

/// Served next to `index.html`; absent means defaults.
pub(crate) const CONFIG_PATH: &str = "/config.json";

/// `localStorage`: profile and theme.
pub(crate) struct BrowserLocal;

/// `sessionStorage`: the signed-in account.
pub(crate) struct BrowserSession;

impl KeyValue for BrowserLocal {
    fn get(&self, key: &str) -> Option<String> {
        LocalStorage::raw().get_item(key).ok().flatten()
    }

    fn set(&self, key: &str, value: &str) -> Result<(), String> {
        LocalStorage::raw()
            .set_item(key, value)
            .map_err(|err| format!("{err:?}"))
    }

    fn delete(&self, key: &str) {
        let _ = LocalStorage::raw().remove_item(key);
    }
}

impl KeyValue for BrowserSession {
    fn get(&self, key: &str) -> Option<String> {
        SessionStorage::raw().get_item(key).ok().flatten()
    }

    fn set(&self, key: &str, value: &str) -> Result<(), String> {
        SessionStorage::raw()
            .set_item(key, value)
            .map_err(|err| format!("{err:?}"))
    }

    fn delete(&self, key: &str) {
        let _ = SessionStorage::raw().remove_item(key);
    }
}

pub(crate) type BrowserStore = PersistedStore<BrowserLocal, BrowserSession>;

pub(crate) const fn browser_store() -> BrowserStore {
    PersistedStore::new(BrowserLocal, BrowserSession)
}

async fn fetch_config_document() -> anyhow::Result<Option<String>> {
    let response = Request::get(CONFIG_PATH).send().await?;
    if !response.ok() {
        debug!(status = response.status(), "no runtime configuration");
        return Ok(None);
    }
    Ok(Some(response.text().await?))
}

pub(crate) async fn load_config() -> AppConfig {
    let document = fetch_config_document().await.unwrap_or_else(|err| {
        warn!(error = %err, "runtime configuration unavailable");
        None
    });
    AppConfig::from_json_or_default(document.as_deref())
}
