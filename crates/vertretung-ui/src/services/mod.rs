//! Service wiring: turns [`AppConfig`] into the backend and trigger ports.
//!
//! # Design
//! - One HTTP client is shared by every remote adapter.
//! - Local backend and simulated trigger need no network and never fail to build.

pub mod remote;
pub mod simulated;

use std::rc::Rc;

use tracing::info;
use vertretung_client::{ClientResult, IdentityClient, TriggerClient, build_http_client};
use vertretung_config::{AppConfig, BackendMode, TriggerMode};

use crate::core::ports::{Backend, Sleeper, TriggerService};
use remote::{RemoteIdentity, RemoteTrigger};
use simulated::SimulatedTrigger;

/// Ports selected by configuration.
pub struct Services {
    /// Persistence variant.
    pub backend: Backend,
    /// Substitution-check trigger.
    pub trigger: Rc<dyn TriggerService>,
}

/// Build the backend and trigger for `config`.
///
/// # Errors
///
/// Returns a client error when the HTTP client or an endpoint URL is invalid.
pub fn build_services(config: &AppConfig, sleeper: Rc<dyn Sleeper>) -> ClientResult<Services> {
    let needs_http =
        config.backend == BackendMode::Remote || config.trigger.mode == TriggerMode::Remote;
    let http = if needs_http {
        Some(build_http_client()?)
    } else {
        None
    };

    let backend = match (config.backend, http.clone()) {
        (BackendMode::Remote, Some(http)) => {
            let client = IdentityClient::from_config(http, &config.identity)?;
            Backend::Remote(Rc::new(RemoteIdentity::new(client)))
        }
        _ => Backend::Local,
    };

    let trigger: Rc<dyn TriggerService> = match (config.trigger.mode, http) {
        (TriggerMode::Remote, Some(http)) => {
            Rc::new(RemoteTrigger::new(TriggerClient::from_config(http, &config.trigger)?))
        }
        _ => Rc::new(SimulatedTrigger::new(
            sleeper,
            config.trigger.simulated_delay(),
        )),
    };

    info!(backend = ?config.backend, trigger = ?config.trigger.mode, "services wired");
    Ok(Services { backend, trigger })
}
