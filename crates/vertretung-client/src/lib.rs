#![forbid(unsafe_code)]
#![warn(
    unreachable_pub,
    clippy::all,
    clippy::pedantic,
    clippy::nursery,
    rustdoc::broken_intra_doc_links,
    rustdoc::bare_urls,
    missing_docs
)]
//! HTTP clients for the hosted services behind the Vertretung UI.
//!
//! Layout: `identity.rs` (account and realtime database REST calls),
//! `trigger.rs` (workflow dispatch), `error.rs` (`ClientError` and response
//! classification). Both clients compile for native targets, where they are
//! tested against `httpmock`, and for wasm32, where reqwest uses `fetch`.

pub mod error;
pub mod identity;
pub mod trigger;

use std::time::Duration;

pub use error::{ClientError, ClientResult};
pub use identity::IdentityClient;
pub use trigger::{DispatchStatus, TriggerClient};

/// Request timeout for native builds; the browser applies its own limits.
pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(15);

/// Build the shared HTTP client.
///
/// # Errors
///
/// Returns [`ClientError::Builder`] if the underlying client cannot be built.
pub fn build_http_client() -> ClientResult<reqwest::Client> {
    let builder = reqwest::Client::builder();
    #[cfg(not(target_arch = "wasm32"))]
    let builder = builder
        .timeout(REQUEST_TIMEOUT)
        .user_agent(concat!("vertretung/", env!("CARGO_PKG_VERSION")));
    builder
        .build()
        .map_err(|source| ClientError::Builder { source })
}
