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

//! Client configuration for the Vertretung web UI.
//!
//! Layout: `model.rs` (typed sections), `defaults.rs` (default endpoints and
//! timings), `validate.rs` (section checks), `loader.rs` (JSON parsing entry
//! points), `error.rs` (`ConfigError`).

pub mod defaults;
pub mod error;
pub mod loader;
pub mod model;
pub mod validate;

pub use error::{ConfigError, ConfigResult};
pub use model::{
    AppConfig, BackendMode, IdentityConfig, LoggingSettings, TimingConfig, TriggerConfig,
    TriggerMode,
};
