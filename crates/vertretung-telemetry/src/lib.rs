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
//! Logging setup shared by the Vertretung crates.
//!
//! Native builds (tests, tooling) log to stderr through the `tracing-subscriber`
//! fmt layer; the wasm32 build routes the same layer into the browser console.

#[cfg(target_arch = "wasm32")]
mod console;
pub mod error;
pub mod init;

pub use error::{Result, TelemetryError};
pub use init::{DEFAULT_LOG_LEVEL, LogFormat, LoggingConfig, build_sha, init_logging};
