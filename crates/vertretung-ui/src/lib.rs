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
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::multiple_crate_versions)]
//! Vertretung web UI.
//!
//! `core/` and `features/*/{state,flow}.rs` are DOM-free and tested natively:
//! flows talk to the page only through the ports in [`core::ports`] and the
//! binding traits in [`core::binding`]. The wasm-only `app/` and `components/`
//! modules wire those ports to browser storage, yewdux and yew-router.

pub mod core;
pub mod features;
pub mod services;

#[cfg(target_arch = "wasm32")]
mod app;
#[cfg(target_arch = "wasm32")]
mod components;

#[cfg(target_arch = "wasm32")]
pub use app::run_app;

#[cfg(test)]
pub(crate) mod testing;
