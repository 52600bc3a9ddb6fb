//! Dashboard feature wiring.
//!
//! # Design
//! - The auth gate runs before any profile read; a missing profile or session redirects.
//! - The check button is an explicit state machine; its reset is a superseding task.
//! - Logout only exists for the remote backend.

pub mod flow;
pub mod state;
#[cfg(target_arch = "wasm32")]
pub mod view;
