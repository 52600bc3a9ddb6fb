//! Setup and sign-in feature wiring.
//!
//! # Design
//! - Two-step form: name and class first, then contact details and the credential.
//! - Validation failures are blocking alerts; nothing is written until the form is valid.
//! - Remote failures are alerted verbatim and never retried.

pub mod flow;
pub mod state;
#[cfg(target_arch = "wasm32")]
pub mod view;
