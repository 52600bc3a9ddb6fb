//! Settings panel feature wiring.
//!
//! # Design
//! - The panel has its own epoch-stamped machine; hides and post-save closes are superseding tasks.
//! - A full save writes the settings node in one call; the e-mail toggle writes one field.
//! - The theme toggle never leaves the browser.

pub mod flow;
pub mod state;
#[cfg(target_arch = "wasm32")]
pub mod view;
