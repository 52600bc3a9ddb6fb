//! Core, DOM-free primitives shared by the feature flows.
pub mod binding;
pub mod context;
pub mod error;
pub mod persist;
pub mod ports;
pub mod store;
pub mod tasks;
pub mod text;
pub mod toast;
pub mod validation;
