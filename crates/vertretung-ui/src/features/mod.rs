//! Feature slices: setup, dashboard and settings.
pub mod dashboard;
pub mod settings;
pub mod setup;
