//! Shared presentational components.

pub(crate) mod toast;
