//! Routing definitions for the Vertretung UI.
use yew_router::prelude::*;

use crate::core::binding::Page;

#[derive(Clone, Routable, PartialEq, Eq, Debug)]
pub(crate) enum Route {
    #[at("/")]
    Entry,
    #[at("/dashboard")]
    Dashboard,
    #[not_found]
    #[at("/404")]
    NotFound,
}

impl From<Page> for Route {
    fn from(page: Page) -> Self {
        match page {
            Page::Entry => Self::Entry,
            Page::Dashboard => Self::Dashboard,
        }
    }
}
