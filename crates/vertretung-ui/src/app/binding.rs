//! Browser implementations of the view and shell ports.

use gloo::utils::window;
use vertretung_models::Theme;
use yew_router::prelude::Navigator;
use yewdux::prelude::Dispatch;

use crate::app::routes::Route;
use crate::core::binding::{Binding, Page, Shell, Toast, Tone, ViewBinding};
use crate::core::store::ViewStore;

/// Writes binding updates into the [`ViewStore`].
pub(crate) struct StoreBinding {
    dispatch: Dispatch<ViewStore>,
}

impl StoreBinding {
    pub(crate) const fn new(dispatch: Dispatch<ViewStore>) -> Self {
        Self { dispatch }
    }
}

impl ViewBinding for StoreBinding {
    fn set_text(&self, binding: Binding, text: &str) {
        let text = text.to_string();
        self.dispatch
            .reduce_mut(move |store| store.put_text(binding, &text));
    }

    fn set_enabled(&self, binding: Binding, enabled: bool) {
        self.dispatch
            .reduce_mut(move |store| store.put_enabled(binding, enabled));
    }

    fn set_visible(&self, binding: Binding, visible: bool) {
        self.dispatch
            .reduce_mut(move |store| store.put_visible(binding, visible));
    }

    fn set_checked(&self, binding: Binding, checked: bool) {
        self.dispatch
            .reduce_mut(move |store| store.put_checked(binding, checked));
    }

    fn set_tone(&self, binding: Binding, tone: Option<Tone>) {
        self.dispatch
            .reduce_mut(move |store| store.put_tone(binding, tone));
    }
}

/// Router, dialogs, toasts and the document theme.
pub(crate) struct BrowserShell {
    navigator: Option<Navigator>,
    dispatch: Dispatch<ViewStore>,
}

impl BrowserShell {
    pub(crate) const fn new(navigator: Option<Navigator>, dispatch: Dispatch<ViewStore>) -> Self {
        Self {
            navigator,
            dispatch,
        }
    }
}

impl Shell for BrowserShell {
    fn navigate(&self, page: Page) {
        if let Some(navigator) = self.navigator.as_ref() {
            navigator.replace(&Route::from(page));
        }
    }

    fn alert(&self, message: &str) {
        gloo::dialogs::alert(message);
    }

    fn show_toast(&self, toast: &Toast) {
        let toast = toast.clone();
        self.dispatch.reduce_mut(move |store| store.push_toast(toast));
    }

    fn dismiss_toast(&self, id: u64) {
        self.dispatch.reduce_mut(move |store| store.remove_toast(id));
    }

    fn apply_theme(&self, theme: Theme) {
        if let Some(body) = window().document().and_then(|document| document.body()) {
            let _ = body.set_attribute("data-theme", theme.as_str());
        }
        self.dispatch.reduce_mut(move |store| store.theme = theme);
    }
}
