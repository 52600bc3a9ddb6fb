//! Dashboard page: greeting, check button, logout and the settings panel.

use yew::platform::spawn_local;
use yew::prelude::*;
use yewdux::prelude::use_selector;

use crate::app::Flows;
use crate::core::binding::{Binding, Tone};
use crate::core::store::ViewStore;
use crate::features::settings::view::SettingsPanel;

#[function_component(DashboardPage)]
pub(crate) fn dashboard_page() -> Html {
    let flows = use_context::<Flows>();
    let welcome =
        use_selector(|store: &ViewStore| store.text(Binding::WelcomeMessage).to_string());
    let class_label = use_selector(|store: &ViewStore| store.text(Binding::UserClass).to_string());
    let label = use_selector(|store: &ViewStore| store.text(Binding::CheckButton).to_string());
    let enabled = use_selector(|store: &ViewStore| store.is_enabled(Binding::CheckButton));
    let tone = use_selector(|store: &ViewStore| store.tone(Binding::CheckButton));
    let load_error = use_selector(|store: &ViewStore| {
        store
            .is_visible(Binding::LoadError)
            .then(|| store.text(Binding::LoadError).to_string())
    });

    {
        let flows = flows.clone();
        use_effect_with_deps(
            move |_| {
                if let Some(flows) = flows {
                    spawn_local(async move {
                        if flows.dashboard.open().await.is_ok() {
                            flows.settings.load_user_settings().await;
                        }
                    });
                }
                || ()
            },
            (),
        );
    }

    let Some(flows) = flows else {
        return html! {};
    };
    let remote = flows.ctx.ports.backend.is_remote();

    let on_check = {
        let flow = flows.dashboard.clone();
        Callback::from(move |_: MouseEvent| {
            let flow = flow.clone();
            spawn_local(async move {
                flow.check_substitutions().await;
            });
        })
    };
    let on_settings = {
        let flow = flows.settings.clone();
        Callback::from(move |_: MouseEvent| flow.toggle_panel())
    };
    let on_logout = {
        let flow = flows.dashboard.clone();
        Callback::from(move |_: MouseEvent| {
            let flow = flow.clone();
            spawn_local(async move {
                let _ = flow.logout().await;
            });
        })
    };

    html! {
        <main class="dashboard">
            <header class="dashboard-header">
                <div>
                    <h1>{(*welcome).clone()}</h1>
                    <p class="user-class">{(*class_label).clone()}</p>
                </div>
                <button type="button" class="ghost" onclick={on_settings}>{"Einstellungen"}</button>
                if remote {
                    <button type="button" class="ghost" onclick={on_logout}>{"Abmelden"}</button>
                }
            </header>
            if let Some(message) = (*load_error).clone() {
                <div class="load-error" role="alert">{message}</div>
            }
            <button
                type="button"
                class={classes!("check-button", (*tone).map(Tone::class))}
                disabled={!*enabled}
                onclick={on_check}
            >
                {(*label).clone()}
            </button>
            <SettingsPanel />
        </main>
    }
}
