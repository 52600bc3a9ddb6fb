//! Settings panel rendered inside the dashboard.

use web_sys::HtmlInputElement;
use yew::platform::spawn_local;
use yew::prelude::*;
use yewdux::prelude::{Dispatch, use_selector};

use crate::app::Flows;
use crate::core::binding::{Binding, Tone};
use crate::core::store::ViewStore;
use crate::features::settings::state::SettingsForm;

fn read_form(store: &ViewStore) -> SettingsForm {
    SettingsForm {
        email: store.text(Binding::EmailSetting).to_string(),
        notification_time: store.text(Binding::TimeSetting).to_string(),
        email_notifications: store.is_checked(Binding::EmailToggle),
        dark: store.is_checked(Binding::ThemeToggle),
    }
}

fn bind_input(dispatch: &Dispatch<ViewStore>, binding: Binding) -> Callback<InputEvent> {
    let dispatch = dispatch.clone();
    Callback::from(move |event: InputEvent| {
        let input: HtmlInputElement = event.target_unchecked_into();
        let value = input.value();
        dispatch.reduce_mut(move |store| store.put_text(binding, &value));
    })
}

#[function_component(SettingsPanel)]
pub(crate) fn settings_panel() -> Html {
    let flows = use_context::<Flows>();
    let dispatch = Dispatch::<ViewStore>::new();
    let visible = use_selector(|store: &ViewStore| store.is_visible(Binding::SettingsPanel));
    let tone = use_selector(|store: &ViewStore| store.tone(Binding::SettingsPanel));
    let form = use_selector(read_form);

    let Some(flows) = flows else {
        return html! {};
    };
    if !*visible {
        return html! {};
    }

    let on_save = {
        let flow = flows.settings.clone();
        let dispatch = dispatch.clone();
        Callback::from(move |_: MouseEvent| {
            let flow = flow.clone();
            let form = read_form(&dispatch.get());
            spawn_local(async move {
                let _ = flow.save_settings(&form).await;
            });
        })
    };
    let on_email_toggle = {
        let flow = flows.settings.clone();
        let dispatch = dispatch.clone();
        Callback::from(move |event: Event| {
            let input: HtmlInputElement = event.target_unchecked_into();
            let enabled = input.checked();
            dispatch.reduce_mut(move |store| store.put_checked(Binding::EmailToggle, enabled));
            let flow = flow.clone();
            spawn_local(async move {
                let _ = flow.toggle_email_notifications(enabled).await;
            });
        })
    };
    let on_theme_toggle = {
        let flow = flows.settings.clone();
        Callback::from(move |event: Event| {
            let input: HtmlInputElement = event.target_unchecked_into();
            flow.toggle_theme(input.checked());
        })
    };
    let on_close = {
        let flow = flows.settings.clone();
        Callback::from(move |_: MouseEvent| flow.toggle_panel())
    };

    html! {
        <aside class={classes!("settings-panel", (*tone).map(Tone::class))}>
            <header>
                <h2>{"Einstellungen"}</h2>
                <button type="button" class="ghost" aria-label="Schließen" onclick={on_close}>{"✕"}</button>
            </header>
            <label>{"E-Mail"}
                <input type="email" value={form.email.clone()}
                    oninput={bind_input(&dispatch, Binding::EmailSetting)} />
            </label>
            <label>{"Benachrichtigungszeit"}
                <input type="time" value={form.notification_time.clone()}
                    oninput={bind_input(&dispatch, Binding::TimeSetting)} />
            </label>
            <label class="toggle">
                <input type="checkbox" checked={form.email_notifications} onchange={on_email_toggle} />
                {"E-Mail-Benachrichtigungen"}
            </label>
            <label class="toggle">
                <input type="checkbox" checked={form.dark} onchange={on_theme_toggle} />
                {"Dunkles Design"}
            </label>
            <button type="button" onclick={on_save}>{"Speichern"}</button>
        </aside>
    }
}
