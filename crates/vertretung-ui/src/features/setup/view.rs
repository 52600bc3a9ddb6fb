//! Entry page: two-step setup form and, for the remote backend, sign-in.

use web_sys::HtmlInputElement;
use yew::platform::spawn_local;
use yew::prelude::*;
use yewdux::prelude::use_selector;

use crate::app::Flows;
use crate::core::binding::Binding;
use crate::core::store::ViewStore;
use crate::features::setup::state::SetupForm;

fn bind(
    form: &UseStateHandle<SetupForm>,
    apply: fn(&mut SetupForm, String),
) -> Callback<InputEvent> {
    let form = form.clone();
    Callback::from(move |event: InputEvent| {
        let input: HtmlInputElement = event.target_unchecked_into();
        let mut next = (*form).clone();
        apply(&mut next, input.value());
        form.set(next);
    })
}

fn bind_text(value: &UseStateHandle<String>) -> Callback<InputEvent> {
    let value = value.clone();
    Callback::from(move |event: InputEvent| {
        let input: HtmlInputElement = event.target_unchecked_into();
        value.set(input.value());
    })
}

#[function_component(SetupPage)]
pub(crate) fn setup_page() -> Html {
    let flows = use_context::<Flows>();
    let form = use_state(SetupForm::default);
    let login_email = use_state(String::new);
    let login_credential = use_state(String::new);
    let busy = use_state(|| false);
    let step_one = use_selector(|store: &ViewStore| store.is_visible(Binding::SetupStepOne));
    let step_two = use_selector(|store: &ViewStore| store.is_visible(Binding::SetupStepTwo));

    {
        let flows = flows.clone();
        use_effect_with_deps(
            move |_| {
                if let Some(flows) = flows {
                    flows.setup.open();
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

    let on_next = {
        let flow = flows.setup.clone();
        let form = form.clone();
        Callback::from(move |_: MouseEvent| {
            let _ = flow.next_step(&form);
        })
    };
    let on_back = {
        let flow = flows.setup.clone();
        Callback::from(move |_: MouseEvent| flow.previous_step())
    };
    let on_finish = {
        let flow = flows.setup.clone();
        let form = form.clone();
        let busy = busy.clone();
        Callback::from(move |_: MouseEvent| {
            let flow = flow.clone();
            let form = (*form).clone();
            let busy = busy.clone();
            busy.set(true);
            spawn_local(async move {
                let _ = flow.finish(&form).await;
                busy.set(false);
            });
        })
    };
    let on_sign_in = {
        let flow = flows.setup.clone();
        let email = login_email.clone();
        let credential = login_credential.clone();
        let busy = busy.clone();
        Callback::from(move |_: MouseEvent| {
            let flow = flow.clone();
            let email = (*email).clone();
            let credential = (*credential).clone();
            let busy = busy.clone();
            busy.set(true);
            spawn_local(async move {
                let _ = flow.sign_in(&email, &credential).await;
                busy.set(false);
            });
        })
    };

    html! {
        <main class="setup">
            <h1>{"Vertretungsplan-Benachrichtigung"}</h1>
            if *step_one {
                <section class="setup-step" data-step="1">
                    <label>{"Name"}
                        <input type="text" value={form.name.clone()}
                            oninput={bind(&form, |f, v| f.name = v)} />
                    </label>
                    <label>{"Klasse"}
                        <input type="text" value={form.class_name.clone()}
                            oninput={bind(&form, |f, v| f.class_name = v)} />
                    </label>
                    <button type="button" onclick={on_next}>{"Weiter"}</button>
                </section>
            }
            if *step_two {
                <section class="setup-step" data-step="2">
                    <label>{"E-Mail"}
                        <input type="email" value={form.email.clone()}
                            oninput={bind(&form, |f, v| f.email = v)} />
                    </label>
                    <label>{"Benachrichtigungszeit"}
                        <input type="time" value={form.notification_time.clone()}
                            oninput={bind(&form, |f, v| f.notification_time = v)} />
                    </label>
                    if remote {
                        <label>{"Passwort"}
                            <input type="password" value={form.credential.clone()}
                                oninput={bind(&form, |f, v| f.credential = v)} />
                        </label>
                    }
                    <button type="button" class="ghost" onclick={on_back}>{"Zurück"}</button>
                    <button type="button" disabled={*busy} onclick={on_finish}>{"Fertig"}</button>
                </section>
            }
            if remote {
                <section class="sign-in">
                    <h2>{"Bereits registriert?"}</h2>
                    <input type="email" placeholder="E-Mail" value={(*login_email).clone()}
                        oninput={bind_text(&login_email)} />
                    <input type="password" placeholder="Passwort" value={(*login_credential).clone()}
                        oninput={bind_text(&login_credential)} />
                    <button type="button" disabled={*busy} onclick={on_sign_in}>{"Anmelden"}</button>
                </section>
            }
        </main>
    }
}
