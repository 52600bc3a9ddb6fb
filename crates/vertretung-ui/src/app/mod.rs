//! App shell: boot, routing and browser port wiring.

use std::rc::Rc;

use tracing::{error, info};
use vertretung_config::AppConfig;
use vertretung_telemetry::{LogFormat, LoggingConfig, build_sha, init_logging};
use yew::prelude::*;
use yew_router::prelude::*;
use yewdux::prelude::{Dispatch, use_selector};

use crate::components::toast::ToastHost;
use crate::core::context::{FlowContext, Ports};
use crate::core::ports::{Backend, Sleeper};
use crate::core::store::ViewStore;
use crate::features::dashboard::flow::DashboardFlow;
use crate::features::dashboard::view::DashboardPage;
use crate::features::settings::flow::SettingsFlow;
use crate::features::setup::flow::SetupFlow;
use crate::features::setup::view::SetupPage;
use crate::services::simulated::SimulatedTrigger;
use crate::services::{Services, build_services};
use binding::{BrowserShell, StoreBinding};
use preferences::{browser_store, load_config};
pub(crate) use routes::Route;
use runtime::{GlooSleeper, LocalSpawner};

mod binding;
mod preferences;
mod routes;
mod runtime;

/// Flow controllers shared with every page through context.
#[derive(Clone)]
pub(crate) struct Flows {
    pub(crate) ctx: Rc<FlowContext>,
    pub(crate) setup: Rc<SetupFlow>,
    pub(crate) dashboard: Rc<DashboardFlow>,
    pub(crate) settings: Rc<SettingsFlow>,
}

impl PartialEq for Flows {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.ctx, &other.ctx)
    }
}

#[derive(Properties, PartialEq)]
struct AppProps {
    config: AppConfig,
}

#[function_component(VertretungApp)]
fn vertretung_app(props: &AppProps) -> Html {
    html! {
        <BrowserRouter>
            <AppShell config={props.config.clone()} />
        </BrowserRouter>
    }
}

#[function_component(AppShell)]
fn app_shell(props: &AppProps) -> Html {
    let navigator = use_navigator();
    let flows = {
        let config = props.config.clone();
        use_memo(move |_| wire(&config, navigator), ())
    };
    let toasts = use_selector(|store: &ViewStore| store.toasts.clone());
    let on_dismiss = {
        let ctx = Rc::clone(&flows.ctx);
        Callback::from(move |id: u64| ctx.ports.shell.dismiss_toast(id))
    };

    html! {
        <ContextProvider<Flows> context={(*flows).clone()}>
            <Switch<Route> render={switch} />
            <ToastHost toasts={(*toasts).clone()} on_dismiss={on_dismiss} />
        </ContextProvider<Flows>>
    }
}

fn switch(route: Route) -> Html {
    match route {
        Route::Entry => html! { <SetupPage /> },
        Route::Dashboard => html! { <DashboardPage /> },
        Route::NotFound => html! { <Redirect<Route> to={Route::Entry} /> },
    }
}

fn wire(config: &AppConfig, navigator: Option<Navigator>) -> Flows {
    let sleeper: Rc<dyn Sleeper> = Rc::new(GlooSleeper);
    let Services { backend, trigger } = build_services(config, Rc::clone(&sleeper))
        .unwrap_or_else(|err| {
            error!(error = %err, "service wiring failed; running offline");
            Services {
                backend: Backend::Local,
                trigger: Rc::new(SimulatedTrigger::new(
                    Rc::clone(&sleeper),
                    config.trigger.simulated_delay(),
                )),
            }
        });

    let dispatch = Dispatch::<ViewStore>::new();
    let ports = Ports {
        store: Rc::new(browser_store()),
        backend,
        trigger,
        view: Rc::new(StoreBinding::new(dispatch.clone())),
        shell: Rc::new(BrowserShell::new(navigator, dispatch)),
        sleeper,
        spawner: Rc::new(LocalSpawner),
    };
    let ctx = FlowContext::new(ports, config.timings);
    Flows {
        setup: Rc::new(SetupFlow::new(Rc::clone(&ctx))),
        dashboard: Rc::new(DashboardFlow::new(Rc::clone(&ctx))),
        settings: Rc::new(SettingsFlow::new(Rc::clone(&ctx))),
        ctx,
    }
}

fn init_telemetry(config: &AppConfig) {
    let logging = LoggingConfig {
        level: &config.logging.level,
        format: LogFormat::from_name(&config.logging.format),
        build_sha: build_sha(),
    };
    if let Err(err) = init_logging(&logging) {
        gloo::console::error!(format!("logging unavailable: {err}"));
    }
}

/// Entry point for the wasm32 bundle.
pub fn run_app() {
    console_error_panic_hook::set_once();
    yew::platform::spawn_local(async {
        let config = load_config().await;
        init_telemetry(&config);
        info!(backend = ?config.backend, "starting vertretung ui");
        let props = AppProps { config };
        if let Some(root) = gloo::utils::document().get_element_by_id("root") {
            yew::Renderer::<VertretungApp>::with_root_and_props(root, props).render();
        } else {
            yew::Renderer::<VertretungApp>::with_props(props).render();
        }
    });
}
