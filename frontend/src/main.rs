use yew::prelude::*;
use yew_router::prelude::*;

mod components;
mod hooks;
mod routes;
mod services;
mod views;

use components::Sidebar;
use hooks::use_app_context::AppContext;
use routes::{switch, Route};
use services::config::AppConfig;
use services::logging;

#[derive(Properties, PartialEq)]
struct AppProps {
    context: AppContext,
}

#[function_component(App)]
fn app(props: &AppProps) -> Html {
    html! {
        <ContextProvider<AppContext> context={props.context.clone()}>
            <BrowserRouter>
                <div class="app">
                    <Sidebar />
                    <main class="main-content">
                        <Switch<Route> render={switch} />
                    </main>
                </div>
            </BrowserRouter>
        </ContextProvider<AppContext>>
    }
}

fn main() {
    let config = AppConfig::from_build_env();
    let level = config.as_ref().map(|c| c.log_level).unwrap_or(log::LevelFilter::Info);
    if let Err(e) = logging::init(level) {
        gloo::console::error!(format!("logger already installed: {}", e));
    }

    let config = config.unwrap_or_else(|e| {
        log::warn!(target: "config", "{:#}; using defaults", e);
        AppConfig::default()
    });
    log::info!(target: "config", "api base url {}", config.api_base_url);
    if let Some(date) = config.operational_date {
        log::info!(target: "config", "operational date pinned to {}", date);
    }

    yew::Renderer::<App>::with_props(AppProps {
        context: AppContext::new(config),
    })
    .render();
}
