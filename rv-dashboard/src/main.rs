//! Global recycling metrics dashboard.
//!
//! Four D3.js charts (choropleth map, bar chart, scatter plot, rankings) share
//! one metric/continent selection.
//!
//! Data flow:
//! 1. `dashboard.json` is embedded with `include_str!` and parsed into a
//!    `DashboardConfig`; a broken file falls back to the defaults.
//! 2. On mount: the D3 scripts are initialized, the browser callbacks
//!    (bar click, back, resize) are installed and every chart starts loading
//!    its datasets concurrently.
//! 3. Selector changes go to the core's `SelectionState`, which re-renders
//!    each chart once and mirrors the selection back into `AppState`.

use dioxus::prelude::*;
use rv_chart_ui::components::{
    ChartContainer, ChartHeader, ContinentSelector, ErrorDisplay, LoadingSpinner, MetricSelector,
};
use rv_chart_ui::state::AppState;
use rv_chart_ui::{events, js_bridge, D3Adapter, HttpFetcher, WebDashboard};
use rv_core::{ChartKind, Dashboard, DashboardConfig, DataLoader, ListenerId, RenderOutcome};
use std::rc::Rc;

const CONFIG_JSON: &str = include_str!("../dashboard.json");

const ROOT_ID: &str = "recycling-dashboard-root";

/// Listener id of the selection mirror.
const UI_LISTENER: &str = "ui";

fn main() {
    dioxus_logger::init(dioxus_logger::tracing::Level::INFO).expect("failed to init logger");
    dioxus::LaunchBuilder::new()
        .with_cfg(dioxus::web::Config::new().rootname(ROOT_ID))
        .launch(App);
}

/// Embedded config, or the defaults plus a warning for the error box.
fn load_config() -> (DashboardConfig, Option<String>) {
    match DashboardConfig::from_json_str(CONFIG_JSON) {
        Ok(config) => (config, None),
        Err(e) => {
            log::warn!("[RV] dashboard.json rejected, using defaults: {}", e);
            (
                DashboardConfig::default(),
                Some(format!("Invalid dashboard.json ({e}); using defaults.")),
            )
        }
    }
}

#[component]
fn App() -> Element {
    let (config, config_warning) = use_hook(load_config);
    let mut state = use_context_provider(|| AppState::new(&config));
    let dashboard: Result<Rc<WebDashboard>, String> = use_hook(|| {
        Dashboard::new(config.clone(), |_| D3Adapter)
            .map(Rc::new)
            .map_err(|e| e.to_string())
    });

    // ─── Effect: wire callbacks and load data once on mount ───
    let mounted = dashboard.clone();
    use_effect(move || {
        if let Some(warning) = config_warning.clone() {
            state.error_msg.set(Some(warning));
        }
        let dashboard = match mounted.clone() {
            Ok(dashboard) => dashboard,
            Err(e) => {
                log::error!("[RV] cannot build dashboard: {}", e);
                state.error_msg.set(Some(e));
                state.loading.set(false);
                return;
            }
        };

        js_bridge::init_charts();

        let mut mirror = state;
        dashboard
            .selection()
            .subscribe(ListenerId::new(UI_LISTENER), move |selection| mirror.mirror(selection));

        let clicked = Rc::clone(&dashboard);
        events::on_bar_click(move |continent| {
            clicked.drill_down(&continent);
        });
        let back = Rc::clone(&dashboard);
        events::on_bar_back(move || {
            back.drill_up();
        });
        let resized = Rc::clone(&dashboard);
        events::on_resize(move || {
            resized.resize(js_bridge::container_width);
        });

        spawn(async move {
            let loader = DataLoader::new(HttpFetcher::default());
            let outcomes = dashboard.load_all(&loader).await;
            let drawn = outcomes
                .iter()
                .filter(|o| matches!(o, RenderOutcome::Drawn { .. }))
                .count();
            log::info!("[RV] {} of {} charts drawn", drawn, outcomes.len());
            // First real measurement of the containers.
            dashboard.resize(js_bridge::container_width);
            state.loading.set(false);
        });
    });

    let on_metric = {
        let dashboard = dashboard.clone();
        move |label: String| {
            if let Ok(dashboard) = &dashboard {
                dashboard.set_metric(&label);
            }
        }
    };
    let on_continent = {
        let dashboard = dashboard.clone();
        move |value: String| {
            if let Ok(dashboard) = &dashboard {
                dashboard.set_continent(&value);
            }
        }
    };

    let metric = (state.metric)();
    let continent = (state.continent)();
    let loading = (state.loading)();

    // ─── Render ───
    rsx! {
        div {
            style: "max-width: 1100px; margin: 0 auto; padding: 8px; font-family: system-ui, -apple-system, sans-serif;",

            h1 {
                style: "font-size: 22px; margin: 8px 0 12px 0;",
                "Global Recycling Dashboard"
            }

            if let Some(err) = state.error_msg.read().as_ref() {
                ErrorDisplay { message: err.clone() }
            }

            div {
                style: "display: flex; gap: 24px; flex-wrap: wrap; padding-bottom: 8px; border-bottom: 1px solid #e0e0e0;",
                MetricSelector { on_select: on_metric }
                ContinentSelector { on_select: on_continent }
            }

            if loading {
                LoadingSpinner {}
            }

            for kind in ChartKind::ALL {
                section {
                    key: "{kind.id()}",
                    style: "margin-top: 16px;",
                    ChartHeader {
                        title: kind.title().to_string(),
                        metric: metric.clone(),
                        continent: continent.clone(),
                    }
                    ChartContainer {
                        kind: kind,
                        loading: loading,
                        min_height: kind.frame(&config).height as u32,
                    }
                }
            }
        }
    }
}
