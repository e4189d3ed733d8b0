//! Application state managed via Dioxus context.
//!
//! `AppState` mirrors the core's selection into signals so the selectors and
//! headers re-render. It is provided via `use_context_provider`; child
//! components retrieve it with `use_context::<AppState>()`. The signals are
//! written from the selection listener, never the other way round.

use dioxus::prelude::*;
use rv_core::{ContinentFilter, DashboardConfig, Selection};

#[derive(Clone, Copy)]
pub struct AppState {
    /// Whether any chart is still loading
    pub loading: Signal<bool>,
    /// Dashboard-wide error (bad config); chart errors are shown inline
    pub error_msg: Signal<Option<String>>,
    /// Selected metric label
    pub metric: Signal<String>,
    /// Selected continent selector value, `"all"` or a continent name
    pub continent: Signal<String>,
    /// Metric labels for the metric selector
    pub metrics: Signal<Vec<String>>,
    /// Continent names for the continent selector
    pub continents: Signal<Vec<String>>,
}

impl AppState {
    pub fn new(config: &DashboardConfig) -> Self {
        let metrics: Vec<String> = config.metrics.iter().map(|m| m.label.clone()).collect();
        Self {
            loading: Signal::new(true),
            error_msg: Signal::new(None),
            metric: Signal::new(metrics.first().cloned().unwrap_or_default()),
            continent: Signal::new(ContinentFilter::All.to_string()),
            metrics: Signal::new(metrics),
            continents: Signal::new(config.continents.clone()),
        }
    }

    /// Copy a selection snapshot into the signals.
    pub fn mirror(&mut self, selection: &Selection) {
        if *self.metric.peek() != selection.metric {
            self.metric.set(selection.metric.clone());
        }
        let continent = selection.continent.to_string();
        if *self.continent.peek() != continent {
            self.continent.set(continent);
        }
    }
}
