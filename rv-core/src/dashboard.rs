//! The dashboard: one selection, one orchestrator and the four charts,
//! registered in the order map, bar, scatter, rankings.

use crate::adapter::RenderAdapter;
use crate::chart::{load_chart, Chart, RenderOutcome};
use crate::charts::ChartKind;
use crate::config::DashboardConfig;
use crate::error::{Result, VizError};
use crate::loader::{DataLoader, Fetch};
use crate::metric::MetricRegistry;
use crate::orchestrator::Orchestrator;
use crate::scene::ViewMode;
use crate::selection::{ContinentFilter, Selection, SelectionState};
use futures::future::join_all;
use std::cell::RefCell;
use std::rc::Rc;

pub struct Dashboard<A> {
    config: Rc<DashboardConfig>,
    registry: Rc<MetricRegistry>,
    selection: SelectionState,
    orchestrator: Orchestrator,
    charts: Vec<Rc<RefCell<Chart<A>>>>,
}

impl<A: RenderAdapter + 'static> Dashboard<A> {
    /// Validate `config`, create every chart with the adapter `adapter_for`
    /// gives it and subscribe the charts to the selection.
    pub fn new(
        config: DashboardConfig,
        mut adapter_for: impl FnMut(ChartKind) -> A,
    ) -> Result<Self> {
        config.validate()?;
        let registry = Rc::new(config.registry());
        let initial = registry
            .default_label()
            .ok_or_else(|| VizError::Config("no metrics configured".to_string()))?;
        let selection = SelectionState::new(Selection::new(initial));
        let orchestrator = Orchestrator::new(selection.clone());
        let config = Rc::new(config);

        let charts: Vec<Rc<RefCell<Chart<A>>>> = ChartKind::ALL
            .iter()
            .map(|&kind| {
                Rc::new(RefCell::new(Chart::new(
                    kind,
                    Rc::clone(&config),
                    Rc::clone(&registry),
                    adapter_for(kind),
                )))
            })
            .collect();
        for chart in &charts {
            orchestrator.register(chart.clone());
        }
        log::info!("dashboard: {} charts registered", charts.len());

        Ok(Self {
            config,
            registry,
            selection,
            orchestrator,
            charts,
        })
    }

    pub fn config(&self) -> &DashboardConfig {
        &self.config
    }

    pub fn registry(&self) -> &MetricRegistry {
        &self.registry
    }

    pub fn selection(&self) -> &SelectionState {
        &self.selection
    }

    pub fn orchestrator(&self) -> &Orchestrator {
        &self.orchestrator
    }

    pub fn charts(&self) -> &[Rc<RefCell<Chart<A>>>] {
        &self.charts
    }

    pub fn chart(&self, kind: ChartKind) -> Option<&Rc<RefCell<Chart<A>>>> {
        self.charts.iter().find(|c| c.borrow().kind() == kind)
    }

    pub fn set_metric(&self, label: &str) {
        self.selection.set_metric(label);
    }

    pub fn set_continent(&self, value: &str) {
        self.selection.set_continent(ContinentFilter::parse(value));
    }

    /// The bar chart's mode follows the continent filter, whether or not it
    /// has rendered yet.
    pub fn bar_mode(&self) -> ViewMode {
        ViewMode::for_filter(&self.selection.get().continent)
    }

    /// Click on an aggregate bar. Returns whether the filter changed.
    pub fn drill_down(&self, continent: &str) -> bool {
        match self.bar_mode().drill_down(continent) {
            Some(filter) => {
                self.selection.set_continent(filter);
                true
            }
            None => false,
        }
    }

    /// The bar chart's back button. Returns whether the filter changed.
    pub fn drill_up(&self) -> bool {
        match self.bar_mode().drill_up() {
            Some(filter) => {
                self.selection.set_continent(filter);
                true
            }
            None => false,
        }
    }

    /// Load every chart concurrently. Each chart renders as soon as its own
    /// data arrives; a failure stays with the chart that hit it.
    pub async fn load_all<F: Fetch>(&self, loader: &DataLoader<F>) -> Vec<RenderOutcome> {
        join_all(
            self.charts
                .iter()
                .map(|chart| load_chart(chart, loader, &self.selection)),
        )
        .await
    }

    pub fn resize(&self, width_of: impl Fn(&str) -> Option<f64>) -> Vec<RenderOutcome> {
        self.orchestrator.resize(width_of)
    }

    /// Detach every chart from the page and the selection.
    pub fn tear_down(&self) {
        for chart in &self.charts {
            let mut chart = chart.borrow_mut();
            chart.tear_down();
            self.orchestrator.unregister(chart.kind().id());
        }
    }
}
