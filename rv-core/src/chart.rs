//! A live visualization: its frame, its loaded dataset and its adapter.

use crate::adapter::RenderAdapter;
use crate::charts::{build_scene, ChartKind, Dataset, RenderContext};
use crate::config::DashboardConfig;
use crate::error::Result;
use crate::frame::ChartFrame;
use crate::loader::{DataLoader, Fetch};
use crate::metric::MetricRegistry;
use crate::scene::ViewMode;
use crate::selection::{Selection, SelectionState};
use crate::transform::TransformError;
use serde_json::Value;
use std::cell::RefCell;
use std::rc::Rc;

/// Load progress of a chart's datasets.
#[derive(Debug, Clone, PartialEq)]
pub enum LoadState {
    Pending,
    Ready(Dataset),
    Failed(String),
}

/// Why a render request drew nothing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    NotLoaded,
    /// Already borrowed by an update in progress
    Busy,
    LoadFailed,
    TornDown,
    MetricUnresolved,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RenderOutcome {
    Drawn { marks: usize },
    Skipped(SkipReason),
}

/// What the update orchestrator drives.
pub trait Visualization {
    fn id(&self) -> &str;

    fn container_id(&self) -> &str;

    /// Redraw for `selection`. Must be a no-op until data has loaded.
    fn render(&mut self, selection: &Selection) -> RenderOutcome;

    /// Take the new container width.
    fn resize(&mut self, width: f64);

    fn is_live(&self) -> bool;
}

pub struct Chart<A> {
    kind: ChartKind,
    frame: ChartFrame,
    config: Rc<DashboardConfig>,
    registry: Rc<MetricRegistry>,
    state: LoadState,
    mode: ViewMode,
    live: bool,
    adapter: A,
}

impl<A: RenderAdapter> Chart<A> {
    pub fn new(
        kind: ChartKind,
        config: Rc<DashboardConfig>,
        registry: Rc<MetricRegistry>,
        adapter: A,
    ) -> Self {
        Self {
            kind,
            frame: kind.frame(&config),
            config,
            registry,
            state: LoadState::Pending,
            mode: ViewMode::default(),
            live: true,
            adapter,
        }
    }

    pub fn kind(&self) -> ChartKind {
        self.kind
    }

    pub fn frame(&self) -> ChartFrame {
        self.frame
    }

    pub fn load_state(&self) -> &LoadState {
        &self.state
    }

    pub fn is_ready(&self) -> bool {
        matches!(self.state, LoadState::Ready(_))
    }

    /// Bar chart drill state as of the last render.
    pub fn mode(&self) -> ViewMode {
        self.mode
    }

    pub fn adapter(&self) -> &A {
        &self.adapter
    }

    pub fn sources(&self) -> Vec<String> {
        self.kind.sources(&self.config.sources)
    }

    /// Store the result of a load. Failures are logged and shown inline; they
    /// never leave this chart.
    pub fn finish_load(&mut self, result: Result<Vec<Value>>) {
        let decoded =
            result.and_then(|payloads| Dataset::decode(self.kind, &payloads, &self.registry));
        match decoded {
            Ok(dataset) => {
                log::info!("[{}] data loaded", self.kind.id());
                self.state = LoadState::Ready(dataset);
            }
            Err(e) => {
                log::error!("[{}] error loading data: {}", self.kind.id(), e);
                let message = format!("Error loading data: {e}");
                self.adapter.show_error(self.kind.container_id(), &message);
                self.state = LoadState::Failed(message);
            }
        }
    }

    /// Detach from the page. Later loads and renders are ignored.
    pub fn tear_down(&mut self) {
        if self.live {
            self.live = false;
            self.adapter.clear(self.kind.container_id());
        }
    }
}

impl<A: RenderAdapter> Visualization for Chart<A> {
    fn id(&self) -> &str {
        self.kind.id()
    }

    fn container_id(&self) -> &str {
        self.kind.container_id()
    }

    fn render(&mut self, selection: &Selection) -> RenderOutcome {
        if !self.live {
            return RenderOutcome::Skipped(SkipReason::TornDown);
        }
        let dataset = match &self.state {
            LoadState::Ready(dataset) => dataset,
            LoadState::Pending => return RenderOutcome::Skipped(SkipReason::NotLoaded),
            LoadState::Failed(_) => return RenderOutcome::Skipped(SkipReason::LoadFailed),
        };

        let ctx = RenderContext {
            chart_id: self.kind.id(),
            selection,
            registry: &self.registry,
            config: &self.config,
            frame: self.frame,
        };
        match build_scene(dataset, &ctx, &mut self.mode) {
            Ok(scene) => {
                let marks = scene.mark_count();
                self.adapter.draw(self.kind.container_id(), &scene);
                log::debug!("[{}] drew {} marks", self.kind.id(), marks);
                RenderOutcome::Drawn { marks }
            }
            Err(TransformError::MetricUnresolved(label)) => {
                log::warn!("[{}] cannot resolve metric {:?}, skipping", self.kind.id(), label);
                RenderOutcome::Skipped(SkipReason::MetricUnresolved)
            }
        }
    }

    fn resize(&mut self, width: f64) {
        if self.kind.responsive() {
            self.frame.resize(width);
        }
    }

    fn is_live(&self) -> bool {
        self.live
    }
}

/// Fetch a chart's datasets, store them and draw the first frame with the
/// current selection. The chart is not borrowed across the fetch.
pub async fn load_chart<A, F>(
    chart: &Rc<RefCell<Chart<A>>>,
    loader: &DataLoader<F>,
    selection: &SelectionState,
) -> RenderOutcome
where
    A: RenderAdapter,
    F: Fetch,
{
    let urls = {
        let chart = chart.borrow();
        if !chart.is_live() {
            return RenderOutcome::Skipped(SkipReason::TornDown);
        }
        chart.sources()
    };

    let result = loader.load(&urls).await;

    let mut chart = chart.borrow_mut();
    if !chart.is_live() {
        log::debug!("[{}] load finished after tear down", chart.id());
        return RenderOutcome::Skipped(SkipReason::TornDown);
    }
    chart.finish_load(result);
    chart.render(&selection.get())
}
