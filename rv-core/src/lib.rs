//! Core of the recycling metrics dashboard.
//!
//! This crate holds everything that does not touch the DOM:
//! - `selection`: the shared metric/continent selection with change listeners
//! - `loader`: concurrent JSON dataset loading behind the `Fetch` trait
//! - `transform`: filtering, ordering, top-N and IQR outlier trimming
//! - `charts`: per-chart pipelines producing serializable `Scene`s
//! - `orchestrator` / `dashboard`: wiring selection changes and resizes to
//!   every registered chart
//!
//! Drawing is delegated to a `RenderAdapter`; the web front-end forwards
//! scenes to D3.js.

pub mod adapter;
pub mod chart;
pub mod charts;
pub mod color;
pub mod config;
pub mod dashboard;
pub mod error;
pub mod frame;
pub mod legend;
pub mod loader;
pub mod metric;
pub mod orchestrator;
pub mod record;
pub mod scene;
pub mod selection;
pub mod transform;

pub use adapter::{DrawCall, RecordingAdapter, RenderAdapter};
pub use chart::{load_chart, Chart, LoadState, RenderOutcome, SkipReason, Visualization};
pub use charts::{ChartKind, Dataset};
pub use config::{DashboardConfig, DataSources};
pub use dashboard::Dashboard;
pub use error::{Result, VizError};
pub use loader::{DataLoader, Fetch, FixtureFetcher};
pub use metric::{MetricDef, MetricRegistry};
pub use orchestrator::Orchestrator;
pub use record::{Feature, Record};
pub use scene::{Scene, ViewMode};
pub use selection::{
    ContinentFilter, ListenerId, Selection, SelectionState, WeakSelectionState, ALL_CONTINENTS,
};
