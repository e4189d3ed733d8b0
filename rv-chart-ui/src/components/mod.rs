//! Reusable Dioxus RSX components for the dashboard.

mod chart_container;
mod chart_header;
mod continent_selector;
mod error_display;
mod loading_spinner;
mod metric_selector;

pub use chart_container::ChartContainer;
pub use chart_header::ChartHeader;
pub use continent_selector::ContinentSelector;
pub use error_display::ErrorDisplay;
pub use loading_spinner::LoadingSpinner;
pub use metric_selector::MetricSelector;
