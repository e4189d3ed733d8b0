//! Per-chart pipelines turning a loaded dataset and the current selection
//! into a [`Scene`].
//!
//! The four charts share the transform helpers in [`crate::transform`] and the
//! legend in [`crate::legend`]; only the choice of dataset, ordering and scale
//! domains differs between them.

pub mod bar;
pub mod map;
pub mod rankings;
pub mod scatter;

use crate::color::ColorScale;
use crate::config::{DashboardConfig, DataSources};
use crate::error::{Result, VizError};
use crate::frame::{ChartFrame, Margin};
use crate::legend::LegendSpec;
use crate::metric::MetricRegistry;
use crate::record::{features_from_json, records_from_json, Feature, Record};
use crate::scene::{Scene, ViewMode};
use crate::selection::Selection;
use crate::transform::{resolve_field, TransformError};
use serde::Serialize;
use serde_json::Value;

/// The visualizations on the dashboard, in registration order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ChartKind {
    Map,
    Bar,
    Scatter,
    Rankings,
}

impl ChartKind {
    pub const ALL: [ChartKind; 4] = [
        ChartKind::Map,
        ChartKind::Bar,
        ChartKind::Scatter,
        ChartKind::Rankings,
    ];

    pub fn id(self) -> &'static str {
        match self {
            ChartKind::Map => "map",
            ChartKind::Bar => "bar",
            ChartKind::Scatter => "scatter",
            ChartKind::Rankings => "rankings",
        }
    }

    /// DOM id of the element the chart draws into.
    pub fn container_id(self) -> &'static str {
        match self {
            ChartKind::Map => "map-viz",
            ChartKind::Bar => "bar-chart",
            ChartKind::Scatter => "scatter-plot",
            ChartKind::Rankings => "rankings-chart",
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            ChartKind::Map => "Recycling Around the World",
            ChartKind::Bar => "Recycling by Continent",
            ChartKind::Scatter => "Wealth, Density and Recycling",
            ChartKind::Rankings => "Country Rankings",
        }
    }

    /// Datasets to fetch, in the order [`Dataset::decode`] expects them.
    pub fn sources(self, sources: &DataSources) -> Vec<String> {
        match self {
            ChartKind::Map | ChartKind::Rankings => vec![sources.map.clone()],
            ChartKind::Bar => vec![sources.countries.clone(), sources.continents.clone()],
            ChartKind::Scatter => vec![sources.correlation.clone()],
        }
    }

    /// Initial frame before the container has been measured.
    pub fn frame(self, config: &DashboardConfig) -> ChartFrame {
        match self {
            // Map draws into a fixed 960x700 view box and scales with CSS.
            ChartKind::Map => ChartFrame::new(960.0, 700.0, Margin::new(200.0, 0.0, 0.0, 0.0)),
            ChartKind::Bar => ChartFrame::new(
                config.initial_width,
                config.chart_height,
                Margin::new(40.0, 20.0, 100.0, 60.0),
            ),
            ChartKind::Scatter => {
                ChartFrame::new(config.initial_width, config.chart_height, Margin::default())
            }
            ChartKind::Rankings => ChartFrame::new(
                config.initial_width,
                600.0,
                Margin::new(70.0, 80.0, 40.0, 150.0),
            ),
        }
    }

    /// Whether the chart follows the container width on resize.
    pub fn responsive(self) -> bool {
        !matches!(self, ChartKind::Map)
    }
}

/// Decoded payloads of one chart.
#[derive(Debug, Clone, PartialEq)]
pub enum Dataset {
    Map(Vec<Feature>),
    Bar {
        countries: Vec<Record>,
        continents: Vec<Record>,
    },
    Scatter(Vec<Record>),
    Rankings(Vec<Record>),
}

impl Dataset {
    /// Decode the payloads fetched for `kind` (see [`ChartKind::sources`]).
    pub fn decode(kind: ChartKind, payloads: &[Value], registry: &MetricRegistry) -> Result<Self> {
        let expected = if kind == ChartKind::Bar { 2 } else { 1 };
        let payload = |i: usize| {
            payloads.get(i).ok_or_else(|| {
                VizError::Parse(format!(
                    "{} chart expected {} payload(s), got {}",
                    kind.id(),
                    expected,
                    payloads.len()
                ))
            })
        };

        Ok(match kind {
            ChartKind::Map => Dataset::Map(features_from_json(payload(0)?)?),
            ChartKind::Bar => Dataset::Bar {
                countries: records_from_json(payload(0)?)?,
                continents: records_from_json(payload(1)?)?,
            },
            ChartKind::Scatter => Dataset::Scatter(records_from_json(payload(0)?)?),
            ChartKind::Rankings => {
                Dataset::Rankings(rankings::rankable(features_from_json(payload(0)?)?, registry))
            }
        })
    }
}

/// Metric label resolved to its field and colour scale.
#[derive(Debug, Clone)]
pub struct ResolvedMetric<'a> {
    pub label: &'a str,
    pub field: &'a str,
    pub scale: ColorScale,
}

/// Inputs shared by every chart pipeline.
#[derive(Debug, Clone, Copy)]
pub struct RenderContext<'a> {
    pub chart_id: &'a str,
    pub selection: &'a Selection,
    pub registry: &'a MetricRegistry,
    pub config: &'a DashboardConfig,
    pub frame: ChartFrame,
}

impl<'a> RenderContext<'a> {
    pub fn metric(&self) -> std::result::Result<ResolvedMetric<'a>, TransformError> {
        let label = self.selection.metric.as_str();
        let field = resolve_field(self.registry, label)?;
        let scale = self
            .registry
            .color_scale_for(label)
            .ok_or_else(|| TransformError::MetricUnresolved(label.to_string()))?;
        Ok(ResolvedMetric {
            label,
            field,
            scale,
        })
    }

    pub fn legend(&self, metric: &ResolvedMetric<'_>) -> LegendSpec {
        LegendSpec::for_metric(self.chart_id, metric.label, &metric.scale)
    }
}

/// Build the scene for a dataset. `mode` receives the bar chart's view mode.
pub fn build_scene(
    dataset: &Dataset,
    ctx: &RenderContext<'_>,
    mode: &mut ViewMode,
) -> std::result::Result<Scene, TransformError> {
    Ok(match dataset {
        Dataset::Map(features) => Scene::Map(map::map_scene(features, ctx)?),
        Dataset::Bar {
            countries,
            continents,
        } => {
            let scene = bar::bar_scene(countries, continents, ctx)?;
            *mode = scene.mode;
            Scene::Bar(scene)
        }
        Dataset::Scatter(records) => Scene::Scatter(scatter::scatter_scene(records, ctx)?),
        Dataset::Rankings(records) => Scene::Rankings(rankings::rankings_scene(records, ctx)?),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn bar_needs_two_payloads() {
        let registry = MetricRegistry::default();
        let err = Dataset::decode(ChartKind::Bar, &[json!([])], &registry).unwrap_err();
        assert!(matches!(err, VizError::Parse(_)));
        let ok = Dataset::decode(ChartKind::Bar, &[json!([]), json!([])], &registry);
        assert!(ok.is_ok());
    }

    #[test]
    fn sources_follow_config() {
        let sources = DataSources::default();
        assert_eq!(ChartKind::Bar.sources(&sources).len(), 2);
        assert_eq!(ChartKind::Rankings.sources(&sources), vec![sources.map.clone()]);
    }

    #[test]
    fn every_chart_has_its_own_container() {
        let ids: std::collections::HashSet<&str> =
            ChartKind::ALL.iter().map(|k| k.container_id()).collect();
        assert_eq!(ids.len(), ChartKind::ALL.len());
        assert_eq!(ChartKind::Bar.container_id(), "bar-chart");
        assert!(ChartKind::ALL.iter().all(|k| !k.title().is_empty()));
    }

    #[test]
    fn map_frame_is_fixed() {
        let config = DashboardConfig::default();
        assert!(!ChartKind::Map.responsive());
        assert_eq!(ChartKind::Map.frame(&config).width, 960.0);
        assert_eq!(ChartKind::Bar.frame(&config).margin.bottom, 100.0);
    }
}
