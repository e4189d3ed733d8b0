//! Choropleth map. Every region is drawn; the continent filter dims the
//! regions outside the selection instead of removing them.

use super::RenderContext;
use crate::record::Feature;
use crate::scene::{metric_line, MapScene, RegionMark};
use crate::transform::TransformError;

/// Fill for regions without a value.
pub const NO_DATA_FILL: &str = "#ccc";
pub const DIMMED_OPACITY: f64 = 0.3;

pub fn map_scene(
    features: &[Feature],
    ctx: &RenderContext<'_>,
) -> Result<MapScene, TransformError> {
    let metric = ctx.metric()?;
    let filter = &ctx.selection.continent;

    let regions = features
        .iter()
        .map(|f| {
            let record = &f.record;
            let value = record.value(metric.field);
            let continent = record.continent.as_deref().unwrap_or("Unknown");
            RegionMark {
                name: record.name.clone(),
                continent: record.continent.clone(),
                value,
                fill: value
                    .map(|v| metric.scale.color(v))
                    .unwrap_or_else(|| NO_DATA_FILL.to_string()),
                opacity: if filter.matches(record.continent.as_deref()) {
                    1.0
                } else {
                    DIMMED_OPACITY
                },
                tooltip: format!(
                    "{}\nContinent: {}\n{}",
                    record.name,
                    continent,
                    metric_line(metric.label, value.unwrap_or(0.0))
                ),
                geometry: f.geometry.clone(),
            }
        })
        .collect();

    Ok(MapScene {
        frame: ctx.frame,
        metric: metric.label.to_string(),
        field: metric.field.to_string(),
        regions,
        legend: ctx.legend(&metric),
        transition_ms: ctx.config.transition_ms,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::charts::ChartKind;
    use crate::config::DashboardConfig;
    use crate::metric::MetricRegistry;
    use crate::record::Record;
    use crate::selection::{ContinentFilter, Selection};
    use serde_json::Value;

    const FIELD: &str = "RecyclingRates_EPIRecyclingScore_2022";

    fn feature(name: &str, continent: &str, value: Option<f64>) -> Feature {
        let mut record = Record::new(name, Some(continent));
        if let Some(v) = value {
            record = record.with(FIELD, v);
        }
        Feature {
            record,
            geometry: Value::Null,
        }
    }

    fn build(filter: &str, metric: &str) -> Result<MapScene, TransformError> {
        let config = DashboardConfig::default();
        let registry = MetricRegistry::default();
        let selection = Selection::new(metric).with_continent(ContinentFilter::parse(filter));
        let ctx = RenderContext {
            chart_id: "map",
            selection: &selection,
            registry: &registry,
            config: &config,
            frame: ChartKind::Map.frame(&config),
        };
        let features = vec![
            feature("Germany", "Europe", Some(65.0)),
            feature("Chad", "Africa", None),
        ];
        map_scene(&features, &ctx)
    }

    #[test]
    fn missing_values_use_no_data_fill() {
        let scene = build("all", "Recycling Score (2022)").unwrap();
        assert_eq!(scene.regions.len(), 2);
        assert_ne!(scene.regions[0].fill, NO_DATA_FILL);
        assert_eq!(scene.regions[1].fill, NO_DATA_FILL);
        assert!(scene.regions[1].tooltip.ends_with("Recycling Score (2022): 0.0%"));
    }

    #[test]
    fn filter_dims_other_continents() {
        let scene = build("Europe", "Recycling Score (2022)").unwrap();
        assert_eq!(scene.regions.len(), 2);
        assert_eq!(scene.regions[0].opacity, 1.0);
        assert_eq!(scene.regions[1].opacity, DIMMED_OPACITY);
    }

    #[test]
    fn unknown_metric_aborts() {
        assert!(matches!(
            build("all", "Unknown"),
            Err(TransformError::MetricUnresolved(_))
        ));
    }
}
