//! Rankings list: every country with a value for the selected metric,
//! best first.

use super::RenderContext;
use crate::frame::ChartFrame;
use crate::metric::MetricRegistry;
use crate::record::{Feature, Record};
use crate::scene::{metric_line, RankMark, RankingsScene};
use crate::transform::{filter_by_continent, sort_desc_by, TransformError};

/// Row height of the list and the minimum plotting height.
pub const ROW_HEIGHT: f64 = 25.0;
pub const MIN_HEIGHT: f64 = 400.0;

/// Map features that carry at least one configured metric.
pub fn rankable(features: Vec<Feature>, registry: &MetricRegistry) -> Vec<Record> {
    features
        .into_iter()
        .map(|f| f.record)
        .filter(|r| registry.iter().any(|m| r.value(&m.field).is_some()))
        .collect()
}

pub fn rankings_scene(
    records: &[Record],
    ctx: &RenderContext<'_>,
) -> Result<RankingsScene, TransformError> {
    let metric = ctx.metric()?;

    // Missing values are not ranked.
    let mut rows: Vec<&Record> = filter_by_continent(records, &ctx.selection.continent)
        .into_iter()
        .filter(|r| r.value(metric.field).is_some())
        .collect();
    sort_desc_by(&mut rows, metric.field);

    let mut frame = ctx.frame;
    let inner = ChartFrame::content_height(rows.len(), ROW_HEIGHT, MIN_HEIGHT);
    frame.height = inner + frame.margin.top + frame.margin.bottom;

    let rows = rows
        .iter()
        .enumerate()
        .map(|(i, r)| {
            let value = r.value_or_zero(metric.field);
            RankMark {
                rank: i + 1,
                name: r.name.clone(),
                continent: r.continent.clone(),
                value,
                color: metric.scale.color(value),
                tooltip: format!("#{} {}\n{}", i + 1, r.name, metric_line(metric.label, value)),
            }
        })
        .collect();

    Ok(RankingsScene {
        frame,
        metric: metric.label.to_string(),
        field: metric.field.to_string(),
        rows,
        x_domain: (0.0, 100.0),
        legend: ctx.legend(&metric),
        transition_ms: ctx.config.transition_ms,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::charts::ChartKind;
    use crate::config::DashboardConfig;
    use crate::selection::{ContinentFilter, Selection};
    use serde_json::Value;

    const SCORE: &str = "RecyclingRates_EPIRecyclingScore_2022";
    const RECOVERY: &str = "RecyclingRates_EPIWasteRecoveryRateScore_2024";

    fn build(records: &[Record], filter: &str) -> RankingsScene {
        let config = DashboardConfig::default();
        let registry = MetricRegistry::default();
        let selection =
            Selection::new("Recycling Score (2022)").with_continent(ContinentFilter::parse(filter));
        let ctx = RenderContext {
            chart_id: "rankings",
            selection: &selection,
            registry: &registry,
            config: &config,
            frame: ChartKind::Rankings.frame(&config),
        };
        rankings_scene(records, &ctx).unwrap()
    }

    #[test]
    fn features_without_metrics_are_not_rankable() {
        let registry = MetricRegistry::default();
        let features = vec![
            Feature {
                record: Record::new("A", Some("Asia")).with(RECOVERY, 3.0),
                geometry: Value::Null,
            },
            Feature {
                record: Record::new("B", Some("Asia")).with("population", 3.0),
                geometry: Value::Null,
            },
        ];
        let records = rankable(features, &registry);
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].name, "A");
    }

    #[test]
    fn missing_metric_is_excluded_and_rows_are_ranked() {
        let records = vec![
            Record::new("Low", Some("Europe")).with(SCORE, 5.0),
            Record::new("None", Some("Europe")).with(RECOVERY, 90.0),
            Record::new("High", Some("Europe")).with(SCORE, 70.0),
            Record::new("Far", Some("Asia")).with(SCORE, 99.0),
        ];
        let scene = build(&records, "Europe");
        let names: Vec<&str> = scene.rows.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, vec!["High", "Low"]);
        assert_eq!(scene.rows[1].rank, 2);
        assert_eq!(scene.x_domain, (0.0, 100.0));
    }

    #[test]
    fn height_grows_with_rows() {
        let few = build(&[Record::new("A", Some("X")).with(SCORE, 1.0)], "all");
        assert_eq!(few.frame.height, MIN_HEIGHT + 70.0 + 40.0);

        let many: Vec<Record> = (0..30)
            .map(|i| Record::new(&format!("C{i}"), Some("X")).with(SCORE, i as f64))
            .collect();
        let tall = build(&many, "all");
        assert_eq!(tall.frame.height, 30.0 * ROW_HEIGHT + 110.0);
    }
}
