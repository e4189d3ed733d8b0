//! Render-ready scenes handed to the drawing layer.
//!
//! All structs serialize to camelCase JSON so the D3 scripts can consume them
//! directly. Each scene is recomputed in full on every update.

use crate::frame::ChartFrame;
use crate::legend::LegendSpec;
use serde::Serialize;
use serde_json::Value;

/// Bar chart drill state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ViewMode {
    /// One bar per continent aggregate
    #[default]
    Continent,
    /// Top countries of one continent
    Country,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BarMark {
    pub name: String,
    pub continent: Option<String>,
    pub value: f64,
    pub color: String,
    pub tooltip: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BarScene {
    pub frame: ChartFrame,
    pub metric: String,
    pub field: String,
    pub mode: ViewMode,
    pub bars: Vec<BarMark>,
    pub y_domain: (f64, f64),
    /// Aggregate bars accept a drill-down click
    pub clickable: bool,
    pub show_back: bool,
    pub legend: LegendSpec,
    pub transition_ms: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PointMark {
    pub name: String,
    pub continent: Option<String>,
    pub x: f64,
    pub y: f64,
    /// Metric value driving radius and colour (missing = 0)
    pub value: f64,
    pub color: String,
    pub tooltip: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScatterScene {
    pub frame: ChartFrame,
    pub metric: String,
    pub field: String,
    pub x_field: String,
    pub y_field: String,
    pub points: Vec<PointMark>,
    pub x_domain: (f64, f64),
    pub y_domain: (f64, f64),
    pub radius_domain: (f64, f64),
    pub radius_range: (f64, f64),
    pub legend: LegendSpec,
    pub transition_ms: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RegionMark {
    pub name: String,
    pub continent: Option<String>,
    pub value: Option<f64>,
    pub fill: String,
    pub opacity: f64,
    pub tooltip: String,
    pub geometry: Value,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MapScene {
    pub frame: ChartFrame,
    pub metric: String,
    pub field: String,
    pub regions: Vec<RegionMark>,
    pub legend: LegendSpec,
    pub transition_ms: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RankMark {
    pub rank: usize,
    pub name: String,
    pub continent: Option<String>,
    pub value: f64,
    pub color: String,
    pub tooltip: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RankingsScene {
    pub frame: ChartFrame,
    pub metric: String,
    pub field: String,
    pub rows: Vec<RankMark>,
    pub x_domain: (f64, f64),
    pub legend: LegendSpec,
    pub transition_ms: u32,
}

/// A fully prepared chart.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum Scene {
    Bar(BarScene),
    Scatter(ScatterScene),
    Map(MapScene),
    Rankings(RankingsScene),
}

impl Scene {
    /// Number of data marks (bars, points, regions or rows).
    pub fn mark_count(&self) -> usize {
        match self {
            Scene::Bar(s) => s.bars.len(),
            Scene::Scatter(s) => s.points.len(),
            Scene::Map(s) => s.regions.len(),
            Scene::Rankings(s) => s.rows.len(),
        }
    }

    pub fn to_json(&self) -> String {
        serde_json::to_string(self).unwrap_or_default()
    }
}

/// `"{metric}: {value:.1}%"`, the value line of every tooltip.
pub fn metric_line(metric: &str, value: f64) -> String {
    format!("{metric}: {value:.1}%")
}

/// Round to an integer and group thousands with commas: `12345.6` -> `"12,346"`.
pub fn format_thousands(value: f64) -> String {
    if !value.is_finite() {
        return "0".to_string();
    }
    let rounded = value.round() as i64;
    let digits = rounded.unsigned_abs().to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3 + 1);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    if rounded < 0 {
        out.insert(0, '-');
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn thousands_grouping() {
        assert_eq!(format_thousands(0.0), "0");
        assert_eq!(format_thousands(999.4), "999");
        assert_eq!(format_thousands(12345.6), "12,346");
        assert_eq!(format_thousands(1_234_567.0), "1,234,567");
        assert_eq!(format_thousands(-4500.0), "-4,500");
    }

    #[test]
    fn metric_line_uses_one_decimal() {
        assert_eq!(metric_line("Recycling Score (2022)", 42.26), "Recycling Score (2022): 42.3%");
        assert_eq!(metric_line("M", 7.0), "M: 7.0%");
    }

    #[test]
    fn scene_json_is_tagged() {
        use crate::color::{ColorScale, ColorScheme};
        use crate::frame::Margin;
        let scene = Scene::Rankings(RankingsScene {
            frame: ChartFrame::new(600.0, 510.0, Margin::default()),
            metric: "M".into(),
            field: "m".into(),
            rows: Vec::new(),
            x_domain: (0.0, 100.0),
            legend: LegendSpec::for_metric("rankings", "M", &ColorScale::new(ColorScheme::Blues)),
            transition_ms: 750,
        });
        let json: Value = serde_json::from_str(&scene.to_json()).unwrap();
        assert_eq!(json["kind"], "rankings");
        assert_eq!(json["xDomain"], serde_json::json!([0.0, 100.0]));
        assert_eq!(json["transitionMs"], 750);
    }
}
