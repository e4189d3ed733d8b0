//! Gradient legend shared by all charts.

use crate::color::ColorScale;
use serde::Serialize;

/// Legend bar size in pixels.
pub const LEGEND_WIDTH: f64 = 200.0;
pub const LEGEND_HEIGHT: f64 = 10.0;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GradientStop {
    /// Position along the bar, 0..=100 percent
    pub offset: f64,
    pub color: String,
}

/// Everything the renderer needs to draw the legend: title, gradient stops
/// sampled at 0 %, 50 % and 100 % of the scale, and the end labels.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LegendSpec {
    pub title: String,
    /// Unique per chart so several gradients can live in one document
    pub gradient_id: String,
    pub stops: Vec<GradientStop>,
    pub min_label: String,
    pub max_label: String,
    pub width: f64,
    pub height: f64,
}

impl LegendSpec {
    pub fn for_metric(chart_id: &str, label: &str, scale: &ColorScale) -> Self {
        let stops = [0.0, 0.5, 1.0]
            .iter()
            .map(|t| GradientStop {
                offset: t * 100.0,
                color: scale.color(t * 100.0),
            })
            .collect();

        Self {
            title: label.to_string(),
            gradient_id: format!("{chart_id}-legend-gradient"),
            stops,
            min_label: "0%".to_string(),
            max_label: "100%".to_string(),
            width: LEGEND_WIDTH,
            height: LEGEND_HEIGHT,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::ColorScheme;

    #[test]
    fn three_stops_from_scale() {
        let scale = ColorScale::new(ColorScheme::Blues);
        let legend = LegendSpec::for_metric("bar", "Recycling Score (2022)", &scale);
        let offsets: Vec<f64> = legend.stops.iter().map(|s| s.offset).collect();
        assert_eq!(offsets, vec![0.0, 50.0, 100.0]);
        assert_eq!(legend.stops[0].color, scale.color(0.0));
        assert_eq!(legend.stops[2].color, scale.color(100.0));
        assert_eq!(legend.gradient_id, "bar-legend-gradient");
        assert_eq!((legend.min_label.as_str(), legend.max_label.as_str()), ("0%", "100%"));
    }
}
