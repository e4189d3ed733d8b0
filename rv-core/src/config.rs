//! Dashboard configuration.
//!
//! Every field has a default, so an empty JSON object is a valid config and a
//! partial file only overrides what it names.

use crate::error::{Result, VizError};
use crate::metric::{default_metrics, MetricDef, MetricRegistry};
use crate::transform::{BAR_HEADROOM, OUTLIER_K, TOP_N};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Locations of the processed datasets.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DataSources {
    pub map: String,
    pub countries: String,
    pub continents: String,
    pub correlation: String,
}

impl Default for DataSources {
    fn default() -> Self {
        Self {
            map: "data/processed/map_data.json".to_string(),
            countries: "data/processed/recycling_by_country.json".to_string(),
            continents: "data/processed/recycling_by_continent.json".to_string(),
            correlation: "data/processed/correlation_data.json".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DashboardConfig {
    pub metrics: Vec<MetricDef>,
    pub sources: DataSources,
    /// Options of the continent selector besides "all"
    pub continents: Vec<String>,
    /// Countries shown when the bar chart is drilled into a continent
    pub top_n: usize,
    /// Multiplier applied to the tallest bar for the y domain
    pub bar_headroom: f64,
    /// Tukey fence multiplier for the scatter plot outlier trim
    pub outlier_k: f64,
    /// Scatter plot axis fields
    pub scatter_x_field: String,
    pub scatter_y_field: String,
    /// Fixed chart height in pixels
    pub chart_height: f64,
    /// Width used before the first container measurement
    pub initial_width: f64,
    pub transition_ms: u32,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            metrics: default_metrics(),
            sources: DataSources::default(),
            continents: [
                "Africa",
                "Asia",
                "Europe",
                "North America",
                "Oceania",
                "South America",
            ]
            .iter()
            .map(|c| c.to_string())
            .collect(),
            top_n: TOP_N,
            bar_headroom: BAR_HEADROOM,
            outlier_k: OUTLIER_K,
            scatter_x_field: "gdpPerCapita".to_string(),
            scatter_y_field: "density".to_string(),
            chart_height: crate::frame::DEFAULT_HEIGHT,
            initial_width: 960.0,
            transition_ms: 750,
        }
    }
}

impl DashboardConfig {
    /// Parse and validate a JSON config.
    pub fn from_json_str(text: &str) -> Result<Self> {
        let config: DashboardConfig =
            serde_json::from_str(text).map_err(|e| VizError::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.metrics.is_empty() {
            return Err(VizError::Config("at least one metric is required".to_string()));
        }
        let mut labels = HashSet::new();
        for metric in &self.metrics {
            if metric.label.trim().is_empty() || metric.field.trim().is_empty() {
                return Err(VizError::Config(
                    "metric label and field must not be empty".to_string(),
                ));
            }
            if !labels.insert(metric.label.as_str()) {
                return Err(VizError::Config(format!(
                    "duplicate metric label {:?}",
                    metric.label
                )));
            }
        }
        if self.top_n == 0 {
            return Err(VizError::Config("top_n must be positive".to_string()));
        }
        if !(self.bar_headroom.is_finite() && self.bar_headroom >= 1.0) {
            return Err(VizError::Config("bar_headroom must be >= 1".to_string()));
        }
        if !(self.outlier_k.is_finite() && self.outlier_k >= 0.0) {
            return Err(VizError::Config("outlier_k must be >= 0".to_string()));
        }
        Ok(())
    }

    pub fn registry(&self) -> MetricRegistry {
        MetricRegistry::new(self.metrics.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_object_gives_defaults() {
        let config = DashboardConfig::from_json_str("{}").unwrap();
        assert_eq!(config, DashboardConfig::default());
        assert_eq!(config.top_n, 10);
        assert_eq!(config.metrics.len(), 2);
    }

    #[test]
    fn partial_override() {
        let config = DashboardConfig::from_json_str(
            r#"{"top_n": 5, "sources": {"map": "geo.json"}}"#,
        )
        .unwrap();
        assert_eq!(config.top_n, 5);
        assert_eq!(config.sources.map, "geo.json");
        assert_eq!(config.sources.countries, DataSources::default().countries);
    }

    #[test]
    fn rejects_duplicate_labels() {
        let err = DashboardConfig::from_json_str(
            r#"{"metrics": [
                {"label": "A", "field": "a", "scheme": "blues"},
                {"label": "A", "field": "b", "scheme": "greens"}
            ]}"#,
        )
        .unwrap_err();
        assert!(matches!(err, VizError::Config(_)));
    }

    #[test]
    fn rejects_bad_numbers() {
        assert!(DashboardConfig::from_json_str(r#"{"top_n": 0}"#).is_err());
        assert!(DashboardConfig::from_json_str(r#"{"bar_headroom": 0.5}"#).is_err());
        assert!(DashboardConfig::from_json_str(r#"{"metrics": []}"#).is_err());
        assert!(DashboardConfig::from_json_str("not json").is_err());
    }
}
