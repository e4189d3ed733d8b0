//! Metric resolution: display label -> data field and colour scale.

use crate::color::{ColorScale, ColorScheme};
use serde::{Deserialize, Serialize};

/// A user-selectable metric.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetricDef {
    /// Label shown in the metric selector, e.g. "Recycling Score (2022)"
    pub label: String,
    /// Field name in the processed datasets
    pub field: String,
    pub scheme: ColorScheme,
}

impl MetricDef {
    pub fn new(label: &str, field: &str, scheme: ColorScheme) -> Self {
        Self {
            label: label.to_string(),
            field: field.to_string(),
            scheme,
        }
    }
}

/// Metrics shipped with the processed recycling datasets.
pub fn default_metrics() -> Vec<MetricDef> {
    vec![
        MetricDef::new(
            "Recycling Score (2022)",
            "RecyclingRates_EPIRecyclingScore_2022",
            ColorScheme::Blues,
        ),
        MetricDef::new(
            "Waste Recovery Rate (2024)",
            "RecyclingRates_EPIWasteRecoveryRateScore_2024",
            ColorScheme::Greens,
        ),
    ]
}

/// Immutable lookup table built once at startup.
#[derive(Debug, Clone, PartialEq)]
pub struct MetricRegistry {
    metrics: Vec<MetricDef>,
}

impl MetricRegistry {
    pub fn new(metrics: Vec<MetricDef>) -> Self {
        Self { metrics }
    }

    pub fn get(&self, label: &str) -> Option<&MetricDef> {
        self.metrics.iter().find(|m| m.label == label)
    }

    /// Field name for a display label, `None` when the label is unknown.
    pub fn field_for(&self, label: &str) -> Option<&str> {
        self.get(label).map(|m| m.field.as_str())
    }

    pub fn color_scale_for(&self, label: &str) -> Option<ColorScale> {
        self.get(label).map(|m| ColorScale::new(m.scheme))
    }

    /// Reverse lookup; unknown fields are returned unchanged.
    pub fn label_for<'a>(&'a self, field: &'a str) -> &'a str {
        self.metrics
            .iter()
            .find(|m| m.field == field)
            .map(|m| m.label.as_str())
            .unwrap_or(field)
    }

    /// Label selected on startup (first configured metric).
    pub fn default_label(&self) -> Option<&str> {
        self.metrics.first().map(|m| m.label.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = &MetricDef> {
        self.metrics.iter()
    }

    pub fn len(&self) -> usize {
        self.metrics.len()
    }

    pub fn is_empty(&self) -> bool {
        self.metrics.is_empty()
    }
}

impl Default for MetricRegistry {
    fn default() -> Self {
        Self::new(default_metrics())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolves_known_labels() {
        let registry = MetricRegistry::default();
        assert_eq!(
            registry.field_for("Recycling Score (2022)"),
            Some("RecyclingRates_EPIRecyclingScore_2022")
        );
        assert_eq!(
            registry.field_for("Waste Recovery Rate (2024)"),
            Some("RecyclingRates_EPIWasteRecoveryRateScore_2024")
        );
    }

    #[test]
    fn unknown_label_is_unresolved() {
        let registry = MetricRegistry::default();
        assert_eq!(registry.field_for("Landfill Share"), None);
        assert!(registry.color_scale_for("Landfill Share").is_none());
    }

    #[test]
    fn color_scale_follows_scheme() {
        let registry = MetricRegistry::default();
        let blues = registry.color_scale_for("Recycling Score (2022)").unwrap();
        assert_eq!(blues.scheme, ColorScheme::Blues);
        let greens = registry
            .color_scale_for("Waste Recovery Rate (2024)")
            .unwrap();
        assert_eq!(greens.scheme, ColorScheme::Greens);
    }

    #[test]
    fn generalizes_beyond_two_metrics() {
        let mut metrics = default_metrics();
        metrics.push(MetricDef::new("Composting (2023)", "compost_2023", ColorScheme::Oranges));
        let registry = MetricRegistry::new(metrics);
        assert_eq!(registry.len(), 3);
        assert_eq!(registry.field_for("Composting (2023)"), Some("compost_2023"));
        assert_eq!(registry.label_for("compost_2023"), "Composting (2023)");
        assert_eq!(registry.label_for("unknown_field"), "unknown_field");
    }
}
