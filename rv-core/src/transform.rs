//! Filtering, ordering and scale math shared by every chart.
//!
//! Display math treats a missing value as 0. Ranking math (quantiles) only
//! looks at values that are present.

use crate::metric::MetricRegistry;
use crate::record::Record;
use crate::selection::ContinentFilter;
use std::cmp::Ordering;
use thiserror::Error;

/// Number of countries kept in the bar chart drill-down.
pub const TOP_N: usize = 10;
/// Headroom added above the tallest bar.
pub const BAR_HEADROOM: f64 = 1.1;
/// Tukey fence multiplier for the outlier trim.
pub const OUTLIER_K: f64 = 1.5;

/// Reasons a render cycle is aborted before anything is drawn.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum TransformError {
    #[error("metric label {0:?} has no field mapping")]
    MetricUnresolved(String),
}

/// Resolve a metric label to its data field.
pub fn resolve_field<'a>(
    registry: &'a MetricRegistry,
    label: &str,
) -> Result<&'a str, TransformError> {
    registry
        .field_for(label)
        .ok_or_else(|| TransformError::MetricUnresolved(label.to_string()))
}

/// Keep records whose continent passes the filter. `All` keeps everything.
pub fn filter_by_continent<'a>(records: &'a [Record], filter: &ContinentFilter) -> Vec<&'a Record> {
    records
        .iter()
        .filter(|r| filter.matches(r.continent.as_deref()))
        .collect()
}

/// Stable descending sort on `field`, missing values counting as 0.
/// `-0.0` and `0.0` compare equal.
pub fn sort_desc_by(records: &mut [&Record], field: &str) {
    records.sort_by(|a, b| {
        b.value_or_zero(field)
            .partial_cmp(&a.value_or_zero(field))
            .unwrap_or(Ordering::Equal)
    });
}

/// First `n` records.
pub fn top_n<T>(mut records: Vec<T>, n: usize) -> Vec<T> {
    records.truncate(n);
    records
}

/// Largest value of `field` (missing = 0); 0 for an empty set.
pub fn max_value(records: &[&Record], field: &str) -> f64 {
    records
        .iter()
        .map(|r| r.value_or_zero(field))
        .fold(0.0, f64::max)
}

/// Quantile of an ascending-sorted slice by linear interpolation between order
/// statistics: with `h = p * (n - 1)`, `i = floor(h)`,
/// `q = x[i] + (h - i) * (x[i + 1] - x[i])`.
///
/// An empty slice yields 0 so no NaN reaches a scale domain.
pub fn quantile_sorted(sorted: &[f64], p: f64) -> f64 {
    let n = sorted.len();
    if n == 0 || !p.is_finite() {
        return 0.0;
    }
    if n == 1 || p <= 0.0 {
        return sorted[0];
    }
    if p >= 1.0 {
        return sorted[n - 1];
    }
    let h = p * (n - 1) as f64;
    let i = h.floor() as usize;
    let lower = sorted[i];
    let upper = sorted[(i + 1).min(n - 1)];
    lower + (h - i as f64) * (upper - lower)
}

/// Quantile of unsorted values; non-finite entries are ignored.
pub fn quantile(values: &[f64], p: f64) -> f64 {
    let mut sorted: Vec<f64> = values.iter().copied().filter(|v| v.is_finite()).collect();
    sorted.sort_by(f64::total_cmp);
    quantile_sorted(&sorted, p)
}

/// `Q3 + k * (Q3 - Q1)` over the present values of `field`.
pub fn iqr_upper_bound(records: &[&Record], field: &str, k: f64) -> f64 {
    let values: Vec<f64> = records.iter().filter_map(|r| r.value(field)).collect();
    let q1 = quantile(&values, 0.25);
    let q3 = quantile(&values, 0.75);
    q3 + k * (q3 - q1)
}

/// Drop records that exceed the upper fence on any of `fields`. Bounds are
/// computed from the set passed in. Records missing one of the fields cannot
/// be placed and are dropped too. No lower fence is applied.
pub fn trim_outliers<'a>(records: Vec<&'a Record>, fields: &[&str], k: f64) -> Vec<&'a Record> {
    let bounds: Vec<(&str, f64)> = fields
        .iter()
        .map(|f| (*f, iqr_upper_bound(&records, f, k)))
        .collect();

    records
        .into_iter()
        .filter(|r| {
            bounds
                .iter()
                .all(|(field, bound)| r.value(field).is_some_and(|v| v <= *bound))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    const SCORE: &str = "score";

    fn rec(name: &str, continent: &str, score: Option<f64>) -> Record {
        let r = Record::new(name, Some(continent));
        match score {
            Some(v) => r.with(SCORE, v),
            None => r,
        }
    }

    #[test]
    fn quantile_linear_interpolation() {
        let values = [1.0, 2.0, 3.0, 4.0, 1000.0];
        assert_eq!(quantile(&values, 0.25), 2.0);
        assert_eq!(quantile(&values, 0.75), 4.0);
        assert_eq!(quantile(&[1.0, 2.0, 3.0, 4.0], 0.25), 1.75);
        assert_eq!(quantile(&[4.0, 1.0, 3.0, 2.0], 0.5), 2.5);
    }

    #[test]
    fn quantile_degenerate_inputs() {
        assert_eq!(quantile(&[], 0.25), 0.0);
        assert_eq!(quantile(&[f64::NAN], 0.75), 0.0);
        assert_eq!(quantile(&[7.0], 0.75), 7.0);
        assert_eq!(quantile(&[1.0, 9.0], 0.0), 1.0);
        assert_eq!(quantile(&[1.0, 9.0], 1.0), 9.0);
    }

    #[test]
    fn sort_treats_missing_as_zero() {
        let records = vec![
            rec("a", "X", None),
            rec("b", "X", Some(5.0)),
            rec("c", "X", Some(-1.0)),
        ];
        let mut view: Vec<&Record> = records.iter().collect();
        sort_desc_by(&mut view, SCORE);
        let names: Vec<&str> = view.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, vec!["b", "a", "c"]);
    }

    #[test]
    fn max_value_of_empty_set_is_zero() {
        assert_eq!(max_value(&[], SCORE), 0.0);
        let records = vec![rec("a", "X", None)];
        let view: Vec<&Record> = records.iter().collect();
        assert_eq!(max_value(&view, SCORE), 0.0);
    }

    #[test]
    fn all_null_field_does_not_panic() {
        let records = vec![rec("a", "X", None), rec("b", "X", None)];
        let view: Vec<&Record> = records.iter().collect();
        assert_eq!(iqr_upper_bound(&view, SCORE, OUTLIER_K), 0.0);
        assert!(trim_outliers(view, &[SCORE], OUTLIER_K).is_empty());
    }

    #[test]
    fn unresolved_metric_is_reported() {
        let registry = MetricRegistry::default();
        assert_eq!(
            resolve_field(&registry, "Nope"),
            Err(TransformError::MetricUnresolved("Nope".to_string()))
        );
    }
}
