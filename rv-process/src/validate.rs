//! Sanity checks on the processed datasets.

use crate::process::{
    CORRELATION_FILE, COUNTRIES_FILE, MAP_FILE, RECOVERY_FIELD, SCORE_FIELD,
};
use crate::raw::read_json;
use log::info;
use serde_json::Value;
use std::path::Path;

const COUNTRY_FIELDS: [&str; 4] = ["country", RECOVERY_FIELD, SCORE_FIELD, "continent"];

const CORRELATION_FIELDS: [&str; 7] = [
    "country",
    "density",
    "population",
    "gdpPerCapita",
    RECOVERY_FIELD,
    SCORE_FIELD,
    "continent",
];

/// Fields that must not hold a negative number in any correlation row.
const NON_NEGATIVE: [&str; 3] = ["density", "population", "gdpPerCapita"];

pub fn check_map(map: &Value) -> Vec<String> {
    let mut problems = Vec::new();
    if map.get("type").and_then(Value::as_str) != Some("FeatureCollection") {
        problems.push("map data is not a FeatureCollection".to_string());
    }
    match map.get("features").and_then(Value::as_array) {
        Some(features) if !features.is_empty() => {}
        Some(_) => problems.push("map data has no features".to_string()),
        None => problems.push("map data has no features array".to_string()),
    }
    problems
}

/// Required fields are checked on the first row.
pub fn check_countries(rows: &Value) -> Vec<String> {
    let Some(first) = rows.as_array().and_then(|rows| rows.first()) else {
        return vec!["country data is empty".to_string()];
    };
    COUNTRY_FIELDS
        .iter()
        .filter(|field| first.get(**field).is_none())
        .map(|field| format!("country data is missing {field}"))
        .collect()
}

pub fn check_correlation(rows: &Value) -> Vec<String> {
    let Some(rows) = rows.as_array() else {
        return vec!["correlation data is not an array".to_string()];
    };
    let mut problems = Vec::new();
    for (i, row) in rows.iter().enumerate() {
        for field in CORRELATION_FIELDS {
            if row.get(field).is_none() {
                problems.push(format!("correlation row {i} is missing {field}"));
            }
        }
        for field in NON_NEGATIVE {
            // Null means unknown and is accepted.
            let Some(value) = row.get(field).filter(|v| !v.is_null()) else {
                continue;
            };
            match value.as_f64() {
                Some(v) if v >= 0.0 => {}
                Some(v) => problems.push(format!("correlation row {i}: {field} is negative ({v})")),
                None => problems.push(format!("correlation row {i}: {field} is not a number")),
            }
        }
    }
    problems
}

pub fn run_validate(dir: &str) -> anyhow::Result<()> {
    let dir = Path::new(dir);
    let mut problems = check_map(&read_json(&dir.join(MAP_FILE))?);
    problems.extend(check_countries(&read_json(&dir.join(COUNTRIES_FILE))?));
    problems.extend(check_correlation(&read_json(&dir.join(CORRELATION_FILE))?));

    if !problems.is_empty() {
        for problem in &problems {
            log::error!("{}", problem);
        }
        anyhow::bail!("{} problem(s) in {}", problems.len(), dir.display());
    }
    info!("{} looks valid", dir.display());
    Ok(())
}
