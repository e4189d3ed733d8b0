//! Raw input files of the data preparation pipeline.

use anyhow::Context;
use serde::Deserialize;
use serde_json::{Map, Value};
use std::path::Path;

pub const DENSITY_FILE: &str = "countries-by-population-density-2024.json";
pub const RECYCLING_FILE: &str = "recycling-rates-by-country-2024.json";
pub const WORLD_FILE: &str = "world_countries.json";
pub const GDP_FILE: &str = "world-gdp-data.csv";

pub type Row = Map<String, Value>;

/// One row of the GDP table. Other columns in the CSV are ignored.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct GdpRow {
    pub country: String,
    #[serde(default)]
    pub continent: Option<String>,
    #[serde(rename = "gdpPerCapita", default)]
    pub gdp_per_capita: Option<f64>,
}

/// Everything the pipeline reads from the raw directory.
#[derive(Debug, Clone)]
pub struct RawInputs {
    pub density: Vec<Row>,
    pub recycling: Vec<Row>,
    pub world: Value,
    pub gdp: Vec<GdpRow>,
}

impl RawInputs {
    pub fn load(dir: &Path) -> anyhow::Result<Self> {
        Ok(Self {
            density: read_rows(&dir.join(DENSITY_FILE))?,
            recycling: read_rows(&dir.join(RECYCLING_FILE))?,
            world: read_json(&dir.join(WORLD_FILE))?,
            gdp: read_gdp(&std::fs::read_to_string(dir.join(GDP_FILE)).with_context(|| {
                format!("failed to read {}", dir.join(GDP_FILE).display())
            })?)?,
        })
    }
}

pub fn read_json(path: &Path) -> anyhow::Result<Value> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    serde_json::from_str(&text).with_context(|| format!("invalid JSON in {}", path.display()))
}

/// A JSON array of objects. Non-object entries are skipped.
pub fn read_rows(path: &Path) -> anyhow::Result<Vec<Row>> {
    match read_json(path)? {
        Value::Array(items) => Ok(rows_of(items)),
        _ => anyhow::bail!("{} is not a JSON array", path.display()),
    }
}

pub fn rows_of(items: Vec<Value>) -> Vec<Row> {
    items
        .into_iter()
        .filter_map(|item| match item {
            Value::Object(row) => Some(row),
            _ => None,
        })
        .collect()
}

pub fn read_gdp(csv_data: &str) -> anyhow::Result<Vec<GdpRow>> {
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(csv_data.as_bytes());

    let mut rows = Vec::new();
    for result in rdr.deserialize::<GdpRow>() {
        let mut row = result.context("invalid GDP row")?;
        if row.continent.as_deref().is_some_and(str::is_empty) {
            row.continent = None;
        }
        rows.push(row);
    }
    Ok(rows)
}

/// `row[field]` as a string.
pub fn text<'a>(row: &'a Row, field: &str) -> Option<&'a str> {
    row.get(field).and_then(Value::as_str)
}

/// `row[field]` as a number; numeric strings are accepted.
pub fn number(row: &Row, field: &str) -> Option<f64> {
    match row.get(field)? {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
    .filter(|v: &f64| v.is_finite())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn gdp_csv_ignores_extra_columns() {
        let csv_data = "country,continent,gdpPerCapita,population\n\
                        Japan,Asia,39000.5,125000000\n\
                        Nowhere,,,\n";
        let rows = read_gdp(csv_data).unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].continent.as_deref(), Some("Asia"));
        assert_eq!(rows[0].gdp_per_capita, Some(39000.5));
        assert_eq!(rows[1].continent, None);
        assert_eq!(rows[1].gdp_per_capita, None);
    }

    #[test]
    fn numbers_from_strings() {
        let row = serde_json::json!({"a": 1.5, "b": "2", "c": null, "d": "x"});
        let row = row.as_object().unwrap();
        assert_eq!(number(row, "a"), Some(1.5));
        assert_eq!(number(row, "b"), Some(2.0));
        assert_eq!(number(row, "c"), None);
        assert_eq!(number(row, "d"), None);
    }
}
