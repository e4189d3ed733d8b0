//! Quick look at a raw or processed dataset: row count, columns and the
//! first rows.

use crate::raw::read_json;
use anyhow::Context;
use serde_json::{Map, Value};
use std::path::Path;

#[derive(Debug, Clone, PartialEq)]
pub struct Summary {
    pub rows: usize,
    /// Column names in first-seen order
    pub columns: Vec<String>,
    /// The first rows, one line each
    pub head: Vec<String>,
}

fn push_columns(columns: &mut Vec<String>, names: impl Iterator<Item = String>) {
    for name in names {
        if !columns.contains(&name) {
            columns.push(name);
        }
    }
}

fn is_feature_collection(obj: &Map<String, Value>) -> bool {
    obj.get("type").and_then(Value::as_str) == Some("FeatureCollection")
}

/// Summarize JSON records: an array of objects, or the feature properties
/// of a GeoJSON FeatureCollection.
pub fn summarize_json(value: &Value, head: usize) -> anyhow::Result<Summary> {
    let records: Vec<&Map<String, Value>> = match value {
        Value::Array(items) => items.iter().filter_map(Value::as_object).collect(),
        Value::Object(obj) if is_feature_collection(obj) => {
            obj.get("features")
                .and_then(Value::as_array)
                .map(|features| {
                    features
                        .iter()
                        .filter_map(|f| f.get("properties").and_then(Value::as_object))
                        .collect()
                })
                .unwrap_or_default()
        }
        _ => anyhow::bail!("expected a JSON array or a FeatureCollection"),
    };

    let mut columns = Vec::new();
    for record in &records {
        push_columns(&mut columns, record.keys().cloned());
    }
    Ok(Summary {
        rows: records.len(),
        columns,
        head: records
            .iter()
            .take(head)
            .map(|r| Value::Object((*r).clone()).to_string())
            .collect(),
    })
}

pub fn summarize_csv(csv_data: &str, head: usize) -> anyhow::Result<Summary> {
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(csv_data.as_bytes());
    let columns: Vec<String> = rdr.headers()?.iter().map(str::to_string).collect();

    let mut rows = 0usize;
    let mut lines = Vec::new();
    for result in rdr.records() {
        let record = result?;
        if lines.len() < head {
            lines.push(record.iter().collect::<Vec<_>>().join(", "));
        }
        rows += 1;
    }
    Ok(Summary {
        rows,
        columns,
        head: lines,
    })
}

pub fn summarize_file(path: &Path, head: usize) -> anyhow::Result<Summary> {
    let is_csv = path
        .extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case("csv"));
    if is_csv {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display()))?;
        summarize_csv(&text, head)
    } else {
        summarize_json(&read_json(path)?, head)
    }
}

pub fn run_inspect(file: &str, head: usize) -> anyhow::Result<()> {
    let summary = summarize_file(Path::new(file), head)?;
    println!("Dataset: {}", file);
    println!("Rows: {}", summary.rows);
    println!("Columns: {}", summary.columns.join(", "));
    println!("First {} rows:", summary.head.len());
    for line in &summary.head {
        println!("  {}", line);
    }
    Ok(())
}
