//! Records decoded from the processed JSON datasets.
//!
//! Every dataset (country rows, continent aggregates, correlation rows and map
//! feature properties) is a flat JSON object. A record keeps its display name,
//! its continent and every numeric field; `null` and absent keys both decode as
//! "missing".

use crate::error::{Result, VizError};
use serde::Serialize;
use serde_json::{Map, Value};
use std::collections::BTreeMap;

/// A country or continent with its numeric metric fields.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Record {
    pub name: String,
    pub continent: Option<String>,
    pub values: BTreeMap<String, f64>,
}

impl Record {
    pub fn new(name: &str, continent: Option<&str>) -> Self {
        Self {
            name: name.to_string(),
            continent: continent.map(str::to_string),
            values: BTreeMap::new(),
        }
    }

    /// Builder used by fixtures: attach a numeric field.
    pub fn with(mut self, field: &str, value: f64) -> Self {
        self.values.insert(field.to_string(), value);
        self
    }

    /// Decode one JSON object. The display name is taken from `name`, then
    /// `country`, then `continent` (continent aggregates only carry the latter).
    pub fn from_json_object(obj: &Map<String, Value>) -> Option<Self> {
        let text = |key: &str| obj.get(key).and_then(Value::as_str).filter(|s| !s.is_empty());
        let name = text("name").or_else(|| text("country")).or_else(|| text("continent"))?;
        let continent = text("continent").map(str::to_string);

        let values = obj
            .iter()
            .filter_map(|(k, v)| v.as_f64().filter(|n| n.is_finite()).map(|n| (k.clone(), n)))
            .collect();

        Some(Self {
            name: name.to_string(),
            continent,
            values,
        })
    }

    /// Value of a field, `None` when missing.
    pub fn value(&self, field: &str) -> Option<f64> {
        self.values.get(field).copied()
    }

    /// Display value of a field: missing counts as 0.
    pub fn value_or_zero(&self, field: &str) -> f64 {
        self.value(field).unwrap_or(0.0)
    }
}

/// Decode a JSON array of objects. Entries without any usable name are skipped.
pub fn records_from_json(payload: &Value) -> Result<Vec<Record>> {
    let rows = payload
        .as_array()
        .ok_or_else(|| VizError::Parse("expected a JSON array of records".to_string()))?;

    let mut records = Vec::with_capacity(rows.len());
    let mut skipped = 0usize;
    for row in rows {
        match row.as_object().and_then(Record::from_json_object) {
            Some(record) => records.push(record),
            None => skipped += 1,
        }
    }
    if skipped > 0 {
        log::debug!("records: skipped {} rows without a name", skipped);
    }
    Ok(records)
}

/// One region of the choropleth map: its properties decoded as a record plus
/// the raw geometry handed through to the renderer.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Feature {
    pub record: Record,
    pub geometry: Value,
}

/// Decode a GeoJSON `FeatureCollection`.
pub fn features_from_json(payload: &Value) -> Result<Vec<Feature>> {
    if payload.get("type").and_then(Value::as_str) != Some("FeatureCollection") {
        return Err(VizError::Parse("expected a GeoJSON FeatureCollection".to_string()));
    }
    let features = payload
        .get("features")
        .and_then(Value::as_array)
        .ok_or_else(|| VizError::Parse("FeatureCollection has no features array".to_string()))?;

    Ok(features
        .iter()
        .filter_map(|f| {
            let props = f.get("properties")?.as_object()?;
            let record = Record::from_json_object(props)?;
            Some(Feature {
                record,
                geometry: f.get("geometry").cloned().unwrap_or(Value::Null),
            })
        })
        .collect())
}
