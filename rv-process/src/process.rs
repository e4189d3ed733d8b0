//! Turn the raw inputs into the four processed datasets the dashboard loads.

use crate::raw::{number, text, GdpRow, RawInputs, Row};
use anyhow::Context;
use log::{info, warn};
use serde_json::{json, Map, Value};
use std::collections::{BTreeMap, HashMap};
use std::path::Path;

pub const SCORE_FIELD: &str = "RecyclingRates_EPIRecyclingScore_2022";
pub const RECOVERY_FIELD: &str = "RecyclingRates_EPIWasteRecoveryRateScore_2024";
pub const METRIC_FIELDS: [&str; 2] = [SCORE_FIELD, RECOVERY_FIELD];

pub const MAP_FILE: &str = "map_data.json";
pub const COUNTRIES_FILE: &str = "recycling_by_country.json";
pub const CONTINENTS_FILE: &str = "recycling_by_continent.json";
pub const CORRELATION_FILE: &str = "correlation_data.json";

/// GeoJSON names that differ from the names in the recycling and GDP tables.
const COUNTRY_ALIASES: [(&str, &str); 6] = [
    ("United States of America", "United States"),
    ("USA", "United States"),
    ("UK", "United Kingdom"),
    ("United Republic of Tanzania", "Tanzania"),
    ("Democratic Republic of the Congo", "Congo"),
    ("Republic of the Congo", "Congo Republic"),
];

pub fn canonical_name(name: &str) -> &str {
    COUNTRY_ALIASES
        .iter()
        .find(|(alias, _)| *alias == name)
        .map(|(_, canonical)| *canonical)
        .unwrap_or(name)
}

fn number_value(value: Option<f64>) -> Value {
    value
        .and_then(serde_json::Number::from_f64)
        .map(Value::Number)
        .unwrap_or(Value::Null)
}

fn continent_lookup(gdp: &[GdpRow]) -> HashMap<&str, &GdpRow> {
    // Later rows win, as with a dict built from the table.
    gdp.iter().map(|row| (row.country.as_str(), row)).collect()
}

fn rows_by_country(rows: &[Row]) -> HashMap<&str, &Row> {
    let mut lookup = HashMap::new();
    for row in rows {
        if let Some(country) = text(row, "country") {
            lookup.entry(country).or_insert(row);
        }
    }
    lookup
}

/// Attach the recycling metrics and continent to every GeoJSON feature.
/// Missing metrics are left out rather than written as null.
pub fn build_map_data(world: &Value, recycling: &[Row], gdp: &[GdpRow]) -> anyhow::Result<Value> {
    let mut map = world.clone();
    let features = map
        .get_mut("features")
        .and_then(Value::as_array_mut)
        .context("world GeoJSON has no features array")?;

    let recycling = rows_by_country(recycling);
    let continents = continent_lookup(gdp);
    let mut matched = 0usize;

    for feature in features.iter_mut() {
        let Some(props) = feature.get_mut("properties").and_then(Value::as_object_mut) else {
            continue;
        };
        let name = text(props, "name").unwrap_or_default().to_string();
        let mapped = canonical_name(&name).to_string();

        if let Some(row) = recycling.get(mapped.as_str()) {
            matched += 1;
            for field in METRIC_FIELDS {
                if let Some(v) = number(row, field) {
                    props.insert(field.to_string(), number_value(Some(v)));
                }
            }
            let continent = continents
                .get(mapped.as_str())
                .and_then(|r| r.continent.clone());
            if let Some(continent) = continent {
                props.insert("continent".to_string(), Value::String(continent));
            }
        }
        props.insert("original_name".to_string(), Value::String(name));
        props.insert("mapped_name".to_string(), Value::String(mapped));
    }

    info!("map data: {} of {} features matched", matched, features.len());
    Ok(map)
}

/// Recycling rows left-joined with the GDP continents.
pub fn build_country_rows(recycling: &[Row], gdp: &[GdpRow]) -> Vec<Value> {
    let continents = continent_lookup(gdp);
    recycling
        .iter()
        .filter_map(|row| {
            let country = text(row, "country")?;
            let mut out = Map::new();
            out.insert("country".to_string(), Value::String(country.to_string()));
            for field in METRIC_FIELDS {
                out.insert(field.to_string(), number_value(number(row, field)));
            }
            out.insert(
                "continent".to_string(),
                continents
                    .get(country)
                    .and_then(|r| r.continent.clone())
                    .map(Value::String)
                    .unwrap_or(Value::Null),
            );
            Some(Value::Object(out))
        })
        .collect()
}

/// Per-continent mean of each metric over the country rows, ignoring
/// missing values. Rows without a continent are dropped. Continents come
/// out in name order.
pub fn build_continent_aggregates(country_rows: &[Value]) -> Vec<Value> {
    let mut sums: BTreeMap<&str, [(f64, usize); METRIC_FIELDS.len()]> = BTreeMap::new();
    for row in country_rows.iter().filter_map(Value::as_object) {
        let Some(continent) = text(row, "continent") else {
            continue;
        };
        let entry = sums.entry(continent).or_insert([(0.0, 0); METRIC_FIELDS.len()]);
        for (slot, field) in entry.iter_mut().zip(METRIC_FIELDS) {
            if let Some(v) = number(row, field) {
                slot.0 += v;
                slot.1 += 1;
            }
        }
    }

    sums.into_iter()
        .map(|(continent, totals)| {
            let mut out = Map::new();
            out.insert("continent".to_string(), Value::String(continent.to_string()));
            for ((sum, count), field) in totals.into_iter().zip(METRIC_FIELDS) {
                let mean = (count > 0).then(|| sum / count as f64);
                out.insert(field.to_string(), number_value(mean));
            }
            Value::Object(out)
        })
        .collect()
}

/// Density joined with recycling and GDP on country; countries missing from
/// either table are dropped.
pub fn build_correlation_rows(density: &[Row], recycling: &[Row], gdp: &[GdpRow]) -> Vec<Value> {
    let recycling = rows_by_country(recycling);
    let gdp = continent_lookup(gdp);

    density
        .iter()
        .filter_map(|row| {
            let country = text(row, "country")?;
            let rates = recycling.get(country)?;
            let economy = gdp.get(country)?;
            Some(json!({
                "country": country,
                "density": number_value(number(row, "density")),
                "population": number_value(number(row, "population")),
                "gdpPerCapita": number_value(economy.gdp_per_capita),
                RECOVERY_FIELD: number_value(number(rates, RECOVERY_FIELD)),
                SCORE_FIELD: number_value(number(rates, SCORE_FIELD)),
                "continent": economy.continent,
            }))
        })
        .collect()
}

/// The four processed datasets.
#[derive(Debug, Clone)]
pub struct Processed {
    pub map: Value,
    pub countries: Vec<Value>,
    pub continents: Vec<Value>,
    pub correlation: Vec<Value>,
}

impl Processed {
    pub fn build(raw: &RawInputs) -> anyhow::Result<Self> {
        let map = build_map_data(&raw.world, &raw.recycling, &raw.gdp)?;
        let countries = build_country_rows(&raw.recycling, &raw.gdp);
        let continents = build_continent_aggregates(&countries);
        let correlation = build_correlation_rows(&raw.density, &raw.recycling, &raw.gdp);
        if correlation.is_empty() {
            warn!("correlation data is empty; check country names across inputs");
        }
        Ok(Self {
            map,
            countries,
            continents,
            correlation,
        })
    }

    pub fn write(&self, out_dir: &Path) -> anyhow::Result<()> {
        std::fs::create_dir_all(out_dir)
            .with_context(|| format!("failed to create {}", out_dir.display()))?;
        write_json(&out_dir.join(MAP_FILE), &self.map)?;
        write_json(&out_dir.join(COUNTRIES_FILE), &Value::from(self.countries.clone()))?;
        write_json(&out_dir.join(CONTINENTS_FILE), &Value::from(self.continents.clone()))?;
        write_json(&out_dir.join(CORRELATION_FILE), &Value::from(self.correlation.clone()))?;
        Ok(())
    }
}

fn write_json(path: &Path, value: &Value) -> anyhow::Result<()> {
    let text = serde_json::to_string(value)?;
    std::fs::write(path, text).with_context(|| format!("failed to write {}", path.display()))?;
    info!("wrote {}", path.display());
    Ok(())
}

pub fn run_process(raw_dir: &str, out_dir: &str) -> anyhow::Result<()> {
    info!("Loading raw data from {}", raw_dir);
    let raw = RawInputs::load(Path::new(raw_dir))?;
    info!(
        "Loaded {} density rows, {} recycling rows, {} GDP rows",
        raw.density.len(),
        raw.recycling.len(),
        raw.gdp.len()
    );
    let processed = Processed::build(&raw)?;
    processed.write(Path::new(out_dir))?;
    info!(
        "Processing complete: {} countries, {} continents, {} correlation rows",
        processed.countries.len(),
        processed.continents.len(),
        processed.correlation.len()
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::raw::{read_gdp, rows_of};

    fn recycling() -> Vec<Row> {
        rows_of(vec![
            json!({"country": "United States", SCORE_FIELD: 24.0, RECOVERY_FIELD: 32.0}),
            json!({"country": "Germany", SCORE_FIELD: 67.0, RECOVERY_FIELD: null}),
            json!({"country": "France", SCORE_FIELD: 25.0, RECOVERY_FIELD: 40.0}),
            json!({"country": "Atlantis", SCORE_FIELD: 99.0}),
        ])
    }

    fn gdp() -> Vec<GdpRow> {
        read_gdp(
            "country,continent,gdpPerCapita\n\
             United States,North America,76000\n\
             Germany,Europe,48000\n\
             France,Europe,44000\n",
        )
        .unwrap()
    }

    #[test]
    fn aliases_resolve() {
        assert_eq!(canonical_name("USA"), "United States");
        assert_eq!(canonical_name("Republic of the Congo"), "Congo Republic");
        assert_eq!(canonical_name("Chile"), "Chile");
    }

    #[test]
    fn map_features_get_metrics_and_continent() {
        let world = json!({
            "type": "FeatureCollection",
            "features": [
                {"type": "Feature", "properties": {"name": "USA"}, "geometry": null},
                {"type": "Feature", "properties": {"name": "Germany"}, "geometry": null},
                {"type": "Feature", "properties": {"name": "Chad"}, "geometry": null}
            ]
        });
        let map = build_map_data(&world, &recycling(), &gdp()).unwrap();
        let features = map["features"].as_array().unwrap();

        let usa = &features[0]["properties"];
        assert_eq!(usa["continent"], "North America");
        assert_eq!(usa[SCORE_FIELD], 24.0);
        assert_eq!(usa["original_name"], "USA");
        assert_eq!(usa["mapped_name"], "United States");

        let germany = features[1]["properties"].as_object().unwrap();
        assert!(!germany.contains_key(RECOVERY_FIELD));

        let chad = features[2]["properties"].as_object().unwrap();
        assert!(!chad.contains_key("continent"));
        assert_eq!(chad["original_name"], "Chad");
    }

    #[test]
    fn world_without_features_is_an_error() {
        assert!(build_map_data(&json!({"type": "FeatureCollection"}), &[], &[]).is_err());
    }

    #[test]
    fn country_rows_left_join() {
        let rows = build_country_rows(&recycling(), &gdp());
        assert_eq!(rows.len(), 4);
        assert_eq!(rows[0]["continent"], "North America");
        assert_eq!(rows[1][RECOVERY_FIELD], Value::Null);
        assert_eq!(rows[3]["continent"], Value::Null);
    }

    #[test]
    fn continent_means_skip_missing() {
        let rows = build_country_rows(&recycling(), &gdp());
        let continents = build_continent_aggregates(&rows);
        // Atlantis has no continent and is dropped.
        assert_eq!(continents.len(), 2);
        assert_eq!(continents[0]["continent"], "Europe");
        assert_eq!(continents[0][SCORE_FIELD], 46.0);
        assert_eq!(continents[0][RECOVERY_FIELD], 40.0);
        assert_eq!(continents[1]["continent"], "North America");
    }

    #[test]
    fn correlation_is_an_inner_join() {
        let density = rows_of(vec![
            json!({"country": "France", "density": 119.0, "population": 68000000}),
            json!({"country": "Atlantis", "density": 1.0, "population": 10}),
            json!({"country": "Germany", "density": 233.0, "population": 84000000}),
        ]);
        let rows = build_correlation_rows(&density, &recycling(), &gdp());
        let names: Vec<&str> = rows.iter().map(|r| r["country"].as_str().unwrap()).collect();
        assert_eq!(names, vec!["France", "Germany"]);
        assert_eq!(rows[0]["gdpPerCapita"], 44000.0);
        assert_eq!(rows[1]["continent"], "Europe");
    }

    #[test]
    fn run_writes_all_outputs() {
        let root = std::env::temp_dir().join(format!("rv-process-{}", std::process::id()));
        let raw = root.join("raw");
        let out = root.join("processed");
        std::fs::create_dir_all(&raw).unwrap();
        std::fs::write(
            raw.join(crate::raw::DENSITY_FILE),
            r#"[{"country": "France", "density": 119.0, "population": 68000000}]"#,
        )
        .unwrap();
        std::fs::write(
            raw.join(crate::raw::RECYCLING_FILE),
            json!([{"country": "France", SCORE_FIELD: 25.0, RECOVERY_FIELD: 40.0}]).to_string(),
        )
        .unwrap();
        std::fs::write(
            raw.join(crate::raw::WORLD_FILE),
            r#"{"type": "FeatureCollection", "features": [{"type": "Feature", "properties": {"name": "France"}, "geometry": null}]}"#,
        )
        .unwrap();
        std::fs::write(
            raw.join(crate::raw::GDP_FILE),
            "country,continent,gdpPerCapita\nFrance,Europe,44000\n",
        )
        .unwrap();

        run_process(raw.to_str().unwrap(), out.to_str().unwrap()).unwrap();
        for file in [MAP_FILE, COUNTRIES_FILE, CONTINENTS_FILE, CORRELATION_FILE] {
            assert!(out.join(file).exists(), "{file} missing");
        }
        let text = std::fs::read_to_string(out.join(CONTINENTS_FILE)).unwrap();
        let continents: Value = serde_json::from_str(&text).unwrap();
        assert_eq!(continents[0]["continent"], "Europe");

        std::fs::remove_dir_all(&root).unwrap();
    }
}
