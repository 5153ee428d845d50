//! Exporters for query results.
//!
//! Both writers consume [`QueryMatch`] items, so a query can stream
//! straight into a file: `write_to_csv(limit(db.query(&filters), cap), path)`
//! after collecting the `Result` layer, or from any other match source.
//!
//! Missing values keep the dataset's conventions: an unnamed NEO exports as
//! an empty CSV field or JSON `null`, and an unknown diameter exports as
//! `NaN` in CSV. JSON cannot represent NaN, so serde_json writes `null`
//! there. An orphaned approach exports its own designation with no name, an
//! unknown diameter, and a `false` hazard flag.

use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

use anyhow::{Context, Result};
use serde::Serialize;

use crate::database::QueryMatch;

#[derive(Serialize)]
struct CsvRow<'a> {
    datetime_utc: String,
    distance_au: f64,
    velocity_km_s: f64,
    designation: &'a str,
    name: &'a str,
    diameter_km: f64,
    potentially_hazardous: bool,
}

#[derive(Serialize)]
struct JsonNeo<'a> {
    designation: &'a str,
    name: Option<&'a str>,
    diameter_km: f64,
    potentially_hazardous: bool,
}

#[derive(Serialize)]
struct JsonApproach<'a> {
    datetime_utc: String,
    distance_au: f64,
    velocity_km_s: f64,
    neo: JsonNeo<'a>,
}

/// Writes matches to a CSV file with one row per close approach.
///
/// The header is fixed:
/// `datetime_utc,distance_au,velocity_km_s,designation,name,diameter_km,potentially_hazardous`.
/// The header is written even when there are no matches.
pub fn write_to_csv<'a>(
    results: impl IntoIterator<Item = QueryMatch<'a>>,
    path: impl AsRef<Path>,
) -> Result<()> {
    let path = path.as_ref();
    let mut writer = csv::Writer::from_path(path)
        .with_context(|| format!("Failed to create CSV output file: {:?}", path))?;

    for m in results {
        let row = CsvRow {
            datetime_utc: m.approach.time_str(),
            distance_au: m.approach.distance,
            velocity_km_s: m.approach.velocity,
            designation: m
                .neo
                .map_or(m.approach.designation.as_str(), |neo| {
                    neo.designation.as_str()
                }),
            name: m.neo.and_then(|neo| neo.name.as_deref()).unwrap_or(""),
            diameter_km: m.neo.map_or(f64::NAN, |neo| neo.diameter),
            potentially_hazardous: m.neo.is_some_and(|neo| neo.hazardous),
        };
        writer
            .serialize(row)
            .with_context(|| format!("Failed to write CSV row to {:?}", path))?;
    }

    writer
        .flush()
        .with_context(|| format!("Failed to flush CSV output file: {:?}", path))
}

/// Writes matches to a JSON file as a pretty-printed array, each element
/// nesting the linked NEO's attributes under a `neo` key.
pub fn write_to_json<'a>(
    results: impl IntoIterator<Item = QueryMatch<'a>>,
    path: impl AsRef<Path>,
) -> Result<()> {
    let path = path.as_ref();
    let entries: Vec<JsonApproach<'_>> = results
        .into_iter()
        .map(|m| JsonApproach {
            datetime_utc: m.approach.time_str(),
            distance_au: m.approach.distance,
            velocity_km_s: m.approach.velocity,
            neo: JsonNeo {
                designation: m
                    .neo
                    .map_or(m.approach.designation.as_str(), |neo| {
                        neo.designation.as_str()
                    }),
                name: m.neo.and_then(|neo| neo.name.as_deref()),
                diameter_km: m.neo.map_or(f64::NAN, |neo| neo.diameter),
                potentially_hazardous: m.neo.is_some_and(|neo| neo.hazardous),
            },
        })
        .collect();

    let file = File::create(path)
        .with_context(|| format!("Failed to create JSON output file: {:?}", path))?;
    serde_json::to_writer_pretty(BufWriter::new(file), &entries)
        .with_context(|| format!("Failed to write JSON output file: {:?}", path))
}
