//! Loaders for the NASA NEO and close-approach datasets.
//!
//! Two file shapes feed the catalog:
//!
//! - `neos.csv` — one NEO per row; only the `pdes`, `name`, `diameter`, and
//!   `pha` columns are read, everything else is ignored.
//! - `cad.json` — the close-approach query API shape: a `fields` array
//!   naming the columns and a `data` array of rows, every cell a string.
//!
//! Both loaders fail on the first malformed row, with the row number
//! attached to the error.

use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use anyhow::{Context, Result};
use serde::Deserialize;
use serde_json::Value;

use crate::errors::{NeoError, NeoResult};
use crate::model::{CloseApproach, NearEarthObject};
use crate::parsing::parse_approach_time;

/// The NEO CSV columns the catalog consumes. Unlisted columns are skipped
/// by the reader.
#[derive(Debug, Deserialize)]
struct NeoRow {
    pdes: String,
    name: String,
    diameter: String,
    pha: String,
}

/// Loads NEO records from a `neos.csv`-shaped file.
///
/// # Errors
/// Fails if the file cannot be opened, a row is structurally malformed, or
/// a non-empty `diameter` does not parse as a number.
pub fn load_neos(path: impl AsRef<Path>) -> Result<Vec<NearEarthObject>> {
    let path = path.as_ref();
    let mut reader = csv::Reader::from_path(path)
        .with_context(|| format!("Failed to open NEO dataset: {:?}", path))?;

    let mut neos = Vec::new();
    for (row_idx, result) in reader.deserialize().enumerate() {
        let row: NeoRow =
            result.with_context(|| format!("Malformed NEO row {}", row_idx + 1))?;
        let neo =
            neo_from_row(row).with_context(|| format!("Invalid NEO row {}", row_idx + 1))?;
        neos.push(neo);
    }
    Ok(neos)
}

fn neo_from_row(row: NeoRow) -> NeoResult<NearEarthObject> {
    let diameter = match row.diameter.as_str() {
        "" => None,
        text => Some(
            text.parse::<f64>()
                .map_err(|e| NeoError::invalid_record("diameter", &e.to_string()))?,
        ),
    };
    let name = (!row.name.is_empty()).then_some(row.name);
    let hazardous = row.pha == "Y";
    Ok(NearEarthObject::new(row.pdes, name, diameter, hazardous))
}

/// The `cad.json` container: parallel column-name and row arrays.
#[derive(Debug, Deserialize)]
struct CadDataset {
    fields: Vec<String>,
    data: Vec<Vec<Value>>,
}

/// Loads close-approach records from a `cad.json`-shaped file.
///
/// Column positions are taken from the `fields` array, so the dataset may
/// order or extend its columns freely as long as `des`, `cd`, `dist`, and
/// `v_rel` are present.
///
/// # Errors
/// Fails if the file cannot be opened or parsed, a required column is
/// missing, or a row's timestamp/number cells do not convert.
pub fn load_approaches(path: impl AsRef<Path>) -> Result<Vec<CloseApproach>> {
    let path = path.as_ref();
    let file = File::open(path)
        .with_context(|| format!("Failed to open close-approach dataset: {:?}", path))?;
    let dataset: CadDataset = serde_json::from_reader(BufReader::new(file))
        .with_context(|| format!("Failed to parse close-approach dataset: {:?}", path))?;

    let des = column(&dataset.fields, "des")?;
    let cd = column(&dataset.fields, "cd")?;
    let dist = column(&dataset.fields, "dist")?;
    let v_rel = column(&dataset.fields, "v_rel")?;

    let mut approaches = Vec::with_capacity(dataset.data.len());
    for (row_idx, row) in dataset.data.iter().enumerate() {
        let approach = approach_from_row(row, des, cd, dist, v_rel)
            .with_context(|| format!("Invalid close-approach row {}", row_idx + 1))?;
        approaches.push(approach);
    }
    Ok(approaches)
}

fn column(fields: &[String], name: &str) -> Result<usize> {
    fields
        .iter()
        .position(|field| field == name)
        .with_context(|| format!("Close-approach dataset is missing the '{}' field", name))
}

fn approach_from_row(
    row: &[Value],
    des: usize,
    cd: usize,
    dist: usize,
    v_rel: usize,
) -> NeoResult<CloseApproach> {
    let designation = string_cell(row, des, "des")?;
    let time = parse_approach_time(string_cell(row, cd, "cd")?)?;
    let distance = float_cell(row, dist, "dist")?;
    let velocity = float_cell(row, v_rel, "v_rel")?;
    Ok(CloseApproach::new(designation, time, distance, velocity))
}

fn string_cell<'a>(row: &'a [Value], idx: usize, field: &str) -> NeoResult<&'a str> {
    row.get(idx)
        .and_then(Value::as_str)
        .ok_or_else(|| NeoError::invalid_record(field, "expected a string value"))
}

fn float_cell(row: &[Value], idx: usize, field: &str) -> NeoResult<f64> {
    let text = string_cell(row, idx, field)?;
    text.parse::<f64>()
        .map_err(|e| NeoError::invalid_record(field, &e.to_string()))
}
