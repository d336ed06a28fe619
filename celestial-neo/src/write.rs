//! CSV and JSON reports of query results.
//!
//! Each row describes one close approach and the object it belongs to.
//! Unnamed objects are written with an empty name and unknown diameters as an
//! empty CSV field or a JSON `null`.

use serde::Serialize;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;
use tracing::info;

use crate::errors::{NeoError, NeoResult};
use crate::model::LinkedApproach;

const CSV_HEADER: &str =
    "datetime_utc,distance_au,velocity_km_s,designation,name,diameter_km,potentially_hazardous";

#[derive(Debug, Serialize)]
struct NeoRow<'a> {
    designation: &'a str,
    name: &'a str,
    diameter_km: Option<f64>,
    potentially_hazardous: bool,
}

#[derive(Debug, Serialize)]
struct ApproachRow<'a> {
    datetime_utc: String,
    distance_au: f64,
    velocity_km_s: f64,
    neo: NeoRow<'a>,
}

impl<'a> From<&LinkedApproach<'a>> for ApproachRow<'a> {
    fn from(linked: &LinkedApproach<'a>) -> Self {
        let approach = linked.approach();
        let neo = match linked.neo() {
            Some(neo) => NeoRow {
                designation: neo.designation(),
                name: neo.name().unwrap_or(""),
                diameter_km: neo.diameter_km(),
                potentially_hazardous: neo.hazardous(),
            },
            None => NeoRow {
                designation: approach.designation(),
                name: "",
                diameter_km: None,
                potentially_hazardous: false,
            },
        };
        Self {
            datetime_utc: approach.time_str(),
            distance_au: approach.distance(),
            velocity_km_s: approach.velocity(),
            neo,
        }
    }
}

/// Writes results as CSV to `path`, returning the number of rows written.
pub fn write_to_csv<'a, I>(results: I, path: impl AsRef<Path>) -> NeoResult<usize>
where
    I: IntoIterator<Item = LinkedApproach<'a>>,
{
    let path = path.as_ref();
    let file = File::create(path).map_err(|e| NeoError::io(path, e))?;
    let rows = write_csv(results, BufWriter::new(file)).map_err(|e| NeoError::io(path, e))?;
    info!(path = ?path, rows, "wrote csv report");
    Ok(rows)
}

/// Writes results as JSON to `path`, returning the number of rows written.
pub fn write_to_json<'a, I>(results: I, path: impl AsRef<Path>) -> NeoResult<usize>
where
    I: IntoIterator<Item = LinkedApproach<'a>>,
{
    let path = path.as_ref();
    let file = File::create(path).map_err(|e| NeoError::io(path, e))?;
    let rows = write_json(results, BufWriter::new(file)).map_err(|e| NeoError::io(path, e))?;
    info!(path = ?path, rows, "wrote json report");
    Ok(rows)
}

pub fn write_csv<'a, I, W>(results: I, mut writer: W) -> std::io::Result<usize>
where
    I: IntoIterator<Item = LinkedApproach<'a>>,
    W: Write,
{
    writeln!(writer, "{}", CSV_HEADER)?;
    let mut rows = 0;
    for linked in results {
        let row = ApproachRow::from(&linked);
        let diameter = row
            .neo
            .diameter_km
            .map(|d| d.to_string())
            .unwrap_or_default();
        writeln!(
            writer,
            "{},{},{},{},{},{},{}",
            row.datetime_utc,
            row.distance_au,
            row.velocity_km_s,
            csv_field(row.neo.designation),
            csv_field(row.neo.name),
            diameter,
            row.neo.potentially_hazardous
        )?;
        rows += 1;
    }
    writer.flush()?;
    Ok(rows)
}

pub fn write_json<'a, I, W>(results: I, mut writer: W) -> std::io::Result<usize>
where
    I: IntoIterator<Item = LinkedApproach<'a>>,
    W: Write,
{
    let rows: Vec<ApproachRow<'a>> = results.into_iter().map(|l| ApproachRow::from(&l)).collect();
    serde_json::to_writer_pretty(&mut writer, &rows).map_err(std::io::Error::from)?;
    writer.flush()?;
    Ok(rows.len())
}

fn csv_field(value: &str) -> std::borrow::Cow<'_, str> {
    if value.contains([',', '"', '\n']) {
        format!("\"{}\"", value.replace('"', "\"\"")).into()
    } else {
        value.into()
    }
}
