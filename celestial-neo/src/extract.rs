//! Loaders for NEO (CSV) and close-approach (JSON) data files.
//!
//! Both loaders resolve their columns by name once, from the CSV header or
//! the JSON `fields` list, and then scan rows by position.
//!
//! # NEO CSV
//!
//! Required columns: `pdes`, `name`, `diameter`, `pha`. An empty `name` means
//! the object is unnamed, an empty `diameter` means unknown (NaN), and a `pha`
//! of `Y` marks the object as potentially hazardous.
//!
//! # Close-approach JSON
//!
//! ```json
//! { "fields": ["des", "orbit_id", "jd", "cd", "dist", "v_rel"],
//!   "data": [["2020 AB", "1", "2458849.5", "2020-Jan-01 00:00", "0.5", "10.0"]] }
//! ```
//!
//! Required fields: `des`, `cd`, `dist`, `v_rel`.

use chrono::NaiveDateTime;
use serde::Deserialize;
use serde_json::Value as JsonValue;
use std::fs::File;
use std::io::{BufRead, BufReader, Read};
use std::path::Path;
use tracing::debug;

use crate::errors::{NeoError, NeoResult};
use crate::model::{CloseApproach, NearEarthObject};

const NEO_CSV: &str = "neo csv";
const CAD_JSON: &str = "close approach json";

const CAD_TIME_FORMAT: &str = "%Y-%b-%d %H:%M";
const OUTPUT_TIME_FORMAT: &str = "%Y-%m-%d %H:%M";

/// Parses a close-approach timestamp such as `2020-Jan-01 00:00`.
pub fn cd_to_datetime(calendar_date: &str) -> NeoResult<NaiveDateTime> {
    parse_cd(calendar_date, 0)
}

fn parse_cd(calendar_date: &str, record: usize) -> NeoResult<NaiveDateTime> {
    NaiveDateTime::parse_from_str(calendar_date.trim(), CAD_TIME_FORMAT).map_err(|e| {
        NeoError::parse(
            CAD_JSON,
            record,
            format!("bad time '{}': {}", calendar_date, e),
        )
    })
}

/// Formats a timestamp as `YYYY-MM-DD HH:MM`.
pub fn datetime_to_str(dt: &NaiveDateTime) -> String {
    dt.format(OUTPUT_TIME_FORMAT).to_string()
}

/// Reads near-Earth objects from a CSV file.
pub fn load_neos(path: impl AsRef<Path>) -> NeoResult<Vec<NearEarthObject>> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|e| NeoError::io(path, e))?;
    let neos = parse_neos(BufReader::new(file)).map_err(|e| match e {
        NeoError::Io { source, .. } => NeoError::io(path, source),
        other => other,
    })?;
    debug!(path = ?path, count = neos.len(), "loaded near-Earth objects");
    Ok(neos)
}

/// Reads near-Earth objects from CSV text.
pub fn parse_neos<R: BufRead>(reader: R) -> NeoResult<Vec<NearEarthObject>> {
    let mut lines = reader.lines();

    let header = match lines.next() {
        Some(line) => line.map_err(|e| NeoError::io(Path::new("<neo csv>"), e))?,
        None => return Err(NeoError::parse(NEO_CSV, 0, "empty input")),
    };
    let columns = split_csv_line(&header);
    let pdes_col = column_index(&columns, "pdes")?;
    let name_col = column_index(&columns, "name")?;
    let diameter_col = column_index(&columns, "diameter")?;
    let pha_col = column_index(&columns, "pha")?;
    let width = columns.len();

    let mut neos = Vec::new();
    for (line_num, line) in lines.enumerate() {
        let record = line_num + 2;
        let line = line.map_err(|e| NeoError::io(Path::new("<neo csv>"), e))?;
        if line.trim().is_empty() {
            continue;
        }

        let fields = split_csv_line(&line);
        if fields.len() < width {
            return Err(NeoError::parse(
                NEO_CSV,
                record,
                format!("expected {} fields, found {}", width, fields.len()),
            ));
        }

        let designation = fields[pdes_col].trim();
        if designation.is_empty() {
            return Err(NeoError::parse(NEO_CSV, record, "empty designation"));
        }

        let diameter = parse_diameter(&fields[diameter_col])
            .map_err(|message| NeoError::parse(NEO_CSV, record, message))?;

        let name = fields[name_col].trim();
        neos.push(NearEarthObject::new(
            designation,
            (!name.is_empty()).then(|| name.to_string()),
            diameter,
            fields[pha_col].trim() == "Y",
        ));
    }

    Ok(neos)
}

/// Reads close approaches from a JSON file.
pub fn load_approaches(path: impl AsRef<Path>) -> NeoResult<Vec<CloseApproach>> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|e| NeoError::io(path, e))?;
    let approaches = parse_approaches(BufReader::new(file))?;
    debug!(path = ?path, count = approaches.len(), "loaded close approaches");
    Ok(approaches)
}

#[derive(Debug, Deserialize)]
struct CadDocument {
    fields: Vec<String>,
    #[serde(default)]
    data: Vec<Vec<JsonValue>>,
}

/// Reads close approaches from JSON text.
pub fn parse_approaches<R: Read>(reader: R) -> NeoResult<Vec<CloseApproach>> {
    let doc: CadDocument = serde_json::from_reader(reader)?;

    let des = field_index(&doc.fields, "des")?;
    let cd = field_index(&doc.fields, "cd")?;
    let dist = field_index(&doc.fields, "dist")?;
    let v_rel = field_index(&doc.fields, "v_rel")?;

    doc.data
        .iter()
        .enumerate()
        .map(|(index, row)| -> NeoResult<CloseApproach> {
            let record = index + 1;
            let cell = |i: usize, label: &str| {
                row.get(i)
                    .and_then(json_text)
                    .ok_or_else(|| NeoError::parse(CAD_JSON, record, format!("missing {}", label)))
            };

            let designation = cell(des, "des")?;
            let time = parse_cd(&cell(cd, "cd")?, record)?;
            let distance = parse_number(&cell(dist, "dist")?)
                .ok_or_else(|| NeoError::parse(CAD_JSON, record, "bad dist"))?;
            let velocity = parse_number(&cell(v_rel, "v_rel")?)
                .ok_or_else(|| NeoError::parse(CAD_JSON, record, "bad v_rel"))?;

            Ok(CloseApproach::new(designation, time, distance, velocity))
        })
        .collect()
}

fn json_text(value: &JsonValue) -> Option<String> {
    match value {
        JsonValue::String(s) => Some(s.clone()),
        JsonValue::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

fn parse_number(s: &str) -> Option<f64> {
    s.trim().parse::<f64>().ok()
}

fn parse_diameter(s: &str) -> Result<f64, String> {
    let s = s.trim();
    if s.is_empty() {
        return Ok(f64::NAN);
    }
    s.parse::<f64>()
        .map_err(|_| format!("bad diameter '{}'", s))
}

fn column_index(columns: &[String], name: &str) -> NeoResult<usize> {
    columns
        .iter()
        .position(|c| c.trim() == name)
        .ok_or_else(|| NeoError::missing_field(name, NEO_CSV))
}

fn field_index(fields: &[String], name: &str) -> NeoResult<usize> {
    fields
        .iter()
        .position(|f| f == name)
        .ok_or_else(|| NeoError::missing_field(name, CAD_JSON))
}

/// Splits one CSV line, honoring double-quoted fields and `""` escapes.
fn split_csv_line(line: &str) -> Vec<String> {
    let mut fields = Vec::new();
    let mut field = String::new();
    let mut in_quotes = false;
    let mut chars = line.trim_end_matches('\r').chars().peekable();

    while let Some(c) = chars.next() {
        match (c, in_quotes) {
            ('"', true) if chars.peek() == Some(&'"') => {
                field.push('"');
                chars.next();
            }
            ('"', _) => in_quotes = !in_quotes,
            (',', false) => fields.push(std::mem::take(&mut field)),
            _ => field.push(c),
        }
    }
    fields.push(field);
    fields
}
