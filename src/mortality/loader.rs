//! CSV-based mortality table loader
//!
//! Source files carry at minimum an age column and an lx column. Header
//! names are resolved case-insensitively with the aliases seen in the TMI
//! data exports (`usia` for age). Substituting a synthetic table on load
//! failure is the caller's decision, never done here.

use std::path::Path;

use crate::error::{PensionError, Result};
use crate::mortality::{MortalityRecord, MortalityTable};

/// Header aliases accepted for the age column
const AGE_HEADERS: &[&str] = &["age", "usia"];

/// Header aliases accepted for the survivor-count column
const LX_HEADERS: &[&str] = &["lx", "survivors"];

/// Load a mortality table from a CSV file
pub fn load_table<P: AsRef<Path>>(path: P) -> Result<MortalityTable> {
    let path = path.as_ref();
    let file = std::fs::File::open(path).map_err(|err| match err.kind() {
        std::io::ErrorKind::NotFound => PensionError::NotFound(path.display().to_string()),
        _ => PensionError::DataFormat(format!("{}: {}", path.display(), err)),
    })?;
    load_table_from_reader(file)
}

/// Load a mortality table from any reader (e.g., string buffer)
pub fn load_table_from_reader<R: std::io::Read>(reader: R) -> Result<MortalityTable> {
    let mut csv_reader = csv::Reader::from_reader(reader);

    let headers = csv_reader
        .headers()
        .map_err(|err| PensionError::DataFormat(err.to_string()))?
        .clone();

    let age_idx = find_column(&headers, AGE_HEADERS)
        .ok_or_else(|| PensionError::DataFormat("age column not found".into()))?;
    let lx_idx = find_column(&headers, LX_HEADERS)
        .ok_or_else(|| PensionError::DataFormat("lx column not found".into()))?;

    let mut records = Vec::new();
    for (row, result) in csv_reader.records().enumerate() {
        let record = result.map_err(|err| PensionError::DataFormat(err.to_string()))?;

        let age: u32 = parse_field(&record, age_idx, row, "age")?;
        let lx: f64 = parse_field(&record, lx_idx, row, "lx")?;

        records.push(MortalityRecord { age, lx });
    }

    MortalityTable::from_records(records)
}

fn find_column(headers: &csv::StringRecord, aliases: &[&str]) -> Option<usize> {
    headers
        .iter()
        .position(|name| aliases.iter().any(|alias| name.trim().eq_ignore_ascii_case(alias)))
}

fn parse_field<T: std::str::FromStr>(
    record: &csv::StringRecord,
    idx: usize,
    row: usize,
    name: &str,
) -> Result<T> {
    let raw = record
        .get(idx)
        .ok_or_else(|| PensionError::DataFormat(format!("row {}: missing {} field", row + 1, name)))?;
    raw.trim().parse().map_err(|_| {
        PensionError::DataFormat(format!("row {}: non-numeric {} value '{}'", row + 1, name, raw))
    })
}
