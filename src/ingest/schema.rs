//! Roster schema validation.
//!
//! The header row of the input is the observed schema. Every column in
//! [`REQUIRED_COLUMNS`] must appear there with exactly that text (case
//! matters); extra columns are ignored.

use super::RawTable;
use crate::types::{Dataset, Row, RowField, RowStatus};
use std::collections::HashMap;
use thiserror::Error;

/// Columns every roster must carry, in report order.
pub const REQUIRED_COLUMNS: [&str; 7] = [
    "Person Names",
    "Roles",
    "Companies",
    "Cabin",
    "Bunk",
    "MusterStation General Alarm primary",
    "Status",
];

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SchemaError {
    #[error("Input file is empty")]
    EmptyInput,
    #[error("Missing columns: {}", .0.join(", "))]
    MissingColumns(Vec<String>),
}

/// Check the table against the roster schema and project it into rows.
///
/// Empty input is reported before missing columns, so a header-only file is
/// `EmptyInput` even when its header is also wrong.
pub fn validate(table: &RawTable) -> Result<Dataset, SchemaError> {
    if table.rows.is_empty() {
        return Err(SchemaError::EmptyInput);
    }

    let mut positions: HashMap<&str, usize> = HashMap::new();
    for (i, header) in table.headers.iter().enumerate() {
        positions.entry(header.as_str()).or_insert(i);
    }

    let missing: Vec<String> = REQUIRED_COLUMNS
        .iter()
        .filter(|col| !positions.contains_key(*col))
        .map(|col| col.to_string())
        .collect();
    if !missing.is_empty() {
        return Err(SchemaError::MissingColumns(missing));
    }

    let cell = |record: &[String], field: RowField| -> String {
        positions
            .get(field.column_name())
            .and_then(|&i| record.get(i))
            .map(|v| v.trim().to_string())
            .unwrap_or_default()
    };

    let rows = table
        .rows
        .iter()
        .map(|record| Row {
            person_names: cell(record, RowField::PersonNames),
            role: cell(record, RowField::Role),
            company: cell(record, RowField::Company),
            cabin: cell(record, RowField::Cabin),
            bunk: cell(record, RowField::Bunk),
            muster_station_raw: cell(record, RowField::MusterStation),
            status: RowStatus::parse(&cell(record, RowField::Status)),
        })
        .collect();

    Ok(Dataset::new(rows))
}
