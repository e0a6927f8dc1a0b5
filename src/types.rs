//! Shared types used across all pipeline stages.
//!
//! [`Dataset`] is serialized to JSON between the ingest and render stages
//! (`dataset.json` in the temp directory), so every field here must round-trip
//! through serde unchanged.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Occupancy status of a roster row.
///
/// Only [`RowStatus::Occupied`] rows take part in grouping. Any status text
/// that is neither "occupied" nor "vacant" is kept verbatim so it survives a
/// round-trip through the dataset manifest.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum RowStatus {
    Occupied,
    Vacant,
    Other(String),
}

impl RowStatus {
    /// Case-insensitive, whitespace-trimmed parse. Never fails.
    pub fn parse(raw: &str) -> Self {
        let trimmed = raw.trim();
        if trimmed.eq_ignore_ascii_case("occupied") {
            RowStatus::Occupied
        } else if trimmed.eq_ignore_ascii_case("vacant") {
            RowStatus::Vacant
        } else {
            RowStatus::Other(trimmed.to_string())
        }
    }

    pub fn is_occupied(&self) -> bool {
        matches!(self, RowStatus::Occupied)
    }
}

impl From<String> for RowStatus {
    fn from(raw: String) -> Self {
        RowStatus::parse(&raw)
    }
}

impl From<RowStatus> for String {
    fn from(status: RowStatus) -> Self {
        status.to_string()
    }
}

impl fmt::Display for RowStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RowStatus::Occupied => f.write_str("Occupied"),
            RowStatus::Vacant => f.write_str("Vacant"),
            RowStatus::Other(raw) => f.write_str(raw),
        }
    }
}

/// One person-slot record.
///
/// Rows are never mutated in place: an edit goes through [`Row::with_field`]
/// and produces a new value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Row {
    pub person_names: String,
    pub role: String,
    pub company: String,
    pub cabin: String,
    pub bunk: String,
    /// Free-text muster-station field, e.g. `"LB5 - Deck 3 PS"`.
    pub muster_station_raw: String,
    pub status: RowStatus,
}

impl Row {
    /// Text value of a single field.
    pub fn get(&self, field: RowField) -> String {
        match field {
            RowField::PersonNames => self.person_names.clone(),
            RowField::Role => self.role.clone(),
            RowField::Company => self.company.clone(),
            RowField::Cabin => self.cabin.clone(),
            RowField::Bunk => self.bunk.clone(),
            RowField::MusterStation => self.muster_station_raw.clone(),
            RowField::Status => self.status.to_string(),
        }
    }

    /// Copy of this row with one field replaced.
    pub fn with_field(&self, field: RowField, value: &str) -> Row {
        let mut row = self.clone();
        let value = value.trim().to_string();
        match field {
            RowField::PersonNames => row.person_names = value,
            RowField::Role => row.role = value,
            RowField::Company => row.company = value,
            RowField::Cabin => row.cabin = value,
            RowField::Bunk => row.bunk = value,
            RowField::MusterStation => row.muster_station_raw = value,
            RowField::Status => row.status = RowStatus::parse(&value),
        }
        row
    }
}

/// Logical fields of a [`Row`], each backed by one required input column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RowField {
    PersonNames,
    Role,
    Company,
    Cabin,
    Bunk,
    MusterStation,
    Status,
}

impl RowField {
    pub const ALL: [RowField; 7] = [
        RowField::PersonNames,
        RowField::Role,
        RowField::Company,
        RowField::Cabin,
        RowField::Bunk,
        RowField::MusterStation,
        RowField::Status,
    ];

    /// Exact header text of the input column this field is read from.
    pub fn column_name(self) -> &'static str {
        match self {
            RowField::PersonNames => "Person Names",
            RowField::Role => "Roles",
            RowField::Company => "Companies",
            RowField::Cabin => "Cabin",
            RowField::Bunk => "Bunk",
            RowField::MusterStation => "MusterStation General Alarm primary",
            RowField::Status => "Status",
        }
    }

    fn cli_name(self) -> &'static str {
        match self {
            RowField::PersonNames => "person-names",
            RowField::Role => "role",
            RowField::Company => "company",
            RowField::Cabin => "cabin",
            RowField::Bunk => "bunk",
            RowField::MusterStation => "muster-station",
            RowField::Status => "status",
        }
    }
}

impl fmt::Display for RowField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.cli_name())
    }
}

impl FromStr for RowField {
    type Err = String;

    /// Accepts the kebab-case field name or the exact input column name.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        RowField::ALL
            .into_iter()
            .find(|field| field.cli_name() == s || field.column_name() == s)
            .ok_or_else(|| {
                let names: Vec<&str> = RowField::ALL.iter().map(|f| f.cli_name()).collect();
                format!("unknown field '{s}' (expected one of: {})", names.join(", "))
            })
    }
}

/// Canonical lifeboat station token: `"LB"` followed by digits.
///
/// Constructed through [`crate::station::extract_station_code`], which is the
/// only place that knows the pattern.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StationCode(pub(crate) String);

impl StationCode {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for StationCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Parsed roster: the ordered list of rows from one input file.
///
/// Counts are derived from `rows` on demand, so they cannot drift from the
/// data they describe.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Dataset {
    pub rows: Vec<Row>,
}

impl Dataset {
    pub fn new(rows: Vec<Row>) -> Self {
        Self { rows }
    }

    pub fn total_row_count(&self) -> usize {
        self.rows.len()
    }

    pub fn occupied_row_count(&self) -> usize {
        self.rows.iter().filter(|r| r.status.is_occupied()).count()
    }
}

/// Dataset manifest handed from `ingest` to `render` via the temp directory.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatasetManifest {
    /// Input file the rows were read from, for display only.
    pub source: String,
    pub dataset: Dataset,
}
