//! Input ingestion: spreadsheet file → validated [`Dataset`].
//!
//! Reading happens in two steps:
//!
//! 1. A format reader ([`xlsx`] or [`csv`]) decodes the file into a
//!    [`RawTable`]: the header row plus every following row as trimmed
//!    strings. Readers know nothing about the roster schema.
//! 2. [`schema::validate`] checks the header row against the required columns
//!    and projects each record into a [`Row`](crate::types::Row).
//!
//! The format is chosen by file extension (`.xlsx` or `.csv`, case-insensitive).
//! The size ceiling is checked from file metadata before any bytes are read.

mod csv;
pub mod schema;
mod xlsx;

use crate::config::InputConfig;
use crate::types::Dataset;
use log::{debug, info};
use std::fs;
use std::path::Path;
use thiserror::Error;

pub use schema::{REQUIRED_COLUMNS, SchemaError, validate};

#[derive(Error, Debug)]
pub enum IngestError {
    #[error(transparent)]
    Schema(#[from] SchemaError),
    #[error("Unsupported file type: {0} (expected .xlsx or .csv)")]
    UnsupportedFileType(String),
    #[error("Input file is {size} bytes, larger than the {limit} byte limit")]
    OversizeInput { size: u64, limit: u64 },
    #[error("Workbook has no worksheets")]
    NoWorksheet,
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("XLSX error: {0}")]
    Xlsx(#[from] calamine::XlsxError),
    #[error("CSV error: {0}")]
    Csv(#[from] ::csv::Error),
}

/// Loosely-typed table as decoded from the input file.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawTable {
    /// First non-blank row of the sheet. Defines the observed schema.
    pub headers: Vec<String>,
    /// Every row after the header, blank rows removed.
    pub rows: Vec<Vec<String>>,
}

impl RawTable {
    /// Build a table from decoded rows: the first non-blank row becomes the
    /// header, remaining blank rows are dropped.
    pub fn from_rows(rows: Vec<Vec<String>>) -> Self {
        let mut rows = rows.into_iter().filter(|r| !is_blank_row(r));
        let headers = rows.next().unwrap_or_default();
        Self {
            headers,
            rows: rows.collect(),
        }
    }
}

fn is_blank_row(row: &[String]) -> bool {
    row.iter().all(|cell| cell.trim().is_empty())
}

/// Supported input encodings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputKind {
    Xlsx,
    Csv,
}

impl InputKind {
    /// Detect the input kind from the file extension.
    pub fn from_path(path: &Path) -> Result<Self, IngestError> {
        let ext = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| ext.to_lowercase())
            .unwrap_or_default();

        match ext.as_str() {
            "xlsx" => Ok(InputKind::Xlsx),
            "csv" => Ok(InputKind::Csv),
            "" => Err(IngestError::UnsupportedFileType(path.display().to_string())),
            other => Err(IngestError::UnsupportedFileType(format!(".{other}"))),
        }
    }
}

/// Decode already-loaded bytes of the given kind.
pub fn read_table_from_bytes(bytes: &[u8], kind: InputKind) -> Result<RawTable, IngestError> {
    let rows = match kind {
        InputKind::Xlsx => xlsx::read_rows(bytes)?,
        InputKind::Csv => csv::read_rows(bytes)?,
    };
    Ok(RawTable::from_rows(rows))
}

/// Read a spreadsheet file into a [`RawTable`], enforcing type and size limits.
pub fn read_table(path: &Path, max_bytes: u64) -> Result<RawTable, IngestError> {
    let kind = InputKind::from_path(path)?;
    let size = fs::metadata(path)?.len();
    if size > max_bytes {
        return Err(IngestError::OversizeInput {
            size,
            limit: max_bytes,
        });
    }
    let bytes = fs::read(path)?;
    debug!("read {} bytes from {}", bytes.len(), path.display());
    read_table_from_bytes(&bytes, kind)
}

/// Read and validate an input file in one step.
pub fn load(path: &Path, input: &InputConfig) -> Result<Dataset, IngestError> {
    let table = read_table(path, input.max_bytes)?;
    let dataset = validate(&table)?;
    info!(
        "ingested {} rows ({} occupied) from {}",
        dataset.total_row_count(),
        dataset.occupied_row_count(),
        path.display()
    );
    Ok(dataset)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;
    use tempfile::TempDir;

    fn strings(cells: &[&str]) -> Vec<String> {
        cells.iter().map(|c| c.to_string()).collect()
    }

    #[test]
    fn from_rows_skips_leading_blank_rows() {
        let table = RawTable::from_rows(vec![
            strings(&["", ""]),
            strings(&["Name", "Cabin"]),
            strings(&["Jane", "12"]),
            strings(&["  ", ""]),
            strings(&["John", "14"]),
        ]);
        assert_eq!(table.headers, strings(&["Name", "Cabin"]));
        assert_eq!(table.rows.len(), 2);
    }

    #[test]
    fn from_rows_empty_input() {
        let table = RawTable::from_rows(Vec::new());
        assert!(table.headers.is_empty());
        assert!(table.rows.is_empty());
    }

    #[test]
    fn input_kind_is_case_insensitive() {
        assert_eq!(
            InputKind::from_path(&PathBuf::from("roster.XLSX")).unwrap(),
            InputKind::Xlsx
        );
        assert_eq!(
            InputKind::from_path(&PathBuf::from("roster.csv")).unwrap(),
            InputKind::Csv
        );
    }

    #[test]
    fn input_kind_rejects_other_extensions() {
        let err = InputKind::from_path(&PathBuf::from("roster.xls")).unwrap_err();
        assert!(matches!(err, IngestError::UnsupportedFileType(ref ext) if ext == ".xls"));
        assert!(matches!(
            InputKind::from_path(&PathBuf::from("roster")),
            Err(IngestError::UnsupportedFileType(_))
        ));
    }

    #[test]
    fn read_table_rejects_oversize_before_reading() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("big.csv");
        fs::write(&path, "a,b\n1,2\n").unwrap();

        let err = read_table(&path, 4).unwrap_err();
        assert!(matches!(err, IngestError::OversizeInput { size: 8, limit: 4 }));
    }

    #[test]
    fn read_table_missing_file_is_io_error() {
        let tmp = TempDir::new().unwrap();
        let err = read_table(&tmp.path().join("nope.csv"), 1024).unwrap_err();
        assert!(matches!(err, IngestError::Io(_)));
    }

    #[test]
    fn load_fixture_csv() {
        let path = Path::new(env!("CARGO_MANIFEST_DIR")).join("fixtures/roster.csv");
        let dataset = load(&path, &InputConfig::default()).unwrap();
        assert_eq!(dataset.total_row_count(), 12);
        assert_eq!(dataset.occupied_row_count(), 10);
    }

    #[test]
    fn load_reports_schema_errors() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("bad.csv");
        fs::write(&path, "Person Names,Roles\nJane,Cook\n").unwrap();

        let err = load(&path, &InputConfig::default()).unwrap_err();
        assert!(matches!(
            err,
            IngestError::Schema(SchemaError::MissingColumns(_))
        ));
    }
}
