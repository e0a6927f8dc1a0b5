//! Cell edits.
//!
//! An edit never touches the dataset it is given: [`apply_edit`] returns a new
//! [`Dataset`] with one field of one row replaced. Callers regroup the result
//! before rendering again.

use crate::types::{Dataset, RowField};
use log::info;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EditError {
    #[error("Row {row} is out of range (dataset has {len} rows)")]
    RowOutOfRange { row: usize, len: usize },
}

/// A single-cell change, addressed by 1-based data row number.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CellEdit {
    pub row: usize,
    pub field: RowField,
    pub value: String,
}

/// Produce a new dataset with `edit` applied.
pub fn apply_edit(dataset: &Dataset, edit: &CellEdit) -> Result<Dataset, EditError> {
    let len = dataset.rows.len();
    if edit.row == 0 || edit.row > len {
        return Err(EditError::RowOutOfRange { row: edit.row, len });
    }

    let index = edit.row - 1;
    let mut rows = dataset.rows.clone();
    let before = rows[index].get(edit.field);
    rows[index] = rows[index].with_field(edit.field, &edit.value);
    info!(
        "row {}: {} '{}' -> '{}'",
        edit.row,
        edit.field,
        before,
        rows[index].get(edit.field)
    );
    Ok(Dataset::new(rows))
}
