use std::io::Cursor;

use calamine::{DataType, Reader, Xlsx, open_workbook_from_rs};

use super::IngestError;

/// Decode the first worksheet of an XLSX workbook into trimmed string rows.
pub fn read_rows(bytes: &[u8]) -> Result<Vec<Vec<String>>, IngestError> {
    let mut workbook: Xlsx<_> = open_workbook_from_rs(Cursor::new(bytes))?;

    let range = workbook
        .worksheet_range_at(0)
        .ok_or(IngestError::NoWorksheet)??;

    Ok(range
        .rows()
        .map(|row| row.iter().map(data_type_to_string).collect())
        .collect())
}

fn data_type_to_string(cell: &DataType) -> String {
    match cell {
        DataType::Empty => String::new(),
        DataType::String(s) => s.trim().to_string(),
        DataType::Float(f) => {
            if f.fract().abs() < f64::EPSILON {
                format!("{:.0}", f)
            } else {
                f.to_string()
            }
        }
        DataType::Int(v) => v.to_string(),
        DataType::Bool(v) => v.to_string(),
        DataType::Error(_) => String::new(),
        _ => cell.to_string().trim().to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_xlsxwriter::Workbook;

    #[test]
    fn reads_first_sheet_cells() {
        let mut workbook = Workbook::new();
        let sheet = workbook.add_worksheet();
        sheet.write_string(0, 0, "Cabin").unwrap();
        sheet.write_string(0, 1, "Person Names").unwrap();
        sheet.write_number(1, 0, 204.0).unwrap();
        sheet.write_string(1, 1, "  Jane Doe ").unwrap();
        let bytes = workbook.save_to_buffer().unwrap();

        let rows = read_rows(&bytes).unwrap();
        assert_eq!(rows[0], vec!["Cabin", "Person Names"]);
        assert_eq!(rows[1], vec!["204", "Jane Doe"]);
    }

    #[test]
    fn fractional_numbers_keep_decimals() {
        assert_eq!(data_type_to_string(&DataType::Float(2.5)), "2.5");
        assert_eq!(data_type_to_string(&DataType::Float(3.0)), "3");
    }

    #[test]
    fn garbage_bytes_are_an_error() {
        let err = read_rows(b"not a zip archive").unwrap_err();
        assert!(matches!(err, IngestError::Xlsx(_)));
    }
}
