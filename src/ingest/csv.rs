use csv::ReaderBuilder;

use super::IngestError;

/// Decode comma-separated bytes into trimmed string rows.
///
/// The header is not treated specially here; [`super::RawTable::from_rows`]
/// picks it out. Rows may have differing lengths.
pub fn read_rows(bytes: &[u8]) -> Result<Vec<Vec<String>>, IngestError> {
    let mut reader = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(bytes);

    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record?;
        rows.push(record.iter().map(clean_cell).collect());
    }
    Ok(rows)
}

fn clean_cell(cell: &str) -> String {
    cell.trim_start_matches('\u{feff}').trim().to_string()
}
