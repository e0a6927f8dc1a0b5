//! CLI output formatting for all pipeline stages.
//!
//! # Information-First Display
//!
//! Output is **information-centric, not file-centric**. Each station leads
//! with its positional index, code and head count; people follow as indented
//! lines with their cabin and bunk as context. File paths only appear where a
//! stage writes something.
//!
//! # Output Format
//!
//! ## Ingest / Check
//!
//! ```text
//! Source: roster.xlsx
//!
//! Stations
//! 001 LB1 (2 people)
//!     001 Jane Doe
//!         Cabin A12, Bunk A
//!     002 Ola Nordmann
//!         Cabin C3, Bunk A
//! 002 LB2 (empty)
//!
//! Totals
//!     Rows: 8
//!     Occupied: 7
//!     Assigned to a station: 6
//!     Unassigned: 1
//! ```
//!
//! ## Render
//!
//! ```text
//! Reports
//! 001 All Muster Stations (6 rows)
//! 002 Muster Station LB1 Report (2 rows)
//!
//! Artifacts
//!     html → dist/muster-station-reports-2024-05-01.html
//! ```
//!
//! # Architecture
//!
//! Each stage has a `format_*` function (returns `Vec<String>`) for testability
//! and a `print_*` wrapper that writes to stdout. Format functions are pure.

use crate::edit::CellEdit;
use crate::group::GroupedDataset;
use crate::render::RenderedArtifact;
use crate::report::Report;
use crate::types::Row;

// ============================================================================
// Shared entity display helpers
// ============================================================================

/// Format a 1-based positional index as 3-digit zero-padded.
fn format_index(pos: usize) -> String {
    format!("{:0>3}", pos)
}

/// Return indentation string: 4 spaces per depth level.
fn indent(depth: usize) -> String {
    "    ".repeat(depth)
}

/// Format an entity header: positional index + title, with a count detail.
///
/// ```text
/// 001 LB1 (5 people)
/// 002 LB2 (empty)
/// ```
fn entity_header(index: usize, title: &str, count: usize, unit: &str) -> String {
    match count {
        0 => format!("{} {} (empty)", format_index(index), title),
        n => format!("{} {} ({} {})", format_index(index), title, n, unit),
    }
}

/// Truncate text to `max` characters, appending `...` if truncated.
fn truncate(text: &str, max: usize) -> String {
    if text.chars().count() <= max {
        text.to_string()
    } else {
        let kept: String = text.chars().take(max).collect();
        format!("{}...", kept)
    }
}

fn person_lines(index: usize, row: &Row, depth: usize) -> Vec<String> {
    let name = if row.person_names.is_empty() {
        "(no name)".to_string()
    } else {
        truncate(&row.person_names, 48)
    };
    vec![
        format!("{}{} {}", indent(depth), format_index(index), name),
        format!(
            "{}Cabin {}, Bunk {}",
            indent(depth + 1),
            display_or_dash(&row.cabin),
            display_or_dash(&row.bunk)
        ),
    ]
}

fn display_or_dash(value: &str) -> &str {
    if value.is_empty() { "-" } else { value }
}

// ============================================================================
// Ingest / check output
// ============================================================================

/// Format the station breakdown of an ingested dataset.
pub fn format_ingest_output(grouped: &GroupedDataset, source: &str) -> Vec<String> {
    let mut lines = vec![format!("Source: {}", source), String::new()];

    lines.push("Stations".to_string());
    for (i, bucket) in grouped.buckets.iter().enumerate() {
        lines.push(entity_header(
            i + 1,
            bucket.station.as_str(),
            bucket.rows.len(),
            "people",
        ));
        for (j, row) in bucket.rows.iter().enumerate() {
            lines.extend(person_lines(j + 1, row, 1));
        }
    }

    lines.push(String::new());
    lines.push("Totals".to_string());
    lines.push(format!("{}Rows: {}", indent(1), grouped.total_row_count));
    lines.push(format!("{}Occupied: {}", indent(1), grouped.occupied_row_count));
    lines.push(format!(
        "{}Assigned to a station: {}",
        indent(1),
        grouped.assigned_row_count()
    ));
    lines.push(format!(
        "{}Unassigned: {}",
        indent(1),
        grouped.unassigned_row_count()
    ));
    lines
}

/// Print ingest output to stdout.
pub fn print_ingest_output(grouped: &GroupedDataset, source: &str) {
    for line in format_ingest_output(grouped, source) {
        println!("{}", line);
    }
}

// ============================================================================
// Render output
// ============================================================================

/// Format the report sections and the artifacts written for them.
pub fn format_render_output(report: &Report, artifacts: &[RenderedArtifact]) -> Vec<String> {
    let mut lines = vec!["Reports".to_string()];
    for (i, section) in report.sections().enumerate() {
        lines.push(entity_header(
            i + 1,
            &section.title,
            section.row_count(),
            "rows",
        ));
    }

    lines.push(String::new());
    lines.push("Artifacts".to_string());
    for artifact in artifacts {
        lines.push(format!(
            "{}{} \u{2192} {}",
            indent(1),
            artifact.format,
            artifact.path.display()
        ));
    }
    lines
}

/// Print render output to stdout.
pub fn print_render_output(report: &Report, artifacts: &[RenderedArtifact]) {
    for line in format_render_output(report, artifacts) {
        println!("{}", line);
    }
}

// ============================================================================
// Edit output
// ============================================================================

/// Format a one-line summary of an applied edit.
pub fn format_edit_output(edit: &CellEdit, before: &str, after: &str) -> Vec<String> {
    vec![format!(
        "Row {}: {} '{}' \u{2192} '{}'",
        format_index(edit.row),
        edit.field,
        before,
        after
    )]
}

/// Print edit output to stdout.
pub fn print_edit_output(edit: &CellEdit, before: &str, after: &str) {
    for line in format_edit_output(edit, before, after) {
        println!("{}", line);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::group::group;
    use crate::render::OutputFormat;
    use crate::render::tests::sample_report;
    use crate::station::default_station_codes;
    use crate::test_helpers::sample_dataset;
    use crate::types::RowField;
    use std::path::PathBuf;

    // =========================================================================
    // Helper tests
    // =========================================================================

    #[test]
    fn format_index_pads() {
        assert_eq!(format_index(1), "001");
        assert_eq!(format_index(42), "042");
        assert_eq!(format_index(123), "123");
    }

    #[test]
    fn indent_levels() {
        assert_eq!(indent(0), "");
        assert_eq!(indent(2), "        ");
    }

    #[test]
    fn entity_header_counts() {
        assert_eq!(entity_header(1, "LB1", 5, "people"), "001 LB1 (5 people)");
        assert_eq!(entity_header(7, "LB7", 0, "people"), "007 LB7 (empty)");
    }

    #[test]
    fn truncate_is_char_safe() {
        assert_eq!(truncate("Ærlig Østby", 20), "Ærlig Østby");
        assert_eq!(truncate("Ærlig Østby", 5), "Ærlig...");
    }

    // =========================================================================
    // Stage output tests
    // =========================================================================

    #[test]
    fn ingest_output_lists_stations_and_totals() {
        let grouped = group(&sample_dataset(), &default_station_codes());
        let lines = format_ingest_output(&grouped, "roster.xlsx");

        assert_eq!(lines[0], "Source: roster.xlsx");
        assert!(lines.contains(&"001 LB1 (2 people)".to_string()));
        assert!(lines.contains(&"    001 Jane Doe".to_string()));
        assert!(lines.contains(&"        Cabin A12, Bunk A".to_string()));
        assert!(lines.contains(&"007 LB7 (empty)".to_string()));
        assert!(lines.contains(&"    Unassigned: 1".to_string()));
        assert!(!lines.iter().any(|l| l.contains("Office Hand")));
    }

    #[test]
    fn render_output_lists_sections_and_artifacts() {
        let report = sample_report(&Default::default());
        let artifacts = vec![RenderedArtifact {
            format: OutputFormat::Pdf,
            path: PathBuf::from("dist/muster-station-reports-2024-05-01.pdf"),
            bytes: 10,
        }];
        let lines = format_render_output(&report, &artifacts);

        assert_eq!(lines[1], "001 All Muster Stations (6 rows)");
        assert_eq!(lines[2], "002 Muster Station LB1 Report (2 rows)");
        assert_eq!(
            lines.last().unwrap(),
            "    pdf \u{2192} dist/muster-station-reports-2024-05-01.pdf"
        );
    }

    #[test]
    fn edit_output_line() {
        let edit = CellEdit {
            row: 3,
            field: RowField::Cabin,
            value: "B7".to_string(),
        };
        let lines = format_edit_output(&edit, "B5", "B7");
        assert_eq!(lines, ["Row 003: cabin 'B5' \u{2192} 'B7'"]);
    }
}
