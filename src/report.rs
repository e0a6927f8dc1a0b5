//! Renderer-independent report model.
//!
//! [`build_report`] runs the sorter and the style resolver once per non-empty
//! station and packs the result into a [`Report`]. Renderers only translate
//! this value into their output format; none of them sorts rows or picks
//! colors on its own.
//!
//! ```text
//! Report
//! ├── overview          "All Muster Stations": one block per station
//! └── stations[]        "Muster Station LB1 Report": a single block each
//!     └── blocks[]
//!         └── rows[]    six display cells + StyleDecision
//! ```

use crate::config::RenderSettings;
use crate::group::GroupedDataset;
use crate::sort::sort_rows;
use crate::station::station_label;
use crate::style::{StyleDecision, resolve_style};
use crate::types::{Row, StationCode};
use chrono::NaiveDateTime;
use serde::Serialize;

/// Output columns shared by every renderer, in order.
pub const REPORT_COLUMNS: [&str; 6] = [
    "Person Names",
    "Roles",
    "Companies",
    "Cabin",
    "Bunk",
    "LB Station",
];

/// Document title of the whole report.
pub const REPORT_TITLE: &str = "Muster Station Reports";
pub const OVERVIEW_TITLE: &str = "All Muster Stations";

/// Title of a single-station report.
pub fn station_title(station: &StationCode) -> String {
    format!("Muster Station {station} Report")
}

/// Counts shown in report summaries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ReportSummary {
    pub total: usize,
    pub occupied: usize,
    pub assigned: usize,
}

/// One rendered data row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReportRow {
    pub cells: [String; 6],
    pub style: StyleDecision,
}

impl ReportRow {
    fn from_row(row: &Row, style: StyleDecision) -> Self {
        Self {
            cells: [
                row.person_names.clone(),
                row.role.clone(),
                row.company.clone(),
                row.cabin.clone(),
                row.bunk.clone(),
                station_label(&row.muster_station_raw),
            ],
            style,
        }
    }
}

/// Sorted, styled rows of one station.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Block {
    pub station: StationCode,
    pub title: String,
    pub rows: Vec<ReportRow>,
}

/// A titled group of blocks: the overview, or one station's report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Section {
    pub title: String,
    pub blocks: Vec<Block>,
}

impl Section {
    pub fn row_count(&self) -> usize {
        self.blocks.iter().map(|b| b.rows.len()).sum()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Report {
    pub title: String,
    /// Formatted timestamp for the "Generated:" line.
    pub generated: String,
    /// Date used in artifact file names (`YYYY-MM-DD`).
    pub file_date: String,
    pub summary: ReportSummary,
    pub overview: Section,
    pub stations: Vec<Section>,
}

impl Report {
    pub fn is_empty(&self) -> bool {
        self.stations.is_empty()
    }

    /// Overview first, then each station.
    pub fn sections(&self) -> impl Iterator<Item = &Section> {
        std::iter::once(&self.overview).chain(self.stations.iter())
    }

    pub fn generated_line(&self) -> String {
        format!("Generated: {}", self.generated)
    }
}

/// Sort and style every non-empty station of `grouped`.
///
/// The zebra index restarts at 0 for each station.
pub fn build_report(
    grouped: &GroupedDataset,
    settings: &RenderSettings,
    generated_at: NaiveDateTime,
) -> Report {
    let blocks: Vec<Block> = grouped
        .non_empty()
        .map(|bucket| {
            let sorted = sort_rows(&bucket.rows, &settings.sort);
            let rows = sorted
                .iter()
                .enumerate()
                .map(|(i, row)| ReportRow::from_row(row, resolve_style(row, i, settings)))
                .collect();
            Block {
                station: bucket.station.clone(),
                title: station_title(&bucket.station),
                rows,
            }
        })
        .collect();

    let stations = blocks
        .iter()
        .map(|block| Section {
            title: block.title.clone(),
            blocks: vec![block.clone()],
        })
        .collect();

    Report {
        title: REPORT_TITLE.to_string(),
        generated: settings.timestamps.format(generated_at),
        file_date: generated_at.format("%Y-%m-%d").to_string(),
        summary: ReportSummary {
            total: grouped.total_row_count,
            occupied: grouped.occupied_row_count,
            assigned: grouped.assigned_row_count(),
        },
        overview: Section {
            title: OVERVIEW_TITLE.to_string(),
            blocks,
        },
        stations,
    }
}
