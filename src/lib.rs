//! # Muster Report
//!
//! Turns a muster-station roster spreadsheet into per-station reports for
//! print, PDF and XLSX. Each row of the roster is one person-slot with a
//! free-text muster-station field; occupied rows are grouped by the lifeboat
//! station code found in that field (`LB1` … `LB7` by default).
//!
//! # Architecture: Two-Stage Pipeline
//!
//! ```text
//! 1. Ingest   roster.xlsx  →  dataset.json   (parse + schema validation)
//! 2. Render   dataset.json →  dist/          (group → sort → style → HTML / PDF / XLSX)
//! ```
//!
//! The dataset manifest between the stages is plain JSON, so an ingested roster
//! can be inspected, edited with `muster-report edit`, and re-rendered with
//! different settings without reading the spreadsheet again.
//!
//! Inside the render stage every step is a pure function of its inputs:
//!
//! ```text
//! Dataset ──group──▶ GroupedDataset ──build_report──▶ Report ──renderer──▶ bytes
//!                                    (sort + style)
//! ```
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`ingest`] | Reads `.xlsx` / `.csv` input and validates the roster schema |
//! | [`station`] | Extracts the canonical `LB<digits>` code from a muster-station field |
//! | [`group`] | Partitions occupied rows into ordered station buckets |
//! | [`sort`] | Configurable, stable row ordering within a station |
//! | [`style`] | Resolves fill, weight and alignment for each row |
//! | [`report`] | Renderer-independent report model built from the grouped data |
//! | [`render`] | HTML, PDF and XLSX renderers behind the `ReportRenderer` trait |
//! | [`edit`] | Single-cell edits that produce a new dataset |
//! | [`config`] | `settings.toml` loading, validation and merging |
//! | [`types`] | Rows, station codes and the dataset manifest |
//! | [`output`] | CLI output formatting |
//!
//! # Design Decisions
//!
//! ## One Style Decision, Three Renderers
//!
//! Row styling is decided once, in [`style::resolve_style`], and travels with
//! the row inside the [`report::Report`]. Renderers translate the decision
//! into CSS, PDF fills or cell formats and never pick colors themselves, so
//! a highlighted row looks the same on paper, in the PDF and in the workbook.
//!
//! ## Settings Are a Value
//!
//! [`config::RenderSettings`] is loaded once and passed by reference into
//! every stage. Nothing in the pipeline mutates it; changing a setting means
//! loading a new value and re-running the stage.
//!
//! ## Unassigned Rows Are Dropped
//!
//! Occupied rows whose station field has no known `LB<digits>` code do not
//! appear in any report. They are still counted, and the CLI summary lists
//! how many there were.

pub mod config;
pub mod edit;
pub mod group;
pub mod ingest;
pub mod output;
pub mod render;
pub mod report;
pub mod sort;
pub mod station;
pub mod style;
pub mod types;

#[cfg(test)]
pub(crate) mod test_helpers;
