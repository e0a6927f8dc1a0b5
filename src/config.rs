//! Report settings.
//!
//! Handles loading, validating, and merging `settings.toml`. Stock defaults
//! are serialized to a TOML value and the user file is merged on top, so a
//! settings file only needs the keys it wants to change.
//!
//! ## Settings Options
//!
//! ```toml
//! # All options are optional - defaults shown below
//!
//! [stations]
//! codes = ["LB1", "LB2", "LB3", "LB4", "LB5", "LB6", "LB7"]
//!
//! [input]
//! max_bytes = 10485760      # Input file size ceiling (10 MiB)
//!
//! [layout]
//! orientation = "portrait"  # portrait | landscape
//! page_margin = 1.0         # Inches, 0.25-2.0
//! cell_padding = 3          # Pixels
//! table_spacing = 10        # Space between header block and table
//! row_height = 35           # Minimum data row height in pixels
//!
//! [layout.column_widths]    # Pixels; unlisted columns get 100
//! "Person Names" = 200
//!
//! [typography]
//! font_family = "arial"     # arial | helvetica | times | courier | verdana
//! font_size = 10            # Points, 6-16
//! text_align = "left"       # left | center | right
//!
//! [colors]
//! color_print = true
//! primary_row = "white"
//! alternate_row = "light-blue"
//! nortrans = "light-gray"
//! nortrans_bold = true
//!
//! [timestamps]
//! date_format = "YYYY-MM-DD"
//! time_format = "24h"
//!
//! [sort]
//! by = "original"           # original | name | cabin | company | role
//! direction = "asc"         # asc | desc
//!
//! [highlight]
//! multiple_names = true
//! ```
//!
//! Unknown keys are rejected to catch typos early. Out-of-range values are
//! rejected at load time, never at render time.

use crate::station::extract_station_code;
use crate::types::StationCode;
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashSet};
use std::fs;
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("Settings validation error: {0}")]
    Validation(String),
}

/// Immutable settings snapshot passed by reference into every stage.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RenderSettings {
    pub stations: StationsConfig,
    pub input: InputConfig,
    pub layout: LayoutConfig,
    pub typography: TypographyConfig,
    pub colors: ColorConfig,
    pub timestamps: TimestampConfig,
    pub sort: SortConfig,
    pub highlight: HighlightConfig,
}

impl RenderSettings {
    /// Validate settings values are within acceptable ranges.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.stations.validate()?;
        if self.input.max_bytes == 0 {
            return Err(ConfigError::Validation(
                "input.max_bytes must be greater than 0".into(),
            ));
        }
        self.layout.validate()?;
        if !(6..=16).contains(&self.typography.font_size) {
            return Err(ConfigError::Validation(
                "typography.font_size must be 6-16".into(),
            ));
        }
        Ok(())
    }
}

// =============================================================================
// Stations and input
// =============================================================================

/// Station set to group by, in output order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct StationsConfig {
    pub codes: Vec<String>,
}

impl Default for StationsConfig {
    fn default() -> Self {
        Self {
            codes: (1..=7).map(|n| format!("LB{n}")).collect(),
        }
    }
}

impl StationsConfig {
    /// Canonical station codes. Entries without a station token are skipped;
    /// [`StationsConfig::validate`] rejects those at load time.
    pub fn station_codes(&self) -> Vec<StationCode> {
        self.codes
            .iter()
            .filter_map(|c| extract_station_code(c))
            .collect()
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.codes.is_empty() {
            return Err(ConfigError::Validation(
                "stations.codes must not be empty".into(),
            ));
        }
        let mut seen = HashSet::new();
        for raw in &self.codes {
            let code = extract_station_code(raw).ok_or_else(|| {
                ConfigError::Validation(format!(
                    "stations.codes entry '{raw}' is not a station code (expected LB<digits>)"
                ))
            })?;
            if !seen.insert(code.clone()) {
                return Err(ConfigError::Validation(format!(
                    "stations.codes lists {code} more than once"
                )));
            }
        }
        Ok(())
    }
}

/// Input file limits.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct InputConfig {
    /// Files larger than this are rejected before reading.
    pub max_bytes: u64,
}

impl Default for InputConfig {
    fn default() -> Self {
        Self {
            max_bytes: 10 * 1024 * 1024,
        }
    }
}

// =============================================================================
// Layout and typography
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Orientation {
    #[default]
    Portrait,
    Landscape,
}

impl Orientation {
    pub fn as_str(self) -> &'static str {
        match self {
            Orientation::Portrait => "portrait",
            Orientation::Landscape => "landscape",
        }
    }
}

/// Page and table geometry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LayoutConfig {
    pub orientation: Orientation,
    /// Page margin in inches.
    pub page_margin: f64,
    /// Cell padding in pixels.
    pub cell_padding: u32,
    /// Gap between the header block and the table, in pixels (millimetres in PDF).
    pub table_spacing: u32,
    /// Minimum data row height in pixels.
    pub row_height: u32,
    /// Column widths in pixels, keyed by output column name.
    pub column_widths: BTreeMap<String, u32>,
}

/// Width used for any output column missing from `column_widths`.
pub const DEFAULT_COLUMN_WIDTH: u32 = 100;

impl Default for LayoutConfig {
    fn default() -> Self {
        let column_widths = [
            ("Person Names", 200),
            ("Roles", 150),
            ("Companies", 120),
            ("Cabin", 80),
            ("Bunk", 60),
            ("LB Station", 100),
        ]
        .into_iter()
        .map(|(name, width)| (name.to_string(), width))
        .collect();

        Self {
            orientation: Orientation::Portrait,
            page_margin: 1.0,
            cell_padding: 3,
            table_spacing: 10,
            row_height: 35,
            column_widths,
        }
    }
}

impl LayoutConfig {
    pub fn column_width(&self, column: &str) -> u32 {
        self.column_widths
            .get(column)
            .copied()
            .unwrap_or(DEFAULT_COLUMN_WIDTH)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if !(0.25..=2.0).contains(&self.page_margin) {
            return Err(ConfigError::Validation(
                "layout.page_margin must be 0.25-2.0 inches".into(),
            ));
        }
        if self.cell_padding > 20 {
            return Err(ConfigError::Validation(
                "layout.cell_padding must be 0-20".into(),
            ));
        }
        if self.table_spacing > 50 {
            return Err(ConfigError::Validation(
                "layout.table_spacing must be 0-50".into(),
            ));
        }
        if !(10..=200).contains(&self.row_height) {
            return Err(ConfigError::Validation(
                "layout.row_height must be 10-200".into(),
            ));
        }
        if let Some((name, _)) = self.column_widths.iter().find(|(_, w)| **w == 0) {
            return Err(ConfigError::Validation(format!(
                "layout.column_widths.\"{name}\" must be non-zero"
            )));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FontFamily {
    #[default]
    Arial,
    Helvetica,
    Times,
    Courier,
    Verdana,
}

impl FontFamily {
    /// CSS `font-family` stack.
    pub fn css_stack(self) -> &'static str {
        match self {
            FontFamily::Arial => "Arial, sans-serif",
            FontFamily::Helvetica => "Helvetica, Arial, sans-serif",
            FontFamily::Times => "\"Times New Roman\", Times, serif",
            FontFamily::Courier => "\"Courier New\", Courier, monospace",
            FontFamily::Verdana => "Verdana, sans-serif",
        }
    }

    /// Font name written into spreadsheet cell formats.
    pub fn spreadsheet_name(self) -> &'static str {
        match self {
            FontFamily::Arial => "Arial",
            FontFamily::Helvetica => "Helvetica",
            FontFamily::Times => "Times New Roman",
            FontFamily::Courier => "Courier New",
            FontFamily::Verdana => "Verdana",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TextAlign {
    #[default]
    Left,
    Center,
    Right,
}

impl TextAlign {
    pub fn as_css(self) -> &'static str {
        match self {
            TextAlign::Left => "left",
            TextAlign::Center => "center",
            TextAlign::Right => "right",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct TypographyConfig {
    pub font_family: FontFamily,
    /// Body font size in points.
    pub font_size: u32,
    pub text_align: TextAlign,
}

impl Default for TypographyConfig {
    fn default() -> Self {
        Self {
            font_family: FontFamily::Arial,
            font_size: 10,
            text_align: TextAlign::Left,
        }
    }
}

// =============================================================================
// Colors
// =============================================================================

/// Named zebra-stripe colors. Hex values live in [`crate::style`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum RowColor {
    White,
    LightGray,
    LightBlue,
    LightGreen,
    LightYellow,
    LightPurple,
    LightPink,
    LightOrange,
}

/// Named fill colors for Nortrans rows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum NortransColor {
    #[serde(alias = "gray")]
    LightGray,
    Yellow,
    Orange,
    Pink,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ColorConfig {
    /// When false every fill falls back to a fixed grayscale palette.
    pub color_print: bool,
    pub primary_row: RowColor,
    pub alternate_row: RowColor,
    pub nortrans: NortransColor,
    pub nortrans_bold: bool,
}

impl Default for ColorConfig {
    fn default() -> Self {
        Self {
            color_print: true,
            primary_row: RowColor::White,
            alternate_row: RowColor::LightBlue,
            nortrans: NortransColor::LightGray,
            nortrans_bold: true,
        }
    }
}

// =============================================================================
// Timestamps, sorting, highlighting
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum DateFormat {
    #[default]
    #[serde(rename = "YYYY-MM-DD")]
    Iso,
    #[serde(rename = "MM/DD/YYYY")]
    MonthFirst,
    #[serde(rename = "DD/MM/YYYY")]
    DayFirst,
    #[serde(rename = "DD-MM-YYYY")]
    DayFirstDashed,
}

impl DateFormat {
    fn pattern(self) -> &'static str {
        match self {
            DateFormat::Iso => "%Y-%m-%d",
            DateFormat::MonthFirst => "%m/%d/%Y",
            DateFormat::DayFirst => "%d/%m/%Y",
            DateFormat::DayFirstDashed => "%d-%m-%Y",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum TimeFormat {
    #[default]
    #[serde(rename = "24h")]
    TwentyFourHour,
    #[serde(rename = "12h")]
    TwelveHour,
}

impl TimeFormat {
    fn pattern(self) -> &'static str {
        match self {
            TimeFormat::TwentyFourHour => "%H:%M",
            TimeFormat::TwelveHour => "%-I:%M %p",
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct TimestampConfig {
    pub date_format: DateFormat,
    pub time_format: TimeFormat,
}

impl TimestampConfig {
    /// `"<date> <time>"` as shown on the "Generated:" line.
    pub fn format(&self, at: NaiveDateTime) -> String {
        format!(
            "{} {}",
            at.format(self.date_format.pattern()),
            at.format(self.time_format.pattern())
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortBy {
    /// Keep input order.
    #[default]
    Original,
    Name,
    Cabin,
    Company,
    Role,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    #[default]
    Asc,
    Desc,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SortConfig {
    pub by: SortBy,
    pub direction: SortDirection,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct HighlightConfig {
    /// Highlight rows whose name cell lists more than one person.
    pub multiple_names: bool,
}

impl Default for HighlightConfig {
    fn default() -> Self {
        Self {
            multiple_names: true,
        }
    }
}

// =============================================================================
// Settings loading, merging, and validation
// =============================================================================

/// Returns the stock default settings as a `toml::Value::Table`.
///
/// This is the base layer user overrides are merged on top of.
pub fn stock_defaults_value() -> toml::Value {
    toml::Value::try_from(RenderSettings::default()).expect("default settings must serialize")
}

/// Recursively merge `overlay` on top of `base`.
///
/// - Tables are merged key-by-key (overlay keys override base keys).
/// - Non-table values in overlay replace base values entirely.
/// - Keys in base that are not in overlay are preserved.
pub fn merge_toml(base: toml::Value, overlay: toml::Value) -> toml::Value {
    match (base, overlay) {
        (toml::Value::Table(mut base_table), toml::Value::Table(overlay_table)) => {
            for (key, overlay_val) in overlay_table {
                let merged = match base_table.remove(&key) {
                    Some(base_val) => merge_toml(base_val, overlay_val),
                    None => overlay_val,
                };
                base_table.insert(key, merged);
            }
            toml::Value::Table(base_table)
        }
        (_, overlay) => overlay,
    }
}

/// Load a settings file as a raw TOML value.
///
/// Returns `Ok(None)` if the file does not exist.
/// Returns `Err` if the file exists but contains invalid TOML.
pub fn load_raw_settings(path: &Path) -> Result<Option<toml::Value>, ConfigError> {
    if !path.exists() {
        return Ok(None);
    }
    let content = fs::read_to_string(path)?;
    let value: toml::Value = toml::from_str(&content)?;
    Ok(Some(value))
}

/// Merge an optional overlay onto a base value, then deserialize and validate.
pub fn resolve_settings(
    base: toml::Value,
    overlay: Option<toml::Value>,
) -> Result<RenderSettings, ConfigError> {
    let merged = match overlay {
        Some(ov) => merge_toml(base, ov),
        None => base,
    };
    let settings: RenderSettings = merged.try_into()?;
    settings.validate()?;
    Ok(settings)
}

/// Load settings from the given file, falling back to stock defaults when it
/// does not exist.
pub fn load_settings(path: &Path) -> Result<RenderSettings, ConfigError> {
    let base = stock_defaults_value();
    let overlay = load_raw_settings(path)?;
    resolve_settings(base, overlay)
}

/// Returns a fully-commented stock `settings.toml` with all keys and explanations.
///
/// Used by the `gen-config` CLI command.
pub fn stock_config_toml() -> &'static str {
    r##"# Muster Report Settings
# ======================
# All settings are optional. Remove or comment out any you don't need.
# Values shown below are the defaults. Unknown keys will cause an error.

# ---------------------------------------------------------------------------
# Stations
# ---------------------------------------------------------------------------
[stations]
# Lifeboat stations to report on, in output order. Every station gets a
# bucket even when nobody is assigned to it. Rows whose muster station is
# not listed here are left out of the reports.
codes = ["LB1", "LB2", "LB3", "LB4", "LB5", "LB6", "LB7"]

# ---------------------------------------------------------------------------
# Input
# ---------------------------------------------------------------------------
[input]
# Input files larger than this many bytes are rejected (default 10 MiB).
max_bytes = 10485760

# ---------------------------------------------------------------------------
# Page layout
# ---------------------------------------------------------------------------
[layout]
# "portrait" or "landscape". Applies to print, PDF and XLSX page setup.
orientation = "portrait"

# Page margin in inches (0.25-2.0).
page_margin = 1.0

# Table cell padding in pixels (0-20).
cell_padding = 3

# Space between the report header and the table (0-50).
table_spacing = 10

# Minimum data row height in pixels (10-200).
row_height = 35

# Column widths in pixels. Columns left out fall back to 100.
[layout.column_widths]
"Person Names" = 200
"Roles" = 150
"Companies" = 120
"Cabin" = 80
"Bunk" = 60
"LB Station" = 100

# ---------------------------------------------------------------------------
# Typography
# ---------------------------------------------------------------------------
[typography]
# arial | helvetica | times | courier | verdana
font_family = "arial"

# Body font size in points (6-16).
font_size = 10

# left | center | right
text_align = "left"

# ---------------------------------------------------------------------------
# Colors
# ---------------------------------------------------------------------------
[colors]
# Set to false for grayscale output on monochrome printers.
color_print = true

# Zebra stripes. One of: white, light-gray, light-blue, light-green,
# light-yellow, light-purple, light-pink, light-orange.
primary_row = "white"
alternate_row = "light-blue"

# Fill for Nortrans rows: light-gray | yellow | orange | pink
nortrans = "light-gray"
nortrans_bold = true

# ---------------------------------------------------------------------------
# Timestamps on the "Generated:" line
# ---------------------------------------------------------------------------
[timestamps]
# YYYY-MM-DD | MM/DD/YYYY | DD/MM/YYYY | DD-MM-YYYY
date_format = "YYYY-MM-DD"

# 24h | 12h
time_format = "24h"

# ---------------------------------------------------------------------------
# Row order within each station
# ---------------------------------------------------------------------------
[sort]
# original | name | cabin | company | role
by = "original"

# asc | desc
direction = "asc"

# ---------------------------------------------------------------------------
# Highlighting
# ---------------------------------------------------------------------------
[highlight]
# Highlight rows whose "Person Names" cell lists several people (contains a comma).
multiple_names = true
"##
}
