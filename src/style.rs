//! Row style resolution.
//!
//! [`resolve_style`] is the single place that decides how a row looks. Every
//! renderer reads the resulting [`StyleDecision`] instead of recomputing
//! colors, so a row is styled identically in print, PDF and XLSX output.
//!
//! Rules, first match wins:
//!
//! | Rule | Condition | Fill | Bold |
//! |------|-----------|------|------|
//! | Multiple names | `highlight.multiple_names` and the name cell contains `,` | `#FFFF00` | no |
//! | Nortrans | company is "nortrans" (any case) | `colors.nortrans` | `colors.nortrans_bold` |
//! | Zebra | otherwise | `primary_row` on even index, `alternate_row` on odd | no |
//!
//! With `color_print = false` the fills collapse to a fixed grayscale palette.
//! Text alignment always follows `typography.text_align`.

use crate::config::{NortransColor, RenderSettings, RowColor, TextAlign};
use crate::types::Row;
use serde::{Deserialize, Serialize};
use std::fmt;

/// 8-bit RGB color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// `0xRRGGBB`.
    pub fn to_u32(self) -> u32 {
        (u32::from(self.r) << 16) | (u32::from(self.g) << 8) | u32::from(self.b)
    }

    /// Channels scaled to `0.0..=1.0`.
    pub fn to_unit(self) -> (f32, f32, f32) {
        (
            f32::from(self.r) / 255.0,
            f32::from(self.g) / 255.0,
            f32::from(self.b) / 255.0,
        )
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02X}{:02X}{:02X}", self.r, self.g, self.b)
    }
}

pub const WHITE: Rgb = Rgb::new(0xFF, 0xFF, 0xFF);
pub const BLACK: Rgb = Rgb::new(0x00, 0x00, 0x00);
pub const MULTIPLE_NAMES_FILL: Rgb = Rgb::new(0xFF, 0xFF, 0x00);
pub const HEADER_FILL: Rgb = Rgb::new(0x19, 0x76, 0xD2);
pub const BORDER: Rgb = Rgb::new(0xDD, 0xDD, 0xDD);

const MONO_MULTIPLE_NAMES: Rgb = Rgb::new(0xF0, 0xF0, 0xF0);
const MONO_NORTRANS: Rgb = Rgb::new(0xDC, 0xDC, 0xDC);
const MONO_PRIMARY: Rgb = WHITE;
const MONO_ALTERNATE: Rgb = Rgb::new(0xF5, 0xF5, 0xF5);
const MONO_HEADER: Rgb = Rgb::new(0x80, 0x80, 0x80);

impl RowColor {
    pub fn rgb(self) -> Rgb {
        match self {
            RowColor::White => WHITE,
            RowColor::LightGray => Rgb::new(0xF5, 0xF5, 0xF5),
            RowColor::LightBlue => Rgb::new(0xEF, 0xF6, 0xFF),
            RowColor::LightGreen => Rgb::new(0xF0, 0xFD, 0xF4),
            RowColor::LightYellow => Rgb::new(0xFE, 0xFC, 0xE8),
            RowColor::LightPurple => Rgb::new(0xF3, 0xE8, 0xFF),
            RowColor::LightPink => Rgb::new(0xFD, 0xF2, 0xF8),
            RowColor::LightOrange => Rgb::new(0xFF, 0xF7, 0xED),
        }
    }
}

impl NortransColor {
    pub fn rgb(self) -> Rgb {
        match self {
            NortransColor::LightGray => Rgb::new(0xF5, 0xF5, 0xF5),
            NortransColor::Yellow => Rgb::new(0xFE, 0xF3, 0xC7),
            NortransColor::Orange => Rgb::new(0xFE, 0xD7, 0xAA),
            NortransColor::Pink => Rgb::new(0xFC, 0xE7, 0xF3),
        }
    }
}

/// Which rule styled a row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "rule", rename_all = "kebab-case")]
pub enum StyleKind {
    MultipleNames,
    Nortrans,
    Zebra { alternate: bool },
}

/// Resolved presentation of one data row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StyleDecision {
    pub kind: StyleKind,
    pub fill: Rgb,
    pub bold: bool,
    pub align: TextAlign,
}

/// Table header colors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HeaderStyle {
    pub fill: Rgb,
    pub text: Rgb,
}

pub fn header_style(settings: &RenderSettings) -> HeaderStyle {
    HeaderStyle {
        fill: if settings.colors.color_print {
            HEADER_FILL
        } else {
            MONO_HEADER
        },
        text: WHITE,
    }
}

fn is_nortrans(company: &str) -> bool {
    company.trim().eq_ignore_ascii_case("nortrans")
}

/// Decide the style of the row at `index` (0-based, within its sorted station).
pub fn resolve_style(row: &Row, index: usize, settings: &RenderSettings) -> StyleDecision {
    let colors = &settings.colors;
    let mono = !colors.color_print;
    let align = settings.typography.text_align;

    if settings.highlight.multiple_names && row.person_names.contains(',') {
        return StyleDecision {
            kind: StyleKind::MultipleNames,
            fill: if mono {
                MONO_MULTIPLE_NAMES
            } else {
                MULTIPLE_NAMES_FILL
            },
            bold: false,
            align,
        };
    }

    if is_nortrans(&row.company) {
        return StyleDecision {
            kind: StyleKind::Nortrans,
            fill: if mono {
                MONO_NORTRANS
            } else {
                colors.nortrans.rgb()
            },
            bold: colors.nortrans_bold,
            align,
        };
    }

    let alternate = index % 2 == 1;
    let fill = match (mono, alternate) {
        (true, false) => MONO_PRIMARY,
        (true, true) => MONO_ALTERNATE,
        (false, false) => colors.primary_row.rgb(),
        (false, true) => colors.alternate_row.rgb(),
    };
    StyleDecision {
        kind: StyleKind::Zebra { alternate },
        fill,
        bold: false,
        align,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_helpers::{RowExt, row};

    #[test]
    fn rgb_display_is_uppercase_hex() {
        assert_eq!(HEADER_FILL.to_string(), "#1976D2");
        assert_eq!(HEADER_FILL.to_u32(), 0x1976D2);
    }

    #[test]
    fn multiple_names_beats_nortrans() {
        let settings = RenderSettings::default();
        let first = row("Doe, Jane", "LB2", "Occupied");
        let second = row("Smith, Nortrans", "LB2", "Occupied").with_company("Nortrans");

        for (i, r) in [first, second].iter().enumerate() {
            let style = resolve_style(r, i, &settings);
            assert_eq!(style.kind, StyleKind::MultipleNames);
            assert_eq!(style.fill, MULTIPLE_NAMES_FILL);
            assert!(!style.bold);
        }
    }

    #[test]
    fn nortrans_is_case_insensitive_and_bold() {
        let settings = RenderSettings::default();
        let r = row("Kari", "LB2", "Occupied").with_company("NORTRANS");
        let style = resolve_style(&r, 1, &settings);
        assert_eq!(style.kind, StyleKind::Nortrans);
        assert_eq!(style.fill, NortransColor::LightGray.rgb());
        assert!(style.bold);
    }

    #[test]
    fn nortrans_bold_can_be_disabled() {
        let mut settings = RenderSettings::default();
        settings.colors.nortrans_bold = false;
        settings.colors.nortrans = NortransColor::Orange;
        let r = row("Kari", "LB2", "Occupied").with_company("Nortrans");
        let style = resolve_style(&r, 0, &settings);
        assert!(!style.bold);
        assert_eq!(style.fill.to_string(), "#FED7AA");
    }

    #[test]
    fn highlight_disabled_falls_through() {
        let mut settings = RenderSettings::default();
        settings.highlight.multiple_names = false;
        let r = row("Doe, Jane", "LB2", "Occupied");
        let style = resolve_style(&r, 0, &settings);
        assert_eq!(style.kind, StyleKind::Zebra { alternate: false });
    }

    #[test]
    fn zebra_alternates_by_index() {
        let settings = RenderSettings::default();
        let r = row("Jane", "LB1", "Occupied");
        assert_eq!(resolve_style(&r, 0, &settings).fill, RowColor::White.rgb());
        assert_eq!(
            resolve_style(&r, 1, &settings).fill,
            RowColor::LightBlue.rgb()
        );
        assert_eq!(resolve_style(&r, 2, &settings).fill, RowColor::White.rgb());
    }

    #[test]
    fn alignment_comes_from_typography() {
        let mut settings = RenderSettings::default();
        settings.typography.text_align = TextAlign::Center;
        let r = row("Doe, Jane", "LB1", "Occupied");
        assert_eq!(resolve_style(&r, 0, &settings).align, TextAlign::Center);
    }

    #[test]
    fn monochrome_palette() {
        let mut settings = RenderSettings::default();
        settings.colors.color_print = false;
        let plain = row("Jane", "LB1", "Occupied");
        let multi = row("Doe, Jane", "LB1", "Occupied");
        let nortrans = row("Kari", "LB1", "Occupied").with_company("nortrans");

        assert_eq!(resolve_style(&plain, 0, &settings).fill, WHITE);
        assert_eq!(resolve_style(&plain, 1, &settings).fill.to_string(), "#F5F5F5");
        assert_eq!(resolve_style(&multi, 0, &settings).fill.to_string(), "#F0F0F0");
        assert_eq!(resolve_style(&nortrans, 0, &settings).fill.to_string(), "#DCDCDC");
        assert_eq!(header_style(&settings).fill.to_string(), "#808080");
    }

    #[test]
    fn resolution_is_deterministic() {
        let settings = RenderSettings::default();
        let r = row("Kari", "LB2", "Occupied").with_company("Nortrans");
        assert_eq!(resolve_style(&r, 3, &settings), resolve_style(&r, 3, &settings));
    }
}
