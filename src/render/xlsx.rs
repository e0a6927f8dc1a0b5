//! XLSX report.
//!
//! The workbook holds an `ALL` sheet first, then one `<code> Report` sheet per
//! non-empty station. Like the PDF renderer this is split into a pure plan
//! ([`plan_workbook`]) and the writer, so sheet contents are testable without
//! reading the file back.
//!
//! ```text
//! ALL                          LB1 Report
//! ┌──────────────────────┐     ┌──────────────────────┐
//! │ Muster Station LB1 … │     │ Muster Station LB1 … │  title
//! │ Generated: …         │     │ Generated: …         │
//! │ header row           │     │                      │  blank
//! │ data rows …          │     │ header row           │
//! │ ── page break ──     │     │ data rows …          │
//! │ Muster Station LB2 … │     └──────────────────────┘
//! └──────────────────────┘
//! ```
//!
//! Pixel widths become character widths at 7.5 px per unit; the data row
//! height is `row_height × 0.75` points.

use super::{OutputFormat, RenderError, ReportRenderer};
use crate::config::{Orientation, RenderSettings, TextAlign};
use crate::report::{REPORT_COLUMNS, Report, ReportRow};
use crate::style::{HeaderStyle, Rgb, header_style};
use rust_xlsxwriter::{Color, Format, FormatAlign, FormatBorder, Workbook, Worksheet};

pub const OVERVIEW_SHEET: &str = "ALL";
const A4_PAPER: u8 = 9;
const PX_PER_CHAR: f64 = 7.5;
const PX_TO_PT: f64 = 0.75;

pub struct XlsxRenderer;

impl ReportRenderer for XlsxRenderer {
    fn format(&self) -> OutputFormat {
        OutputFormat::Xlsx
    }

    fn render(&self, report: &Report, settings: &RenderSettings) -> Result<Vec<u8>, RenderError> {
        let mut workbook = Workbook::new();
        for plan in plan_workbook(report) {
            workbook.push_worksheet(write_sheet(&plan, settings)?);
        }
        Ok(workbook.save_to_buffer()?)
    }
}

// ============================================================================
// Plan
// ============================================================================

#[derive(Debug, Clone, PartialEq)]
pub enum SheetRow {
    Title { text: String, size: f64 },
    Generated { text: String, size: f64 },
    Blank,
    Header,
    Data(ReportRow),
}

#[derive(Debug, Clone, PartialEq)]
pub struct SheetPlan {
    pub name: String,
    pub rows: Vec<SheetRow>,
    /// Rows that start a new printed page.
    pub page_breaks: Vec<u32>,
}

impl SheetPlan {
    pub fn data_rows(&self) -> impl Iterator<Item = &ReportRow> {
        self.rows.iter().filter_map(|r| match r {
            SheetRow::Data(row) => Some(row),
            _ => None,
        })
    }
}

fn sheet_name(station: &str) -> String {
    format!("{station} Report")
}

/// Lay out every sheet of the workbook.
pub fn plan_workbook(report: &Report) -> Vec<SheetPlan> {
    let generated = report.generated_line();

    let mut overview = SheetPlan {
        name: OVERVIEW_SHEET.to_string(),
        rows: Vec::new(),
        page_breaks: Vec::new(),
    };
    for (i, block) in report.overview.blocks.iter().enumerate() {
        if i > 0 {
            overview.rows.push(SheetRow::Blank);
            overview.page_breaks.push(overview.rows.len() as u32);
        }
        overview.rows.push(SheetRow::Title {
            text: block.title.clone(),
            size: 14.0,
        });
        overview.rows.push(SheetRow::Generated {
            text: generated.clone(),
            size: 11.0,
        });
        overview.rows.push(SheetRow::Header);
        overview
            .rows
            .extend(block.rows.iter().cloned().map(SheetRow::Data));
    }
    if overview.rows.is_empty() {
        overview.rows.push(SheetRow::Title {
            text: report.overview.title.clone(),
            size: 14.0,
        });
        overview.rows.push(SheetRow::Generated {
            text: generated.clone(),
            size: 11.0,
        });
        overview.rows.push(SheetRow::Header);
    }

    let mut plans = vec![overview];
    for section in &report.stations {
        for block in &section.blocks {
            let mut rows = vec![
                SheetRow::Title {
                    text: block.title.clone(),
                    size: 16.0,
                },
                SheetRow::Generated {
                    text: generated.clone(),
                    size: 12.0,
                },
                SheetRow::Blank,
                SheetRow::Header,
            ];
            rows.extend(block.rows.iter().cloned().map(SheetRow::Data));
            plans.push(SheetPlan {
                name: sheet_name(block.station.as_str()),
                rows,
                page_breaks: Vec::new(),
            });
        }
    }
    plans
}

// ============================================================================
// Writer
// ============================================================================

fn xlsx_color(rgb: Rgb) -> Color {
    Color::RGB(rgb.to_u32())
}

fn xlsx_align(align: TextAlign) -> FormatAlign {
    match align {
        TextAlign::Left => FormatAlign::Left,
        TextAlign::Center => FormatAlign::Center,
        TextAlign::Right => FormatAlign::Right,
    }
}

fn base_format(settings: &RenderSettings) -> Format {
    Format::new()
        .set_font_name(settings.typography.font_family.spreadsheet_name())
        .set_font_size(settings.typography.font_size as f64)
}

fn header_format(settings: &RenderSettings, header: HeaderStyle) -> Format {
    base_format(settings)
        .set_bold()
        .set_font_color(xlsx_color(header.text))
        .set_background_color(xlsx_color(header.fill))
        .set_border(FormatBorder::Thin)
        .set_align(xlsx_align(settings.typography.text_align))
        .set_align(FormatAlign::VerticalCenter)
}

fn data_format(settings: &RenderSettings, row: &ReportRow) -> Format {
    let format = base_format(settings)
        .set_background_color(xlsx_color(row.style.fill))
        .set_border(FormatBorder::Thin)
        .set_align(xlsx_align(row.style.align))
        .set_align(FormatAlign::Top);
    if row.style.bold {
        format.set_bold()
    } else {
        format
    }
}

fn write_sheet(plan: &SheetPlan, settings: &RenderSettings) -> Result<Worksheet, RenderError> {
    let mut sheet = Worksheet::new();
    sheet.set_name(&plan.name)?;

    for (col, column) in REPORT_COLUMNS.iter().enumerate() {
        let width = settings.layout.column_width(column) as f64 / PX_PER_CHAR;
        sheet.set_column_width(col as u16, width)?;
    }

    let header = header_format(settings, header_style(settings));
    let data_height = settings.layout.row_height as f64 * PX_TO_PT;

    for (r, row) in plan.rows.iter().enumerate() {
        let r = r as u32;
        match row {
            SheetRow::Title { text, size } => {
                let format = base_format(settings).set_bold().set_font_size(*size);
                sheet.write_string_with_format(r, 0, text.as_str(), &format)?;
            }
            SheetRow::Generated { text, size } => {
                let format = base_format(settings).set_font_size(*size);
                sheet.write_string_with_format(r, 0, text.as_str(), &format)?;
            }
            SheetRow::Blank => {}
            SheetRow::Header => {
                for (col, column) in REPORT_COLUMNS.iter().enumerate() {
                    sheet.write_string_with_format(r, col as u16, *column, &header)?;
                }
            }
            SheetRow::Data(data) => {
                let format = data_format(settings, data);
                for (col, value) in data.cells.iter().enumerate() {
                    if value.is_empty() {
                        sheet.write_blank(r, col as u16, &format)?;
                    } else {
                        sheet.write_string_with_format(r, col as u16, value.as_str(), &format)?;
                    }
                }
                sheet.set_row_height(r, data_height)?;
            }
        }
    }

    match settings.layout.orientation {
        Orientation::Portrait => sheet.set_portrait(),
        Orientation::Landscape => sheet.set_landscape(),
    };
    let margin = settings.layout.page_margin;
    sheet.set_margins(margin, margin, margin, margin, 0.3, 0.3);
    sheet.set_paper_size(A4_PAPER);
    sheet.set_print_fit_to_pages(1, 0);
    let last_row = plan.rows.len().saturating_sub(1) as u32;
    sheet.set_print_area(0, 0, last_row, (REPORT_COLUMNS.len() - 1) as u16)?;
    if !plan.page_breaks.is_empty() {
        sheet.set_page_breaks(&plan.page_breaks)?;
    }

    Ok(sheet)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::tests::{empty_report, sample_report};
    use calamine::{DataType, Reader, Xlsx, open_workbook_from_rs};
    use std::io::Cursor;

    fn names(plans: &[SheetPlan]) -> Vec<&str> {
        plans.iter().map(|p| p.name.as_str()).collect()
    }

    #[test]
    fn overview_sheet_comes_first() {
        let plans = plan_workbook(&sample_report(&RenderSettings::default()));
        assert_eq!(names(&plans), ["ALL", "LB1 Report", "LB2 Report", "LB3 Report"]);
    }

    #[test]
    fn overview_breaks_before_each_later_station() {
        let plans = plan_workbook(&sample_report(&RenderSettings::default()));
        let all = &plans[0];
        assert_eq!(all.page_breaks.len(), 2);
        for &row in &all.page_breaks {
            assert!(matches!(all.rows[row as usize], SheetRow::Title { .. }));
        }
    }

    #[test]
    fn station_sheet_layout() {
        let plans = plan_workbook(&sample_report(&RenderSettings::default()));
        let lb2 = &plans[2];
        assert!(matches!(
            &lb2.rows[0],
            SheetRow::Title { text, size } if text == "Muster Station LB2 Report" && *size == 16.0
        ));
        assert!(matches!(lb2.rows[2], SheetRow::Blank));
        assert!(matches!(lb2.rows[3], SheetRow::Header));
        assert_eq!(lb2.data_rows().count(), 3);
    }

    #[test]
    fn data_rows_carry_report_styles() {
        let report = sample_report(&RenderSettings::default());
        let plans = plan_workbook(&report);
        let planned: Vec<&ReportRow> = plans[0].data_rows().collect();
        let expected: Vec<&ReportRow> = report
            .overview
            .blocks
            .iter()
            .flat_map(|b| b.rows.iter())
            .collect();
        assert_eq!(planned, expected);
    }

    #[test]
    fn empty_report_still_has_overview_sheet() {
        let plans = plan_workbook(&empty_report(&RenderSettings::default()));
        assert_eq!(names(&plans), ["ALL"]);
        assert!(matches!(plans[0].rows[2], SheetRow::Header));
    }

    #[test]
    fn written_workbook_reads_back() {
        let settings = RenderSettings::default();
        let bytes = XlsxRenderer
            .render(&sample_report(&settings), &settings)
            .unwrap();

        let mut workbook: Xlsx<_> = open_workbook_from_rs(Cursor::new(bytes)).unwrap();
        assert_eq!(
            workbook.sheet_names(),
            ["ALL", "LB1 Report", "LB2 Report", "LB3 Report"]
        );

        let lb2 = workbook.worksheet_range("LB2 Report").unwrap().unwrap();
        assert_eq!(
            lb2.get_value((0, 0)),
            Some(&DataType::String("Muster Station LB2 Report".into()))
        );
        assert_eq!(
            lb2.get_value((3, 5)),
            Some(&DataType::String("LB Station".into()))
        );
        assert_eq!(
            lb2.get_value((4, 0)),
            Some(&DataType::String("Doe, Jane".into()))
        );
    }
}
