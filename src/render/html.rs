//! Printable HTML report.
//!
//! One self-contained document: the overview section first, then one
//! `print-page` section per station, each starting on a new printed page.
//! Base styles come from `static/print.css` (embedded at compile time);
//! page size, margins, fonts and padding are generated from settings.
//! Row fills, weight and alignment are written inline from each row's
//! [`StyleDecision`](crate::style::StyleDecision).

use super::{OutputFormat, RenderError, ReportRenderer};
use crate::config::RenderSettings;
use crate::report::{Block, REPORT_COLUMNS, Report, ReportRow, Section};
use crate::style::header_style;
use maud::{DOCTYPE, Markup, PreEscaped, html};

const CSS_STATIC: &str = include_str!("../../static/print.css");

pub struct HtmlRenderer;

impl ReportRenderer for HtmlRenderer {
    fn format(&self) -> OutputFormat {
        OutputFormat::Html
    }

    fn render(&self, report: &Report, settings: &RenderSettings) -> Result<Vec<u8>, RenderError> {
        Ok(render_document(report, settings).into_string().into_bytes())
    }
}

/// Generate the settings-dependent part of the stylesheet.
pub fn generate_page_css(settings: &RenderSettings) -> String {
    let header = header_style(settings);
    format!(
        r#"@page {{
    size: A4 {orientation};
    margin: {margin}in;
}}

body {{
    font-family: {font_family};
    font-size: {font_size}pt;
}}

.report-table {{
    margin-top: {spacing}px;
}}

.report-table th,
.report-table td {{
    padding: {padding}px;
    text-align: {align};
}}

.report-table th {{
    background-color: {header_fill};
    color: {header_text};
    font-weight: bold;
}}"#,
        orientation = settings.layout.orientation.as_str(),
        margin = settings.layout.page_margin,
        font_family = settings.typography.font_family.css_stack(),
        font_size = settings.typography.font_size,
        spacing = settings.layout.table_spacing,
        padding = settings.layout.cell_padding,
        align = settings.typography.text_align.as_css(),
        header_fill = header.fill,
        header_text = header.text,
    )
}

// ============================================================================
// HTML Components
// ============================================================================

fn base_document(title: &str, css: &str, content: Markup) -> Markup {
    html! {
        (DOCTYPE)
        html lang="en" {
            head {
                meta charset="UTF-8";
                meta name="viewport" content="width=device-width, initial-scale=1.0";
                title { (title) }
                style { (PreEscaped(css)) }
            }
            body {
                (content)
            }
        }
    }
}

fn row_css(row: &ReportRow, settings: &RenderSettings) -> String {
    format!(
        "background-color: {}; font-weight: {}; text-align: {}; height: {}px;",
        row.style.fill,
        if row.style.bold { "bold" } else { "normal" },
        row.style.align.as_css(),
        settings.layout.row_height,
    )
}

fn render_table(block: &Block, settings: &RenderSettings) -> Markup {
    html! {
        table.report-table data-station=(block.station) {
            colgroup {
                @for column in REPORT_COLUMNS {
                    col style=(format!("width: {}px;", settings.layout.column_width(column)));
                }
            }
            thead {
                tr {
                    @for column in REPORT_COLUMNS {
                        th { (column) }
                    }
                }
            }
            tbody {
                @for row in &block.rows {
                    tr style=(row_css(row, settings)) {
                        @for cell in &row.cells {
                            td { (cell) }
                        }
                    }
                }
            }
        }
    }
}

fn render_section(
    section: &Section,
    generated: &str,
    settings: &RenderSettings,
    overview: bool,
) -> Markup {
    html! {
        section.print-page {
            header.report-header {
                h1 { (section.title) }
                p.generated { (generated) }
            }
            @for block in &section.blocks {
                @if overview {
                    h2.station-heading { (block.title) }
                }
                (render_table(block, settings))
            }
        }
    }
}

/// Render the full report document.
pub fn render_document(report: &Report, settings: &RenderSettings) -> Markup {
    let css = format!("{}\n\n{}", generate_page_css(settings), CSS_STATIC);
    let generated = report.generated_line();

    let content = html! {
        (render_section(&report.overview, &generated, settings, true))
        @if report.is_empty() {
            p.empty-state { "No occupied rows are assigned to a muster station." }
        }
        @for section in &report.stations {
            (render_section(section, &generated, settings, false))
        }
    };

    base_document(&report.title, &css, content)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{Orientation, TextAlign};
    use crate::render::tests::{empty_report, sample_report};

    fn render(settings: &RenderSettings) -> String {
        render_document(&sample_report(settings), settings).into_string()
    }

    #[test]
    fn document_includes_doctype_and_css() {
        let html = render(&RenderSettings::default());
        assert!(html.starts_with("<!DOCTYPE html>"));
        assert!(html.contains(".print-page"));
        assert!(html.contains("size: A4 portrait;"));
    }

    #[test]
    fn sections_in_order() {
        let html = render(&RenderSettings::default());
        let overview = html.find("All Muster Stations").unwrap();
        let lb1 = html.find("<h1>Muster Station LB1 Report</h1>").unwrap();
        let lb3 = html.find("<h1>Muster Station LB3 Report</h1>").unwrap();
        assert!(overview < lb1 && lb1 < lb3);
        assert_eq!(html.matches(r#"<section class="print-page">"#).count(), 4);
    }

    #[test]
    fn generated_line_on_every_section() {
        let html = render(&RenderSettings::default());
        assert_eq!(html.matches("Generated: 2024-05-01 08:30").count(), 4);
    }

    #[test]
    fn header_columns() {
        let html = render(&RenderSettings::default());
        for column in REPORT_COLUMNS {
            assert!(html.contains(&format!("<th>{column}</th>")));
        }
    }

    #[test]
    fn rows_carry_resolved_style() {
        let html = render(&RenderSettings::default());
        assert!(html.contains("background-color: #FFFF00; font-weight: normal;"));
        assert!(html.contains("background-color: #F5F5F5; font-weight: bold;"));
        assert!(html.contains("height: 35px;"));
    }

    #[test]
    fn settings_flow_into_css() {
        let mut settings = RenderSettings::default();
        settings.layout.orientation = Orientation::Landscape;
        settings.layout.page_margin = 0.5;
        settings.typography.text_align = TextAlign::Right;
        settings.colors.color_print = false;
        let css = generate_page_css(&settings);
        assert!(css.contains("size: A4 landscape;"));
        assert!(css.contains("margin: 0.5in;"));
        assert!(css.contains("text-align: right;"));
        assert!(css.contains("background-color: #808080;"));
    }

    #[test]
    fn column_widths_from_settings() {
        let html = render(&RenderSettings::default());
        assert!(html.contains(r#"<col style="width: 200px;">"#));
        assert!(html.contains(r#"<col style="width: 60px;">"#));
    }

    #[test]
    fn cell_text_is_escaped() {
        let mut report = sample_report(&RenderSettings::default());
        report.stations[0].blocks[0].rows[0].cells[0] = "<script>x</script>".to_string();
        let html = render_document(&report, &RenderSettings::default()).into_string();
        assert!(html.contains("&lt;script&gt;x&lt;/script&gt;"));
    }

    #[test]
    fn empty_report_shows_message() {
        let settings = RenderSettings::default();
        let html = render_document(&empty_report(&settings), &settings).into_string();
        assert!(html.contains("No occupied rows are assigned to a muster station."));
        assert_eq!(html.matches(r#"<section class="print-page">"#).count(), 1);
    }

    #[test]
    fn unassigned_row_absent() {
        let html = render(&RenderSettings::default());
        assert!(!html.contains("Office Hand"));
    }
}
