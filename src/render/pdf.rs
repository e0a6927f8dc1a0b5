//! PDF report.
//!
//! Rendering is split in two:
//!
//! 1. [`layout`] is pure. It places every title, table cell and text run on
//!    A4 pages (millimetres, origin top-left) and handles pagination, so the
//!    geometry can be tested without decoding a PDF.
//! 2. [`PdfRenderer`] draws those pages with `printpdf` using the built-in
//!    PDF fonts.
//!
//! Page structure: the overview comes first as one continuous table with a
//! heading per station, then each station starts on a fresh page. Tables
//! that overflow continue on the next page with the header row repeated.
//! Column widths are the configured pixel widths scaled to the printable
//! width; rows are at least `layout.row_height` pixels tall.

use super::{OutputFormat, RenderError, ReportRenderer};
use crate::config::{FontFamily, Orientation, RenderSettings, TextAlign};
use crate::report::{Block, REPORT_COLUMNS, Report, ReportRow, Section};
use crate::style::{BLACK, BORDER, Rgb, header_style};
use printpdf::path::PaintMode;
use printpdf::{BuiltinFont, Color, IndirectFontRef, Mm, PdfDocument, PdfLayerReference, Rect};

const PX_TO_MM: f32 = 0.264583;
const PT_TO_MM: f32 = 0.352778;
const A4_SHORT: f32 = 210.0;
const A4_LONG: f32 = 297.0;
const MM_PER_INCH: f32 = 25.4;

const TITLE_SIZE: f32 = 16.0;
const GENERATED_SIZE: f32 = 10.0;
const HEADING_SIZE: f32 = 12.0;
const HEADING_HEIGHT: f32 = 8.0;

const EMPTY_MESSAGE: &str = "No occupied rows are assigned to a muster station.";

pub struct PdfRenderer;

impl ReportRenderer for PdfRenderer {
    fn format(&self) -> OutputFormat {
        OutputFormat::Pdf
    }

    fn render(&self, report: &Report, settings: &RenderSettings) -> Result<Vec<u8>, RenderError> {
        draw(
            &report.title,
            &layout(report, settings),
            settings.typography.font_family,
        )
    }
}

// ============================================================================
// Layout
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CellKind {
    Header,
    Data,
}

/// Something to paint. Coordinates are millimetres from the top-left corner;
/// `y` of a text run is its baseline.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawItem {
    Text {
        text: String,
        x: f32,
        y: f32,
        size: f32,
        bold: bool,
        color: Rgb,
    },
    Cell {
        x: f32,
        y: f32,
        width: f32,
        height: f32,
        fill: Rgb,
        kind: CellKind,
    },
}

#[derive(Debug, Clone, PartialEq)]
pub struct PdfPage {
    pub width: f32,
    pub height: f32,
    pub items: Vec<DrawItem>,
}

impl PdfPage {
    /// Text runs on the page, in paint order.
    pub fn texts(&self) -> Vec<&str> {
        self.items
            .iter()
            .filter_map(|item| match item {
                DrawItem::Text { text, .. } => Some(text.as_str()),
                DrawItem::Cell { .. } => None,
            })
            .collect()
    }

    /// Fills of cells of the given kind, one entry per cell.
    pub fn cell_fills(&self, wanted: CellKind) -> Vec<Rgb> {
        self.items
            .iter()
            .filter_map(|item| match item {
                DrawItem::Cell { fill, kind, .. } if *kind == wanted => Some(*fill),
                _ => None,
            })
            .collect()
    }
}

/// Page geometry derived from settings.
#[derive(Debug, Clone)]
struct Geometry {
    page_width: f32,
    page_height: f32,
    margin: f32,
    column_x: [f32; 6],
    column_width: [f32; 6],
    row_height: f32,
    padding: f32,
    font_size: f32,
    char_width: f32,
    table_top: f32,
    bottom: f32,
}

impl Geometry {
    fn new(settings: &RenderSettings) -> Self {
        let (page_width, page_height) = match settings.layout.orientation {
            Orientation::Portrait => (A4_SHORT, A4_LONG),
            Orientation::Landscape => (A4_LONG, A4_SHORT),
        };
        let margin = settings.layout.page_margin as f32 * MM_PER_INCH;
        let available = page_width - 2.0 * margin;

        let natural: Vec<f32> = REPORT_COLUMNS
            .iter()
            .map(|c| settings.layout.column_width(c) as f32 * PX_TO_MM)
            .collect();
        let scale = available / natural.iter().sum::<f32>();

        let mut column_x = [0.0; 6];
        let mut column_width = [0.0; 6];
        let mut x = margin;
        for (i, width) in natural.iter().enumerate() {
            column_x[i] = x;
            column_width[i] = width * scale;
            x += column_width[i];
        }

        let font_size = settings.typography.font_size as f32;
        let padding = settings.layout.cell_padding as f32 * PX_TO_MM;
        let min_row = settings.layout.row_height as f32 * PX_TO_MM;
        let row_height = min_row.max(font_size * PT_TO_MM + 2.0 * padding);

        Self {
            page_width,
            page_height,
            margin,
            column_x,
            column_width,
            row_height,
            padding,
            font_size,
            char_width: average_char_width(settings.typography.font_family) * font_size * PT_TO_MM,
            table_top: margin + 20.0 + settings.layout.table_spacing as f32,
            bottom: page_height - margin,
        }
    }
}

/// Average glyph advance as a fraction of the font size.
fn average_char_width(family: FontFamily) -> f32 {
    match family {
        FontFamily::Courier => 0.6,
        FontFamily::Times => 0.45,
        FontFamily::Arial | FontFamily::Helvetica | FontFamily::Verdana => 0.5,
    }
}

/// Shorten `text` with a trailing `...` so at most `max_chars` characters remain.
pub fn fit_text(text: &str, max_chars: usize) -> String {
    let count = text.chars().count();
    if count <= max_chars {
        return text.to_string();
    }
    if max_chars <= 3 {
        return ".".repeat(max_chars);
    }
    let kept: String = text.chars().take(max_chars - 3).collect();
    format!("{kept}...")
}

struct PageBuilder<'a> {
    geo: Geometry,
    settings: &'a RenderSettings,
    generated: String,
    pages: Vec<PdfPage>,
    cursor: f32,
}

impl<'a> PageBuilder<'a> {
    fn new(settings: &'a RenderSettings, generated: String) -> Self {
        let geo = Geometry::new(settings);
        let cursor = geo.table_top;
        Self {
            geo,
            settings,
            generated,
            pages: Vec::new(),
            cursor,
        }
    }

    fn current(&mut self) -> &mut PdfPage {
        if self.pages.is_empty() {
            self.pages.push(PdfPage {
                width: self.geo.page_width,
                height: self.geo.page_height,
                items: Vec::new(),
            });
        }
        let last = self.pages.len() - 1;
        &mut self.pages[last]
    }

    fn text(&mut self, text: String, x: f32, y: f32, size: f32, bold: bool, color: Rgb) {
        self.current().items.push(DrawItem::Text {
            text,
            x,
            y,
            size,
            bold,
            color,
        });
    }

    /// Open a new page with the title block and reset the cursor.
    fn start_page(&mut self, title: &str) {
        self.pages.push(PdfPage {
            width: self.geo.page_width,
            height: self.geo.page_height,
            items: Vec::new(),
        });
        let margin = self.geo.margin;
        self.text(title.to_string(), margin, margin + 10.0, TITLE_SIZE, true, BLACK);
        self.text(
            self.generated.clone(),
            margin,
            margin + 20.0,
            GENERATED_SIZE,
            false,
            BLACK,
        );
        self.cursor = self.geo.table_top;
    }

    fn fits(&self, height: f32) -> bool {
        self.cursor + height <= self.geo.bottom
    }

    fn cell_text(&mut self, column: usize, text: &str, align: TextAlign, bold: bool, color: Rgb) {
        let geo = &self.geo;
        let width = geo.column_width[column];
        let inner = (width - 2.0 * geo.padding).max(0.0);
        let max_chars = (inner / geo.char_width).floor() as usize;
        let fitted = fit_text(text, max_chars);
        let text_width = fitted.chars().count() as f32 * geo.char_width;
        let x = match align {
            TextAlign::Left => geo.column_x[column] + geo.padding,
            TextAlign::Center => geo.column_x[column] + (width - text_width) / 2.0,
            TextAlign::Right => geo.column_x[column] + width - geo.padding - text_width,
        };
        let y = self.cursor + geo.row_height / 2.0 + geo.font_size * PT_TO_MM * 0.35;
        let size = geo.font_size;
        self.text(fitted, x, y, size, bold, color);
    }

    fn header_row(&mut self) {
        let header = header_style(self.settings);
        let align = self.settings.typography.text_align;
        for (i, column) in REPORT_COLUMNS.iter().enumerate() {
            let cell = DrawItem::Cell {
                x: self.geo.column_x[i],
                y: self.cursor,
                width: self.geo.column_width[i],
                height: self.geo.row_height,
                fill: header.fill,
                kind: CellKind::Header,
            };
            self.current().items.push(cell);
            self.cell_text(i, column, align, true, header.text);
        }
        self.cursor += self.geo.row_height;
    }

    fn data_row(&mut self, row: &ReportRow) {
        for (i, value) in row.cells.iter().enumerate() {
            let cell = DrawItem::Cell {
                x: self.geo.column_x[i],
                y: self.cursor,
                width: self.geo.column_width[i],
                height: self.geo.row_height,
                fill: row.style.fill,
                kind: CellKind::Data,
            };
            self.current().items.push(cell);
            self.cell_text(i, value, row.style.align, row.style.bold, BLACK);
        }
        self.cursor += self.geo.row_height;
    }

    fn heading(&mut self, text: &str) {
        let margin = self.geo.margin;
        let y = self.cursor + HEADING_HEIGHT - 2.0;
        self.text(text.to_string(), margin, y, HEADING_SIZE, true, BLACK);
        self.cursor += HEADING_HEIGHT;
    }

    fn block(&mut self, block: &Block, section_title: &str, with_heading: bool) {
        let lead = if with_heading { HEADING_HEIGHT } else { 0.0 };
        // Keep heading, header row and the first data row together.
        if !self.fits(lead + 2.0 * self.geo.row_height) {
            self.start_page(section_title);
        }
        if with_heading {
            self.heading(&block.title);
        }
        self.header_row();
        for row in &block.rows {
            if !self.fits(self.geo.row_height) {
                self.start_page(section_title);
                self.header_row();
            }
            self.data_row(row);
        }
    }

    fn section(&mut self, section: &Section, with_headings: bool) {
        self.start_page(&section.title);
        for block in &section.blocks {
            self.block(block, &section.title, with_headings);
        }
    }

    fn empty_message(&mut self) {
        let margin = self.geo.margin;
        let y = self.cursor + 5.0;
        let size = self.geo.font_size;
        self.text(EMPTY_MESSAGE.to_string(), margin, y, size, false, BLACK);
    }
}

/// Place the whole report on pages.
pub fn layout(report: &Report, settings: &RenderSettings) -> Vec<PdfPage> {
    let mut builder = PageBuilder::new(settings, report.generated_line());
    builder.section(&report.overview, true);
    if report.is_empty() {
        builder.empty_message();
    }
    for section in &report.stations {
        builder.section(section, false);
    }
    builder.pages
}

// ============================================================================
// Drawing
// ============================================================================

fn builtin_fonts(family: FontFamily) -> (BuiltinFont, BuiltinFont) {
    match family {
        FontFamily::Arial | FontFamily::Helvetica | FontFamily::Verdana => {
            (BuiltinFont::Helvetica, BuiltinFont::HelveticaBold)
        }
        FontFamily::Times => (BuiltinFont::TimesRoman, BuiltinFont::TimesBold),
        FontFamily::Courier => (BuiltinFont::Courier, BuiltinFont::CourierBold),
    }
}

fn pdf_color(rgb: Rgb) -> Color {
    let (r, g, b) = rgb.to_unit();
    Color::Rgb(printpdf::Rgb::new(r, g, b, None))
}

fn pdf_error(err: printpdf::Error) -> RenderError {
    RenderError::Pdf(err.to_string())
}

fn draw_page(
    layer: &PdfLayerReference,
    page: &PdfPage,
    regular: &IndirectFontRef,
    bold: &IndirectFontRef,
) {
    layer.set_outline_color(pdf_color(BORDER));
    layer.set_outline_thickness(0.5);
    for item in &page.items {
        match item {
            DrawItem::Cell {
                x,
                y,
                width,
                height,
                fill,
                ..
            } => {
                layer.set_fill_color(pdf_color(*fill));
                let rect = Rect::new(
                    Mm(*x),
                    Mm(page.height - y - height),
                    Mm(x + width),
                    Mm(page.height - y),
                )
                .with_mode(PaintMode::FillStroke);
                layer.add_rect(rect);
            }
            DrawItem::Text {
                text,
                x,
                y,
                size,
                bold: is_bold,
                color,
            } => {
                layer.set_fill_color(pdf_color(*color));
                let font = if *is_bold { bold } else { regular };
                layer.use_text(text.as_str(), *size, Mm(*x), Mm(page.height - y), font);
            }
        }
    }
}

fn draw(title: &str, pages: &[PdfPage], family: FontFamily) -> Result<Vec<u8>, RenderError> {
    let Some(first) = pages.first() else {
        return Err(RenderError::Pdf("no pages to draw".into()));
    };

    let (doc, page_index, layer_index) = PdfDocument::new(
        title,
        Mm(first.width),
        Mm(first.height),
        "Layer 1",
    );
    let (regular_font, bold_font) = builtin_fonts(family);
    let regular = doc.add_builtin_font(regular_font).map_err(pdf_error)?;
    let bold = doc.add_builtin_font(bold_font).map_err(pdf_error)?;

    let mut layer = doc.get_page(page_index).get_layer(layer_index);
    for (i, page) in pages.iter().enumerate() {
        if i > 0 {
            let (page_index, layer_index) =
                doc.add_page(Mm(page.width), Mm(page.height), "Layer 1");
            layer = doc.get_page(page_index).get_layer(layer_index);
        }
        draw_page(&layer, page, &regular, &bold);
    }

    doc.save_to_bytes().map_err(pdf_error)
}
