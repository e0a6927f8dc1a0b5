//! Report renderers.
//!
//! The [`ReportRenderer`] trait turns a [`Report`] into the bytes of one
//! artifact. Every renderer consumes the same report value, so sorting and
//! row styling are shared; each implementation only maps the report onto its
//! output format.
//!
//! | Concern | HTML ([`html`]) | PDF ([`pdf`]) | XLSX ([`xlsx`]) |
//! |---------|-----------------|---------------|-----------------|
//! | Overview | first `print-page` section | first page(s) | `ALL` sheet |
//! | Per station | one section each | one page run each | `<code> Report` sheet |
//! | Row fill / bold / align | inline CSS | cell rectangle + font | cell format |
//! | Header row | `#1976D2`, white bold | same | same |
//! | Orientation / margin | `@page` | page size + margin | page setup |
//!
//! Artifacts are written as `muster-station-reports-<YYYY-MM-DD>.<ext>`.

pub mod html;
pub mod pdf;
pub mod xlsx;

use crate::config::RenderSettings;
use crate::report::Report;
use log::info;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum RenderError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("PDF error: {0}")]
    Pdf(String),
    #[error("XLSX error: {0}")]
    Xlsx(#[from] rust_xlsxwriter::XlsxError),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OutputFormat {
    Html,
    Pdf,
    Xlsx,
}

impl OutputFormat {
    pub const ALL: [OutputFormat; 3] = [OutputFormat::Html, OutputFormat::Pdf, OutputFormat::Xlsx];

    pub fn extension(self) -> &'static str {
        match self {
            OutputFormat::Html => "html",
            OutputFormat::Pdf => "pdf",
            OutputFormat::Xlsx => "xlsx",
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}

/// A report output backend.
pub trait ReportRenderer {
    fn format(&self) -> OutputFormat;

    /// Render the full report into the artifact's bytes.
    fn render(&self, report: &Report, settings: &RenderSettings) -> Result<Vec<u8>, RenderError>;
}

pub fn renderer_for(format: OutputFormat) -> Box<dyn ReportRenderer> {
    match format {
        OutputFormat::Html => Box::new(html::HtmlRenderer),
        OutputFormat::Pdf => Box::new(pdf::PdfRenderer),
        OutputFormat::Xlsx => Box::new(xlsx::XlsxRenderer),
    }
}

/// File name for an artifact of `format` generated on `file_date`.
pub fn artifact_file_name(file_date: &str, format: OutputFormat) -> String {
    format!("muster-station-reports-{file_date}.{}", format.extension())
}

/// A written artifact.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedArtifact {
    pub format: OutputFormat,
    pub path: PathBuf,
    pub bytes: usize,
}

/// Render `report` once per requested format and write the artifacts into
/// `output_dir`.
///
/// Every format is rendered before anything is written, so a failing
/// renderer leaves no partial set of artifacts behind.
pub fn render_all(
    report: &Report,
    settings: &RenderSettings,
    output_dir: &Path,
    formats: &[OutputFormat],
) -> Result<Vec<RenderedArtifact>, RenderError> {
    let mut rendered = Vec::with_capacity(formats.len());
    for &format in formats {
        let bytes = renderer_for(format).render(report, settings)?;
        rendered.push((format, bytes));
    }

    fs::create_dir_all(output_dir)?;
    let mut artifacts = Vec::with_capacity(rendered.len());
    for (format, bytes) in rendered {
        let path = output_dir.join(artifact_file_name(&report.file_date, format));
        fs::write(&path, &bytes)?;
        info!("wrote {} ({} bytes)", path.display(), bytes.len());
        artifacts.push(RenderedArtifact {
            format,
            path,
            bytes: bytes.len(),
        });
    }
    Ok(artifacts)
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::group::group;
    use crate::report::build_report;
    use crate::station::default_station_codes;
    use crate::test_helpers::sample_dataset;
    use chrono::NaiveDate;
    use tempfile::TempDir;

    /// Report over the shared sample roster with the given settings.
    pub fn sample_report(settings: &RenderSettings) -> Report {
        let generated_at = NaiveDate::from_ymd_opt(2024, 5, 1)
            .unwrap()
            .and_hms_opt(8, 30, 0)
            .unwrap();
        let grouped = group(&sample_dataset(), &default_station_codes());
        build_report(&grouped, settings, generated_at)
    }

    /// Report with no occupied, assigned rows.
    pub fn empty_report(settings: &RenderSettings) -> Report {
        let generated_at = NaiveDate::from_ymd_opt(2024, 5, 1)
            .unwrap()
            .and_hms_opt(8, 30, 0)
            .unwrap();
        let grouped = group(&Default::default(), &default_station_codes());
        build_report(&grouped, settings, generated_at)
    }

    #[test]
    fn artifact_names() {
        assert_eq!(
            artifact_file_name("2024-05-01", OutputFormat::Pdf),
            "muster-station-reports-2024-05-01.pdf"
        );
    }

    #[test]
    fn renderer_for_matches_format() {
        for format in OutputFormat::ALL {
            assert_eq!(renderer_for(format).format(), format);
        }
    }

    #[test]
    fn render_all_writes_every_format() {
        let tmp = TempDir::new().unwrap();
        let settings = RenderSettings::default();
        let report = sample_report(&settings);
        let out = tmp.path().join("dist");

        let artifacts = render_all(&report, &settings, &out, &OutputFormat::ALL).unwrap();
        assert_eq!(artifacts.len(), 3);
        for artifact in &artifacts {
            assert!(artifact.path.exists());
            assert!(artifact.bytes > 0);
        }
        assert!(out.join("muster-station-reports-2024-05-01.html").exists());
        assert!(out.join("muster-station-reports-2024-05-01.xlsx").exists());
    }

    #[test]
    fn render_all_subset() {
        let tmp = TempDir::new().unwrap();
        let settings = RenderSettings::default();
        let report = sample_report(&settings);

        let artifacts =
            render_all(&report, &settings, tmp.path(), &[OutputFormat::Html]).unwrap();
        assert_eq!(artifacts.len(), 1);
        assert!(!tmp.path().join("muster-station-reports-2024-05-01.pdf").exists());
    }
}
