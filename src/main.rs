use clap::{Parser, Subcommand, ValueEnum};
use muster_report::edit::{CellEdit, apply_edit};
use muster_report::render::{OutputFormat, render_all};
use muster_report::report::build_report;
use muster_report::types::{DatasetManifest, RowField};
use muster_report::{config, group, ingest, output};
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "muster-report")]
#[command(about = "Muster-station reports grouped by lifeboat station")]
#[command(long_about = "\
Muster-station reports grouped by lifeboat station

Reads a roster spreadsheet (.xlsx or .csv) with these columns:

  Person Names | Roles | Companies | Cabin | Bunk |
  MusterStation General Alarm primary | Status

Occupied rows are grouped by the LB<digits> code found in the muster-station
column (\"LB5 - Deck 3 PS\" → LB5) and rendered as a printable HTML page, a
PDF and an XLSX workbook. Every output has an overview of all stations first,
followed by one report per station.

Pipeline:

  ingest  roster.xlsx  → .muster-report-temp/dataset.json
  render  dataset.json → dist/muster-station-reports-<date>.{html,pdf,xlsx}

Run 'muster-report gen-config' to generate a documented settings.toml.")]
#[command(version)]
struct Cli {
    /// Settings file (stock defaults are used when it does not exist)
    #[arg(long, default_value = "settings.toml", global = true)]
    config: PathBuf,

    /// Output directory
    #[arg(long, default_value = "dist", global = true)]
    output: PathBuf,

    /// Directory for intermediate files (dataset manifest)
    #[arg(long, default_value = ".muster-report-temp", global = true)]
    temp_dir: PathBuf,

    /// Increase log verbosity (-v info, -vv debug)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Command,
}

/// Which artifacts to render.
#[derive(Clone, Copy, ValueEnum)]
enum FormatArg {
    Html,
    Pdf,
    Xlsx,
    All,
}

impl FormatArg {
    fn formats(self) -> Vec<OutputFormat> {
        match self {
            FormatArg::Html => vec![OutputFormat::Html],
            FormatArg::Pdf => vec![OutputFormat::Pdf],
            FormatArg::Xlsx => vec![OutputFormat::Xlsx],
            FormatArg::All => OutputFormat::ALL.to_vec(),
        }
    }
}

#[derive(Subcommand)]
enum Command {
    /// Read and validate a roster into the dataset manifest
    Ingest {
        /// Roster file (.xlsx or .csv)
        input: PathBuf,
    },
    /// Render reports from the dataset manifest
    Render {
        #[arg(long, value_enum, default_value = "all")]
        format: FormatArg,
    },
    /// Run the full pipeline: ingest → render
    Build {
        /// Roster file (.xlsx or .csv)
        input: PathBuf,
        #[arg(long, value_enum, default_value = "all")]
        format: FormatArg,
    },
    /// Validate a roster and show the station breakdown without writing anything
    Check {
        /// Roster file (.xlsx or .csv)
        input: PathBuf,
    },
    /// Change one cell of the dataset manifest
    Edit {
        /// Data row number, starting at 1
        #[arg(long)]
        row: usize,
        /// Field to change (person-names, role, company, cabin, bunk, muster-station, status)
        #[arg(long)]
        field: RowField,
        /// New cell value
        #[arg(long)]
        value: String,
    },
    /// Print a stock settings.toml with all options documented
    GenConfig,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match cli.command {
        Command::Ingest { input } => {
            let settings = config::load_settings(&cli.config)?;
            let manifest = ingest_to_manifest(&input, &settings, &cli.temp_dir)?;
            let grouped = group::group(&manifest.dataset, &settings.stations.station_codes());
            output::print_ingest_output(&grouped, &manifest.source);
        }
        Command::Render { format } => {
            let settings = config::load_settings(&cli.config)?;
            let manifest = read_manifest(&cli.temp_dir)?;
            render_manifest(&manifest, &settings, &cli.output, &format.formats())?;
        }
        Command::Build { input, format } => {
            let settings = config::load_settings(&cli.config)?;

            println!("==> Stage 1: Ingesting {}", input.display());
            let manifest = ingest_to_manifest(&input, &settings, &cli.temp_dir)?;
            let grouped = group::group(&manifest.dataset, &settings.stations.station_codes());
            output::print_ingest_output(&grouped, &manifest.source);

            println!("==> Stage 2: Rendering reports → {}", cli.output.display());
            render_manifest(&manifest, &settings, &cli.output, &format.formats())?;

            println!("==> Build complete: {}", cli.output.display());
        }
        Command::Check { input } => {
            let settings = config::load_settings(&cli.config)?;
            println!("==> Checking {}", input.display());
            let dataset = ingest::load(&input, &settings.input)?;
            let grouped = group::group(&dataset, &settings.stations.station_codes());
            output::print_ingest_output(&grouped, &input.display().to_string());
            println!("==> Roster is valid");
        }
        Command::Edit { row, field, value } => {
            let manifest = read_manifest(&cli.temp_dir)?;
            let edit = CellEdit { row, field, value };
            let dataset = apply_edit(&manifest.dataset, &edit)?;
            let before = manifest.dataset.rows[row - 1].get(field);
            let after = dataset.rows[row - 1].get(field);
            write_manifest(
                &cli.temp_dir,
                &DatasetManifest {
                    source: manifest.source,
                    dataset,
                },
            )?;
            output::print_edit_output(&edit, &before, &after);
        }
        Command::GenConfig => {
            print!("{}", config::stock_config_toml());
        }
    }

    Ok(())
}

/// Route `log` output through env_logger. `RUST_LOG` wins over `-v`.
fn init_logging(verbose: u8) {
    let default_level = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .init();
}

fn manifest_path(temp_dir: &Path) -> PathBuf {
    temp_dir.join("dataset.json")
}

fn read_manifest(temp_dir: &Path) -> Result<DatasetManifest, Box<dyn std::error::Error>> {
    let path = manifest_path(temp_dir);
    let content = std::fs::read_to_string(&path).map_err(|e| {
        format!(
            "cannot read {} ({e}); run 'muster-report ingest <INPUT>' first",
            path.display()
        )
    })?;
    Ok(serde_json::from_str(&content)?)
}

fn write_manifest(
    temp_dir: &Path,
    manifest: &DatasetManifest,
) -> Result<(), Box<dyn std::error::Error>> {
    std::fs::create_dir_all(temp_dir)?;
    let json = serde_json::to_string_pretty(manifest)?;
    std::fs::write(manifest_path(temp_dir), json)?;
    Ok(())
}

fn ingest_to_manifest(
    input: &Path,
    settings: &config::RenderSettings,
    temp_dir: &Path,
) -> Result<DatasetManifest, Box<dyn std::error::Error>> {
    let dataset = ingest::load(input, &settings.input)?;
    let manifest = DatasetManifest {
        source: input.display().to_string(),
        dataset,
    };
    write_manifest(temp_dir, &manifest)?;
    Ok(manifest)
}

fn render_manifest(
    manifest: &DatasetManifest,
    settings: &config::RenderSettings,
    output_dir: &Path,
    formats: &[OutputFormat],
) -> Result<(), Box<dyn std::error::Error>> {
    let grouped = group::group(&manifest.dataset, &settings.stations.station_codes());
    let generated_at = chrono::Local::now().naive_local();
    let report = build_report(&grouped, settings, generated_at);
    let artifacts = render_all(&report, settings, output_dir, formats)?;
    output::print_render_output(&report, &artifacts);
    Ok(())
}
