//! kmlring CLI - closed polygon extraction from KML and KMZ files
//!
//! ```bash
//! # Print the polygons of a KML file
//! kmlring extract parcels.kml
//!
//! # JSON with coordinates in [lat, lon] order, for map display
//! kmlring extract parcels.kmz --format json --order lat-lon -o parcels.json
//!
//! # Fail (exit status 1) if any polygon could not be built
//! kmlring extract fields/*.kml --fail-on-error
//!
//! # Show the effective configuration
//! kmlring config show
//! ```

mod config;
mod output;

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use config::{resolve_order, resolve_output_format, Config};
use kmlring_kml::extract_from_bytes;
use log::{debug, info};
use output::{render_json, render_text, CoordinateOrder, FileReport, OutputFormat};
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Parser, Debug)]
#[command(
    name = "kmlring",
    about = "Extract closed polygons from KML and KMZ files",
    long_about = "Extract closed polygon rings from KML and KMZ files.\n\
                  \n\
                  Rings written as disjoint two-point edges are stitched back together and\n\
                  closing coordinates within 1 mm of the opening one are snapped closed.\n\
                  Anything that cannot be turned into a polygon is reported, not fatal.",
    version
)]
struct Args {
    /// Only log errors
    #[arg(short, long, global = true)]
    quiet: bool,

    /// Log extraction details (edge stitching, snapping, archive members)
    #[arg(short, long, global = true, conflicts_with = "quiet")]
    verbose: bool,

    /// Configuration file (overrides ~/.kmlring.toml and ./.kmlring.toml)
    #[arg(long, global = true, value_name = "PATH")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Extract polygons from one or more .kml/.kmz files
    #[command(long_about = "Extract polygons from one or more .kml/.kmz files.\n\
                      \n\
                      Files ending in .kmz (any case) are unpacked and their first .kml member\n\
                      is read. Defaults can be set via .kmlring.toml configuration file.")]
    Extract {
        /// Input files
        #[arg(required = true, value_name = "FILE")]
        inputs: Vec<PathBuf>,

        /// Output format [default: text]
        #[arg(short, long, value_enum)]
        format: Option<OutputFormat>,

        /// Coordinate order of emitted points [default: lon-lat]
        #[arg(long, value_enum)]
        order: Option<CoordinateOrder>,

        /// Compact JSON (no pretty-printing)
        #[arg(long)]
        compact: bool,

        /// Write output to a file instead of stdout
        #[arg(short, long, value_name = "PATH")]
        output: Option<PathBuf>,

        /// Exit with status 1 if any polygon could not be extracted
        #[arg(long)]
        fail_on_error: bool,
    },

    /// Inspect configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand, Debug)]
enum ConfigAction {
    /// Print the merged effective configuration as TOML
    Show,
}

fn init_logging(quiet: bool, verbose: bool) {
    let default_filter = if quiet {
        "error"
    } else if verbose {
        "debug"
    } else {
        "warn"
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .target(env_logger::Target::Stderr)
        .init();
}

fn extract_file(path: &Path, order: CoordinateOrder) -> Result<FileReport> {
    let data = fs::read(path).with_context(|| format!("Failed to read {}", path.display()))?;
    let filename = path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default();

    let result = extract_from_bytes(&filename, &data);
    debug!(
        "{}: {} polygons, {} errors",
        path.display(),
        result.polygons.len(),
        result.errors.len()
    );
    Ok(FileReport::new(path.display().to_string(), &result, order))
}

fn run_extract(
    config: &Config,
    inputs: &[PathBuf],
    format: Option<OutputFormat>,
    order: Option<CoordinateOrder>,
    compact: bool,
    output: Option<&Path>,
    fail_on_error: bool,
) -> Result<()> {
    let defaults = config.extract();
    let format = resolve_output_format(format, defaults.format.as_deref());
    let order = resolve_order(order, defaults.order.as_deref());
    let compact = compact || defaults.compact.unwrap_or(false);
    let fail_on_error = fail_on_error || defaults.fail_on_error.unwrap_or(false);

    let reports = inputs
        .iter()
        .map(|path| extract_file(path, order))
        .collect::<Result<Vec<_>>>()?;

    let rendered = match format {
        OutputFormat::Json => {
            let mut json = render_json(&reports, compact).context("Failed to serialize JSON")?;
            json.push('\n');
            json
        }
        OutputFormat::Text => render_text(&reports, order),
    };

    match output {
        Some(path) => {
            fs::write(path, rendered)
                .with_context(|| format!("Failed to write {}", path.display()))?;
            info!("Wrote {}", path.display());
        }
        None => print!("{rendered}"),
    }

    let error_count: usize = reports.iter().map(|r| r.errors.len()).sum();
    if fail_on_error && error_count > 0 {
        bail!("{error_count} polygon extraction error(s) reported");
    }
    Ok(())
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(args.quiet, args.verbose);

    let config = Config::discover(args.config.as_deref())?;

    match args.command {
        Commands::Extract {
            inputs,
            format,
            order,
            compact,
            output,
            fail_on_error,
        } => run_extract(
            &config,
            &inputs,
            format,
            order,
            compact,
            output.as_deref(),
            fail_on_error,
        ),
        Commands::Config {
            action: ConfigAction::Show,
        } => {
            let rendered = toml::to_string_pretty(&config).context("Failed to serialize config")?;
            print!("{rendered}");
            Ok(())
        }
    }
}
