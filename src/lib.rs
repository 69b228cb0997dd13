//! Cobgauge: measure a photographed object against a reference coin.
//!
//! A photo showing a coin of known diameter next to the object (a corn cob,
//! say) is segmented against its background, the connected regions are
//! split into "reference" and "measured" roles, and the coin's pixel size
//! gives the scale for the object's length.
//!
//! # Modules
//!
//! - [`photo`]: validated RGB input photos
//! - [`config`]: measurement tunables and config files
//! - [`measure`]: the segmentation, classification and calibration pipeline
//! - [`batch`]: measuring a whole directory of photos
//! - [`synthetic`]: scenes with known geometry for tests and benchmarks
//! - [`error`]: error types for cobgauge operations
//!
//! # Example
//!
//! ```
//! use cobgauge::config::MeasureConfig;
//! use cobgauge::measure::analyze;
//! use cobgauge::synthetic::coin_and_cob;
//!
//! let photo = coin_and_cob(400, 300);
//! let analysis = analyze(&photo, &MeasureConfig::default()).unwrap();
//! assert!(analysis.length().is_some());
//! ```

pub mod batch;
pub mod config;
pub mod error;
pub mod measure;
pub mod photo;
pub mod synthetic;

use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};

pub use error::CobgaugeError;

use config::MeasureConfig;
use measure::Analysis;
use photo::Photo;

/// The cobgauge CLI application.
#[derive(Parser)]
#[command(name = "cobgauge")]
#[command(version, about)]
#[command(propagate_version = true)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

/// Available subcommands.
#[derive(Subcommand)]
enum Commands {
    /// Measure the object in a single photo.
    Measure(MeasureArgs),
    /// Measure every photo under a directory.
    Batch(BatchArgs),
}

/// Config overrides shared by all subcommands.
#[derive(clap::Args, Debug, Clone, Default)]
struct ConfigArgs {
    /// YAML or JSON config file (`.json` is read as JSON).
    #[arg(long, env = "COBGAUGE_CONFIG")]
    config: Option<PathBuf>,

    /// Real diameter of the reference coin.
    #[arg(long)]
    coin_diameter: Option<f64>,

    /// Unit label used in reports.
    #[arg(long)]
    unit: Option<String>,

    /// Foreground threshold in (0, 1).
    #[arg(long)]
    sensitivity: Option<f64>,

    /// Minimum region size in visited pixels.
    #[arg(long)]
    min_area: Option<u32>,

    /// Seed scan step in pixels.
    #[arg(long)]
    scan_stride: Option<u32>,

    /// Neighbour probe distance in pixels.
    #[arg(long)]
    growth_step: Option<u32>,

    /// Downscale photos whose longer side exceeds this many pixels.
    #[arg(long)]
    max_side: Option<u32>,
}

impl ConfigArgs {
    /// Loads the config file, if any, then applies flag overrides.
    fn resolve(&self) -> Result<MeasureConfig, CobgaugeError> {
        let mut config = match &self.config {
            Some(path) => MeasureConfig::from_path(path)?,
            None => MeasureConfig::default(),
        };

        if let Some(v) = self.coin_diameter {
            config.coin_real_diameter = v;
        }
        if let Some(v) = &self.unit {
            config.unit_label = v.clone();
        }
        if let Some(v) = self.sensitivity {
            config.sensitivity = v;
        }
        if let Some(v) = self.min_area {
            config.min_pixel_area = v;
        }
        if let Some(v) = self.scan_stride {
            config.scan_stride = v;
        }
        if let Some(v) = self.growth_step {
            config.growth_step = v;
        }

        config.validate()?;
        Ok(config)
    }
}

/// Arguments for the measure subcommand.
#[derive(clap::Args)]
struct MeasureArgs {
    /// Photo to measure.
    input: PathBuf,

    #[command(flatten)]
    config: ConfigArgs,

    /// Write the region visualization to this path (format from extension).
    #[arg(long)]
    debug_image: Option<PathBuf>,

    /// Output format for the report ('text' or 'json').
    #[arg(long, default_value = "text")]
    output: String,
}

/// Arguments for the batch subcommand.
#[derive(clap::Args)]
struct BatchArgs {
    /// Directory searched recursively for png/jpg/jpeg/bmp photos.
    input: PathBuf,

    #[command(flatten)]
    config: ConfigArgs,

    /// Output format for the report ('text', 'json' or 'csv').
    #[arg(long, default_value = "text")]
    output: String,
}

/// Run the cobgauge CLI.
///
/// This is the main entry point for the CLI, called from `main.rs`.
pub fn run() -> Result<(), CobgaugeError> {
    let cli = Cli::parse();

    match cli.command {
        Some(Commands::Measure(args)) => run_measure(args),
        Some(Commands::Batch(args)) => run_batch(args),
        None => {
            println!("cobgauge {}", env!("CARGO_PKG_VERSION"));
            println!();
            println!("Measure a photographed object against a reference coin.");
            println!();
            println!("Run 'cobgauge --help' for usage information.");
            Ok(())
        }
    }
}

/// Execute the measure subcommand.
fn run_measure(args: MeasureArgs) -> Result<(), CobgaugeError> {
    check_output_format(&args.output, &["text", "json"])?;
    let config = args.config.resolve()?;

    let photo = Photo::open(&args.input, args.config.max_side)?;
    tracing::info!(
        path = %args.input.display(),
        width = photo.width(),
        height = photo.height(),
        "photo loaded"
    );

    let analysis = measure::analyze(&photo, &config)?;

    if let Some(path) = &args.debug_image {
        save_debug_image(&analysis, path)?;
        tracing::info!(path = %path.display(), "debug image written");
    }

    let report = analysis.report(&config.unit_label);
    match args.output.as_str() {
        "json" => println!("{}", serde_json::to_string_pretty(&report)?),
        _ => print!("{}", report),
    }

    match analysis.outcome {
        Ok(_) => Ok(()),
        Err(failure) => Err(CobgaugeError::MeasurementFailed { failure }),
    }
}

/// Execute the batch subcommand.
fn run_batch(args: BatchArgs) -> Result<(), CobgaugeError> {
    check_output_format(&args.output, &["text", "json", "csv"])?;
    let config = args.config.resolve()?;
    let opts = batch::BatchOptions {
        max_side: args.config.max_side,
    };

    let report = batch::measure_dir(&args.input, &config, &opts)?;

    match args.output.as_str() {
        "json" => println!("{}", serde_json::to_string_pretty(&report)?),
        "csv" => print!("{}", report.to_csv_string()?),
        _ => print!("{}", report),
    }

    Ok(())
}

fn check_output_format(output: &str, supported: &[&str]) -> Result<(), CobgaugeError> {
    if supported.contains(&output) {
        Ok(())
    } else {
        Err(CobgaugeError::UnsupportedFormat(format!(
            "'{}' (supported: {})",
            output,
            supported.join(", ")
        )))
    }
}

/// Saves the analysis debug image, picking the format from the extension.
pub fn save_debug_image(analysis: &Analysis, path: &Path) -> Result<(), CobgaugeError> {
    analysis
        .debug_image
        .save(path)
        .map_err(|source| CobgaugeError::ImageWrite {
            path: path.to_path_buf(),
            source,
        })
}
