//! Boxfit: letterbox detection datasets without breaking their labels.
//!
//! Boxfit resizes images of a fixed capture size into square, padded
//! ("letterboxed") training images and rewrites the matching YOLO label files
//! (boxes plus any number of keypoints) so that every coordinate still points
//! at the same content afterwards.
//!
//! # Modules
//!
//! - [`geometry`]: sizes, typed coordinates and the letterbox parameters
//! - [`letterbox`]: applying the letterbox to pixels
//! - [`annotation`]: parsing and remapping label lines
//! - [`batch`]: running the pipeline over dataset splits
//! - [`viewer`]: drawing labels back onto images for inspection
//! - [`config`]: run configuration
//! - [`error`]: error types for boxfit operations

pub mod annotation;
pub mod batch;
pub mod config;
pub mod dataset;
pub mod error;
pub mod geometry;
pub mod letterbox;
pub mod viewer;

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

pub use config::{Config, SplitConfig};
pub use error::BoxfitError;
pub use geometry::{Size, TransformParams};

/// The boxfit CLI application.
#[derive(Parser)]
#[command(name = "boxfit")]
#[command(version, author, about)]
#[command(propagate_version = true)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

/// Available subcommands.
#[derive(Subcommand)]
enum Commands {
    /// Letterbox every labelled image and rewrite its labels.
    Run(RunArgs),
    /// Render one image with its labels drawn on top.
    View(ViewArgs),
}

/// Arguments for the run subcommand.
#[derive(clap::Args)]
struct RunArgs {
    /// YAML config file; flags below override its values.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Dataset root containing the split directories.
    #[arg(long)]
    root: Option<PathBuf>,

    /// Size the source images (and their labels) were captured at.
    #[arg(long, value_name = "WxH")]
    original: Option<Size>,

    /// Letterbox target size.
    #[arg(long, value_name = "WxH")]
    target: Option<Size>,

    /// Padding colour.
    #[arg(long, value_name = "R,G,B", value_parser = parse_color)]
    fill: Option<[u8; 3]>,

    /// Only process these splits (repeatable). Unknown names use the
    /// images/<name> + labels/<name> layout.
    #[arg(long = "split", value_name = "NAME")]
    splits: Vec<String>,

    /// Write results under this directory instead of overwriting the inputs.
    #[arg(long)]
    output: Option<PathBuf>,

    /// Skip images whose size differs from the original size.
    #[arg(long)]
    strict_size: bool,

    /// Output format for the report.
    #[arg(long, value_enum, default_value = "text")]
    report: ReportFormat,
}

/// Arguments for the view subcommand.
#[derive(clap::Args)]
struct ViewArgs {
    /// Directory of (letterboxed) images.
    #[arg(long)]
    images: PathBuf,

    /// Directory of label files.
    #[arg(long)]
    labels: PathBuf,

    /// Position of the image to render; wraps around past the end.
    #[arg(long, default_value_t = 0)]
    index: usize,

    /// Size the labels are normalized against.
    #[arg(long, value_name = "WxH", default_value = "640x640")]
    size: Size,

    /// Where to write the rendered image.
    #[arg(long)]
    output: PathBuf,
}

#[derive(Copy, Clone, PartialEq, Eq, ValueEnum, Debug)]
enum ReportFormat {
    Text,
    Json,
}

/// Run the boxfit CLI.
///
/// This is the main entry point for the CLI, called from `main.rs`.
pub fn run() -> Result<(), BoxfitError> {
    let cli = Cli::parse();

    match cli.command {
        Some(Commands::Run(args)) => run_letterbox(args),
        Some(Commands::View(args)) => run_view(args),
        None => {
            println!("boxfit {}", env!("CARGO_PKG_VERSION"));
            println!();
            println!("Letterbox detection datasets without breaking their labels.");
            println!();
            println!("Run 'boxfit --help' for usage information.");
            Ok(())
        }
    }
}

/// Execute the run subcommand.
fn run_letterbox(args: RunArgs) -> Result<(), BoxfitError> {
    let mut config = match &args.config {
        Some(path) => Config::from_yaml_file(path)?,
        None => Config::default(),
    };

    if let Some(root) = args.root {
        config.root = root;
    }
    if let Some(original) = args.original {
        config.original_size = original;
    }
    if let Some(target) = args.target {
        config.target_size = target;
    }
    if let Some(fill) = args.fill {
        config.padding_color = fill;
    }
    if args.output.is_some() {
        config.output = args.output;
    }
    if args.strict_size {
        config.strict_size = true;
    }
    if !args.splits.is_empty() {
        config.splits = select_splits(&config.splits, &args.splits);
    }

    let report = batch::run_batch(&config)?;

    match args.report {
        ReportFormat::Json => println!("{}", serde_json::to_string_pretty(&report)?),
        ReportFormat::Text => print!("{}", report),
    }

    if report.is_ok() {
        Ok(())
    } else {
        Err(BoxfitError::BatchFailed {
            failed: report.failed(),
        })
    }
}

/// Execute the view subcommand.
fn run_view(args: ViewArgs) -> Result<(), BoxfitError> {
    let mut navigator =
        viewer::Navigator::for_split(&args.images, &args.labels, &Config::default())?;
    navigator.seek(args.index);

    let rendered = viewer::render_entry(navigator.current(), args.size)?;
    letterbox::write_image(&args.output, &rendered)?;

    println!("{}", navigator.title());
    Ok(())
}

/// Keeps the configured splits named in `names`, in the order given.
fn select_splits(configured: &[SplitConfig], names: &[String]) -> Vec<SplitConfig> {
    names
        .iter()
        .map(|name| {
            configured
                .iter()
                .find(|split| &split.name == name)
                .cloned()
                .unwrap_or_else(|| SplitConfig::conventional(name))
        })
        .collect()
}

fn parse_color(s: &str) -> Result<[u8; 3], String> {
    let parts: Vec<&str> = s.split(',').map(str::trim).collect();
    if parts.len() != 3 {
        return Err(format!("expected R,G,B, got '{s}'"));
    }

    let mut color = [0u8; 3];
    for (channel, raw) in color.iter_mut().zip(parts) {
        *channel = raw
            .parse::<u8>()
            .map_err(|_| format!("invalid colour channel '{raw}' (0-255)"))?;
    }
    Ok(color)
}
