//! LumaFX CLI: command-line host for the pixel transform engine.
//!
//! Usage:
//!   lumafx process <INPUT> -o <OUTPUT>   Transform a raw I420 stream
//!   lumafx info <INPUT>                  Show per-frame luma statistics
//!   lumafx config                        Show or write the configuration

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use lumafx_common::config::AppConfig;
use lumafx_frame_model::{FrameGeometry, ModeSelection};
use lumafx_processing_core::HalftoneDiffuser;

mod commands;

#[derive(Parser)]
#[command(
    name = "lumafx",
    about = "Halftone and histogram-equalize raw I420 video",
    version,
    author
)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Config file (defaults to $XDG_CONFIG_HOME/lumafx/config.json)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Append logs to this file instead of stderr
    #[arg(long, global = true)]
    log_file: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

/// Frame dimensions; unset values come from the config file.
#[derive(Args)]
struct GeometryArgs {
    /// Frame width in pixels
    #[arg(long)]
    width: Option<u32>,

    /// Frame height in pixels
    #[arg(long)]
    height: Option<u32>,
}

impl GeometryArgs {
    fn resolve(&self, config: &AppConfig) -> anyhow::Result<FrameGeometry> {
        let width = self.width.unwrap_or(config.processing.width);
        let height = self.height.unwrap_or(config.processing.height);
        Ok(FrameGeometry::new(width, height)?)
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Transform every frame of a raw I420 stream
    Process {
        /// Raw I420 input file
        input: PathBuf,

        /// Raw I420 output file
        #[arg(short, long)]
        output: PathBuf,

        #[command(flatten)]
        geometry: GeometryArgs,

        /// Neutralize chroma
        #[arg(long)]
        grayscale: bool,

        /// Error-diffusion halftone the luma plane (takes precedence over --histeq)
        #[arg(long)]
        halftone: bool,

        /// Histogram-equalize the luma plane
        #[arg(long)]
        histeq: bool,

        /// Halftone threshold
        #[arg(long)]
        threshold: Option<u8>,

        /// Halftone level for values above the threshold
        #[arg(long)]
        high: Option<u8>,

        /// Halftone level for values at or below the threshold
        #[arg(long)]
        low: Option<u8>,
    },

    /// Show per-frame luma statistics of a raw I420 stream
    Info {
        /// Raw I420 input file
        input: PathBuf,

        #[command(flatten)]
        geometry: GeometryArgs,
    },

    /// Show the effective configuration
    Config {
        /// Write it to the standard config location
        #[arg(long)]
        write: bool,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => AppConfig::load_from(path)
            .map_err(|e| anyhow::anyhow!("Failed to load config {}: {e}", path.display()))?,
        None => AppConfig::load(),
    };

    // Initialize logging
    let mut logging = config.logging.clone();
    if cli.verbose {
        logging.level = "debug".to_string();
    }
    if let Some(path) = cli.log_file.clone() {
        logging.file = Some(path);
    }
    lumafx_common::logging::init_logging(&logging)
        .map_err(|e| anyhow::anyhow!("Failed to initialize logging: {e}"))?;

    match cli.command {
        Commands::Process {
            input,
            output,
            geometry,
            grayscale,
            halftone,
            histeq,
            threshold,
            high,
            low,
        } => {
            let levels = config.processing.halftone;
            let options = commands::process::ProcessOptions {
                input,
                output,
                geometry: geometry.resolve(&config)?,
                mode: ModeSelection {
                    grayscale,
                    halftone,
                    histogram_equalize: histeq,
                },
                diffuser: HalftoneDiffuser::new(
                    threshold.unwrap_or(levels.threshold),
                    high.unwrap_or(levels.high_value),
                    low.unwrap_or(levels.low_value),
                ),
            };
            commands::process::run(options)
        }
        Commands::Info { input, geometry } => {
            commands::info::run(input, geometry.resolve(&config)?)
        }
        Commands::Config { write } => commands::config::run(&config, write),
    }
}
