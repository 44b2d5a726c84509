//! Command-line argument definitions for the mapstitch CLI.
//!
//! This module defines the [`Args`] structure parsed from the command
//! line using [`clap`]. Flags mirror the `[stitch]` and `[storage]`
//! configuration tables and override whatever the configuration file
//! provides.

use std::path::PathBuf;
use std::str::FromStr;

use clap::Parser;

use mapstitch::StitchMode;
use mapstitch::config::StorageBackend;

/// Command-line arguments for the mapstitch battlemap merger
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Battlemap files to merge (universal VTT JSON exports)
    #[arg(required = true, help = "Paths to the input battlemap files")]
    pub inputs: Vec<PathBuf>,

    /// Directory the stitched image and scene file are written to
    #[arg(short, long, default_value = ".")]
    pub output: PathBuf,

    /// Scene name (defaults to a name derived from the input files)
    #[arg(long)]
    pub scene_name: Option<String>,

    /// Image file name without extension (defaults to the derived name)
    #[arg(long)]
    pub image_name: Option<String>,

    /// Stitch arrangement: grid, vertical, or horizontal
    #[arg(long, value_parser = StitchMode::from_str)]
    pub mode: Option<StitchMode>,

    /// Wall detail retention, 1 (aggressive) to 5 (keep nearly all)
    #[arg(long, value_parser = clap::value_parser!(u8).range(1..=5))]
    pub fidelity: Option<u8>,

    /// Cave smoothing offset in grid squares (0 disables smoothing)
    #[arg(long)]
    pub offset: Option<f64>,

    /// Scene padding as a fraction of the map dimensions
    #[arg(long)]
    pub padding: Option<f64>,

    /// Include furniture and scenery walls
    #[arg(long)]
    pub object_walls: bool,

    /// Emit every door as an openable window
    #[arg(long)]
    pub openable_windows: bool,

    /// Skip the boundary walls drawn around each stitched file
    #[arg(long)]
    pub no_walls_around_files: bool,

    /// Write the stitched image as PNG instead of lossless WebP
    #[arg(long)]
    pub png: bool,

    /// Override the grid density instead of using the first document's
    #[arg(long)]
    pub pixels_per_grid: Option<f64>,

    /// Also write the merged descriptor JSON next to the scene file
    #[arg(long)]
    pub descriptor: bool,

    /// Storage backend the image reference points at (data or s3)
    #[arg(long, value_parser = StorageBackend::from_str)]
    pub storage: Option<StorageBackend>,

    /// S3 bucket for image references
    #[arg(long)]
    pub bucket: Option<String>,

    /// S3 region for image references
    #[arg(long)]
    pub region: Option<String>,

    /// Path prefix prepended to the image reference
    #[arg(long)]
    pub storage_path: Option<String>,

    /// Path to configuration file (TOML)
    #[arg(short, long)]
    pub config: Option<String>,

    /// Log level (off, error, warn, info, debug, trace)
    #[arg(long, default_value = "info")]
    pub log_level: String,
}
