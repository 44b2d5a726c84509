//! CLI logic for the mapstitch battlemap merger.
//!
//! This module wires the argument and configuration layers to the
//! merge pipeline: inputs are sorted and parsed, merged into one map,
//! and delivered as a stitched image plus a scene JSON file.

pub mod error_adapter;

mod args;
mod config;
mod sink;

pub use args::Args;
pub use sink::FileSceneSink;

use std::fs;
use std::path::{Path, PathBuf};

use log::info;

use mapstitch::config::{AppConfig, StitchConfig, StorageConfig};
use mapstitch::{MergeError, Merger};

/// Run the mapstitch CLI application
///
/// Parses every input document, merges them under the effective
/// configuration, and writes the stitched image, the scene file, and
/// optionally the merged descriptor into the output directory.
///
/// # Errors
///
/// Returns `MergeError` for:
/// - File I/O errors
/// - Configuration loading errors
/// - Parsing errors
/// - Raster or scene errors
pub fn run(args: &Args) -> Result<(), MergeError> {
    let app_config = config::load_config(args.config.as_ref())?;
    let (stitch, storage) = apply_overrides(&app_config, args);
    storage.validate()?;

    // Placement follows case-insensitive file name order, not the
    // order the shell expanded the arguments in.
    let mut inputs = args.inputs.clone();
    inputs.sort_by_key(|path| file_name_of(path).to_uppercase());

    info!(documents = inputs.len(); "Reading battlemap documents");
    let merger = Merger::new(stitch);
    let mut documents = Vec::with_capacity(inputs.len());
    for path in &inputs {
        let source = fs::read_to_string(path)?;
        documents.push(merger.parse(&file_name_of(path), &source)?);
    }

    let merged = merger.merge(&documents)?;

    let image_name = args
        .image_name
        .clone()
        .unwrap_or_else(|| derived_name(&inputs));
    let scene_name = args.scene_name.clone().unwrap_or_else(|| image_name.clone());

    fs::create_dir_all(&args.output)?;
    let image_file = format!("{image_name}.{}", merged.image_format().extension());
    let image_path = args.output.join(&image_file);
    fs::write(&image_path, merged.image())?;
    info!(path = image_path.display().to_string(); "Stitched image written");

    let scene_path = args.output.join(format!("{scene_name}.scene.json"));
    let mut sink = FileSceneSink::new(scene_path);
    let image_reference = storage.image_reference(&image_file);
    merger.deliver(&merged, &scene_name, &image_reference, &mut sink)?;

    if args.descriptor {
        let descriptor_path = args.output.join(format!("{scene_name}.uvtt.json"));
        fs::write(&descriptor_path, merged.descriptor_json()?)?;
        info!(path = descriptor_path.display().to_string(); "Merged descriptor written");
    }

    Ok(())
}

/// Applies command-line overrides on top of the loaded configuration.
fn apply_overrides(config: &AppConfig, args: &Args) -> (StitchConfig, StorageConfig) {
    let mut stitch = config.stitch().clone();
    if let Some(mode) = args.mode {
        stitch = stitch.with_mode(mode);
    }
    if let Some(fidelity) = args.fidelity {
        stitch = stitch.with_fidelity(fidelity);
    }
    if let Some(offset) = args.offset {
        stitch = stitch.with_offset(offset);
    }
    if let Some(padding) = args.padding {
        stitch = stitch.with_padding(padding);
    }
    if args.object_walls {
        stitch = stitch.with_object_walls(true);
    }
    if args.openable_windows {
        stitch = stitch.with_openable_windows(true);
    }
    if args.no_walls_around_files {
        stitch = stitch.with_walls_around_files(false);
    }
    if args.png {
        stitch = stitch.with_webp_conversion(false);
    }
    if let Some(pixels_per_grid) = args.pixels_per_grid {
        stitch = stitch.with_pixels_per_grid(pixels_per_grid);
    }

    let mut storage = config.storage().clone();
    if let Some(backend) = args.storage {
        storage = storage.with_backend(backend);
    }
    if let Some(bucket) = &args.bucket {
        storage = storage.with_bucket(bucket.clone());
    }
    if let Some(region) = &args.region {
        storage = storage.with_region(region.clone());
    }
    if let Some(path) = &args.storage_path {
        storage = storage.with_path(path.clone());
    }

    (stitch, storage)
}

fn file_name_of(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default()
}

/// Output base name derived from the sorted input files.
///
/// A single input keeps its base name (the part before the first
/// dot); several inputs join their base names under a `combined-`
/// prefix.
fn derived_name(inputs: &[PathBuf]) -> String {
    let base_names: Vec<String> = inputs
        .iter()
        .map(|path| base_name(&file_name_of(path)))
        .collect();
    match base_names.as_slice() {
        [] => String::new(),
        [single] => single.clone(),
        several => format!("combined-{}", several.join("-")),
    }
}

fn base_name(file_name: &str) -> String {
    file_name
        .split('.')
        .next()
        .unwrap_or(file_name)
        .to_string()
}
