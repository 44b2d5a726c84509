//! Configuration types for the merge pipeline.
//!
//! [`AppConfig`] is the file-level configuration: a `[stitch]` table for
//! geometry and raster behaviour plus a `[storage]` table describing
//! where the stitched image ends up. Both tables are optional and every
//! field has a default, so an empty configuration file is valid.

use std::str::FromStr;

use serde::Deserialize;

use mapstitch_core::raster::RasterFormat;

use crate::layout::StitchMode;

/// Top-level application configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    stitch: StitchConfig,
    #[serde(default)]
    storage: StorageConfig,
}

impl AppConfig {
    pub fn new(stitch: StitchConfig, storage: StorageConfig) -> Self {
        Self { stitch, storage }
    }

    pub fn stitch(&self) -> &StitchConfig {
        &self.stitch
    }

    pub fn storage(&self) -> &StorageConfig {
        &self.storage
    }
}

/// Controls for layout, wall synthesis, and raster output.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct StitchConfig {
    /// How the source maps are arranged on the stitched canvas.
    #[serde(default)]
    mode: StitchMode,
    /// Wall detail retention, 1 (aggressive decimation) to 5 (keep
    /// nearly every point).
    #[serde(default = "default_fidelity")]
    fidelity: u8,
    /// Cave smoothing offset in grid units. Zero disables smoothing.
    #[serde(default)]
    offset: f64,
    /// Fraction of the map dimensions the scene host pads around the
    /// image.
    #[serde(default = "default_padding")]
    padding: f64,
    /// Encode the stitched image as lossless WebP instead of PNG.
    #[serde(default = "default_true")]
    webp_conversion: bool,
    /// Draw a sight-blocking rectangle around each stitched file.
    #[serde(default = "default_true")]
    walls_around_files: bool,
    /// Include furniture and scenery walls alongside line-of-sight
    /// walls.
    #[serde(default)]
    object_walls: bool,
    /// Emit every door as an openable window.
    #[serde(default)]
    openable_windows: bool,
    /// Ignore the first document's grid density and use
    /// `custom_pixels_per_grid` instead.
    #[serde(default)]
    use_custom_pixels_per_grid: bool,
    #[serde(default = "default_custom_pixels_per_grid")]
    custom_pixels_per_grid: f64,
}

impl StitchConfig {
    pub fn mode(&self) -> StitchMode {
        self.mode
    }

    pub fn fidelity(&self) -> u8 {
        self.fidelity.clamp(1, 5)
    }

    /// Number of consecutive short-segment points dropped per retained
    /// point during decimation.
    pub fn skip_points(&self) -> u32 {
        u32::from(6 - self.fidelity())
    }

    pub fn offset(&self) -> f64 {
        self.offset
    }

    pub fn padding(&self) -> f64 {
        self.padding
    }

    pub fn walls_around_files(&self) -> bool {
        self.walls_around_files
    }

    pub fn object_walls(&self) -> bool {
        self.object_walls
    }

    pub fn openable_windows(&self) -> bool {
        self.openable_windows
    }

    /// Grid density override, when one is configured.
    pub fn pixels_per_grid_override(&self) -> Option<f64> {
        self.use_custom_pixels_per_grid
            .then_some(self.custom_pixels_per_grid)
    }

    /// Encoding for the stitched raster.
    pub fn output_format(&self) -> RasterFormat {
        if self.webp_conversion {
            RasterFormat::Webp
        } else {
            RasterFormat::Png
        }
    }

    pub fn with_mode(mut self, mode: StitchMode) -> Self {
        self.mode = mode;
        self
    }

    pub fn with_fidelity(mut self, fidelity: u8) -> Self {
        self.fidelity = fidelity;
        self
    }

    pub fn with_offset(mut self, offset: f64) -> Self {
        self.offset = offset;
        self
    }

    pub fn with_padding(mut self, padding: f64) -> Self {
        self.padding = padding;
        self
    }

    pub fn with_webp_conversion(mut self, webp_conversion: bool) -> Self {
        self.webp_conversion = webp_conversion;
        self
    }

    pub fn with_walls_around_files(mut self, walls_around_files: bool) -> Self {
        self.walls_around_files = walls_around_files;
        self
    }

    pub fn with_object_walls(mut self, object_walls: bool) -> Self {
        self.object_walls = object_walls;
        self
    }

    pub fn with_openable_windows(mut self, openable_windows: bool) -> Self {
        self.openable_windows = openable_windows;
        self
    }

    pub fn with_pixels_per_grid(mut self, pixels_per_grid: f64) -> Self {
        self.use_custom_pixels_per_grid = true;
        self.custom_pixels_per_grid = pixels_per_grid;
        self
    }
}

impl Default for StitchConfig {
    fn default() -> Self {
        Self {
            mode: StitchMode::default(),
            fidelity: default_fidelity(),
            offset: 0.0,
            padding: default_padding(),
            webp_conversion: true,
            walls_around_files: true,
            object_walls: false,
            openable_windows: false,
            use_custom_pixels_per_grid: false,
            custom_pixels_per_grid: default_custom_pixels_per_grid(),
        }
    }
}

/// Where the stitched image lives, as seen from the scene record.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct StorageConfig {
    #[serde(default)]
    backend: StorageBackend,
    #[serde(default)]
    bucket: String,
    #[serde(default)]
    region: String,
    /// Path prefix prepended to the image file name.
    #[serde(default)]
    path: String,
}

impl StorageConfig {
    pub fn backend(&self) -> StorageBackend {
        self.backend
    }

    pub fn bucket(&self) -> &str {
        &self.bucket
    }

    pub fn region(&self) -> &str {
        &self.region
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    /// Rejects configurations the image reference cannot be built from.
    pub fn validate(&self) -> Result<(), crate::MergeError> {
        if self.backend == StorageBackend::S3 && (self.bucket.is_empty() || self.region.is_empty())
        {
            return Err(crate::MergeError::Config(
                "S3 storage requires both a bucket and a region".to_string(),
            ));
        }
        Ok(())
    }

    /// Builds the image reference recorded in the scene.
    ///
    /// For local data storage this is `path/file`; for S3 it is the
    /// full virtual-hosted bucket URL.
    pub fn image_reference(&self, file_name: &str) -> String {
        let mut path = self.path.clone();
        if !path.is_empty() && !path.ends_with('/') {
            path.push('/');
        }
        let mut reference = format!("{path}{file_name}");
        match self.backend {
            StorageBackend::Data => reference,
            StorageBackend::S3 => {
                if !reference.starts_with('/') {
                    reference.insert(0, '/');
                }
                format!(
                    "https://{}.s3.{}.amazonaws.com{}",
                    self.bucket, self.region, reference
                )
            }
        }
    }

    pub fn with_backend(mut self, backend: StorageBackend) -> Self {
        self.backend = backend;
        self
    }

    pub fn with_bucket(mut self, bucket: impl Into<String>) -> Self {
        self.bucket = bucket.into();
        self
    }

    pub fn with_region(mut self, region: impl Into<String>) -> Self {
        self.region = region.into();
        self
    }

    pub fn with_path(mut self, path: impl Into<String>) -> Self {
        self.path = path.into();
        self
    }
}

/// Supported storage backends for the stitched image.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StorageBackend {
    /// Keep the image next to the scene file.
    #[default]
    Data,
    /// Reference the image through an S3 bucket URL.
    S3,
}

impl FromStr for StorageBackend {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.to_ascii_lowercase().as_str() {
            "data" => Ok(Self::Data),
            "s3" => Ok(Self::S3),
            other => Err(format!("unknown storage backend: {other} (expected data or s3)")),
        }
    }
}

fn default_fidelity() -> u8 {
    3
}

fn default_padding() -> f64 {
    0.25
}

fn default_custom_pixels_per_grid() -> f64 {
    100.0
}

fn default_true() -> bool {
    true
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_stitch_config() {
        let config = StitchConfig::default();
        assert_eq!(config.mode(), StitchMode::Grid);
        assert_eq!(config.fidelity(), 3);
        assert_eq!(config.offset(), 0.0);
        assert_eq!(config.padding(), 0.25);
        assert!(config.walls_around_files());
        assert!(!config.object_walls());
        assert!(!config.openable_windows());
        assert_eq!(config.pixels_per_grid_override(), None);
        assert_eq!(config.output_format(), RasterFormat::Webp);
    }

    #[test]
    fn skip_points_tracks_fidelity() {
        assert_eq!(StitchConfig::default().with_fidelity(1).skip_points(), 5);
        assert_eq!(StitchConfig::default().with_fidelity(3).skip_points(), 3);
        assert_eq!(StitchConfig::default().with_fidelity(5).skip_points(), 1);
    }

    #[test]
    fn out_of_range_fidelity_is_clamped() {
        assert_eq!(StitchConfig::default().with_fidelity(0).fidelity(), 1);
        assert_eq!(StitchConfig::default().with_fidelity(9).fidelity(), 5);
        assert_eq!(StitchConfig::default().with_fidelity(9).skip_points(), 1);
    }

    #[test]
    fn deserialize_partial_config() {
        let config: AppConfig = serde_json::from_value(serde_json::json!({
            "stitch": { "mode": "vertical", "fidelity": 5 }
        }))
        .expect("Config should deserialize");
        assert_eq!(config.stitch().mode(), StitchMode::Vertical);
        assert_eq!(config.stitch().fidelity(), 5);
        assert_eq!(config.stitch().padding(), 0.25);
        assert_eq!(config.storage().backend(), StorageBackend::Data);
    }

    #[test]
    fn deserialize_empty_config() {
        let config: AppConfig =
            serde_json::from_value(serde_json::json!({})).expect("Empty config should deserialize");
        assert!(config.stitch().walls_around_files());
        assert_eq!(config.storage().path(), "");
    }

    #[test]
    fn png_output_when_webp_disabled() {
        let config = StitchConfig::default().with_webp_conversion(false);
        assert_eq!(config.output_format(), RasterFormat::Png);
    }

    #[test]
    fn custom_pixels_per_grid_override() {
        let config = StitchConfig::default().with_pixels_per_grid(140.0);
        assert_eq!(config.pixels_per_grid_override(), Some(140.0));
    }

    #[test]
    fn data_image_reference_joins_path() {
        let storage = StorageConfig::default().with_path("maps");
        assert_eq!(storage.image_reference("cave.webp"), "maps/cave.webp");
    }

    #[test]
    fn data_image_reference_without_path() {
        let storage = StorageConfig::default();
        assert_eq!(storage.image_reference("cave.webp"), "cave.webp");
    }

    #[test]
    fn data_image_reference_keeps_existing_slash() {
        let storage = StorageConfig::default().with_path("maps/");
        assert_eq!(storage.image_reference("cave.webp"), "maps/cave.webp");
    }

    #[test]
    fn s3_image_reference_builds_bucket_url() {
        let storage = StorageConfig::default()
            .with_backend(StorageBackend::S3)
            .with_bucket("battlemaps")
            .with_region("eu-west-1")
            .with_path("stitched");
        assert_eq!(
            storage.image_reference("cave.webp"),
            "https://battlemaps.s3.eu-west-1.amazonaws.com/stitched/cave.webp"
        );
    }

    #[test]
    fn s3_validation_requires_bucket_and_region() {
        let storage = StorageConfig::default().with_backend(StorageBackend::S3);
        assert!(storage.validate().is_err());

        let complete = storage.with_bucket("battlemaps").with_region("eu-west-1");
        assert!(complete.validate().is_ok());
    }

    #[test]
    fn storage_backend_from_str() {
        assert_eq!("data".parse::<StorageBackend>(), Ok(StorageBackend::Data));
        assert_eq!("S3".parse::<StorageBackend>(), Ok(StorageBackend::S3));
        assert!("ftp".parse::<StorageBackend>().is_err());
    }
}
