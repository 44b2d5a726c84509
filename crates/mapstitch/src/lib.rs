//! Mapstitch merges battlemap exports into a single scene.
//!
//! N universal VTT documents become one stitched raster plus one
//! coherent set of walls, doors, and lights in scene pixel space. The
//! pipeline is parse, lay out, translate, composite, then project:
//!
//! ```text
//! .dd2vtt sources -> MapDocument -> LayoutPlan -> MergedMap -> SceneSink
//! ```
//!
//! [`Merger`] is the entry point:
//!
//! ```rust,no_run
//! use mapstitch::{Merger, config::StitchConfig};
//!
//! # fn main() -> Result<(), mapstitch::MergeError> {
//! let sources = vec![
//!     ("east.dd2vtt".to_string(), std::fs::read_to_string("east.dd2vtt")?),
//!     ("west.dd2vtt".to_string(), std::fs::read_to_string("west.dd2vtt")?),
//! ];
//!
//! let merger = Merger::new(StitchConfig::default());
//! let documents = sources
//!     .iter()
//!     .map(|(label, source)| merger.parse(label, source))
//!     .collect::<Result<Vec<_>, _>>()?;
//!
//! let merged = merger.merge(&documents)?;
//! std::fs::write("stitched.webp", merged.image())?;
//! # Ok(())
//! # }
//! ```

pub mod config;

mod composite;
mod decimate;
mod error;
mod layout;
mod project;
mod scene;
mod smooth;
mod translate;
mod walls;

pub use composite::{Compositor, ImageCompositor};
pub use error::MergeError;
pub use layout::StitchMode;
pub use scene::{
    LightPoint, SceneDimensions, SceneError, SceneRecord, SceneSink, WallSegment, WallSense,
};

pub use mapstitch_core::{document, feature, geometry, raster, resolution};

use log::{debug, info};
use serde::Serialize;
use serde_json::Value;

use mapstitch_core::document::MapDocument;
use mapstitch_core::feature::{Light, Portal, Ring};
use mapstitch_core::raster::RasterFormat;
use mapstitch_core::resolution::Resolution;

use config::StitchConfig;
use layout::LayoutPlan;

/// Version tag of the merged descriptor format.
const DESCRIPTOR_FORMAT: f64 = 0.2;

/// Merges battlemap documents under one configuration.
#[derive(Debug, Clone, Default)]
pub struct Merger {
    config: StitchConfig,
}

impl Merger {
    pub fn new(config: StitchConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &StitchConfig {
        &self.config
    }

    /// Parses one universal VTT document.
    ///
    /// `label` names the source in logs and errors, usually the file
    /// name.
    pub fn parse(&self, label: &str, source: &str) -> Result<MapDocument, MergeError> {
        Ok(mapstitch_parser::parse_document(label, source)?)
    }

    /// Merges documents into a stitched raster and combined features.
    pub fn merge(&self, documents: &[MapDocument]) -> Result<MergedMap, MergeError> {
        self.merge_with(&ImageCompositor, documents)
    }

    /// Merges documents using a caller-supplied raster backend.
    pub fn merge_with<C: Compositor>(
        &self,
        compositor: &C,
        documents: &[MapDocument],
    ) -> Result<MergedMap, MergeError> {
        let Some(first) = documents.first() else {
            return Err(MergeError::NoDocuments);
        };
        let pixels_per_grid = self
            .config
            .pixels_per_grid_override()
            .unwrap_or_else(|| first.resolution().pixels_per_grid());
        info!(
            documents = documents.len(),
            pixels_per_grid = pixels_per_grid;
            "Merging battlemap documents"
        );

        let plan = LayoutPlan::compute(documents, self.config.mode(), pixels_per_grid)?;
        let features = translate::merge_features(
            documents,
            &plan,
            self.config.object_walls(),
            self.config.walls_around_files(),
        );

        let canvas = composite::compose(compositor, documents, &plan)?;
        let format = self.config.output_format();
        let image = compositor.encode(&canvas, format)?;

        let resolution = Resolution::new(
            first.resolution().map_origin(),
            plan.grid_size(),
            pixels_per_grid,
        );
        let (pixel_width, pixel_height) = plan.pixel_dimensions();
        info!(
            width = pixel_width,
            height = pixel_height,
            format:? = format;
            "Merged map assembled"
        );

        Ok(MergedMap {
            resolution,
            rings: features.rings,
            portals: features.portals,
            lights: features.lights,
            environment: first.environment().clone(),
            image,
            image_format: format,
            pixel_width,
            pixel_height,
        })
    }

    /// Registers the merged map with a scene sink and attaches its
    /// projected walls, doors, and lights.
    pub fn deliver<S: SceneSink>(
        &self,
        merged: &MergedMap,
        scene_name: &str,
        image_reference: &str,
        sink: &mut S,
    ) -> Result<(), MergeError> {
        let record = SceneRecord::new(
            scene_name,
            image_reference,
            merged.pixel_width(),
            merged.pixel_height(),
            merged.resolution().pixels_per_grid(),
            self.config.padding(),
        );
        info!(scene = scene_name; "Creating scene");
        let dimensions = sink.create_scene(&record)?;
        debug!(
            offset_x = dimensions.offset_x(),
            offset_y = dimensions.offset_y();
            "Scene offsets received"
        );

        let resolution = merged.resolution();
        let mut walls = walls::synthesize(
            merged.line_of_sight(),
            &resolution,
            dimensions,
            self.config.offset(),
            self.config.skip_points(),
        );
        walls.extend(project::project_doors(
            merged.portals(),
            &resolution,
            dimensions,
            self.config.offset(),
            self.config.openable_windows(),
        ));
        let lights = project::project_lights(merged.lights(), &resolution, dimensions);

        info!(walls = walls.len(), lights = lights.len(); "Attaching scene features");
        sink.attach(&walls, &lights)?;
        Ok(())
    }
}

/// A merged battlemap: stitched raster plus combined features.
#[derive(Debug, Clone)]
pub struct MergedMap {
    resolution: Resolution,
    rings: Vec<Ring>,
    portals: Vec<Portal>,
    lights: Vec<Light>,
    environment: Value,
    image: Vec<u8>,
    image_format: RasterFormat,
    pixel_width: u32,
    pixel_height: u32,
}

impl MergedMap {
    /// Merged resolution: first document's origin, combined size, and
    /// the effective grid density.
    pub fn resolution(&self) -> Resolution {
        self.resolution
    }

    /// All sight-blocking rings in merged grid space.
    pub fn line_of_sight(&self) -> &[Ring] {
        &self.rings
    }

    pub fn portals(&self) -> &[Portal] {
        &self.portals
    }

    pub fn lights(&self) -> &[Light] {
        &self.lights
    }

    /// Environment settings carried over from the first document.
    pub fn environment(&self) -> &Value {
        &self.environment
    }

    /// Encoded stitched image.
    pub fn image(&self) -> &[u8] {
        &self.image
    }

    pub fn image_format(&self) -> RasterFormat {
        self.image_format
    }

    pub fn pixel_width(&self) -> u32 {
        self.pixel_width
    }

    pub fn pixel_height(&self) -> u32 {
        self.pixel_height
    }

    /// Serializes the merged map as a universal VTT descriptor, minus
    /// the image payload.
    pub fn descriptor_json(&self) -> Result<String, MergeError> {
        let descriptor = Descriptor {
            format: DESCRIPTOR_FORMAT,
            resolution: self.resolution,
            line_of_sight: &self.rings,
            portals: &self.portals,
            lights: &self.lights,
            environment: &self.environment,
        };
        Ok(serde_json::to_string_pretty(&descriptor)?)
    }
}

#[derive(Serialize)]
struct Descriptor<'a> {
    format: f64,
    resolution: Resolution,
    line_of_sight: &'a [Ring],
    portals: &'a [Portal],
    lights: &'a [Light],
    environment: &'a Value,
}
