//! A fully parsed battlemap document.

use serde_json::Value;

use crate::feature::{Light, Portal, Ring};
use crate::raster::RasterData;
use crate::resolution::Resolution;

/// One battlemap: placement, features, ambient data, and the map image.
///
/// Documents are immutable once constructed. The stitching pipeline never
/// mutates its inputs; it derives translated copies instead.
///
/// # Examples
///
/// ```
/// # use mapstitch_core::document::MapDocument;
/// # use mapstitch_core::geometry::{Point, Size};
/// # use mapstitch_core::raster::RasterData;
/// # use mapstitch_core::resolution::Resolution;
/// let resolution = Resolution::new(Point::new(0.0, 0.0), Size::new(10.0, 10.0), 70.0);
/// let document = MapDocument::new(resolution, RasterData::new(vec![0x89, b'P', b'N', b'G']));
///
/// assert!(document.line_of_sight().is_empty());
/// assert_eq!(document.resolution().pixels_per_grid(), 70.0);
/// ```
#[derive(Debug, Clone)]
pub struct MapDocument {
    resolution: Resolution,
    line_of_sight: Vec<Ring>,
    object_walls: Vec<Ring>,
    portals: Vec<Portal>,
    lights: Vec<Light>,
    environment: Value,
    image: RasterData,
}

impl MapDocument {
    /// Creates a document with no features and a null environment.
    pub fn new(resolution: Resolution, image: RasterData) -> Self {
        Self {
            resolution,
            line_of_sight: Vec::new(),
            object_walls: Vec::new(),
            portals: Vec::new(),
            lights: Vec::new(),
            environment: Value::Null,
            image,
        }
    }

    /// Sets the structural wall rings.
    pub fn with_line_of_sight(mut self, rings: Vec<Ring>) -> Self {
        self.line_of_sight = rings;
        self
    }

    /// Sets the furniture and scenery wall rings.
    pub fn with_object_walls(mut self, rings: Vec<Ring>) -> Self {
        self.object_walls = rings;
        self
    }

    /// Sets the door and window portals.
    pub fn with_portals(mut self, portals: Vec<Portal>) -> Self {
        self.portals = portals;
        self
    }

    /// Sets the light sources.
    pub fn with_lights(mut self, lights: Vec<Light>) -> Self {
        self.lights = lights;
        self
    }

    /// Sets the ambient environment payload, carried through untouched.
    pub fn with_environment(mut self, environment: Value) -> Self {
        self.environment = environment;
        self
    }

    /// Returns the document's placement and grid density
    pub fn resolution(&self) -> Resolution {
        self.resolution
    }

    /// Returns the structural wall rings
    pub fn line_of_sight(&self) -> &[Ring] {
        &self.line_of_sight
    }

    /// Returns the furniture and scenery wall rings
    pub fn object_walls(&self) -> &[Ring] {
        &self.object_walls
    }

    /// Returns the door and window portals
    pub fn portals(&self) -> &[Portal] {
        &self.portals
    }

    /// Returns the light sources
    pub fn lights(&self) -> &[Light] {
        &self.lights
    }

    /// Returns the ambient environment payload
    pub fn environment(&self) -> &Value {
        &self.environment
    }

    /// Returns the encoded map image
    pub fn image(&self) -> &RasterData {
        &self.image
    }
}
