//! Wire-format structures for UVTT battlemap JSON.
//!
//! These mirror the on-disk shape of a battlemap document and exist only
//! as a deserialization target. [`crate::parse_document`] validates them
//! and converts into the core model types.

use serde::Deserialize;
use serde_json::Value;

use mapstitch_core::geometry::{Point, Size};

#[derive(Debug, Deserialize)]
pub(crate) struct DocumentDto {
    pub resolution: ResolutionDto,
    #[serde(default)]
    pub line_of_sight: Vec<Vec<PointDto>>,
    #[serde(default)]
    pub objects_line_of_sight: Vec<Vec<PointDto>>,
    #[serde(default)]
    pub portals: Vec<PortalDto>,
    #[serde(default)]
    pub lights: Vec<LightDto>,
    #[serde(default)]
    pub environment: Value,
    pub image: String,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ResolutionDto {
    pub map_origin: PointDto,
    pub map_size: PointDto,
    pub pixels_per_grid: f64,
}

#[derive(Debug, Clone, Copy, Deserialize)]
pub(crate) struct PointDto {
    pub x: f64,
    pub y: f64,
}

impl PointDto {
    pub fn into_point(self) -> Point {
        Point::new(self.x, self.y)
    }

    pub fn into_size(self) -> Size {
        Size::new(self.x, self.y)
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct PortalDto {
    pub position: PointDto,
    #[serde(default)]
    pub bounds: Vec<PointDto>,
    #[serde(default)]
    pub closed: bool,
}

#[derive(Debug, Deserialize)]
pub(crate) struct LightDto {
    pub position: PointDto,
    pub range: f64,
    pub intensity: f64,
    pub color: String,
}
