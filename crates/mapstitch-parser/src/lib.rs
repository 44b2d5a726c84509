//! # Mapstitch Parser
//!
//! Parser for UVTT battlemap documents. This crate turns the JSON export
//! of a map-making tool into the [`mapstitch_core`] document model.
//!
//! ## Usage
//!
//! ```
//! # use mapstitch_parser::parse_document;
//! let source = r#"{
//!     "format": 0.3,
//!     "resolution": {
//!         "map_origin": { "x": 0, "y": 0 },
//!         "map_size": { "x": 4, "y": 4 },
//!         "pixels_per_grid": 70
//!     },
//!     "line_of_sight": [],
//!     "portals": [],
//!     "lights": [],
//!     "environment": {},
//!     "image": "AAAA"
//! }"#;
//!
//! let document = parse_document("cave.dd2vtt", source).expect("well-formed document");
//! assert_eq!(document.resolution().pixels_per_grid(), 70.0);
//! ```

mod dto;
mod error;
mod image_data;

pub use error::ParseError;

use log::{debug, info, warn};

use mapstitch_core::document::MapDocument;
use mapstitch_core::feature::{Light, Portal, Ring};
use mapstitch_core::geometry::Point;
use mapstitch_core::raster::RasterData;
use mapstitch_core::resolution::Resolution;

use dto::{DocumentDto, LightDto, PortalDto};

/// Parse one battlemap document from its JSON source.
///
/// This is the main entry point for reading a UVTT export. It performs
/// the complete intake pipeline:
///
/// 1. **Deserialize** - Read the JSON wire format
/// 2. **Validate** - Reject unusable grid densities
/// 3. **Convert** - Build core feature types, dropping malformed entries
/// 4. **Decode** - Unpack the base64 map image and sniff its encoding
///
/// Unknown fields are ignored, so newer document revisions parse as long
/// as the fields used here keep their shape. Individually malformed
/// features (a wall run with a single vertex, a portal without an
/// opening span) are dropped with a warning rather than failing the
/// whole document.
///
/// # Arguments
///
/// * `label` - Name used to attribute errors and warnings, usually the file name
/// * `source` - The document JSON text
///
/// # Errors
///
/// Returns [`ParseError`] when the JSON is malformed, the image payload
/// is not decodable base64, or `pixels_per_grid` is not a positive
/// finite number.
pub fn parse_document(label: &str, source: &str) -> Result<MapDocument, ParseError> {
    info!(document = label; "Parsing battlemap document");

    let dto: DocumentDto =
        serde_json::from_str(source).map_err(|err| ParseError::syntax(label, &err))?;

    let pixels_per_grid = dto.resolution.pixels_per_grid;
    if !pixels_per_grid.is_finite() || pixels_per_grid <= 0.0 {
        return Err(ParseError::resolution(label, pixels_per_grid));
    }

    let resolution = Resolution::new(
        dto.resolution.map_origin.into_point(),
        dto.resolution.map_size.into_size(),
        pixels_per_grid,
    );

    let line_of_sight = collect_rings(label, "line_of_sight", dto.line_of_sight);
    let object_walls = collect_rings(label, "objects_line_of_sight", dto.objects_line_of_sight);
    let portals = collect_portals(label, dto.portals);
    let lights = collect_lights(dto.lights);

    let bytes = image_data::decode_image(&dto.image).map_err(|err| ParseError::image(label, &err))?;
    let image = RasterData::new(bytes);

    debug!(
        document = label,
        walls = line_of_sight.len(),
        object_walls = object_walls.len(),
        portals = portals.len(),
        lights = lights.len(),
        image_format:? = image.format();
        "Parsed battlemap document"
    );

    Ok(MapDocument::new(resolution, image)
        .with_line_of_sight(line_of_sight)
        .with_object_walls(object_walls)
        .with_portals(portals)
        .with_lights(lights)
        .with_environment(dto.environment))
}

/// Convert raw vertex lists into wall rings, dropping runs that are too
/// short to form a segment.
fn collect_rings(label: &str, field: &str, raw: Vec<Vec<dto::PointDto>>) -> Vec<Ring> {
    raw.into_iter()
        .enumerate()
        .filter_map(|(index, vertices)| {
            let points: Vec<Point> = vertices
                .into_iter()
                .map(dto::PointDto::into_point)
                .collect();
            let ring = Ring::new(points);
            if ring.is_none() {
                warn!(
                    document = label,
                    field = field,
                    index = index;
                    "Dropping wall run with fewer than two vertices"
                );
            }
            ring
        })
        .collect()
}

/// Convert raw portals, dropping any without a two-point opening span.
fn collect_portals(label: &str, raw: Vec<PortalDto>) -> Vec<Portal> {
    raw.into_iter()
        .enumerate()
        .filter_map(|(index, portal)| {
            if portal.bounds.len() < 2 {
                warn!(
                    document = label,
                    index = index,
                    bounds = portal.bounds.len();
                    "Dropping portal without an opening span"
                );
                return None;
            }
            let bounds = [
                portal.bounds[0].into_point(),
                portal.bounds[1].into_point(),
            ];
            Some(Portal::new(
                portal.position.into_point(),
                bounds,
                portal.closed,
            ))
        })
        .collect()
}

fn collect_lights(raw: Vec<LightDto>) -> Vec<Light> {
    raw.into_iter()
        .map(|light| {
            Light::new(
                light.position.into_point(),
                light.range,
                light.intensity,
                light.color,
            )
        })
        .collect()
}
