//! Door and light projection into scene pixel space.
//!
//! Portals become door segments: the portal span is the wall, the
//! closed flag decides whether sight is blocked, and an optional mode
//! turns every door into an openable window. Lights keep their grid
//! position and gain host-facing radii derived from their range.
//!
//! Dense portal chains in cave exports can qualify for the same
//! smoothing as cave walls. The spans are flattened into one point
//! run, smoothed as a whole, and re-paired; when smoothing shortens
//! the run, the trailing portals have no span left and are dropped.

use log::{debug, warn};

use mapstitch_core::feature::{Light, Portal};
use mapstitch_core::geometry::Point;
use mapstitch_core::resolution::Resolution;

use crate::scene::{LightPoint, SceneDimensions, WallSegment, WallSense};
use crate::smooth::smooth_points;

/// Projects portals to door segments, clipped to the merged map.
pub(crate) fn project_doors(
    portals: &[Portal],
    resolution: &Resolution,
    dimensions: SceneDimensions,
    smoothing_offset: f64,
    openable_windows: bool,
) -> Vec<WallSegment> {
    let portals = if smoothing_offset != 0.0 {
        reshape_spans(portals, smoothing_offset)
    } else {
        portals.to_vec()
    };

    let offset = dimensions.offset_point();
    let origin = resolution.map_origin();
    let pixels_per_grid = resolution.pixels_per_grid();
    let mut doors = Vec::with_capacity(portals.len());

    for portal in &portals {
        let [span_start, span_end] = portal.bounds();
        if !resolution.contains(span_start) && !resolution.contains(span_end) {
            continue;
        }
        let start = span_start.to_pixels(origin, pixels_per_grid).translate(offset);
        let end = span_end.to_pixels(origin, pixels_per_grid).translate(offset);
        let door = u8::from(openable_windows || portal.closed());
        let sense = if portal.closed() {
            WallSense::Normal
        } else {
            WallSense::None
        };
        match WallSegment::new(start, end, door, sense) {
            Some(segment) => doors.push(segment),
            None => warn!(position:? = portal.position(); "Skipping door with non-finite span"),
        }
    }

    debug!(portals = portals.len(), doors = doors.len(); "Doors projected");
    doors
}

/// Applies cave smoothing across a chain of portal spans.
fn reshape_spans(portals: &[Portal], offset: f64) -> Vec<Portal> {
    let flattened: Vec<Point> = portals
        .iter()
        .flat_map(|portal| portal.bounds())
        .collect();
    let Some(smoothed) = smooth_points(&flattened, offset) else {
        return portals.to_vec();
    };

    let spans = smoothed.chunks_exact(2);
    if spans.len() < portals.len() {
        warn!(
            dropped = portals.len() - spans.len();
            "Smoothing shortened the portal chain; dropping trailing portals"
        );
    }
    spans
        .zip(portals)
        .map(|(span, portal)| Portal::new(portal.position(), [span[0], span[1]], portal.closed()))
        .collect()
}

/// Projects lights, dropping any positioned off the merged map.
pub(crate) fn project_lights(
    lights: &[Light],
    resolution: &Resolution,
    dimensions: SceneDimensions,
) -> Vec<LightPoint> {
    let offset = dimensions.offset_point();
    let origin = resolution.map_origin();
    let pixels_per_grid = resolution.pixels_per_grid();
    let mut projected = Vec::new();

    for light in lights {
        if !resolution.contains(light.position()) {
            continue;
        }
        let position = light
            .position()
            .to_pixels(origin, pixels_per_grid)
            .translate(offset);
        // Source colours carry a leading alpha byte; the scene tint
        // wants the bare rgb part.
        let tint = format!("#{}", light.color().get(2..).unwrap_or_default());
        let alpha = 0.05 * light.intensity();
        match LightPoint::new(position, light.range() * 4.0, light.range() * 2.0, tint, alpha) {
            Some(point) => projected.push(point),
            None => {
                warn!(position:? = light.position(); "Skipping light with non-finite position");
            }
        }
    }

    debug!(lights = lights.len(), projected = projected.len(); "Lights projected");
    projected
}
