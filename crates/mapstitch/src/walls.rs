//! Wall segment synthesis.
//!
//! Rings become scene wall segments in three steps. Ring connectivity
//! is captured first: an [`EndpointIndex`] over the translated rings
//! records where runs butt against each other. Each ring is then
//! smoothed and decimated on its own. Finally segments are emitted
//! with bridges re-attaching the reshaped ring to its original
//! junction points, so networks of cave walls stay connected even
//! though smoothing moved their interiors.
//!
//! Segments are clipped against the merged map: a segment survives if
//! either endpoint lies on the map. Bridges between coincident
//! endpoints may come out zero-length; they are kept, matching the
//! connectivity the source documents describe.

use indexmap::IndexMap;
use log::{debug, warn};

use mapstitch_core::feature::Ring;
use mapstitch_core::geometry::{Point, PointKey};
use mapstitch_core::resolution::Resolution;

use crate::decimate::decimate;
use crate::scene::{SceneDimensions, WallSegment};
use crate::smooth::smooth_ring;

/// Ring endpoint lookups for junction detection.
///
/// Built once over the translated rings, before smoothing reshapes
/// them.
pub(crate) struct EndpointIndex {
    starts: IndexMap<PointKey, Vec<usize>>,
    ends: IndexMap<PointKey, Vec<usize>>,
}

impl EndpointIndex {
    pub(crate) fn build(rings: &[Ring]) -> Self {
        let mut starts: IndexMap<PointKey, Vec<usize>> = IndexMap::new();
        let mut ends: IndexMap<PointKey, Vec<usize>> = IndexMap::new();
        for (index, ring) in rings.iter().enumerate() {
            starts
                .entry(PointKey::from(ring.first()))
                .or_default()
                .push(index);
            ends
                .entry(PointKey::from(ring.last()))
                .or_default()
                .push(index);
        }
        Self { starts, ends }
    }

    /// Number of other rings that start at `point`.
    fn starts_at(&self, point: Point, excluding: usize) -> usize {
        self.starts
            .get(&PointKey::from(point))
            .map_or(0, |indices| {
                indices.iter().filter(|&&index| index != excluding).count()
            })
    }

    /// Number of other rings that end at `point`.
    fn ends_at(&self, point: Point, excluding: usize) -> usize {
        self.ends
            .get(&PointKey::from(point))
            .map_or(0, |indices| {
                indices.iter().filter(|&&index| index != excluding).count()
            })
    }
}

/// Turns merged rings into clipped scene wall segments.
pub(crate) fn synthesize(
    rings: &[Ring],
    resolution: &Resolution,
    dimensions: SceneDimensions,
    smoothing_offset: f64,
    skip_points: u32,
) -> Vec<WallSegment> {
    let index = EndpointIndex::build(rings);
    let mut walls = Vec::new();

    for (ring_index, ring) in rings.iter().enumerate() {
        let entry_junction = ring.first();
        let exit_junction = ring.last();
        let incoming = index.ends_at(entry_junction, ring_index);
        let outgoing = index.starts_at(exit_junction, ring_index);

        let shaped = if smoothing_offset != 0.0 {
            smooth_ring(ring, smoothing_offset)
        } else {
            ring.clone()
        };
        let shaped = decimate(&shaped, skip_points);

        for _ in 0..incoming {
            push_segment(&mut walls, resolution, dimensions, entry_junction, shaped.first());
        }
        for pair in shaped.points().windows(2) {
            push_segment(&mut walls, resolution, dimensions, pair[0], pair[1]);
        }
        for _ in 0..outgoing {
            push_segment(&mut walls, resolution, dimensions, shaped.last(), exit_junction);
        }
    }

    debug!(rings = rings.len(), segments = walls.len(); "Wall segments synthesized");
    walls
}

fn push_segment(
    walls: &mut Vec<WallSegment>,
    resolution: &Resolution,
    dimensions: SceneDimensions,
    start: Point,
    end: Point,
) {
    if !resolution.contains(start) && !resolution.contains(end) {
        return;
    }
    let origin = resolution.map_origin();
    let pixels_per_grid = resolution.pixels_per_grid();
    let offset = dimensions.offset_point();
    let start = start.to_pixels(origin, pixels_per_grid).translate(offset);
    let end = end.to_pixels(origin, pixels_per_grid).translate(offset);
    match WallSegment::wall(start, end) {
        Some(segment) => walls.push(segment),
        None => {
            warn!(start:? = start, end:? = end; "Skipping wall segment with non-finite coordinates");
        }
    }
}
