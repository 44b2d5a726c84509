//! Wall point decimation.
//!
//! Dense cave walls are thinned before segment emission: runs of
//! consecutive points on short segments are marked, and every marked
//! run keeps one point per `skip_points` marks. The first marked point
//! of a ring always survives, as do the final two points, so ring ends
//! stay anchored for junction bridging.

use mapstitch_core::feature::Ring;
use mapstitch_core::geometry::Point;

use crate::smooth::SHORT_SEGMENT_LIMIT;

/// Thins a ring's interior points.
///
/// `skip_points` is the number of consecutive short-segment points
/// dropped before one is retained; rings with fewer than two marked
/// points are returned unchanged.
pub(crate) fn decimate(ring: &Ring, skip_points: u32) -> Ring {
    let points = ring.points();
    let mut marked: Vec<usize> = Vec::new();
    let mut run = 0u32;

    for index in 0..points.len().saturating_sub(2) {
        if index != 0 && points[index].distance_to(points[index + 1]) < SHORT_SEGMENT_LIMIT {
            if run == skip_points {
                run = 0;
            } else {
                run += 1;
                marked.push(index);
            }
        } else {
            run = 0;
        }
    }

    if marked.len() < 2 {
        return ring.clone();
    }

    // The first marked point is retained; the rest are dropped.
    let removed = &marked[1..];
    let mut cursor = 0;
    let kept: Vec<Point> = points
        .iter()
        .enumerate()
        .filter_map(|(index, point)| {
            if cursor < removed.len() && removed[cursor] == index {
                cursor += 1;
                None
            } else {
                Some(*point)
            }
        })
        .collect();

    match Ring::new(kept) {
        Some(thinned) => thinned,
        None => ring.clone(),
    }
}
