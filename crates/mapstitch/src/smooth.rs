//! Cave wall smoothing.
//!
//! Cave exports trace rough rock with hundreds of tiny segments. A run
//! is treated as cave-like when at least 70 percent of its points sit
//! on segments shorter than [`SHORT_SEGMENT_LIMIT`] grid units. Such a
//! run is replaced by the chain of interceptions between consecutive
//! offset lines: each segment is shifted sideways by the configured
//! offset, and neighbouring shifted lines are intersected to produce
//! the smoothed points.
//!
//! Open runs lose their two outermost points in the process. Closed
//! runs are extended across the seam first, so the output keeps the
//! original point count and stays closed in shape.

use mapstitch_core::feature::Ring;
use mapstitch_core::geometry::Point;

/// Segments shorter than this (in grid units) count as cave texture.
pub(crate) const SHORT_SEGMENT_LIMIT: f64 = 0.3;

/// Minimum share of short-segment points, in percent, for smoothing.
const SHORT_SHARE_TRIGGER: f64 = 70.0;

/// Runs shorter than this are never smoothed.
const MIN_CAVE_POINTS: usize = 10;

/// A segment shifted sideways by the smoothing offset.
///
/// `slope` is `None` for vertical segments, which have no finite slope.
struct OffsetLine {
    point: Point,
    slope: Option<f64>,
}

/// Whether a point run qualifies for cave smoothing.
pub(crate) fn is_cave_run(points: &[Point]) -> bool {
    if points.len() < MIN_CAVE_POINTS {
        return false;
    }
    let short = points
        .windows(2)
        .filter(|pair| pair[0].distance_to(pair[1]) < SHORT_SEGMENT_LIMIT)
        .count();
    let share = (short as f64 / points.len() as f64 * 100.0).round();
    share >= SHORT_SHARE_TRIGGER
}

/// Smooths a point run, or returns `None` when it does not qualify.
pub(crate) fn smooth_points(points: &[Point], offset: f64) -> Option<Vec<Point>> {
    if !is_cave_run(points) {
        return None;
    }

    let mut extended = points.to_vec();
    // Closed runs wrap around the seam so the interception chain covers
    // the first and last original points too.
    if extended[0] == extended[extended.len() - 1] {
        extended.push(extended[1]);
        extended.push(extended[2]);
    }

    let lines: Vec<OffsetLine> = extended
        .windows(2)
        .map(|pair| offset_line(pair[0], pair[1], offset))
        .collect();
    let smoothed = lines
        .windows(2)
        .map(|pair| interception(&pair[0], &pair[1]))
        .collect();
    Some(smoothed)
}

/// Smooths one wall ring, leaving non-cave rings untouched.
pub(crate) fn smooth_ring(ring: &Ring, offset: f64) -> Ring {
    match smooth_points(ring.points(), offset).and_then(Ring::new) {
        Some(smoothed) => smoothed,
        None => ring.clone(),
    }
}

/// Shifts the segment `from -> to` sideways by `offset`.
fn offset_line(from: Point, to: Point, offset: f64) -> OffsetLine {
    if to.x() == from.x() {
        // Vertical segment: shift along x, flipped for downward runs.
        let side = if to.y() < from.y() { -offset } else { offset };
        return OffsetLine {
            point: Point::new(from.x() + side, from.y()),
            slope: None,
        };
    }

    let slope = (to.y() - from.y()) / (to.x() - from.x());
    let step = (offset * offset / (1.0 + slope * slope)).sqrt();
    let shift = if to.x() - from.x() >= 0.0 {
        Point::new(slope * step, -step)
    } else {
        Point::new(-slope * step, step)
    };
    OffsetLine {
        point: from.translate(shift),
        slope: Some(slope),
    }
}

/// Interception of two offset lines.
fn interception(first: &OffsetLine, second: &OffsetLine) -> Point {
    match (first.slope, second.slope) {
        (None, None) => Point::new(
            first.point.x(),
            (first.point.y() + second.point.y()) / 2.0,
        ),
        (None, Some(slope)) => {
            let x = first.point.x();
            Point::new(x, slope * (x - second.point.x()) + second.point.y())
        }
        (Some(slope), None) => {
            let x = second.point.x();
            Point::new(x, slope * (x - first.point.x()) + first.point.y())
        }
        (Some(a), Some(b)) if a == b => {
            if a == 0.0 {
                Point::new(
                    (first.point.x() + second.point.x()) / 2.0,
                    first.point.y(),
                )
            } else {
                Point::new(
                    first.point.x(),
                    (first.point.y() + second.point.y()) / 2.0,
                )
            }
        }
        (Some(a), Some(b)) => {
            // Line form y = s*x + m, with m recovered from the shifted
            // base point.
            let m_first = first.point.y() - a * first.point.x();
            let m_second = second.point.y() - b * second.point.x();
            let x = (m_second - m_first) / (a - b);
            Point::new(x, a * x + m_first)
        }
    }
}
