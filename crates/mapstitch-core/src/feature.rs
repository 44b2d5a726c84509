//! Map features: wall rings, portals, and lights.
//!
//! Features are the vector payload of a battlemap document. Walls arrive
//! as polylines ([`Ring`]), doors and windows as [`Portal`]s, and light
//! sources as [`Light`]s. All coordinates are in grid squares relative to
//! the document's own origin until the documents are stitched together.

use serde::Serialize;

use crate::geometry::Point;

/// An ordered polyline of wall vertices.
///
/// A ring always holds at least two points. Rings whose first and last
/// point coincide exactly are closed loops; everything else is an open
/// wall run. Transforms return new rings and leave the original intact.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Ring {
    points: Vec<Point>,
}

impl Ring {
    /// Creates a ring from a list of vertices.
    ///
    /// Returns `None` when fewer than two points are supplied, since a
    /// single vertex cannot form a wall segment.
    pub fn new(points: Vec<Point>) -> Option<Self> {
        if points.len() < 2 {
            return None;
        }
        Some(Self { points })
    }

    /// Returns the vertices of this ring
    pub fn points(&self) -> &[Point] {
        &self.points
    }

    /// Consumes the ring and returns its vertices
    pub fn into_points(self) -> Vec<Point> {
        self.points
    }

    /// Returns the first vertex
    pub fn first(&self) -> Point {
        self.points[0]
    }

    /// Returns the last vertex
    pub fn last(&self) -> Point {
        self.points[self.points.len() - 1]
    }

    /// Tests whether this ring is a closed loop.
    ///
    /// Closure requires the first and last vertex to be exactly equal;
    /// nearly-coincident endpoints stay open.
    pub fn is_closed(&self) -> bool {
        self.first() == self.last()
    }

    /// Returns a copy of this ring shifted by the given offset.
    pub fn translated(&self, offset: Point) -> Self {
        Self {
            points: self
                .points
                .iter()
                .map(|point| point.translate(offset))
                .collect(),
        }
    }
}

/// A door or window between two wall vertices.
///
/// The `bounds` pair spans the opening; `position` marks its center.
/// `closed` records whether the portal starts shut.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Portal {
    position: Point,
    bounds: [Point; 2],
    closed: bool,
}

impl Portal {
    /// Creates a portal from its center, opening span, and state.
    pub fn new(position: Point, bounds: [Point; 2], closed: bool) -> Self {
        Self {
            position,
            bounds,
            closed,
        }
    }

    /// Returns the center of the opening
    pub fn position(self) -> Point {
        self.position
    }

    /// Returns the two endpoints spanning the opening
    pub fn bounds(self) -> [Point; 2] {
        self.bounds
    }

    /// Returns true when the portal starts shut
    pub fn closed(self) -> bool {
        self.closed
    }

    /// Returns a copy of this portal shifted by the given offset.
    pub fn translated(self, offset: Point) -> Self {
        Self {
            position: self.position.translate(offset),
            bounds: [
                self.bounds[0].translate(offset),
                self.bounds[1].translate(offset),
            ],
            closed: self.closed,
        }
    }
}

/// A point light source on the map.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Light {
    position: Point,
    range: f64,
    intensity: f64,
    color: String,
}

impl Light {
    /// Creates a light from its position, reach, strength, and color.
    ///
    /// The color is an `aarrggbb` hex string as found in battlemap
    /// documents; interpretation is left to the projection stage.
    pub fn new(position: Point, range: f64, intensity: f64, color: impl Into<String>) -> Self {
        Self {
            position,
            range,
            intensity,
            color: color.into(),
        }
    }

    /// Returns the light position in grid squares
    pub fn position(&self) -> Point {
        self.position
    }

    /// Returns the reach of the light in grid squares
    pub fn range(&self) -> f64 {
        self.range
    }

    /// Returns the light strength
    pub fn intensity(&self) -> f64 {
        self.intensity
    }

    /// Returns the raw `aarrggbb` color string
    pub fn color(&self) -> &str {
        &self.color
    }

    /// Returns a copy of this light shifted by the given offset.
    pub fn translated(&self, offset: Point) -> Self {
        Self {
            position: self.position.translate(offset),
            range: self.range,
            intensity: self.intensity,
            color: self.color.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ring(points: &[(f64, f64)]) -> Ring {
        Ring::new(points.iter().map(|&(x, y)| Point::new(x, y)).collect())
            .expect("test ring has at least two points")
    }

    #[test]
    fn test_ring_rejects_short_input() {
        assert!(Ring::new(vec![]).is_none());
        assert!(Ring::new(vec![Point::new(1.0, 1.0)]).is_none());
    }

    #[test]
    fn test_ring_accepts_two_points() {
        let ring = Ring::new(vec![Point::new(0.0, 0.0), Point::new(1.0, 0.0)]);
        assert!(ring.is_some());
    }

    #[test]
    fn test_ring_endpoints() {
        let ring = ring(&[(0.0, 0.0), (1.0, 0.0), (1.0, 1.0)]);
        assert_eq!(ring.first(), Point::new(0.0, 0.0));
        assert_eq!(ring.last(), Point::new(1.0, 1.0));
    }

    #[test]
    fn test_ring_closed_requires_exact_match() {
        let closed = ring(&[(0.0, 0.0), (2.0, 0.0), (2.0, 2.0), (0.0, 0.0)]);
        assert!(closed.is_closed());

        let nearly = ring(&[(0.0, 0.0), (2.0, 0.0), (2.0, 2.0), (1e-12, 0.0)]);
        assert!(!nearly.is_closed());
    }

    #[test]
    fn test_ring_translated() {
        let original = ring(&[(0.0, 0.0), (1.0, 0.0), (1.0, 1.0), (0.0, 0.0)]);
        let moved = original.translated(Point::new(10.0, 20.0));

        assert_eq!(moved.first(), Point::new(10.0, 20.0));
        assert_eq!(moved.points()[1], Point::new(11.0, 20.0));
        assert!(moved.is_closed());

        // Original is untouched
        assert_eq!(original.first(), Point::new(0.0, 0.0));
    }

    #[test]
    fn test_portal_translated() {
        let portal = Portal::new(
            Point::new(1.5, 2.0),
            [Point::new(1.0, 2.0), Point::new(2.0, 2.0)],
            true,
        );
        let moved = portal.translated(Point::new(0.0, 8.0));

        assert_eq!(moved.position(), Point::new(1.5, 10.0));
        assert_eq!(moved.bounds()[0], Point::new(1.0, 10.0));
        assert_eq!(moved.bounds()[1], Point::new(2.0, 10.0));
        assert!(moved.closed());
    }

    #[test]
    fn test_light_translated() {
        let light = Light::new(Point::new(4.0, 4.0), 2.5, 0.6, "ffefd8a6");
        let moved = light.translated(Point::new(16.0, 0.0));

        assert_eq!(moved.position(), Point::new(20.0, 4.0));
        assert_eq!(moved.range(), 2.5);
        assert_eq!(moved.intensity(), 0.6);
        assert_eq!(moved.color(), "ffefd8a6");
    }

    #[test]
    fn test_ring_serializes_as_point_array() {
        let ring = ring(&[(0.0, 0.0), (1.5, 2.5)]);
        let json = serde_json::to_value(&ring).expect("ring serializes");
        assert_eq!(json[0]["x"], 0.0);
        assert_eq!(json[1]["y"], 2.5);
    }
}
