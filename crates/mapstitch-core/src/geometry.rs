//! Geometric primitives for battlemap coordinates.
//!
//! This module provides the fundamental geometric types used throughout
//! mapstitch for positioning map documents and their features.
//!
//! # Overview
//!
//! - [`Point`] - A 2D coordinate, in grid squares or pixels depending on context
//! - [`Size`] - Width and height dimensions in grid squares
//! - [`PointKey`] - A hashable key for exact coordinate equality
//!
//! # Coordinate System
//!
//! Battlemap documents place their origin at the top-left corner:
//!
//! ```text
//!   (0,0) ────────► +X
//!     │
//!     │
//!     │
//!     ▼
//!    +Y
//! ```
//!
//! - **Origin**: Top-left corner at `(0, 0)`
//! - **X-axis**: Increases rightward (positive to the right)
//! - **Y-axis**: Increases downward (positive downward)
//!
//! Feature coordinates are expressed in grid squares until the final
//! projection into pixel space.

use serde::Serialize;

/// A 2D point in battlemap coordinate space.
///
/// Points use `f64` coordinates. Most of the pipeline works in grid
/// squares; [`Point::to_pixels`] performs the conversion into pixel space.
///
/// # Examples
///
/// ```
/// # use mapstitch_core::geometry::Point;
/// let corner = Point::new(3.0, 4.0);
/// let offset = Point::new(10.0, 0.0);
///
/// let moved = corner.translate(offset);
/// assert_eq!(moved.x(), 13.0);
/// assert_eq!(moved.y(), 4.0);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct Point {
    x: f64,
    y: f64,
}

impl Point {
    /// Creates a new point with the specified coordinates
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Returns the x-coordinate of the point
    pub fn x(self) -> f64 {
        self.x
    }

    /// Returns the y-coordinate of the point
    pub fn y(self) -> f64 {
        self.y
    }

    /// Checks if both x and y coordinates are zero
    pub fn is_zero(self) -> bool {
        self.x == 0.0 && self.y == 0.0
    }

    /// Returns true when both coordinates are finite numbers
    pub fn is_finite(self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }

    /// Shifts this point by the given offset, returning a new point.
    ///
    /// # Examples
    ///
    /// ```
    /// # use mapstitch_core::geometry::Point;
    /// let position = Point::new(2.0, 5.0);
    /// let offset = Point::new(16.0, -5.0);
    ///
    /// let moved = position.translate(offset);
    /// assert_eq!(moved.x(), 18.0);
    /// assert_eq!(moved.y(), 0.0);
    /// ```
    pub fn translate(self, offset: Point) -> Self {
        Self {
            x: self.x + offset.x,
            y: self.y + offset.y,
        }
    }

    /// Multiplies both coordinates by the given factor
    pub fn scale(self, factor: f64) -> Self {
        Self {
            x: self.x * factor,
            y: self.y * factor,
        }
    }

    /// Calculates the Euclidean distance to another point.
    ///
    /// # Examples
    ///
    /// ```
    /// # use mapstitch_core::geometry::Point;
    /// let a = Point::new(0.0, 0.0);
    /// let b = Point::new(3.0, 4.0);
    /// assert_eq!(a.distance_to(b), 5.0);
    /// ```
    pub fn distance_to(self, other: Point) -> f64 {
        (self.x - other.x).hypot(self.y - other.y)
    }

    /// Converts a grid-space point into pixel space.
    ///
    /// The map origin is subtracted first, then the result is scaled by
    /// the grid density. Scene-level offsets are applied separately by
    /// the caller via [`Point::translate`].
    pub fn to_pixels(self, origin: Point, pixels_per_grid: f64) -> Self {
        Self {
            x: (self.x - origin.x) * pixels_per_grid,
            y: (self.y - origin.y) * pixels_per_grid,
        }
    }
}

/// A hashable key for exact point equality.
///
/// Wall rings are chained together when one ring ends exactly where
/// another begins. That match is bit-exact rather than approximate, so
/// the key captures the raw IEEE 754 representation of each coordinate.
/// Negative zero is folded into positive zero to keep `0.0` and `-0.0`
/// in the same bucket.
///
/// # Examples
///
/// ```
/// # use mapstitch_core::geometry::{Point, PointKey};
/// let a = PointKey::from(Point::new(0.0, 2.5));
/// let b = PointKey::from(Point::new(-0.0, 2.5));
/// assert_eq!(a, b);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PointKey {
    x_bits: u64,
    y_bits: u64,
}

impl From<Point> for PointKey {
    fn from(point: Point) -> Self {
        Self {
            x_bits: normalize_bits(point.x),
            y_bits: normalize_bits(point.y),
        }
    }
}

fn normalize_bits(value: f64) -> u64 {
    // Fold -0.0 into 0.0 so the two compare equal as keys.
    if value == 0.0 { 0u64 } else { value.to_bits() }
}

/// Represents the dimensions of a map area in grid squares.
///
/// Battlemap documents express sizes as `x`/`y` pairs on the wire, which
/// is preserved when serializing.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct Size {
    #[serde(rename = "x")]
    width: f64,
    #[serde(rename = "y")]
    height: f64,
}

impl Size {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    /// Returns the width dimension of this size
    pub fn width(self) -> f64 {
        self.width
    }

    /// Returns the height dimension of this size
    pub fn height(self) -> f64 {
        self.height
    }

    /// Multiplies both dimensions by the given factor
    pub fn scale(self, factor: f64) -> Self {
        Self {
            width: self.width * factor,
            height: self.height * factor,
        }
    }

    /// Returns true if either dimension is zero or negative
    pub fn is_degenerate(self) -> bool {
        self.width <= 0.0 || self.height <= 0.0
    }
}


#[cfg(test)]
mod proptest_tests {
    use float_cmp::approx_eq;
    use proptest::prelude::*;

    use super::*;

    // ===================
    // Strategies
    // ===================

    fn point_strategy() -> impl Strategy<Value = Point> {
        (-1000.0f64..1000.0, -1000.0f64..1000.0).prop_map(|(x, y)| Point::new(x, y))
    }

    fn grid_density_strategy() -> impl Strategy<Value = f64> {
        1.0f64..512.0
    }

    // ===================
    // Property Test Functions
    // ===================

    /// Point translation should be commutative: p1 + p2 == p2 + p1.
    fn check_translate_is_commutative(p1: Point, p2: Point) -> Result<(), TestCaseError> {
        let result1 = p1.translate(p2);
        let result2 = p2.translate(p1);

        prop_assert!(approx_eq!(f64, result1.x(), result2.x()));
        prop_assert!(approx_eq!(f64, result1.y(), result2.y()));
        Ok(())
    }

    /// Translating by an offset and then its negation should return the original.
    fn check_translate_negation_roundtrip(p: Point, offset: Point) -> Result<(), TestCaseError> {
        let back = p.translate(offset).translate(offset.scale(-1.0));

        prop_assert!(approx_eq!(f64, back.x(), p.x(), epsilon = 1e-9));
        prop_assert!(approx_eq!(f64, back.y(), p.y(), epsilon = 1e-9));
        Ok(())
    }

    /// Distance should be symmetric: d(a, b) == d(b, a).
    fn check_distance_is_symmetric(a: Point, b: Point) -> Result<(), TestCaseError> {
        prop_assert!(approx_eq!(f64, a.distance_to(b), b.distance_to(a)));
        Ok(())
    }

    /// Distance should be translation invariant.
    fn check_distance_translation_invariant(
        a: Point,
        b: Point,
        offset: Point,
    ) -> Result<(), TestCaseError> {
        let before = a.distance_to(b);
        let after = a.translate(offset).distance_to(b.translate(offset));

        prop_assert!(approx_eq!(f64, before, after, epsilon = 1e-6));
        Ok(())
    }

    /// Pixel projection should scale distances by the grid density.
    fn check_to_pixels_scales_distance(
        a: Point,
        b: Point,
        origin: Point,
        density: f64,
    ) -> Result<(), TestCaseError> {
        let grid_distance = a.distance_to(b);
        let pixel_distance = a
            .to_pixels(origin, density)
            .distance_to(b.to_pixels(origin, density));

        prop_assert!(approx_eq!(
            f64,
            pixel_distance,
            grid_distance * density,
            epsilon = 1e-4
        ));
        Ok(())
    }

    /// Equal points must map to equal keys.
    fn check_point_key_reflexive(p: Point) -> Result<(), TestCaseError> {
        prop_assert_eq!(PointKey::from(p), PointKey::from(p));
        Ok(())
    }

    // ===================
    // Proptest Wrappers
    // ===================

    proptest! {
        #[test]
        fn translate_is_commutative(p1 in point_strategy(), p2 in point_strategy()) {
            check_translate_is_commutative(p1, p2)?;
        }

        #[test]
        fn translate_negation_roundtrip(p in point_strategy(), offset in point_strategy()) {
            check_translate_negation_roundtrip(p, offset)?;
        }

        #[test]
        fn distance_is_symmetric(a in point_strategy(), b in point_strategy()) {
            check_distance_is_symmetric(a, b)?;
        }

        #[test]
        fn distance_translation_invariant(
            a in point_strategy(),
            b in point_strategy(),
            offset in point_strategy(),
        ) {
            check_distance_translation_invariant(a, b, offset)?;
        }

        #[test]
        fn to_pixels_scales_distance(
            a in point_strategy(),
            b in point_strategy(),
            origin in point_strategy(),
            density in grid_density_strategy(),
        ) {
            check_to_pixels_scales_distance(a, b, origin, density)?;
        }

        #[test]
        fn point_key_reflexive(p in point_strategy()) {
            check_point_key_reflexive(p)?;
        }
    }
}
