//! Map placement and grid density.
//!
//! Every battlemap document carries a [`Resolution`] describing where the
//! map sits in grid space, how large it is, and how many pixels one grid
//! square occupies in the raster.

use serde::Serialize;

use crate::geometry::{Point, Size};

/// Placement and density of a battlemap in grid space.
///
/// The map occupies the rectangle from `map_origin` to
/// `map_origin + map_size`, measured in grid squares. `pixels_per_grid`
/// relates grid coordinates to raster pixels.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Resolution {
    map_origin: Point,
    map_size: Size,
    pixels_per_grid: f64,
}

impl Resolution {
    /// Creates a resolution from an origin, size, and grid density.
    pub fn new(map_origin: Point, map_size: Size, pixels_per_grid: f64) -> Self {
        Self {
            map_origin,
            map_size,
            pixels_per_grid,
        }
    }

    /// Returns the top-left corner of the map in grid squares
    pub fn map_origin(self) -> Point {
        self.map_origin
    }

    /// Returns the map dimensions in grid squares
    pub fn map_size(self) -> Size {
        self.map_size
    }

    /// Returns the number of raster pixels per grid square
    pub fn pixels_per_grid(self) -> f64 {
        self.pixels_per_grid
    }

    /// Returns the map dimensions in pixels
    pub fn pixel_size(self) -> Size {
        self.map_size.scale(self.pixels_per_grid)
    }

    /// Tests whether a grid-space point lies on the map.
    ///
    /// Both boundary edges count as inside, so a point exactly on the far
    /// edge of the map is retained. Segments are kept when at least one
    /// endpoint passes this test, which preserves walls that cross the
    /// map border.
    ///
    /// # Examples
    ///
    /// ```
    /// # use mapstitch_core::geometry::{Point, Size};
    /// # use mapstitch_core::resolution::Resolution;
    /// let resolution = Resolution::new(Point::new(0.0, 0.0), Size::new(32.0, 21.0), 70.0);
    ///
    /// assert!(resolution.contains(Point::new(32.0, 21.0)));
    /// assert!(!resolution.contains(Point::new(32.5, 21.0)));
    /// ```
    pub fn contains(self, point: Point) -> bool {
        let min = self.map_origin;
        let max_x = min.x() + self.map_size.width();
        let max_y = min.y() + self.map_size.height();

        point.x() >= min.x() && point.x() <= max_x && point.y() >= min.y() && point.y() <= max_y
    }
}
