//! Stitch layout computation.
//!
//! A layout assigns every document a slot on the merged canvas. All
//! slots share one cell size, taken from the first document, so maps
//! exported at the same grid dimensions tile exactly. Offsets exist in
//! two spaces: grid units for feature translation and pixels for
//! raster compositing.

use std::str::FromStr;

use log::{debug, info};
use serde::Deserialize;

use mapstitch_core::document::MapDocument;
use mapstitch_core::geometry::{Point, Size};

use crate::error::MergeError;

/// How source maps are arranged on the stitched canvas.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StitchMode {
    /// Rows of `ceil(sqrt(n))` maps, top-left to bottom-right.
    #[default]
    Grid,
    /// One column, top to bottom.
    Vertical,
    /// One row, left to right.
    Horizontal,
}

impl FromStr for StitchMode {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.to_ascii_lowercase().as_str() {
            "g" | "grid" => Ok(Self::Grid),
            "y" | "vertical" => Ok(Self::Vertical),
            "x" | "horizontal" => Ok(Self::Horizontal),
            other => Err(format!(
                "unknown stitch mode: {other} (expected grid, vertical, or horizontal)"
            )),
        }
    }
}

/// One document's slot on the merged canvas.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Placement {
    grid_offset: Point,
    pixel_offset: Point,
}

impl Placement {
    fn new(grid_offset: Point, pixels_per_grid: f64) -> Self {
        Self {
            grid_offset,
            pixel_offset: grid_offset.scale(pixels_per_grid),
        }
    }

    /// Offset in grid units, applied to walls, portals, and lights.
    pub fn grid_offset(&self) -> Point {
        self.grid_offset
    }

    /// Offset in pixels, applied when compositing the raster.
    pub fn pixel_offset(&self) -> Point {
        self.pixel_offset
    }
}

/// Computed arrangement of all documents on the merged canvas.
#[derive(Debug, Clone)]
pub struct LayoutPlan {
    placements: Vec<Placement>,
    grid_size: Size,
    pixels_per_grid: f64,
}

impl LayoutPlan {
    /// Computes placements for `documents` under the given mode.
    ///
    /// The cell size is the first document's map size regardless of the
    /// sizes that follow. A single document always lands at the origin.
    pub fn compute(
        documents: &[MapDocument],
        mode: StitchMode,
        pixels_per_grid: f64,
    ) -> Result<Self, MergeError> {
        let Some(first) = documents.first() else {
            return Err(MergeError::NoDocuments);
        };
        let cell = first.resolution().map_size();
        let count = documents.len();
        info!(documents = count, mode:? = mode; "Computing stitch layout");

        let (placements, grid_size) = match mode {
            StitchMode::Vertical => {
                let placements = (0..count)
                    .map(|index| {
                        Placement::new(
                            Point::new(0.0, index as f64 * cell.height()),
                            pixels_per_grid,
                        )
                    })
                    .collect();
                let grid_size = Size::new(cell.width(), count as f64 * cell.height());
                (placements, grid_size)
            }
            StitchMode::Horizontal => {
                let placements = (0..count)
                    .map(|index| {
                        Placement::new(
                            Point::new(index as f64 * cell.width(), 0.0),
                            pixels_per_grid,
                        )
                    })
                    .collect();
                let grid_size = Size::new(count as f64 * cell.width(), cell.height());
                (placements, grid_size)
            }
            StitchMode::Grid => {
                let row_width = (count as f64).sqrt().ceil() as usize;
                let rows = count.div_ceil(row_width);
                let placements = (0..count)
                    .map(|index| {
                        let row = index / row_width;
                        let column = index - row * row_width;
                        Placement::new(
                            Point::new(
                                column as f64 * cell.width(),
                                row as f64 * cell.height(),
                            ),
                            pixels_per_grid,
                        )
                    })
                    .collect();
                let grid_size =
                    Size::new(row_width as f64 * cell.width(), rows as f64 * cell.height());
                (placements, grid_size)
            }
        };

        debug!(
            canvas_width = grid_size.width(),
            canvas_height = grid_size.height();
            "Stitch layout computed"
        );
        Ok(Self {
            placements,
            grid_size,
            pixels_per_grid,
        })
    }

    pub fn placements(&self) -> &[Placement] {
        &self.placements
    }

    /// Merged canvas size in grid units.
    pub fn grid_size(&self) -> Size {
        self.grid_size
    }

    pub fn pixels_per_grid(&self) -> f64 {
        self.pixels_per_grid
    }

    /// Merged canvas size in whole pixels.
    pub fn pixel_dimensions(&self) -> (u32, u32) {
        let size = self.grid_size.scale(self.pixels_per_grid);
        (size.width() as u32, size.height() as u32)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use mapstitch_core::raster::RasterData;
    use mapstitch_core::resolution::Resolution;

    pub(super) fn document(width: f64, height: f64, pixels_per_grid: f64) -> MapDocument {
        let resolution = Resolution::new(
            Point::new(0.0, 0.0),
            Size::new(width, height),
            pixels_per_grid,
        );
        MapDocument::new(resolution, RasterData::new(Vec::new()))
    }

    #[test]
    fn empty_input_is_rejected() {
        let result = LayoutPlan::compute(&[], StitchMode::Grid, 100.0);
        assert!(matches!(result, Err(MergeError::NoDocuments)));
    }

    #[test]
    fn single_document_lands_at_origin() {
        for mode in [StitchMode::Grid, StitchMode::Vertical, StitchMode::Horizontal] {
            let documents = vec![document(12.0, 9.0, 100.0)];
            let plan = LayoutPlan::compute(&documents, mode, 100.0).expect("Layout should work");
            assert_eq!(plan.placements().len(), 1);
            assert_eq!(plan.placements()[0].grid_offset(), Point::new(0.0, 0.0));
            assert_eq!(plan.grid_size(), Size::new(12.0, 9.0));
        }
    }

    #[test]
    fn vertical_layout_stacks_downward() {
        let documents = vec![document(10.0, 8.0, 100.0), document(10.0, 8.0, 100.0)];
        let plan =
            LayoutPlan::compute(&documents, StitchMode::Vertical, 100.0).expect("Layout");
        assert_eq!(plan.placements()[0].grid_offset(), Point::new(0.0, 0.0));
        assert_eq!(plan.placements()[1].grid_offset(), Point::new(0.0, 8.0));
        assert_eq!(plan.grid_size(), Size::new(10.0, 16.0));
    }

    #[test]
    fn horizontal_layout_runs_rightward() {
        let documents = vec![
            document(10.0, 8.0, 100.0),
            document(10.0, 8.0, 100.0),
            document(10.0, 8.0, 100.0),
        ];
        let plan =
            LayoutPlan::compute(&documents, StitchMode::Horizontal, 100.0).expect("Layout");
        assert_eq!(plan.placements()[2].grid_offset(), Point::new(20.0, 0.0));
        assert_eq!(plan.grid_size(), Size::new(30.0, 8.0));
    }

    #[test]
    fn grid_layout_wraps_rows() {
        // Five documents give a row width of ceil(sqrt(5)) = 3.
        let documents: Vec<_> = (0..5).map(|_| document(10.0, 8.0, 100.0)).collect();
        let plan = LayoutPlan::compute(&documents, StitchMode::Grid, 100.0).expect("Layout");

        assert_eq!(plan.placements()[0].grid_offset(), Point::new(0.0, 0.0));
        assert_eq!(plan.placements()[2].grid_offset(), Point::new(20.0, 0.0));
        assert_eq!(plan.placements()[3].grid_offset(), Point::new(0.0, 8.0));
        assert_eq!(plan.placements()[4].grid_offset(), Point::new(10.0, 8.0));
        assert_eq!(plan.grid_size(), Size::new(30.0, 16.0));
    }

    #[test]
    fn grid_layout_square_count() {
        let documents: Vec<_> = (0..4).map(|_| document(6.0, 6.0, 100.0)).collect();
        let plan = LayoutPlan::compute(&documents, StitchMode::Grid, 100.0).expect("Layout");
        assert_eq!(plan.placements()[3].grid_offset(), Point::new(6.0, 6.0));
        assert_eq!(plan.grid_size(), Size::new(12.0, 12.0));
    }

    #[test]
    fn cell_size_comes_from_first_document() {
        let documents = vec![document(10.0, 8.0, 100.0), document(30.0, 40.0, 100.0)];
        let plan =
            LayoutPlan::compute(&documents, StitchMode::Vertical, 100.0).expect("Layout");
        // The second document's own size does not widen the canvas.
        assert_eq!(plan.placements()[1].grid_offset(), Point::new(0.0, 8.0));
        assert_eq!(plan.grid_size(), Size::new(10.0, 16.0));
    }

    #[test]
    fn pixel_offsets_scale_with_grid_density() {
        let documents = vec![document(10.0, 8.0, 100.0), document(10.0, 8.0, 100.0)];
        let plan =
            LayoutPlan::compute(&documents, StitchMode::Horizontal, 70.0).expect("Layout");
        assert_eq!(plan.placements()[1].pixel_offset(), Point::new(700.0, 0.0));
        assert_eq!(plan.pixel_dimensions(), (1400, 560));
    }

    #[test]
    fn stitch_mode_parses_short_and_long_names() {
        assert_eq!("g".parse::<StitchMode>(), Ok(StitchMode::Grid));
        assert_eq!("y".parse::<StitchMode>(), Ok(StitchMode::Vertical));
        assert_eq!("x".parse::<StitchMode>(), Ok(StitchMode::Horizontal));
        assert_eq!("Vertical".parse::<StitchMode>(), Ok(StitchMode::Vertical));
        assert!("diagonal".parse::<StitchMode>().is_err());
    }
}

#[cfg(test)]
mod proptest_tests {
    use proptest::prelude::*;

    use super::tests::document;
    use super::*;

    fn mode_strategy() -> impl Strategy<Value = StitchMode> {
        prop_oneof![
            Just(StitchMode::Grid),
            Just(StitchMode::Vertical),
            Just(StitchMode::Horizontal),
        ]
    }

    proptest! {
        #[test]
        fn every_document_gets_a_slot_inside_the_canvas(
            count in 1usize..40,
            width in 1.0f64..64.0,
            height in 1.0f64..64.0,
            pixels_per_grid in 1.0f64..256.0,
            mode in mode_strategy(),
        ) {
            let documents: Vec<_> = (0..count)
                .map(|_| document(width, height, pixels_per_grid))
                .collect();
            let plan = LayoutPlan::compute(&documents, mode, pixels_per_grid)
                .expect("Non-empty input always lays out");

            prop_assert_eq!(plan.placements().len(), count);
            let canvas = plan.grid_size();
            for placement in plan.placements() {
                let offset = placement.grid_offset();
                prop_assert!(offset.x() >= 0.0 && offset.y() >= 0.0);
                prop_assert!(offset.x() + width <= canvas.width() + 1e-6);
                prop_assert!(offset.y() + height <= canvas.height() + 1e-6);
                prop_assert!(
                    (placement.pixel_offset().x() - offset.x() * pixels_per_grid).abs() < 1e-6
                );
            }
        }
    }
}
