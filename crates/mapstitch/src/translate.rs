//! Feature translation into the merged coordinate space.
//!
//! Each document's walls, portals, and lights are shifted by the
//! document's grid offset and concatenated in placement order. When
//! several maps are stitched, an optional boundary rectangle is added
//! per document so sight does not leak between neighbouring maps.

use log::debug;

use mapstitch_core::document::MapDocument;
use mapstitch_core::feature::{Light, Portal, Ring};
use mapstitch_core::geometry::Point;

use crate::layout::LayoutPlan;

/// All features of all documents, translated into merged grid space.
pub(crate) struct MergedFeatures {
    pub(crate) rings: Vec<Ring>,
    pub(crate) portals: Vec<Portal>,
    pub(crate) lights: Vec<Light>,
}

/// Translates and concatenates features in placement order.
///
/// Per document the order is line-of-sight rings, then object walls
/// when enabled, then the boundary rectangle. The boundary uses the
/// document's own map size, so undersized maps get a tight border even
/// though the layout cell comes from the first document.
pub(crate) fn merge_features(
    documents: &[MapDocument],
    plan: &LayoutPlan,
    object_walls: bool,
    walls_around_files: bool,
) -> MergedFeatures {
    let mut rings = Vec::new();
    let mut portals = Vec::new();
    let mut lights = Vec::new();
    let multiple = documents.len() > 1;

    for (document, placement) in documents.iter().zip(plan.placements()) {
        let offset = placement.grid_offset();

        rings.extend(
            document
                .line_of_sight()
                .iter()
                .map(|ring| ring.translated(offset)),
        );
        if object_walls {
            rings.extend(
                document
                    .object_walls()
                    .iter()
                    .map(|ring| ring.translated(offset)),
            );
        }
        if walls_around_files && multiple {
            rings.extend(boundary_ring(document, offset));
        }

        portals.extend(
            document
                .portals()
                .iter()
                .map(|portal| portal.translated(offset)),
        );
        lights.extend(
            document
                .lights()
                .iter()
                .map(|light| light.translated(offset)),
        );
    }

    debug!(
        rings = rings.len(),
        portals = portals.len(),
        lights = lights.len();
        "Features translated into merged space"
    );
    MergedFeatures {
        rings,
        portals,
        lights,
    }
}

/// Closed rectangle around one document's slot.
fn boundary_ring(document: &MapDocument, offset: Point) -> Option<Ring> {
    let size = document.resolution().map_size();
    Ring::new(vec![
        offset,
        Point::new(offset.x() + size.width(), offset.y()),
        Point::new(offset.x() + size.width(), offset.y() + size.height()),
        Point::new(offset.x(), offset.y() + size.height()),
        offset,
    ])
}

#[cfg(test)]
mod tests {
    use super::*;

    use mapstitch_core::geometry::Size;
    use mapstitch_core::raster::RasterData;
    use mapstitch_core::resolution::Resolution;

    use crate::layout::StitchMode;

    fn resolution(width: f64, height: f64) -> Resolution {
        Resolution::new(Point::new(0.0, 0.0), Size::new(width, height), 100.0)
    }

    fn ring(points: &[(f64, f64)]) -> Ring {
        Ring::new(points.iter().map(|&(x, y)| Point::new(x, y)).collect())
            .expect("Test rings have at least two points")
    }

    fn document(width: f64, height: f64) -> MapDocument {
        MapDocument::new(resolution(width, height), RasterData::new(Vec::new()))
    }

    #[test]
    fn features_shift_by_placement_offset() {
        let documents = vec![
            document(10.0, 8.0).with_line_of_sight(vec![ring(&[(1.0, 1.0), (2.0, 1.0)])]),
            document(10.0, 8.0)
                .with_line_of_sight(vec![ring(&[(1.0, 1.0), (2.0, 1.0)])])
                .with_portals(vec![Portal::new(
                    Point::new(3.0, 3.0),
                    [Point::new(2.5, 3.0), Point::new(3.5, 3.0)],
                    true,
                )])
                .with_lights(vec![Light::new(Point::new(4.0, 4.0), 2.0, 1.0, "ff88cc00")]),
        ];
        let plan = LayoutPlan::compute(&documents, StitchMode::Vertical, 100.0).expect("Layout");

        let merged = merge_features(&documents, &plan, false, false);

        assert_eq!(merged.rings.len(), 2);
        assert_eq!(merged.rings[0].points()[0], Point::new(1.0, 1.0));
        assert_eq!(merged.rings[1].points()[0], Point::new(1.0, 9.0));
        assert_eq!(merged.portals[0].position(), Point::new(3.0, 11.0));
        assert_eq!(merged.portals[0].bounds()[0], Point::new(2.5, 11.0));
        assert_eq!(merged.lights[0].position(), Point::new(4.0, 12.0));
    }

    #[test]
    fn object_walls_follow_line_of_sight() {
        let documents = vec![document(10.0, 8.0)
            .with_line_of_sight(vec![ring(&[(0.0, 0.0), (1.0, 0.0)])])
            .with_object_walls(vec![ring(&[(5.0, 5.0), (6.0, 5.0)])])];
        let plan = LayoutPlan::compute(&documents, StitchMode::Grid, 100.0).expect("Layout");

        let with_objects = merge_features(&documents, &plan, true, false);
        assert_eq!(with_objects.rings.len(), 2);
        assert_eq!(with_objects.rings[1].points()[0], Point::new(5.0, 5.0));

        let without_objects = merge_features(&documents, &plan, false, false);
        assert_eq!(without_objects.rings.len(), 1);
    }

    #[test]
    fn boundary_rectangles_only_for_multiple_documents() {
        let single = vec![document(10.0, 8.0)];
        let plan = LayoutPlan::compute(&single, StitchMode::Grid, 100.0).expect("Layout");
        let merged = merge_features(&single, &plan, false, true);
        assert!(merged.rings.is_empty());

        let pair = vec![document(10.0, 8.0), document(10.0, 8.0)];
        let plan = LayoutPlan::compute(&pair, StitchMode::Vertical, 100.0).expect("Layout");
        let merged = merge_features(&pair, &plan, false, true);
        assert_eq!(merged.rings.len(), 2);
    }

    #[test]
    fn boundary_rectangle_uses_own_size_at_placement() {
        // The second map is smaller than the layout cell.
        let documents = vec![document(10.0, 8.0), document(6.0, 4.0)];
        let plan = LayoutPlan::compute(&documents, StitchMode::Vertical, 100.0).expect("Layout");
        let merged = merge_features(&documents, &plan, false, true);

        let boundary = &merged.rings[1];
        assert!(boundary.is_closed());
        assert_eq!(boundary.points().len(), 5);
        assert_eq!(boundary.points()[0], Point::new(0.0, 8.0));
        assert_eq!(boundary.points()[2], Point::new(6.0, 12.0));
    }

    #[test]
    fn boundary_follows_document_walls() {
        let documents = vec![
            document(10.0, 8.0).with_line_of_sight(vec![ring(&[(1.0, 1.0), (2.0, 2.0)])]),
            document(10.0, 8.0),
        ];
        let plan = LayoutPlan::compute(&documents, StitchMode::Vertical, 100.0).expect("Layout");
        let merged = merge_features(&documents, &plan, false, true);

        // Document order: first map's walls, first map's boundary,
        // second map's boundary.
        assert_eq!(merged.rings.len(), 3);
        assert_eq!(merged.rings[0].points()[0], Point::new(1.0, 1.0));
        assert_eq!(merged.rings[1].points()[0], Point::new(0.0, 0.0));
        assert_eq!(merged.rings[2].points()[0], Point::new(0.0, 8.0));
    }
}
