//! Property tests for pixel-space clamping.

use proptest::prelude::*;

use taskviz::region::clamp::{clamp_bbox, clamp_point, clamp_region_set, clamp_scalar};
use taskviz::region::Geometry;

mod proptest_helpers;

proptest! {
    #![proptest_config(proptest_helpers::proptest_config())]

    #[test]
    fn clamp_is_idempotent(
        point in proptest_helpers::arb_point(),
        (width, height) in proptest_helpers::arb_dimensions(),
    ) {
        let once = clamp_point(point, width, height);
        let twice = clamp_point(once, width, height);
        prop_assert_eq!(once, twice);
    }

    #[test]
    fn clamped_scalar_is_integral_and_in_bounds(
        value in prop::num::f64::ANY,
        bound in 1u32..4096,
    ) {
        let clamped = clamp_scalar(value, bound);
        prop_assert_eq!(clamped, clamped.trunc());
        prop_assert!(clamped >= 0.0);
        prop_assert!(clamped < bound as f64);
    }

    #[test]
    fn clamped_bbox_is_ordered_and_in_bounds(
        bbox in proptest_helpers::arb_bbox(),
        (width, height) in proptest_helpers::arb_dimensions(),
    ) {
        let clamped = clamp_bbox(bbox, width, height);
        prop_assert!(clamped.is_ordered());
        prop_assert!(clamped.x1 >= 0.0 && clamped.x2 < width as f64);
        prop_assert!(clamped.y1 >= 0.0 && clamped.y2 < height as f64);
        // Idempotence holds for boxes too.
        prop_assert_eq!(clamped, clamp_bbox(clamped, width, height));
    }

    #[test]
    fn clamped_set_preserves_structure(
        set in proptest_helpers::arb_region_set(8),
        (width, height) in proptest_helpers::arb_dimensions(),
    ) {
        let clamped = clamp_region_set(&set, width, height);

        prop_assert_eq!(clamped.regions.len(), set.regions.len());
        prop_assert_eq!(clamped.discarded, set.discarded);

        for (before, after) in set.regions.iter().zip(clamped.regions.iter()) {
            prop_assert_eq!(&before.label, &after.label);
            match (&before.geometry, &after.geometry) {
                (Geometry::Polygon(a), Geometry::Polygon(b)) => {
                    prop_assert_eq!(a.len(), b.len());
                    for point in b {
                        prop_assert!(point.x >= 0.0 && point.x < width as f64);
                        prop_assert!(point.y >= 0.0 && point.y < height as f64);
                    }
                }
                (Geometry::Bounds(_), Geometry::Bounds(b)) => {
                    prop_assert!(b.is_ordered());
                }
                (Geometry::Quad(_), Geometry::Quad(b)) => {
                    for point in b {
                        prop_assert!(point.x >= 0.0 && point.x < width as f64);
                        prop_assert!(point.y >= 0.0 && point.y < height as f64);
                    }
                }
                _ => prop_assert!(false, "geometry variant changed during clamping"),
            }
        }
    }
}
