#![allow(dead_code)]

use proptest::prelude::*;
use proptest::test_runner::{Config as ProptestConfig, FileFailurePersistence};

use taskviz::region::{BBox, Geometry, Point, Region, RegionSet};

pub fn proptest_config() -> ProptestConfig {
    let cases = std::env::var("PROPTEST_CASES")
        .ok()
        .and_then(|v| v.parse::<u32>().ok())
        .unwrap_or(64);

    let mut config = ProptestConfig::with_failure_persistence(FileFailurePersistence::WithSource(
        "proptest-regressions",
    ));
    config.cases = cases;
    config.max_shrink_iters = 1024;
    config
}

/// Raw model coordinates: well out of typical image bounds on purpose,
/// including negatives and fractional values.
pub fn arb_raw_coord() -> impl Strategy<Value = f64> {
    prop_oneof![
        -2000.0f64..2000.0,
        Just(0.0),
        Just(-0.0),
        Just(999999.5),
    ]
}

pub fn arb_point() -> impl Strategy<Value = Point> {
    (arb_raw_coord(), arb_raw_coord()).prop_map(|(x, y)| Point::new(x, y))
}

pub fn arb_bbox() -> impl Strategy<Value = BBox> {
    (
        arb_raw_coord(),
        arb_raw_coord(),
        arb_raw_coord(),
        arb_raw_coord(),
    )
        .prop_map(|(x1, y1, x2, y2)| BBox::from_xyxy(x1, y1, x2, y2))
}

pub fn arb_geometry() -> impl Strategy<Value = Geometry> {
    prop_oneof![
        arb_bbox().prop_map(Geometry::Bounds),
        prop::collection::vec(arb_point(), 0..12).prop_map(Geometry::Polygon),
        prop::array::uniform4(arb_point()).prop_map(Geometry::Quad),
    ]
}

pub fn arb_region() -> impl Strategy<Value = Region> {
    ("[a-z]{0,8}", arb_geometry()).prop_map(|(label, geometry)| Region::new(label, geometry))
}

pub fn arb_region_set(max_regions: usize) -> impl Strategy<Value = RegionSet> {
    prop::collection::vec(arb_region(), 0..max_regions).prop_map(RegionSet::new)
}

/// Image dimensions small enough to keep drawing cheap but nonzero.
pub fn arb_dimensions() -> impl Strategy<Value = (u32, u32)> {
    (1u32..256, 1u32..256)
}
