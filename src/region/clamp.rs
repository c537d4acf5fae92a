//! Clamping of raw model coordinates into integer pixel space.
//!
//! Every function here is pure and total: clamping cannot fail, it only
//! reshapes out-of-range input. Non-integer coordinates truncate toward
//! zero (matching pixel addressing), non-finite coordinates collapse to 0,
//! and the result always satisfies `0 <= x < width` and `0 <= y < height`.
//! Clamping is idempotent: applying it twice gives the same result as
//! applying it once.

use super::bbox::BBox;
use super::geometry::{Geometry, Point, Region, RegionSet};

/// Clamps a single scalar into `[0, bound)` after truncating toward zero.
///
/// Non-finite input clamps to 0. A zero bound also clamps to 0, so the
/// function stays total for degenerate images.
#[inline]
pub fn clamp_scalar(value: f64, bound: u32) -> f64 {
    if !value.is_finite() {
        return 0.0;
    }
    let max = bound.saturating_sub(1) as f64;
    value.trunc().clamp(0.0, max)
}

/// Clamps a point into the bounds of a `width` x `height` image.
#[inline]
pub fn clamp_point(point: Point, width: u32, height: u32) -> Point {
    Point::new(
        clamp_scalar(point.x, width),
        clamp_scalar(point.y, height),
    )
}

/// Clamps a bounding box into image bounds, also ordering the corners so
/// that `x1 <= x2` and `y1 <= y2`.
pub fn clamp_bbox(bbox: BBox, width: u32, height: u32) -> BBox {
    let ordered = bbox.ordered();
    BBox {
        x1: clamp_scalar(ordered.x1, width),
        y1: clamp_scalar(ordered.y1, height),
        x2: clamp_scalar(ordered.x2, width),
        y2: clamp_scalar(ordered.y2, height),
    }
}

/// Clamps a geometry into image bounds. Applies uniformly to boxes,
/// polygons, and quads.
pub fn clamp_geometry(geometry: &Geometry, width: u32, height: u32) -> Geometry {
    match geometry {
        Geometry::Bounds(bbox) => Geometry::Bounds(clamp_bbox(*bbox, width, height)),
        Geometry::Polygon(points) => Geometry::Polygon(
            points
                .iter()
                .map(|&p| clamp_point(p, width, height))
                .collect(),
        ),
        Geometry::Quad(points) => {
            Geometry::Quad(points.map(|p| clamp_point(p, width, height)))
        }
    }
}

/// Clamps every region in a set, preserving order and the discard tally.
pub fn clamp_region_set(set: &RegionSet, width: u32, height: u32) -> RegionSet {
    RegionSet {
        regions: set
            .regions
            .iter()
            .map(|region| Region {
                label: region.label.clone(),
                geometry: clamp_geometry(&region.geometry, width, height),
            })
            .collect(),
        discarded: set.discarded,
    }
}
