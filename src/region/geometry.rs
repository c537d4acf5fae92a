//! Labeled regions and the geometry variants a task result can carry.

use serde::{Deserialize, Serialize};

use super::bbox::BBox;

/// A 2D coordinate in raw model output space.
#[derive(Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    /// Creates a new point with the given x and y values.
    #[inline]
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Returns true if both coordinates are finite (not NaN or infinite).
    #[inline]
    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

impl std::fmt::Debug for Point {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

impl From<(f64, f64)> for Point {
    fn from((x, y): (f64, f64)) -> Self {
        Self::new(x, y)
    }
}

/// The minimum number of points a polygon needs to be drawable.
///
/// Polygons with fewer points are dropped from the drawable set during
/// normalization and counted in [`RegionSet::discarded`].
pub const MIN_POLYGON_POINTS: usize = 3;

/// One geometric entity extracted from model output.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Geometry {
    /// An axis-aligned bounding box (detection, grounding, region proposal).
    Bounds(BBox),

    /// A free-form polygon (segmentation). Needs at least
    /// [`MIN_POLYGON_POINTS`] points to be drawable.
    Polygon(Vec<Point>),

    /// A four-point quadrilateral representing a rotated or skewed OCR
    /// text region.
    Quad([Point; 4]),
}

impl Geometry {
    /// Returns true if this geometry has enough points to be drawn.
    pub fn is_drawable(&self) -> bool {
        match self {
            Geometry::Bounds(_) | Geometry::Quad(_) => true,
            Geometry::Polygon(points) => points.len() >= MIN_POLYGON_POINTS,
        }
    }

    /// Returns true if every coordinate in this geometry is finite.
    pub fn is_finite(&self) -> bool {
        match self {
            Geometry::Bounds(bbox) => bbox.is_finite(),
            Geometry::Polygon(points) => points.iter().all(Point::is_finite),
            Geometry::Quad(points) => points.iter().all(Point::is_finite),
        }
    }
}

/// One labeled geometric entity extracted from model output.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Region {
    /// The label text. May be empty: segmentation polygons carry no label,
    /// and detection labels can be missing when the label array is shorter
    /// than the geometry array.
    pub label: String,

    /// The geometry of this region.
    pub geometry: Geometry,
}

impl Region {
    /// Creates a new labeled region.
    pub fn new(label: impl Into<String>, geometry: Geometry) -> Self {
        Self {
            label: label.into(),
            geometry,
        }
    }

    /// Creates a region with an empty label.
    pub fn unlabeled(geometry: Geometry) -> Self {
        Self::new("", geometry)
    }
}

/// An ordered collection of drawable regions plus a discard tally.
///
/// `discarded` counts polygons that were dropped during normalization for
/// having fewer than [`MIN_POLYGON_POINTS`] points. The tally is part of
/// the result so callers can surface it in diagnostics; the drop itself is
/// not an error.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct RegionSet {
    /// Regions in model output order, all drawable.
    pub regions: Vec<Region>,

    /// Number of undersized polygons dropped during normalization.
    #[serde(default)]
    pub discarded: usize,
}

impl RegionSet {
    /// Creates a region set with no discards.
    pub fn new(regions: Vec<Region>) -> Self {
        Self {
            regions,
            discarded: 0,
        }
    }

    /// Adds a region if its geometry is drawable, otherwise bumps the
    /// discard tally.
    pub fn push_drawable(&mut self, region: Region) {
        if region.geometry.is_drawable() {
            self.regions.push(region);
        } else {
            self.discarded += 1;
        }
    }

    /// Returns true if there are no drawable regions.
    pub fn is_empty(&self) -> bool {
        self.regions.is_empty()
    }

    /// Returns the number of drawable regions.
    pub fn len(&self) -> usize {
        self.regions.len()
    }
}
