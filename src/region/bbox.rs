//! Axis-aligned bounding boxes in XYXY format.

use serde::{Deserialize, Serialize};

/// An axis-aligned bounding box in XYXY format (x1, y1, x2, y2).
///
/// Note: this type does NOT enforce that x1 <= x2 or y1 <= y2 in the
/// constructor, allowing "malformed" boxes from the model to exist in the
/// region set. This is intentional - [`BBox::ordered`] produces the
/// normalized form, and clamping applies it before any drawing happens.
#[derive(Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BBox {
    pub x1: f64,
    pub y1: f64,
    pub x2: f64,
    pub y2: f64,
}

impl BBox {
    /// Creates a new bounding box from explicit corner coordinates.
    #[inline]
    pub fn from_xyxy(x1: f64, y1: f64, x2: f64, y2: f64) -> Self {
        Self { x1, y1, x2, y2 }
    }

    /// Returns the width of the bounding box.
    ///
    /// May be negative if the box is malformed (x2 < x1).
    #[inline]
    pub fn width(&self) -> f64 {
        self.x2 - self.x1
    }

    /// Returns the height of the bounding box.
    ///
    /// May be negative if the box is malformed (y2 < y1).
    #[inline]
    pub fn height(&self) -> f64 {
        self.y2 - self.y1
    }

    /// Returns true if all coordinates are finite (not NaN or infinite).
    #[inline]
    pub fn is_finite(&self) -> bool {
        self.x1.is_finite() && self.y1.is_finite() && self.x2.is_finite() && self.y2.is_finite()
    }

    /// Returns true if the box is properly ordered (x1 <= x2, y1 <= y2).
    #[inline]
    pub fn is_ordered(&self) -> bool {
        self.x1 <= self.x2 && self.y1 <= self.y2
    }

    /// Returns the min/max-normalized form of this box.
    ///
    /// After ordering, `x1 <= x2` and `y1 <= y2` hold. Ordering is
    /// idempotent.
    #[inline]
    pub fn ordered(&self) -> Self {
        Self {
            x1: self.x1.min(self.x2),
            y1: self.y1.min(self.y2),
            x2: self.x1.max(self.x2),
            y2: self.y1.max(self.y2),
        }
    }
}

impl std::fmt::Debug for BBox {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BBox")
            .field("x1", &self.x1)
            .field("y1", &self.y1)
            .field("x2", &self.x2)
            .field("y2", &self.y2)
            .finish()
    }
}

impl Default for BBox {
    fn default() -> Self {
        Self::from_xyxy(0.0, 0.0, 0.0, 0.0)
    }
}
