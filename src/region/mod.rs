//! Geometric region types extracted from vision-language model output.
//!
//! This module defines the canonical, task-agnostic representation of the
//! geometry a vision-language model can emit: axis-aligned bounding boxes
//! for detection tasks, free-form polygons for segmentation tasks, and
//! four-point quadrilaterals for OCR text regions. All task-specific
//! parsers normalize into these types, and the annotator renders from them.
//!
//! # Design Principles
//!
//! 1. **Permissive Construction**: region types allow "invalid" data to be
//!    represented (unordered boxes, out-of-range coordinates, undersized
//!    polygons), so that normalization can report and discard issues
//!    rather than panic during parsing.
//!
//! 2. **Canonical Pixel Space**: [`clamp`] is the single place where raw
//!    model coordinates become in-bounds integer pixel coordinates. The
//!    annotator only ever sees clamped geometry.
//!
//! # Example
//!
//! ```
//! use taskviz::region::{BBox, Geometry, Region, RegionSet};
//!
//! let set = RegionSet::new(vec![Region::new(
//!     "cat",
//!     Geometry::Bounds(BBox::from_xyxy(10.0, 10.0, 50.0, 50.0)),
//! )]);
//! assert_eq!(set.regions.len(), 1);
//! assert_eq!(set.discarded, 0);
//! ```

mod bbox;
pub mod clamp;
mod geometry;

pub use bbox::BBox;
pub use geometry::{Geometry, Point, Region, RegionSet, MIN_POLYGON_POINTS};
