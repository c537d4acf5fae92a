//! Parsing of location-token strings into polygons.
//!
//! Segmentation tasks emit one long string of `<loc_N>` tokens with no
//! delimiter marking where one polygon ends and the next begins. The
//! parser extracts every integer in order, pairs consecutive values into
//! (x, y) points, and partitions the stream into fixed-size chunks.
//!
//! Chunking is a POLICY, not a geometric property of the input: the chunk
//! size approximates polygon boundaries that the source string does not
//! encode. Callers that know a better boundary for their model can tune
//! [`ChunkPolicy::points_per_polygon`].

use tracing::debug;

use crate::region::{Point, Region, RegionSet};

/// How a coordinate stream is partitioned into polygons.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ChunkPolicy {
    /// Maximum number of points per polygon. The final chunk keeps
    /// whatever remains, however short.
    pub points_per_polygon: usize,
}

impl ChunkPolicy {
    /// The default chunk size used by the upstream model front end.
    pub const DEFAULT_POINTS_PER_POLYGON: usize = 50;

    /// Creates a chunk policy with the given size. A size of zero is
    /// treated as one.
    pub fn new(points_per_polygon: usize) -> Self {
        Self {
            points_per_polygon: points_per_polygon.max(1),
        }
    }
}

impl Default for ChunkPolicy {
    fn default() -> Self {
        Self::new(Self::DEFAULT_POINTS_PER_POLYGON)
    }
}

/// Extracts every unsigned integer embedded in the string, in order.
///
/// Runs of ASCII digits are parsed regardless of surrounding text, so
/// `<loc_702><loc_575>` yields `[702.0, 575.0]`. Values are returned as
/// `f64` so that absurdly long digit runs degrade to a large value the
/// clamper reshapes rather than an error.
pub fn extract_integers(input: &str) -> Vec<f64> {
    let mut values = Vec::new();
    let mut run = String::new();

    for ch in input.chars() {
        if ch.is_ascii_digit() {
            run.push(ch);
        } else if !run.is_empty() {
            if let Ok(value) = run.parse::<f64>() {
                values.push(value);
            }
            run.clear();
        }
    }
    if !run.is_empty() {
        if let Ok(value) = run.parse::<f64>() {
            values.push(value);
        }
    }

    values
}

/// Pairs consecutive values into (x, y) points.
///
/// A trailing unpaired value is ignored, matching the tolerant behavior
/// expected of the token stream (the strict odd-count rule applies to
/// explicit flat coordinate lists, not to scraped token streams).
pub fn pair_points(values: &[f64]) -> Vec<Point> {
    values
        .chunks_exact(2)
        .map(|pair| Point::new(pair[0], pair[1]))
        .collect()
}

/// Parses a location-token string into a set of unlabeled polygons.
///
/// Points are grouped into polygons of at most
/// [`ChunkPolicy::points_per_polygon`] points. Chunks with fewer than
/// three points are dropped from the drawable set and counted in the
/// discard tally. An input with no integers at all yields an empty set;
/// the caller decides whether to fall back to text.
pub fn parse_location_stream(input: &str, policy: ChunkPolicy) -> RegionSet {
    let values = extract_integers(input);
    let points = pair_points(&values);

    let mut set = RegionSet::default();
    for chunk in points.chunks(policy.points_per_polygon.max(1)) {
        set.push_drawable(Region::unlabeled(crate::region::Geometry::Polygon(
            chunk.to_vec(),
        )));
    }

    debug!(
        integers = values.len(),
        polygons = set.len(),
        discarded = set.discarded,
        "parsed location-token stream"
    );

    set
}
