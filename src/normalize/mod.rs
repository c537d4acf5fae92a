//! Normalization of raw task output into canonical regions.
//!
//! The model service gives no schema guarantee: a task result may arrive
//! as an already-structured mapping (`bboxes`/`labels` and friends), a
//! string of `<loc_N>` tokens, a JSON-encoded string, or a flat
//! coordinate list. This module turns all of those into a [`RegionSet`]
//! or an explicit text fallback, branching on tags rather than catching
//! exceptions.
//!
//! Recoverable conditions (unparseable JSON strings, shape mismatches
//! handled upstream) degrade to [`Normalized::Text`]; only coordinate
//! data that is structurally inconsistent with no recovery heuristic
//! becomes [`MalformedGeometry`](crate::TaskvizError::MalformedGeometry).

pub mod loc_tokens;

pub use loc_tokens::ChunkPolicy;

use serde_json::Value;
use tracing::{debug, warn};

use crate::error::TaskvizError;
use crate::region::{BBox, Geometry, Point, Region, RegionSet};
use crate::task::ResultShape;

/// The outcome of normalizing one task result.
#[derive(Clone, Debug, PartialEq)]
pub enum Normalized {
    /// Parsed, drawable geometry.
    Regions(RegionSet),

    /// A plain-text result, or the fallback when the payload could not be
    /// interpreted as geometry.
    Text(String),
}

/// Normalizes a raw task result into regions or text.
///
/// `shape` comes from the task dispatcher table, never from inspecting
/// `raw`. When the payload carries a different geometry family than the
/// declared shape, this surfaces
/// [`ShapeMismatch`](crate::TaskvizError::ShapeMismatch) instead of
/// silently reinterpreting the data.
///
/// # Errors
/// [`MalformedGeometry`](crate::TaskvizError::MalformedGeometry) when
/// coordinate counts are inconsistent (e.g. an odd-length interleaved
/// list); [`ShapeMismatch`](crate::TaskvizError::ShapeMismatch) when the
/// payload shape contradicts the dispatcher. Both are recoverable by the
/// caller via a text fallback.
pub fn normalize(
    shape: ResultShape,
    raw: &Value,
    chunk: ChunkPolicy,
) -> Result<Normalized, TaskvizError> {
    if shape == ResultShape::PlainText {
        return Ok(Normalized::Text(value_to_text(raw)));
    }

    match raw {
        Value::Object(map) => normalize_structured(shape, map),
        Value::String(s) => normalize_string(shape, s, chunk),
        Value::Array(items) => normalize_array(shape, items),
        other => Err(TaskvizError::ShapeMismatch {
            expected: shape,
            found: value_kind(other).to_string(),
        }),
    }
}

/// Renders a result value as display text.
fn value_to_text(raw: &Value) -> String {
    match raw {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// Returns a short name for a JSON value's kind, for error messages.
fn value_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "mapping",
    }
}

/// The mapping key each geometric shape is expected under.
fn geometry_key(shape: ResultShape) -> &'static str {
    match shape {
        ResultShape::BoxList => "bboxes",
        ResultShape::PolygonList => "polygons",
        ResultShape::QuadList => "quad_boxes",
        // PlainText is handled before dispatch reaches here.
        ResultShape::PlainText => unreachable!("plain text has no geometry key"),
    }
}

const GEOMETRY_KEYS: [&str; 3] = ["bboxes", "polygons", "quad_boxes"];

/// Normalizes an already-structured mapping (`bboxes`/`labels` etc.).
fn normalize_structured(
    shape: ResultShape,
    map: &serde_json::Map<String, Value>,
) -> Result<Normalized, TaskvizError> {
    let key = geometry_key(shape);

    let Some(entries) = map.get(key).and_then(Value::as_array) else {
        // Three distinct disagreements, named distinctly: the expected key
        // holds a non-array, some other geometry family is present, or no
        // geometry key exists at all.
        let found = if map.contains_key(key) {
            format!("mapping with non-array '{}'", key)
        } else {
            GEOMETRY_KEYS
                .iter()
                .find(|k| map.contains_key(**k))
                .map(|k| format!("mapping with '{}'", k))
                .unwrap_or_else(|| format!("mapping without '{}'", key))
        };
        return Err(TaskvizError::ShapeMismatch {
            expected: shape,
            found,
        });
    };

    let labels = parse_labels(map.get("labels"), entries.len());

    let mut set = RegionSet::default();
    for (index, entry) in entries.iter().enumerate() {
        let geometry = match shape {
            ResultShape::BoxList => Geometry::Bounds(parse_bbox(entry, index)?),
            ResultShape::PolygonList => Geometry::Polygon(parse_point_list(entry, index)?),
            ResultShape::QuadList => Geometry::Quad(parse_quad(entry, index)?),
            ResultShape::PlainText => unreachable!(),
        };
        set.push_drawable(Region::new(labels[index].clone(), geometry));
    }

    debug!(
        shape = %shape,
        regions = set.len(),
        discarded = set.discarded,
        "normalized structured result"
    );

    Ok(Normalized::Regions(set))
}

/// Reads the label array, padding with empty strings when it is shorter
/// than the geometry array and ignoring any overflow labels.
fn parse_labels(labels: Option<&Value>, count: usize) -> Vec<String> {
    let mut out: Vec<String> = labels
        .and_then(Value::as_array)
        .map(|items| {
            items
                .iter()
                .take(count)
                .map(|item| match item {
                    Value::String(s) => s.clone(),
                    other => other.to_string(),
                })
                .collect()
        })
        .unwrap_or_default();

    out.resize(count, String::new());
    out
}

/// Parses one `[x1, y1, x2, y2]` entry.
fn parse_bbox(entry: &Value, index: usize) -> Result<BBox, TaskvizError> {
    let coords = numeric_list(entry).ok_or_else(|| TaskvizError::MalformedGeometry {
        detail: format!("box {} is not a numeric list", index),
    })?;
    if coords.len() != 4 {
        return Err(TaskvizError::MalformedGeometry {
            detail: format!("box {} has {} coordinates, expected 4", index, coords.len()),
        });
    }
    Ok(BBox::from_xyxy(coords[0], coords[1], coords[2], coords[3]))
}

/// Parses one polygon entry: either nested `[[x, y], ...]` pairs or a
/// flat interleaved `[x, y, x, y, ...]` list (even count required).
fn parse_point_list(entry: &Value, index: usize) -> Result<Vec<Point>, TaskvizError> {
    let items = entry
        .as_array()
        .ok_or_else(|| TaskvizError::MalformedGeometry {
            detail: format!("polygon {} is not a list", index),
        })?;

    if items.iter().all(|item| item.is_number()) {
        let coords = numeric_list(entry).unwrap_or_default();
        return interleaved_points(&coords, index);
    }

    items
        .iter()
        .map(|item| {
            let pair = numeric_list(item).filter(|p| p.len() == 2).ok_or_else(|| {
                TaskvizError::MalformedGeometry {
                    detail: format!("polygon {} contains a non-pair vertex", index),
                }
            })?;
            Ok(Point::new(pair[0], pair[1]))
        })
        .collect()
}

/// Splits a flat interleaved coordinate list into points.
///
/// Unlike the location-token scraper, an explicit list with an odd length
/// is malformed: there is no heuristic that recovers the intended pairing.
fn interleaved_points(coords: &[f64], index: usize) -> Result<Vec<Point>, TaskvizError> {
    if coords.len() % 2 != 0 {
        return Err(TaskvizError::MalformedGeometry {
            detail: format!(
                "polygon {} has an odd number of interleaved coordinates ({})",
                index,
                coords.len()
            ),
        });
    }
    Ok(coords
        .chunks_exact(2)
        .map(|pair| Point::new(pair[0], pair[1]))
        .collect())
}

/// Parses one OCR quad entry: eight interleaved numbers or four pairs.
fn parse_quad(entry: &Value, index: usize) -> Result<[Point; 4], TaskvizError> {
    let points = parse_point_list(entry, index)?;
    if points.len() != 4 {
        return Err(TaskvizError::MalformedGeometry {
            detail: format!("quad {} has {} points, expected 4", index, points.len()),
        });
    }
    Ok([points[0], points[1], points[2], points[3]])
}

/// Normalizes a string payload for a geometric shape.
fn normalize_string(
    shape: ResultShape,
    raw: &str,
    chunk: ChunkPolicy,
) -> Result<Normalized, TaskvizError> {
    // Segmentation output is a bare token stream, not JSON.
    if shape == ResultShape::PolygonList {
        let set = loc_tokens::parse_location_stream(raw, chunk);
        if !set.is_empty() || set.discarded > 0 {
            return Ok(Normalized::Regions(set));
        }
        warn!("no coordinates found in segmentation string, falling back to text");
        return Ok(Normalized::Text(raw.to_string()));
    }

    let trimmed = raw.trim_start();
    if trimmed.starts_with('{') || trimmed.starts_with('[') {
        match serde_json::from_str::<Value>(raw) {
            Ok(parsed) => return normalize(shape, &parsed, chunk),
            Err(err) => {
                // The upstream output format is not contractually
                // guaranteed, so a JSON-looking string that does not parse
                // is a recoverable condition, not an error.
                warn!(error = %err, "task result looked like JSON but did not parse");
                return Ok(Normalized::Text(raw.to_string()));
            }
        }
    }

    Ok(Normalized::Text(raw.to_string()))
}

/// Normalizes a bare array payload.
///
/// A flat numeric list is accepted for the polygon shape as a single
/// interleaved polygon; anything else contradicts the declared shape.
fn normalize_array(shape: ResultShape, items: &[Value]) -> Result<Normalized, TaskvizError> {
    if shape == ResultShape::PolygonList && items.iter().all(|item| item.is_number()) {
        let coords: Vec<f64> = items.iter().filter_map(Value::as_f64).collect();
        let points = interleaved_points(&coords, 0)?;
        let mut set = RegionSet::default();
        set.push_drawable(Region::unlabeled(Geometry::Polygon(points)));
        return Ok(Normalized::Regions(set));
    }

    Err(TaskvizError::ShapeMismatch {
        expected: shape,
        found: "array".to_string(),
    })
}

/// Reads a JSON array of numbers into a float list.
fn numeric_list(value: &Value) -> Option<Vec<f64>> {
    let items = value.as_array()?;
    items.iter().map(Value::as_f64).collect()
}

/// Fuzzing entry point: parses bytes as JSON and runs the value through
/// every result shape.
#[cfg(feature = "fuzzing")]
pub fn fuzz_normalize_bytes(data: &[u8]) {
    let Ok(value) = serde_json::from_slice::<Value>(data) else {
        return;
    };
    for shape in [
        ResultShape::PlainText,
        ResultShape::BoxList,
        ResultShape::PolygonList,
        ResultShape::QuadList,
    ] {
        let _ = normalize(shape, &value, ChunkPolicy::default());
    }
}
