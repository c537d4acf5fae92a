//! The end-to-end interpretation pipeline: dispatch, normalize, clamp, draw.
//!
//! One call takes the requested task, the untrusted model response
//! mapping, and the source image, and produces text, regions, and an
//! annotated copy of the image. The pipeline is synchronous and operates
//! only on private copies, so concurrent calls over different images are
//! independently safe.
//!
//! Failure is graded: an unknown task or a response with no matching key
//! fails the request, while malformed or mismatched geometry degrades to
//! a text-only result carrying the raw payload.

use image::RgbImage;
use serde_json::Value;
use tracing::{debug, warn};

use crate::annotate::{annotate, Style};
use crate::error::TaskvizError;
use crate::normalize::{normalize, ChunkPolicy, Normalized};
use crate::region::clamp::clamp_region_set;
use crate::region::Region;
use crate::task::Task;

/// Options for one interpretation run.
#[derive(Default)]
pub struct InterpretOptions {
    /// How location-token streams are partitioned into polygons.
    pub chunk: ChunkPolicy,

    /// Rendering settings for the annotator.
    pub style: Style,

    /// Skip annotation entirely and return only text and regions.
    pub skip_annotation: bool,
}

/// The result of interpreting one task response.
#[derive(Debug, Default)]
pub struct Interpretation {
    /// Plain-text result, or the fallback text for degraded geometry.
    pub text: Option<String>,

    /// Clamped, drawable regions in model output order.
    pub regions: Vec<Region>,

    /// Annotated copy of the source image, if any regions were drawable
    /// and annotation was requested.
    pub annotated: Option<RgbImage>,

    /// Polygons dropped during normalization for having too few points.
    pub discarded: usize,

    /// Regions that failed to draw and were skipped.
    pub skipped: usize,
}

/// Interprets one model response for `task` against `image`.
///
/// The response is expected to be a mapping with at least one key
/// prefixed by the task token; its value is normalized according to the
/// task's declared result shape, clamped into image bounds, and drawn.
///
/// # Errors
/// [`MissingTaskResult`](TaskvizError::MissingTaskResult) when no
/// response key matches the task token. Geometry errors do not escape:
/// they degrade to a text-only [`Interpretation`].
pub fn interpret(
    task: Task,
    response: &Value,
    image: &RgbImage,
    options: &InterpretOptions,
) -> Result<Interpretation, TaskvizError> {
    let payload = find_task_payload(task, response)?;

    debug!(task = %task, shape = %task.shape(), "interpreting task result");

    match normalize(task.shape(), payload, options.chunk) {
        Ok(Normalized::Text(text)) => Ok(Interpretation {
            text: Some(text),
            ..Interpretation::default()
        }),
        Ok(Normalized::Regions(set)) => {
            let clamped = clamp_region_set(&set, image.width(), image.height());

            let (annotated, skipped) = if options.skip_annotation || clamped.is_empty() {
                (None, 0)
            } else {
                let outcome = annotate(image, &clamped, &options.style);
                (Some(outcome.image), outcome.skipped)
            };

            Ok(Interpretation {
                text: None,
                regions: clamped.regions,
                annotated,
                discarded: clamped.discarded,
                skipped,
            })
        }
        Err(err) if err.is_recoverable() => {
            // Best-effort degradation: show the raw payload as text
            // instead of failing the request.
            warn!(task = %task, error = %err, "geometry unusable, degrading to text");
            Ok(Interpretation {
                text: Some(payload_as_text(payload)),
                ..Interpretation::default()
            })
        }
        Err(err) => Err(err),
    }
}

/// Locates the response value whose key is prefixed by the task token.
fn find_task_payload(task: Task, response: &Value) -> Result<&Value, TaskvizError> {
    let missing = || TaskvizError::MissingTaskResult {
        task: task.token().to_string(),
    };

    let map = response.as_object().ok_or_else(missing)?;
    map.iter()
        .find(|(key, _)| key.starts_with(task.token()))
        .map(|(_, value)| value)
        .ok_or_else(missing)
}

/// Renders a payload for the text fallback path.
fn payload_as_text(payload: &Value) -> String {
    match payload {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}
