use thiserror::Error;

use crate::task::ResultShape;

/// The main error type for taskviz operations.
///
/// Only [`TaskvizError::UnsupportedTask`] and
/// [`TaskvizError::MissingTaskResult`] are fatal to a request. The geometry
/// variants ([`TaskvizError::MalformedGeometry`],
/// [`TaskvizError::ShapeMismatch`]) are recoverable: the interpretation
/// pipeline degrades to a text-only result instead of failing the request.
#[derive(Debug, Error)]
pub enum TaskvizError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// The task token is not one of the closed set of supported tasks.
    #[error("Unsupported task: '{token}'")]
    UnsupportedTask { token: String },

    /// The model response mapping contained no key prefixed by the task token.
    #[error("No result for task {task} in model response")]
    MissingTaskResult { task: String },

    /// Coordinate data could not be parsed and no recovery heuristic applies.
    #[error("Malformed geometry: {detail}")]
    MalformedGeometry { detail: String },

    /// The dispatcher expected one result shape but the payload carried another.
    #[error("Shape mismatch: expected {expected}, found {found}")]
    ShapeMismatch {
        expected: ResultShape,
        found: String,
    },

    #[error("Failed to decode image: {source}")]
    ImageDecode {
        #[source]
        source: image::ImageError,
    },

    #[error("Failed to encode image: {source}")]
    ImageEncode {
        #[source]
        source: image::ImageError,
    },
}

impl TaskvizError {
    /// Returns true if the interpretation pipeline may degrade to a
    /// text-only result instead of surfacing this error to the caller.
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            TaskvizError::MalformedGeometry { .. } | TaskvizError::ShapeMismatch { .. }
        )
    }
}
