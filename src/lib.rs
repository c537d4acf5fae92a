//! Taskviz: drawable regions from vision-language task output.
//!
//! A vision-language model answers a task prompt (captioning, detection,
//! segmentation, OCR, grounding) with loosely-structured output: plain
//! text, mappings of coordinate arrays, strings of `<loc_N>` tokens, or
//! JSON-encoded strings, with no schema guarantee. Taskviz turns that
//! output into well-formed geometric primitives and renders them onto a
//! copy of the source image, tolerating malformed and task-dependent
//! shapes along the way.
//!
//! # Modules
//!
//! - [`task`]: the closed task set and its table-driven result shapes
//! - [`normalize`]: raw output to canonical regions or text fallback
//! - [`region`]: geometry types and pixel-space clamping
//! - [`annotate`]: rendering regions onto an image copy
//! - [`interpret`]: the end-to-end pipeline tying the above together
//! - [`session`]: per-conversation input gathering for the boundary layer
//! - [`codec`]: raster decode/encode at the boundary
//! - [`error`]: error types for taskviz operations
//!
//! # Example
//!
//! ```
//! use serde_json::json;
//! use taskviz::interpret::{interpret, InterpretOptions};
//! use taskviz::Task;
//!
//! let image = image::RgbImage::new(100, 100);
//! let response = json!({
//!     "<OD>": { "bboxes": [[10, 10, 50, 50]], "labels": ["cat"] }
//! });
//!
//! let result = interpret(
//!     Task::ObjectDetection,
//!     &response,
//!     &image,
//!     &InterpretOptions::default(),
//! )
//! .unwrap();
//!
//! assert_eq!(result.regions.len(), 1);
//! assert!(result.annotated.is_some());
//! ```

pub mod annotate;
pub mod codec;
pub mod error;
pub mod interpret;
pub mod normalize;
pub mod region;
pub mod session;
pub mod task;

pub use error::TaskvizError;
pub use task::{ResultShape, Task};
