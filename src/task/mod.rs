//! The closed set of vision-language tasks and their result shapes.
//!
//! The task-to-shape mapping is table-driven: the normalizer's parsing
//! path is chosen from the requested task, never inferred from inspecting
//! the model output. The normalizer still defensively reports a
//! [`ShapeMismatch`](crate::TaskvizError::ShapeMismatch) when the payload
//! disagrees with the declared shape.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::TaskvizError;

/// A capability of the vision-language model, selected by its prompt token.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Task {
    Caption,
    DetailedCaption,
    MoreDetailedCaption,
    ObjectDetection,
    DenseRegionCaption,
    RegionProposal,
    CaptionToPhraseGrounding,
    ReferringExpressionSegmentation,
    RegionToSegmentation,
    OpenVocabularyDetection,
    RegionToCategory,
    RegionToDescription,
    Ocr,
    OcrWithRegion,
}

/// The shape of the result a task produces.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ResultShape {
    /// A plain text answer (captioning, classification, plain OCR).
    PlainText,
    /// An ordered list of labeled bounding boxes.
    BoxList,
    /// An ordered list of polygons.
    PolygonList,
    /// An ordered list of four-point OCR text boxes.
    QuadList,
}

impl fmt::Display for ResultShape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ResultShape::PlainText => "plain text",
            ResultShape::BoxList => "box list",
            ResultShape::PolygonList => "polygon list",
            ResultShape::QuadList => "quad list",
        };
        write!(f, "{}", name)
    }
}

impl Task {
    /// All supported tasks, in menu order.
    pub const ALL: [Task; 14] = [
        Task::Caption,
        Task::DetailedCaption,
        Task::MoreDetailedCaption,
        Task::ObjectDetection,
        Task::DenseRegionCaption,
        Task::RegionProposal,
        Task::CaptionToPhraseGrounding,
        Task::ReferringExpressionSegmentation,
        Task::RegionToSegmentation,
        Task::OpenVocabularyDetection,
        Task::RegionToCategory,
        Task::RegionToDescription,
        Task::Ocr,
        Task::OcrWithRegion,
    ];

    /// Returns the prompt token for this task.
    pub fn token(&self) -> &'static str {
        match self {
            Task::Caption => "<CAPTION>",
            Task::DetailedCaption => "<DETAILED_CAPTION>",
            Task::MoreDetailedCaption => "<MORE_DETAILED_CAPTION>",
            Task::ObjectDetection => "<OD>",
            Task::DenseRegionCaption => "<DENSE_REGION_CAPTION>",
            Task::RegionProposal => "<REGION_PROPOSAL>",
            Task::CaptionToPhraseGrounding => "<CAPTION_TO_PHRASE_GROUNDING>",
            Task::ReferringExpressionSegmentation => "<REFERRING_EXPRESSION_SEGMENTATION>",
            Task::RegionToSegmentation => "<REGION_TO_SEGMENTATION>",
            Task::OpenVocabularyDetection => "<OPEN_VOCABULARY_DETECTION>",
            Task::RegionToCategory => "<REGION_TO_CATEGORY>",
            Task::RegionToDescription => "<REGION_TO_DESCRIPTION>",
            Task::Ocr => "<OCR>",
            Task::OcrWithRegion => "<OCR_WITH_REGION>",
        }
    }

    /// Parses a task from its prompt token.
    ///
    /// # Errors
    /// Returns [`TaskvizError::UnsupportedTask`] for anything outside the
    /// closed set.
    pub fn parse(token: &str) -> Result<Task, TaskvizError> {
        Task::ALL
            .iter()
            .copied()
            .find(|task| task.token() == token)
            .ok_or_else(|| TaskvizError::UnsupportedTask {
                token: token.to_string(),
            })
    }

    /// Returns the shape of result this task produces.
    pub fn shape(&self) -> ResultShape {
        match self {
            Task::ObjectDetection
            | Task::DenseRegionCaption
            | Task::RegionProposal
            | Task::CaptionToPhraseGrounding => ResultShape::BoxList,
            Task::ReferringExpressionSegmentation | Task::RegionToSegmentation => {
                ResultShape::PolygonList
            }
            Task::OcrWithRegion => ResultShape::QuadList,
            Task::Caption
            | Task::DetailedCaption
            | Task::MoreDetailedCaption
            | Task::OpenVocabularyDetection
            | Task::RegionToCategory
            | Task::RegionToDescription
            | Task::Ocr => ResultShape::PlainText,
        }
    }

    /// Returns true if this task needs an extra text phrase in the prompt
    /// (grounding and open-vocabulary tasks).
    pub fn requires_text_input(&self) -> bool {
        matches!(
            self,
            Task::CaptionToPhraseGrounding
                | Task::ReferringExpressionSegmentation
                | Task::OpenVocabularyDetection
        )
    }

    /// Returns true if this task needs a region of interest in the prompt,
    /// given as four `<loc_N>` tokens.
    pub fn requires_region(&self) -> bool {
        matches!(
            self,
            Task::RegionToSegmentation | Task::RegionToCategory | Task::RegionToDescription
        )
    }

    /// Composes the prompt string for the model service: the task token,
    /// the optional text phrase, and the optional region rendered as
    /// `<loc_x1><loc_y1><loc_x2><loc_y2>`.
    pub fn prompt(&self, text_input: Option<&str>, region: Option<[u32; 4]>) -> String {
        let mut prompt = self.token().to_string();
        if let Some(text) = text_input {
            prompt.push_str(text);
        }
        if let Some([x1, y1, x2, y2]) = region {
            prompt.push_str(&format!(
                "<loc_{}><loc_{}><loc_{}><loc_{}>",
                x1, y1, x2, y2
            ));
        }
        prompt
    }
}

impl fmt::Display for Task {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.token())
    }
}

impl std::str::FromStr for Task {
    type Err = TaskvizError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Task::parse(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_roundtrip() {
        for task in Task::ALL {
            assert_eq!(Task::parse(task.token()).unwrap(), task);
        }
    }

    #[test]
    fn test_parse_unknown_token() {
        let err = Task::parse("<NOT_A_TASK>").unwrap_err();
        assert!(matches!(err, TaskvizError::UnsupportedTask { .. }));
    }

    #[test]
    fn test_shape_table() {
        assert_eq!(Task::ObjectDetection.shape(), ResultShape::BoxList);
        assert_eq!(
            Task::ReferringExpressionSegmentation.shape(),
            ResultShape::PolygonList
        );
        assert_eq!(Task::OcrWithRegion.shape(), ResultShape::QuadList);
        assert_eq!(Task::Caption.shape(), ResultShape::PlainText);
        assert_eq!(Task::Ocr.shape(), ResultShape::PlainText);
    }

    #[test]
    fn test_prompt_with_region() {
        let prompt = Task::RegionToSegmentation.prompt(None, Some([702, 575, 866, 772]));
        assert_eq!(
            prompt,
            "<REGION_TO_SEGMENTATION><loc_702><loc_575><loc_866><loc_772>"
        );
    }

    #[test]
    fn test_prompt_with_text() {
        let prompt = Task::CaptionToPhraseGrounding.prompt(Some("a red car"), None);
        assert_eq!(prompt, "<CAPTION_TO_PHRASE_GROUNDING>a red car");
    }

    #[test]
    fn test_input_requirements() {
        assert!(Task::OpenVocabularyDetection.requires_text_input());
        assert!(Task::RegionToCategory.requires_region());
        assert!(!Task::Caption.requires_text_input());
        assert!(!Task::Caption.requires_region());
    }
}
