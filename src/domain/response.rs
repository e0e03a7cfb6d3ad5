//! Serializable response view of an analysis result.
//!
//! The HTTP layer that fronts this pipeline is out of scope here, but the
//! shape it serves is pure data transformation over [`AnalysisResult`], so it
//! lives with the domain types. Highlighted words are derived by
//! title-casing each region's label.

use crate::domain::detection::{AnalysisResult, Region};
use serde::{Deserialize, Serialize};

/// A region flattened into the response coordinate fields.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResponseBox {
    pub id: String,
    /// X coordinate as a percentage of image width.
    pub x: f32,
    /// Y coordinate as a percentage of image height.
    pub y: f32,
    /// Width as a percentage of image width.
    pub width: f32,
    /// Height as a percentage of image height.
    pub height: f32,
    pub label: String,
    pub color: String,
    pub confidence: f32,
}

impl From<&Region> for ResponseBox {
    fn from(region: &Region) -> Self {
        Self {
            id: region.id.clone(),
            x: region.bbox[0],
            y: region.bbox[1],
            width: region.bbox[2],
            height: region.bbox[3],
            label: region.label.clone(),
            color: region.color.clone(),
            confidence: region.confidence,
        }
    }
}

/// A word in the narrative that should be highlighted with a region's color.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HighlightedWord {
    pub word: String,
    pub id: String,
    pub color: String,
}

/// The response shape served for one analysis request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisResponse {
    pub success: bool,
    pub analysis_text: String,
    pub bounding_boxes: Vec<ResponseBox>,
    pub highlighted_words: Vec<HighlightedWord>,
    pub confidence_score: f32,
    pub processing_time: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_message: Option<String>,
}

impl AnalysisResponse {
    /// Builds a failure response carrying only an error message.
    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            success: false,
            analysis_text: String::new(),
            bounding_boxes: Vec::new(),
            highlighted_words: Vec::new(),
            confidence_score: 0.0,
            processing_time: 0.0,
            error_message: Some(message.into()),
        }
    }
}

impl From<&AnalysisResult> for AnalysisResponse {
    fn from(result: &AnalysisResult) -> Self {
        let bounding_boxes: Vec<ResponseBox> = result.regions.iter().map(Into::into).collect();
        let highlighted_words = result
            .regions
            .iter()
            .map(|region| HighlightedWord {
                word: title_case(&region.label),
                id: region.id.clone(),
                color: region.color.clone(),
            })
            .collect();

        Self {
            success: true,
            analysis_text: result.narrative.clone(),
            bounding_boxes,
            highlighted_words,
            confidence_score: result.overall_confidence,
            processing_time: result.elapsed_seconds,
            error_message: None,
        }
    }
}

/// Title-cases each whitespace-separated word.
fn title_case(text: &str) -> String {
    text.split_whitespace()
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => {
                    first.to_uppercase().collect::<String>() + &chars.as_str().to_lowercase()
                }
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}
