//! Detection, saliency, region, and result types.

use crate::domain::concept::{Concept, ConceptCategory};
use ndarray::Array2;
use serde::{Deserialize, Serialize};

/// A concept that scored above threshold for an image, ranked by confidence.
///
/// Detections are produced sorted strictly by descending confidence, capped
/// at the configured maximum, with sequential ids (`detection_0`,
/// `detection_1`, ...) assigned in that final order.
#[derive(Debug, Clone, Serialize)]
pub struct Detection {
    /// Sequential identifier assigned after filtering and ranking.
    pub id: String,
    /// The vocabulary concept this detection refers to.
    pub concept: Concept,
    /// Probability mass assigned to the concept, in [0, 1].
    pub confidence: f32,
    /// Index of the concept within the scored vocabulary.
    pub class_index: usize,
}

impl Detection {
    /// The title-cased display label, derived from the concept's category.
    pub fn label(&self) -> &'static str {
        self.concept.category.label()
    }

    /// The display color, derived from the concept's category.
    pub fn color(&self) -> &'static str {
        self.concept.color()
    }
}

/// A normalized 2D saliency map for one detection.
///
/// Values lie in [0, 1] and dimensions equal the canonical model input
/// resolution. Each map carries the id of the detection it explains, so
/// downstream pairing is by identity rather than by list position: a concept
/// whose extraction failed cannot shift later maps onto the wrong detection.
#[derive(Debug, Clone)]
pub struct SaliencyMap {
    /// Id of the detection this map explains.
    pub detection_id: String,
    /// The normalized activation grid, indexed `[row, col]`.
    pub map: Array2<f32>,
}

/// A percentage-space bounding box derived from a saliency map.
///
/// Coordinates are percentages of the image in [0, 100]. The label, color,
/// confidence, and category are copied verbatim from the source detection.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Region {
    /// Id of the source detection.
    pub id: String,
    /// Bounding box as `[x, y, width, height]`, each a percentage.
    pub bbox: [f32; 4],
    /// Display label of the source detection.
    pub label: String,
    /// Display color of the source detection.
    pub color: String,
    /// Confidence of the source detection.
    pub confidence: f32,
    /// Category of the source detection.
    pub category: ConceptCategory,
}

/// The aggregate output of one pipeline run.
#[derive(Debug, Clone, Serialize)]
pub struct AnalysisResult {
    /// Human-readable narrative explaining the findings.
    pub narrative: String,
    /// Regions derived from saliency, at most one per detection.
    pub regions: Vec<Region>,
    /// The ranked detections driving the narrative.
    pub detections: Vec<Detection>,
    /// Mean confidence across detections, 0.0 when none were found.
    pub overall_confidence: f32,
    /// Wall-clock duration of the whole pipeline, in seconds.
    pub elapsed_seconds: f64,
    /// The generated caption, or the configured fallback.
    pub caption: String,
}
