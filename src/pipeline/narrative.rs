//! Narrative composition.
//!
//! Assembles the textual report from the caption and the full ranked
//! detection list. The narrative is driven by detections, not regions: a
//! concept whose region failed to materialize is still described. All
//! templates live in static tables so every category and confidence tier is
//! enumerable in tests.

use crate::core::AnalyzerConfig;
use crate::domain::{ConceptCategory, Detection};
use itertools::Itertools;

/// Fixed sentence emitted when no detections survived scoring.
pub const NO_ELEMENTS_NARRATIVE: &str =
    "No significant propaganda elements detected in this image.";

/// Per-category analysis paragraphs, in table order.
const CATEGORY_DESCRIPTIONS: &[(ConceptCategory, &str)] = &[
    (
        ConceptCategory::Authority,
        "**Authority Appeal**: The presence of authority figures or institutional symbols designed to inspire trust and compliance through perceived credibility and power.",
    ),
    (
        ConceptCategory::Emotional,
        "**Emotional Manipulation**: Visual elements crafted to evoke strong emotional responses, bypassing rational analysis and critical thinking.",
    ),
    (
        ConceptCategory::Fear,
        "**Fear-based Messaging**: Imagery designed to create anxiety, worry, or fear to motivate specific behaviors or beliefs.",
    ),
    (
        ConceptCategory::Patriotic,
        "**Patriotic Symbolism**: Use of national symbols, colors, or imagery to create emotional resonance with patriotic sentiments and national identity.",
    ),
    (
        ConceptCategory::Leader,
        "**Leadership Cult**: Imagery promoting reverence or worship of specific leaders or personalities.",
    ),
    (
        ConceptCategory::Conflict,
        "**Us vs Them Framing**: Visual elements that create clear divisions between groups, promoting in-group loyalty and out-group hostility.",
    ),
    (
        ConceptCategory::Action,
        "**Call to Action**: Visual cues designed to motivate specific behaviors or responses from the viewer.",
    ),
    (
        ConceptCategory::Historical,
        "**Historical References**: Use of historical imagery or references to legitimize current messages or create emotional connections.",
    ),
];

/// Closing assessments by confidence tier, strongest first.
const CLOSING_STRONG: &str = "**Overall Assessment**: This image shows strong indicators of propaganda techniques. The combination of visual elements appears designed to influence opinion or behavior through emotional and psychological appeals rather than factual argumentation.";
const CLOSING_MODERATE: &str = "**Overall Assessment**: This image contains moderate propaganda elements. Some visual techniques may be intended to influence perception, though the overall effect is less pronounced.";
const CLOSING_MINIMAL: &str = "**Overall Assessment**: This image shows minimal propaganda characteristics. While some persuasive elements may be present, they appear relatively subtle or incidental.";

/// Composes the narrative report for one analysis.
#[derive(Debug, Clone)]
pub struct NarrativeComposer {
    strong_confidence: f32,
    moderate_confidence: f32,
}

impl NarrativeComposer {
    /// Creates a composer with the configured confidence tier cutoffs.
    pub fn new(config: &AnalyzerConfig) -> Self {
        Self {
            strong_confidence: config.strong_confidence,
            moderate_confidence: config.moderate_confidence,
        }
    }

    /// Builds the narrative from the caption and the full ranked detection
    /// list.
    pub fn compose(&self, caption: &str, detections: &[Detection]) -> String {
        if detections.is_empty() {
            return NO_ELEMENTS_NARRATIVE.to_string();
        }

        let mut parts: Vec<String> = vec![
            format!("**Image Analysis**: {caption}\n"),
            "**Detected Propaganda Elements**:\n".to_string(),
        ];

        for (category, group) in group_by_category(detections) {
            if let Some(description) = category_description(category) {
                parts.push(description.to_string());
                let mean = mean_confidence(&group);
                parts.push(format!("*Confidence: {:.1}%\n", mean * 100.0));
            }
        }

        let overall: f32 = detections.iter().map(|d| d.confidence).sum::<f32>()
            / detections.len() as f32;
        parts.push(self.closing_statement(overall).to_string());

        parts.join("\n\n")
    }

    /// Selects exactly one closing statement by mean confidence.
    pub fn closing_statement(&self, mean_confidence: f32) -> &'static str {
        if mean_confidence > self.strong_confidence {
            CLOSING_STRONG
        } else if mean_confidence > self.moderate_confidence {
            CLOSING_MODERATE
        } else {
            CLOSING_MINIMAL
        }
    }
}

/// Groups detections by category, preserving the order in which each
/// category first appears in the confidence-sorted list.
fn group_by_category(detections: &[Detection]) -> Vec<(ConceptCategory, Vec<&Detection>)> {
    detections
        .iter()
        .map(|d| d.concept.category)
        .unique()
        .map(|category| {
            let group = detections
                .iter()
                .filter(|d| d.concept.category == category)
                .collect();
            (category, group)
        })
        .collect()
}

fn category_description(category: ConceptCategory) -> Option<&'static str> {
    CATEGORY_DESCRIPTIONS
        .iter()
        .find(|(c, _)| *c == category)
        .map(|(_, text)| *text)
}

fn mean_confidence(group: &[&Detection]) -> f32 {
    group.iter().map(|d| d.confidence).sum::<f32>() / group.len() as f32
}
