//! Concept scoring against the fixed vocabulary.
//!
//! One collaborator call yields a probability distribution over the
//! vocabulary. Concepts above the confidence threshold become detections,
//! ranked by descending confidence, capped, and given sequential ids in
//! their final order. A collaborator failure degrades to an empty detection
//! list; the pipeline continues with a "no elements" narrative.

use crate::core::{AnalyzerConfig, ConceptEmbeddingScorer};
use crate::domain::{Concept, Detection, concept_vocabulary};
use image::RgbImage;
use tracing::{debug, info, warn};

/// Ranks the concept vocabulary against an image.
#[derive(Debug, Clone)]
pub struct ConceptScorer {
    vocabulary: &'static [Concept],
    score_threshold: f32,
    max_detections: usize,
}

impl ConceptScorer {
    /// Creates a scorer over the fixed vocabulary with the configured
    /// threshold and cap.
    pub fn new(config: &AnalyzerConfig) -> Self {
        Self {
            vocabulary: concept_vocabulary(),
            score_threshold: config.score_threshold,
            max_detections: config.max_detections,
        }
    }

    /// The concept phrases in vocabulary order, as passed to the
    /// collaborator.
    pub fn phrases(&self) -> Vec<&'static str> {
        self.vocabulary.iter().map(|c| c.phrase).collect()
    }

    /// Scores the image and returns the surviving detections plus the
    /// scoring context for saliency attribution.
    ///
    /// On collaborator failure the detection list is empty and no context is
    /// returned.
    pub fn score<S: ConceptEmbeddingScorer>(
        &self,
        scorer: &S,
        image: &RgbImage,
    ) -> (Vec<Detection>, Option<S::Context>) {
        let phrases = self.phrases();
        let (probabilities, context) = match scorer.score(image, &phrases) {
            Ok(output) => output,
            Err(e) => {
                warn!("concept scoring failed, continuing without detections: {e}");
                return (Vec::new(), None);
            }
        };

        if probabilities.len() != self.vocabulary.len() {
            warn!(
                "scorer returned {} probabilities for {} concepts, continuing without detections",
                probabilities.len(),
                self.vocabulary.len()
            );
            return (Vec::new(), None);
        }

        let detections = self.rank(&probabilities);
        info!("found {} concepts above threshold", detections.len());
        (detections, Some(context))
    }

    /// Filters, sorts, caps, and labels a probability vector into
    /// detections.
    pub fn rank(&self, probabilities: &[f32]) -> Vec<Detection> {
        let mut candidates: Vec<(usize, f32)> = Vec::new();
        for (class_index, (&probability, concept)) in
            probabilities.iter().zip(self.vocabulary).enumerate()
        {
            debug!("'{}': {:.4}", concept.phrase, probability);
            if probability > self.score_threshold {
                candidates.push((class_index, probability));
            }
        }

        candidates.sort_by(|a, b| b.1.total_cmp(&a.1));
        candidates.truncate(self.max_detections);

        // Ids are assigned after filtering, sorting, and truncation, so they
        // are sequential in confidence order.
        candidates
            .into_iter()
            .enumerate()
            .map(|(rank, (class_index, confidence))| Detection {
                id: format!("detection_{rank}"),
                concept: self.vocabulary[class_index],
                confidence,
                class_index,
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::AnalysisError;

    fn scorer() -> ConceptScorer {
        ConceptScorer::new(&AnalyzerConfig::default())
    }

    struct FixedScorer(Vec<f32>);

    impl ConceptEmbeddingScorer for FixedScorer {
        type Context = ();

        fn score(
            &self,
            _image: &RgbImage,
            _concepts: &[&str],
        ) -> Result<(Vec<f32>, ()), AnalysisError> {
            Ok((self.0.clone(), ()))
        }
    }

    struct FailingScorer;

    impl ConceptEmbeddingScorer for FailingScorer {
        type Context = ();

        fn score(
            &self,
            _image: &RgbImage,
            _concepts: &[&str],
        ) -> Result<(Vec<f32>, ()), AnalysisError> {
            Err(AnalysisError::inference_message("backend unavailable"))
        }
    }

    #[test]
    fn test_threshold_sort_cap_and_ids() {
        let probs = vec![
            0.15, 0.05, 0.40, 0.08, 0.02, 0.01, 0.03, 0.12, 0.02, 0.04, 0.06, 0.02,
        ];
        let detections = scorer().rank(&probs);

        assert_eq!(detections.len(), 3);
        assert_eq!(detections[0].class_index, 2);
        assert_eq!(detections[1].class_index, 0);
        assert_eq!(detections[2].class_index, 7);
        for (i, det) in detections.iter().enumerate() {
            assert!(det.confidence > 0.10);
            assert_eq!(det.id, format!("detection_{i}"));
        }
        for pair in detections.windows(2) {
            assert!(pair[0].confidence > pair[1].confidence);
        }
    }

    #[test]
    fn test_cap_at_five() {
        let probs = vec![
            0.11, 0.12, 0.13, 0.14, 0.15, 0.16, 0.17, 0.02, 0.0, 0.0, 0.0, 0.0,
        ];
        let detections = scorer().rank(&probs);
        assert_eq!(detections.len(), 5);
        assert_eq!(detections[0].confidence, 0.17);
        assert_eq!(detections[4].confidence, 0.13);
    }

    #[test]
    fn test_exact_threshold_is_excluded() {
        let mut probs = vec![0.0; 12];
        probs[3] = 0.10;
        assert!(scorer().rank(&probs).is_empty());
    }

    #[test]
    fn test_collaborator_failure_degrades_to_empty() {
        let image = RgbImage::new(4, 4);
        let (detections, context) = scorer().score(&FailingScorer, &image);
        assert!(detections.is_empty());
        assert!(context.is_none());
    }

    #[test]
    fn test_misaligned_probability_vector_degrades_to_empty() {
        let image = RgbImage::new(4, 4);
        let (detections, context) = scorer().score(&FixedScorer(vec![0.5, 0.5]), &image);
        assert!(detections.is_empty());
        assert!(context.is_none());
    }

    #[test]
    fn test_successful_score_returns_context() {
        let image = RgbImage::new(4, 4);
        let mut probs = vec![0.0; 12];
        probs[4] = 0.9;
        let (detections, context) = scorer().score(&FixedScorer(probs), &image);
        assert_eq!(detections.len(), 1);
        assert_eq!(detections[0].class_index, 4);
        assert!(context.is_some());
    }
}
