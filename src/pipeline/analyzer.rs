//! The analysis pipeline orchestrator.
//!
//! [`Analyzer`] owns the three model collaborators for the lifetime of the
//! process and sequences one request through captioning, concept scoring,
//! saliency extraction, region derivation, and narrative composition.
//!
//! Collaborator failures degrade locally: a failed caption becomes the
//! configured fallback string, a failed scorer yields the "no elements"
//! narrative, and a failed saliency attribution or contour search drops only
//! that concept's region. Any other error propagates to the caller.

use crate::core::{AnalysisError, AnalyzerConfig, Captioner, ConceptEmbeddingScorer, SaliencyModel};
use crate::domain::{AnalysisResult, Detection, Region, SaliencyMap};
use crate::pipeline::{ConceptScorer, NarrativeComposer, SaliencyExtractor};
use crate::processors::RegionExtractor;
use image::RgbImage;
use std::sync::Mutex;
use std::time::Instant;
use tracing::{debug, info, warn};

/// The propaganda analysis pipeline.
///
/// Generic over the captioning, scoring, and saliency collaborators, which
/// are constructed once and shared across requests. Scoring and captioning
/// are read-only forward passes; the saliency model mutates shared gradient
/// buffers and therefore lives behind a mutex, held across one request's
/// whole extraction loop so concurrent `analyze` calls never interleave
/// per-concept attributions.
#[derive(Debug)]
pub struct Analyzer<C, S, M>
where
    C: Captioner,
    S: ConceptEmbeddingScorer,
    M: SaliencyModel<Context = S::Context>,
{
    captioner: C,
    scorer_backend: S,
    saliency_model: Mutex<M>,
    config: AnalyzerConfig,
    scorer: ConceptScorer,
    saliency: SaliencyExtractor,
    regions: RegionExtractor,
    narrative: NarrativeComposer,
}

impl<C, S, M> Analyzer<C, S, M>
where
    C: Captioner,
    S: ConceptEmbeddingScorer,
    M: SaliencyModel<Context = S::Context>,
{
    /// Creates an analyzer with the default configuration.
    pub fn new(captioner: C, scorer: S, saliency_model: M) -> Self {
        Self::from_parts(captioner, scorer, saliency_model, AnalyzerConfig::default())
    }

    /// Creates an analyzer with a custom configuration.
    ///
    /// # Returns
    ///
    /// A Result containing the analyzer or an AnalysisError if the
    /// configuration is invalid.
    pub fn with_config(
        captioner: C,
        scorer_backend: S,
        saliency_model: M,
        config: AnalyzerConfig,
    ) -> Result<Self, AnalysisError> {
        config.validate()?;
        Ok(Self::from_parts(
            captioner,
            scorer_backend,
            saliency_model,
            config,
        ))
    }

    fn from_parts(captioner: C, scorer_backend: S, saliency_model: M, config: AnalyzerConfig) -> Self {
        let scorer = ConceptScorer::new(&config);
        let saliency = SaliencyExtractor::new(&config);
        let regions = RegionExtractor::new(config.saliency_quantile);
        let narrative = NarrativeComposer::new(&config);
        Self {
            captioner,
            scorer_backend,
            saliency_model: Mutex::new(saliency_model),
            config,
            scorer,
            saliency,
            regions,
            narrative,
        }
    }

    /// The active configuration.
    pub fn config(&self) -> &AnalyzerConfig {
        &self.config
    }

    /// Analyzes one image.
    ///
    /// # Arguments
    ///
    /// * `image` - The image to analyze.
    ///
    /// # Returns
    ///
    /// A Result containing the AnalysisResult or an AnalysisError for
    /// unexpected failures.
    pub fn analyze(&self, image: &RgbImage) -> Result<AnalysisResult, AnalysisError> {
        let start = Instant::now();
        info!("starting image analysis");

        let caption = match self.captioner.generate(image) {
            Ok(caption) => caption,
            Err(e) => {
                warn!("caption generation failed: {e}");
                self.config.caption_fallback.clone()
            }
        };

        let (detections, context) = self.scorer.score(&self.scorer_backend, image);

        let maps = match (&context, detections.is_empty()) {
            (Some(context), false) => {
                let mut model = self.saliency_model.lock().map_err(|_| {
                    AnalysisError::inference_message(
                        "saliency model lock poisoned by a previous panic",
                    )
                })?;
                self.saliency.extract(&mut *model, context, &detections)
            }
            _ => Vec::new(),
        };

        let regions = self.derive_regions(&maps, &detections);

        // The narrative describes every detection, including those whose
        // region never materialized.
        let narrative = self.narrative.compose(&caption, &detections);

        let overall_confidence = if detections.is_empty() {
            0.0
        } else {
            detections.iter().map(|d| d.confidence).sum::<f32>() / detections.len() as f32
        };

        let elapsed_seconds = start.elapsed().as_secs_f64();
        info!(
            "analysis complete in {:.2}s, found {} regions from {} detections",
            elapsed_seconds,
            regions.len(),
            detections.len()
        );

        Ok(AnalysisResult {
            narrative,
            regions,
            detections,
            overall_confidence,
            elapsed_seconds,
            caption,
        })
    }

    /// Pairs each saliency map with its detection by id and derives regions.
    fn derive_regions(&self, maps: &[SaliencyMap], detections: &[Detection]) -> Vec<Region> {
        maps.iter()
            .filter_map(|map| {
                let detection = detections.iter().find(|d| d.id == map.detection_id)?;
                let region = self.regions.extract(map, detection);
                if region.is_none() {
                    debug!("no contours for '{}', skipping region", detection.concept.phrase);
                }
                region
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pipeline::narrative::NO_ELEMENTS_NARRATIVE;
    use ndarray::Array2;

    struct FakeCaptioner {
        fails: bool,
    }

    impl Captioner for FakeCaptioner {
        fn generate(&self, _image: &RgbImage) -> Result<String, AnalysisError> {
            if self.fails {
                Err(AnalysisError::inference_message("captioner offline"))
            } else {
                Ok("a crowd waving flags".to_string())
            }
        }
    }

    struct FakeScorer {
        probabilities: Vec<f32>,
        fails: bool,
    }

    impl ConceptEmbeddingScorer for FakeScorer {
        type Context = ();

        fn score(
            &self,
            _image: &RgbImage,
            _concepts: &[&str],
        ) -> Result<(Vec<f32>, ()), AnalysisError> {
            if self.fails {
                Err(AnalysisError::inference_message("scorer offline"))
            } else {
                Ok((self.probabilities.clone(), ()))
            }
        }
    }

    /// Produces a deterministic blob whose position depends on the class
    /// index; listed classes fail attribution.
    struct FakeSaliency {
        failing_classes: Vec<usize>,
    }

    impl SaliencyModel for FakeSaliency {
        type Context = ();

        fn clear_state(&mut self) {}

        fn explain(
            &mut self,
            _context: &(),
            class_index: usize,
        ) -> Result<Option<Array2<f32>>, AnalysisError> {
            if self.failing_classes.contains(&class_index) {
                return Ok(None);
            }
            let mut map = Array2::zeros((14, 14));
            let offset = class_index % 7;
            for row in offset..offset + 4 {
                for col in offset..offset + 4 {
                    map[[row, col]] = 1.0;
                }
            }
            Ok(Some(map))
        }
    }

    fn analyzer(
        probabilities: Vec<f32>,
        failing_classes: Vec<usize>,
    ) -> Analyzer<FakeCaptioner, FakeScorer, FakeSaliency> {
        Analyzer::new(
            FakeCaptioner { fails: false },
            FakeScorer {
                probabilities,
                fails: false,
            },
            FakeSaliency { failing_classes },
        )
    }

    fn scenario_probabilities() -> Vec<f32> {
        vec![
            0.15, 0.05, 0.40, 0.08, 0.02, 0.01, 0.03, 0.12, 0.02, 0.04, 0.06, 0.02,
        ]
    }

    #[test]
    fn test_full_pipeline_happy_path() {
        let analyzer = analyzer(scenario_probabilities(), vec![]);
        let image = RgbImage::new(8, 8);
        let result = analyzer.analyze(&image).unwrap();

        assert_eq!(result.caption, "a crowd waving flags");
        assert_eq!(result.detections.len(), 3);
        assert_eq!(result.detections[0].id, "detection_0");
        assert_eq!(result.detections[0].class_index, 2);
        assert_eq!(result.regions.len(), 3);
        assert!(result.regions.len() <= result.detections.len());
        let expected_mean = (0.40 + 0.15 + 0.12) / 3.0;
        assert!((result.overall_confidence - expected_mean).abs() < 1e-6);
        assert!(result.narrative.contains("a crowd waving flags"));
        assert!(result.elapsed_seconds >= 0.0);

        for region in &result.regions {
            for v in region.bbox {
                assert!((0.0..=100.0).contains(&v));
            }
        }
    }

    #[test]
    fn test_repeated_analysis_is_deterministic() {
        let analyzer = analyzer(scenario_probabilities(), vec![]);
        let image = RgbImage::new(8, 8);
        let first = analyzer.analyze(&image).unwrap();
        let second = analyzer.analyze(&image).unwrap();

        assert_eq!(first.narrative, second.narrative);
        let ids: Vec<_> = first.detections.iter().map(|d| &d.id).collect();
        let ids2: Vec<_> = second.detections.iter().map(|d| &d.id).collect();
        assert_eq!(ids, ids2);
        for (a, b) in first.regions.iter().zip(&second.regions) {
            assert_eq!(a.id, b.id);
            assert_eq!(a.bbox, b.bbox);
        }
    }

    #[test]
    fn test_scorer_failure_degrades_to_no_elements() {
        let analyzer = Analyzer::new(
            FakeCaptioner { fails: false },
            FakeScorer {
                probabilities: vec![],
                fails: true,
            },
            FakeSaliency {
                failing_classes: vec![],
            },
        );
        let result = analyzer.analyze(&RgbImage::new(8, 8)).unwrap();

        assert!(result.detections.is_empty());
        assert!(result.regions.is_empty());
        assert_eq!(result.overall_confidence, 0.0);
        assert_eq!(result.narrative, NO_ELEMENTS_NARRATIVE);
        assert_eq!(result.caption, "a crowd waving flags");
    }

    #[test]
    fn test_caption_failure_uses_fallback() {
        let analyzer = Analyzer::new(
            FakeCaptioner { fails: true },
            FakeScorer {
                probabilities: scenario_probabilities(),
                fails: false,
            },
            FakeSaliency {
                failing_classes: vec![],
            },
        );
        let result = analyzer.analyze(&RgbImage::new(8, 8)).unwrap();

        assert_eq!(result.caption, "Unable to generate caption");
        assert!(result
            .narrative
            .starts_with("**Image Analysis**: Unable to generate caption"));
        // The rest of the pipeline is unaffected.
        assert_eq!(result.detections.len(), 3);
    }

    #[test]
    fn test_saliency_failure_keeps_narrative_paragraph() {
        // Single surviving detection (patriotic, class 2) whose attribution
        // fails: no regions, but the narrative still describes it.
        let mut probabilities = vec![0.0; 12];
        probabilities[2] = 0.4;
        let analyzer = analyzer(probabilities, vec![2]);
        let result = analyzer.analyze(&RgbImage::new(8, 8)).unwrap();

        assert_eq!(result.detections.len(), 1);
        assert!(result.regions.is_empty());
        assert!(result.narrative.contains("**Patriotic Symbolism**"));
    }

    #[test]
    fn test_saliency_failure_does_not_misalign_later_regions() {
        // The top-ranked concept's attribution fails. Surviving maps carry
        // detection ids, so later regions keep the right confidence and
        // never shift onto the wrong detection.
        let analyzer = analyzer(scenario_probabilities(), vec![2]);
        let result = analyzer.analyze(&RgbImage::new(8, 8)).unwrap();

        assert_eq!(result.detections.len(), 3);
        assert_eq!(result.regions.len(), 2);
        assert_eq!(result.regions[0].id, "detection_1");
        assert!((result.regions[0].confidence - 0.15).abs() < 1e-6);
        assert_eq!(result.regions[1].id, "detection_2");
        assert!((result.regions[1].confidence - 0.12).abs() < 1e-6);
    }

    #[test]
    fn test_closing_tier_scenarios() {
        // Mean 0.35 -> strong indicators.
        let mut probs = vec![0.0; 12];
        probs[0] = 0.35;
        let result = analyzer(probs, vec![]).analyze(&RgbImage::new(8, 8)).unwrap();
        assert!(result.narrative.contains("strong indicators"));

        // Mean 0.25 -> moderate.
        let mut probs = vec![0.0; 12];
        probs[0] = 0.25;
        let result = analyzer(probs, vec![]).analyze(&RgbImage::new(8, 8)).unwrap();
        assert!(result.narrative.contains("moderate propaganda elements"));

        // Mean 0.15 -> minimal (still above the 0.10 detection threshold).
        let mut probs = vec![0.0; 12];
        probs[0] = 0.15;
        let result = analyzer(probs, vec![]).analyze(&RgbImage::new(8, 8)).unwrap();
        assert!(result.narrative.contains("minimal propaganda characteristics"));
    }

    #[test]
    fn test_invalid_config_is_rejected() {
        let config = AnalyzerConfig {
            score_threshold: 2.0,
            ..Default::default()
        };
        let result = Analyzer::with_config(
            FakeCaptioner { fails: false },
            FakeScorer {
                probabilities: vec![],
                fails: false,
            },
            FakeSaliency {
                failing_classes: vec![],
            },
            config,
        );
        assert!(result.is_err());
    }
}
