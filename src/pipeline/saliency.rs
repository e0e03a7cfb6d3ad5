//! Per-concept saliency extraction.
//!
//! For each detection the shared saliency model is asked to attribute that
//! concept's score back to image regions. The model reuses gradient and
//! activation buffers across calls, so residual state is cleared immediately
//! before every attribution. A concept whose extraction fails is skipped
//! without a placeholder; every surviving map carries its detection's id so
//! downstream pairing survives the gap.

use crate::core::{AnalyzerConfig, SaliencyModel};
use crate::domain::{Detection, SaliencyMap};
use crate::processors::{normalize_map, resize_map};
use tracing::{debug, warn};

/// Extracts one normalized saliency map per detection, skipping failures.
#[derive(Debug, Clone)]
pub struct SaliencyExtractor {
    map_resolution: (u32, u32),
    normalization_epsilon: f32,
}

impl SaliencyExtractor {
    /// Creates an extractor producing maps at the configured canonical
    /// resolution.
    pub fn new(config: &AnalyzerConfig) -> Self {
        Self {
            map_resolution: config.map_resolution,
            normalization_epsilon: config.normalization_epsilon,
        }
    }

    /// Runs saliency attribution for every detection.
    ///
    /// The caller must hold exclusive access to `model` for the duration of
    /// the call; concurrent attributions against one shared backbone
    /// interleave gradient state and corrupt each other.
    ///
    /// # Arguments
    ///
    /// * `model` - The saliency collaborator.
    /// * `context` - The scoring context produced by the concept scorer.
    /// * `detections` - Detections in confidence order.
    ///
    /// # Returns
    ///
    /// Normalized maps for the detections that attributed successfully, in
    /// detection order, each tagged with its detection id.
    pub fn extract<M: SaliencyModel>(
        &self,
        model: &mut M,
        context: &M::Context,
        detections: &[Detection],
    ) -> Vec<SaliencyMap> {
        let mut maps = Vec::with_capacity(detections.len());

        for detection in detections {
            // The same model instance serves every concept and every
            // request; stale buffers from the previous call must go first.
            model.clear_state();

            let raw = match model.explain(context, detection.class_index) {
                Ok(Some(map)) => map,
                Ok(None) => {
                    warn!(
                        "saliency attribution produced no map for '{}'",
                        detection.concept.phrase
                    );
                    continue;
                }
                Err(e) => {
                    warn!(
                        "saliency attribution failed for '{}': {e}",
                        detection.concept.phrase
                    );
                    continue;
                }
            };

            let (width, height) = self.map_resolution;
            let mut map = resize_map(&raw, width, height);
            normalize_map(&mut map, self.normalization_epsilon);

            debug!("generated saliency map for '{}'", detection.concept.phrase);
            maps.push(SaliencyMap {
                detection_id: detection.id.clone(),
                map,
            });
        }

        maps
    }
}
