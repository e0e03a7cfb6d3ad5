//! Configuration for the analysis pipeline.
//!
//! This module provides the [`AnalyzerConfig`] struct holding every tunable
//! the pipeline consumes, together with validation and the [`ConfigError`]
//! type.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors that can occur during configuration validation.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Error indicating that a threshold is outside its valid range.
    #[error("invalid threshold for '{field}': {value} (expected {expected})")]
    InvalidThreshold {
        /// The configuration field.
        field: &'static str,
        /// The offending value.
        value: f32,
        /// Description of the valid range.
        expected: &'static str,
    },

    /// Error indicating that a configuration is invalid.
    #[error("invalid configuration: {message}")]
    InvalidConfig { message: String },
}

/// Configuration for the propaganda analysis pipeline.
///
/// Holds the thresholds and dimensions used by concept scoring, saliency
/// extraction, region derivation, and narrative composition. The defaults
/// reproduce the reference behavior of the service this pipeline powers.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalyzerConfig {
    /// Minimum probability for a concept to become a detection.
    pub score_threshold: f32,
    /// Maximum number of detections kept after ranking.
    pub max_detections: usize,
    /// Quantile of saliency values used as the binarization threshold.
    pub saliency_quantile: f32,
    /// Epsilon added to the min-max denominator when normalizing a map.
    pub normalization_epsilon: f32,
    /// Canonical saliency-map resolution as (width, height). Matches the
    /// vision backbone's input resolution.
    pub map_resolution: (u32, u32),
    /// Mean confidence above which the narrative reports strong indicators.
    pub strong_confidence: f32,
    /// Mean confidence above which the narrative reports moderate elements.
    pub moderate_confidence: f32,
    /// Caption used when the captioning collaborator fails.
    pub caption_fallback: String,
}

impl Default for AnalyzerConfig {
    fn default() -> Self {
        Self {
            score_threshold: 0.10,
            max_detections: 5,
            saliency_quantile: 0.85,
            normalization_epsilon: 1e-8,
            map_resolution: (224, 224),
            strong_confidence: 0.3,
            moderate_confidence: 0.2,
            caption_fallback: "Unable to generate caption".to_string(),
        }
    }
}

impl AnalyzerConfig {
    /// Validates the configuration.
    ///
    /// # Returns
    ///
    /// A Result indicating success or a ConfigError if validation fails.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(0.0..=1.0).contains(&self.score_threshold) {
            return Err(ConfigError::InvalidThreshold {
                field: "score_threshold",
                value: self.score_threshold,
                expected: "a value in [0, 1]",
            });
        }
        if !(0.0..=1.0).contains(&self.saliency_quantile) {
            return Err(ConfigError::InvalidThreshold {
                field: "saliency_quantile",
                value: self.saliency_quantile,
                expected: "a value in [0, 1]",
            });
        }
        if self.normalization_epsilon <= 0.0 {
            return Err(ConfigError::InvalidThreshold {
                field: "normalization_epsilon",
                value: self.normalization_epsilon,
                expected: "a positive value",
            });
        }
        if self.max_detections == 0 {
            return Err(ConfigError::InvalidConfig {
                message: "max_detections must be greater than 0".to_string(),
            });
        }
        if self.map_resolution.0 == 0 || self.map_resolution.1 == 0 {
            return Err(ConfigError::InvalidConfig {
                message: format!(
                    "map_resolution must be non-zero, got {}x{}",
                    self.map_resolution.0, self.map_resolution.1
                ),
            });
        }
        if self.moderate_confidence > self.strong_confidence {
            return Err(ConfigError::InvalidConfig {
                message: "moderate_confidence must not exceed strong_confidence".to_string(),
            });
        }
        Ok(())
    }
}
