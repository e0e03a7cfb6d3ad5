//! Error types for the analysis pipeline.
//!
//! This module defines the error types that can occur while analyzing an
//! image, including image loading errors, processing errors, collaborator
//! inference errors, and configuration errors, along with utility functions
//! for creating them with context.
//!
//! Most collaborator failures are handled locally as degradations (see the
//! pipeline stages); an `AnalysisError` that escapes [`crate::pipeline::Analyzer::analyze`]
//! is an unexpected, fatal condition for that request.

use thiserror::Error;

/// Enum representing different stages of processing in the analysis pipeline.
///
/// Used to identify which stage an error occurred in.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ProcessingStage {
    /// Error occurred while scoring concepts against the image.
    Scoring,
    /// Error occurred during saliency-map extraction.
    Saliency,
    /// Error occurred while deriving a region from a saliency map.
    RegionExtraction,
    /// Error occurred during caption generation.
    Captioning,
    /// Error occurred while composing the narrative.
    Narrative,
    /// Generic processing error.
    Generic,
}

impl std::fmt::Display for ProcessingStage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ProcessingStage::Scoring => write!(f, "concept scoring"),
            ProcessingStage::Saliency => write!(f, "saliency extraction"),
            ProcessingStage::RegionExtraction => write!(f, "region extraction"),
            ProcessingStage::Captioning => write!(f, "captioning"),
            ProcessingStage::Narrative => write!(f, "narrative composition"),
            ProcessingStage::Generic => write!(f, "processing"),
        }
    }
}

/// Enum representing the errors that can occur in the analysis pipeline.
#[derive(Error, Debug)]
pub enum AnalysisError {
    /// Error occurred while loading an image.
    #[error("image load")]
    ImageLoad(#[source] image::ImageError),

    /// Error occurred during processing.
    #[error("{kind} failed: {context}")]
    Processing {
        /// The stage of processing where the error occurred.
        kind: ProcessingStage,
        /// Additional context about the error.
        context: String,
        /// The underlying error that caused this error.
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// Error raised by a model collaborator during a forward or backward pass.
    #[error("inference")]
    Inference(#[source] Box<dyn std::error::Error + Send + Sync>),

    /// Error indicating invalid input.
    #[error("invalid input: {message}")]
    InvalidInput {
        /// A message describing the invalid input.
        message: String,
    },

    /// Error indicating a configuration problem.
    #[error("configuration: {message}")]
    ConfigError {
        /// A message describing the configuration error.
        message: String,
    },

    /// Error from tensor shape operations.
    #[error("tensor operation")]
    Tensor(#[from] ndarray::ShapeError),

    /// IO error.
    #[error("io")]
    Io(#[from] std::io::Error),
}

impl AnalysisError {
    /// Creates an `AnalysisError` for a processing stage with context.
    pub fn processing_error(
        kind: ProcessingStage,
        context: &str,
        error: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self::Processing {
            kind,
            context: context.to_string(),
            source: Box::new(error),
        }
    }

    /// Creates an `AnalysisError` for saliency extraction failures.
    pub fn saliency_error(
        context: &str,
        error: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self::Processing {
            kind: ProcessingStage::Saliency,
            context: context.to_string(),
            source: Box::new(error),
        }
    }

    /// Creates an `AnalysisError` for region extraction failures.
    pub fn region_error(
        context: &str,
        error: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self::Processing {
            kind: ProcessingStage::RegionExtraction,
            context: context.to_string(),
            source: Box::new(error),
        }
    }

    /// Creates an `AnalysisError` for collaborator inference failures.
    pub fn inference_error(error: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Inference(Box::new(error))
    }

    /// Creates an `AnalysisError` for an inference failure described only by
    /// a message, for collaborators whose native error type is opaque.
    pub fn inference_message(message: impl Into<String>) -> Self {
        Self::Inference(message.into().into())
    }

    /// Creates an `AnalysisError` for invalid input.
    pub fn invalid_input(message: impl Into<String>) -> Self {
        Self::InvalidInput {
            message: message.into(),
        }
    }

    /// Creates an `AnalysisError` for configuration errors.
    pub fn config_error(message: impl Into<String>) -> Self {
        Self::ConfigError {
            message: message.into(),
        }
    }
}

impl From<image::ImageError> for AnalysisError {
    fn from(error: image::ImageError) -> Self {
        Self::ImageLoad(error)
    }
}

impl From<crate::core::config::ConfigError> for AnalysisError {
    fn from(error: crate::core::config::ConfigError) -> Self {
        Self::ConfigError {
            message: error.to_string(),
        }
    }
}
