//! The core module of the analysis pipeline.
//!
//! This module contains the fundamental building blocks shared by the rest of
//! the crate:
//! - Error handling
//! - Configuration management
//! - Traits defining the contracts of the external model collaborators
//!
//! It also re-exports the commonly used types for convenience.

pub mod config;
pub mod errors;
pub mod traits;

pub use config::{AnalyzerConfig, ConfigError};
pub use errors::{AnalysisError, ProcessingStage};
pub use traits::{Captioner, ConceptEmbeddingScorer, SaliencyModel};
