//! Domain types for propaganda analysis.
//!
//! This module contains the vocabulary of propaganda concepts, the detection
//! and region types produced by the pipeline, the aggregate analysis result,
//! and the serializable response view consumed by a transport layer.

pub mod concept;
pub mod detection;
pub mod response;

pub use concept::{Concept, ConceptCategory, concept_vocabulary};
pub use detection::{AnalysisResult, Detection, Region, SaliencyMap};
pub use response::{AnalysisResponse, HighlightedWord, ResponseBox};
