//! The analysis pipeline and its stages.
//!
//! The [`Analyzer`] orchestrates four stages over one image: concept scoring,
//! per-concept saliency extraction, region derivation, and narrative
//! composition. Each stage degrades locally on failure; the pipeline always
//! returns a structurally valid result unless something genuinely unexpected
//! happens.

pub mod analyzer;
pub mod narrative;
pub mod saliency;
pub mod scorer;

pub use analyzer::Analyzer;
pub use narrative::NarrativeComposer;
pub use saliency::SaliencyExtractor;
pub use scorer::ConceptScorer;
