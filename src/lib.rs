//! # Propaganda Spotter
//!
//! A Rust library that analyzes a single image for visual propaganda
//! techniques and explains what it found. The pipeline scores a fixed
//! vocabulary of propaganda concepts against the image, derives a saliency
//! map for each detected concept, converts saliency into percentage-space
//! bounding regions, and composes a narrative report.
//!
//! ## Features
//!
//! - Concept scoring over a fixed vocabulary via a pluggable
//!   embedding-similarity backend
//! - Class-conditioned saliency attribution with explicit gradient-state
//!   hygiene
//! - Region derivation from saliency maps using adaptive thresholding and
//!   contour analysis
//! - Structured narrative generation with per-category paragraphs and an
//!   overall assessment
//! - Graceful degradation: every collaborator may fail without taking down
//!   the pipeline
//!
//! ## Components
//!
//! - **Concept scoring**: rank the vocabulary against the image, keep the
//!   confident entries
//! - **Saliency extraction**: per-concept attention maps from the scoring
//!   context
//! - **Region extraction**: saliency map to bounding box via thresholding
//!   and contours
//! - **Narrative composition**: caption plus per-category analysis text
//!
//! ## Modules
//!
//! * [`core`] - Errors, configuration, and collaborator traits
//! * [`domain`] - Concepts, detections, regions, and result types
//! * [`pipeline`] - The analysis pipeline and its stages
//! * [`processors`] - Saliency-map conditioning and region extraction
//! * [`utils`] - Image loading helpers
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use propaganda_spotter::prelude::*;
//! # use propaganda_spotter::core::{AnalysisError, Captioner, ConceptEmbeddingScorer, SaliencyModel};
//! # use image::RgbImage;
//! # use ndarray::Array2;
//! # struct Blip; struct Clip; struct GradCam;
//! # impl Captioner for Blip {
//! #     fn generate(&self, _: &RgbImage) -> Result<String, AnalysisError> { todo!() }
//! # }
//! # impl ConceptEmbeddingScorer for Clip {
//! #     type Context = ();
//! #     fn score(&self, _: &RgbImage, _: &[&str]) -> Result<(Vec<f32>, ()), AnalysisError> { todo!() }
//! # }
//! # impl SaliencyModel for GradCam {
//! #     type Context = ();
//! #     fn clear_state(&mut self) {}
//! #     fn explain(&mut self, _: &(), _: usize) -> Result<Option<Array2<f32>>, AnalysisError> { todo!() }
//! # }
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! // Backends are loaded once and shared across requests.
//! let analyzer = Analyzer::new(Blip, Clip, GradCam);
//!
//! let image = load_image(std::path::Path::new("poster.jpg"))?;
//! let result = analyzer.analyze(&image)?;
//!
//! println!("{}", result.narrative);
//! for region in &result.regions {
//!     println!("{}: {:?}", region.label, region.bbox);
//! }
//! # Ok(())
//! # }
//! ```

pub mod core;
pub mod domain;
pub mod pipeline;
pub mod processors;
pub mod utils;

/// Commonly used types and functions.
pub mod prelude {
    pub use crate::core::{AnalysisError, AnalyzerConfig};
    pub use crate::domain::{
        AnalysisResponse, AnalysisResult, Concept, ConceptCategory, Detection, Region,
        concept_vocabulary,
    };
    pub use crate::pipeline::Analyzer;
    pub use crate::utils::load_image;
}

/// Initializes the tracing subscriber for logging.
///
/// Sets up the tracing subscriber with an environment filter and a formatting
/// layer. Typically called once at application start.
pub fn init_tracing() {
    use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::from_default_env())
        .with(tracing_subscriber::fmt::layer())
        .init();
}
