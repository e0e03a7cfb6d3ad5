//! Contracts of the external model collaborators.
//!
//! The pipeline does not implement any model inference itself. Instead it is
//! generic over three collaborators, loaded once at process start and shared
//! across requests:
//!
//! - a [`Captioner`] that describes the image in one sentence,
//! - a [`ConceptEmbeddingScorer`] that ranks a list of concept phrases
//!   against the image,
//! - a [`SaliencyModel`] that explains which image regions drove the score
//!   for a single concept.
//!
//! Scoring and captioning are read-only forward passes and take `&self`.
//! Saliency extraction is stateful: class-conditioned attribution reuses
//! gradient and activation buffers tied to the shared scoring backbone, so
//! [`SaliencyModel`] methods take `&mut self` and callers must hold exclusive
//! access for the duration of a request's extraction loop (the
//! [`crate::pipeline::Analyzer`] does this with a mutex).

use crate::core::errors::AnalysisError;
use image::RgbImage;
use ndarray::Array2;

/// Trait for generating a one-line caption of an image.
///
/// Fails independently of the other collaborators and has no side effects on
/// them.
pub trait Captioner {
    /// Generates a caption for the given image.
    ///
    /// # Arguments
    ///
    /// * `image` - The image to describe.
    ///
    /// # Returns
    ///
    /// A Result containing the caption or an AnalysisError.
    fn generate(&self, image: &RgbImage) -> Result<String, AnalysisError>;
}

/// Trait for scoring concept phrases against an image.
///
/// One call produces a probability distribution over the supplied phrases
/// (values sum to 1 across the list for that image) along with a
/// [`Context`](ConceptEmbeddingScorer::Context) holding whatever activations
/// the paired [`SaliencyModel`] needs to attribute individual scores back to
/// image regions.
pub trait ConceptEmbeddingScorer {
    /// Opaque per-image scoring state consumed by the saliency model.
    type Context;

    /// Scores the given concept phrases against the image.
    ///
    /// # Arguments
    ///
    /// * `image` - The image to score.
    /// * `concepts` - The concept phrases, in vocabulary order.
    ///
    /// # Returns
    ///
    /// A Result containing the probability vector (aligned 1:1 with
    /// `concepts`) and the scoring context, or an AnalysisError.
    fn score(
        &self,
        image: &RgbImage,
        concepts: &[&str],
    ) -> Result<(Vec<f32>, Self::Context), AnalysisError>;
}

/// Trait for class-conditioned saliency attribution.
///
/// Implementations hold mutable gradient/activation state shared with the
/// scoring backbone; both methods therefore require `&mut self`. Callers must
/// invoke [`clear_state`](SaliencyModel::clear_state) immediately before each
/// [`explain`](SaliencyModel::explain) call, because residual buffers from a
/// previous concept (or a previous request) corrupt the attribution.
pub trait SaliencyModel {
    /// The scoring context type this model attributes over. Must match the
    /// paired scorer's [`ConceptEmbeddingScorer::Context`].
    type Context;

    /// Clears residual gradient and activation buffers.
    fn clear_state(&mut self);

    /// Computes a 2D activation map for one concept.
    ///
    /// # Arguments
    ///
    /// * `context` - The scoring context produced alongside the probability
    ///   vector.
    /// * `class_index` - Index of the concept within the scored vocabulary.
    ///
    /// # Returns
    ///
    /// A Result containing the raw activation map, `None` if the model could
    /// not produce a usable map for this concept, or an AnalysisError.
    fn explain(
        &mut self,
        context: &Self::Context,
        class_index: usize,
    ) -> Result<Option<Array2<f32>>, AnalysisError>;
}
