//! Utility functions for image handling.
//!
//! Helpers for getting images into the pipeline's working format.

use crate::core::AnalysisError;
use image::{DynamicImage, RgbImage};

/// Converts a DynamicImage to an RgbImage.
pub fn dynamic_to_rgb(img: DynamicImage) -> RgbImage {
    img.to_rgb8()
}

/// Loads an image from a file path and converts it to RgbImage.
///
/// # Arguments
///
/// * `path` - A reference to the path of the image file to load
///
/// # Returns
///
/// * `Ok(RgbImage)` - The loaded and converted RGB image
/// * `Err(AnalysisError)` - An error if the image could not be loaded
///
/// # Errors
///
/// Returns `AnalysisError::ImageLoad` if the image cannot be loaded from the
/// specified path.
pub fn load_image(path: &std::path::Path) -> Result<RgbImage, AnalysisError> {
    let img = image::open(path).map_err(AnalysisError::ImageLoad)?;
    Ok(dynamic_to_rgb(img))
}

/// Decodes an image from an in-memory byte buffer, as received from an
/// upload, and converts it to RgbImage.
///
/// # Errors
///
/// Returns `AnalysisError::ImageLoad` if the bytes are not a supported image
/// format.
pub fn decode_image(bytes: &[u8]) -> Result<RgbImage, AnalysisError> {
    let img = image::load_from_memory(bytes).map_err(AnalysisError::ImageLoad)?;
    Ok(dynamic_to_rgb(img))
}
