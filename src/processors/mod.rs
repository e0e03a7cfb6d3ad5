//! Classical-vision processing steps.
//!
//! These are pure functions over saliency grids: conditioning raw activation
//! maps (resize and normalization) and deriving bounding regions from them
//! (adaptive thresholding, contour extraction, bounding rectangles).

pub mod region;
pub mod saliency;

pub use region::RegionExtractor;
pub use saliency::{normalize_map, resize_map};
