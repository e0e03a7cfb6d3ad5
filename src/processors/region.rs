//! Region derivation from saliency maps.
//!
//! Converts a normalized saliency map into a percentage-space bounding box:
//! the map's 85th-percentile value (per map, not global) becomes an adaptive
//! threshold, the binarized mask is searched for external contours, and the
//! largest contour's axis-aligned bounding rectangle is scaled into
//! percent-of-image coordinates. A map with no contours produces no region.

use crate::domain::{Detection, Region, SaliencyMap};
use image::GrayImage;
use imageproc::contours::{BorderType, Contour, find_contours};
use tracing::debug;

/// Extracts bounding regions from saliency maps.
#[derive(Debug, Clone)]
pub struct RegionExtractor {
    /// Quantile of the saliency values used as the binarization threshold
    /// (default: 0.85, keeping the top 15% of attention).
    pub quantile: f32,
}

impl Default for RegionExtractor {
    fn default() -> Self {
        Self { quantile: 0.85 }
    }
}

impl RegionExtractor {
    /// Creates a new extractor with the given threshold quantile.
    pub fn new(quantile: f32) -> Self {
        Self { quantile }
    }

    /// Derives a region for one detection from its saliency map.
    ///
    /// # Arguments
    ///
    /// * `saliency` - The normalized saliency map paired with the detection.
    /// * `detection` - The detection the map explains.
    ///
    /// # Returns
    ///
    /// The derived region, or `None` if the binarized map contains no
    /// contours.
    pub fn extract(&self, saliency: &SaliencyMap, detection: &Detection) -> Option<Region> {
        let map = &saliency.map;
        let (height, width) = map.dim();
        if height == 0 || width == 0 {
            return None;
        }

        let threshold = quantile(map.iter().copied(), self.quantile)?;
        debug!(
            "attention threshold for '{}' set to {:.4}",
            detection.concept.phrase, threshold
        );

        let mut mask = GrayImage::new(width as u32, height as u32);
        for ((row, col), &value) in map.indexed_iter() {
            if value > threshold {
                mask.put_pixel(col as u32, row as u32, image::Luma([255]));
            }
        }

        let contours: Vec<Contour<u32>> = find_contours::<u32>(&mask)
            .into_iter()
            .filter(|c| c.border_type == BorderType::Outer)
            .collect();
        debug!("found {} contours", contours.len());

        let largest = contours
            .into_iter()
            .max_by(|a, b| contour_area(a).total_cmp(&contour_area(b)))?;

        let (min_x, min_y, max_x, max_y) = bounding_rect(&largest)?;
        // Pixel-index rect: a rect spanning the full mask maps to exactly
        // 100% on each axis.
        let rect_w = (max_x - min_x + 1) as f32;
        let rect_h = (max_y - min_y + 1) as f32;

        let bbox = [
            min_x as f32 / width as f32 * 100.0,
            min_y as f32 / height as f32 * 100.0,
            rect_w / width as f32 * 100.0,
            rect_h / height as f32 * 100.0,
        ];

        Some(Region {
            id: detection.id.clone(),
            bbox,
            label: detection.label().to_string(),
            color: detection.color().to_string(),
            confidence: detection.confidence,
            category: detection.concept.category,
        })
    }
}

/// Linearly interpolated quantile of the given values, matching numpy's
/// default method. Returns `None` for an empty iterator.
fn quantile(values: impl Iterator<Item = f32>, q: f32) -> Option<f32> {
    let mut sorted: Vec<f32> = values.collect();
    if sorted.is_empty() {
        return None;
    }
    sorted.sort_by(f32::total_cmp);

    let pos = q.clamp(0.0, 1.0) * (sorted.len() - 1) as f32;
    let lo = pos.floor() as usize;
    let hi = pos.ceil() as usize;
    let frac = pos - lo as f32;
    Some(sorted[lo] + (sorted[hi] - sorted[lo]) * frac)
}

/// Signed shoelace area of a contour, as an absolute value.
fn contour_area(contour: &Contour<u32>) -> f64 {
    let points = &contour.points;
    if points.len() < 3 {
        return 0.0;
    }
    let mut doubled = 0.0f64;
    for i in 0..points.len() {
        let p = points[i];
        let q = points[(i + 1) % points.len()];
        doubled += p.x as f64 * q.y as f64 - q.x as f64 * p.y as f64;
    }
    doubled.abs() / 2.0
}

/// Axis-aligned bounding rectangle of a contour in map-pixel coordinates.
fn bounding_rect(contour: &Contour<u32>) -> Option<(u32, u32, u32, u32)> {
    let first = contour.points.first()?;
    let mut rect = (first.x, first.y, first.x, first.y);
    for p in &contour.points {
        rect.0 = rect.0.min(p.x);
        rect.1 = rect.1.min(p.y);
        rect.2 = rect.2.max(p.x);
        rect.3 = rect.3.max(p.y);
    }
    Some(rect)
}
