//! Saliency-map conditioning.
//!
//! Raw activation maps arrive at whatever resolution the attribution method
//! produces (typically the backbone's coarse feature grid). Before region
//! extraction they are resized to the canonical model input resolution and
//! min-max normalized into [0, 1].

use ndarray::Array2;

/// Resizes a 2D float map to the given dimensions with bilinear sampling.
///
/// # Arguments
///
/// * `map` - The source map, indexed `[row, col]`.
/// * `width` - Target width in columns.
/// * `height` - Target height in rows.
///
/// # Returns
///
/// The resized map. An empty source map yields an all-zero target.
pub fn resize_map(map: &Array2<f32>, width: u32, height: u32) -> Array2<f32> {
    let (src_h, src_w) = map.dim();
    let (dst_w, dst_h) = (width as usize, height as usize);

    if src_h == 0 || src_w == 0 {
        return Array2::zeros((dst_h, dst_w));
    }
    if src_h == dst_h && src_w == dst_w {
        return map.clone();
    }

    let scale_x = src_w as f32 / dst_w as f32;
    let scale_y = src_h as f32 / dst_h as f32;

    Array2::from_shape_fn((dst_h, dst_w), |(row, col)| {
        // Align sample centers between source and target grids.
        let src_x = ((col as f32 + 0.5) * scale_x - 0.5).clamp(0.0, (src_w - 1) as f32);
        let src_y = ((row as f32 + 0.5) * scale_y - 0.5).clamp(0.0, (src_h - 1) as f32);

        let x0 = src_x.floor() as usize;
        let y0 = src_y.floor() as usize;
        let x1 = (x0 + 1).min(src_w - 1);
        let y1 = (y0 + 1).min(src_h - 1);
        let fx = src_x - x0 as f32;
        let fy = src_y - y0 as f32;

        let top = map[[y0, x0]] * (1.0 - fx) + map[[y0, x1]] * fx;
        let bottom = map[[y1, x0]] * (1.0 - fx) + map[[y1, x1]] * fx;
        top * (1.0 - fy) + bottom * fy
    })
}

/// Min-max normalizes a map into [0, 1] in place.
///
/// The epsilon in the denominator keeps a uniform (zero-variance) map from
/// dividing by zero; such a map normalizes to all zeros.
pub fn normalize_map(map: &mut Array2<f32>, epsilon: f32) {
    let min = map.iter().copied().fold(f32::INFINITY, f32::min);
    let max = map.iter().copied().fold(f32::NEG_INFINITY, f32::max);
    if !min.is_finite() || !max.is_finite() {
        return;
    }
    let range = max - min + epsilon;
    map.mapv_inplace(|v| (v - min) / range);
}
