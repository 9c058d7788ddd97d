//! Per-pixel cross-channel mixing (a 1×1 convolution without bias).
//!
//! Each batch item is viewed as a `C × (H·W)` matrix and multiplied by the
//! `C × C` weight, so every pixel gets `out[o] = Σ_i W[o][i] · in[i]`.
use crate::error::{check_channels, Result};
use crate::tensor::FeatureMap;
use crate::weights::PointwiseWeight;
use nalgebra::DMatrix;

/// Mix the `c × h × w` values of one batch item into `dst`. Callers check
/// that `weight.channels()` matches the item's channel count.
pub(crate) fn pointwise_item(weight: &PointwiseWeight, src: &[f32], dst: &mut [f32]) {
    let c = weight.channels();
    if c == 0 || src.is_empty() {
        return;
    }
    let hw = src.len() / c;
    let x = DMatrix::from_row_slice(c, hw, src);
    let y = weight.as_matrix() * x;
    for (o, row) in y.row_iter().enumerate() {
        for (d, v) in dst[o * hw..(o + 1) * hw].iter_mut().zip(row.iter()) {
            *d = *v;
        }
    }
}

/// Apply `weight` at every pixel. Fails with `ShapeMismatch` when the
/// weight's channel count differs from the map's.
pub fn pointwise(input: &FeatureMap, weight: &PointwiseWeight) -> Result<FeatureMap> {
    let shape = input.shape();
    check_channels("pointwise weight", shape.c, weight.channels())?;
    let mut out = FeatureMap::zeros(shape);
    for n in 0..shape.n {
        pointwise_item(weight, input.item(n), out.item_mut(n));
    }
    Ok(out)
}
