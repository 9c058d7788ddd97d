//! Depthwise 3×3 filtering (stride 1, zero padding 1).
//!
//! - Each channel is filtered with its own kernel; channels never mix.
//! - Cross-correlation, as in conventional convolution layers:
//!   `out[y][x] = Σ k[ky][kx] · in[y + ky - 1][x + kx - 1]`.
//! - Taps that fall outside the plane read zero, so the output keeps the
//!   input's height and width.
//!
//! Complexity: O(9·N·C·H·W).
use crate::error::{check_channels, Result};
use crate::tensor::{FeatureMap, Plane};
use crate::weights::{DepthwiseWeight, Kernel3};

fn filter_plane(src: Plane<'_>, kernel: &Kernel3, dst: &mut [f32]) {
    let w = src.width();
    let h = src.height();
    if w == 0 || h == 0 {
        return;
    }
    for y in 0..h {
        // Missing neighbour rows are treated as all-zero.
        let rows = [
            y.checked_sub(1).map(|yy| src.row(yy)),
            Some(src.row(y)),
            (y + 1 < h).then(|| src.row(y + 1)),
        ];
        let out = &mut dst[y * w..(y + 1) * w];
        for (x, o) in out.iter_mut().enumerate() {
            let mut sum = 0.0;
            for (k_row, row) in kernel.iter().zip(rows.iter()) {
                let Some(row) = row else { continue };
                if x > 0 {
                    sum += k_row[0] * row[x - 1];
                }
                sum += k_row[1] * row[x];
                if x + 1 < w {
                    sum += k_row[2] * row[x + 1];
                }
            }
            *o = sum;
        }
    }
}

/// Apply one 3×3 kernel per channel. Fails with `ShapeMismatch` when the
/// weight's channel count differs from the map's.
pub fn depthwise_conv3x3(input: &FeatureMap, weight: &DepthwiseWeight) -> Result<FeatureMap> {
    let shape = input.shape();
    check_channels("depthwise weight", shape.c, weight.channels())?;
    let mut out = FeatureMap::zeros(shape);
    for n in 0..shape.n {
        for c in 0..shape.c {
            let src = input.plane(n, c);
            filter_plane(src, weight.kernel(c), out.plane_mut(n, c));
        }
    }
    Ok(out)
}
