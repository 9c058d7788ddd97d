//! Bias-free weight tensors owned by the enhancer.
//!
//! - [`PointwiseWeight`]: a `(C, C, 1, 1)` kernel held as a `C × C` matrix
//!   (row = output channel, column = input channel). Used for both the
//!   channel-mix projection and the channel-merge step.
//! - [`DepthwiseWeight`]: a `(C, 1, 3, 3)` kernel, one 3×3 filter per channel
//!   indexed `[ky][kx]`.
//!
//! The channel count is fixed when a weight is created. Mutable access is
//! element-wise so an external trainer can update values without being able
//! to resize the tensor.
use crate::error::{EnhanceError, Result};
use nalgebra::DMatrix;

/// Row-major 3×3 kernel.
pub type Kernel3 = [[f32; 3]; 3];

/// Per-pixel cross-channel linear map without bias.
#[derive(Clone, Debug, PartialEq)]
pub struct PointwiseWeight {
    matrix: DMatrix<f32>,
}

impl PointwiseWeight {
    pub fn zeros(channels: usize) -> Self {
        Self {
            matrix: DMatrix::zeros(channels, channels),
        }
    }

    pub fn identity(channels: usize) -> Self {
        Self {
            matrix: DMatrix::identity(channels, channels),
        }
    }

    /// Build from `C*C` values in `(out, in)` row-major order, which is the
    /// flattened layout of a `(C, C, 1, 1)` kernel.
    pub fn from_row_slice(channels: usize, values: &[f32]) -> Result<Self> {
        let expected = channels * channels;
        if values.len() != expected {
            return Err(EnhanceError::InvalidBuffer {
                expected,
                actual: values.len(),
            });
        }
        Ok(Self {
            matrix: DMatrix::from_row_slice(channels, channels, values),
        })
    }

    pub(crate) fn from_fn(channels: usize, f: impl FnMut(usize, usize) -> f32) -> Self {
        Self {
            matrix: DMatrix::from_fn(channels, channels, f),
        }
    }

    #[inline]
    pub fn channels(&self) -> usize {
        self.matrix.nrows()
    }

    #[inline]
    pub fn get(&self, out_ch: usize, in_ch: usize) -> f32 {
        self.matrix[(out_ch, in_ch)]
    }

    #[inline]
    pub fn set(&mut self, out_ch: usize, in_ch: usize, value: f32) {
        self.matrix[(out_ch, in_ch)] = value;
    }

    /// Overwrite all values from an `(out, in)` row-major slice.
    pub fn copy_from_row_slice(&mut self, values: &[f32]) -> Result<()> {
        let replacement = Self::from_row_slice(self.channels(), values)?;
        self.matrix = replacement.matrix;
        Ok(())
    }

    /// Flatten to `(out, in)` row-major order.
    pub fn to_row_vec(&self) -> Vec<f32> {
        self.matrix.transpose().as_slice().to_vec()
    }

    #[inline]
    pub fn as_matrix(&self) -> &DMatrix<f32> {
        &self.matrix
    }
}

/// One 3×3 spatial filter per channel, no cross-channel mixing.
#[derive(Clone, Debug, PartialEq)]
pub struct DepthwiseWeight {
    kernels: Vec<Kernel3>,
}

impl DepthwiseWeight {
    pub fn zeros(channels: usize) -> Self {
        Self {
            kernels: vec![[[0.0; 3]; 3]; channels],
        }
    }

    pub fn from_kernels(kernels: Vec<Kernel3>) -> Self {
        Self { kernels }
    }

    /// Build from `C*9` values in `(C, 1, 3, 3)` order.
    pub fn from_slice(channels: usize, values: &[f32]) -> Result<Self> {
        let expected = channels * 9;
        if values.len() != expected {
            return Err(EnhanceError::InvalidBuffer {
                expected,
                actual: values.len(),
            });
        }
        let kernels = values
            .chunks_exact(9)
            .map(|k| [[k[0], k[1], k[2]], [k[3], k[4], k[5]], [k[6], k[7], k[8]]])
            .collect();
        Ok(Self { kernels })
    }

    #[inline]
    pub fn channels(&self) -> usize {
        self.kernels.len()
    }

    #[inline]
    pub fn kernel(&self, channel: usize) -> &Kernel3 {
        &self.kernels[channel]
    }

    #[inline]
    pub fn kernel_mut(&mut self, channel: usize) -> &mut Kernel3 {
        &mut self.kernels[channel]
    }

    pub fn kernels(&self) -> &[Kernel3] {
        &self.kernels
    }
}
