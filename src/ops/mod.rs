//! Stage kernels of the boundary enhancer.
//!
//! - `shift`: zero-filled one-cell translation in eight directions.
//! - `boundary`: directional differences and their unweighted sum.
//! - `depthwise`: per-channel 3×3 filter with zero padding.
//! - `pointwise`: per-pixel channel mixing.
//!
//! Every kernel is a pure function from an input map (and weights) to a newly
//! allocated map of the same shape. Shape checks live in the enhancer.

pub mod boundary;
pub mod depthwise;
pub mod pointwise;
pub mod shift;

pub use boundary::{boundary_response, directional_difference};
pub use depthwise::depthwise_conv3x3;
pub use pointwise::pointwise;
pub use shift::{shift, Direction};
