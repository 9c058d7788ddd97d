#![doc = include_str!("../README.md")]

// Public modules (stable-ish surface)
pub mod config;
pub mod diagnostics;
pub mod enhancer;
pub mod error;
pub mod tensor;
pub mod weights;

// Stage kernels and helpers, public for inspection and tooling.
pub mod image;
pub mod init;
pub mod ops;

// --- High-level re-exports -------------------------------------------------

pub use crate::config::EnhancerConfig;
pub use crate::enhancer::BoundaryEnhancer;
pub use crate::error::{EnhanceError, Result};
pub use crate::init::WeightInit;
pub use crate::tensor::{FeatureMap, Shape4};
pub use crate::weights::{DepthwiseWeight, Kernel3, PointwiseWeight};

pub use crate::diagnostics::EnhanceReport;

// --- Prelude ---------------------------------------------------------------

/// Small prelude for quick experiments.
///
/// ```
/// use boundary_enhancer::prelude::*;
///
/// # fn main() -> Result<(), EnhanceError> {
/// let enhancer = BoundaryEnhancer::new(4)?;
/// let input = FeatureMap::zeros(Shape4::new(2, 4, 16, 16));
/// let output = enhancer.apply(&input)?;
/// assert_eq!(output.shape(), input.shape());
/// # Ok(())
/// # }
/// ```
pub mod prelude {
    pub use crate::{BoundaryEnhancer, EnhanceError, EnhancerConfig, FeatureMap, Shape4};
}
