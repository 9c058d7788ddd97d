//! Error taxonomy shared by construction and `apply`.
//!
//! Both failure classes are caller errors: they are raised synchronously and
//! before any output is produced.
use thiserror::Error;

/// Errors reported by [`crate::BoundaryEnhancer`] and [`crate::FeatureMap`].
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum EnhanceError {
    /// The configured channel count is not a positive integer.
    #[error("invalid configuration: in_channels must be positive, got {in_channels}")]
    Configuration { in_channels: i64 },
    /// An input or weight does not match the configured shape.
    #[error("shape mismatch in {what}: expected {expected}, got {actual}")]
    ShapeMismatch {
        what: &'static str,
        expected: usize,
        actual: usize,
    },
    /// A raw buffer does not hold exactly `N*C*H*W` values.
    #[error("invalid buffer: expected {expected} values, got {actual}")]
    InvalidBuffer { expected: usize, actual: usize },
}

pub type Result<T> = std::result::Result<T, EnhanceError>;

pub(crate) fn check_channels(what: &'static str, expected: usize, actual: usize) -> Result<()> {
    if expected != actual {
        return Err(EnhanceError::ShapeMismatch {
            what,
            expected,
            actual,
        });
    }
    Ok(())
}
