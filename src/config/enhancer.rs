use crate::error::{EnhanceError, Result};
use crate::init::WeightInit;
use serde::Deserialize;

/// Construction parameters for [`BoundaryEnhancer`](crate::BoundaryEnhancer).
///
/// `in_channels` is signed so that a negative count read from a config file
/// surfaces as [`EnhanceError::Configuration`] rather than a parse error.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize)]
pub struct EnhancerConfig {
    pub in_channels: i64,
    #[serde(default)]
    pub init: WeightInit,
}

impl EnhancerConfig {
    pub fn new(in_channels: usize) -> Self {
        Self {
            in_channels: i64::try_from(in_channels).unwrap_or(i64::MAX),
            init: WeightInit::default(),
        }
    }

    pub fn with_init(mut self, init: WeightInit) -> Self {
        self.init = init;
        self
    }

    /// Channel count as `usize`, or a configuration error when it is not
    /// positive or the `C × C` weights could not be addressed.
    pub fn channels(&self) -> Result<usize> {
        let invalid = EnhanceError::Configuration {
            in_channels: self.in_channels,
        };
        if self.in_channels <= 0 {
            return Err(invalid);
        }
        let channels = usize::try_from(self.in_channels).map_err(|_| invalid.clone())?;
        let weight_bytes = channels
            .checked_mul(channels)
            .and_then(|len| len.checked_mul(std::mem::size_of::<f32>()))
            .filter(|bytes| *bytes <= isize::MAX as usize);
        if weight_bytes.is_none() {
            return Err(invalid);
        }
        Ok(channels)
    }
}
