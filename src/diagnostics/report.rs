use super::TimingBreakdown;
use crate::tensor::{FeatureMap, Shape4};
use serde::Serialize;

/// Result of [`BoundaryEnhancer::apply_with_report`](crate::BoundaryEnhancer).
#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EnhanceReport {
    pub input: InputDescriptor,
    pub timings: TimingBreakdown,
    /// Aggregated directional differences (before refinement).
    pub boundary: MapStats,
    /// Output of the depthwise + channel-merge refinement.
    pub refined: MapStats,
    /// Output of the full layer, residual included.
    pub output: MapStats,
}

#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InputDescriptor {
    pub batch: usize,
    pub channels: usize,
    pub height: usize,
    pub width: usize,
}

impl From<Shape4> for InputDescriptor {
    fn from(shape: Shape4) -> Self {
        Self {
            batch: shape.n,
            channels: shape.c,
            height: shape.h,
            width: shape.w,
        }
    }
}

/// Magnitude summary of an intermediate map.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MapStats {
    pub mean_abs: f32,
    pub max_abs: f32,
}

impl MapStats {
    pub fn of(map: &FeatureMap) -> Self {
        Self {
            mean_abs: map.mean_abs(),
            max_abs: map.max_abs(),
        }
    }
}
