//! Multi-directional boundary enhancement layer.
//!
//! Overview
//! - Projects the input through a bias-free channel-mix transform.
//! - Takes the difference between the projected map and its one-cell shifted
//!   copies in eight directions (zero fill at the borders) and sums them into
//!   a boundary response.
//! - Refines the response with a depthwise 3×3 filter followed by a
//!   channel-merge transform.
//! - Adds the refined map back to the input (residual connection).
//!
//! The layer is a pure function of its input and weights. Weights are never
//! touched by `apply`; an external trainer replaces them through the
//! `set_*` methods, which keep the channel count fixed.
use crate::config::EnhancerConfig;
use crate::diagnostics::timing::elapsed_ms;
use crate::diagnostics::{EnhanceReport, InputDescriptor, MapStats, TimingBreakdown};
use crate::error::{check_channels, EnhanceError, Result};
use crate::init::{initial_weights, WeightInit};
use crate::ops::{boundary_response, depthwise_conv3x3, pointwise};
use crate::tensor::{FeatureMap, Shape4};
use crate::weights::{DepthwiseWeight, PointwiseWeight};
use log::debug;
use rayon::prelude::*;
use std::time::Instant;

/// Intermediate maps of one forward pass.
struct Stages {
    boundary: FeatureMap,
    refined: FeatureMap,
    output: FeatureMap,
}

/// Plug-in layer sharpening boundary-sensitive features of an NCHW map.
#[derive(Clone, Debug)]
pub struct BoundaryEnhancer {
    channels: usize,
    /// `(C, C, 1, 1)` projection applied before the directional differences.
    channel_mix: PointwiseWeight,
    /// `(C, 1, 3, 3)` spatial filter applied to the boundary response.
    depthwise: DepthwiseWeight,
    /// `(C, C, 1, 1)` mixing applied after the depthwise filter.
    channel_merge: PointwiseWeight,
}

impl BoundaryEnhancer {
    /// Create a layer for `in_channels` channels with default initialisation.
    pub fn new(in_channels: usize) -> Result<Self> {
        Self::from_config(&EnhancerConfig::new(in_channels))
    }

    pub fn from_config(config: &EnhancerConfig) -> Result<Self> {
        let channels = config.channels()?;
        debug!(
            "BoundaryEnhancer::new in_channels={} init={:?}",
            channels, config.init
        );
        let weights = initial_weights(channels, config.init);
        Ok(Self {
            channels,
            channel_mix: weights.channel_mix,
            depthwise: weights.depthwise,
            channel_merge: weights.channel_merge,
        })
    }

    /// Identity layer: every weight is zero, so `apply` returns its input.
    pub fn zeros(in_channels: usize) -> Result<Self> {
        Self::from_config(&EnhancerConfig::new(in_channels).with_init(WeightInit::Zeros))
    }

    /// Assemble a layer from weights loaded by the host model.
    pub fn from_weights(
        channel_mix: PointwiseWeight,
        depthwise: DepthwiseWeight,
        channel_merge: PointwiseWeight,
    ) -> Result<Self> {
        let channels = channel_mix.channels();
        if channels == 0 {
            return Err(EnhanceError::Configuration { in_channels: 0 });
        }
        check_channels("depthwise weight", channels, depthwise.channels())?;
        check_channels("channel-merge weight", channels, channel_merge.channels())?;
        Ok(Self {
            channels,
            channel_mix,
            depthwise,
            channel_merge,
        })
    }

    #[inline]
    pub fn in_channels(&self) -> usize {
        self.channels
    }

    pub fn channel_mix(&self) -> &PointwiseWeight {
        &self.channel_mix
    }

    pub fn depthwise(&self) -> &DepthwiseWeight {
        &self.depthwise
    }

    pub fn channel_merge(&self) -> &PointwiseWeight {
        &self.channel_merge
    }

    pub fn set_channel_mix(&mut self, weight: PointwiseWeight) -> Result<()> {
        check_channels("channel-mix weight", self.channels, weight.channels())?;
        self.channel_mix = weight;
        Ok(())
    }

    pub fn set_depthwise(&mut self, weight: DepthwiseWeight) -> Result<()> {
        check_channels("depthwise weight", self.channels, weight.channels())?;
        self.depthwise = weight;
        Ok(())
    }

    pub fn set_channel_merge(&mut self, weight: PointwiseWeight) -> Result<()> {
        check_channels("channel-merge weight", self.channels, weight.channels())?;
        self.channel_merge = weight;
        Ok(())
    }

    /// Validate an input shape without running the layer.
    pub fn check_input(&self, shape: Shape4) -> Result<()> {
        check_channels("input channels", self.channels, shape.c)?;
        if shape.h == 0 {
            return Err(EnhanceError::ShapeMismatch {
                what: "input height",
                expected: 1,
                actual: 0,
            });
        }
        if shape.w == 0 {
            return Err(EnhanceError::ShapeMismatch {
                what: "input width",
                expected: 1,
                actual: 0,
            });
        }
        Ok(())
    }

    /// Enhance `input`, returning a new map of the same shape.
    pub fn apply(&self, input: &FeatureMap) -> Result<FeatureMap> {
        self.check_input(input.shape())?;
        debug!("BoundaryEnhancer::apply shape={}", input.shape());
        Ok(self.forward(input, &mut TimingBreakdown::default())?.output)
    }

    /// Same output as [`apply`](Self::apply) plus per-stage timings and
    /// magnitude summaries of the intermediate maps.
    pub fn apply_with_report(&self, input: &FeatureMap) -> Result<(FeatureMap, EnhanceReport)> {
        let shape = input.shape();
        self.check_input(shape)?;
        debug!("BoundaryEnhancer::apply_with_report shape={}", shape);
        let total_start = Instant::now();
        let mut timings = TimingBreakdown::default();
        let stages = self.forward(input, &mut timings)?;
        timings.total_ms = elapsed_ms(total_start);

        let report = EnhanceReport {
            input: InputDescriptor::from(shape),
            timings,
            boundary: MapStats::of(&stages.boundary),
            refined: MapStats::of(&stages.refined),
            output: MapStats::of(&stages.output),
        };
        Ok((stages.output, report))
    }

    /// Enhance batch items concurrently on the rayon pool. Each item follows
    /// the same arithmetic as [`apply`](Self::apply), so results are
    /// bit-identical.
    pub fn apply_parallel(&self, input: &FeatureMap) -> Result<FeatureMap> {
        let shape = input.shape();
        self.check_input(shape)?;
        debug!("BoundaryEnhancer::apply_parallel shape={}", shape);
        let item_shape = Shape4::new(1, shape.c, shape.h, shape.w);
        let mut out = FeatureMap::zeros(shape);
        if shape.is_empty() {
            return Ok(out);
        }
        out.data_mut()
            .par_chunks_mut(shape.item_len())
            .enumerate()
            .try_for_each(|(n, dst)| -> Result<()> {
                let item = FeatureMap::from_vec(item_shape, input.item(n).to_vec())?;
                let stages = self.forward(&item, &mut TimingBreakdown::default())?;
                dst.copy_from_slice(stages.output.data());
                Ok(())
            })?;
        Ok(out)
    }

    fn forward(&self, input: &FeatureMap, timings: &mut TimingBreakdown) -> Result<Stages> {
        let feat = timings.time("channel_mix", || pointwise(input, &self.channel_mix))?;
        let boundary = timings.time("boundary", || boundary_response(&feat));
        let refined = timings.time("refine", || {
            let filtered = depthwise_conv3x3(&boundary, &self.depthwise)?;
            pointwise(&filtered, &self.channel_merge)
        })?;
        let output = timings.time("residual", || {
            let mut output = input.clone();
            for (o, r) in output.data_mut().iter_mut().zip(refined.data()) {
                *o += *r;
            }
            output
        });
        Ok(Stages {
            boundary,
            refined,
            output,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::BoundaryEnhancer;
    use crate::config::EnhancerConfig;
    use crate::error::EnhanceError;
    use crate::init::WeightInit;
    use crate::tensor::{FeatureMap, Shape4};
    use crate::weights::{DepthwiseWeight, PointwiseWeight};

    fn ramp(shape: Shape4) -> FeatureMap {
        FeatureMap::from_fn(shape, |n, c, y, x| {
            ((n * 13 + c * 7 + y * 3 + x * 5) % 17) as f32 * 0.125 - 1.0
        })
    }

    #[test]
    fn zero_channels_is_a_configuration_error() {
        assert_eq!(
            BoundaryEnhancer::new(0).unwrap_err(),
            EnhanceError::Configuration { in_channels: 0 }
        );
        let cfg = EnhancerConfig {
            in_channels: -2,
            init: WeightInit::Zeros,
        };
        assert_eq!(
            BoundaryEnhancer::from_config(&cfg).unwrap_err(),
            EnhanceError::Configuration { in_channels: -2 }
        );
    }

    #[test]
    fn channel_mismatch_is_rejected_before_any_work() {
        let enhancer = BoundaryEnhancer::new(8).unwrap();
        let input = FeatureMap::zeros(Shape4::new(1, 4, 5, 5));
        assert_eq!(
            enhancer.apply(&input).unwrap_err(),
            EnhanceError::ShapeMismatch {
                what: "input channels",
                expected: 8,
                actual: 4
            }
        );
        assert!(enhancer.apply_with_report(&input).is_err());
        assert!(enhancer.apply_parallel(&input).is_err());
    }

    #[test]
    fn empty_spatial_axis_is_rejected() {
        let enhancer = BoundaryEnhancer::new(2).unwrap();
        assert!(enhancer
            .apply(&FeatureMap::zeros(Shape4::new(1, 2, 0, 3)))
            .is_err());
        assert!(enhancer
            .apply(&FeatureMap::zeros(Shape4::new(1, 2, 3, 0)))
            .is_err());
    }

    #[test]
    fn empty_batch_gives_empty_output() {
        let enhancer = BoundaryEnhancer::new(2).unwrap();
        let input = FeatureMap::zeros(Shape4::new(0, 2, 3, 3));
        assert_eq!(enhancer.apply(&input).unwrap().shape(), input.shape());
        assert_eq!(enhancer.apply_parallel(&input).unwrap().shape(), input.shape());
    }

    #[test]
    fn from_weights_requires_matching_channels() {
        let err = BoundaryEnhancer::from_weights(
            PointwiseWeight::identity(3),
            DepthwiseWeight::zeros(2),
            PointwiseWeight::zeros(3),
        )
        .unwrap_err();
        assert_eq!(
            err,
            EnhanceError::ShapeMismatch {
                what: "depthwise weight",
                expected: 3,
                actual: 2
            }
        );
        assert_eq!(
            BoundaryEnhancer::from_weights(
                PointwiseWeight::zeros(0),
                DepthwiseWeight::zeros(0),
                PointwiseWeight::zeros(0),
            )
            .unwrap_err(),
            EnhanceError::Configuration { in_channels: 0 }
        );
    }

    #[test]
    fn setters_keep_channel_count_fixed() {
        let mut enhancer = BoundaryEnhancer::new(3).unwrap();
        assert!(enhancer.set_channel_mix(PointwiseWeight::zeros(4)).is_err());
        assert!(enhancer.set_depthwise(DepthwiseWeight::zeros(2)).is_err());
        assert!(enhancer.set_channel_merge(PointwiseWeight::identity(3)).is_ok());
        assert_eq!(enhancer.channel_merge(), &PointwiseWeight::identity(3));
        assert_eq!(enhancer.in_channels(), 3);
    }

    #[test]
    fn trainer_update_through_setter_changes_output() {
        let mut enhancer = BoundaryEnhancer::zeros(2).unwrap();
        let mut input = FeatureMap::zeros(Shape4::new(1, 2, 3, 3));
        input.set(0, 0, 1, 1, 1.0);
        assert_eq!(enhancer.apply(&input).unwrap(), input);

        // Step the weights the way an optimiser would: copy, edit, write back.
        let mut mix = enhancer.channel_mix().clone();
        mix.set(0, 0, 1.0);
        enhancer.set_channel_mix(mix).unwrap();
        let mut depthwise = enhancer.depthwise().clone();
        depthwise.kernel_mut(0)[1][1] = 1.0;
        enhancer.set_depthwise(depthwise).unwrap();
        let mut merge = enhancer.channel_merge().clone();
        merge.set(1, 0, 0.5);
        enhancer.set_channel_merge(merge).unwrap();

        assert_eq!(enhancer.channel_mix().get(0, 0), 1.0);
        let output = enhancer.apply(&input).unwrap();
        // Channel 0 is untouched; channel 1 receives half the boundary of channel 0.
        assert_eq!(output.plane(0, 0).as_slice(), input.plane(0, 0).as_slice());
        assert_eq!(
            output.plane(0, 1).as_slice(),
            &[-0.5, -0.5, -0.5, -0.5, 4.0, -0.5, -0.5, -0.5, -0.5]
        );
    }

    #[test]
    fn absurd_channel_count_is_a_configuration_error() {
        assert!(matches!(
            BoundaryEnhancer::new(usize::MAX),
            Err(EnhanceError::Configuration { .. })
        ));
    }

    #[test]
    fn centre_pixel_scenario_passes_input_through() {
        let mut input = FeatureMap::zeros(Shape4::new(1, 1, 3, 3));
        input.set(0, 0, 1, 1, 1.0);
        let enhancer = BoundaryEnhancer::from_weights(
            PointwiseWeight::identity(1),
            DepthwiseWeight::zeros(1),
            PointwiseWeight::zeros(1),
        )
        .unwrap();

        let (output, report) = enhancer.apply_with_report(&input).unwrap();
        assert_eq!(output, input);
        // Boundary response is +8 at the centre and -1 on the ring.
        assert_eq!(report.boundary.max_abs, 8.0);
        assert!((report.boundary.mean_abs - 16.0 / 9.0).abs() < 1e-6);
        assert_eq!(report.refined.max_abs, 0.0);
    }

    #[test]
    fn refine_path_adds_filtered_boundary_to_input() {
        let mut input = FeatureMap::zeros(Shape4::new(1, 1, 3, 3));
        input.set(0, 0, 1, 1, 1.0);
        let mut depthwise = DepthwiseWeight::zeros(1);
        depthwise.kernel_mut(0)[1][1] = 1.0;
        let enhancer = BoundaryEnhancer::from_weights(
            PointwiseWeight::identity(1),
            depthwise,
            PointwiseWeight::from_row_slice(1, &[0.5]).unwrap(),
        )
        .unwrap();

        let output = enhancer.apply(&input).unwrap();
        // input + 0.5 * boundary
        assert_eq!(
            output.into_vec(),
            vec![-0.5, -0.5, -0.5, -0.5, 5.0, -0.5, -0.5, -0.5, -0.5]
        );
    }

    #[test]
    fn parallel_matches_sequential_bitwise() {
        let shape = Shape4::new(4, 3, 6, 5);
        let input = ramp(shape);
        let enhancer = BoundaryEnhancer::new(3).unwrap();

        let seq = enhancer.apply(&input).unwrap();
        let par = enhancer.apply_parallel(&input).unwrap();
        assert_eq!(seq, par);
    }

    #[test]
    fn report_output_matches_apply() {
        let shape = Shape4::new(2, 2, 4, 4);
        let input = ramp(shape);
        let enhancer = BoundaryEnhancer::new(2).unwrap();

        let plain = enhancer.apply(&input).unwrap();
        let (reported, report) = enhancer.apply_with_report(&input).unwrap();
        assert_eq!(plain, reported);
        assert_eq!(report.input.channels, 2);
        assert_eq!(report.timings.stages.len(), 4);
        assert!(report.timings.stage("boundary").is_some());
    }

    #[test]
    fn enhancer_is_shareable_across_threads() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<BoundaryEnhancer>();
    }
}
