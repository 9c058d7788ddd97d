//! Default weight initialisation.
//!
//! A bias-free convolution is conventionally initialised from
//! `U(-1/sqrt(fan_in), 1/sqrt(fan_in))` where `fan_in` is the number of
//! inputs feeding one output value: `C` for the pointwise kernels and `9` for
//! each depthwise 3×3 filter. Draws come from a seeded `StdRng`, so a given
//! seed always yields the same weights.
use crate::weights::{DepthwiseWeight, PointwiseWeight};
use rand::distributions::{Distribution, Uniform};
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::{Deserialize, Serialize};

/// How the enhancer's weights are filled at construction.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum WeightInit {
    /// Seeded uniform draw with fan-in scaled bounds.
    Uniform { seed: u64 },
    /// All zeros; the enhancer is then an exact identity.
    Zeros,
}

impl Default for WeightInit {
    fn default() -> Self {
        WeightInit::Uniform { seed: 0 }
    }
}

/// Symmetric bound `1/sqrt(fan_in)`.
pub fn uniform_bound(fan_in: usize) -> f32 {
    1.0 / (fan_in.max(1) as f32).sqrt()
}

/// Weights produced by one initialisation pass, in construction order.
pub(crate) struct InitialWeights {
    pub channel_mix: PointwiseWeight,
    pub depthwise: DepthwiseWeight,
    pub channel_merge: PointwiseWeight,
}

pub(crate) fn initial_weights(channels: usize, init: WeightInit) -> InitialWeights {
    match init {
        WeightInit::Zeros => InitialWeights {
            channel_mix: PointwiseWeight::zeros(channels),
            depthwise: DepthwiseWeight::zeros(channels),
            channel_merge: PointwiseWeight::zeros(channels),
        },
        WeightInit::Uniform { seed } => {
            let mut rng = StdRng::seed_from_u64(seed);
            let channel_mix = uniform_pointwise(channels, &mut rng);
            let depthwise = uniform_depthwise(channels, &mut rng);
            let channel_merge = uniform_pointwise(channels, &mut rng);
            InitialWeights {
                channel_mix,
                depthwise,
                channel_merge,
            }
        }
    }
}

fn uniform_pointwise(channels: usize, rng: &mut StdRng) -> PointwiseWeight {
    let bound = uniform_bound(channels);
    let dist = Uniform::new_inclusive(-bound, bound);
    PointwiseWeight::from_fn(channels, |_, _| dist.sample(rng))
}

fn uniform_depthwise(channels: usize, rng: &mut StdRng) -> DepthwiseWeight {
    let bound = uniform_bound(9);
    let dist = Uniform::new_inclusive(-bound, bound);
    let kernels = (0..channels)
        .map(|_| {
            let mut k = [[0.0f32; 3]; 3];
            for row in k.iter_mut() {
                for v in row.iter_mut() {
                    *v = dist.sample(rng);
                }
            }
            k
        })
        .collect();
    DepthwiseWeight::from_kernels(kernels)
}
