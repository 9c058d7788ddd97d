//! Serde-backed configuration: the enhancer's construction parameters and the
//! JSON config consumed by the `enhance_image` tool.

pub mod enhance_image;
pub mod enhancer;

pub use self::enhancer::EnhancerConfig;
