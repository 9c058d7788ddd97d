pub mod feature_map;
pub mod plane;

pub use self::feature_map::{FeatureMap, Shape4};
pub use self::plane::Plane;
