//! Backend-agnostic parts: parameters, settings and the feature lifecycle.

pub mod evaluation;
pub use evaluation::*;
pub mod feature;
pub use feature::*;
pub mod lifecycle;
pub use lifecycle::*;
pub mod optimal_settings;
pub use optimal_settings::*;
pub mod ray_reconstruction;
pub use ray_reconstruction::*;
pub mod super_sampling;
pub use super_sampling::*;
pub mod system;
pub use system::*;

pub use ngx_runtime::{
    BackendKind, DenoiseMode, DepthType, DlssFeatureFlags, EngineType, FeatureKind, NodeMasks,
    ParameterType, ParameterValue, PerfQuality, Resource, RoughnessMode,
};
