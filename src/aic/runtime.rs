//! Runtime parameter module
//!
//! Holds the per-pipeline geometry state the AIC engine consumes and binds
//! each frame's 3A results to it without copying them.

mod builder;
pub mod types;

#[cfg(test)]
mod tests;

pub use builder::RuntimeParameterBuilder;
pub use types::{
    AicMode, AlgorithmResultsView, FrameUse, InputFrameParameters, OutputFrameParameters,
    ResolutionConfig, RuntimeParameterState, RuntimeParams, SensorFrameParameters,
};
