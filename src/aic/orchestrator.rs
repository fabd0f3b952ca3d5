//! AIC orchestration module
//!
//! Sequences configure, per-frame result binding, config computation and
//! parameter encoding for the single active ISP pipe.

mod frame;
mod pipeline;
pub mod types;

#[cfg(test)]
mod tests;

pub use frame::FrameParams;
pub use pipeline::Aic;
pub use types::{AicOptions, AicOptionsBuilder, AicState, IpaConfigInfo, SensorInfo};
