//! ISP pipe module
//!
//! The pipe is the single hardware configuration slot the AIC writes into.
//! This module holds the intermediate per-block configuration (`AicConfig`),
//! the engine capability trait that fills it, and the encoder stage that
//! drives the engine once per frame.

mod config_encoder;
mod engine;
mod isp_pipe;
mod reference_engine;
pub mod types;


pub use config_encoder::PipelineConfigEncoder;
pub use engine::AicEngine;
pub use isp_pipe::{IspPipe, PipeLease};
pub use reference_engine::ReferenceEngine;
pub use types::{
    AeGridConfig, AicConfig, BdsConfig, BlackLevelConfig, CcmConfig, CropConfig, GammaConfig,
    ShadingConfig, WhiteBalanceConfig,
};
