//! Automatic ISP configuration module
//!
//! This module turns 3A results and stream geometry into the IPU3 parameter
//! buffer, with separate modules for runtime state, config computation,
//! parameter encoding and the orchestration around them.

pub mod aiq;
pub mod common;
pub mod orchestrator;
pub mod params;
pub mod pipe;
pub mod runtime;

pub use common::{align128, AicError, BinaryData, ErrorKind, Rectangle, Result, Size};

pub use aiq::{AiqResults, AlgorithmResults};

pub use runtime::{
    AicMode, FrameUse, ResolutionConfig, RuntimeParameterBuilder, RuntimeParameterState,
    RuntimeParams,
};

pub use pipe::{AicConfig, AicEngine, IspPipe, PipeLease, PipelineConfigEncoder, ReferenceEngine};

pub use params::{Ipu3UapiParams, ParameterEncoder, ParamsVersion};

pub use orchestrator::{Aic, AicOptions, AicState, FrameParams, IpaConfigInfo, SensorInfo};
