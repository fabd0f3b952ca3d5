//! AIC configuration types

use crate::aic::common::geometry::{Rectangle, Size};
use crate::aic::params::ParamsVersion;
use crate::aic::runtime::{AicMode, FrameUse};

/// Sensor mode description from the camera pipeline
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SensorInfo {
    /// Area of the pixel array read out by the sensor
    pub analog_crop: Rectangle,
    /// Size of the frames the sensor outputs
    pub output_size: Size,
}

/// Stream geometry handed to [`Aic::configure`](crate::aic::Aic::configure)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct IpaConfigInfo {
    pub sensor_info: SensorInfo,
    /// Input feeder output, i.e. the BDS input
    pub iif: Size,
    pub bds_output_size: Size,
}

/// Lifecycle of an `Aic`. "Uninitialized" is the absence of an `Aic`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AicState {
    Initialized,
    Configured,
    /// `frame` counts successful runs since the last configure or reset
    Running { frame: u64 },
}

impl AicState {
    pub fn is_configured(&self) -> bool {
        !matches!(self, AicState::Initialized)
    }
}

/// Options fixed at AIC construction
#[derive(Debug, Clone)]
pub struct AicOptions {
    /// Pipe mode; only a single mode is active at a time
    pub mode: AicMode,
    /// Frame use stamped into the runtime parameters
    pub frame_use: FrameUse,
    /// Log every computed config at debug level
    pub dump_config: bool,
    /// Layout of the parameter buffer produced
    pub params_version: ParamsVersion,
}

impl Default for AicOptions {
    fn default() -> Self {
        Self {
            mode: AicMode::Still,
            frame_use: FrameUse::Still,
            dump_config: false,
            params_version: ParamsVersion::Ipu3V1,
        }
    }
}

impl AicOptions {
    pub fn builder() -> AicOptionsBuilder {
        AicOptionsBuilder::default()
    }
}

/// Builder for AicOptions
#[derive(Default)]
pub struct AicOptionsBuilder {
    mode: Option<AicMode>,
    frame_use: Option<FrameUse>,
    dump_config: Option<bool>,
    params_version: Option<ParamsVersion>,
}

impl AicOptionsBuilder {
    pub fn mode(mut self, mode: AicMode) -> Self {
        self.mode = Some(mode);
        self
    }

    pub fn frame_use(mut self, frame_use: FrameUse) -> Self {
        self.frame_use = Some(frame_use);
        self
    }

    pub fn dump_config(mut self, enable: bool) -> Self {
        self.dump_config = Some(enable);
        self
    }

    pub fn params_version(mut self, version: ParamsVersion) -> Self {
        self.params_version = Some(version);
        self
    }

    pub fn build(self) -> AicOptions {
        let default = AicOptions::default();
        AicOptions {
            mode: self.mode.unwrap_or(default.mode),
            frame_use: self.frame_use.unwrap_or(default.frame_use),
            dump_config: self.dump_config.unwrap_or(default.dump_config),
            params_version: self.params_version.unwrap_or(default.params_version),
        }
    }
}
