//! Runtime parameter types

use serde::{Deserialize, Serialize};

use crate::aic::aiq::{
    AlgorithmResults, AwbResults, ExposureResult, GbceResults, PaResults, SaResults, WeightGrid,
};
use crate::aic::common::error::{AicError, Result};
use crate::aic::common::geometry::Rectangle;

/// What the frame is captured for; selects tuning in the engine.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FrameUse {
    #[default]
    Preview,
    Still,
    Continuous,
    Video,
}

/// AIC pipe mode. Only one pipe runs at a time, whichever mode it is in.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AicMode {
    #[default]
    Still,
    Video,
}

impl AicMode {
    pub fn index(self) -> u32 {
        match self {
            AicMode::Still => 0,
            AicMode::Video => 1,
        }
    }
}

/// Sensor readout window and the scaling applied by the sensor itself.
///
/// `Default` is all-zero, which is not a valid state: the scaling
/// denominators must be set (usually through [`SensorFrameParameters::passthrough`]).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SensorFrameParameters {
    pub horizontal_crop_offset: u32,
    pub vertical_crop_offset: u32,
    pub cropped_image_width: u32,
    pub cropped_image_height: u32,
    pub horizontal_scaling_numerator: u16,
    pub horizontal_scaling_denominator: u16,
    pub vertical_scaling_numerator: u16,
    pub vertical_scaling_denominator: u16,
}

impl SensorFrameParameters {
    /// Unscaled readout of a `width`x`height` window at the origin.
    pub fn passthrough(width: u32, height: u32) -> Self {
        Self {
            horizontal_crop_offset: 0,
            vertical_crop_offset: 0,
            cropped_image_width: width,
            cropped_image_height: height,
            horizontal_scaling_numerator: 1,
            horizontal_scaling_denominator: 1,
            vertical_scaling_numerator: 1,
            vertical_scaling_denominator: 1,
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.cropped_image_width == 0 || self.cropped_image_height == 0 {
            return Err(AicError::InvalidDimensions(
                "sensor crop".to_string(),
                self.cropped_image_width,
                self.cropped_image_height,
            ));
        }
        if self.horizontal_scaling_denominator == 0 || self.vertical_scaling_denominator == 0 {
            return Err(AicError::ConfigurationError(format!(
                "zero scaling denominator (h={}/{}, v={}/{})",
                self.horizontal_scaling_numerator,
                self.horizontal_scaling_denominator,
                self.vertical_scaling_numerator,
                self.vertical_scaling_denominator,
            )));
        }
        if self.horizontal_scaling_numerator == 0 || self.vertical_scaling_numerator == 0 {
            return Err(AicError::ConfigurationError(
                "zero scaling numerator".to_string(),
            ));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct InputFrameParameters {
    pub sensor_frame_params: SensorFrameParameters,
    pub fix_flip_x: bool,
    pub fix_flip_y: bool,
}

/// Size of the frame leaving the ISP
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct OutputFrameParameters {
    pub width: u32,
    pub height: u32,
}

/// Input feeder and Bayer domain scaler resolutions.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ResolutionConfig {
    pub bds_in_width: u32,
    pub bds_in_height: u32,
    pub bds_out_width: u32,
    pub bds_out_height: u32,
    /// Pixels removed on each side by the input feeder
    pub horizontal_if_crop: u32,
    pub vertical_if_crop: u32,
    /// Extra columns bringing the BDS output line to a 128 pixel boundary
    pub bds_horizontal_padding: u16,
}

/// Everything `configure()` establishes for the pipe.
///
/// Integer-only so that equality is bit-identity.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RuntimeParameterState {
    pub frame_use: FrameUse,
    pub mode: AicMode,
    pub input_frame: InputFrameParameters,
    pub output_frame: OutputFrameParameters,
    pub resolution: ResolutionConfig,
    pub focus_rect: Rectangle,
}

/// Borrowed view of one frame's 3A results.
///
/// Every reference points into the caller's result set; the view must not
/// outlive the frame it was created for, which the `'r` lifetime enforces.
#[derive(Debug, Clone, Copy)]
pub struct AlgorithmResultsView<'r> {
    pub exposure: &'r ExposureResult,
    pub weight_grid: &'r WeightGrid,
    pub awb: &'r AwbResults,
    pub gbce: &'r GbceResults,
    pub pa: &'r PaResults,
    pub sa: &'r SaResults,
}

impl<'r> AlgorithmResultsView<'r> {
    pub fn from_results<R: AlgorithmResults + ?Sized>(results: &'r R) -> Result<Self> {
        let ae = results.ae();
        let exposure = ae
            .exposure()
            .ok_or_else(|| AicError::EncodeError("AE results carry no exposure".to_string()))?;
        Ok(Self {
            exposure,
            weight_grid: &ae.weight_grid,
            awb: results.awb(),
            gbce: results.gbce(),
            pa: results.pa(),
            sa: results.sa(),
        })
    }
}

/// Complete engine input for one frame: configured geometry plus the
/// frame's results.
#[derive(Debug, Clone, Copy)]
pub struct RuntimeParams<'s, 'r> {
    pub state: &'s RuntimeParameterState,
    pub results: AlgorithmResultsView<'r>,
    pub isp_vamem_type: u32,
}
