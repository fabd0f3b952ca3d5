//! Intermediate ISP configuration
//!
//! Values here are in engineering units (gains as multipliers, curves
//! normalised to [0, 1]); quantisation to hardware fixed point is the
//! parameter encoder's job.

use serde::{Deserialize, Serialize};

/// Bayer domain scaler setup
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BdsConfig {
    pub input_width: u32,
    pub input_height: u32,
    pub output_width: u32,
    pub output_height: u32,
    pub horizontal_padding: u16,
}

/// Input feeder window, in sensor output coordinates
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CropConfig {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

/// Optical black level per Bayer channel, in sensor pixel units
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct BlackLevelConfig {
    pub r: f32,
    pub gr: f32,
    pub gb: f32,
    pub b: f32,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct WhiteBalanceConfig {
    pub r: f32,
    pub gr: f32,
    pub gb: f32,
    pub b: f32,
}

/// Colour correction matrix with per-row offsets
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct CcmConfig {
    pub matrix: [[f32; 3]; 3],
    pub offsets: [f32; 3],
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GammaConfig {
    pub lut: Vec<f32>,
}

/// Lens shading gain grid; one gain per cell and Bayer channel
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ShadingConfig {
    pub grid_width: u8,
    pub grid_height: u8,
    pub block_width_log2: u8,
    pub block_height_log2: u8,
    pub gains_r: Vec<f32>,
    pub gains_gr: Vec<f32>,
    pub gains_gb: Vec<f32>,
    pub gains_b: Vec<f32>,
}

/// AE statistics grid and metering weights
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AeGridConfig {
    pub width: u8,
    pub height: u8,
    pub block_width_log2: u8,
    pub block_height_log2: u8,
    pub x_start: u16,
    pub y_start: u16,
    pub weights: Vec<u8>,
}

/// Output of one engine run. A `None` block was not produced this frame.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AicConfig {
    pub bds: Option<BdsConfig>,
    pub input_crop: Option<CropConfig>,
    pub black_level: Option<BlackLevelConfig>,
    pub white_balance: Option<WhiteBalanceConfig>,
    pub ccm: Option<CcmConfig>,
    pub gamma: Option<GammaConfig>,
    pub shading: Option<ShadingConfig>,
    pub ae_grid: Option<AeGridConfig>,
}

impl AicConfig {
    pub fn is_empty(&self) -> bool {
        *self == AicConfig::default()
    }
}
