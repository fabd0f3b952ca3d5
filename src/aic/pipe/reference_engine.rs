//! Deterministic reference mapping from runtime parameters to ISP blocks.
//!
//! Used when no vendor imaging library is available. Every block is a
//! direct function of the runtime parameters, with no tuning from the
//! calibration data beyond checking it was supplied.

use tracing::{debug, info};

use crate::aic::common::binary_data::BinaryData;
use crate::aic::common::error::{AicError, Result};
use crate::aic::params::types::{AE_MAX_CELLS, GAMMA_LUT_ENTRIES, SHD_MAX_CELLS};
use crate::aic::pipe::engine::AicEngine;
use crate::aic::pipe::types::{
    AeGridConfig, AicConfig, BdsConfig, BlackLevelConfig, CcmConfig, CropConfig, GammaConfig,
    ShadingConfig, WhiteBalanceConfig,
};
use crate::aic::runtime::RuntimeParams;

const ENGINE_VERSION: &str = concat!("reference-", env!("CARGO_PKG_VERSION"));

/// AE blocks are between 8 and 128 pixels wide.
const AE_BLOCK_LOG2_MIN: u8 = 3;
const AE_BLOCK_LOG2_MAX: u8 = 7;

#[derive(Debug, Default)]
pub struct ReferenceEngine {
    calibration_size: Option<usize>,
}

impl ReferenceEngine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_initialised(&self) -> bool {
        self.calibration_size.is_some()
    }
}

impl AicEngine for ReferenceEngine {
    fn init(&mut self, calibration: &BinaryData) -> Result<()> {
        if calibration.is_empty() {
            return Err(AicError::InitializationError(
                "calibration data is empty".to_string(),
            ));
        }
        self.calibration_size = Some(calibration.size());
        info!(size = calibration.size(), "Reference engine initialised");
        Ok(())
    }

    fn compute_config(
        &mut self,
        params: &RuntimeParams<'_, '_>,
        config: &mut AicConfig,
    ) -> Result<()> {
        if !self.is_initialised() {
            return Err(AicError::EncodeError("engine not initialised".to_string()));
        }

        config.bds = Some(bds_config(params));
        config.input_crop = Some(input_crop(params));
        config.black_level = Some(black_level(params));
        config.white_balance = Some(white_balance(params));
        config.ccm = Some(ccm(params));
        config.gamma = Some(gamma(params)?);
        config.shading = shading(params)?;
        config.ae_grid = Some(ae_grid(params)?);

        debug!(
            shading = config.shading.is_some(),
            "Reference engine produced config"
        );
        Ok(())
    }

    fn version(&self) -> String {
        ENGINE_VERSION.to_string()
    }
}

fn bds_config(params: &RuntimeParams<'_, '_>) -> BdsConfig {
    let res = &params.state.resolution;
    BdsConfig {
        input_width: res.bds_in_width,
        input_height: res.bds_in_height,
        output_width: res.bds_out_width,
        output_height: res.bds_out_height,
        horizontal_padding: res.bds_horizontal_padding,
    }
}

fn input_crop(params: &RuntimeParams<'_, '_>) -> CropConfig {
    let sensor = &params.state.input_frame.sensor_frame_params;
    let res = &params.state.resolution;

    // States built by hand skip SensorFrameParameters::validate; a zero
    // denominator is read as unscaled.
    let scale = |value: u32, num: u16, den: u16| -> u32 {
        if den == 0 {
            return value;
        }
        (u64::from(value) * u64::from(num) / u64::from(den)) as u32
    };

    CropConfig {
        x: scale(
            sensor.horizontal_crop_offset,
            sensor.horizontal_scaling_numerator,
            sensor.horizontal_scaling_denominator,
        )
        .saturating_add(res.horizontal_if_crop),
        y: scale(
            sensor.vertical_crop_offset,
            sensor.vertical_scaling_numerator,
            sensor.vertical_scaling_denominator,
        )
        .saturating_add(res.vertical_if_crop),
        width: res.bds_in_width,
        height: res.bds_in_height,
    }
}

fn black_level(params: &RuntimeParams<'_, '_>) -> BlackLevelConfig {
    let level = params.results.pa.black_level;
    BlackLevelConfig {
        r: level.r,
        gr: level.gr,
        gb: level.gb,
        b: level.b,
    }
}

fn white_balance(params: &RuntimeParams<'_, '_>) -> WhiteBalanceConfig {
    let digital_gain = params.results.exposure.digital_gain.max(0.0);
    let gains = params.results.pa.color_gains;

    if !gains.is_zero() {
        return WhiteBalanceConfig {
            r: gains.r * digital_gain,
            gr: gains.gr * digital_gain,
            gb: gains.gb * digital_gain,
            b: gains.b * digital_gain,
        };
    }

    // PA did not run; fall back on the AWB ratios.
    let awb = params.results.awb;
    let inverse = |ratio: f32| if ratio > 0.0 { 1.0 / ratio } else { 1.0 };
    WhiteBalanceConfig {
        r: inverse(awb.final_r_per_g) * digital_gain,
        gr: digital_gain,
        gb: digital_gain,
        b: inverse(awb.final_b_per_g) * digital_gain,
    }
}

fn ccm(params: &RuntimeParams<'_, '_>) -> CcmConfig {
    CcmConfig {
        matrix: params.results.pa.color_conversion_matrix,
        offsets: [0.0; 3],
    }
}

/// Resample the green gamma curve to the hardware LUT size.
fn gamma(params: &RuntimeParams<'_, '_>) -> Result<GammaConfig> {
    let source = &params.results.gbce.g_gamma_lut;
    if source.is_empty() {
        return Err(AicError::EncodeError("GBCE gamma LUT is empty".to_string()));
    }

    let last = (source.len() - 1) as f32;
    let lut = (0..GAMMA_LUT_ENTRIES)
        .map(|i| {
            let pos = i as f32 * last / (GAMMA_LUT_ENTRIES - 1) as f32;
            let lo = pos.floor() as usize;
            let hi = (lo + 1).min(source.len() - 1);
            let frac = pos - lo as f32;
            (source[lo] + (source[hi] - source[lo]) * frac).clamp(0.0, 1.0)
        })
        .collect();

    Ok(GammaConfig { lut })
}

fn shading(params: &RuntimeParams<'_, '_>) -> Result<Option<ShadingConfig>> {
    let sa = params.results.sa;
    if !sa.has_grid() {
        return Ok(None);
    }

    let cells = sa.width as usize * sa.height as usize;
    let (grid_width, grid_height) = match (u8::try_from(sa.width), u8::try_from(sa.height)) {
        (Ok(w), Ok(h)) if cells <= SHD_MAX_CELLS => (w, h),
        _ => {
            return Err(AicError::EncodeError(format!(
                "shading grid {}x{} exceeds hardware limits",
                sa.width, sa.height
            )));
        }
    };

    let res = &params.state.resolution;
    let unit = f32::from(1u16 << sa.fraction_bits.min(15));
    let normalise = |channel: &[u16]| -> Vec<f32> {
        channel.iter().map(|&v| f32::from(v) / unit).collect()
    };

    Ok(Some(ShadingConfig {
        grid_width,
        grid_height,
        block_width_log2: log2_ceil(res.bds_in_width.div_ceil(u32::from(grid_width))),
        block_height_log2: log2_ceil(res.bds_in_height.div_ceil(u32::from(grid_height))),
        gains_r: normalise(&sa.channel_r),
        gains_gr: normalise(&sa.channel_gr),
        gains_gb: normalise(&sa.channel_gb),
        gains_b: normalise(&sa.channel_b),
    }))
}

fn ae_grid(params: &RuntimeParams<'_, '_>) -> Result<AeGridConfig> {
    let grid = params.results.weight_grid;
    let cells = grid.cell_count();

    let (width, height) = match (u8::try_from(grid.width), u8::try_from(grid.height)) {
        (Ok(w), Ok(h)) if cells > 0 && cells <= AE_MAX_CELLS && grid.weights.len() == cells => {
            (w, h)
        }
        _ => {
            return Err(AicError::EncodeError(format!(
                "invalid AE weight grid {}x{} ({} weights)",
                grid.width,
                grid.height,
                grid.weights.len()
            )));
        }
    };

    let res = &params.state.resolution;
    let block_log2 = |extent: u32, cells: u8| -> u8 {
        let block = (extent / u32::from(cells)).max(1);
        log2_floor(block).clamp(AE_BLOCK_LOG2_MIN, AE_BLOCK_LOG2_MAX)
    };

    Ok(AeGridConfig {
        width,
        height,
        block_width_log2: block_log2(res.bds_out_width, width),
        block_height_log2: block_log2(res.bds_out_height, height),
        x_start: 0,
        y_start: 0,
        weights: grid.weights.clone(),
    })
}

fn log2_floor(x: u32) -> u8 {
    if x == 0 { 0 } else { (31 - x.leading_zeros()) as u8 }
}

fn log2_ceil(x: u32) -> u8 {
    if x <= 1 { 0 } else { (32 - (x - 1).leading_zeros()) as u8 }
}
