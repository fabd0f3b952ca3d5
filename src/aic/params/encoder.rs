use tracing::{debug, trace};

use crate::aic::common::error::{AicError, Result};
use crate::aic::params::layout::ParamsVersion;
use crate::aic::params::types::{
    AE_CELLS_PER_WORD, AE_MAX_CELLS, AE_WEIGHT_WORDS, AeGridParams, BdsParams, BnrWbGains,
    CcmParams, GAMMA_LUT_ENTRIES, GAMMA_LUT_MAX, Ipu3UapiParams, ObGridParams, SHD_MAX_CELLS,
    UseFlag,
};
use crate::aic::pipe::types::{
    AeGridConfig, AicConfig, BdsConfig, BlackLevelConfig, CcmConfig, CropConfig, ShadingConfig,
    WhiteBalanceConfig,
};

/// Fractional bits of colour gains and matrix coefficients
const GAIN_FRACTION_BITS: u32 = 13;
const GAIN_ONE: f32 = (1 << GAIN_FRACTION_BITS) as f32;
/// BDS factors count 1/32 steps
const BDS_FACTOR_ONE: u32 = 32;

/// Quantises an [`AicConfig`] into an [`Ipu3UapiParams`] for one hardware
/// generation. Stateless: the same config always yields the same block.
#[derive(Debug, Clone, Copy, Default)]
pub struct ParameterEncoder {
    version: ParamsVersion,
}

impl ParameterEncoder {
    pub fn new(version: ParamsVersion) -> Self {
        Self { version }
    }

    pub fn version(&self) -> ParamsVersion {
        self.version
    }

    /// Write every block the version requires into `params` and raise its
    /// use flag. Optional blocks missing from `config` leave `params` as the
    /// caller supplied it. On error `params` is not touched.
    pub fn encode(&self, config: &AicConfig, params: &mut Ipu3UapiParams) -> Result<()> {
        match self.version {
            ParamsVersion::Ipu3V1 => encode_v1(config, params),
        }
    }
}

fn encode_v1(config: &AicConfig, params: &mut Ipu3UapiParams) -> Result<()> {
    let bds = config.bds.as_ref().ok_or(AicError::MissingBlock("bds"))?;
    let crop = config
        .input_crop
        .as_ref()
        .ok_or(AicError::MissingBlock("input_crop"))?;
    let black_level = config
        .black_level
        .as_ref()
        .ok_or(AicError::MissingBlock("black_level"))?;
    let wb = config
        .white_balance
        .as_ref()
        .ok_or(AicError::MissingBlock("white_balance"))?;
    let ccm = config.ccm.as_ref().ok_or(AicError::MissingBlock("ccm"))?;
    let gamma = config.gamma.as_ref().ok_or(AicError::MissingBlock("gamma"))?;
    let ae = config
        .ae_grid
        .as_ref()
        .ok_or(AicError::MissingBlock("ae_grid"))?;

    let bds_params = bds_params(bds, crop)?;
    if gamma.lut.len() != GAMMA_LUT_ENTRIES {
        return Err(AicError::EncodeError(format!(
            "gamma LUT has {} entries, expected {}",
            gamma.lut.len(),
            GAMMA_LUT_ENTRIES
        )));
    }
    check_ae_grid(ae)?;
    if let Some(shading) = &config.shading {
        check_shading(shading)?;
    }

    params.acc.bds = bds_params;
    params.use_flags.set(UseFlag::AccBds);

    params.obgrid = obgrid_params(black_level);
    params.use_flags.set(UseFlag::Obgrid);
    params.use_flags.set(UseFlag::ObgridParam);

    params.acc.bnr.wb_gains = wb_gains(wb);
    params.use_flags.set(UseFlag::AccBnr);

    params.acc.ccm = ccm_params(ccm);
    params.use_flags.set(UseFlag::AccCcm);

    params.acc.gamma.enable = 1;
    for (dst, &src) in params.acc.gamma.lut.iter_mut().zip(&gamma.lut) {
        *dst = (src.clamp(0.0, 1.0) * f32::from(GAMMA_LUT_MAX)).round() as u16;
    }
    params.use_flags.set(UseFlag::AccGamma);

    write_ae_grid(ae, &mut params.acc.ae);
    params.use_flags.set(UseFlag::AccAe);

    if let Some(shading) = &config.shading {
        write_shading(shading, params);
        params.use_flags.set(UseFlag::AccShd);
    } else {
        trace!("No shading block, leaving caller defaults");
    }

    debug!(
        flags = ?params.use_flags.words,
        "Encoded IPU3 parameters"
    );
    Ok(())
}

fn to_u16(what: &str, value: u32) -> Result<u16> {
    u16::try_from(value)
        .map_err(|_| AicError::EncodeError(format!("{} {} does not fit the BDS block", what, value)))
}

fn bds_factor(input: u32, output: u32) -> Result<u16> {
    if output == 0 {
        return Err(AicError::EncodeError("BDS output dimension is zero".to_string()));
    }
    let factor = (u64::from(input) * u64::from(BDS_FACTOR_ONE) + u64::from(output) / 2)
        / u64::from(output);
    u16::try_from(factor)
        .map_err(|_| AicError::EncodeError(format!("BDS factor {} out of range", factor)))
}

fn bds_params(bds: &BdsConfig, crop: &CropConfig) -> Result<BdsParams> {
    let hor_factor = bds_factor(bds.input_width, bds.output_width)?;
    let ver_factor = bds_factor(bds.input_height, bds.output_height)?;

    Ok(BdsParams {
        hor_ds_en: u8::from(u32::from(hor_factor) != BDS_FACTOR_ONE),
        ver_ds_en: u8::from(u32::from(ver_factor) != BDS_FACTOR_ONE),
        padding: bds.horizontal_padding,
        hor_factor,
        ver_factor,
        in_width: to_u16("input width", bds.input_width)?,
        in_height: to_u16("input height", bds.input_height)?,
        out_width: to_u16("output width", bds.output_width)?,
        out_height: to_u16("output height", bds.output_height)?,
        crop_x: to_u16("crop x", crop.x)?,
        crop_y: to_u16("crop y", crop.y)?,
    })
}

fn obgrid_params(level: &BlackLevelConfig) -> ObGridParams {
    let quantise = |v: f32| v.round().clamp(0.0, f32::from(u16::MAX)) as u16;
    ObGridParams {
        gr: quantise(level.gr),
        r: quantise(level.r),
        b: quantise(level.b),
        gb: quantise(level.gb),
    }
}

/// The hardware adds 1.0 to every gain, so gains below unity clamp to 0.
fn wb_gain(gain: f32) -> u16 {
    ((gain - 1.0) * GAIN_ONE).round().clamp(0.0, f32::from(u16::MAX)) as u16
}

fn wb_gains(wb: &WhiteBalanceConfig) -> BnrWbGains {
    BnrWbGains {
        gr: wb_gain(wb.gr),
        r: wb_gain(wb.r),
        b: wb_gain(wb.b),
        gb: wb_gain(wb.gb),
    }
}

fn ccm_coeff(value: f32) -> i16 {
    (value * GAIN_ONE)
        .round()
        .clamp(f32::from(i16::MIN), f32::from(i16::MAX)) as i16
}

fn ccm_params(ccm: &CcmConfig) -> CcmParams {
    let mut coeff = [0i16; 12];
    for (row, chunk) in coeff.chunks_exact_mut(4).enumerate() {
        chunk[0] = ccm_coeff(ccm.matrix[row][0]);
        chunk[1] = ccm_coeff(ccm.matrix[row][1]);
        chunk[2] = ccm_coeff(ccm.matrix[row][2]);
        chunk[3] = ccm.offsets[row]
            .round()
            .clamp(f32::from(i16::MIN), f32::from(i16::MAX)) as i16;
    }
    CcmParams { coeff }
}

fn check_ae_grid(ae: &AeGridConfig) -> Result<()> {
    let cells = usize::from(ae.width) * usize::from(ae.height);
    if cells == 0 || cells > AE_MAX_CELLS || ae.weights.len() != cells {
        return Err(AicError::EncodeError(format!(
            "AE grid {}x{} with {} weights does not fit {} cells",
            ae.width,
            ae.height,
            ae.weights.len(),
            AE_MAX_CELLS
        )));
    }
    Ok(())
}

fn write_ae_grid(ae: &AeGridConfig, out: &mut AeGridParams) {
    out.width = ae.width;
    out.height = ae.height;
    out.block_width_log2 = ae.block_width_log2;
    out.block_height_log2 = ae.block_height_log2;
    out.ae_en = 1;
    out.x_start = ae.x_start;
    out.y_start = ae.y_start;

    out.weights = [0; AE_WEIGHT_WORDS];
    for (index, &weight) in ae.weights.iter().enumerate() {
        let shift = 4 * (index % AE_CELLS_PER_WORD);
        out.weights[index / AE_CELLS_PER_WORD] |= u32::from(weight.min(0xf)) << shift;
    }
}

fn check_shading(shading: &ShadingConfig) -> Result<()> {
    let cells = usize::from(shading.grid_width) * usize::from(shading.grid_height);
    let channels = [
        &shading.gains_gr,
        &shading.gains_r,
        &shading.gains_b,
        &shading.gains_gb,
    ];
    if cells == 0 || cells > SHD_MAX_CELLS || channels.iter().any(|c| c.len() != cells) {
        return Err(AicError::EncodeError(format!(
            "shading grid {}x{} inconsistent with its gain tables",
            shading.grid_width, shading.grid_height
        )));
    }
    Ok(())
}

fn write_shading(shading: &ShadingConfig, params: &mut Ipu3UapiParams) {
    let shd = &mut params.acc.shd;
    shd.grid.width = shading.grid_width;
    shd.grid.height = shading.grid_height;
    shd.grid.block_width_log2 = shading.block_width_log2;
    shd.grid.block_height_log2 = shading.block_height_log2;

    let channels = [
        &shading.gains_gr,
        &shading.gains_r,
        &shading.gains_b,
        &shading.gains_gb,
    ];
    for (table, gains) in shd.gains.iter_mut().zip(channels) {
        table.fill(0);
        for (dst, &gain) in table.iter_mut().zip(gains.iter()) {
            *dst = (gain * GAIN_ONE).round().clamp(0.0, f32::from(u16::MAX)) as u16;
        }
    }
}
