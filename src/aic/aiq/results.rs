//! Result types produced by the 3A library for a single frame

use serde::{Deserialize, Serialize};

/// Default dimension of the AE weight grid handed out by the neutral results.
const DEFAULT_WEIGHT_GRID_DIM: u16 = 16;

/// Number of entries in the neutral gamma curve.
const DEFAULT_GAMMA_LUT_SIZE: usize = 1024;

/// Accessors onto the results of one 3A iteration.
///
/// Implementors own the data; the AIC only ever borrows it for the duration
/// of one frame.
pub trait AlgorithmResults {
    fn ae(&self) -> &AeResults;
    fn awb(&self) -> &AwbResults;
    fn gbce(&self) -> &GbceResults;
    fn pa(&self) -> &PaResults;
    fn sa(&self) -> &SaResults;
}

/// One exposure decision for the sensor
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ExposureResult {
    pub exposure_time_us: u32,
    pub analog_gain: f32,
    /// Gain the ISP must apply on top of the sensor gain
    pub digital_gain: f32,
    pub iso: u32,
    pub total_target_exposure: u32,
}

impl Default for ExposureResult {
    fn default() -> Self {
        Self {
            exposure_time_us: 10_000,
            analog_gain: 1.0,
            digital_gain: 1.0,
            iso: 100,
            total_target_exposure: 10_000,
        }
    }
}

/// Per-cell metering weights, row-major, 4 significant bits per cell.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WeightGrid {
    pub width: u16,
    pub height: u16,
    pub weights: Vec<u8>,
}

impl WeightGrid {
    pub fn uniform(width: u16, height: u16, weight: u8) -> Self {
        Self {
            width,
            height,
            weights: vec![weight; width as usize * height as usize],
        }
    }

    pub fn cell_count(&self) -> usize {
        self.width as usize * self.height as usize
    }
}

impl Default for WeightGrid {
    fn default() -> Self {
        Self::uniform(DEFAULT_WEIGHT_GRID_DIM, DEFAULT_WEIGHT_GRID_DIM, 1)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AeResults {
    /// One entry per exposure plane; only the first is used for ISP setup.
    pub exposures: Vec<ExposureResult>,
    pub weight_grid: WeightGrid,
}

impl AeResults {
    pub fn exposure(&self) -> Option<&ExposureResult> {
        self.exposures.first()
    }
}

impl Default for AeResults {
    fn default() -> Self {
        Self {
            exposures: vec![ExposureResult::default()],
            weight_grid: WeightGrid::default(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AwbResults {
    pub accurate_r_per_g: f32,
    pub accurate_b_per_g: f32,
    pub final_r_per_g: f32,
    pub final_b_per_g: f32,
    pub cct_estimate: u32,
    pub distance_from_convergence: f32,
}

impl Default for AwbResults {
    fn default() -> Self {
        Self {
            accurate_r_per_g: 1.0,
            accurate_b_per_g: 1.0,
            final_r_per_g: 1.0,
            final_b_per_g: 1.0,
            cct_estimate: 5000,
            distance_from_convergence: 0.0,
        }
    }
}

/// Gamma and tone curves; values normalised to [0.0, 1.0].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GbceResults {
    pub r_gamma_lut: Vec<f32>,
    pub g_gamma_lut: Vec<f32>,
    pub b_gamma_lut: Vec<f32>,
    pub tone_map_lut: Vec<f32>,
}

impl GbceResults {
    /// Identity curve with `size` entries on every channel.
    pub fn linear(size: usize) -> Self {
        let step = if size > 1 { 1.0 / (size - 1) as f32 } else { 0.0 };
        let lut: Vec<f32> = (0..size).map(|i| i as f32 * step).collect();
        Self {
            r_gamma_lut: lut.clone(),
            g_gamma_lut: lut.clone(),
            b_gamma_lut: lut,
            tone_map_lut: Vec::new(),
        }
    }
}

impl Default for GbceResults {
    fn default() -> Self {
        Self::linear(DEFAULT_GAMMA_LUT_SIZE)
    }
}

/// Four Bayer channel values.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct ColorChannels {
    pub r: f32,
    pub gr: f32,
    pub gb: f32,
    pub b: f32,
}

impl ColorChannels {
    pub const fn splat(value: f32) -> Self {
        Self {
            r: value,
            gr: value,
            gb: value,
            b: value,
        }
    }

    pub fn is_zero(&self) -> bool {
        self.r == 0.0 && self.gr == 0.0 && self.gb == 0.0 && self.b == 0.0
    }
}

/// Parameter adapter output: colour pipeline settings derived from AWB.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PaResults {
    pub color_conversion_matrix: [[f32; 3]; 3],
    /// Black level in sensor pixel units
    pub black_level: ColorChannels,
    /// White balance gains; all-zero means "not computed"
    pub color_gains: ColorChannels,
    pub saturation_factor: f32,
    pub brightness_level: f32,
}

impl Default for PaResults {
    fn default() -> Self {
        Self {
            color_conversion_matrix: [[1.0, 0.0, 0.0], [0.0, 1.0, 0.0], [0.0, 0.0, 1.0]],
            black_level: ColorChannels::splat(0.0),
            color_gains: ColorChannels::splat(1.0),
            saturation_factor: 1.0,
            brightness_level: 0.0,
        }
    }
}

/// Shading adapter output: lens shading gain grid per Bayer channel.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SaResults {
    pub width: u16,
    pub height: u16,
    /// Fractional bits of the gains below
    pub fraction_bits: u8,
    pub lsc_update: bool,
    pub channel_r: Vec<u16>,
    pub channel_gr: Vec<u16>,
    pub channel_gb: Vec<u16>,
    pub channel_b: Vec<u16>,
}

impl SaResults {
    pub fn has_grid(&self) -> bool {
        let cells = self.width as usize * self.height as usize;
        cells > 0
            && [&self.channel_r, &self.channel_gr, &self.channel_gb, &self.channel_b]
                .iter()
                .all(|c| c.len() == cells)
    }
}

/// Owned result set, the usual carrier between the 3A and the AIC.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AiqResults {
    pub ae: AeResults,
    pub awb: AwbResults,
    pub gbce: GbceResults,
    pub pa: PaResults,
    pub sa: SaResults,
}

impl AlgorithmResults for AiqResults {
    fn ae(&self) -> &AeResults {
        &self.ae
    }

    fn awb(&self) -> &AwbResults {
        &self.awb
    }

    fn gbce(&self) -> &GbceResults {
        &self.gbce
    }

    fn pa(&self) -> &PaResults {
        &self.pa
    }

    fn sa(&self) -> &SaResults {
        &self.sa
    }
}
