//! In-memory form of the IPU3 parameter block

/// Entries of the gamma correction LUT
pub const GAMMA_LUT_ENTRIES: usize = 256;
/// Largest gamma LUT value (13 bits)
pub const GAMMA_LUT_MAX: u16 = 8191;

pub const AE_WEIGHT_WORDS: usize = 96;
/// AE weights are 4 bits, eight to a word
pub const AE_CELLS_PER_WORD: usize = 8;
pub const AE_MAX_CELLS: usize = AE_WEIGHT_WORDS * AE_CELLS_PER_WORD;

/// Shading cells per Bayer channel
pub const SHD_MAX_CELLS: usize = 768;
pub const SHD_CHANNELS: usize = 4;

pub const USE_FLAG_WORDS: usize = 7;

/// Blocks whose parameters are valid in the buffer. The driver ignores any
/// block whose flag is clear.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum UseFlag {
    Obgrid,
    AccBnr,
    AccCcm,
    AccGamma,
    AccShd,
    AccBds,
    AccAe,
    ObgridParam,
}

impl UseFlag {
    /// (word, bit) of the flag in the flags header
    pub const fn position(self) -> (usize, u32) {
        match self {
            UseFlag::Obgrid => (0, 1),
            UseFlag::AccBnr => (1, 0),
            UseFlag::AccCcm => (1, 3),
            UseFlag::AccGamma => (1, 4),
            UseFlag::AccShd => (1, 7),
            UseFlag::AccBds => (1, 20),
            UseFlag::AccAe => (1, 23),
            UseFlag::ObgridParam => (2, 6),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct UseFlags {
    pub words: [u32; USE_FLAG_WORDS],
}

impl UseFlags {
    pub fn set(&mut self, flag: UseFlag) {
        let (word, bit) = flag.position();
        self.words[word] |= 1 << bit;
    }

    pub fn is_set(&self, flag: UseFlag) -> bool {
        let (word, bit) = flag.position();
        self.words[word] & (1 << bit) != 0
    }
}

/// Bayer down-scaler. Factors are input/output ratios in 1/32 steps.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BdsParams {
    pub hor_ds_en: u8,
    pub ver_ds_en: u8,
    pub padding: u16,
    pub hor_factor: u16,
    pub ver_factor: u16,
    pub in_width: u16,
    pub in_height: u16,
    pub out_width: u16,
    pub out_height: u16,
    pub crop_x: u16,
    pub crop_y: u16,
}

/// White balance gains, U3.13 with an implicit +1.0
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BnrWbGains {
    pub gr: u16,
    pub r: u16,
    pub b: u16,
    pub gb: u16,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BnrParams {
    pub wb_gains: BnrWbGains,
}

/// 3x4 colour matrix, S2.13, rows m11 m12 m13 offset
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CcmParams {
    pub coeff: [i16; 12],
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GammaParams {
    pub enable: u32,
    pub lut: [u16; GAMMA_LUT_ENTRIES],
}

impl Default for GammaParams {
    fn default() -> Self {
        Self {
            enable: 0,
            lut: [0; GAMMA_LUT_ENTRIES],
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ShdGrid {
    pub width: u8,
    pub height: u8,
    pub block_width_log2: u8,
    pub block_height_log2: u8,
}

/// Lens shading gains, channel order gr, r, b, gb; 13 fractional bits
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShdParams {
    pub grid: ShdGrid,
    pub gains: [[u16; SHD_MAX_CELLS]; SHD_CHANNELS],
}

impl Default for ShdParams {
    fn default() -> Self {
        Self {
            grid: ShdGrid::default(),
            gains: [[0; SHD_MAX_CELLS]; SHD_CHANNELS],
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AeGridParams {
    pub width: u8,
    pub height: u8,
    pub block_width_log2: u8,
    pub block_height_log2: u8,
    pub ae_en: u8,
    pub x_start: u16,
    pub y_start: u16,
    pub weights: [u32; AE_WEIGHT_WORDS],
}

impl Default for AeGridParams {
    fn default() -> Self {
        Self {
            width: 0,
            height: 0,
            block_width_log2: 0,
            block_height_log2: 0,
            ae_en: 0,
            x_start: 0,
            y_start: 0,
            weights: [0; AE_WEIGHT_WORDS],
        }
    }
}

impl AeGridParams {
    /// Weight of cell `index`, unpacked from its nibble.
    pub fn weight(&self, index: usize) -> u8 {
        let word = self.weights[index / AE_CELLS_PER_WORD];
        ((word >> (4 * (index % AE_CELLS_PER_WORD))) & 0xf) as u8
    }
}

/// Optical black level subtracted per channel
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ObGridParams {
    pub gr: u16,
    pub r: u16,
    pub b: u16,
    pub gb: u16,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AccParams {
    pub bds: BdsParams,
    pub bnr: BnrParams,
    pub ccm: CcmParams,
    pub gamma: GammaParams,
    pub shd: ShdParams,
    pub ae: AeGridParams,
}

/// The per-frame parameter buffer. Start from `Default` (all zero) and
/// let the encoder fill it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Ipu3UapiParams {
    pub use_flags: UseFlags,
    pub acc: AccParams,
    pub obgrid: ObGridParams,
}
