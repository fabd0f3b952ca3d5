//! Versioned byte layout of the parameter buffer.
//!
//! Each hardware generation gets its own [`ParamsVersion`]. Adding or
//! removing a field means adding a version, never changing an existing one.
//! All fields are little-endian and packed in declaration order.

use serde::{Deserialize, Serialize};

use crate::aic::common::error::{AicError, Result};
use crate::aic::params::types::{
    AE_WEIGHT_WORDS, GAMMA_LUT_ENTRIES, Ipu3UapiParams, SHD_CHANNELS, SHD_MAX_CELLS,
    USE_FLAG_WORDS,
};

const FLAGS_SIZE: usize = USE_FLAG_WORDS * 4;
const BDS_SIZE: usize = 2 + 2 + 2 * 2 + 6 * 2;
const BNR_SIZE: usize = 4 * 2;
const CCM_SIZE: usize = 12 * 2;
const GAMMA_SIZE: usize = 4 + GAMMA_LUT_ENTRIES * 2;
const SHD_SIZE: usize = 4 + SHD_CHANNELS * SHD_MAX_CELLS * 2;
/// Five grid bytes, one pad byte, two u16 starts, then the weight words
const AE_SIZE: usize = 6 + 2 * 2 + AE_WEIGHT_WORDS * 4;
const OBGRID_SIZE: usize = 4 * 2;

const IPU3_V1_SIZE: usize =
    FLAGS_SIZE + BDS_SIZE + BNR_SIZE + CCM_SIZE + GAMMA_SIZE + SHD_SIZE + AE_SIZE + OBGRID_SIZE;

/// Schema tag of the parameter buffer layout
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ParamsVersion {
    /// IPU3 ImgU, first layout
    #[default]
    Ipu3V1,
}

impl ParamsVersion {
    /// Exact byte size of a serialised buffer
    pub const fn size(self) -> usize {
        match self {
            ParamsVersion::Ipu3V1 => IPU3_V1_SIZE,
        }
    }

    pub const fn name(self) -> &'static str {
        match self {
            ParamsVersion::Ipu3V1 => "ipu3-v1",
        }
    }
}

impl std::fmt::Display for ParamsVersion {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

fn check_len(version: ParamsVersion, len: usize) -> Result<()> {
    if len != version.size() {
        return Err(AicError::LayoutError(format!(
            "{} expects {} bytes, got {}",
            version,
            version.size(),
            len
        )));
    }
    Ok(())
}

struct LeWriter<'a> {
    buf: &'a mut [u8],
    pos: usize,
}

impl LeWriter<'_> {
    fn put(&mut self, bytes: &[u8]) {
        self.buf[self.pos..self.pos + bytes.len()].copy_from_slice(bytes);
        self.pos += bytes.len();
    }

    fn u8(&mut self, v: u8) {
        self.put(&[v]);
    }

    fn u16(&mut self, v: u16) {
        self.put(&v.to_le_bytes());
    }

    fn i16(&mut self, v: i16) {
        self.put(&v.to_le_bytes());
    }

    fn u32(&mut self, v: u32) {
        self.put(&v.to_le_bytes());
    }
}

struct LeReader<'a> {
    buf: &'a [u8],
    pos: usize,
}

impl LeReader<'_> {
    fn take<const N: usize>(&mut self) -> [u8; N] {
        let mut out = [0u8; N];
        out.copy_from_slice(&self.buf[self.pos..self.pos + N]);
        self.pos += N;
        out
    }

    fn u8(&mut self) -> u8 {
        self.take::<1>()[0]
    }

    fn u16(&mut self) -> u16 {
        u16::from_le_bytes(self.take())
    }

    fn i16(&mut self) -> i16 {
        i16::from_le_bytes(self.take())
    }

    fn u32(&mut self) -> u32 {
        u32::from_le_bytes(self.take())
    }
}

impl Ipu3UapiParams {
    /// Serialise into `buf`, which must be exactly `version.size()` bytes.
    pub fn write_to(&self, version: ParamsVersion, buf: &mut [u8]) -> Result<usize> {
        check_len(version, buf.len())?;
        match version {
            ParamsVersion::Ipu3V1 => self.write_v1(buf),
        }
        Ok(version.size())
    }

    pub fn to_bytes(&self, version: ParamsVersion) -> Result<Vec<u8>> {
        let mut buf = vec![0u8; version.size()];
        self.write_to(version, &mut buf)?;
        Ok(buf)
    }

    pub fn read_from(version: ParamsVersion, buf: &[u8]) -> Result<Self> {
        check_len(version, buf.len())?;
        Ok(match version {
            ParamsVersion::Ipu3V1 => Self::read_v1(buf),
        })
    }

    fn write_v1(&self, buf: &mut [u8]) {
        let mut w = LeWriter { buf, pos: 0 };

        for &word in &self.use_flags.words {
            w.u32(word);
        }

        let bds = &self.acc.bds;
        w.u8(bds.hor_ds_en);
        w.u8(bds.ver_ds_en);
        w.u16(bds.padding);
        w.u16(bds.hor_factor);
        w.u16(bds.ver_factor);
        for v in [
            bds.in_width,
            bds.in_height,
            bds.out_width,
            bds.out_height,
            bds.crop_x,
            bds.crop_y,
        ] {
            w.u16(v);
        }

        let wb = &self.acc.bnr.wb_gains;
        for v in [wb.gr, wb.r, wb.b, wb.gb] {
            w.u16(v);
        }

        for &c in &self.acc.ccm.coeff {
            w.i16(c);
        }

        w.u32(self.acc.gamma.enable);
        for &v in &self.acc.gamma.lut {
            w.u16(v);
        }

        let shd = &self.acc.shd;
        w.u8(shd.grid.width);
        w.u8(shd.grid.height);
        w.u8(shd.grid.block_width_log2);
        w.u8(shd.grid.block_height_log2);
        for table in &shd.gains {
            for &v in table {
                w.u16(v);
            }
        }

        let ae = &self.acc.ae;
        w.u8(ae.width);
        w.u8(ae.height);
        w.u8(ae.block_width_log2);
        w.u8(ae.block_height_log2);
        w.u8(ae.ae_en);
        w.u8(0);
        w.u16(ae.x_start);
        w.u16(ae.y_start);
        for &word in &ae.weights {
            w.u32(word);
        }

        let ob = &self.obgrid;
        for v in [ob.gr, ob.r, ob.b, ob.gb] {
            w.u16(v);
        }

        debug_assert_eq!(w.pos, IPU3_V1_SIZE);
    }

    fn read_v1(buf: &[u8]) -> Self {
        let mut r = LeReader { buf, pos: 0 };
        let mut params = Self::default();

        for word in params.use_flags.words.iter_mut() {
            *word = r.u32();
        }

        let bds = &mut params.acc.bds;
        bds.hor_ds_en = r.u8();
        bds.ver_ds_en = r.u8();
        bds.padding = r.u16();
        bds.hor_factor = r.u16();
        bds.ver_factor = r.u16();
        bds.in_width = r.u16();
        bds.in_height = r.u16();
        bds.out_width = r.u16();
        bds.out_height = r.u16();
        bds.crop_x = r.u16();
        bds.crop_y = r.u16();

        let wb = &mut params.acc.bnr.wb_gains;
        wb.gr = r.u16();
        wb.r = r.u16();
        wb.b = r.u16();
        wb.gb = r.u16();

        for c in params.acc.ccm.coeff.iter_mut() {
            *c = r.i16();
        }

        params.acc.gamma.enable = r.u32();
        for v in params.acc.gamma.lut.iter_mut() {
            *v = r.u16();
        }

        let shd = &mut params.acc.shd;
        shd.grid.width = r.u8();
        shd.grid.height = r.u8();
        shd.grid.block_width_log2 = r.u8();
        shd.grid.block_height_log2 = r.u8();
        for table in shd.gains.iter_mut() {
            for v in table.iter_mut() {
                *v = r.u16();
            }
        }

        let ae = &mut params.acc.ae;
        ae.width = r.u8();
        ae.height = r.u8();
        ae.block_width_log2 = r.u8();
        ae.block_height_log2 = r.u8();
        ae.ae_en = r.u8();
        let _pad = r.u8();
        ae.x_start = r.u16();
        ae.y_start = r.u16();
        for word in ae.weights.iter_mut() {
            *word = r.u32();
        }

        let ob = &mut params.obgrid;
        ob.gr = r.u16();
        ob.r = r.u16();
        ob.b = r.u16();
        ob.gb = r.u16();

        debug_assert_eq!(r.pos, IPU3_V1_SIZE);
        params
    }
}
