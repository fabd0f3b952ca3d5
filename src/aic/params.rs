//! IPU3 parameter block module
//!
//! This module describes the fixed-layout parameter buffer consumed by the
//! IPU3 ImgU driver, the encoder that quantises an `AicConfig` into it, and
//! the versioned little-endian layout used to hand it to the driver.

mod encoder;
mod layout;
pub mod types;


pub use encoder::ParameterEncoder;
pub use layout::ParamsVersion;
pub use types::{
    AccParams, AeGridParams, BdsParams, BnrParams, BnrWbGains, CcmParams, GammaParams,
    Ipu3UapiParams, ObGridParams, ShdGrid, ShdParams, UseFlag, UseFlags,
};
