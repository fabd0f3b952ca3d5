//! IPU3 automatic ISP configuration.
//!
//! Translates sensor geometry and per-frame 3A results into the fixed-layout
//! parameter buffer the IPU3 ImgU consumes, one frame at a time.

pub mod aic;
pub mod logger;
