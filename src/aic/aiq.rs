//! 3A algorithm results module
//!
//! The 3A (AE/AWB/AF) decision algorithm is an external component. This
//! module describes the results the AIC consumes from it, behind the
//! [`AlgorithmResults`] accessor trait, plus a plain owned implementation.

pub mod results;

pub use results::{
    AeResults, AiqResults, AlgorithmResults, AwbResults, ColorChannels, ExposureResult,
    GbceResults, PaResults, SaResults, WeightGrid,
};
