//! Common utilities module
//!
//! This module contains the error type, geometry primitives and the
//! calibration blob container shared across the AIC pipeline.

pub mod binary_data;
pub mod error;
pub mod geometry;

pub use binary_data::BinaryData;
pub use error::{AicError, ErrorKind, Result};
pub use geometry::{align128, Rectangle, Size};
