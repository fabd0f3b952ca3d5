//! Opaque binary blob container for calibration (AIQB) data.

use std::path::Path;

use tracing::debug;

use crate::aic::common::error::{AicError, Result};

/// Owned bytes of a tuning file. The AIC never interprets the contents;
/// they are handed to the engine as-is.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BinaryData {
    data: Vec<u8>,
}

impl BinaryData {
    pub fn from_bytes(data: impl Into<Vec<u8>>) -> Self {
        Self { data: data.into() }
    }

    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let data = std::fs::read(path).map_err(|e| {
            AicError::InitializationError(format!("{}: {}", path.display(), e))
        })?;
        debug!(path = %path.display(), size = data.len(), "Loaded binary data");
        Ok(Self { data })
    }

    pub fn data(&self) -> &[u8] {
        &self.data
    }

    pub fn size(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}
