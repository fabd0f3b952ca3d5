//! Exclusive ownership of the ISP configuration pipe.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use tracing::{debug, warn};

use crate::aic::common::error::{AicError, Result};
use crate::aic::pipe::types::AicConfig;

/// Handle to one hardware pipe. Cloning shares the same pipe.
///
/// Only one [`PipeLease`] can exist per pipe at any time; that lease is
/// what an `Aic` is built from.
#[derive(Debug, Clone, Default)]
pub struct IspPipe {
    busy: Arc<AtomicBool>,
}

impl IspPipe {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn acquire(&self) -> Result<PipeLease> {
        if self
            .busy
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .is_err()
        {
            warn!("ISP pipe already leased");
            return Err(AicError::PipeBusy);
        }
        debug!("ISP pipe leased");
        Ok(PipeLease {
            busy: Arc::clone(&self.busy),
            config: AicConfig::default(),
        })
    }

    pub fn is_busy(&self) -> bool {
        self.busy.load(Ordering::Acquire)
    }
}

/// Exclusive lease on an [`IspPipe`], holding the pipe's config slot.
/// Dropping the lease frees the pipe.
#[derive(Debug)]
pub struct PipeLease {
    busy: Arc<AtomicBool>,
    config: AicConfig,
}

impl PipeLease {
    pub fn config(&self) -> &AicConfig {
        &self.config
    }

    pub(crate) fn config_mut(&mut self) -> &mut AicConfig {
        &mut self.config
    }
}

impl Drop for PipeLease {
    fn drop(&mut self) {
        self.busy.store(false, Ordering::Release);
        debug!("ISP pipe released");
    }
}
