use tracing::{debug, instrument};

use crate::aic::common::error::Result;
use crate::aic::pipe::engine::AicEngine;
use crate::aic::pipe::isp_pipe::PipeLease;
use crate::aic::pipe::types::AicConfig;
use crate::aic::runtime::RuntimeParams;

/// Drives the engine to produce one [`AicConfig`] per frame into the
/// leased pipe slot.
pub struct PipelineConfigEncoder<E: AicEngine> {
    engine: E,
    pipe: PipeLease,
    dump: bool,
}

impl<E: AicEngine> PipelineConfigEncoder<E> {
    pub fn new(engine: E, pipe: PipeLease, dump: bool) -> Self {
        Self { engine, pipe, dump }
    }

    /// Compute the config for `params`. The slot is cleared first, so the
    /// result depends on `params` only; a failed computation leaves it empty.
    #[instrument(skip_all, fields(frame_use = ?params.state.frame_use))]
    pub fn encode(&mut self, params: &RuntimeParams<'_, '_>) -> Result<&AicConfig> {
        let config = self.pipe.config_mut();
        *config = AicConfig::default();
        if let Err(e) = self.engine.compute_config(params, config) {
            *config = AicConfig::default();
            return Err(e);
        }

        if self.dump {
            self.engine.dump(self.pipe.config());
        }
        debug!("AIC config computed");
        Ok(self.pipe.config())
    }

    /// Most recently computed config, empty before the first frame.
    pub fn last_config(&self) -> &AicConfig {
        self.pipe.config()
    }

    pub fn clear(&mut self) {
        *self.pipe.config_mut() = AicConfig::default();
    }

    pub fn engine(&self) -> &E {
        &self.engine
    }
}
