use tracing::{debug, warn};

use crate::aic::common::binary_data::BinaryData;
use crate::aic::common::error::Result;
use crate::aic::pipe::types::AicConfig;
use crate::aic::runtime::RuntimeParams;

/// Capability interface of the imaging library that maps runtime
/// parameters to ISP block settings.
///
/// Implementations must derive the config from `params` alone: no state
/// may carry over from one `compute_config` call to the next.
pub trait AicEngine {
    /// Load tuning data. Called once, before any other method.
    fn init(&mut self, calibration: &BinaryData) -> Result<()>;

    /// Fill `config` for one frame. `config` arrives cleared.
    fn compute_config(&mut self, params: &RuntimeParams<'_, '_>, config: &mut AicConfig)
        -> Result<()>;

    /// Emit a diagnostic dump of `config`.
    fn dump(&self, config: &AicConfig) {
        match serde_json::to_string(config) {
            Ok(json) => debug!(config = %json, "AIC config"),
            Err(e) => warn!("Failed to serialise AIC config: {}", e),
        }
    }

    fn version(&self) -> String;
}
