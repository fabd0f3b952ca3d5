use tracing::{debug, error, info, instrument};

use crate::aic::aiq::AlgorithmResults;
use crate::aic::common::binary_data::BinaryData;
use crate::aic::common::error::{AicError, Result};
use crate::aic::orchestrator::frame::FrameParams;
use crate::aic::orchestrator::types::{AicOptions, AicState, IpaConfigInfo};
use crate::aic::params::{Ipu3UapiParams, ParameterEncoder};
use crate::aic::pipe::{
    AicConfig, AicEngine, IspPipe, PipeLease, PipelineConfigEncoder, ReferenceEngine,
};
use crate::aic::runtime::{AlgorithmResultsView, RuntimeParameterBuilder, RuntimeParameterState};

/// Automatic ISP configuration for one pipe.
///
/// Owns the pipe lease, so at most one `Aic` exists per [`IspPipe`].
pub struct Aic<E: AicEngine> {
    config_encoder: PipelineConfigEncoder<E>,
    builder: RuntimeParameterBuilder,
    encoder: ParameterEncoder,
    options: AicOptions,
    state: AicState,
}

impl Aic<ReferenceEngine> {
    /// Lease `pipe` and initialise it with the reference engine.
    pub fn new(pipe: &IspPipe, calibration: &BinaryData, options: AicOptions) -> Result<Self> {
        let lease = pipe.acquire()?;
        Self::init(lease, ReferenceEngine::new(), calibration, options)
    }
}

impl<E: AicEngine> Aic<E> {
    /// Load `calibration` into `engine` and bind it to the leased pipe.
    ///
    /// On failure no `Aic` exists and the lease is released.
    #[instrument(skip_all, fields(calibration_size = calibration.size()))]
    pub fn init(
        pipe: PipeLease,
        mut engine: E,
        calibration: &BinaryData,
        options: AicOptions,
    ) -> Result<Self> {
        debug!("Initialising AIC");

        if calibration.is_empty() {
            error!("Calibration data is empty");
            return Err(AicError::InitializationError(
                "calibration data is empty".to_string(),
            ));
        }

        engine.init(calibration).map_err(|e| {
            error!("Engine rejected calibration data: {}", e);
            match e {
                AicError::InitializationError(_) => e,
                other => AicError::InitializationError(other.to_string()),
            }
        })?;

        let mut builder = RuntimeParameterBuilder::new();
        builder.set_frame_use(options.frame_use);
        builder.set_mode(options.mode);

        info!(
            version = %engine.version(),
            mode = ?options.mode,
            mode_index = options.mode.index(),
            params = %options.params_version,
            "AIC initialised"
        );

        Ok(Self {
            config_encoder: PipelineConfigEncoder::new(engine, pipe, options.dump_config),
            builder,
            encoder: ParameterEncoder::new(options.params_version),
            options,
            state: AicState::Initialized,
        })
    }

    /// Set the stream geometry. May be repeated at any time, e.g. on a
    /// sensor mode switch; each call fully replaces the previous geometry.
    /// A rejected geometry leaves the AIC unconfigured.
    #[instrument(skip_all)]
    pub fn configure(&mut self, config_info: &IpaConfigInfo) -> Result<()> {
        let sensor = &config_info.sensor_info;
        debug!(
            bds = %config_info.bds_output_size,
            if_size = %config_info.iif,
            crop_region = %sensor.analog_crop.size(),
            sensor_output = %sensor.output_size,
            "Configuring AIC"
        );

        let result = self.builder.set_geometry(
            sensor.analog_crop.size(),
            config_info.iif,
            config_info.bds_output_size,
            sensor.output_size,
        );

        if let Err(e) = result {
            error!("AIC configuration rejected: {}", e);
            self.builder.reset();
            self.builder.set_frame_use(self.options.frame_use);
            self.builder.set_mode(self.options.mode);
            self.config_encoder.clear();
            self.state = AicState::Initialized;
            return Err(e);
        }

        self.config_encoder.clear();
        self.state = AicState::Configured;
        info!("AIC configured");
        Ok(())
    }

    /// Bind this frame's 3A results. Nothing is encoded until
    /// [`FrameParams::run`] is called on the returned binding.
    pub fn update_runtime_params<'a, 'r, R: AlgorithmResults + ?Sized>(
        &'a mut self,
        results: &'r R,
    ) -> Result<FrameParams<'a, 'r, E>> {
        let view = AlgorithmResultsView::from_results(results)?;
        debug!(
            exposure_us = view.exposure.exposure_time_us,
            analog_gain = view.exposure.analog_gain,
            cct = view.awb.cct_estimate,
            "Runtime params updated"
        );
        Ok(FrameParams::new(self, view))
    }

    pub(crate) fn run_frame(
        &mut self,
        results: &AlgorithmResultsView<'_>,
        params: &mut Ipu3UapiParams,
    ) -> Result<()> {
        let frame = match self.state {
            AicState::Initialized => {
                error!("AIC run before configure");
                return Err(AicError::NotConfigured);
            }
            AicState::Configured => 1,
            AicState::Running { frame } => frame + 1,
        };

        let _span = tracing::info_span!("aic_run", frame).entered();
        let runtime = self.builder.with_results(*results);

        let config = {
            let _span = tracing::info_span!("compute_config").entered();
            self.config_encoder.encode(&runtime)?
        };

        {
            let _span = tracing::info_span!("encode_params").entered();
            self.encoder.encode(config, params)?;
        }

        self.state = AicState::Running { frame };
        debug!("AIC run complete");
        Ok(())
    }

    /// Drop per-frame state. Geometry and calibration are kept.
    pub fn reset(&mut self) {
        self.config_encoder.clear();
        if let AicState::Running { .. } = self.state {
            self.state = AicState::Configured;
        }
        debug!(state = ?self.state, "AIC reset");
    }

    pub fn version(&self) -> String {
        self.config_encoder.engine().version()
    }

    /// Config computed by the most recent run, empty if that computation
    /// failed or nothing has run since the last configure/reset.
    pub fn aic_config(&self) -> &AicConfig {
        self.config_encoder.last_config()
    }

    pub fn state(&self) -> AicState {
        self.state
    }

    pub fn runtime_state(&self) -> &RuntimeParameterState {
        self.builder.state()
    }

    pub fn options(&self) -> &AicOptions {
        &self.options
    }

    pub fn engine(&self) -> &E {
        self.config_encoder.engine()
    }
}
