use tracing::{debug, warn};

use crate::aic::aiq::AlgorithmResults;
use crate::aic::common::error::{AicError, Result};
use crate::aic::common::geometry::{align128, Size, MAX_DIMENSION};
use crate::aic::runtime::types::{
    AicMode, AlgorithmResultsView, FrameUse, InputFrameParameters, OutputFrameParameters,
    ResolutionConfig, RuntimeParameterState, RuntimeParams, SensorFrameParameters,
};

/// Owner of the [`RuntimeParameterState`] for one pipe.
#[derive(Debug, Default)]
pub struct RuntimeParameterBuilder {
    state: RuntimeParameterState,
}

impl RuntimeParameterBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Zero every sub-structure.
    pub fn reset(&mut self) {
        self.state = RuntimeParameterState::default();
    }

    pub fn set_frame_use(&mut self, frame_use: FrameUse) {
        self.state.frame_use = frame_use;
    }

    pub fn set_mode(&mut self, mode: AicMode) {
        self.state.mode = mode;
    }

    /// Derive sensor, output and resolution parameters from the stream
    /// geometry. The state is only written when every check passes.
    pub fn set_geometry(
        &mut self,
        sensor_crop: Size,
        input_filter_size: Size,
        bds_output_size: Size,
        sensor_output_size: Size,
    ) -> Result<()> {
        for (what, size) in [
            ("sensor crop", sensor_crop),
            ("input filter", input_filter_size),
            ("BDS output", bds_output_size),
            ("sensor output", sensor_output_size),
        ] {
            if size.is_empty() || size.exceeds(MAX_DIMENSION) {
                warn!(what, %size, "Rejecting out-of-range geometry");
                return Err(AicError::InvalidDimensions(
                    what.to_string(),
                    size.width,
                    size.height,
                ));
            }
        }

        if !input_filter_size.fits_within(&sensor_output_size) {
            warn!(%input_filter_size, %sensor_output_size, "Input filter exceeds sensor output");
            return Err(AicError::ConfigurationError(format!(
                "input filter {} larger than sensor output {}",
                input_filter_size, sensor_output_size
            )));
        }

        // Width is at most MAX_DIMENSION here, so alignment cannot overflow
        // and the padding is below 128.
        let bds_horizontal_padding = align128(bds_output_size.width)
            .map(|aligned| (aligned - bds_output_size.width) as u16)
            .unwrap_or_default();

        let sensor_frame_params =
            SensorFrameParameters::passthrough(sensor_crop.width, sensor_crop.height);
        sensor_frame_params.validate()?;

        let input_frame = InputFrameParameters {
            sensor_frame_params,
            fix_flip_x: false,
            fix_flip_y: false,
        };

        let output_frame = OutputFrameParameters {
            width: sensor_crop.width,
            height: sensor_crop.height,
        };

        let resolution = ResolutionConfig {
            bds_in_width: input_filter_size.width,
            bds_in_height: input_filter_size.height,
            bds_out_width: bds_output_size.width,
            bds_out_height: bds_output_size.height,
            horizontal_if_crop: (sensor_output_size.width - input_filter_size.width) / 2,
            vertical_if_crop: (sensor_output_size.height - input_filter_size.height) / 2,
            bds_horizontal_padding,
        };

        self.state.input_frame = input_frame;
        self.state.output_frame = output_frame;
        self.state.resolution = resolution;

        debug!(
            bds_in = %input_filter_size,
            bds_out = %bds_output_size,
            if_crop_h = resolution.horizontal_if_crop,
            if_crop_v = resolution.vertical_if_crop,
            padding = resolution.bds_horizontal_padding,
            "Runtime geometry set"
        );

        Ok(())
    }

    /// Bind one frame's results to the current geometry. Nothing is copied;
    /// the returned params borrow both the builder and `results`.
    pub fn set_algorithm_results<'s, 'r, R: AlgorithmResults + ?Sized>(
        &'s self,
        results: &'r R,
    ) -> Result<RuntimeParams<'s, 'r>> {
        let view = AlgorithmResultsView::from_results(results)?;
        Ok(self.with_results(view))
    }

    pub(crate) fn with_results<'s, 'r>(
        &'s self,
        results: AlgorithmResultsView<'r>,
    ) -> RuntimeParams<'s, 'r> {
        RuntimeParams {
            state: &self.state,
            results,
            isp_vamem_type: 0,
        }
    }

    pub fn state(&self) -> &RuntimeParameterState {
        &self.state
    }
}
