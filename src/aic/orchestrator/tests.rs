#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicBool, Ordering};
    use std::sync::{Arc, Mutex};

    use crate::aic::aiq::{AiqResults, ColorChannels, ExposureResult, SaResults};
    use crate::aic::common::binary_data::BinaryData;
    use crate::aic::common::error::{AicError, ErrorKind, Result};
    use crate::aic::common::geometry::{Rectangle, Size};
    use crate::aic::orchestrator::pipeline::Aic;
    use crate::aic::orchestrator::types::{AicOptions, AicState, IpaConfigInfo, SensorInfo};
    use crate::aic::params::{Ipu3UapiParams, ParamsVersion, UseFlag};
    use crate::aic::pipe::{AicConfig, AicEngine, IspPipe, ReferenceEngine};
    use crate::aic::runtime::{AicMode, FrameUse, RuntimeParams};

    #[derive(Debug, Clone, PartialEq)]
    struct SeenFrame {
        exposure_time_us: u32,
        bds_out_width: u32,
        frame_use: FrameUse,
    }

    struct MockEngine {
        should_fail_init: bool,
        omit_gamma: Arc<AtomicBool>,
        seen: Arc<Mutex<Vec<SeenFrame>>>,
        inner: ReferenceEngine,
    }

    impl MockEngine {
        fn new() -> Self {
            Self {
                should_fail_init: false,
                omit_gamma: Arc::new(AtomicBool::new(false)),
                seen: Arc::new(Mutex::new(Vec::new())),
                inner: ReferenceEngine::new(),
            }
        }
    }

    impl AicEngine for MockEngine {
        fn init(&mut self, calibration: &BinaryData) -> Result<()> {
            if self.should_fail_init {
                return Err(AicError::EncodeError("Mock CMC parse error".to_string()));
            }
            self.inner.init(calibration)
        }

        fn compute_config(
            &mut self,
            params: &RuntimeParams<'_, '_>,
            config: &mut AicConfig,
        ) -> Result<()> {
            self.seen.lock().unwrap().push(SeenFrame {
                exposure_time_us: params.results.exposure.exposure_time_us,
                bds_out_width: params.state.resolution.bds_out_width,
                frame_use: params.state.frame_use,
            });
            self.inner.compute_config(params, config)?;
            if self.omit_gamma.load(Ordering::SeqCst) {
                config.gamma = None;
            }
            Ok(())
        }

        fn version(&self) -> String {
            "mock".to_string()
        }
    }

    fn calibration() -> BinaryData {
        BinaryData::from_bytes(b"AIQB mock tuning".to_vec())
    }

    fn config_info(bds: Size) -> IpaConfigInfo {
        IpaConfigInfo {
            sensor_info: SensorInfo {
                analog_crop: Rectangle::new(0, 0, 3264, 2448),
                output_size: Size::new(3264, 2448),
            },
            iif: Size::new(3264, 2448),
            bds_output_size: bds,
        }
    }

    fn mock_aic(pipe: &IspPipe) -> Aic<MockEngine> {
        Aic::init(
            pipe.acquire().unwrap(),
            MockEngine::new(),
            &calibration(),
            AicOptions::default(),
        )
        .unwrap()
    }

    #[test]
    fn test_options_builder() {
        let options = AicOptions::builder()
            .mode(AicMode::Video)
            .frame_use(FrameUse::Video)
            .dump_config(true)
            .build();

        assert_eq!(options.mode, AicMode::Video);
        assert_eq!(options.frame_use, FrameUse::Video);
        assert!(options.dump_config);
        assert_eq!(options.params_version, ParamsVersion::Ipu3V1);
    }

    #[test]
    fn test_init_with_empty_calibration_fails() {
        let pipe = IspPipe::new();
        let result = Aic::init(
            pipe.acquire().unwrap(),
            MockEngine::new(),
            &BinaryData::default(),
            AicOptions::default(),
        );

        let err = result.err().unwrap();
        assert!(matches!(err, AicError::InitializationError(_)));
        assert_eq!(err.kind(), ErrorKind::Initialization);
        assert!(!pipe.is_busy());
    }

    #[test]
    fn test_init_engine_rejection_is_initialization_error() {
        let pipe = IspPipe::new();
        let engine = MockEngine {
            should_fail_init: true,
            ..MockEngine::new()
        };
        let result = Aic::init(pipe.acquire().unwrap(), engine, &calibration(), AicOptions::default());

        assert!(matches!(result, Err(AicError::InitializationError(_))));
        assert!(!pipe.is_busy());
    }

    #[test]
    fn test_single_instance_per_pipe() {
        let pipe = IspPipe::new();
        let aic = Aic::new(&pipe, &calibration(), AicOptions::default()).unwrap();
        assert_eq!(aic.state(), AicState::Initialized);

        let second = Aic::new(&pipe, &calibration(), AicOptions::default());
        let err = second.err().unwrap();
        assert!(matches!(err, AicError::PipeBusy));
        assert_eq!(err.kind(), ErrorKind::Usage);

        drop(aic);
        assert!(Aic::new(&pipe, &calibration(), AicOptions::default()).is_ok());
    }

    #[test]
    fn test_separate_pipes_are_independent() {
        let first = IspPipe::new();
        let second = IspPipe::new();
        let _a = mock_aic(&first);
        let _b = mock_aic(&second);
        assert!(first.is_busy() && second.is_busy());
    }

    #[test]
    fn test_run_before_configure_fails() {
        let pipe = IspPipe::new();
        let mut aic = mock_aic(&pipe);
        let results = AiqResults::default();
        let mut params = Ipu3UapiParams::default();

        let err = aic
            .update_runtime_params(&results)
            .unwrap()
            .run(&mut params)
            .unwrap_err();

        assert!(matches!(err, AicError::NotConfigured));
        assert_eq!(params, Ipu3UapiParams::default());
        assert_eq!(aic.state(), AicState::Initialized);
        assert!(aic.engine().seen.lock().unwrap().is_empty());
    }

    #[test]
    fn test_configure_is_idempotent() {
        let pipe = IspPipe::new();
        let mut aic = mock_aic(&pipe);

        aic.configure(&config_info(Size::new(1920, 1080))).unwrap();
        let first = *aic.runtime_state();
        aic.configure(&config_info(Size::new(1920, 1080))).unwrap();

        assert_eq!(*aic.runtime_state(), first);
        assert_eq!(aic.state(), AicState::Configured);
        assert!(aic.state().is_configured());
    }

    #[test]
    fn test_configure_full_sensor_scenario() {
        let pipe = IspPipe::new();
        let mut aic = mock_aic(&pipe);
        aic.configure(&config_info(Size::new(1920, 1080))).unwrap();

        let state = aic.runtime_state();
        assert_eq!(state.frame_use, FrameUse::Still);
        assert_eq!(state.mode, AicMode::Still);
        assert_eq!(state.output_frame.width, 3264);
        assert_eq!(state.output_frame.height, 2448);
        assert_eq!(state.resolution.horizontal_if_crop, 0);
        assert_eq!(state.resolution.vertical_if_crop, 0);
        // align128(1920) == 1920
        assert_eq!(state.resolution.bds_horizontal_padding, 0);
    }

    #[test]
    fn test_run_is_deterministic() {
        let pipe = IspPipe::new();
        let mut aic = mock_aic(&pipe);
        aic.configure(&config_info(Size::new(1920, 1080))).unwrap();

        let results = AiqResults::default();
        let mut first = Ipu3UapiParams::default();
        let mut second = Ipu3UapiParams::default();
        {
            let mut frame = aic.update_runtime_params(&results).unwrap();
            frame.run(&mut first).unwrap();
            frame.run(&mut second).unwrap();
        }

        assert_eq!(
            first.to_bytes(ParamsVersion::Ipu3V1).unwrap(),
            second.to_bytes(ParamsVersion::Ipu3V1).unwrap()
        );
        assert_eq!(aic.state(), AicState::Running { frame: 2 });
        assert_eq!(aic.engine().seen.lock().unwrap().len(), 2);
    }

    #[test]
    fn test_encoding_error_is_frame_local() {
        let pipe = IspPipe::new();
        let mut aic = mock_aic(&pipe);
        let omit_gamma = Arc::clone(&aic.engine().omit_gamma);
        aic.configure(&config_info(Size::new(1920, 1080))).unwrap();

        let results = AiqResults::default();
        let mut params = Ipu3UapiParams::default();

        omit_gamma.store(true, Ordering::SeqCst);
        let err = aic
            .update_runtime_params(&results)
            .unwrap()
            .run(&mut params)
            .unwrap_err();
        assert!(matches!(err, AicError::MissingBlock("gamma")));
        assert!(err.is_frame_local());
        assert_eq!(params, Ipu3UapiParams::default());
        assert_eq!(aic.state(), AicState::Configured);

        omit_gamma.store(false, Ordering::SeqCst);
        aic.update_runtime_params(&results)
            .unwrap()
            .run(&mut params)
            .unwrap();
        assert!(params.use_flags.is_set(UseFlag::AccGamma));
        assert_eq!(aic.state(), AicState::Running { frame: 1 });
    }

    #[test]
    fn test_rejected_configure_unconfigures() {
        let pipe = IspPipe::new();
        let mut aic = mock_aic(&pipe);
        aic.configure(&config_info(Size::new(1920, 1080))).unwrap();

        let mut bad = config_info(Size::new(1920, 1080));
        bad.iif = Size::new(4000, 3000);
        let err = aic.configure(&bad).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Configuration);
        assert_eq!(aic.state(), AicState::Initialized);
        assert_eq!(aic.runtime_state().frame_use, FrameUse::Still);

        let results = AiqResults::default();
        let mut params = Ipu3UapiParams::default();
        let err = aic
            .update_runtime_params(&results)
            .unwrap()
            .run(&mut params)
            .unwrap_err();
        assert!(matches!(err, AicError::NotConfigured));
    }

    #[test]
    fn test_oversized_geometry_fails_at_configure() {
        let pipe = IspPipe::new();
        let mut aic = mock_aic(&pipe);

        let mut wide = config_info(Size::new(1920, 1080));
        wide.sensor_info.analog_crop = Rectangle::new(0, 0, 70_000, 2448);
        wide.sensor_info.output_size = Size::new(70_000, 2448);
        wide.iif = Size::new(70_000, 2448);

        let err = aic.configure(&wide).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Configuration);
        assert!(!err.is_frame_local());
        assert_eq!(aic.state(), AicState::Initialized);

        let results = AiqResults::default();
        let mut params = Ipu3UapiParams::default();
        let err = aic
            .update_runtime_params(&results)
            .unwrap()
            .run(&mut params)
            .unwrap_err();
        assert!(matches!(err, AicError::NotConfigured));
    }

    #[test]
    fn test_reconfigure_replaces_geometry() {
        let pipe = IspPipe::new();
        let mut aic = mock_aic(&pipe);
        let results = AiqResults::default();
        let mut params = Ipu3UapiParams::default();

        aic.configure(&config_info(Size::new(1920, 1080))).unwrap();
        aic.update_runtime_params(&results).unwrap().run(&mut params).unwrap();

        aic.configure(&config_info(Size::new(1000, 750))).unwrap();
        assert_eq!(aic.state(), AicState::Configured);
        assert!(aic.aic_config().is_empty());
        assert_eq!(aic.runtime_state().resolution.bds_horizontal_padding, 24);

        let mut params = Ipu3UapiParams::default();
        aic.update_runtime_params(&results).unwrap().run(&mut params).unwrap();
        assert_eq!(params.acc.bds.out_width, 1000);
        assert_eq!(params.acc.bds.padding, 24);

        let seen = aic.engine().seen.lock().unwrap();
        assert_eq!(seen[0].bds_out_width, 1920);
        assert_eq!(seen[1].bds_out_width, 1000);
    }

    #[test]
    fn test_reset_keeps_geometry() {
        let pipe = IspPipe::new();
        let mut aic = mock_aic(&pipe);
        aic.reset();
        assert_eq!(aic.state(), AicState::Initialized);

        aic.configure(&config_info(Size::new(1920, 1080))).unwrap();
        let geometry = *aic.runtime_state();
        let results = AiqResults::default();
        let mut params = Ipu3UapiParams::default();
        aic.update_runtime_params(&results).unwrap().run(&mut params).unwrap();
        assert!(!aic.aic_config().is_empty());

        aic.reset();
        assert_eq!(aic.state(), AicState::Configured);
        assert!(aic.aic_config().is_empty());
        assert_eq!(*aic.runtime_state(), geometry);
        assert_eq!(aic.version(), "mock");
    }

    #[test]
    fn test_results_do_not_outlive_their_frame() {
        let pipe = IspPipe::new();
        let mut aic = mock_aic(&pipe);
        aic.configure(&config_info(Size::new(1920, 1080))).unwrap();

        let mut frame_one = AiqResults::default();
        frame_one.ae.exposures[0].exposure_time_us = 1111;
        let mut params = Ipu3UapiParams::default();
        aic.update_runtime_params(&frame_one)
            .unwrap()
            .run(&mut params)
            .unwrap();

        // Poison the first frame's results once its binding is gone.
        frame_one.ae.exposures[0] = ExposureResult {
            exposure_time_us: 0xdead,
            ..ExposureResult::default()
        };
        frame_one.pa.color_gains = ColorChannels::splat(f32::NAN);

        let mut frame_two = AiqResults::default();
        frame_two.ae.exposures[0].exposure_time_us = 2222;
        aic.update_runtime_params(&frame_two)
            .unwrap()
            .run(&mut params)
            .unwrap();

        let seen: Vec<u32> = aic
            .engine()
            .seen
            .lock()
            .unwrap()
            .iter()
            .map(|f| f.exposure_time_us)
            .collect();
        assert_eq!(seen, vec![1111, 2222]);
        assert_eq!(params.acc.bnr.wb_gains.r, 0);
    }

    #[test]
    fn test_reference_engine_end_to_end() {
        let pipe = IspPipe::new();
        let mut aic = Aic::new(&pipe, &calibration(), AicOptions::default()).unwrap();
        aic.configure(&config_info(Size::new(1920, 1080))).unwrap();

        let mut results = AiqResults::default();
        results.ae.exposures[0].digital_gain = 2.0;
        results.pa.color_gains = ColorChannels {
            r: 1.5,
            gr: 1.0,
            gb: 1.0,
            b: 1.25,
        };
        results.pa.black_level = ColorChannels::splat(64.0);
        results.sa = SaResults {
            width: 4,
            height: 3,
            fraction_bits: 10,
            lsc_update: true,
            channel_r: vec![2048; 12],
            channel_gr: vec![1024; 12],
            channel_gb: vec![1024; 12],
            channel_b: vec![1536; 12],
        };

        let mut params = Ipu3UapiParams::default();
        aic.update_runtime_params(&results)
            .unwrap()
            .run(&mut params)
            .unwrap();

        // (gain * digital_gain - 1) * 8192
        assert_eq!(params.acc.bnr.wb_gains.r, 16384);
        assert_eq!(params.acc.bnr.wb_gains.gr, 8192);
        assert_eq!(params.acc.bnr.wb_gains.b, 12288);
        assert_eq!(params.obgrid.r, 64);
        assert!(params.use_flags.is_set(UseFlag::AccShd));
        assert_eq!(params.acc.shd.gains[1][0], 16384);
        assert_eq!(params.acc.ae.width, 16);
        assert_eq!(params.acc.bds.hor_factor, 54);

        let config = aic.aic_config();
        assert!(config.shading.is_some());
        assert_eq!(config.gamma.as_ref().map(|g| g.lut.len()), Some(256));
    }

    #[test]
    fn test_dump_does_not_change_output() {
        let results = AiqResults::default();
        let mut outputs = Vec::new();

        for dump in [false, true] {
            let pipe = IspPipe::new();
            let options = AicOptions::builder().dump_config(dump).build();
            let mut aic = Aic::new(&pipe, &calibration(), options).unwrap();
            aic.configure(&config_info(Size::new(1280, 960))).unwrap();

            let mut params = Ipu3UapiParams::default();
            aic.update_runtime_params(&results)
                .unwrap()
                .run(&mut params)
                .unwrap();
            outputs.push(params.to_bytes(ParamsVersion::Ipu3V1).unwrap());
        }

        assert_eq!(outputs[0], outputs[1]);
    }
}
