#[cfg(test)]
mod tests {
    use crate::aic::aiq::{AeResults, AiqResults};
    use crate::aic::common::error::AicError;
    use crate::aic::common::geometry::Size;
    use crate::aic::runtime::builder::RuntimeParameterBuilder;
    use crate::aic::runtime::types::{FrameUse, RuntimeParameterState};

    const SENSOR: Size = Size::new(3264, 2448);

    fn configured(iif: Size, bds: Size, sensor_output: Size) -> RuntimeParameterBuilder {
        let mut builder = RuntimeParameterBuilder::new();
        builder.set_geometry(SENSOR, iif, bds, sensor_output).unwrap();
        builder
    }

    #[test]
    fn test_geometry_derivation() {
        let builder = configured(Size::new(3200, 2400), Size::new(1000, 750), SENSOR);
        let state = builder.state();

        let sensor = state.input_frame.sensor_frame_params;
        assert_eq!(sensor.horizontal_crop_offset, 0);
        assert_eq!(sensor.vertical_crop_offset, 0);
        assert_eq!(sensor.cropped_image_width, 3264);
        assert_eq!(sensor.cropped_image_height, 2448);
        assert_eq!(sensor.horizontal_scaling_numerator, 1);
        assert_eq!(sensor.horizontal_scaling_denominator, 1);
        assert_eq!(sensor.vertical_scaling_numerator, 1);
        assert_eq!(sensor.vertical_scaling_denominator, 1);
        assert!(!state.input_frame.fix_flip_x);
        assert!(!state.input_frame.fix_flip_y);

        assert_eq!(state.output_frame.width, 3264);
        assert_eq!(state.output_frame.height, 2448);

        let res = state.resolution;
        assert_eq!((res.bds_in_width, res.bds_in_height), (3200, 2400));
        assert_eq!((res.bds_out_width, res.bds_out_height), (1000, 750));
        assert_eq!(res.horizontal_if_crop, 32);
        assert_eq!(res.vertical_if_crop, 24);
        assert_eq!(res.bds_horizontal_padding, 24);
    }

    #[test]
    fn test_if_crop_rounds_down() {
        let builder = configured(Size::new(3263, 2445), Size::new(1920, 1080), SENSOR);
        assert_eq!(builder.state().resolution.horizontal_if_crop, 0);
        assert_eq!(builder.state().resolution.vertical_if_crop, 1);
    }

    #[test]
    fn test_full_sensor_filter_has_no_if_crop() {
        let builder = configured(SENSOR, Size::new(1920, 1080), SENSOR);
        let res = builder.state().resolution;
        assert_eq!(res.horizontal_if_crop, 0);
        assert_eq!(res.vertical_if_crop, 0);
        // 1920 is 15 * 128
        assert_eq!(res.bds_horizontal_padding, 0);
    }

    #[test]
    fn test_padding_for_unaligned_width() {
        let builder = configured(SENSOR, Size::new(1921, 1080), SENSOR);
        assert_eq!(builder.state().resolution.bds_horizontal_padding, 127);
    }

    #[test]
    fn test_empty_dimensions_rejected() {
        let mut builder = RuntimeParameterBuilder::new();
        let result = builder.set_geometry(SENSOR, SENSOR, Size::new(0, 1080), SENSOR);
        assert!(matches!(
            result,
            Err(AicError::InvalidDimensions(ref what, 0, 1080)) if what == "BDS output"
        ));
        assert_eq!(*builder.state(), RuntimeParameterState::default());
    }

    #[test]
    fn test_bds_width_at_u32_limit_rejected() {
        let mut builder = configured(SENSOR, Size::new(1920, 1080), SENSOR);
        let before = *builder.state();

        let result = builder.set_geometry(SENSOR, SENSOR, Size::new(u32::MAX, 1080), SENSOR);
        assert!(matches!(
            result,
            Err(AicError::InvalidDimensions(ref what, u32::MAX, 1080)) if what == "BDS output"
        ));
        assert_eq!(*builder.state(), before);
    }

    #[test]
    fn test_dimensions_beyond_params_block_rejected() {
        let wide = Size::new(70_000, 2448);
        let mut builder = RuntimeParameterBuilder::new();

        let result = builder.set_geometry(wide, wide, Size::new(1920, 1080), wide);
        assert!(matches!(
            result,
            Err(AicError::InvalidDimensions(ref what, 70_000, 2448)) if what == "sensor crop"
        ));

        let result = builder.set_geometry(SENSOR, SENSOR, Size::new(1920, 65_536), SENSOR);
        assert!(matches!(result, Err(AicError::InvalidDimensions(..))));
        assert_eq!(*builder.state(), RuntimeParameterState::default());
    }

    #[test]
    fn test_largest_block_dimensions_accepted() {
        let max = Size::new(65_535, 65_535);
        let builder = configured(max, max, max);
        let res = builder.state().resolution;
        assert_eq!(res.bds_out_width, 65_535);
        assert_eq!(res.bds_horizontal_padding, 1);
    }

    #[test]
    fn test_filter_larger_than_sensor_output_rejected() {
        let mut builder = configured(SENSOR, Size::new(1920, 1080), SENSOR);
        let before = *builder.state();

        let result = builder.set_geometry(
            SENSOR,
            Size::new(3280, 2448),
            Size::new(1920, 1080),
            SENSOR,
        );
        assert!(matches!(result, Err(AicError::ConfigurationError(_))));
        assert_eq!(*builder.state(), before);
    }

    #[test]
    fn test_set_geometry_is_idempotent() {
        let mut builder = configured(Size::new(3200, 2400), Size::new(1280, 960), SENSOR);
        let first = *builder.state();
        builder
            .set_geometry(SENSOR, Size::new(3200, 2400), Size::new(1280, 960), SENSOR)
            .unwrap();
        assert_eq!(*builder.state(), first);
    }

    #[test]
    fn test_reset_clears_everything() {
        let mut builder = configured(SENSOR, Size::new(1920, 1080), SENSOR);
        builder.set_frame_use(FrameUse::Video);
        builder.reset();
        assert_eq!(*builder.state(), RuntimeParameterState::default());
    }

    #[test]
    fn test_results_are_borrowed_not_copied() {
        let builder = configured(SENSOR, Size::new(1920, 1080), SENSOR);
        let results = AiqResults::default();

        let params = builder.set_algorithm_results(&results).unwrap();
        assert!(std::ptr::eq(params.results.exposure, &results.ae.exposures[0]));
        assert!(std::ptr::eq(params.results.weight_grid, &results.ae.weight_grid));
        assert!(std::ptr::eq(params.results.pa, &results.pa));
        assert!(std::ptr::eq(params.state, builder.state()));
        assert_eq!(params.isp_vamem_type, 0);
    }

    #[test]
    fn test_results_without_exposure_rejected() {
        let builder = configured(SENSOR, Size::new(1920, 1080), SENSOR);
        let results = AiqResults {
            ae: AeResults {
                exposures: Vec::new(),
                ..AeResults::default()
            },
            ..AiqResults::default()
        };
        let result = builder.set_algorithm_results(&results);
        assert!(matches!(result, Err(AicError::EncodeError(_))));
    }
}
