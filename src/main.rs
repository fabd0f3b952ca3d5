use anyhow::Context;
use ipu3_aic::aic::{
    Aic, AicMode, AicOptions, AiqResults, BinaryData, FrameUse, IpaConfigInfo, Ipu3UapiParams,
    IspPipe, Rectangle, SensorInfo, Size,
};
use ipu3_aic::logger;

use tracing::{error, info};

fn main() -> anyhow::Result<()> {
    logger::init();

    info!("Starting ipu3_aic...");

    let options = AicOptions::builder()
        .mode(AicMode::Still)
        .frame_use(FrameUse::Still)
        .dump_config(true)
        .build();
    let version = options.params_version;

    let calibration =
        BinaryData::load("calibration.aiqb").context("loading calibration.aiqb")?;

    let pipe = IspPipe::new();
    let mut aic = Aic::new(&pipe, &calibration, options)?;
    info!("AIC initialised, engine {}", aic.version());

    aic.configure(&IpaConfigInfo {
        sensor_info: SensorInfo {
            analog_crop: Rectangle::new(0, 0, 3264, 2448),
            output_size: Size::new(3264, 2448),
        },
        iif: Size::new(3264, 2448),
        bds_output_size: Size::new(1920, 1080),
    })?;

    let results = AiqResults::default();
    let mut params = Ipu3UapiParams::default();

    match aic
        .update_runtime_params(&results)
        .and_then(|mut frame| frame.run(&mut params))
    {
        Ok(()) => {
            let bytes = params.to_bytes(version)?;
            std::fs::write("params.bin", &bytes).context("writing params.bin")?;
            info!("Wrote {} byte {} parameter buffer", bytes.len(), version);
        }
        Err(e) => error!("AIC run failed: {}", e),
    }

    Ok(())
}
