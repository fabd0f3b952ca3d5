use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};
use ipu3_aic::aic::{
    Aic, AicOptions, AiqResults, BinaryData, IpaConfigInfo, Ipu3UapiParams, IspPipe,
    ParamsVersion, Rectangle, SensorInfo, Size,
};

fn configured_aic(pipe: &IspPipe, bds: Size) -> Aic<ipu3_aic::aic::ReferenceEngine> {
    let calibration = BinaryData::from_bytes(vec![0u8; 4096]);
    let mut aic = Aic::new(pipe, &calibration, AicOptions::default()).unwrap();
    aic.configure(&IpaConfigInfo {
        sensor_info: SensorInfo {
            analog_crop: Rectangle::new(0, 0, 3264, 2448),
            output_size: Size::new(3264, 2448),
        },
        iif: Size::new(3264, 2448),
        bds_output_size: bds,
    })
    .unwrap();
    aic
}

fn benchmark_run_by_output(c: &mut Criterion) {
    let mut group = c.benchmark_group("run_by_output");

    let sizes = vec![
        (Size::new(1280, 720), "1280x720"),
        (Size::new(1920, 1080), "1920x1080"),
        (Size::new(3264, 2448), "3264x2448"),
    ];

    for (bds, label) in sizes {
        group.bench_with_input(BenchmarkId::from_parameter(label), &bds, |b, &bds| {
            let pipe = IspPipe::new();
            let mut aic = configured_aic(&pipe, bds);
            let results = AiqResults::default();
            let mut params = Ipu3UapiParams::default();

            b.iter(|| {
                let mut frame = aic.update_runtime_params(black_box(&results)).unwrap();
                let _ = frame.run(&mut params);
            });
        });
    }

    group.finish();
}

fn benchmark_serialise(c: &mut Criterion) {
    let pipe = IspPipe::new();
    let mut aic = configured_aic(&pipe, Size::new(1920, 1080));
    let results = AiqResults::default();
    let mut params = Ipu3UapiParams::default();
    aic.update_runtime_params(&results)
        .unwrap()
        .run(&mut params)
        .unwrap();

    let mut buf = vec![0u8; ParamsVersion::Ipu3V1.size()];
    c.bench_function("write_ipu3_v1", |b| {
        b.iter(|| params.write_to(ParamsVersion::Ipu3V1, black_box(&mut buf)))
    });
}

criterion_group!(benches, benchmark_run_by_output, benchmark_serialise);
criterion_main!(benches);
