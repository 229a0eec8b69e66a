//! Per-frame camera math: easing, scroll mapping and the rig.
// criterion_group! emits an undocumented pub fn.
#![allow(missing_docs)]

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use ares_scene::camera::{Camera, ScrollMapping, ScrollMetrics, ScrollRig};
use ares_scene::options::{CameraOptions, ScrollOptions};
use ares_scene::util::easing::EasingFunction;
use glam::Vec3;

fn easing_benchmark(c: &mut Criterion) {
    let mut group = c.benchmark_group("easing");
    for easing in [
        EasingFunction::Linear,
        EasingFunction::QuadraticIn,
        EasingFunction::Smoothstep,
    ] {
        let _ = group.bench_function(format!("{easing:?}"), |b| {
            b.iter(|| black_box(easing.evaluate(black_box(0.37))))
        });
    }
    group.finish();
}

fn scroll_mapping_benchmark(c: &mut Criterion) {
    let mapping = ScrollMapping::from_options(&ScrollOptions::default());
    let metrics = ScrollMetrics {
        scroll_y: 1234.0,
        document_height: 6000.0,
        viewport_height: 900.0,
    };

    let _ = c.bench_function("scroll_fraction_to_camera_y", |b| {
        b.iter(|| {
            let f = black_box(metrics).fraction();
            black_box((mapping.camera_y(f), mapping.progress_percent(f)))
        })
    });
}

fn scroll_rig_benchmark(c: &mut Criterion) {
    let options = ScrollOptions::default();
    let camera_options = CameraOptions::default();
    let top_eye = Vec3::new(0.0, options.top_y, camera_options.distance);
    let focus = Vec3::new(0.0, -300.0, 0.0);
    let rig = ScrollRig::new(ScrollMapping::from_options(&options), top_eye, focus);
    let mut camera = Camera::new(&camera_options, 16.0 / 9.0, top_eye, focus);

    let _ = c.bench_function("scroll_rig_apply_and_view_proj", |b| {
        let mut f = 0.0_f32;
        b.iter(|| {
            f = (f + 0.001) % 1.0;
            let percent = rig.apply(&mut camera, black_box(f));
            black_box((percent, camera.build_matrix()))
        })
    });
}

criterion_group!(
    benches,
    easing_benchmark,
    scroll_mapping_benchmark,
    scroll_rig_benchmark
);
criterion_main!(benches);
