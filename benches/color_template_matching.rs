//! Benchmark of the quaternion colour correlation pipeline

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use quaternion_color_matching::quaternion::{transform, Direction, Orientation};
use quaternion_color_matching::quaternion::array::embed;
use quaternion_color_matching::{ColorCorrelationEngine, ColorImage, PeakConfig, TestShape};
use rand::rngs::StdRng;
use rand::SeedableRng;

fn scene(width: u32, height: u32, template: &ColorImage) -> ColorImage {
    let mut rng = StdRng::seed_from_u64(42);
    let mut scene = ColorImage::random_noise(width, height, &mut rng);
    scene.paste(template, width / 3, height / 4);
    scene
}

fn benchmark_color_template_matching(c: &mut Criterion) {
    let mut group = c.benchmark_group("quaternion_color_matching");
    group.sample_size(10);

    let template = ColorImage::create_test_template(24, TestShape::Circle, [230.0, 40.0, 40.0], [20.0, 20.0, 160.0]);
    let engine = ColorCorrelationEngine::default();

    for &(width, height) in &[(128u32, 96u32), (320, 240)] {
        let image = scene(width, height, &template);
        let label = format!("{}x{}", width, height);

        group.bench_with_input(BenchmarkId::new("correlate", &label), &image, |b, image| {
            b.iter(|| engine.correlate(image, &template).unwrap())
        });

        group.bench_with_input(BenchmarkId::new("match_template", &label), &image, |b, image| {
            b.iter(|| engine.match_template(image, &template, &PeakConfig::default()).unwrap())
        });
    }

    let image = scene(320, 240, &template);
    let q = embed(&image, Some(1.0 / 255.0)).unwrap();
    group.bench_function("qfft_forward_320x240", |b| {
        b.iter(|| transform(&q, Direction::Forward, Orientation::Left).unwrap())
    });

    group.finish();
}

criterion_group!(benches, benchmark_color_template_matching);
criterion_main!(benches);
