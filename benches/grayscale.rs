use criterion::{Criterion, black_box, criterion_group, criterion_main};
mod common;

use cv_primer::utils::grayscale::{
    rgb_to_grayscale, rgb_to_grayscale_parallel, rgb_to_grayscale_with_buffer,
};

fn bench_rgb_to_grayscale_small(c: &mut Criterion) {
    let image = vec![128u8; 100 * 100 * 3];
    c.bench_function("rgb_to_grayscale_100x100", |b| {
        b.iter(|| rgb_to_grayscale(black_box(&image), black_box(100), black_box(100)))
    });
}

fn bench_rgb_to_grayscale_medium(c: &mut Criterion) {
    let image = vec![128u8; 640 * 480 * 3];
    c.bench_function("rgb_to_grayscale_640x480", |b| {
        b.iter(|| rgb_to_grayscale(black_box(&image), black_box(640), black_box(480)))
    });
}

fn bench_rgb_to_grayscale_large(c: &mut Criterion) {
    let image = vec![128u8; 1920 * 1080 * 3];
    c.bench_function("rgb_to_grayscale_1920x1080", |b| {
        b.iter(|| rgb_to_grayscale(black_box(&image), black_box(1920), black_box(1080)))
    });
}

fn bench_rgb_to_grayscale_parallel_medium(c: &mut Criterion) {
    let image = vec![128u8; 640 * 480 * 3];
    c.bench_function("rgb_to_grayscale_parallel_640x480", |b| {
        b.iter(|| rgb_to_grayscale_parallel(black_box(&image), black_box(640), black_box(480)))
    });
}

fn bench_rgb_to_grayscale_parallel_large(c: &mut Criterion) {
    let image = vec![128u8; 1920 * 1080 * 3];
    c.bench_function("rgb_to_grayscale_parallel_1920x1080", |b| {
        b.iter(|| rgb_to_grayscale_parallel(black_box(&image), black_box(1920), black_box(1080)))
    });
}

// Reuses one output buffer across frames, as a video loop would
fn bench_rgb_to_grayscale_with_buffer_medium(c: &mut Criterion) {
    let image = common::blocks_rgb(640, 480);
    let mut gray = vec![0u8; 640 * 480];
    c.bench_function("rgb_to_grayscale_with_buffer_640x480", |b| {
        b.iter(|| {
            rgb_to_grayscale_with_buffer(
                black_box(&image),
                black_box(640),
                black_box(480),
                black_box(&mut gray),
            )
        })
    });
}

fn bench_rgb_to_grayscale_scene_large(c: &mut Criterion) {
    let image = common::blocks_rgb(1920, 1080);
    c.bench_function("rgb_to_grayscale_parallel_scene_1920x1080", |b| {
        b.iter(|| rgb_to_grayscale_parallel(black_box(&image), black_box(1920), black_box(1080)))
    });
}

criterion_group!(
    benches,
    bench_rgb_to_grayscale_small,
    bench_rgb_to_grayscale_medium,
    bench_rgb_to_grayscale_large,
    bench_rgb_to_grayscale_parallel_medium,
    bench_rgb_to_grayscale_parallel_large,
    bench_rgb_to_grayscale_with_buffer_medium,
    bench_rgb_to_grayscale_scene_large
);
criterion_main!(benches);
