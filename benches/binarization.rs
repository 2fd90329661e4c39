use criterion::{Criterion, black_box, criterion_group, criterion_main};
use cv_primer::utils::binarization::{ThresholdMode, otsu_threshold, threshold};

fn bench_threshold_inv_medium(c: &mut Criterion) {
    let gray = vec![128u8; 640 * 480];
    c.bench_function("threshold_binary_inv_640x480", |b| {
        b.iter(|| {
            threshold(
                black_box(&gray),
                black_box(640),
                black_box(480),
                black_box(225),
                black_box(255),
                ThresholdMode::BinaryInv,
            )
        })
    });
}

fn bench_threshold_inv_large(c: &mut Criterion) {
    let gray = vec![128u8; 1920 * 1080];
    c.bench_function("threshold_binary_inv_1920x1080", |b| {
        b.iter(|| {
            threshold(
                black_box(&gray),
                black_box(1920),
                black_box(1080),
                black_box(225),
                black_box(255),
                ThresholdMode::BinaryInv,
            )
        })
    });
}

fn bench_otsu_level_medium(c: &mut Criterion) {
    let gray: Vec<u8> = (0..640 * 480).map(|i| (i % 251) as u8).collect();
    c.bench_function("otsu_threshold_640x480", |b| {
        b.iter(|| otsu_threshold(black_box(&gray)))
    });
}

fn bench_threshold_binary_small(c: &mut Criterion) {
    let gray: Vec<u8> = (0..100 * 100).map(|i| (i % 256) as u8).collect();
    c.bench_function("threshold_binary_100x100", |b| {
        b.iter(|| {
            threshold(
                black_box(&gray),
                black_box(100),
                black_box(100),
                black_box(128),
                black_box(255),
                ThresholdMode::Binary,
            )
        })
    });
}

criterion_group!(
    benches,
    bench_threshold_inv_medium,
    bench_threshold_inv_large,
    bench_otsu_level_medium,
    bench_threshold_binary_small
);
criterion_main!(benches);
