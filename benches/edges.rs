mod common;

use criterion::{Criterion, black_box, criterion_group, criterion_main};
use cv_primer::BitMatrix;
use cv_primer::detector::contour::{RetrievalMode, find_contours};
use cv_primer::detector::edges::{canny, sobel_gradients};

fn bench_sobel_medium(c: &mut Criterion) {
    let gray = common::blocks_gray(640, 480);
    c.bench_function("sobel_640x480", |b| {
        b.iter(|| sobel_gradients(black_box(&gray), black_box(640), black_box(480)))
    });
}

fn bench_canny_medium(c: &mut Criterion) {
    let gray = common::blocks_gray(640, 480);
    c.bench_function("canny_640x480", |b| {
        b.iter(|| {
            canny(
                black_box(&gray),
                black_box(640),
                black_box(480),
                black_box(30.0),
                black_box(150.0),
            )
        })
    });
}

// Contour extraction runs on the edge map, so it lives next to Canny
fn bench_contours_medium(c: &mut Criterion) {
    let gray = common::blocks_gray(640, 480);
    let edges = canny(&gray, 640, 480, 30.0, 150.0);
    let matrix = BitMatrix::from_nonzero(&edges, 640, 480);
    c.bench_function("find_contours_external_640x480", |b| {
        b.iter(|| find_contours(black_box(&matrix), RetrievalMode::External))
    });
}

criterion_group!(
    benches,
    bench_sobel_medium,
    bench_canny_medium,
    bench_contours_medium
);
criterion_main!(benches);
