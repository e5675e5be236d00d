#![allow(missing_docs)]
#![allow(clippy::unwrap_used)]

use std::hint::black_box;

use av_motion_vector::{MotionVector, MotionVectorField, MvBounds};
use criterion::{Criterion, criterion_group, criterion_main};

const FIELD_COLS: usize = 1920 / 8;
const FIELD_ROWS: usize = 1080 / 8;

fn test_field() -> MotionVectorField {
    let mut field = MotionVectorField::new(FIELD_COLS, FIELD_ROWS);
    for row in 0..FIELD_ROWS {
        for col in 0..FIELD_COLS {
            field[row][col] = MotionVector::new(
                (col as i16 * 37) % 2048 - 1024,
                (row as i16 * 53) % 2048 - 1024,
            );
        }
    }
    field
}

fn mv_ops_benchmark(c: &mut Criterion) {
    let mvs: Vec<MotionVector> = test_field().as_slice().to_vec();
    let bounds = MvBounds::for_block(1920, 1080, 960, 540, 16, 16, 64);

    c.bench_function("mv scale", |b| {
        b.iter(|| {
            for &mv in &mvs {
                black_box(black_box(mv).scale(black_box(171)));
            }
        })
    });

    c.bench_function("mv round to fullpel", |b| {
        b.iter(|| {
            for &mv in &mvs {
                black_box(black_box(mv).round_to_fullpel());
            }
        })
    });

    c.bench_function("mv clip", |b| {
        b.iter(|| {
            for &mv in &mvs {
                black_box(bounds.clip(black_box(mv)));
            }
        })
    });
}

fn mv_field_benchmark(c: &mut Criterion) {
    let mut group = c.benchmark_group("mv field");
    group.bench_function("scale_all 1080p", |b| {
        b.iter_batched(
            test_field,
            |mut field| black_box(field.scale_all(black_box(384))),
            criterion::BatchSize::LargeInput,
        )
    });
    group.finish();
}

criterion_group!(benches, mv_ops_benchmark, mv_field_benchmark);
criterion_main!(benches);
