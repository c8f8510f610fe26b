//! Filter Benchmarks
//!
//! Criterion benchmarks for the low-pass filter hot path.

use criterion::{Criterion, criterion_group, criterion_main};
use dcmotor_filters::prelude::*;

fn bench_lowpass_step(c: &mut Criterion) {
    let mut filter = LowPassFilter::initialized(20.0, 0.0, 0);
    let mut now = 0u64;

    c.bench_function("lowpass_step", |b| {
        b.iter(|| {
            now = now.wrapping_add(1_000);
            std::hint::black_box(filter.step(std::hint::black_box(128.0), now));
        })
    });
}

fn bench_lowpass_stalled_clock(c: &mut Criterion) {
    let mut filter = LowPassFilter::initialized(20.0, 0.0, 1_000);

    c.bench_function("lowpass_stalled_clock", |b| {
        b.iter(|| {
            std::hint::black_box(filter.step(std::hint::black_box(128.0), 1_000));
        })
    });
}

criterion_group!(benches, bench_lowpass_step, bench_lowpass_stalled_clock);
criterion_main!(benches);
