//! Benchmarks for the scheduled gain envelope.

use std::hint::black_box;

use criterion::{BenchmarkId, Criterion};
use ivory::dsp::envelope::{Envelope, EnvelopeShape};
use ivory::graph::node::RenderCtx;

use crate::BLOCK_SIZES;

pub fn bench_envelope(c: &mut Criterion) {
    let mut group = c.benchmark_group("dsp/envelope");
    let shape = EnvelopeShape::default();

    for &size in BLOCK_SIZES {
        let mut buffer = vec![0.0f32; size];

        // Attack ramp (first segment)
        let ctx = RenderCtx::from_freq(48_000.0, 440.0).at(0.001);
        let mut env = Envelope::scheduled(&shape, 0.0);
        group.bench_with_input(BenchmarkId::new("attack", size), &size, |b, _| {
            b.iter(|| {
                env.render(black_box(&mut buffer), black_box(&ctx));
            })
        });

        // Decay ramp (cursor already past the first event)
        let ctx = RenderCtx::from_freq(48_000.0, 440.0).at(0.5);
        let mut env = Envelope::scheduled(&shape, 0.0);
        group.bench_with_input(BenchmarkId::new("decay", size), &size, |b, _| {
            b.iter(|| {
                env.render(black_box(&mut buffer), black_box(&ctx));
            })
        });

        // Held at the floor after release
        let ctx = RenderCtx::from_freq(48_000.0, 440.0).at(5.0);
        let mut env = Envelope::scheduled(&shape, 0.0);
        group.bench_with_input(BenchmarkId::new("done", size), &size, |b, _| {
            b.iter(|| {
                env.render(black_box(&mut buffer), black_box(&ctx));
            })
        });
    }

    group.finish();
}
