//! Benchmarks for oscillator waveform generation.

use std::hint::black_box;

use criterion::{BenchmarkId, Criterion};
use ivory::dsp::oscillator::{OscillatorBlock, OscillatorWaveform};

use crate::BLOCK_SIZES;

pub fn bench_oscillator(c: &mut Criterion) {
    let mut group = c.benchmark_group("dsp/oscillator");
    let waveforms = [
        ("sine", OscillatorWaveform::Sine),         // sin() per sample
        ("triangle", OscillatorWaveform::Triangle), // two branches
        ("sawtooth", OscillatorWaveform::Saw),      // linear ramp
        ("square", OscillatorWaveform::Square),     // one branch
    ];

    for &size in BLOCK_SIZES {
        let mut buffer = vec![0.0f32; size];

        for (name, waveform) in waveforms {
            let mut osc = OscillatorBlock::new(waveform);
            group.bench_with_input(BenchmarkId::new(name, size), &size, |b, _| {
                b.iter(|| {
                    osc.render(black_box(&mut buffer), black_box(440.0), black_box(48_000.0));
                })
            });
        }
    }

    group.finish();
}
