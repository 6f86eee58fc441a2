//! Benchmarks for complete voice chains.

use std::hint::black_box;

use criterion::{BenchmarkId, Criterion};
use ivory::dsp::oscillator::OscillatorWaveform;
use ivory::synth::factory::{ToneVoiceFactory, VoiceFactory};

use crate::BLOCK_SIZES;

pub fn bench_voices(c: &mut Criterion) {
    let mut group = c.benchmark_group("scenarios/voices");

    for &size in BLOCK_SIZES {
        let mut buffer = vec![0.0f32; size];

        // The stock piano voice: triangle → scheduled envelope
        let mut tone = ToneVoiceFactory::default().build(440.0, 0.0);
        group.bench_with_input(BenchmarkId::new("tone", size), &size, |b, _| {
            b.iter(|| {
                tone.render(black_box(&mut buffer), 48_000.0, black_box(0.5));
            })
        });

        // Sine patch, the cost of sin() per sample
        let factory = ToneVoiceFactory::new(OscillatorWaveform::Sine, Default::default());
        let mut sine = factory.build(440.0, 0.0);
        group.bench_with_input(BenchmarkId::new("tone_sine", size), &size, |b, _| {
            b.iter(|| {
                sine.render(black_box(&mut buffer), 48_000.0, black_box(0.5));
            })
        });
    }

    group.finish();
}
