//! Benchmarks for the mixer with many voices.

use std::hint::black_box;

use criterion::{BenchmarkId, Criterion};
use ivory::{
    audio::AudioContext,
    keys::{KeyId, KeyboardSurface},
    synth::{Piano, ToneVoiceFactory},
};

use crate::BLOCK_SIZES;

pub fn bench_mixer(c: &mut Criterion) {
    let mut group = c.benchmark_group("scenarios/mixer");

    for &size in BLOCK_SIZES {
        let mut buffer = vec![0.0f32; size];

        // Every key held: 17 voices
        let (mut ctx, mut mixer) = AudioContext::new(48_000.0, 64);
        ctx.resume();
        let mut piano = Piano::new(KeyboardSurface::piano(), ToneVoiceFactory::default(), ctx);
        for key in KeyId::ALL {
            piano.press_on(key);
        }
        mixer.process_messages();

        group.bench_with_input(BenchmarkId::new("all_keys", size), &size, |b, _| {
            b.iter(|| {
                mixer.render_block(black_box(&mut buffer));
            })
        });
    }

    group.finish();
}
