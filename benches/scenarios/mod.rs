//! Real-world scenario benchmarks.
//!
//! A single tone voice, and the mixer with every key of the piano held.

mod mixer;
mod voices;

pub use mixer::bench_mixer;
pub use voices::bench_voices;
