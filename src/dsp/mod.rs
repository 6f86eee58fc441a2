//! Low-level DSP primitives used by the higher level graph nodes.
//!
//! These components know nothing about notes or keys. They stay focused on
//! the signal math so graph nodes can layer note events on top.

/// Scheduled exponential gain envelope.
pub mod envelope;
/// Oscillator waveforms.
pub mod oscillator;

pub use envelope::{Envelope, EnvelopeShape, EnvelopeStage};
pub use oscillator::{OscillatorBlock, OscillatorWaveform};
