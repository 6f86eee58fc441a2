//! Equal-tempered pitch math.

/// Reference pitch (A4) in Hz.
pub const A4_HZ: f32 = 440.0;

/// Frequency of the pitch `semitones` away from A4.
///
/// `pitch(0.0) == 440.0`, `pitch(12.0) == 880.0`, `pitch(-12.0) == 220.0`.
/// Fractional offsets are allowed (quarter tones, detune).
#[inline]
pub fn pitch(semitones: f32) -> f32 {
    A4_HZ * 2.0_f32.powf(semitones / 12.0)
}
