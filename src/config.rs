//! Runtime settings, built with chained setters.
//!
//! ```ignore
//! let config = PianoConfig::new()
//!     .waveform(OscillatorWaveform::Sine)
//!     .stop_delay(Duration::from_millis(1500));
//! ```

use std::{path::PathBuf, time::Duration};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::{
    audio::DEFAULT_QUEUE_CAPACITY,
    dsp::{envelope::EnvelopeShape, oscillator::OscillatorWaveform},
};

/// Delay between releasing a key and stopping its voice.
pub const DEFAULT_STOP_DELAY: Duration = Duration::from_secs(2);

/// Silence after which a key is released when the terminal cannot report
/// key-up events.
///
/// Must outlast the platform's initial auto-repeat delay (over a second on
/// some macOS settings), or a held key is released and re-struck by its
/// first repeat. Taps pay this much extra release latency.
pub const DEFAULT_HOLD_WINDOW: Duration = Duration::from_millis(1_200);

#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, PartialEq)]
pub struct PianoConfig {
    pub waveform: OscillatorWaveform,
    pub envelope: EnvelopeShape,
    pub stop_delay: Duration,
    pub hold_window: Duration,
    pub queue_capacity: usize,
    pub log_file: PathBuf,
}

impl PianoConfig {
    pub fn new() -> Self {
        Self {
            waveform: OscillatorWaveform::Triangle,
            envelope: EnvelopeShape::default(),
            stop_delay: DEFAULT_STOP_DELAY,
            hold_window: DEFAULT_HOLD_WINDOW,
            queue_capacity: DEFAULT_QUEUE_CAPACITY,
            log_file: PathBuf::from("ivory.log"),
        }
    }

    pub fn waveform(mut self, waveform: OscillatorWaveform) -> Self {
        self.waveform = waveform;
        self
    }

    pub fn envelope(mut self, envelope: EnvelopeShape) -> Self {
        self.envelope = envelope;
        self
    }

    pub fn stop_delay(mut self, delay: Duration) -> Self {
        self.stop_delay = delay;
        self
    }

    pub fn hold_window(mut self, window: Duration) -> Self {
        self.hold_window = window;
        self
    }

    pub fn queue_capacity(mut self, capacity: usize) -> Self {
        self.queue_capacity = capacity.max(1);
        self
    }

    pub fn log_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.log_file = path.into();
        self
    }
}

impl Default for PianoConfig {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_the_stock_instrument() {
        let config = PianoConfig::default();
        assert_eq!(config.waveform, OscillatorWaveform::Triangle);
        assert_eq!(config.envelope.peak, 0.5);
        assert_eq!(config.envelope.sustain, 0.001);
        assert_eq!(config.envelope.floor, 0.00001);
        assert_eq!(config.stop_delay, Duration::from_secs(2));
    }

    #[test]
    fn setters_chain() {
        let config = PianoConfig::new()
            .waveform(OscillatorWaveform::Square)
            .stop_delay(Duration::from_millis(10))
            .queue_capacity(0)
            .log_file("/tmp/piano.log");
        assert_eq!(config.waveform, OscillatorWaveform::Square);
        assert_eq!(config.stop_delay, Duration::from_millis(10));
        assert_eq!(config.queue_capacity, 1);
        assert_eq!(config.log_file, PathBuf::from("/tmp/piano.log"));
    }
}
