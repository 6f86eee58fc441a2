use crate::{
    config::PianoConfig,
    dsp::{envelope::EnvelopeShape, oscillator::OscillatorWaveform},
    graph::{envelope::EnvNode, extensions::NodeExt, oscillator::OscNode},
    synth::voice::Voice,
};

/// Factory for creating voices with a specific patch/sound design
///
/// This is the "instrument design" layer - you configure your sound once,
/// then the piano asks for one fresh voice per note-on.
pub trait VoiceFactory {
    /// Build a voice at `pitch_hz` whose envelope is scheduled against the
    /// audio clock time `now`.
    fn build(&self, pitch_hz: f32, now: f64) -> Voice;
}

impl<F> VoiceFactory for F
where
    F: Fn(f32, f64) -> Voice,
{
    fn build(&self, pitch_hz: f32, now: f64) -> Voice {
        self(pitch_hz, now)
    }
}

/// Oscillator into a scheduled attack/decay/release gain stage.
#[derive(Debug, Clone, Copy, Default)]
pub struct ToneVoiceFactory {
    waveform: OscillatorWaveform,
    shape: EnvelopeShape,
}

impl ToneVoiceFactory {
    pub fn new(waveform: OscillatorWaveform, shape: EnvelopeShape) -> Self {
        Self { waveform, shape }
    }

    pub fn from_config(config: &PianoConfig) -> Self {
        Self::new(config.waveform, config.envelope)
    }

    pub fn waveform(&self) -> OscillatorWaveform {
        self.waveform
    }

    pub fn shape(&self) -> &EnvelopeShape {
        &self.shape
    }
}

impl VoiceFactory for ToneVoiceFactory {
    fn build(&self, pitch_hz: f32, now: f64) -> Voice {
        let graph = OscNode::new(self.waveform).amplify(EnvNode::scheduled(&self.shape, now));
        Voice::new(graph, pitch_hz, now)
    }
}
