use crate::{
    audio::AudioContext,
    graph::node::{GraphNode, RenderCtx},
    synth::message::SynthMessage,
};

/// Identifies a started voice inside the mixer.
pub type VoiceId = u64;

/// One synthesized tone: a graph plus the pitch it plays at.
///
/// A voice is inert until [`Voice::start`] hands it to the audio context.
pub struct Voice {
    frequency: f32,
    created_at: f64,
    graph: Box<dyn GraphNode>,
}

impl Voice {
    pub fn new<N: GraphNode + 'static>(graph: N, frequency: f32, created_at: f64) -> Self {
        Self {
            frequency,
            created_at,
            graph: Box::new(graph),
        }
    }

    pub fn frequency(&self) -> f32 {
        self.frequency
    }

    /// Audio clock time the voice was built at.
    pub fn created_at(&self) -> f64 {
        self.created_at
    }

    /// Render one block whose first frame sits at clock time `time`.
    pub fn render(&mut self, out: &mut [f32], sample_rate: f32, time: f64) {
        let ctx = RenderCtx::from_freq(sample_rate, self.frequency).at(time);
        self.graph.render_block(out, &ctx);
    }

    pub fn envelope_level(&self) -> Option<f32> {
        self.graph.get_envelope_level()
    }

    /// Whether the graph is still shaping sound (envelope not finished).
    pub fn is_sounding(&self) -> bool {
        self.graph.is_active()
    }

    /// Begin generating audio. Returns the handle used to stop it later.
    pub fn start(self, ctx: &mut AudioContext) -> VoiceHandle {
        let id = ctx.next_voice_id();
        let frequency = self.frequency;
        // An undelivered start leaves a handle to nothing; stopping it is harmless
        let _ = ctx.send(SynthMessage::Start {
            id,
            voice: Box::new(self),
        });
        VoiceHandle { id, frequency }
    }
}

/// Control-side reference to a voice living in the mixer.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VoiceHandle {
    id: VoiceId,
    frequency: f32,
}

impl VoiceHandle {
    pub fn id(&self) -> VoiceId {
        self.id
    }

    pub fn frequency(&self) -> f32 {
        self.frequency
    }

    /// Halt the voice and let the mixer drop it.
    ///
    /// Stopping a voice that is already gone is a no-op in the mixer.
    /// Returns `false` when the message queue was full and the stop has to
    /// be sent again.
    #[must_use]
    pub fn stop(&self, ctx: &mut AudioContext) -> bool {
        ctx.send(SynthMessage::Stop { id: self.id })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        dsp::envelope::EnvelopeShape,
        synth::factory::{ToneVoiceFactory, VoiceFactory},
    };

    fn level_at(voice: &mut Voice, sample_rate: f32, time: f64) -> f32 {
        let mut one = [0.0f32; 1];
        voice.render(&mut one, sample_rate, time);
        voice.envelope_level().unwrap_or_default()
    }

    #[test]
    fn gain_follows_scheduled_envelope() {
        let shape = EnvelopeShape::default();
        let factory = ToneVoiceFactory::default();
        let mut voice = factory.build(440.0, 0.0);

        let tolerance = |v: f32| v * 1e-3;
        let samples = [
            (0.0, shape.floor),
            (0.01, shape.peak),
            (1.0, shape.sustain),
            (2.0, shape.floor),
        ];
        for (t, want) in samples {
            let got = level_at(&mut voice, 48_000.0, t);
            assert!((got - want).abs() <= tolerance(want), "t={t}: expected {want}, got {got}");
        }
    }

    #[test]
    fn voice_ends_after_release() {
        let mut voice = ToneVoiceFactory::default().build(220.0, 5.0);
        assert!(voice.is_sounding());
        let mut buf = vec![0.0f32; 480];
        voice.render(&mut buf, 48_000.0, 7.5);
        assert!(!voice.is_sounding());
    }
}
