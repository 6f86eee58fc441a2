use std::sync::Arc;

use rtrb::Producer;

use crate::{
    audio::context::Clock,
    synth::{
        message::{MessageReceiver, SynthMessage},
        voice::{Voice, VoiceId},
    },
    MAX_BLOCK_SIZE,
};

/// Audio-thread half of the output: sums every started voice.
///
/// Move this into the device callback. Each block first applies pending
/// start/stop messages, then renders. While the context is suspended the
/// output is silent and the clock does not move.
///
/// Stopped voices are handed back to the context instead of being freed
/// here; a block only deallocates if that return ring is full.
pub struct Mixer<R: MessageReceiver> {
    rx: R,
    retired: Producer<Box<Voice>>,
    clock: Arc<Clock>,
    voices: Vec<(VoiceId, Box<Voice>)>,
    temp_buffer: Vec<f32>,
}

impl<R: MessageReceiver> Mixer<R> {
    pub(crate) fn new(rx: R, retired: Producer<Box<Voice>>, clock: Arc<Clock>) -> Self {
        Self {
            rx,
            retired,
            clock,
            voices: Vec::with_capacity(32),
            temp_buffer: vec![0.0; MAX_BLOCK_SIZE],
        }
    }

    pub fn sample_rate(&self) -> f32 {
        self.clock.sample_rate()
    }

    /// Number of voices currently generating audio.
    pub fn voice_count(&self) -> usize {
        self.voices.len()
    }

    /// Frequencies of the voices being mixed, oldest first.
    pub fn frequencies(&self) -> impl Iterator<Item = f32> + '_ {
        self.voices.iter().map(|(_, voice)| voice.frequency())
    }

    /// Apply queued messages without rendering.
    pub fn process_messages(&mut self) {
        while let Some(msg) = self.rx.pop() {
            match msg {
                SynthMessage::Start { id, voice } => self.voices.push((id, voice)),
                SynthMessage::Stop { id } => self.retire(id),
            }
        }
    }

    fn retire(&mut self, id: VoiceId) {
        let Some(index) = self.voices.iter().position(|(voice_id, _)| *voice_id == id) else {
            return;
        };
        let (_, voice) = self.voices.remove(index);
        // A full return ring frees the voice here instead
        let _ = self.retired.push(voice);
    }

    pub fn render_block(&mut self, out: &mut [f32]) {
        self.process_messages();

        out.fill(0.0);
        if !self.clock.is_running() {
            return;
        }

        let sample_rate = self.clock.sample_rate();
        for chunk in out.chunks_mut(MAX_BLOCK_SIZE) {
            let time = self.clock.time_of(self.clock.frames());
            for (_, voice) in &mut self.voices {
                let frames = &mut self.temp_buffer[..chunk.len()];
                voice.render(frames, sample_rate, time);
                for (o, v) in chunk.iter_mut().zip(frames.iter()) {
                    *o += v;
                }
            }
            self.clock.advance(chunk.len());
        }
    }
}
