use rtrb::Consumer;

use crate::synth::voice::{Voice, VoiceId};

/// Control messages from the piano to the audio thread.
pub enum SynthMessage {
    /// Begin mixing a freshly built voice.
    Start { id: VoiceId, voice: Box<Voice> },
    /// Stop a voice and release it.
    Stop { id: VoiceId },
}

pub trait MessageReceiver {
    fn pop(&mut self) -> Option<SynthMessage>;
}

impl MessageReceiver for Consumer<SynthMessage> {
    fn pop(&mut self) -> Option<SynthMessage> {
        Consumer::pop(self).ok()
    }
}
