use std::sync::{
    atomic::{AtomicBool, AtomicU64, Ordering},
    Arc,
};

use rtrb::{Consumer, Producer, PushError, RingBuffer};

use crate::{
    audio::mixer::Mixer,
    synth::{
        message::SynthMessage,
        voice::{Voice, VoiceId},
    },
};

/// Default capacity of the control → audio message queue.
pub const DEFAULT_QUEUE_CAPACITY: usize = 256;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContextState {
    /// Output is silent and the clock stands still.
    Suspended,
    Running,
}

/// State shared between the control side and the mixer.
#[derive(Debug)]
pub(crate) struct Clock {
    sample_rate: f32,
    frames: AtomicU64,
    running: AtomicBool,
}

impl Clock {
    pub(crate) fn sample_rate(&self) -> f32 {
        self.sample_rate
    }

    pub(crate) fn frames(&self) -> u64 {
        self.frames.load(Ordering::Acquire)
    }

    pub(crate) fn advance(&self, frames: usize) {
        self.frames.fetch_add(frames as u64, Ordering::AcqRel);
    }

    pub(crate) fn is_running(&self) -> bool {
        self.running.load(Ordering::Acquire)
    }

    pub(crate) fn time_of(&self, frames: u64) -> f64 {
        frames as f64 / self.sample_rate as f64
    }
}

/// Control-side half of the audio output.
///
/// Owns the sending end of the message queue and reads the clock published
/// by the [`Mixer`]. The context starts suspended, like an output that waits
/// for a user gesture; call [`AudioContext::resume`] to hear anything.
///
/// Voices the mixer has stopped come back on a second ring and are freed
/// here by [`AudioContext::collect_retired`], off the audio thread.
pub struct AudioContext {
    tx: Producer<SynthMessage>,
    retired: Consumer<Box<Voice>>,
    clock: Arc<Clock>,
    next_id: VoiceId,
}

impl AudioContext {
    /// Create a context and the mixer that must be moved to the audio thread.
    pub fn new(sample_rate: f32, queue_capacity: usize) -> (Self, Mixer<Consumer<SynthMessage>>) {
        let (tx, rx) = RingBuffer::<SynthMessage>::new(queue_capacity.max(1));
        let (retire_tx, retired) = RingBuffer::<Box<Voice>>::new(queue_capacity.max(1));
        let clock = Arc::new(Clock {
            sample_rate,
            frames: AtomicU64::new(0),
            running: AtomicBool::new(false),
        });

        let ctx = Self {
            tx,
            retired,
            clock: clock.clone(),
            next_id: 0,
        };
        (ctx, Mixer::new(rx, retire_tx, clock))
    }

    pub fn sample_rate(&self) -> f32 {
        self.clock.sample_rate()
    }

    /// Seconds of audio rendered while running.
    pub fn current_time(&self) -> f64 {
        self.clock.time_of(self.clock.frames())
    }

    pub fn state(&self) -> ContextState {
        if self.clock.is_running() {
            ContextState::Running
        } else {
            ContextState::Suspended
        }
    }

    pub fn resume(&mut self) {
        if !self.clock.running.swap(true, Ordering::AcqRel) {
            log::info!("audio context resumed");
        }
    }

    pub fn suspend(&mut self) {
        if self.clock.running.swap(false, Ordering::AcqRel) {
            log::info!("audio context suspended");
        }
    }

    pub(crate) fn next_voice_id(&mut self) -> VoiceId {
        let id = self.next_id;
        self.next_id = self.next_id.wrapping_add(1);
        id
    }

    /// Queue `msg` for the mixer. Returns `false` when the queue is full and
    /// the message was not delivered.
    #[must_use]
    pub(crate) fn send(&mut self, msg: SynthMessage) -> bool {
        match self.tx.push(msg) {
            Ok(()) => true,
            Err(PushError::Full(SynthMessage::Start { id, .. })) => {
                log::warn!("message queue full, dropping start of voice {id}");
                false
            }
            Err(PushError::Full(SynthMessage::Stop { id })) => {
                log::warn!("message queue full, stop of voice {id} not delivered");
                false
            }
        }
    }

    /// Free voices the mixer has finished with. Returns how many were freed.
    pub fn collect_retired(&mut self) -> usize {
        let mut freed = 0;
        while self.retired.pop().is_ok() {
            freed += 1;
        }
        freed
    }
}
