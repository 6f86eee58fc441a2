use crate::graph::node::RenderCtx;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/*
Scheduled Gain Envelope
=======================

This envelope is not gate-driven. Every stage is written onto a timeline the
moment the voice is built, and the level at any instant is read back from
that timeline. Releasing the key does not move the curve: a voice always
swells, decays and fades on the same schedule, however long it is held.

Vocabulary
----------

  floor       Near-silent starting and ending gain. Exponential curves can
              never reach or leave zero, so the floor stands in for silence.

  event       A target (time, value) pair. The level ramps from the previous
              event towards it and holds its value once the time has passed.

  origin      Time and value the timeline starts from before any event.


The Shape: Exponential Ramps
----------------------------

  Gain
    0.5 ┐  ╱╲
        │ ╱  ╲
        │╱    ╲
        │       ╲__
  0.001 ┤          ╲___
        │               ╲______
  floor └──────────────────────╲───→ Time
        0  0.01      1.0       2.0
        Attack  Decay     Release

Between two events (t0, v0) and (t1, v1) the level is

    v(t) = v0 * (v1 / v0) ^ ((t - t0) / (t1 - t0))

Equal time steps multiply the level by equal ratios, which is how the ear
hears "evenly fading". Before the first event the level is the origin value;
after the last one it holds the last target.
*/

/// Timing and levels of the attack/decay/release curve.
///
/// Times are offsets from the moment the voice is built, not durations.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EnvelopeShape {
    pub floor: f32,
    pub peak: f32,
    pub sustain: f32,
    pub attack_at: f64,
    pub decay_at: f64,
    pub release_at: f64,
}

impl Default for EnvelopeShape {
    fn default() -> Self {
        Self {
            floor: 0.00001,
            peak: 0.5,
            sustain: 0.001,
            attack_at: 0.01,
            decay_at: 1.0,
            release_at: 2.0,
        }
    }
}

/// Which segment of the timeline a time falls into.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EnvelopeStage {
    /// Before the first ramp starts.
    Idle,
    /// Ramping towards the n-th scheduled event (0-based).
    Ramp(usize),
    /// Past the last event, holding its value.
    Done,
}

#[derive(Debug, Clone, Copy)]
struct RampEvent {
    time: f64,
    value: f32,
}

/// Smallest value an exponential ramp may target.
const MIN_RAMP_VALUE: f32 = 1e-7;

#[derive(Debug, Clone)]
pub struct Envelope {
    origin_time: f64,
    origin_value: f32,
    events: Vec<RampEvent>,

    // rendering state
    cursor: usize,
    level: f32,
}

impl Envelope {
    /// Start a timeline at `time` holding `value`.
    pub fn new(value: f32, time: f64) -> Self {
        let value = value.max(MIN_RAMP_VALUE);
        Self {
            origin_time: time,
            origin_value: value,
            events: Vec::with_capacity(4),
            cursor: 0,
            level: value,
        }
    }

    /// Build the three-stage curve of `shape`, all stages scheduled against `now`.
    pub fn scheduled(shape: &EnvelopeShape, now: f64) -> Self {
        let mut env = Self::new(shape.floor, now);
        env.exponential_ramp_to_value_at_time(shape.peak, now + shape.attack_at);
        env.exponential_ramp_to_value_at_time(shape.sustain, now + shape.decay_at);
        env.exponential_ramp_to_value_at_time(shape.floor, now + shape.release_at);
        env
    }

    /// Schedule an exponential ramp ending at `value` at absolute `time`.
    ///
    /// Events stay ordered by time; an event at the same time as an existing
    /// one lands after it.
    pub fn exponential_ramp_to_value_at_time(&mut self, value: f32, time: f64) {
        let event = RampEvent {
            time,
            value: value.max(MIN_RAMP_VALUE),
        };
        let idx = self.events.partition_point(|e| e.time <= time);
        self.events.insert(idx, event);
        self.cursor = 0;
    }

    /// Level of the curve at absolute time `t`.
    pub fn value_at(&self, t: f64) -> f32 {
        self.value_from(0, t).1
    }

    /// Segment `t` falls into.
    pub fn stage_at(&self, t: f64) -> EnvelopeStage {
        if t < self.origin_time {
            return EnvelopeStage::Idle;
        }
        match self.events.iter().position(|e| t < e.time) {
            Some(idx) => EnvelopeStage::Ramp(idx),
            None => EnvelopeStage::Done,
        }
    }

    /// Time at which the last event completes.
    pub fn end_time(&self) -> f64 {
        self.events
            .last()
            .map_or(self.origin_time, |e| e.time)
    }

    /// Render one level per frame starting at `ctx.time`.
    ///
    /// Successive calls must move forward in time; the read cursor only
    /// advances.
    pub fn render(&mut self, buffer: &mut [f32], ctx: &RenderCtx) {
        for (i, sample) in buffer.iter_mut().enumerate() {
            let (cursor, level) = self.value_from(self.cursor, ctx.frame_time(i));
            self.cursor = cursor;
            self.level = level;
            *sample = level;
        }
    }

    /// Last rendered level.
    pub fn level(&self) -> f32 {
        self.level
    }

    /// Walk the events from `cursor`, returning the index of the segment that
    /// contains `t` together with the level there.
    fn value_from(&self, mut cursor: usize, t: f64) -> (usize, f32) {
        if t <= self.origin_time {
            return (cursor, self.origin_value);
        }

        while let Some(event) = self.events.get(cursor) {
            if t < event.time {
                let (t0, v0) = match cursor.checked_sub(1) {
                    Some(prev) => (self.events[prev].time, self.events[prev].value),
                    None => (self.origin_time, self.origin_value),
                };
                return (cursor, exponential(t0, v0, event.time, event.value, t));
            }
            cursor += 1;
        }

        let held = self.events.last().map_or(self.origin_value, |e| e.value);
        (cursor, held)
    }
}

#[inline]
fn exponential(t0: f64, v0: f32, t1: f64, v1: f32, t: f64) -> f32 {
    if t1 <= t0 {
        return v1;
    }
    let progress = (t - t0) / (t1 - t0);
    let ratio = v1 as f64 / v0 as f64;
    (v0 as f64 * ratio.powf(progress)) as f32
}
