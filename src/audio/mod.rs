//! The audio output, split across threads.
//!
//! [`AudioContext`] lives with the event loop: it hands out voice ids, sends
//! start/stop messages and reads the audio clock. [`Mixer`] lives in the
//! device callback and does the rendering. They talk over an `rtrb` ring
//! buffer and share the clock through atomics.

pub mod context;
pub mod mixer;

pub use context::{AudioContext, ContextState, DEFAULT_QUEUE_CAPACITY};
pub use mixer::Mixer;
