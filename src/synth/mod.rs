// Purpose: voices, their factory, and the note lifecycle
// This layer sits above graph nodes and turns key presses into voices

pub mod factory;
pub mod message;
pub mod piano;
pub mod voice;

pub use factory::{ToneVoiceFactory, VoiceFactory};
pub use piano::Piano;
pub use voice::{Voice, VoiceHandle, VoiceId};
