pub mod audio; // Control/audio-thread split of the output
pub mod config;
pub mod dsp;
pub mod engine;
pub mod graph; // Composable voice graph nodes
pub mod io; // Keyboard and mouse adapters
pub mod keys; // Key registry and on-screen surface
pub mod pitch;
pub mod synth; // Voices and note lifecycle

pub const MAX_BLOCK_SIZE: usize = 2048;
