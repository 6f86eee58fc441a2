// Purpose: which physical keys exist, what they play, and where they are drawn

pub mod registry;
pub mod surface;

pub use registry::{Key, KeyBinding, KeyId, KeyRegistry, DEFAULT_BINDINGS};
pub use surface::{ElementId, KeyboardSurface, Surface, PRESSED};
