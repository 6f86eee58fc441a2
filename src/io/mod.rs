// Purpose - input adapters: terminal events in, piano calls out

pub mod keyboard;
pub mod pointer;

pub use keyboard::{KeyAction, KeyboardAdapter};
pub use pointer::PointerAdapter;
