//! Composable building blocks for constructing voices.
//!
//! Graph nodes wrap the low-level DSP primitives with block rendering and
//! clock-aware contexts. The `extensions` module adds the fluent
//! `.amplify()` helper so a voice reads as a chain.

/// Multiply two signals together (gain stage).
pub mod amplify;
/// Scheduled gain envelope node.
pub mod envelope;
/// Fluent combinators (`.amplify()`).
pub mod extensions;
/// Core traits shared by all graph nodes.
pub mod node;
/// Audio-band oscillators.
pub mod oscillator;

pub use node::{GraphNode, RenderCtx};
