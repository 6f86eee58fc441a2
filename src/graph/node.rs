/// Context passed to graph nodes during rendering
///
/// Contains information about what to render:
/// - sample_rate: Audio sample rate (e.g., 48000.0)
/// - frequency: Pitch to render (Hz)
/// - time: Audio clock time of the first frame in the block, in seconds
#[derive(Debug, Clone, Copy)]
pub struct RenderCtx {
    pub sample_rate: f32,
    pub frequency: f32,
    pub time: f64,
}

impl RenderCtx {
    /// Create context for a pitch, starting at time zero
    pub fn from_freq(sample_rate: f32, frequency: f32) -> Self {
        Self {
            sample_rate,
            frequency,
            time: 0.0,
        }
    }

    /// Same context, moved to a different block start time
    pub fn at(self, time: f64) -> Self {
        Self { time, ..self }
    }

    /// Clock time of frame `index` within the block
    #[inline]
    pub fn frame_time(&self, index: usize) -> f64 {
        self.time + index as f64 / self.sample_rate as f64
    }

    /// Duration of `frames` frames, in seconds
    #[inline]
    pub fn duration_of(&self, frames: usize) -> f64 {
        frames as f64 / self.sample_rate as f64
    }
}

/// Core trait for audio processing graph nodes
///
/// Nodes render audio blocks and can report envelope state for display.
pub trait GraphNode: Send {
    fn render_block(&mut self, out: &mut [f32], ctx: &RenderCtx);

    fn get_envelope_level(&self) -> Option<f32> {
        None
    }

    /// Check if this node is still producing sound
    fn is_active(&self) -> bool {
        true
    }
}

/// Allow boxed graph nodes to be used as graph nodes (for dynamic dispatch)
impl GraphNode for Box<dyn GraphNode> {
    fn render_block(&mut self, out: &mut [f32], ctx: &RenderCtx) {
        (**self).render_block(out, ctx)
    }

    fn get_envelope_level(&self) -> Option<f32> {
        (**self).get_envelope_level()
    }

    fn is_active(&self) -> bool {
        (**self).is_active()
    }
}
