use crate::{
    dsp::envelope::{Envelope, EnvelopeShape},
    graph::node::{GraphNode, RenderCtx},
};

/// Envelope generator node.
///
/// Renders the scheduled gain curve as a control signal, meant to be used
/// as the modulator of `.amplify()`.
pub struct EnvNode {
    env: Envelope,
    // clock time just past the last rendered frame
    rendered_until: f64,
}

impl EnvNode {
    pub fn new(env: Envelope) -> Self {
        Self {
            env,
            rendered_until: f64::NEG_INFINITY,
        }
    }

    /// Attack, decay and release of `shape`, all scheduled against `now`.
    pub fn scheduled(shape: &EnvelopeShape, now: f64) -> Self {
        Self::new(Envelope::scheduled(shape, now))
    }

    pub fn envelope(&self) -> &Envelope {
        &self.env
    }
}

impl GraphNode for EnvNode {
    fn render_block(&mut self, out: &mut [f32], ctx: &RenderCtx) {
        self.env.render(out, ctx);
        self.rendered_until = ctx.time + ctx.duration_of(out.len());
    }

    fn get_envelope_level(&self) -> Option<f32> {
        Some(self.env.level())
    }

    fn is_active(&self) -> bool {
        self.rendered_until < self.env.end_time()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn goes_inactive_after_release() {
        let mut node = EnvNode::scheduled(&EnvelopeShape::default(), 0.0);
        let ctx = RenderCtx::from_freq(1_000.0, 440.0);
        let mut buf = vec![0.0f32; 1_000];

        assert!(node.is_active());
        node.render_block(&mut buf, &ctx);
        assert!(node.is_active());
        node.render_block(&mut buf, &ctx.at(1.0));
        assert!(!node.is_active());
    }
}
