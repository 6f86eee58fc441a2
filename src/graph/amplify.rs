use crate::{
    graph::node::{GraphNode, RenderCtx},
    MAX_BLOCK_SIZE,
};

/// Signal multiplied by a modulator, sample by sample.
///
/// With an envelope as the modulator this is the voice's gain stage.
pub struct Amplify<N, M> {
    pub signal: N,
    pub modulator: M,
    temp_buffer: Vec<f32>,
}

impl<N, M> Amplify<N, M> {
    pub fn new(signal: N, modulator: M) -> Self {
        Self {
            signal,
            modulator,
            temp_buffer: vec![0.0; MAX_BLOCK_SIZE],
        }
    }
}

impl<N: GraphNode, M: GraphNode> GraphNode for Amplify<N, M> {
    fn render_block(&mut self, out: &mut [f32], ctx: &RenderCtx) {
        for (offset, chunk) in out.chunks_mut(MAX_BLOCK_SIZE).enumerate() {
            let chunk_ctx = ctx.at(ctx.frame_time(offset * MAX_BLOCK_SIZE));
            self.signal.render_block(chunk, &chunk_ctx);

            let gains = &mut self.temp_buffer[..chunk.len()];
            self.modulator.render_block(gains, &chunk_ctx);

            for (o, g) in chunk.iter_mut().zip(gains.iter()) {
                *o *= *g;
            }
        }
    }

    fn get_envelope_level(&self) -> Option<f32> {
        self.modulator
            .get_envelope_level()
            .or_else(|| self.signal.get_envelope_level())
    }

    fn is_active(&self) -> bool {
        self.modulator.is_active() && self.signal.is_active()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dsp::envelope::EnvelopeShape;
    use crate::graph::{envelope::EnvNode, extensions::NodeExt, oscillator::OscNode};

    #[test]
    fn output_is_bounded_by_envelope() {
        let shape = EnvelopeShape::default();
        let mut voice = OscNode::triangle().amplify(EnvNode::scheduled(&shape, 0.0));
        let ctx = RenderCtx::from_freq(48_000.0, 440.0);

        // longer than one internal block
        let mut buf = vec![0.0f32; MAX_BLOCK_SIZE * 3 + 7];
        voice.render_block(&mut buf, &ctx);

        assert!(buf.iter().all(|s| s.abs() <= shape.peak + 1e-6));
        assert!(buf.iter().any(|s| s.abs() > 0.1));
        assert_eq!(voice.get_envelope_level(), Some(voice.modulator.envelope().level()));
    }
}
