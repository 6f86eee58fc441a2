use crate::dsp::oscillator::{OscillatorBlock, OscillatorWaveform};
use crate::graph::node::{GraphNode, RenderCtx};

/*
Audio Oscillator
================

The raw tone of every voice. The node follows the pitch carried by the
render context, so one factory can stamp out voices for any key.

Waveform Character:
-------------------

Sine:     pure fundamental, no overtones. Smooth, hollow.
Triangle: odd harmonics falling off as 1/n². Soft, flute-like; the
          default piano voice.
Sawtooth: every harmonic at 1/n. Bright and buzzy.
Square:   odd harmonics at 1/n. Hollow, woody.

Example usage:
  let osc = OscNode::triangle();
  let voice = osc.amplify(EnvNode::scheduled(&EnvelopeShape::default(), now));
*/

pub struct OscNode {
    osc: OscillatorBlock,
}

impl OscNode {
    pub fn new(waveform: OscillatorWaveform) -> Self {
        Self {
            osc: OscillatorBlock::new(waveform),
        }
    }

    pub fn sine() -> Self {
        Self::new(OscillatorWaveform::Sine)
    }

    pub fn sawtooth() -> Self {
        Self::new(OscillatorWaveform::Saw)
    }

    pub fn square() -> Self {
        Self::new(OscillatorWaveform::Square)
    }

    pub fn triangle() -> Self {
        Self::new(OscillatorWaveform::Triangle)
    }

    pub fn waveform(&self) -> OscillatorWaveform {
        self.osc.waveform()
    }
}

impl GraphNode for OscNode {
    fn render_block(&mut self, out: &mut [f32], ctx: &RenderCtx) {
        self.osc.render(out, ctx.frequency, ctx.sample_rate);
    }
}
