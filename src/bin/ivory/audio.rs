//! cpal output stream driving the mixer

use color_eyre::eyre::{eyre, Result as EyreResult, WrapErr};
use cpal::traits::{DeviceTrait, HostTrait, StreamTrait};
use rtrb::{Consumer, PushError, RingBuffer};

use ivory::{audio::AudioContext, config::PianoConfig, MAX_BLOCK_SIZE};

/// Mono samples kept for the scope.
pub const SCOPE_LEN: usize = 1024;
// capacity in blocks for the audio → UI ring
const SCOPE_RING_BLOCKS: usize = 16;

pub struct Output {
    pub scope_rx: Consumer<f32>,
    pub sample_rate: f32,
    pub channels: usize,
    // dropping the stream stops playback
    _stream: cpal::Stream,
}

/// Open the default output device and start the mixer on it.
pub fn open(config: &PianoConfig) -> EyreResult<(AudioContext, Output)> {
    let host = cpal::default_host();
    log::info!("cpal host: {}", host.id().name());

    let device = host
        .default_output_device()
        .ok_or_else(|| eyre!("no default output device available"))?;
    match device.name() {
        Ok(name) => log::info!("cpal device: {name}"),
        Err(_) => log::info!("cpal device: (no name)"),
    }

    let supported = device
        .default_output_config()
        .wrap_err("failed to fetch default output config")?;
    let sample_rate = supported.sample_rate().0 as f32;
    let channels = supported.channels() as usize;
    log::info!("sample rate: {sample_rate}, channels: {channels}");

    let (context, mut mixer) = AudioContext::new(sample_rate, config.queue_capacity);
    let (mut scope_tx, scope_rx) = RingBuffer::<f32>::new(SCOPE_LEN * SCOPE_RING_BLOCKS);
    let mut render_buf = vec![0.0f32; MAX_BLOCK_SIZE];

    let stream = device
        .build_output_stream(
            &supported.into(),
            move |data: &mut [f32], _| {
                let total_frames = data.len() / channels;
                let mut frames_written = 0;
                while frames_written < total_frames {
                    let frames_to_render = (total_frames - frames_written).min(MAX_BLOCK_SIZE);

                    let block = &mut render_buf[..frames_to_render];
                    mixer.render_block(block);

                    // Duplicate mono to all channels and write to device
                    let out_off = frames_written * channels;
                    for (i, &s) in block.iter().enumerate() {
                        for ch in 0..channels {
                            data[out_off + i * channels + ch] = s;
                        }
                    }

                    // Push mono block to UI ring, non-blocking (drop on overflow)
                    for &s in block.iter() {
                        if let Err(PushError::Full(_)) = scope_tx.push(s) {
                            break;
                        }
                    }

                    frames_written += frames_to_render;
                }
            },
            |err| log::error!("stream error: {err}"),
            None,
        )
        .wrap_err("failed to build output stream")?;

    stream.play().wrap_err("failed to start output stream")?;

    let output = Output {
        scope_rx,
        sample_rate,
        channels,
        _stream: stream,
    };
    Ok((context, output))
}
