//! Output pipeline: a cpal stream pulling from the tone engine.

use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Arc;
use std::time::Duration;

use color_eyre::eyre::{eyre, Result as EyreResult, WrapErr};
use cpal::traits::{DeviceTrait, HostTrait, StreamTrait};
use rtrb::{Consumer, RingBuffer};

use tonesynth::{
    io::volume::log_to_linear, synth::BlockMeter, AudioFormat, SampleStream, SessionConfig,
    SharedToneEngine, SynthError, ToneHandle, UnderrunSignal, MAX_BLOCK_SIZE,
};

/// Samples buffered for the oscilloscope and spectrum views
const SCOPE_QUEUE_SIZE: usize = 8192;

/// Linear output gain shared with the audio callback.
#[derive(Clone)]
pub struct Gain(Arc<AtomicU32>);

impl Gain {
    /// Gain for a volume on the logarithmic scale.
    pub fn from_volume(volume: f32) -> Self {
        Self(Arc::new(AtomicU32::new(log_to_linear(volume).to_bits())))
    }

    pub fn set_volume(&self, volume: f32) {
        self.0.store(log_to_linear(volume).to_bits(), Ordering::Relaxed);
    }

    pub fn get(&self) -> f32 {
        f32::from_bits(self.0.load(Ordering::Relaxed))
    }
}

/// A running output stream and the handles the control side needs.
pub struct AudioOutput {
    stream: cpal::Stream,
    pub handle: ToneHandle,
    pub meter: BlockMeter,
    pub underruns: UnderrunSignal,
    pub scope_rx: Consumer<f32>,
    pub device_name: String,
    pub channels: u16,
    /// Buffer length the device actually accepted
    pub buffer: Duration,
}

impl AudioOutput {
    /// Open the default output device and start pulling from a fresh engine.
    pub fn open(config: &SessionConfig, gain: &Gain) -> EyreResult<Self> {
        let host = cpal::default_host();
        let device = host
            .default_output_device()
            .ok_or_else(|| eyre!("no default output device available"))?;
        let device_name = device.name().unwrap_or_else(|_| "unknown device".into());

        let format = config.format()?;
        let supported = negotiate(&device, &device_name, &format)?;
        let channels = supported.channels();

        let requested = format.frames_for_duration(config.buffer_duration()) as u32;
        let frames = match supported.buffer_size() {
            cpal::SupportedBufferSize::Range { min, max } => requested.clamp(*min, *max),
            cpal::SupportedBufferSize::Unknown => requested,
        };
        let buffer = format.duration_for_frames(frames as usize);

        log::info!(
            "opening {device_name}: {} Hz, {channels} channel(s), {frames} frames ({} ms)",
            format.sample_rate(),
            buffer.as_millis()
        );

        let stream_config = cpal::StreamConfig {
            channels,
            sample_rate: cpal::SampleRate(format.sample_rate()),
            buffer_size: cpal::BufferSize::Fixed(frames),
        };

        let (mut node, mut handle) = SharedToneEngine::new(format);
        handle.set_octave(config.octave);
        let meter = node.engine().meter();
        let underruns = UnderrunSignal::new();

        let (mut scope_tx, scope_rx) = RingBuffer::<f32>::new(SCOPE_QUEUE_SIZE);
        let mut render_buf = vec![0.0f32; MAX_BLOCK_SIZE];
        let gain = gain.clone();
        let frame_width = channels as usize;

        let error_signal = underruns.clone();
        let stream = device
            .build_output_stream(
                &stream_config,
                move |data: &mut [f32], _| {
                    let gain = gain.get();

                    for chunk in data.chunks_mut(MAX_BLOCK_SIZE * frame_width) {
                        let block = &mut render_buf[..chunk.len() / frame_width];
                        node.render(block);

                        // Mono to every device channel
                        for (frame, &sample) in chunk.chunks_exact_mut(frame_width).zip(block.iter()) {
                            frame.fill(sample * gain);
                        }

                        for &sample in block.iter() {
                            if scope_tx.push(sample).is_err() {
                                break;
                            }
                        }
                    }
                },
                move |err| match err {
                    cpal::StreamError::BackendSpecific { err }
                        if reports_underrun(&err.description) =>
                    {
                        log::warn!("audio backend reported: {err}");
                        error_signal.raise();
                    }
                    other => log::error!("audio stream error: {other}"),
                },
                None,
            )
            .wrap_err("failed to build output stream")?;

        handle.start();
        stream.play().wrap_err("failed to start output stream")?;

        Ok(Self {
            stream,
            handle,
            meter,
            underruns,
            scope_rx,
            device_name,
            channels,
            buffer,
        })
    }

    /// Close the engine channel and pause the device.
    pub fn stop(&self) {
        self.handle.stop();
        if let Err(err) = self.stream.pause() {
            log::warn!("failed to pause output stream: {err}");
        }
    }
}

/// cpal has no dedicated underrun callback. Backends report xruns as
/// backend-specific stream errors, so their text is the only signal.
fn reports_underrun(description: &str) -> bool {
    let description = description.to_ascii_lowercase();
    ["underrun", "xrun", "broken pipe"]
        .iter()
        .any(|needle| description.contains(needle))
}

/// Pick a device configuration that renders f32 at the engine's rate,
/// preferring the fewest channels.
fn negotiate(
    device: &cpal::Device,
    device_name: &str,
    format: &AudioFormat,
) -> EyreResult<cpal::SupportedStreamConfig> {
    let rate = cpal::SampleRate(format.sample_rate());
    let configs = device
        .supported_output_configs()
        .wrap_err("failed to query output configs")?;

    configs
        .filter(|range| range.sample_format() == cpal::SampleFormat::F32)
        .filter(|range| range.min_sample_rate() <= rate && rate <= range.max_sample_rate())
        .min_by_key(|range| range.channels())
        .map(|range| range.with_sample_rate(rate))
        .ok_or_else(|| {
            SynthError::FormatUnsupported {
                device: device_name.to_string(),
                sample_rate: format.sample_rate(),
            }
            .into()
        })
}
