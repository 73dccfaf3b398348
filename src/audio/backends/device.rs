//! Sound device backend using cpal
//!
//! Each playback builds an output stream on the default device in the
//! device's own format. Buffers are remixed and resampled to that format,
//! fed from a sample queue, and the render waits until the callback has
//! output a full period of silence after the queue drained.

use crate::audio::convert::adapt;
use crate::audio::{AudioBuffer, AudioContext, AudioOutput};
use crate::{PeshkatError, Result};
use cpal::traits::{DeviceTrait, HostTrait, StreamTrait};
use log::{debug, error, info, warn};
use std::collections::VecDeque;
use std::sync::mpsc;
use std::time::Duration;

/// Extra time allowed past the buffer's length before giving up
const COMPLETION_SLACK: Duration = Duration::from_secs(2);

/// Let the hardware play out the silent period
const DRAIN_GRACE: Duration = Duration::from_millis(50);

pub struct DeviceOutput {
    device_name: String,
}

impl DeviceOutput {
    /// Check that a default output device exists
    pub fn new() -> Result<Self> {
        let host = cpal::default_host();
        let device = host
            .default_output_device()
            .ok_or_else(|| PeshkatError::Playback("No audio output device found".to_string()))?;
        let device_name = device.name().unwrap_or_else(|_| "default".to_string());
        debug!("Default output device: {}", device_name);
        Ok(Self { device_name })
    }
}

struct DeviceContext {
    device: cpal::Device,
    config: cpal::StreamConfig,
}

impl AudioOutput for DeviceOutput {
    fn name(&self) -> &str {
        &self.device_name
    }

    fn open(&mut self, sample_rate: u32, channels: u16) -> Result<Box<dyn AudioContext>> {
        let device = cpal::default_host()
            .default_output_device()
            .ok_or_else(|| PeshkatError::Playback("Audio output device disappeared".to_string()))?;

        // Many devices reject 24 kHz mono, so play in the device's format
        let config: cpal::StreamConfig = match device.default_output_config() {
            Ok(supported) => supported.config(),
            Err(e) => {
                warn!("No default output config ({}), using stereo at source rate", e);
                cpal::StreamConfig {
                    channels: 2,
                    sample_rate: cpal::SampleRate(sample_rate),
                    buffer_size: cpal::BufferSize::Default,
                }
            }
        };
        info!(
            "Output stream {} ch @ {} Hz for {} ch @ {} Hz source",
            config.channels, config.sample_rate.0, channels, sample_rate
        );

        Ok(Box::new(DeviceContext { device, config }))
    }
}

impl DeviceContext {
    /// Build the stream, trying f32 samples first and i16 second
    fn build_stream(
        &self,
        samples: Vec<f32>,
        done_tx: mpsc::Sender<()>,
    ) -> Result<cpal::Stream> {
        let mut pending: VecDeque<f32> = samples.into();
        let fallback = pending.clone();
        let fallback_tx = done_tx.clone();

        let f32_stream = self.device.build_output_stream(
            &self.config,
            move |data: &mut [f32], _: &cpal::OutputCallbackInfo| {
                let drained = pending.is_empty();
                for sample in data.iter_mut() {
                    *sample = pending.pop_front().unwrap_or(0.0);
                }
                if drained {
                    let _ = done_tx.send(());
                }
            },
            |err| error!("Audio stream error: {}", err),
            None,
        );

        match f32_stream {
            Ok(stream) => Ok(stream),
            Err(e) => {
                warn!("Failed to create f32 stream ({}), trying i16", e);
                let mut pending = fallback;
                self.device
                    .build_output_stream(
                        &self.config,
                        move |data: &mut [i16], _: &cpal::OutputCallbackInfo| {
                            let drained = pending.is_empty();
                            for sample in data.iter_mut() {
                                let value = pending.pop_front().unwrap_or(0.0);
                                *sample = (value * 32767.0).clamp(-32768.0, 32767.0) as i16;
                            }
                            if drained {
                                let _ = fallback_tx.send(());
                            }
                        },
                        |err| error!("Audio stream error: {}", err),
                        None,
                    )
                    .map_err(|e| {
                        PeshkatError::Playback(format!("Failed to build output stream: {}", e))
                    })
            }
        }
    }
}

impl AudioContext for DeviceContext {
    fn render(&mut self, buffer: &AudioBuffer) -> Result<()> {
        let adapted = adapt(buffer, self.config.sample_rate.0, self.config.channels)?;
        let (done_tx, done_rx) = mpsc::channel();
        let stream = self.build_stream(adapted.interleaved(), done_tx)?;

        stream
            .play()
            .map_err(|e| PeshkatError::Playback(format!("Failed to start stream: {}", e)))?;

        // A callback that starts with an empty queue outputs only silence,
        // so everything queued before it has reached the device
        let timeout = adapted.duration() + COMPLETION_SLACK;
        done_rx
            .recv_timeout(timeout)
            .map_err(|_| PeshkatError::Playback("Playback did not complete".to_string()))?;
        std::thread::sleep(DRAIN_GRACE);

        Ok(())
    }

    fn close(&mut self) -> Result<()> {
        debug!("Device context closed");
        Ok(())
    }
}
