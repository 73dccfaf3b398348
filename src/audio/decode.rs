//! Base64 PCM payload decoding
//!
//! Speech responses carry raw signed 16-bit little-endian PCM, base64
//! encoded. This turns that payload into normalized per-channel floats.

use crate::{PeshkatError, Result};
use base64::{engine::general_purpose, Engine as _};
use log::debug;
use std::time::Duration;

/// Sample rate of synthesized speech
pub const SPEECH_SAMPLE_RATE: u32 = 24000;

/// Synthesized speech is mono
pub const SPEECH_CHANNELS: u16 = 1;

/// Divisor mapping i16 onto [-1.0, 1.0)
const PCM16_SCALE: f32 = 32768.0;

/// Decoded audio ready for an output backend
///
/// Holds one sample vector per channel, all of the same length.
#[derive(Debug, Clone, PartialEq)]
pub struct AudioBuffer {
    sample_rate: u32,
    channels: Vec<Vec<f32>>,
}

impl AudioBuffer {
    /// Build a buffer from per-channel data
    ///
    /// Fails if there are no channels, the rate is zero, or the channels
    /// differ in length.
    pub fn new(sample_rate: u32, channels: Vec<Vec<f32>>) -> Result<Self> {
        if sample_rate == 0 {
            return Err(PeshkatError::Decode("sample rate must be positive".to_string()));
        }
        if channels.is_empty() {
            return Err(PeshkatError::Decode("buffer needs at least one channel".to_string()));
        }
        let frames = channels[0].len();
        if channels.iter().any(|c| c.len() != frames) {
            return Err(PeshkatError::Decode("channel lengths differ".to_string()));
        }
        Ok(Self { sample_rate, channels })
    }

    pub fn sample_rate(&self) -> u32 {
        self.sample_rate
    }

    /// Number of channels
    pub fn channels(&self) -> u16 {
        self.channels.len() as u16
    }

    /// Number of frames (samples per channel)
    pub fn frame_count(&self) -> usize {
        self.channels.first().map_or(0, Vec::len)
    }

    pub fn is_empty(&self) -> bool {
        self.frame_count() == 0
    }

    /// Samples of one channel
    pub fn channel_data(&self, channel: usize) -> Option<&[f32]> {
        self.channels.get(channel).map(Vec::as_slice)
    }

    /// Playback length at the buffer's sample rate
    pub fn duration(&self) -> Duration {
        Duration::from_secs_f64(self.frame_count() as f64 / self.sample_rate as f64)
    }

    /// Re-interleave channels frame by frame
    ///
    /// Output devices and WAV files both want interleaved samples.
    pub fn interleaved(&self) -> Vec<f32> {
        let frames = self.frame_count();
        let mut out = Vec::with_capacity(frames * self.channels.len());
        for i in 0..frames {
            for channel in &self.channels {
                out.push(channel[i]);
            }
        }
        out
    }
}

/// Decode a standard-alphabet base64 string into raw bytes
pub fn decode_base64(data: &str) -> Result<Vec<u8>> {
    Ok(general_purpose::STANDARD.decode(data.trim())?)
}

/// Turn raw 16-bit little-endian PCM into an [`AudioBuffer`]
///
/// A trailing odd byte is ignored. Samples past the last complete frame
/// are dropped, so `frame_count = samples / channels`.
pub fn decode_pcm16(bytes: &[u8], sample_rate: u32, channels: u16) -> Result<AudioBuffer> {
    if channels == 0 {
        return Err(PeshkatError::Decode("channel count must be positive".to_string()));
    }

    let raw: Vec<i16> = bytes
        .chunks_exact(2)
        .map(|pair| i16::from_le_bytes([pair[0], pair[1]]))
        .collect();

    let channel_count = channels as usize;
    let frame_count = raw.len() / channel_count;

    let mut data: Vec<Vec<f32>> = (0..channel_count)
        .map(|_| Vec::with_capacity(frame_count))
        .collect();
    for (c, channel) in data.iter_mut().enumerate() {
        for i in 0..frame_count {
            channel.push(raw[i * channel_count + c] as f32 / PCM16_SCALE);
        }
    }

    debug!(
        "Decoded {} bytes into {} frames x {} channels at {} Hz",
        bytes.len(),
        frame_count,
        channels,
        sample_rate
    );

    AudioBuffer::new(sample_rate, data)
}

/// Base64 payload straight to a playable buffer
pub fn decode_audio(base64: &str, sample_rate: u32, channels: u16) -> Result<AudioBuffer> {
    let bytes = decode_base64(base64)?;
    decode_pcm16(&bytes, sample_rate, channels)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_sample() {
        let buffer = decode_pcm16(&[0x00, 0x00], SPEECH_SAMPLE_RATE, 1).unwrap();
        assert_eq!(buffer.channel_data(0).unwrap(), &[0.0]);
    }

    #[test]
    fn test_max_sample() {
        let buffer = decode_pcm16(&[0xFF, 0x7F], SPEECH_SAMPLE_RATE, 1).unwrap();
        let sample = buffer.channel_data(0).unwrap()[0];
        assert!((sample - 0.99997).abs() < 1e-5);
    }

    #[test]
    fn test_min_sample() {
        let buffer = decode_pcm16(&[0x00, 0x80], SPEECH_SAMPLE_RATE, 1).unwrap();
        assert_eq!(buffer.channel_data(0).unwrap()[0], -1.0);
    }

    #[test]
    fn test_odd_byte_dropped() {
        let buffer = decode_pcm16(&[0x00, 0x40, 0x7F], SPEECH_SAMPLE_RATE, 1).unwrap();
        assert_eq!(buffer.frame_count(), 1);
        assert_eq!(buffer.channel_data(0).unwrap()[0], 0.5);
    }

    #[test]
    fn test_incomplete_frame_dropped() {
        // three samples, two channels -> one frame
        let bytes = [0x00, 0x40, 0x00, 0xC0, 0x00, 0x20];
        let buffer = decode_pcm16(&bytes, SPEECH_SAMPLE_RATE, 2).unwrap();
        assert_eq!(buffer.frame_count(), 1);
        assert_eq!(buffer.channel_data(0).unwrap(), &[0.5]);
        assert_eq!(buffer.channel_data(1).unwrap(), &[-0.5]);
    }

    #[test]
    fn test_deinterleave_stereo() {
        let bytes = [0x00, 0x40, 0x00, 0x00, 0x00, 0xC0, 0x00, 0x20];
        let buffer = decode_pcm16(&bytes, 48000, 2).unwrap();
        assert_eq!(buffer.channel_data(0).unwrap(), &[0.5, -0.5]);
        assert_eq!(buffer.channel_data(1).unwrap(), &[0.0, 0.25]);
        assert_eq!(buffer.interleaved(), vec![0.5, 0.0, -0.5, 0.25]);
    }

    #[test]
    fn test_zero_channels_rejected() {
        assert!(matches!(
            decode_pcm16(&[0, 0], SPEECH_SAMPLE_RATE, 0),
            Err(PeshkatError::Decode(_))
        ));
    }

    #[test]
    fn test_zero_sample_rate_rejected() {
        assert!(decode_pcm16(&[0, 0], 0, 1).is_err());
    }

    #[test]
    fn test_empty_base64() {
        let buffer = decode_audio("", SPEECH_SAMPLE_RATE, SPEECH_CHANNELS).unwrap();
        assert!(buffer.is_empty());
        assert_eq!(buffer.channels(), 1);
        assert_eq!(buffer.duration(), Duration::ZERO);
    }

    #[test]
    fn test_malformed_base64() {
        let err = decode_audio("not*base64", SPEECH_SAMPLE_RATE, 1).unwrap_err();
        assert!(matches!(err, PeshkatError::Decode(_)));
    }

    #[test]
    fn test_base64_payload() {
        // "AAD/fw==" -> [0x00, 0x00, 0xFF, 0x7F]
        let buffer = decode_audio("AAD/fw==", SPEECH_SAMPLE_RATE, 1).unwrap();
        assert_eq!(buffer.frame_count(), 2);
        assert_eq!(buffer.sample_rate(), 24000);
    }

    #[test]
    fn test_duration() {
        let bytes = vec![0u8; 48000];
        let buffer = decode_pcm16(&bytes, SPEECH_SAMPLE_RATE, 1).unwrap();
        assert_eq!(buffer.duration(), Duration::from_secs(1));
    }
}
