//! Format conversion for output devices
//!
//! Speech arrives as 24 kHz mono, which many devices refuse. Buffers are
//! remixed to the device's channel count and linearly resampled to its
//! rate before they are queued.

use super::AudioBuffer;
use crate::Result;

/// Linear resampling of one channel (good enough for speech)
pub fn resample_linear(samples: &[f32], from_rate: u32, to_rate: u32) -> Vec<f32> {
    if from_rate == to_rate || samples.is_empty() || from_rate == 0 || to_rate == 0 {
        return samples.to_vec();
    }

    let ratio = from_rate as f64 / to_rate as f64;
    let new_len = (samples.len() as f64 / ratio) as usize;
    let mut output = Vec::with_capacity(new_len);

    for i in 0..new_len {
        let src_pos = i as f64 * ratio;
        let src_idx = src_pos as usize;
        let frac = src_pos - src_idx as f64;

        let s1 = samples.get(src_idx).copied().unwrap_or(0.0);
        let s2 = samples.get(src_idx + 1).copied().unwrap_or(s1);

        output.push((s1 as f64 * (1.0 - frac) + s2 as f64 * frac) as f32);
    }

    output
}

/// Remix to `channels` output channels
///
/// Folding down to mono averages every source channel. Otherwise output
/// channel `c` takes source channel `c % source_channels`, so mono is
/// copied to every speaker.
pub fn remix(buffer: &AudioBuffer, channels: u16) -> Vec<Vec<f32>> {
    let source: Vec<&[f32]> = (0..buffer.channels() as usize)
        .filter_map(|c| buffer.channel_data(c))
        .collect();

    if channels == 1 && source.len() > 1 {
        let scale = 1.0 / source.len() as f32;
        let mixed = (0..buffer.frame_count())
            .map(|i| source.iter().map(|ch| ch[i]).sum::<f32>() * scale)
            .collect();
        return vec![mixed];
    }

    (0..channels as usize)
        .map(|c| source[c % source.len()].to_vec())
        .collect()
}

/// Convert a buffer to the given rate and channel count
pub fn adapt(buffer: &AudioBuffer, sample_rate: u32, channels: u16) -> Result<AudioBuffer> {
    if buffer.sample_rate() == sample_rate && buffer.channels() == channels {
        return Ok(buffer.clone());
    }

    let channels = remix(buffer, channels)
        .iter()
        .map(|ch| resample_linear(ch, buffer.sample_rate(), sample_rate))
        .collect();
    AudioBuffer::new(sample_rate, channels)
}
