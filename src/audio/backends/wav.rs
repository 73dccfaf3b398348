//! WAV file backend
//!
//! Every playback becomes a numbered 16-bit WAV file (`speech-001.wav`,
//! `speech-002.wav`, ...) in the configured directory. Existing files are
//! never overwritten.

use crate::audio::{AudioBuffer, AudioContext, AudioOutput};
use crate::{PeshkatError, Result};
use hound::{SampleFormat, WavSpec, WavWriter};
use log::{debug, info};
use std::fs::{self, File};
use std::io::BufWriter;
use std::path::PathBuf;

/// Writes playbacks into a directory
pub struct WavOutput {
    dir: PathBuf,
    next_index: u32,
}

impl WavOutput {
    /// Create the backend, making the directory if needed
    pub fn new(dir: PathBuf) -> Result<Self> {
        fs::create_dir_all(&dir)?;
        Ok(Self { dir, next_index: 1 })
    }

    /// Next unused `speech-NNN.wav` path
    fn next_path(&mut self) -> PathBuf {
        loop {
            let path = self.dir.join(format!("speech-{:03}.wav", self.next_index));
            self.next_index += 1;
            if !path.exists() {
                return path;
            }
        }
    }
}

struct WavContext {
    path: PathBuf,
    writer: Option<WavWriter<BufWriter<File>>>,
}

impl AudioOutput for WavOutput {
    fn name(&self) -> &str {
        "wav"
    }

    fn open(&mut self, sample_rate: u32, channels: u16) -> Result<Box<dyn AudioContext>> {
        let path = self.next_path();
        let spec = WavSpec {
            channels,
            sample_rate,
            bits_per_sample: 16,
            sample_format: SampleFormat::Int,
        };
        debug!("Creating {:?}", path);
        let writer = WavWriter::create(&path, spec)
            .map_err(|e| PeshkatError::Playback(format!("Failed to create {:?}: {}", path, e)))?;

        Ok(Box::new(WavContext {
            path,
            writer: Some(writer),
        }))
    }
}

/// Float sample back to 16-bit PCM
fn to_pcm16(sample: f32) -> i16 {
    (sample * 32768.0).round().clamp(i16::MIN as f32, i16::MAX as f32) as i16
}

impl AudioContext for WavContext {
    fn render(&mut self, buffer: &AudioBuffer) -> Result<()> {
        let writer = self
            .writer
            .as_mut()
            .ok_or_else(|| PeshkatError::Playback("WAV context already closed".to_string()))?;

        for sample in buffer.interleaved() {
            writer
                .write_sample(to_pcm16(sample))
                .map_err(|e| PeshkatError::Playback(format!("WAV write failed: {}", e)))?;
        }
        Ok(())
    }

    fn close(&mut self) -> Result<()> {
        if let Some(writer) = self.writer.take() {
            writer
                .finalize()
                .map_err(|e| PeshkatError::Playback(format!("WAV finalize failed: {}", e)))?;
            info!("Wrote {:?}", self.path);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audio::decode_pcm16;
    use crate::audio::Player;

    #[test]
    fn test_pcm16_conversion() {
        assert_eq!(to_pcm16(0.0), 0);
        assert_eq!(to_pcm16(-1.0), i16::MIN);
        assert_eq!(to_pcm16(32767.0 / 32768.0), i16::MAX);
        assert_eq!(to_pcm16(1.5), i16::MAX);
    }

    #[test]
    fn test_writes_wav_file() {
        let dir = tempfile::tempdir().unwrap();
        let output = WavOutput::new(dir.path().to_path_buf()).unwrap();
        let mut player = Player::new(Box::new(output));

        let bytes = [0x00, 0x40, 0x00, 0xC0, 0xFF, 0x7F];
        player.play(decode_pcm16(&bytes, 24000, 1).unwrap()).unwrap();

        let path = dir.path().join("speech-001.wav");
        let mut reader = hound::WavReader::open(&path).unwrap();
        assert_eq!(reader.spec().sample_rate, 24000);
        assert_eq!(reader.spec().channels, 1);
        let samples: Vec<i16> = reader.samples::<i16>().map(|s| s.unwrap()).collect();
        assert_eq!(samples, vec![16384, -16384, 32767]);
    }

    #[test]
    fn test_does_not_overwrite() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("speech-001.wav"), b"taken").unwrap();

        let mut output = WavOutput::new(dir.path().to_path_buf()).unwrap();
        let mut context = output.open(24000, 1).unwrap();
        context.close().unwrap();

        assert!(dir.path().join("speech-002.wav").exists());
        assert_eq!(fs::read(dir.path().join("speech-001.wav")).unwrap(), b"taken");
    }
}
