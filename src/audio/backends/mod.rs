//! Audio output backends

// Discards audio, for headless runs and tests
pub mod null;

// Writes each playback to a WAV file
pub mod wav;

// Sound card output through cpal
#[cfg(feature = "cpal-output")]
pub mod device;

use super::AudioOutput;
use crate::Result;
use log::{info, warn};
use std::path::PathBuf;

/// Output used when the config does not say: the sound device if the
/// crate was built with it, WAV files otherwise
pub const DEFAULT_OUTPUT: &str = if cfg!(feature = "cpal-output") {
    "device"
} else {
    "wav"
};

/// Which backend the player should send audio to
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OutputKind {
    /// Drop all samples
    Null,
    /// Write WAV files into a directory
    Wav(PathBuf),
    /// Default sound device
    Device,
}

impl OutputKind {
    /// Parse the `[speech] output` config value
    pub fn parse(value: &str, wav_dir: PathBuf) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "null" | "none" => Some(OutputKind::Null),
            "wav" | "file" => Some(OutputKind::Wav(wav_dir)),
            "device" | "speaker" => Some(OutputKind::Device),
            _ => None,
        }
    }
}

/// Create the requested audio output
///
/// The device backend falls back to the null backend when no sound
/// device is available or the crate was built without `cpal-output`.
/// The fallback output carries the reason in
/// [`AudioOutput::fallback_reason`].
pub fn create_output(kind: &OutputKind) -> Result<Box<dyn AudioOutput>> {
    match kind {
        OutputKind::Null => {
            info!("Using null audio output");
            Ok(Box::new(null::NullOutput::new()))
        }
        OutputKind::Wav(dir) => {
            info!("Writing audio to WAV files in {:?}", dir);
            Ok(Box::new(wav::WavOutput::new(dir.clone())?))
        }
        OutputKind::Device => create_device_output(),
    }
}

#[cfg(feature = "cpal-output")]
fn create_device_output() -> Result<Box<dyn AudioOutput>> {
    info!("Trying sound device backend...");
    match device::DeviceOutput::new() {
        Ok(output) => {
            info!("✓ Successfully initialized sound device backend");
            Ok(Box::new(output))
        }
        Err(e) => {
            warn!("✗ Sound device unavailable: {}", e);
            info!("Falling back to null audio output");
            Ok(Box::new(null::NullOutput::fallback(format!(
                "sound device unavailable: {}",
                e
            ))))
        }
    }
}

#[cfg(not(feature = "cpal-output"))]
fn create_device_output() -> Result<Box<dyn AudioOutput>> {
    warn!("Built without cpal-output, falling back to null audio output");
    Ok(Box::new(null::NullOutput::fallback(
        "built without sound device support (feature cpal-output)",
    )))
}
