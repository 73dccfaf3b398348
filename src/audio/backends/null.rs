//! Null audio backend
//!
//! Accepts every format and completes playback immediately. Used when no
//! sound device is wanted, or in place of one that is unavailable.

use crate::audio::{AudioBuffer, AudioContext, AudioOutput};
use crate::Result;
use log::debug;

#[derive(Default)]
pub struct NullOutput {
    /// Set when standing in for an unavailable backend
    reason: Option<String>,
}

impl NullOutput {
    pub fn new() -> Self {
        Self { reason: None }
    }

    /// Null output replacing a backend that could not be used
    pub fn fallback(reason: impl Into<String>) -> Self {
        Self {
            reason: Some(reason.into()),
        }
    }
}

struct NullContext;

impl AudioOutput for NullOutput {
    fn name(&self) -> &str {
        "null"
    }

    fn open(&mut self, _sample_rate: u32, _channels: u16) -> Result<Box<dyn AudioContext>> {
        Ok(Box::new(NullContext))
    }

    fn fallback_reason(&self) -> Option<&str> {
        self.reason.as_deref()
    }
}

impl AudioContext for NullContext {
    fn render(&mut self, buffer: &AudioBuffer) -> Result<()> {
        debug!("Discarding {} frames", buffer.frame_count());
        Ok(())
    }

    fn close(&mut self) -> Result<()> {
        Ok(())
    }
}
