//! Playback state machine
//!
//! A [`Player`] moves `Idle -> Playing -> Idle` for every buffer it plays.
//! Each playback opens its own audio context through a [`PlaybackSession`],
//! which closes the context exactly once however the playback ends.
//!
//! There is no pause, resume or seek: playback always runs to completion.

use super::AudioBuffer;
use crate::{PeshkatError, Result};
use log::{debug, info, warn};

/// Whether audio is currently playing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlaybackState {
    Idle,
    Playing,
}

/// Platform audio output
///
/// Backends implement this to give the player somewhere to send samples.
pub trait AudioOutput: Send {
    /// Short backend name for logs
    fn name(&self) -> &str;

    /// Open a context for one playback at the given format
    fn open(&mut self, sample_rate: u32, channels: u16) -> Result<Box<dyn AudioContext>>;

    /// Why this backend stands in for the one that was asked for
    fn fallback_reason(&self) -> Option<&str> {
        None
    }
}

/// An opened audio context, valid for one playback
pub trait AudioContext: Send {
    /// Play the buffer, returning once playback has completed naturally
    fn render(&mut self, buffer: &AudioBuffer) -> Result<()>;

    /// Release the context's resources
    fn close(&mut self) -> Result<()>;
}

/// Callback told about every state transition
pub type StateObserver = Box<dyn FnMut(PlaybackState) + Send>;

/// Owns the audio context for a single playback
///
/// Closing consumes the session; dropping an unclosed session closes the
/// context too, so it is released on every exit path.
pub struct PlaybackSession {
    context: Option<Box<dyn AudioContext>>,
}

impl PlaybackSession {
    /// Open a context on the output for this buffer's format
    pub fn open(output: &mut dyn AudioOutput, buffer: &AudioBuffer) -> Result<Self> {
        debug!(
            "Opening {} context at {} Hz, {} channel(s)",
            output.name(),
            buffer.sample_rate(),
            buffer.channels()
        );
        let context = output.open(buffer.sample_rate(), buffer.channels())?;
        Ok(Self {
            context: Some(context),
        })
    }

    /// Play the buffer to completion
    ///
    /// Zero-frame buffers are a no-op.
    pub fn render(&mut self, buffer: &AudioBuffer) -> Result<()> {
        if buffer.is_empty() {
            debug!("Empty buffer, nothing to render");
            return Ok(());
        }
        match self.context.as_mut() {
            Some(context) => context.render(buffer),
            None => Ok(()),
        }
    }

    /// Close the context
    pub fn close(mut self) -> Result<()> {
        match self.context.take() {
            Some(mut context) => context.close(),
            None => Ok(()),
        }
    }
}

impl Drop for PlaybackSession {
    fn drop(&mut self) {
        if let Some(mut context) = self.context.take() {
            if let Err(e) = context.close() {
                warn!("Failed to close audio context: {}", e);
            }
        }
    }
}

/// Plays decoded buffers one at a time and tracks playback state
pub struct Player {
    output: Box<dyn AudioOutput>,
    state: PlaybackState,
    observer: Option<StateObserver>,
}

impl Player {
    /// Create an idle player over an output backend
    pub fn new(output: Box<dyn AudioOutput>) -> Self {
        Self {
            output,
            state: PlaybackState::Idle,
            observer: None,
        }
    }

    /// Register a callback for state transitions
    pub fn with_observer(mut self, observer: StateObserver) -> Self {
        self.observer = Some(observer);
        self
    }

    pub fn state(&self) -> PlaybackState {
        self.state
    }

    pub fn is_playing(&self) -> bool {
        self.state == PlaybackState::Playing
    }

    /// Name of the output backend in use
    pub fn output_name(&self) -> &str {
        self.output.name()
    }

    /// Set when the requested backend was unavailable and audio is dropped
    pub fn fallback_reason(&self) -> Option<&str> {
        self.output.fallback_reason()
    }

    /// Play a buffer to completion
    ///
    /// The buffer is consumed and discarded once playback ends. The player
    /// is back to `Idle` when this returns, whether or not it succeeded.
    pub fn play(&mut self, buffer: AudioBuffer) -> Result<()> {
        info!(
            "Playing {} frames ({:.2}s) on {}",
            buffer.frame_count(),
            buffer.duration().as_secs_f64(),
            self.output.name()
        );

        self.transition(PlaybackState::Playing);
        let result = self.run_session(&buffer).map_err(|e| match e {
            PeshkatError::Playback(_) => e,
            other => PeshkatError::Playback(other.to_string()),
        });
        self.transition(PlaybackState::Idle);

        if let Err(ref e) = result {
            warn!("Playback failed: {}", e);
        }
        result
    }

    fn run_session(&mut self, buffer: &AudioBuffer) -> Result<()> {
        let mut session = PlaybackSession::open(self.output.as_mut(), buffer)?;
        session.render(buffer)?;
        session.close()
    }

    fn transition(&mut self, next: PlaybackState) {
        debug!("Playback state {:?} -> {:?}", self.state, next);
        self.state = next;
        if let Some(observer) = self.observer.as_mut() {
            observer(next);
        }
    }
}
