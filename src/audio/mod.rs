//! Audio decoding and playback

pub mod backends;
pub mod convert;
pub mod decode;
pub mod playback;

pub use backends::{create_output, OutputKind};
pub use decode::{
    decode_audio, decode_base64, decode_pcm16, AudioBuffer, SPEECH_CHANNELS, SPEECH_SAMPLE_RATE,
};
pub use playback::{AudioContext, AudioOutput, PlaybackSession, PlaybackState, Player};
