//! Speech synthesis system

pub mod synth;

pub use synth::{Outcome, RequestTicket, SpeechFormat, SpeechService, Synthesis};
