//! Peshkat - multilingual creator hub
//!
//! Translation, image generation, text-to-speech, a Kurdish writing
//! assistant and English learning search, all backed by a generative AI
//! API. Speech responses arrive as raw PCM and are decoded and played
//! locally.

pub mod api;
pub mod audio;
pub mod error;
pub mod language;
pub mod speech;
pub mod state;
pub mod tasks;

pub use error::{PeshkatError, Result};

/// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
pub const APP_NAME: &str = "peshkat";
