//! Error types for Peshkat

use std::io;
use thiserror::Error;

/// Main error type for Peshkat
#[derive(Error, Debug)]
pub enum PeshkatError {
    #[error("Audio decode error: {0}")]
    Decode(String),

    #[error("Speech synthesis request failed: {0}")]
    SynthesisRequest(String),

    #[error("Playback error: {0}")]
    Playback(String),

    #[error("API request failed: {0}")]
    Request(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("INI parse error: {0}")]
    IniParse(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("{0}")]
    Other(String),
}

/// Result type alias for Peshkat operations
pub type Result<T> = std::result::Result<T, PeshkatError>;

impl From<String> for PeshkatError {
    fn from(s: String) -> Self {
        PeshkatError::Other(s)
    }
}

impl From<&str> for PeshkatError {
    fn from(s: &str) -> Self {
        PeshkatError::Other(s.to_string())
    }
}

impl From<base64::DecodeError> for PeshkatError {
    fn from(e: base64::DecodeError) -> Self {
        PeshkatError::Decode(format!("invalid base64: {}", e))
    }
}

impl From<ureq::Error> for PeshkatError {
    fn from(e: ureq::Error) -> Self {
        PeshkatError::Request(e.to_string())
    }
}
