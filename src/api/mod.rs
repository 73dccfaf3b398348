//! Generative API access
//!
//! Envelopes, the HTTP client, the per-feature request table and the
//! dispatcher that ties them together.

pub mod client;
pub mod dispatch;
pub mod features;
pub mod types;

pub use client::{GeminiClient, GenerativeClient, DEFAULT_BASE_URL};
pub use dispatch::Dispatcher;
pub use features::{Feature, FeatureProfile, Modality};
pub use types::{GenerateRequest, GenerateResponse, InlineData, Part, Resource};
