//! HTTP client for the generative API
//!
//! The rest of the crate talks to [`GenerativeClient`], so tests and
//! offline runs can swap in their own implementation.

use super::types::{GenerateRequest, GenerateResponse};
use crate::{PeshkatError, Result};
use log::{debug, error};
use std::time::Duration;

/// Public endpoint of the Gemini REST API
pub const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";

/// Something that can answer `generateContent` requests
pub trait GenerativeClient: Send {
    fn generate(&self, request: &GenerateRequest) -> Result<GenerateResponse>;
}

/// Blocking Gemini client over `ureq`
pub struct GeminiClient {
    agent: ureq::Agent,
    base_url: String,
    api_key: String,
}

impl GeminiClient {
    /// Create a client
    ///
    /// Fails if no API key was supplied.
    pub fn new(base_url: &str, api_key: &str, timeout: Duration) -> Result<Self> {
        if api_key.trim().is_empty() {
            return Err(PeshkatError::Config(
                "No API key configured. Set GEMINI_API_KEY or [api] api_key in ~/.peshkat.cfg"
                    .to_string(),
            ));
        }

        let config = ureq::Agent::config_builder()
            .timeout_global(Some(timeout))
            .build();

        Ok(Self {
            agent: ureq::Agent::new_with_config(config),
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key: api_key.trim().to_string(),
        })
    }

    /// URL of the `generateContent` method for a model
    pub fn endpoint(&self, model: &str) -> String {
        format!("{}/models/{}:generateContent", self.base_url, model)
    }
}

impl GenerativeClient for GeminiClient {
    fn generate(&self, request: &GenerateRequest) -> Result<GenerateResponse> {
        let url = self.endpoint(&request.model);
        debug!("POST {}", url);

        let mut response = self
            .agent
            .post(&url)
            .header("x-goog-api-key", &self.api_key)
            .send_json(request)
            .map_err(|e| {
                error!("Request to {} failed: {}", request.model, e);
                PeshkatError::Request(format!("{} request failed: {}", request.model, e))
            })?;

        response
            .body_mut()
            .read_json::<GenerateResponse>()
            .map_err(|e| PeshkatError::Request(format!("Invalid response body: {}", e)))
    }
}
