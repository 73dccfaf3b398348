//! Turns feature profiles into requests and sends them

use super::client::GenerativeClient;
use super::features::{render_template, Feature};
use super::types::{
    Content, GenerateRequest, GenerateResponse, GenerationConfig, GoogleSearch, ImageConfig,
    InlineData, Part, SpeechConfig, Tool,
};
use crate::Result;
use log::{debug, info};
use std::collections::HashMap;

/// Builds requests from [`Feature`] profiles and hands them to a client
///
/// Model names and the speech voice can be overridden per instance;
/// everything else comes from the feature table.
pub struct Dispatcher {
    client: Box<dyn GenerativeClient>,
    models: HashMap<Feature, String>,
    voice: Option<String>,
}

impl Dispatcher {
    pub fn new(client: Box<dyn GenerativeClient>) -> Self {
        Self {
            client,
            models: HashMap::new(),
            voice: None,
        }
    }

    /// Use a different model for one feature
    pub fn with_model(mut self, feature: Feature, model: impl Into<String>) -> Self {
        self.models.insert(feature, model.into());
        self
    }

    /// Use a different prebuilt voice for audio features
    pub fn with_voice(mut self, voice: impl Into<String>) -> Self {
        self.voice = Some(voice.into());
        self
    }

    /// Model the feature's requests go to
    pub fn model_for(&self, feature: Feature) -> &str {
        self.models
            .get(&feature)
            .map(String::as_str)
            .unwrap_or(feature.profile().model)
    }

    /// Voice used for audio features
    pub fn voice_for(&self, feature: Feature) -> Option<&str> {
        let profile = feature.profile();
        if profile.voice.is_none() {
            return None;
        }
        self.voice.as_deref().or(profile.voice)
    }

    /// Build the request for a feature
    ///
    /// `vars` fill the feature's prompt template; `attachments` go before
    /// the prompt as inline parts.
    pub fn build_request(
        &self,
        feature: Feature,
        vars: &[(&str, &str)],
        attachments: Vec<InlineData>,
    ) -> GenerateRequest {
        let profile = feature.profile();
        let prompt = render_template(profile.prompt_template, vars);

        let mut parts: Vec<Part> = attachments
            .into_iter()
            .map(|data| Part::inline(data.mime_type, data.data))
            .collect();
        parts.push(Part::text(prompt));

        let mut request = GenerateRequest::new(self.model_for(feature), parts);

        request.system_instruction = profile.system_instruction.map(|text| Content {
            role: None,
            parts: vec![Part::text(text)],
        });

        let config = GenerationConfig {
            response_modalities: profile
                .modality
                .response_modality()
                .map(|m| vec![m.to_string()])
                .unwrap_or_default(),
            speech_config: self.voice_for(feature).map(SpeechConfig::prebuilt),
            image_config: profile.aspect_ratio.map(|ratio| ImageConfig {
                aspect_ratio: ratio.to_string(),
            }),
        };
        if config != GenerationConfig::default() {
            request.generation_config = Some(config);
        }

        if profile.search {
            request.tools.push(Tool {
                google_search: GoogleSearch {},
            });
        }

        request
    }

    /// Build and send a feature request
    pub fn dispatch(
        &self,
        feature: Feature,
        vars: &[(&str, &str)],
        attachments: Vec<InlineData>,
    ) -> Result<GenerateResponse> {
        let request = self.build_request(feature, vars, attachments);
        info!("Dispatching {} request to {}", feature, request.model);
        debug!("Prompt: {}", request.prompt_text());
        self.client.generate(&request)
    }
}
