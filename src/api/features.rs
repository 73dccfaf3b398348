//! Per-feature request profiles
//!
//! Each hub feature is described here once: which model it uses, its
//! system instruction, how its prompt is built and which generation
//! options it needs. Request construction reads this table instead of
//! assembling prompts inline.

use std::fmt;

/// A feature of the hub that talks to the generative API
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Feature {
    Translate,
    Write,
    Learn,
    Image,
    ImageEdit,
    Speech,
}

impl Feature {
    pub const ALL: [Feature; 6] = [
        Feature::Translate,
        Feature::Write,
        Feature::Learn,
        Feature::Image,
        Feature::ImageEdit,
        Feature::Speech,
    ];

    /// Key used in the `[models]` config section
    pub fn key(self) -> &'static str {
        match self {
            Feature::Translate => "translate",
            Feature::Write => "write",
            Feature::Learn => "learn",
            Feature::Image => "image",
            Feature::ImageEdit => "image_edit",
            Feature::Speech => "speech",
        }
    }

    pub fn from_key(key: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|f| f.key() == key)
    }

    /// Static profile for this feature
    pub fn profile(self) -> &'static FeatureProfile {
        FEATURES
            .iter()
            .find(|p| p.feature == self)
            .unwrap_or(&FEATURES[0])
    }
}

impl fmt::Display for Feature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// What the feature expects back
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Modality {
    Text,
    Image,
    Audio,
}

impl Modality {
    /// Value for `responseModalities`, when one must be sent
    pub fn response_modality(self) -> Option<&'static str> {
        match self {
            Modality::Text | Modality::Image => None,
            Modality::Audio => Some("AUDIO"),
        }
    }
}

/// Declarative description of one feature's requests
#[derive(Debug, Clone, PartialEq)]
pub struct FeatureProfile {
    pub feature: Feature,
    pub model: &'static str,
    pub system_instruction: Option<&'static str>,
    /// Prompt with `{name}` placeholders
    pub prompt_template: &'static str,
    pub modality: Modality,
    /// Prebuilt voice, for audio features
    pub voice: Option<&'static str>,
    /// Attach the Google Search grounding tool
    pub search: bool,
    pub aspect_ratio: Option<&'static str>,
}

pub const TEXT_MODEL: &str = "gemini-3-flash-preview";
pub const IMAGE_MODEL: &str = "gemini-2.5-flash-image";
pub const SPEECH_MODEL: &str = "gemini-2.5-flash-preview-tts";
pub const DEFAULT_VOICE: &str = "Kore";

/// Tone requested for synthesized speech
pub const SPEECH_TONE: &str = "Natural and professional.";

/// Appended to speech prompts when the accent override applies
pub const ENGLISH_OVERRIDE_NOTE: &str =
    "CRITICAL: The text is in English. Use standard English phonetics regardless of user UI settings.";

/// Edit prompt used when a reference image comes without a description
pub const DEFAULT_EDIT_DESCRIPTION: &str = "Make it artistic and high quality";

pub static FEATURES: &[FeatureProfile] = &[
    FeatureProfile {
        feature: Feature::Translate,
        model: TEXT_MODEL,
        system_instruction: Some(
            "You are a professional polyglot translator. Provide only the translated text. \
             CRITICAL: When translating into Kurdish (Badini), ALWAYS use the Arabic script \
             (Kurdish alphabet), following the same writing convention as Sorani. \
             Do not use Latin characters for Kurdish.",
        ),
        prompt_template: "Translate this text from {source} to {target}: \"{text}\".",
        modality: Modality::Text,
        voice: None,
        search: false,
        aspect_ratio: None,
    },
    FeatureProfile {
        feature: Feature::Write,
        model: TEXT_MODEL,
        system_instruction: Some(
            "You are a creative writer and language expert specializing in Kurdish (Sorani). \
             Help users write poems, stories, essays, and improve their grammar. \
             Always respond in Kurdish (Sorani) unless asked otherwise.",
        ),
        prompt_template: "{text}",
        modality: Modality::Text,
        voice: None,
        search: false,
        aspect_ratio: None,
    },
    FeatureProfile {
        feature: Feature::Learn,
        model: TEXT_MODEL,
        system_instruction: Some(
            "You are a professional English tutor. Explain concepts clearly and provide links.",
        ),
        prompt_template: "Explain or translate this English topic/phrase: \"{text}\"",
        modality: Modality::Text,
        voice: None,
        search: true,
        aspect_ratio: None,
    },
    FeatureProfile {
        feature: Feature::Image,
        model: IMAGE_MODEL,
        system_instruction: None,
        prompt_template: "Create an artistic image based on this description. \
                          If the description mentions Kurdish themes, ensure cultural accuracy. \
                          Description: {text}",
        modality: Modality::Image,
        voice: None,
        search: false,
        aspect_ratio: Some("1:1"),
    },
    FeatureProfile {
        feature: Feature::ImageEdit,
        model: IMAGE_MODEL,
        system_instruction: None,
        prompt_template: "Transform or enhance this image based on this description: {text}. \
                          Maintain Kurdish cultural elements if relevant.",
        modality: Modality::Image,
        voice: None,
        search: false,
        aspect_ratio: Some("1:1"),
    },
    FeatureProfile {
        feature: Feature::Speech,
        model: SPEECH_MODEL,
        system_instruction: None,
        prompt_template: "Convert this text to audio with high-quality native pronunciation.\n\
                          Language: {language}\n\
                          Tone: {tone}\n\
                          Phonetic Requirement: This text MUST be spoken with a native {language} accent.\n\
                          {override}\n\
                          Text: \"{text}\"",
        modality: Modality::Audio,
        voice: Some(DEFAULT_VOICE),
        search: false,
        aspect_ratio: None,
    },
];

/// Fill `{name}` placeholders from `vars`
///
/// Single pass, so braces inside substituted values are left alone.
/// Unknown placeholders are kept verbatim.
pub fn render_template(template: &str, vars: &[(&str, &str)]) -> String {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;

    while let Some(open) = rest.find('{') {
        out.push_str(&rest[..open]);
        let after = &rest[open + 1..];
        match after.find('}') {
            Some(close) => {
                let key = &after[..close];
                match vars.iter().find(|(name, _)| *name == key) {
                    Some((_, value)) => out.push_str(value),
                    None => {
                        out.push('{');
                        out.push_str(key);
                        out.push('}');
                    }
                }
                rest = &after[close + 1..];
            }
            None => {
                out.push_str(&rest[open..]);
                rest = "";
            }
        }
    }
    out.push_str(rest);
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_feature_has_profile() {
        for feature in Feature::ALL {
            assert_eq!(feature.profile().feature, feature);
            assert_eq!(Feature::from_key(feature.key()), Some(feature));
        }
    }

    #[test]
    fn test_render_template() {
        let rendered = render_template(
            "Translate this text from {source} to {target}: \"{text}\".",
            &[("source", "English"), ("target", "German"), ("text", "hi")],
        );
        assert_eq!(rendered, "Translate this text from English to German: \"hi\".");
    }

    #[test]
    fn test_render_does_not_reexpand_values() {
        let rendered = render_template("{text}", &[("text", "{text} {other}")]);
        assert_eq!(rendered, "{text} {other}");
    }

    #[test]
    fn test_render_unknown_and_unclosed() {
        assert_eq!(render_template("a {missing} b", &[]), "a {missing} b");
        assert_eq!(render_template("a { b", &[]), "a { b");
    }

    #[test]
    fn test_speech_profile() {
        let profile = Feature::Speech.profile();
        assert_eq!(profile.modality.response_modality(), Some("AUDIO"));
        assert_eq!(profile.voice, Some("Kore"));
        assert!(Feature::Learn.profile().search);
        assert_eq!(Feature::Image.profile().aspect_ratio, Some("1:1"));
    }
}
