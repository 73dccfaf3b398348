//! Speech synthesis through the generative API
//!
//! The user's text is classified, a speech prompt is built for the
//! effective language, the returned PCM payload is decoded and then played
//! on the service's [`Player`].
//!
//! Requests are tagged with a generation number. A response is only played
//! if no newer request was started (or the service invalidated) while it
//! was in flight.

use crate::api::features::{ENGLISH_OVERRIDE_NOTE, SPEECH_TONE};
use crate::api::{Dispatcher, Feature};
use crate::audio::{decode_audio, AudioBuffer, Player, SPEECH_CHANNELS, SPEECH_SAMPLE_RATE};
use crate::language::{decide, language_name, LanguageDecision};
use crate::{PeshkatError, Result};
use log::{debug, error, info, warn};

/// Identifies one synthesis request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RequestTicket {
    generation: u64,
}

impl RequestTicket {
    pub fn generation(&self) -> u64 {
        self.generation
    }
}

/// Decoded result of a synthesis request, not yet played
#[derive(Debug, Clone)]
pub struct Synthesis {
    pub decision: LanguageDecision,
    pub buffer: AudioBuffer,
}

/// What happened to a speak request
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    /// Audio was played to completion
    Played {
        decision: LanguageDecision,
        frames: usize,
    },
    /// A newer request superseded this one; its response was dropped
    Stale,
    /// Nothing to say
    Skipped,
}

/// Audio format assumed for synthesized speech
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SpeechFormat {
    pub sample_rate: u32,
    pub channels: u16,
}

impl Default for SpeechFormat {
    fn default() -> Self {
        Self {
            sample_rate: SPEECH_SAMPLE_RATE,
            channels: SPEECH_CHANNELS,
        }
    }
}

/// Template variables for the speech prompt
pub fn speech_vars<'a>(text: &'a str, decision: &LanguageDecision) -> Vec<(&'static str, &'a str)> {
    let note = if decision.is_english {
        ENGLISH_OVERRIDE_NOTE
    } else {
        ""
    };
    vec![
        ("language", language_name(&decision.effective_language_code)),
        ("tone", SPEECH_TONE),
        ("override", note),
        ("text", text),
    ]
}

/// Sample rate advertised in a PCM mime type (`audio/L16;codec=pcm;rate=24000`)
///
/// A zero rate counts as not advertised.
pub fn parse_pcm_rate(mime_type: &str) -> Option<u32> {
    mime_type
        .split(';')
        .filter_map(|param| param.trim().strip_prefix("rate="))
        .find_map(|rate| rate.parse::<u32>().ok())
        .filter(|&rate| rate > 0)
}

/// Speech feature: classify, request, decode, play
pub struct SpeechService {
    player: Player,
    format: SpeechFormat,
    generation: u64,
    generating: bool,
}

impl SpeechService {
    pub fn new(player: Player) -> Self {
        Self::with_format(player, SpeechFormat::default())
    }

    pub fn with_format(player: Player, format: SpeechFormat) -> Self {
        Self {
            player,
            format,
            generation: 0,
            generating: false,
        }
    }

    pub fn player(&self) -> &Player {
        &self.player
    }

    pub fn format(&self) -> SpeechFormat {
        self.format
    }

    /// Is a request currently in flight?
    pub fn is_generating(&self) -> bool {
        self.generating
    }

    /// Start a request
    ///
    /// Fails while another request from this service is still generating.
    pub fn begin(&mut self) -> Result<RequestTicket> {
        if self.generating {
            return Err(PeshkatError::SynthesisRequest(
                "a synthesis request is already in progress".to_string(),
            ));
        }
        self.generation += 1;
        self.generating = true;
        debug!("Began synthesis generation {}", self.generation);
        Ok(RequestTicket {
            generation: self.generation,
        })
    }

    /// Does the ticket belong to the newest request?
    pub fn is_current(&self, ticket: RequestTicket) -> bool {
        ticket.generation == self.generation
    }

    /// Forget any in-flight request so its response is ignored
    pub fn invalidate(&mut self) {
        self.generation += 1;
        self.generating = false;
        debug!("Invalidated synthesis requests up to generation {}", self.generation);
    }

    /// Send the request and decode the payload
    ///
    /// Does not touch service state, so it can run away from the service.
    pub fn fetch(
        dispatcher: &Dispatcher,
        format: SpeechFormat,
        text: &str,
        selected_language: &str,
    ) -> Result<Synthesis> {
        let decision = decide(text, selected_language);
        info!(
            "Synthesizing {} chars as {}{}",
            text.chars().count(),
            decision.effective_language_code,
            if decision.is_english { " (English override)" } else { "" }
        );

        let vars = speech_vars(text, &decision);
        let response = dispatcher
            .dispatch(Feature::Speech, &vars, Vec::new())
            .map_err(|e| PeshkatError::SynthesisRequest(e.to_string()))?;

        let audio = response.first_inline_data().ok_or_else(|| {
            PeshkatError::SynthesisRequest("response contained no audio payload".to_string())
        })?;

        let sample_rate = parse_pcm_rate(&audio.mime_type).unwrap_or(format.sample_rate);
        let buffer = decode_audio(&audio.data, sample_rate, format.channels)?;

        Ok(Synthesis { decision, buffer })
    }

    /// Finish a request with its fetch result
    ///
    /// Stale tickets are dropped without touching the player. A failure
    /// leaves the player idle.
    pub fn apply(&mut self, ticket: RequestTicket, result: Result<Synthesis>) -> Result<Outcome> {
        if !self.is_current(ticket) {
            warn!(
                "Dropping stale synthesis response (generation {}, current {})",
                ticket.generation, self.generation
            );
            return Ok(Outcome::Stale);
        }
        self.generating = false;

        let synthesis = result.map_err(|e| {
            error!("Speech synthesis failed: {}", e);
            e
        })?;
        let frames = synthesis.buffer.frame_count();
        self.player.play(synthesis.buffer)?;

        Ok(Outcome::Played {
            decision: synthesis.decision,
            frames,
        })
    }

    /// Speak text in the selected language, or in English when the text
    /// is English-dominant
    pub fn speak(
        &mut self,
        dispatcher: &Dispatcher,
        text: &str,
        selected_language: &str,
    ) -> Result<Outcome> {
        if text.trim().is_empty() {
            return Ok(Outcome::Skipped);
        }

        let ticket = self.begin()?;
        let result = Self::fetch(dispatcher, self.format, text, selected_language);
        self.apply(ticket, result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audio::backends::null::NullOutput;

    fn service() -> SpeechService {
        SpeechService::new(Player::new(Box::new(NullOutput::new())))
    }

    fn silent() -> Synthesis {
        Synthesis {
            decision: decide("Hello", "de"),
            buffer: decode_audio("AAA=", SPEECH_SAMPLE_RATE, 1).unwrap(),
        }
    }

    #[test]
    fn test_parse_pcm_rate() {
        assert_eq!(parse_pcm_rate("audio/L16;codec=pcm;rate=24000"), Some(24000));
        assert_eq!(parse_pcm_rate("audio/L16; rate=16000"), Some(16000));
        assert_eq!(parse_pcm_rate("audio/pcm"), None);
        assert_eq!(parse_pcm_rate("audio/L16;codec=pcm;rate=0"), None);
    }

    #[test]
    fn test_speech_vars_english_override() {
        let decision = decide("Hello world", "ku-sorani");
        let vars = speech_vars("Hello world", &decision);
        assert!(vars.contains(&("language", "English")));
        assert!(vars.contains(&("override", ENGLISH_OVERRIDE_NOTE)));
    }

    #[test]
    fn test_speech_vars_selected_language() {
        let decision = decide("سڵاو", "ku-sorani");
        let vars = speech_vars("سڵاو", &decision);
        assert!(vars.contains(&("language", "Kurdish (Sorani)")));
        assert!(vars.contains(&("override", "")));
    }

    #[test]
    fn test_second_begin_while_generating_fails() {
        let mut service = service();
        service.begin().unwrap();
        assert!(matches!(service.begin(), Err(PeshkatError::SynthesisRequest(_))));
    }

    #[test]
    fn test_stale_response_dropped() {
        let mut service = service();
        let old = service.begin().unwrap();
        service.invalidate();
        let new = service.begin().unwrap();

        assert_eq!(service.apply(old, Ok(silent())).unwrap(), Outcome::Stale);
        assert!(service.is_generating());

        let outcome = service.apply(new, Ok(silent())).unwrap();
        assert!(matches!(outcome, Outcome::Played { frames: 1, .. }));
        assert!(!service.is_generating());
    }

    #[test]
    fn test_failed_request_clears_generating() {
        let mut service = service();
        let ticket = service.begin().unwrap();
        let err = service
            .apply(ticket, Err(PeshkatError::SynthesisRequest("down".to_string())))
            .unwrap_err();
        assert!(matches!(err, PeshkatError::SynthesisRequest(_)));
        assert!(!service.is_generating());
        assert!(!service.player().is_playing());
    }
}
