//! English-dominance detection for the accent override
//!
//! Speech requests pronounce clearly English text with English phonetics,
//! whatever output language the user picked.

use super::ENGLISH;
use log::debug;

/// Effective language chosen for one synthesis request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LanguageDecision {
    /// True when the text was classified as English-dominant
    pub is_english: bool,
    /// Language the request will be spoken in
    pub effective_language_code: String,
}

/// Is the text predominantly Latin letters?
///
/// Counts `[a-zA-Z]` against all non-whitespace characters. Requires a
/// strict majority, so exactly half is not English.
pub fn is_english_text(text: &str) -> bool {
    let mut latin = 0usize;
    let mut total = 0usize;

    for ch in text.chars().filter(|c| !c.is_whitespace()) {
        total += 1;
        if ch.is_ascii_alphabetic() {
            latin += 1;
        }
    }

    if total == 0 || latin == 0 {
        return false;
    }

    // latin / total > 0.5 without floating point
    latin * 2 > total
}

/// Decide the effective language for a text and the user's selection
pub fn decide(text: &str, selected_code: &str) -> LanguageDecision {
    let is_english = is_english_text(text);
    let effective = if is_english { ENGLISH } else { selected_code };
    debug!(
        "Language decision: english={} selected={} effective={}",
        is_english, selected_code, effective
    );

    LanguageDecision {
        is_english,
        effective_language_code: effective.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_text() {
        assert!(!is_english_text(""));
        assert!(!is_english_text("   \n\t"));
    }

    #[test]
    fn test_no_latin_letters() {
        assert!(!is_english_text("سڵاو"));
        assert!(!is_english_text("12345 !?"));
        assert!(!is_english_text("Привет"));
    }

    #[test]
    fn test_pure_latin() {
        assert!(is_english_text("a"));
        assert!(is_english_text("Hello"));
        assert!(is_english_text("Hello world"));
    }

    #[test]
    fn test_exact_half_is_not_english() {
        assert!(!is_english_text("ab12"));
        assert!(!is_english_text("a ب"));
    }

    #[test]
    fn test_majority_with_punctuation() {
        assert!(is_english_text("Hello, world! 42"));
        assert!(!is_english_text("ok 1234"));
    }

    #[test]
    fn test_accented_letters_not_counted() {
        // é, ï are outside [a-zA-Z]
        assert!(!is_english_text("éïé a"));
    }

    #[test]
    fn test_decide_overrides_selection() {
        let decision = decide("Hello world", "ku-sorani");
        assert!(decision.is_english);
        assert_eq!(decision.effective_language_code, "en");
    }

    #[test]
    fn test_decide_keeps_selection() {
        let decision = decide("سڵاو", "ku-sorani");
        assert!(!decision.is_english);
        assert_eq!(decision.effective_language_code, "ku-sorani");
    }
}
