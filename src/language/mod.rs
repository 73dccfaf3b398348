//! Supported languages and script helpers
//!
//! Every feature of the hub works over the same ten languages. The table
//! here is the single source for codes, English names, native names and
//! writing direction.

pub mod classifier;

pub use classifier::{decide, is_english_text, LanguageDecision};

use once_cell::sync::Lazy;
use regex::Regex;

/// Writing direction of a language's script
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Ltr,
    Rtl,
}

/// A language the hub can translate, speak or display its UI in
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Language {
    pub code: &'static str,
    pub name: &'static str,
    pub native: &'static str,
    pub direction: Direction,
}

/// Code of the language used for the accent override
pub const ENGLISH: &str = "en";

pub static LANGUAGES: &[Language] = &[
    Language {
        code: "en",
        name: "English",
        native: "English",
        direction: Direction::Ltr,
    },
    Language {
        code: "ku-sorani",
        name: "Kurdish (Sorani)",
        native: "کوردی",
        direction: Direction::Rtl,
    },
    Language {
        code: "ku-badini",
        name: "Kurdish (Badini)",
        native: "بادینی",
        direction: Direction::Rtl,
    },
    Language {
        code: "de",
        name: "German",
        native: "Deutsch",
        direction: Direction::Ltr,
    },
    Language {
        code: "ar",
        name: "Arabic",
        native: "العربية",
        direction: Direction::Rtl,
    },
    Language {
        code: "tr",
        name: "Turkish",
        native: "Türkçe",
        direction: Direction::Ltr,
    },
    Language {
        code: "fa",
        name: "Farsi",
        native: "فارسی",
        direction: Direction::Rtl,
    },
    Language {
        code: "fr",
        name: "French",
        native: "Français",
        direction: Direction::Ltr,
    },
    Language {
        code: "es",
        name: "Spanish",
        native: "Español",
        direction: Direction::Ltr,
    },
    Language {
        code: "it",
        name: "Italian",
        native: "Italiano",
        direction: Direction::Ltr,
    },
];

/// Arabic block, used by Sorani, Badini, Arabic and Farsi
static ARABIC_SCRIPT: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[\x{0600}-\x{06FF}]").expect("static regex is valid"));

/// Look up a language by its code
pub fn find_language(code: &str) -> Option<&'static Language> {
    LANGUAGES.iter().find(|lang| lang.code == code)
}

/// English name for a code, "English" when the code is unknown
pub fn language_name(code: &str) -> &'static str {
    find_language(code).map_or("English", |lang| lang.name)
}

/// Whether the UI should be laid out right-to-left for this language
pub fn is_rtl_language(code: &str) -> bool {
    code.contains("ku") || code == "ar" || code == "fa"
}

/// Whether the text contains any Arabic-script characters
pub fn is_rtl_text(text: &str) -> bool {
    ARABIC_SCRIPT.is_match(text)
}
