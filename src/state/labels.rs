//! Localized UI labels
//!
//! Short strings for the navigation and the hub title, one set per UI
//! language. Unknown languages fall back to English.

use once_cell::sync::Lazy;
use std::collections::HashMap;

/// Labels shown for one UI language
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Labels {
    pub translate: &'static str,
    pub learn: &'static str,
    pub image: &'static str,
    pub audio: &'static str,
    pub write: &'static str,
    pub about: &'static str,
    pub hub: &'static str,
}

/// UI language code -> labels
pub static LABELS: Lazy<HashMap<&'static str, Labels>> = Lazy::new(|| {
    let mut m = HashMap::new();
    m.insert(
        "en",
        Labels {
            translate: "Translate",
            learn: "Learn",
            image: "Image",
            audio: "Audio",
            write: "Write",
            about: "About",
            hub: "Kurdish Creator Hub",
        },
    );
    m.insert(
        "ku-sorani",
        Labels {
            translate: "وەرگێڕان",
            learn: "فێربوون",
            image: "وێنە",
            audio: "دەنگ",
            write: "نووسین",
            about: "دەربارە",
            hub: "ناوەندی دروستکەرانی کورد",
        },
    );
    m.insert(
        "ku-badini",
        Labels {
            translate: "وەگێڕان",
            learn: "فێربوون",
            image: "وێنە",
            audio: "دەنگ",
            write: "نڤیسین",
            about: "دەربارە",
            hub: "ناڤەندا چێکەرێن کورد",
        },
    );
    m.insert(
        "de",
        Labels {
            translate: "Übersetzen",
            learn: "Lernen",
            image: "Bild",
            audio: "Audio",
            write: "Schreiben",
            about: "Über",
            hub: "Kurdisches Creator-Hub",
        },
    );
    m.insert(
        "ar",
        Labels {
            translate: "ترجمة",
            learn: "تعلم",
            image: "صور",
            audio: "صوت",
            write: "كتابة",
            about: "حول",
            hub: "مركز المبدعين الكرد",
        },
    );
    m.insert(
        "tr",
        Labels {
            translate: "Çeviri",
            learn: "Öğren",
            image: "Görüntü",
            audio: "Ses",
            write: "Yaz",
            about: "Hakkında",
            hub: "Kürt İçerik Üreticileri",
        },
    );
    m.insert(
        "fa",
        Labels {
            translate: "ترجمه",
            learn: "یادگیری",
            image: "تصویر",
            audio: "صوت",
            write: "نوشتن",
            about: "درباره",
            hub: "مرکز آفرینندگان کرد",
        },
    );
    m.insert(
        "fr",
        Labels {
            translate: "Traduire",
            learn: "Apprendre",
            image: "Image",
            audio: "Audio",
            write: "Écrire",
            about: "À propos",
            hub: "Hub des Créateurs Kurdes",
        },
    );
    m.insert(
        "es",
        Labels {
            translate: "Traducir",
            learn: "Aprender",
            image: "Imagen",
            audio: "Audio",
            write: "Escribir",
            about: "Sobre",
            hub: "Centro de Creadores Kurdos",
        },
    );
    m.insert(
        "it",
        Labels {
            translate: "Traduci",
            learn: "Impara",
            image: "Immagine",
            audio: "Audio",
            write: "Scrivi",
            about: "Su",
            hub: "Centro Creatori Curdi",
        },
    );
    m
});

/// Labels for a UI language, English if it has none
pub fn labels_for(code: &str) -> &'static Labels {
    LABELS
        .get(code)
        .or_else(|| LABELS.get("en"))
        .expect("English labels are always present")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::language::LANGUAGES;

    #[test]
    fn test_every_language_has_labels() {
        for lang in LANGUAGES {
            assert!(LABELS.contains_key(lang.code), "{}", lang.code);
        }
    }

    #[test]
    fn test_fallback_to_english() {
        assert_eq!(labels_for("xx").translate, "Translate");
        assert_eq!(labels_for("de").write, "Schreiben");
    }
}
