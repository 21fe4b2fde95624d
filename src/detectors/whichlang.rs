//! Whichlang adapter
//!
//! Lightweight single-call classifier with a built-in model covering a fixed
//! 16-language repertoire. The engine cannot be restricted to a subset, so a
//! prediction outside the run's language set is rejected downstream as an
//! unknown label.

use whichlang::{detect_language, Lang};

use crate::error::Result;

use super::LangDetector;

/// Whichlang engine behind the uniform detector interface
pub struct WhichlangAdapter;

impl WhichlangAdapter {
    pub fn new() -> Self {
        tracing::info!("Initializing whichlang (fixed 16-language model)");
        Self
    }
}

impl Default for WhichlangAdapter {
    fn default() -> Self {
        Self::new()
    }
}

impl LangDetector for WhichlangAdapter {
    fn name(&self) -> &'static str {
        "whichlang"
    }

    fn detect(&self, text: &str) -> Result<String> {
        // whichlang is total: it always returns one of its 16 languages.
        Ok(code_for_lang(detect_language(text)).to_string())
    }
}

/// ISO 639-1 code for a whichlang prediction.
fn code_for_lang(lang: Lang) -> &'static str {
    match lang {
        Lang::Ara => "ar",
        Lang::Cmn => "zh",
        Lang::Deu => "de",
        Lang::Eng => "en",
        Lang::Fra => "fr",
        Lang::Hin => "hi",
        Lang::Ita => "it",
        Lang::Jpn => "ja",
        Lang::Kor => "ko",
        Lang::Nld => "nl",
        Lang::Por => "pt",
        Lang::Rus => "ru",
        Lang::Spa => "es",
        Lang::Swe => "sv",
        Lang::Tur => "tr",
        Lang::Vie => "vi",
    }
}
