//! Whatlang adapter
//!
//! Trigram-based engine, fast and allocation-light. The detector is restricted
//! to an allowlist derived from the configured language set; codes the engine
//! has no model for (e.g. Icelandic) are left out of the allowlist.

use whatlang::{Detector, Lang};

use crate::error::{Error, Result};
use crate::languages::LanguageSet;

use super::LangDetector;

/// Whatlang engine behind the uniform detector interface
pub struct WhatlangAdapter {
    detector: Detector,
}

impl WhatlangAdapter {
    pub fn new(languages: &LanguageSet) -> Self {
        let allowlist: Vec<Lang> = languages
            .codes()
            .iter()
            .filter_map(|code| lang_for_code(code))
            .collect();

        tracing::info!(
            "Initializing whatlang with {} of {} configured languages",
            allowlist.len(),
            languages.len()
        );
        Self {
            detector: Detector::with_allowlist(allowlist),
        }
    }
}

impl LangDetector for WhatlangAdapter {
    fn name(&self) -> &'static str {
        "whatlang"
    }

    fn detect(&self, text: &str) -> Result<String> {
        let info = self.detector.detect(text).ok_or_else(|| Error::Detector {
            name: "whatlang",
            reason: "no language detected".into(),
        })?;
        Ok(code_for_lang(info.lang()).to_string())
    }
}

/// Whatlang model for an ISO 639-1 code, where one exists.
fn lang_for_code(code: &str) -> Option<Lang> {
    match code {
        "da" => Some(Lang::Dan),
        "de" => Some(Lang::Deu),
        "el" => Some(Lang::Ell),
        "en" => Some(Lang::Eng),
        "es" => Some(Lang::Spa),
        "et" => Some(Lang::Est),
        "fi" => Some(Lang::Fin),
        "fr" => Some(Lang::Fra),
        "hu" => Some(Lang::Hun),
        "it" => Some(Lang::Ita),
        "nl" => Some(Lang::Nld),
        "no" => Some(Lang::Nob),
        "pl" => Some(Lang::Pol),
        "pt" => Some(Lang::Por),
        "ru" => Some(Lang::Rus),
        "sv" => Some(Lang::Swe),
        "th" => Some(Lang::Tha),
        _ => None,
    }
}

/// ISO 639-1 code for a whatlang prediction.
fn code_for_lang(lang: Lang) -> &'static str {
    match lang {
        Lang::Dan => "da",
        Lang::Deu => "de",
        Lang::Ell => "el",
        Lang::Eng => "en",
        Lang::Spa => "es",
        Lang::Est => "et",
        Lang::Fin => "fi",
        Lang::Fra => "fr",
        Lang::Hun => "hu",
        Lang::Ita => "it",
        Lang::Nld => "nl",
        Lang::Nob => "no",
        Lang::Pol => "pl",
        Lang::Por => "pt",
        Lang::Rus => "ru",
        Lang::Swe => "sv",
        Lang::Tha => "th",
        // Fallback to the engine's 3-letter code; an out-of-set prediction
        // is then rejected at accumulation time.
        other => other.code(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn detects_english_and_french() {
        let detector = WhatlangAdapter::new(&LanguageSet::sample());
        let result = detector
            .detect("This is a longer English sentence to ensure correct detection.")
            .unwrap();
        assert_eq!(result, "en");

        let result_fr = detector
            .detect("Bonjour tout le monde, comment allez-vous aujourd'hui ?")
            .unwrap();
        assert_eq!(result_fr, "fr");
    }

    #[test]
    fn allowlist_keeps_predictions_inside_the_set() {
        let set = LanguageSet::from_csv("en,fr").unwrap();
        let detector = WhatlangAdapter::new(&set);
        // German text must resolve to one of the two allowed languages.
        let code = detector
            .detect("Der schnelle braune Fuchs springt über den faulen Hund.")
            .unwrap();
        assert!(set.contains(&code), "prediction {code} escaped the allowlist");
    }
}
