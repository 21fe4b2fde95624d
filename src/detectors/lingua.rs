//! Lingua adapter
//!
//! Statistical engine, slower than whatlang but stronger on short text. Built
//! from only the configured language subset so its predictions cannot leave
//! the set. Models are preloaded at construction so the first timed call does
//! not pay lazy-loading cost.

use lingua::{Language, LanguageDetector, LanguageDetectorBuilder};

use crate::error::{Error, Result};
use crate::languages::LanguageSet;

use super::LangDetector;

/// Lingua engine behind the uniform detector interface
pub struct LinguaAdapter {
    detector: LanguageDetector,
}

impl LinguaAdapter {
    pub fn new(languages: &LanguageSet) -> Self {
        let subset: Vec<Language> = languages
            .codes()
            .iter()
            .filter_map(|code| language_for_code(code))
            .collect();

        tracing::info!(
            "Initializing lingua with {} of {} configured languages",
            subset.len(),
            languages.len()
        );
        Self {
            detector: LanguageDetectorBuilder::from_languages(&subset)
                .with_preloaded_language_models()
                .build(),
        }
    }
}

impl LangDetector for LinguaAdapter {
    fn name(&self) -> &'static str {
        "lingua"
    }

    fn detect(&self, text: &str) -> Result<String> {
        let language = self
            .detector
            .detect_language_of(text)
            .ok_or_else(|| Error::Detector {
                name: "lingua",
                reason: "no language detected".into(),
            })?;
        Ok(code_for_language(language).to_string())
    }
}

/// Lingua model for an ISO 639-1 code. Norwegian (`no`) maps to Bokmål, the
/// variant lingua models.
fn language_for_code(code: &str) -> Option<Language> {
    match code {
        "da" => Some(Language::Danish),
        "de" => Some(Language::German),
        "el" => Some(Language::Greek),
        "en" => Some(Language::English),
        "es" => Some(Language::Spanish),
        "et" => Some(Language::Estonian),
        "fi" => Some(Language::Finnish),
        "fr" => Some(Language::French),
        "hu" => Some(Language::Hungarian),
        "is" => Some(Language::Icelandic),
        "it" => Some(Language::Italian),
        "nl" => Some(Language::Dutch),
        "no" => Some(Language::Bokmal),
        "pl" => Some(Language::Polish),
        "pt" => Some(Language::Portuguese),
        "ru" => Some(Language::Russian),
        "sv" => Some(Language::Swedish),
        "th" => Some(Language::Thai),
        _ => None,
    }
}

/// ISO 639-1 code for a lingua prediction. Both Norwegian variants collapse
/// to `no`, matching the corpus labeling.
fn code_for_language(language: Language) -> &'static str {
    match language {
        Language::Danish => "da",
        Language::German => "de",
        Language::Greek => "el",
        Language::English => "en",
        Language::Spanish => "es",
        Language::Estonian => "et",
        Language::Finnish => "fi",
        Language::French => "fr",
        Language::Hungarian => "hu",
        Language::Icelandic => "is",
        Language::Italian => "it",
        Language::Dutch => "nl",
        Language::Bokmal => "no",
        Language::Polish => "pl",
        Language::Portuguese => "pt",
        Language::Russian => "ru",
        Language::Swedish => "sv",
        Language::Thai => "th",
    }
}
