//! Ordered language set with code <-> index mapping
//!
//! Confusion matrices and per-language totals are dense arrays indexed by
//! position in this set; all lookups go through the set so an out-of-set code
//! surfaces as `Error::UnknownLabel` instead of corrupting an index.

use std::collections::HashMap;

use crate::error::{Error, Result};

/// Language codes bundled with the sample corpus.
pub const SAMPLE_LANGUAGES: [&str; 18] = [
    "da", "de", "el", "en", "es", "et", "fi", "fr", "hu", "is", "it", "nl", "no", "pl", "pt",
    "ru", "sv", "th",
];

/// Fixed ordered set of ISO 639-1 codes for one benchmark run
#[derive(Debug, Clone)]
pub struct LanguageSet {
    codes: Vec<String>,
    index: HashMap<String, usize>,
}

impl LanguageSet {
    /// Build a set from an ordered code list. Duplicates are rejected.
    pub fn new<S: AsRef<str>>(codes: &[S]) -> Result<Self> {
        let mut owned = Vec::with_capacity(codes.len());
        let mut index = HashMap::with_capacity(codes.len());
        for code in codes {
            let code = code.as_ref().trim();
            if code.is_empty() {
                continue;
            }
            if index.insert(code.to_string(), owned.len()).is_some() {
                return Err(Error::InvalidLanguageSet {
                    reason: format!("duplicate code '{code}'"),
                });
            }
            owned.push(code.to_string());
        }
        Ok(Self { codes: owned, index })
    }

    /// The 18-language set the bundled sample corpus is labeled with.
    pub fn sample() -> Self {
        Self::new(&SAMPLE_LANGUAGES).expect("sample set has no duplicates")
    }

    /// Parse a comma-separated code list, e.g. `en,fr,de`.
    pub fn from_csv(csv: &str) -> Result<Self> {
        let codes: Vec<&str> = csv.split(',').collect();
        Self::new(&codes)
    }

    pub fn len(&self) -> usize {
        self.codes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.codes.is_empty()
    }

    /// Ordered code list.
    pub fn codes(&self) -> &[String] {
        &self.codes
    }

    /// Code at a dense index. Panics on out-of-range, which only library bugs
    /// can produce.
    pub fn code(&self, idx: usize) -> &str {
        &self.codes[idx]
    }

    pub fn contains(&self, code: &str) -> bool {
        self.index.contains_key(code)
    }

    /// Dense index of a code, or `UnknownLabel` for anything outside the set.
    pub fn index_of(&self, code: &str) -> Result<usize> {
        self.index
            .get(code)
            .copied()
            .ok_or_else(|| Error::UnknownLabel { code: code.to_string() })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sample_set_maps_bijectively() {
        let set = LanguageSet::sample();
        assert_eq!(set.len(), 18);
        for (i, code) in set.codes().iter().enumerate() {
            assert_eq!(set.index_of(code).unwrap(), i);
            assert_eq!(set.code(i), code);
        }
    }

    #[test]
    fn unknown_code_is_rejected() {
        let set = LanguageSet::sample();
        let err = set.index_of("xx").unwrap_err();
        assert!(matches!(err, Error::UnknownLabel { ref code } if code == "xx"));
    }

    #[test]
    fn csv_parsing_trims_and_preserves_order() {
        let set = LanguageSet::from_csv("en, fr ,de").unwrap();
        assert_eq!(set.codes(), &["en", "fr", "de"]);
        assert_eq!(set.index_of("fr").unwrap(), 1);
    }

    #[test]
    fn duplicate_codes_are_rejected() {
        assert!(LanguageSet::from_csv("en,fr,en").is_err());
    }
}
