//! Immutable recognition configuration and its partial override.
use crate::language::Language;
use serde::{Deserialize, Serialize};

/// Fully populated recognition configuration.
///
/// Values are never mutated in place; [`RecognitionConfig::merge`] produces a
/// new configuration with the override's present fields laid over this one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct RecognitionConfig {
    /// Recognition locale.
    pub lang: Language,
    /// Keep emitting after a final result instead of stopping.
    pub continuous: bool,
    /// Emit provisional transcriptions.
    pub interim_results: bool,
    /// Candidate transcriptions per result (at least 1).
    pub max_alternatives: u32,
}

impl Default for RecognitionConfig {
    fn default() -> Self {
        Self {
            lang: Language::ENGLISH_US,
            continuous: false,
            interim_results: false,
            max_alternatives: 1,
        }
    }
}

impl RecognitionConfig {
    /// Shallow-merge `options` over `self`, returning a fresh configuration.
    #[must_use]
    pub fn merge(&self, options: &RecognitionOptions) -> Self {
        Self {
            lang: options.lang.clone().unwrap_or_else(|| self.lang.clone()),
            continuous: options.continuous.unwrap_or(self.continuous),
            interim_results: options.interim_results.unwrap_or(self.interim_results),
            max_alternatives: options
                .max_alternatives
                .unwrap_or(self.max_alternatives)
                .max(1),
        }
    }

    /// Configuration used by one-shot listening: single final result, no interim output.
    #[must_use]
    pub fn one_shot(&self) -> Self {
        Self {
            continuous: false,
            interim_results: false,
            ..self.clone()
        }
    }
}

/// Partial override for [`RecognitionConfig`]; absent fields keep the receiver's value.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct RecognitionOptions {
    pub lang: Option<Language>,
    pub continuous: Option<bool>,
    pub interim_results: Option<bool>,
    pub max_alternatives: Option<u32>,
}

impl RecognitionOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn lang(mut self, lang: impl Into<Language>) -> Self {
        self.lang = Some(lang.into());
        self
    }

    pub fn continuous(mut self, continuous: bool) -> Self {
        self.continuous = Some(continuous);
        self
    }

    pub fn interim_results(mut self, interim_results: bool) -> Self {
        self.interim_results = Some(interim_results);
        self
    }

    pub fn max_alternatives(mut self, max_alternatives: u32) -> Self {
        self.max_alternatives = Some(max_alternatives);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn merge_takes_present_fields_only() {
        let base = RecognitionConfig::default();
        let merged = base.merge(&RecognitionOptions::new().lang("fr-FR").continuous(true));

        assert_eq!(merged.lang, Language::FRENCH);
        assert!(merged.continuous);
        assert_eq!(merged.interim_results, base.interim_results);
        assert_eq!(merged.max_alternatives, base.max_alternatives);
        assert_eq!(base, RecognitionConfig::default());
    }

    #[test]
    fn empty_override_is_identity() {
        let base = RecognitionConfig {
            lang: Language::JAPANESE,
            continuous: true,
            interim_results: true,
            max_alternatives: 4,
        };
        assert_eq!(base.merge(&RecognitionOptions::default()), base);
    }

    #[test]
    fn max_alternatives_stays_positive() {
        let merged = RecognitionConfig::default().merge(&RecognitionOptions::new().max_alternatives(0));
        assert_eq!(merged.max_alternatives, 1);
    }

    #[test]
    fn one_shot_forces_single_final_result() {
        let base = RecognitionConfig::default().merge(
            &RecognitionOptions::new()
                .continuous(true)
                .interim_results(true)
                .max_alternatives(3),
        );
        let once = base.one_shot();
        assert!(!once.continuous);
        assert!(!once.interim_results);
        assert_eq!(once.max_alternatives, 3);
        assert_eq!(once.lang, base.lang);
    }

    #[test]
    fn deserializes_camel_case_with_defaults() {
        let config: RecognitionConfig =
            serde_json::from_str(r#"{"lang":"de-DE","interimResults":true}"#).unwrap();
        assert_eq!(config.lang, Language::GERMAN);
        assert!(config.interim_results);
        assert!(!config.continuous);
        assert_eq!(config.max_alternatives, 1);
    }
}
