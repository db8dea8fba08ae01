//! Aggregate configuration for both facades, loadable from JSON.
use crate::recognition_config::RecognitionConfig;
use crate::speech_error::SpeechError;
use crate::synthesis_options::SynthesisOptions;
use crate::voice::VoiceSelector;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Starting state of a synthesis facade.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SynthesisSettings {
    #[serde(flatten)]
    pub options: SynthesisOptions,
    pub voice: VoiceSelector,
    /// Give up waiting for the host voice catalog after this many milliseconds.
    pub voices_timeout_ms: Option<u64>,
}

impl SynthesisSettings {
    pub fn voices_timeout(&self) -> Option<Duration> {
        self.voices_timeout_ms.map(Duration::from_millis)
    }
}

/// Configuration for a recognition + synthesis facade pair.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FluentSpeechConfig {
    pub recognition: RecognitionConfig,
    pub synthesis: SynthesisSettings,
}

impl FluentSpeechConfig {
    pub fn from_json_str(json: &str) -> Result<Self, SpeechError> {
        serde_json::from_str(json).map_err(|e| SpeechError::Configuration(e.to_string()))
    }

    pub fn to_json_string(&self) -> Result<String, SpeechError> {
        serde_json::to_string_pretty(self).map_err(|e| SpeechError::Configuration(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Language;

    #[test]
    fn empty_document_yields_defaults() {
        let config = FluentSpeechConfig::from_json_str("{}").unwrap();
        assert_eq!(config, FluentSpeechConfig::default());
    }

    #[test]
    fn reads_nested_sections() {
        let config = FluentSpeechConfig::from_json_str(
            r#"{
                "recognition": { "lang": "fr-FR", "continuous": true, "maxAlternatives": 3 },
                "synthesis": {
                    "text": "bonjour",
                    "rate": 25.0,
                    "voice": { "lang": "fr-FR" },
                    "voicesTimeoutMs": 1500
                }
            }"#,
        )
        .unwrap();

        assert_eq!(config.recognition.lang, Language::FRENCH);
        assert_eq!(config.recognition.max_alternatives, 3);
        assert_eq!(config.synthesis.options.text, "bonjour");
        assert_eq!(config.synthesis.options.rate.value(), 10.0);
        assert_eq!(config.synthesis.voice.lang, Some(Language::FRENCH));
        assert_eq!(
            config.synthesis.voices_timeout(),
            Some(Duration::from_millis(1500))
        );
    }

    #[test]
    fn malformed_json_is_a_configuration_error() {
        let err = FluentSpeechConfig::from_json_str("{ not json").unwrap_err();
        assert!(matches!(err, SpeechError::Configuration(_)));
    }
}
