//! BCP-47 language tag (e.g. "en-US") and the closed set of recognition locales.
use serde::{Deserialize, Serialize};
use std::borrow::Cow;

/// Language tag handed to the host recognition and synthesis engines.
///
/// Tags outside [`SUPPORTED_LANGUAGES`] are accepted as-is; the host decides
/// whether it understands them.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, derive_more::Display)]
#[serde(transparent)]
pub struct Language(Cow<'static, str>);

impl Language {
    /// Create a language tag from a static code.
    pub const fn new(code: &'static str) -> Self {
        Self(Cow::Borrowed(code))
    }

    /// Create a language tag from an owned code.
    pub fn owned(code: impl Into<String>) -> Self {
        Self(Cow::Owned(code.into()))
    }

    /// Get the underlying language code.
    pub fn code(&self) -> &str {
        &self.0
    }

    /// Whether this tag is one of the enumerated recognition locales.
    pub fn is_supported(&self) -> bool {
        SUPPORTED_LANGUAGES.contains(&self.code())
    }

    /// English (US)
    pub const ENGLISH_US: Self = Self::new("en-US");

    /// English (UK)
    pub const ENGLISH_UK: Self = Self::new("en-GB");

    /// Spanish
    pub const SPANISH: Self = Self::new("es-ES");

    /// French
    pub const FRENCH: Self = Self::new("fr-FR");

    /// German
    pub const GERMAN: Self = Self::new("de-DE");

    /// Japanese
    pub const JAPANESE: Self = Self::new("ja-JP");

    /// Chinese (Simplified)
    pub const CHINESE_SIMPLIFIED: Self = Self::new("zh-CN");

    /// Chinese (Traditional)
    pub const CHINESE_TRADITIONAL: Self = Self::new("zh-TW");
}

impl Default for Language {
    fn default() -> Self {
        Self::ENGLISH_US
    }
}

impl From<&'static str> for Language {
    fn from(code: &'static str) -> Self {
        Self::new(code)
    }
}

impl From<String> for Language {
    fn from(code: String) -> Self {
        Self::owned(code)
    }
}

impl PartialEq<str> for Language {
    fn eq(&self, other: &str) -> bool {
        self.code() == other
    }
}

impl PartialEq<&str> for Language {
    fn eq(&self, other: &&str) -> bool {
        self.code() == *other
    }
}

/// Locale codes accepted for speech recognition configuration.
pub const SUPPORTED_LANGUAGES: &[&str] = &[
    "af-ZA", "am-ET", "ar-AE", "ar-BH", "ar-DZ", "ar-EG", "ar-IL", "ar-IQ", "ar-JO", "ar-KW",
    "ar-LB", "ar-MA", "ar-OM", "ar-PS", "ar-QA", "ar-SA", "ar-TN", "ar-YE", "az-AZ", "bg-BG",
    "bn-BD", "bn-IN", "ca-ES", "cs-CZ", "da-DK", "de-AT", "de-CH", "de-DE", "el-GR", "en-AU",
    "en-CA", "en-GB", "en-GH", "en-IE", "en-IN", "en-KE", "en-NG", "en-NZ", "en-PH", "en-SG",
    "en-TZ", "en-US", "en-ZA", "es-AR", "es-BO", "es-CL", "es-CO", "es-CR", "es-DO", "es-EC",
    "es-ES", "es-GT", "es-HN", "es-MX", "es-NI", "es-PA", "es-PE", "es-PR", "es-PY", "es-SV",
    "es-US", "es-UY", "es-VE", "eu-ES", "fa-IR", "fi-FI", "fil-PH", "fr-BE", "fr-CA", "fr-CH",
    "fr-FR", "gl-ES", "gu-IN", "he-IL", "hi-IN", "hr-HR", "hu-HU", "hy-AM", "id-ID", "is-IS",
    "it-CH", "it-IT", "ja-JP", "jv-ID", "ka-GE", "km-KH", "kn-IN", "ko-KR", "lo-LA", "lt-LT",
    "lv-LV", "ml-IN", "mr-IN", "ms-MY", "nb-NO", "ne-NP", "nl-BE", "nl-NL", "pl-PL", "pt-BR",
    "pt-PT", "ro-RO", "ru-RU", "si-LK", "sk-SK", "sl-SI", "sr-RS", "su-ID", "sv-SE", "sw-KE",
    "sw-TZ", "ta-IN", "ta-LK", "ta-MY", "ta-SG", "te-IN", "th-TH", "tr-TR", "uk-UA", "ur-IN",
    "ur-PK", "uz-UZ", "vi-VN", "yue-Hant-HK", "zh-CN", "zh-HK", "zh-TW", "zu-ZA",
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn constants_are_supported() {
        for lang in [
            Language::ENGLISH_US,
            Language::ENGLISH_UK,
            Language::SPANISH,
            Language::FRENCH,
            Language::GERMAN,
            Language::JAPANESE,
            Language::CHINESE_SIMPLIFIED,
            Language::CHINESE_TRADITIONAL,
        ] {
            assert!(lang.is_supported(), "{lang} missing from table");
        }
    }

    #[test]
    fn unknown_tags_pass_through() {
        let lang = Language::owned("xx-XX");
        assert!(!lang.is_supported());
        assert_eq!(lang, "xx-XX");
    }

    #[test]
    fn serializes_as_plain_string() {
        let json = serde_json::to_string(&Language::FRENCH).unwrap();
        assert_eq!(json, "\"fr-FR\"");
        let back: Language = serde_json::from_str("\"de-DE\"").unwrap();
        assert_eq!(back, Language::GERMAN);
    }
}
