//! Host voice descriptors and attribute selectors over them.
use crate::language::Language;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A voice as reported by the host synthesis engine.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Voice {
    pub lang: Language,
    pub name: String,
    #[serde(rename = "voiceURI")]
    pub voice_uri: String,
    /// Served by a local/offline engine rather than a remote service.
    pub local_service: bool,
    /// Host-designated default voice.
    #[serde(default)]
    pub default: bool,
}

impl Voice {
    pub fn new(
        lang: impl Into<Language>,
        name: impl Into<String>,
        voice_uri: impl Into<String>,
        local_service: bool,
    ) -> Self {
        Self {
            lang: lang.into(),
            name: name.into(),
            voice_uri: voice_uri.into(),
            local_service,
            default: false,
        }
    }

    /// Mark this voice as the host default.
    pub fn as_default(mut self) -> Self {
        self.default = true;
        self
    }
}

/// Any subset of a voice's identifying attributes.
///
/// A voice matches when every present attribute is strictly equal.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct VoiceSelector {
    pub lang: Option<Language>,
    pub name: Option<String>,
    #[serde(rename = "voiceURI")]
    pub voice_uri: Option<String>,
    pub local_service: Option<bool>,
    pub default: Option<bool>,
}

impl VoiceSelector {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn lang(mut self, lang: impl Into<Language>) -> Self {
        self.lang = Some(lang.into());
        self
    }

    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn voice_uri(mut self, voice_uri: impl Into<String>) -> Self {
        self.voice_uri = Some(voice_uri.into());
        self
    }

    pub fn local_service(mut self, local_service: bool) -> Self {
        self.local_service = Some(local_service);
        self
    }

    pub fn default_voice(mut self, default: bool) -> Self {
        self.default = Some(default);
        self
    }

    /// True when no attribute is constrained.
    pub fn is_empty(&self) -> bool {
        self.lang.is_none()
            && self.name.is_none()
            && self.voice_uri.is_none()
            && self.local_service.is_none()
            && self.default.is_none()
    }

    pub fn matches(&self, voice: &Voice) -> bool {
        self.lang.as_ref().is_none_or(|lang| *lang == voice.lang)
            && self.name.as_ref().is_none_or(|name| *name == voice.name)
            && self
                .voice_uri
                .as_ref()
                .is_none_or(|uri| *uri == voice.voice_uri)
            && self
                .local_service
                .is_none_or(|local| local == voice.local_service)
            && self.default.is_none_or(|default| default == voice.default)
    }

    /// Lay `other`'s present attributes over this selector.
    #[must_use]
    pub fn merge(&self, other: &VoiceSelector) -> Self {
        Self {
            lang: other.lang.clone().or_else(|| self.lang.clone()),
            name: other.name.clone().or_else(|| self.name.clone()),
            voice_uri: other.voice_uri.clone().or_else(|| self.voice_uri.clone()),
            local_service: other.local_service.or(self.local_service),
            default: other.default.or(self.default),
        }
    }

    /// Catalog-order voices satisfying every attribute.
    pub fn filter<'a>(&'a self, voices: &'a [Voice]) -> impl Iterator<Item = &'a Voice> + 'a {
        voices.iter().filter(move |voice| self.matches(voice))
    }
}

impl fmt::Display for VoiceSelector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut fields = Vec::new();
        if let Some(lang) = &self.lang {
            fields.push(format!("lang: {lang:?}", lang = lang.code()));
        }
        if let Some(name) = &self.name {
            fields.push(format!("name: {name:?}"));
        }
        if let Some(uri) = &self.voice_uri {
            fields.push(format!("voiceURI: {uri:?}"));
        }
        if let Some(local) = self.local_service {
            fields.push(format!("localService: {local}"));
        }
        if let Some(default) = self.default {
            fields.push(format!("default: {default}"));
        }
        write!(f, "{{{}}}", fields.join(", "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn catalog() -> Vec<Voice> {
        vec![
            Voice::new("en-US", "Alex", "urn:alex", true).as_default(),
            Voice::new("en-GB", "Daniel", "urn:daniel", true),
            Voice::new("en-US", "Google US English", "urn:google-us", false),
        ]
    }

    #[test]
    fn empty_selector_matches_everything() {
        let voices = catalog();
        assert_eq!(VoiceSelector::new().filter(&voices).count(), voices.len());
    }

    #[test]
    fn every_attribute_must_match() {
        let voices = catalog();
        let selector = VoiceSelector::new().lang("en-US").local_service(false);
        let found: Vec<_> = selector.filter(&voices).map(|v| v.name.as_str()).collect();
        assert_eq!(found, ["Google US English"]);
    }

    #[test]
    fn merge_prefers_the_newer_attributes() {
        let base = VoiceSelector::new().lang("en-US").name("Alex");
        let merged = base.merge(&VoiceSelector::new().lang("en-GB"));
        assert_eq!(merged.lang, Some(Language::ENGLISH_UK));
        assert_eq!(merged.name.as_deref(), Some("Alex"));
    }

    #[test]
    fn display_lists_present_attributes() {
        let selector = VoiceSelector::new().lang("xx-XX").local_service(true);
        assert_eq!(selector.to_string(), r#"{lang: "xx-XX", localService: true}"#);
    }

    #[test]
    fn voice_uses_host_field_names() {
        let json = serde_json::to_value(Voice::new("en-US", "Alex", "urn:alex", true)).unwrap();
        assert_eq!(json["voiceURI"], "urn:alex");
        assert_eq!(json["localService"], true);
    }
}
