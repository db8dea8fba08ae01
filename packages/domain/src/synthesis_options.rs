//! Synthesis payload options.
//!
//! Volume, rate and pitch are saturating newtypes: out-of-domain input is
//! clamped to the nearest boundary instead of being rejected, both when
//! constructed in code and when deserialized from configuration.

use crate::language::Language;
use crate::voice::VoiceSelector;
use serde::{Deserialize, Serialize};

macro_rules! clamped_param {
    ($(#[$meta:meta])* $name:ident, $min:expr, $max:expr, $default:expr) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize, derive_more::Display, derive_more::Into)]
        #[serde(from = "f32", into = "f32")]
        pub struct $name(f32);

        impl $name {
            pub const MIN: f32 = $min;
            pub const MAX: f32 = $max;

            /// Clamp `value` into the valid domain. NaN falls back to the default.
            pub fn new(value: f32) -> Self {
                if value.is_nan() {
                    return Self::default();
                }
                Self(value.clamp(Self::MIN, Self::MAX))
            }

            pub fn value(self) -> f32 {
                self.0
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self($default)
            }
        }

        impl From<f32> for $name {
            fn from(value: f32) -> Self {
                Self::new(value)
            }
        }
    };
}

clamped_param!(
    /// Output volume in `[0, 1]`.
    Volume, 0.0, 1.0, 1.0
);
clamped_param!(
    /// Speaking rate in `[0.1, 10]` (1.0 = normal).
    Rate, 0.1, 10.0, 1.0
);
clamped_param!(
    /// Pitch in `[0, 2]` (1.0 = normal).
    Pitch, 0.0, 2.0, 1.0
);

/// Fully populated synthesis options.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SynthesisOptions {
    pub text: String,
    pub volume: Volume,
    pub rate: Rate,
    pub pitch: Pitch,
}

impl SynthesisOptions {
    /// Merge the option fields of `update`, clamping numeric values.
    #[must_use]
    pub fn merge(&self, update: &SpeakOptions) -> Self {
        Self {
            text: update.text.clone().unwrap_or_else(|| self.text.clone()),
            volume: update.volume.map_or(self.volume, Volume::new),
            rate: update.rate.map_or(self.rate, Rate::new),
            pitch: update.pitch.map_or(self.pitch, Pitch::new),
        }
    }
}

/// Partial synthesis options plus voice-selector attributes.
///
/// The selector half only narrows voice resolution; it is never part of the
/// spoken payload.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SpeakOptions {
    pub text: Option<String>,
    pub volume: Option<f32>,
    pub rate: Option<f32>,
    pub pitch: Option<f32>,
    #[serde(flatten)]
    pub voice: VoiceSelector,
}

impl SpeakOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn text(mut self, text: impl Into<String>) -> Self {
        self.text = Some(text.into());
        self
    }

    pub fn volume(mut self, volume: f32) -> Self {
        self.volume = Some(volume);
        self
    }

    pub fn rate(mut self, rate: f32) -> Self {
        self.rate = Some(rate);
        self
    }

    pub fn pitch(mut self, pitch: f32) -> Self {
        self.pitch = Some(pitch);
        self
    }

    pub fn lang(mut self, lang: impl Into<Language>) -> Self {
        self.voice.lang = Some(lang.into());
        self
    }

    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.voice.name = Some(name.into());
        self
    }

    pub fn voice_uri(mut self, voice_uri: impl Into<String>) -> Self {
        self.voice.voice_uri = Some(voice_uri.into());
        self
    }

    pub fn local_service(mut self, local_service: bool) -> Self {
        self.voice.local_service = Some(local_service);
        self
    }

    /// Merge a whole selector into the voice half.
    pub fn voice(mut self, selector: &VoiceSelector) -> Self {
        self.voice = self.voice.merge(selector);
        self
    }
}

impl From<VoiceSelector> for SpeakOptions {
    fn from(voice: VoiceSelector) -> Self {
        Self {
            voice,
            ..Self::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn values_saturate_at_domain_boundaries() {
        assert_eq!(Volume::new(5.0).value(), 1.0);
        assert_eq!(Volume::new(-1.0).value(), 0.0);
        assert_eq!(Rate::new(0.0).value(), 0.1);
        assert_eq!(Rate::new(50.0).value(), 10.0);
        assert_eq!(Pitch::new(3.0).value(), 2.0);
        assert_eq!(Pitch::new(-0.5).value(), 0.0);
    }

    #[test]
    fn clamping_is_idempotent() {
        for raw in [-3.0_f32, 0.05, 0.7, 1.5, 12.0] {
            let once = Rate::new(raw);
            assert_eq!(Rate::new(once.value()), once);
        }
    }

    #[test]
    fn nan_falls_back_to_default() {
        assert_eq!(Pitch::new(f32::NAN), Pitch::default());
    }

    #[test]
    fn merge_clamps_and_keeps_missing_fields() {
        let base = SynthesisOptions {
            text: "before".into(),
            ..SynthesisOptions::default()
        };
        let merged = base.merge(&SpeakOptions::new().volume(5.0).rate(0.01));
        assert_eq!(merged.text, "before");
        assert_eq!(merged.volume.value(), 1.0);
        assert_eq!(merged.rate.value(), 0.1);
        assert_eq!(merged.pitch, Pitch::default());
    }

    #[test]
    fn deserialization_clamps() {
        let options: SynthesisOptions =
            serde_json::from_str(r#"{"text":"hi","volume":4.0,"pitch":-2.0}"#).unwrap();
        assert_eq!(options.volume.value(), 1.0);
        assert_eq!(options.pitch.value(), 0.0);
        assert_eq!(options.rate.value(), 1.0);
    }

    #[test]
    fn speak_options_flatten_selector_fields() {
        let options: SpeakOptions =
            serde_json::from_str(r#"{"text":"hi","lang":"en-GB","localService":true}"#).unwrap();
        assert_eq!(options.text.as_deref(), Some("hi"));
        assert_eq!(options.voice.lang, Some(Language::ENGLISH_UK));
        assert_eq!(options.voice.local_service, Some(true));
    }
}
