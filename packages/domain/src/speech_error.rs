//! Unified error for recognition and synthesis calls.
use crate::voice::VoiceSelector;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Top-level error covering both facades.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SpeechError {
    /// Host recognition failure before a usable result.
    #[error("recognition: {0}")]
    Recognition(#[from] RecognitionError),
    /// No catalog voice satisfied the selector.
    #[error("no voices match the given selector: {selector}")]
    VoiceResolution { selector: VoiceSelector },
    /// Host utterance failure.
    #[error("synthesis: {0}")]
    Synthesis(#[from] SynthesisError),
    /// The host never reported a voice catalog.
    #[error("voice catalog unavailable: {0}")]
    VoicesUnavailable(String),
    /// Configuration could not be read.
    #[error("configuration: {0}")]
    Configuration(String),
}

/// Result alias used across the facades.
pub type SpeechResult<T> = Result<T, SpeechError>;

/// Recognition failure reported by the host (or synthesized when a session ends empty).
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize, Deserialize)]
#[error("{kind}: {message}")]
pub struct RecognitionError {
    pub kind: RecognitionErrorKind,
    pub message: String,
}

impl RecognitionError {
    pub fn new(kind: RecognitionErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

/// Host recognition error codes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, derive_more::Display)]
#[serde(rename_all = "kebab-case")]
pub enum RecognitionErrorKind {
    #[display("no-speech")]
    NoSpeech,
    #[display("aborted")]
    Aborted,
    #[display("audio-capture")]
    AudioCapture,
    #[display("network")]
    Network,
    #[display("not-allowed")]
    NotAllowed,
    #[display("service-not-allowed")]
    ServiceNotAllowed,
    #[display("bad-grammar")]
    BadGrammar,
    #[display("language-not-supported")]
    LanguageNotSupported,
    /// Session ended without producing a final result.
    #[display("no-result")]
    NoResult,
    #[display("{_0}")]
    #[serde(untagged)]
    Other(String),
}

impl From<&str> for RecognitionErrorKind {
    fn from(code: &str) -> Self {
        match code {
            "no-speech" => Self::NoSpeech,
            "aborted" => Self::Aborted,
            "audio-capture" => Self::AudioCapture,
            "network" => Self::Network,
            "not-allowed" => Self::NotAllowed,
            "service-not-allowed" => Self::ServiceNotAllowed,
            "bad-grammar" => Self::BadGrammar,
            "language-not-supported" => Self::LanguageNotSupported,
            "no-result" => Self::NoResult,
            other => Self::Other(other.to_string()),
        }
    }
}

/// Utterance failure reported by the host.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize, Deserialize)]
#[error("{kind}: {message}")]
pub struct SynthesisError {
    pub kind: SynthesisErrorKind,
    pub message: String,
}

impl SynthesisError {
    pub fn new(kind: SynthesisErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

/// Host synthesis error codes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, derive_more::Display)]
#[serde(rename_all = "kebab-case")]
pub enum SynthesisErrorKind {
    #[display("canceled")]
    Canceled,
    #[display("interrupted")]
    Interrupted,
    #[display("audio-busy")]
    AudioBusy,
    #[display("audio-hardware")]
    AudioHardware,
    #[display("network")]
    Network,
    #[display("synthesis-unavailable")]
    SynthesisUnavailable,
    #[display("synthesis-failed")]
    SynthesisFailed,
    #[display("language-unavailable")]
    LanguageUnavailable,
    #[display("voice-unavailable")]
    VoiceUnavailable,
    #[display("text-too-long")]
    TextTooLong,
    #[display("invalid-argument")]
    InvalidArgument,
    #[display("not-allowed")]
    NotAllowed,
    #[display("{_0}")]
    #[serde(untagged)]
    Other(String),
}

impl From<&str> for SynthesisErrorKind {
    fn from(code: &str) -> Self {
        match code {
            "canceled" => Self::Canceled,
            "interrupted" => Self::Interrupted,
            "audio-busy" => Self::AudioBusy,
            "audio-hardware" => Self::AudioHardware,
            "network" => Self::Network,
            "synthesis-unavailable" => Self::SynthesisUnavailable,
            "synthesis-failed" => Self::SynthesisFailed,
            "language-unavailable" => Self::LanguageUnavailable,
            "voice-unavailable" => Self::VoiceUnavailable,
            "text-too-long" => Self::TextTooLong,
            "invalid-argument" => Self::InvalidArgument,
            "not-allowed" => Self::NotAllowed,
            other => Self::Other(other.to_string()),
        }
    }
}
