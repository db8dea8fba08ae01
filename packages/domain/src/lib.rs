//! # Fluent Speech Domain
//!
//! Shared domain objects and types for the fluent-speech facades.
//!
//! This crate holds plain values only: configuration, normalized events,
//! voice descriptors and the error taxonomy. It knows nothing about the
//! host engines, which live behind the traits in `fluent_speech::host`.

pub mod config;
pub mod language;
pub mod recognition_config;
pub mod recognition_event;
pub mod speech_error;
pub mod synthesis_options;
pub mod voice;

// Re-export core types
pub use config::{FluentSpeechConfig, SynthesisSettings};
pub use language::{Language, SUPPORTED_LANGUAGES};
pub use recognition_config::{RecognitionConfig, RecognitionOptions};
pub use recognition_event::{Alternative, RecognitionEvent};
pub use speech_error::{
    RecognitionError, RecognitionErrorKind, SpeechError, SpeechResult, SynthesisError,
    SynthesisErrorKind,
};
pub use synthesis_options::{Pitch, Rate, SpeakOptions, SynthesisOptions, Volume};
pub use voice::{Voice, VoiceSelector};

/// Prelude module containing commonly used types.
pub mod prelude {
    pub use crate::{
        Alternative, FluentSpeechConfig, Language, Pitch, Rate, RecognitionConfig,
        RecognitionError, RecognitionErrorKind, RecognitionEvent, RecognitionOptions, SpeakOptions,
        SpeechError, SpeechResult, SynthesisError, SynthesisErrorKind, SynthesisOptions,
        SynthesisSettings, Voice, VoiceSelector, Volume,
    };
}
