//! Normalized recognition events delivered to observers.
use crate::speech_error::RecognitionError;
use serde::{Deserialize, Serialize};

/// One candidate transcription.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Alternative {
    pub transcript: String,
    /// Engine confidence in `[0, 1]`.
    pub confidence: f32,
}

impl Alternative {
    pub fn new(transcript: impl Into<String>, confidence: f32) -> Self {
        Self {
            transcript: transcript.into(),
            confidence,
        }
    }
}

/// Exactly one lifecycle signal or one shaped recognition result.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum RecognitionEvent {
    Start,
    AudioStart,
    SoundStart,
    SpeechStart,
    SpeechEnd,
    SoundEnd,
    AudioEnd,
    End,
    Error { error: RecognitionError },
    NoMatch,
    /// Provisional transcription that may still change.
    Interim { alternatives: Vec<Alternative> },
    /// Last transcription for the utterance.
    Final { alternatives: Vec<Alternative> },
}

impl RecognitionEvent {
    /// Wire label of the event.
    pub fn tag(&self) -> &'static str {
        match self {
            Self::Start => "start",
            Self::AudioStart => "audiostart",
            Self::SoundStart => "soundstart",
            Self::SpeechStart => "speechstart",
            Self::SpeechEnd => "speechend",
            Self::SoundEnd => "soundend",
            Self::AudioEnd => "audioend",
            Self::End => "end",
            Self::Error { .. } => "error",
            Self::NoMatch => "nomatch",
            Self::Interim { .. } => "interim",
            Self::Final { .. } => "final",
        }
    }

    /// Alternatives carried by an `interim` or `final` event.
    pub fn alternatives(&self) -> Option<&[Alternative]> {
        match self {
            Self::Interim { alternatives } | Self::Final { alternatives } => Some(alternatives),
            _ => None,
        }
    }

    /// Top transcript of a result event.
    pub fn transcript(&self) -> Option<&str> {
        self.alternatives()
            .and_then(|alts| alts.first())
            .map(|alt| alt.transcript.as_str())
    }

    pub fn is_final(&self) -> bool {
        matches!(self, Self::Final { .. })
    }

    /// `end` and `error` close a session.
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::End | Self::Error { .. })
    }
}
