//! Host capability traits.
//!
//! The recognition and synthesis engines are owned by the host environment.
//! Facades never reach for them globally; they receive these handles at
//! construction, which lets tests substitute the fakes in [`crate::mock`].

use fluent_speech_domain::{
    Language, Pitch, Rate, RecognitionConfig, RecognitionError, SynthesisError, Voice, Volume,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/* ───── recognition ───── */

/// One candidate inside a native result.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NativeAlternative {
    pub transcript: String,
    pub confidence: f32,
}

impl NativeAlternative {
    pub fn new(transcript: impl Into<String>, confidence: f32) -> Self {
        Self {
            transcript: transcript.into(),
            confidence,
        }
    }
}

/// A native recognition result: ordered candidates plus a finality flag.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NativeResult {
    pub is_final: bool,
    pub alternatives: Vec<NativeAlternative>,
}

/// Payload of the host `result` event.
///
/// `results` holds every result of the session so far; `result_index` points
/// at the one that changed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NativeResultEvent {
    pub result_index: usize,
    pub results: Vec<NativeResult>,
}

impl NativeResultEvent {
    /// Single-result event, the common shape for non-continuous sessions.
    pub fn single(is_final: bool, alternatives: Vec<NativeAlternative>) -> Self {
        Self {
            result_index: 0,
            results: vec![NativeResult {
                is_final,
                alternatives,
            }],
        }
    }
}

/// Host recognition event vocabulary.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum NativeRecognitionEvent {
    Start,
    AudioStart,
    SoundStart,
    SpeechStart,
    SpeechEnd,
    SoundEnd,
    AudioEnd,
    End,
    NoMatch,
    Error(RecognitionError),
    Result(NativeResultEvent),
}

/// Callback registered on a native session; invoked for every host event.
pub type NativeEventHandler = Box<dyn FnMut(NativeRecognitionEvent) + Send + 'static>;

/// Session-level settings written onto a native session before `start`.
pub type SessionSettings = RecognitionConfig;

/// Factory for fresh native recognition sessions.
pub trait RecognitionHost: Send + Sync {
    fn create_session(&self) -> Arc<dyn RecognitionSession>;
}

/// A live, host-bound recognition session.
pub trait RecognitionSession: Send + Sync {
    /// Apply language, continuity, interim and alternatives settings.
    fn configure(&self, settings: &SessionSettings);

    /// Replace the event handler.
    fn set_handler(&self, handler: NativeEventHandler);

    /// Begin audio capture. A synchronous refusal is reported here.
    fn start(&self) -> Result<(), RecognitionError>;

    /// Stop capturing; the host may still deliver a final result and `end`.
    fn stop(&self);

    /// Stop capturing and discard pending results.
    fn abort(&self);
}

/* ───── synthesis ───── */

/// Utterance payload handed to the host engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Utterance {
    pub text: String,
    pub lang: Option<Language>,
    /// `None` leaves the choice to the host default voice.
    pub voice: Option<Voice>,
    pub volume: Volume,
    pub rate: Rate,
    pub pitch: Pitch,
}

/// How the host finished an utterance.
#[derive(Debug, Clone, PartialEq)]
pub enum UtteranceOutcome {
    Ended,
    Failed(SynthesisError),
}

/// Completion callback for a queued utterance; called exactly once.
pub type UtteranceCallback = Box<dyn FnOnce(UtteranceOutcome) + Send + 'static>;

/// One-time catalog readiness callback.
pub type VoicesReadyCallback = Box<dyn FnOnce() + Send + 'static>;

/// Handle of a registered readiness callback, used to remove it again.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct VoicesListenerId(pub u64);

/// The host text-to-speech engine.
pub trait SynthesisHost: Send + Sync {
    /// Current catalog snapshot; may be empty until the host is ready.
    fn voices(&self) -> Vec<Voice>;

    /// Register a callback for the next catalog-ready notification.
    fn on_voices_changed(&self, callback: VoicesReadyCallback) -> VoicesListenerId;

    /// Drop a registered callback. Unknown or already fired ids are ignored.
    fn remove_voices_listener(&self, id: VoicesListenerId);

    /// Enqueue an utterance.
    fn speak(&self, utterance: Utterance, on_done: UtteranceCallback);

    /// Drop every queued utterance.
    fn cancel(&self);

    fn pause(&self);

    fn resume(&self);

    fn is_speaking(&self) -> bool;

    fn is_pending(&self) -> bool;

    fn is_paused(&self) -> bool;
}

#[cfg(test)]
mod tests {
    use super::*;
    use fluent_speech_domain::RecognitionErrorKind;

    #[test]
    fn native_events_decode_from_bridge_messages() {
        let event: NativeRecognitionEvent = serde_json::from_str(
            r#"{"type":"result","resultIndex":0,"results":[
                {"isFinal":true,"alternatives":[{"transcript":"hi","confidence":0.5}]}
            ]}"#,
        )
        .unwrap();
        assert_eq!(
            event,
            NativeRecognitionEvent::Result(NativeResultEvent::single(
                true,
                vec![NativeAlternative::new("hi", 0.5)],
            ))
        );

        let event: NativeRecognitionEvent =
            serde_json::from_str(r#"{"type":"error","kind":"not-allowed","message":"denied"}"#)
                .unwrap();
        assert_eq!(
            event,
            NativeRecognitionEvent::Error(RecognitionError::new(
                RecognitionErrorKind::NotAllowed,
                "denied",
            ))
        );

        let event: NativeRecognitionEvent = serde_json::from_str(r#"{"type":"audiostart"}"#).unwrap();
        assert_eq!(event, NativeRecognitionEvent::AudioStart);
    }
}
