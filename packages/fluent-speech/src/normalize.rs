//! Host event → [`RecognitionEvent`] translation.

use crate::host::{NativeRecognitionEvent, NativeResultEvent};
use fluent_speech_domain::{Alternative, RecognitionEvent};

/// Translate one native event.
///
/// `result` events become `interim` or `final` according to the changed
/// result's finality flag, carrying at most `max_alternatives` candidates in
/// host order. Every other tag maps one-to-one.
pub fn normalize(event: NativeRecognitionEvent, max_alternatives: u32) -> RecognitionEvent {
    match event {
        NativeRecognitionEvent::Start => RecognitionEvent::Start,
        NativeRecognitionEvent::AudioStart => RecognitionEvent::AudioStart,
        NativeRecognitionEvent::SoundStart => RecognitionEvent::SoundStart,
        NativeRecognitionEvent::SpeechStart => RecognitionEvent::SpeechStart,
        NativeRecognitionEvent::SpeechEnd => RecognitionEvent::SpeechEnd,
        NativeRecognitionEvent::SoundEnd => RecognitionEvent::SoundEnd,
        NativeRecognitionEvent::AudioEnd => RecognitionEvent::AudioEnd,
        NativeRecognitionEvent::End => RecognitionEvent::End,
        NativeRecognitionEvent::NoMatch => RecognitionEvent::NoMatch,
        NativeRecognitionEvent::Error(error) => RecognitionEvent::Error { error },
        NativeRecognitionEvent::Result(result) => shape_result(result, max_alternatives),
    }
}

fn shape_result(event: NativeResultEvent, max_alternatives: u32) -> RecognitionEvent {
    let NativeResultEvent {
        result_index,
        mut results,
    } = event;

    if result_index >= results.len() {
        tracing::warn!(
            result_index,
            results = results.len(),
            "result index out of range, emitting empty interim"
        );
        return RecognitionEvent::Interim {
            alternatives: Vec::new(),
        };
    }

    let result = results.swap_remove(result_index);
    let limit = usize::try_from(max_alternatives.max(1)).unwrap_or(usize::MAX);
    let alternatives = result
        .alternatives
        .into_iter()
        .take(limit)
        .map(|alt| Alternative::new(alt.transcript, alt.confidence))
        .collect();

    if result.is_final {
        RecognitionEvent::Final { alternatives }
    } else {
        RecognitionEvent::Interim { alternatives }
    }
}
