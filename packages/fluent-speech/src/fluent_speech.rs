//! Unified entry point exposing both facades side by side.

use crate::host::{RecognitionHost, SynthesisHost, Utterance};
use crate::recognition::Recognition;
use crate::synthesis::Synthesis;
use fluent_speech_domain::{FluentSpeechConfig, SpeechResult};
use std::sync::Arc;

/// A recognition facade and a synthesis facade bound to their host engines.
///
/// The two halves share no state; this type only carries them together.
#[derive(Clone, Debug)]
pub struct FluentSpeech {
    recognition: Recognition,
    synthesis: Synthesis,
}

impl FluentSpeech {
    pub fn new(
        recognition_host: Arc<dyn RecognitionHost>,
        synthesis_host: Arc<dyn SynthesisHost>,
    ) -> Self {
        Self::from_config(
            recognition_host,
            synthesis_host,
            FluentSpeechConfig::default(),
        )
    }

    pub fn from_config(
        recognition_host: Arc<dyn RecognitionHost>,
        synthesis_host: Arc<dyn SynthesisHost>,
        config: FluentSpeechConfig,
    ) -> Self {
        Self {
            recognition: Recognition::with_config(recognition_host, config.recognition),
            synthesis: Synthesis::with_settings(synthesis_host, config.synthesis),
        }
    }

    pub fn recognition(&self) -> &Recognition {
        &self.recognition
    }

    pub fn synthesis(&self) -> &Synthesis {
        &self.synthesis
    }

    /// Replace the recognition half.
    #[must_use]
    pub fn with_recognition(&self, recognition: Recognition) -> Self {
        Self {
            recognition,
            synthesis: self.synthesis.clone(),
        }
    }

    /// Replace the synthesis half.
    #[must_use]
    pub fn with_synthesis(&self, synthesis: Synthesis) -> Self {
        Self {
            recognition: self.recognition.clone(),
            synthesis,
        }
    }

    /// Listen once and speak back what was heard.
    pub async fn speak_transcript(&self) -> SpeechResult<Utterance> {
        let transcript = self.recognition.listen().await?;
        tracing::debug!(%transcript, "echoing transcript");
        self.synthesis.speak(transcript).await
    }
}
