//! Text-to-speech facade.
//!
//! ```ignore
//! let synthesis = Synthesis::new(host)
//!     .with_voice(VoiceSelector::new().lang("en-GB"))
//!     .derive(SpeakOptions::new().rate(1.2));
//!
//! synthesis.speak("Hello").await?;
//! synthesis.speak(("Hello", SpeakOptions::new().volume(0.5))).await?;
//! synthesis.derive(SpeakOptions::new().text("stored")).speak(()).await?;
//! ```

mod request;
pub mod voices;

pub use request::SpeakRequest;

use crate::host::{SynthesisHost, Utterance, UtteranceOutcome};
use fluent_speech_domain::{
    SpeakOptions, SpeechError, SpeechResult, SynthesisError, SynthesisErrorKind,
    SynthesisOptions, SynthesisSettings, Voice, VoiceSelector,
};
use futures::channel::oneshot;
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

/// Immutable synthesis options plus a deferred voice selector.
///
/// The selector is only resolved against the host catalog when speaking,
/// and always against the full catalog.
#[derive(Clone)]
pub struct Synthesis {
    options: SynthesisOptions,
    selector: VoiceSelector,
    voices_timeout: Option<Duration>,
    host: Arc<dyn SynthesisHost>,
}

impl Synthesis {
    pub fn new(host: Arc<dyn SynthesisHost>) -> Self {
        Self::with_settings(host, SynthesisSettings::default())
    }

    pub fn with_settings(host: Arc<dyn SynthesisHost>, settings: SynthesisSettings) -> Self {
        let voices_timeout = settings.voices_timeout();
        Self {
            options: settings.options,
            selector: settings.voice,
            voices_timeout,
            host,
        }
    }

    pub fn options(&self) -> &SynthesisOptions {
        &self.options
    }

    pub fn selector(&self) -> &VoiceSelector {
        &self.selector
    }

    /// New instance resolving its voice with `selector`, replacing any
    /// selector set before.
    #[must_use]
    pub fn with_voice(&self, selector: VoiceSelector) -> Self {
        Self {
            selector,
            ..self.clone()
        }
    }

    /// New instance with option fields merged (and clamped) and selector
    /// attributes merged into the voice resolver.
    #[must_use]
    pub fn derive(&self, update: SpeakOptions) -> Self {
        Self {
            options: self.options.merge(&update),
            selector: self.selector.merge(&update.voice),
            voices_timeout: self.voices_timeout,
            host: Arc::clone(&self.host),
        }
    }

    /// Give up waiting for the voice catalog after `timeout`.
    ///
    /// The timer is a tokio timer: awaiting a catalog wait outside a tokio
    /// runtime fails with [`SpeechError::Configuration`]. Without the
    /// `tokio-runtime` feature the timeout is ignored.
    #[must_use]
    pub fn voices_timeout(&self, timeout: Duration) -> Self {
        Self {
            voices_timeout: Some(timeout),
            ..self.clone()
        }
    }

    /// Speak, accepting any of the [`SpeakRequest`] shapes.
    ///
    /// The shape is folded into the options eagerly; the host is only
    /// contacted once the returned future is polled. Resolves with the
    /// utterance the host finished.
    pub fn speak(
        &self,
        request: impl Into<SpeakRequest>,
    ) -> impl Future<Output = SpeechResult<Utterance>> + Send + 'static {
        let target = match request.into().into_update() {
            Some(update) => self.derive(update),
            None => self.clone(),
        };
        target.dispatch()
    }

    async fn dispatch(self) -> SpeechResult<Utterance> {
        let voice = self.resolve_voice().await?;
        let lang = voice
            .as_ref()
            .map(|voice| voice.lang.clone())
            .or_else(|| self.selector.lang.clone());
        let utterance = Utterance {
            text: self.options.text.clone(),
            lang,
            voice,
            volume: self.options.volume,
            rate: self.options.rate,
            pitch: self.options.pitch,
        };

        tracing::debug!(
            chars = utterance.text.chars().count(),
            voice = utterance.voice.as_ref().map(|v| v.name.as_str()),
            volume = %utterance.volume,
            rate = %utterance.rate,
            pitch = %utterance.pitch,
            "dispatching utterance"
        );

        let (tx, rx) = oneshot::channel::<UtteranceOutcome>();
        self.host.speak(
            utterance.clone(),
            Box::new(move |outcome| {
                let _ = tx.send(outcome);
            }),
        );

        match rx.await {
            Ok(UtteranceOutcome::Ended) => Ok(utterance),
            Ok(UtteranceOutcome::Failed(error)) => {
                tracing::warn!(%error, "utterance failed");
                Err(SpeechError::Synthesis(error))
            }
            Err(_) => Err(SpeechError::Synthesis(SynthesisError::new(
                SynthesisErrorKind::Interrupted,
                "host dropped the utterance callback",
            ))),
        }
    }

    /// Voice the next `speak` would use; `None` means the host default.
    pub fn resolve_voice(
        &self,
    ) -> impl Future<Output = SpeechResult<Option<Voice>>> + Send + 'static {
        let selector = self.selector.clone();
        let catalog = self.get_all_voices();
        async move {
            if selector.is_empty() {
                return Ok(None);
            }
            let available = catalog.await?;
            voices::resolve(&selector, &available).map(Some)
        }
    }

    /// Every catalog voice matching the current selector, in catalog order.
    pub fn matching_voices(
        &self,
    ) -> impl Future<Output = SpeechResult<Vec<Voice>>> + Send + 'static {
        let selector = self.selector.clone();
        let catalog = self.get_all_voices();
        async move {
            let available = catalog.await?;
            Ok(selector.filter(&available).cloned().collect())
        }
    }

    /// The host catalog, waiting for its readiness signal if necessary.
    pub fn get_all_voices(
        &self,
    ) -> impl Future<Output = SpeechResult<Vec<Voice>>> + Send + 'static {
        voices::all_voices(Arc::clone(&self.host), self.voices_timeout)
    }

    /// Drop every queued utterance on the host.
    pub fn cancel(&self) {
        self.host.cancel();
    }

    pub fn pause(&self) {
        self.host.pause();
    }

    pub fn resume(&self) {
        self.host.resume();
    }

    pub fn is_speaking(&self) -> bool {
        self.host.is_speaking()
    }

    pub fn is_pending(&self) -> bool {
        self.host.is_pending()
    }

    pub fn is_paused(&self) -> bool {
        self.host.is_paused()
    }
}

impl std::fmt::Debug for Synthesis {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Synthesis")
            .field("options", &self.options)
            .field("selector", &self.selector)
            .field("voices_timeout", &self.voices_timeout)
            .finish_non_exhaustive()
    }
}
