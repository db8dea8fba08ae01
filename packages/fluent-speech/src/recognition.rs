//! Speech-to-text facade.
//!
//! ```ignore
//! let recognition = Recognition::new(host).derive(RecognitionOptions::new().lang("fr-FR"));
//!
//! // one result
//! let text = recognition.listen().await?;
//!
//! // every event until `end`
//! let subscription = recognition.subscribe(
//!     PartialObserver::new()
//!         .on_next(|event: RecognitionEvent| println!("{}", event.tag()))
//!         .on_complete(|| println!("done")),
//! );
//! subscription.unsubscribe();
//! ```

use crate::host::{NativeRecognitionEvent, RecognitionHost, RecognitionSession};
use crate::interop::{EventStream, Observer, Subscribable, Subscription, Unsubscribe, into_stream};
use crate::normalize::normalize;
use fluent_speech_domain::{
    RecognitionConfig, RecognitionError, RecognitionErrorKind, RecognitionEvent,
    RecognitionOptions, SpeechError, SpeechResult,
};
use futures::channel::oneshot;
use parking_lot::Mutex;
use std::future::Future;
use std::sync::Arc;

/// Immutable recognition configuration bound to a host engine.
///
/// Every call to [`listen`](Self::listen) or [`subscribe`](Self::subscribe)
/// opens a fresh host session; instances share nothing mutable.
#[derive(Clone)]
pub struct Recognition {
    config: RecognitionConfig,
    host: Arc<dyn RecognitionHost>,
}

impl Recognition {
    pub fn new(host: Arc<dyn RecognitionHost>) -> Self {
        Self::with_config(host, RecognitionConfig::default())
    }

    pub fn with_config(host: Arc<dyn RecognitionHost>, config: RecognitionConfig) -> Self {
        Self { config, host }
    }

    pub fn config(&self) -> &RecognitionConfig {
        &self.config
    }

    /// New instance with `options` merged over this configuration.
    #[must_use]
    pub fn derive(&self, options: RecognitionOptions) -> Self {
        Self {
            config: self.config.merge(&options),
            host: Arc::clone(&self.host),
        }
    }

    /// Transcribe a single utterance.
    ///
    /// The session starts immediately, in one-shot mode regardless of the
    /// stored `continuous`/`interim_results` settings, and the future resolves
    /// with the top transcript of the first final result.
    pub fn listen(&self) -> impl Future<Output = SpeechResult<String>> + Send + 'static {
        let settings = self.config.one_shot();
        let max_alternatives = settings.max_alternatives;
        let session = self.host.create_session();
        session.configure(&settings);

        let (tx, rx) = oneshot::channel::<SpeechResult<String>>();
        let mut tx = Some(tx);
        session.set_handler(Box::new(move |native| {
            if tx.is_none() {
                return;
            }
            let outcome = match normalize(native, max_alternatives) {
                RecognitionEvent::Final { alternatives } => Ok(alternatives
                    .into_iter()
                    .next()
                    .map(|alt| alt.transcript)
                    .unwrap_or_default()),
                RecognitionEvent::Error { error } => Err(SpeechError::Recognition(error)),
                RecognitionEvent::End => Err(SpeechError::Recognition(RecognitionError::new(
                    RecognitionErrorKind::NoResult,
                    "session ended before a final result",
                ))),
                _ => return,
            };
            if let Some(tx) = tx.take() {
                let _ = tx.send(outcome);
            }
        }));

        tracing::debug!(lang = %settings.lang, "starting one-shot recognition");
        let started = session.start();
        let mut guard = AbortOnDrop(started.is_ok().then_some(session));

        async move {
            if let Err(error) = started {
                tracing::warn!(%error, "recognition session refused to start");
                return Err(SpeechError::Recognition(error));
            }
            let outcome = rx.await.unwrap_or_else(|_| {
                Err(SpeechError::Recognition(RecognitionError::new(
                    RecognitionErrorKind::Aborted,
                    "recognition session dropped its handler",
                )))
            });
            let session = guard.disarm();
            match &outcome {
                Ok(transcript) => {
                    tracing::debug!(%transcript, "one-shot recognition resolved");
                    if let Some(session) = session {
                        session.stop();
                    }
                }
                Err(error) => tracing::warn!(%error, "one-shot recognition failed"),
            }
            outcome
        }
    }

    /// Observe every normalized event of a fresh session.
    ///
    /// `end` and `error` are forwarded to `next` and then close the stream
    /// with `complete` or `error` respectively; nothing is delivered after.
    pub fn subscribe<O>(&self, observer: O) -> Subscription
    where
        O: Observer<RecognitionEvent, SpeechError> + 'static,
    {
        let settings = self.config.clone();
        let session = self.host.create_session();
        session.configure(&settings);

        let teardown_session = Arc::clone(&session);
        let subscription = Subscription::new(move || {
            tracing::debug!("unsubscribed, stopping recognition session");
            teardown_session.stop();
        });

        let forwarder = Arc::new(Mutex::new(Forwarder {
            observer: Box::new(observer),
            subscription: subscription.clone(),
            max_alternatives: settings.max_alternatives,
        }));

        let handle = subscription.clone();
        let delivery = Arc::clone(&forwarder);
        session.set_handler(Box::new(move |native| {
            // Checked before locking so an unsubscribe from inside a callback
            // can re-enter without deadlocking.
            if handle.is_closed() {
                return;
            }
            delivery.lock().deliver(native);
        }));

        tracing::debug!(
            lang = %settings.lang,
            continuous = settings.continuous,
            interim_results = settings.interim_results,
            max_alternatives = settings.max_alternatives,
            "starting recognition subscription"
        );
        if let Err(error) = session.start() {
            tracing::warn!(%error, "recognition session refused to start");
            forwarder.lock().deliver(NativeRecognitionEvent::Error(error));
        }
        subscription
    }

    /// `Stream` of normalized events; dropping it stops the session.
    pub fn events(&self) -> EventStream<RecognitionEvent, SpeechError> {
        into_stream(self)
    }

    /// This facade as the interop capability.
    pub fn as_subscribable(
        &self,
    ) -> &dyn Subscribable<Item = RecognitionEvent, Error = SpeechError> {
        self
    }
}

impl Subscribable for Recognition {
    type Item = RecognitionEvent;
    type Error = SpeechError;

    fn subscribe_boxed(
        &self,
        observer: Box<dyn Observer<RecognitionEvent, SpeechError>>,
    ) -> Subscription {
        self.subscribe(observer)
    }
}

impl std::fmt::Debug for Recognition {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Recognition")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

/// Aborts a one-shot session whose `listen` future is dropped unresolved.
struct AbortOnDrop(Option<Arc<dyn RecognitionSession>>);

impl AbortOnDrop {
    fn disarm(&mut self) -> Option<Arc<dyn RecognitionSession>> {
        self.0.take()
    }
}

impl Drop for AbortOnDrop {
    fn drop(&mut self) {
        if let Some(session) = self.0.take() {
            tracing::debug!("listen dropped before a result, aborting recognition session");
            session.abort();
        }
    }
}

struct Forwarder {
    observer: Box<dyn Observer<RecognitionEvent, SpeechError>>,
    subscription: Subscription,
    max_alternatives: u32,
}

impl Forwarder {
    fn deliver(&mut self, native: NativeRecognitionEvent) {
        if self.subscription.is_closed() {
            return;
        }
        match normalize(native, self.max_alternatives) {
            RecognitionEvent::End => {
                if self.subscription.finish() {
                    self.observer.next(RecognitionEvent::End);
                    self.observer.complete();
                }
            }
            RecognitionEvent::Error { error } => {
                if self.subscription.finish() {
                    self.observer.next(RecognitionEvent::Error {
                        error: error.clone(),
                    });
                    self.observer.error(SpeechError::Recognition(error));
                }
            }
            event => self.observer.next(event),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::host::{NativeAlternative, NativeResultEvent};
    use crate::interop::PartialObserver;
    use crate::mock::MockRecognitionHost;
    use fluent_speech_domain::Language;

    #[test]
    fn derive_leaves_the_receiver_untouched() {
        let host = Arc::new(MockRecognitionHost::new());
        let base = Recognition::new(host);
        let derived = base.derive(RecognitionOptions::new().lang("de-DE").interim_results(true));

        assert_eq!(base.config(), &RecognitionConfig::default());
        assert_eq!(derived.config().lang, Language::GERMAN);
        assert!(derived.config().interim_results);
    }

    #[tokio::test]
    async fn listen_forces_one_shot_settings() {
        let host = Arc::new(MockRecognitionHost::new());
        let recognition = Recognition::new(host.clone()).derive(
            RecognitionOptions::new()
                .continuous(true)
                .interim_results(true),
        );

        let pending = recognition.listen();
        let session = host.last_session().expect("session created");
        let applied = session.settings().expect("configured");
        assert!(!applied.continuous);
        assert!(!applied.interim_results);

        session.emit(NativeRecognitionEvent::Result(NativeResultEvent::single(
            true,
            vec![NativeAlternative::new("ok", 0.5)],
        )));
        assert_eq!(pending.await.unwrap(), "ok");
    }

    #[tokio::test]
    async fn listen_fails_when_session_ends_empty() {
        let host = Arc::new(MockRecognitionHost::new());
        let pending = Recognition::new(host.clone()).listen();
        let session = host.last_session().expect("session created");
        session.emit(NativeRecognitionEvent::Start);
        session.emit(NativeRecognitionEvent::End);

        let err = pending.await.unwrap_err();
        assert!(matches!(
            err,
            SpeechError::Recognition(RecognitionError {
                kind: RecognitionErrorKind::NoResult,
                ..
            })
        ));
    }

    #[test]
    fn dropping_listen_aborts_the_session() {
        let host = Arc::new(MockRecognitionHost::new());
        drop(Recognition::new(host.clone()).listen());

        let session = host.last_session().expect("session created");
        assert_eq!(session.abort_count(), 1);
        assert_eq!(session.stop_count(), 0);
        assert!(!session.is_started());
    }

    #[tokio::test]
    async fn settled_listen_does_not_abort() {
        let host = Arc::new(MockRecognitionHost::new());
        let pending = Recognition::new(host.clone()).listen();
        let session = host.last_session().expect("session created");
        session.emit(NativeRecognitionEvent::End);

        assert!(pending.await.is_err());
        assert_eq!(session.abort_count(), 0);
    }

    #[tokio::test]
    async fn listen_rejects_when_start_is_refused() {
        let host = Arc::new(MockRecognitionHost::new());
        let refusal = RecognitionError::new(RecognitionErrorKind::AudioCapture, "no microphone");
        host.fail_next_start(refusal.clone());

        let pending = Recognition::new(host.clone()).listen();
        assert_eq!(pending.await, Err(SpeechError::Recognition(refusal)));
        let session = host.last_session().expect("session created");
        assert_eq!(session.abort_count(), 0);
    }

    #[test]
    fn start_refusal_reaches_the_error_callback() {
        let host = Arc::new(MockRecognitionHost::new());
        host.fail_next_start(RecognitionError::new(
            RecognitionErrorKind::NotAllowed,
            "permission denied",
        ));

        let errors = Arc::new(Mutex::new(Vec::new()));
        let sink = errors.clone();
        let subscription = Recognition::new(host).subscribe(
            PartialObserver::new().on_error(move |e: SpeechError| sink.lock().push(e)),
        );

        assert!(subscription.is_closed());
        assert_eq!(errors.lock().len(), 1);
    }
}
