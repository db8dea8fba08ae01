//! In-memory host engines.
//!
//! Both fakes record every control call and let the caller drive the host
//! side by hand: push native recognition events, publish a voice catalog,
//! finish queued utterances.

use crate::host::{
    NativeEventHandler, NativeRecognitionEvent, RecognitionHost, RecognitionSession,
    SessionSettings, SynthesisHost, Utterance, UtteranceCallback, UtteranceOutcome,
    VoicesListenerId, VoicesReadyCallback,
};
use fluent_speech_domain::{RecognitionError, SynthesisError, SynthesisErrorKind, Voice};
use parking_lot::Mutex;
use std::collections::VecDeque;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicU64, AtomicUsize, Ordering};

/* ───── recognition ───── */

/// Fake recognition engine handing out [`MockRecognitionSession`]s.
#[derive(Default)]
pub struct MockRecognitionHost {
    sessions: Mutex<Vec<Arc<MockRecognitionSession>>>,
    next_start_error: Mutex<Option<RecognitionError>>,
}

impl MockRecognitionHost {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make the next created session refuse `start` with `error`.
    pub fn fail_next_start(&self, error: RecognitionError) {
        *self.next_start_error.lock() = Some(error);
    }

    pub fn sessions(&self) -> Vec<Arc<MockRecognitionSession>> {
        self.sessions.lock().clone()
    }

    pub fn last_session(&self) -> Option<Arc<MockRecognitionSession>> {
        self.sessions.lock().last().cloned()
    }
}

impl RecognitionHost for MockRecognitionHost {
    fn create_session(&self) -> Arc<dyn RecognitionSession> {
        let session = Arc::new(MockRecognitionSession {
            start_error: self.next_start_error.lock().take(),
            ..MockRecognitionSession::default()
        });
        self.sessions.lock().push(Arc::clone(&session));
        session
    }
}

/// Fake native session. Events are delivered only through [`emit`](Self::emit).
#[derive(Default)]
pub struct MockRecognitionSession {
    settings: Mutex<Option<SessionSettings>>,
    handler: Mutex<Option<NativeEventHandler>>,
    start_error: Option<RecognitionError>,
    started: AtomicBool,
    stops: AtomicUsize,
    aborts: AtomicUsize,
}

impl MockRecognitionSession {
    /// Settings written by the facade, if any.
    pub fn settings(&self) -> Option<SessionSettings> {
        self.settings.lock().clone()
    }

    pub fn is_started(&self) -> bool {
        self.started.load(Ordering::SeqCst)
    }

    pub fn stop_count(&self) -> usize {
        self.stops.load(Ordering::SeqCst)
    }

    pub fn abort_count(&self) -> usize {
        self.aborts.load(Ordering::SeqCst)
    }

    /// Deliver a native event to the registered handler.
    ///
    /// The handler is taken out of its slot for the call, so events emitted
    /// re-entrantly from inside it are dropped.
    pub fn emit(&self, event: NativeRecognitionEvent) {
        let handler = self.handler.lock().take();
        let Some(mut handler) = handler else {
            return;
        };
        handler(event);
        let mut slot = self.handler.lock();
        if slot.is_none() {
            *slot = Some(handler);
        }
    }

    pub fn emit_all(&self, events: impl IntoIterator<Item = NativeRecognitionEvent>) {
        for event in events {
            self.emit(event);
        }
    }
}

impl RecognitionSession for MockRecognitionSession {
    fn configure(&self, settings: &SessionSettings) {
        *self.settings.lock() = Some(settings.clone());
    }

    fn set_handler(&self, handler: NativeEventHandler) {
        *self.handler.lock() = Some(handler);
    }

    fn start(&self) -> Result<(), RecognitionError> {
        if let Some(error) = &self.start_error {
            return Err(error.clone());
        }
        self.started.store(true, Ordering::SeqCst);
        Ok(())
    }

    fn stop(&self) {
        self.stops.fetch_add(1, Ordering::SeqCst);
        self.started.store(false, Ordering::SeqCst);
    }

    fn abort(&self) {
        self.aborts.fetch_add(1, Ordering::SeqCst);
        self.started.store(false, Ordering::SeqCst);
    }
}

/* ───── synthesis ───── */

/// When queued utterances finish.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Completion {
    /// Report `Ended` from inside `speak`.
    #[default]
    Immediate,
    /// Wait for [`MockSynthesisHost::finish_next`].
    Manual,
}

/// Fake speech synthesis engine.
#[derive(Default)]
pub struct MockSynthesisHost {
    voices: Mutex<Vec<Voice>>,
    ready: Mutex<Vec<(VoicesListenerId, VoicesReadyCallback)>>,
    next_listener: AtomicU64,
    spoken: Mutex<Vec<Utterance>>,
    pending: Mutex<VecDeque<UtteranceCallback>>,
    completion: Mutex<Completion>,
    next_failure: Mutex<Option<SynthesisError>>,
    paused: AtomicBool,
    cancels: AtomicUsize,
}

impl MockSynthesisHost {
    /// Host whose catalog is already populated.
    pub fn with_voices(voices: Vec<Voice>) -> Self {
        let host = Self::default();
        *host.voices.lock() = voices;
        host
    }

    /// Host whose catalog is empty until [`load_voices`](Self::load_voices).
    pub fn unready() -> Self {
        Self::default()
    }

    pub fn set_completion(&self, completion: Completion) {
        *self.completion.lock() = completion;
    }

    /// Make the next `speak` fail with `error`.
    pub fn fail_next(&self, error: SynthesisError) {
        *self.next_failure.lock() = Some(error);
    }

    /// Publish a catalog and fire pending readiness callbacks.
    pub fn load_voices(&self, voices: Vec<Voice>) {
        *self.voices.lock() = voices;
        let callbacks = std::mem::take(&mut *self.ready.lock());
        for (_, callback) in callbacks {
            callback();
        }
    }

    /// Every utterance handed to `speak`, in order.
    pub fn spoken(&self) -> Vec<Utterance> {
        self.spoken.lock().clone()
    }

    pub fn pending_count(&self) -> usize {
        self.pending.lock().len()
    }

    pub fn ready_listener_count(&self) -> usize {
        self.ready.lock().len()
    }

    pub fn cancel_count(&self) -> usize {
        self.cancels.load(Ordering::SeqCst)
    }

    /// Finish the oldest queued utterance. Returns `false` if none was queued.
    pub fn finish_next(&self, outcome: UtteranceOutcome) -> bool {
        let callback = self.pending.lock().pop_front();
        match callback {
            Some(callback) => {
                callback(outcome);
                true
            }
            None => false,
        }
    }
}

impl SynthesisHost for MockSynthesisHost {
    fn voices(&self) -> Vec<Voice> {
        self.voices.lock().clone()
    }

    fn on_voices_changed(&self, callback: VoicesReadyCallback) -> VoicesListenerId {
        let id = VoicesListenerId(self.next_listener.fetch_add(1, Ordering::SeqCst));
        self.ready.lock().push((id, callback));
        id
    }

    fn remove_voices_listener(&self, id: VoicesListenerId) {
        self.ready.lock().retain(|(registered, _)| *registered != id);
    }

    fn speak(&self, utterance: Utterance, on_done: UtteranceCallback) {
        self.spoken.lock().push(utterance);
        if let Some(error) = self.next_failure.lock().take() {
            on_done(UtteranceOutcome::Failed(error));
            return;
        }
        let completion = *self.completion.lock();
        match completion {
            Completion::Immediate => on_done(UtteranceOutcome::Ended),
            Completion::Manual => self.pending.lock().push_back(on_done),
        }
    }

    fn cancel(&self) {
        self.cancels.fetch_add(1, Ordering::SeqCst);
        let pending = std::mem::take(&mut *self.pending.lock());
        for callback in pending {
            callback(UtteranceOutcome::Failed(SynthesisError::new(
                SynthesisErrorKind::Canceled,
                "utterance canceled",
            )));
        }
    }

    fn pause(&self) {
        self.paused.store(true, Ordering::SeqCst);
    }

    fn resume(&self) {
        self.paused.store(false, Ordering::SeqCst);
    }

    fn is_speaking(&self) -> bool {
        !self.pending.lock().is_empty()
    }

    fn is_pending(&self) -> bool {
        self.pending.lock().len() > 1
    }

    fn is_paused(&self) -> bool {
        self.paused.load(Ordering::SeqCst)
    }
}
