//! Push-stream interop contract.
//!
//! A source implementing [`Subscribable`] delivers `next* (error | complete)?`
//! to an [`Observer`] and hands back a [`Subscription`] for cancellation.
//! [`into_stream`] adapts any such source into a `futures::Stream`, so
//! reactive pipelines can consume it without this crate depending on them.

use futures::channel::mpsc;
use futures_core::Stream;
use parking_lot::Mutex;
use std::pin::Pin;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::task::{Context, Poll};

/// Receiver of a push stream. Every method defaults to a no-op.
pub trait Observer<T, E>: Send {
    fn next(&mut self, _value: T) {}

    /// Terminal failure; nothing follows it.
    fn error(&mut self, _error: E) {}

    /// Terminal success; nothing follows it.
    fn complete(&mut self) {}
}

impl<T, E, O> Observer<T, E> for Box<O>
where
    O: Observer<T, E> + ?Sized,
{
    fn next(&mut self, value: T) {
        (**self).next(value);
    }

    fn error(&mut self, error: E) {
        (**self).error(error);
    }

    fn complete(&mut self) {
        (**self).complete();
    }
}

type NextFn<T> = Box<dyn FnMut(T) + Send>;
type ErrorFn<E> = Box<dyn FnOnce(E) + Send>;
type CompleteFn = Box<dyn FnOnce() + Send>;

/// Closure-backed observer; any callback left unset is ignored.
pub struct PartialObserver<T, E> {
    next: Option<NextFn<T>>,
    error: Option<ErrorFn<E>>,
    complete: Option<CompleteFn>,
}

impl<T, E> PartialObserver<T, E> {
    pub fn new() -> Self {
        Self {
            next: None,
            error: None,
            complete: None,
        }
    }

    pub fn on_next<F>(mut self, f: F) -> Self
    where
        F: FnMut(T) + Send + 'static,
    {
        self.next = Some(Box::new(f));
        self
    }

    pub fn on_error<F>(mut self, f: F) -> Self
    where
        F: FnOnce(E) + Send + 'static,
    {
        self.error = Some(Box::new(f));
        self
    }

    pub fn on_complete<F>(mut self, f: F) -> Self
    where
        F: FnOnce() + Send + 'static,
    {
        self.complete = Some(Box::new(f));
        self
    }
}

impl<T, E> Default for PartialObserver<T, E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T, E> std::fmt::Debug for PartialObserver<T, E> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PartialObserver")
            .field("next", &self.next.is_some())
            .field("error", &self.error.is_some())
            .field("complete", &self.complete.is_some())
            .finish()
    }
}

impl<T, E> Observer<T, E> for PartialObserver<T, E> {
    fn next(&mut self, value: T) {
        if let Some(next) = self.next.as_mut() {
            next(value);
        }
    }

    fn error(&mut self, error: E) {
        self.next = None;
        if let Some(on_error) = self.error.take() {
            on_error(error);
        }
    }

    fn complete(&mut self) {
        self.next = None;
        if let Some(on_complete) = self.complete.take() {
            on_complete();
        }
    }
}

/// Cancellation capability of a running stream.
pub trait Unsubscribe {
    /// Stop the stream. Safe to call repeatedly and after termination.
    fn unsubscribe(&self);

    fn is_closed(&self) -> bool;
}

type Teardown = Box<dyn FnOnce() + Send>;

struct SubscriptionInner {
    closed: AtomicBool,
    teardown: Mutex<Option<Teardown>>,
}

/// Handle to a running stream.
///
/// Cloning shares the same underlying state. Dropping a handle does not
/// cancel the stream; call [`Unsubscribe::unsubscribe`].
#[derive(Clone)]
pub struct Subscription {
    inner: Arc<SubscriptionInner>,
}

impl Subscription {
    /// Open subscription that runs `teardown` on the first unsubscribe.
    pub fn new<F>(teardown: F) -> Self
    where
        F: FnOnce() + Send + 'static,
    {
        Self {
            inner: Arc::new(SubscriptionInner {
                closed: AtomicBool::new(false),
                teardown: Mutex::new(Some(Box::new(teardown))),
            }),
        }
    }

    /// A subscription that is already finished.
    pub fn closed() -> Self {
        Self {
            inner: Arc::new(SubscriptionInner {
                closed: AtomicBool::new(true),
                teardown: Mutex::new(None),
            }),
        }
    }

    /// Mark the stream as naturally finished. The teardown is dropped unrun.
    ///
    /// Returns `false` if it was already closed.
    pub(crate) fn finish(&self) -> bool {
        if self.inner.closed.swap(true, Ordering::AcqRel) {
            return false;
        }
        let teardown = self.inner.teardown.lock().take();
        drop(teardown);
        true
    }
}

impl Unsubscribe for Subscription {
    fn unsubscribe(&self) {
        if self.inner.closed.swap(true, Ordering::AcqRel) {
            return;
        }
        // Taken out of the lock first: the teardown may re-enter the source.
        let teardown = self.inner.teardown.lock().take();
        if let Some(teardown) = teardown {
            teardown();
        }
    }

    fn is_closed(&self) -> bool {
        self.inner.closed.load(Ordering::Acquire)
    }
}

impl std::fmt::Debug for Subscription {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Subscription")
            .field("closed", &self.is_closed())
            .finish()
    }
}

/// A source that third-party adapters can subscribe to.
pub trait Subscribable {
    type Item: Send + 'static;
    type Error: Send + 'static;

    fn subscribe_boxed(
        &self,
        observer: Box<dyn Observer<Self::Item, Self::Error>>,
    ) -> Subscription;
}

struct ChannelObserver<T, E> {
    tx: Option<mpsc::UnboundedSender<Result<T, E>>>,
}

impl<T: Send, E: Send> Observer<T, E> for ChannelObserver<T, E> {
    fn next(&mut self, value: T) {
        if let Some(tx) = &self.tx {
            let _ = tx.unbounded_send(Ok(value));
        }
    }

    fn error(&mut self, error: E) {
        if let Some(tx) = self.tx.take() {
            let _ = tx.unbounded_send(Err(error));
        }
    }

    fn complete(&mut self) {
        self.tx = None;
    }
}

/// `Stream` view of a subscribable source.
///
/// Yields `Ok` per `next`, a final `Err` on `error`, and ends after either
/// terminal call. Dropping the stream unsubscribes.
pub struct EventStream<T, E> {
    rx: mpsc::UnboundedReceiver<Result<T, E>>,
    subscription: Subscription,
}

impl<T, E> EventStream<T, E> {
    pub fn subscription(&self) -> &Subscription {
        &self.subscription
    }
}

impl<T, E> Stream for EventStream<T, E> {
    type Item = Result<T, E>;

    fn poll_next(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        Pin::new(&mut self.rx).poll_next(cx)
    }
}

impl<T, E> Drop for EventStream<T, E> {
    fn drop(&mut self) {
        self.subscription.unsubscribe();
    }
}

/// Adapt a subscribable source into a `futures::Stream`.
pub fn into_stream<S>(source: &S) -> EventStream<S::Item, S::Error>
where
    S: Subscribable + ?Sized,
{
    let (tx, rx) = mpsc::unbounded();
    let subscription = source.subscribe_boxed(Box::new(ChannelObserver { tx: Some(tx) }));
    EventStream { rx, subscription }
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures::StreamExt;
    use std::sync::atomic::AtomicUsize;

    #[test]
    fn unsubscribe_runs_teardown_once() {
        let calls = Arc::new(AtomicUsize::new(0));
        let counter = calls.clone();
        let subscription = Subscription::new(move || {
            counter.fetch_add(1, Ordering::SeqCst);
        });

        subscription.unsubscribe();
        subscription.clone().unsubscribe();
        subscription.unsubscribe();

        assert!(subscription.is_closed());
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn finished_subscription_skips_teardown() {
        let calls = Arc::new(AtomicUsize::new(0));
        let counter = calls.clone();
        let subscription = Subscription::new(move || {
            counter.fetch_add(1, Ordering::SeqCst);
        });

        assert!(subscription.finish());
        assert!(!subscription.finish());
        subscription.unsubscribe();
        assert_eq!(calls.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn partial_observer_ignores_missing_callbacks() {
        let mut observer: PartialObserver<u8, String> = PartialObserver::new();
        observer.next(1);
        observer.error("boom".into());
        observer.complete();
    }

    #[test]
    fn partial_observer_stops_after_terminal_call() {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = seen.clone();
        let mut observer: PartialObserver<u8, ()> =
            PartialObserver::new().on_next(move |v| sink.lock().push(v));

        observer.next(1);
        observer.complete();
        observer.next(2);

        assert_eq!(*seen.lock(), vec![1]);
    }

    struct Counter;

    impl Subscribable for Counter {
        type Item = u32;
        type Error = String;

        fn subscribe_boxed(&self, mut observer: Box<dyn Observer<u32, String>>) -> Subscription {
            for n in 0..3 {
                observer.next(n);
            }
            observer.error("done".into());
            Subscription::closed()
        }
    }

    #[tokio::test]
    async fn stream_adapter_ends_after_error() {
        let items: Vec<_> = into_stream(&Counter).collect().await;
        assert_eq!(items, vec![Ok(0), Ok(1), Ok(2), Err("done".to_string())]);
    }
}
