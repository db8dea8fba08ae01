//! Voice catalog access and selector resolution.
//!
//! The host catalog is treated as volatile: every call re-reads it, nothing
//! here caches voices between calls.

use crate::host::{SynthesisHost, VoicesListenerId};
use fluent_speech_domain::{SpeechError, SpeechResult, Voice, VoiceSelector};
use futures::channel::oneshot;
use std::sync::Arc;
use std::time::Duration;

/// Read the catalog, waiting for the host's readiness signal if it is still empty.
pub(crate) async fn all_voices(
    host: Arc<dyn SynthesisHost>,
    timeout: Option<Duration>,
) -> SpeechResult<Vec<Voice>> {
    let voices = host.voices();
    if !voices.is_empty() {
        return Ok(voices);
    }

    let (tx, rx) = oneshot::channel::<()>();
    let id = host.on_voices_changed(Box::new(move || {
        let _ = tx.send(());
    }));
    let _listener = Listener {
        host: Arc::clone(&host),
        id,
    };

    // The catalog may have filled between the first read and registration.
    let voices = host.voices();
    if !voices.is_empty() {
        return Ok(voices);
    }

    tracing::debug!(?timeout, "voice catalog empty, waiting for host readiness");
    wait_ready(rx, timeout).await?;
    Ok(host.voices())
}

/// Readiness registration, removed from the host however the wait ends.
struct Listener {
    host: Arc<dyn SynthesisHost>,
    id: VoicesListenerId,
}

impl Drop for Listener {
    fn drop(&mut self) {
        self.host.remove_voices_listener(self.id);
    }
}

/// First catalog voice satisfying `selector`.
pub fn resolve(selector: &VoiceSelector, voices: &[Voice]) -> SpeechResult<Voice> {
    selector
        .filter(voices)
        .next()
        .cloned()
        .ok_or_else(|| SpeechError::VoiceResolution {
            selector: selector.clone(),
        })
}

fn dropped() -> SpeechError {
    SpeechError::VoicesUnavailable("host dropped the readiness callback".to_string())
}

#[cfg(feature = "tokio-runtime")]
async fn wait_ready(rx: oneshot::Receiver<()>, timeout: Option<Duration>) -> SpeechResult<()> {
    match timeout {
        Some(_) if tokio::runtime::Handle::try_current().is_err() => {
            Err(SpeechError::Configuration(
                "voices timeout needs a tokio runtime".to_string(),
            ))
        }
        Some(limit) => match tokio::time::timeout(limit, rx).await {
            Ok(signal) => signal.map_err(|_| dropped()),
            Err(_) => {
                tracing::warn!(?limit, "voice catalog not ready in time");
                Err(SpeechError::VoicesUnavailable(format!(
                    "no voices reported within {limit:?}"
                )))
            }
        },
        None => rx.await.map_err(|_| dropped()),
    }
}

#[cfg(not(feature = "tokio-runtime"))]
async fn wait_ready(rx: oneshot::Receiver<()>, timeout: Option<Duration>) -> SpeechResult<()> {
    if timeout.is_some() {
        tracing::debug!("voices timeout ignored without the tokio-runtime feature");
    }
    rx.await.map_err(|_| dropped())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn catalog() -> Vec<Voice> {
        vec![
            Voice::new("en-US", "Samantha", "urn:samantha", true),
            Voice::new("en-US", "Alex", "urn:alex", true),
            Voice::new("fr-FR", "Thomas", "urn:thomas", true),
        ]
    }

    #[test]
    fn resolve_picks_first_in_catalog_order() {
        let voice = resolve(&VoiceSelector::new().lang("en-US"), &catalog()).unwrap();
        assert_eq!(voice.name, "Samantha");
    }

    #[test]
    fn resolve_reports_the_selector() {
        let selector = VoiceSelector::new().lang("xx-XX");
        match resolve(&selector, &catalog()) {
            Err(SpeechError::VoiceResolution { selector: attempted }) => {
                assert_eq!(attempted, selector)
            }
            other => panic!("unexpected {other:?}"),
        }
    }
}
