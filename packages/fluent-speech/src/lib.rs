//! # Fluent Speech
//!
//! Typed facades over a host's speech recognition and speech synthesis
//! engines.
//!
//! The host engines are injected as trait objects (see [`host`]). On top of
//! them sit two independent, immutable facades:
//!
//! - [`Recognition`]: one-shot [`listen`](Recognition::listen) or a live
//!   event stream via [`subscribe`](Recognition::subscribe).
//! - [`Synthesis`]: [`speak`](Synthesis::speak) with text, options, both,
//!   or nothing, plus lazy voice resolution.
//!
//! ## Usage Pattern
//!
//! ```ignore
//! use fluent_speech::prelude::*;
//!
//! let speech = FluentSpeech::new(recognition_host, synthesis_host);
//!
//! let heard = speech
//!     .recognition()
//!     .derive(RecognitionOptions::new().lang("en-GB"))
//!     .listen()
//!     .await?;
//!
//! speech
//!     .synthesis()
//!     .with_voice(VoiceSelector::new().lang("en-GB"))
//!     .speak((heard, SpeakOptions::new().rate(0.9)))
//!     .await?;
//! ```

/* ───── host capabilities ───── */
pub mod host;

/* ───── interop contract & normalization ───── */
pub mod interop;
pub mod normalize;

/* ───── facades ───── */
pub mod recognition;
pub mod synthesis;

/* ───── unified entry point ───── */
mod fluent_speech;
pub use fluent_speech::FluentSpeech;

/* ───── in-memory hosts ───── */
pub mod mock;

/* ───── re-export domain types ───── */
pub use fluent_speech_domain::*;

pub use interop::{EventStream, Observer, PartialObserver, Subscribable, Subscription, Unsubscribe};
pub use recognition::Recognition;
pub use synthesis::{SpeakRequest, Synthesis};

/* ───── prelude for users ───── */
pub mod prelude {
    //! Re-exports of commonly used types and traits.

    pub use fluent_speech_domain::prelude::*;

    pub use crate::host::{RecognitionHost, SynthesisHost, Utterance};
    pub use crate::interop::{
        EventStream, Observer, PartialObserver, Subscribable, Subscription, Unsubscribe,
        into_stream,
    };
    pub use crate::{FluentSpeech, Recognition, SpeakRequest, Synthesis};
}
