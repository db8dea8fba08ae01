//! Call shapes accepted by [`Synthesis::speak`](super::Synthesis::speak).

use fluent_speech_domain::{SpeakOptions, VoiceSelector};

/// One of the four `speak` call shapes.
///
/// Every shape folds into a single [`SpeakOptions`] update, after which all
/// of them take the same path as the no-argument form.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum SpeakRequest {
    /// Speak the stored text with the stored options.
    #[default]
    Stored,
    Options(SpeakOptions),
    Text(String),
    TextWithOptions(String, SpeakOptions),
}

impl SpeakRequest {
    /// Fold into the option update to apply before speaking, if any.
    pub fn into_update(self) -> Option<SpeakOptions> {
        match self {
            Self::Stored => None,
            Self::Options(options) => Some(options),
            Self::Text(text) => Some(SpeakOptions::new().text(text)),
            Self::TextWithOptions(text, options) => Some(SpeakOptions {
                text: Some(text),
                ..options
            }),
        }
    }
}

impl From<()> for SpeakRequest {
    fn from((): ()) -> Self {
        Self::Stored
    }
}

impl From<&str> for SpeakRequest {
    fn from(text: &str) -> Self {
        Self::Text(text.to_owned())
    }
}

impl From<String> for SpeakRequest {
    fn from(text: String) -> Self {
        Self::Text(text)
    }
}

impl From<SpeakOptions> for SpeakRequest {
    fn from(options: SpeakOptions) -> Self {
        Self::Options(options)
    }
}

impl From<VoiceSelector> for SpeakRequest {
    fn from(selector: VoiceSelector) -> Self {
        Self::Options(selector.into())
    }
}

impl From<(&str, SpeakOptions)> for SpeakRequest {
    fn from((text, options): (&str, SpeakOptions)) -> Self {
        Self::TextWithOptions(text.to_owned(), options)
    }
}

impl From<(String, SpeakOptions)> for SpeakRequest {
    fn from((text, options): (String, SpeakOptions)) -> Self {
        Self::TextWithOptions(text, options)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stored_shape_has_no_update() {
        assert_eq!(SpeakRequest::from(()).into_update(), None);
    }

    #[test]
    fn text_shape_only_sets_text() {
        assert_eq!(
            SpeakRequest::from("hi").into_update(),
            Some(SpeakOptions::new().text("hi"))
        );
    }

    #[test]
    fn positional_text_wins_over_options_text() {
        let update = SpeakRequest::from(("spoken", SpeakOptions::new().text("ignored").volume(0.5)))
            .into_update()
            .unwrap_or_default();
        assert_eq!(update.text.as_deref(), Some("spoken"));
        assert_eq!(update.volume, Some(0.5));
    }
}
