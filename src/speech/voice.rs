//! Voice descriptors
//!
//! A voice descriptor is the panel's view of one synthetic voice offered by
//! the host engine: a display name and a language tag. The host backend
//! keeps whatever platform handle it needs to actually select the voice;
//! the panel only ever works with descriptors and resolves a selection back
//! to the host by name.

/// One host-provided voice: display name plus language tag
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VoiceInfo {
    /// Display name, e.g. "Alice". Also the resolution key.
    pub name: String,

    /// Language tag, e.g. "en-US"
    pub language: String,
}

impl VoiceInfo {
    /// Create a new voice descriptor
    pub fn new(name: impl Into<String>, language: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            language: language.into(),
        }
    }

    /// Display label for the picker, `"<name> (<language>)"`
    pub fn label(&self) -> String {
        format!("{} ({})", self.name, self.language)
    }
}
