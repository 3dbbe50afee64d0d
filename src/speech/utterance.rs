//! Utterance requests
//!
//! One unit of text plus the speech parameters it should be produced with.
//! Requests are built fresh for every speak action and handed to the host
//! once; they have no identity beyond that single dispatch.

use super::voice::VoiceInfo;

/// Rate and pitch are multipliers around the engine's normal level
pub const NORMAL_LEVEL: f32 = 1.0;

/// A single speech request: text plus voice/rate/pitch parameters
#[derive(Debug, Clone, PartialEq)]
pub struct Utterance {
    /// Text to speak (already trimmed by the panel)
    pub text: String,

    /// Resolved voice descriptor, or None to keep the host's current voice
    pub voice: Option<VoiceInfo>,

    /// Speech rate multiplier (0.1 to 10.0, 1.0 = normal)
    pub rate: f32,

    /// Speech pitch multiplier (0.1 to 10.0, 1.0 = normal)
    pub pitch: f32,
}

impl Utterance {
    /// Create a request for the given text with default parameters;
    /// callers assign voice, rate and pitch before dispatch
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            voice: None,
            rate: NORMAL_LEVEL,
            pitch: NORMAL_LEVEL,
        }
    }
}
