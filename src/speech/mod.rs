//! Speech output system

pub mod backends;
pub mod host;
pub mod utterance;
pub mod voice;

pub use host::{create_host, SpeechEvent, SpeechHost};
pub use utterance::{Utterance, NORMAL_LEVEL};
pub use voice::VoiceInfo;
