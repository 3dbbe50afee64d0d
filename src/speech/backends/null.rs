//! Inert speech host for unsupported environments
//!
//! Used when no platform engine can be initialized. The panel stays up and
//! responsive; voice polling finds nothing forever and every utterance is
//! dropped with a diagnostic.

use crate::speech::{SpeechHost, Utterance, VoiceInfo};
use crate::Result;
use log::warn;

/// Speech host that does nothing
pub struct NullHost;

impl NullHost {
    pub fn new() -> Self {
        Self
    }
}

impl Default for NullHost {
    fn default() -> Self {
        Self::new()
    }
}

impl SpeechHost for NullHost {
    fn is_speaking(&self) -> Result<bool> {
        Ok(false)
    }

    fn voices(&mut self) -> Result<Vec<VoiceInfo>> {
        Ok(Vec::new())
    }

    fn speak(&mut self, request: &Utterance) -> Result<()> {
        warn!(
            "Speech unavailable, dropping utterance ({} chars)",
            request.text.len()
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_null_host_is_inert() {
        let mut host = NullHost::new();
        assert!(!host.is_speaking().unwrap());
        assert!(host.voices().unwrap().is_empty());
        assert!(host.speak(&Utterance::new("hello")).is_ok());
        assert!(host.try_recv_event().is_none());
        assert!(!host.notifies_voice_changes());
    }
}
