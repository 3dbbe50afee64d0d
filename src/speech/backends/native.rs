//! Native speech host using the tts crate
//!
//! This backend drives the platform TTS engine through the `tts` crate:
//! Speech Dispatcher on Linux, AVFoundation on macOS/iOS, SAPI or WinRT on
//! Windows. Feature support varies per platform, so every parameter set is
//! gated on `supported_features()`.

use crate::speech::{SpeechEvent, SpeechHost, Utterance, VoiceInfo};
use crate::{Result, SpeakpadError};
use log::{debug, warn};
use std::sync::mpsc::{self, Receiver};
use tts::Tts;

/// Native speech host backed by the platform TTS engine
pub struct NativeHost {
    /// The tts crate's engine handle
    tts: Tts,

    /// Platform voice handles from the last enumeration, used to resolve
    /// a requested voice descriptor back to something the engine accepts
    voice_handles: Vec<tts::Voice>,

    /// Utterance begin/end notifications forwarded from engine callbacks
    events: Receiver<SpeechEvent>,
}

impl NativeHost {
    /// Create a native host over the platform's default engine
    ///
    /// Registers utterance callbacks where the platform supports them;
    /// elsewhere completion simply goes unreported.
    pub fn new() -> Result<Self> {
        debug!("Creating native speech host");

        let tts = Tts::default()
            .map_err(|e| SpeakpadError::Speech(format!("Failed to initialize TTS engine: {}", e)))?;

        let (event_tx, event_rx) = mpsc::channel();

        let features = tts.supported_features();
        if features.utterance_callbacks {
            let tx = event_tx.clone();
            tts.on_utterance_begin(Some(Box::new(move |_id| {
                let _ = tx.send(SpeechEvent::UtteranceBegin);
            })))
            .map_err(|e| SpeakpadError::Speech(format!("Failed to register callback: {}", e)))?;

            let tx = event_tx;
            tts.on_utterance_end(Some(Box::new(move |_id| {
                let _ = tx.send(SpeechEvent::UtteranceEnd);
            })))
            .map_err(|e| SpeakpadError::Speech(format!("Failed to register callback: {}", e)))?;
        } else {
            debug!("Utterance callbacks not supported on this platform");
        }

        debug!("Native speech host created");

        Ok(Self {
            tts,
            voice_handles: Vec::new(),
            events: event_rx,
        })
    }

    /// Map a rate multiplier (0.1 to 10.0, 1.0 = normal) onto the engine's
    /// own rate range
    fn convert_rate(&self, level: f32) -> f32 {
        scale_level(
            level,
            self.tts.min_rate(),
            self.tts.normal_rate(),
            self.tts.max_rate(),
        )
    }

    /// Map a pitch multiplier (0.1 to 10.0, 1.0 = normal) onto the engine's
    /// own pitch range
    fn convert_pitch(&self, level: f32) -> f32 {
        scale_level(
            level,
            self.tts.min_pitch(),
            self.tts.normal_pitch(),
            self.tts.max_pitch(),
        )
    }
}

/// Piecewise-linear mapping of a 0.1 to 10.0 multiplier onto an engine range.
/// 1.0 lands exactly on the engine's normal level; the extremes pin to
/// the engine's min and max.
fn scale_level(level: f32, min: f32, normal: f32, max: f32) -> f32 {
    let level = level.clamp(0.1, 10.0);
    if level >= 1.0 {
        normal + (level - 1.0) / 9.0 * (max - normal)
    } else {
        min + (level - 0.1) / 0.9 * (normal - min)
    }
}

impl SpeechHost for NativeHost {
    fn is_speaking(&self) -> Result<bool> {
        // Engines that can't report busy state behave like a host that
        // never signals it: the guard never blocks
        if !self.tts.supported_features().is_speaking {
            return Ok(false);
        }

        self.tts
            .is_speaking()
            .map_err(|e| SpeakpadError::Speech(format!("Busy query failed: {}", e)))
    }

    fn voices(&mut self) -> Result<Vec<VoiceInfo>> {
        let handles = self
            .tts
            .voices()
            .map_err(|e| SpeakpadError::Speech(format!("Failed to enumerate voices: {}", e)))?;

        let descriptors = handles
            .iter()
            .map(|v| VoiceInfo::new(v.name(), v.language().to_string()))
            .collect();

        self.voice_handles = handles;
        Ok(descriptors)
    }

    fn speak(&mut self, request: &Utterance) -> Result<()> {
        let features = self.tts.supported_features();

        if features.voice {
            if let Some(ref wanted) = request.voice {
                if let Some(handle) = self
                    .voice_handles
                    .iter()
                    .find(|v| v.name() == wanted.name)
                {
                    self.tts
                        .set_voice(handle)
                        .map_err(|e| SpeakpadError::Speech(format!("Failed to set voice: {}", e)))?;
                } else {
                    warn!(
                        "Voice '{}' not in the current engine set, keeping current voice",
                        wanted.name
                    );
                }
            }
        }

        if features.rate {
            let rate = self.convert_rate(request.rate);
            self.tts
                .set_rate(rate)
                .map_err(|e| SpeakpadError::Speech(format!("Failed to set rate: {}", e)))?;
        } else {
            debug!("Rate control not supported on this platform");
        }

        if features.pitch {
            let pitch = self.convert_pitch(request.pitch);
            self.tts
                .set_pitch(pitch)
                .map_err(|e| SpeakpadError::Speech(format!("Failed to set pitch: {}", e)))?;
        } else {
            debug!("Pitch control not supported on this platform");
        }

        debug!("Dispatching utterance: {:?}", request.text);
        self.tts
            .speak(request.text.as_str(), false)
            .map_err(|e| SpeakpadError::Speech(format!("Speak failed: {}", e)))?;

        Ok(())
    }

    fn try_recv_event(&mut self) -> Option<SpeechEvent> {
        self.events.try_recv().ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scale_level_pins() {
        // Speech Dispatcher's rate range in the tts crate
        let (min, normal, max) = (-100.0, 0.0, 100.0);
        assert_eq!(scale_level(0.1, min, normal, max), -100.0);
        assert_eq!(scale_level(1.0, min, normal, max), 0.0);
        assert_eq!(scale_level(10.0, min, normal, max), 100.0);
    }

    #[test]
    fn test_scale_level_interpolates() {
        let (min, normal, max) = (0.0, 1.0, 3.0);
        // Halfway between normal and max on the multiplier scale
        assert!((scale_level(5.5, min, normal, max) - 2.0).abs() < 1e-6);
        // Halfway between min and normal
        assert!((scale_level(0.55, min, normal, max) - 0.5).abs() < 1e-6);
    }

    #[test]
    fn test_scale_level_clamps_input() {
        let (min, normal, max) = (-100.0, 0.0, 100.0);
        assert_eq!(scale_level(0.0, min, normal, max), -100.0);
        assert_eq!(scale_level(50.0, min, normal, max), 100.0);
    }

    #[test]
    fn test_create_native_host() {
        // May fail without a speech engine (e.g. headless CI); either
        // outcome is acceptable, it just must not panic
        match NativeHost::new() {
            Ok(_) => println!("native speech host initialized"),
            Err(e) => println!("speech host unavailable (expected in CI): {}", e),
        }
    }
}
