//! Speech host abstraction
//!
//! Provides a unified interface to the host environment's speech-synthesis
//! capability. The panel only ever talks to this trait: it queries the busy
//! flag, enumerates voices, dispatches utterance requests, and drains the
//! host's asynchronous notifications.

use crate::Result;
use log::info;

use super::utterance::Utterance;
use super::voice::VoiceInfo;

/// Asynchronous notifications from the host capability
///
/// Delivered on a channel the panel drains each loop iteration. All of
/// these are diagnostic-only except `VoicesChanged`, which triggers a
/// voice-list refresh.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SpeechEvent {
    /// Speech production started for a dispatched request
    UtteranceBegin,
    /// Speech production finished
    UtteranceEnd,
    /// The host reported an error while producing speech
    UtteranceError(String),
    /// The host's voice set changed (push-capable hosts only)
    VoicesChanged,
}

/// Speech host trait
///
/// Backends wrap whatever the platform offers. All methods are best-effort
/// views of engine state the program does not own: the busy flag in
/// particular is only a snapshot, and a dispatch racing the engine's own
/// state transition is the caller's accepted behavior.
pub trait SpeechHost: Send {
    /// Is the host currently producing speech?
    fn is_speaking(&self) -> Result<bool>;

    /// Enumerate the currently available voices. May be empty while the
    /// engine is still initializing its voice set.
    fn voices(&mut self) -> Result<Vec<VoiceInfo>>;

    /// Dispatch one utterance request. Never interrupts speech already in
    /// progress; completion and errors arrive as [`SpeechEvent`]s where the
    /// platform supports them.
    fn speak(&mut self, request: &Utterance) -> Result<()>;

    /// Does this host push [`SpeechEvent::VoicesChanged`] notifications?
    /// Hosts that don't are polled until their voice set turns up non-empty.
    fn notifies_voice_changes(&self) -> bool {
        false
    }

    /// Drain one pending host notification, if any
    fn try_recv_event(&mut self) -> Option<SpeechEvent> {
        None
    }
}

/// Create the platform speech host
///
/// Initializes the native backend over the platform TTS engine
/// (Speech Dispatcher on Linux, AVFoundation on macOS, SAPI/WinRT on
/// Windows). Fails when no engine can be reached; the caller decides how
/// to surface that (the panel falls back to an inert [`NullHost`]).
///
/// [`NullHost`]: super::backends::null::NullHost
pub fn create_host() -> Result<Box<dyn SpeechHost>> {
    use super::backends::native::NativeHost;

    info!("Initializing native speech host");
    let host = NativeHost::new()?;
    info!("Native speech host ready");
    Ok(Box::new(host))
}
