//! Default key bindings for the speech panel

use std::collections::HashMap;

/// Key sequence type
pub type KeySequence = Vec<u8>;

/// Action identifier for key bindings
///
/// Each variant represents a panel command that can be triggered by a key
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KeyAction {
    /// Speak the current text
    Submit,

    // Text editing
    DeleteChar,
    ClearText,

    // Voice selection
    VoicePrev,
    VoiceNext,

    // Slider nudges
    RateUp,
    RateDown,
    PitchUp,
    PitchDown,

    // Typed slider entry
    EditRate,
    EditPitch,

    // Misc
    ShowControls,
    Quit,
}

/// Create the default keymap
pub fn create_default_keymap() -> HashMap<KeySequence, KeyAction> {
    let mut map = HashMap::new();

    // Enter speaks
    map.insert(b"\r".to_vec(), KeyAction::Submit);
    map.insert(b"\n".to_vec(), KeyAction::Submit);

    // Text editing
    map.insert(b"\x08".to_vec(), KeyAction::DeleteChar);
    map.insert(b"\x7f".to_vec(), KeyAction::DeleteChar);
    map.insert(b"\x15".to_vec(), KeyAction::ClearText); // ctrl+u

    // Voice selection (up/down arrows)
    map.insert(b"\x1b[A".to_vec(), KeyAction::VoicePrev);
    map.insert(b"\x1b[B".to_vec(), KeyAction::VoiceNext);
    map.insert(b"\x1bOA".to_vec(), KeyAction::VoicePrev);
    map.insert(b"\x1bOB".to_vec(), KeyAction::VoiceNext);

    // Rate (left/right arrows)
    map.insert(b"\x1b[C".to_vec(), KeyAction::RateUp);
    map.insert(b"\x1b[D".to_vec(), KeyAction::RateDown);
    map.insert(b"\x1bOC".to_vec(), KeyAction::RateUp);
    map.insert(b"\x1bOD".to_vec(), KeyAction::RateDown);

    // Pitch (alt+left/right arrows, both common encodings)
    map.insert(b"\x1b[1;3C".to_vec(), KeyAction::PitchUp);
    map.insert(b"\x1b[1;3D".to_vec(), KeyAction::PitchDown);
    map.insert(b"\x1b\x1b[C".to_vec(), KeyAction::PitchUp);
    map.insert(b"\x1b\x1b[D".to_vec(), KeyAction::PitchDown);

    // Typed slider entry (alt+r/p)
    map.insert(b"\x1br".to_vec(), KeyAction::EditRate);
    map.insert(b"\x1bp".to_vec(), KeyAction::EditPitch);

    // Panel display (alt+s)
    map.insert(b"\x1bs".to_vec(), KeyAction::ShowControls);

    // Quit (ctrl+c, ctrl+d)
    map.insert(b"\x03".to_vec(), KeyAction::Quit);
    map.insert(b"\x04".to_vec(), KeyAction::Quit);

    map
}
