//! Input system tests
//!
//! Tests key handler stack, key bindings, and the modal value-entry flow

mod common;

use common::{alice_and_bob, panel_with_mock};
use speakpad::input::{
    create_default_keymap, DefaultKeyHandler, HandlerAction, HandlerStack, KeyAction, KeyHandler,
};
use speakpad::panel::Panel;
use speakpad::Result;

struct TestHandler {
    handled: bool,
}

impl KeyHandler for TestHandler {
    fn process(&mut self, key: &[u8], _panel: &mut Panel) -> Result<HandlerAction> {
        if key == b"x" {
            self.handled = true;
            Ok(HandlerAction::Remove)
        } else {
            Ok(HandlerAction::Passthrough)
        }
    }
}

#[test]
fn test_handler_stack() {
    let (mut panel, _state, _dir) = panel_with_mock();
    let mut stack = HandlerStack::new();
    assert!(stack.is_empty());

    stack.push(Box::new(TestHandler { handled: false }));
    assert_eq!(stack.len(), 1);

    // Key the handler doesn't recognize stays on the stack
    let mut handler = stack.pop().unwrap();
    let action = handler.process(b"a", &mut panel).unwrap();
    assert_eq!(action, HandlerAction::Passthrough);
    stack.push(handler);
    assert_eq!(stack.len(), 1);

    // Key the handler handles and removes itself on
    let mut handler = stack.pop().unwrap();
    let action = handler.process(b"x", &mut panel).unwrap();
    assert_eq!(action, HandlerAction::Remove);
    assert_eq!(stack.len(), 0);
}

#[test]
fn test_keymap_creation() {
    let keymap = create_default_keymap();

    // Submit
    assert_eq!(keymap.get(&b"\r".to_vec()), Some(&KeyAction::Submit));
    assert_eq!(keymap.get(&b"\n".to_vec()), Some(&KeyAction::Submit));

    // Text editing
    assert_eq!(keymap.get(&b"\x7f".to_vec()), Some(&KeyAction::DeleteChar));
    assert_eq!(keymap.get(&b"\x08".to_vec()), Some(&KeyAction::DeleteChar));
    assert_eq!(keymap.get(&b"\x15".to_vec()), Some(&KeyAction::ClearText));

    // Voice selection
    assert_eq!(keymap.get(&b"\x1b[A".to_vec()), Some(&KeyAction::VoicePrev));
    assert_eq!(keymap.get(&b"\x1b[B".to_vec()), Some(&KeyAction::VoiceNext));
    assert_eq!(keymap.get(&b"\x1bOA".to_vec()), Some(&KeyAction::VoicePrev));
    assert_eq!(keymap.get(&b"\x1bOB".to_vec()), Some(&KeyAction::VoiceNext));

    // Sliders
    assert_eq!(keymap.get(&b"\x1b[C".to_vec()), Some(&KeyAction::RateUp));
    assert_eq!(keymap.get(&b"\x1b[D".to_vec()), Some(&KeyAction::RateDown));
    assert_eq!(
        keymap.get(&b"\x1b[1;3C".to_vec()),
        Some(&KeyAction::PitchUp)
    );
    assert_eq!(
        keymap.get(&b"\x1b[1;3D".to_vec()),
        Some(&KeyAction::PitchDown)
    );

    // Typed entry and misc
    assert_eq!(keymap.get(&b"\x1br".to_vec()), Some(&KeyAction::EditRate));
    assert_eq!(keymap.get(&b"\x1bp".to_vec()), Some(&KeyAction::EditPitch));
    assert_eq!(
        keymap.get(&b"\x1bs".to_vec()),
        Some(&KeyAction::ShowControls)
    );
    assert_eq!(keymap.get(&b"\x03".to_vec()), Some(&KeyAction::Quit));
    assert_eq!(keymap.get(&b"\x04".to_vec()), Some(&KeyAction::Quit));
}

#[test]
fn test_default_handler_submit_speaks() {
    let (mut panel, state, _dir) = panel_with_mock();
    state.lock().unwrap().voices = alice_and_bob();
    panel.subscribe_voices().unwrap();

    let mut handler = DefaultKeyHandler::new(create_default_keymap());

    panel.type_text("Hello").unwrap();
    let action = handler.process_key(b"\r", &mut panel).unwrap();

    assert_eq!(action, HandlerAction::Handled);
    assert_eq!(state.lock().unwrap().spoken.len(), 1);
}

#[test]
fn test_default_handler_editing_keys() {
    let (mut panel, _state, _dir) = panel_with_mock();
    let mut handler = DefaultKeyHandler::new(create_default_keymap());

    panel.type_text("hi").unwrap();
    handler.process_key(b"\x7f", &mut panel).unwrap();
    assert_eq!(panel.text.value(), "h");

    handler.process_key(b"\x15", &mut panel).unwrap();
    assert!(panel.text.is_empty());
}

#[test]
fn test_default_handler_passthrough_and_quit() {
    let (mut panel, _state, _dir) = panel_with_mock();
    let mut handler = DefaultKeyHandler::new(create_default_keymap());

    let action = handler.process_key(b"a", &mut panel).unwrap();
    assert_eq!(action, HandlerAction::Passthrough);

    let action = handler.process_key(b"\x03", &mut panel).unwrap();
    assert_eq!(action, HandlerAction::Quit);
}

#[test]
fn test_arrow_keys_drive_voice_and_rate() {
    let (mut panel, state, _dir) = panel_with_mock();
    state.lock().unwrap().voices = alice_and_bob();
    panel.subscribe_voices().unwrap();

    let mut handler = DefaultKeyHandler::new(create_default_keymap());

    handler.process_key(b"\x1b[B", &mut panel).unwrap();
    assert_eq!(panel.picker.selected_name(), Some("Bob"));

    handler.process_key(b"\x1b[C", &mut panel).unwrap();
    assert_eq!(panel.rate.label(), "1.1");

    handler.process_key(b"\x1b[1;3D", &mut panel).unwrap();
    assert_eq!(panel.pitch.label(), "0.9");
}

/// Feed a key through the modal stack the way the event loop does
fn feed_modal(panel: &mut Panel, key: &[u8]) -> HandlerAction {
    let mut handler = panel.handlers.pop().expect("modal handler on stack");
    let action = handler.process(key, panel).expect("process key");
    if action != HandlerAction::Remove {
        panel.handlers.push(handler);
    }
    action
}

#[test]
fn test_modal_rate_entry_applies_on_enter() {
    let (mut panel, state, _dir) = panel_with_mock();
    let mut handler = DefaultKeyHandler::new(create_default_keymap());

    // alt+r pushes the entry handler
    let action = handler.process_key(b"\x1br", &mut panel).unwrap();
    assert_eq!(action, HandlerAction::Handled);
    assert_eq!(panel.handlers.len(), 1);

    feed_modal(&mut panel, b"2");
    feed_modal(&mut panel, b".");
    feed_modal(&mut panel, b"5");
    let action = feed_modal(&mut panel, b"\r");

    assert_eq!(action, HandlerAction::Remove);
    assert!(panel.handlers.is_empty());
    assert_eq!(panel.rate.label(), "2.5");

    // The next utterance carries the typed value
    panel.type_text("Hello").unwrap();
    panel.speak().unwrap();
    assert_eq!(state.lock().unwrap().spoken[0].rate, 2.5);
}

#[test]
fn test_modal_entry_backspace_edits_the_buffer() {
    let (mut panel, _state, _dir) = panel_with_mock();
    let mut handler = DefaultKeyHandler::new(create_default_keymap());

    handler.process_key(b"\x1br", &mut panel).unwrap();

    feed_modal(&mut panel, b"1");
    feed_modal(&mut panel, b".");
    feed_modal(&mut panel, b"9");
    feed_modal(&mut panel, b"\x7f");
    feed_modal(&mut panel, b"5");
    feed_modal(&mut panel, b"\r");

    assert_eq!(panel.rate.label(), "1.5");
}

#[test]
fn test_modal_entry_escape_cancels() {
    let (mut panel, _state, _dir) = panel_with_mock();
    let mut handler = DefaultKeyHandler::new(create_default_keymap());

    handler.process_key(b"\x1bp", &mut panel).unwrap();
    assert_eq!(panel.handlers.len(), 1);

    feed_modal(&mut panel, b"9");
    let action = feed_modal(&mut panel, b"\x1b");

    assert_eq!(action, HandlerAction::Remove);
    assert!(panel.handlers.is_empty());
    assert_eq!(panel.pitch.label(), "1.0");
}

#[test]
fn test_modal_entry_garbage_falls_back_to_default() {
    let (mut panel, state, _dir) = panel_with_mock();
    let mut handler = DefaultKeyHandler::new(create_default_keymap());

    handler.process_key(b"\x1br", &mut panel).unwrap();
    feed_modal(&mut panel, b"f");
    feed_modal(&mut panel, b"a");
    feed_modal(&mut panel, b"s");
    feed_modal(&mut panel, b"t");
    feed_modal(&mut panel, b"\r");

    assert_eq!(panel.rate.label(), "1.0");

    panel.type_text("Hello").unwrap();
    panel.speak().unwrap();
    assert_eq!(state.lock().unwrap().spoken[0].rate, 1.0);
}
