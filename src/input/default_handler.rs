//! Default key handler for the speech panel
//!
//! Processes panel key bindings and passes unrecognized keys through
//! as typed text.

use super::buffer_handler::BufferHandler;
use super::{HandlerAction, KeyAction, KeyHandler};
use crate::panel::Panel;
use crate::Result;
use log::{debug, trace};
use std::collections::HashMap;

/// Default key handler for panel commands
///
/// This is the base handler that processes all panel key bindings.
/// Escape sequences and control keys trigger commands while printable
/// keys pass through to the text field.
pub struct DefaultKeyHandler {
    /// Key bindings map
    keymap: HashMap<Vec<u8>, KeyAction>,
}

impl DefaultKeyHandler {
    /// Create a new default key handler
    pub fn new(keymap: HashMap<Vec<u8>, KeyAction>) -> Self {
        debug!(
            "Creating default key handler with {} bindings",
            keymap.len()
        );
        Self { keymap }
    }

    /// Process a key with the panel's key bindings
    pub fn process_key(&mut self, key: &[u8], panel: &mut Panel) -> Result<HandlerAction> {
        if let Some(action) = self.keymap.get(key).cloned() {
            trace!("Key action: {:?}", action);
            return self.execute_action(&action, panel);
        }

        Ok(HandlerAction::Passthrough)
    }

    /// Execute a panel action
    fn execute_action(&mut self, action: &KeyAction, panel: &mut Panel) -> Result<HandlerAction> {
        use KeyAction::*;

        match action {
            Submit => {
                debug!("Submit");
                panel.speak()?;
                Ok(HandlerAction::Handled)
            }

            DeleteChar => {
                panel.backspace()?;
                Ok(HandlerAction::Handled)
            }

            ClearText => {
                debug!("Clear text");
                panel.clear_text()?;
                Ok(HandlerAction::Handled)
            }

            VoicePrev => {
                debug!("Previous voice");
                panel.select_prev_voice()?;
                Ok(HandlerAction::Handled)
            }

            VoiceNext => {
                debug!("Next voice");
                panel.select_next_voice()?;
                Ok(HandlerAction::Handled)
            }

            RateUp => {
                panel.nudge_rate(true)?;
                Ok(HandlerAction::Handled)
            }

            RateDown => {
                panel.nudge_rate(false)?;
                Ok(HandlerAction::Handled)
            }

            PitchUp => {
                panel.nudge_pitch(true)?;
                Ok(HandlerAction::Handled)
            }

            PitchDown => {
                panel.nudge_pitch(false)?;
                Ok(HandlerAction::Handled)
            }

            // Typed value entry - push a BufferHandler onto the stack
            EditRate => {
                debug!("Entering rate entry");
                let handler =
                    BufferHandler::new("rate", Box::new(|value, panel| panel.set_rate_raw(&value)));
                handler.echo_prompt()?;
                panel.handlers.push(Box::new(handler));
                Ok(HandlerAction::Handled)
            }

            EditPitch => {
                debug!("Entering pitch entry");
                let handler = BufferHandler::new(
                    "pitch",
                    Box::new(|value, panel| panel.set_pitch_raw(&value)),
                );
                handler.echo_prompt()?;
                panel.handlers.push(Box::new(handler));
                Ok(HandlerAction::Handled)
            }

            ShowControls => {
                debug!("Show controls");
                panel.print_controls()?;
                Ok(HandlerAction::Handled)
            }

            Quit => {
                debug!("Quit requested");
                Ok(HandlerAction::Quit)
            }
        }
    }
}

impl KeyHandler for DefaultKeyHandler {
    fn process(&mut self, key: &[u8], panel: &mut Panel) -> Result<HandlerAction> {
        self.process_key(key, panel)
    }
}
