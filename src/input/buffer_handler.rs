//! Buffer handler for collecting text input
//!
//! Used when the panel needs a typed value (entering a rate or pitch
//! through alt+r / alt+p).

use super::{HandlerAction, KeyHandler};
use crate::panel::Panel;
use crate::Result;
use log::debug;
use std::io::{self, Write};

/// Callback function type for when input is complete
type OnAcceptFn = Box<dyn FnOnce(String, &mut Panel) -> Result<()> + Send>;

/// Handler that collects a line of input until Enter is pressed
///
/// When the user presses Enter, calls the provided callback with the
/// collected text. Esc cancels without calling it.
pub struct BufferHandler {
    /// Prompt shown before the collected input
    prompt: String,

    /// Accumulated input buffer
    buffer: String,

    /// Callback to execute when Enter is pressed
    on_accept: Option<OnAcceptFn>,
}

impl BufferHandler {
    /// Create a new buffer handler
    ///
    /// The callback will be invoked with the collected text when the
    /// user presses Enter
    pub fn new(prompt: &str, on_accept: OnAcceptFn) -> Self {
        Self {
            prompt: prompt.to_string(),
            buffer: String::new(),
            on_accept: Some(on_accept),
        }
    }

    /// Redraw the prompt line with the current buffer
    pub fn echo_prompt(&self) -> Result<()> {
        let mut out = io::stdout();
        write!(out, "\r\x1b[K{}> {}", self.prompt, self.buffer)?;
        out.flush()?;
        Ok(())
    }
}

impl KeyHandler for BufferHandler {
    fn process(&mut self, key: &[u8], panel: &mut Panel) -> Result<HandlerAction> {
        match key {
            // Enter - accept input and invoke callback
            b"\r" | b"\n" => {
                debug!("BufferHandler: accepting input '{}'", self.buffer);

                if let Some(callback) = self.on_accept.take() {
                    callback(self.buffer.clone(), panel)?;
                }

                Ok(HandlerAction::Remove)
            }

            // Esc - cancel without applying
            b"\x1b" => {
                debug!("BufferHandler: cancelled");
                panel.redraw_entry()?;
                Ok(HandlerAction::Remove)
            }

            // Backspace - remove last character
            b"\x08" | b"\x7f" => {
                if !self.buffer.is_empty() {
                    self.buffer.pop();
                }
                self.echo_prompt()?;
                Ok(HandlerAction::Handled)
            }

            // Regular character - add to buffer
            _ => {
                if let Ok(s) = std::str::from_utf8(key) {
                    for ch in s.chars().filter(|c| !c.is_control()) {
                        self.buffer.push(ch);
                    }
                }
                self.echo_prompt()?;
                Ok(HandlerAction::Handled)
            }
        }
    }
}
