//! Key handler system with modal input support

use crate::panel::Panel;
use crate::Result;

/// Action to take after processing a key
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HandlerAction {
    /// Key was not a binding; treat it as typed text
    Passthrough,
    /// Remove this handler from the stack
    Remove,
    /// Key was handled, do nothing more
    Handled,
    /// Leave the event loop
    Quit,
}

/// A key handler processes keyboard input against the panel
pub trait KeyHandler {
    fn process(&mut self, key: &[u8], panel: &mut Panel) -> Result<HandlerAction>;
}

/// Stack of key handlers (last one processes input first)
///
/// The event loop pops the top handler, runs it, and pushes it back unless
/// it asked to be removed.
pub struct HandlerStack {
    handlers: Vec<Box<dyn KeyHandler>>,
}

impl HandlerStack {
    /// Create a new handler stack
    pub fn new() -> Self {
        Self {
            handlers: Vec::new(),
        }
    }

    /// Push a handler onto the stack
    pub fn push(&mut self, handler: Box<dyn KeyHandler>) {
        self.handlers.push(handler);
    }

    /// Pop the top handler from the stack
    pub fn pop(&mut self) -> Option<Box<dyn KeyHandler>> {
        self.handlers.pop()
    }

    /// Get the number of handlers in the stack
    pub fn len(&self) -> usize {
        self.handlers.len()
    }

    /// Check if the stack is empty
    pub fn is_empty(&self) -> bool {
        self.handlers.is_empty()
    }
}

impl Default for HandlerStack {
    fn default() -> Self {
        Self::new()
    }
}
