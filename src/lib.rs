//! speakpad - Console speech panel
//!
//! A small interactive console program for *nix systems (macOS, Linux,
//! FreeBSD). Type a line of text, pick a voice, adjust rate and pitch,
//! and have it read aloud by the platform speech engine.

pub mod error;
pub mod input;
pub mod panel;
pub mod platform;
pub mod speech;
pub mod terminal;

pub use error::{Result, SpeakpadError};

/// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
pub const APP_NAME: &str = "speakpad";
