//! Speech host backends

// Native host using the tts crate (cross-platform)
pub mod native;

// Inert host used when no engine is available
pub mod null;
