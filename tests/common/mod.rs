//! Shared test fixtures
//!
//! A scripted mock speech host plus a panel factory with config isolated
//! in a temp directory.

#![allow(dead_code)]

use speakpad::panel::{config::Config, Panel};
use speakpad::speech::{SpeechEvent, SpeechHost, Utterance, VoiceInfo};
use speakpad::Result;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use tempfile::TempDir;

/// Scripted host state shared between a test and its mock
#[derive(Default)]
pub struct MockState {
    /// Voices the host reports
    pub voices: Vec<VoiceInfo>,

    /// Busy flag the host reports
    pub busy: bool,

    /// Every utterance request the panel dispatched
    pub spoken: Vec<Utterance>,

    /// Events the host will deliver through the notification channel
    pub events: VecDeque<SpeechEvent>,

    /// Make voice enumeration fail
    pub fail_voices: bool,

    /// Make the busy query fail
    pub fail_busy: bool,
}

/// Mock speech host driven by shared scripted state
pub struct MockHost {
    state: Arc<Mutex<MockState>>,
    push: bool,
}

impl MockHost {
    /// Poll-style mock: no voice change notifications
    pub fn new() -> (Self, Arc<Mutex<MockState>>) {
        Self::with_push(false)
    }

    /// Push-style mock: advertises voice change notifications
    pub fn with_push(push: bool) -> (Self, Arc<Mutex<MockState>>) {
        let state = Arc::new(Mutex::new(MockState::default()));
        let host = Self {
            state: state.clone(),
            push,
        };
        (host, state)
    }
}

impl SpeechHost for MockHost {
    fn is_speaking(&self) -> Result<bool> {
        let state = self.state.lock().unwrap();
        if state.fail_busy {
            return Err("scripted busy query failure".into());
        }
        Ok(state.busy)
    }

    fn voices(&mut self) -> Result<Vec<VoiceInfo>> {
        let state = self.state.lock().unwrap();
        if state.fail_voices {
            return Err("scripted enumeration failure".into());
        }
        Ok(state.voices.clone())
    }

    fn speak(&mut self, request: &Utterance) -> Result<()> {
        self.state.lock().unwrap().spoken.push(request.clone());
        Ok(())
    }

    fn notifies_voice_changes(&self) -> bool {
        self.push
    }

    fn try_recv_event(&mut self) -> Option<SpeechEvent> {
        self.state.lock().unwrap().events.pop_front()
    }
}

/// Load a config from a fresh temp directory, with optional file content
pub fn test_config(dir: &TempDir, content: Option<&str>) -> Config {
    let path = dir.path().join("speakpad.cfg");
    if let Some(content) = content {
        std::fs::write(&path, content).expect("write test config");
    }
    Config::load_from(&path).expect("load test config")
}

/// Panel over a poll-style mock host with default config
pub fn panel_with_mock() -> (Panel, Arc<Mutex<MockState>>, TempDir) {
    let dir = TempDir::new().expect("create temp dir");
    let config = test_config(&dir, None);
    let (host, state) = MockHost::new();
    (Panel::new(config, Box::new(host)), state, dir)
}

/// Panel over a push-style mock host with default config
pub fn panel_with_push_mock() -> (Panel, Arc<Mutex<MockState>>, TempDir) {
    let dir = TempDir::new().expect("create temp dir");
    let config = test_config(&dir, None);
    let (host, state) = MockHost::with_push(true);
    (Panel::new(config, Box::new(host)), state, dir)
}

/// Panel over a poll-style mock host with the given config file content
pub fn panel_with_mock_config(content: &str) -> (Panel, Arc<Mutex<MockState>>, TempDir) {
    let dir = TempDir::new().expect("create temp dir");
    let config = test_config(&dir, Some(content));
    let (host, state) = MockHost::new();
    (Panel::new(config, Box::new(host)), state, dir)
}

/// The two-voice descriptor set most tests use
pub fn alice_and_bob() -> Vec<VoiceInfo> {
    vec![
        VoiceInfo::new("Alice", "en-US"),
        VoiceInfo::new("Bob", "en-GB"),
    ]
}
