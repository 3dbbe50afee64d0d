//! Panel controls: text field, sliders, voice picker
//!
//! Each control owns its own value; the panel reads them when building an
//! utterance request and mirrors them to printed labels. None of them touch
//! the speech host directly.

use crate::speech::VoiceInfo;

/// The line of text to be spoken
pub struct TextField {
    value: String,
}

impl TextField {
    pub fn new() -> Self {
        Self {
            value: String::new(),
        }
    }

    /// Append a typed character
    pub fn push(&mut self, ch: char) {
        self.value.push(ch);
    }

    /// Delete the last character (backspace)
    pub fn pop(&mut self) {
        self.value.pop();
    }

    /// Clear the whole line (ctrl+u)
    pub fn clear(&mut self) {
        self.value.clear();
    }

    pub fn value(&self) -> &str {
        &self.value
    }

    pub fn is_empty(&self) -> bool {
        self.value.is_empty()
    }
}

impl Default for TextField {
    fn default() -> Self {
        Self::new()
    }
}

/// A numeric slider holding its raw string value
///
/// The raw value is whatever the user last entered or the last nudge
/// produced. Reading it parses on the spot; anything that fails to parse
/// counts as 1.0. The parsed value is clamped to the slider bounds.
pub struct Slider {
    raw: String,
    min: f32,
    max: f32,
    step: f32,
}

impl Slider {
    pub fn new(min: f32, max: f32, step: f32, initial: f32) -> Self {
        Self {
            raw: format!("{:.1}", initial),
            min,
            max,
            step,
        }
    }

    /// Replace the raw value with typed input, unparsed
    pub fn set_raw(&mut self, raw: &str) {
        self.raw = raw.trim().to_string();
    }

    pub fn raw(&self) -> &str {
        &self.raw
    }

    /// Parsed value: 1.0 on parse failure, clamped to the slider bounds
    pub fn value(&self) -> f32 {
        let parsed = self
            .raw
            .parse::<f32>()
            .ok()
            .filter(|v| v.is_finite())
            .unwrap_or(1.0);
        parsed.clamp(self.min, self.max)
    }

    /// Display label, one decimal place
    pub fn label(&self) -> String {
        format!("{:.1}", self.value())
    }

    /// Step the value up or down one increment, staying in bounds
    ///
    /// The raw value is replaced by the formatted result, so a nudge after
    /// a garbage typed value steps from 1.0.
    pub fn nudge(&mut self, up: bool) {
        let delta = if up { self.step } else { -self.step };
        let next = (self.value() + delta).clamp(self.min, self.max);
        self.raw = format!("{:.1}", next);
    }
}

/// One selectable voice entry
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VoiceEntry {
    /// Display label, "<name> (<language>)"
    pub label: String,

    /// Descriptor name used to resolve the selection back to a descriptor
    pub name: String,
}

/// Ordered voice selection list
///
/// Rebuilt from scratch on every voice refresh; the selection resets to the
/// first entry on rebuild.
pub struct VoicePicker {
    entries: Vec<VoiceEntry>,
    selected: usize,
}

impl VoicePicker {
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
            selected: 0,
        }
    }

    /// Replace all entries with one per descriptor
    pub fn rebuild(&mut self, voices: &[VoiceInfo]) {
        self.entries = voices
            .iter()
            .map(|v| VoiceEntry {
                label: v.label(),
                name: v.name.clone(),
            })
            .collect();
        self.selected = 0;
    }

    /// Move the selection up; returns true if it changed
    pub fn select_prev(&mut self) -> bool {
        if self.selected > 0 {
            self.selected -= 1;
            true
        } else {
            false
        }
    }

    /// Move the selection down; returns true if it changed
    pub fn select_next(&mut self) -> bool {
        if self.selected + 1 < self.entries.len() {
            self.selected += 1;
            true
        } else {
            false
        }
    }

    /// Select the entry with the given descriptor name, if present
    pub fn select_by_name(&mut self, name: &str) -> bool {
        if let Some(idx) = self.entries.iter().position(|e| e.name == name) {
            self.selected = idx;
            true
        } else {
            false
        }
    }

    /// Descriptor name of the current selection
    pub fn selected_name(&self) -> Option<&str> {
        self.entries.get(self.selected).map(|e| e.name.as_str())
    }

    /// Display label of the current selection
    pub fn selected_label(&self) -> Option<&str> {
        self.entries.get(self.selected).map(|e| e.label.as_str())
    }

    pub fn entries(&self) -> &[VoiceEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Default for VoicePicker {
    fn default() -> Self {
        Self::new()
    }
}
