//! Speech control panel
//!
//! The Panel struct is the central data structure of the program, binding
//! the text field, voice picker, and rate/pitch sliders to a speech host
//! and mirroring their values onto the terminal.

pub mod config;
pub mod controls;

use crate::input::HandlerStack;
use crate::speech::{SpeechEvent, SpeechHost, Utterance, VoiceInfo};
use crate::Result;
use config::Config;
use controls::{Slider, TextField, VoicePicker};
use log::{debug, error, info, warn};
use std::io::{self, Write};
use std::time::{Duration, Instant};

/// Rate and pitch multiplier bounds shared by both sliders
pub const SLIDER_MIN: f32 = 0.1;
pub const SLIDER_MAX: f32 = 10.0;
pub const SLIDER_STEP: f32 = 0.1;

/// Type for delayed tasks (used for the voice list retry)
/// Stores a function to call and when it should be called
type DelayedTask = (Instant, Box<dyn FnOnce(&mut Panel) -> Result<()> + Send>);

/// The speech control panel
///
/// Owns the control state, the voice cache, and the speech host binding.
/// All mutation happens on the event loop thread.
pub struct Panel {
    /// Configuration loaded from ~/.speakpad.cfg
    pub config: Config,

    /// Speech host the panel dispatches utterances to
    pub host: Box<dyn SpeechHost>,

    /// Voice descriptor cache, replaced wholesale on each successful refresh
    pub voices: Vec<VoiceInfo>,

    /// Voice selection list built from the cache
    pub picker: VoicePicker,

    /// The line of text to be spoken
    pub text: TextField,

    /// Rate multiplier slider
    pub rate: Slider,

    /// Pitch multiplier slider
    pub pitch: Slider,

    /// Key handler stack for modal input
    /// Allows typed rate/pitch entry to intercept keys
    pub handlers: HandlerStack,

    /// Whether the host pushes voice change notifications
    /// Decided once at subscription time; false means poll-until-non-empty
    push_voices: bool,

    /// Preferred voice name from config, re-applied after every rebuild
    preferred_voice: Option<String>,

    /// Delayed tasks for the voice list retry
    delayed_tasks: Vec<DelayedTask>,
}

impl Panel {
    /// Create a new panel over the given host
    pub fn new(config: Config, host: Box<dyn SpeechHost>) -> Self {
        info!("Initializing panel");
        info!("  Rate: {}", config.rate());
        info!("  Pitch: {}", config.pitch());
        info!("  Preferred voice: {:?}", config.voice());
        info!("  Voice retry: {:?}", config.voice_retry());

        let rate = Slider::new(SLIDER_MIN, SLIDER_MAX, SLIDER_STEP, config.rate());
        let pitch = Slider::new(SLIDER_MIN, SLIDER_MAX, SLIDER_STEP, config.pitch());
        let preferred_voice = config.voice();

        Self {
            config,
            host,
            voices: Vec::new(),
            picker: VoicePicker::new(),
            text: TextField::new(),
            rate,
            pitch,
            handlers: HandlerStack::new(),
            push_voices: false,
            preferred_voice,
            delayed_tasks: Vec::new(),
        }
    }

    /// Pick the voice-availability backend and run the initial refresh
    ///
    /// Called once at startup. A push-capable host refreshes on change
    /// notifications from then on; any other host falls back to polling
    /// until the list turns up non-empty.
    pub fn subscribe_voices(&mut self) -> Result<()> {
        self.push_voices = self.host.notifies_voice_changes();
        if self.push_voices {
            info!("Host pushes voice change notifications");
        } else {
            info!("Host does not push voice changes, polling until ready");
        }
        self.refresh_voices()
    }

    /// Query the host's voice set and rebuild the picker from it
    ///
    /// An empty set (or a failed query) means the host is still warming up.
    /// The current list is left untouched and, when polling, one retry is
    /// scheduled after the configured delay. No retry bound.
    pub fn refresh_voices(&mut self) -> Result<()> {
        let voices = match self.host.voices() {
            Ok(v) => v,
            Err(e) => {
                warn!("Voice enumeration failed: {}", e);
                Vec::new()
            }
        };

        if voices.is_empty() {
            if self.push_voices {
                debug!("Voice list empty, waiting for change notification");
            } else {
                let delay = self.config.voice_retry();
                debug!("Voice list empty, retrying in {:?}", delay);
                self.schedule(delay, |panel| panel.refresh_voices());
            }
            return Ok(());
        }

        info!("Loaded {} voices", voices.len());
        self.voices = voices;
        self.picker.rebuild(&self.voices);

        if let Some(name) = self.preferred_voice.clone() {
            if !self.picker.select_by_name(&name) {
                warn!("Preferred voice {:?} not in the current list", name);
            }
        }

        let summary = match self.picker.selected_label() {
            Some(label) => format!("{} voices, selected {}", self.picker.len(), label),
            None => format!("{} voices", self.picker.len()),
        };
        self.announce(&summary)
    }

    /// Speak the current text with the current voice, rate, and pitch
    ///
    /// At most one utterance in flight by policy: a busy host drops the
    /// request with a diagnostic. The busy check and the dispatch are not
    /// atomic with respect to the host's own state transitions.
    pub fn speak(&mut self) -> Result<()> {
        let busy = match self.host.is_speaking() {
            Ok(b) => b,
            Err(e) => {
                warn!("Busy query failed: {}", e);
                false
            }
        };
        if busy {
            error!("Already speaking, request dropped");
            return Ok(());
        }

        let text = self.text.value().trim();
        if text.is_empty() {
            return Ok(());
        }

        let mut request = Utterance::new(text);
        if let Some(name) = self.picker.selected_name() {
            request.voice = self.voices.iter().find(|v| v.name == name).cloned();
        }
        request.rate = self.rate.value();
        request.pitch = self.pitch.value();

        debug!(
            "Dispatching utterance: {} chars, voice {:?}, rate {}, pitch {}",
            request.text.len(),
            request.voice.as_ref().map(|v| v.name.as_str()),
            request.rate,
            request.pitch
        );
        if let Err(e) = self.host.speak(&request) {
            error!("Dispatch failed: {}", e);
        }
        Ok(())
    }

    /// Drain pending host notifications
    ///
    /// Begin/end are debug noise, production errors are logged and dropped,
    /// and a voices-changed notification triggers a refresh.
    pub fn pump_host_events(&mut self) -> Result<()> {
        while let Some(event) = self.host.try_recv_event() {
            match event {
                SpeechEvent::UtteranceBegin => debug!("Utterance started"),
                SpeechEvent::UtteranceEnd => debug!("Utterance finished"),
                SpeechEvent::UtteranceError(msg) => error!("Utterance failed: {}", msg),
                SpeechEvent::VoicesChanged => {
                    debug!("Host voice set changed");
                    self.refresh_voices()?;
                }
            }
        }
        Ok(())
    }

    // ========== Control Actions ==========

    /// Step the rate slider and reprint its label
    pub fn nudge_rate(&mut self, up: bool) -> Result<()> {
        self.rate.nudge(up);
        let label = self.rate.label();
        self.announce(&format!("rate {}", label))
    }

    /// Step the pitch slider and reprint its label
    pub fn nudge_pitch(&mut self, up: bool) -> Result<()> {
        self.pitch.nudge(up);
        let label = self.pitch.label();
        self.announce(&format!("pitch {}", label))
    }

    /// Store a typed rate value and reprint the label
    ///
    /// The raw string is kept as-is; the label and the next utterance both
    /// see the parsed value, 1.0 if it does not parse.
    pub fn set_rate_raw(&mut self, raw: &str) -> Result<()> {
        self.rate.set_raw(raw);
        let label = self.rate.label();
        self.announce(&format!("rate {}", label))
    }

    /// Store a typed pitch value and reprint the label
    pub fn set_pitch_raw(&mut self, raw: &str) -> Result<()> {
        self.pitch.set_raw(raw);
        let label = self.pitch.label();
        self.announce(&format!("pitch {}", label))
    }

    /// Select the previous voice; on change, re-speak with the new voice
    pub fn select_prev_voice(&mut self) -> Result<()> {
        if self.picker.select_prev() {
            self.voice_changed()?;
        }
        Ok(())
    }

    /// Select the next voice; on change, re-speak with the new voice
    pub fn select_next_voice(&mut self) -> Result<()> {
        if self.picker.select_next() {
            self.voice_changed()?;
        }
        Ok(())
    }

    fn voice_changed(&mut self) -> Result<()> {
        if let Some(label) = self.picker.selected_label() {
            let label = label.to_string();
            self.announce(&label)?;
        }
        self.speak()
    }

    /// Append typed input to the text line
    pub fn type_text(&mut self, input: &str) -> Result<()> {
        for ch in input.chars() {
            if !ch.is_control() {
                self.text.push(ch);
            }
        }
        self.redraw_entry()
    }

    /// Delete the last character of the text line
    pub fn backspace(&mut self) -> Result<()> {
        self.text.pop();
        self.redraw_entry()
    }

    /// Clear the text line
    pub fn clear_text(&mut self) -> Result<()> {
        self.text.clear();
        self.redraw_entry()
    }

    // ========== Delayed Tasks ==========

    /// Schedule a task to run after a delay
    pub fn schedule<F>(&mut self, delay: Duration, func: F)
    where
        F: FnOnce(&mut Panel) -> Result<()> + Send + 'static,
    {
        let when = Instant::now() + delay;
        self.delayed_tasks.push((when, Box::new(func)));
    }

    /// Run any delayed tasks that are ready
    ///
    /// Returns true if any tasks were executed
    pub fn run_scheduled(&mut self) -> Result<bool> {
        let now = Instant::now();

        // Extract ready tasks from the list
        let mut to_run = Vec::new();
        let mut i = 0;
        while i < self.delayed_tasks.len() {
            if now >= self.delayed_tasks[i].0 {
                to_run.push(self.delayed_tasks.remove(i));
            } else {
                i += 1;
            }
        }

        let executed = !to_run.is_empty();
        for (_when, func) in to_run {
            func(self)?;
        }

        Ok(executed)
    }

    /// Get time until the next scheduled task
    ///
    /// Returns None if nothing is scheduled. Used to set the poll timeout.
    pub fn time_until_next_scheduled(&self) -> Option<Duration> {
        if self.delayed_tasks.is_empty() {
            return None;
        }

        let now = Instant::now();
        let next = self.delayed_tasks.iter().map(|(when, _)| *when).min()?;

        Some(next.saturating_duration_since(now))
    }

    /// Number of tasks waiting to run
    pub fn pending_tasks(&self) -> usize {
        self.delayed_tasks.len()
    }

    // ========== Display ==========

    /// Print a line above the entry line, then redraw the entry line
    pub fn announce(&mut self, line: &str) -> Result<()> {
        let mut out = io::stdout();
        write!(out, "\r\x1b[K{}\r\n", line)?;
        out.flush()?;
        self.redraw_entry()
    }

    /// Redraw the text entry line in place
    pub fn redraw_entry(&mut self) -> Result<()> {
        let mut out = io::stdout();
        write!(out, "\r\x1b[Ktext> {}", self.text.value())?;
        out.flush()?;
        Ok(())
    }

    /// Print the whole control panel
    pub fn print_controls(&mut self) -> Result<()> {
        let voice_line = match self.picker.selected_label() {
            Some(label) => format!("{} ({} available)", label, self.picker.len()),
            None => "loading...".to_string(),
        };

        let mut out = io::stdout();
        write!(out, "\r\x1b[K{} {}\r\n", crate::APP_NAME, crate::VERSION)?;
        write!(out, "  enter            speak the typed text\r\n")?;
        write!(out, "  up/down          change voice (re-speaks)\r\n")?;
        write!(out, "  right/left       rate +/- {}\r\n", SLIDER_STEP)?;
        write!(out, "  alt+right/left   pitch +/- {}\r\n", SLIDER_STEP)?;
        write!(out, "  alt+r, alt+p     type a rate or pitch value\r\n")?;
        write!(out, "  ctrl+u           clear the line\r\n")?;
        write!(out, "  alt+s            show this panel\r\n")?;
        write!(out, "  ctrl+c, ctrl+d   quit\r\n")?;
        write!(out, "  voice: {}\r\n", voice_line)?;
        write!(
            out,
            "  rate: {}   pitch: {}\r\n",
            self.rate.label(),
            self.pitch.label()
        )?;
        out.flush()?;
        self.redraw_entry()
    }
}
