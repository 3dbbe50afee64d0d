//! Configuration management

use crate::{Result, SpeakpadError};
use ini::Ini;
use log::{debug, info};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Application configuration for the speech panel
///
/// Holds the startup values for the speech controls and the voice list
/// retry interval. Settings are read once at startup; the panel never
/// writes them back.
pub struct Config {
    /// INI configuration storage
    ini: Ini,

    /// Config file path (~/.speakpad.cfg)
    path: PathBuf,
}

impl Config {
    /// Load configuration from disk or create default
    pub fn load() -> Result<Self> {
        let path = Self::config_path()?;
        Self::load_from(&path)
    }

    /// Load configuration from a specific path, writing defaults on first run
    pub fn load_from(path: &Path) -> Result<Self> {
        debug!("Loading config from {:?}", path);

        let ini = if path.exists() {
            Ini::load_from_file(path)
                .map_err(|e| SpeakpadError::IniParse(format!("Failed to load config: {}", e)))?
        } else {
            info!("Config file not found, creating default");
            let default = Self::default_config();
            default
                .write_to_file(path)
                .map_err(|e| SpeakpadError::IniParse(format!("Failed to write config: {}", e)))?;
            default
        };

        Ok(Self {
            ini,
            path: path.to_path_buf(),
        })
    }

    /// Get config file path (~/.speakpad.cfg)
    fn config_path() -> Result<PathBuf> {
        let home = dirs::home_dir().ok_or("Could not find home directory")?;
        Ok(home.join(".speakpad.cfg"))
    }

    /// Expose the config file path for display
    pub fn path(&self) -> &PathBuf {
        &self.path
    }

    /// Create default configuration
    fn default_config() -> Ini {
        let mut ini = Ini::new();

        ini.with_section(Some("speech"))
            .set("rate", "1.0")
            .set("pitch", "1.0")
            .set("voice", "");

        ini.with_section(Some("panel")).set("voice_retry_ms", "500");

        ini
    }

    /// Get a string value from config
    pub fn get_string(&self, section: &str, key: &str, default: &str) -> String {
        self.ini
            .get_from(Some(section), key)
            .unwrap_or(default)
            .to_string()
    }

    /// Get an integer value from config
    pub fn get_int(&self, section: &str, key: &str, default: i64) -> i64 {
        self.ini
            .get_from(Some(section), key)
            .and_then(|v| v.parse().ok())
            .unwrap_or(default)
    }

    /// Get a float value from config
    pub fn get_float(&self, section: &str, key: &str, default: f32) -> f32 {
        self.ini
            .get_from(Some(section), key)
            .and_then(|v| v.parse().ok())
            .unwrap_or(default)
    }

    // Panel-specific configuration getters

    /// Startup speech rate multiplier
    pub fn rate(&self) -> f32 {
        self.get_float("speech", "rate", 1.0)
    }

    /// Startup speech pitch multiplier
    pub fn pitch(&self) -> f32 {
        self.get_float("speech", "pitch", 1.0)
    }

    /// Preferred voice name, if any
    ///
    /// An empty value means no preference; the engine default is kept.
    pub fn voice(&self) -> Option<String> {
        let name = self.get_string("speech", "voice", "");
        if name.is_empty() {
            None
        } else {
            Some(name)
        }
    }

    /// How long to wait before re-querying an empty voice list
    pub fn voice_retry(&self) -> Duration {
        let ms = self.get_int("panel", "voice_retry_ms", 500).max(0) as u64;
        Duration::from_millis(ms)
    }
}
