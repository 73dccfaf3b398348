//! Configuration management

use crate::api::{Feature, DEFAULT_BASE_URL};
use crate::audio::backends::DEFAULT_OUTPUT;
use crate::audio::{OutputKind, SPEECH_CHANNELS, SPEECH_SAMPLE_RATE};
use crate::speech::SpeechFormat;
use crate::{PeshkatError, Result};
use ini::Ini;
use log::{debug, info, warn};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Environment variables checked for the API key, in order
pub const API_KEY_VARS: &[&str] = &["GEMINI_API_KEY", "API_KEY"];

/// Application configuration
///
/// Backed by an INI file (~/.peshkat.cfg) holding API access, model
/// overrides, speech output settings and UI defaults.
pub struct Config {
    /// INI configuration storage
    ini: Ini,

    /// Config file path
    path: PathBuf,
}

impl Config {
    /// Load configuration from ~/.peshkat.cfg, creating it if missing
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path())
    }

    /// Load configuration from a specific file, creating it if missing
    pub fn load_from(path: &Path) -> Result<Self> {
        debug!("Loading config from {:?}", path);

        let ini = if path.exists() {
            Ini::load_from_file(path)
                .map_err(|e| PeshkatError::IniParse(format!("Failed to load config: {}", e)))?
        } else {
            info!("Config file not found, creating default");
            let default = Self::default_config();
            default
                .write_to_file(path)
                .map_err(|e| PeshkatError::IniParse(format!("Failed to write config: {}", e)))?;
            default
        };

        Ok(Self::from_ini(ini, path.to_path_buf()))
    }

    /// Wrap an already parsed INI without touching disk
    pub fn from_ini(ini: Ini, path: PathBuf) -> Self {
        Self { ini, path }
    }

    /// Defaults only, not tied to a file on disk
    pub fn defaults() -> Self {
        Self::from_ini(Self::default_config(), Self::config_path())
    }

    /// Save configuration to disk
    pub fn save(&self) -> Result<()> {
        debug!("Saving config to {:?}", self.path);
        self.ini
            .write_to_file(&self.path)
            .map_err(|e| PeshkatError::Config(format!("Failed to save config: {}", e)))
    }

    /// Get config file path (~/.peshkat.cfg)
    fn config_path() -> PathBuf {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".peshkat.cfg")
    }

    /// Expose the config file path for display
    pub fn path(&self) -> &PathBuf {
        &self.path
    }

    /// Create default configuration
    fn default_config() -> Ini {
        let mut ini = Ini::new();

        ini.with_section(Some("api"))
            .set("base_url", DEFAULT_BASE_URL)
            .set("api_key", "")
            .set("timeout_secs", "60");

        ini.with_section(Some("speech"))
            .set("voice", "Kore")
            .set("sample_rate", SPEECH_SAMPLE_RATE.to_string())
            .set("channels", SPEECH_CHANNELS.to_string())
            .set("output", DEFAULT_OUTPUT)
            .set("wav_dir", "peshkat-audio");

        ini.with_section(Some("ui"))
            .set("language", "en")
            .set("theme", "Black");

        ini.with_section(Some("models"));

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
            .and_then(|v| v.trim().parse().ok())
            .unwrap_or(default)
    }

    /// Set a value in config
    pub fn set(&mut self, section: &str, key: &str, value: &str) {
        self.ini.with_section(Some(section)).set(key, value);
    }

    // API access

    pub fn base_url(&self) -> String {
        self.get_string("api", "base_url", DEFAULT_BASE_URL)
    }

    /// API key from the environment, else from `[api] api_key`
    pub fn api_key(&self) -> Option<String> {
        API_KEY_VARS
            .iter()
            .filter_map(|var| std::env::var(var).ok())
            .chain(self.ini.get_from(Some("api"), "api_key").map(str::to_string))
            .map(|key| key.trim().to_string())
            .find(|key| !key.is_empty())
    }

    /// Request timeout
    pub fn timeout(&self) -> Duration {
        let secs = self.get_int("api", "timeout_secs", 60);
        Duration::from_secs(secs.clamp(1, 600) as u64)
    }

    /// Model override for a feature from the `[models]` section
    pub fn model_override(&self, feature: Feature) -> Option<String> {
        self.ini
            .get_from(Some("models"), feature.key())
            .map(str::trim)
            .filter(|m| !m.is_empty())
            .map(str::to_string)
    }

    // Speech

    /// Prebuilt voice for speech synthesis
    pub fn voice(&self) -> String {
        self.get_string("speech", "voice", "Kore")
    }

    /// PCM format assumed when the response does not state one
    pub fn speech_format(&self) -> SpeechFormat {
        let sample_rate = self.get_int("speech", "sample_rate", SPEECH_SAMPLE_RATE as i64);
        let channels = self.get_int("speech", "channels", SPEECH_CHANNELS as i64);

        let sample_rate = u32::try_from(sample_rate)
            .ok()
            .filter(|&r| r > 0)
            .unwrap_or(SPEECH_SAMPLE_RATE);
        let channels = u16::try_from(channels)
            .ok()
            .filter(|&c| c > 0)
            .unwrap_or(SPEECH_CHANNELS);

        SpeechFormat {
            sample_rate,
            channels,
        }
    }

    /// Where played audio goes
    pub fn output_kind(&self) -> OutputKind {
        let wav_dir = PathBuf::from(self.get_string("speech", "wav_dir", "peshkat-audio"));
        let value = self.get_string("speech", "output", DEFAULT_OUTPUT);
        OutputKind::parse(&value, wav_dir).unwrap_or_else(|| {
            warn!("Unknown speech output {:?}, using null", value);
            OutputKind::Null
        })
    }

    // UI defaults

    pub fn ui_language(&self) -> String {
        self.get_string("ui", "language", "en")
    }

    pub fn theme_name(&self) -> String {
        self.get_string("ui", "theme", "Black")
    }
}
