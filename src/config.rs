//! Render configuration: loads optional ~/.tunec/config.yaml.
//!
//! Every field is optional; anything left out keeps its default. Values are
//! checked with [`RenderConfig::validate`] after loading.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::io;
use std::path::{Path, PathBuf};

use crate::instrument::piano::{DEFAULT_DECAY_DB, DEFAULT_HARMONICS};

pub const DEFAULT_SAMPLE_RATE: u32 = 44100;
pub const DEFAULT_BIT_DEPTH: u16 = 16;
pub const DEFAULT_FADE_MS: f64 = 5.0;
/// Highest accepted sample rate in Hz.
pub const MAX_SAMPLE_RATE: u32 = 192_000;

/// Synthesizer and output settings.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct RenderConfig {
    /// Output sample rate in Hz.
    pub sample_rate: u32,
    /// Suggested bit depth for the WAV writer: 16, 24 or 32 (float).
    pub bit_depth: u16,
    /// Linear fade-in/fade-out per side, in milliseconds.
    pub fade_ms: f64,
    /// Final clamp applied to the assembled buffer.
    pub ceiling: f32,
    /// Threads used to render instructions.
    pub workers: usize,
    pub piano: PianoConfig,
}

/// Harmonic model for the piano instrument.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct PianoConfig {
    /// Weight of the fundamental and each overtone, in order.
    pub harmonics: Vec<f64>,
    /// Attenuation in dB reached at the end of a note.
    pub decay_db: f64,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            sample_rate: DEFAULT_SAMPLE_RATE,
            bit_depth: DEFAULT_BIT_DEPTH,
            fade_ms: DEFAULT_FADE_MS,
            ceiling: 1.0,
            workers: 1,
            piano: PianoConfig::default(),
        }
    }
}

impl Default for PianoConfig {
    fn default() -> Self {
        Self {
            harmonics: DEFAULT_HARMONICS.to_vec(),
            decay_db: DEFAULT_DECAY_DB,
        }
    }
}

/// Errors from loading or validating a configuration.
#[derive(Debug)]
pub enum ConfigError {
    Io(io::Error),
    Yaml(serde_yaml::Error),
    Invalid(String),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Io(e) => write!(f, "config I/O error: {e}"),
            ConfigError::Yaml(e) => write!(f, "config parse error: {e}"),
            ConfigError::Invalid(s) => write!(f, "invalid config: {s}"),
        }
    }
}

impl std::error::Error for ConfigError {}

impl From<io::Error> for ConfigError {
    fn from(e: io::Error) -> Self {
        ConfigError::Io(e)
    }
}

impl From<serde_yaml::Error> for ConfigError {
    fn from(e: serde_yaml::Error) -> Self {
        ConfigError::Yaml(e)
    }
}

impl RenderConfig {
    /// Reject values the synthesizer or WAV writer cannot honor.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.sample_rate == 0 || self.sample_rate > MAX_SAMPLE_RATE {
            return Err(ConfigError::Invalid(format!(
                "sample_rate {} must be within 1..={MAX_SAMPLE_RATE}",
                self.sample_rate
            )));
        }
        if !matches!(self.bit_depth, 16 | 24 | 32) {
            return Err(ConfigError::Invalid(format!(
                "bit_depth {} is not one of 16, 24, 32",
                self.bit_depth
            )));
        }
        if !self.fade_ms.is_finite() || self.fade_ms < 0.0 {
            return Err(ConfigError::Invalid(format!(
                "fade_ms {} must be zero or positive",
                self.fade_ms
            )));
        }
        if !(self.ceiling > 0.0 && self.ceiling <= 1.0) {
            return Err(ConfigError::Invalid(format!(
                "ceiling {} must be in (0, 1]",
                self.ceiling
            )));
        }
        if self.workers == 0 {
            return Err(ConfigError::Invalid("workers must be at least 1".into()));
        }
        if self.piano.harmonics.is_empty() {
            return Err(ConfigError::Invalid("piano.harmonics cannot be empty".into()));
        }
        if !self.piano.decay_db.is_finite() || self.piano.decay_db < 0.0 {
            return Err(ConfigError::Invalid(format!(
                "piano.decay_db {} must be zero or positive",
                self.piano.decay_db
            )));
        }
        Ok(())
    }

    /// Parse and validate YAML text.
    pub fn from_yaml(text: &str) -> Result<Self, ConfigError> {
        // An empty file deserializes to unit, not to a mapping.
        let config: RenderConfig = if text.trim().is_empty() {
            RenderConfig::default()
        } else {
            serde_yaml::from_str(text)?
        };
        config.validate()?;
        Ok(config)
    }
}

/// Default config path: ~/.tunec/config.yaml.
pub fn default_config_path() -> Option<PathBuf> {
    dirs::home_dir().map(|h| h.join(".tunec").join("config.yaml"))
}

/// Load configuration from an explicit path. The file must exist.
pub fn load_config(path: &Path) -> Result<RenderConfig, ConfigError> {
    let content = std::fs::read_to_string(path)?;
    RenderConfig::from_yaml(&content)
}

/// Load ~/.tunec/config.yaml, falling back to defaults if it does not exist.
pub fn load_default_config() -> Result<RenderConfig, ConfigError> {
    match default_config_path() {
        Some(path) if path.exists() => load_config(&path),
        _ => Ok(RenderConfig::default()),
    }
}
