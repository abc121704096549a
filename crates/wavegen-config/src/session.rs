//! Session configuration file.

use serde::{Deserialize, Serialize};
use std::path::Path;

use wavegen_core::{
    ArgLimits, DEFAULT_AMPLITUDE, DEFAULT_CAPACITY, DEFAULT_FREQUENCY, DEFAULT_SAMPLE_RATE,
    EngineConfig, MAX_ARG_LEN, MAX_ARGS, MIN_AMPLITUDE,
};

use crate::error::ConfigError;

/// Default timer input clock of the playback hardware, in Hz.
pub const DEFAULT_MASTER_CLOCK_HZ: u32 = 200_000_000;

/// Largest sample buffer a session may allocate (32 MiB of DAC codes).
pub const MAX_CAPACITY: usize = 16 * 1024 * 1024;

/// Default console line buffer size, terminator slot included.
pub const DEFAULT_MAX_LINE: usize = 200;

/// Default console prompt.
pub const DEFAULT_PROMPT: &str = "Command: ";

/// Settings for one generator session.
///
/// Every section and field is optional in the file; missing values take the
/// firmware defaults.
///
/// # TOML Format
///
/// ```toml
/// log_level = "warn"
///
/// [engine]
/// capacity = 250000
/// sample_rate = 500000
/// frequency = 5000
/// amplitude = 0.2
///
/// [console]
/// echo = false
/// max_line = 200
/// prompt = "Command: "
/// max_args = 5
/// max_arg_len = 19
///
/// [playback]
/// master_clock_hz = 200000000
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    /// Default `tracing` filter when `RUST_LOG` is not set.
    pub log_level: String,

    /// Synthesis engine settings.
    pub engine: EngineSection,

    /// Console line editor settings.
    pub console: ConsoleSection,

    /// Playback device settings.
    pub playback: PlaybackSection,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            log_level: "warn".to_string(),
            engine: EngineSection::default(),
            console: ConsoleSection::default(),
            playback: PlaybackSection::default(),
        }
    }
}

/// `[engine]` section.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineSection {
    /// Sample buffer capacity.
    pub capacity: usize,
    /// Initial sample clock in Hz.
    pub sample_rate: u32,
    /// Initial `add` frequency in Hz.
    pub frequency: u32,
    /// Initial `add` amplitude.
    pub amplitude: f64,
}

impl Default for EngineSection {
    fn default() -> Self {
        Self {
            capacity: DEFAULT_CAPACITY,
            sample_rate: DEFAULT_SAMPLE_RATE,
            frequency: DEFAULT_FREQUENCY,
            amplitude: DEFAULT_AMPLITUDE,
        }
    }
}

/// `[console]` section.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConsoleSection {
    /// Echo typed characters back to the terminal.
    pub echo: bool,
    /// Line buffer size; lines end after `max_line - 1` characters.
    pub max_line: usize,
    /// Text printed before each read.
    pub prompt: String,
    /// Tokens past this count are ignored.
    pub max_args: usize,
    /// Tokens longer than this are dropped.
    pub max_arg_len: usize,
}

impl Default for ConsoleSection {
    fn default() -> Self {
        Self {
            echo: false,
            max_line: DEFAULT_MAX_LINE,
            prompt: DEFAULT_PROMPT.to_string(),
            max_args: MAX_ARGS,
            max_arg_len: MAX_ARG_LEN,
        }
    }
}

/// `[playback]` section.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlaybackSection {
    /// Timer input clock in Hz.
    pub master_clock_hz: u32,
}

impl Default for PlaybackSection {
    fn default() -> Self {
        Self {
            master_clock_hz: DEFAULT_MASTER_CLOCK_HZ,
        }
    }
}

impl SessionConfig {
    /// Load a configuration from a TOML file and validate it.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content =
            std::fs::read_to_string(path).map_err(|e| ConfigError::read_file(path, e))?;
        let config = Self::from_toml(&content)?;
        Ok(config)
    }

    /// Parse and validate a configuration from a TOML string.
    pub fn from_toml(toml_str: &str) -> Result<Self, ConfigError> {
        let config: SessionConfig = toml::from_str(toml_str)?;
        config.validate()?;
        Ok(config)
    }

    /// Save the configuration to a TOML file, creating parent directories.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), ConfigError> {
        let path = path.as_ref();

        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
            && !parent.exists()
        {
            std::fs::create_dir_all(parent).map_err(|e| ConfigError::create_dir(parent, e))?;
        }

        let content = self.to_toml()?;
        std::fs::write(path, content).map_err(|e| ConfigError::write_file(path, e))?;
        Ok(())
    }

    /// Convert the configuration to a TOML string.
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Check that the engine can run with these values.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let engine = &self.engine;
        if engine.capacity == 0 {
            return Err(ConfigError::invalid("engine.capacity", "must be at least 1"));
        }
        if engine.capacity > MAX_CAPACITY {
            return Err(ConfigError::invalid(
                "engine.capacity",
                format!("must be at most {MAX_CAPACITY} samples"),
            ));
        }
        if engine.sample_rate == 0 {
            return Err(ConfigError::invalid("engine.sample_rate", "must be positive"));
        }
        if engine.frequency == 0 {
            return Err(ConfigError::invalid("engine.frequency", "must be positive"));
        }
        if !engine.amplitude.is_finite() || engine.amplitude <= MIN_AMPLITUDE {
            return Err(ConfigError::invalid(
                "engine.amplitude",
                format!("must be finite and greater than {MIN_AMPLITUDE}"),
            ));
        }
        if self.playback.master_clock_hz < engine.sample_rate {
            return Err(ConfigError::invalid(
                "playback.master_clock_hz",
                format!(
                    "{} Hz cannot drive a {} Hz sample clock",
                    self.playback.master_clock_hz, engine.sample_rate
                ),
            ));
        }
        if self.console.max_line < 2 {
            return Err(ConfigError::invalid("console.max_line", "must be at least 2"));
        }
        if self.console.max_args == 0 {
            return Err(ConfigError::invalid("console.max_args", "must be at least 1"));
        }
        if self.console.max_arg_len == 0 {
            return Err(ConfigError::invalid(
                "console.max_arg_len",
                "must be at least 1",
            ));
        }
        Ok(())
    }

    /// Engine start-up values.
    pub fn engine_config(&self) -> EngineConfig {
        EngineConfig {
            capacity: self.engine.capacity,
            sample_rate: self.engine.sample_rate,
            frequency: self.engine.frequency,
            amplitude: self.engine.amplitude,
        }
    }

    /// Tokenizer limits for the command dispatcher.
    pub fn arg_limits(&self) -> ArgLimits {
        ArgLimits {
            max_args: self.console.max_args,
            max_len: self.console.max_arg_len,
        }
    }
}
