//! Wavegen Config - session configuration for the wavegen signal generator
//!
//! Loads and saves the TOML file that seeds a generator session: engine
//! start-up values, console behavior and the playback clock.
//!
//! # Example
//!
//! ```rust
//! use wavegen_config::SessionConfig;
//!
//! let config = SessionConfig::from_toml("[engine]\nsample_rate = 8000\n").unwrap();
//! assert_eq!(config.engine_config().sample_rate, 8000);
//! assert_eq!(config.console.prompt, "Command: ");
//! ```
//!
//! # Configuration Paths
//!
//! See [`paths`] for the per-platform location of `wavegen.toml`.

pub mod error;
pub mod paths;
pub mod session;

pub use error::ConfigError;
pub use paths::{CONFIG_FILE_NAME, default_config_path, resolve_config_path, user_config_dir};
pub use session::{
    ConsoleSection, DEFAULT_MASTER_CLOCK_HZ, DEFAULT_MAX_LINE, DEFAULT_PROMPT, EngineSection,
    MAX_CAPACITY, PlaybackSection, SessionConfig,
};
