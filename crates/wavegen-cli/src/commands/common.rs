//! Shared CLI helpers used across multiple commands.

use clap::Args;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;
use wavegen_config::{SessionConfig, resolve_config_path};

/// Config file selection shared by every subcommand.
#[derive(Args, Debug, Default)]
pub struct ConfigArgs {
    /// Session config file (defaults to the user config directory)
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,
}

/// Parse a rate or frequency for clap's `value_parser`; `K` anywhere means x1000.
pub fn parse_rate(s: &str) -> Result<u32, String> {
    wavegen_core::parse_frequency(s).map_err(|e| e.to_string())
}

/// Load the session config.
///
/// Searches in this order:
/// 1. `--config <PATH>` (must exist)
/// 2. `wavegen.toml` in the user config directory
/// 3. Built-in defaults
pub fn load_config(args: &ConfigArgs) -> anyhow::Result<(SessionConfig, Option<PathBuf>)> {
    match resolve_config_path(args.config.as_deref()) {
        Some(path) => {
            let config = SessionConfig::load(&path)?;
            Ok((config, Some(path)))
        }
        None => Ok((SessionConfig::default(), None)),
    }
}

/// Install the stderr log subscriber. `RUST_LOG` overrides `default_level`.
pub fn init_tracing(default_level: &str) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    // a second init (only possible in tests) keeps the first subscriber
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_rate_accepts_kilo() {
        assert_eq!(parse_rate("48k"), Ok(48_000));
        assert_eq!(parse_rate("1000"), Ok(1000));
    }

    #[test]
    fn parse_rate_rejects_zero_and_garbage() {
        assert!(parse_rate("0").is_err());
        assert!(parse_rate("fast").is_err());
    }

    #[test]
    fn explicit_missing_config_is_an_error() {
        let args = ConfigArgs {
            config: Some(PathBuf::from("/definitely/not/here/wavegen.toml")),
        };
        assert!(load_config(&args).is_err());
    }

    #[test]
    fn explicit_config_is_loaded() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("wavegen.toml");
        std::fs::write(&path, "[engine]\nsample_rate = 8000\n").unwrap();

        let (config, used) = load_config(&ConfigArgs {
            config: Some(path.clone()),
        })
        .unwrap();
        assert_eq!(config.engine.sample_rate, 8000);
        assert_eq!(used, Some(path));
    }
}
