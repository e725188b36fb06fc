//! Subcommand implementations.

pub mod assemble;
pub mod config_cmd;
pub mod entries;
pub mod init;
pub mod preview;

use std::path::{Path, PathBuf};

use parlor_config::{AppConfig, ConfigError};

/// Load the config from `path`, or from the default location.
///
/// Environment overrides apply either way.
pub fn load_config(path: Option<&Path>) -> Result<AppConfig, ConfigError> {
    match path {
        Some(path) => {
            let mut config = AppConfig::load_from(path)?;
            config.apply_overrides(|key| std::env::var(key).ok());
            config.validate()?;
            Ok(config)
        }
        None => AppConfig::load(),
    }
}

/// The config file a command operates on.
pub fn config_file(path: Option<&Path>) -> PathBuf {
    path.map(Path::to_path_buf)
        .unwrap_or_else(AppConfig::config_path)
}
