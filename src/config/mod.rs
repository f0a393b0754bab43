#[cfg(feature = "cli")]
pub mod cli;
pub mod toml_config;

#[cfg(feature = "cli")]
pub use cli::CliConfig;
pub use toml_config::{AppConfig, LoggingConfig, StorageConfig, StoreConfig, DEFAULT_CONFIG_FILE};

use crate::utils::error::Result;
use crate::utils::validation::Validate;
use std::path::Path;

/// Defaults, then the TOML file (explicit path, or `./parcels.toml` when it
/// exists), then command line overrides. The result is validated.
pub fn resolve_config(
    config_path: Option<&str>,
    data_dir: Option<String>,
    slot: Option<String>,
) -> Result<AppConfig> {
    let mut config = match config_path {
        Some(path) => AppConfig::from_file(path)?,
        None if Path::new(DEFAULT_CONFIG_FILE).exists() => AppConfig::from_file(DEFAULT_CONFIG_FILE)?,
        None => AppConfig::default(),
    };
    config.apply_overrides(data_dir, slot);
    config.validate()?;
    Ok(config)
}
