use crate::core::persistence::DEFAULT_SLOT;
use crate::utils::error::{ParcelError, Result};
use crate::utils::validation::{validate_path, validate_storage_key, Validate};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::Path;

pub const DEFAULT_CONFIG_FILE: &str = "parcels.toml";

const LOG_LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub storage: StorageConfig,
    pub store: StoreConfig,
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    /// Directory holding one `<slot>.json` file per slot.
    pub data_dir: String,
    pub slot: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StoreConfig {
    pub rollback_on_storage_failure: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: Option<String>,
    pub json: bool,
}

fn default_data_dir() -> String {
    match std::env::var("HOME") {
        Ok(home) if !home.is_empty() => Path::new(&home)
            .join(".local/share/parcels")
            .to_string_lossy()
            .into_owned(),
        _ => "./parcels-data".to_string(),
    }
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
            slot: DEFAULT_SLOT.to_string(),
        }
    }
}

impl AppConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| ParcelError::ConfigError {
            message: format!("cannot read {}: {}", path.display(), e),
        })?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| ParcelError::ConfigError {
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// Replaces `${VAR}` with the environment value; unknown variables are left as written.
    fn substitute_env_vars(content: &str) -> Result<String> {
        let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| ParcelError::ConfigError {
            message: format!("invalid substitution pattern: {}", e),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }

    /// Command line values win over the file.
    pub fn apply_overrides(&mut self, data_dir: Option<String>, slot: Option<String>) {
        if let Some(data_dir) = data_dir {
            self.storage.data_dir = data_dir;
        }
        if let Some(slot) = slot {
            self.storage.slot = slot;
        }
    }
}

impl Validate for AppConfig {
    fn validate(&self) -> Result<()> {
        validate_path("storage.data_dir", &self.storage.data_dir)?;
        validate_storage_key("storage.slot", &self.storage.slot)?;

        if let Some(level) = &self.logging.level {
            if !LOG_LEVELS.contains(&level.to_ascii_lowercase().as_str()) {
                return Err(ParcelError::ConfigError {
                    message: format!(
                        "logging.level `{}` is not one of {}",
                        level,
                        LOG_LEVELS.join(", ")
                    ),
                });
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_parse_full_config() {
        let toml_content = r#"
[storage]
data_dir = "/var/lib/parcels"
slot = "depot"

[store]
rollback_on_storage_failure = true

[logging]
level = "debug"
json = true
"#;

        let config = AppConfig::from_toml_str(toml_content).unwrap();

        assert_eq!(config.storage.data_dir, "/var/lib/parcels");
        assert_eq!(config.storage.slot, "depot");
        assert!(config.store.rollback_on_storage_failure);
        assert_eq!(config.logging.level.as_deref(), Some("debug"));
        assert!(config.logging.json);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_missing_sections_use_defaults() {
        let config = AppConfig::from_toml_str("[storage]\ndata_dir = \"./data\"\n").unwrap();

        assert_eq!(config.storage.slot, DEFAULT_SLOT);
        assert!(!config.store.rollback_on_storage_failure);
        assert!(!config.logging.json);
    }

    #[test]
    fn test_env_var_substitution() {
        std::env::set_var("PARCELS_TEST_DATA_DIR", "/tmp/parcels-env");

        let config =
            AppConfig::from_toml_str("[storage]\ndata_dir = \"${PARCELS_TEST_DATA_DIR}\"\n").unwrap();
        assert_eq!(config.storage.data_dir, "/tmp/parcels-env");

        std::env::remove_var("PARCELS_TEST_DATA_DIR");
    }

    #[test]
    fn test_config_validation() {
        let bad_slot = AppConfig::from_toml_str("[storage]\nslot = \"../escape\"\n").unwrap();
        assert!(bad_slot.validate().is_err());

        let bad_level = AppConfig::from_toml_str("[logging]\nlevel = \"loud\"\n").unwrap();
        assert!(bad_level.validate().is_err());
    }

    #[test]
    fn test_invalid_toml_is_config_error() {
        let err = AppConfig::from_toml_str("[storage\n").unwrap_err();
        assert!(matches!(err, ParcelError::ConfigError { .. }));
    }

    #[test]
    fn test_overrides_win() {
        let mut config = AppConfig::from_toml_str("[storage]\nslot = \"depot\"\n").unwrap();
        config.apply_overrides(Some("./elsewhere".into()), None);

        assert_eq!(config.storage.data_dir, "./elsewhere");
        assert_eq!(config.storage.slot, "depot");
    }

    #[test]
    fn test_config_from_file() {
        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file
            .write_all(b"[storage]\nslot = \"from-file\"\n")
            .unwrap();

        let config = AppConfig::from_file(temp_file.path()).unwrap();
        assert_eq!(config.storage.slot, "from-file");
    }
}
