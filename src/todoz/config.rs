use crate::error::{Result, TodozError};
use crate::model::FilterMode;
use crate::persist::DEFAULT_KEY;
use crate::store::validate_key;
use serde::{Deserialize, Deserializer, Serialize};
use std::fs;
use std::path::Path;

const CONFIG_FILENAME: &str = "config.json";

/// Keys accepted by [`TodozConfig::get`] and [`TodozConfig::set`].
pub const CONFIG_KEYS: &[&str] = &["storage-key", "default-filter"];

/// Configuration for todoz, stored as config.json in the data directory
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TodozConfig {
    /// Slot holding the todo list (becomes `<key>.json`)
    #[serde(default = "default_storage_key")]
    pub storage_key: String,

    /// Filter used by `list` when none is given
    #[serde(default, deserialize_with = "lenient_filter")]
    pub default_filter: FilterMode,
}

fn default_storage_key() -> String {
    DEFAULT_KEY.to_string()
}

/// Reads `default_filter` through `FromStr`, so an unknown value degrades to `All`
/// instead of failing the whole file.
fn lenient_filter<'de, D>(deserializer: D) -> std::result::Result<FilterMode, D::Error>
where
    D: Deserializer<'de>,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(value
        .as_str()
        .and_then(|s| s.parse::<FilterMode>().ok())
        .unwrap_or_default())
}

impl Default for TodozConfig {
    fn default() -> Self {
        Self {
            storage_key: default_storage_key(),
            default_filter: FilterMode::All,
        }
    }
}

impl TodozConfig {
    /// Load config from the given directory, or return defaults if not found
    pub fn load<P: AsRef<Path>>(config_dir: P) -> Result<Self> {
        let config_path = config_dir.as_ref().join(CONFIG_FILENAME);

        if !config_path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(&config_path).map_err(TodozError::Io)?;
        let config: TodozConfig =
            serde_json::from_str(&content).map_err(TodozError::Serialization)?;
        validate_key(&config.storage_key)?;
        Ok(config)
    }

    /// Save config to the given directory
    pub fn save<P: AsRef<Path>>(&self, config_dir: P) -> Result<()> {
        let config_dir = config_dir.as_ref();

        if !config_dir.exists() {
            fs::create_dir_all(config_dir).map_err(TodozError::Io)?;
        }

        let config_path = config_dir.join(CONFIG_FILENAME);
        let content = serde_json::to_string_pretty(self).map_err(TodozError::Serialization)?;
        fs::write(config_path, content).map_err(TodozError::Io)?;
        Ok(())
    }

    pub fn get(&self, key: &str) -> Option<String> {
        match key {
            "storage-key" => Some(self.storage_key.clone()),
            "default-filter" => Some(self.default_filter.to_string()),
            _ => None,
        }
    }

    pub fn set(&mut self, key: &str, value: &str) -> Result<()> {
        match key {
            "storage-key" => {
                validate_key(value)?;
                self.storage_key = value.to_string();
            }
            "default-filter" => {
                let mode: FilterMode = value.parse().unwrap_or_default();
                if mode.as_str() != value.trim().to_ascii_lowercase() {
                    return Err(TodozError::Config(format!(
                        "Unknown filter {:?} (expected all, active or completed)",
                        value
                    )));
                }
                self.default_filter = mode;
            }
            other => {
                return Err(TodozError::Config(format!(
                    "Unknown config key: {}",
                    other
                )))
            }
        }
        Ok(())
    }
}
