pub mod models;

use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use strum_macros::{AsRefStr, Display, EnumIter as EnumIterDerive, EnumString};

use crate::config::models::{
    ConfigItem, FileLoggingConfigItem, MinFreeMinutesConfigItem, OverlapPolicyConfigItem,
    TaskListOrderConfigItem,
};
use crate::core::types::{OverlapPolicy, TaskListOrder};
use crate::errors::{Error, Result};
use crate::extensions::enums::valid_csv;

#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIterDerive, EnumString, Display, AsRefStr)]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE", ascii_case_insensitive)]
pub enum ConfigKey {
    MinFreeMinutes,
    OverlapPolicy,
    TaskListOrder,
    FileLoggingEnabled,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ConfigFile {
    #[serde(default)]
    pub min_free_minutes: MinFreeMinutesConfigItem,
    #[serde(default)]
    pub overlap_policy: OverlapPolicyConfigItem,
    #[serde(default)]
    pub task_list_order: TaskListOrderConfigItem,
    #[serde(default)]
    pub file_logging_enabled: FileLoggingConfigItem,
}

impl ConfigFile {
    /// Re-applies each item's `set_value` check to values read from disk.
    /// Enum-valued items are already checked by serde.
    fn validate(&self, path: &Path) -> Result<()> {
        let mut min_free = self.min_free_minutes.clone();
        min_free
            .set_value(&self.min_free_minutes.value.to_string())
            .map_err(|e| {
                Error::config(format!(
                    "Invalid {} in '{}': {}",
                    ConfigKey::MinFreeMinutes,
                    path.display(),
                    e
                ))
            })
    }
}

/// `(key, old value, new value)` of the last successful edit.
pub type ConfigChange = (String, String, String);

#[derive(Debug, Clone)]
pub struct Config {
    path: PathBuf,
    data: ConfigFile,
    pub last_change: Option<ConfigChange>,
}

impl Config {
    pub fn load_from<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        if !path.exists() {
            return Err(Error::config(format!(
                "Configuration file '{}' not found.",
                path.display()
            )));
        }
        let text = fs::read_to_string(&path)
            .map_err(|e| Error::config(format!("Failed to read {}: {}", path.display(), e)))?;
        let data: ConfigFile = serde_json::from_str(&text)
            .map_err(|e| Error::config(format!("Invalid JSON in '{}': {}", path.display(), e)))?;
        data.validate(&path)?;
        Ok(Self {
            path,
            data,
            last_change: None,
        })
    }

    /// Writes a config file holding every default and returns it.
    pub fn create_default<P: AsRef<Path>>(path: P) -> Result<Self> {
        let config = Self {
            path: path.as_ref().to_path_buf(),
            data: ConfigFile::default(),
            last_change: None,
        };
        if let Some(parent) = config.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        config.save()?;
        Ok(config)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn view(&self) -> &ConfigFile {
        &self.data
    }

    pub fn min_free_minutes(&self) -> u32 {
        *self.data.min_free_minutes.get_value()
    }
    pub fn overlap_policy(&self) -> OverlapPolicy {
        *self.data.overlap_policy.get_value()
    }
    pub fn task_list_order(&self) -> TaskListOrder {
        *self.data.task_list_order.get_value()
    }
    pub fn file_logging_enabled(&self) -> bool {
        self.data.file_logging_enabled.get_value().0
    }

    pub fn description(&self, key: ConfigKey) -> &str {
        match key {
            ConfigKey::MinFreeMinutes => self.data.min_free_minutes.description(),
            ConfigKey::OverlapPolicy => self.data.overlap_policy.description(),
            ConfigKey::TaskListOrder => self.data.task_list_order.description(),
            ConfigKey::FileLoggingEnabled => self.data.file_logging_enabled.description(),
        }
    }

    pub fn value_string(&self, key: ConfigKey) -> String {
        match key {
            ConfigKey::MinFreeMinutes => self.min_free_minutes().to_string(),
            ConfigKey::OverlapPolicy => self.overlap_policy().to_string(),
            ConfigKey::TaskListOrder => self.task_list_order().to_string(),
            ConfigKey::FileLoggingEnabled => {
                self.data.file_logging_enabled.get_value().to_string()
            }
        }
    }

    pub fn set(&mut self, key_str: &str, new_value: &str) -> Result<()> {
        let key = ConfigKey::from_str(key_str.trim()).map_err(|_| {
            Error::config(format!(
                "Unknown configuration key '{}'. Valid keys: {}",
                key_str,
                valid_csv::<ConfigKey>()
            ))
        })?;
        self.set_key(key, new_value)
    }

    /// Validates and applies one value, then writes the file back.
    pub fn set_key(&mut self, key: ConfigKey, new_value: &str) -> Result<()> {
        let old = self.value_string(key);
        self.edit(|cfg| match key {
            ConfigKey::MinFreeMinutes => cfg.min_free_minutes.set_value(new_value),
            ConfigKey::OverlapPolicy => cfg.overlap_policy.set_value(new_value),
            ConfigKey::TaskListOrder => cfg.task_list_order.set_value(new_value),
            ConfigKey::FileLoggingEnabled => cfg.file_logging_enabled.set_value(new_value),
        })?;
        // stash for caller to log
        self.last_change = Some((key.to_string(), old, self.value_string(key)));
        Ok(())
    }

    pub fn take_last_change(&mut self) -> Option<ConfigChange> {
        self.last_change.take()
    }

    fn edit<F>(&mut self, f: F) -> Result<()>
    where
        F: FnOnce(&mut ConfigFile) -> Result<()>,
    {
        let mut draft = self.data.clone();
        f(&mut draft)?;
        self.data = draft;
        self.save()
    }

    fn save(&self) -> Result<()> {
        let json = serde_json::to_string_pretty(&self.data)
            .map_err(|e| Error::config(format!("Failed to encode config: {}", e)))?;
        fs::write(&self.path, json)
            .map_err(|e| Error::config(format!("Failed to write {}: {}", self.path.display(), e)))
    }
}
