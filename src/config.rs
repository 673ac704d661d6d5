use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use log::debug;

use crate::core::storage::SettingsStorage;
use crate::core::value::SettingValue;
use crate::error::{Error, Result};

/// Environment variable overriding the configuration file location.
pub const CONFIG_ENV_VAR: &str = "VMCTL_CONFIG";
/// Location of the configuration file relative to the user's home.
pub const DEFAULT_CONFIG_SUBPATH: &str = ".vmctl/config.toml";

/// Resolve the configuration file: explicit path, then `VMCTL_CONFIG`, then
/// `~/.vmctl/config.toml`.
pub fn resolve_config_path(explicit: Option<&Path>) -> Result<PathBuf> {
    if let Some(path) = explicit {
        return Ok(path.to_path_buf());
    }
    if let Some(path) = std::env::var_os(CONFIG_ENV_VAR).filter(|value| !value.is_empty()) {
        return Ok(PathBuf::from(path));
    }
    user_home_dir()
        .map(|home| home.join(DEFAULT_CONFIG_SUBPATH))
        .ok_or(Error::HomeDirectoryUnavailable)
}

fn user_home_dir() -> Option<PathBuf> {
    if let Some(home) = std::env::var_os("HOME") {
        if !home.is_empty() {
            return Some(PathBuf::from(home));
        }
    }

    #[cfg(windows)]
    {
        if let Some(profile) = std::env::var_os("USERPROFILE") {
            if !profile.is_empty() {
                return Some(PathBuf::from(profile));
            }
        }
    }

    None
}

/// Setting values kept in a flat TOML table.
///
/// Every change is written back immediately; a missing file reads as empty.
#[derive(Debug, Clone)]
pub struct FileStorage {
    path: PathBuf,
    values: BTreeMap<String, toml::Value>,
}

impl FileStorage {
    pub fn open(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        let values = if path.exists() {
            load_table(&path)?
        } else {
            debug!("no configuration at {}; starting empty", path.display());
            BTreeMap::new()
        };
        Ok(Self { path, values })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn persist(&self, values: &BTreeMap<String, toml::Value>) -> Result<()> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|source| Error::WriteConfig {
                path: parent.to_path_buf(),
                source,
            })?;
        }
        let contents =
            toml::to_string(values).map_err(|source| Error::SerializeConfig { source })?;
        fs::write(&self.path, contents).map_err(|source| Error::WriteConfig {
            path: self.path.clone(),
            source,
        })?;
        debug!("wrote configuration to {}", self.path.display());
        Ok(())
    }

    /// Write `values` to disk and adopt them only once the write succeeded.
    fn commit(&mut self, values: BTreeMap<String, toml::Value>) -> Result<()> {
        self.persist(&values)?;
        self.values = values;
        Ok(())
    }
}

impl SettingsStorage for FileStorage {
    fn get(&self, key: &str) -> Option<SettingValue> {
        self.values.get(key).map(from_toml)
    }

    fn set(&mut self, key: &str, value: SettingValue) -> Result<()> {
        let mut values = self.values.clone();
        match to_toml(value) {
            Some(value) => {
                values.insert(key.to_string(), value);
            }
            None => {
                values.remove(key);
            }
        }
        self.commit(values)
    }

    fn unset(&mut self, key: &str) -> Result<()> {
        if !self.values.contains_key(key) {
            return Ok(());
        }
        let mut values = self.values.clone();
        values.remove(key);
        self.commit(values)
    }

    fn keys(&self) -> Vec<String> {
        self.values.keys().cloned().collect()
    }
}

fn load_table(path: &Path) -> Result<BTreeMap<String, toml::Value>> {
    let contents = fs::read_to_string(path).map_err(|source| Error::ReadConfig {
        path: path.to_path_buf(),
        source,
    })?;
    toml::from_str(&contents).map_err(|source| Error::ParseConfig {
        path: path.to_path_buf(),
        source,
    })
}

fn to_toml(value: SettingValue) -> Option<toml::Value> {
    match value {
        SettingValue::Unset => None,
        SettingValue::Bool(value) => Some(toml::Value::Boolean(value)),
        SettingValue::Integer(value) => Some(toml::Value::Integer(value)),
        SettingValue::Text(value) => Some(toml::Value::String(value)),
    }
}

fn from_toml(value: &toml::Value) -> SettingValue {
    match value {
        toml::Value::Boolean(value) => SettingValue::Bool(*value),
        toml::Value::Integer(value) => SettingValue::Integer(*value),
        toml::Value::String(value) => SettingValue::Text(value.clone()),
        other => SettingValue::Text(other.to_string()),
    }
}
