use std::collections::BTreeMap;

use super::value::SettingValue;

/// Backing store for setting values.
///
/// The registry only decides which values are acceptable; where and how they
/// are kept belongs to the implementation of this trait.
pub trait SettingsStorage {
    /// Stored value for `key`, if any.
    fn get(&self, key: &str) -> Option<SettingValue>;
    /// Persist `value` under `key`.
    fn set(&mut self, key: &str, value: SettingValue) -> crate::Result<()>;
    /// Forget any stored value for `key`.
    fn unset(&mut self, key: &str) -> crate::Result<()>;
    /// Every key holding a stored value.
    fn keys(&self) -> Vec<String>;
}

/// Process-local storage; values live as long as the registry.
#[derive(Debug, Default, Clone)]
pub struct MemoryStorage {
    values: BTreeMap<String, SettingValue>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }
}

impl SettingsStorage for MemoryStorage {
    fn get(&self, key: &str) -> Option<SettingValue> {
        self.values.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: SettingValue) -> crate::Result<()> {
        self.values.insert(key.to_string(), value);
        Ok(())
    }

    fn unset(&mut self, key: &str) -> crate::Result<()> {
        self.values.remove(key);
        Ok(())
    }

    fn keys(&self) -> Vec<String> {
        self.values.keys().cloned().collect()
    }
}
