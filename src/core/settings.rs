use std::cmp::Ordering;
use std::collections::{BTreeSet, HashMap};

use log::debug;

use super::effects::SetEffect;
use super::storage::{MemoryStorage, SettingsStorage};
use super::validation::Validator;
use super::value::{SettingValue, ValueKind};
use crate::{Error, Result};

/// Heading placed above the list of configurable properties in `config` help.
pub const CONFIG_HELP_HEADING: &str =
    "Modifies vmctl configuration properties.\nConfigurable properties (enter as SUBCOMMAND): ";

const PREFLIGHT_PREFIXES: [&str; 2] = ["skip-", "warn-"];

/// Declaration of a configurable property.
#[derive(Debug, Clone)]
pub struct Setting {
    name: String,
    kind: ValueKind,
    default: SettingValue,
    validators: Vec<Validator>,
    effects: Vec<SetEffect>,
}

impl Setting {
    /// Start a declaration with no default, validators or effects.
    pub fn new(name: impl Into<String>, kind: ValueKind) -> Self {
        Self {
            name: name.into(),
            kind,
            default: SettingValue::Unset,
            validators: Vec::new(),
            effects: Vec::new(),
        }
    }

    pub fn with_default(mut self, default: impl Into<SettingValue>) -> Self {
        self.default = default.into();
        self
    }

    pub fn with_validators(mut self, validators: impl IntoIterator<Item = Validator>) -> Self {
        self.validators.extend(validators);
        self
    }

    pub fn with_effects(mut self, effects: impl IntoIterator<Item = SetEffect>) -> Self {
        self.effects.extend(effects);
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn kind(&self) -> ValueKind {
        self.kind
    }

    pub fn default_value(&self) -> &SettingValue {
        &self.default
    }

    pub fn validators(&self) -> &[Validator] {
        &self.validators
    }

    pub fn effects(&self) -> &[SetEffect] {
        &self.effects
    }
}

/// Handle returned by [`Settings::declare`].
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SettingHandle {
    name: String,
}

impl SettingHandle {
    pub fn name(&self) -> &str {
        &self.name
    }
}

/// Result of an accepted [`Settings::set`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SetOutcome {
    /// Value now stored for the setting.
    pub value: SettingValue,
    /// Advisory messages produced by the setting's effects, in declaration order.
    pub notices: Vec<String>,
}

/// Registry of configurable properties plus the storage holding their values.
///
/// Declarations happen once at startup; afterwards the registry is passed by
/// reference to whatever needs to read or change settings.
pub struct Settings {
    definitions: HashMap<String, Setting>,
    storage: Box<dyn SettingsStorage>,
}

impl Settings {
    pub fn new(storage: impl SettingsStorage + 'static) -> Self {
        Self {
            definitions: HashMap::new(),
            storage: Box::new(storage),
        }
    }

    pub fn in_memory() -> Self {
        Self::new(MemoryStorage::new())
    }

    /// Swap the backing store, keeping every declaration.
    pub fn set_storage(&mut self, storage: impl SettingsStorage + 'static) {
        self.storage = Box::new(storage);
    }

    /// Register a setting. Declaring the same name twice is an error.
    pub fn declare(&mut self, setting: Setting) -> Result<SettingHandle> {
        if self.definitions.contains_key(&setting.name) {
            return Err(Error::DuplicateSetting { name: setting.name });
        }
        debug!("declared setting `{}` ({})", setting.name, setting.kind.as_str());
        let handle = SettingHandle {
            name: setting.name.clone(),
        };
        self.definitions.insert(setting.name.clone(), setting);
        Ok(handle)
    }

    pub fn is_declared(&self, name: &str) -> bool {
        self.definitions.contains_key(name)
    }

    pub fn definition(&self, name: &str) -> Result<&Setting> {
        self.definitions.get(name).ok_or_else(|| not_found(name))
    }

    /// Validate `raw` and store it.
    ///
    /// Surrounding whitespace is dropped before validation. The first validator that rejects the value aborts the call; nothing is
    /// stored and no effect runs. Once stored, every effect runs in order and
    /// its notice is returned to the caller.
    pub fn set(&mut self, name: &str, raw: &str) -> Result<SetOutcome> {
        let setting = self.definitions.get(name).ok_or_else(|| not_found(name))?;
        let raw = raw.trim();

        let invalid = |reason: String| Error::Validation {
            name: name.to_string(),
            value: raw.to_string(),
            reason,
        };
        for validator in &setting.validators {
            validator.check(raw).map_err(invalid)?;
        }
        let value = setting.kind.parse(raw).map_err(invalid)?;

        self.storage.set(name, value.clone())?;
        debug!("stored setting `{name}` = `{value}`");

        let notices = setting
            .effects
            .iter()
            .filter_map(|effect| effect.apply(name, &value))
            .collect();

        Ok(SetOutcome { value, notices })
    }

    /// Current value of `name`, falling back to its declared default.
    ///
    /// A stored value of the wrong shape (say `"true"` for a boolean) is
    /// converted to the declared kind; one that cannot be converted is a
    /// validation error.
    pub fn get(&self, name: &str) -> Result<SettingValue> {
        let setting = self.definition(name)?;
        let Some(stored) = self.storage.get(name) else {
            return Ok(setting.default.clone());
        };
        let raw = stored.to_string();
        setting
            .kind
            .coerce(stored)
            .map_err(|reason| Error::Validation {
                name: name.to_string(),
                value: raw,
                reason,
            })
    }

    pub fn get_handle(&self, handle: &SettingHandle) -> Result<SettingValue> {
        self.get(&handle.name)
    }

    /// Whether `name` currently resolves to its declared default.
    pub fn is_default(&self, name: &str) -> Result<bool> {
        self.definition(name)?;
        Ok(self.storage.get(name).is_none())
    }

    /// Drop any stored value so `get` returns the default again.
    pub fn unset(&mut self, name: &str) -> Result<()> {
        self.definition(name)?;
        self.storage.unset(name)?;
        debug!("unset setting `{name}`");
        Ok(())
    }

    /// Every declared name.
    pub fn enumerate(&self) -> BTreeSet<&str> {
        self.definitions.keys().map(String::as_str).collect()
    }

    /// Declared names in presentation order. See [`compare_keys`].
    pub fn ordered_keys(&self) -> Vec<&str> {
        let mut keys: Vec<&str> = self.definitions.keys().map(String::as_str).collect();
        keys.sort_by(|lhs, rhs| compare_keys(lhs, rhs));
        keys
    }

    /// Declared settings that hold a stored value, in presentation order.
    ///
    /// Stored keys nobody declared are left out. Values are shown in their
    /// declared kind when they convert, and as stored otherwise.
    pub fn stored_values(&self) -> Vec<(&str, SettingValue)> {
        let mut stored: Vec<(&str, SettingValue)> = self
            .storage
            .keys()
            .iter()
            .filter_map(|key| {
                let (name, setting) = self.definitions.get_key_value(key.as_str())?;
                let value = self.storage.get(name)?;
                let value = setting.kind.coerce(value.clone()).unwrap_or(value);
                Some((name.as_str(), value))
            })
            .collect();
        stored.sort_by(|(lhs, _), (rhs, _)| compare_keys(lhs, rhs));
        stored
    }

    /// Bullet list of configurable properties, one per line.
    pub fn configurable_fields(&self) -> String {
        self.ordered_keys()
            .into_iter()
            .map(|key| format!(" * {key}"))
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// Long help text for the `config` command.
    pub fn config_help(&self) -> String {
        format!("{CONFIG_HELP_HEADING}\n\n{}", self.configurable_fields())
    }
}

fn not_found(name: &str) -> Error {
    Error::NotFound {
        name: name.to_string(),
    }
}

/// Whether `key` overrides a preflight check (`skip-` or `warn-` prefix).
pub fn is_preflight_key(key: &str) -> bool {
    PREFLIGHT_PREFIXES
        .iter()
        .any(|prefix| key.starts_with(prefix))
}

/// Presentation order for setting names.
///
/// Plain keys come first in lexicographic order. Preflight keys follow,
/// ordered by the name of the check they refer to so that `skip-X` and
/// `warn-X` stay adjacent, with `skip-` first.
pub fn compare_keys(lhs: &str, rhs: &str) -> Ordering {
    match (is_preflight_key(lhs), is_preflight_key(rhs)) {
        (true, true) => lhs[4..].cmp(&rhs[4..]).then_with(|| lhs.cmp(rhs)),
        (true, false) => Ordering::Greater,
        (false, true) => Ordering::Less,
        (false, false) => lhs.cmp(rhs),
    }
}
