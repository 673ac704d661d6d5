//! Core vmctl library API surface.

pub mod catalog;
pub mod effects;
pub mod machine;
pub mod preflight;
pub mod results;
pub mod settings;
pub mod storage;
pub mod validation;
pub mod value;

pub use catalog::Catalog;
pub use effects::{Resource, SetEffect};
pub use machine::{Machine, MachineDriver};
pub use preflight::{PREFLIGHT_CHECKS, PreflightCheck, PreflightPolicy};
pub use results::{
    BoxError, ClusterStatusResult, ConsoleResult, DeleteResult, ErrorSink, IpResult, LogSink,
    OperationError, OperationResult, PowerOffResult, ResultReporter, StartResult, StopResult,
};
pub use settings::{SetOutcome, Setting, SettingHandle, Settings, compare_keys, is_preflight_key};
pub use storage::{MemoryStorage, SettingsStorage};
pub use validation::Validator;
pub use value::{SettingValue, ValueKind};

/// Registry holding the built-in catalog and every preflight override.
pub fn default_settings(
    storage: impl SettingsStorage + 'static,
) -> crate::Result<(Settings, Catalog)> {
    let mut settings = Settings::new(storage);
    let catalog = Catalog::register(&mut settings)?;
    preflight::register(&mut settings, PREFLIGHT_CHECKS)?;
    Ok((settings, catalog))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_help_lists_plain_keys_before_preflight_pairs() {
        let (settings, _) = default_settings(MemoryStorage::new()).expect("default settings");
        let keys = settings.ordered_keys();
        let first_preflight = keys
            .iter()
            .position(|key| is_preflight_key(key))
            .expect("preflight keys present");
        assert!(keys[..first_preflight].iter().all(|key| !is_preflight_key(key)));
        assert!(keys[first_preflight..].iter().all(|key| is_preflight_key(key)));
        assert_eq!(keys[0], "bundle");
        assert_eq!(keys[first_preflight], "skip-check-bundle-extracted");
        assert_eq!(keys[first_preflight + 1], "warn-check-bundle-extracted");
    }
}
