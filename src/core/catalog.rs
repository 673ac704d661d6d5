//! Built-in settings understood by `vmctl`.

use super::effects::{Resource, SetEffect};
use super::settings::{Setting, SettingHandle, Settings};
use super::validation::Validator;
use super::value::ValueKind;
use crate::Result;

pub const DEFAULT_CPUS: i64 = 4;
/// Default instance memory in MiB.
pub const DEFAULT_MEMORY: i64 = 9216;

/// Handles for every built-in setting.
#[derive(Debug, Clone)]
pub struct Catalog {
    pub bundle: SettingHandle,
    pub cpus: SettingHandle,
    pub memory: SettingHandle,
    pub nameserver: SettingHandle,
    pub pull_secret_file: SettingHandle,
    pub disable_update_check: SettingHandle,
    pub experimental_features: SettingHandle,
    pub consent_telemetry: SettingHandle,
    pub http_proxy: SettingHandle,
    pub https_proxy: SettingHandle,
    pub no_proxy: SettingHandle,
    pub proxy_ca_file: SettingHandle,
}

impl Catalog {
    /// Declare the built-in settings on `settings`.
    pub fn register(settings: &mut Settings) -> Result<Self> {
        let applied = [SetEffect::SuccessfullyApplied];

        // start command
        let bundle = settings.declare(
            Setting::new("bundle", ValueKind::Text)
                .with_validators([Validator::Bundle])
                .with_effects(applied),
        )?;
        let cpus = settings.declare(
            Setting::new("cpus", ValueKind::Integer)
                .with_default(DEFAULT_CPUS)
                .with_validators([Validator::MinInteger(DEFAULT_CPUS)])
                .with_effects([
                    SetEffect::RequiresRestart,
                    SetEffect::HostCapacity(Resource::Cpus),
                ]),
        )?;
        let memory = settings.declare(
            Setting::new("memory", ValueKind::Integer)
                .with_default(DEFAULT_MEMORY)
                .with_validators([Validator::MinInteger(DEFAULT_MEMORY)])
                .with_effects([
                    SetEffect::RequiresRestart,
                    SetEffect::HostCapacity(Resource::MemoryMib),
                ]),
        )?;
        let nameserver = settings.declare(
            Setting::new("nameserver", ValueKind::Text)
                .with_validators([Validator::IpAddress])
                .with_effects(applied),
        )?;
        let pull_secret_file = settings.declare(
            Setting::new("pull-secret-file", ValueKind::Text)
                .with_validators([Validator::ExistingPath])
                .with_effects(applied),
        )?;

        let disable_update_check = settings.declare(bool_setting("disable-update-check"))?;
        let experimental_features =
            settings.declare(bool_setting("enable-experimental-features"))?;
        let consent_telemetry = settings.declare(
            Setting::new("consent-telemetry", ValueKind::Text)
                .with_validators([Validator::OneOf(&["yes", "no"])])
                .with_effects(applied),
        )?;

        // proxy
        let http_proxy = settings.declare(
            Setting::new("http-proxy", ValueKind::Text)
                .with_validators([Validator::Uri])
                .with_effects(applied),
        )?;
        let https_proxy = settings.declare(
            Setting::new("https-proxy", ValueKind::Text)
                .with_validators([Validator::Uri])
                .with_effects(applied),
        )?;
        let no_proxy = settings.declare(
            Setting::new("no-proxy", ValueKind::Text)
                .with_validators([Validator::NoProxy])
                .with_effects(applied),
        )?;
        let proxy_ca_file = settings.declare(
            Setting::new("proxy-ca-file", ValueKind::Text)
                .with_validators([Validator::ExistingPath])
                .with_effects(applied),
        )?;

        Ok(Self {
            bundle,
            cpus,
            memory,
            nameserver,
            pull_secret_file,
            disable_update_check,
            experimental_features,
            consent_telemetry,
            http_proxy,
            https_proxy,
            no_proxy,
            proxy_ca_file,
        })
    }
}

pub(crate) fn bool_setting(name: impl Into<String>) -> Setting {
    Setting::new(name, ValueKind::Bool)
        .with_validators([Validator::Bool])
        .with_effects([SetEffect::SuccessfullyApplied])
}
