//! User overrides for host preflight checks.
//!
//! Each check contributes a `skip-<check>` and a `warn-<check>` boolean.

use super::catalog::bool_setting;
use super::settings::Settings;
use crate::Result;

/// Host check that can be skipped or downgraded to a warning.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PreflightCheck {
    /// Suffix of the `skip-`/`warn-` setting names.
    pub config_key_suffix: &'static str,
}

impl PreflightCheck {
    pub fn skip_key(&self) -> String {
        format!("skip-{}", self.config_key_suffix)
    }

    pub fn warn_key(&self) -> String {
        format!("warn-{}", self.config_key_suffix)
    }
}

pub const PREFLIGHT_CHECKS: &[PreflightCheck] = &[
    PreflightCheck {
        config_key_suffix: "check-root-user",
    },
    PreflightCheck {
        config_key_suffix: "check-virt-enabled",
    },
    PreflightCheck {
        config_key_suffix: "check-kvm-enabled",
    },
    PreflightCheck {
        config_key_suffix: "check-libvirt-installed",
    },
    PreflightCheck {
        config_key_suffix: "check-ram",
    },
    PreflightCheck {
        config_key_suffix: "check-bundle-extracted",
    },
    PreflightCheck {
        config_key_suffix: "check-network-manager-running",
    },
];

/// How a preflight check should be treated for the current configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PreflightPolicy {
    Enforce,
    Warn,
    Skip,
}

/// Declare the `skip-`/`warn-` pair for every check in `checks`.
pub fn register(settings: &mut Settings, checks: &[PreflightCheck]) -> Result<()> {
    for check in checks {
        settings.declare(bool_setting(check.skip_key()).with_default(false))?;
        settings.declare(bool_setting(check.warn_key()).with_default(false))?;
    }
    Ok(())
}

/// Resolve the policy for `check`. A skip override wins over a warn override.
pub fn policy(settings: &Settings, check: &PreflightCheck) -> Result<PreflightPolicy> {
    if enabled(settings, &check.skip_key())? {
        return Ok(PreflightPolicy::Skip);
    }
    if enabled(settings, &check.warn_key())? {
        return Ok(PreflightPolicy::Warn);
    }
    Ok(PreflightPolicy::Enforce)
}

fn enabled(settings: &Settings, key: &str) -> Result<bool> {
    Ok(settings.get(key)?.as_bool().unwrap_or(false))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Error;

    const RAM: PreflightCheck = PreflightCheck {
        config_key_suffix: "check-ram",
    };

    #[test]
    fn register_declares_skip_and_warn_pairs() {
        let mut settings = Settings::in_memory();
        register(&mut settings, PREFLIGHT_CHECKS).expect("register");
        assert_eq!(settings.enumerate().len(), PREFLIGHT_CHECKS.len() * 2);

        let keys = settings.ordered_keys();
        let skip = keys.iter().position(|k| *k == "skip-check-ram").unwrap();
        assert_eq!(keys[skip + 1], "warn-check-ram");
    }

    #[test]
    fn policy_prefers_skip_over_warn() {
        let mut settings = Settings::in_memory();
        register(&mut settings, &[RAM]).expect("register");
        assert_eq!(policy(&settings, &RAM).unwrap(), PreflightPolicy::Enforce);

        settings.set("warn-check-ram", "true").unwrap();
        assert_eq!(policy(&settings, &RAM).unwrap(), PreflightPolicy::Warn);

        settings.set("skip-check-ram", "true").unwrap();
        assert_eq!(policy(&settings, &RAM).unwrap(), PreflightPolicy::Skip);
    }

    #[test]
    fn policy_for_unregistered_check_is_not_found() {
        let settings = Settings::in_memory();
        assert!(matches!(
            policy(&settings, &RAM),
            Err(Error::NotFound { .. })
        ));
    }
}
