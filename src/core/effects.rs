use sysinfo::System;

use super::value::SettingValue;

/// Host resource checked by [`SetEffect::HostCapacity`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resource {
    Cpus,
    /// Memory expressed in MiB.
    MemoryMib,
}

/// Side effect run after a value has been accepted and stored.
///
/// Effects produce advisory notices for the user; they never reject or revert
/// a value.
#[derive(Debug, Clone, Copy)]
pub enum SetEffect {
    SuccessfullyApplied,
    RequiresRestart,
    HostCapacity(Resource),
    Custom(fn(&str, &SettingValue) -> Option<String>),
}

impl SetEffect {
    pub fn apply(&self, name: &str, value: &SettingValue) -> Option<String> {
        match self {
            SetEffect::SuccessfullyApplied => {
                Some(format!("Successfully configured {name} to {value}"))
            }
            SetEffect::RequiresRestart => Some(format!(
                "Changes to configuration property '{name}' are only applied when the instance is started.\n\
                 If the instance is already running, restart it for the change to take effect."
            )),
            SetEffect::HostCapacity(resource) => {
                let requested = value.as_integer()?;
                capacity_notice(*resource, requested, host_capacity(*resource))
            }
            SetEffect::Custom(effect) => effect(name, value),
        }
    }
}

fn host_capacity(resource: Resource) -> Option<u64> {
    let mut system = System::new();
    match resource {
        Resource::Cpus => {
            system.refresh_cpu();
            let cpus = system.cpus().len() as u64;
            (cpus > 0).then_some(cpus)
        }
        Resource::MemoryMib => {
            system.refresh_memory();
            let mib = system.total_memory() / (1024 * 1024);
            (mib > 0).then_some(mib)
        }
    }
}

pub(crate) fn capacity_notice(
    resource: Resource,
    requested: i64,
    host: Option<u64>,
) -> Option<String> {
    let Some(host) = host else {
        return Some("Unable to determine host capacity; skipping resource check.".to_string());
    };
    let requested = u64::try_from(requested).ok()?;
    if requested <= host {
        return None;
    }
    Some(match resource {
        Resource::Cpus => {
            format!("Requested {requested} vCPUs but host has {host} hardware threads.")
        }
        Resource::MemoryMib => {
            format!("Requested {requested} MiB of memory but host has {host} MiB.")
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn successfully_applied_names_setting_and_value() {
        let notice = SetEffect::SuccessfullyApplied
            .apply("nameserver", &SettingValue::from("10.0.0.1"))
            .expect("notice");
        assert_eq!(notice, "Successfully configured nameserver to 10.0.0.1");
    }

    #[test]
    fn requires_restart_mentions_property() {
        let notice = SetEffect::RequiresRestart
            .apply("cpus", &SettingValue::Integer(6))
            .expect("notice");
        assert!(notice.contains("'cpus'"));
        assert!(notice.contains("restart"));
    }

    #[test]
    fn capacity_notice_only_when_request_exceeds_host() {
        assert_eq!(capacity_notice(Resource::Cpus, 4, Some(8)), None);
        assert_eq!(
            capacity_notice(Resource::Cpus, 16, Some(8)).as_deref(),
            Some("Requested 16 vCPUs but host has 8 hardware threads.")
        );
        assert_eq!(
            capacity_notice(Resource::MemoryMib, 32768, Some(16384)).as_deref(),
            Some("Requested 32768 MiB of memory but host has 16384 MiB.")
        );
        assert!(capacity_notice(Resource::MemoryMib, 1, None).is_some());
    }

    #[test]
    fn host_capacity_ignores_non_integer_values() {
        let effect = SetEffect::HostCapacity(Resource::Cpus);
        assert_eq!(effect.apply("cpus", &SettingValue::Unset), None);
    }
}
