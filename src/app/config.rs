use std::collections::BTreeMap;

use crate::cli::{ConfigCommand, OutputFormat};
use crate::core::{SettingValue, Settings};
use crate::{Error, Result};

/// Run a `config` subcommand and return the text to print.
pub fn handle_config(command: ConfigCommand, settings: &mut Settings) -> Result<String> {
    match command {
        ConfigCommand::Set(args) => {
            let outcome = settings.set(&args.key, &args.value)?;
            Ok(outcome.notices.join("\n"))
        }
        ConfigCommand::Get(args) => render_get(settings, &args.key),
        ConfigCommand::Unset(args) => {
            settings.unset(&args.key)?;
            Ok(format!(
                "Successfully unset configuration property '{}'",
                args.key
            ))
        }
        ConfigCommand::View(args) => render_view(settings, args.format),
    }
}

fn render_get(settings: &Settings, key: &str) -> Result<String> {
    let value = settings.get(key)?;
    if !settings.is_default(key)? {
        return Ok(value.to_string());
    }
    if value.is_unset() {
        return Ok(format!(
            "Configuration property '{key}' is not set and has no default value"
        ));
    }
    Ok(format!(
        "Configuration property '{key}' is not set. Default value '{value}' is used"
    ))
}

fn render_view(settings: &Settings, format: OutputFormat) -> Result<String> {
    let values = settings.stored_values();
    match format {
        OutputFormat::Text => Ok(values
            .iter()
            .map(|(key, value)| format!("- {key:<38}: {value}"))
            .collect::<Vec<_>>()
            .join("\n")),
        OutputFormat::Json => {
            let map: BTreeMap<&str, SettingValue> = values.into_iter().collect();
            serde_json::to_string_pretty(&map).map_err(|source| Error::RenderOutput { source })
        }
    }
}
