use std::path::PathBuf;

use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    #[error("Configuration property '{name}' does not exist")]
    NotFound { name: String },
    #[error("Value '{value}' for configuration property '{name}' is invalid, reason: {reason}")]
    Validation {
        name: String,
        value: String,
        reason: String,
    },
    #[error("Configuration property '{name}' is declared more than once")]
    DuplicateSetting { name: String },
    #[error("Failed to read configuration file at {path}: {source}")]
    ReadConfig {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Configuration at {path} could not be parsed: {source}")]
    ParseConfig {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
    #[error("Failed to write configuration file at {path}: {source}")]
    WriteConfig {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Configuration could not be serialized: {source}")]
    SerializeConfig {
        #[source]
        source: toml::ser::Error,
    },
    #[error("Failed to render output: {source}")]
    RenderOutput {
        #[source]
        source: serde_json::Error,
    },
    #[error(
        "Unable to determine the home directory (HOME not set or empty). \
         Provide a path with --config or VMCTL_CONFIG."
    )]
    HomeDirectoryUnavailable,
}
