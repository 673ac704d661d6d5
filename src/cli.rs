use std::path::PathBuf;

use clap::{ArgAction, Args, CommandFactory, Parser, Subcommand, ValueEnum};

use crate::core::Settings;

const VERSION: &str = env!("VMCTL_VERSION");

/// Top-level CLI definition for the `vmctl` tool.
#[derive(Debug, Parser)]
#[command(
    name = "vmctl",
    version = VERSION,
    about = "Manage a local single-node cluster virtual machine.",
    long_about = "vmctl manages the virtual machine that hosts a local single-node cluster.\n\
                  Use `vmctl config` to inspect and change the settings used when the machine starts."
)]
pub struct Cli {
    /// Path to the configuration file. Defaults to $VMCTL_CONFIG or ~/.vmctl/config.toml.
    #[arg(
        global = true,
        short,
        long = "config",
        value_name = "PATH",
        help = "Read and write settings at PATH instead of $VMCTL_CONFIG or ~/.vmctl/config.toml"
    )]
    pub config: Option<PathBuf>,

    /// Increase log verbosity.
    #[arg(
        global = true,
        short,
        long,
        action = ArgAction::Count,
        help = "Increase log verbosity (-v info, -vv debug, -vvv trace)"
    )]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Modify vmctl configuration.
    #[command(override_usage = "vmctl config SUBCOMMAND [flags]")]
    Config(ConfigArgs),
}

#[derive(Debug, Args, Default)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: Option<ConfigCommand>,
}

#[derive(Debug, Subcommand)]
pub enum ConfigCommand {
    /// Set a vmctl configuration property.
    Set(SetArgs),
    /// Get the value of a configuration property.
    Get(KeyArgs),
    /// Unset a configuration property, restoring its default.
    Unset(KeyArgs),
    /// Display all assigned configuration properties.
    View(ViewArgs),
}

#[derive(Debug, Args)]
pub struct SetArgs {
    #[arg(value_name = "KEY")]
    pub key: String,
    #[arg(value_name = "VALUE")]
    pub value: String,
}

#[derive(Debug, Args)]
pub struct KeyArgs {
    #[arg(value_name = "KEY")]
    pub key: String,
}

#[derive(Debug, Args, Default)]
pub struct ViewArgs {
    #[arg(
        long,
        short = 'o',
        value_enum,
        default_value_t = OutputFormat::Text,
        help = "Render assigned properties as text or JSON"
    )]
    pub format: OutputFormat,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

/// Build the clap command with the `config` long help listing every
/// configurable property declared on `settings`.
pub fn command_with_settings_help(settings: &Settings) -> clap::Command {
    Cli::command().mut_subcommand("config", |config| config.long_about(settings.config_help()))
}
