use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Command, FromArgMatches, error::ErrorKind};
use log::debug;

use vmctl::app::{self, logging};
use vmctl::cli::{self, Cli, Commands, ConfigArgs};
use vmctl::core::{MemoryStorage, Settings, default_settings};
use vmctl::{FileStorage, Result, resolve_config_path};

fn main() -> ExitCode {
    let (mut settings, _catalog) = match default_settings(MemoryStorage::new()) {
        Ok(declared) => declared,
        Err(err) => {
            eprintln!("Error: {err}");
            return app::exit_code(&err);
        }
    };

    let mut command = cli::command_with_settings_help(&settings);
    let cli = match command
        .try_get_matches_from_mut(std::env::args_os())
        .and_then(|matches| Cli::from_arg_matches(&matches))
    {
        Ok(cli) => cli,
        Err(err) => {
            let _ = err.print();
            return match err.kind() {
                ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => ExitCode::SUCCESS,
                _ => ExitCode::from(64),
            };
        }
    };

    let Cli {
        config,
        verbose,
        command: subcommand,
    } = cli;

    if let Err(err) = logging::init(verbose) {
        eprintln!("Warning: logging unavailable: {err}");
    }

    let Some(subcommand) = subcommand else {
        let _ = command.print_help();
        println!();
        return ExitCode::from(64);
    };

    let exit = match subcommand {
        Commands::Config(args) => run_config(args, config.as_ref(), &mut settings, &mut command),
    };

    match exit {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("Error: {err}");
            app::exit_code(&err)
        }
    }
}

fn run_config(
    args: ConfigArgs,
    config_override: Option<&PathBuf>,
    settings: &mut Settings,
    command: &mut Command,
) -> Result<()> {
    let Some(config_command) = args.command else {
        if let Some(config) = command.find_subcommand_mut("config") {
            let _ = config.print_long_help();
        }
        return Ok(());
    };

    let path = resolve_config_path(config_override.map(PathBuf::as_path))?;
    debug!("using configuration at {}", path.display());
    settings.set_storage(FileStorage::open(path)?);

    let output = app::handle_config(config_command, settings)?;
    if !output.is_empty() {
        println!("{output}");
    }
    Ok(())
}
