use std::process::ExitCode;

use crate::Error;

pub fn exit_code(err: &Error) -> ExitCode {
    match err {
        Error::NotFound { .. } => ExitCode::from(64),
        Error::Validation { .. } => ExitCode::from(65),
        Error::DuplicateSetting { .. } => ExitCode::from(70),
        Error::ReadConfig { .. } => ExitCode::from(74),
        Error::ParseConfig { .. } => ExitCode::from(65),
        Error::WriteConfig { .. } => ExitCode::from(74),
        Error::SerializeConfig { .. } => ExitCode::from(70),
        Error::RenderOutput { .. } => ExitCode::from(70),
        Error::HomeDirectoryUnavailable => ExitCode::from(66),
    }
}
