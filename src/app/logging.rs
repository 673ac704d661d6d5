use env_logger::{Builder, Env};
use log::{LevelFilter, SetLoggerError};

/// Environment variable selecting log filters when `-v` is not given.
pub const LOG_ENV_VAR: &str = "VMCTL_LOG";

/// Logger builder honoring `VMCTL_LOG` (default `warn`); any `-v` flag
/// replaces the environment filter.
pub fn builder(verbosity: u8) -> Builder {
    let mut builder = Builder::from_env(Env::default().filter_or(LOG_ENV_VAR, "warn"));
    if let Some(level) = verbosity_level(verbosity) {
        builder.filter_level(level);
    }
    builder.format_target(false);
    builder
}

/// Install the stderr logger.
pub fn init(verbosity: u8) -> Result<(), SetLoggerError> {
    builder(verbosity).try_init()
}

fn verbosity_level(verbosity: u8) -> Option<LevelFilter> {
    match verbosity {
        0 => None,
        1 => Some(LevelFilter::Info),
        2 => Some(LevelFilter::Debug),
        _ => Some(LevelFilter::Trace),
    }
}
