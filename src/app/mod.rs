pub mod config;
pub mod error;
pub mod logging;

pub use config::handle_config;
pub use error::exit_code;
