//! vmctl library crate: settings registry and lifecycle result reporting.

/// Core library modules and APIs.
pub mod core;

/// CLI argument parsing (only when the `cli` feature is enabled).
#[cfg(feature = "cli")]
pub mod cli;

/// CLI-facing application helpers (only when the `cli` feature is enabled).
#[cfg(feature = "cli")]
pub mod app;

mod config;
mod error;

pub use config::*;
pub use error::*;
