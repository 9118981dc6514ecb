//! # article-cli
//!
//! Menu-driven administration client for the `article` table.
//!
//! ## Modules
//! - [`config`] - TOML file and environment configuration
//! - [`menu`] - The interactive option loop
//! - [`error`] - Session-ending errors
//!
//! The binary (`articles`) wires these to stdin/stdout; tests drive
//! [`Menu`] with in-memory input and output instead.

pub mod config;
pub mod error;
pub mod menu;

pub use config::{CliConfig, ConfigError};
pub use error::{CliError, CliResult};
pub use menu::{Menu, MenuOption};

use tracing_subscriber::EnvFilter;

/// Initializes the tracing subscriber.
///
/// `RUST_LOG` wins over `default_filter` (the `[logging] filter` setting).
/// Logs go to stderr so they never interleave with the menu on stdout.
pub fn init_tracing(default_filter: &str) {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(default_filter))
        .unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(true)
        .init();
}
