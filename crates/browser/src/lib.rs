//! Repo Browser - a tabbed browser shell that can list hosted repositories.
//!
//! This crate wires the shell together:
//! - Configuration from the environment
//! - The content service client as the listing source
//! - A line-oriented console front end

pub mod config;
pub mod console;

pub use config::{ConfigError, ShellConfig};
pub use networking::user_agent;

/// Browser version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
