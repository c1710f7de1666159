//! `backoffice` command-line interface.
//!
//! Commands:
//! - `backoffice board create|list|delete`
//! - `backoffice column add|list`
//! - `backoffice task add|list|move|delete`
//! - `backoffice log`
//! - `backoffice budget|invoice|receipt render <input.json>`
//!
//! Exit codes:
//! - 0: Success
//! - 1: Error

pub mod cli;
pub mod commands;
pub mod config;
mod output;

pub use cli::{Cli, Commands};
pub use commands::{resolve_config, run};
pub use config::{AppConfig, ConfigError};
