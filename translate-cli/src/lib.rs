//! # translate-cli
//!
//! Command-line front end for the message store: argument parsing, config loading and command
//! execution against a SQLite database.

pub mod cli;
pub mod commands;

pub use cli::{load_config, Cli, Commands, Origin};
pub use commands::{execute, open_store};
pub use translate_core::AppConfig;
