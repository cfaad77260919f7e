//! CLI parser and config loading.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use translate_core::{AppConfig, RequestOrigin};

#[derive(Parser, Debug)]
#[command(name = "translate")]
#[command(about = "Database-backed message translations: seed, translate, list", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Database URL or file path; overrides DATABASE_URL.
    #[arg(long, global = true)]
    pub database_url: Option<String>,

    /// Log to the log file only (keeps stdout clean for --json).
    #[arg(short, long, global = true)]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug, PartialEq, Eq)]
pub enum Commands {
    /// Create the translation tables.
    Init,
    /// Add a source message so it can be translated.
    Add {
        message: String,
        #[arg(short, long, default_value = "site")]
        category: String,
    },
    /// Set the translation of a message, adding the source message if needed.
    Set {
        message: String,
        translation: String,
        #[arg(short, long, default_value = "site")]
        category: String,
        #[arg(short, long)]
        locale: String,
    },
    /// Translate a message; misses are recorded according to TRANSLATE_* settings.
    Translate {
        message: String,
        #[arg(short, long, default_value = "site")]
        category: String,
        #[arg(short, long)]
        locale: String,
        #[arg(long, value_enum, default_value_t = Origin::Site)]
        origin: Origin,
    },
    /// List source messages with translations resolved for one locale.
    List {
        #[arg(short, long)]
        locale: String,
        /// Category filter; repeat for several. All categories when omitted.
        #[arg(short, long)]
        category: Vec<String>,
        #[arg(long)]
        json: bool,
    },
    /// Show message and translation counts.
    Stats,
    /// Delete a source message and its translations.
    Delete { id: i64 },
}

/// Request origin as accepted on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Origin {
    Site,
    Cp,
    Console,
}

impl From<Origin> for RequestOrigin {
    fn from(origin: Origin) -> Self {
        match origin {
            Origin::Site => RequestOrigin::Site,
            Origin::Cp => RequestOrigin::ControlPanel,
            Origin::Console => RequestOrigin::Console,
        }
    }
}

/// Load AppConfig from environment. `database_url` overrides DATABASE_URL when given.
pub fn load_config(database_url: Option<String>) -> Result<AppConfig> {
    AppConfig::load(database_url).context("Load config from environment (DATABASE_URL, TRANSLATE_*)")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_translate_defaults() {
        let cli = Cli::try_parse_from(["translate", "translate", "Hello", "--locale", "fr"]).unwrap();

        assert!(!cli.quiet);
        assert!(cli.database_url.is_none());
        assert_eq!(
            cli.command,
            Commands::Translate {
                message: "Hello".to_string(),
                category: "site".to_string(),
                locale: "fr".to_string(),
                origin: Origin::Site,
            }
        );
    }

    #[test]
    fn test_parse_origin_and_global_flags() {
        let cli = Cli::try_parse_from([
            "translate",
            "translate",
            "Save",
            "-l",
            "de",
            "-c",
            "app",
            "--origin",
            "cp",
            "--database-url",
            "sqlite://other.db",
            "-q",
        ])
        .unwrap();

        assert!(cli.quiet);
        assert_eq!(cli.database_url.as_deref(), Some("sqlite://other.db"));
        match cli.command {
            Commands::Translate {
                category, origin, ..
            } => {
                assert_eq!(category, "app");
                assert_eq!(RequestOrigin::from(origin), RequestOrigin::ControlPanel);
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_parse_list_repeated_categories() {
        let cli = Cli::try_parse_from([
            "translate", "list", "-l", "fr", "-c", "site", "-c", "app", "--json",
        ])
        .unwrap();

        assert_eq!(
            cli.command,
            Commands::List {
                locale: "fr".to_string(),
                category: vec!["site".to_string(), "app".to_string()],
                json: true,
            }
        );
    }

    #[test]
    fn test_set_requires_locale() {
        assert!(Cli::try_parse_from(["translate", "set", "Hello", "Bonjour"]).is_err());
    }

    #[test]
    fn test_parse_delete() {
        let cli = Cli::try_parse_from(["translate", "delete", "42"]).unwrap();
        assert_eq!(cli.command, Commands::Delete { id: 42 });
    }
}
