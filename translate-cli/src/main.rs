//! translate CLI: seed source messages, set translations, translate with miss recording, list
//! static messages. Config from env (optionally `.env`) and CLI args.

use std::io;

use anyhow::Result;
use clap::Parser;
use translate_cli::{execute, load_config, Cli};
use translate_core::{init_tracing, LogOutput};

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    let config = load_config(cli.database_url.clone())?;

    let output = if cli.quiet {
        LogOutput::FileOnly
    } else {
        LogOutput::FileAndStdout
    };
    init_tracing(&config.log_file, output)?;

    let mut stdout = io::stdout();
    execute(&cli.command, &config, &mut stdout).await
}
