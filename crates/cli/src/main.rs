//! zarvan CLI entry point.

use anyhow::Result;
use clap::Parser;
use zarvan_cli::cli::Cli;
use zarvan_cli::commands::{run, Context};
use zarvan_cli::config::{resolve_config, EnvConfig};
use zarvan_cli::document::Document;
use zarvan_cli::logging;

fn main() -> Result<()> {
    let cli = Cli::parse();

    logging::init(cli.verbose, cli.log_json);

    let document = match &cli.file {
        Some(path) => Document::load(path)?,
        None => {
            tracing::warn!("No events file given, using an empty calendar");
            Document::default()
        }
    };
    let env = EnvConfig::from_env()?;
    let config = resolve_config(document.config.clone(), &env, &cli)?;

    let now = chrono::Local::now().naive_local();
    let ctx = Context {
        document,
        config,
        today: now.date(),
        now: now.time(),
    };

    let output = run(&cli.command, &ctx, cli.format)?;
    println!("{output}");
    Ok(())
}
