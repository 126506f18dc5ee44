#![warn(clippy::pedantic)]

use anyhow::{Context, Result};
use clap::Parser;

mod classify;
mod cli;
mod config;
mod constants;
mod correlate;
mod event;
mod filter;
#[cfg(test)]
mod fixtures;
mod outbox;
mod server;
mod slack;
#[cfg(target_os = "linux")]
mod utils;

use config::{Config, FileConfig};
use event::PullRequestEvent;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = cli::Cli::parse();

    // the file may set the log level, so it is read before tracing is up
    let loaded = FileConfig::load(&cli.config_file);
    let file = loaded.as_ref().ok().and_then(Option::as_ref);
    let level = cli
        .log_level
        .as_deref()
        .filter(|level| !level.is_empty())
        .or_else(|| file.and_then(|file| file.logging.level.as_deref()));
    cli::init_tracing(cli::parse_level(level));

    let file = match loaded {
        Ok(Some(file)) => {
            tracing::info!("Loaded configuration from {}", cli.config_file.display());
            file
        }
        Ok(None) => FileConfig::default(),
        Err(e) => {
            tracing::warn!("Ignoring config file: {e:#}");
            FileConfig::default()
        }
    };

    match cli.command {
        cli::Commands::Serve(args) => {
            server::serve(Config::resolve(args, &file)?).await?;
        }
        cli::Commands::Classify(args) => {
            let json = std::fs::read_to_string(&args.event)
                .with_context(|| format!("failed to read {}", args.event.display()))?;
            let event: PullRequestEvent =
                serde_json::from_str(&json).context("failed to decode pull request event")?;
            let filter = config::resolve_filter(&args.filter, &file);
            println!(
                "PR #{} ({}): {}",
                event.pull_request.number,
                event.action,
                classify::classify(&event, &filter),
            );
        }
    }
    Ok(())
}
