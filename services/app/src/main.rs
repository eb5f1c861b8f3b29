use anyhow::Result;
use api::ClientError;
use clap::Parser;
use common::ClientConfig;
use tracing::info;
use tracing_subscriber::EnvFilter;

mod commands;
mod notice;
mod state;

use crate::{commands::Command, notice::Notice, state::AppState};

/// Command-line front end for the Lifeblood blood-donation service
#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging; stdout is reserved for command output
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    info!("Starting Lifeblood client");

    let config = ClientConfig::load()?;
    let state = AppState::new(config)?;

    match commands::run(&state, cli.command).await {
        Ok(outcome) => {
            if let Some(data) = outcome.data {
                println!("{}", serde_json::to_string_pretty(&data)?);
            }
            if let Some(notice) = outcome.notice {
                eprintln!("{}", notice);
            }
            Ok(())
        }
        Err(e) => {
            let notice = match e.downcast_ref::<ClientError>() {
                Some(client_error) => Notice::from(client_error),
                None => Notice::error(e.to_string()),
            };
            eprintln!("{}", notice);
            std::process::exit(1);
        }
    }
}
