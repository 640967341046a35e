//! Binstar CLI - manage authentication tokens for a binstar account.
//!
//! `binstar auth` lists, creates, and removes API tokens and shows the
//! permission scopes a token can be limited to.

mod auth;
mod cli;
mod client;
mod config;
mod error;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use crate::cli::{Cli, Commands};
use crate::config::settings::env;
use crate::config::load_config;
use crate::error::Result;

#[tokio::main(flavor = "current_thread")]
async fn main() {
    // Parse CLI arguments
    let cli = Cli::parse();

    // Initialize logging
    let default_level = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_env(env::LOG_LEVEL)
                .unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_target(false)
        .without_time()
        .with_writer(std::io::stderr)
        .init();

    // Run the command
    if let Err(e) = run(cli).await {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<()> {
    let config =
        load_config()?.with_overrides(cli.api_url.as_deref(), cli.token.as_deref());

    match cli.command {
        Commands::Auth(args) => cli::commands::handle_auth(&args, &config).await,
    }
}
