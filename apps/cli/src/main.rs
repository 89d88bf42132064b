//! termsync CLI — batch glossary import and reconciliation.
//!
//! Reads a JSON batch of glossary terms, validates it, and reconciles it
//! against the remote content store with idempotent upserts.

mod commands;

use clap::Parser;
use color_eyre::eyre::Result;

use commands::Cli;

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;
    let cli = Cli::parse();
    commands::init_tracing(&cli);
    commands::run(cli).await
}
