//! texkit CLI - command-line shell around the core operations
//!
//! The CLI owns all interactive concerns: argument parsing, input
//! validation messages, progress bars and result rendering. No file-matching
//! or conversion logic lives here.

pub mod commands;
pub mod progress;

use clap::Parser;
use commands::Commands;

#[derive(Parser)]
#[command(name = "texkit")]
#[command(version)]
#[command(about = "Texture & asset helper for game modders", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

/// Run the texkit CLI
pub fn run_cli() -> anyhow::Result<()> {
    // Setup logging
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();
    cli.command.execute()?;

    Ok(())
}
