//! Development tasks for the grid engine
//!
//! This binary provides development utilities using the cargo-xtask pattern.
//! Run with: `cargo xtask <command>`

mod commands;
mod grid_args;

use anyhow::Result;
use clap::Parser;
use commands::{CheckMove, Inspect, PolygonCmd, Vision};

/// Development tasks for the grid engine
#[derive(Parser)]
#[command(name = "xtask")]
#[command(about = "Development tools for the grid engine", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Parser)]
enum Command {
    /// Show grid metrics and convert cells and points
    Inspect(Inspect),

    /// Print a regular cell polygon
    Polygon(PolygonCmd),

    /// Build a light or vision area around a token
    Vision(Vision),

    /// Check a player move against revealed fog
    CheckMove(CheckMove),
}

fn main() -> Result<()> {
    // Load .env file if it exists (for GRID_* and RUST_LOG)
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Command::Inspect(cmd) => cmd.execute(),
        Command::Polygon(cmd) => cmd.execute(),
        Command::Vision(cmd) => cmd.execute(),
        Command::CheckMove(cmd) => cmd.execute(),
    }
}
