//! Checkers CLI - Command-line interface
//!
//! Commands:
//! - board: Print the starting position
//! - play: Play a two-player game (interactive or scripted)
//! - rules: Write a rules preset as JSON

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use checkers_cli::{board_cmd, play, rules_cmd};

#[derive(Parser)]
#[command(name = "checkers")]
#[command(about = "Two-player checkers in the terminal")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the starting position
    Board(board_cmd::BoardArgs),
    /// Play a game
    Play(play::PlayArgs),
    /// Write a rules preset as JSON
    Rules(rules_cmd::RulesArgs),
}

fn main() -> Result<()> {
    // Initialize logging (RUST_LOG, default warn); stdout carries the board
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Board(args) => board_cmd::run(args),
        Commands::Play(args) => play::run(args),
        Commands::Rules(args) => rules_cmd::run(args),
    }
}
