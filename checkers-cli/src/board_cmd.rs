//! Board command - print the starting position

use anyhow::Result;
use clap::Args;

use checkers_core::GameSession;

use crate::render::{format_moves, status_line};

#[derive(Args)]
pub struct BoardArgs {
    /// Print the position as JSON
    #[arg(long)]
    pub json: bool,

    /// Also list the opening moves
    #[arg(long)]
    pub moves: bool,
}

/// Run board command
pub fn run(args: BoardArgs) -> Result<()> {
    let game = GameSession::default();

    if args.json {
        println!("{}", serde_json::to_string_pretty(&game.snapshot())?);
        return Ok(());
    }

    print!("{}", game.board());
    println!("{}", status_line(&game));
    if args.moves {
        println!("{}", format_moves(&game.legal_moves()));
    }

    Ok(())
}
