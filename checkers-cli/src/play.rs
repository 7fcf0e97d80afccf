//! Play command - two humans at one terminal, or a scripted replay
//!
//! ## Architecture (4-layer granularity)
//!
//! - Level 1: run() - orchestration
//! - Level 2: load_rules(), replay(), interactive()
//! - Level 3: play_turn(), handle_command()
//! - Level 4: move parsing, output

use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::Args;

use checkers_core::{Cell, GameEvent, GameSession, MoveOutcome, Rules};

use crate::render::{describe_event, describe_outcome, format_moves, status_line};

// ============================================================================
// COMMAND ARGUMENTS (Level 4 - Configuration)
// ============================================================================

#[derive(Args)]
pub struct PlayArgs {
    /// Rules JSON file
    #[arg(long, value_name = "FILE")]
    pub rules: Option<PathBuf>,

    /// Rules preset when no file is given (classic, casual)
    #[arg(long, default_value = "classic")]
    pub preset: String,

    /// Scripted moves separated by `;`, e.g. "c3-d4; f6-e5". Reads stdin when absent
    #[arg(long)]
    pub moves: Option<String>,

    /// Print outcomes and events as JSON lines
    #[arg(long)]
    pub json: bool,
}

/// A parsed move request
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MoveRequest {
    pub origin: Cell,
    pub destination: Cell,
}

// ============================================================================
// LEVEL 1 - ORCHESTRATION
// ============================================================================

/// Run play command
pub fn run(args: PlayArgs) -> Result<()> {
    let rules = load_rules(&args)?;
    tracing::info!("Starting game with {} rules", rules.name);

    let mut game = GameSession::new(rules);

    match &args.moves {
        Some(script) => {
            let requests = parse_script(script)?;
            let mut out = io::stdout().lock();
            replay(&mut game, &requests, args.json, &mut out)?;
            if !args.json {
                write!(out, "{}", game.board())?;
                writeln!(out, "{}", status_line(&game))?;
            }
        }
        None => interactive(&mut game, args.json)?,
    }

    Ok(())
}

// ============================================================================
// LEVEL 2 - PHASES
// ============================================================================

/// Rules from `--rules FILE`, else the named preset
pub fn load_rules(args: &PlayArgs) -> Result<Rules> {
    match &args.rules {
        Some(path) => Rules::load(path)
            .with_context(|| format!("Failed to load rules: {}", path.display())),
        None => Rules::preset(&args.preset)
            .with_context(|| format!("Unknown rules preset: {}", args.preset)),
    }
}

/// Play every scripted move; the first refused move is an error
pub fn replay(
    game: &mut GameSession,
    requests: &[MoveRequest],
    json: bool,
    out: &mut impl Write,
) -> Result<Vec<MoveOutcome>> {
    let mut outcomes = Vec::with_capacity(requests.len());

    for (n, request) in requests.iter().enumerate() {
        let outcome = play_turn(game, *request, json, out)?;
        if let Some(reason) = outcome.reason {
            bail!(
                "move {} ({}-{}) rejected: {}",
                n + 1,
                request.origin,
                request.destination,
                reason
            );
        }
        outcomes.push(outcome);
    }

    Ok(outcomes)
}

/// Read moves and commands from stdin until EOF or `quit`
fn interactive(game: &mut GameSession, json: bool) -> Result<()> {
    let stdin = io::stdin();
    let mut out = io::stdout().lock();

    print_help(&mut out)?;
    write!(out, "{}", game.board())?;
    writeln!(out, "{}", status_line(game))?;

    for line in stdin.lock().lines() {
        let line = line.context("Failed to read from stdin")?;
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        if !handle_command(game, line, json, &mut out)? {
            break;
        }
        out.flush()?;
    }

    Ok(())
}

// ============================================================================
// LEVEL 3 - STEPS
// ============================================================================

/// Handle one input line. Returns false when the player quits.
fn handle_command(game: &mut GameSession, line: &str, json: bool, out: &mut impl Write) -> Result<bool> {
    match line {
        "quit" | "exit" => return Ok(false),
        "help" => print_help(out)?,
        "board" => write!(out, "{}", game.board())?,
        "moves" => writeln!(out, "{}", format_moves(&game.legal_moves()))?,
        "reset" => {
            game.reset();
            print_events(game, json, out)?;
            write!(out, "{}", game.board())?;
        }
        _ => match parse_move(line) {
            Ok(request) => {
                let outcome = play_turn(game, request, json, out)?;
                if outcome.committed && !outcome.is_noop() && !json {
                    write!(out, "{}", game.board())?;
                }
            }
            Err(err) => writeln!(out, "{err:#}")?,
        },
    }

    if !json {
        writeln!(out, "{}", status_line(game))?;
    }
    Ok(true)
}

/// Submit one move and print what happened
pub fn play_turn(
    game: &mut GameSession,
    request: MoveRequest,
    json: bool,
    out: &mut impl Write,
) -> Result<MoveOutcome> {
    let outcome = game.attempt_move(request.origin, request.destination);

    if json {
        writeln!(out, "{}", serde_json::to_string(&outcome)?)?;
    } else {
        writeln!(out, "{}", describe_outcome(&outcome))?;
    }
    print_events(game, json, out)?;

    Ok(outcome)
}

// ============================================================================
// LEVEL 4 - UTILITIES
// ============================================================================

/// Parse `c3-d4`, `c3xe5`, `c3 d4` or `2,2 3,3`
pub fn parse_move(text: &str) -> Result<MoveRequest> {
    let text = text.trim();
    let parts: Vec<&str> = if text.contains(char::is_whitespace) {
        text.split_whitespace().collect()
    } else {
        text.split(['-', 'x']).collect()
    };

    let [origin, destination] = parts.as_slice() else {
        bail!("Expected a move like `c3-d4`, got `{text}`");
    };

    Ok(MoveRequest {
        origin: origin.parse()?,
        destination: destination.parse()?,
    })
}

/// Parse a `;`-separated move list
pub fn parse_script(script: &str) -> Result<Vec<MoveRequest>> {
    script
        .split(';')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(parse_move)
        .collect()
}

fn print_events(game: &mut GameSession, json: bool, out: &mut impl Write) -> Result<()> {
    for event in game.drain_events() {
        if json {
            writeln!(out, "{}", serde_json::to_string(&event)?)?;
        } else if !matches!(event, GameEvent::TurnChanged(_)) {
            writeln!(out, "  {}", describe_event(&event))?;
        }
    }
    Ok(())
}

fn print_help(out: &mut impl Write) -> Result<()> {
    writeln!(out, "Enter moves as `c3-d4` (or `2,2 3,3`).")?;
    writeln!(out, "Commands: moves, board, reset, help, quit")?;
    Ok(())
}
