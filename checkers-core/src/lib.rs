//! Checkers Core - rules engine
//!
//! This crate provides the game logic for 8x8 checkers:
//! - Board geometry and the starting layout
//! - Pieces (men and kings)
//! - Move validation with mandatory and chained captures
//! - Promotion and turn tracking
//! - A game session that owns the board and emits events

pub mod board;
pub mod pieces;
pub mod validate;
pub mod forced;
pub mod promotion;
pub mod turn;
pub mod game;
pub mod ruleset;

// Re-exports for convenient access
pub use board::{Board, BoardError, Cell, Move, ParseCellError, BOARD_SIZE, DIAGONALS, PIECES_PER_SIDE};
pub use pieces::{Color, Piece, PieceId, Rank};
pub use validate::{validate, IllegalMove, MoveKind, MoveValidator, Verdict};
pub use forced::{available_jumps, side_jumps, ForcedMoves};
pub use promotion::maybe_promote;
pub use turn::{TurnController, TurnState};
pub use game::{GameEvent, GameSession, MoveOutcome, Snapshot};
pub use ruleset::Rules;
