//! Move validation
//!
//! A proposed move runs through an ordered list of checks; the first one
//! that fails names the rejection:
//!
//! 1. destination on the board
//! 2. dropping a piece where it stands is a cancel, not a move
//! 3. destination empty
//! 4. mandatory capture (side-wide, or the chaining piece only)
//! 5. diagonal step or two-cell diagonal jump
//! 6. men step forward only
//! 7. a jump passes over an opposing piece

use crate::board::{Board, BoardError, Cell, Move, DIAGONALS};
use crate::forced::ForcedMoves;
use crate::pieces::{Color, Piece};
use crate::ruleset::Rules;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Why a move was refused
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Error, Serialize, Deserialize)]
pub enum IllegalMove {
    #[error("you cannot move outside the board")]
    OutOfBounds,
    #[error("you cannot move on top of another piece")]
    Occupied,
    #[error("there is a capture you have to make")]
    MustCapture,
    #[error("pieces move one or two cells diagonally")]
    NotDiagonalOrWrongDistance,
    #[error("men only step forward")]
    WrongDirection,
    #[error("there is no piece to jump over")]
    NoPieceToCapture,
    #[error("you cannot capture your own piece")]
    FriendlyFire,
    #[error("there is no piece on that cell")]
    NoPiece,
    #[error("it is not that side's turn")]
    WrongTurn,
    #[error("the game is over")]
    GameOver,
}

impl From<BoardError> for IllegalMove {
    fn from(err: BoardError) -> Self {
        match err {
            BoardError::OutOfBounds(_) => IllegalMove::OutOfBounds,
            BoardError::Occupied(_) => IllegalMove::Occupied,
            BoardError::Vacant(_) => IllegalMove::NoPiece,
        }
    }
}

/// Shape of an accepted move
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum MoveKind {
    /// One diagonal cell
    Step,
    /// Two diagonal cells over an opposing piece
    Jump,
    /// Piece dropped back on its own cell
    Cancel,
}

/// Accepted move
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Verdict {
    pub kind: MoveKind,
    pub captured: Option<Piece>,
}

impl Verdict {
    fn plain(kind: MoveKind) -> Self {
        Self { kind, captured: None }
    }
}

// ============================================================================
// VALIDATOR
// ============================================================================

/// Read-only view of a position that judges proposed moves
#[derive(Clone, Copy, Debug)]
pub struct MoveValidator<'a> {
    board: &'a Board,
    rules: &'a Rules,
    chain: Option<Cell>,
}

impl<'a> MoveValidator<'a> {
    pub fn new(board: &'a Board, rules: &'a Rules) -> Self {
        Self {
            board,
            rules,
            chain: None,
        }
    }

    /// Restrict play to further jumps by the piece on `chain`
    pub fn with_chain(mut self, chain: Option<Cell>) -> Self {
        self.chain = chain;
        self
    }

    /// Judge moving `piece` to `dest`. The piece's color is taken as the
    /// side to move.
    pub fn check(&self, piece: &Piece, dest: Cell) -> Result<Verdict, IllegalMove> {
        if !dest.is_valid() {
            return Err(IllegalMove::OutOfBounds);
        }

        if dest == piece.cell {
            return Ok(Verdict::plain(MoveKind::Cancel));
        }

        if self.board.piece_at(dest).is_some() {
            return Err(IllegalMove::Occupied);
        }

        self.check_forced(piece, dest)?;

        let dx = dest.x - piece.cell.x;
        let dy = dest.y - piece.cell.y;
        let kind = match (dx.abs(), dy.abs()) {
            (1, 1) => MoveKind::Step,
            (2, 2) => MoveKind::Jump,
            _ => return Err(IllegalMove::NotDiagonalOrWrongDistance),
        };

        let rows = match kind {
            MoveKind::Jump => piece.capture_rows(self.rules.men_capture_backward),
            _ => piece.step_rows(),
        };
        if !rows.contains(&dy.signum()) {
            return Err(IllegalMove::WrongDirection);
        }

        if kind == MoveKind::Step {
            return Ok(Verdict::plain(MoveKind::Step));
        }

        match self.board.piece_at(piece.cell.midpoint(dest)) {
            None => Err(IllegalMove::NoPieceToCapture),
            Some(victim) if victim.color == piece.color => Err(IllegalMove::FriendlyFire),
            Some(victim) => Ok(Verdict {
                kind: MoveKind::Jump,
                captured: Some(victim),
            }),
        }
    }

    fn check_forced(&self, piece: &Piece, dest: Cell) -> Result<(), IllegalMove> {
        match self.chain {
            Some(cell) => {
                let forced = ForcedMoves::for_piece(self.board, piece, self.rules);
                if piece.cell != cell || !forced.contains(piece.cell, dest) {
                    return Err(IllegalMove::MustCapture);
                }
            }
            None if self.rules.mandatory_capture => {
                let forced = ForcedMoves::for_side(self.board, piece.color, self.rules);
                if !forced.is_empty() && !forced.contains(piece.cell, dest) {
                    return Err(IllegalMove::MustCapture);
                }
            }
            None => {}
        }
        Ok(())
    }

    /// Every legal move for `color`, in board order
    pub fn legal_moves(&self, color: Color) -> Vec<Move> {
        let mut moves = Vec::new();

        for piece in self.board.pieces_of(color) {
            if self.chain.is_some_and(|cell| cell != piece.cell) {
                continue;
            }
            for &(dx, dy) in &DIAGONALS {
                for dist in 1..=2 {
                    let dest = piece.cell.offset(dx * dist, dy * dist);
                    if let Ok(verdict) = self.check(&piece, dest) {
                        moves.push(Move {
                            origin: piece.cell,
                            destination: dest,
                            captured: verdict.captured,
                        });
                    }
                }
            }
        }

        moves
    }
}

/// Judge a single move with no chain pending
pub fn validate(board: &Board, piece: &Piece, dest: Cell, rules: &Rules) -> Result<Verdict, IllegalMove> {
    MoveValidator::new(board, rules).check(piece, dest)
}
