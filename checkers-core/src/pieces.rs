//! Piece definitions

use crate::board::{Cell, BOARD_SIZE};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Side color
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Color {
    White = 0,
    Black = 1,
}

impl Color {
    pub fn opponent(self) -> Self {
        match self {
            Color::White => Color::Black,
            Color::Black => Color::White,
        }
    }

    /// Row delta of a forward step (White moves up the board, Black down)
    pub fn forward(self) -> i8 {
        match self {
            Color::White => 1,
            Color::Black => -1,
        }
    }

    /// Row on which a man of this color is crowned
    pub fn back_rank(self) -> i8 {
        match self {
            Color::White => BOARD_SIZE - 1,
            Color::Black => 0,
        }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Color::White => f.write_str("White"),
            Color::Black => f.write_str("Black"),
        }
    }
}

/// Piece rank
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Rank {
    Man,
    King,
}

/// Stable handle for a piece, assigned at setup (0-23)
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct PieceId(pub u8);

/// A piece on the board
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Piece {
    pub id: PieceId,
    pub color: Color,
    pub rank: Rank,
    pub cell: Cell,
}

impl Piece {
    /// New man; its cell is set when the board places it
    pub fn man(id: PieceId, color: Color) -> Self {
        Self {
            id,
            color,
            rank: Rank::Man,
            cell: Cell::new(0, 0),
        }
    }

    pub fn is_king(&self) -> bool {
        self.rank == Rank::King
    }

    /// Row deltas this piece may step along without capturing
    pub fn step_rows(&self) -> &'static [i8] {
        match (self.rank, self.color) {
            (Rank::King, _) => &[1, -1],
            (Rank::Man, Color::White) => &[1],
            (Rank::Man, Color::Black) => &[-1],
        }
    }

    /// Row deltas this piece may capture along
    pub fn capture_rows(&self, men_capture_backward: bool) -> &'static [i8] {
        if men_capture_backward {
            &[1, -1]
        } else {
            self.step_rows()
        }
    }

    /// Single-character glyph: `w`/`b` for men, `W`/`B` for kings
    pub fn glyph(&self) -> char {
        match (self.color, self.rank) {
            (Color::White, Rank::Man) => 'w',
            (Color::White, Rank::King) => 'W',
            (Color::Black, Rank::Man) => 'b',
            (Color::Black, Rank::King) => 'B',
        }
    }
}
