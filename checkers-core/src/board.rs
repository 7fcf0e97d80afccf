//! 8x8 board: cell coordinates, grid ownership and the starting layout

use crate::pieces::{Color, Piece, PieceId};
use crate::promotion;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Board width and height
pub const BOARD_SIZE: i8 = 8;

/// Number of men each side starts with
pub const PIECES_PER_SIDE: usize = 12;

/// Diagonal direction vectors (dx, dy)
pub const DIAGONALS: [(i8, i8); 4] = [
    (1, 1),   // NE
    (-1, 1),  // NW
    (1, -1),  // SE
    (-1, -1), // SW
];

/// Board cell as (column, row)
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Cell {
    pub x: i8,
    pub y: i8,
}

impl Cell {
    pub const fn new(x: i8, y: i8) -> Self {
        Self { x, y }
    }

    /// Check if this cell is on the board
    pub fn is_valid(&self) -> bool {
        (0..BOARD_SIZE).contains(&self.x) && (0..BOARD_SIZE).contains(&self.y)
    }

    /// Cell offset by (dx, dy); may leave the board
    pub fn offset(&self, dx: i8, dy: i8) -> Cell {
        Cell::new(self.x.saturating_add(dx), self.y.saturating_add(dy))
    }

    /// Cell halfway between two cells (integer division)
    pub fn midpoint(&self, other: Cell) -> Cell {
        Cell::new((self.x + other.x) / 2, (self.y + other.y) / 2)
    }

    /// Dark squares hold pieces: even rows use even columns, odd rows odd columns
    pub fn is_playable(&self) -> bool {
        self.is_valid() && (self.x - self.y) % 2 == 0
    }

    /// Iterate every cell on the board, row by row
    pub fn all() -> impl Iterator<Item = Cell> {
        (0..BOARD_SIZE).flat_map(|y| (0..BOARD_SIZE).map(move |x| Cell::new(x, y)))
    }

    fn index(&self) -> Option<(usize, usize)> {
        self.is_valid().then(|| (self.x as usize, self.y as usize))
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_valid() {
            write!(f, "{}{}", (b'a' + self.x as u8) as char, self.y + 1)
        } else {
            write!(f, "({},{})", self.x, self.y)
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid cell `{0}`: expected `x,y` or a square like `c3`")]
pub struct ParseCellError(String);

impl FromStr for Cell {
    type Err = ParseCellError;

    /// Accepts `"x,y"` (any i8 pair, so off-board cells survive parsing) or
    /// algebraic `"c3"` (file letter = column, rank digit = row + 1).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let err = || ParseCellError(s.to_string());

        if let Some((x, y)) = s.split_once(',') {
            let x = x.trim().parse::<i8>().map_err(|_| err())?;
            let y = y.trim().parse::<i8>().map_err(|_| err())?;
            return Ok(Cell::new(x, y));
        }

        let mut chars = s.chars();
        let file = chars.next().filter(|c| c.is_ascii_lowercase()).ok_or_else(err)?;
        let rank = chars.as_str().parse::<i8>().map_err(|_| err())?;
        let row = rank.checked_sub(1).ok_or_else(err)?;
        Ok(Cell::new((file as u8 - b'a') as i8, row))
    }
}

/// Failure of a board primitive; the grid is untouched when one is returned
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum BoardError {
    #[error("cell {0} is off the board")]
    OutOfBounds(Cell),
    #[error("cell {0} is already occupied")]
    Occupied(Cell),
    #[error("cell {0} is empty")]
    Vacant(Cell),
}

/// A validated move, ready to commit
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Move {
    pub origin: Cell,
    pub destination: Cell,
    pub captured: Option<Piece>,
}

impl Move {
    pub fn is_capture(&self) -> bool {
        self.captured.is_some()
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sep = if self.is_capture() { 'x' } else { '-' };
        write!(f, "{}{}{}", self.origin, sep, self.destination)
    }
}

// ============================================================================
// BOARD
// ============================================================================

/// Grid of optional pieces, indexed `[x][y]`.
///
/// The grid is private: every write goes through `place`, `remove`,
/// `relocate` or `apply`, which keep each piece's `cell` equal to the slot
/// holding it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Board {
    grid: [[Option<Piece>; BOARD_SIZE as usize]; BOARD_SIZE as usize],
}

impl Board {
    /// Board with no pieces
    pub fn empty() -> Self {
        Self {
            grid: [[None; BOARD_SIZE as usize]; BOARD_SIZE as usize],
        }
    }

    /// Standard starting position: White men on rows 0-2, Black men on rows 5-7
    pub fn standard() -> Self {
        let mut board = Self::empty();
        let mut next_id = 0u8;

        for (color, rows) in [(Color::White, 0..3), (Color::Black, 5..BOARD_SIZE)] {
            for y in rows {
                let first = if y % 2 == 0 { 0 } else { 1 };
                for x in (first..BOARD_SIZE).step_by(2) {
                    let piece = Piece::man(PieceId(next_id), color);
                    next_id += 1;
                    let placed = board.place(piece, Cell::new(x, y));
                    debug_assert!(placed.is_ok(), "setup cells are distinct and on the board");
                }
            }
        }

        board
    }

    /// Get piece at cell; `None` for empty or off-board cells
    pub fn piece_at(&self, cell: Cell) -> Option<Piece> {
        let (x, y) = cell.index()?;
        self.grid[x][y]
    }

    /// True if the cell is on the board and holds no piece
    pub fn is_vacant(&self, cell: Cell) -> bool {
        cell.is_valid() && self.piece_at(cell).is_none()
    }

    /// Put a piece on an empty cell, stamping the cell onto the piece
    pub fn place(&mut self, mut piece: Piece, cell: Cell) -> Result<(), BoardError> {
        let (x, y) = cell.index().ok_or(BoardError::OutOfBounds(cell))?;
        if self.grid[x][y].is_some() {
            return Err(BoardError::Occupied(cell));
        }
        piece.cell = cell;
        self.grid[x][y] = Some(piece);
        Ok(())
    }

    /// Delete the piece on a cell permanently
    pub fn remove(&mut self, cell: Cell) -> Result<Piece, BoardError> {
        let (x, y) = cell.index().ok_or(BoardError::OutOfBounds(cell))?;
        self.grid[x][y].take().ok_or(BoardError::Vacant(cell))
    }

    /// Move the piece on `from` to the empty cell `to`
    pub fn relocate(&mut self, from: Cell, to: Cell) -> Result<Piece, BoardError> {
        let (fx, fy) = from.index().ok_or(BoardError::OutOfBounds(from))?;
        let (tx, ty) = to.index().ok_or(BoardError::OutOfBounds(to))?;
        if self.grid[fx][fy].is_none() {
            return Err(BoardError::Vacant(from));
        }
        if from == to {
            return self.grid[fx][fy].ok_or(BoardError::Vacant(from));
        }
        if self.grid[tx][ty].is_some() {
            return Err(BoardError::Occupied(to));
        }

        let mut piece = self.grid[fx][fy].take().ok_or(BoardError::Vacant(from))?;
        piece.cell = to;
        self.grid[tx][ty] = Some(piece);
        Ok(piece)
    }

    /// Commit a move: relocate the mover, then delete the captured piece.
    /// All preconditions are checked before the grid changes.
    pub fn apply(&mut self, mv: &Move) -> Result<Piece, BoardError> {
        if self.piece_at(mv.origin).is_none() {
            return Err(BoardError::Vacant(mv.origin));
        }
        if !self.is_vacant(mv.destination) {
            return Err(if mv.destination.is_valid() {
                BoardError::Occupied(mv.destination)
            } else {
                BoardError::OutOfBounds(mv.destination)
            });
        }
        if let Some(captured) = mv.captured {
            if self.piece_at(captured.cell) != Some(captured) {
                return Err(BoardError::Vacant(captured.cell));
            }
        }

        let moved = self.relocate(mv.origin, mv.destination)?;
        if let Some(captured) = mv.captured {
            self.remove(captured.cell)?;
        }
        Ok(moved)
    }

    /// Crown the piece on `cell` if it is a man on its back rank.
    /// Returns the promoted piece.
    pub fn promote(&mut self, cell: Cell) -> Option<Piece> {
        let (x, y) = cell.index()?;
        let piece = self.grid[x][y].as_mut()?;
        promotion::maybe_promote(piece).then_some(*piece)
    }

    /// Iterate pieces on board, row by row
    pub fn pieces(&self) -> impl Iterator<Item = Piece> + '_ {
        Cell::all().filter_map(|cell| self.piece_at(cell))
    }

    /// Iterate pieces of one color
    pub fn pieces_of(&self, color: Color) -> impl Iterator<Item = Piece> + '_ {
        self.pieces().filter(move |p| p.color == color)
    }

    /// Count live pieces of one color
    pub fn count(&self, color: Color) -> usize {
        self.pieces_of(color).count()
    }

    /// Find a live piece by id
    pub fn find(&self, id: PieceId) -> Option<Piece> {
        self.pieces().find(|p| p.id == id)
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::standard()
    }
}

impl fmt::Display for Board {
    /// Text diagram, row 8 at the top, `.` for playable empty squares
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for y in (0..BOARD_SIZE).rev() {
            write!(f, "{} ", y + 1)?;
            for x in 0..BOARD_SIZE {
                let cell = Cell::new(x, y);
                let glyph = match self.piece_at(cell) {
                    Some(piece) => piece.glyph(),
                    None if cell.is_playable() => '.',
                    None => ' ',
                };
                write!(f, " {glyph}")?;
            }
            writeln!(f)?;
        }
        write!(f, "  ")?;
        for x in 0..BOARD_SIZE {
            write!(f, " {}", (b'a' + x as u8) as char)?;
        }
        writeln!(f)
    }
}
