//! Forced-move detection: which capture jumps are on offer

use crate::board::{Board, Cell};
use crate::pieces::{Color, Piece};
use crate::ruleset::Rules;
use rustc_hash::FxHashMap;

/// Landing cells of every available jump for one piece.
///
/// Looks one diagonal step out for an opposing piece and one step further
/// for an empty on-board landing cell. The landing cell is recorded, never
/// the jumped cell.
pub fn available_jumps(board: &Board, piece: &Piece, rules: &Rules) -> Vec<Cell> {
    let mut landings = Vec::new();

    for &dy in piece.capture_rows(rules.men_capture_backward) {
        for dx in [-1, 1] {
            let over = piece.cell.offset(dx, dy);
            let victim = match board.piece_at(over) {
                Some(p) if p.color != piece.color => p,
                _ => continue,
            };
            let landing = victim.cell.offset(dx, dy);
            if board.is_vacant(landing) {
                landings.push(landing);
            }
        }
    }

    landings
}

/// Side-wide jump table: origin cell -> landing cells
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ForcedMoves {
    jumps: FxHashMap<Cell, Vec<Cell>>,
}

impl ForcedMoves {
    /// Collect jumps for every live piece of `color`
    pub fn for_side(board: &Board, color: Color, rules: &Rules) -> Self {
        let jumps = board
            .pieces_of(color)
            .filter_map(|piece| {
                let landings = available_jumps(board, &piece, rules);
                (!landings.is_empty()).then_some((piece.cell, landings))
            })
            .collect();
        Self { jumps }
    }

    /// Jumps for a single piece (used while a chain capture is pending)
    pub fn for_piece(board: &Board, piece: &Piece, rules: &Rules) -> Self {
        let mut jumps = FxHashMap::default();
        let landings = available_jumps(board, piece, rules);
        if !landings.is_empty() {
            jumps.insert(piece.cell, landings);
        }
        Self { jumps }
    }

    pub fn is_empty(&self) -> bool {
        self.jumps.is_empty()
    }

    /// True if jumping from `origin` to `landing` is one of the forced moves
    pub fn contains(&self, origin: Cell, landing: Cell) -> bool {
        self.jumps
            .get(&origin)
            .is_some_and(|landings| landings.contains(&landing))
    }

    /// Landing cells for one origin
    pub fn landings(&self, origin: Cell) -> &[Cell] {
        self.jumps.get(&origin).map(Vec::as_slice).unwrap_or(&[])
    }

    /// All (origin, landing) pairs, sorted for stable output
    pub fn pairs(&self) -> Vec<(Cell, Cell)> {
        let mut pairs: Vec<_> = self
            .jumps
            .iter()
            .flat_map(|(&origin, landings)| landings.iter().map(move |&l| (origin, l)))
            .collect();
        pairs.sort();
        pairs
    }

    /// Number of (origin, landing) pairs
    pub fn len(&self) -> usize {
        self.jumps.values().map(Vec::len).sum()
    }
}

/// Convenience wrapper over [`ForcedMoves::for_side`]
pub fn side_jumps(board: &Board, color: Color, rules: &Rules) -> ForcedMoves {
    ForcedMoves::for_side(board, color, rules)
}
