//! Piece lifecycle: crowning men that reach the far side

use crate::pieces::{Piece, Rank};

/// Crown a man standing on its back rank. Returns true if the rank changed;
/// kings and men elsewhere are left alone.
pub fn maybe_promote(piece: &mut Piece) -> bool {
    if piece.rank == Rank::Man && piece.cell.y == piece.color.back_rank() {
        piece.rank = Rank::King;
        tracing::info!(id = piece.id.0, cell = %piece.cell, "{} man crowned", piece.color);
        return true;
    }
    false
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::Cell;
    use crate::pieces::{Color, PieceId};

    fn man_at(color: Color, x: i8, y: i8) -> Piece {
        let mut piece = Piece::man(PieceId(0), color);
        piece.cell = Cell::new(x, y);
        piece
    }

    #[test]
    fn test_white_crowned_on_row_7() {
        let mut piece = man_at(Color::White, 3, 7);
        assert!(maybe_promote(&mut piece));
        assert_eq!(piece.rank, Rank::King);
        // Second call is a no-op
        assert!(!maybe_promote(&mut piece));
        assert_eq!(piece.rank, Rank::King);
    }

    #[test]
    fn test_black_crowned_on_row_0() {
        let mut piece = man_at(Color::Black, 4, 0);
        assert!(maybe_promote(&mut piece));
        assert!(piece.is_king());
    }

    #[test]
    fn test_no_promotion_off_back_rank() {
        let mut white = man_at(Color::White, 0, 0);
        let mut black = man_at(Color::Black, 1, 7);
        let mut middle = man_at(Color::White, 2, 6);
        assert!(!maybe_promote(&mut white));
        assert!(!maybe_promote(&mut black));
        assert!(!maybe_promote(&mut middle));
        assert_eq!(white.rank, Rank::Man);
        assert_eq!(black.rank, Rank::Man);
        assert_eq!(middle.rank, Rank::Man);
    }
}
