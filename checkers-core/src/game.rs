//! Game session: the single owner of the board
//!
//! The input layer hands in resolved cells; the session validates, commits
//! atomically, crowns, advances the turn and queues events for the render
//! layer.

use crate::board::{Board, BoardError, Cell, Move};
use crate::forced::ForcedMoves;
use crate::pieces::{Color, Piece};
use crate::ruleset::Rules;
use crate::turn::{TurnController, TurnState};
use crate::validate::{IllegalMove, MoveKind, MoveValidator, Verdict};
use serde::{Deserialize, Serialize};

// ============================================================================
// EVENTS AND OUTCOMES
// ============================================================================

/// Notification for the render layer
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameEvent {
    MoveCommitted { origin: Cell, destination: Cell },
    PieceCaptured(Piece),
    PiecePromoted(Piece),
    TurnChanged(Color),
    GameOver { winner: Color },
    BoardReset,
}

/// Result of [`GameSession::attempt_move`]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoveOutcome {
    /// True for moves and for no-op cancels
    pub committed: bool,
    pub kind: Option<MoveKind>,
    pub captured: Option<Piece>,
    pub promoted: bool,
    /// The same piece must jump again before the turn passes
    pub chain_pending: bool,
    /// Set iff the move was refused
    pub reason: Option<IllegalMove>,
}

impl MoveOutcome {
    fn rejected(reason: IllegalMove) -> Self {
        Self {
            committed: false,
            kind: None,
            captured: None,
            promoted: false,
            chain_pending: false,
            reason: Some(reason),
        }
    }

    fn cancelled() -> Self {
        Self {
            committed: true,
            kind: Some(MoveKind::Cancel),
            captured: None,
            promoted: false,
            chain_pending: false,
            reason: None,
        }
    }

    /// True if the piece was dropped back where it started
    pub fn is_noop(&self) -> bool {
        self.kind == Some(MoveKind::Cancel)
    }
}

/// Serializable view of a session
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Snapshot {
    pub turn: TurnState,
    pub chain: Option<Cell>,
    pub moves_played: u32,
    pub pieces: Vec<Piece>,
}

// ============================================================================
// SESSION
// ============================================================================

/// One game of checkers
#[derive(Clone, Debug)]
pub struct GameSession {
    board: Board,
    rules: Rules,
    turn: TurnController,
    events: Vec<GameEvent>,
}

impl GameSession {
    pub fn new(rules: Rules) -> Self {
        Self {
            board: Board::standard(),
            rules,
            turn: TurnController::new(),
            events: Vec::new(),
        }
    }

    /// Start from an arbitrary position with `to_move` to play
    pub fn from_board(board: Board, rules: Rules, to_move: Color) -> Self {
        let mut session = Self {
            board,
            rules,
            turn: TurnController::starting_with(to_move),
            events: Vec::new(),
        };
        session.check_game_over();
        session
    }

    /// Discard every piece and set up the starting layout again
    pub fn reset(&mut self) {
        self.board = Board::standard();
        self.turn = TurnController::new();
        self.events.clear();
        self.events.push(GameEvent::BoardReset);
        tracing::info!(rules = %self.rules.name, "board reset");
    }

    // ========================================================================
    // ACCESSORS
    // ========================================================================

    /// Piece to start a drag with; `None` for empty or off-board cells
    pub fn select_piece(&self, cell: Cell) -> Option<Piece> {
        self.board.piece_at(cell)
    }

    pub fn piece_at(&self, cell: Cell) -> Option<Piece> {
        self.board.piece_at(cell)
    }

    pub fn current_turn(&self) -> Color {
        self.turn.current()
    }

    pub fn state(&self) -> TurnState {
        self.turn.state()
    }

    pub fn winner(&self) -> Option<Color> {
        self.turn.winner()
    }

    /// Cell of the piece that must continue a multi-jump
    pub fn pending_chain(&self) -> Option<Cell> {
        self.turn.chain()
    }

    pub fn moves_played(&self) -> u32 {
        self.turn.moves_played()
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn rules(&self) -> &Rules {
        &self.rules
    }

    /// Legal moves for the side to move (empty once the game is over)
    pub fn legal_moves(&self) -> Vec<Move> {
        if self.turn.is_over() {
            return Vec::new();
        }
        self.validator().legal_moves(self.turn.current())
    }

    /// Captures the side to move is obliged to consider
    pub fn forced_moves(&self) -> ForcedMoves {
        let color = self.turn.current();
        match self.turn.chain().and_then(|cell| self.board.piece_at(cell)) {
            Some(piece) => ForcedMoves::for_piece(&self.board, &piece, &self.rules),
            None => ForcedMoves::for_side(&self.board, color, &self.rules),
        }
    }

    /// Take the queued events
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            turn: self.turn.state(),
            chain: self.turn.chain(),
            moves_played: self.turn.moves_played(),
            pieces: self.board.pieces().collect(),
        }
    }

    fn validator(&self) -> MoveValidator<'_> {
        MoveValidator::new(&self.board, &self.rules).with_chain(self.turn.chain())
    }

    // ========================================================================
    // MOVES
    // ========================================================================

    /// Try to move the piece on `origin` to `destination`.
    ///
    /// Nothing changes unless the outcome is committed. Dropping a piece on
    /// its own cell is a committed no-op that leaves the turn alone.
    pub fn attempt_move(&mut self, origin: Cell, destination: Cell) -> MoveOutcome {
        if !origin.is_valid() || !destination.is_valid() {
            return self.reject(origin, destination, IllegalMove::OutOfBounds);
        }

        let piece = match self.board.piece_at(origin) {
            Some(piece) => piece,
            None => return self.reject(origin, destination, IllegalMove::NoPiece),
        };

        if origin == destination {
            tracing::debug!(%origin, "piece dropped back on its cell");
            return MoveOutcome::cancelled();
        }

        if self.turn.is_over() {
            return self.reject(origin, destination, IllegalMove::GameOver);
        }

        if piece.color != self.turn.current() {
            return self.reject(origin, destination, IllegalMove::WrongTurn);
        }

        let verdict = match self.validator().check(&piece, destination) {
            Ok(verdict) => verdict,
            Err(reason) => return self.reject(origin, destination, reason),
        };

        match self.commit(origin, destination, verdict) {
            Ok(outcome) => outcome,
            Err(err) => {
                tracing::error!(%origin, %destination, %err, "validated move failed to apply");
                MoveOutcome::rejected(err.into())
            }
        }
    }

    fn reject(&self, origin: Cell, destination: Cell, reason: IllegalMove) -> MoveOutcome {
        tracing::debug!(%origin, %destination, %reason, "move rejected");
        MoveOutcome::rejected(reason)
    }

    /// Stage the move on a copy of the board, then swap it in
    fn commit(&mut self, origin: Cell, destination: Cell, verdict: Verdict) -> Result<MoveOutcome, BoardError> {
        let mv = Move {
            origin,
            destination,
            captured: verdict.captured,
        };

        let mut next = self.board.clone();
        let moved = next.apply(&mv)?;
        let promoted = next.promote(destination);
        self.board = next;

        tracing::info!(color = %moved.color, "{mv}");
        self.events.push(GameEvent::MoveCommitted { origin, destination });
        if let Some(captured) = mv.captured {
            self.events.push(GameEvent::PieceCaptured(captured));
        }
        if let Some(piece) = promoted {
            self.events.push(GameEvent::PiecePromoted(piece));
        }

        // Crowning ends the move even if more jumps are on offer
        let chain_pending = mv.is_capture()
            && promoted.is_none()
            && self.rules.chain_captures
            && !ForcedMoves::for_piece(&self.board, &moved, &self.rules).is_empty();

        if chain_pending {
            self.turn.begin_chain(destination);
        } else {
            self.turn.advance();
            self.events.push(GameEvent::TurnChanged(self.turn.current()));
            self.check_game_over();
        }

        Ok(MoveOutcome {
            committed: true,
            kind: Some(verdict.kind),
            captured: mv.captured,
            promoted: promoted.is_some(),
            chain_pending,
            reason: None,
        })
    }

    /// A side with no pieces or no legal move loses
    fn check_game_over(&mut self) {
        if self.turn.is_over() {
            return;
        }
        let color = self.turn.current();
        if self.board.count(color) == 0 || self.legal_moves().is_empty() {
            let winner = color.opponent();
            self.turn.finish(winner);
            self.events.push(GameEvent::GameOver { winner });
            tracing::info!(%winner, moves = self.turn.moves_played(), "game over");
        }
    }
}

impl Default for GameSession {
    fn default() -> Self {
        Self::new(Rules::default())
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pieces::{PieceId, Rank};

    fn board_with(pieces: &[(Color, Rank, (i8, i8))]) -> Board {
        let mut board = Board::empty();
        for (i, &(color, rank, (x, y))) in pieces.iter().enumerate() {
            let mut piece = Piece::man(PieceId(i as u8), color);
            piece.rank = rank;
            board.place(piece, Cell::new(x, y)).unwrap();
        }
        board
    }

    fn cell(x: i8, y: i8) -> Cell {
        Cell::new(x, y)
    }

    #[test]
    fn test_game_creation() {
        let game = GameSession::default();
        assert_eq!(game.current_turn(), Color::White);
        assert_eq!(game.state(), TurnState::WhiteToMove);
        assert_eq!(game.board().count(Color::White), 12);
        assert_eq!(game.board().count(Color::Black), 12);
        assert_eq!(game.legal_moves().len(), 7);
    }

    #[test]
    fn test_simple_move_flips_turn() {
        let mut game = GameSession::default();
        let outcome = game.attempt_move(cell(2, 2), cell(3, 3));
        assert!(outcome.committed);
        assert_eq!(outcome.kind, Some(MoveKind::Step));
        assert_eq!(game.current_turn(), Color::Black);
        assert!(game.piece_at(cell(2, 2)).is_none());
        assert_eq!(game.piece_at(cell(3, 3)).unwrap().cell, cell(3, 3));

        let events = game.drain_events();
        assert_eq!(
            events,
            vec![
                GameEvent::MoveCommitted { origin: cell(2, 2), destination: cell(3, 3) },
                GameEvent::TurnChanged(Color::Black),
            ]
        );
        assert!(game.drain_events().is_empty());
    }

    #[test]
    fn test_rejections_leave_state_alone() {
        let mut game = GameSession::default();
        let before = game.snapshot();

        let cases = [
            (cell(-1, 0), cell(0, 1), IllegalMove::OutOfBounds),
            (cell(2, 2), cell(2, 8), IllegalMove::OutOfBounds),
            (cell(3, 3), cell(4, 4), IllegalMove::NoPiece),
            (cell(1, 5), cell(2, 4), IllegalMove::WrongTurn),
            (cell(0, 0), cell(1, 1), IllegalMove::Occupied),
            (cell(2, 2), cell(2, 3), IllegalMove::NotDiagonalOrWrongDistance),
            (cell(2, 2), cell(4, 4), IllegalMove::NoPieceToCapture),
        ];
        for (origin, destination, reason) in cases {
            let outcome = game.attempt_move(origin, destination);
            assert!(!outcome.committed);
            assert_eq!(outcome.reason, Some(reason), "{origin} -> {destination}");
        }

        assert_eq!(game.snapshot(), before);
        assert!(game.drain_events().is_empty());
    }

    #[test]
    fn test_self_drop_is_noop() {
        let mut game = GameSession::default();
        let before = game.snapshot();

        for origin in [cell(2, 2), cell(1, 5)] {
            let outcome = game.attempt_move(origin, origin);
            assert!(outcome.committed);
            assert!(outcome.is_noop());
            assert_eq!(outcome.reason, None);
        }

        assert_eq!(game.snapshot(), before);
        assert_eq!(game.current_turn(), Color::White);
        assert!(game.drain_events().is_empty());
    }

    #[test]
    fn test_capture_and_turn() {
        let board = board_with(&[
            (Color::White, Rank::Man, (1, 0)),
            (Color::White, Rank::Man, (3, 4)),
            (Color::Black, Rank::Man, (2, 5)),
            (Color::Black, Rank::Man, (1, 6)),
        ]);
        let mut game = GameSession::from_board(board, Rules::default(), Color::White);

        let first = game.attempt_move(cell(1, 0), cell(2, 1));
        assert!(first.committed, "{:?}", first.reason);
        assert_eq!(game.current_turn(), Color::Black);

        let jump = game.attempt_move(cell(2, 5), cell(4, 3));
        assert!(jump.committed, "{:?}", jump.reason);
        assert_eq!(jump.kind, Some(MoveKind::Jump));
        assert_eq!(jump.captured.map(|p| p.cell), Some(cell(3, 4)));
        assert!(game.piece_at(cell(3, 4)).is_none());
        assert!(game.select_piece(cell(3, 4)).is_none());
        assert_eq!(game.piece_at(cell(4, 3)).unwrap().color, Color::Black);
        assert_eq!(game.current_turn(), Color::White);
    }

    #[test]
    fn test_must_capture_rejects_other_moves() {
        let board = board_with(&[
            (Color::White, Rank::Man, (0, 0)),
            (Color::White, Rank::Man, (2, 2)),
            (Color::Black, Rank::Man, (3, 3)),
            (Color::Black, Rank::Man, (7, 7)),
        ]);
        let mut game = GameSession::from_board(board, Rules::default(), Color::White);
        let before = game.snapshot();
        assert_eq!(game.forced_moves().pairs(), vec![(cell(2, 2), cell(4, 4))]);

        let outcome = game.attempt_move(cell(0, 0), cell(1, 1));
        assert_eq!(outcome.reason, Some(IllegalMove::MustCapture));
        assert_eq!(game.snapshot(), before);

        assert!(game.attempt_move(cell(2, 2), cell(4, 4)).committed);
    }

    #[test]
    fn test_chain_capture_holds_turn() {
        let board = board_with(&[
            (Color::White, Rank::Man, (0, 0)),
            (Color::Black, Rank::Man, (1, 1)),
            (Color::Black, Rank::Man, (3, 3)),
            (Color::Black, Rank::Man, (7, 7)),
        ]);
        let mut game = GameSession::from_board(board, Rules::default(), Color::White);

        let first = game.attempt_move(cell(0, 0), cell(2, 2));
        assert!(first.chain_pending);
        assert_eq!(game.current_turn(), Color::White);
        assert_eq!(game.pending_chain(), Some(cell(2, 2)));
        assert_eq!(game.moves_played(), 0);

        let second = game.attempt_move(cell(2, 2), cell(4, 4));
        assert!(second.committed);
        assert!(!second.chain_pending);
        assert_eq!(game.current_turn(), Color::Black);
        assert_eq!(game.pending_chain(), None);
        assert_eq!(game.moves_played(), 1);
        assert_eq!(game.board().count(Color::Black), 1);
    }

    #[test]
    fn test_chain_disabled_passes_turn() {
        let board = board_with(&[
            (Color::White, Rank::Man, (0, 0)),
            (Color::Black, Rank::Man, (1, 1)),
            (Color::Black, Rank::Man, (3, 3)),
            (Color::Black, Rank::Man, (7, 7)),
        ]);
        let mut game = GameSession::from_board(board, Rules::casual(), Color::White);

        let outcome = game.attempt_move(cell(0, 0), cell(2, 2));
        assert!(outcome.committed);
        assert!(!outcome.chain_pending);
        assert_eq!(game.current_turn(), Color::Black);
    }

    #[test]
    fn test_promotion_event_and_chain_stop() {
        let board = board_with(&[
            (Color::White, Rank::Man, (2, 5)),
            (Color::Black, Rank::Man, (3, 6)),
            (Color::Black, Rank::Man, (5, 6)),
            (Color::Black, Rank::Man, (0, 7)),
        ]);
        let mut game = GameSession::from_board(board, Rules::default(), Color::White);

        let outcome = game.attempt_move(cell(2, 5), cell(4, 7));
        assert!(outcome.committed);
        assert!(outcome.promoted);
        // A king on (4, 7) could jump (5, 6) next, but crowning ends the move
        assert!(!outcome.chain_pending);
        assert_eq!(game.current_turn(), Color::Black);

        let king = game.piece_at(cell(4, 7)).unwrap();
        assert_eq!(king.rank, Rank::King);
        let events = game.drain_events();
        assert!(events.contains(&GameEvent::PiecePromoted(king)));
    }

    #[test]
    fn test_last_capture_ends_game() {
        let board = board_with(&[
            (Color::White, Rank::Man, (2, 2)),
            (Color::Black, Rank::Man, (3, 3)),
        ]);
        let mut game = GameSession::from_board(board, Rules::default(), Color::White);

        let outcome = game.attempt_move(cell(2, 2), cell(4, 4));
        assert!(outcome.committed);
        assert_eq!(game.winner(), Some(Color::White));
        assert_eq!(game.state(), TurnState::GameOver { winner: Color::White });
        assert!(game.legal_moves().is_empty());
        assert!(game.drain_events().contains(&GameEvent::GameOver { winner: Color::White }));

        let after = game.attempt_move(cell(4, 4), cell(5, 5));
        assert_eq!(after.reason, Some(IllegalMove::GameOver));
    }

    #[test]
    fn test_blocked_side_loses() {
        // Black's only man is pinned against the bottom edge
        let board = board_with(&[
            (Color::Black, Rank::Man, (0, 0)),
            (Color::White, Rank::Man, (1, 1)),
            (Color::White, Rank::Man, (2, 2)),
        ]);
        let game = GameSession::from_board(board, Rules::default(), Color::Black);
        assert_eq!(game.winner(), Some(Color::White));
    }

    #[test]
    fn test_reset_restores_start() {
        let mut game = GameSession::default();
        game.attempt_move(cell(2, 2), cell(3, 3));
        game.reset();

        let fresh = GameSession::default();
        assert_eq!(game.snapshot(), fresh.snapshot());
        assert_eq!(game.drain_events(), vec![GameEvent::BoardReset]);
    }
}
