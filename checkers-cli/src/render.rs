//! Text rendering of events and game status

use checkers_core::{GameEvent, GameSession, Move, MoveOutcome, Rank, TurnState};

/// One-line description of an engine event
pub fn describe_event(event: &GameEvent) -> String {
    match event {
        GameEvent::MoveCommitted { origin, destination } => format!("moved {origin} -> {destination}"),
        GameEvent::PieceCaptured(piece) => {
            let kind = if piece.rank == Rank::King { "king" } else { "man" };
            format!("captured {} {kind} on {}", piece.color, piece.cell)
        }
        GameEvent::PiecePromoted(piece) => format!("{} man crowned on {}", piece.color, piece.cell),
        GameEvent::TurnChanged(color) => format!("{color} to move"),
        GameEvent::GameOver { winner } => format!("game over: {winner} wins"),
        GameEvent::BoardReset => "new game".to_string(),
    }
}

/// Short result line for a move attempt
pub fn describe_outcome(outcome: &MoveOutcome) -> String {
    match outcome.reason {
        Some(reason) => format!("illegal move: {reason}"),
        None if outcome.is_noop() => "piece put back".to_string(),
        None if outcome.chain_pending => "capture again with the same piece".to_string(),
        None => "ok".to_string(),
    }
}

/// Whose turn it is, with any pending chain capture
pub fn status_line(game: &GameSession) -> String {
    match game.state() {
        TurnState::GameOver { winner } => format!("{winner} wins"),
        _ => match game.pending_chain() {
            Some(cell) => format!("{} to move (continue jumping from {cell})", game.current_turn()),
            None => format!("{} to move", game.current_turn()),
        },
    }
}

/// Comma-separated move list, e.g. `c3-d4, e3xg5`
pub fn format_moves(moves: &[Move]) -> String {
    moves.iter().map(Move::to_string).collect::<Vec<_>>().join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use checkers_core::{Cell, Color, IllegalMove};

    #[test]
    fn test_status_line() {
        let game = GameSession::default();
        assert_eq!(status_line(&game), "White to move");
    }

    #[test]
    fn test_describe_event() {
        let event = GameEvent::MoveCommitted {
            origin: Cell::new(2, 2),
            destination: Cell::new(3, 3),
        };
        assert_eq!(describe_event(&event), "moved c3 -> d4");
        assert_eq!(
            describe_event(&GameEvent::GameOver { winner: Color::Black }),
            "game over: Black wins"
        );
    }

    #[test]
    fn test_describe_rejection() {
        let mut game = GameSession::default();
        let outcome = game.attempt_move(Cell::new(0, 0), Cell::new(1, 1));
        assert_eq!(outcome.reason, Some(IllegalMove::Occupied));
        assert_eq!(
            describe_outcome(&outcome),
            "illegal move: you cannot move on top of another piece"
        );
    }

    #[test]
    fn test_format_moves() {
        let game = GameSession::default();
        let text = format_moves(&game.legal_moves());
        assert!(text.starts_with("a3-b4, c3-d4, c3-b4"), "{text}");
    }
}
