//! Turn tracking

use crate::board::Cell;
use crate::pieces::Color;
use serde::{Deserialize, Serialize};

/// Whose move it is
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum TurnState {
    WhiteToMove,
    BlackToMove,
    GameOver { winner: Color },
}

impl TurnState {
    fn to_move(color: Color) -> Self {
        match color {
            Color::White => TurnState::WhiteToMove,
            Color::Black => TurnState::BlackToMove,
        }
    }
}

/// Turn state machine.
///
/// `WhiteToMove` <-> `BlackToMove`, flipping once per completed move;
/// `GameOver` is terminal. A pending chain holds the turn with the side
/// that just jumped until its piece runs out of captures.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TurnController {
    state: TurnState,
    /// Last color to move; still meaningful after game over
    color: Color,
    chain: Option<Cell>,
    moves_played: u32,
}

impl TurnController {
    pub fn new() -> Self {
        Self::starting_with(Color::White)
    }

    /// Controller for a set-up position where `color` moves first
    pub fn starting_with(color: Color) -> Self {
        Self {
            state: TurnState::to_move(color),
            color,
            chain: None,
            moves_played: 0,
        }
    }

    pub fn state(&self) -> TurnState {
        self.state
    }

    /// Color to move (after game over: the side that was left to move)
    pub fn current(&self) -> Color {
        self.color
    }

    pub fn is_over(&self) -> bool {
        matches!(self.state, TurnState::GameOver { .. })
    }

    pub fn winner(&self) -> Option<Color> {
        match self.state {
            TurnState::GameOver { winner } => Some(winner),
            _ => None,
        }
    }

    /// Cell of the piece that must keep jumping, if any
    pub fn chain(&self) -> Option<Cell> {
        self.chain
    }

    /// Completed moves (a multi-jump counts once)
    pub fn moves_played(&self) -> u32 {
        self.moves_played
    }

    /// Hold the turn: the piece now on `cell` must jump again
    pub fn begin_chain(&mut self, cell: Cell) {
        if !self.is_over() {
            self.chain = Some(cell);
        }
    }

    /// Complete the current move and hand the turn to the other side
    pub fn advance(&mut self) {
        if self.is_over() {
            return;
        }
        self.chain = None;
        self.moves_played += 1;
        self.color = self.color.opponent();
        self.state = TurnState::to_move(self.color);
    }

    /// Enter the terminal state
    pub fn finish(&mut self, winner: Color) {
        self.chain = None;
        self.state = TurnState::GameOver { winner };
    }
}

impl Default for TurnController {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_starts_with_white() {
        let turn = TurnController::new();
        assert_eq!(turn.state(), TurnState::WhiteToMove);
        assert_eq!(turn.current(), Color::White);
        assert_eq!(turn.moves_played(), 0);

        let black_first = TurnController::starting_with(Color::Black);
        assert_eq!(black_first.state(), TurnState::BlackToMove);
    }

    #[test]
    fn test_advance_flips() {
        let mut turn = TurnController::new();
        turn.advance();
        assert_eq!(turn.state(), TurnState::BlackToMove);
        turn.advance();
        assert_eq!(turn.state(), TurnState::WhiteToMove);
        assert_eq!(turn.moves_played(), 2);
    }

    #[test]
    fn test_chain_holds_turn_until_advance() {
        let mut turn = TurnController::new();
        turn.begin_chain(Cell::new(4, 4));
        assert_eq!(turn.current(), Color::White);
        assert_eq!(turn.chain(), Some(Cell::new(4, 4)));

        turn.advance();
        assert_eq!(turn.chain(), None);
        assert_eq!(turn.current(), Color::Black);
        assert_eq!(turn.moves_played(), 1);
    }

    #[test]
    fn test_game_over_is_terminal() {
        let mut turn = TurnController::new();
        turn.advance();
        turn.finish(Color::White);
        assert!(turn.is_over());
        assert_eq!(turn.winner(), Some(Color::White));

        turn.advance();
        turn.begin_chain(Cell::new(0, 0));
        assert_eq!(turn.state(), TurnState::GameOver { winner: Color::White });
        assert_eq!(turn.chain(), None);
        assert_eq!(turn.moves_played(), 1);
    }
}
