//! Checkers CLI - terminal front-end for the rules engine
//!
//! Stands in for a render/input layer: it resolves typed squares into
//! cells, feeds them to a `GameSession` and prints the events it emits.

pub mod board_cmd;
pub mod play;
pub mod render;
pub mod rules_cmd;
