//! Core Connect Four rules: board snapshots, players, game modes and the
//! per-game state machine with immutable transitions.

mod board;
mod mode;
mod player;
mod state;

pub use board::{Board, Cell, Position, COLS, ROWS};
pub use mode::GameMode;
pub use player::Player;
pub use state::{GameResult, GameState, Placement, MAX_MOVES};
