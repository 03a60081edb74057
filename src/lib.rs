//! # Four in a Row
//!
//! A Connect Four game with a one-ply heuristic opponent, a persisted win
//! tally and a terminal UI built with Ratatui.
//!
//! ## Modules
//!
//! - [`game`]: Core game logic: board, player, mode, state machine
//! - [`ai`]: Agent trait and the win/block/random heuristic
//! - [`score`]: Score record, leaderboard and the key-value storage port
//! - [`session`]: Mode, current game and the pending AI move
//! - [`ui`]: Terminal UI: menu, leaderboard, game view
//! - [`config`]: TOML configuration loading and validation
//! - [`logging`]: File-backed tracing subscriber
//! - [`error`]: Structured error types

pub mod ai;
pub mod config;
pub mod error;
pub mod game;
pub mod logging;
pub mod score;
pub mod session;
pub mod ui;
