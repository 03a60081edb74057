//! Move selection for the computer opponent.

mod agent;
mod heuristic;

pub use agent::Agent;
pub use heuristic::{choose_ai_move, decide, winning_column, HeuristicAgent, MoveReason};
