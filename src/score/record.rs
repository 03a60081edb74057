use serde::{Deserialize, Serialize};

use crate::game::{GameMode, GameResult, Player};

/// Win counters kept across sessions. Missing fields read as zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoreRecord {
    pub player1: u32,
    pub player2: u32,
    pub ai: u32,
}

impl ScoreRecord {
    pub fn new(player1: u32, player2: u32, ai: u32) -> Self {
        ScoreRecord { player1, player2, ai }
    }

    /// Count a finished game. Returns whether any counter changed.
    ///
    /// Player 2's wins go to `ai` in single-player mode and to `player2` in
    /// two-player mode. Draws and unfinished games count for nobody.
    pub fn record_result(&mut self, result: &GameResult, mode: GameMode) -> bool {
        let counter = match (result.winner(), mode) {
            (Some(Player::One), _) => &mut self.player1,
            (Some(Player::Two), GameMode::TwoPlayer) => &mut self.player2,
            (Some(Player::Two), GameMode::SinglePlayerVsAi) => &mut self.ai,
            _ => return false,
        };
        *counter += 1;
        true
    }
}
