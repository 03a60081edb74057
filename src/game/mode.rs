use super::player::Player;

/// What the session is doing. Chosen before a game starts and fixed until the
/// player returns to the menu.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum GameMode {
    #[default]
    Menu,
    SinglePlayerVsAi,
    TwoPlayer,
}

impl GameMode {
    /// Whether `player`'s moves are chosen by the heuristic opponent.
    pub fn is_ai(self, player: Player) -> bool {
        self == GameMode::SinglePlayerVsAi && player == Player::Two
    }

    pub fn is_playing(self) -> bool {
        self != GameMode::Menu
    }

    /// Name shown for `player` in this mode.
    pub fn label(self, player: Player) -> &'static str {
        if self.is_ai(player) {
            "AI"
        } else {
            player.name()
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            GameMode::Menu => "Menu",
            GameMode::SinglePlayerVsAi => "Player vs AI",
            GameMode::TwoPlayer => "Two Players",
        }
    }
}
