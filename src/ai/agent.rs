use crate::game::GameState;

/// Interface for anything that picks moves on behalf of a player.
pub trait Agent {
    /// Select a column for the player to move in `state`.
    /// Returns `None` when the game is over or no column is open.
    fn select_action(&mut self, state: &GameState) -> Option<usize>;

    /// Return the agent's display name.
    fn name(&self) -> &str;
}
