use crate::error::MoveError;

use super::board::{Board, Position, COLS, ROWS};
use super::player::Player;

/// Upper bound on moves in one game.
pub const MAX_MOVES: usize = ROWS * COLS;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameResult {
    InProgress,
    /// `cells` is the connecting line in board scan order.
    Win { player: Player, cells: [Position; 4] },
    Draw,
}

impl GameResult {
    pub fn is_terminal(&self) -> bool {
        !matches!(self, GameResult::InProgress)
    }

    pub fn winner(&self) -> Option<Player> {
        match self {
            GameResult::Win { player, .. } => Some(*player),
            _ => None,
        }
    }
}

/// A disc that has been placed on the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Placement {
    pub player: Player,
    pub row: usize,
    pub col: usize,
}

/// One game as an immutable value: every accepted move returns a new state.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GameState {
    board: Board,
    current_player: Player,
    result: GameResult,
    last_move: Option<Placement>,
    move_count: usize,
}

impl GameState {
    /// Create initial game state
    pub fn initial() -> Self {
        GameState {
            board: Board::new(),
            current_player: Player::One,
            result: GameResult::InProgress,
            last_move: None,
            move_count: 0,
        }
    }

    /// Get current player
    pub fn current_player(&self) -> Player {
        self.current_player
    }

    /// Get reference to board
    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn result(&self) -> GameResult {
        self.result
    }

    /// Cells to highlight once a player has connected four.
    pub fn winning_cells(&self) -> Option<[Position; 4]> {
        match self.result {
            GameResult::Win { cells, .. } => Some(cells),
            _ => None,
        }
    }

    pub fn last_move(&self) -> Option<Placement> {
        self.last_move
    }

    pub fn move_count(&self) -> usize {
        self.move_count
    }

    /// Check if game is over
    pub fn is_terminal(&self) -> bool {
        self.result.is_terminal()
    }

    /// Get list of legal columns (not full)
    pub fn legal_actions(&self) -> Vec<usize> {
        if self.is_terminal() {
            return Vec::new();
        }
        self.board.available_columns()
    }

    /// Apply `player`'s move in `column` and return the new state.
    ///
    /// Rejects moves after the game has ended, out of turn, out of range or
    /// into a full column; `self` is never modified.
    pub fn apply_move(&self, player: Player, column: usize) -> Result<GameState, MoveError> {
        self.place(player, column).map(|(state, _)| state)
    }

    /// [`apply_move`](Self::apply_move), also returning where the disc landed.
    pub fn place(&self, player: Player, column: usize) -> Result<(GameState, Placement), MoveError> {
        if self.is_terminal() {
            return Err(MoveError::GameOver);
        }
        if player != self.current_player {
            return Err(MoveError::NotYourTurn {
                expected: self.current_player,
                attempted: player,
            });
        }

        let (board, row) = self.board.apply_move(column, player)?;

        let result = if let Some(cells) = board.detect_win(row, column, player) {
            GameResult::Win { player, cells }
        } else if board.is_full() {
            GameResult::Draw
        } else {
            GameResult::InProgress
        };

        // No further turns once the game is decided.
        let current_player = if result.is_terminal() {
            player
        } else {
            player.other()
        };

        let placement = Placement { player, row, col: column };
        let next = GameState {
            board,
            current_player,
            result,
            last_move: Some(placement),
            move_count: self.move_count + 1,
        };
        Ok((next, placement))
    }

    /// Apply a move for whoever is to play.
    pub fn play(&self, column: usize) -> Result<GameState, MoveError> {
        self.apply_move(self.current_player, column)
    }
}

impl Default for GameState {
    fn default() -> Self {
        Self::initial()
    }
}
