//! A play session: the current mode and game, the leaderboard, and the single
//! pending AI move. This is the surface the UI drives.
//!
//! Everything runs on the caller's thread. The AI's "thinking" delay is a
//! deadline checked by [`GameSession::poll_ai`], never a timer thread, so a
//! reset simply drops the deadline.

use std::time::{Duration, Instant};

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::{debug, info, warn};

use crate::ai::Agent;
use crate::config::GameConfig;
use crate::error::MoveError;
use crate::game::{GameMode, GameResult, GameState, Placement, Player};
use crate::score::{KeyValueStore, Leaderboard, ScoreRecord};

pub struct GameSession<S> {
    mode: GameMode,
    state: GameState,
    leaderboard: Leaderboard<S>,
    opponent: Box<dyn Agent>,
    /// When the AI may move. At most one move is ever pending.
    ai_due: Option<Instant>,
    think_min: Duration,
    think_max: Duration,
    rng: StdRng,
    game_id: u64,
}

impl<S: KeyValueStore> GameSession<S> {
    pub fn new(leaderboard: Leaderboard<S>, opponent: Box<dyn Agent>, config: &GameConfig) -> Self {
        let (think_min, think_max) = config.think_range();
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed.wrapping_add(1)),
            None => StdRng::from_os_rng(),
        };
        GameSession {
            mode: GameMode::Menu,
            state: GameState::initial(),
            leaderboard,
            opponent,
            ai_due: None,
            think_min,
            think_max,
            rng,
            game_id: 0,
        }
    }

    pub fn mode(&self) -> GameMode {
        self.mode
    }

    /// Current board, player to move and result.
    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn scores(&self) -> ScoreRecord {
        self.leaderboard.scores()
    }

    pub fn leaderboard(&self) -> &Leaderboard<S> {
        &self.leaderboard
    }

    pub fn opponent_name(&self) -> &str {
        self.opponent.name()
    }

    /// True while an AI move is scheduled but not yet played.
    pub fn is_ai_thinking(&self) -> bool {
        self.ai_due.is_some()
    }

    /// Deadline of the pending AI move, if any.
    pub fn ai_due(&self) -> Option<Instant> {
        self.ai_due
    }

    /// Whether a human column selection would currently be considered.
    pub fn accepts_input(&self) -> bool {
        self.mode.is_playing()
            && !self.state.is_terminal()
            && !self.mode.is_ai(self.state.current_player())
    }

    /// Begin a fresh game in `mode`. Selecting [`GameMode::Menu`] is the same
    /// as [`back_to_menu`](Self::back_to_menu).
    pub fn start(&mut self, mode: GameMode) {
        self.mode = mode;
        self.new_game();
        info!(game = self.game_id, mode = mode.title(), "game started");
    }

    /// Start over in the current mode ("play again").
    pub fn reset(&mut self) {
        self.new_game();
        info!(game = self.game_id, mode = self.mode.title(), "game reset");
    }

    pub fn back_to_menu(&mut self) {
        self.mode = GameMode::Menu;
        self.new_game();
        info!("returned to menu");
    }

    /// Human move request for the player to move.
    ///
    /// Rejected with [`MoveError::InputLocked`] in the menu or while the AI is
    /// to move. Any rejection leaves the session unchanged.
    pub fn select_column(&mut self, column: usize, now: Instant) -> Result<Placement, MoveError> {
        if !self.mode.is_playing() {
            return Err(MoveError::InputLocked);
        }
        if self.state.is_terminal() {
            return Err(MoveError::GameOver);
        }
        let player = self.state.current_player();
        if self.mode.is_ai(player) {
            return Err(MoveError::InputLocked);
        }
        self.commit(player, column, now)
    }

    /// Play the pending AI move if its deadline has passed.
    /// Returns the placement when a move was made.
    pub fn poll_ai(&mut self, now: Instant) -> Option<Placement> {
        let due = self.ai_due?;
        if now < due {
            return None;
        }
        self.ai_due = None;

        let ai = self.state.current_player();
        if self.state.is_terminal() || !self.mode.is_ai(ai) {
            return None;
        }

        let Some(column) = self.opponent.select_action(&self.state) else {
            warn!(game = self.game_id, "opponent returned no move");
            return None;
        };
        match self.commit(ai, column, now) {
            Ok(placement) => Some(placement),
            Err(e) => {
                warn!(game = self.game_id, column, error = %e, "opponent chose an illegal move");
                self.schedule_ai(now);
                None
            }
        }
    }

    fn new_game(&mut self) {
        if self.ai_due.take().is_some() {
            debug!(game = self.game_id, "cancelled pending AI move");
        }
        self.state = GameState::initial();
        self.game_id += 1;
    }

    fn commit(&mut self, player: Player, column: usize, now: Instant) -> Result<Placement, MoveError> {
        let (next, placement) = self.state.place(player, column)?;
        self.state = next;
        info!(
            game = self.game_id,
            player = self.mode.label(player),
            column,
            row = placement.row,
            "disc placed"
        );

        match self.state.result() {
            GameResult::InProgress => {
                if self.mode.is_ai(self.state.current_player()) {
                    self.schedule_ai(now);
                }
            }
            result => self.finish(result),
        }
        Ok(placement)
    }

    fn schedule_ai(&mut self, now: Instant) {
        if self.ai_due.is_some() {
            return;
        }
        let delay = if self.think_max > self.think_min {
            self.rng.random_range(self.think_min..=self.think_max)
        } else {
            self.think_min
        };
        self.ai_due = Some(now + delay);
        debug!(game = self.game_id, delay_ms = delay.as_millis() as u64, "AI move scheduled");
    }

    fn finish(&mut self, result: GameResult) {
        match result.winner() {
            Some(player) => info!(
                game = self.game_id,
                winner = self.mode.label(player),
                moves = self.state.move_count(),
                "game won"
            ),
            None => info!(game = self.game_id, moves = self.state.move_count(), "game drawn"),
        }
        debug!("final board:\n{}", self.state.board());

        if let Err(e) = self.leaderboard.record_result(&result, self.mode) {
            warn!(error = %e, "could not save leaderboard");
        }
    }
}
