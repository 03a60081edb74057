use std::io;
use std::time::{Duration, Instant};

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind};
use ratatui::{backend::Backend, Terminal};

use crate::config::AnimationConfig;
use crate::error::MoveError;
use crate::game::{GameMode, Placement, COLS};
use crate::score::KeyValueStore;
use crate::session::GameSession;

use super::game_view::{self, GameView};
use super::menu_view::{self, MenuView};

/// Menu entries in display order.
pub const MENU_ITEMS: [MenuItem; 4] = [
    MenuItem::PlayVsAi,
    MenuItem::TwoPlayers,
    MenuItem::Leaderboard,
    MenuItem::Quit,
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuItem {
    PlayVsAi,
    TwoPlayers,
    Leaderboard,
    Quit,
}

impl MenuItem {
    pub fn label(self) -> &'static str {
        match self {
            MenuItem::PlayVsAi => "Play vs AI",
            MenuItem::TwoPlayers => "Two Players",
            MenuItem::Leaderboard => "Leaderboard",
            MenuItem::Quit => "Quit",
        }
    }
}

/// A disc on its way down. The engine state already contains it; the view
/// hides the landed disc and draws this one instead until it finishes.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DropAnimation {
    pub placement: Placement,
    started: Instant,
    duration: Duration,
}

impl DropAnimation {
    pub fn new(placement: Placement, started: Instant, duration: Duration) -> Self {
        DropAnimation {
            placement,
            started,
            duration,
        }
    }

    pub fn is_finished(&self, now: Instant) -> bool {
        now.saturating_duration_since(self.started) >= self.duration
    }

    /// Row the falling disc is drawn in, accelerating towards its target.
    pub fn current_row(&self, now: Instant) -> usize {
        let target = self.placement.row;
        if self.duration.is_zero() {
            return target;
        }
        let t = now.saturating_duration_since(self.started).as_secs_f64()
            / self.duration.as_secs_f64();
        let t = t.clamp(0.0, 1.0);
        ((t * t * target as f64).round() as usize).min(target)
    }
}

pub struct App<S> {
    session: GameSession<S>,
    animation: AnimationConfig,
    menu_index: usize,
    show_leaderboard: bool,
    selected_column: usize,
    drop: Option<DropAnimation>,
    should_quit: bool,
    message: Option<String>,
}

impl<S: KeyValueStore> App<S> {
    pub fn new(session: GameSession<S>, animation: AnimationConfig) -> Self {
        App {
            session,
            animation,
            menu_index: 0,
            show_leaderboard: false,
            selected_column: COLS / 2, // Start in middle
            drop: None,
            should_quit: false,
            message: None,
        }
    }

    pub fn session(&self) -> &GameSession<S> {
        &self.session
    }

    pub fn selected_column(&self) -> usize {
        self.selected_column
    }

    pub fn drop_animation(&self) -> Option<&DropAnimation> {
        self.drop.as_ref()
    }

    pub fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }

    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    /// Main application loop
    pub fn run<B: Backend>(&mut self, terminal: &mut Terminal<B>) -> io::Result<()> {
        loop {
            let now = Instant::now();
            self.tick(now);
            terminal.draw(|f| self.render(f, now))?;

            if self.should_quit {
                break;
            }

            self.handle_events()?;
        }
        Ok(())
    }

    /// Advance animations and let a due AI move play.
    pub fn tick(&mut self, now: Instant) {
        if self.drop.is_some_and(|d| d.is_finished(now)) {
            self.drop = None;
        }
        // The AI waits until the previous disc has landed.
        if self.drop.is_none() {
            if let Some(placement) = self.session.poll_ai(now) {
                self.start_drop(placement, now);
            }
        }
    }

    /// Handle keyboard events
    fn handle_events(&mut self) -> io::Result<()> {
        if event::poll(Duration::from_millis(50))? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    self.handle_key(key, Instant::now());
                }
            }
        }
        Ok(())
    }

    /// Handle key press
    pub fn handle_key(&mut self, key: KeyEvent, now: Instant) {
        // Clear message on any key press
        self.message = None;

        if self.session.mode().is_playing() {
            self.handle_game_key(key, now);
        } else {
            self.handle_menu_key(key);
        }
    }

    fn handle_menu_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Esc if self.show_leaderboard => self.show_leaderboard = false,
            KeyCode::Char('q') | KeyCode::Esc => self.should_quit = true,
            KeyCode::Char('l') => self.show_leaderboard = !self.show_leaderboard,
            KeyCode::Up => {
                self.menu_index = (self.menu_index + MENU_ITEMS.len() - 1) % MENU_ITEMS.len();
            }
            KeyCode::Down => {
                self.menu_index = (self.menu_index + 1) % MENU_ITEMS.len();
            }
            KeyCode::Enter | KeyCode::Char(' ') => self.activate(MENU_ITEMS[self.menu_index]),
            _ => {}
        }
    }

    fn activate(&mut self, item: MenuItem) {
        match item {
            MenuItem::PlayVsAi => self.start_game(GameMode::SinglePlayerVsAi),
            MenuItem::TwoPlayers => self.start_game(GameMode::TwoPlayer),
            MenuItem::Leaderboard => self.show_leaderboard = !self.show_leaderboard,
            MenuItem::Quit => self.should_quit = true,
        }
    }

    /// Jump straight into a game, skipping the menu.
    pub fn start_game(&mut self, mode: GameMode) {
        self.session.start(mode);
        self.show_leaderboard = false;
        self.selected_column = COLS / 2;
        self.drop = None;
    }

    fn handle_game_key(&mut self, key: KeyEvent, now: Instant) {
        match key.code {
            KeyCode::Char('q') => self.should_quit = true,
            KeyCode::Esc | KeyCode::Char('m') => {
                self.session.back_to_menu();
                self.drop = None;
            }
            KeyCode::Char('r') => {
                self.session.reset();
                self.drop = None;
                self.selected_column = COLS / 2;
                self.message = Some("New game started!".to_string());
            }
            KeyCode::Left => {
                self.selected_column = self.selected_column.saturating_sub(1);
            }
            KeyCode::Right => {
                if self.selected_column + 1 < COLS {
                    self.selected_column += 1;
                }
            }
            KeyCode::Char(c @ '1'..='7') => {
                self.selected_column = c as usize - '1' as usize;
                self.drop_piece(now);
            }
            KeyCode::Enter | KeyCode::Char(' ') => self.drop_piece(now),
            _ => {}
        }
    }

    /// Drop piece in selected column
    fn drop_piece(&mut self, now: Instant) {
        // Locked while a disc is still falling.
        if self.drop.is_some() {
            return;
        }

        match self.session.select_column(self.selected_column, now) {
            Ok(placement) => self.start_drop(placement, now),
            Err(MoveError::ColumnFull(_)) => {
                self.message = Some("Column is full!".to_string());
            }
            Err(MoveError::GameOver) => {
                self.message = Some("Game over! Press 'r' to play again.".to_string());
            }
            Err(MoveError::InputLocked) => {
                self.message = Some("Wait for the AI to move.".to_string());
            }
            Err(e) => self.message = Some(e.to_string()),
        }
    }

    fn start_drop(&mut self, placement: Placement, now: Instant) {
        let duration = self.animation.drop_duration(placement.row);
        self.drop = Some(DropAnimation::new(placement, now, duration));
    }

    /// Render the UI
    fn render(&self, frame: &mut ratatui::Frame, now: Instant) {
        if self.session.mode().is_playing() {
            let view = GameView {
                state: self.session.state(),
                mode: self.session.mode(),
                opponent: self.session.opponent_name(),
                selected_column: self.selected_column,
                falling: self.drop.map(|d| (d.placement, d.current_row(now))),
                ai_thinking: self.session.is_ai_thinking(),
                message: self.message.as_deref(),
            };
            game_view::render(frame, &view);
        } else {
            let view = MenuView {
                items: &MENU_ITEMS,
                selected: self.menu_index,
                scores: self.session.scores(),
                show_leaderboard: self.show_leaderboard,
            };
            menu_view::render(frame, &view);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ai::Agent;
    use crate::config::GameConfig;
    use crate::game::{GameState, Player};
    use crate::score::{Leaderboard, MemoryStore};

    struct FirstOpenColumn;

    impl Agent for FirstOpenColumn {
        fn select_action(&mut self, state: &GameState) -> Option<usize> {
            state.legal_actions().first().copied()
        }

        fn name(&self) -> &str {
            "FirstOpen"
        }
    }

    fn app() -> App<MemoryStore> {
        let config = GameConfig {
            ai_think_min_ms: 0,
            ai_think_max_ms: 0,
            seed: Some(1),
        };
        let session = GameSession::new(
            Leaderboard::load(MemoryStore::new()),
            Box::new(FirstOpenColumn),
            &config,
        );
        App::new(session, AnimationConfig::default())
    }

    fn key(app: &mut App<MemoryStore>, code: KeyCode, now: Instant) {
        app.handle_key(KeyEvent::from(code), now);
    }

    #[test]
    fn test_drop_animation_progress() {
        let placement = Placement { player: Player::One, row: 5, col: 2 };
        let t0 = Instant::now();
        let anim = DropAnimation::new(placement, t0, Duration::from_millis(1100));
        assert_eq!(anim.current_row(t0), 0);
        assert!(!anim.is_finished(t0 + Duration::from_millis(500)));
        assert_eq!(anim.current_row(t0 + Duration::from_millis(1100)), 5);
        assert!(anim.is_finished(t0 + Duration::from_millis(1100)));
    }

    #[test]
    fn test_menu_navigation_starts_two_player_game() {
        let mut app = app();
        let now = Instant::now();
        key(&mut app, KeyCode::Down, now);
        key(&mut app, KeyCode::Enter, now);
        assert_eq!(app.session().mode(), GameMode::TwoPlayer);

        key(&mut app, KeyCode::Esc, now);
        assert_eq!(app.session().mode(), GameMode::Menu);
        key(&mut app, KeyCode::Up, now);
        key(&mut app, KeyCode::Up, now);
        key(&mut app, KeyCode::Enter, now);
        assert!(app.should_quit());
    }

    #[test]
    fn test_input_locked_while_disc_falls() {
        let mut app = app();
        app.start_game(GameMode::TwoPlayer);
        let t0 = Instant::now();

        key(&mut app, KeyCode::Char('4'), t0);
        assert_eq!(app.session().state().move_count(), 1);
        assert!(app.drop_animation().is_some());

        key(&mut app, KeyCode::Char('4'), t0 + Duration::from_millis(100));
        assert_eq!(app.session().state().move_count(), 1);

        app.tick(t0 + Duration::from_secs(2));
        assert!(app.drop_animation().is_none());
        key(&mut app, KeyCode::Enter, t0 + Duration::from_secs(2));
        assert_eq!(app.session().state().move_count(), 2);
        assert_eq!(app.selected_column(), 3);
    }

    #[test]
    fn test_ai_waits_for_landing_then_moves() {
        let mut app = app();
        app.start_game(GameMode::SinglePlayerVsAi);
        let t0 = Instant::now();

        key(&mut app, KeyCode::Char('7'), t0);
        assert!(app.session().is_ai_thinking());

        app.tick(t0 + Duration::from_millis(10));
        assert_eq!(app.session().state().move_count(), 1, "disc still falling");

        app.tick(t0 + Duration::from_secs(2));
        assert_eq!(app.session().state().move_count(), 2);
        assert_eq!(
            app.drop_animation().map(|d| d.placement.player),
            Some(Player::Two)
        );
    }

    #[test]
    fn test_full_column_shows_message() {
        let mut app = app();
        app.start_game(GameMode::TwoPlayer);
        let mut now = Instant::now();
        for _ in 0..6 {
            key(&mut app, KeyCode::Char('1'), now);
            now += Duration::from_secs(2);
            app.tick(now);
        }
        key(&mut app, KeyCode::Char('1'), now);
        assert_eq!(app.message(), Some("Column is full!"));
    }
}
