use std::collections::VecDeque;
use std::time::{Duration, Instant};

use four_in_a_row::ai::{Agent, HeuristicAgent};
use four_in_a_row::config::GameConfig;
use four_in_a_row::game::{GameMode, GameResult, GameState, Player, Position, MAX_MOVES};
use four_in_a_row::score::{read_record, write_record, FileStore, Leaderboard, MemoryStore, ScoreRecord};
use four_in_a_row::session::GameSession;

struct ScriptedAgent(VecDeque<usize>);

impl Agent for ScriptedAgent {
    fn select_action(&mut self, _state: &GameState) -> Option<usize> {
        self.0.pop_front()
    }

    fn name(&self) -> &str {
        "Scripted"
    }
}

fn instant_ai() -> GameConfig {
    GameConfig {
        ai_think_min_ms: 0,
        ai_think_max_ms: 0,
        seed: Some(11),
    }
}

#[test]
fn vertical_win_against_ai_credits_player_one_only() {
    let mut store = MemoryStore::new();
    write_record(&mut store, &ScoreRecord::new(1, 4, 2)).unwrap();

    let agent = ScriptedAgent([6, 6, 5].into_iter().collect());
    let mut session = GameSession::new(Leaderboard::load(store), Box::new(agent), &instant_ai());
    session.start(GameMode::SinglePlayerVsAi);

    let now = Instant::now();
    for _ in 0..4 {
        session.select_column(0, now).unwrap();
        session.poll_ai(now);
    }

    assert_eq!(
        session.state().result(),
        GameResult::Win {
            player: Player::One,
            cells: [
                Position::new(2, 0),
                Position::new(3, 0),
                Position::new(4, 0),
                Position::new(5, 0),
            ],
        }
    );
    assert_eq!(session.scores(), ScoreRecord::new(2, 4, 2));
    assert_eq!(read_record(session.leaderboard().store()), ScoreRecord::new(2, 4, 2));
    assert!(!session.is_ai_thinking());
}

#[test]
fn score_record_survives_restart_on_disk() {
    let dir = tempfile::tempdir().unwrap();
    let mut store = FileStore::new(dir.path());
    write_record(&mut store, &ScoreRecord::new(2, 0, 5)).unwrap();

    let reloaded = Leaderboard::load(FileStore::new(dir.path()));
    assert_eq!(reloaded.scores(), ScoreRecord::new(2, 0, 5));
}

#[test]
fn full_game_against_heuristic_terminates_and_tallies_once() {
    let mut session = GameSession::new(
        Leaderboard::load(MemoryStore::new()),
        Box::new(HeuristicAgent::seeded(2024)),
        &instant_ai(),
    );
    session.start(GameMode::SinglePlayerVsAi);

    let mut now = Instant::now();
    for _ in 0..MAX_MOVES {
        if session.state().is_terminal() {
            break;
        }
        if session.accepts_input() {
            // Human always plays the leftmost open column.
            let col = session.state().legal_actions()[0];
            session.select_column(col, now).unwrap();
        } else {
            assert!(session.poll_ai(now).is_some());
        }
        now += Duration::from_millis(1);
    }

    assert!(session.state().is_terminal());
    let scores = session.scores();
    match session.state().result() {
        GameResult::Win { player: Player::One, .. } => assert_eq!(scores, ScoreRecord::new(1, 0, 0)),
        GameResult::Win { player: Player::Two, .. } => assert_eq!(scores, ScoreRecord::new(0, 0, 1)),
        _ => assert_eq!(scores, ScoreRecord::default()),
    }
}
