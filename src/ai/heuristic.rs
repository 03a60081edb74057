use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::debug;

use crate::game::{Board, GameState, Player};

use super::agent::Agent;

/// Why the heuristic picked a column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveReason {
    Win,
    Block,
    Random,
}

/// One-ply greedy move choice: take an immediate win, else block the
/// opponent's immediate win, else play a uniformly random open column.
/// Wins and blocks are searched left to right.
pub fn choose_ai_move<R: Rng + ?Sized>(
    board: &Board,
    ai: Player,
    opponent: Player,
    rng: &mut R,
) -> Option<usize> {
    decide(board, ai, opponent, rng).map(|(col, _)| col)
}

/// Like [`choose_ai_move`] but also reports which rule fired.
pub fn decide<R: Rng + ?Sized>(
    board: &Board,
    ai: Player,
    opponent: Player,
    rng: &mut R,
) -> Option<(usize, MoveReason)> {
    let available = board.available_columns();
    if available.is_empty() {
        return None;
    }

    if let Some(col) = winning_column(board, &available, ai) {
        return Some((col, MoveReason::Win));
    }
    if let Some(col) = winning_column(board, &available, opponent) {
        return Some((col, MoveReason::Block));
    }

    let idx = rng.random_range(0..available.len());
    Some((available[idx], MoveReason::Random))
}

/// First column in `available` where dropping `player` connects four.
pub fn winning_column(board: &Board, available: &[usize], player: Player) -> Option<usize> {
    available.iter().copied().find(|&col| {
        board
            .apply_move(col, player)
            .is_ok_and(|(next, row)| next.detect_win(row, col, player).is_some())
    })
}

/// The built-in opponent: [`choose_ai_move`] with its own random source.
pub struct HeuristicAgent {
    rng: StdRng,
}

impl HeuristicAgent {
    pub fn new() -> Self {
        HeuristicAgent {
            rng: StdRng::from_os_rng(),
        }
    }

    /// Deterministic agent for replays and tests.
    pub fn seeded(seed: u64) -> Self {
        HeuristicAgent {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Seeded when `seed` is given, otherwise from OS entropy.
    pub fn from_seed(seed: Option<u64>) -> Self {
        seed.map_or_else(Self::new, Self::seeded)
    }
}

impl Default for HeuristicAgent {
    fn default() -> Self {
        Self::new()
    }
}

impl Agent for HeuristicAgent {
    fn select_action(&mut self, state: &GameState) -> Option<usize> {
        if state.is_terminal() {
            return None;
        }
        let ai = state.current_player();
        let (col, reason) = decide(state.board(), ai, ai.other(), &mut self.rng)?;
        debug!(column = col, ?reason, player = %ai, "heuristic move");
        Some(col)
    }

    fn name(&self) -> &str {
        "Heuristic"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::COLS;

    fn board(s: &str) -> Board {
        s.parse().unwrap()
    }

    #[test]
    fn test_win_beats_block() {
        // X threatens column 3, but O can win in column 6 first.
        let board = board(
            "
            .......
            .......
            .......
            ......O
            ......O
            XXX...O
            ",
        );
        let mut rng = StdRng::seed_from_u64(1);
        assert_eq!(
            decide(&board, Player::Two, Player::One, &mut rng),
            Some((6, MoveReason::Win))
        );
    }

    #[test]
    fn test_blocks_opponent_threat() {
        let board = board(
            "
            .......
            .......
            .......
            .......
            .......
            XXX.OO.
            ",
        );
        let mut rng = StdRng::seed_from_u64(1);
        assert_eq!(
            decide(&board, Player::Two, Player::One, &mut rng),
            Some((3, MoveReason::Block))
        );
    }

    #[test]
    fn test_first_winning_column_from_the_left() {
        let board = board(
            "
            .......
            .......
            .......
            .O...O.
            .O...O.
            XOX.XOX
            ",
        );
        let mut rng = StdRng::seed_from_u64(1);
        assert_eq!(choose_ai_move(&board, Player::Two, Player::One, &mut rng), Some(1));
        assert_eq!(winning_column(&board, &board.available_columns(), Player::One), None);
    }

    #[test]
    fn test_random_fallback_is_seeded_and_legal() {
        let board = board(
            "
            X......
            O......
            X......
            O......
            X......
            O......
            ",
        );
        let mut a = StdRng::seed_from_u64(42);
        let mut b = StdRng::seed_from_u64(42);
        for _ in 0..50 {
            let (col, reason) = decide(&board, Player::Two, Player::One, &mut a).unwrap();
            assert_eq!(reason, MoveReason::Random);
            assert_ne!(col, 0, "column 0 is full");
            assert_eq!(Some(col), choose_ai_move(&board, Player::Two, Player::One, &mut b));
        }
    }

    #[test]
    fn test_random_fallback_covers_every_open_column() {
        let board = Board::new();
        let mut rng = StdRng::seed_from_u64(7);
        let mut seen = [false; COLS];
        for _ in 0..500 {
            let col = choose_ai_move(&board, Player::Two, Player::One, &mut rng).unwrap();
            seen[col] = true;
        }
        assert!(seen.iter().all(|&s| s), "columns seen: {seen:?}");
    }

    #[test]
    fn test_full_board_has_no_move() {
        let board = board(
            "
            XXOOXXO
            OOXXOOX
            XXOOXXO
            OOXXOOX
            XXOOXXO
            OOXXOOX
            ",
        );
        let mut rng = StdRng::seed_from_u64(3);
        assert_eq!(choose_ai_move(&board, Player::Two, Player::One, &mut rng), None);
    }

    #[test]
    fn test_agent_plays_for_player_to_move() {
        // One has three on the bottom row; Two (to move) must block.
        let state = [0, 0, 1, 1, 2]
            .iter()
            .fold(GameState::initial(), |s, &c| s.play(c).unwrap());
        assert_eq!(state.current_player(), Player::Two);

        let mut agent = HeuristicAgent::seeded(9);
        // Two also has 0,1 on row 4; blocking at 3 is the only forced move.
        assert_eq!(agent.select_action(&state), Some(3));
        assert_eq!(agent.name(), "Heuristic");
    }

    #[test]
    fn test_agent_has_no_move_after_game_over() {
        let state = [0, 0, 1, 1, 2, 2, 3]
            .iter()
            .fold(GameState::initial(), |s, &c| s.play(c).unwrap());
        let mut agent = HeuristicAgent::seeded(9);
        assert_eq!(agent.select_action(&state), None);
    }
}
