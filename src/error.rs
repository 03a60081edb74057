use std::path::PathBuf;

use crate::game::{Player, COLS, ROWS};

/// Reasons a move is rejected. A rejected move never changes any state.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MoveError {
    #[error("column {0} is out of range (0..{cols})", cols = COLS)]
    InvalidColumn(usize),

    #[error("column {0} is full")]
    ColumnFull(usize),

    #[error("the game is already over")]
    GameOver,

    #[error("it is {expected}'s turn, not {attempted}'s")]
    NotYourTurn { expected: Player, attempted: Player },

    #[error("not accepting input right now")]
    InputLocked,
}

/// Errors raised by a score store backend.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to write {path}: {source}")]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to encode record: {0}")]
    Encode(#[from] serde_json::Error),
}

/// Errors raised when parsing a board from its text grid.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BoardParseError {
    #[error("expected {rows} rows, found {0}", rows = ROWS)]
    RowCount(usize),

    #[error("row {row} has {len} cells, expected {cols}", cols = COLS)]
    RowLength { row: usize, len: usize },

    #[error("unexpected character {ch:?} at row {row}, column {col}")]
    BadCell { row: usize, col: usize, ch: char },
}

/// Errors raised while installing the log subscriber.
#[derive(Debug, thiserror::Error)]
pub enum LoggingError {
    #[error("failed to open log file {path}: {source}")]
    Open {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("invalid log filter: {0}")]
    Filter(#[from] tracing_subscriber::filter::ParseError),

    #[error("failed to install log subscriber: {0}")]
    Install(String),
}

/// Errors that can occur when loading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    FileRead {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse TOML: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("config validation error: {0}")]
    Validation(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_move_error_display() {
        let err = MoveError::NotYourTurn {
            expected: Player::Two,
            attempted: Player::One,
        };
        assert_eq!(err.to_string(), "it is Player 2's turn, not Player 1's");
        assert_eq!(
            MoveError::InvalidColumn(9).to_string(),
            "column 9 is out of range (0..7)"
        );
    }

    #[test]
    fn test_board_parse_error_display() {
        let err = BoardParseError::BadCell { row: 2, col: 4, ch: 'q' };
        assert_eq!(err.to_string(), "unexpected character 'q' at row 2, column 4");
        assert_eq!(BoardParseError::RowCount(5).to_string(), "expected 6 rows, found 5");
        assert_eq!(
            BoardParseError::RowLength { row: 1, len: 8 }.to_string(),
            "row 1 has 8 cells, expected 7"
        );
    }

    #[test]
    fn test_config_error_display() {
        let err = ConfigError::Validation("game.ai_think_min_ms must be <= max".to_string());
        assert_eq!(
            err.to_string(),
            "config validation error: game.ai_think_min_ms must be <= max"
        );
    }
}
