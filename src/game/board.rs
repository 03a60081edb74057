use std::fmt;
use std::str::FromStr;

use crate::error::{BoardParseError, MoveError};

use super::player::Player;

pub const ROWS: usize = 6;
pub const COLS: usize = 7;

/// Line directions as (row step, column step), in scan order:
/// horizontal, vertical, diagonal `\`, diagonal `/`.
const DIRECTIONS: [(isize, isize); 4] = [(0, 1), (1, 0), (1, 1), (1, -1)];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Cell {
    Empty,
    One,
    Two,
}

impl Cell {
    /// The player occupying this cell, if any.
    pub fn player(self) -> Option<Player> {
        match self {
            Cell::Empty => None,
            Cell::One => Some(Player::One),
            Cell::Two => Some(Player::Two),
        }
    }
}

/// A board coordinate. Row 0 is the top row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Position {
    pub row: usize,
    pub col: usize,
}

impl Position {
    pub const fn new(row: usize, col: usize) -> Self {
        Position { row, col }
    }
}

/// An immutable 6x7 grid snapshot. Moves return a new board.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Board {
    cells: [[Cell; COLS]; ROWS],
}

impl Board {
    /// Create a new empty board
    pub fn new() -> Self {
        Board {
            cells: [[Cell::Empty; COLS]; ROWS],
        }
    }

    /// Get the cell at a specific position
    /// Row 0 is the top, row 5 is the bottom
    pub fn get(&self, row: usize, col: usize) -> Cell {
        self.cells[row][col]
    }

    /// Check if a column is full. Out-of-range columns count as full.
    pub fn is_column_full(&self, col: usize) -> bool {
        if col >= COLS {
            return true;
        }
        self.cells[0][col] != Cell::Empty
    }

    /// Lowest empty row of `col`, scanning from the bottom up.
    /// `None` means the column is full (or does not exist).
    pub fn lowest_open_row(&self, col: usize) -> Option<usize> {
        if col >= COLS {
            return None;
        }
        (0..ROWS).rev().find(|&row| self.cells[row][col] == Cell::Empty)
    }

    /// Columns that still accept a disc, left to right.
    pub fn available_columns(&self) -> Vec<usize> {
        (0..COLS)
            .filter(|&col| self.lowest_open_row(col).is_some())
            .collect()
    }

    /// Drop `player`'s disc into `col`. Returns the new board and the row the
    /// disc settled in; `self` is left untouched.
    pub fn apply_move(&self, col: usize, player: Player) -> Result<(Board, usize), MoveError> {
        if col >= COLS {
            return Err(MoveError::InvalidColumn(col));
        }
        let row = self.lowest_open_row(col).ok_or(MoveError::ColumnFull(col))?;

        let mut next = *self;
        next.cells[row][col] = player.to_cell();
        Ok((next, row))
    }

    /// Check if the board is completely full
    pub fn is_full(&self) -> bool {
        (0..COLS).all(|col| self.is_column_full(col))
    }

    /// Look for four in a row through (row, col) for `player`, treating the
    /// cell itself as `player`'s.
    ///
    /// Each direction builds a run: the cell, then up to 3 matching cells
    /// forward (appended), then up to 3 backward (prepended). The first four
    /// cells of the first run reaching length 4 are returned, so a line of
    /// five or more yields its leading four rather than the four around the
    /// placed disc.
    pub fn detect_win(&self, row: usize, col: usize, player: Player) -> Option<[Position; 4]> {
        let cell = player.to_cell();
        let origin = Position::new(row, col);

        for (dr, dc) in DIRECTIONS {
            let forward = self.walk(origin, dr, dc, cell);
            let backward = self.walk(origin, -dr, -dc, cell);
            if backward.len() + 1 + forward.len() < 4 {
                continue;
            }

            let run = backward
                .iter()
                .rev()
                .copied()
                .chain(std::iter::once(origin))
                .chain(forward.iter().copied());
            let mut line = [origin; 4];
            for (slot, pos) in line.iter_mut().zip(run) {
                *slot = pos;
            }
            return Some(line);
        }
        None
    }

    /// Check if the last move at (row, col) resulted in a win
    pub fn check_win(&self, row: usize, col: usize) -> bool {
        match self.get(row, col).player() {
            Some(player) => self.detect_win(row, col, player).is_some(),
            None => false,
        }
    }

    /// First four-in-a-row anywhere on the board, scanning row-major.
    pub fn find_win(&self) -> Option<(Player, [Position; 4])> {
        for row in 0..ROWS {
            for col in 0..COLS {
                if let Some(player) = self.cells[row][col].player() {
                    if let Some(line) = self.detect_win(row, col, player) {
                        return Some((player, line));
                    }
                }
            }
        }
        None
    }

    /// Full board with no four-in-a-row.
    pub fn is_draw(&self) -> bool {
        self.is_full() && self.find_win().is_none()
    }

    /// Collect up to 3 contiguous `cell`s stepping away from `origin`.
    fn walk(&self, origin: Position, dr: isize, dc: isize, cell: Cell) -> Vec<Position> {
        let mut run = Vec::with_capacity(3);
        for step in 1..4 {
            let r = origin.row as isize + dr * step;
            let c = origin.col as isize + dc * step;
            if r < 0 || c < 0 || r >= ROWS as isize || c >= COLS as isize {
                break;
            }
            let pos = Position::new(r as usize, c as usize);
            if self.cells[pos.row][pos.col] != cell {
                break;
            }
            run.push(pos);
        }
        run
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

/// Six lines of seven characters: `.` empty, `X` player one, `O` player two.
impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, row) in self.cells.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            for cell in row {
                let ch = match cell {
                    Cell::Empty => '.',
                    Cell::One => 'X',
                    Cell::Two => 'O',
                };
                write!(f, "{ch}")?;
            }
        }
        Ok(())
    }
}

/// Parses the `Display` grid. Blank lines and surrounding whitespace are
/// ignored; gravity is not checked, so floating discs are accepted.
impl FromStr for Board {
    type Err = BoardParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lines: Vec<&str> = s
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .collect();
        if lines.len() != ROWS {
            return Err(BoardParseError::RowCount(lines.len()));
        }

        let mut board = Board::new();
        for (row, line) in lines.iter().enumerate() {
            let len = line.chars().count();
            if len != COLS {
                return Err(BoardParseError::RowLength { row, len });
            }
            for (col, ch) in line.chars().enumerate() {
                board.cells[row][col] = match ch {
                    '.' => Cell::Empty,
                    'X' | 'x' => Cell::One,
                    'O' | 'o' => Cell::Two,
                    _ => return Err(BoardParseError::BadCell { row, col, ch }),
                };
            }
        }
        Ok(board)
    }
}
