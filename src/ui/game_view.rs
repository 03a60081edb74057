use crate::game::{Board, Cell, GameMode, GameResult, GameState, Placement, Player, Position, COLS, ROWS};
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

/// Everything the game screen shows.
pub struct GameView<'a> {
    pub state: &'a GameState,
    pub mode: GameMode,
    /// Display name of the computer opponent.
    pub opponent: &'a str,
    pub selected_column: usize,
    /// Disc still falling, with the row it is currently drawn in.
    pub falling: Option<(Placement, usize)>,
    pub ai_thinking: bool,
    pub message: Option<&'a str>,
}

pub fn render(frame: &mut Frame, view: &GameView) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Header
            Constraint::Min(11),   // Board
            Constraint::Length(3), // Message
            Constraint::Length(3), // Controls
        ])
        .split(frame.area());

    render_header(frame, view, chunks[0]);
    render_board(frame, view, chunks[1]);
    render_message(frame, view, chunks[2]);
    render_controls(frame, chunks[3]);
}

pub fn player_color(player: Player) -> Color {
    match player {
        Player::One => Color::Red,
        Player::Two => Color::Yellow,
    }
}

/// Turn indicator text and the player whose colour it uses.
pub fn status_line(view: &GameView) -> (String, Player) {
    let state = view.state;
    // Hold back the result until the deciding disc has landed.
    if let Some((placement, _)) = view.falling {
        if state.is_terminal() {
            return (format!("{}'s turn", view.mode.label(placement.player)), placement.player);
        }
    }

    match state.result() {
        GameResult::Win { player, .. } => (format!("{} wins!", view.mode.label(player)), player),
        GameResult::Draw => ("It's a draw!".to_string(), state.current_player()),
        GameResult::InProgress if view.ai_thinking => {
            ("AI is thinking...".to_string(), state.current_player())
        }
        GameResult::InProgress => {
            let player = state.current_player();
            (format!("{}'s turn", view.mode.label(player)), player)
        }
    }
}

/// Block title: the mode, plus the opponent's name when playing the AI.
pub fn header_title(view: &GameView) -> String {
    match view.mode {
        GameMode::SinglePlayerVsAi => {
            format!("Four in a Row | {} ({})", view.mode.title(), view.opponent)
        }
        mode => format!("Four in a Row | {}", mode.title()),
    }
}

fn render_header(frame: &mut Frame, view: &GameView, area: Rect) {
    let (status, player) = status_line(view);

    let header = Paragraph::new(status)
        .style(
            Style::default()
                .fg(player_color(player))
                .add_modifier(Modifier::BOLD),
        )
        .alignment(Alignment::Center)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(header_title(view)),
        );

    frame.render_widget(header, area);
}

/// Cell content as drawn: the falling disc replaces its landing cell.
fn displayed_cell(board: &Board, view: &GameView, row: usize, col: usize) -> Cell {
    if let Some((placement, current_row)) = view.falling {
        if col == placement.col {
            if row == current_row {
                return placement.player.to_cell();
            }
            if row == placement.row {
                return Cell::Empty;
            }
        }
    }
    board.get(row, col)
}

fn render_board(frame: &mut Frame, view: &GameView, area: Rect) {
    let board = view.state.board();
    let highlight: Vec<Position> = if view.falling.is_none() {
        view.state.winning_cells().map(|c| c.to_vec()).unwrap_or_default()
    } else {
        Vec::new()
    };
    let mut lines = Vec::new();

    // Column numbers with selection indicator
    let mut col_line = vec![Span::raw("   ")]; // Padding (3 chars to match "  ║")
    for col in 0..COLS {
        if col == view.selected_column {
            col_line.push(Span::styled(
                format!(" {} ", col + 1),
                Style::default()
                    .fg(Color::Cyan)
                    .add_modifier(Modifier::BOLD | Modifier::UNDERLINED),
            ));
        } else {
            col_line.push(Span::raw(format!(" {} ", col + 1)));
        }
    }
    col_line.push(Span::raw("  ")); // Suffix padding to match " ║"
    lines.push(Line::from(col_line));

    lines.push(Line::from("  ╔══════════════════════╗"));

    for row in 0..ROWS {
        let mut row_spans = vec![Span::raw("  ║")];

        for col in 0..COLS {
            let winning = highlight.contains(&Position::new(row, col));
            let span = match displayed_cell(board, view, row, col).player() {
                None => Span::styled(" . ", Style::default().fg(Color::DarkGray)),
                Some(player) if winning => Span::styled(
                    " ◉ ",
                    Style::default()
                        .fg(player_color(player))
                        .add_modifier(Modifier::BOLD | Modifier::SLOW_BLINK),
                ),
                Some(player) => Span::styled(" ● ", Style::default().fg(player_color(player))),
            };
            row_spans.push(span);
        }

        row_spans.push(Span::raw(" ║"));
        lines.push(Line::from(row_spans));
    }

    lines.push(Line::from("  ╚══════════════════════╝"));

    // Selection indicator
    let mut indicator_line = vec![Span::raw("   ")];
    for col in 0..COLS {
        if col == view.selected_column {
            indicator_line.push(Span::styled(" ▲ ", Style::default().fg(Color::Cyan)));
        } else {
            indicator_line.push(Span::raw("   "));
        }
    }
    indicator_line.push(Span::raw("  "));
    lines.push(Line::from(indicator_line));

    let board_widget = Paragraph::new(lines).alignment(Alignment::Center);
    frame.render_widget(board_widget, area);
}

fn render_message(frame: &mut Frame, view: &GameView, area: Rect) {
    let game_over = view.state.is_terminal() && view.falling.is_none();
    let text = match view.message {
        Some(msg) => msg.to_string(),
        None if game_over => match view.state.result().winner() {
            Some(player) => format!(
                "{} wins!  r: Play again  m: Main menu",
                player.color_name()
            ),
            None => "It's a draw!  r: Play again  m: Main menu".to_string(),
        },
        None => String::new(),
    };
    let msg_widget = Paragraph::new(text)
        .style(Style::default().fg(Color::Yellow))
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));

    frame.render_widget(msg_widget, area);
}

fn render_controls(frame: &mut Frame, area: Rect) {
    let controls = Paragraph::new(Line::from(
        "←/→ or 1-7: Column  |  Enter: Drop  |  R: Restart  |  M/Esc: Menu  |  Q: Quit",
    ))
    .alignment(Alignment::Center)
    .block(Block::default().borders(Borders::ALL).title("Controls"));

    frame.render_widget(controls, area);
}
