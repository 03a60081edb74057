use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

use crate::score::ScoreRecord;

use super::app::MenuItem;

pub struct MenuView<'a> {
    pub items: &'a [MenuItem],
    pub selected: usize,
    pub scores: ScoreRecord,
    pub show_leaderboard: bool,
}

pub fn render(frame: &mut Frame, view: &MenuView) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),                             // Title
            Constraint::Length(view.items.len() as u16 + 2), // Items
            Constraint::Min(0),
            Constraint::Length(3), // Controls
        ])
        .split(frame.area());

    let title = Paragraph::new(Line::from(vec![
        Span::styled("Four ", Style::default().fg(Color::Red).add_modifier(Modifier::BOLD)),
        Span::styled("in a ", Style::default().add_modifier(Modifier::BOLD)),
        Span::styled("Row", Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)),
    ]))
    .alignment(Alignment::Center)
    .block(Block::default().borders(Borders::ALL));
    frame.render_widget(title, chunks[0]);

    let lines: Vec<Line> = view
        .items
        .iter()
        .enumerate()
        .map(|(i, item)| {
            if i == view.selected {
                Line::from(Span::styled(
                    format!("▶ {} ◀", item.label()),
                    Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
                ))
            } else {
                Line::from(item.label())
            }
        })
        .collect();
    let menu = Paragraph::new(lines)
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL).title("Menu"));
    frame.render_widget(menu, chunks[1]);

    let controls = Paragraph::new("↑/↓: Select  |  Enter: Confirm  |  L: Leaderboard  |  Q: Quit")
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL).title("Controls"));
    frame.render_widget(controls, chunks[3]);

    if view.show_leaderboard {
        render_leaderboard(frame, view.scores, chunks[2]);
    }
}

/// Leaderboard rows as (label, wins).
pub fn leaderboard_rows(scores: ScoreRecord) -> [(&'static str, u32); 3] {
    [
        ("Player 1", scores.player1),
        ("Player 2", scores.player2),
        ("AI", scores.ai),
    ]
}

fn render_leaderboard(frame: &mut Frame, scores: ScoreRecord, area: Rect) {
    let lines: Vec<Line> = leaderboard_rows(scores)
        .into_iter()
        .map(|(label, wins)| {
            Line::from(vec![
                Span::styled(format!("{label:<10}"), Style::default().add_modifier(Modifier::BOLD)),
                Span::styled(format!("{wins:>5}"), Style::default().fg(Color::Yellow)),
            ])
        })
        .collect();

    let width = 26.min(area.width);
    let height = (lines.len() as u16 + 2).min(area.height);
    let panel = Rect {
        x: area.x + area.width.saturating_sub(width) / 2,
        y: area.y,
        width,
        height,
    };

    frame.render_widget(Clear, panel);
    frame.render_widget(
        Paragraph::new(lines)
            .alignment(Alignment::Center)
            .block(Block::default().borders(Borders::ALL).title("Leaderboard")),
        panel,
    );
}
