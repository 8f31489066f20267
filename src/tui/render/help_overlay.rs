use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::Style;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Clear, Paragraph};

use crate::tui::app::App;

const KEYS: &[(&str, &str)] = &[
    ("j/k", "move"),
    ("J/K", "reorder task"),
    ("a", "add task"),
    ("e/Enter", "edit task"),
    ("space/x", "toggle done"),
    ("p", "cycle priority"),
    ("d", "delete task"),
    ("f", "cycle filter"),
    ("s", "cycle sort"),
    ("/", "search, n/N next/prev"),
    ("S", "start/pause timer"),
    ("r", "reset timer"),
    ("+/-", "timer length (when paused)"),
    ("t", "toggle theme"),
    ("q", "quit"),
];

/// Render the help overlay over the whole screen
pub fn render_help_overlay(frame: &mut Frame, app: &App, area: Rect) {
    let theme = &app.theme;

    let width = 44.min(area.width);
    let height = (KEYS.len() as u16 + 4).min(area.height);
    let popup = Rect::new(
        area.x + (area.width.saturating_sub(width)) / 2,
        area.y + (area.height.saturating_sub(height)) / 2,
        width,
        height,
    );

    frame.render_widget(Clear, popup);
    let block = Block::bordered()
        .title(" Help ")
        .border_style(Style::default().fg(theme.primary).bg(theme.surface))
        .style(Style::default().bg(theme.surface));
    let inner = block.inner(popup);
    frame.render_widget(block, popup);

    let mut lines = vec![Line::default()];
    for (key, action) in KEYS {
        lines.push(Line::from(vec![
            Span::styled(
                format!("  {:>8}  ", key),
                Style::default().fg(theme.primary).bg(theme.surface),
            ),
            Span::styled(*action, Style::default().fg(theme.text).bg(theme.surface)),
        ]));
    }
    frame.render_widget(Paragraph::new(lines), inner);
}
