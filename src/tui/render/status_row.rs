use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::Style;
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::tui::app::{App, InputTarget, Mode};

/// Render the status row (bottom of screen)
pub fn render_status_row(frame: &mut Frame, app: &App, area: Rect) {
    let bg = app.theme.background;
    let width = area.width as usize;

    let line = match app.mode {
        Mode::Navigate => {
            let left = if let Some(ref pattern) = app.last_search {
                Span::styled(
                    format!("/{}", pattern),
                    Style::default().fg(app.theme.text_secondary).bg(bg),
                )
            } else {
                Span::styled(String::new(), Style::default().bg(bg))
            };
            let hint = if app.config.ui.show_key_hints {
                "a add  e edit  space done  d del  f filter  s sort  ? help  q quit"
            } else if app.last_search.is_some() {
                "n/N next/prev"
            } else {
                ""
            };
            padded_line(vec![left], hint, width, bg, &app.theme)
        }
        Mode::Input(target) => {
            let label = match target {
                InputTarget::NewTask => "add",
                InputTarget::EditTask(_) => "edit",
            };
            let spans = vec![
                Span::styled(
                    format!("{}: {}", label, app.edit_buffer),
                    Style::default().fg(app.theme.text).bg(bg),
                ),
                Span::styled("\u{258C}", Style::default().fg(app.theme.primary).bg(bg)),
                Span::styled(
                    format!("  [{}]", app.edit_priority),
                    Style::default()
                        .fg(app.theme.priority_color(app.edit_priority))
                        .bg(bg),
                ),
            ];
            padded_line(spans, "Enter save  Tab priority  Esc cancel", width, bg, &app.theme)
        }
        Mode::Search => {
            let spans = vec![
                Span::styled(
                    format!("/{}", app.search_input),
                    Style::default().fg(app.theme.text).bg(bg),
                ),
                Span::styled("\u{258C}", Style::default().fg(app.theme.primary).bg(bg)),
            ];
            padded_line(spans, "Enter search  Esc cancel", width, bg, &app.theme)
        }
    };

    let paragraph = Paragraph::new(line).style(Style::default().bg(bg));
    frame.render_widget(paragraph, area);
}

/// Left spans, right-aligned hint, padding in between.
fn padded_line<'a>(
    mut spans: Vec<Span<'a>>,
    hint: &'a str,
    width: usize,
    bg: ratatui::style::Color,
    theme: &crate::tui::theme::Theme,
) -> Line<'a> {
    let content_width: usize = spans.iter().map(|s| s.content.chars().count()).sum();
    let hint_width = hint.chars().count();
    if content_width + hint_width < width {
        let padding = width - content_width - hint_width;
        spans.push(Span::styled(" ".repeat(padding), Style::default().bg(bg)));
        spans.push(Span::styled(
            hint,
            Style::default().fg(theme.text_secondary).bg(bg),
        ));
    }
    Line::from(spans)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tui::render::test_helpers::{TERM_W, app_with_tasks, render_to_string};

    #[test]
    fn test_navigate_shows_key_hints() {
        let app = app_with_tasks(1);
        let out = render_to_string(TERM_W, 1, |frame, area| {
            render_status_row(frame, &app, area);
        });
        assert!(out.contains("a add"));
        assert!(out.contains("q quit"));
    }

    #[test]
    fn test_input_mode_shows_buffer_and_priority() {
        let mut app = app_with_tasks(0);
        app.begin_add();
        app.edit_buffer = "water plants".into();
        let out = render_to_string(TERM_W, 1, |frame, area| {
            render_status_row(frame, &app, area);
        });
        assert!(out.contains("add: water plants"));
        assert!(out.contains("[medium]"));
        assert!(out.contains("Tab priority"));
    }

    #[test]
    fn test_search_mode_shows_prompt() {
        let mut app = app_with_tasks(0);
        app.mode = Mode::Search;
        app.search_input = "mil".into();
        let out = render_to_string(TERM_W, 1, |frame, area| {
            render_status_row(frame, &app, area);
        });
        assert!(out.contains("/mil"));
        assert!(out.contains("Enter search"));
    }

    #[test]
    fn test_last_search_shown_in_navigate() {
        let mut app = app_with_tasks(0);
        app.config.ui.show_key_hints = false;
        app.last_search = Some("milk".into());
        let out = render_to_string(TERM_W, 1, |frame, area| {
            render_status_row(frame, &app, area);
        });
        assert!(out.contains("/milk"));
        assert!(out.contains("n/N next/prev"));
    }
}
