use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Paragraph};
use unicode_width::UnicodeWidthStr;

use crate::model::{Priority, Task};
use crate::tui::app::App;

/// Render the task list pane
pub fn render_task_list(frame: &mut Frame, app: &App, area: Rect) {
    let theme = &app.theme;
    let visible = app.visible();

    let title = format!(
        " Tasks ({}) · {} · by {} ",
        visible.len(),
        app.filter,
        app.sort
    );
    let block = Block::bordered()
        .title(title)
        .border_style(Style::default().fg(theme.border).bg(theme.background))
        .style(Style::default().bg(theme.surface));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    if inner.height == 0 {
        return;
    }

    if visible.is_empty() {
        let message = if app.filter == crate::ops::view::Filter::All {
            "No tasks yet. Press a to add one.".to_string()
        } else {
            format!("No {} tasks found.", app.filter)
        };
        let paragraph = Paragraph::new(Line::from(Span::styled(
            message,
            Style::default().fg(theme.text_secondary),
        )))
        .style(Style::default().bg(theme.surface))
        .centered();
        frame.render_widget(paragraph, inner);
        return;
    }

    let search_re = app.active_search_re();
    let height = inner.height as usize;
    // keep the cursor on screen with a stateless window
    let start = if app.cursor >= height {
        app.cursor + 1 - height
    } else {
        0
    };

    let mut lines = Vec::new();
    for (i, task) in visible.iter().enumerate().skip(start).take(height) {
        let selected = i == app.cursor;
        let matches = search_re
            .as_ref()
            .is_some_and(|re| re.is_match(&task.title));
        lines.push(task_row(app, task, selected, matches, inner.width));
    }

    frame.render_widget(
        Paragraph::new(lines).style(Style::default().bg(theme.surface)),
        inner,
    );
}

fn task_row<'a>(
    app: &'a App,
    task: &'a Task,
    selected: bool,
    matches: bool,
    width: u16,
) -> Line<'a> {
    let theme = &app.theme;
    let bg = if selected {
        theme.selection_bg
    } else {
        theme.surface
    };

    let marker = if selected { "\u{25B8} " } else { "  " };
    let checkbox = if task.completed { "[x]" } else { "[ ]" };
    let checkbox_fg = if task.completed {
        theme.success
    } else {
        theme.text
    };

    let mut title_style = Style::default().bg(bg);
    title_style = if task.completed {
        title_style
            .fg(theme.text_secondary)
            .add_modifier(Modifier::CROSSED_OUT)
    } else if matches {
        title_style.fg(theme.primary).add_modifier(Modifier::BOLD)
    } else {
        title_style.fg(theme.text)
    };

    let date = task.created_at.format("%m-%d").to_string();
    // marker(2) + checkbox(3) + gaps(3) + priority(2) + date(7)
    let title_width = (width as usize).saturating_sub(17);
    let title = truncate_to_width(&task.title, title_width);
    let pad = title_width.saturating_sub(title.width());

    Line::from(vec![
        Span::styled(marker, Style::default().fg(theme.primary).bg(bg)),
        Span::styled(checkbox, Style::default().fg(checkbox_fg).bg(bg)),
        Span::styled(" ", Style::default().bg(bg)),
        Span::styled(
            priority_marker(task.priority),
            Style::default().fg(theme.priority_color(task.priority)).bg(bg),
        ),
        Span::styled(" ", Style::default().bg(bg)),
        Span::styled(title, title_style),
        Span::styled(" ".repeat(pad + 1), Style::default().bg(bg)),
        Span::styled(date, Style::default().fg(theme.text_secondary).bg(bg)),
        Span::styled(" ", Style::default().bg(bg)),
    ])
}

fn priority_marker(priority: Priority) -> &'static str {
    match priority {
        Priority::High => "!!",
        Priority::Medium => "! ",
        Priority::Low => "  ",
    }
}

/// Trim to a display width, appending an ellipsis when something was cut.
fn truncate_to_width(s: &str, max: usize) -> String {
    use unicode_width::UnicodeWidthChar;

    if s.width() <= max {
        return s.to_string();
    }
    let mut out = String::new();
    let mut used = 0;
    for c in s.chars() {
        let w = c.width().unwrap_or(0);
        if used + w + 1 > max {
            break;
        }
        used += w;
        out.push(c);
    }
    out.push('\u{2026}');
    out
}
