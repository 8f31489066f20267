use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Gauge, Paragraph};

use crate::timer::format_time;
use crate::tui::app::App;

/// Render the stats and timer panes
pub fn render_side_panel(frame: &mut Frame, app: &App, area: Rect) {
    let chunks = Layout::vertical([Constraint::Length(7), Constraint::Min(7)]).split(area);
    render_stats(frame, app, chunks[0]);
    render_timer(frame, app, chunks[1]);
}

fn render_stats(frame: &mut Frame, app: &App, area: Rect) {
    let theme = &app.theme;
    let stats = app.stats();

    let block = Block::bordered()
        .title(" Stats ")
        .border_style(Style::default().fg(theme.border).bg(theme.background))
        .style(Style::default().bg(theme.surface));
    let inner = block.inner(area);
    frame.render_widget(block, area);
    if inner.height < 4 {
        return;
    }

    let rows = Layout::vertical([
        Constraint::Length(1),
        Constraint::Length(1),
        Constraint::Length(1),
        Constraint::Length(1),
    ])
    .split(inner);

    let dim = Style::default().fg(theme.text_secondary).bg(theme.surface);
    let text = Style::default().fg(theme.text).bg(theme.surface);

    let counts = Line::from(vec![
        Span::styled("total ", dim),
        Span::styled(stats.total.to_string(), text),
        Span::styled("   done ", dim),
        Span::styled(stats.completed.to_string(), text),
        Span::styled("   open ", dim),
        Span::styled(stats.pending.to_string(), text),
    ]);
    frame.render_widget(Paragraph::new(counts), rows[0]);

    let gauge = Gauge::default()
        .ratio(f64::from(stats.completion_rate) / 100.0)
        .label(format!("{}% done", stats.completion_rate))
        .gauge_style(Style::default().fg(theme.primary).bg(theme.background));
    frame.render_widget(gauge, rows[2]);

    let priorities = Line::from(vec![
        Span::styled("!! ", Style::default().fg(theme.danger).bg(theme.surface)),
        Span::styled(stats.priority.high.to_string(), text),
        Span::styled("   ! ", Style::default().fg(theme.warning).bg(theme.surface)),
        Span::styled(stats.priority.medium.to_string(), text),
        Span::styled("   · ", Style::default().fg(theme.success).bg(theme.surface)),
        Span::styled(stats.priority.low.to_string(), text),
    ]);
    frame.render_widget(Paragraph::new(priorities), rows[3]);
}

fn render_timer(frame: &mut Frame, app: &App, area: Rect) {
    let theme = &app.theme;
    let state = app.engine.state();

    let block = Block::bordered()
        .title(" Focus Timer ")
        .border_style(Style::default().fg(theme.border).bg(theme.background))
        .style(Style::default().bg(theme.surface));
    let inner = block.inner(area);
    frame.render_widget(block, area);
    if inner.height < 5 {
        return;
    }

    let rows = Layout::vertical([
        Constraint::Length(1),
        Constraint::Length(1),
        Constraint::Length(1),
        Constraint::Length(1),
        Constraint::Length(1),
    ])
    .split(inner);

    let readout = Paragraph::new(Line::from(Span::styled(
        format_time(state.time_left),
        Style::default()
            .fg(theme.timer_color(state.expired()))
            .bg(theme.surface)
            .add_modifier(Modifier::BOLD),
    )))
    .centered();
    frame.render_widget(readout, rows[0]);

    let status = if state.expired() {
        Span::styled(
            "Time's up! Great work!",
            Style::default().fg(theme.success).bg(theme.surface),
        )
    } else if state.is_running {
        Span::styled("running", Style::default().fg(theme.primary).bg(theme.surface))
    } else {
        Span::styled(
            "paused",
            Style::default().fg(theme.text_secondary).bg(theme.surface),
        )
    };
    frame.render_widget(Paragraph::new(Line::from(status)).centered(), rows[1]);

    let gauge = Gauge::default()
        .ratio(state.progress() / 100.0)
        .label(format!("{:.0}%", state.progress()))
        .gauge_style(Style::default().fg(theme.primary).bg(theme.background));
    frame.render_widget(gauge, rows[3]);

    if app.config.ui.show_key_hints {
        let hints = Paragraph::new(Line::from(Span::styled(
            "S start/pause · r reset · +/- length",
            Style::default().fg(theme.text_secondary).bg(theme.surface),
        )))
        .centered();
        frame.render_widget(hints, rows[4]);
    }
}
