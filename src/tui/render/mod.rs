pub mod help_overlay;
pub mod side_panel;
pub mod status_row;
pub mod task_list;
#[cfg(test)]
pub mod test_helpers;

use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::Style;
use ratatui::widgets::Block;

use super::app::App;

/// Terminal width at which the side panel moves next to the task list
/// instead of below it.
pub const WIDE_BREAKPOINT: u16 = 90;

/// Render the whole screen
pub fn render(frame: &mut Frame, app: &App) {
    let area = frame.area();
    frame.render_widget(
        Block::default().style(Style::default().bg(app.theme.background)),
        area,
    );

    let rows = Layout::vertical([Constraint::Min(1), Constraint::Length(1)]).split(area);
    let (list_area, side_area) = split_main(rows[0]);

    task_list::render_task_list(frame, app, list_area);
    side_panel::render_side_panel(frame, app, side_area);
    status_row::render_status_row(frame, app, rows[1]);

    if app.show_help {
        help_overlay::render_help_overlay(frame, app, area);
    }
}

/// Responsive split: wide terminals get two columns, narrow ones stack
/// the side panel under the list.
fn split_main(area: Rect) -> (Rect, Rect) {
    if area.width >= WIDE_BREAKPOINT {
        let cols =
            Layout::horizontal([Constraint::Min(40), Constraint::Length(38)]).split(area);
        (cols[0], cols[1])
    } else {
        let stacked =
            Layout::vertical([Constraint::Min(6), Constraint::Length(15)]).split(area);
        (stacked[0], stacked[1])
    }
}
