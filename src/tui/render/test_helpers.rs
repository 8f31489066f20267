use std::path::PathBuf;

use chrono::{Duration, Local, TimeZone};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::Terminal;
use ratatui::backend::TestBackend;
use ratatui::layout::Rect;

use crate::model::{AppConfig, Priority, Task, TaskId};
use crate::ops::store::{Command, TaskStore};
use crate::tui::app::App;

pub const TERM_W: u16 = 80;
pub const TERM_H: u16 = 24;

/// Render into an in-memory buffer and return plain text (no styles).
pub fn render_to_string<F>(w: u16, h: u16, f: F) -> String
where
    F: FnOnce(&mut ratatui::Frame, Rect),
{
    let backend = TestBackend::new(w, h);
    let mut terminal = Terminal::new(backend).unwrap();
    terminal
        .draw(|frame| {
            let area = frame.area();
            f(frame, area);
        })
        .unwrap();

    let buf = terminal.backend().buffer().clone();
    let w = buf.area.width as usize;
    let lines: Vec<String> = buf
        .content
        .chunks(w)
        .map(|row| {
            let s: String = row.iter().map(|cell| cell.symbol()).collect();
            s.trim_end().to_string()
        })
        .collect();

    // Trim trailing blank lines
    let end = lines
        .iter()
        .rposition(|l| !l.is_empty())
        .map_or(0, |i| i + 1);
    lines[..end].join("\n")
}

const TITLES: &[&str] = &["task one", "task two", "task three", "task four", "task five"];

/// Build an App holding `n` pending medium-priority tasks (ids 1..=n,
/// creation times one minute apart) with no disk backing.
pub fn app_with_tasks(n: usize) -> App {
    let base = Local.with_ymd_and_hms(2025, 5, 1, 9, 0, 0).unwrap();
    let tasks: Vec<Task> = (0..n)
        .map(|i| Task {
            id: TaskId(i as u64 + 1),
            title: TITLES[i % TITLES.len()].to_string(),
            priority: Priority::Medium,
            completed: false,
            created_at: base + Duration::minutes(i as i64),
        })
        .collect();

    let mut store = TaskStore::in_memory();
    store.dispatch(Command::Load(tasks));
    App::new(PathBuf::from("/tmp/focal-test"), store, AppConfig::default())
}

/// A plain key press with no modifiers.
pub fn key(code: KeyCode) -> KeyEvent {
    KeyEvent::new(code, KeyModifiers::NONE)
}
