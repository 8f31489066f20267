use crossterm::event::{KeyCode, KeyEvent};
use unicode_segmentation::UnicodeSegmentation;

use super::app::{App, Mode};

/// Handle a key event in the current mode
pub fn handle_key(app: &mut App, key: KeyEvent) {
    // ignore bare modifier presses
    if matches!(key.code, KeyCode::Modifier(_)) {
        return;
    }

    // help overlay swallows the next key
    if app.show_help {
        app.show_help = false;
        return;
    }

    match app.mode {
        Mode::Navigate => handle_navigate(app, key),
        Mode::Input(_) => handle_input(app, key),
        Mode::Search => handle_search(app, key),
    }
}

fn handle_navigate(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Char('q') => app.should_quit = true,

        // cursor
        KeyCode::Char('j') | KeyCode::Down => move_cursor(app, 1),
        KeyCode::Char('k') | KeyCode::Up => move_cursor(app, -1),
        KeyCode::Char('g') | KeyCode::Home => app.cursor = 0,
        KeyCode::Char('G') | KeyCode::End => {
            app.cursor = app.visible().len().saturating_sub(1);
        }

        // task commands
        KeyCode::Char(' ') | KeyCode::Char('x') => app.toggle_selected(),
        KeyCode::Char('a') => app.begin_add(),
        KeyCode::Char('e') | KeyCode::Enter => app.begin_edit(),
        KeyCode::Char('d') => app.delete_selected(),
        KeyCode::Char('p') => app.cycle_selected_priority(),
        KeyCode::Char('J') => app.move_selected(1),
        KeyCode::Char('K') => app.move_selected(-1),

        // view selectors
        KeyCode::Char('f') => {
            app.filter = app.filter.cycle();
            app.clamp_cursor();
        }
        KeyCode::Char('s') => {
            app.sort = app.sort.cycle();
            app.clamp_cursor();
        }

        // search
        KeyCode::Char('/') => {
            app.search_input.clear();
            app.mode = Mode::Search;
        }
        KeyCode::Char('n') => jump_to_match(app, true),
        KeyCode::Char('N') => jump_to_match(app, false),

        // timer
        KeyCode::Char('S') => app.toggle_timer(),
        KeyCode::Char('r') => app.engine.reset(),
        KeyCode::Char('+') | KeyCode::Char('=') => app.adjust_duration(1),
        KeyCode::Char('-') => app.adjust_duration(-1),

        // chrome
        KeyCode::Char('t') => app.toggle_theme(),
        KeyCode::Char('?') => app.show_help = true,

        _ => {}
    }
}

fn move_cursor(app: &mut App, delta: isize) {
    let len = app.visible().len();
    if len == 0 {
        return;
    }
    let next = app.cursor as isize + delta;
    app.cursor = next.clamp(0, len as isize - 1) as usize;
}

// ---------------------------------------------------------------------------
// Input line (add / edit title)
// ---------------------------------------------------------------------------

fn handle_input(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Esc => app.cancel_input(),
        KeyCode::Enter => app.commit_input(),
        KeyCode::Tab => app.edit_priority = app.edit_priority.cycle(),
        KeyCode::Backspace => {
            if app.edit_cursor > 0 {
                let start = prev_boundary(&app.edit_buffer, app.edit_cursor);
                app.edit_buffer.replace_range(start..app.edit_cursor, "");
                app.edit_cursor = start;
            }
        }
        KeyCode::Delete => {
            if app.edit_cursor < app.edit_buffer.len() {
                let end = next_boundary(&app.edit_buffer, app.edit_cursor);
                app.edit_buffer.replace_range(app.edit_cursor..end, "");
            }
        }
        KeyCode::Left => app.edit_cursor = prev_boundary(&app.edit_buffer, app.edit_cursor),
        KeyCode::Right => app.edit_cursor = next_boundary(&app.edit_buffer, app.edit_cursor),
        KeyCode::Home => app.edit_cursor = 0,
        KeyCode::End => app.edit_cursor = app.edit_buffer.len(),
        KeyCode::Char(c) => {
            app.edit_buffer.insert(app.edit_cursor, c);
            app.edit_cursor += c.len_utf8();
        }
        _ => {}
    }
}

/// Previous grapheme boundary before `pos`
fn prev_boundary(s: &str, pos: usize) -> usize {
    s[..pos]
        .grapheme_indices(true)
        .last()
        .map(|(i, _)| i)
        .unwrap_or(0)
}

/// Next grapheme boundary after `pos`
fn next_boundary(s: &str, pos: usize) -> usize {
    s[pos..]
        .graphemes(true)
        .next()
        .map(|g| pos + g.len())
        .unwrap_or(s.len())
}

// ---------------------------------------------------------------------------
// Search
// ---------------------------------------------------------------------------

fn handle_search(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Esc => {
            app.search_input.clear();
            app.mode = Mode::Navigate;
        }
        KeyCode::Enter => {
            if !app.search_input.is_empty() {
                app.last_search = Some(app.search_input.clone());
            }
            app.search_input.clear();
            app.mode = Mode::Navigate;
            jump_to_match(app, true);
        }
        KeyCode::Backspace => {
            app.search_input.pop();
        }
        KeyCode::Char(c) => app.search_input.push(c),
        _ => {}
    }
}

/// Move the cursor to the next/previous visible task matching the active
/// search, wrapping around the list.
fn jump_to_match(app: &mut App, forward: bool) {
    let Some(re) = app.active_search_re() else {
        return;
    };
    let titles: Vec<String> = app.visible().iter().map(|t| t.title.clone()).collect();
    if titles.is_empty() {
        return;
    }

    let len = titles.len();
    let step = |i: usize| -> usize {
        if forward { (i + 1) % len } else { (i + len - 1) % len }
    };

    let mut idx = step(app.cursor.min(len - 1));
    for _ in 0..len {
        if re.is_match(&titles[idx]) {
            app.cursor = idx;
            return;
        }
        idx = step(idx);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Priority;
    use crate::tui::app::InputTarget;
    use crate::tui::render::test_helpers::{app_with_tasks, key};
    use crossterm::event::KeyCode;

    #[test]
    fn test_cursor_moves_and_clamps() {
        let mut app = app_with_tasks(3);
        handle_key(&mut app, key(KeyCode::Char('j')));
        assert_eq!(app.cursor, 1);
        handle_key(&mut app, key(KeyCode::Char('k')));
        handle_key(&mut app, key(KeyCode::Char('k')));
        assert_eq!(app.cursor, 0);
        handle_key(&mut app, key(KeyCode::Char('G')));
        assert_eq!(app.cursor, 2);
        handle_key(&mut app, key(KeyCode::Char('j')));
        assert_eq!(app.cursor, 2);
    }

    #[test]
    fn test_space_toggles_selected() {
        let mut app = app_with_tasks(2);
        handle_key(&mut app, key(KeyCode::Char(' ')));
        // cursor 0 = newest task = id 2
        let task = app.store.tasks().iter().find(|t| t.id.0 == 2).unwrap();
        assert!(task.completed);
    }

    #[test]
    fn test_add_flow_types_and_commits() {
        let mut app = app_with_tasks(0);
        handle_key(&mut app, key(KeyCode::Char('a')));
        assert!(matches!(app.mode, Mode::Input(InputTarget::NewTask)));

        for c in "Call mom".chars() {
            handle_key(&mut app, key(KeyCode::Char(c)));
        }
        // Tab bumps priority medium → high
        handle_key(&mut app, key(KeyCode::Tab));
        handle_key(&mut app, key(KeyCode::Enter));

        assert_eq!(app.mode, Mode::Navigate);
        assert_eq!(app.store.tasks().len(), 1);
        assert_eq!(app.store.tasks()[0].title, "Call mom");
        assert_eq!(app.store.tasks()[0].priority, Priority::High);
    }

    #[test]
    fn test_input_esc_cancels() {
        let mut app = app_with_tasks(0);
        handle_key(&mut app, key(KeyCode::Char('a')));
        handle_key(&mut app, key(KeyCode::Char('x')));
        handle_key(&mut app, key(KeyCode::Esc));
        assert_eq!(app.mode, Mode::Navigate);
        assert!(app.store.tasks().is_empty());
    }

    #[test]
    fn test_backspace_removes_whole_grapheme() {
        let mut app = app_with_tasks(0);
        app.begin_add();
        // flag emoji is multiple code points, one grapheme
        app.edit_buffer = "ok🇩🇪".into();
        app.edit_cursor = app.edit_buffer.len();
        handle_key(&mut app, key(KeyCode::Backspace));
        assert_eq!(app.edit_buffer, "ok");
        handle_key(&mut app, key(KeyCode::Backspace));
        assert_eq!(app.edit_buffer, "o");
    }

    #[test]
    fn test_search_flow_jumps_to_match() {
        let mut app = app_with_tasks(3);
        // titles are "task one", "task two", "task three"; search for "one"
        handle_key(&mut app, key(KeyCode::Char('/')));
        assert_eq!(app.mode, Mode::Search);
        for c in "one".chars() {
            handle_key(&mut app, key(KeyCode::Char(c)));
        }
        handle_key(&mut app, key(KeyCode::Enter));

        assert_eq!(app.mode, Mode::Navigate);
        assert_eq!(app.last_search.as_deref(), Some("one"));
        // "task one" is id 1, shown last in the newest-first view
        assert_eq!(app.cursor, 2);
    }

    #[test]
    fn test_n_wraps_around() {
        let mut app = app_with_tasks(3);
        app.last_search = Some("task".into());
        handle_key(&mut app, key(KeyCode::Char('n')));
        assert_eq!(app.cursor, 1);
        handle_key(&mut app, key(KeyCode::Char('n')));
        assert_eq!(app.cursor, 2);
        handle_key(&mut app, key(KeyCode::Char('n')));
        assert_eq!(app.cursor, 0);
    }

    #[test]
    fn test_filter_cycle_clamps_cursor() {
        let mut app = app_with_tasks(3);
        app.cursor = 2;
        // pending view still has 3 tasks; completed view has none
        handle_key(&mut app, key(KeyCode::Char('f')));
        assert_eq!(app.visible().len(), 3);
        handle_key(&mut app, key(KeyCode::Char('f')));
        assert!(app.visible().is_empty());
        assert_eq!(app.cursor, 0);
    }

    #[test]
    fn test_help_overlay_swallows_next_key() {
        let mut app = app_with_tasks(1);
        handle_key(&mut app, key(KeyCode::Char('?')));
        assert!(app.show_help);
        handle_key(&mut app, key(KeyCode::Char('d')));
        assert!(!app.show_help);
        // the delete did not fire
        assert_eq!(app.store.tasks().len(), 1);
    }

    #[test]
    fn test_timer_keys() {
        let mut app = app_with_tasks(0);
        handle_key(&mut app, key(KeyCode::Char('S')));
        assert!(app.engine.state().is_running);
        handle_key(&mut app, key(KeyCode::Char('S')));
        assert!(!app.engine.state().is_running);
        handle_key(&mut app, key(KeyCode::Char('+')));
        assert_eq!(app.engine.state().duration, 1500 + 60);
        handle_key(&mut app, key(KeyCode::Char('r')));
        assert!(!app.engine.state().is_running);
    }
}
