use std::io;
use std::path::PathBuf;
use std::time::Duration;

use crossterm::event::{self, Event, KeyEventKind};
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;
use regex::Regex;

use crate::io::state::{UiState, read_ui_state, write_ui_state};
use crate::io::storage::Storage;
use crate::io::watcher::StoreWatcher;
use crate::io::{config_io, paths};
use crate::model::{AppConfig, Priority, Task, TaskId, TaskPatch};
use crate::ops::store::{Command, TaskStore};
use crate::ops::view::{Filter, SortKey, Stats, filter_and_sort};
use crate::timer::TimerEngine;

use super::input;
use super::render;
use super::theme::Theme;

/// Current interaction mode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Navigate,
    /// Typing a task title into the input line
    Input(InputTarget),
    Search,
}

/// What the input line is editing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputTarget {
    NewTask,
    EditTask(TaskId),
}

/// Main application state
pub struct App {
    pub dir: PathBuf,
    pub store: TaskStore,
    pub config: AppConfig,
    pub theme: Theme,
    pub dark_mode: bool,
    pub engine: TimerEngine,
    pub filter: Filter,
    pub sort: SortKey,
    pub mode: Mode,
    pub should_quit: bool,
    pub show_help: bool,
    /// Cursor index into the visible task list
    pub cursor: usize,
    /// Input line buffer (task titles)
    pub edit_buffer: String,
    /// Byte offset of the input cursor
    pub edit_cursor: usize,
    /// Priority picked while adding/editing (Tab cycles it)
    pub edit_priority: Priority,
    /// Search query being typed
    pub search_input: String,
    /// Last executed search pattern
    pub last_search: Option<String>,
}

impl App {
    pub fn new(dir: PathBuf, store: TaskStore, config: AppConfig) -> Self {
        let dark_mode = config.dark_mode();
        let engine = TimerEngine::new(config.timer.duration_secs);
        App {
            dir,
            store,
            config,
            theme: Theme::for_dark(dark_mode),
            dark_mode,
            engine,
            filter: Filter::All,
            sort: SortKey::Created,
            mode: Mode::Navigate,
            should_quit: false,
            show_help: false,
            cursor: 0,
            edit_buffer: String::new(),
            edit_cursor: 0,
            edit_priority: Priority::Medium,
            search_input: String::new(),
            last_search: None,
        }
    }

    /// The task rows the list view shows, in display order.
    ///
    /// The default view (all tasks by creation) shows the stored list
    /// newest-end-first so that explicit reordering is visible; any other
    /// filter/sort combination is the derived projection.
    pub fn visible(&self) -> Vec<&Task> {
        if self.reorderable() {
            self.store.tasks().iter().rev().collect()
        } else {
            filter_and_sort(self.store.tasks(), self.filter, self.sort)
        }
    }

    /// Reordering only makes sense in the unfiltered creation-order view,
    /// the same condition the drag handle would use.
    pub fn reorderable(&self) -> bool {
        self.filter == Filter::All && self.sort == SortKey::Created
    }

    pub fn selected_id(&self) -> Option<TaskId> {
        self.visible().get(self.cursor).map(|t| t.id)
    }

    pub fn stats(&self) -> Stats {
        Stats::compute(self.store.tasks())
    }

    pub fn clamp_cursor(&mut self) {
        let len = self.visible().len();
        if len == 0 {
            self.cursor = 0;
        } else if self.cursor >= len {
            self.cursor = len - 1;
        }
    }

    /// Get the active search regex for highlighting and n/N jumps.
    pub fn active_search_re(&self) -> Option<Regex> {
        let pattern = match self.mode {
            Mode::Search if !self.search_input.is_empty() => &self.search_input,
            Mode::Navigate => self.last_search.as_deref()?,
            _ => return None,
        };
        Regex::new(&format!("(?i){}", pattern))
            .or_else(|_| Regex::new(&format!("(?i){}", regex::escape(pattern))))
            .ok()
    }

    // --- task commands ---

    pub fn toggle_selected(&mut self) {
        if let Some(id) = self.selected_id() {
            self.store.dispatch(Command::Toggle(id));
            self.clamp_cursor();
        }
    }

    pub fn delete_selected(&mut self) {
        if let Some(id) = self.selected_id() {
            self.store.dispatch(Command::Delete(id));
            self.clamp_cursor();
        }
    }

    pub fn cycle_selected_priority(&mut self) {
        if let Some(id) = self.selected_id() {
            let current = self
                .store
                .tasks()
                .iter()
                .find(|t| t.id == id)
                .map(|t| t.priority)
                .unwrap_or_default();
            let patch = TaskPatch {
                priority: Some(current.cycle()),
                ..Default::default()
            };
            self.store.dispatch(Command::Update(id, patch));
        }
    }

    /// Move the selected task one row up or down the screen by permuting
    /// the stored list. No-op outside the reorderable view.
    pub fn move_selected(&mut self, screen_delta: isize) {
        if !self.reorderable() {
            return;
        }
        let Some(id) = self.selected_id() else {
            return;
        };
        let mut tasks = self.store.tasks().to_vec();
        let Some(from) = tasks.iter().position(|t| t.id == id) else {
            return;
        };
        // the display is the stored list reversed, so down-screen means
        // toward the front of the list
        let to = from as isize - screen_delta;
        if to < 0 || to as usize >= tasks.len() {
            return;
        }
        let task = tasks.remove(from);
        tasks.insert(to as usize, task);
        self.store.dispatch(Command::Reorder(tasks));
        self.cursor = (self.cursor as isize + screen_delta) as usize;
        self.clamp_cursor();
    }

    // --- input line ---

    pub fn begin_add(&mut self) {
        self.mode = Mode::Input(InputTarget::NewTask);
        self.edit_buffer.clear();
        self.edit_cursor = 0;
        self.edit_priority = Priority::Medium;
    }

    pub fn begin_edit(&mut self) {
        let Some(id) = self.selected_id() else {
            return;
        };
        let Some(task) = self.store.tasks().iter().find(|t| t.id == id) else {
            return;
        };
        self.edit_buffer = task.title.clone();
        self.edit_cursor = self.edit_buffer.len();
        self.edit_priority = task.priority;
        self.mode = Mode::Input(InputTarget::EditTask(id));
    }

    /// Commit the input line. Empty titles are rejected here, at the
    /// producer; the store never sees them.
    pub fn commit_input(&mut self) {
        let title = self.edit_buffer.trim().to_string();
        let target = match self.mode {
            Mode::Input(target) => target,
            _ => return,
        };
        if !title.is_empty() {
            match target {
                InputTarget::NewTask => {
                    let task = Task::new(self.store.next_id(), title, self.edit_priority);
                    self.store.dispatch(Command::Add(task));
                    // newest sits at the top of the default view
                    if self.reorderable() {
                        self.cursor = 0;
                    }
                }
                InputTarget::EditTask(id) => {
                    let patch = TaskPatch {
                        title: Some(title),
                        priority: Some(self.edit_priority),
                        completed: None,
                    };
                    self.store.dispatch(Command::Update(id, patch));
                }
            }
        }
        self.cancel_input();
    }

    pub fn cancel_input(&mut self) {
        self.mode = Mode::Navigate;
        self.edit_buffer.clear();
        self.edit_cursor = 0;
    }

    // --- timer ---

    pub fn toggle_timer(&mut self) {
        if self.engine.state().is_running {
            self.engine.pause();
        } else {
            self.engine.start();
        }
    }

    /// Adjust the countdown length by whole minutes. The control is
    /// disabled while running; the engine would tolerate it, but the UI
    /// boundary rejects it.
    pub fn adjust_duration(&mut self, minutes: i64) {
        let state = self.engine.state();
        if state.is_running {
            return;
        }
        let next = (state.duration as i64 + minutes * 60).clamp(60, 12 * 3600);
        self.engine.set_duration(next as u32);
    }

    // --- theme ---

    pub fn toggle_theme(&mut self) {
        self.dark_mode = !self.dark_mode;
        self.theme = Theme::for_dark(self.dark_mode);
        let theme_name = if self.dark_mode { "dark" } else { "light" };
        // persistence is best-effort; the session keeps the new palette
        let _ = config_io::update_theme(&self.dir, theme_name);
    }
}

/// Restore persisted UI selections from .state.json
pub fn restore_ui_state(app: &mut App) {
    let Some(state) = read_ui_state(&app.dir) else {
        return;
    };
    if let Some(filter) = Filter::parse(&state.filter) {
        app.filter = filter;
    }
    if let Some(sort) = SortKey::parse(&state.sort) {
        app.sort = sort;
    }
    app.last_search = state.last_search;
    app.cursor = state.cursor;
    app.clamp_cursor();
}

/// Save UI selections to .state.json
pub fn save_ui_state(app: &App) {
    let state = UiState {
        filter: app.filter.to_string(),
        sort: app.sort.to_string(),
        last_search: app.last_search.clone(),
        cursor: app.cursor,
    };
    let _ = write_ui_state(&app.dir, &state);
}

/// Run the TUI application
pub fn run(dir_override: Option<&str>) -> Result<(), Box<dyn std::error::Error>> {
    let dir = dir_override
        .map(PathBuf::from)
        .unwrap_or_else(paths::app_dir);
    paths::ensure_dir(&dir)?;

    let config = config_io::read_config(&dir);
    let store = TaskStore::open(Storage::new(&dir));
    let mut app = App::new(dir.clone(), store, config);
    restore_ui_state(&mut app);

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;
    terminal.clear()?;

    // Install panic hook to restore terminal on panic
    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic_info| {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
        original_hook(panic_info);
    }));

    // Pick up writes from concurrent `fo` invocations
    let watcher = StoreWatcher::start(&dir).ok();

    let result = run_event_loop(&mut terminal, &mut app, watcher.as_ref());

    save_ui_state(&app);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    result
}

fn run_event_loop(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
    watcher: Option<&StoreWatcher>,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut save_counter = 0u32;
    loop {
        terminal.draw(|frame| render::render(frame, app))?;

        // absorb countdown ticks queued since the last round
        app.engine.pump();

        if let Some(watcher) = watcher
            && watcher.poll().is_some()
        {
            app.store.reload();
            app.clamp_cursor();
        }

        if event::poll(Duration::from_millis(250))?
            && let Event::Key(key) = event::read()?
            && key.kind == KeyEventKind::Press
        {
            input::handle_key(app, key);
            // Debounced state save: every ~5 key presses
            save_counter += 1;
            if save_counter >= 5 {
                save_ui_state(app);
                save_counter = 0;
            }
        }

        if app.should_quit {
            return Ok(());
        }
    }
}
