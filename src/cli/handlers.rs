use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::time::Duration;

use regex::Regex;
use serde::Serialize;

use crate::cli::commands::{
    AddArgs, Cli, Commands, EditArgs, IdArg, ListArgs, MvArgs, SearchArgs, TimerArgs,
};
use crate::cli::output::{
    AckJson, SearchJson, StatsJson, TaskListJson, stats_text, task_line, task_to_json,
};
use crate::io::lock::{AppLock, LockError};
use crate::io::{config_io, paths};
use crate::model::{Priority, Task, TaskId, TaskPatch};
use crate::ops::store::{Command, TaskStore};
use crate::ops::view::{Filter, SortKey, Stats, filter_and_sort};
use crate::timer::{TimerEngine, format_time};

/// Error type for CLI command handling
#[derive(Debug, thiserror::Error)]
pub enum CliError {
    #[error("task title is empty")]
    EmptyTitle,
    #[error("unknown priority: {0} (expected low, medium, high)")]
    BadPriority(String),
    #[error("unknown filter: {0} (expected all, pending, completed, high, medium, low)")]
    BadFilter(String),
    #[error("unknown sort key: {0} (expected created, priority, title, completed)")]
    BadSort(String),
    #[error("task not found: {0}")]
    NotFound(TaskId),
    #[error("timer length must be at least one minute")]
    BadDuration,
    #[error(transparent)]
    Lock(#[from] LockError),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

/// Dispatch a parsed CLI invocation.
pub fn dispatch(cli: Cli) -> Result<(), CliError> {
    let dir = resolve_dir(&cli);
    paths::ensure_dir(&dir)?;

    match cli.command.expect("main routes bare invocations to the TUI") {
        Commands::Add(args) => cmd_add(&dir, args, cli.json),
        Commands::List(args) => cmd_list(&dir, args, cli.json),
        Commands::Toggle(args) => cmd_toggle(&dir, args, cli.json),
        Commands::Rm(args) => cmd_rm(&dir, args, cli.json),
        Commands::Edit(args) => cmd_edit(&dir, args, cli.json),
        Commands::Mv(args) => cmd_mv(&dir, args, cli.json),
        Commands::Stats => cmd_stats(&dir, cli.json),
        Commands::Search(args) => cmd_search(&dir, args, cli.json),
        Commands::Timer(args) => cmd_timer(&dir, args),
    }
}

fn resolve_dir(cli: &Cli) -> PathBuf {
    cli.dir
        .as_deref()
        .map(PathBuf::from)
        .unwrap_or_else(paths::app_dir)
}

fn open_store(dir: &Path) -> TaskStore {
    TaskStore::open(crate::io::storage::Storage::new(dir))
}

fn print_json<T: Serialize>(value: &T) {
    // serialization of our own output structs cannot fail
    println!("{}", serde_json::to_string_pretty(value).unwrap());
}

// ---------------------------------------------------------------------------
// Write commands (lock, mutate, mirror)
// ---------------------------------------------------------------------------

fn cmd_add(dir: &Path, args: AddArgs, json: bool) -> Result<(), CliError> {
    let title = args.title.trim().to_string();
    if title.is_empty() {
        return Err(CliError::EmptyTitle);
    }
    let priority =
        Priority::parse(&args.priority).ok_or_else(|| CliError::BadPriority(args.priority))?;

    let _lock = AppLock::acquire_default(dir)?;
    let mut store = open_store(dir);
    let task = Task::new(store.next_id(), title, priority);
    let id = task.id;
    store.dispatch(Command::Add(task.clone()));

    if json {
        print_json(&task_to_json(&task));
    } else {
        println!("added {}", id);
    }
    Ok(())
}

fn cmd_toggle(dir: &Path, args: IdArg, json: bool) -> Result<(), CliError> {
    let id = TaskId(args.id);
    let _lock = AppLock::acquire_default(dir)?;
    let mut store = open_store(dir);
    if !store.contains(id) {
        return Err(CliError::NotFound(id));
    }
    store.dispatch(Command::Toggle(id));

    let task = store.tasks().iter().find(|t| t.id == id).unwrap();
    if json {
        print_json(&task_to_json(task));
    } else {
        let state = if task.completed { "done" } else { "pending" };
        println!("{} is {}", id, state);
    }
    Ok(())
}

fn cmd_rm(dir: &Path, args: IdArg, json: bool) -> Result<(), CliError> {
    let id = TaskId(args.id);
    let _lock = AppLock::acquire_default(dir)?;
    let mut store = open_store(dir);
    if !store.contains(id) {
        return Err(CliError::NotFound(id));
    }
    store.dispatch(Command::Delete(id));

    if json {
        print_json(&AckJson {
            action: "removed",
            id: id.0,
        });
    } else {
        println!("removed {}", id);
    }
    Ok(())
}

fn cmd_edit(dir: &Path, args: EditArgs, json: bool) -> Result<(), CliError> {
    let id = TaskId(args.id);
    let patch = TaskPatch {
        title: match args.title {
            Some(title) => {
                let title = title.trim().to_string();
                if title.is_empty() {
                    return Err(CliError::EmptyTitle);
                }
                Some(title)
            }
            None => None,
        },
        priority: match args.priority {
            Some(p) => Some(Priority::parse(&p).ok_or(CliError::BadPriority(p))?),
            None => None,
        },
        completed: None,
    };

    let _lock = AppLock::acquire_default(dir)?;
    let mut store = open_store(dir);
    if !store.contains(id) {
        return Err(CliError::NotFound(id));
    }
    if !patch.is_empty() {
        store.dispatch(Command::Update(id, patch));
    }

    let task = store.tasks().iter().find(|t| t.id == id).unwrap();
    if json {
        print_json(&task_to_json(task));
    } else {
        println!("updated {}", id);
    }
    Ok(())
}

fn cmd_mv(dir: &Path, args: MvArgs, json: bool) -> Result<(), CliError> {
    let id = TaskId(args.id);
    let _lock = AppLock::acquire_default(dir)?;
    let mut store = open_store(dir);

    let mut tasks = store.tasks().to_vec();
    let from = tasks
        .iter()
        .position(|t| t.id == id)
        .ok_or(CliError::NotFound(id))?;
    let task = tasks.remove(from);
    let to = args.position.min(tasks.len());
    tasks.insert(to, task);
    store.dispatch(Command::Reorder(tasks));

    if json {
        print_json(&TaskListJson {
            filter: Filter::All.to_string(),
            sort: SortKey::Created.to_string(),
            tasks: store.tasks().iter().map(task_to_json).collect(),
        });
    } else {
        println!("moved {} to position {}", id, to);
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Read commands
// ---------------------------------------------------------------------------

fn cmd_list(dir: &Path, args: ListArgs, json: bool) -> Result<(), CliError> {
    let filter = Filter::parse(&args.filter).ok_or(CliError::BadFilter(args.filter))?;
    let sort = SortKey::parse(&args.sort).ok_or(CliError::BadSort(args.sort))?;

    let store = open_store(dir);
    let view = filter_and_sort(store.tasks(), filter, sort);

    if json {
        print_json(&TaskListJson {
            filter: filter.to_string(),
            sort: sort.to_string(),
            tasks: view.iter().map(|t| task_to_json(t)).collect(),
        });
    } else if view.is_empty() {
        if filter == Filter::All {
            println!("no tasks");
        } else {
            println!("no {} tasks", filter);
        }
    } else {
        for task in view {
            println!("{}", task_line(task));
        }
    }
    Ok(())
}

fn cmd_stats(dir: &Path, json: bool) -> Result<(), CliError> {
    let store = open_store(dir);
    let stats = Stats::compute(store.tasks());

    if json {
        print_json(&StatsJson { stats });
    } else {
        println!("{}", stats_text(&stats));
    }
    Ok(())
}

fn cmd_search(dir: &Path, args: SearchArgs, json: bool) -> Result<(), CliError> {
    let re = search_regex(&args.pattern);
    let store = open_store(dir);
    let matches: Vec<&Task> = store
        .tasks()
        .iter()
        .filter(|t| re.is_match(&t.title))
        .collect();

    if json {
        print_json(&SearchJson {
            pattern: args.pattern,
            matches: matches.iter().map(|t| task_to_json(t)).collect(),
        });
    } else if matches.is_empty() {
        println!("no matches for /{}/", args.pattern);
    } else {
        for task in matches {
            println!("{}", task_line(task));
        }
    }
    Ok(())
}

/// Compile a case-insensitive search regex, falling back to a literal
/// match when the pattern is not valid regex syntax.
pub fn search_regex(pattern: &str) -> Regex {
    Regex::new(&format!("(?i){}", pattern))
        .or_else(|_| Regex::new(&format!("(?i){}", regex::escape(pattern))))
        .expect("escaped pattern always compiles")
}

// ---------------------------------------------------------------------------
// Inline countdown
// ---------------------------------------------------------------------------

fn cmd_timer(dir: &Path, args: TimerArgs) -> Result<(), CliError> {
    if args.minutes == Some(0) {
        return Err(CliError::BadDuration);
    }
    let config = config_io::read_config(dir);
    let secs = args
        .minutes
        .map(|m| m.saturating_mul(60))
        .unwrap_or(config.timer.duration_secs);

    let mut engine = TimerEngine::new(secs);
    engine.start();

    let mut stdout = io::stdout();
    write!(stdout, "  {} ", format_time(engine.state().time_left))?;
    stdout.flush()?;

    while engine.state().time_left > 0 {
        // the tick source fires every second; a long silence means it died
        if !engine.wait_tick(Duration::from_secs(5)) {
            break;
        }
        write!(stdout, "\r  {} ", format_time(engine.state().time_left))?;
        stdout.flush()?;
    }

    if engine.state().expired() {
        println!("\ntime's up! take a break");
    }
    Ok(())
}
