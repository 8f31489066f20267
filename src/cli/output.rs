use serde::Serialize;

use crate::model::Task;
use crate::ops::view::Stats;

// ---------------------------------------------------------------------------
// JSON output structs
// ---------------------------------------------------------------------------

#[derive(Serialize)]
pub struct TaskJson {
    pub id: u64,
    pub title: String,
    pub priority: String,
    pub completed: bool,
    pub created_at: String,
}

#[derive(Serialize)]
pub struct TaskListJson {
    pub filter: String,
    pub sort: String,
    pub tasks: Vec<TaskJson>,
}

#[derive(Serialize)]
pub struct SearchJson {
    pub pattern: String,
    pub matches: Vec<TaskJson>,
}

#[derive(Serialize)]
pub struct StatsJson {
    #[serde(flatten)]
    pub stats: Stats,
}

#[derive(Serialize)]
pub struct AckJson {
    pub action: &'static str,
    pub id: u64,
}

// ---------------------------------------------------------------------------
// Conversions and text rendering
// ---------------------------------------------------------------------------

pub fn task_to_json(task: &Task) -> TaskJson {
    TaskJson {
        id: task.id.0,
        title: task.title.clone(),
        priority: task.priority.to_string(),
        completed: task.completed,
        created_at: task.created_at.to_rfc3339(),
    }
}

/// One task as a plain text row: `  3 [x] !! Ship release  (2025-05-01)`
pub fn task_line(task: &Task) -> String {
    let check = if task.completed { "[x]" } else { "[ ]" };
    format!(
        "{:>4} {} {:<2} {}  ({})",
        task.id.0,
        check,
        priority_marker(task),
        task.title,
        task.created_at.format("%Y-%m-%d"),
    )
}

fn priority_marker(task: &Task) -> &'static str {
    match task.priority {
        crate::model::Priority::High => "!!",
        crate::model::Priority::Medium => "!",
        crate::model::Priority::Low => "",
    }
}

/// Stats as a plain text block.
pub fn stats_text(stats: &Stats) -> String {
    format!(
        "total      {}\n\
         completed  {}\n\
         pending    {}\n\
         rate       {}%\n\
         priority   high {} / medium {} / low {}",
        stats.total,
        stats.completed,
        stats.pending,
        stats.completion_rate,
        stats.priority.high,
        stats.priority.medium,
        stats.priority.low,
    )
}
