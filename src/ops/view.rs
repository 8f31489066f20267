use serde::Serialize;
use std::fmt;

use crate::model::{Priority, Task};

/// Which tasks the list view shows
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Filter {
    #[default]
    All,
    Pending,
    Completed,
    Priority(Priority),
}

impl Filter {
    pub fn matches(self, task: &Task) -> bool {
        match self {
            Filter::All => true,
            Filter::Pending => !task.completed,
            Filter::Completed => task.completed,
            Filter::Priority(p) => task.priority == p,
        }
    }

    /// Cycle through the modes in display order
    pub fn cycle(self) -> Filter {
        match self {
            Filter::All => Filter::Pending,
            Filter::Pending => Filter::Completed,
            Filter::Completed => Filter::Priority(Priority::High),
            Filter::Priority(Priority::High) => Filter::Priority(Priority::Medium),
            Filter::Priority(Priority::Medium) => Filter::Priority(Priority::Low),
            Filter::Priority(Priority::Low) => Filter::All,
        }
    }

    pub fn parse(s: &str) -> Option<Filter> {
        match s {
            "all" => Some(Filter::All),
            "pending" => Some(Filter::Pending),
            "completed" => Some(Filter::Completed),
            _ => Priority::parse(s).map(Filter::Priority),
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Filter::All => "all",
            Filter::Pending => "pending",
            Filter::Completed => "completed",
            Filter::Priority(p) => p.as_str(),
        }
    }
}

impl fmt::Display for Filter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Sort order for the list view
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SortKey {
    /// Newest first (the default)
    #[default]
    Created,
    /// High before medium before low
    Priority,
    /// Case-folded lexical order
    Title,
    /// Incomplete before completed
    Completed,
}

impl SortKey {
    pub fn cycle(self) -> SortKey {
        match self {
            SortKey::Created => SortKey::Priority,
            SortKey::Priority => SortKey::Title,
            SortKey::Title => SortKey::Completed,
            SortKey::Completed => SortKey::Created,
        }
    }

    pub fn parse(s: &str) -> Option<SortKey> {
        match s {
            "created" => Some(SortKey::Created),
            "priority" => Some(SortKey::Priority),
            "title" => Some(SortKey::Title),
            "completed" => Some(SortKey::Completed),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            SortKey::Created => "created",
            SortKey::Priority => "priority",
            SortKey::Title => "title",
            SortKey::Completed => "completed",
        }
    }
}

impl fmt::Display for SortKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Read-only projection of the list: filter, then stable sort.
/// Ties under `created` break on id (ids are monotonic in creation order).
pub fn filter_and_sort(tasks: &[Task], filter: Filter, sort: SortKey) -> Vec<&Task> {
    let mut out: Vec<&Task> = tasks.iter().filter(|t| filter.matches(t)).collect();
    match sort {
        SortKey::Created => {
            out.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.id.cmp(&a.id)))
        }
        SortKey::Priority => out.sort_by(|a, b| b.priority.rank().cmp(&a.priority.rank())),
        SortKey::Title => {
            out.sort_by(|a, b| a.title.to_lowercase().cmp(&b.title.to_lowercase()))
        }
        SortKey::Completed => out.sort_by(|a, b| a.completed.cmp(&b.completed)),
    }
    out
}

/// Per-priority task counts. Priorities with no tasks read as 0.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct PriorityCounts {
    pub low: usize,
    pub medium: usize,
    pub high: usize,
}

impl PriorityCounts {
    pub fn get(self, priority: Priority) -> usize {
        match priority {
            Priority::Low => self.low,
            Priority::Medium => self.medium,
            Priority::High => self.high,
        }
    }
}

/// Aggregate statistics, always computed from the unfiltered list.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Stats {
    pub total: usize,
    pub completed: usize,
    pub pending: usize,
    /// Rounded integer percent; 0 for an empty list
    pub completion_rate: u8,
    pub priority: PriorityCounts,
}

impl Stats {
    pub fn compute(tasks: &[Task]) -> Stats {
        let total = tasks.len();
        let completed = tasks.iter().filter(|t| t.completed).count();
        let completion_rate = if total > 0 {
            ((completed as f64 / total as f64) * 100.0).round() as u8
        } else {
            0
        };

        let mut priority = PriorityCounts::default();
        for task in tasks {
            match task.priority {
                Priority::Low => priority.low += 1,
                Priority::Medium => priority.medium += 1,
                Priority::High => priority.high += 1,
            }
        }

        Stats {
            total,
            completed,
            pending: total - completed,
            completion_rate,
            priority,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::TaskId;
    use chrono::{Duration, Local, TimeZone};
    use pretty_assertions::assert_eq;

    fn task(id: u64, title: &str, priority: Priority, completed: bool) -> Task {
        let base = Local.with_ymd_and_hms(2025, 5, 1, 9, 0, 0).unwrap();
        Task {
            id: TaskId(id),
            title: title.to_string(),
            priority,
            completed,
            created_at: base + Duration::seconds(id as i64),
        }
    }

    fn sample() -> Vec<Task> {
        vec![
            task(1, "alpha", Priority::Low, false),
            task(2, "Bravo", Priority::High, true),
            task(3, "charlie", Priority::Medium, false),
            task(4, "delta", Priority::High, false),
        ]
    }

    fn ids(tasks: &[&Task]) -> Vec<u64> {
        tasks.iter().map(|t| t.id.0).collect()
    }

    // --- filter ---

    #[test]
    fn test_filter_all_passes_everything() {
        let tasks = sample();
        let view = filter_and_sort(&tasks, Filter::All, SortKey::Created);
        assert_eq!(view.len(), 4);
    }

    #[test]
    fn test_filter_pending_and_completed_partition() {
        let tasks = sample();
        let pending = filter_and_sort(&tasks, Filter::Pending, SortKey::Created);
        let completed = filter_and_sort(&tasks, Filter::Completed, SortKey::Created);
        assert_eq!(pending.len() + completed.len(), tasks.len());
        assert!(pending.iter().all(|t| !t.completed));
        assert!(completed.iter().all(|t| t.completed));
    }

    #[test]
    fn test_filter_by_priority() {
        let tasks = sample();
        let high = filter_and_sort(&tasks, Filter::Priority(Priority::High), SortKey::Created);
        assert_eq!(ids(&high), vec![4, 2]);
    }

    #[test]
    fn test_filter_cycle_visits_all_modes() {
        let mut f = Filter::All;
        let mut seen = vec![f];
        loop {
            f = f.cycle();
            if f == Filter::All {
                break;
            }
            seen.push(f);
        }
        assert_eq!(seen.len(), 6);
    }

    // --- sort ---

    #[test]
    fn test_sort_created_newest_first() {
        let tasks = sample();
        let view = filter_and_sort(&tasks, Filter::All, SortKey::Created);
        assert_eq!(ids(&view), vec![4, 3, 2, 1]);
    }

    #[test]
    fn test_sort_created_tie_breaks_on_id() {
        let base = Local.with_ymd_and_hms(2025, 5, 1, 9, 0, 0).unwrap();
        let mut tasks = sample();
        for t in &mut tasks {
            t.created_at = base;
        }
        let view = filter_and_sort(&tasks, Filter::All, SortKey::Created);
        assert_eq!(ids(&view), vec![4, 3, 2, 1]);
    }

    #[test]
    fn test_sort_priority_rank_descending() {
        let tasks = sample();
        let view = filter_and_sort(&tasks, Filter::All, SortKey::Priority);
        let ranks: Vec<u8> = view.iter().map(|t| t.priority.rank()).collect();
        let mut sorted = ranks.clone();
        sorted.sort_by(|a, b| b.cmp(a));
        assert_eq!(ranks, sorted);
        // stable: among equal ranks, list order is preserved
        assert_eq!(ids(&view), vec![2, 4, 3, 1]);
    }

    #[test]
    fn test_sort_title_case_folded() {
        let tasks = sample();
        let view = filter_and_sort(&tasks, Filter::All, SortKey::Title);
        let titles: Vec<&str> = view.iter().map(|t| t.title.as_str()).collect();
        assert_eq!(titles, vec!["alpha", "Bravo", "charlie", "delta"]);
    }

    #[test]
    fn test_sort_completed_incomplete_first() {
        let tasks = sample();
        let view = filter_and_sort(&tasks, Filter::All, SortKey::Completed);
        assert_eq!(ids(&view), vec![1, 3, 4, 2]);
    }

    #[test]
    fn test_sort_does_not_mutate_source() {
        let tasks = sample();
        let before = tasks.clone();
        let _ = filter_and_sort(&tasks, Filter::All, SortKey::Title);
        assert_eq!(tasks, before);
    }

    // --- stats ---

    #[test]
    fn test_stats_identities() {
        let tasks = sample();
        let stats = Stats::compute(&tasks);
        assert_eq!(stats.completed + stats.pending, stats.total);
        assert!(stats.completion_rate <= 100);
        assert_eq!(stats.completion_rate, 25);
        assert_eq!(stats.priority.high, 2);
        assert_eq!(stats.priority.medium, 1);
        assert_eq!(stats.priority.low, 1);
    }

    #[test]
    fn test_stats_empty_list() {
        let stats = Stats::compute(&[]);
        assert_eq!(stats.total, 0);
        assert_eq!(stats.completion_rate, 0);
        assert_eq!(stats.priority, PriorityCounts::default());
    }

    #[test]
    fn test_stats_rate_rounds() {
        let tasks = vec![
            task(1, "a", Priority::Medium, true),
            task(2, "b", Priority::Medium, false),
            task(3, "c", Priority::Medium, false),
        ];
        // 1/3 → 33.33… → 33
        assert_eq!(Stats::compute(&tasks).completion_rate, 33);
    }

    #[test]
    fn test_stats_ignore_filter() {
        // stats always cover the full list; the projection is separate
        let tasks = sample();
        let stats = Stats::compute(&tasks);
        let filtered = filter_and_sort(&tasks, Filter::Completed, SortKey::Created);
        assert_eq!(filtered.len(), 1);
        assert_eq!(stats.total, 4);
    }

    #[test]
    fn test_single_task_scenario() {
        let tasks = vec![task(1, "Write spec", Priority::High, false)];
        let stats = Stats::compute(&tasks);
        assert_eq!(stats.total, 1);
        assert_eq!(stats.completed, 0);
        assert_eq!(stats.pending, 1);
        assert_eq!(stats.completion_rate, 0);
        assert_eq!(stats.priority.get(Priority::High), 1);
        assert_eq!(stats.priority.get(Priority::Medium), 0);
    }

    #[test]
    fn test_reorder_leaves_stats_unchanged() {
        let tasks = sample();
        let mut reversed = tasks.clone();
        reversed.reverse();
        assert_eq!(Stats::compute(&tasks), Stats::compute(&reversed));
    }
}
