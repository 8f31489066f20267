use crate::io::storage::Storage;
use crate::model::{Task, TaskId, TaskPatch};

/// A mutation of the task list. Every command is total: inapplicable
/// commands (unknown ids) leave the list unchanged.
#[derive(Debug, Clone)]
pub enum Command {
    /// Append a well-formed task with a fresh unique id
    Add(Task),
    /// Flip `completed` on the matching task
    Toggle(TaskId),
    /// Remove the matching task
    Delete(TaskId),
    /// Merge a partial update into the matching task
    Update(TaskId, TaskPatch),
    /// Replace the list wholesale (startup hydration, external reload)
    Load(Vec<Task>),
    /// Replace the list with a caller-supplied permutation
    Reorder(Vec<Task>),
}

/// Pure transition function: (current list, command) → new list.
/// Never mutates the input and never fails.
pub fn apply(tasks: &[Task], command: Command) -> Vec<Task> {
    match command {
        Command::Add(task) => {
            let mut next = tasks.to_vec();
            next.push(task);
            next
        }
        Command::Toggle(id) => tasks
            .iter()
            .map(|t| {
                if t.id == id {
                    let mut t = t.clone();
                    t.completed = !t.completed;
                    t
                } else {
                    t.clone()
                }
            })
            .collect(),
        Command::Delete(id) => tasks.iter().filter(|t| t.id != id).cloned().collect(),
        Command::Update(id, patch) => tasks
            .iter()
            .map(|t| {
                if t.id == id {
                    let mut t = t.clone();
                    if let Some(title) = &patch.title {
                        t.title = title.clone();
                    }
                    if let Some(priority) = patch.priority {
                        t.priority = priority;
                    }
                    if let Some(completed) = patch.completed {
                        t.completed = completed;
                    }
                    t
                } else {
                    t.clone()
                }
            })
            .collect(),
        Command::Load(list) | Command::Reorder(list) => list,
    }
}

/// Next free id for a list: one past the highest in use.
/// Monotonic per list, so id order doubles as creation order.
pub fn next_task_id(tasks: &[Task]) -> TaskId {
    TaskId(tasks.iter().map(|t| t.id.0).max().map_or(1, |max| max + 1))
}

/// The authoritative owner of the task list.
///
/// Commands go through `dispatch`, which applies the pure reducer and then
/// mirrors the list to storage. The mirror is fire-and-forget: a failed
/// write never surfaces (the in-memory list stays correct for the session).
pub struct TaskStore {
    tasks: Vec<Task>,
    storage: Option<Storage>,
    /// High-water mark for id allocation. Deleting the newest task must
    /// not free its id for the life of this store.
    next_id: u64,
    /// Whether the persisted list was non-empty at the last sync point.
    /// An empty list is only written out when this is set, so a fresh
    /// store never creates a file just to hold `[]`.
    persisted_nonempty: bool,
}

impl TaskStore {
    /// A store with no backing storage (tests, ephemeral use).
    pub fn in_memory() -> Self {
        TaskStore {
            tasks: Vec::new(),
            storage: None,
            next_id: 1,
            persisted_nonempty: false,
        }
    }

    /// Open a store backed by `storage`, hydrating from the persisted list
    /// when it is non-empty.
    pub fn open(storage: Storage) -> Self {
        let persisted = storage.read_tasks();
        let persisted_nonempty = !persisted.is_empty();
        let mut store = TaskStore {
            tasks: Vec::new(),
            storage: Some(storage),
            next_id: next_task_id(&persisted).0,
            persisted_nonempty,
        };
        if persisted_nonempty {
            store.tasks = apply(&store.tasks, Command::Load(persisted));
        }
        store
    }

    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    pub fn contains(&self, id: TaskId) -> bool {
        self.tasks.iter().any(|t| t.id == id)
    }

    pub fn next_id(&self) -> TaskId {
        TaskId(self.next_id)
    }

    /// Apply a command and mirror the result to storage.
    pub fn dispatch(&mut self, command: Command) {
        // wholesale replacement can introduce ids this store never handed out
        match &command {
            Command::Add(task) => self.next_id = self.next_id.max(task.id.0 + 1),
            Command::Load(list) | Command::Reorder(list) => {
                self.next_id = self.next_id.max(next_task_id(list).0)
            }
            _ => {}
        }
        self.tasks = apply(&self.tasks, command);
        self.mirror();
    }

    /// Re-read the persisted list, replacing the in-memory one.
    /// Used when the store file changed under us (external edit).
    pub fn reload(&mut self) {
        if let Some(storage) = &self.storage {
            let persisted = storage.read_tasks();
            self.persisted_nonempty = !persisted.is_empty();
            self.tasks = apply(&self.tasks, Command::Load(persisted));
        }
    }

    fn mirror(&mut self) {
        let Some(storage) = &self.storage else {
            return;
        };
        if !self.tasks.is_empty() || self.persisted_nonempty {
            let _ = storage.write_tasks(&self.tasks);
            self.persisted_nonempty = !self.tasks.is_empty();
        }
    }
}
