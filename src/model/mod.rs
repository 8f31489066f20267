pub mod config;
pub mod task;

pub use config::{AppConfig, TimerConfig, UiConfig};
pub use task::{Priority, Task, TaskId, TaskPatch};
