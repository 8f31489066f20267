use clap::{Args, Parser, Subcommand};

#[derive(Parser)]
#[command(name = "fo", about = concat!("[|] focal v", env!("CARGO_PKG_VERSION"), " - tasks and focus time in your terminal"), version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Output as JSON
    #[arg(long, global = true)]
    pub json: bool,

    /// Use a different app data directory
    #[arg(long = "dir", global = true)]
    pub dir: Option<String>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Add a task
    Add(AddArgs),
    /// List tasks
    List(ListArgs),
    /// Toggle a task between done and pending
    Toggle(IdArg),
    /// Remove a task
    Rm(IdArg),
    /// Edit a task's title or priority
    Edit(EditArgs),
    /// Move a task to a new position in the list
    Mv(MvArgs),
    /// Show task statistics
    Stats,
    /// Search task titles by regex
    Search(SearchArgs),
    /// Run a countdown in the terminal
    Timer(TimerArgs),
}

#[derive(Args)]
pub struct AddArgs {
    /// Task title
    pub title: String,
    /// Priority (low, medium, high)
    #[arg(long, short, default_value = "medium")]
    pub priority: String,
}

#[derive(Args)]
pub struct ListArgs {
    /// Filter: all, pending, completed, high, medium, low
    #[arg(long, short, default_value = "all")]
    pub filter: String,
    /// Sort: created, priority, title, completed
    #[arg(long, short, default_value = "created")]
    pub sort: String,
}

#[derive(Args)]
pub struct IdArg {
    /// Task id
    pub id: u64,
}

#[derive(Args)]
pub struct EditArgs {
    /// Task id
    pub id: u64,
    /// New title
    #[arg(long)]
    pub title: Option<String>,
    /// New priority (low, medium, high)
    #[arg(long, short)]
    pub priority: Option<String>,
}

#[derive(Args)]
pub struct MvArgs {
    /// Task id
    pub id: u64,
    /// Target position (0-indexed)
    pub position: usize,
}

#[derive(Args)]
pub struct SearchArgs {
    /// Regex pattern to search for
    pub pattern: String,
}

#[derive(Args)]
pub struct TimerArgs {
    /// Countdown length in minutes (default: configured duration)
    pub minutes: Option<u32>,
}
