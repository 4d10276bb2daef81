//! CLI argument definitions using clap derive macros.

use clap::{Parser, Subcommand, ValueEnum};

/// Terminal client for the TaskDeck board
#[derive(Parser)]
#[command(name = "taskdeck", about, version, propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Enable verbose output (engine events are echoed)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Output format: text (human-readable) or json (machine-readable)
    #[arg(short, long, global = true, default_value = "text")]
    pub output: OutputFormat,

    /// Project id. Uses TASKDECK_PROJECT env if not set.
    #[arg(short, long, global = true)]
    pub project: Option<u64>,
}

#[derive(Clone, Copy, Debug, Default, ValueEnum)]
pub enum OutputFormat {
    /// Colored terminal output for humans
    #[default]
    Text,
    /// Structured JSON for machine consumption
    Json,
}

#[derive(Subcommand)]
pub enum Command {
    /// Show the board: sections and their first task pages
    Board {
        /// Keep fetching task pages until every section is fully loaded
        #[arg(long)]
        all: bool,
    },
    /// Manage sections
    Section {
        #[command(subcommand)]
        action: SectionAction,
    },
    /// Manage tasks
    Task {
        #[command(subcommand)]
        action: TaskAction,
    },
    /// Apply filters and refetch the visible board
    Filter {
        /// Free-text search
        #[arg(short, long)]
        search: Option<String>,
        /// Filter by priority (low, medium, high)
        #[arg(long)]
        priority: Option<String>,
        /// Filter by status value (repeatable)
        #[arg(long)]
        status: Vec<String>,
        /// Filter by assignee id
        #[arg(long)]
        assignee: Option<u64>,
        /// Only tasks due on or after this date (YYYY-MM-DD)
        #[arg(long)]
        due_after: Option<String>,
        /// Only tasks due on or before this date (YYYY-MM-DD)
        #[arg(long)]
        due_before: Option<String>,
        /// Clear all filters instead of setting new ones
        #[arg(long)]
        clear: bool,
    },
}

#[derive(Subcommand)]
pub enum SectionAction {
    /// List sections with their pagination state
    List,
    /// Create a section (server-confirmed, never optimistic)
    Add { name: String },
    /// Rename a section
    Rename { id: u64, name: String },
    /// Move a section to a new position (0-based)
    Move { id: u64, index: usize },
    /// Collapse or expand a section
    Toggle { id: u64 },
    /// Delete a section
    Delete {
        id: u64,
        /// Delete the contained tasks too (default keeps them unsectioned)
        #[arg(long)]
        with_tasks: bool,
    },
}

#[derive(Subcommand)]
pub enum TaskAction {
    /// List the loaded tasks of a section
    List {
        section: u64,
        /// Fetch every page, not just the first
        #[arg(long)]
        all: bool,
    },
    /// Create a task at the head of a section
    Add { section: u64, name: String },
    /// Update task fields
    Update {
        id: u64,
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        description: Option<String>,
        /// low, medium or high
        #[arg(long)]
        priority: Option<String>,
        #[arg(long)]
        status: Option<String>,
        /// Due date (YYYY-MM-DD)
        #[arg(long)]
        due: Option<String>,
        /// Mark complete / incomplete
        #[arg(long)]
        done: Option<bool>,
    },
    /// Delete a task
    Delete { id: u64 },
    /// Move a task to the head of another section
    Move { id: u64, section: u64 },
    /// Drag a task to a position (0-based) within a section
    Reorder { id: u64, section: u64, index: usize },
}
