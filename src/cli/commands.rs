use std::path::PathBuf;

use chrono::{DateTime, Utc};
use clap::{Parser, Subcommand};

const VERSION: &str = env!("STEPIFY_VERSION");

#[derive(Parser)]
#[command(
    name = "stepify",
    version = VERSION,
    about = "Track tasks and their micro tasks",
    after_help = "\
NOTE:
  Data lives in <dir>/.stepify/stepify.db, found by walking up from the current directory.
  Run `stepify init` first, or point --db / STEPIFY_DB at a database file.

EXIT CODES:
  0  Success
  1  Error (not found, validation, database, etc.)

DELETION:
  Deleted tasks and micro tasks are hidden from every command. Deleting twice reports NOT_FOUND.
  Set \"soft_delete\": false in .stepify/config.json to remove records physically instead.

LOGGING:
  Logs go to stderr. Control with STEPIFY_LOG (e.g. STEPIFY_LOG=debug) or --verbose."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Output as JSON
    #[arg(long, global = true)]
    pub json: bool,

    /// Database file to use instead of the workspace one
    #[arg(long, global = true, env = "STEPIFY_DB")]
    pub db: Option<PathBuf>,

    /// Debug logging on stderr
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Initialize stepify in this directory
    Init,

    /// Task management
    #[command(subcommand)]
    Task(TaskCommands),

    /// Micro tasks stored on their own, referencing a task
    #[command(subcommand)]
    Micro(MicroCommands),
}

#[derive(Subcommand)]
pub enum TaskCommands {
    /// Create a task
    Create {
        /// Task title
        title: String,
        #[arg(long)]
        description: Option<String>,
        /// pending | in_progress | completed | cancelled
        #[arg(long)]
        status: Option<String>,
        /// low | medium | high | urgent
        #[arg(long)]
        priority: Option<String>,
        /// Due date (RFC 3339)
        #[arg(long)]
        due: Option<DateTime<Utc>>,
        /// Add an embedded micro task with this title (repeatable, kept in order)
        #[arg(long = "micro")]
        micro: Vec<String>,
    },
    /// Create a task from stdin JSON
    #[command(after_help = "\
STDIN FORMAT:
  {\"title\":\"...\", \"description\":\"...\", \"status\":\"PENDING\", \"priority\":\"HIGH\",
   \"dueDate\":\"2024-06-01T00:00:00Z\",
   \"microTasks\":[{\"title\":\"...\", \"order\":1}]}

NOTE:
  Micro tasks keep their input order and each gets its own id.")]
    Load,
    /// List tasks
    List,
    /// Show task details
    Show {
        /// Task ID
        id: String,
    },
    /// Update a task
    #[command(after_help = "\
NOTE:
  Only the flags you pass change. The title can be replaced but never cleared.
  Use --clear to empty description, status, priority, due or completed.")]
    Update {
        id: String,
        #[arg(long)]
        title: Option<String>,
        #[arg(long)]
        description: Option<String>,
        #[arg(long)]
        status: Option<String>,
        #[arg(long)]
        priority: Option<String>,
        #[arg(long)]
        due: Option<DateTime<Utc>>,
        /// Completion time (RFC 3339)
        #[arg(long)]
        completed: Option<DateTime<Utc>>,
        /// Field to clear (repeatable)
        #[arg(long, value_parser = ["description", "status", "priority", "due", "completed"])]
        clear: Vec<String>,
    },
    /// Delete a task
    Delete {
        id: String,
    },
    /// Manage micro tasks embedded in a task
    #[command(subcommand)]
    Micro(EmbeddedMicroCommands),
}

#[derive(Subcommand)]
pub enum EmbeddedMicroCommands {
    /// Append a micro task to a task
    Add {
        task_id: String,
        title: String,
        #[arg(long)]
        description: Option<String>,
        #[arg(long)]
        status: Option<String>,
        #[arg(long)]
        order: Option<i32>,
    },
    /// Update a micro task inside a task
    #[command(after_help = "\
NOTE:
  Only the flags you pass change; nothing can be cleared. A blank --title is ignored.")]
    Update {
        task_id: String,
        micro_id: String,
        #[arg(long)]
        title: Option<String>,
        #[arg(long)]
        description: Option<String>,
        #[arg(long)]
        status: Option<String>,
        #[arg(long)]
        order: Option<i32>,
        #[arg(long)]
        completed: Option<DateTime<Utc>>,
    },
    /// Remove a micro task from a task
    Remove {
        task_id: String,
        micro_id: String,
    },
}

#[derive(Subcommand)]
pub enum MicroCommands {
    /// Create a micro task for an existing task
    Create {
        /// Owning task ID
        task_id: String,
        title: String,
        #[arg(long)]
        description: Option<String>,
        #[arg(long)]
        status: Option<String>,
        #[arg(long)]
        order: Option<i32>,
    },
    /// List micro tasks
    List,
    /// Show micro task details
    Show {
        id: String,
    },
    /// Update a micro task
    Update {
        id: String,
        #[arg(long)]
        title: Option<String>,
        #[arg(long)]
        description: Option<String>,
        #[arg(long)]
        status: Option<String>,
        #[arg(long)]
        order: Option<i32>,
        #[arg(long)]
        completed: Option<DateTime<Utc>>,
    },
    /// Delete a micro task
    Delete {
        id: String,
    },
}
