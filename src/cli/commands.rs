use clap::{Parser, Subcommand};

const VERSION: &str = env!("GIT_VERSION");

#[derive(Parser)]
#[command(
    name = "sprintboard",
    version = VERSION,
    about = "Project and sprint tracking CLI with a status-column board",
    after_help = "\
NOTE:
  Requires a git repository. DB is stored at <git-root>/.sprintboard/sprintboard.db
  Run `sprintboard init` before any other command.

BOARD RULES:
  Columns are derived from task status: todo, in-progress, done are always
  present, any other status token gets its own column appended in discovery
  order. Default columns cannot be removed; a column holding tasks cannot
  be removed.

COMPLETION:
  Moving the last open task of an in-progress sprint to `done` asks whether
  to mark the sprint completed. Declining leaves it in progress. With --json
  and without --yes the question is answered no. Completed sprints are
  immutable."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Output as JSON
    #[arg(long, global = true)]
    pub json: bool,

    /// Answer yes to confirmation prompts
    #[arg(long, global = true)]
    pub yes: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Initialize sprintboard in this repository
    Init,

    /// Project management
    #[command(subcommand)]
    Project(ProjectCommands),

    /// Sprint management
    #[command(subcommand)]
    Sprint(SprintCommands),

    /// Task management
    #[command(subcommand)]
    Task(TaskCommands),

    /// Sprint board: derived status columns and drag moves
    #[command(subcommand)]
    Board(BoardCommands),

    /// Product backlog: unscheduled tasks
    #[command(subcommand)]
    Backlog(BacklogCommands),

    /// Show a project's burndown series
    Burndown {
        /// Project ID or prefix
        project: String,
    },
}

#[derive(Subcommand)]
pub enum ProjectCommands {
    /// Create a new project
    Create {
        title: String,
        #[arg(long)]
        description: Option<String>,
        #[arg(long)]
        end_goal: Option<String>,
    },
    /// List all projects
    List,
    /// Show project details
    Show {
        /// Project ID or prefix
        reference: String,
    },
    /// Delete a project and everything in it
    Delete {
        /// Project ID or prefix
        reference: String,
    },
}

#[derive(Subcommand)]
pub enum SprintCommands {
    /// Create a sprint in a project
    Create {
        /// Project ID or prefix
        project: String,
        title: String,
        #[arg(long)]
        description: Option<String>,
        /// Start date (YYYY-MM-DD)
        #[arg(long)]
        start: String,
        /// End date (YYYY-MM-DD)
        #[arg(long)]
        end: String,
    },
    /// List sprints of a project
    List {
        /// Project ID or prefix
        project: String,
    },
    /// Show sprint details
    Show {
        /// Sprint ID or prefix
        reference: String,
    },
    /// Start a sprint (planned -> in-progress)
    Start {
        /// Sprint ID or prefix
        reference: String,
    },
    /// Complete a sprint; asks for confirmation if open tasks remain
    Complete {
        /// Sprint ID or prefix
        reference: String,
    },
    /// Delete a sprint and its tasks
    Delete {
        /// Sprint ID or prefix
        reference: String,
    },
}

#[derive(Subcommand)]
pub enum TaskCommands {
    /// Add a task to a sprint
    Add {
        /// Sprint ID or prefix
        sprint: String,
        title: String,
        #[arg(long)]
        description: Option<String>,
        /// Initial status (column token), defaults to todo
        #[arg(long)]
        status: Option<String>,
        #[arg(long)]
        assignee: Option<String>,
        /// low, medium or high
        #[arg(long)]
        priority: Option<String>,
        #[arg(long)]
        points: Option<i64>,
    },
    /// List tasks of a sprint
    List {
        /// Sprint ID or prefix
        sprint: String,
    },
    /// Show task details
    Show {
        /// Task ID or prefix
        id: String,
    },
    /// Edit task fields; a status change runs the board side effects
    Edit {
        /// Task ID or prefix
        id: String,
        #[arg(long)]
        title: Option<String>,
        #[arg(long)]
        description: Option<String>,
        /// New status (column token)
        #[arg(long)]
        status: Option<String>,
        #[arg(long)]
        assignee: Option<String>,
        #[arg(long)]
        priority: Option<String>,
        #[arg(long)]
        points: Option<i64>,
    },
    /// Delete a task (asks for confirmation)
    Delete {
        /// Task ID or prefix
        id: String,
    },
}

#[derive(Subcommand)]
pub enum BoardCommands {
    /// Show the derived board of a sprint
    Show {
        /// Sprint ID or prefix
        sprint: String,
    },
    /// Move a task to a column, optionally at a position (a drag)
    Move {
        /// Task ID or prefix
        task: String,
        /// Destination column id
        column: String,
        /// Position within the destination column (default: end)
        #[arg(long)]
        index: Option<usize>,
    },
    /// Column lifecycle on the derived board
    #[command(subcommand)]
    Column(ColumnCommands),
}

#[derive(Subcommand)]
pub enum ColumnCommands {
    /// Add an empty column to a sprint's board (preview; columns persist
    /// once a task carries their status)
    Add {
        /// Sprint ID or prefix
        sprint: String,
        /// Column name, slugified into the column id
        name: String,
    },
    /// Remove an empty non-default column from a sprint's board
    Remove {
        /// Sprint ID or prefix
        sprint: String,
        /// Column id
        id: String,
    },
}

#[derive(Subcommand)]
pub enum BacklogCommands {
    /// Add a task to a project's backlog
    Add {
        /// Project ID or prefix
        project: String,
        title: String,
        #[arg(long)]
        description: Option<String>,
        #[arg(long)]
        priority: Option<String>,
        #[arg(long)]
        points: Option<i64>,
    },
    /// List a project's backlog tasks
    List {
        /// Project ID or prefix
        project: String,
    },
    /// Move a backlog task into a sprint (it becomes a todo item)
    Move {
        /// Task ID or prefix
        task: String,
        /// Destination sprint ID or prefix
        sprint: String,
    },
}
