//! Command-line argument types.

use clap::{Args, Parser, Subcommand, ValueEnum};

use omnilink_core::types::TaskFilter;

/// Bridge an agent to OmniFocus over the detected automation surface.
#[derive(Debug, Parser)]
#[command(name = "omnilink", version, about)]
pub struct Cli {
    /// Operation to run.
    #[command(subcommand)]
    pub command: Command,
}

/// Task filter as accepted on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum FilterArg {
    /// Only flagged tasks.
    Flagged,
    /// Only tasks due today.
    DueToday,
    /// Flagged or due on/before today.
    All,
}

impl From<FilterArg> for TaskFilter {
    fn from(arg: FilterArg) -> Self {
        match arg {
            FilterArg::Flagged => Self::Flagged,
            FilterArg::DueToday => Self::DueToday,
            FilterArg::All => Self::All,
        }
    }
}

/// Top-level operations.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// List open tasks.
    Tasks {
        /// Filter; default is flagged-or-due-today.
        #[arg(long, value_enum)]
        filter: Option<FilterArg>,
    },
    /// Create a new task.
    Create(CreateArgs),
    /// Update fields of an existing task.
    Update(UpdateArgs),
    /// Mark a task completed.
    Complete {
        /// Identifier of the task to complete.
        task_id: String,
    },
    /// List active project names.
    Projects,
    /// Read or change provider configuration.
    #[command(subcommand)]
    Config(ConfigCommand),
}

/// Arguments for `create`.
#[derive(Debug, Args)]
pub struct CreateArgs {
    /// Task name.
    #[arg(long)]
    pub name: String,
    /// Note body.
    #[arg(long)]
    pub note: Option<String>,
    /// Existing project to file the task under (default: inbox).
    #[arg(long)]
    pub project: Option<String>,
    /// Flag the new task.
    #[arg(long)]
    pub flagged: bool,
    /// Due date as YYYY-MM-DD.
    #[arg(long)]
    pub due: Option<String>,
}

/// Arguments for `update`. Absent options leave the field unchanged; an
/// explicitly empty `--note ""` clears the note.
#[derive(Debug, Args)]
pub struct UpdateArgs {
    /// Identifier of the task to update.
    pub task_id: String,
    /// New name.
    #[arg(long)]
    pub name: Option<String>,
    /// New note body (empty string clears it).
    #[arg(long)]
    pub note: Option<String>,
    /// New flagged state.
    #[arg(long)]
    pub flagged: Option<bool>,
    /// New due date as YYYY-MM-DD.
    #[arg(long)]
    pub due: Option<String>,
}

/// `config` subcommands.
#[derive(Debug, Subcommand)]
pub enum ConfigCommand {
    /// Print the current configuration.
    Get,
    /// Change configuration values.
    Set {
        /// Allow or forbid direct database writes (restricted provider
        /// only).
        #[arg(long)]
        direct_write: Option<bool>,
        /// Maximum rows returned by task listings (1-10000).
        #[arg(long)]
        task_limit: Option<u32>,
    },
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
