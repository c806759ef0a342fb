//! Command-line interface for kb
//!
//! This module defines the CLI structure using clap derive macros.
//! Each subcommand is implemented in its own submodule.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::error::Result;

mod board;
mod op;
mod project;
mod settings;
mod task;

/// kb - Personal kanban board
///
/// Tasks and projects on swimlanes, filtered by smart views, status, and
/// project scope, with journaled mutations and undo.
#[derive(Parser, Debug)]
#[command(name = "kb")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Board data directory (defaults to the user data dir)
    #[arg(long, global = true, env = "KB_DIR")]
    pub dir: Option<PathBuf>,

    /// Output in JSON format
    #[arg(long, global = true)]
    pub json: bool,

    /// Suppress non-essential output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Emit events as JSONL to a file, or '-' for stdout
    #[arg(long, global = true, env = "KB_EVENTS")]
    pub events: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Task management
    #[command(subcommand)]
    Task(TaskCommands),

    /// Project management
    #[command(subcommand)]
    Project(ProjectCommands),

    /// Show the board as swimlanes per visible project
    Board {
        /// Smart view: all, today, or a registered custom view
        #[arg(long, default_value = "all")]
        view: String,

        /// Only show tasks with this status
        #[arg(long)]
        status: Option<String>,

        /// Hide done tasks (unless --status done is set)
        #[arg(long)]
        hide_done: bool,

        /// Scope the board to a project and its descendants
        #[arg(long)]
        project: Option<String>,

        /// Reference day for date views (YYYY-MM-DD, defaults to today)
        #[arg(long)]
        today: Option<String>,
    },

    /// Show or change persisted board settings
    #[command(subcommand)]
    Settings(SettingsCommands),

    /// Operation log
    #[command(subcommand)]
    Op(OpCommands),

    /// Undo the last mutation (or a specific operation)
    Undo {
        /// Specific operation ID to undo
        #[arg(long)]
        op: Option<String>,
    },

    /// Initialize the board data directory
    Init,
}

/// Task subcommands
#[derive(Subcommand, Debug)]
pub enum TaskCommands {
    /// Create a task
    Add {
        /// Task title
        title: String,

        /// Initial status: backlog, planned, in_progress, done
        #[arg(long, default_value = "backlog")]
        status: String,

        /// Priority: low, medium, high
        #[arg(long)]
        priority: Option<String>,

        /// Owning project id
        #[arg(long)]
        project: Option<String>,

        /// Due date (YYYY-MM-DD)
        #[arg(long)]
        due: Option<String>,

        /// Parent task id (for subtasks)
        #[arg(long)]
        parent: Option<String>,
    },

    /// List tasks
    List {
        /// Only tasks with this status
        #[arg(long)]
        status: Option<String>,

        /// Only tasks in this project
        #[arg(long)]
        project: Option<String>,
    },

    /// Move a task to another status column
    Move {
        /// Task id
        id: String,

        /// Target status
        status: String,
    },

    /// Delete a task
    Delete {
        /// Task id
        id: String,
    },

    /// Set the status of several tasks at once
    BulkStatus {
        /// Target status
        status: String,

        /// Task ids
        #[arg(required = true)]
        ids: Vec<String>,
    },
}

/// Project subcommands
#[derive(Subcommand, Debug)]
pub enum ProjectCommands {
    /// Create a project
    Add {
        /// Project name
        name: String,

        /// Parent project id
        #[arg(long)]
        parent: Option<String>,

        /// Swimlane color (hex)
        #[arg(long)]
        color: Option<String>,
    },

    /// List projects
    List,
}

/// Settings subcommands
#[derive(Subcommand, Debug)]
pub enum SettingsCommands {
    /// Show current settings
    Show,

    /// Change settings
    Set {
        /// Board density: compact, cozy, comfortable
        #[arg(long)]
        density: Option<String>,

        /// Show or hide the done column
        #[arg(long)]
        show_done_column: Option<bool>,
    },
}

/// Operation log subcommands
#[derive(Subcommand, Debug)]
pub enum OpCommands {
    /// List logged operations, newest first
    List {
        /// Maximum number of records
        #[arg(long)]
        limit: Option<usize>,
    },
}

impl Cli {
    pub fn run(self) -> Result<()> {
        let globals = Globals {
            dir: self.dir,
            json: self.json,
            quiet: self.quiet,
            events: self.events,
        };

        match self.command {
            Commands::Task(command) => task::run(command, &globals),
            Commands::Project(command) => project::run(command, &globals),
            Commands::Board {
                view,
                status,
                hide_done,
                project,
                today,
            } => board::run(
                board::BoardOptions {
                    view,
                    status,
                    hide_done,
                    project,
                    today,
                },
                &globals,
            ),
            Commands::Settings(command) => settings::run(command, &globals),
            Commands::Op(command) => op::run(command, &globals),
            Commands::Undo { op } => op::run_undo(op, &globals),
            Commands::Init => run_init(&globals),
        }
    }
}

/// Global flags shared by every subcommand handler.
#[derive(Debug, Clone)]
pub struct Globals {
    pub dir: Option<PathBuf>,
    pub json: bool,
    pub quiet: bool,
    pub events: Option<String>,
}

impl Globals {
    pub fn output_options(&self) -> crate::output::OutputOptions {
        crate::output::OutputOptions {
            json: self.json,
            quiet: self.quiet,
        }
    }

    pub fn open_store(&self) -> Result<crate::store::Store> {
        let storage = crate::storage::Storage::resolve(self.dir.clone())?;
        crate::store::Store::open(storage)
    }

    pub fn event_sink(&self) -> Result<Option<crate::events::EventSink>> {
        match crate::events::EventDestination::parse(self.events.as_deref()) {
            Some(destination) => Ok(Some(destination.open()?)),
            None => Ok(None),
        }
    }
}

fn run_init(globals: &Globals) -> Result<()> {
    let storage = crate::storage::Storage::resolve(globals.dir.clone())?;
    storage.init()?;

    let mut human = crate::output::HumanOutput::new("Initialized board");
    human.push_summary("dir", storage.root().display().to_string());

    #[derive(serde::Serialize)]
    struct InitData {
        dir: String,
    }

    crate::output::emit_success(
        globals.output_options(),
        "init",
        &InitData {
            dir: storage.root().display().to_string(),
        },
        Some(&human),
    )
}
