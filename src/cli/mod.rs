//! CLI argument definitions for Berth.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Berth - group filesystem projects into categories and open them in your
/// editor.
///
/// Run `bt` with no arguments to get the picker menu.
#[derive(Parser, Debug)]
#[command(name = "bt")]
#[command(author, version, about = "Group filesystem projects into categories and open them in your editor", long_about = None)]
pub struct Cli {
    /// Output in JSON instead of human-readable text
    #[arg(long, global = true)]
    pub json: bool,

    /// Data directory holding the project database and action log.
    /// Can also be set via the BERTH_DATA_DIR environment variable.
    #[arg(long = "data-dir", global = true, env = "BERTH_DATA_DIR")]
    pub data_dir: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Top-level commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Pick a category, then a project, and open it in your editor
    /// (also the default when no command is given)
    Menu,

    /// Project management commands
    Project {
        #[command(subcommand)]
        command: ProjectCommands,
    },

    /// Category management commands
    Category {
        #[command(subcommand)]
        command: CategoryCommands,
    },

    /// Configuration management
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },

    /// System administration commands
    System {
        #[command(subcommand)]
        command: SystemCommands,
    },
}

/// Project subcommands
#[derive(Subcommand, Debug)]
pub enum ProjectCommands {
    /// Add a new project (prompts for anything not given as a flag)
    Add {
        /// Project name
        #[arg(short, long)]
        name: Option<String>,

        /// Category name to file the project under (default: Unnamed)
        #[arg(short, long)]
        category: Option<String>,

        /// Language label (free text, e.g. "Rust")
        #[arg(short, long)]
        language: Option<String>,

        /// Filesystem path of the project
        #[arg(short, long)]
        path: Option<String>,

        /// Mark the project as using a virtual environment
        #[arg(long, conflicts_with = "no_venv")]
        venv: bool,

        /// Mark the project as not using a virtual environment
        #[arg(long)]
        no_venv: bool,

        /// Virtual environment manager (implies --venv)
        #[arg(long)]
        venv_manager: Option<String>,
    },

    /// List projects grouped by category
    List {
        /// Only show projects in this category
        #[arg(short, long)]
        category: Option<String>,
    },

    /// Show a single project
    Show {
        /// Project id
        id: i64,
    },

    /// Edit a project (flags apply directly; without flags, walks the
    /// interactive field-by-field editor)
    Edit {
        /// Project id (picked interactively when omitted)
        id: Option<i64>,

        /// New project name
        #[arg(short, long)]
        name: Option<String>,

        /// New category name
        #[arg(short, long)]
        category: Option<String>,

        /// New language label
        #[arg(short, long)]
        language: Option<String>,

        /// New filesystem path
        #[arg(short, long)]
        path: Option<String>,

        /// Mark the project as using a virtual environment
        #[arg(long, conflicts_with = "no_venv")]
        venv: bool,

        /// Mark the project as not using a virtual environment
        #[arg(long)]
        no_venv: bool,

        /// New virtual environment manager
        #[arg(long)]
        venv_manager: Option<String>,
    },

    /// Delete a project
    Rm {
        /// Project id (picked interactively when omitted)
        id: Option<i64>,

        /// Skip the confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },

    /// Open a project in your editor
    Open {
        /// Project id (picked interactively when omitted)
        id: Option<i64>,
    },
}

/// Category subcommands
#[derive(Subcommand, Debug)]
pub enum CategoryCommands {
    /// Add a new category
    Add {
        /// Category name (prompted for when omitted)
        name: Option<String>,
    },

    /// List categories
    List,

    /// Rename a category
    Edit {
        /// Category id (picked interactively when omitted)
        id: Option<i64>,

        /// New category name (prompted for when omitted)
        #[arg(short, long)]
        name: Option<String>,
    },

    /// Delete a category and every project in it
    Rm {
        /// Category id (picked interactively when omitted)
        id: Option<i64>,

        /// Skip the confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },
}

/// Configuration subcommands
#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Get a configuration value
    Get {
        /// Configuration key (e.g. "editor")
        key: String,
    },

    /// Set a configuration value
    Set {
        /// Configuration key
        key: String,

        /// Value to set
        value: String,
    },

    /// List all configuration values
    List,
}

/// System subcommands
#[derive(Subcommand, Debug)]
pub enum SystemCommands {
    /// Show build metadata for this binary
    BuildInfo,
}

/// Package version from Cargo.toml.
pub fn package_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

/// Short git commit hash the binary was built from.
pub fn git_commit() -> &'static str {
    env!("BERTH_GIT_COMMIT")
}

/// Timestamp the binary was built at.
pub fn build_timestamp() -> &'static str {
    env!("BERTH_BUILD_TIMESTAMP")
}
