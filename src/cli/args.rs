//! CLI argument definitions using clap

use std::path::PathBuf;

use clap::{ArgAction, Parser, Subcommand, ValueHint};

/// Collapsible organization hierarchy with account drag-and-drop move requests
#[derive(Parser, Debug)]
#[command(name = "orgtree")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Increase log verbosity (-d info, -dd debug, -ddd trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub debug: u8,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Render the hierarchy as a tree
    Tree {
        /// Snapshot file (.json or .toml); falls back to the configured snapshot
        #[arg(value_hint = ValueHint::FilePath)]
        snapshot: Option<PathBuf>,
        /// Expand every organization before rendering
        #[arg(long, conflicts_with = "collapse_all")]
        expand_all: bool,
        /// Collapse every organization before rendering
        #[arg(long)]
        collapse_all: bool,
        /// Print the render descriptor as JSON
        #[arg(long)]
        json: bool,
    },

    /// Toggle organizations (in order) and render the result
    Toggle {
        /// Snapshot file
        #[arg(short, long, value_hint = ValueHint::FilePath)]
        snapshot: Option<PathBuf>,
        /// Trading names to toggle
        #[arg(required = true, num_args = 1..)]
        nodes: Vec<String>,
    },

    /// Drag an account onto an organization and drop it
    Move {
        /// Snapshot file
        #[arg(short, long, value_hint = ValueHint::FilePath)]
        snapshot: Option<PathBuf>,
        /// Account name
        account: String,
        /// Target trading name
        target: String,
    },

    /// Replay an interaction script (stdin when no script is given)
    Session {
        /// Snapshot file
        #[arg(value_hint = ValueHint::FilePath)]
        snapshot: Option<PathBuf>,
        /// Script file, one interaction per line
        #[arg(long, value_hint = ValueHint::FilePath)]
        script: Option<PathBuf>,
    },

    /// Manage settings
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },

    /// Generate shell completions
    Completion {
        /// Shell type
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}

#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Show effective configuration
    Show,
    /// Print a template config file
    Template,
    /// Show config file locations
    Path,
}
