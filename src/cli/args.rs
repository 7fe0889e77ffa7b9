//! CLI argument definitions using clap

use std::path::PathBuf;

use clap::{ArgAction, Parser, Subcommand, ValueHint};

/// Hierarchical bookmark manager: flat parent-referencing links rendered as a tree
#[derive(Parser, Debug)]
#[command(name = "linktree")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub verbose: u8,

    /// Link store file (default: from config)
    #[arg(short, long, global = true, env = "LINKTREE_STORE", value_hint = ValueHint::FilePath)]
    pub store: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Add a link
    Add {
        /// Unique link name
        name: String,
        /// Target URL
        #[arg(short, long)]
        url: Option<String>,
        /// Name of an existing parent link
        #[arg(short, long)]
        parent: Option<String>,
    },

    /// Delete a link without children (interactive selection if no name given)
    Delete {
        /// Link name
        name: Option<String>,
    },

    /// Show links as tree
    Tree {
        /// Emit JSON instead of a tree drawing
        #[arg(long)]
        json: bool,
    },

    /// List links breadth-first
    List {
        /// Emit JSON render entries
        #[arg(long)]
        json: bool,
    },

    /// Open the store file in the editor, then show the rebuilt tree
    Edit,

    /// Show store location and statistics
    Info,

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
    /// Show merged config
    Show,

    /// Create global config template
    Init {
        /// Overwrite an existing config file
        #[arg(short, long)]
        force: bool,
    },

    /// Show config paths
    Path,
}
