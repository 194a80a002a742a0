//! Command-line arguments

use std::path::PathBuf;

use arbor_lib::dnd::DropPosition;
use clap::Parser;
use clap::Subcommand;

#[derive(Debug, Parser)]
#[command(name = "arbor")]
#[command(about = "Edit a tree stored as JSON", long_about = None)]
pub struct Cli {
    /// Tree file (defaults to the platform data directory)
    #[arg(short, long, global = true)]
    pub file: Option<PathBuf>,

    /// Config file (defaults to the platform config directory)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Write the sample tree
    Init {
        /// Overwrite an existing tree file
        #[arg(long)]
        force: bool,
    },

    #[command(flatten)]
    Edit(EditCommand),
}

#[derive(Debug, Clone, Subcommand)]
pub enum EditCommand {
    /// Print the visible rows
    Show,

    /// Print one node and its visible descendants
    Find { id: String },

    /// Rename a node
    Rename { id: String, name: String },

    /// Append a new leaf to a node's children
    Add { parent: String, name: String },

    /// Delete a node and everything below it
    Delete {
        id: String,

        /// Confirm the deletion
        #[arg(short, long)]
        yes: bool,
    },

    /// Expand or collapse a node, loading its children if needed
    Toggle { id: String },

    /// Move a node before, after or inside another
    Move {
        dragged: String,
        target: String,
        /// before, after or inside
        position: DropPosition,
    },

    /// Drop a node onto a row at a pointer position
    Drop {
        dragged: String,
        target: String,

        /// Top edge of the target row
        #[arg(long, default_value = "0")]
        top: f32,

        /// Height of the target row
        #[arg(long, default_value = "24")]
        height: f32,

        /// Pointer position
        #[arg(long, allow_negative_numbers = true)]
        y: f32,
    },
}
