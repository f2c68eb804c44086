//! CLI command definitions for todo-desk
//!
//! This module defines the CLI structure using clap's derive macros.
//! With no subcommand the desktop window opens.

pub mod headless;

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Desktop to-do list with a local SQLite store
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Path to configuration file
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Path to database file (overrides config)
    #[arg(short, long, global = true)]
    pub database: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Logging output: 0/off, 1/stdout, 2/stderr (default), or filename
    #[arg(short, long, default_value = "2", global = true)]
    pub log: String,

    #[command(subcommand)]
    pub command: Option<Command>,
}

/// Available subcommands
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Open the desktop window (default if no subcommand given)
    Window,

    /// Print every task, incomplete first
    List {
        /// Output format: json or markdown
        #[arg(short, long, default_value = "markdown")]
        format: String,
    },

    /// Add a task
    Add {
        /// Task title
        title: String,
    },

    /// Mark a task completed
    Done { id: i64 },

    /// Mark a task not completed
    Undone { id: i64 },

    /// Change a task's title
    Rename {
        id: i64,
        /// New title
        title: String,
    },

    /// Remove a task
    Remove {
        id: i64,
        /// Confirm the removal
        #[arg(short, long)]
        yes: bool,
    },

    /// Move an incomplete task one place up
    Up { id: i64 },

    /// Move an incomplete task one place down
    Down { id: i64 },
}
