//! todo-desk library
//!
//! Store, display controller and window for a single-user to-do list.

pub mod cli;
pub mod config;
pub mod db;
pub mod display;
pub mod error;
pub mod format;
pub mod logging;
pub mod types;
pub mod ui;
