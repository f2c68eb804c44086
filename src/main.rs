//! todo-desk
//!
//! Desktop to-do list manager backed by a local SQLite file.

use anyhow::{Context, Result};
use clap::Parser;
use todo_desk::cli::{Cli, Command, headless};
use todo_desk::config::Config;
use todo_desk::db::Database;
use todo_desk::display::Controller;
use todo_desk::logging::{self, LogTarget};
use todo_desk::ui;
use tracing::{debug, info};

fn main() -> Result<()> {
    let cli = Cli::parse();

    logging::init(&LogTarget::parse(&cli.log), cli.verbose)?;

    let mut config = Config::resolve(cli.config.as_deref()).context("loading configuration")?;

    // Override paths from CLI arguments
    if let Some(db_path) = &cli.database {
        config.store.db_path = db_path.clone();
    }
    debug!(?config, "resolved configuration");

    config.ensure_db_dir()?;
    let db = Database::open(&config.store.db_path).with_context(|| {
        format!("opening task store {}", config.store.db_path.display())
    })?;
    let mut controller = Controller::new(db)?;

    match cli.command {
        Some(Command::Window) | None => {
            info!(db = %config.store.db_path.display(), "starting window");
            ui::run(&config.window, controller)?;
        }
        Some(command) => {
            let output = headless::run(&mut controller, command)?;
            println!("{output}");
        }
    }

    Ok(())
}
