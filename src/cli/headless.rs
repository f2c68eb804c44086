//! Terminal subcommands that drive the same controller as the window.

use super::Command;
use crate::display::{Command as Action, Controller, Notice};
use crate::error::TodoError;
use crate::format::{OutputFormat, format_tasks};
use crate::types::MoveDirection;
use anyhow::{Result, anyhow, bail};

/// Run one terminal subcommand and return what should be printed.
pub fn run(controller: &mut Controller, command: Command) -> Result<String> {
    match command {
        Command::Window => bail!("the window cannot be opened from a headless run"),
        Command::List { format } => {
            let format = OutputFormat::parse(&format)
                .ok_or_else(|| anyhow!("unknown format '{}', expected json or markdown", format))?;
            let tasks: Vec<_> = controller.rows().iter().map(|r| r.task.clone()).collect();
            Ok(format_tasks(&tasks, format)?)
        }
        Command::Add { title } => {
            apply(controller, Action::Add(title))?;
            Ok("Task added.".to_string())
        }
        Command::Done { id } => {
            require(controller, id)?;
            apply(controller, Action::Toggle { id, completed: true })?;
            Ok(format!("Task {id} completed."))
        }
        Command::Undone { id } => {
            require(controller, id)?;
            apply(controller, Action::Toggle { id, completed: false })?;
            Ok(format!("Task {id} reopened."))
        }
        Command::Rename { id, title } => {
            require(controller, id)?;
            apply(controller, Action::Edit(id))?;
            apply(controller, Action::SaveEdit { id, title })?;
            Ok(format!("Task {id} renamed."))
        }
        Command::Remove { id, yes } => {
            if !yes {
                bail!("refusing to remove task {id} without --yes");
            }
            require(controller, id)?;
            apply(controller, Action::Delete(id))?;
            apply(controller, Action::ConfirmDelete)?;
            Ok(format!("Task {id} removed."))
        }
        Command::Up { id } => shift(controller, MoveDirection::Up, id),
        Command::Down { id } => shift(controller, MoveDirection::Down, id),
    }
}

/// Dispatch and turn a warning notice into an error.
fn apply(controller: &mut Controller, action: Action) -> Result<()> {
    controller.dispatch(action)?;
    if let Some(Notice::Warning(message)) = controller.notice() {
        bail!("{message}");
    }
    Ok(())
}

fn require(controller: &Controller, id: i64) -> Result<()> {
    if controller.rows().iter().any(|r| r.task.id == id) {
        Ok(())
    } else {
        Err(TodoError::TaskNotFound(id).into())
    }
}

fn shift(controller: &mut Controller, direction: MoveDirection, id: i64) -> Result<String> {
    let task = controller
        .rows()
        .iter()
        .find(|r| r.task.id == id)
        .map(|r| r.task.clone())
        .ok_or(TodoError::TaskNotFound(id))?;
    if task.completed {
        return Ok(format!("Task {id} is completed and keeps its place."));
    }
    apply(
        controller,
        Action::Move {
            direction,
            id,
            order: task.list_order,
        },
    )?;
    Ok(format!("Task {id} moved {}.", direction.as_str()))
}
