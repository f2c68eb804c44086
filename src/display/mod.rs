//! Display controller: turns user commands into store calls and keeps the
//! row list in sync with the store.
//!
//! Every mutation is followed by a full re-read of the store and a rebuild of
//! the rows. Nothing is patched incrementally.

pub mod rows;

pub use rows::{EditDraft, RowControls, RowView, build_rows};

use crate::db::Database;
use crate::error::{TodoError, TodoResult};
use crate::types::{MoveDirection, Task};
use tracing::{debug, error, warn};

/// A user action, independent of any widget toolkit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Add a task with the given title.
    Add(String),
    /// Set a task's completion flag.
    Toggle { id: i64, completed: bool },
    /// Swap a task with its incomplete neighbor.
    Move {
        direction: MoveDirection,
        id: i64,
        order: i64,
    },
    /// Open the inline editor on a row.
    Edit(i64),
    /// Store the edited title.
    SaveEdit { id: i64, title: String },
    /// Close the inline editor without saving.
    CancelEdit,
    /// Ask for confirmation before deleting.
    Delete(i64),
    /// Delete the task awaiting confirmation.
    ConfirmDelete,
    /// Drop the pending delete.
    CancelDelete,
    /// Close the current warning or fault message.
    DismissNotice,
}

/// A message the user must see.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notice {
    /// Rejected input; nothing was changed.
    Warning(String),
    /// A store operation failed.
    Fault(String),
}

/// Trimmed title, or a validation error when nothing is left.
pub fn validate_title(title: &str) -> TodoResult<&str> {
    let title = title.trim();
    if title.is_empty() {
        return Err(TodoError::empty_title("title"));
    }
    Ok(title)
}

pub struct Controller {
    db: Database,
    rows: Vec<RowView>,
    input: String,
    draft: Option<EditDraft>,
    pending_delete: Option<i64>,
    notice: Option<Notice>,
}

impl Controller {
    /// Create a controller and load the initial rows.
    pub fn new(db: Database) -> TodoResult<Self> {
        let mut controller = Self {
            db,
            rows: Vec::new(),
            input: String::new(),
            draft: None,
            pending_delete: None,
            notice: None,
        };
        controller.render()?;
        Ok(controller)
    }

    pub fn rows(&self) -> &[RowView] {
        &self.rows
    }

    pub fn input(&self) -> &str {
        &self.input
    }

    /// Text of the add field, bound to the window's input widget.
    pub fn input_mut(&mut self) -> &mut String {
        &mut self.input
    }

    pub fn draft(&self) -> Option<&EditDraft> {
        self.draft.as_ref()
    }

    /// Text of the open inline editor, bound to the row's edit widget.
    pub fn draft_mut(&mut self) -> Option<&mut EditDraft> {
        self.draft.as_mut()
    }

    pub fn pending_delete(&self) -> Option<i64> {
        self.pending_delete
    }

    /// Task awaiting delete confirmation, if it is still displayed.
    pub fn pending_delete_task(&self) -> Option<&Task> {
        let id = self.pending_delete?;
        self.rows.iter().map(|r| &r.task).find(|t| t.id == id)
    }

    pub fn notice(&self) -> Option<&Notice> {
        self.notice.as_ref()
    }

    /// Re-read every task and rebuild all rows.
    ///
    /// An open editor or pending delete survives unless its task no longer exists.
    pub fn render(&mut self) -> TodoResult<()> {
        let tasks = self.db.list_all()?;
        if let Some(draft) = &self.draft {
            if !tasks.iter().any(|t| t.id == draft.id) {
                debug!(id = draft.id, "dropping edit draft for removed task");
                self.draft = None;
            }
        }
        if let Some(id) = self.pending_delete {
            if !tasks.iter().any(|t| t.id == id) {
                debug!(id, "dropping pending delete for removed task");
                self.pending_delete = None;
            }
        }
        self.rows = build_rows(tasks, self.draft.as_ref());
        Ok(())
    }

    /// Rebuild rows from the current snapshot after a view-only change.
    fn refresh_rows(&mut self) {
        let tasks = self.rows.drain(..).map(|r| r.task).collect();
        self.rows = build_rows(tasks, self.draft.as_ref());
    }

    /// Apply one command. Storage failures are returned; validation failures
    /// become a warning notice and leave the store untouched.
    pub fn dispatch(&mut self, command: Command) -> TodoResult<()> {
        debug!(?command, "dispatch");
        match self.apply(command) {
            Err(e) if e.is_validation() => {
                warn!(code = ?e.code(), field = e.field(), error = %e, "rejected input");
                self.notice = Some(Notice::Warning(e.to_string()));
                Ok(())
            }
            result => result,
        }
    }

    fn apply(&mut self, command: Command) -> TodoResult<()> {
        match command {
            Command::Add(title) => {
                let title = validate_title(&title)?;
                self.db.create_task(title)?;
                self.input.clear();
                self.render()
            }
            Command::Toggle { id, completed } => {
                self.db.set_completed(id, completed)?;
                self.render()
            }
            Command::Move {
                direction,
                id,
                order,
            } => {
                self.db.move_task(direction, id, order)?;
                self.render()
            }
            Command::Edit(id) => {
                let title = match self.rows.iter().find(|r| r.task.id == id) {
                    Some(row) => row.task.title.clone(),
                    None => self
                        .db
                        .get_task(id)?
                        .ok_or(TodoError::TaskNotFound(id))?
                        .title,
                };
                self.draft = Some(EditDraft { id, text: title });
                self.refresh_rows();
                Ok(())
            }
            Command::SaveEdit { id, title } => {
                let title = validate_title(&title)?;
                self.db.set_title(id, title)?;
                if self.draft.as_ref().is_some_and(|d| d.id == id) {
                    self.draft = None;
                }
                self.render()
            }
            Command::CancelEdit => {
                self.draft = None;
                self.refresh_rows();
                Ok(())
            }
            Command::Delete(id) => {
                self.pending_delete = Some(id);
                Ok(())
            }
            Command::ConfirmDelete => {
                let Some(id) = self.pending_delete.take() else {
                    return Ok(());
                };
                self.db.delete_task(id)?;
                self.render()
            }
            Command::CancelDelete => {
                self.pending_delete = None;
                Ok(())
            }
            Command::DismissNotice => {
                self.notice = None;
                Ok(())
            }
        }
    }

    /// Dispatch and turn a storage failure into a visible fault notice.
    pub fn handle(&mut self, command: Command) {
        if let Err(e) = self.dispatch(command) {
            error!(error = %e, "command failed");
            self.notice = Some(Notice::Fault(e.to_string()));
        }
    }
}
