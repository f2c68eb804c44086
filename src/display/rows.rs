//! Row view models built from a store snapshot.

use crate::types::Task;

/// In-progress inline edit of one task's title.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditDraft {
    pub id: i64,
    pub text: String,
}

/// Which controls a row shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RowControls {
    pub toggle: bool,
    pub move_up: bool,
    pub move_down: bool,
    pub edit: bool,
    pub delete: bool,
    pub save: bool,
}

impl RowControls {
    fn viewing(completed: bool) -> Self {
        Self {
            toggle: true,
            move_up: !completed,
            move_down: !completed,
            edit: true,
            delete: true,
            save: false,
        }
    }

    fn editing() -> Self {
        Self {
            toggle: true,
            save: true,
            ..Self::default()
        }
    }
}

/// One rendered task row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RowView {
    pub task: Task,
    /// `Some` while the row shows an inline editor instead of its label.
    pub editor: Option<String>,
    pub controls: RowControls,
}

impl RowView {
    pub fn is_editing(&self) -> bool {
        self.editor.is_some()
    }
}

/// Map a snapshot to rows in the order given. Pure; no store access.
pub fn build_rows(tasks: Vec<Task>, draft: Option<&EditDraft>) -> Vec<RowView> {
    tasks
        .into_iter()
        .map(|task| match draft {
            Some(d) if d.id == task.id => RowView {
                editor: Some(d.text.clone()),
                controls: RowControls::editing(),
                task,
            },
            _ => RowView {
                editor: None,
                controls: RowControls::viewing(task.completed),
                task,
            },
        })
        .collect()
}
