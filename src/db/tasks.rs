//! Task CRUD and reorder operations.

use super::Database;
use crate::error::TodoResult;
use crate::types::{MoveDirection, Task};
use rusqlite::{OptionalExtension, Row, params};
use tracing::{debug, info};

const TASK_COLUMNS: &str = "id, title, completed, list_order";

pub fn parse_task_row(row: &Row) -> rusqlite::Result<Task> {
    Ok(Task {
        id: row.get("id")?,
        title: row.get("title")?,
        completed: row.get::<_, i64>("completed")? != 0,
        list_order: row.get("list_order")?,
    })
}

impl Database {
    /// All tasks, incomplete first, each group by ascending `list_order`.
    pub fn list_all(&self) -> TodoResult<Vec<Task>> {
        self.with_conn(|conn| {
            let mut stmt = conn.prepare(&format!(
                "SELECT {TASK_COLUMNS} FROM tasks ORDER BY completed ASC, list_order ASC"
            ))?;
            let tasks = stmt
                .query_map([], parse_task_row)?
                .collect::<Result<Vec<_>, _>>()?;
            debug!(count = tasks.len(), "listed tasks");
            Ok(tasks)
        })
    }

    /// Get a task by id.
    pub fn get_task(&self, id: i64) -> TodoResult<Option<Task>> {
        self.with_conn(|conn| {
            let task = conn
                .query_row(
                    &format!("SELECT {TASK_COLUMNS} FROM tasks WHERE id = ?1"),
                    params![id],
                    parse_task_row,
                )
                .optional()?;
            Ok(task)
        })
    }

    /// Number of stored tasks.
    pub fn count(&self) -> TodoResult<usize> {
        self.with_conn(|conn| {
            let n: i64 = conn.query_row("SELECT COUNT(*) FROM tasks", [], |row| row.get(0))?;
            Ok(n as usize)
        })
    }

    /// Insert an incomplete task ordered after every existing task. Returns the new id.
    ///
    /// Titles are stored as given; callers reject empty titles.
    pub fn create_task(&self, title: &str) -> TodoResult<i64> {
        self.with_conn_mut(|conn| {
            let tx = conn.transaction()?;
            let max_order: Option<i64> =
                tx.query_row("SELECT MAX(list_order) FROM tasks", [], |row| row.get(0))?;
            let new_order = max_order.unwrap_or(0) + 1;
            tx.execute(
                "INSERT INTO tasks (title, completed, list_order) VALUES (?1, 0, ?2)",
                params![title, new_order],
            )?;
            let id = tx.last_insert_rowid();
            tx.commit()?;
            info!(id, list_order = new_order, "created task");
            Ok(id)
        })
    }

    /// Delete a task. Deleting an absent id is a no-op.
    pub fn delete_task(&self, id: i64) -> TodoResult<()> {
        self.with_conn(|conn| {
            let removed = conn.execute("DELETE FROM tasks WHERE id = ?1", params![id])?;
            info!(id, removed, "deleted task");
            Ok(())
        })
    }

    /// Set the completion flag of one task.
    pub fn set_completed(&self, id: i64, completed: bool) -> TodoResult<()> {
        self.with_conn(|conn| {
            conn.execute(
                "UPDATE tasks SET completed = ?1 WHERE id = ?2",
                params![completed as i64, id],
            )?;
            info!(id, completed, "updated task status");
            Ok(())
        })
    }

    /// Replace the title of one task.
    pub fn set_title(&self, id: i64, title: &str) -> TodoResult<()> {
        self.with_conn(|conn| {
            conn.execute(
                "UPDATE tasks SET title = ?1 WHERE id = ?2",
                params![title, id],
            )?;
            info!(id, "renamed task");
            Ok(())
        })
    }

    /// Swap `list_order` with the previous incomplete task, if any.
    pub fn move_up(&self, id: i64, current_order: i64) -> TodoResult<bool> {
        self.move_task(MoveDirection::Up, id, current_order)
    }

    /// Swap `list_order` with the next incomplete task, if any.
    pub fn move_down(&self, id: i64, current_order: i64) -> TodoResult<bool> {
        self.move_task(MoveDirection::Down, id, current_order)
    }

    /// Swap `list_order` with the adjacent incomplete task in `direction`.
    ///
    /// `current_order` is trusted as the task's stored order. Returns whether a
    /// swap happened; a task already at the boundary is left untouched. Both
    /// updates commit together.
    pub fn move_task(
        &self,
        direction: MoveDirection,
        id: i64,
        current_order: i64,
    ) -> TodoResult<bool> {
        let neighbor_sql = match direction {
            MoveDirection::Up => {
                "SELECT id, list_order FROM tasks
                 WHERE completed = 0 AND list_order < ?1
                 ORDER BY list_order DESC LIMIT 1"
            }
            MoveDirection::Down => {
                "SELECT id, list_order FROM tasks
                 WHERE completed = 0 AND list_order > ?1
                 ORDER BY list_order ASC LIMIT 1"
            }
        };

        self.with_conn_mut(|conn| {
            let tx = conn.transaction()?;
            let neighbor: Option<(i64, i64)> = tx
                .query_row(neighbor_sql, params![current_order], |row| {
                    Ok((row.get(0)?, row.get(1)?))
                })
                .optional()?;

            let Some((neighbor_id, neighbor_order)) = neighbor else {
                debug!(id, direction = direction.as_str(), "no neighbor, move skipped");
                return Ok(false);
            };

            tx.execute(
                "UPDATE tasks SET list_order = ?1 WHERE id = ?2",
                params![neighbor_order, id],
            )?;
            tx.execute(
                "UPDATE tasks SET list_order = ?1 WHERE id = ?2",
                params![current_order, neighbor_id],
            )?;
            tx.commit()?;

            info!(
                id,
                neighbor_id,
                direction = direction.as_str(),
                "swapped task order"
            );
            Ok(true)
        })
    }
}
