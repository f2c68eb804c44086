//! Table layout of the store file.

use crate::error::TodoResult;
use rusqlite::Connection;

/// The single task table.
///
/// `AUTOINCREMENT` keeps ids from being reused after the newest row is deleted.
/// Files created without it keep their existing table untouched.
pub const CREATE_TASKS: &str = "
    CREATE TABLE IF NOT EXISTS tasks (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        title TEXT NOT NULL,
        completed INTEGER NOT NULL,
        list_order INTEGER NOT NULL
    )
";

pub(crate) fn create_tables(conn: &Connection) -> TodoResult<()> {
    conn.execute_batch(CREATE_TASKS)?;
    Ok(())
}

/// Column names of the `tasks` table, in declaration order.
pub fn task_columns(conn: &Connection) -> TodoResult<Vec<String>> {
    let mut stmt = conn.prepare("SELECT name FROM pragma_table_info('tasks') ORDER BY cid")?;
    let names = stmt
        .query_map([], |row| row.get::<_, String>(0))?
        .collect::<Result<Vec<_>, _>>()?;
    Ok(names)
}
