//! Database layer for the to-do store.
//!
//! The store keeps no connection between operations: every call opens the
//! file, runs its statements, commits and closes.

pub mod schema;
pub mod tasks;

use crate::error::TodoResult;
use rusqlite::Connection;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Database handle parameterized by the store file path.
#[derive(Debug, Clone)]
pub struct Database {
    path: PathBuf,
}

impl Database {
    /// Open or create the database at the given path and ensure the task table exists.
    pub fn open<P: AsRef<Path>>(path: P) -> TodoResult<Self> {
        let db = Self {
            path: path.as_ref().to_path_buf(),
        };

        db.initialize()?;

        Ok(db)
    }

    /// Path of the backing store file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Create the task table if it is absent. Idempotent.
    pub fn initialize(&self) -> TodoResult<()> {
        self.with_conn(|conn| schema::create_tables(conn))
    }

    fn connect(&self) -> TodoResult<Connection> {
        debug!(path = %self.path.display(), "opening store");
        let conn = Connection::open(&self.path)?;
        conn.busy_timeout(std::time::Duration::from_millis(5000))?;
        Ok(conn)
    }

    /// Execute a function on a fresh connection that is closed afterwards.
    pub fn with_conn<F, T>(&self, f: F) -> TodoResult<T>
    where
        F: FnOnce(&Connection) -> TodoResult<T>,
    {
        let conn = self.connect()?;
        let result = f(&conn)?;
        close(conn)?;
        Ok(result)
    }

    /// Execute a function with mutable access to a fresh connection (for transactions).
    pub fn with_conn_mut<F, T>(&self, f: F) -> TodoResult<T>
    where
        F: FnOnce(&mut Connection) -> TodoResult<T>,
    {
        let mut conn = self.connect()?;
        let result = f(&mut conn)?;
        close(conn)?;
        Ok(result)
    }
}

fn close(conn: Connection) -> TodoResult<()> {
    conn.close().map_err(|(_, err)| err)?;
    Ok(())
}
