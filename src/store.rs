use crate::task::Task;
use rusqlite::{params, Connection};
use std::path::Path;

// AUTOINCREMENT keeps ids monotonic across deletes; rowids are never reused.
const SCHEMA: &str = "CREATE TABLE IF NOT EXISTS tasks (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    description TEXT NOT NULL,
    priority TEXT NOT NULL,
    due_date TEXT NOT NULL,
    completed INTEGER NOT NULL DEFAULT 0
);";

const INSERT_TASK: &str =
    "INSERT INTO tasks (description, priority, due_date, completed) VALUES (?1, ?2, ?3, 0)";
const SELECT_TASKS: &str =
    "SELECT id, description, priority, due_date, completed FROM tasks ORDER BY id";
const DELETE_TASK: &str = "DELETE FROM tasks WHERE id = ?1";
const MARK_COMPLETED: &str = "UPDATE tasks SET completed = 1 WHERE id = ?1";

/// SQLite-backed store for tasks. Owns the one connection for the
/// lifetime of the program; every call commits before returning.
pub struct TaskStore {
    conn: Connection,
}

impl TaskStore {
    /// Open (or create) the database at `path` and ensure the schema
    /// exists. Safe to call on every startup.
    pub fn open<P: AsRef<Path>>(path: P) -> rusqlite::Result<Self> {
        Self::from_connection(Connection::open(path)?)
    }

    /// In-memory database, used by tests.
    pub fn open_in_memory() -> rusqlite::Result<Self> {
        Self::from_connection(Connection::open_in_memory()?)
    }

    fn from_connection(conn: Connection) -> rusqlite::Result<Self> {
        conn.execute_batch(SCHEMA)?;
        Ok(Self { conn })
    }

    /// Insert a new task with `completed = false` and return its id.
    pub fn create(
        &self,
        description: &str,
        priority: &str,
        due_date: &str,
    ) -> rusqlite::Result<i64> {
        self.conn
            .execute(INSERT_TASK, params![description, priority, due_date])?;
        Ok(self.conn.last_insert_rowid())
    }

    /// Snapshot of all tasks in insertion order.
    pub fn list_all(&self) -> rusqlite::Result<Vec<Task>> {
        let mut stmt = self.conn.prepare(SELECT_TASKS)?;
        let rows = stmt.query_map([], |row| {
            Ok(Task {
                id: row.get(0)?,
                description: row.get(1)?,
                priority: row.get(2)?,
                due_date: row.get(3)?,
                completed: row.get(4)?,
            })
        })?;
        rows.collect()
    }

    /// Delete the task with `id`. A missing id is a no-op, not an error.
    pub fn delete_by_id(&self, id: i64) -> rusqlite::Result<()> {
        self.conn.execute(DELETE_TASK, params![id])?;
        Ok(())
    }

    /// Set `completed = true` for the task with `id`. No-op if absent;
    /// idempotent.
    pub fn mark_completed(&self, id: i64) -> rusqlite::Result<()> {
        self.conn.execute(MARK_COMPLETED, params![id])?;
        Ok(())
    }
}
