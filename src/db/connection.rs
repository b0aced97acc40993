use std::path::Path;

use rusqlite::Connection;

use crate::error::StoreError;

/// Open (or create) the SQLite file at `path`.
pub fn open_connection(path: &Path) -> Result<Connection, StoreError> {
    Connection::open(path).map_err(|err| {
        StoreError::Connection(format!("could not open {}: {err}", path.display()))
    })
}

/// Open a private in-memory database. Used by tests and throwaway sessions.
pub fn open_memory_connection() -> Result<Connection, StoreError> {
    Connection::open_in_memory().map_err(|err| StoreError::Connection(err.to_string()))
}

/// Create the `Aluno` table if it is missing. The explicit `UNIQUE` on the
/// primary key is redundant but existing database files carry it, so the DDL
/// keeps it to stay byte-compatible with them.
pub fn create_student_table(conn: &Connection) -> Result<(), StoreError> {
    conn.execute(
        "CREATE TABLE IF NOT EXISTS Aluno (
            matricula INTEGER PRIMARY KEY,
            nome TEXT,
            av1 REAL,
            av2 REAL,
            media REAL,
            UNIQUE(matricula)
        )",
        [],
    )
    .map_err(|err| StoreError::Schema(err.to_string()))?;

    Ok(())
}
