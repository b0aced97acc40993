use std::path::{Path, PathBuf};

use rusqlite::Connection;

use crate::error::StoreError;
use crate::models::Student;
use crate::store::StudentStore;

use super::connection::{create_student_table, open_connection, open_memory_connection};
use super::students::{enrollment_exists, fetch_enrollment_ids, fetch_student, insert_student};

/// Where the connection points once opened.
#[derive(Debug, Clone)]
enum Location {
    File(PathBuf),
    Memory,
}

/// [`StudentStore`] backed by a single SQLite connection. The connection is
/// held for the lifetime of the store and released by `close` or on drop.
pub struct SqliteStore {
    location: Location,
    conn: Option<Connection>,
}

impl SqliteStore {
    /// A disconnected store for the database file at `path`.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            location: Location::File(path.into()),
            conn: None,
        }
    }

    /// A disconnected store that will open a private in-memory database.
    pub fn in_memory() -> Self {
        Self {
            location: Location::Memory,
            conn: None,
        }
    }

    /// Connect and make sure the table exists. If the schema step fails the
    /// freshly opened connection is dropped with the store.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let mut store = Self::new(path);
        store.connect()?;
        store.ensure_schema()?;
        Ok(store)
    }

    pub fn open_in_memory() -> Result<Self, StoreError> {
        let mut store = Self::in_memory();
        store.connect()?;
        store.ensure_schema()?;
        Ok(store)
    }

    pub fn is_connected(&self) -> bool {
        self.conn.is_some()
    }

    /// File backing this store, `None` for in-memory databases.
    pub fn path(&self) -> Option<&Path> {
        match &self.location {
            Location::File(path) => Some(path),
            Location::Memory => None,
        }
    }

    fn conn(&self) -> Result<&Connection, StoreError> {
        self.conn.as_ref().ok_or(StoreError::NotConnected)
    }
}

impl StudentStore for SqliteStore {
    fn connect(&mut self) -> Result<(), StoreError> {
        if self.conn.is_some() {
            return Ok(());
        }

        let conn = match &self.location {
            Location::File(path) => open_connection(path)?,
            Location::Memory => open_memory_connection()?,
        };
        match &self.location {
            Location::File(path) => log::info!("opened student database at {}", path.display()),
            Location::Memory => log::debug!("opened in-memory student database"),
        }
        self.conn = Some(conn);
        Ok(())
    }

    fn ensure_schema(&mut self) -> Result<(), StoreError> {
        create_student_table(self.conn()?)?;
        log::debug!("student table ready");
        Ok(())
    }

    fn insert_student(&mut self, student: &Student) -> Result<(), StoreError> {
        insert_student(self.conn()?, student)
    }

    fn get_student(&self, enrollment_id: i64) -> Result<Student, StoreError> {
        fetch_student(self.conn()?, enrollment_id)
    }

    fn exists(&self, enrollment_id: i64) -> Result<bool, StoreError> {
        enrollment_exists(self.conn()?, enrollment_id)
    }

    fn list_enrollment_ids(&self) -> Result<Vec<i64>, StoreError> {
        fetch_enrollment_ids(self.conn()?)
    }

    fn close(&mut self) -> Result<(), StoreError> {
        let Some(conn) = self.conn.take() else {
            return Ok(());
        };

        conn.close()
            .map_err(|(_, err)| StoreError::Connection(format!("could not close: {err}")))?;
        log::info!("closed student database");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn bia() -> Student {
        Student {
            enrollment_id: 7,
            name: "Bia".to_string(),
            score1: 6.5,
            score2: 7.0,
            average: 6.75,
        }
    }

    #[test]
    fn open_creates_database_file() {
        let temp_dir = TempDir::new().unwrap();
        let db_path = temp_dir.path().join("alunos.db");

        let store = SqliteStore::open(&db_path).unwrap();
        assert!(store.is_connected());
        assert_eq!(store.path(), Some(db_path.as_path()));
        assert!(db_path.exists());
    }

    #[test]
    fn records_survive_reopen() {
        let temp_dir = TempDir::new().unwrap();
        let db_path = temp_dir.path().join("alunos.db");

        {
            let mut store = SqliteStore::open(&db_path).unwrap();
            store.insert_student(&bia()).unwrap();
            store.close().unwrap();
        }

        let store = SqliteStore::open(&db_path).unwrap();
        assert_eq!(store.get_student(7).unwrap(), bia());
    }

    #[test]
    fn operations_fail_before_connect() {
        let mut store = SqliteStore::in_memory();
        assert_eq!(store.exists(1).unwrap_err(), StoreError::NotConnected);
        assert_eq!(store.ensure_schema().unwrap_err(), StoreError::NotConnected);
        assert_eq!(
            store.list_enrollment_ids().unwrap_err(),
            StoreError::NotConnected
        );
    }

    #[test]
    fn close_twice_is_a_no_op() {
        let mut store = SqliteStore::open_in_memory().unwrap();
        store.close().unwrap();
        store.close().unwrap();
        assert!(!store.is_connected());
        assert_eq!(store.get_student(7).unwrap_err(), StoreError::NotConnected);
    }

    #[test]
    fn close_on_never_connected_store() {
        let mut store = SqliteStore::new("unused.db");
        store.close().unwrap();
    }

    #[test]
    fn connect_fails_for_unreachable_path() {
        let temp_dir = TempDir::new().unwrap();
        let db_path = temp_dir.path().join("missing").join("alunos.db");

        let err = SqliteStore::open(&db_path).err().unwrap();
        assert!(matches!(err, StoreError::Connection(_)));
    }
}
