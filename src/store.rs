//! The capability set the controller relies on, plus an in-memory
//! implementation used when a real database would only slow tests down.

use crate::error::StoreError;
use crate::models::Student;

/// Table-scoped operations on student records. Implementations own their
/// connection; the controller only ever talks to this trait.
pub trait StudentStore {
    /// Open the underlying storage, creating it if absent.
    fn connect(&mut self) -> Result<(), StoreError>;

    /// Create the student table when it does not exist yet.
    fn ensure_schema(&mut self) -> Result<(), StoreError>;

    /// Persist a new record. Fails with [`StoreError::Duplicate`] when the
    /// enrollment id is already taken; the check runs before the write.
    fn insert_student(&mut self, student: &Student) -> Result<(), StoreError>;

    /// Fetch one record. Fails with [`StoreError::NotFound`] before touching
    /// the row when the id is unknown.
    fn get_student(&self, enrollment_id: i64) -> Result<Student, StoreError>;

    fn exists(&self, enrollment_id: i64) -> Result<bool, StoreError>;

    /// Every stored enrollment id in storage order.
    fn list_enrollment_ids(&self) -> Result<Vec<i64>, StoreError>;

    /// Release the connection. Calling it on a closed store is a no-op.
    fn close(&mut self) -> Result<(), StoreError>;
}

/// Vector-backed store that mimics the SQLite semantics: insertion order is
/// storage order, and every operation fails while disconnected.
#[derive(Debug)]
pub struct MemoryStore {
    students: Vec<Student>,
    connected: bool,
}

impl MemoryStore {
    /// A connected, empty store.
    pub fn new() -> Self {
        Self {
            students: Vec::new(),
            connected: true,
        }
    }

    pub fn is_connected(&self) -> bool {
        self.connected
    }

    fn guard(&self) -> Result<(), StoreError> {
        if self.connected {
            Ok(())
        } else {
            Err(StoreError::NotConnected)
        }
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl StudentStore for MemoryStore {
    fn connect(&mut self) -> Result<(), StoreError> {
        self.connected = true;
        Ok(())
    }

    fn ensure_schema(&mut self) -> Result<(), StoreError> {
        self.guard()
    }

    fn insert_student(&mut self, student: &Student) -> Result<(), StoreError> {
        if self.exists(student.enrollment_id)? {
            return Err(StoreError::Duplicate {
                enrollment_id: student.enrollment_id,
            });
        }
        self.students.push(student.clone());
        Ok(())
    }

    fn get_student(&self, enrollment_id: i64) -> Result<Student, StoreError> {
        self.guard()?;
        self.students
            .iter()
            .find(|s| s.enrollment_id == enrollment_id)
            .cloned()
            .ok_or(StoreError::NotFound { enrollment_id })
    }

    fn exists(&self, enrollment_id: i64) -> Result<bool, StoreError> {
        self.guard()?;
        Ok(self
            .students
            .iter()
            .any(|s| s.enrollment_id == enrollment_id))
    }

    fn list_enrollment_ids(&self) -> Result<Vec<i64>, StoreError> {
        self.guard()?;
        Ok(self.students.iter().map(|s| s.enrollment_id).collect())
    }

    fn close(&mut self) -> Result<(), StoreError> {
        self.connected = false;
        Ok(())
    }
}
