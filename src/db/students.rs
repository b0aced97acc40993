use rusqlite::{params, Connection, Error as SqlError, ErrorCode};

use crate::error::StoreError;
use crate::models::Student;

/// Report whether a row with the given enrollment id is present.
pub fn enrollment_exists(conn: &Connection, enrollment_id: i64) -> Result<bool, StoreError> {
    conn.query_row(
        "SELECT EXISTS(SELECT 1 FROM Aluno WHERE matricula = ?1)",
        [enrollment_id],
        |row| row.get(0),
    )
    .map_err(|err| StoreError::query("look up enrollment", err))
}

/// Insert a new student row. The existence check runs first so callers get a
/// friendly duplicate message; the constraint mapping below only matters if
/// the row appears between the check and the write.
pub fn insert_student(conn: &Connection, student: &Student) -> Result<(), StoreError> {
    if enrollment_exists(conn, student.enrollment_id)? {
        return Err(StoreError::Duplicate {
            enrollment_id: student.enrollment_id,
        });
    }

    conn.execute(
        "INSERT INTO Aluno (matricula, nome, av1, av2, media) VALUES (?1, ?2, ?3, ?4, ?5)",
        params![
            student.enrollment_id,
            student.name,
            student.score1,
            student.score2,
            student.average
        ],
    )
    .map_err(|err| map_unique_constraint(err, student.enrollment_id))?;

    Ok(())
}

/// Fetch the full record for one enrollment id.
pub fn fetch_student(conn: &Connection, enrollment_id: i64) -> Result<Student, StoreError> {
    if !enrollment_exists(conn, enrollment_id)? {
        return Err(StoreError::NotFound { enrollment_id });
    }

    conn.query_row(
        "SELECT matricula, nome, av1, av2, media FROM Aluno WHERE matricula = ?1",
        [enrollment_id],
        |row| {
            Ok(Student {
                enrollment_id: row.get(0)?,
                name: row.get(1)?,
                score1: row.get(2)?,
                score2: row.get(3)?,
                average: row.get(4)?,
            })
        },
    )
    .map_err(|err| StoreError::query("load student", err))
}

/// Every enrollment id in whatever order SQLite hands them back.
pub fn fetch_enrollment_ids(conn: &Connection) -> Result<Vec<i64>, StoreError> {
    let mut stmt = conn
        .prepare("SELECT matricula FROM Aluno")
        .map_err(|err| StoreError::query("prepare enrollment query", err))?;

    let ids = stmt
        .query_map([], |row| row.get(0))
        .map_err(|err| StoreError::query("load enrollments", err))?
        .collect::<Result<Vec<i64>, _>>()
        .map_err(|err| StoreError::query("collect enrollments", err))?;

    Ok(ids)
}

/// Coerce SQLite constraint errors into the duplicate variant; anything else
/// becomes a generic write failure.
fn map_unique_constraint(err: SqlError, enrollment_id: i64) -> StoreError {
    if matches!(
        err.sqlite_error_code(),
        Some(ErrorCode::ConstraintViolation)
    ) {
        StoreError::Duplicate { enrollment_id }
    } else {
        StoreError::query("add student", err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::connection::{create_student_table, open_memory_connection};

    fn setup() -> Connection {
        let conn = open_memory_connection().unwrap();
        create_student_table(&conn).unwrap();
        conn
    }

    fn ana() -> Student {
        Student {
            enrollment_id: 10,
            name: "Ana".to_string(),
            score1: 8.0,
            score2: 9.0,
            average: 8.5,
        }
    }

    #[test]
    fn insert_then_fetch_returns_all_columns() {
        let conn = setup();
        insert_student(&conn, &ana()).unwrap();

        assert!(enrollment_exists(&conn, 10).unwrap());
        assert_eq!(fetch_student(&conn, 10).unwrap(), ana());
    }

    #[test]
    fn fetch_missing_student_is_not_found() {
        let conn = setup();
        assert_eq!(
            fetch_student(&conn, 99).unwrap_err(),
            StoreError::NotFound { enrollment_id: 99 }
        );
    }

    #[test]
    fn raw_constraint_violation_maps_to_duplicate() {
        let conn = setup();
        insert_student(&conn, &ana()).unwrap();

        let err = conn
            .execute(
                "INSERT INTO Aluno (matricula, nome, av1, av2, media) VALUES (10, 'Bia', 1, 1, 1)",
                [],
            )
            .unwrap_err();
        assert_eq!(
            map_unique_constraint(err, 10),
            StoreError::Duplicate { enrollment_id: 10 }
        );
    }

    #[test]
    fn stored_average_is_not_recomputed() {
        let conn = setup();
        let mut student = ana();
        student.average = 1.0;
        insert_student(&conn, &student).unwrap();

        assert_eq!(fetch_student(&conn, 10).unwrap().average, 1.0);
    }

    #[test]
    fn schema_creation_is_repeatable() {
        let conn = setup();
        create_student_table(&conn).unwrap();
        assert!(fetch_enrollment_ids(&conn).unwrap().is_empty());
    }
}
