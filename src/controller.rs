//! Mediator between raw form input and the student store. All UI fields
//! arrive as text; this module turns them into a typed [`Student`] or a
//! [`RegistryError`] the UI can show verbatim.

use crate::error::{RegistryError, StoreError, ValidationError};
use crate::models::Student;
use crate::store::StudentStore;

/// Owns the store for the lifetime of the session.
pub struct Controller<S: StudentStore> {
    store: S,
}

impl<S: StudentStore> Controller<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Validate the four raw fields, compute the average, and persist the
    /// record. Checks run in order: presence, numeric parse, positive id.
    pub fn register(
        &mut self,
        raw_enrollment_id: &str,
        raw_name: &str,
        raw_score1: &str,
        raw_score2: &str,
    ) -> Result<Student, RegistryError> {
        let student = parse_student(raw_enrollment_id, raw_name, raw_score1, raw_score2)?;

        match self.store.insert_student(&student) {
            Ok(()) => {
                log::info!("registered student {}", student.enrollment_id);
                Ok(student)
            }
            Err(err) => {
                log::warn!("could not register student {}: {err}", student.enrollment_id);
                Err(err.into())
            }
        }
    }

    /// Enrollment ids used to fill the selection list.
    pub fn list_for_selection(&self) -> Result<Vec<i64>, RegistryError> {
        Ok(self.store.list_enrollment_ids()?)
    }

    pub fn lookup(&self, selected_id: i64) -> Result<Student, RegistryError> {
        self.store.get_student(selected_id).map_err(|err| {
            log::warn!("lookup of student {selected_id} failed: {err}");
            err.into()
        })
    }

    /// Release the store. Safe to call more than once.
    pub fn close(&mut self) -> Result<(), StoreError> {
        self.store.close()
    }

    pub fn store(&self) -> &S {
        &self.store
    }
}

/// Turn raw text into a record ready for insertion.
fn parse_student(
    raw_enrollment_id: &str,
    raw_name: &str,
    raw_score1: &str,
    raw_score2: &str,
) -> Result<Student, ValidationError> {
    if [raw_enrollment_id, raw_name, raw_score1, raw_score2]
        .iter()
        .any(|field| field.is_empty())
    {
        return Err(ValidationError::EmptyFields);
    }

    let enrollment_id = raw_enrollment_id
        .trim()
        .parse::<i64>()
        .map_err(|_| ValidationError::NonNumeric)?;
    let score1 = parse_score(raw_score1)?;
    let score2 = parse_score(raw_score2)?;

    if enrollment_id <= 0 {
        return Err(ValidationError::NonPositiveId);
    }

    // inf and -inf average to NaN
    let average = average(score1, score2);
    if average.is_nan() {
        return Err(ValidationError::NonNumeric);
    }

    Ok(Student {
        enrollment_id,
        name: raw_name.to_string(),
        score1,
        score2,
        average,
    })
}

/// Surrounding whitespace is ignored. NaN is refused because SQLite stores it
/// as NULL; infinities round-trip as REAL and are accepted.
fn parse_score(raw: &str) -> Result<f64, ValidationError> {
    match raw.trim().parse::<f64>() {
        Ok(score) if !score.is_nan() => Ok(score),
        _ => Err(ValidationError::NonNumeric),
    }
}

/// Mean of two scores rounded to two decimal places, ties to even on the
/// exact binary value. Precision formatting rounds the exact decimal
/// expansion, so `8.125` becomes `8.12` while `2.675` (stored as
/// `2.67499...`) becomes `2.67`.
pub fn average(score1: f64, score2: f64) -> f64 {
    let mean = (score1 + score2) / 2.0;
    if !mean.is_finite() {
        return mean;
    }
    format!("{mean:.2}").parse().unwrap_or(mean)
}
