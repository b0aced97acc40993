//! Domain model that mirrors the `Aluno` table and gets passed between the
//! store, the controller, and the TUI. The struct stays a plain data holder so
//! the persistence and presentation layers can agree on one shape.

use std::fmt;

#[derive(Debug, Clone, PartialEq)]
/// A registered student. Records are immutable once written: there is no
/// update path, so every field here reflects exactly what was inserted.
pub struct Student {
    /// Positive, unique enrollment number. Doubles as the primary key.
    pub enrollment_id: i64,
    /// Name as typed by the user (no trimming applied).
    pub name: String,
    /// First assessment score.
    pub score1: f64,
    /// Second assessment score.
    pub score2: f64,
    /// Mean of both scores rounded to two decimals when the record was
    /// created. The store persists it verbatim and never recomputes it.
    pub average: f64,
}

impl Student {
    /// Lines shown by the student view, in column order.
    pub fn display_lines(&self) -> Vec<String> {
        vec![
            format!("Enrollment: {}", self.enrollment_id),
            format!("Name: {}", self.name),
            format!("Score 1: {}", format_score(self.score1)),
            format!("Score 2: {}", format_score(self.score2)),
            format!("Average: {}", format_score(self.average)),
        ]
    }
}

impl fmt::Display for Student {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} - {}", self.enrollment_id, self.name)
    }
}

/// Render a score with at least one decimal place so whole numbers read as
/// `8.0` rather than `8`.
pub fn format_score(value: f64) -> String {
    format!("{value:?}")
}
