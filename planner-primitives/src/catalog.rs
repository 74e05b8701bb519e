//! Course catalog and student record types.
//!
//! These are plain value objects: the planner keeps no store, so whoever
//! renders the dashboard owns them and passes them down explicitly.

use serde::{Deserialize, Serialize};

use crate::ids::StudentId;

/// A course in the degree catalog.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Course {
    /// Catalog code, e.g. `TTCT0021`.
    pub code: String,
    /// Full course name.
    pub name: String,
    /// Credit value of the course.
    pub credits: u8,
    /// Codes of courses that must be completed first.
    #[serde(default)]
    pub prerequisites: Vec<String>,
}

impl Course {
    /// Declares prerequisite course codes.
    #[must_use]
    pub fn with_prerequisites(mut self, prerequisites: Vec<String>) -> Self {
        self.prerequisites = prerequisites;
        self
    }
}

/// A catalog course together with the grade the student earned.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CompletedCourse {
    /// The underlying catalog course.
    #[serde(flatten)]
    pub course: Course,
    /// Letter grade earned.
    pub grade: String,
}

impl CompletedCourse {
    /// Pairs a course with the grade earned in it.
    #[must_use]
    pub fn new(course: Course, grade: impl Into<String>) -> Self {
        Self {
            course,
            grade: grade.into(),
        }
    }
}

/// Profile card data for one student.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct StudentRecord {
    /// Stable identifier for the record.
    pub id: StudentId,
    /// Contact email address.
    pub email: String,
    /// Display name.
    pub name: String,
    /// Declared major.
    pub major: String,
    /// Credits completed so far.
    pub completed_credits: u32,
    /// Credits the degree requires in total.
    pub total_credits: u32,
    /// Current grade point average on a 4.0 scale.
    pub gpa: f32,
    /// Term the student is currently enrolled in.
    pub current_term: String,
}

impl StudentRecord {
    /// Credits still outstanding toward the degree.
    #[must_use]
    pub fn remaining_credits(&self) -> u32 {
        self.total_credits.saturating_sub(self.completed_credits)
    }

    /// Completion ratio in the `[0, 1]` range.
    #[must_use]
    pub fn progress(&self) -> f32 {
        if self.total_credits == 0 {
            return 0.0;
        }
        #[allow(clippy::cast_precision_loss)]
        let ratio = self.completed_credits as f32 / self.total_credits as f32;
        ratio.min(1.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tracks_remaining_credits() {
        let record = StudentRecord {
            id: StudentId::random(),
            email: "alex.doe@lead.ac.cr".into(),
            name: "Alex Doe".into(),
            major: "Ingeniería en Ciencia de Datos".into(),
            completed_credits: 114,
            total_credits: 143,
            gpa: 3.7,
            current_term: "Mayo 2025".into(),
        };
        assert_eq!(record.remaining_credits(), 29);
        assert!(record.progress() > 0.79 && record.progress() < 0.80);
    }
}
