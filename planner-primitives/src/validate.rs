//! Declarative field-constraint validation for planner requests.
//!
//! Each flow declares its constraints against a [`Checker`], which collects
//! every violation instead of stopping at the first so callers can report
//! per-field feedback in one pass. Validation is pure: no I/O, no state
//! beyond the collector itself.

use std::fmt::{self, Display, Formatter};

use thiserror::Error;

/// A single declared constraint that a field can violate.
#[derive(Clone, Debug, PartialEq)]
pub enum Constraint {
    /// The field must be present and non-empty.
    Required,
    /// The field must contain at least `min` characters.
    MinLength {
        /// Minimum number of characters.
        min: usize,
        /// Number of characters actually supplied.
        actual: usize,
    },
    /// The list field must contain at least one element.
    NonEmptyList,
    /// The numeric field must fall inside an inclusive range.
    OutOfRange {
        /// Inclusive lower bound.
        min: f64,
        /// Inclusive upper bound.
        max: f64,
        /// Value actually supplied.
        actual: f64,
    },
    /// The numeric field must be strictly greater than zero.
    Positive {
        /// Value actually supplied.
        actual: f64,
    },
}

impl Display for Constraint {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Self::Required => f.write_str("value is required"),
            Self::MinLength { min, actual } => {
                write!(f, "expected at least {min} characters, got {actual}")
            }
            Self::NonEmptyList => f.write_str("list must contain at least one entry"),
            Self::OutOfRange { min, max, actual } => {
                write!(f, "value {actual} outside valid range [{min}, {max}]")
            }
            Self::Positive { actual } => write!(f, "value {actual} must be greater than zero"),
        }
    }
}

/// A field name paired with the constraint it violated.
#[derive(Clone, Debug, PartialEq, Error)]
#[error("{field}: {constraint}")]
pub struct Violation {
    /// Name of the offending request field.
    pub field: &'static str,
    /// The constraint that failed.
    pub constraint: Constraint,
}

/// Every violation found in one validation pass.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Violations(Vec<Violation>);

impl std::error::Error for Violations {}

impl Violations {
    /// Returns the individual violations.
    #[must_use]
    pub fn as_slice(&self) -> &[Violation] {
        &self.0
    }

    /// Returns the number of violations recorded.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns `true` when no violation was recorded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Returns `true` when any violation names the supplied field.
    #[must_use]
    pub fn names_field(&self, field: &str) -> bool {
        self.0.iter().any(|violation| violation.field == field)
    }
}

impl Display for Violations {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        for (index, violation) in self.0.iter().enumerate() {
            if index > 0 {
                f.write_str("; ")?;
            }
            Display::fmt(violation, f)?;
        }
        Ok(())
    }
}

impl IntoIterator for Violations {
    type Item = Violation;
    type IntoIter = std::vec::IntoIter<Violation>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

/// Collects constraint checks for one request.
#[derive(Debug, Default)]
pub struct Checker {
    violations: Vec<Violation>,
}

impl Checker {
    /// Creates an empty collector.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Requires a non-empty text field (whitespace alone does not count).
    pub fn require_text(&mut self, field: &'static str, value: &str) -> &mut Self {
        if value.trim().is_empty() {
            self.push(field, Constraint::Required);
        }
        self
    }

    /// Requires a text field of at least `min` characters.
    pub fn min_length(&mut self, field: &'static str, value: &str, min: usize) -> &mut Self {
        let actual = value.trim().chars().count();
        if actual < min {
            self.push(field, Constraint::MinLength { min, actual });
        }
        self
    }

    /// Requires a list field with at least one element.
    pub fn non_empty_list(&mut self, field: &'static str, values: &[String]) -> &mut Self {
        if values.is_empty() {
            self.push(field, Constraint::NonEmptyList);
        }
        self
    }

    /// Requires a numeric field inside an inclusive range.
    pub fn bounded(&mut self, field: &'static str, value: f64, min: f64, max: f64) -> &mut Self {
        if value < min || value > max || value.is_nan() {
            self.push(
                field,
                Constraint::OutOfRange {
                    min,
                    max,
                    actual: value,
                },
            );
        }
        self
    }

    /// Requires a numeric field strictly greater than zero.
    pub fn positive(&mut self, field: &'static str, value: f64) -> &mut Self {
        if value <= 0.0 || value.is_nan() {
            self.push(field, Constraint::Positive { actual: value });
        }
        self
    }

    /// Finishes the pass, returning every violation found.
    ///
    /// # Errors
    ///
    /// Returns [`Violations`] when at least one check failed.
    pub fn finish(self) -> Result<(), Violations> {
        if self.violations.is_empty() {
            Ok(())
        } else {
            Err(Violations(self.violations))
        }
    }

    fn push(&mut self, field: &'static str, constraint: Constraint) {
        self.violations.push(Violation { field, constraint });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clean_pass_yields_ok() {
        let mut checker = Checker::new();
        checker
            .require_text("timeline", "Fall 2025")
            .min_length("interests", "robotics and data visualisation", 10)
            .bounded("gpa", 3.7, 0.0, 4.0);
        assert!(checker.finish().is_ok());
    }

    #[test]
    fn collects_every_violation() {
        let mut checker = Checker::new();
        checker
            .require_text("timeline", "   ")
            .non_empty_list("completedCourses", &[])
            .bounded("gpa", 4.5, 0.0, 4.0);

        let violations = checker.finish().expect_err("three violations");
        assert_eq!(violations.len(), 3);
        assert!(violations.names_field("timeline"));
        assert!(violations.names_field("completedCourses"));
        assert!(violations.names_field("gpa"));
    }

    #[test]
    fn min_length_counts_characters_not_bytes() {
        let mut checker = Checker::new();
        checker.min_length("interests", "cálculo y más", 10);
        assert!(checker.finish().is_ok());
    }

    #[test]
    fn positive_rejects_zero() {
        let mut checker = Checker::new();
        checker.positive("totalCreditsRequired", 0.0);
        let violations = checker.finish().expect_err("zero is not positive");
        assert!(matches!(
            violations.as_slice()[0].constraint,
            Constraint::Positive { .. }
        ));
    }

    #[test]
    fn nan_is_out_of_range() {
        let mut checker = Checker::new();
        checker.bounded("gpa", f64::NAN, 0.0, 4.0);
        assert!(checker.finish().is_err());
    }

    #[test]
    fn violation_display_names_field_and_reason() {
        let mut checker = Checker::new();
        checker.bounded("gpa", 4.5, 0.0, 4.0);
        let violations = checker.finish().expect_err("out of range");
        assert_eq!(
            violations.to_string(),
            "gpa: value 4.5 outside valid range [0, 4]"
        );
    }
}
