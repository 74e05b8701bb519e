//! Core shared types for the GradPath planner.

#![warn(missing_docs, clippy::pedantic)]

mod catalog;
mod ids;
mod seed;
mod validate;

/// Course and student record types shared by the planner flows.
pub use catalog::{CompletedCourse, Course, StudentRecord};
/// Unique identifier for a student record.
pub use ids::StudentId;
/// Seed fixture injected into whatever renders the dashboard.
pub use seed::DashboardSeed;
/// Field-constraint validation machinery used by request builders.
pub use validate::{Checker, Constraint, Violation, Violations};
