//! Sample dashboard data for the data-science programme.
//!
//! The planner has no persistence layer, so the demo dashboard is fed from
//! this fixture. Callers receive it as an explicit argument; nothing in the
//! workspace reads it implicitly.

use uuid::Uuid;

use crate::catalog::{CompletedCourse, Course, StudentRecord};
use crate::ids::StudentId;

/// Everything the dashboard needs to render one student's view.
#[derive(Clone, Debug, PartialEq)]
pub struct DashboardSeed {
    /// The profile card subject.
    pub student: StudentRecord,
    /// Courses already completed, in programme order.
    pub completed: Vec<CompletedCourse>,
    /// Courses still pending toward graduation.
    pub pending: Vec<Course>,
}

impl DashboardSeed {
    /// Course codes of everything the student has completed.
    #[must_use]
    pub fn completed_codes(&self) -> Vec<String> {
        self.completed
            .iter()
            .map(|entry| entry.course.code.clone())
            .collect()
    }

    /// Course codes of everything still pending.
    #[must_use]
    pub fn pending_codes(&self) -> Vec<String> {
        self.pending.iter().map(|course| course.code.clone()).collect()
    }

    /// Builds the bundled sample student for the demo dashboard.
    #[must_use]
    pub fn sample() -> Self {
        let student = StudentRecord {
            id: StudentId::from_uuid(Uuid::from_u128(1)),
            email: "alex.doe@lead.ac.cr".into(),
            name: "Alex Doe".into(),
            major: "Ingeniería en Ciencia de Datos".into(),
            completed_credits: 114,
            total_credits: 143,
            gpa: 3.7,
            current_term: "Mayo 2025".into(),
        };

        let completed = [
            ("TCNT0001", "Destrezas para la comunicación", 3),
            ("TCNT0002", "Introducción a la administración de negocios", 3),
            ("TCNT0004", "Metodologías de investigación", 4),
            ("TTCT0001", "Introducción a la programación", 3),
            ("TTCT0014", "Introducción a la ciencia de datos", 3),
            ("TCNT0003", "Filosofía clásica y contemporánea", 3),
            ("TTCT0023", "Matemática para Ciencia de Datos", 4),
            ("TCNT0005", "Análisis de la realidad nacional e internacional", 3),
            ("TCNT0009", "Técnicas de negociación", 3),
            ("TTCT0003", "Cálculo para Ciencia de Datos", 4),
            ("TCNT0008", "Ética Profesional", 3),
            ("TCNT0006", "Innovación y Creatividad", 3),
            ("TCNT0007", "Liderazgo y Cambio", 3),
            ("TTCT0005", "Álgebra lineal y ecuaciones diferenciales", 4),
            ("TTCT0004", "Programación", 3),
            ("TTCT0006", "Administración de proyectos", 3),
            ("BBCC0001", "Machine Learning Operations", 3),
            ("TCNT0011", "Probabilidad y Estadística I", 4),
            ("TTCT0007", "Estructura de datos", 4),
            ("TTCT0009", "Bases de datos", 4),
            ("BBCD0001", "Optativa I Ciencia de Datos", 3),
            ("TCNT0012", "Minería de datos I", 4),
            ("TTCT0010", "Modelado matemático", 3),
            ("TTCT0011", "Paradigmas de programación", 4),
            ("TTCT0012", "Programación Web", 3),
            ("TCNT0010", "Principios de Economía", 3),
            ("TTCT0013", "Estadística multivariada", 3),
            ("TTCT0015", "Sistemas operativos", 4),
            ("TTCT0016", "Administración de datos", 3),
            ("BBCD0002", "Minería de datos avanzada", 4),
            ("TTCT0019", "Redes de computadoras", 4),
            ("TTCT0018", "Datos masivos (Big Data)", 4),
            ("BBCC0007", "Economía para ingenieros", 3),
            ("TTCT0020", "Interacción persona-máquina", 3),
        ]
        .into_iter()
        .map(|(code, name, credits)| CompletedCourse::new(course(code, name, credits), "A"))
        .collect();

        let pending = vec![
            course("TTCT0021", "Seguridad de sistemas digitales", 4),
            course("TTCT0017", "Computación paralela y distribuida", 4),
            course("TTCT0022", "Visualización de datos", 4)
                .with_prerequisites(vec!["TTCT0014".into()]),
            course("BBCC0004", "Comercio digital", 3),
            course("TCNT0015", "Práctica Profesional Supervisada", 14),
        ];

        Self {
            student,
            completed,
            pending,
        }
    }
}

fn course(code: &str, name: &str, credits: u8) -> Course {
    Course {
        code: code.into(),
        name: name.into(),
        credits,
        prerequisites: Vec::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sample_student_matches_transcript() {
        let seed = DashboardSeed::sample();
        assert_eq!(seed.completed.len(), 34);
        assert_eq!(seed.pending.len(), 5);
        assert_eq!(seed.student.remaining_credits(), 29);
        assert!(seed.completed_codes().contains(&"TCNT0001".to_owned()));
        assert!(seed.pending_codes().contains(&"TTCT0021".to_owned()));
    }

    #[test]
    fn every_course_is_well_formed() {
        let seed = DashboardSeed::sample();
        let all = seed
            .completed
            .iter()
            .map(|entry| &entry.course)
            .chain(seed.pending.iter());
        for course in all {
            assert!(!course.code.trim().is_empty(), "blank code for {}", course.name);
            assert!(course.credits >= 1, "{} carries no credits", course.code);
        }
    }

    #[test]
    fn pending_prerequisites_point_at_completed_courses() {
        let seed = DashboardSeed::sample();
        let completed = seed.completed_codes();
        for course in &seed.pending {
            for prerequisite in &course.prerequisites {
                assert!(completed.contains(prerequisite), "unknown {prerequisite}");
            }
        }
    }
}
