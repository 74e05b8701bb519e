//! Optimal graduation path generation.

use std::collections::HashMap;

use planner_primitives::{Checker, Violations};
use planner_prompts::{PromptTemplate, display_list};
use serde::Deserialize;
use serde_json::{Value, json};

use crate::flow::{Flow, FlowInput, FlowOutput};

const TEMPLATE: &str = "\
You are a university graduation planning assistant. You will analyze a student's completed \
courses, remaining requirements, and desired graduation timeline to generate an optimal path \
for completing their degree.

Completed Courses: {{completedCourses}}
Remaining Requirements: {{remainingRequirements}}
Desired Graduation Timeline: {{desiredGraduationTimeline}}
Student Profile: {{studentProfile}}

Based on this information, generate an optimal graduation path, recommend electives, and \
estimate the graduation time.
The optimal path should be a list of courses ordered by semester. For each course, provide the \
course code, full course name, and a brief comment on the benefit of taking this course.
The elective recommendations should also include the course code, full name, and benefit.
The estimated graduation time should be a string.
Make sure to consider course prerequisites when generating the optimal path.
The optimal path should be as efficient as possible, allowing the student to graduate on time.";

/// Request behind the "Generate Optimal Path" form.
#[derive(Clone, Debug, PartialEq)]
pub struct PathRequest {
    completed_courses: Vec<String>,
    remaining_requirements: Vec<String>,
    desired_timeline: String,
    student_profile: Option<String>,
}

impl PathRequest {
    /// Creates a request from the three required form fields.
    #[must_use]
    pub fn new(
        completed_courses: Vec<String>,
        remaining_requirements: Vec<String>,
        desired_timeline: impl Into<String>,
    ) -> Self {
        Self {
            completed_courses,
            remaining_requirements,
            desired_timeline: desired_timeline.into(),
            student_profile: None,
        }
    }

    /// Attaches the optional free-text student profile.
    #[must_use]
    pub fn with_student_profile(mut self, profile: impl Into<String>) -> Self {
        self.student_profile = Some(profile.into());
        self
    }
}

impl FlowInput for PathRequest {
    fn validate(&self) -> Result<(), Violations> {
        let mut checker = Checker::new();
        checker
            .non_empty_list("completedCourses", &self.completed_courses)
            .non_empty_list("remainingRequirements", &self.remaining_requirements)
            .require_text("desiredGraduationTimeline", &self.desired_timeline);
        checker.finish()
    }

    fn variables(&self) -> HashMap<String, String> {
        let mut vars = HashMap::new();
        vars.insert(
            "completedCourses".to_owned(),
            display_list(&self.completed_courses),
        );
        vars.insert(
            "remainingRequirements".to_owned(),
            display_list(&self.remaining_requirements),
        );
        vars.insert(
            "desiredGraduationTimeline".to_owned(),
            self.desired_timeline.clone(),
        );
        if let Some(profile) = &self.student_profile {
            vars.insert("studentProfile".to_owned(), profile.clone());
        }
        vars
    }
}

/// One course in a recommended plan.
#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct CourseRecommendation {
    /// The course code, e.g. `CS101`.
    pub code: String,
    /// The full name of the course.
    pub name: String,
    /// A brief comment on the benefit of taking this course.
    pub benefit: String,
}

/// Typed reply of the path-generation flow.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PathPlan {
    /// Courses forming the optimal path, ordered by semester.
    pub optimal_path: Vec<CourseRecommendation>,
    /// Recommended electives based on the student profile.
    pub elective_recommendations: Vec<CourseRecommendation>,
    /// Estimated graduation time given the path and desired timeline.
    pub estimated_graduation_time: String,
}

impl FlowOutput for PathPlan {
    fn response_schema() -> Value {
        let course = json!({
            "type": "OBJECT",
            "properties": {
                "code": {"type": "STRING"},
                "name": {"type": "STRING"},
                "benefit": {"type": "STRING"},
            },
            "required": ["code", "name", "benefit"],
        });

        json!({
            "type": "OBJECT",
            "properties": {
                "optimalPath": {"type": "ARRAY", "items": course},
                "electiveRecommendations": {"type": "ARRAY", "items": course},
                "estimatedGraduationTime": {"type": "STRING"},
            },
            "required": ["optimalPath", "electiveRecommendations", "estimatedGraduationTime"],
        })
    }
}

/// Builds the path-generation flow.
#[must_use]
pub fn flow() -> Flow<PathRequest, PathPlan> {
    Flow::new(
        "generate-optimal-graduation-paths",
        PromptTemplate::new(TEMPLATE)
            .with_required("completedCourses")
            .with_required("remainingRequirements")
            .with_required("desiredGraduationTimeline"),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::FlowError;

    fn codes(values: &[&str]) -> Vec<String> {
        values.iter().map(|code| (*code).to_owned()).collect()
    }

    #[test]
    fn accepts_minimal_request() {
        let request = PathRequest::new(codes(&["TCNT0001"]), codes(&["TTCT0021"]), "Fall 2025");
        assert!(request.validate().is_ok());
    }

    #[test]
    fn rejects_empty_course_lists() {
        let request = PathRequest::new(Vec::new(), Vec::new(), "Fall 2025");
        let violations = request.validate().expect_err("two empty lists");
        assert!(violations.names_field("completedCourses"));
        assert!(violations.names_field("remainingRequirements"));
    }

    #[test]
    fn rejects_blank_timeline() {
        let request = PathRequest::new(codes(&["TCNT0001"]), codes(&["TTCT0021"]), "  ");
        let violations = request.validate().expect_err("blank timeline");
        assert!(violations.names_field("desiredGraduationTimeline"));
    }

    #[test]
    fn prompt_embeds_all_fields() {
        let request = PathRequest::new(
            codes(&["TCNT0001", "TTCT0001"]),
            codes(&["TTCT0021"]),
            "Fall 2025",
        )
        .with_student_profile("Interested in AI and machine learning.");

        let prompt = flow().render(&request).expect("valid request");
        assert!(prompt.contains("Completed Courses: TCNT0001, TTCT0001"));
        assert!(prompt.contains("Remaining Requirements: TTCT0021"));
        assert!(prompt.contains("Desired Graduation Timeline: Fall 2025"));
        assert!(prompt.contains("Student Profile: Interested in AI and machine learning."));
    }

    #[test]
    fn omitted_profile_renders_empty() {
        let request = PathRequest::new(codes(&["TCNT0001"]), codes(&["TTCT0021"]), "Fall 2025");
        let prompt = flow().render(&request).expect("valid request");
        assert!(prompt.contains("Student Profile: \n"));
    }

    #[test]
    fn render_is_deterministic() {
        let request = PathRequest::new(codes(&["TCNT0001"]), codes(&["TTCT0021"]), "Fall 2025");
        let flow = flow();
        assert_eq!(
            flow.render(&request).unwrap(),
            flow.render(&request).unwrap()
        );
    }

    #[test]
    fn rejection_carries_flow_name() {
        let request = PathRequest::new(Vec::new(), codes(&["TTCT0021"]), "Fall 2025");
        let err = flow().render(&request).expect_err("rejected");
        match err {
            FlowError::Rejected { flow, violations } => {
                assert_eq!(flow, "generate-optimal-graduation-paths");
                assert_eq!(violations.len(), 1);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn schema_requires_every_output_field() {
        let schema = PathPlan::response_schema();
        let required = schema["required"].as_array().expect("required list");
        assert_eq!(required.len(), 3);
    }

    #[test]
    fn plan_decodes_from_model_shape() {
        let plan: PathPlan = serde_json::from_value(serde_json::json!({
            "optimalPath": [
                {"code": "TTCT0021", "name": "Seguridad de sistemas digitales",
                 "benefit": "Unlocks the security track."}
            ],
            "electiveRecommendations": [],
            "estimatedGraduationTime": "Fall 2025",
        }))
        .expect("decodes");
        assert_eq!(plan.optimal_path[0].code, "TTCT0021");
        assert_eq!(plan.estimated_graduation_time, "Fall 2025");
    }
}
