//! Graduation-time prediction from progress and historical data.

use std::collections::HashMap;
use std::fmt::{self, Display, Formatter};

use planner_primitives::{Checker, Violations};
use planner_prompts::PromptTemplate;
use serde::Deserialize;
use serde_json::{Value, json};

use crate::flow::{Flow, FlowInput, FlowOutput};

/// Inclusive GPA bounds on the 4.0 scale.
pub const GPA_RANGE: (f32, f32) = (0.0, 4.0);

const TEMPLATE: &str = "\
You are a university graduation advisor with extensive experience in predicting graduation \
times for students.

Based on the student's current progress, planned courses, GPA, and historical graduation \
data, predict the student's graduation time. Also, determine a confidence level for your \
prediction and explain your reasoning.

Completed Credits: {{completedCredits}}
Total Credits Required: {{totalCreditsRequired}}
Planned Courses: {{plannedCourses}}
GPA: {{averageGpa}}
Historical Graduation Data: {{historicalGraduationData}}

Provide the predicted graduation time, confidence level, and reasoning in the output fields.";

/// Request behind the "Predict Graduation" form.
#[derive(Clone, Debug, PartialEq)]
pub struct PredictionRequest {
    completed_credits: u32,
    total_credits_required: u32,
    planned_courses: String,
    gpa: f32,
    historical_graduation_data: String,
}

impl PredictionRequest {
    /// Creates a request from the form fields.
    ///
    /// `planned_courses` is a free-text course list including credit values,
    /// e.g. `[CS101 (3 credits), MA201 (4 credits)]`; `historical_graduation_data`
    /// summarises graduation rates and times for the student's major.
    #[must_use]
    pub fn new(
        completed_credits: u32,
        total_credits_required: u32,
        planned_courses: impl Into<String>,
        gpa: f32,
        historical_graduation_data: impl Into<String>,
    ) -> Self {
        Self {
            completed_credits,
            total_credits_required,
            planned_courses: planned_courses.into(),
            gpa,
            historical_graduation_data: historical_graduation_data.into(),
        }
    }
}

impl FlowInput for PredictionRequest {
    fn validate(&self) -> Result<(), Violations> {
        let mut checker = Checker::new();
        checker
            .positive("totalCreditsRequired", f64::from(self.total_credits_required))
            .require_text("plannedCourses", &self.planned_courses)
            .bounded(
                "averageGpa",
                f64::from(self.gpa),
                f64::from(GPA_RANGE.0),
                f64::from(GPA_RANGE.1),
            )
            .require_text("historicalGraduationData", &self.historical_graduation_data);
        checker.finish()
    }

    fn variables(&self) -> HashMap<String, String> {
        HashMap::from([
            ("completedCredits".to_owned(), self.completed_credits.to_string()),
            (
                "totalCreditsRequired".to_owned(),
                self.total_credits_required.to_string(),
            ),
            ("plannedCourses".to_owned(), self.planned_courses.clone()),
            ("averageGpa".to_owned(), self.gpa.to_string()),
            (
                "historicalGraduationData".to_owned(),
                self.historical_graduation_data.clone(),
            ),
        ])
    }
}

/// Qualitative confidence the advisor attaches to a prediction.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize)]
pub enum ConfidenceLevel {
    /// The prediction rests on solid progress data.
    High,
    /// The prediction involves notable assumptions.
    Medium,
    /// The prediction is mostly guesswork.
    Low,
}

impl Display for ConfidenceLevel {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::High => "High",
            Self::Medium => "Medium",
            Self::Low => "Low",
        })
    }
}

/// Typed reply of the prediction flow.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GraduationForecast {
    /// The predicted graduation time, e.g. `Spring 2025`.
    pub predicted_graduation_time: String,
    /// Confidence label for the prediction.
    pub confidence_level: ConfidenceLevel,
    /// Factors influencing the prediction, including assumptions made.
    pub reasoning: String,
}

impl FlowOutput for GraduationForecast {
    fn response_schema() -> Value {
        json!({
            "type": "OBJECT",
            "properties": {
                "predictedGraduationTime": {"type": "STRING"},
                "confidenceLevel": {"type": "STRING", "enum": ["High", "Medium", "Low"]},
                "reasoning": {"type": "STRING"},
            },
            "required": ["predictedGraduationTime", "confidenceLevel", "reasoning"],
        })
    }
}

/// Builds the graduation-prediction flow.
#[must_use]
pub fn flow() -> Flow<PredictionRequest, GraduationForecast> {
    Flow::new(
        "predict-graduation-time",
        PromptTemplate::new(TEMPLATE)
            .with_required("completedCredits")
            .with_required("totalCreditsRequired")
            .with_required("plannedCourses")
            .with_required("averageGpa")
            .with_required("historicalGraduationData"),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use planner_primitives::Constraint;

    fn request_with_gpa(gpa: f32) -> PredictionRequest {
        PredictionRequest::new(
            114,
            143,
            "[TTCT0021 (4 credits), TTCT0017 (4 credits)]",
            gpa,
            "Students in this major graduate in 4.5 years on average.",
        )
    }

    #[test]
    fn accepts_in_range_request() {
        assert!(request_with_gpa(3.7).validate().is_ok());
    }

    #[test]
    fn rejects_gpa_above_scale() {
        let violations = request_with_gpa(4.5).validate().expect_err("gpa too high");
        assert!(violations.names_field("averageGpa"));
        assert!(matches!(
            violations.as_slice()[0].constraint,
            Constraint::OutOfRange { .. }
        ));
    }

    #[test]
    fn rejects_zero_total_credits() {
        let request = PredictionRequest::new(0, 0, "[TTCT0021 (4 credits)]", 3.0, "history");
        let violations = request.validate().expect_err("zero total");
        assert!(violations.names_field("totalCreditsRequired"));
    }

    #[test]
    fn prompt_embeds_numeric_fields() {
        let prompt = flow().render(&request_with_gpa(3.7)).expect("valid request");
        assert!(prompt.contains("Completed Credits: 114"));
        assert!(prompt.contains("Total Credits Required: 143"));
        assert!(prompt.contains("GPA: 3.7"));
    }

    #[test]
    fn forecast_decodes_from_model_shape() {
        let forecast: GraduationForecast = serde_json::from_value(json!({
            "predictedGraduationTime": "Spring 2026",
            "confidenceLevel": "High",
            "reasoning": "Only 29 credits remain and the GPA trend is stable.",
        }))
        .expect("decodes");
        assert_eq!(forecast.confidence_level, ConfidenceLevel::High);
    }

    #[test]
    fn forecast_rejects_unknown_confidence_label() {
        let result = serde_json::from_value::<GraduationForecast>(json!({
            "predictedGraduationTime": "Spring 2026",
            "confidenceLevel": "Certain",
            "reasoning": "n/a",
        }));
        assert!(result.is_err());
    }
}
