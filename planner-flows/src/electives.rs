//! Elective recommendation from a free-text student profile.

use std::collections::HashMap;

use planner_primitives::{Checker, Violations};
use planner_prompts::PromptTemplate;
use serde::Deserialize;
use serde_json::{Value, json};

use crate::flow::{Flow, FlowInput, FlowOutput};

/// Minimum characters each profile field must carry to be worth prompting on.
pub const MIN_DETAIL_CHARS: usize = 10;

const TEMPLATE: &str = "\
You are a university academic advisor. A student has provided their academic history, \
interests, and career goals. Based on this information, recommend a list of electives that \
would be a good fit for them, and explain your reasoning.

Academic History: {{academicHistory}}
Interests: {{interests}}
Career Goals: {{careerGoals}}

Format your response as a list of electives followed by a paragraph explaining the reasoning \
behind your suggestions.";

/// Request behind the "Recommend Electives" form.
#[derive(Clone, Debug, PartialEq)]
pub struct ElectiveRequest {
    academic_history: String,
    interests: String,
    career_goals: String,
}

impl ElectiveRequest {
    /// Creates a request from the three profile fields.
    #[must_use]
    pub fn new(
        academic_history: impl Into<String>,
        interests: impl Into<String>,
        career_goals: impl Into<String>,
    ) -> Self {
        Self {
            academic_history: academic_history.into(),
            interests: interests.into(),
            career_goals: career_goals.into(),
        }
    }
}

impl FlowInput for ElectiveRequest {
    fn validate(&self) -> Result<(), Violations> {
        let mut checker = Checker::new();
        checker
            .min_length("academicHistory", &self.academic_history, MIN_DETAIL_CHARS)
            .min_length("interests", &self.interests, MIN_DETAIL_CHARS)
            .min_length("careerGoals", &self.career_goals, MIN_DETAIL_CHARS);
        checker.finish()
    }

    fn variables(&self) -> HashMap<String, String> {
        HashMap::from([
            ("academicHistory".to_owned(), self.academic_history.clone()),
            ("interests".to_owned(), self.interests.clone()),
            ("careerGoals".to_owned(), self.career_goals.clone()),
        ])
    }
}

/// Typed reply of the elective-recommendation flow.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ElectiveAdvice {
    /// Recommended electives, in suggested order.
    pub elective_recommendations: Vec<String>,
    /// The reasoning behind the recommendations.
    pub reasoning: String,
}

impl FlowOutput for ElectiveAdvice {
    fn response_schema() -> Value {
        json!({
            "type": "OBJECT",
            "properties": {
                "electiveRecommendations": {
                    "type": "ARRAY",
                    "items": {"type": "STRING"},
                },
                "reasoning": {"type": "STRING"},
            },
            "required": ["electiveRecommendations", "reasoning"],
        })
    }
}

/// Builds the elective-recommendation flow.
#[must_use]
pub fn flow() -> Flow<ElectiveRequest, ElectiveAdvice> {
    Flow::new(
        "recommend-electives-based-on-profile",
        PromptTemplate::new(TEMPLATE)
            .with_required("academicHistory")
            .with_required("interests")
            .with_required("careerGoals"),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn detailed_request() -> ElectiveRequest {
        ElectiveRequest::new(
            "Completed the data-science core with strong grades in statistics.",
            "Enjoys hackathons, building side projects, and gaming.",
            "Wants to work as a machine learning engineer.",
        )
    }

    #[test]
    fn accepts_detailed_profile() {
        assert!(detailed_request().validate().is_ok());
    }

    #[test]
    fn rejects_terse_fields_individually() {
        let request = ElectiveRequest::new("ok", "Enjoys hackathons and gaming.", "ML");
        let violations = request.validate().expect_err("two short fields");
        assert_eq!(violations.len(), 2);
        assert!(violations.names_field("academicHistory"));
        assert!(violations.names_field("careerGoals"));
        assert!(!violations.names_field("interests"));
    }

    #[test]
    fn prompt_embeds_profile_fields() {
        let prompt = flow().render(&detailed_request()).expect("valid request");
        assert!(prompt.contains("Academic History: Completed the data-science core"));
        assert!(prompt.contains("Interests: Enjoys hackathons"));
        assert!(prompt.contains("Career Goals: Wants to work as a machine learning engineer."));
    }

    #[test]
    fn advice_decodes_from_model_shape() {
        let advice: ElectiveAdvice = serde_json::from_value(json!({
            "electiveRecommendations": ["Visualización de datos", "Comercio digital"],
            "reasoning": "Both build on the student's data-science background.",
        }))
        .expect("decodes");
        assert_eq!(advice.elective_recommendations.len(), 2);
    }

    #[test]
    fn advice_requires_reasoning_field() {
        let result = serde_json::from_value::<ElectiveAdvice>(json!({
            "electiveRecommendations": ["Visualización de datos"],
        }));
        assert!(result.is_err());
    }
}
