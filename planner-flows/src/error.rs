//! Flow-level error taxonomy.

use planner_adapters::traits::GeneratorError;
use planner_primitives::Violations;
use planner_prompts::PromptError;
use thiserror::Error;

/// Result alias for flow operations.
pub type FlowResult<T> = Result<T, FlowError>;

/// Failures a flow can surface; each submission either succeeds with a typed
/// response or terminates with exactly one of these.
#[derive(Debug, Error)]
pub enum FlowError {
    /// The request violated its declared field constraints. The call was
    /// never issued.
    #[error("{flow} request rejected: {violations}")]
    Rejected {
        /// Name of the rejecting flow.
        flow: &'static str,
        /// Per-field violations found in one validation pass.
        #[source]
        violations: Violations,
    },

    /// The prompt template could not be rendered.
    #[error(transparent)]
    Template(#[from] PromptError),

    /// The generator call failed (configuration, transport, provider).
    #[error(transparent)]
    Generator(#[from] GeneratorError),

    /// The reply did not conform to the declared output shape.
    #[error("{flow} reply did not match the declared output shape: {reason}")]
    MalformedReply {
        /// Name of the flow whose reply was malformed.
        flow: &'static str,
        /// Decoding error detail, for diagnosis.
        reason: String,
    },
}

impl FlowError {
    /// Returns the per-field violations when the request was rejected.
    #[must_use]
    pub fn violations(&self) -> Option<&Violations> {
        match self {
            Self::Rejected { violations, .. } => Some(violations),
            _ => None,
        }
    }
}
