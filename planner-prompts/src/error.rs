//! Error definitions for prompt rendering.

use thiserror::Error;

/// Result alias for template operations.
pub type PromptResult<T> = Result<T, PromptError>;

/// Errors that can occur while rendering a prompt template.
#[derive(Debug, Error)]
pub enum PromptError {
    /// A variable the template declares as required was not supplied.
    #[error("missing required template variable `{name}`")]
    MissingVariable {
        /// Name of the missing variable.
        name: String,
    },

    /// The template text itself is malformed.
    #[error("malformed template: {reason}")]
    Malformed {
        /// Reason the template could not be parsed.
        reason: String,
    },
}
