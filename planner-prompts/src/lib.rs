//! Prompt rendering for the GradPath planner.
//!
//! Templates are fixed natural-language instructions with `{{variable}}`
//! placeholders. Rendering is literal substitution and nothing else: the same
//! variable map always produces byte-identical output, so the flows stay
//! deterministic up to the external model call.

#![warn(missing_docs, clippy::pedantic)]

mod error;
mod template;

/// Error type and result alias for prompt rendering.
pub use error::{PromptError, PromptResult};
/// Template type and list formatting helper.
pub use template::{PromptTemplate, display_list};
