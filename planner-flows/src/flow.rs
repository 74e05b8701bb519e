//! The generic validated-prompt-call-validated-response pipeline.

use std::collections::HashMap;
use std::marker::PhantomData;

use futures::StreamExt;
use planner_adapters::traits::{GenerationRequest, TextGenerator};
use planner_primitives::Violations;
use planner_prompts::PromptTemplate;
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::{debug, warn};

use crate::error::{FlowError, FlowResult};

/// A validated form request feeding one flow.
pub trait FlowInput {
    /// Checks every declared field constraint, reporting all violations.
    ///
    /// # Errors
    ///
    /// Returns [`Violations`] enumerating each failing field.
    fn validate(&self) -> Result<(), Violations>;

    /// Produces the template variables for this request. Lists are already
    /// joined into their display form; optional fields are simply absent.
    fn variables(&self) -> HashMap<String, String>;
}

/// A typed reply a flow hands back to its caller.
pub trait FlowOutput: DeserializeOwned {
    /// The JSON shape declared to the model for structured output.
    fn response_schema() -> Value;
}

/// One dashboard feature: a fixed template bound to an input and output type.
///
/// A flow holds no state between calls. `run` is a single linear pass with
/// two terminal states, `Ok(output)` or `Err(FlowError)`; a request that
/// fails validation never reaches the renderer, and a reply that fails shape
/// validation never reaches the caller as a success value.
pub struct Flow<I, O> {
    name: &'static str,
    template: PromptTemplate,
    system_instruction: Option<String>,
    _marker: PhantomData<fn(I) -> O>,
}

impl<I: FlowInput, O: FlowOutput> Flow<I, O> {
    /// Binds a template to the flow's input and output types.
    #[must_use]
    pub fn new(name: &'static str, template: PromptTemplate) -> Self {
        Self {
            name,
            template,
            system_instruction: None,
            _marker: PhantomData,
        }
    }

    /// Sets a system instruction framing every prompt of this flow.
    #[must_use]
    pub fn with_system_instruction(mut self, instruction: impl Into<String>) -> Self {
        self.system_instruction = Some(instruction.into());
        self
    }

    /// Returns the flow name used in logs and errors.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        self.name
    }

    /// Validates the request and renders its prompt.
    ///
    /// Deterministic: identical requests render byte-identical prompts.
    ///
    /// # Errors
    ///
    /// Returns [`FlowError::Rejected`] when a field constraint fails, in
    /// which case no prompt is built, or [`FlowError::Template`] when the
    /// template itself cannot be rendered.
    pub fn render(&self, input: &I) -> FlowResult<String> {
        input.validate().map_err(|violations| FlowError::Rejected {
            flow: self.name,
            violations,
        })?;
        Ok(self.template.render(&input.variables())?)
    }

    /// Runs the full pipeline against the supplied generator.
    ///
    /// One network call per invocation; nothing is cached or retried.
    ///
    /// # Errors
    ///
    /// Any of the [`FlowError`] variants, depending on which stage failed.
    pub async fn run(&self, generator: &dyn TextGenerator, input: &I) -> FlowResult<O> {
        let prompt = self.render(input)?;

        let mut request =
            GenerationRequest::new(prompt)?.with_response_schema(O::response_schema());
        if let Some(instruction) = &self.system_instruction {
            request = request.with_system_instruction(instruction.clone());
        }

        debug!(
            flow = self.name,
            provider = generator.metadata().provider(),
            model = generator.metadata().model(),
            "dispatching flow request"
        );

        let mut stream = generator.generate(request).await?;
        let mut reply = String::new();
        while let Some(chunk) = stream.next().await {
            reply.push_str(&chunk?.delta);
        }

        match serde_json::from_str::<O>(extract_json(&reply)) {
            Ok(output) => {
                debug!(flow = self.name, "flow completed");
                Ok(output)
            }
            Err(err) => {
                // Logged apart from transport errors so shape drift in the
                // model reply is diagnosable.
                warn!(
                    flow = self.name,
                    error = %err,
                    "model reply did not match the declared output shape"
                );
                Err(FlowError::MalformedReply {
                    flow: self.name,
                    reason: err.to_string(),
                })
            }
        }
    }
}

/// Extracts the JSON payload from a reply that may be fenced in markdown.
fn extract_json(reply: &str) -> &str {
    let trimmed = reply.trim();

    if let Some(start) = trimmed.find("```json") {
        let body = start + "```json".len();
        if let Some(end) = trimmed[body..].find("```") {
            return trimmed[body..body + end].trim();
        }
    }

    if let Some(start) = trimmed.find("```") {
        let body = start + 3;
        // Skip a language identifier when present.
        let content = trimmed[body..]
            .find('\n')
            .map_or(body, |offset| body + offset + 1);
        if let Some(end) = trimmed[content..].find("```") {
            return trimmed[content..content + end].trim();
        }
    }

    trimmed
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extracts_bare_json() {
        assert_eq!(extract_json("  {\"a\": 1}  "), "{\"a\": 1}");
    }

    #[test]
    fn extracts_json_fenced_block() {
        let reply = "Here you go:\n```json\n{\"a\": 1}\n```\nDone.";
        assert_eq!(extract_json(reply), "{\"a\": 1}");
    }

    #[test]
    fn extracts_generic_fenced_block() {
        let reply = "```\n{\"a\": 1}\n```";
        assert_eq!(extract_json(reply), "{\"a\": 1}");
    }
}
