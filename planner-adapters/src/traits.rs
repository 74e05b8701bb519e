//! Shared text-generation traits and data structures.

use std::pin::Pin;
use std::time::Duration;

use async_trait::async_trait;
use futures::Stream;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

/// Result alias used by text generators.
pub type GeneratorResult<T> = Result<T, GeneratorError>;

/// Streaming reply emitted by [`TextGenerator::generate`].
pub type GenerationStream = Pin<Box<dyn Stream<Item = GeneratorResult<GenerationChunk>> + Send>>;

/// Error type shared by generator implementations.
///
/// Each variant maps to one of the distinct failure conditions the flows
/// surface to their caller: misconfiguration fails before any network
/// activity, transport and provider errors fail the single attempted call,
/// and malformed replies fail response handling. None of them are retried.
#[derive(Debug, Error)]
pub enum GeneratorError {
    /// Generator is misconfigured or missing its access credential.
    #[error("generator not configured: {reason}")]
    Configuration {
        /// Additional context for the failure.
        reason: String,
    },

    /// The supplied request was invalid for the target service.
    #[error("invalid generation request: {reason}")]
    InvalidRequest {
        /// Reason describing why the request could not be processed.
        reason: String,
    },

    /// Transport-level failures (connection, TLS, timeout).
    #[error("generator transport error: {reason}")]
    Transport {
        /// Additional context about the error.
        reason: String,
    },

    /// The provider rejected the request due to rate limiting.
    #[error("generator rate limited (retry after {retry_after:?})")]
    RateLimited {
        /// Suggested delay before the caller retries, when advertised.
        retry_after: Option<Duration>,
    },

    /// The provider returned an error or a reply that could not be decoded.
    #[error("generator response error: {reason}")]
    Response {
        /// Additional context about the response failure.
        reason: String,
    },
}

impl GeneratorError {
    /// Convenience constructor for configuration issues.
    #[must_use]
    pub fn configuration(reason: impl Into<String>) -> Self {
        Self::Configuration {
            reason: reason.into(),
        }
    }

    /// Convenience constructor for invalid requests.
    #[must_use]
    pub fn invalid_request(reason: impl Into<String>) -> Self {
        Self::InvalidRequest {
            reason: reason.into(),
        }
    }

    /// Convenience constructor for transport failures.
    #[must_use]
    pub fn transport(reason: impl Into<String>) -> Self {
        Self::Transport {
            reason: reason.into(),
        }
    }

    /// Convenience constructor for response failures.
    #[must_use]
    pub fn response(reason: impl Into<String>) -> Self {
        Self::Response {
            reason: reason.into(),
        }
    }
}

/// Minimal metadata describing a generator instance.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GeneratorMetadata {
    provider: &'static str,
    model: String,
}

impl GeneratorMetadata {
    /// Creates metadata for the supplied provider and model identifier.
    #[must_use]
    pub fn new(provider: &'static str, model: impl Into<String>) -> Self {
        Self {
            provider,
            model: model.into(),
        }
    }

    /// Returns the provider identifier (e.g., "gemini").
    #[must_use]
    pub const fn provider(&self) -> &'static str {
        self.provider
    }

    /// Returns the configured model name.
    #[must_use]
    pub fn model(&self) -> &str {
        &self.model
    }
}

/// A rendered prompt plus the output contract for one generation call.
#[derive(Clone, Debug, Deserialize, Serialize, PartialEq)]
pub struct GenerationRequest {
    prompt: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    system_instruction: Option<String>,
    /// JSON schema the provider must shape its reply to, when declared.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    response_schema: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    temperature: Option<f32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    max_output_tokens: Option<u32>,
}

impl GenerationRequest {
    /// Creates a request around a rendered prompt.
    ///
    /// # Errors
    ///
    /// Returns [`GeneratorError::InvalidRequest`] if the prompt is empty.
    pub fn new(prompt: impl Into<String>) -> GeneratorResult<Self> {
        let prompt = prompt.into();
        if prompt.trim().is_empty() {
            return Err(GeneratorError::invalid_request(
                "generation request requires a non-empty prompt",
            ));
        }

        Ok(Self {
            prompt,
            system_instruction: None,
            response_schema: None,
            temperature: None,
            max_output_tokens: None,
        })
    }

    /// Sets a system instruction framing the prompt.
    #[must_use]
    pub fn with_system_instruction(mut self, instruction: impl Into<String>) -> Self {
        self.system_instruction = Some(instruction.into());
        self
    }

    /// Declares the JSON shape the reply must conform to.
    #[must_use]
    pub fn with_response_schema(mut self, schema: Value) -> Self {
        self.response_schema = Some(schema);
        self
    }

    /// Sets the sampling temperature.
    #[must_use]
    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = Some(temperature);
        self
    }

    /// Sets the maximum output token budget.
    #[must_use]
    pub fn with_max_output_tokens(mut self, tokens: u32) -> Self {
        self.max_output_tokens = Some(tokens);
        self
    }

    /// Returns the rendered prompt text.
    #[must_use]
    pub fn prompt(&self) -> &str {
        &self.prompt
    }

    /// Returns the system instruction if configured.
    #[must_use]
    pub fn system_instruction(&self) -> Option<&str> {
        self.system_instruction.as_deref()
    }

    /// Returns the declared response schema if any.
    #[must_use]
    pub fn response_schema(&self) -> Option<&Value> {
        self.response_schema.as_ref()
    }

    /// Returns the configured sampling temperature.
    #[must_use]
    pub const fn temperature(&self) -> Option<f32> {
        self.temperature
    }

    /// Returns the configured maximum output tokens.
    #[must_use]
    pub const fn max_output_tokens(&self) -> Option<u32> {
        self.max_output_tokens
    }
}

/// Partial reply emitted by a generator.
#[derive(Clone, Debug, Deserialize, Serialize, PartialEq, Eq)]
pub struct GenerationChunk {
    /// Text delta emitted by the provider.
    pub delta: String,
    /// Whether the generation is complete.
    pub done: bool,
}

impl GenerationChunk {
    /// Creates a new chunk.
    #[must_use]
    pub fn new(delta: impl Into<String>, done: bool) -> Self {
        Self {
            delta: delta.into(),
            done,
        }
    }
}

/// Trait implemented by all remote text generators.
#[async_trait]
pub trait TextGenerator: Send + Sync {
    /// Returns basic metadata describing the generator instance.
    fn metadata(&self) -> &GeneratorMetadata;

    /// Executes one generation call, returning the streamed reply.
    ///
    /// Every invocation is independent: implementations do not cache, batch,
    /// or deduplicate calls, and they never retry on their own.
    async fn generate(&self, request: GenerationRequest) -> GeneratorResult<GenerationStream>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn rejects_empty_prompt() {
        let err = GenerationRequest::new("   ").expect_err("prompt required");
        assert!(matches!(err, GeneratorError::InvalidRequest { .. }));
    }

    #[test]
    fn builds_request() {
        let request = GenerationRequest::new("Recommend electives.")
            .unwrap()
            .with_system_instruction("You are an academic advisor.")
            .with_response_schema(json!({"type": "OBJECT"}))
            .with_temperature(0.4)
            .with_max_output_tokens(1024);

        assert_eq!(request.prompt(), "Recommend electives.");
        assert_eq!(
            request.system_instruction(),
            Some("You are an academic advisor.")
        );
        assert!(request.response_schema().is_some());
        assert_eq!(request.temperature(), Some(0.4));
        assert_eq!(request.max_output_tokens(), Some(1024));
    }
}
