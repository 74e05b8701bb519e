//! Google Gemini client used by the planner flows.
//!
//! Calls the `generateContent` endpoint over HTTPS. When a request declares a
//! response schema the client asks Gemini for structured JSON output, which
//! is how the flows enforce their typed reply contracts.

use std::{env, fmt, time::Duration};

use futures::stream;
use hyper::body::to_bytes;
use hyper::header::CONTENT_TYPE;
use hyper::{Body, Request, StatusCode, Uri};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tokio::time::timeout;
use tracing::debug;

use crate::http_client::{HyperClient, build_https_client};
use crate::traits::{
    GenerationChunk, GenerationRequest, GenerationStream, GeneratorError, GeneratorMetadata,
    GeneratorResult, TextGenerator,
};

use async_trait::async_trait;

/// Environment variable holding the Gemini access credential.
pub const GEMINI_API_KEY_ENV: &str = "GEMINI_API_KEY";

/// Default model the dashboard flows run against.
pub const DEFAULT_MODEL: &str = "gemini-2.0-flash";

/// Configuration for the Gemini client.
#[derive(Clone, Debug)]
pub struct GeminiConfig {
    api_key: Option<String>,
    model: String,
    base_url: String,
    timeout: Duration,
    default_temperature: Option<f32>,
}

impl GeminiConfig {
    /// Creates a configuration using the supplied model identifier.
    #[must_use]
    pub fn new(model: impl Into<String>) -> Self {
        Self {
            api_key: None,
            model: model.into(),
            base_url: "https://generativelanguage.googleapis.com/".to_owned(),
            timeout: Duration::from_secs(60),
            default_temperature: None,
        }
    }

    /// Loads the API key from the `GEMINI_API_KEY` environment variable.
    ///
    /// An unset variable leaves the key absent; [`GeminiClient::new`] then
    /// fails with a configuration error before any network attempt.
    #[must_use]
    pub fn from_env() -> Self {
        let mut cfg = Self::new(DEFAULT_MODEL);
        cfg.api_key = env::var(GEMINI_API_KEY_ENV).ok();
        cfg
    }

    /// Returns whether an API key has been supplied.
    #[must_use]
    pub fn is_configured(&self) -> bool {
        self.api_key.as_ref().is_some_and(|key| !key.is_empty())
    }

    /// Overrides the base URL used for API calls.
    ///
    /// # Errors
    ///
    /// Returns [`GeneratorError::Configuration`] if the supplied URL is invalid.
    pub fn with_base_url(mut self, base_url: impl AsRef<str>) -> GeneratorResult<Self> {
        let sanitized = sanitize_base_url(base_url.as_ref())?;
        self.base_url = sanitized;
        Ok(self)
    }

    /// Supplies an explicit API key.
    #[must_use]
    pub fn with_api_key(mut self, key: impl Into<String>) -> Self {
        self.api_key = Some(key.into());
        self
    }

    /// Sets the default sampling temperature used when requests omit it.
    #[must_use]
    pub fn with_default_temperature(mut self, temperature: f32) -> Self {
        self.default_temperature = Some(temperature);
        self
    }

    /// Sets the HTTP request timeout.
    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

/// Gemini text generator that calls the official API over HTTPS.
pub struct GeminiClient {
    client: HyperClient,
    base_endpoint: String,
    metadata: GeneratorMetadata,
    api_key: String,
    timeout: Duration,
    default_temperature: Option<f32>,
}

impl fmt::Debug for GeminiClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GeminiClient")
            .field("model", &self.metadata.model())
            .field("base_endpoint", &self.base_endpoint)
            .finish_non_exhaustive()
    }
}

impl GeminiClient {
    /// Constructs a new client with the provided configuration.
    ///
    /// # Errors
    ///
    /// Returns [`GeneratorError::Configuration`] if the API key is missing,
    /// before any network activity takes place.
    pub fn new(config: GeminiConfig) -> GeneratorResult<Self> {
        let api_key = config
            .api_key
            .filter(|key| !key.is_empty())
            .ok_or_else(|| {
                GeneratorError::configuration(format!(
                    "Gemini API key missing; set {GEMINI_API_KEY_ENV}"
                ))
            })?;

        let metadata = GeneratorMetadata::new("gemini", config.model.clone());
        let base_endpoint = format!(
            "{}v1beta/models/{}:generateContent",
            config.base_url, config.model
        );

        let client = build_https_client()?;

        Ok(Self {
            client,
            base_endpoint,
            metadata,
            api_key,
            timeout: config.timeout,
            default_temperature: config.default_temperature,
        })
    }

    fn build_payload(&self, request: &GenerationRequest) -> GenerateContentRequest {
        let system_instruction = request.system_instruction().map(|text| SystemInstruction {
            parts: vec![Part {
                text: text.to_owned(),
            }],
        });

        let contents = vec![Content {
            role: "user".to_owned(),
            parts: vec![Part {
                text: request.prompt().to_owned(),
            }],
        }];

        // Structured output: declaring a schema switches the reply to JSON.
        let generation_config = GenerationConfig {
            temperature: request.temperature().or(self.default_temperature),
            max_output_tokens: request.max_output_tokens(),
            response_mime_type: request
                .response_schema()
                .map(|_| "application/json".to_owned()),
            response_schema: request.response_schema().cloned(),
        };
        let generation_config = if generation_config.is_empty() {
            None
        } else {
            Some(generation_config)
        };

        GenerateContentRequest {
            system_instruction,
            contents,
            generation_config,
        }
    }

    fn build_uri(&self) -> GeneratorResult<Uri> {
        format!("{}?key={}", self.base_endpoint, self.api_key)
            .parse::<Uri>()
            .map_err(|err| {
                GeneratorError::configuration(format!("invalid Gemini endpoint: {err}"))
            })
    }
}

#[async_trait]
impl TextGenerator for GeminiClient {
    fn metadata(&self) -> &GeneratorMetadata {
        &self.metadata
    }

    async fn generate(&self, request: GenerationRequest) -> GeneratorResult<GenerationStream> {
        let payload = self.build_payload(&request);
        let body = serde_json::to_vec(&payload).map_err(|err| {
            GeneratorError::invalid_request(format!("failed to encode Gemini request: {err}"))
        })?;

        let endpoint = self.build_uri()?;
        debug!(model = self.metadata.model(), "dispatching Gemini request");

        let req = Request::post(endpoint)
            .header(CONTENT_TYPE, "application/json")
            .body(Body::from(body))
            .map_err(|err| {
                GeneratorError::transport(format!("failed to build Gemini request: {err}"))
            })?;

        let response = timeout(self.timeout, self.client.request(req))
            .await
            .map_err(|_| GeneratorError::transport("Gemini request timed out"))?
            .map_err(|err| GeneratorError::transport(format!("Gemini request failed: {err}")))?;

        let status = response.status();
        let retry_after = parse_retry_after(response.headers());
        let bytes = to_bytes(response.into_body()).await.map_err(|err| {
            GeneratorError::transport(format!("failed to read Gemini response: {err}"))
        })?;

        if status == StatusCode::TOO_MANY_REQUESTS {
            return Err(GeneratorError::RateLimited { retry_after });
        }
        if !status.is_success() {
            let reason = String::from_utf8_lossy(&bytes).to_string();
            return Err(GeneratorError::response(format!(
                "Gemini returned {status}: {reason}"
            )));
        }

        let reply: GenerateContentResponse = serde_json::from_slice(&bytes).map_err(|err| {
            GeneratorError::response(format!("failed to decode Gemini response: {err}"))
        })?;

        let content = reply
            .candidates
            .into_iter()
            .flat_map(|candidate| candidate.content.parts)
            .map(|part| part.text)
            .collect::<Vec<_>>()
            .join("\n");

        let stream = stream::once(async move { Ok(GenerationChunk::new(content, true)) });
        Ok(Box::pin(stream))
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    system_instruction: Option<SystemInstruction>,
    contents: Vec<Content>,
    #[serde(skip_serializing_if = "Option::is_none")]
    generation_config: Option<GenerationConfig>,
}

#[derive(Debug, Serialize)]
struct SystemInstruction {
    parts: Vec<Part>,
}

#[derive(Debug, Serialize, Deserialize)]
struct Content {
    role: String,
    parts: Vec<Part>,
}

#[derive(Debug, Serialize, Deserialize)]
struct Part {
    text: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    max_output_tokens: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    response_mime_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    response_schema: Option<Value>,
}

impl GenerationConfig {
    fn is_empty(&self) -> bool {
        self.temperature.is_none()
            && self.max_output_tokens.is_none()
            && self.response_mime_type.is_none()
            && self.response_schema.is_none()
    }
}

#[derive(Debug, Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Content,
}

fn sanitize_base_url(input: &str) -> GeneratorResult<String> {
    let mut base = input.trim().to_owned();
    if !(base.starts_with("http://") || base.starts_with("https://")) {
        return Err(GeneratorError::configuration(
            "Gemini base URL must start with http:// or https://",
        ));
    }
    if !base.ends_with('/') {
        base.push('/');
    }
    base.parse::<Uri>()
        .map_err(|err| GeneratorError::configuration(format!("invalid Gemini base URL: {err}")))?;
    Ok(base)
}

/// Reads the delta-seconds form of `Retry-After`. The HTTP-date form is
/// ignored; Gemini only sends the numeric one.
fn parse_retry_after(headers: &hyper::HeaderMap) -> Option<Duration> {
    headers
        .get(hyper::header::RETRY_AFTER)?
        .to_str()
        .ok()?
        .trim()
        .parse::<u64>()
        .ok()
        .map(Duration::from_secs)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn missing_api_key_fails_construction() {
        let err = GeminiClient::new(GeminiConfig::new(DEFAULT_MODEL)).expect_err("no key");
        assert!(matches!(err, GeneratorError::Configuration { .. }));
    }

    #[test]
    fn empty_api_key_counts_as_missing() {
        let config = GeminiConfig::new(DEFAULT_MODEL).with_api_key("");
        assert!(!config.is_configured());
        let err = GeminiClient::new(config).expect_err("blank key");
        assert!(matches!(err, GeneratorError::Configuration { .. }));
    }

    #[test]
    fn base_url_requires_scheme() {
        let err = GeminiConfig::new(DEFAULT_MODEL)
            .with_base_url("generativelanguage.googleapis.com")
            .expect_err("missing scheme should error");

        assert!(matches!(err, GeneratorError::Configuration { .. }));
    }

    #[test]
    fn sanitize_appends_trailing_slash() {
        let cfg = GeminiConfig::new(DEFAULT_MODEL)
            .with_base_url("https://example.com/gemini")
            .expect("valid URL");
        assert_eq!(cfg.base_url, "https://example.com/gemini/");
    }

    #[test]
    fn retry_after_delta_seconds_is_honored() {
        let mut headers = hyper::HeaderMap::new();
        headers.insert(hyper::header::RETRY_AFTER, "30".parse().unwrap());
        assert_eq!(parse_retry_after(&headers), Some(Duration::from_secs(30)));
    }

    #[test]
    fn absent_or_dated_retry_after_yields_none() {
        assert_eq!(parse_retry_after(&hyper::HeaderMap::new()), None);

        let mut headers = hyper::HeaderMap::new();
        headers.insert(
            hyper::header::RETRY_AFTER,
            "Wed, 21 Oct 2026 07:28:00 GMT".parse().unwrap(),
        );
        assert_eq!(parse_retry_after(&headers), None);
    }

    #[test]
    fn payload_declares_structured_output() {
        let config = GeminiConfig::new(DEFAULT_MODEL).with_api_key("test_key");
        let client = GeminiClient::new(config).expect("client");

        let schema = json!({"type": "OBJECT", "properties": {"reasoning": {"type": "STRING"}}});
        let request = GenerationRequest::new("Recommend electives.")
            .unwrap()
            .with_response_schema(schema.clone());

        let payload = client.build_payload(&request);
        let generation_config = payload.generation_config.expect("config");
        assert_eq!(
            generation_config.response_mime_type.as_deref(),
            Some("application/json")
        );
        assert_eq!(generation_config.response_schema, Some(schema));
    }

    #[test]
    fn payload_extracts_system_instruction() {
        let config = GeminiConfig::new(DEFAULT_MODEL).with_api_key("test_key");
        let client = GeminiClient::new(config).expect("client");

        let request = GenerationRequest::new("Plan my graduation.")
            .unwrap()
            .with_system_instruction("You are a graduation planning assistant.");

        let payload = client.build_payload(&request);
        assert!(payload.system_instruction.is_some());
        assert_eq!(payload.contents.len(), 1);
        assert_eq!(payload.contents[0].role, "user");
    }

    #[test]
    fn default_temperature_fills_in() {
        let config = GeminiConfig::new(DEFAULT_MODEL)
            .with_api_key("test_key")
            .with_default_temperature(0.3);
        let client = GeminiClient::new(config).expect("client");

        let request = GenerationRequest::new("Predict my graduation date.").unwrap();
        let payload = client.build_payload(&request);
        let generation_config = payload.generation_config.expect("config");
        assert_eq!(generation_config.temperature, Some(0.3));
    }
}
