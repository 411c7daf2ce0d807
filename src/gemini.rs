//! Querying the Generative Language API via the `generateContent` endpoint.
//!
//! For details on the request/response schemas, see the
//! [Gemini API reference](https://ai.google.dev/api/generate-content).

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::cli::MODEL;
use crate::config::Config;
use crate::credential::Credential;
use crate::errors::{LlmError, RequestError};
use crate::input::{PromptPart, PromptSequence};

/// A `generateContent` `contents` item
#[derive(Debug, Serialize)]
pub struct RequestContent<'a> {
    pub role: &'static str,
    pub parts: &'a [PromptPart],
}

/// A `generateContent` request body
#[derive(Debug, Serialize)]
pub struct GenerateContentRequest<'a> {
    pub contents: Vec<RequestContent<'a>>,
}

impl<'a> GenerateContentRequest<'a> {
    /// All parts go out as a single user turn.
    pub fn new(parts: &'a PromptSequence) -> Self {
        Self {
            contents: vec![RequestContent {
                role: "user",
                parts: parts.parts(),
            }],
        }
    }
}

/// A part of a candidate's content. Non-text parts have no `text`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct ResponsePart {
    #[serde(default)]
    pub text: Option<String>,
}

/// A candidate's content
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct Content {
    #[serde(default)]
    pub parts: Vec<ResponsePart>,
    #[serde(default)]
    pub role: Option<String>,
}

/// One possible answer
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Candidate {
    #[serde(default)]
    pub content: Option<Content>,
    #[serde(default)]
    pub finish_reason: Option<String>,
}

/// Why a prompt was refused, if it was
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PromptFeedback {
    #[serde(default)]
    pub block_reason: Option<String>,
}

/// A `generateContent` response
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateContentResponse {
    #[serde(default)]
    pub candidates: Vec<Candidate>,
    #[serde(default)]
    pub prompt_feedback: Option<PromptFeedback>,
}

#[derive(Deserialize)]
struct ApiErrorBody {
    error: ApiErrorDetail,
}

#[derive(Deserialize)]
struct ApiErrorDetail {
    message: String,
}

/// Something that can answer a prompt.
pub trait RequestService {
    fn send(
        &self,
        credential: &Credential,
        model: &str,
        parts: &PromptSequence,
    ) -> Result<GenerateContentResponse, LlmError>;
}

impl<T: RequestService + ?Sized> RequestService for &T {
    fn send(
        &self,
        credential: &Credential,
        model: &str,
        parts: &PromptSequence,
    ) -> Result<GenerateContentResponse, LlmError> {
        (**self).send(credential, model, parts)
    }
}

/// Blocking client for the Generative Language API
#[derive(Debug, Clone)]
pub struct GeminiClient {
    client: reqwest::blocking::Client,
    base_url: String,
}

impl GeminiClient {
    /// Requests may take as long as the service needs; the blocking client's
    /// default total timeout is switched off.
    pub fn new(base_url: impl Into<String>) -> Result<Self, LlmError> {
        let client = reqwest::blocking::Client::builder()
            .timeout(None)
            .build()
            .map_err(RequestError::from)?;
        Ok(Self {
            client,
            base_url: base_url.into(),
        })
    }

    pub fn from_config(cfg: &Config) -> Result<Self, LlmError> {
        Self::new(cfg.base_url.clone())
    }
}

impl RequestService for GeminiClient {
    fn send(
        &self,
        credential: &Credential,
        model: &str,
        parts: &PromptSequence,
    ) -> Result<GenerateContentResponse, LlmError> {
        let url = generate_content_url(&self.base_url, model);
        let body = GenerateContentRequest::new(parts);
        debug!(url = %url, model = %model, part_count = parts.len(), "sending generateContent request");

        let response = self
            .client
            .post(&url)
            .header("x-goog-api-key", credential.expose())
            .json(&body)
            .send()
            .map_err(|err| {
                warn!(url = %url, error = %err, "generateContent request failed");
                RequestError::from(err)
            })?;

        let status = response.status();
        let text = response.text().map_err(RequestError::from)?;
        if !status.is_success() {
            warn!(url = %url, status = %status, body_len = text.len(), "API returned non-success status");
            return Err(RequestError::Status {
                status,
                message: api_error_message(&text),
            }
            .into());
        }

        let parsed: GenerateContentResponse =
            serde_json::from_str(&text).map_err(RequestError::from)?;
        debug!(
            candidate_count = parsed.candidates.len(),
            "received generateContent response"
        );
        Ok(parsed)
    }
}

/// The endpoint for `model`, which is given with its `models/` prefix.
fn generate_content_url(base_url: &str, model: &str) -> String {
    format!(
        "{}/{}:generateContent",
        base_url.trim_end_matches('/'),
        model.trim_start_matches('/')
    )
}

/// Prefer the API's own explanation over the raw body.
fn api_error_message(body: &str) -> String {
    match serde_json::from_str::<ApiErrorBody>(body) {
        Ok(parsed) => parsed.error.message,
        Err(_) if body.trim().is_empty() => "<empty response body>".to_string(),
        Err(_) => body.trim().to_string(),
    }
}

/// Send with the one model `llm` uses.
pub fn generate<S: RequestService + ?Sized>(
    service: &S,
    credential: &Credential,
    parts: &PromptSequence,
) -> Result<GenerateContentResponse, LlmError> {
    service.send(credential, MODEL, parts)
}
