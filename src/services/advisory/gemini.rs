//! Gemini `generateContent` client.
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use url::Url;

use crate::services::advisory::backend::{AdvisoryBackend, GenerationError};

const SYSTEM_INSTRUCTION: &str = "You are a helpful financial assistant. \
Provide accurate, clear, and actionable financial advice.";

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateRequest<'a> {
    system_instruction: RequestContent<'a>,
    contents: [RequestContent<'a>; 1],
}

#[derive(Serialize)]
struct RequestContent<'a> {
    parts: [RequestPart<'a>; 1],
}

#[derive(Serialize)]
struct RequestPart<'a> {
    text: &'a str,
}

impl<'a> RequestContent<'a> {
    fn text(text: &'a str) -> Self {
        Self {
            parts: [RequestPart { text }],
        }
    }
}

#[derive(Debug, Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    #[serde(default)]
    content: Option<CandidateContent>,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<CandidatePart>,
}

#[derive(Debug, Deserialize)]
struct CandidatePart {
    #[serde(default)]
    text: Option<String>,
}

impl GenerateResponse {
    // Text of the first part of the first candidate, if any.
    fn into_text(self) -> Option<String> {
        self.candidates
            .into_iter()
            .next()?
            .content?
            .parts
            .into_iter()
            .next()?
            .text
            .filter(|t| !t.is_empty())
    }
}

#[derive(Clone)]
pub struct GeminiBackend {
    http: reqwest::Client,
    endpoint: Url,
    api_key: String,
}

impl std::fmt::Debug for GeminiBackend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // Do not print the api key
        f.debug_struct("GeminiBackend")
            .field("endpoint", &self.endpoint.as_str())
            .finish()
    }
}

impl GeminiBackend {
    pub fn new(
        http: reqwest::Client,
        api_url: &str,
        model: &str,
        api_key: impl Into<String>,
    ) -> Result<Self, GenerationError> {
        let api_key = api_key.into();
        if api_key.trim().is_empty() {
            return Err(GenerationError::MissingApiKey);
        }

        let mut endpoint = Url::parse(api_url)
            .map_err(|e| GenerationError::Failed(format!("invalid backend url: {e}")))?;
        endpoint
            .path_segments_mut()
            .map_err(|_| GenerationError::Failed("backend url cannot be a base".into()))?
            .pop_if_empty()
            .push("models")
            .push(&format!("{model}:generateContent"));

        Ok(Self {
            http,
            endpoint,
            api_key,
        })
    }
}

#[async_trait]
impl AdvisoryBackend for GeminiBackend {
    fn name(&self) -> &'static str {
        "gemini"
    }

    async fn generate(&self, prompt: &str) -> Result<String, GenerationError> {
        let body = GenerateRequest {
            system_instruction: RequestContent::text(SYSTEM_INSTRUCTION),
            contents: [RequestContent::text(prompt)],
        };

        let resp = self
            .http
            .post(self.endpoint.clone())
            .header("x-goog-api-key", &self.api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| GenerationError::Failed(e.to_string()))?;

        let status = resp.status();
        if !status.is_success() {
            return Err(GenerationError::Failed(format!(
                "generation backend returned {status}"
            )));
        }

        let parsed: GenerateResponse = resp
            .json()
            .await
            .map_err(|e| GenerationError::Failed(format!("invalid backend response: {e}")))?;

        parsed.into_text().ok_or(GenerationError::EmptyResponse)
    }
}
