use log::error;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use thiserror::Error;

const GENAI_API_URL: &str = "https://generativelanguage.googleapis.com";

#[derive(Error, Debug)]
pub enum GenAiError {
    #[error("Model API request failed: {0}")]
    Transport(String),

    #[error("Model API returned status {0}: {1}")]
    Upstream(u16, String),

    #[error("Model response had no usable text")]
    EmptyResponse,
}

#[derive(Serialize, Debug, Clone, Copy)]
#[serde(rename_all = "camelCase")]
pub struct GenerationConfig {
    pub temperature: f32,
    pub top_p: f32,
    pub top_k: u32,
    pub max_output_tokens: u32,
    pub candidate_count: u32,
}

/// Fixed sampling configuration for the short facts batch.
pub const FACTS_GENERATION: GenerationConfig = GenerationConfig {
    temperature: 0.9,
    top_p: 0.95,
    top_k: 40,
    max_output_tokens: 1024,
    candidate_count: 1,
};

/// Plans are long and structured, so sampling runs cooler with more room.
pub const PLAN_GENERATION: GenerationConfig = GenerationConfig {
    temperature: 0.4,
    top_p: 0.95,
    top_k: 40,
    max_output_tokens: 8192,
    candidate_count: 1,
};

#[derive(Serialize, Debug)]
struct GenerateContentRequest<'a> {
    contents: Vec<Content<'a>>,
    #[serde(rename = "generationConfig")]
    generation_config: GenerationConfig,
}

#[derive(Serialize, Debug)]
struct Content<'a> {
    parts: Vec<Part<'a>>,
}

#[derive(Serialize, Debug)]
struct Part<'a> {
    text: &'a str,
}

#[derive(Deserialize, Debug)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Deserialize, Debug)]
struct Candidate {
    content: CandidateContent,
}

#[derive(Deserialize, Debug)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<TextPart>,
}

#[derive(Deserialize, Debug)]
struct TextPart {
    #[serde(default)]
    text: String,
}

/// Client for the generative-language API. One outbound POST per call, no
/// retry; callers own the degraded fallback path.
#[derive(Clone)]
pub struct GenAiClient {
    http: Client,
    base_url: String,
    api_key: String,
    model: String,
}

impl GenAiClient {
    pub fn new(api_key: String, model: String) -> Self {
        Self::with_base_url(GENAI_API_URL.to_string(), api_key, model)
    }

    /// Constructor with an explicit endpoint URL, used by tests to point at
    /// a mock server.
    pub fn with_base_url(base_url: String, api_key: String, model: String) -> Self {
        Self {
            http: Client::new(),
            base_url,
            api_key,
            model,
        }
    }

    /// Sends one prompt and returns the first candidate's text.
    pub async fn generate(
        &self,
        prompt: &str,
        config: GenerationConfig,
    ) -> Result<String, GenAiError> {
        let payload = GenerateContentRequest {
            contents: vec![Content {
                parts: vec![Part { text: prompt }],
            }],
            generation_config: config,
        };

        let response = self
            .http
            .post(format!(
                "{}/v1beta/models/{}:generateContent",
                self.base_url, self.model
            ))
            .header("x-goog-api-key", &self.api_key)
            .json(&payload)
            .send()
            .await
            .map_err(|e| {
                error!("Failed to reach model API: {}", e);
                GenAiError::Transport(e.to_string())
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            error!("Model API returned error status {}: {}", status, body);
            return Err(GenAiError::Upstream(status.as_u16(), body));
        }

        let parsed: GenerateContentResponse = response.json().await.map_err(|e| {
            error!("Failed to parse model API response: {}", e);
            GenAiError::Transport(format!("unreadable response: {}", e))
        })?;

        parsed
            .candidates
            .into_iter()
            .next()
            .and_then(|c| c.content.parts.into_iter().next())
            .map(|p| p.text)
            .filter(|text| !text.trim().is_empty())
            .ok_or(GenAiError::EmptyResponse)
    }
}

/// Models often wrap JSON answers in Markdown code fences; strip them
/// before parsing.
pub fn strip_code_fences(text: &str) -> &str {
    let trimmed = text.trim();
    let Some(rest) = trimmed.strip_prefix("```") else {
        return trimmed;
    };
    let rest = rest.strip_prefix("json").unwrap_or(rest);
    let rest = rest.strip_suffix("```").unwrap_or(rest);
    rest.trim()
}
