use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::services::translate::backend::{BackendError, TranslationBackend};

/// One Gemini model behind the `generateContent` endpoint.
#[derive(Clone)]
pub struct GeminiBackend {
    client: Client,
    base_url: String,
    model: String,
    api_key: String,
}

/// Body of a `generateContent` call.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateRequest<'a> {
    contents: Vec<Content<'a>>,
    generation_config: GenerationConfig,
}

#[derive(Serialize)]
struct Content<'a> {
    parts: Vec<RequestPart<'a>>,
}

#[derive(Serialize)]
struct RequestPart<'a> {
    text: &'a str,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    temperature: f32,
    max_output_tokens: u32,
    thinking_config: ThinkingConfig,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ThinkingConfig {
    thinking_budget: u32,
}

#[derive(Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Deserialize)]
struct Candidate {
    content: Option<CandidateContent>,
}

#[derive(Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<ResponsePart>,
}

#[derive(Deserialize)]
struct ResponsePart {
    text: Option<String>,
}

impl<'a> GenerateRequest<'a> {
    pub fn new(prompt: &'a str, max_output_tokens: u32) -> Self {
        Self {
            contents: vec![Content {
                parts: vec![RequestPart { text: prompt }],
            }],
            generation_config: GenerationConfig {
                temperature: 0.7,
                max_output_tokens,
                thinking_config: ThinkingConfig { thinking_budget: 0 },
            },
        }
    }
}

impl GenerateResponse {
    /// Text of the first candidate, parts concatenated.
    fn text(self) -> Option<String> {
        let content = self.candidates.into_iter().next()?.content?;
        let text: String = content.parts.into_iter().filter_map(|p| p.text).collect();
        let text = text.trim();
        (!text.is_empty()).then(|| text.to_string())
    }
}

/// Trimmed text of a successful `generateContent` reply body.
pub fn parse_reply(raw: &str) -> Result<String, BackendError> {
    let parsed: GenerateResponse = serde_json::from_str(raw).map_err(|e| BackendError::Malformed(e.to_string()))?;
    parsed.text().ok_or(BackendError::EmptyResponse)
}

impl GeminiBackend {
    pub fn new(base_url: &str, model: &str, api_key: &str, timeout: Duration) -> Result<Self, BackendError> {
        Ok(Self {
            client: Client::builder()
                .timeout(timeout) // network-level bound on every request
                .build()?,
            base_url: base_url.trim_end_matches('/').to_string(),
            model: model.to_string(),
            api_key: api_key.to_string(),
        })
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    fn endpoint(&self) -> String {
        format!("{}/v1beta/models/{}:generateContent", self.base_url, self.model)
    }
}

#[async_trait]
impl TranslationBackend for GeminiBackend {
    fn id(&self) -> &str {
        &self.model
    }

    async fn generate(&self, prompt: &str, max_output_tokens: u32) -> Result<String, BackendError> {
        let request_body = GenerateRequest::new(prompt, max_output_tokens);

        let response = self
            .client
            .post(self.endpoint())
            .query(&[("key", self.api_key.as_str())])
            .json(&request_body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(BackendError::Status {
                code: status.as_u16(),
                body,
            });
        }

        let raw = response.text().await?;
        let text = parse_reply(&raw)?;
        debug!(model = %self.model, chars = text.chars().count(), "Gemini reply");
        Ok(text)
    }
}
