use std::time::Duration;

use async_trait::async_trait;
use serde::Serialize;
use serde_json::Value;
use tracing::debug;

use crate::config::{DEFAULT_BASE_URL, DEFAULT_MODEL};
use crate::error::{Result, RoutineError};
use crate::interfaces::providers::CompletionClient;

pub const TEMPERATURE: f64 = 0.7;
pub const MAX_TOKENS: u32 = 500;

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    temperature: f64,
    max_tokens: u32,
}

/// Client for an OpenAI-compatible `/chat/completions` endpoint (Mistral by default).
#[derive(Clone)]
pub struct ChatCompletionClient {
    api_key: String,
    model: String,
    base_url: String,
    http: reqwest::Client,
}

impl ChatCompletionClient {
    pub fn new(api_key: String, model: Option<String>, base_url: Option<String>) -> Self {
        Self::with_timeout(api_key, model, base_url, None)
    }

    pub fn with_timeout(
        api_key: String,
        model: Option<String>,
        base_url: Option<String>,
        timeout_seconds: Option<u64>,
    ) -> Self {
        let model = model.unwrap_or_else(|| DEFAULT_MODEL.to_string());
        let base_url = base_url.unwrap_or_else(|| DEFAULT_BASE_URL.to_string());
        let mut builder = reqwest::Client::builder();
        if let Some(seconds) = timeout_seconds {
            builder = builder.timeout(Duration::from_secs(seconds));
        }
        let http = builder.build().unwrap_or_else(|_| reqwest::Client::new());
        Self {
            api_key,
            model,
            base_url,
            http,
        }
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    fn endpoint(&self) -> String {
        format!("{}/chat/completions", self.base_url.trim_end_matches('/'))
    }

    fn extract_content(body: &str) -> Result<String> {
        let value: Value = serde_json::from_str(body)
            .map_err(|e| RoutineError::MalformedResponse(e.to_string()))?;
        value
            .pointer("/choices/0/message/content")
            .and_then(|v| v.as_str())
            .map(|s| s.to_string())
            .ok_or_else(|| {
                RoutineError::MalformedResponse(
                    "missing choices[0].message.content".to_string(),
                )
            })
    }
}

#[async_trait]
impl CompletionClient for ChatCompletionClient {
    async fn complete(&self, prompt: &str) -> Result<String> {
        let request = ChatRequest {
            model: &self.model,
            messages: vec![ChatMessage {
                role: "user",
                content: prompt,
            }],
            temperature: TEMPERATURE,
            max_tokens: MAX_TOKENS,
        };

        let url = self.endpoint();
        debug!(url = %url, model = %self.model, "sending completion request");

        let response = self
            .http
            .post(&url)
            .bearer_auth(&self.api_key)
            .json(&request)
            .send()
            .await
            .map_err(|e| RoutineError::RequestFailed(e.to_string()))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| RoutineError::RequestFailed(e.to_string()))?;

        if !status.is_success() {
            return Err(RoutineError::RequestFailed(format!(
                "status {}: {}",
                status.as_u16(),
                body
            )));
        }

        Self::extract_content(&body)
    }
}
