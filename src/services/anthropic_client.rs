use std::time::Duration;

use async_trait::async_trait;
use reqwest::StatusCode;
use serde_json::{json, Value};

use crate::{
    core::backend::{CompletionBackend, CompletionRequest},
    error::{Result, TripError},
};

const DEFAULT_BASE_URL: &str = "https://api.anthropic.com";
const ANTHROPIC_VERSION: &str = "2023-06-01";
const MAX_RETRIES: usize = 3;

#[derive(Clone, Debug)]
pub struct AnthropicClient {
    api_key: String,
    base_url: String,
}

impl AnthropicClient {
    pub fn new(api_key: String) -> Self {
        Self {
            api_key,
            base_url: DEFAULT_BASE_URL.to_string(),
        }
    }

    pub fn set_base_url(&mut self, base_url: impl Into<String>) {
        self.base_url = base_url.into();
    }

    pub async fn create_message(&self, body: &Value, timeout: Duration) -> Result<Value> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|err| TripError::Api(format!("Failed to build HTTP client: {err}")))?;

        let mut attempt = 0;
        let mut backoff = Duration::from_millis(250);

        loop {
            let request_url = build_messages_url(&self.base_url);

            let response = client
                .post(&request_url)
                .header("x-api-key", self.api_key.as_str())
                .header("anthropic-version", ANTHROPIC_VERSION)
                .header("Content-Type", "application/json")
                .json(body)
                .send()
                .await
                .map_err(|err| TripError::Api(format!("HTTP request failed: {err}")))?;

            let status = response.status();
            let headers = response.headers().clone();
            let response_text = response
                .text()
                .await
                .map_err(|err| TripError::Api(format!("Failed to read response: {err}")))?;

            if status == StatusCode::TOO_MANY_REQUESTS {
                let retry_after_duration = headers
                    .get(reqwest::header::RETRY_AFTER)
                    .and_then(|value| value.to_str().ok())
                    .and_then(|value| value.parse::<u64>().ok())
                    .map(Duration::from_secs)
                    .unwrap_or(backoff);

                if attempt < MAX_RETRIES {
                    tokio::time::sleep(retry_after_duration).await;
                    attempt += 1;
                    backoff *= 2;
                    continue;
                }

                return Err(TripError::RateLimit {
                    retry_after: retry_after_duration.as_secs().max(1),
                });
            }

            if status.is_server_error() && attempt < MAX_RETRIES {
                tokio::time::sleep(backoff).await;
                attempt += 1;
                backoff *= 2;
                continue;
            }

            let response_json: Value = serde_json::from_str(&response_text)
                .map_err(|err| TripError::Api(format!("Failed to parse JSON: {err}")))?;

            if !status.is_success() {
                let api_message = response_json
                    .get("error")
                    .and_then(|error| error.get("message"))
                    .and_then(|value| value.as_str())
                    .map(|s| s.to_string())
                    .unwrap_or(response_text.clone());

                return Err(TripError::Api(format!(
                    "HTTP {} error: {}",
                    status, api_message
                )));
            }

            if let Some(error) = response_json.get("error") {
                let error_message = error
                    .get("message")
                    .and_then(|value| value.as_str())
                    .map(|s| s.to_string())
                    .unwrap_or_else(|| error.to_string());
                return Err(TripError::Api(format!("API error: {}", error_message)));
            }

            return Ok(response_json);
        }
    }
}

#[async_trait]
impl CompletionBackend for AnthropicClient {
    async fn complete(&self, request: CompletionRequest) -> Result<String> {
        let body = MessagesRequest::new(request.model, request.max_tokens)
            .with_system(request.system)
            .with_user_message(request.prompt)
            .into_value();

        let response = self.create_message(&body, request.timeout).await?;
        extract_text(&response)
    }
}

fn build_messages_url(base_url: &str) -> String {
    let trimmed = base_url.trim_end_matches('/');
    if trimmed.ends_with("/v1/messages") {
        trimmed.to_string()
    } else {
        format!("{}/v1/messages", trimmed)
    }
}

/// Text of the first content block in a Messages API response.
pub(crate) fn extract_text(response: &Value) -> Result<String> {
    let block = response
        .get("content")
        .and_then(|content| content.as_array())
        .and_then(|blocks| blocks.first())
        .ok_or_else(|| TripError::Api("response contains no content blocks".to_string()))?;

    if block.get("type").and_then(|value| value.as_str()) != Some("text") {
        return Err(TripError::Api(
            "unexpected response content type from model".to_string(),
        ));
    }

    block
        .get("text")
        .and_then(|value| value.as_str())
        .map(|text| text.to_string())
        .ok_or_else(|| TripError::Api("response text block carries no text".to_string()))
}

#[derive(Clone, Debug)]
pub struct MessagesRequest {
    model: String,
    max_tokens: u32,
    system: Option<String>,
    messages: Vec<Value>,
}

impl MessagesRequest {
    pub fn new(model: impl Into<String>, max_tokens: u32) -> Self {
        Self {
            model: model.into(),
            max_tokens,
            system: None,
            messages: Vec::new(),
        }
    }

    pub fn with_system(mut self, system: impl Into<String>) -> Self {
        self.system = Some(system.into());
        self
    }

    pub fn with_user_message(mut self, content: impl Into<String>) -> Self {
        self.messages.push(json!({
            "role": "user",
            "content": content.into(),
        }));
        self
    }

    pub fn into_value(self) -> Value {
        let mut body = json!({
            "model": self.model,
            "max_tokens": self.max_tokens,
            "messages": self.messages,
        });

        if let Some(system) = self.system {
            body["system"] = json!(system);
        }

        body
    }
}
