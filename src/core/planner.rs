use std::time::Duration;

use tracing::debug;

use crate::{
    core::backend::{CompletionBackend, CompletionRequest},
    decoder::decode_itinerary,
    error::{Result, TripError},
    prompts::{build_system_prompt, build_trip_prompt},
    services::AnthropicClient,
    types::{Itinerary, TripInput},
};

const DEFAULT_MODEL: &str = "claude-sonnet-4-6";
const DEFAULT_MAX_TOKENS: u32 = 16000;

/// Itinerary generation pipeline: prompts, completion call, tolerant decode.
#[derive(Debug)]
pub struct Planner {
    backend: Box<dyn CompletionBackend>,
    model: String,
    max_tokens: u32,
    timeout: Duration,
}

impl Planner {
    pub fn new(api_key: String) -> Self {
        Self::with_backend(Box::new(AnthropicClient::new(api_key)))
    }

    /// Build a planner around any completion backend.
    pub fn with_backend(backend: Box<dyn CompletionBackend>) -> Self {
        Self {
            backend,
            model: DEFAULT_MODEL.to_string(),
            max_tokens: DEFAULT_MAX_TOKENS,
            timeout: Duration::from_secs(120),
        }
    }

    pub fn from_env() -> Result<Self> {
        let api_key = std::env::var("ANTHROPIC_API_KEY").map_err(|_| {
            TripError::Config(
                "ANTHROPIC_API_KEY environment variable must be set before creating a Planner"
                    .to_string(),
            )
        })?;
        let mut client = AnthropicClient::new(api_key);
        if let Ok(base_url) = std::env::var("ANTHROPIC_BASE_URL") {
            client.set_base_url(base_url);
        }
        Ok(Self::with_backend(Box::new(client)))
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    pub fn with_max_tokens(mut self, max_tokens: u32) -> Self {
        self.max_tokens = max_tokens;
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Generate a complete itinerary for the given trip.
    pub async fn generate(&self, input: &TripInput) -> Result<Itinerary> {
        let request = CompletionRequest {
            model: self.model.clone(),
            max_tokens: self.max_tokens,
            timeout: self.timeout,
            system: build_system_prompt().to_string(),
            prompt: build_trip_prompt(input)?,
        };

        let raw = self.backend.complete(request).await?;
        let text = strip_code_fences(raw.trim());
        debug!(
            target: "tripcraft::planner",
            destination = %input.destination,
            chars = text.len(),
            "decoding model response"
        );

        decode_itinerary(text)
    }
}

/// Drop a markdown code-fence wrapper when the model ignores the raw-JSON
/// instruction. A missing closing fence (truncated response) leaves the
/// tail untouched for the decoder to repair.
fn strip_code_fences(text: &str) -> &str {
    let Some(rest) = text.strip_prefix("```") else {
        return text;
    };
    let rest = rest.strip_prefix("json").unwrap_or(rest);
    let rest = rest.strip_prefix('\n').unwrap_or(rest);
    let rest = rest.strip_suffix("```").unwrap_or(rest);
    rest.trim()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_json_fences() {
        assert_eq!(strip_code_fences("```json\n{\"a\":1}\n```"), "{\"a\":1}");
        assert_eq!(strip_code_fences("```\n{\"a\":1}\n```"), "{\"a\":1}");
    }

    #[test]
    fn keeps_unfenced_text() {
        assert_eq!(strip_code_fences("{\"a\":1}"), "{\"a\":1}");
    }

    #[test]
    fn tolerates_missing_closing_fence() {
        assert_eq!(strip_code_fences("```json\n{\"a\": [1,"), "{\"a\": [1,");
    }
}
