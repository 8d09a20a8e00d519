use std::time::Duration;

use async_trait::async_trait;

use crate::error::Result;

/// One completion call against a text-generation backend.
#[derive(Clone, Debug)]
pub struct CompletionRequest {
    pub model: String,
    pub max_tokens: u32,
    pub timeout: Duration,
    pub system: String,
    pub prompt: String,
}

/// A backend that turns a completion request into raw response text.
///
/// The production implementation is the Anthropic Messages client; tests
/// substitute canned responses to exercise the pipeline without a network.
#[async_trait]
pub trait CompletionBackend: Send + Sync + std::fmt::Debug {
    async fn complete(&self, request: CompletionRequest) -> Result<String>;
}
