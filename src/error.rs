use thiserror::Error;

/// Main error type for the itinerary pipeline
#[derive(Error, Debug)]
pub enum TripError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Anthropic API error: {0}")]
    Api(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Failed to decode itinerary response (truncated JSON). Response starts with: \"{preview}\"")]
    Decode { preview: String },

    #[error("Rate limit exceeded: retry after {retry_after}s")]
    RateLimit { retry_after: u64 },
}

/// Result type alias
pub type Result<T> = std::result::Result<T, TripError>;

impl TripError {
    /// Check if this error is retryable
    pub fn is_retryable(&self) -> bool {
        matches!(self, TripError::Api(_) | TripError::RateLimit { .. })
    }

    /// Get the error code for structured responses
    pub fn error_code(&self) -> &'static str {
        match self {
            TripError::Config(_) => "CONFIG_ERROR",
            TripError::Api(_) => "API_ERROR",
            TripError::Serialization(_) => "SERIALIZATION_ERROR",
            TripError::Validation(_) => "VALIDATION_ERROR",
            TripError::Decode { .. } => "DECODE_ERROR",
            TripError::RateLimit { .. } => "RATE_LIMIT_ERROR",
        }
    }
}
