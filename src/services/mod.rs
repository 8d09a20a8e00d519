pub mod anthropic_client;

pub use anthropic_client::{AnthropicClient, MessagesRequest};
