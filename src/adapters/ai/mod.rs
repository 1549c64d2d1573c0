//! AI Provider Adapters.
//!
//! Implementations of the AIProvider port.
//!
//! - `MockAIProvider` - Scripted completions for tests
//! - `OpenAIProvider` - OpenAI chat completions
//! - `AnthropicProvider` - Anthropic messages

mod anthropic_provider;
mod http;
mod mock_provider;
mod openai_provider;

pub use anthropic_provider::{AnthropicConfig, AnthropicProvider};
pub use mock_provider::{MockAIProvider, MockResponse};
pub use openai_provider::{OpenAIConfig, OpenAIProvider};
