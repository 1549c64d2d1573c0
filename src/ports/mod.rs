//! Ports - Interfaces for external dependencies.
//!
//! Following hexagonal architecture, ports define the contracts between
//! the questionnaire engine and the outside world. Adapters implement these
//! ports.
//!
//! - `AIProvider` - LLM completions
//! - `QuestionGenerator` - next question at the frontier
//! - `StepLocation` - external read/write of the current step

mod ai_provider;
mod question_generator;
mod step_location;

pub use ai_provider::{
    AIError, AIProvider, CompletionRequest, CompletionResponse, FinishReason, Message,
    MessageRole, ProviderInfo, RequestMetadata, TokenUsage,
};
pub use question_generator::{GenerationError, QuestionGenerator};
pub use step_location::StepLocation;
