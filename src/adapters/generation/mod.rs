//! Question Generator Adapters.
//!
//! - `LlmQuestionGenerator` - asks an `AIProvider` for the next question
//! - `MockQuestionGenerator` - scripted outcomes with canned fallbacks

mod llm_question_generator;
mod mock_question_generator;

pub use llm_question_generator::{LlmGeneratorConfig, LlmQuestionGenerator};
pub use mock_question_generator::MockQuestionGenerator;
