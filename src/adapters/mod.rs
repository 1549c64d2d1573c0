//! Adapters - Implementations of port interfaces.
//!
//! - `ai` - LLM providers (OpenAI, Anthropic, mock)
//! - `generation` - question generators (LLM backed, scripted)
//! - `location` - step locations (in-memory, query string)

pub mod ai;
pub mod generation;
pub mod location;
