//! Domain layer containing business logic and domain types.
//!
//! # Module Organization
//!
//! - `foundation` - Shared domain primitives (IDs, errors, percentage, timestamps)
//! - `questionnaire` - Question catalog, answers and the flow state machine

pub mod foundation;
pub mod questionnaire;
