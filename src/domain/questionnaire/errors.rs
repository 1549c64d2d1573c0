//! Errors raised by the question flow engine.

use std::fmt;
use thiserror::Error;

use crate::domain::foundation::{ChoiceId, ErrorCode, QuestionId, ValidationError};

/// Why a navigation request was refused.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BlockReason {
    /// Back requested on the first step.
    AtFirstStep,
    /// Forward requested before the current question was answered.
    Unanswered(QuestionId),
}

impl fmt::Display for BlockReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BlockReason::AtFirstStep => write!(f, "already at the first step"),
            BlockReason::Unanswered(id) => write!(f, "question '{}' is not answered", id),
        }
    }
}

/// Failure reported by a question generator.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GenerationError {
    /// The upstream suggestion service rejected or failed the request.
    #[error("suggestion provider failed: {message}")]
    Provider { message: String, retryable: bool },

    #[error("question generation timed out after {timeout_secs}s")]
    Timeout { timeout_secs: u64 },

    /// The reply could not be turned into a well-formed question.
    #[error("generated question is invalid: {0}")]
    InvalidQuestion(String),

    #[error("generated question id '{0}' is already in use")]
    DuplicateQuestionId(QuestionId),
}

impl GenerationError {
    /// Creates a provider error.
    pub fn provider(message: impl Into<String>, retryable: bool) -> Self {
        Self::Provider {
            message: message.into(),
            retryable,
        }
    }

    /// Creates an invalid question error.
    pub fn invalid(reason: impl Into<String>) -> Self {
        Self::InvalidQuestion(reason.into())
    }
}

/// Errors returned by flow controller operations.
///
/// None of these are fatal; callers either refuse the request or let the
/// user retry.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FlowError {
    #[error("navigation blocked: {0}")]
    NavigationBlocked(BlockReason),

    #[error("a question is already being generated")]
    GenerationInFlight,

    #[error("choice '{choice_id}' does not belong to question '{question_id}'")]
    UnknownChoice {
        question_id: QuestionId,
        choice_id: ChoiceId,
    },

    #[error("question '{0}' already exists in the sequence")]
    DuplicateQuestionId(QuestionId),

    #[error("no question at step {0}")]
    MissingQuestion(usize),

    #[error("question generation failed: {0}")]
    GenerationFailed(#[from] GenerationError),

    /// The session was restarted or closed while the request was outstanding.
    #[error("generation result discarded")]
    GenerationDiscarded,

    #[error("session is closed")]
    SessionClosed,

    #[error("invalid flow state: {0}")]
    InvalidState(#[from] ValidationError),
}

impl FlowError {
    /// Stable code for the rendering layer.
    pub fn code(&self) -> ErrorCode {
        match self {
            FlowError::NavigationBlocked(_)
            | FlowError::MissingQuestion(_)
            | FlowError::SessionClosed => ErrorCode::NavigationBlocked,
            FlowError::GenerationInFlight => ErrorCode::GenerationInFlight,
            FlowError::UnknownChoice { .. } => ErrorCode::UnknownChoice,
            FlowError::DuplicateQuestionId(_)
            | FlowError::GenerationFailed(GenerationError::DuplicateQuestionId(_)) => {
                ErrorCode::DuplicateQuestionId
            }
            FlowError::GenerationFailed(_) => ErrorCode::GenerationFailed,
            FlowError::GenerationDiscarded => ErrorCode::GenerationDiscarded,
            FlowError::InvalidState(_) => ErrorCode::ValidationFailed,
        }
    }

    /// True when re-issuing the same request may succeed.
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            FlowError::GenerationFailed(_) | FlowError::GenerationInFlight
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn generation_failures_are_retryable() {
        let err = FlowError::from(GenerationError::Timeout { timeout_secs: 30 });
        assert!(err.is_retryable());
        assert_eq!(err.code(), ErrorCode::GenerationFailed);
    }

    #[test]
    fn blocked_navigation_is_not_retryable() {
        let err = FlowError::NavigationBlocked(BlockReason::AtFirstStep);
        assert!(!err.is_retryable());
        assert_eq!(err.code(), ErrorCode::NavigationBlocked);
    }

    #[test]
    fn duplicate_generated_id_has_its_own_code() {
        let id = QuestionId::new("recipient").unwrap();
        let err = FlowError::from(GenerationError::DuplicateQuestionId(id));
        assert_eq!(err.code(), ErrorCode::DuplicateQuestionId);
        assert!(err.is_retryable());
    }

    #[test]
    fn unanswered_reason_names_question() {
        let reason = BlockReason::Unanswered(QuestionId::new("budget").unwrap());
        assert_eq!(reason.to_string(), "question 'budget' is not answered");
    }
}
