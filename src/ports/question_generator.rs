//! Question Generator Port - Supplies the next question at the frontier.
//!
//! Called by the questionnaire session when the user moves forward from the
//! last known question. Implementations may be slow; the session keeps the
//! in-flight guard raised for the whole call.
//!
//! # Contract
//!
//! - Returns a question whose id does not occur in `history`.
//! - Makes one attempt per call.
//! - Has no effect on the session; the caller decides whether to append.
//! - A timeout enforced by the implementation is reported as
//!   [`GenerationError::Timeout`].

use async_trait::async_trait;

use crate::domain::questionnaire::{AnswerSet, Question};

pub use crate::domain::questionnaire::GenerationError;

/// Port for producing follow-up questions from the answers so far.
#[async_trait]
pub trait QuestionGenerator: Send + Sync {
    /// Requests one new question given the full question and answer history.
    async fn request_next_question(
        &self,
        history: &[Question],
        answers: &AnswerSet,
    ) -> Result<Question, GenerationError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn question_generator_is_object_safe() {
        fn _accepts_dyn(_generator: &dyn QuestionGenerator) {}
    }
}
