//! Ordered question sequence plus the current step pointer.

use super::{FlowError, Question, Step};

/// The questions known so far (seed + generated) and where the user is.
///
/// The sequence is append-only. The step pointer is moved only by the
/// flow controller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FlowState {
    questions: Vec<Question>,
    step: Step,
}

impl FlowState {
    /// Starts a flow over `questions` at the first step.
    pub fn new(questions: Vec<Question>) -> Self {
        Self {
            questions,
            step: Step::FIRST,
        }
    }

    pub fn step(&self) -> Step {
        self.step
    }

    /// Question at 1-based `step`, or `None` past the frontier.
    pub fn question_at(&self, step: Step) -> Option<&Question> {
        self.questions.get(step.index())
    }

    /// Appends a question, refusing ids already in the sequence.
    pub fn append(&mut self, question: Question) -> Result<(), FlowError> {
        if self.contains(question.id().as_str()) {
            return Err(FlowError::DuplicateQuestionId(question.id().clone()));
        }
        self.questions.push(question);
        Ok(())
    }

    pub fn contains(&self, question_id: &str) -> bool {
        self.questions.iter().any(|q| q.id().as_str() == question_id)
    }

    pub fn len(&self) -> usize {
        self.questions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }

    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    pub(crate) fn move_to(&mut self, step: Step) {
        self.step = step;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::foundation::{ChoiceId, QuestionId};
    use crate::domain::questionnaire::{Choice, Presentation};

    fn question(id: &str) -> Question {
        Question::new(
            QuestionId::new(id).unwrap(),
            format!("Question {id}"),
            Presentation::Text,
            vec![Choice::text(ChoiceId::new("yes").unwrap(), "Yes")],
        )
    }

    #[test]
    fn starts_at_first_step() {
        let flow = FlowState::new(vec![question("a")]);
        assert_eq!(flow.step(), Step::FIRST);
        assert_eq!(flow.len(), 1);
    }

    #[test]
    fn question_at_is_none_past_frontier() {
        let flow = FlowState::new(vec![question("a"), question("b")]);
        assert_eq!(flow.question_at(Step::new(2).unwrap()).unwrap().id().as_str(), "b");
        assert!(flow.question_at(Step::new(3).unwrap()).is_none());
    }

    #[test]
    fn append_grows_sequence() {
        let mut flow = FlowState::new(vec![question("a")]);
        flow.append(question("b")).unwrap();
        assert_eq!(flow.len(), 2);
        assert!(flow.contains("b"));
    }

    #[test]
    fn append_rejects_duplicate_id_without_mutation() {
        let mut flow = FlowState::new(vec![question("a"), question("b")]);
        let before = flow.clone();

        let result = flow.append(question("a"));

        assert!(matches!(result, Err(FlowError::DuplicateQuestionId(ref id)) if id.as_str() == "a"));
        assert_eq!(flow, before);
    }
}
