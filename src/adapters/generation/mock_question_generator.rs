//! Scripted question generator for tests and offline runs.
//!
//! Queued outcomes are returned in order. Once the script runs out the mock
//! falls back to a small set of canned follow-up questions, always picking an
//! id that is not yet in the history.

use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;
use tokio::sync::Notify;
use tokio::time::sleep;

use crate::domain::foundation::{ChoiceId, QuestionId};
use crate::domain::questionnaire::{AnswerSet, Choice, Presentation, Question};
use crate::ports::{GenerationError, QuestionGenerator};

/// (id, prompt, choices) for the offline follow-ups.
const FOLLOW_UPS: &[(&str, &str, &[(&str, &str)])] = &[
    (
        "style",
        "How would you describe their style?",
        &[
            ("classic", "Classic"),
            ("modern", "Modern"),
            ("quirky", "Quirky"),
            ("minimal", "Minimal"),
        ],
    ),
    (
        "experience-or-object",
        "Would they prefer something to do or something to keep?",
        &[
            ("experience", "An experience"),
            ("object", "Something to keep"),
            ("either", "Either works"),
        ],
    ),
    (
        "personalised",
        "Should the gift be personalised?",
        &[("yes", "Yes"), ("no", "No"), ("unsure", "Not sure")],
    ),
];

/// Scripted generator.
#[derive(Debug, Clone, Default)]
pub struct MockQuestionGenerator {
    script: Arc<Mutex<VecDeque<Result<Question, GenerationError>>>>,
    delay: Duration,
    /// When set, each call waits for a permit before answering.
    gate: Option<Arc<Notify>>,
    /// History length seen by each call.
    calls: Arc<Mutex<Vec<usize>>>,
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

impl MockQuestionGenerator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queues a question to return.
    pub fn with_question(self, question: Question) -> Self {
        lock(&self.script).push_back(Ok(question));
        self
    }

    /// Queues a failure to return.
    pub fn with_failure(self, error: GenerationError) -> Self {
        lock(&self.script).push_back(Err(error));
        self
    }

    /// Simulated latency per call.
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    /// Holds every call until `gate` hands out a permit.
    pub fn with_gate(mut self, gate: Arc<Notify>) -> Self {
        self.gate = Some(gate);
        self
    }

    pub fn call_count(&self) -> usize {
        lock(&self.calls).len()
    }

    /// History length passed to each call, in call order.
    pub fn history_lengths(&self) -> Vec<usize> {
        lock(&self.calls).clone()
    }

    fn fallback(history: &[Question]) -> Question {
        let taken = |id: &str| history.iter().any(|q| q.id().as_str() == id);

        if let Some((id, prompt, choices)) = FOLLOW_UPS.iter().find(|(id, _, _)| !taken(id)) {
            let choices = choices
                .iter()
                .map(|(choice_id, title)| Choice::text(ChoiceId::from_static(*choice_id), *title))
                .collect();
            return Question::new(QuestionId::from_static(*id), *prompt, Presentation::Text, choices);
        }

        let n = (history.len() + 1..)
            .find(|n| !taken(QuestionId::numbered("follow-up", *n).as_str()))
            .unwrap_or(history.len() + 1);
        Question::new(
            QuestionId::numbered("follow-up", n),
            format!("Anything else that matters? ({})", n),
            Presentation::Text,
            vec![
                Choice::text(ChoiceId::from_static("yes"), "Yes"),
                Choice::text(ChoiceId::from_static("no"), "No"),
            ],
        )
    }
}

#[async_trait]
impl QuestionGenerator for MockQuestionGenerator {
    async fn request_next_question(
        &self,
        history: &[Question],
        _answers: &AnswerSet,
    ) -> Result<Question, GenerationError> {
        lock(&self.calls).push(history.len());

        if !self.delay.is_zero() {
            sleep(self.delay).await;
        }
        if let Some(gate) = &self.gate {
            gate.notified().await;
        }

        let scripted = lock(&self.script).pop_front();
        scripted.unwrap_or_else(|| Ok(Self::fallback(history)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::questionnaire::QuestionCatalog;

    fn question(id: &str) -> Question {
        Question::new(
            QuestionId::new(id).unwrap(),
            "Pick one",
            Presentation::Text,
            vec![Choice::text(ChoiceId::new("a").unwrap(), "A")],
        )
    }

    #[tokio::test]
    async fn returns_script_in_order() {
        let gen = MockQuestionGenerator::new()
            .with_question(question("first"))
            .with_failure(GenerationError::provider("boom", true));

        let first = gen.request_next_question(&[], &AnswerSet::new()).await;
        let second = gen.request_next_question(&[], &AnswerSet::new()).await;

        assert_eq!(first.unwrap().id().as_str(), "first");
        assert!(second.is_err());
        assert_eq!(gen.call_count(), 2);
    }

    #[tokio::test]
    async fn gated_call_waits_for_permit() {
        let gate = Arc::new(Notify::new());
        let gen = MockQuestionGenerator::new()
            .with_question(question("held"))
            .with_gate(gate.clone());

        let pending = tokio::spawn({
            let gen = gen.clone();
            async move { gen.request_next_question(&[], &AnswerSet::new()).await }
        });
        while gen.call_count() == 0 {
            tokio::task::yield_now().await;
        }
        assert!(!pending.is_finished());

        gate.notify_one();
        assert_eq!(pending.await.unwrap().unwrap().id().as_str(), "held");
    }

    #[tokio::test]
    async fn fallback_ids_are_fresh() {
        let gen = MockQuestionGenerator::new();
        let mut history = QuestionCatalog::gift_finder().questions().to_vec();

        for _ in 0..6 {
            let next = gen
                .request_next_question(&history, &AnswerSet::new())
                .await
                .unwrap();
            assert!(history.iter().all(|q| q.id() != next.id()));
            assert!(next.validate().is_ok());
            history.push(next);
        }

        assert_eq!(gen.history_lengths(), vec![4, 5, 6, 7, 8, 9]);
    }
}
