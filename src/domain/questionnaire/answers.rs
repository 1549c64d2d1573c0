//! Answer store: selected choices per question.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::domain::foundation::{ChoiceId, QuestionId};

/// Mapping from question id to the choices currently selected for it.
///
/// A missing key means the question has not been answered yet. An empty
/// selection may be stored transiently (the user cleared their choice) and
/// never counts as an answer.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AnswerSet {
    selections: BTreeMap<QuestionId, Vec<ChoiceId>>,
}

impl AnswerSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the full selection for `question_id`.
    ///
    /// Length is not checked against the question's multi-select flag and
    /// duplicates are kept as given.
    pub fn record_selection(&mut self, question_id: QuestionId, choice_ids: Vec<ChoiceId>) {
        self.selections.insert(question_id, choice_ids);
    }

    /// Drops every stored selection.
    pub fn clear(&mut self) {
        self.selections.clear();
    }

    /// True iff a non-empty selection is stored for `question_id`.
    pub fn is_answered(&self, question_id: &QuestionId) -> bool {
        self.selections
            .get(question_id)
            .is_some_and(|choices| !choices.is_empty())
    }

    /// Stored selection for `question_id`; empty if none.
    pub fn selection(&self, question_id: &QuestionId) -> &[ChoiceId] {
        self.selections
            .get(question_id)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Number of questions with a stored (possibly empty) selection.
    pub fn len(&self) -> usize {
        self.selections.len()
    }

    pub fn is_empty(&self) -> bool {
        self.selections.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&QuestionId, &[ChoiceId])> {
        self.selections.iter().map(|(q, c)| (q, c.as_slice()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn qid(s: &str) -> QuestionId {
        QuestionId::new(s).unwrap()
    }

    fn choices(ids: &[&str]) -> Vec<ChoiceId> {
        ids.iter().map(|s| ChoiceId::new(*s).unwrap()).collect()
    }

    #[test]
    fn unanswered_by_default() {
        let answers = AnswerSet::new();
        assert!(!answers.is_answered(&qid("recipient")));
        assert!(answers.selection(&qid("recipient")).is_empty());
    }

    #[test]
    fn record_selection_replaces_previous_set() {
        let mut answers = AnswerSet::new();
        answers.record_selection(qid("interests"), choices(&["tech", "books"]));
        answers.record_selection(qid("interests"), choices(&["music"]));

        assert_eq!(answers.selection(&qid("interests")), choices(&["music"]).as_slice());
        assert_eq!(answers.len(), 1);
    }

    #[test]
    fn empty_selection_is_not_an_answer() {
        let mut answers = AnswerSet::new();
        answers.record_selection(qid("budget"), choices(&["under-25"]));
        answers.record_selection(qid("budget"), vec![]);

        assert!(!answers.is_answered(&qid("budget")));
    }

    #[test]
    fn duplicates_are_kept_verbatim() {
        let mut answers = AnswerSet::new();
        answers.record_selection(qid("occasion"), choices(&["birthday", "birthday"]));
        assert_eq!(answers.selection(&qid("occasion")).len(), 2);
    }

    #[test]
    fn clear_removes_everything() {
        let mut answers = AnswerSet::new();
        answers.record_selection(qid("a"), choices(&["x"]));
        answers.record_selection(qid("b"), choices(&["y"]));
        answers.clear();

        assert!(answers.is_empty());
        assert!(!answers.is_answered(&qid("a")));
    }

    #[test]
    fn serializes_as_plain_map() {
        let mut answers = AnswerSet::new();
        answers.record_selection(qid("recipient"), choices(&["partner"]));
        let json = serde_json::to_string(&answers).unwrap();
        assert_eq!(json, r#"{"recipient":["partner"]}"#);
    }
}
