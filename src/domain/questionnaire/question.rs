//! Question definitions.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;

use super::Choice;
use crate::domain::foundation::{ChoiceId, QuestionId, ValidationError};

/// Presentation variant of a question. Only the rendering layer cares.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Presentation {
    Image,
    Text,
}

/// A single questionnaire step: prompt plus ordered choices.
///
/// Serialized in the same shape the suggestion generator and catalog files
/// use: `{ "id", "question", "type", "multiSelect", "choices" }`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Question {
    id: QuestionId,
    #[serde(rename = "question")]
    prompt: String,
    #[serde(rename = "type")]
    presentation: Presentation,
    #[serde(default)]
    multi_select: bool,
    choices: Vec<Choice>,
}

impl Question {
    /// Creates a single-select question.
    pub fn new(
        id: QuestionId,
        prompt: impl Into<String>,
        presentation: Presentation,
        choices: Vec<Choice>,
    ) -> Self {
        Self {
            id,
            prompt: prompt.into(),
            presentation,
            multi_select: false,
            choices,
        }
    }

    /// Sets whether several choices may be selected at once.
    pub fn with_multi_select(mut self, multi_select: bool) -> Self {
        self.multi_select = multi_select;
        self
    }

    pub fn id(&self) -> &QuestionId {
        &self.id
    }

    pub fn prompt(&self) -> &str {
        &self.prompt
    }

    pub fn presentation(&self) -> Presentation {
        self.presentation
    }

    pub fn is_multi_select(&self) -> bool {
        self.multi_select
    }

    pub fn choices(&self) -> &[Choice] {
        &self.choices
    }

    /// Looks up a choice by id.
    pub fn choice(&self, id: &ChoiceId) -> Option<&Choice> {
        self.choices.iter().find(|c| c.id() == id)
    }

    /// Returns true if `id` names one of this question's choices.
    pub fn has_choice(&self, id: &ChoiceId) -> bool {
        self.choice(id).is_some()
    }

    /// Checks the structural shape of the question.
    ///
    /// Requires a non-blank prompt, at least one choice and choice ids that
    /// are unique within the question. Image questions need an image on every
    /// choice. Wording is not inspected.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.prompt.trim().is_empty() {
            return Err(ValidationError::empty_field("question"));
        }
        if self.choices.is_empty() {
            return Err(ValidationError::empty_field("choices"));
        }
        let mut seen = HashSet::with_capacity(self.choices.len());
        for choice in &self.choices {
            if !seen.insert(choice.id()) {
                return Err(ValidationError::duplicate("choices", choice.id().as_str()));
            }
            if self.presentation == Presentation::Image && choice.image_ref().is_none() {
                return Err(ValidationError::invalid_format(
                    "choices",
                    format!("image question choice '{}' has no image", choice.id()),
                ));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cid(s: &str) -> ChoiceId {
        ChoiceId::new(s).unwrap()
    }

    fn hobbies() -> Question {
        Question::new(
            QuestionId::new("hobbies").unwrap(),
            "What do they do on weekends?",
            Presentation::Text,
            vec![
                Choice::text(cid("hiking"), "Hiking"),
                Choice::text(cid("gaming"), "Gaming"),
            ],
        )
    }

    #[test]
    fn new_question_is_single_select() {
        let question = hobbies();
        assert!(!question.is_multi_select());
        assert!(question.with_multi_select(true).is_multi_select());
    }

    #[test]
    fn has_choice_only_matches_own_choices() {
        let question = hobbies();
        assert!(question.has_choice(&cid("hiking")));
        assert!(!question.has_choice(&cid("cooking")));
    }

    #[test]
    fn validate_accepts_well_formed_question() {
        assert!(hobbies().validate().is_ok());
    }

    #[test]
    fn validate_rejects_missing_choices() {
        let question = Question::new(
            QuestionId::new("empty").unwrap(),
            "Anything?",
            Presentation::Text,
            vec![],
        );
        assert_eq!(
            question.validate(),
            Err(ValidationError::empty_field("choices"))
        );
    }

    #[test]
    fn validate_rejects_duplicate_choice_ids() {
        let question = Question::new(
            QuestionId::new("dup").unwrap(),
            "Pick one",
            Presentation::Text,
            vec![
                Choice::text(cid("a"), "A"),
                Choice::text(cid("a"), "Also A"),
            ],
        );
        assert!(matches!(
            question.validate(),
            Err(ValidationError::Duplicate { .. })
        ));
    }

    #[test]
    fn validate_rejects_image_question_with_text_choice() {
        let question = Question::new(
            QuestionId::new("looks").unwrap(),
            "Which fits?",
            Presentation::Image,
            vec![
                Choice::image(cid("a"), "A", "/images/a.jpg"),
                Choice::text(cid("b"), "B"),
            ],
        );
        assert!(matches!(
            question.validate(),
            Err(ValidationError::InvalidFormat { .. })
        ));
    }

    #[test]
    fn deserializes_generator_shape() {
        let json = r#"{
            "id": "style",
            "question": "Which style fits them best?",
            "type": "image",
            "multiSelect": true,
            "choices": [
                {"id": "classic", "title": "Classic", "image": "/styles/classic.jpg"},
                {"id": "modern", "title": "Modern", "image": "/styles/modern.jpg"}
            ]
        }"#;
        let question: Question = serde_json::from_str(json).unwrap();

        assert_eq!(question.id().as_str(), "style");
        assert_eq!(question.presentation(), Presentation::Image);
        assert!(question.is_multi_select());
        assert_eq!(question.choices().len(), 2);
    }

    #[test]
    fn multi_select_defaults_to_false_when_absent() {
        let json = r#"{"id":"q","question":"?","type":"text","choices":[{"id":"x","title":"X"}]}"#;
        let question: Question = serde_json::from_str(json).unwrap();
        assert!(!question.is_multi_select());
    }
}
