//! Seed question catalog.
//!
//! The catalog is the fixed, ordered list of questions a session starts
//! with. It ships with a built-in gift finder catalog and can also be read
//! from YAML or JSON files that use the generator's question shape.

use once_cell::sync::Lazy;
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use thiserror::Error;

use super::{Choice, Presentation, Question};
use crate::domain::foundation::{ChoiceId, QuestionId, ValidationError};

/// Errors raised while building or loading a catalog.
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("catalog must contain at least one question")]
    Empty,

    #[error("question '{id}' is malformed: {source}")]
    InvalidQuestion {
        id: QuestionId,
        #[source]
        source: ValidationError,
    },

    #[error("question id '{0}' appears more than once")]
    DuplicateQuestionId(QuestionId),

    #[error("failed to read catalog {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid YAML catalog: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("invalid JSON catalog: {0}")]
    Json(#[from] serde_json::Error),

    #[error("unsupported catalog format: {0} (expected .yaml, .yml or .json)")]
    UnsupportedFormat(PathBuf),
}

/// Fixed, ordered seed sequence of questions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuestionCatalog {
    questions: Vec<Question>,
}

impl QuestionCatalog {
    /// Builds a catalog, checking it is non-empty with unique, well-formed questions.
    pub fn new(questions: Vec<Question>) -> Result<Self, CatalogError> {
        if questions.is_empty() {
            return Err(CatalogError::Empty);
        }
        let mut seen = HashSet::with_capacity(questions.len());
        for question in &questions {
            question
                .validate()
                .map_err(|source| CatalogError::InvalidQuestion {
                    id: question.id().clone(),
                    source,
                })?;
            if !seen.insert(question.id()) {
                return Err(CatalogError::DuplicateQuestionId(question.id().clone()));
            }
        }
        Ok(Self { questions })
    }

    /// The built-in gift finder catalog.
    pub fn gift_finder() -> Self {
        Self {
            questions: GIFT_FINDER_SEED.clone(),
        }
    }

    pub fn from_yaml_str(yaml: &str) -> Result<Self, CatalogError> {
        let questions: Vec<Question> = serde_yaml::from_str(yaml)?;
        Self::new(questions)
    }

    pub fn from_json_str(json: &str) -> Result<Self, CatalogError> {
        let questions: Vec<Question> = serde_json::from_str(json)?;
        Self::new(questions)
    }

    /// Loads a catalog file, picking the format from its extension.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, CatalogError> {
        let path = path.as_ref();
        let extension = path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_ascii_lowercase);

        let read = || {
            std::fs::read_to_string(path).map_err(|source| CatalogError::Io {
                path: path.to_path_buf(),
                source,
            })
        };

        match extension.as_deref() {
            Some("yaml") | Some("yml") => Self::from_yaml_str(&read()?),
            Some("json") => Self::from_json_str(&read()?),
            _ => Err(CatalogError::UnsupportedFormat(path.to_path_buf())),
        }
    }

    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    pub fn len(&self) -> usize {
        self.questions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }
}

impl Default for QuestionCatalog {
    fn default() -> Self {
        Self::gift_finder()
    }
}

fn image_choice(id: &'static str, title: &str, image: &str) -> Choice {
    Choice::image(ChoiceId::from_static(id), title, image)
}

fn text_choice(id: &'static str, title: &str) -> Choice {
    Choice::text(ChoiceId::from_static(id), title)
}

static GIFT_FINDER_SEED: Lazy<Vec<Question>> = Lazy::new(|| {
    vec![
        Question::new(
            QuestionId::from_static("recipient"),
            "Who are you shopping for?",
            Presentation::Image,
            vec![
                image_choice("partner", "Partner", "/images/recipients/partner.jpg"),
                image_choice("parent", "Parent", "/images/recipients/parent.jpg"),
                image_choice("friend", "Friend", "/images/recipients/friend.jpg"),
                image_choice("child", "Child", "/images/recipients/child.jpg"),
                image_choice("sibling", "Sibling", "/images/recipients/sibling.jpg"),
                image_choice("colleague", "Colleague", "/images/recipients/colleague.jpg"),
            ],
        ),
        Question::new(
            QuestionId::from_static("occasion"),
            "What's the occasion?",
            Presentation::Text,
            vec![
                text_choice("birthday", "Birthday"),
                text_choice("anniversary", "Anniversary"),
                text_choice("holiday", "Holiday"),
                text_choice("graduation", "Graduation"),
                text_choice("thank-you", "Thank you"),
                text_choice("just-because", "Just because"),
            ],
        ),
        Question::new(
            QuestionId::from_static("interests"),
            "What are they into?",
            Presentation::Image,
            vec![
                image_choice("tech", "Tech & gadgets", "/images/interests/tech.jpg"),
                image_choice("cooking", "Cooking", "/images/interests/cooking.jpg"),
                image_choice("outdoors", "Outdoors", "/images/interests/outdoors.jpg"),
                image_choice("reading", "Reading", "/images/interests/reading.jpg"),
                image_choice("fitness", "Fitness", "/images/interests/fitness.jpg"),
                image_choice("music", "Music", "/images/interests/music.jpg"),
                image_choice("art", "Art & crafts", "/images/interests/art.jpg"),
                image_choice("travel", "Travel", "/images/interests/travel.jpg"),
            ],
        )
        .with_multi_select(true),
        Question::new(
            QuestionId::from_static("budget"),
            "What's your budget?",
            Presentation::Text,
            vec![
                text_choice("under-25", "Under $25"),
                text_choice("25-50", "$25 - $50"),
                text_choice("50-100", "$50 - $100"),
                text_choice("100-250", "$100 - $250"),
                text_choice("over-250", "Over $250"),
            ],
        ),
    ]
});
