//! Read models handed to the rendering layer.

use serde::Serialize;

use super::{AnswerSet, Question, Step};
use crate::domain::foundation::{ChoiceId, Percentage, SessionId, Timestamp};

/// What the forward control would do if pressed now.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ForwardKind {
    /// Move to a question that already exists.
    Advance,
    /// Ask the generator for the next question, then move to it.
    Generate,
    /// The ceiling is reached; hand the answers to the results stage.
    Finish,
}

/// State of the forward control.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ForwardAffordance {
    pub kind: ForwardKind,
    pub enabled: bool,
    pub generating: bool,
}

impl ForwardAffordance {
    pub fn label(&self) -> &'static str {
        if self.generating {
            "Generating..."
        } else if self.kind == ForwardKind::Finish {
            "Finish"
        } else {
            "Next"
        }
    }
}

/// Position within the questionnaire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Progress {
    pub step: Step,
    pub total: usize,
    pub percent: Percentage,
}

impl Progress {
    pub fn new(step: Step, total: usize) -> Self {
        Self {
            step,
            total,
            percent: Percentage::of(step.value(), total),
        }
    }
}

/// Everything needed to render one step.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StepView {
    pub session_id: SessionId,
    pub step: Step,
    pub question: Question,
    pub selection: Vec<ChoiceId>,
    pub can_go_back: bool,
    pub forward: ForwardAffordance,
    pub progress: Progress,
}

/// Final answers handed to the results stage.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CompletedQuestionnaire {
    pub session_id: SessionId,
    pub questions: Vec<Question>,
    pub answers: AnswerSet,
    pub completed_at: Timestamp,
}
