//! Adaptive question flow engine.
//!
//! A session walks an ordered, append-only sequence of questions (the seed
//! catalog plus anything generated at runtime), storing one selection per
//! question and refusing to move forward past an unanswered question.
//!
//! - `choice`, `question` - immutable question definitions
//! - `answers` - per-question selections
//! - `flow_state` - question sequence and step pointer
//! - `catalog` - seed catalogs (built-in, YAML, JSON)
//! - `controller` - the transition rules

mod answers;
mod catalog;
mod choice;
mod controller;
mod errors;
mod flow_state;
mod generation_status;
mod question;
mod step;
mod view;

pub use answers::AnswerSet;
pub use catalog::{CatalogError, QuestionCatalog};
pub use choice::Choice;
pub use controller::{FlowController, ForwardStep, GenerationTicket, MAX_CEILING};
pub use errors::{BlockReason, FlowError, GenerationError};
pub use flow_state::FlowState;
pub use generation_status::GenerationStatus;
pub use question::{Presentation, Question};
pub use step::Step;
pub use view::{CompletedQuestionnaire, ForwardAffordance, ForwardKind, Progress, StepView};
