//! Application layer - Use cases over the questionnaire engine.
//!
//! Coordinates the domain controller with the generator and step location
//! ports and owns the only suspend point (question generation).

mod session;

pub use session::{ForwardOutcome, QuestionnaireSession};
