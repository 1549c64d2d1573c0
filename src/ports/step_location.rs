//! Step Location Port - Where the current step is shown to and read from the
//! outside (an address bar, a query string, a test double).
//!
//! The value is read raw; parsing and clamping happen in the flow controller
//! so every adapter gets the same out-of-range handling.

use crate::domain::questionnaire::Step;

/// Port for reading and publishing the current step.
pub trait StepLocation: Send + Sync {
    /// Raw step value, if one is present.
    fn read_step(&self) -> Option<String>;

    /// Publishes the step the session is now on.
    fn write_step(&self, step: Step);
}
