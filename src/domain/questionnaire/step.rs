//! 1-based step pointer.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::domain::foundation::ValidationError;

/// Position in the question sequence, starting at 1.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "usize", into = "usize")]
pub struct Step(usize);

impl Step {
    pub const FIRST: Step = Step(1);

    /// Creates a step, rejecting zero.
    pub fn new(value: usize) -> Result<Self, ValidationError> {
        if value == 0 {
            return Err(ValidationError::out_of_range("step", 1, i64::MAX, 0));
        }
        Ok(Self(value))
    }

    pub fn value(&self) -> usize {
        self.0
    }

    /// Zero-based position in the question sequence.
    pub fn index(&self) -> usize {
        self.0 - 1
    }

    pub fn next(&self) -> Step {
        Step(self.0 + 1)
    }

    /// Previous step, or `None` at the first step.
    pub fn previous(&self) -> Option<Step> {
        (self.0 > 1).then(|| Step(self.0 - 1))
    }

    /// Resolves an externally supplied step into `1..=max`.
    ///
    /// Missing or unparseable input resolves to the first step; numbers
    /// outside the range snap to the nearest bound.
    pub fn clamped(raw: Option<&str>, max: usize) -> Step {
        let upper = max.max(1);
        match raw.map(|r| r.trim().parse::<i64>()) {
            Some(Ok(n)) if n > upper as i64 => Step(upper),
            Some(Ok(n)) if n >= 1 => Step(n as usize),
            _ => Step::FIRST,
        }
    }

    /// Caps this step at `max` (never below the first step).
    pub fn at_most(self, max: usize) -> Step {
        Step(self.0.min(max.max(1)))
    }
}

impl Default for Step {
    fn default() -> Self {
        Step::FIRST
    }
}

impl TryFrom<usize> for Step {
    type Error = ValidationError;

    fn try_from(value: usize) -> Result<Self, Self::Error> {
        Step::new(value)
    }
}

impl From<Step> for usize {
    fn from(step: Step) -> Self {
        step.0
    }
}

impl fmt::Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn step_zero_is_rejected() {
        assert!(Step::new(0).is_err());
        assert_eq!(Step::new(3).unwrap().index(), 2);
    }

    #[test]
    fn previous_stops_at_first() {
        assert_eq!(Step::FIRST.previous(), None);
        assert_eq!(Step::new(2).unwrap().previous(), Some(Step::FIRST));
    }

    #[test]
    fn clamped_defaults_to_first_for_missing_or_garbage() {
        assert_eq!(Step::clamped(None, 5), Step::FIRST);
        assert_eq!(Step::clamped(Some("abc"), 5), Step::FIRST);
        assert_eq!(Step::clamped(Some(""), 5), Step::FIRST);
    }

    #[test]
    fn clamped_snaps_to_nearest_bound() {
        assert_eq!(Step::clamped(Some("0"), 5), Step::FIRST);
        assert_eq!(Step::clamped(Some("-4"), 5), Step::FIRST);
        assert_eq!(Step::clamped(Some("9"), 5).value(), 5);
        assert_eq!(Step::clamped(Some(" 3 "), 5).value(), 3);
    }

    #[test]
    fn at_most_caps_value() {
        assert_eq!(Step::new(12).unwrap().at_most(10).value(), 10);
        assert_eq!(Step::new(4).unwrap().at_most(10).value(), 4);
    }
}
