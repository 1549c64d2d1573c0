//! Error types shared by the domain layer.

use std::fmt;
use thiserror::Error;

/// Errors that occur during value object construction.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Field '{field}' cannot be empty")]
    EmptyField { field: String },

    #[error("Field '{field}' must be between {min} and {max}, got {actual}")]
    OutOfRange {
        field: String,
        min: i64,
        max: i64,
        actual: i64,
    },

    #[error("Field '{field}' has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },

    #[error("Field '{field}' contains duplicate value '{value}'")]
    Duplicate { field: String, value: String },

    #[error("Cannot transition from {from} to {to}")]
    InvalidTransition { from: String, to: String },
}

impl ValidationError {
    /// Creates an empty field validation error.
    pub fn empty_field(field: impl Into<String>) -> Self {
        ValidationError::EmptyField { field: field.into() }
    }

    /// Creates an out of range validation error.
    pub fn out_of_range(field: impl Into<String>, min: i64, max: i64, actual: i64) -> Self {
        ValidationError::OutOfRange {
            field: field.into(),
            min,
            max,
            actual,
        }
    }

    /// Creates an invalid format validation error.
    pub fn invalid_format(field: impl Into<String>, reason: impl Into<String>) -> Self {
        ValidationError::InvalidFormat {
            field: field.into(),
            reason: reason.into(),
        }
    }

    /// Creates a duplicate value validation error.
    pub fn duplicate(field: impl Into<String>, value: impl Into<String>) -> Self {
        ValidationError::Duplicate {
            field: field.into(),
            value: value.into(),
        }
    }
}

/// Stable error codes exposed to the rendering layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    // Validation errors
    ValidationFailed,
    UnknownChoice,

    // Navigation errors
    NavigationBlocked,
    GenerationInFlight,
    StepOutOfRange,

    // Generation errors
    GenerationFailed,
    DuplicateQuestionId,
    GenerationDiscarded,
}

impl ErrorCode {
    /// Returns the wire representation of this code.
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorCode::ValidationFailed => "VALIDATION_FAILED",
            ErrorCode::UnknownChoice => "UNKNOWN_CHOICE",
            ErrorCode::NavigationBlocked => "NAVIGATION_BLOCKED",
            ErrorCode::GenerationInFlight => "GENERATION_IN_FLIGHT",
            ErrorCode::StepOutOfRange => "STEP_OUT_OF_RANGE",
            ErrorCode::GenerationFailed => "GENERATION_FAILED",
            ErrorCode::DuplicateQuestionId => "DUPLICATE_QUESTION_ID",
            ErrorCode::GenerationDiscarded => "GENERATION_DISCARDED",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validation_error_empty_field_displays_correctly() {
        let err = ValidationError::empty_field("question_id");
        assert_eq!(format!("{}", err), "Field 'question_id' cannot be empty");
    }

    #[test]
    fn validation_error_out_of_range_displays_correctly() {
        let err = ValidationError::out_of_range("max_steps", 1, 10, 80);
        assert_eq!(
            format!("{}", err),
            "Field 'max_steps' must be between 1 and 10, got 80"
        );
    }

    #[test]
    fn validation_error_duplicate_names_value() {
        let err = ValidationError::duplicate("choices", "tech");
        assert_eq!(
            format!("{}", err),
            "Field 'choices' contains duplicate value 'tech'"
        );
    }

    #[test]
    fn error_code_display_formats_correctly() {
        assert_eq!(format!("{}", ErrorCode::NavigationBlocked), "NAVIGATION_BLOCKED");
        assert_eq!(format!("{}", ErrorCode::GenerationInFlight), "GENERATION_IN_FLIGHT");
    }
}
