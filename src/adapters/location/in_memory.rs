//! In-memory step location for tests and the terminal driver.

use std::sync::{Mutex, MutexGuard};

use crate::domain::questionnaire::Step;
use crate::ports::StepLocation;

/// Holds the raw step value and remembers every write.
#[derive(Debug, Default)]
pub struct InMemoryStepLocation {
    value: Mutex<Option<String>>,
    writes: Mutex<Vec<Step>>,
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

impl InMemoryStepLocation {
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts with a raw value, as if the user had typed it.
    pub fn with_value(raw: impl Into<String>) -> Self {
        Self {
            value: Mutex::new(Some(raw.into())),
            writes: Mutex::new(Vec::new()),
        }
    }

    /// Overwrites the raw value without recording a write.
    pub fn set_raw(&self, raw: impl Into<String>) {
        *lock(&self.value) = Some(raw.into());
    }

    /// Steps written so far, oldest first.
    pub fn writes(&self) -> Vec<Step> {
        lock(&self.writes).clone()
    }

    pub fn last_written(&self) -> Option<Step> {
        lock(&self.writes).last().copied()
    }
}

impl StepLocation for InMemoryStepLocation {
    fn read_step(&self) -> Option<String> {
        lock(&self.value).clone()
    }

    fn write_step(&self, step: Step) {
        *lock(&self.value) = Some(step.to_string());
        lock(&self.writes).push(step);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_location_reads_none() {
        assert_eq!(InMemoryStepLocation::new().read_step(), None);
    }

    #[test]
    fn write_then_read() {
        let location = InMemoryStepLocation::with_value("garbage");
        location.write_step(Step::new(3).unwrap());

        assert_eq!(location.read_step().as_deref(), Some("3"));
        assert_eq!(location.last_written(), Some(Step::new(3).unwrap()));
    }

    #[test]
    fn set_raw_is_not_a_write() {
        let location = InMemoryStepLocation::new();
        location.set_raw("7");

        assert_eq!(location.read_step().as_deref(), Some("7"));
        assert!(location.writes().is_empty());
    }
}
