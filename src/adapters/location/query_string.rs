//! Step location backed by a URL query string (`?step=N`).
//!
//! Other parameters are preserved on write, in their original order.

use std::sync::{Mutex, MutexGuard};

use crate::domain::questionnaire::Step;
use crate::ports::StepLocation;

const STEP_PARAM: &str = "step";

#[derive(Debug, Default)]
pub struct QueryStringLocation {
    query: Mutex<String>,
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

impl QueryStringLocation {
    /// Accepts a query with or without the leading `?`.
    pub fn new(query: impl Into<String>) -> Self {
        let query = query.into();
        let query = query.strip_prefix('?').unwrap_or(&query).to_string();
        Self {
            query: Mutex::new(query),
        }
    }

    /// Current query string including the leading `?` (empty if no params).
    pub fn query(&self) -> String {
        let query = lock(&self.query);
        if query.is_empty() {
            String::new()
        } else {
            format!("?{}", query)
        }
    }
}

fn pairs(query: &str) -> impl Iterator<Item = (&str, &str)> {
    query
        .split('&')
        .filter(|pair| !pair.is_empty())
        .map(|pair| pair.split_once('=').unwrap_or((pair, "")))
}

impl StepLocation for QueryStringLocation {
    fn read_step(&self) -> Option<String> {
        let query = lock(&self.query);
        let found = pairs(&query)
            .find(|(key, _)| *key == STEP_PARAM)
            .map(|(_, value)| value.to_string());
        found
    }

    fn write_step(&self, step: Step) {
        let mut query = lock(&self.query);
        let mut replaced = false;
        let mut params: Vec<String> = pairs(&query)
            .filter_map(|(key, value)| {
                if key != STEP_PARAM {
                    return Some(if value.is_empty() {
                        key.to_string()
                    } else {
                        format!("{}={}", key, value)
                    });
                }
                // keep the first step param's position, drop repeats
                if replaced {
                    None
                } else {
                    replaced = true;
                    Some(format!("{}={}", STEP_PARAM, step))
                }
            })
            .collect();
        if !replaced {
            params.push(format!("{}={}", STEP_PARAM, step));
        }
        *query = params.join("&");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reads_step_param() {
        let location = QueryStringLocation::new("?ref=home&step=4");
        assert_eq!(location.read_step().as_deref(), Some("4"));
    }

    #[test]
    fn missing_param_reads_none() {
        assert_eq!(QueryStringLocation::new("?ref=home").read_step(), None);
        assert_eq!(QueryStringLocation::new("").read_step(), None);
    }

    #[test]
    fn non_numeric_value_is_returned_raw() {
        let location = QueryStringLocation::new("step=abc");
        assert_eq!(location.read_step().as_deref(), Some("abc"));
    }

    #[test]
    fn write_replaces_in_place_and_keeps_other_params() {
        let location = QueryStringLocation::new("?a=1&step=2&b=2&step=9");
        location.write_step(Step::new(5).unwrap());

        assert_eq!(location.query(), "?a=1&step=5&b=2");
    }

    #[test]
    fn write_appends_when_absent() {
        let location = QueryStringLocation::new("");
        location.write_step(Step::FIRST);
        assert_eq!(location.query(), "?step=1");

        let location = QueryStringLocation::new("?flag");
        location.write_step(Step::new(2).unwrap());
        assert_eq!(location.query(), "?flag&step=2");
    }

    #[test]
    fn reads_back_written_step_and_first_of_repeats() {
        let location = QueryStringLocation::new("?step=3&step=7");
        assert_eq!(location.read_step().as_deref(), Some("3"));

        location.write_step(Step::new(6).unwrap());
        assert_eq!(location.read_step().as_deref(), Some("6"));
    }
}
