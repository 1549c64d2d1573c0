//! Gift Finder - Adaptive question flow engine.
//!
//! Walks a user through a short multiple-choice questionnaire, one step at a
//! time, and grows the question sequence at runtime by asking a generator for
//! follow-up questions. The questionnaire ends at a fixed step ceiling and
//! hands its answers to a results stage.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
