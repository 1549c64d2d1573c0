//! QuestionnaireSession - Use-case object driving one questionnaire.
//!
//! Owns the session's [`FlowController`] and carries frontier transitions
//! across the generator call. The controller lock is never held across an
//! await; while the generator runs, the controller's in-flight guard refuses
//! navigation but still accepts selections.

use std::sync::{Arc, Mutex, MutexGuard};

use crate::domain::foundation::{ChoiceId, ErrorCode, QuestionId, SessionId};
use crate::domain::questionnaire::{
    CompletedQuestionnaire, FlowController, FlowError, ForwardStep, Step, StepView,
};
use crate::ports::{QuestionGenerator, StepLocation};

/// Result of a successful forward request.
#[derive(Debug, Clone, PartialEq)]
pub enum ForwardOutcome {
    /// Moved onto a question that already existed.
    Moved(Step),
    /// A new question was generated and the session moved onto it.
    Generated { step: Step, question_id: QuestionId },
    /// The ceiling was reached; answers are ready for the results stage.
    Finished(CompletedQuestionnaire),
}

/// One user's questionnaire session.
#[derive(Clone)]
pub struct QuestionnaireSession {
    controller: Arc<Mutex<FlowController>>,
    generator: Arc<dyn QuestionGenerator>,
    location: Arc<dyn StepLocation>,
}

fn lock(controller: &Mutex<FlowController>) -> MutexGuard<'_, FlowController> {
    controller
        .lock()
        .unwrap_or_else(|poisoned| poisoned.into_inner())
}

impl QuestionnaireSession {
    /// Starts a session, resuming at the step found in `location`.
    pub fn new(
        controller: FlowController,
        generator: Arc<dyn QuestionGenerator>,
        location: Arc<dyn StepLocation>,
    ) -> Result<Self, FlowError> {
        let session = Self {
            controller: Arc::new(Mutex::new(controller)),
            generator,
            location,
        };
        session.sync_from_location()?;

        tracing::info!(
            session_id = %session.session_id(),
            step = session.step().value(),
            "Questionnaire session started"
        );

        Ok(session)
    }

    pub fn session_id(&self) -> SessionId {
        lock(&self.controller).session_id()
    }

    pub fn step(&self) -> Step {
        lock(&self.controller).step()
    }

    pub fn is_generating(&self) -> bool {
        lock(&self.controller).is_generating()
    }

    /// Render model for the current step.
    pub fn view(&self) -> Option<StepView> {
        lock(&self.controller).view()
    }

    /// Runs `f` against the controller state.
    pub fn inspect<R>(&self, f: impl FnOnce(&FlowController) -> R) -> R {
        f(&lock(&self.controller))
    }

    /// Replaces the selection for the current question.
    pub fn select(&self, choice_ids: Vec<ChoiceId>) -> Result<(), FlowError> {
        let mut controller = lock(&self.controller);
        let count = choice_ids.len();
        controller.select(choice_ids)?;

        tracing::debug!(
            session_id = %controller.session_id(),
            step = controller.step().value(),
            selected = count,
            "Selection recorded"
        );
        Ok(())
    }

    /// Moves one step back.
    pub fn back(&self) -> Result<Step, FlowError> {
        let mut controller = lock(&self.controller);
        let step = controller.go_back().map_err(|err| {
            log_refusal(controller.session_id(), controller.step(), &err);
            err
        })?;
        self.location.write_step(step);

        tracing::info!(session_id = %controller.session_id(), step = step.value(), "Moved back");
        Ok(step)
    }

    /// Moves forward, generating the next question first when at the frontier.
    ///
    /// Dropping the returned future while a generation is outstanding releases
    /// the in-flight guard; the late result is never applied.
    pub async fn forward(&self) -> Result<ForwardOutcome, FlowError> {
        let (ticket, session_id) = {
            let mut controller = lock(&self.controller);
            let session_id = controller.session_id();
            match controller.begin_forward() {
                Ok(ForwardStep::Moved(step)) => {
                    self.location.write_step(step);
                    tracing::info!(session_id = %session_id, step = step.value(), "Moved forward");
                    return Ok(ForwardOutcome::Moved(step));
                }
                Ok(ForwardStep::Finished(completed)) => {
                    tracing::info!(
                        session_id = %session_id,
                        questions = completed.questions.len(),
                        answers = completed.answers.len(),
                        "Questionnaire finished"
                    );
                    return Ok(ForwardOutcome::Finished(completed));
                }
                Ok(ForwardStep::Generate(ticket)) => (ticket, session_id),
                Err(err) => {
                    log_refusal(session_id, controller.step(), &err);
                    return Err(err);
                }
            }
        };

        tracing::info!(
            session_id = %session_id,
            step = ticket.step().value(),
            history_len = ticket.history().len(),
            "Generating next question"
        );

        let guard = InFlightGuard::new(Arc::clone(&self.controller), ticket.epoch());
        let result = self
            .generator
            .request_next_question(ticket.history(), ticket.answers())
            .await;
        guard.disarm();

        let mut controller = lock(&self.controller);
        match controller.complete_generation(ticket, result) {
            Ok(step) => {
                self.location.write_step(step);
                let question_id = controller
                    .current_question()
                    .map(|q| q.id().clone())
                    .ok_or(FlowError::MissingQuestion(step.value()))?;
                tracing::info!(
                    session_id = %session_id,
                    step = step.value(),
                    question_id = %question_id,
                    "Generated question appended"
                );
                Ok(ForwardOutcome::Generated { step, question_id })
            }
            Err(err) => {
                tracing::warn!(
                    session_id = %session_id,
                    code = %err.code(),
                    retryable = err.is_retryable(),
                    error = %err,
                    "Question generation did not advance the session"
                );
                Err(err)
            }
        }
    }

    /// Jumps to an externally requested step, clamped into range.
    pub fn set_step(&self, requested: usize) -> Result<Step, FlowError> {
        let mut controller = lock(&self.controller);
        let step = controller.set_step(requested)?;
        if step.value() != requested {
            tracing::warn!(
                session_id = %controller.session_id(),
                code = %ErrorCode::StepOutOfRange,
                requested,
                step = step.value(),
                "Requested step clamped"
            );
        }
        self.location.write_step(step);
        Ok(step)
    }

    /// Re-reads the step from the location (for example after the user edited
    /// the address) and writes back the clamped value.
    pub fn sync_from_location(&self) -> Result<Step, FlowError> {
        let raw = self.location.read_step();
        let mut controller = lock(&self.controller);
        let step = controller.restore_step(raw.as_deref())?;

        if let Some(raw) = raw.as_deref().filter(|raw| raw.trim() != step.to_string()) {
            tracing::warn!(
                session_id = %controller.session_id(),
                code = %ErrorCode::StepOutOfRange,
                raw,
                step = step.value(),
                "Step from location clamped"
            );
        }
        self.location.write_step(step);
        Ok(step)
    }

    /// Clears all answers and returns to the seed catalog at step 1.
    pub fn restart(&self) -> Result<(), FlowError> {
        let mut controller = lock(&self.controller);
        controller.restart()?;
        self.location.write_step(Step::FIRST);

        tracing::info!(session_id = %controller.session_id(), "Questionnaire restarted");
        Ok(())
    }

    /// Tears the session down; any outstanding generation is discarded.
    pub fn close(&self) {
        let mut controller = lock(&self.controller);
        controller.close();
        tracing::info!(session_id = %controller.session_id(), "Questionnaire session closed");
    }
}

fn log_refusal(session_id: SessionId, step: Step, err: &FlowError) {
    tracing::debug!(
        session_id = %session_id,
        step = step.value(),
        code = %err.code(),
        reason = %err,
        "Navigation refused"
    );
}

/// Releases the in-flight guard if a forward future is dropped mid-generation.
struct InFlightGuard {
    controller: Arc<Mutex<FlowController>>,
    epoch: u64,
    armed: bool,
}

impl InFlightGuard {
    fn new(controller: Arc<Mutex<FlowController>>, epoch: u64) -> Self {
        Self {
            controller,
            epoch,
            armed: true,
        }
    }

    fn disarm(mut self) {
        self.armed = false;
    }
}

impl Drop for InFlightGuard {
    fn drop(&mut self) {
        if self.armed {
            let mut controller = lock(&self.controller);
            controller.abandon_generation(self.epoch);
            tracing::warn!(
                session_id = %controller.session_id(),
                code = %ErrorCode::GenerationDiscarded,
                "Generation abandoned before completion"
            );
        }
    }
}
