//! Flow controller - the questionnaire state machine.
//!
//! Owns one session's flow state and answers and enforces every transition
//! rule at the transition itself:
//!
//! - **Back**: legal while step > 1.
//! - **Forward (known)**: step < len and current question answered.
//! - **Forward (frontier)**: step = len < ceiling and answered. Split into
//!   [`FlowController::begin_forward`], which hands out a
//!   [`GenerationTicket`] and raises the in-flight guard, and
//!   [`FlowController::complete_generation`], which applies or discards the
//!   generator's result.
//! - **Finish**: step = ceiling and answered.
//! - **Selection**: always legal for the current question.
//!
//! The controller never awaits; the application layer carries the ticket
//! across the generator call.

use super::{
    AnswerSet, BlockReason, CompletedQuestionnaire, FlowError, FlowState, ForwardAffordance,
    ForwardKind, GenerationError, GenerationStatus, Progress, Question, QuestionCatalog, Step,
    StepView,
};
use crate::domain::foundation::{ChoiceId, SessionId, StateMachine, Timestamp};

/// Maximum number of steps a questionnaire runs for. Also the default.
pub const MAX_CEILING: usize = 10;

/// Outcome of a forward request.
#[derive(Debug, Clone, PartialEq)]
pub enum ForwardStep {
    /// Moved onto an existing question.
    Moved(Step),
    /// At the frontier: the caller must run the generator with this ticket.
    Generate(GenerationTicket),
    /// The ceiling was reached.
    Finished(CompletedQuestionnaire),
}

/// Snapshot handed to the generator for one frontier transition.
#[derive(Debug, Clone, PartialEq)]
pub struct GenerationTicket {
    epoch: u64,
    step: Step,
    history: Vec<Question>,
    answers: AnswerSet,
}

impl GenerationTicket {
    /// Step the request was issued from.
    pub fn step(&self) -> Step {
        self.step
    }

    /// Question sequence at the time of the request.
    pub fn history(&self) -> &[Question] {
        &self.history
    }

    /// Answers at the time of the request.
    pub fn answers(&self) -> &AnswerSet {
        &self.answers
    }

    pub(crate) fn epoch(&self) -> u64 {
        self.epoch
    }
}

/// Session-scoped questionnaire state machine.
#[derive(Debug, Clone)]
pub struct FlowController {
    session_id: SessionId,
    seed: QuestionCatalog,
    flow: FlowState,
    answers: AnswerSet,
    ceiling: usize,
    generation: GenerationStatus,
    // bumped on restart/close so late generator results can be recognised
    epoch: u64,
    closed: bool,
}

impl FlowController {
    /// Starts a session over `seed` with the default ceiling of 10 steps.
    pub fn new(seed: QuestionCatalog) -> Self {
        Self::with_ceiling(seed, MAX_CEILING)
    }

    /// Starts a session over `seed` with a lower ceiling, kept in
    /// `1..=MAX_CEILING`.
    pub fn with_ceiling(seed: QuestionCatalog, ceiling: usize) -> Self {
        let flow = FlowState::new(seed.questions().to_vec());
        Self {
            session_id: SessionId::new(),
            seed,
            flow,
            answers: AnswerSet::new(),
            ceiling: ceiling.clamp(1, MAX_CEILING),
            generation: GenerationStatus::Idle,
            epoch: 0,
            closed: false,
        }
    }

    pub fn session_id(&self) -> SessionId {
        self.session_id
    }

    pub fn step(&self) -> Step {
        self.flow.step()
    }

    pub fn ceiling(&self) -> usize {
        self.ceiling
    }

    pub fn flow(&self) -> &FlowState {
        &self.flow
    }

    pub fn questions(&self) -> &[Question] {
        self.flow.questions()
    }

    pub fn answers(&self) -> &AnswerSet {
        &self.answers
    }

    pub fn generation_status(&self) -> GenerationStatus {
        self.generation
    }

    pub fn is_generating(&self) -> bool {
        self.generation.is_in_flight()
    }

    pub fn is_closed(&self) -> bool {
        self.closed
    }

    /// Question at the current step, or `None` at an unextended frontier.
    pub fn current_question(&self) -> Option<&Question> {
        self.flow.question_at(self.flow.step())
    }

    /// Stored selection for the current question; empty if none.
    pub fn current_selection(&self) -> &[ChoiceId] {
        self.current_question()
            .map(|q| self.answers.selection(q.id()))
            .unwrap_or(&[])
    }

    /// True iff the current question exists and has a non-empty answer.
    pub fn is_current_answered(&self) -> bool {
        self.current_question()
            .is_some_and(|q| self.answers.is_answered(q.id()))
    }

    /// Highest step an external location may point at.
    pub fn max_step(&self) -> usize {
        self.flow.len().min(self.ceiling)
    }

    /// Replaces the selection for the current question.
    ///
    /// Every choice id must belong to the current question. The number of
    /// choices is not checked against the multi-select flag. Allowed while a
    /// generation is in flight.
    pub fn select(&mut self, choice_ids: Vec<ChoiceId>) -> Result<(), FlowError> {
        self.ensure_open()?;
        let question = self
            .current_question()
            .ok_or(FlowError::MissingQuestion(self.step().value()))?;

        if let Some(unknown) = choice_ids.iter().find(|c| !question.has_choice(c)) {
            return Err(FlowError::UnknownChoice {
                question_id: question.id().clone(),
                choice_id: unknown.clone(),
            });
        }

        let question_id = question.id().clone();
        self.answers.record_selection(question_id, choice_ids);
        Ok(())
    }

    /// Moves one step back.
    pub fn go_back(&mut self) -> Result<Step, FlowError> {
        self.ensure_open()?;
        self.ensure_idle()?;
        let previous = self
            .step()
            .previous()
            .ok_or(FlowError::NavigationBlocked(BlockReason::AtFirstStep))?;
        self.flow.move_to(previous);
        Ok(previous)
    }

    /// Starts a forward transition.
    ///
    /// Known questions and the finish transition complete immediately. At
    /// the frontier the in-flight guard is raised and a ticket is returned;
    /// the caller must settle it with [`Self::complete_generation`] or
    /// [`Self::abandon_generation`].
    pub fn begin_forward(&mut self) -> Result<ForwardStep, FlowError> {
        self.ensure_open()?;
        self.ensure_idle()?;

        let step = self.step();
        let question = self
            .current_question()
            .ok_or(FlowError::MissingQuestion(step.value()))?;
        if !self.answers.is_answered(question.id()) {
            return Err(FlowError::NavigationBlocked(BlockReason::Unanswered(
                question.id().clone(),
            )));
        }

        if step.value() >= self.ceiling {
            return Ok(ForwardStep::Finished(self.completed()));
        }

        if step.value() < self.flow.len() {
            let next = step.next();
            self.flow.move_to(next);
            return Ok(ForwardStep::Moved(next));
        }

        self.generation = self.generation.transition_to(GenerationStatus::Pending)?;
        Ok(ForwardStep::Generate(GenerationTicket {
            epoch: self.epoch,
            step,
            history: self.flow.questions().to_vec(),
            answers: self.answers.clone(),
        }))
    }

    /// Applies the generator's result for `ticket`.
    ///
    /// On success the question is appended and the step advances onto it.
    /// On any failure (including a duplicate or malformed question) flow
    /// state is left untouched. Results for a restarted or closed session
    /// are discarded.
    pub fn complete_generation(
        &mut self,
        ticket: GenerationTicket,
        result: Result<Question, GenerationError>,
    ) -> Result<Step, FlowError> {
        if self.closed || ticket.epoch != self.epoch || !self.generation.is_in_flight() {
            return Err(FlowError::GenerationDiscarded);
        }

        let outcome = result.and_then(|question| {
            question
                .validate()
                .map_err(|e| GenerationError::invalid(e.to_string()))?;
            match self.flow.append(question) {
                Ok(()) => Ok(()),
                Err(FlowError::DuplicateQuestionId(id)) => {
                    Err(GenerationError::DuplicateQuestionId(id))
                }
                Err(other) => Err(GenerationError::invalid(other.to_string())),
            }
        });

        match outcome {
            Ok(()) => {
                self.generation = self.generation.transition_to(GenerationStatus::Succeeded)?;
                let next = ticket.step.next();
                self.flow.move_to(next);
                Ok(next)
            }
            Err(err) => {
                self.generation = self.generation.transition_to(GenerationStatus::Failed)?;
                Err(FlowError::GenerationFailed(err))
            }
        }
    }

    /// Releases the in-flight guard for a request whose result will never
    /// arrive. No-op if the ticket is stale.
    pub fn abandon_generation(&mut self, ticket_epoch: u64) {
        if ticket_epoch == self.epoch && self.generation.is_in_flight() {
            self.generation = GenerationStatus::Idle;
        }
    }

    /// Moves to an externally requested step, clamped into `1..=max_step()`.
    pub fn set_step(&mut self, requested: usize) -> Result<Step, FlowError> {
        self.ensure_open()?;
        self.ensure_idle()?;
        let step = Step::new(requested.max(1))?.at_most(self.max_step());
        self.flow.move_to(step);
        Ok(step)
    }

    /// Moves to a step read from an external location.
    ///
    /// Missing or unparseable values resolve to step 1; out-of-range values
    /// snap to the nearest bound.
    pub fn restore_step(&mut self, raw: Option<&str>) -> Result<Step, FlowError> {
        self.ensure_open()?;
        self.ensure_idle()?;
        let step = Step::clamped(raw, self.max_step());
        self.flow.move_to(step);
        Ok(step)
    }

    /// Resets answers and questions to the seed catalog at step 1.
    ///
    /// Any outstanding generation result will be discarded.
    pub fn restart(&mut self) -> Result<(), FlowError> {
        self.ensure_open()?;
        self.epoch += 1;
        self.flow = FlowState::new(self.seed.questions().to_vec());
        self.answers.clear();
        self.generation = GenerationStatus::Idle;
        Ok(())
    }

    /// Tears the session down. Every later operation fails with
    /// [`FlowError::SessionClosed`] and late generator results are dropped.
    pub fn close(&mut self) {
        self.closed = true;
        self.epoch += 1;
        self.generation = GenerationStatus::Idle;
    }

    pub fn progress(&self) -> Progress {
        Progress::new(self.step(), self.ceiling)
    }

    /// State of the forward control for the current step.
    pub fn forward_affordance(&self) -> ForwardAffordance {
        let step = self.step().value();
        let kind = if step >= self.ceiling {
            ForwardKind::Finish
        } else if step < self.flow.len() {
            ForwardKind::Advance
        } else {
            ForwardKind::Generate
        };
        let generating = self.is_generating();
        ForwardAffordance {
            kind,
            enabled: !self.closed && !generating && self.is_current_answered(),
            generating,
        }
    }

    pub fn can_go_back(&self) -> bool {
        !self.closed && !self.is_generating() && self.step().previous().is_some()
    }

    /// Render model for the current step; `None` if no question exists there.
    pub fn view(&self) -> Option<StepView> {
        let question = self.current_question()?;
        Some(StepView {
            session_id: self.session_id,
            step: self.step(),
            question: question.clone(),
            selection: self.answers.selection(question.id()).to_vec(),
            can_go_back: self.can_go_back(),
            forward: self.forward_affordance(),
            progress: self.progress(),
        })
    }

    fn completed(&self) -> CompletedQuestionnaire {
        CompletedQuestionnaire {
            session_id: self.session_id,
            questions: self.flow.questions().to_vec(),
            answers: self.answers.clone(),
            completed_at: Timestamp::now(),
        }
    }

    fn ensure_open(&self) -> Result<(), FlowError> {
        if self.closed {
            return Err(FlowError::SessionClosed);
        }
        Ok(())
    }

    fn ensure_idle(&self) -> Result<(), FlowError> {
        if self.generation.is_in_flight() {
            return Err(FlowError::GenerationInFlight);
        }
        Ok(())
    }
}
