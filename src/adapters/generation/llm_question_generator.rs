//! LLM-backed question generator.
//!
//! Describes the questions asked so far and the answers given to an
//! [`AIProvider`] and asks for one more question as JSON in the catalog wire
//! shape. The reply is parsed, checked for structure and checked against the
//! history for id reuse before it is handed back.

use async_trait::async_trait;
use std::sync::Arc;
use std::time::Duration;
use uuid::Uuid;

use crate::domain::questionnaire::{AnswerSet, Question};
use crate::ports::{
    AIError, AIProvider, CompletionRequest, FinishReason, GenerationError, MessageRole,
    QuestionGenerator, RequestMetadata,
};

const SYSTEM_PROMPT: &str = "You help people find a gift by asking one short multiple-choice \
question at a time. Given the questions already asked and the answers chosen, write the single \
most useful next question. Reply with one JSON object and nothing else, shaped as \
{\"id\": string, \"question\": string, \"type\": \"text\", \"multiSelect\": boolean, \
\"choices\": [{\"id\": string, \"title\": string}]}. The id must be a new lowercase slug not \
used by any earlier question. Offer between 3 and 8 choices with distinct ids.";

/// Settings for one generator instance.
#[derive(Debug, Clone, PartialEq)]
pub struct LlmGeneratorConfig {
    /// Upper bound for one provider call.
    pub timeout: Duration,
    pub temperature: f32,
    pub max_tokens: u32,
}

impl Default for LlmGeneratorConfig {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(30),
            temperature: 0.7,
            max_tokens: 1024,
        }
    }
}

/// Question generator backed by a language model.
pub struct LlmQuestionGenerator {
    provider: Arc<dyn AIProvider>,
    config: LlmGeneratorConfig,
}

impl LlmQuestionGenerator {
    pub fn new(provider: Arc<dyn AIProvider>, config: LlmGeneratorConfig) -> Self {
        Self { provider, config }
    }

    fn build_request(&self, history: &[Question], answers: &AnswerSet) -> CompletionRequest {
        CompletionRequest::new(RequestMetadata::new(Uuid::new_v4().to_string()))
            .with_system_prompt(SYSTEM_PROMPT)
            .with_message(MessageRole::User, describe_history(history, answers))
            .with_max_tokens(self.config.max_tokens)
            .with_temperature(self.config.temperature)
    }
}

#[async_trait]
impl QuestionGenerator for LlmQuestionGenerator {
    async fn request_next_question(
        &self,
        history: &[Question],
        answers: &AnswerSet,
    ) -> Result<Question, GenerationError> {
        let request = self.build_request(history, answers);
        let trace_id = request.metadata.trace_id.clone();

        tracing::debug!(
            trace_id = %trace_id,
            history_len = history.len(),
            prompt_tokens = self.provider.estimate_tokens(&request.prompt_text()),
            provider = %self.provider.provider_info().name,
            "Requesting next question"
        );

        let response = tokio::time::timeout(self.config.timeout, self.provider.complete(request))
            .await
            .map_err(|_| GenerationError::Timeout {
                timeout_secs: self.config.timeout.as_secs(),
            })?
            .map_err(generation_error)?;

        if response.finish_reason == FinishReason::ContentFilter {
            return Err(GenerationError::invalid("reply was filtered by the provider"));
        }

        let question = parse_question(&response.content)?;
        if history.iter().any(|q| q.id() == question.id()) {
            return Err(GenerationError::DuplicateQuestionId(question.id().clone()));
        }

        tracing::debug!(
            trace_id = %trace_id,
            question_id = %question.id(),
            total_tokens = response.usage.total_tokens,
            cost_cents = response.usage.estimated_cost_cents,
            "Generated question"
        );

        Ok(question)
    }
}

fn generation_error(err: AIError) -> GenerationError {
    match err {
        AIError::Timeout { timeout_secs } => GenerationError::Timeout {
            timeout_secs: u64::from(timeout_secs),
        },
        other => GenerationError::provider(other.to_string(), other.is_retryable()),
    }
}

/// Renders the session so far as a numbered transcript plus the ids in use.
fn describe_history(history: &[Question], answers: &AnswerSet) -> String {
    let mut text = String::from("Questions so far:\n");

    for (index, question) in history.iter().enumerate() {
        let chosen: Vec<&str> = answers
            .selection(question.id())
            .iter()
            .filter_map(|id| question.choice(id))
            .map(|choice| choice.title())
            .collect();
        let answer = if chosen.is_empty() {
            "(no answer)".to_string()
        } else {
            chosen.join(", ")
        };
        text.push_str(&format!(
            "{}. [{}] {} -> {}\n",
            index + 1,
            question.id(),
            question.prompt(),
            answer
        ));
    }

    let used: Vec<&str> = history.iter().map(|q| q.id().as_str()).collect();
    text.push_str(&format!("\nIds already used: {}\n", used.join(", ")));
    text
}

/// Pulls the question object out of a model reply.
///
/// Accepts bare JSON, JSON wrapped in a Markdown code fence, or JSON with
/// leading/trailing prose.
fn parse_question(content: &str) -> Result<Question, GenerationError> {
    let json = extract_json_object(content)
        .ok_or_else(|| GenerationError::invalid("reply contains no JSON object"))?;

    let question: Question = serde_json::from_str(json)
        .map_err(|e| GenerationError::invalid(format!("unreadable question: {}", e)))?;

    question
        .validate()
        .map_err(|e| GenerationError::invalid(e.to_string()))?;

    Ok(question)
}

fn extract_json_object(content: &str) -> Option<&str> {
    let trimmed = content.trim();
    let unfenced = trimmed
        .strip_prefix("```json")
        .or_else(|| trimmed.strip_prefix("```"))
        .and_then(|rest| rest.trim_end().strip_suffix("```"))
        .unwrap_or(trimmed);

    let start = unfenced.find('{')?;
    let end = unfenced.rfind('}')?;
    (start < end).then(|| &unfenced[start..=end])
}
