//! Terminal driver for the gift finder questionnaire.
//!
//! Wires configuration, the question generator and a query-string step
//! location into a [`QuestionnaireSession`] and renders it on stdout.
//!
//! ```text
//! gift-finder [?step=N]
//! ```
//!
//! Commands: choice numbers (`1 3`) select, `n` next, `b` back, `g N` jump to
//! step N, `r` restart, `q` quit.

use std::error::Error;
use std::sync::Arc;

use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::info;

use gift_finder::adapters::ai::{AnthropicConfig, AnthropicProvider, OpenAIConfig, OpenAIProvider};
use gift_finder::adapters::generation::{
    LlmGeneratorConfig, LlmQuestionGenerator, MockQuestionGenerator,
};
use gift_finder::adapters::location::QueryStringLocation;
use gift_finder::application::{ForwardOutcome, QuestionnaireSession};
use gift_finder::config::{AiConfig, AiProvider, AppConfig, LogFormat, LoggingConfig};
use gift_finder::domain::foundation::ChoiceId;
use gift_finder::domain::questionnaire::{FlowController, StepView};
use gift_finder::ports::{AIProvider, QuestionGenerator};

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    let config = AppConfig::load()?;
    config.validate()?;
    init_tracing(&config.logging);

    let catalog = config.questionnaire.load_catalog()?;
    let controller = FlowController::with_ceiling(catalog, config.questionnaire.max_steps);
    let generator = build_generator(&config.ai)?;
    let location = Arc::new(QueryStringLocation::new(
        std::env::args().nth(1).unwrap_or_default(),
    ));

    info!(provider = ?config.ai.provider, max_steps = config.questionnaire.max_steps, "Starting gift finder");

    let session = QuestionnaireSession::new(controller, generator, location.clone())?;
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    loop {
        if let Some(view) = session.view() {
            render(&view, &location.query());
        }

        let Some(line) = lines.next_line().await? else {
            break;
        };
        let input = line.trim();

        let result = match input {
            "q" => break,
            "n" => match session.forward().await {
                Ok(ForwardOutcome::Finished(done)) => {
                    println!(
                        "\nAll done at {}. Your answers:",
                        done.completed_at.as_datetime().format("%H:%M")
                    );
                    println!("{}", serde_json::to_string_pretty(&done.answers)?);
                    break;
                }
                Ok(_) => Ok(()),
                Err(err) => Err(err),
            },
            "b" => session.back().map(|_| ()),
            "r" => session.restart(),
            _ if input.starts_with("g ") => match input[2..].trim().parse::<usize>() {
                Ok(step) => session.set_step(step).map(|_| ()),
                Err(_) => {
                    println!("! not a step number");
                    Ok(())
                }
            },
            _ => match parse_selection(input, session.view().as_ref()) {
                Some(choice_ids) => session.select(choice_ids),
                None => {
                    println!("! unknown command");
                    Ok(())
                }
            },
        };

        if let Err(err) = result {
            let hint = if err.is_retryable() { " (press n to try again)" } else { "" };
            println!("! {}{}", err, hint);
        }
    }

    session.close();
    Ok(())
}

fn init_tracing(logging: &LoggingConfig) {
    let builder = tracing_subscriber::fmt()
        .with_env_filter(logging.env_filter())
        .with_writer(std::io::stderr);

    match logging.format {
        LogFormat::Json => builder.json().init(),
        LogFormat::Pretty => builder.with_target(false).init(),
    }
}

fn build_generator(ai: &AiConfig) -> Result<Arc<dyn QuestionGenerator>, Box<dyn Error>> {
    let provider: Arc<dyn AIProvider> = match ai.provider {
        AiProvider::Mock => return Ok(Arc::new(MockQuestionGenerator::new())),
        AiProvider::OpenAI => {
            let mut provider_config =
                OpenAIConfig::new(ai.openai_api_key.clone().unwrap_or_default())
                    .with_timeout(ai.timeout());
            if let Some(model) = &ai.model {
                provider_config = provider_config.with_model(model);
            }
            Arc::new(OpenAIProvider::new(provider_config)?)
        }
        AiProvider::Anthropic => {
            let mut provider_config =
                AnthropicConfig::new(ai.anthropic_api_key.clone().unwrap_or_default())
                    .with_timeout(ai.timeout());
            if let Some(model) = &ai.model {
                provider_config = provider_config.with_model(model);
            }
            Arc::new(AnthropicProvider::new(provider_config)?)
        }
    };

    Ok(Arc::new(LlmQuestionGenerator::new(
        provider,
        LlmGeneratorConfig {
            timeout: ai.timeout(),
            temperature: ai.temperature,
            max_tokens: ai.max_tokens,
        },
    )))
}

/// Maps `1 3` / `1,3` onto the current question's choice ids.
fn parse_selection(input: &str, view: Option<&StepView>) -> Option<Vec<ChoiceId>> {
    let choices = view?.question.choices();
    input
        .split(|c: char| c == ',' || c.is_whitespace())
        .filter(|part| !part.is_empty())
        .map(|part| {
            let index = part.parse::<usize>().ok()?.checked_sub(1)?;
            choices.get(index).map(|choice| choice.id().clone())
        })
        .collect()
}

fn render(view: &StepView, query: &str) {
    println!();
    println!(
        "Step {} of {} ({})   {}",
        view.progress.step, view.progress.total, view.progress.percent, query
    );
    println!("{}", view.question.prompt());
    if view.question.is_multi_select() {
        println!("(pick one or more)");
    }

    for (index, choice) in view.question.choices().iter().enumerate() {
        let mark = if view.selection.contains(choice.id()) { "x" } else { " " };
        match choice.image_ref() {
            Some(image) => println!("  [{}] {}. {} <{}>", mark, index + 1, choice.title(), image),
            None => println!("  [{}] {}. {}", mark, index + 1, choice.title()),
        }
    }

    let back = if view.can_go_back { "b: Previous   " } else { "" };
    let forward = if view.forward.enabled {
        format!("n: {}", view.forward.label())
    } else {
        format!("({})", view.forward.label())
    };
    println!("{}{}   r: Restart   q: Quit", back, forward);
}
