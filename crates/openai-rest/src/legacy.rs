//! The original single-question client.
//!
//! Its contract is looser than [`OpenAI`]'s and is kept as is for existing callers:
//! an `error` inside a successful response becomes the answer instead of an `Err`,
//! and failed responses other than 401 are all reported as retryable.

use reqwest::{Method, StatusCode};
use serde::Deserialize;

use crate::{
    endpoints::{completions::Completion, dispatch, OpenAIRequestProvider},
    error::parse_error_envelope,
    Config, OpenAI, OpenAIError, OpenAIResult, RetryReason,
};

#[derive(Deserialize)]
struct Answer {
    #[serde(default)]
    choices: Vec<AnswerChoice>,
    #[serde(default)]
    error: Option<AnswerError>,
}

#[derive(Deserialize)]
struct AnswerError {
    #[serde(default)]
    message: Option<String>,
}

#[derive(Deserialize)]
struct AnswerChoice {
    #[serde(default)]
    text: String,
}

/// Asks single questions against the completions endpoint.
#[derive(Clone, Debug)]
pub struct LegacyClient {
    openai: OpenAI,
}

impl LegacyClient {
    pub fn new(api_key: impl Into<String>) -> OpenAIResult<Self> {
        Self::with_config(Config::api_key(api_key).build())
    }

    pub fn with_config(config: Config) -> OpenAIResult<Self> {
        Ok(Self {
            openai: OpenAI::new(config)?,
        })
    }

    /// Asks `question` and returns every choice's text, each followed by a newline.
    ///
    /// If the API answers with an `error` object and a success status, its message is
    /// returned as the answer.
    pub async fn ask_question(&self, question: &str) -> OpenAIResult<String> {
        let question = Completion::prompt(question).build();
        question.validate()?;

        let (status, body) = dispatch(
            &self.openai,
            Method::POST,
            &question.path_with_leading_slash(),
            question.body()?,
        )
        .await?;
        tracing::info!(body = %String::from_utf8_lossy(&body), "completion answered");

        if !status.is_success() {
            return Err(legacy_failure(status, &body));
        }

        let answer: Answer = serde_json::from_slice(&body)?;
        if let Some(error) = answer.error {
            return Ok(error.message.unwrap_or_default());
        }
        if answer.choices.is_empty() {
            return Err(OpenAIError::Retryable(RetryReason::NoChoices));
        }

        Ok(answer.choices.iter().fold(String::new(), |mut msg, choice| {
            msg.push_str(&choice.text);
            msg.push('\n');
            msg
        }))
    }
}

fn legacy_failure(status: StatusCode, body: &[u8]) -> OpenAIError {
    if status == StatusCode::UNAUTHORIZED {
        if let Some(error) = parse_error_envelope(body) {
            return OpenAIError::Authentication(error.message);
        }
    }
    OpenAIError::Retryable(RetryReason::UnrecognizedResponse {
        status: status.as_u16(),
        body: String::from_utf8_lossy(body).into_owned(),
    })
}
