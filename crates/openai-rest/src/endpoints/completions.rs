use std::collections::HashMap;

use bon::Builder;
use reqwest::Method;
use serde::{Deserialize, Serialize};

use super::{OpenAIRequestProvider, RequestBody};
use crate::{validate, OpenAIResult, Usage};

/// The model used for a text completion. Fine-tuned models go in `Custom`.
#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
pub enum CompletionModel {
    #[serde(rename = "text-davinci-003")]
    TextDavinci003,
    #[serde(rename = "text-davinci-002")]
    TextDavinci002,
    #[serde(rename = "text-curie-001")]
    TextCurie001,
    #[serde(rename = "text-babbage-001")]
    TextBabbage001,
    #[serde(rename = "text-ada-001")]
    TextAda001,
    #[serde(rename = "davinci")]
    Davinci,
    #[serde(rename = "curie")]
    Curie,
    #[serde(rename = "babbage")]
    Babbage,
    #[serde(rename = "ada")]
    Ada,
    #[serde(untagged)]
    Custom(String),
}

/// A text completion request.
///
/// Construct with `Completion::prompt`.
#[derive(Serialize, Debug, Clone, Builder)]
#[builder(start_fn = prompt)]
pub struct Completion {
    #[builder(start_fn, into)]
    prompt: String,
    #[builder(default = CompletionModel::TextDavinci003)]
    model: CompletionModel,
    #[builder(into)]
    #[serde(skip_serializing_if = "Option::is_none")]
    suffix: Option<String>,
    #[builder(default = 2048)]
    max_tokens: u32,
    #[builder(default = 0.0)]
    temperature: f32,
    #[builder(default = 1.0)]
    top_p: f32,
    #[builder(default = 1)]
    n: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    logprobs: Option<u32>,
    #[builder(default)]
    echo: bool,
    #[builder(default)]
    #[serde(skip_serializing_if = "Vec::is_empty")]
    stop: Vec<String>,
    #[builder(default)]
    presence_penalty: f32,
    #[builder(default)]
    frequency_penalty: f32,
    #[serde(skip_serializing_if = "Option::is_none")]
    best_of: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    logit_bias: Option<HashMap<String, i32>>,
    #[builder(into)]
    #[serde(skip_serializing_if = "Option::is_none")]
    user: Option<String>,
}

impl Completion {
    pub fn prompt_text(&self) -> &str {
        &self.prompt
    }
}

impl OpenAIRequestProvider for Completion {
    type Response = CompletionResponse;

    const METHOD: Method = Method::POST;

    fn path_with_leading_slash(&self) -> String {
        "/v1/completions".to_string()
    }

    fn validate(&self) -> OpenAIResult<()> {
        validate::require_non_blank("prompt", &self.prompt)
    }

    fn body(&self) -> OpenAIResult<RequestBody> {
        RequestBody::json(self)
    }
}

impl super::private::Sealed for Completion {}

/// A response from a completion request.
#[derive(Deserialize, Debug, Clone)]
pub struct CompletionResponse {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub object: Option<String>,
    #[serde(default)]
    pub created: Option<u64>,
    #[serde(default)]
    pub model: Option<String>,
    #[serde(default)]
    pub choices: Vec<Choice>,
    #[serde(default)]
    pub usage: Option<Usage>,
}

impl CompletionResponse {
    /// Takes the first choice and consumes the response.
    pub fn take_first_choice(self) -> Option<Choice> {
        self.choices.into_iter().next()
    }
}

/// One generated text.
#[derive(Deserialize, Debug, Clone)]
pub struct Choice {
    pub text: String,
    #[serde(default)]
    pub index: u32,
    #[serde(default)]
    pub logprobs: Option<serde_json::Value>,
    #[serde(default)]
    pub finish_reason: Option<FinishReason>,
}

/// The reason a completion stopped.
#[derive(Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum FinishReason {
    Stop,
    Length,
    ContentFilter,
    #[serde(other)]
    Other,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::decode_success;

    #[test]
    fn completion_serializes_snake_case_defaults() {
        let completion = Completion::prompt("hello")
            .echo(true)
            .stop(vec![" Human:".to_string(), " Bot:".to_string()])
            .build();
        let json = serde_json::to_value(&completion).unwrap();
        assert_eq!(json["prompt"], "hello");
        assert_eq!(json["model"], "text-davinci-003");
        assert_eq!(json["max_tokens"], 2048);
        assert_eq!(json["echo"], true);
        assert_eq!(json["stop"], serde_json::json!([" Human:", " Bot:"]));
        assert_eq!(json["presence_penalty"], 0.0);
        assert!(json.get("suffix").is_none());
        assert!(json.get("logit_bias").is_none());
    }

    #[test]
    fn fine_tuned_models_serialize_as_plain_strings() {
        let completion = Completion::prompt("what is a trisolaran?")
            .model(CompletionModel::Custom(
                "ada:ft-org-DL6GzliwY20i7Lxr5pUAoKUH:2023-02-16-05-42-02".into(),
            ))
            .build();
        let json = serde_json::to_value(&completion).unwrap();
        assert_eq!(
            json["model"],
            "ada:ft-org-DL6GzliwY20i7Lxr5pUAoKUH:2023-02-16-05-42-02"
        );
    }

    #[test]
    fn minimal_response_decodes() {
        let response: CompletionResponse =
            decode_success(br#"{"choices":[{"text":"hi"}]}"#).unwrap();
        assert_eq!(response.take_first_choice().unwrap().text, "hi");
    }

    #[test]
    fn unknown_finish_reasons_are_tolerated() {
        let response: CompletionResponse = decode_success(
            br#"{"id":"cmpl-1","choices":[{"text":"x","index":0,"finish_reason":"something_new"}],"usage":{"prompt_tokens":1,"completion_tokens":1,"total_tokens":2}}"#,
        )
        .unwrap();
        assert_eq!(response.choices[0].finish_reason, Some(FinishReason::Other));
        assert_eq!(response.usage.unwrap().total_tokens, 2);
    }

    #[test]
    fn blank_prompt_is_rejected() {
        assert!(Completion::prompt("   ").build().validate().is_err());
    }
}
