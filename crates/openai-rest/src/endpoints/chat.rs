use std::{borrow::Cow, collections::HashMap};

use bon::Builder;
use reqwest::Method;
use serde::{Deserialize, Serialize};

use super::{completions::FinishReason, OpenAIRequestProvider, RequestBody};
use crate::{OpenAIError, OpenAIResult, Usage};

/// The model used for chat completions. Anything not listed goes in `Custom`.
#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
#[allow(non_camel_case_types)]
pub enum ChatModel {
    #[serde(rename = "gpt-3.5-turbo")]
    Gpt35Turbo,
    #[serde(rename = "gpt-3.5-turbo-0301")]
    Gpt35Turbo_0301,
    #[serde(rename = "gpt-4")]
    Gpt4,
    #[serde(rename = "gpt-4-0314")]
    Gpt4_0314,
    #[serde(rename = "gpt-4-32k")]
    Gpt4_32k,
    #[serde(rename = "gpt-4-32k-0314")]
    Gpt4_32k_0314,
    #[serde(untagged)]
    Custom(String),
}

/// The role of the message used for the chat completion.
#[derive(Serialize, Debug, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    /// The system message, describing the task to the model.
    System,
    /// The user message, i.e. the payload into the model.
    User,
    /// The assistant message, i.e. the model's response.
    Assistant,
}

/// A chat completion message. You can pre-populate the request with user and
/// assistant messages (alongside the system message) to provide context for the
/// completion.
#[derive(Serialize, Debug, Clone, Builder)]
#[builder(start_fn = role)]
pub struct Message<'a> {
    #[builder(start_fn)]
    role: Role,
    content: Cow<'a, str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    name: Option<Cow<'a, str>>,
}

#[macro_export]
macro_rules! system_message {
    ($($arg:tt)*) => {
        $crate::endpoints::chat::Message::role($crate::endpoints::chat::Role::System)
            .content(format!($($arg)*).into())
            .build()
    };
}

#[macro_export]
macro_rules! user_message {
    ($($arg:tt)*) => {
        $crate::endpoints::chat::Message::role($crate::endpoints::chat::Role::User)
            .content(format!($($arg)*).into())
            .build()
    };
}

#[macro_export]
macro_rules! assistant_message {
    ($($arg:tt)*) => {
        $crate::endpoints::chat::Message::role($crate::endpoints::chat::Role::Assistant)
            .content(format!($($arg)*).into())
            .build()
    };
}

/// A chat completion request.
///
/// Construct with `ChatCompletion::model`.
#[derive(Serialize, Debug, Clone, Builder)]
#[builder(start_fn = model)]
pub struct ChatCompletion<'a> {
    #[builder(start_fn)]
    model: ChatModel,
    messages: Vec<Message<'a>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    top_p: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    n: Option<u32>,
    #[builder(default)]
    #[serde(skip_serializing_if = "Vec::is_empty")]
    stop: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    max_tokens: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    presence_penalty: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    frequency_penalty: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    logit_bias: Option<HashMap<i32, i32>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    user: Option<String>,
}

impl OpenAIRequestProvider for ChatCompletion<'_> {
    type Response = ChatCompletionResponse;

    const METHOD: Method = Method::POST;

    fn path_with_leading_slash(&self) -> String {
        "/v1/chat/completions".to_string()
    }

    fn validate(&self) -> OpenAIResult<()> {
        if self.messages.is_empty() {
            return Err(OpenAIError::parameter("messages must not be empty"));
        }
        Ok(())
    }

    fn body(&self) -> OpenAIResult<RequestBody> {
        RequestBody::json(self)
    }
}

impl super::private::Sealed for ChatCompletion<'_> {}

/// A response from a chat completion request.
#[derive(Deserialize, Debug, Clone)]
pub struct ChatCompletionResponse {
    #[serde(default)]
    id: Option<String>,
    #[serde(default)]
    created: Option<u64>,
    #[serde(default)]
    model: Option<String>,
    choices: Vec<ChatCompletionResponseChoice>,
    #[serde(default)]
    usage: Option<Usage>,
}

impl ChatCompletionResponse {
    /// Takes the first message in the response consumes the response.
    pub fn take_first_choice(self) -> Option<ChatCompletionResponseChoice> {
        self.choices.into_iter().next()
    }

    pub fn choices(&self) -> &[ChatCompletionResponseChoice] {
        &self.choices
    }

    /// Gives the usage tokens of the response.
    pub fn usage(&self) -> Option<&Usage> {
        self.usage.as_ref()
    }

    pub fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }

    pub fn created(&self) -> Option<u64> {
        self.created
    }

    pub fn model(&self) -> Option<&str> {
        self.model.as_deref()
    }
}

/// A response choice from a chat completion request.
#[derive(Deserialize, Debug, Clone)]
pub struct ChatCompletionResponseChoice {
    #[serde(default)]
    finish_reason: Option<FinishReason>,
    #[serde(default)]
    index: u32,
    message: ChatCompletionResponseMessage,
}

impl ChatCompletionResponseChoice {
    /// Takes the message content.
    pub fn message(self) -> String {
        self.message.content
    }

    pub fn role(&self) -> Role {
        self.message.role
    }

    pub fn content(&self) -> &str {
        &self.message.content
    }

    pub fn finish_reason(&self) -> Option<FinishReason> {
        self.finish_reason
    }

    pub fn index(&self) -> u32 {
        self.index
    }
}

#[derive(Deserialize, Debug, Clone)]
struct ChatCompletionResponseMessage {
    role: Role,
    #[serde(default)]
    content: String,
}

#[macro_export]
macro_rules! logit_bias {
    () => {
        std::collections::HashMap::new()
    };

    ($($key:tt : $value:expr),+ $(,)?) => {{
        let mut map = std::collections::HashMap::new();
        $(
            map.insert($key as i32, $value as i32);
        )+
        map
    }};
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn chat_request_serializes() {
        let request = ChatCompletion::model(ChatModel::Gpt35Turbo)
            .messages(vec![
                crate::system_message!("Answer in {} words.", 5),
                crate::user_message!("hello partner!"),
            ])
            .temperature(0.2)
            .logit_bias(crate::logit_bias!(50256: -100))
            .build();
        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(json["model"], "gpt-3.5-turbo");
        assert_eq!(json["messages"][0]["role"], "system");
        assert_eq!(json["messages"][0]["content"], "Answer in 5 words.");
        assert_eq!(json["messages"][1]["role"], "user");
        assert!(json["messages"][1].get("name").is_none());
        assert_eq!(json["logit_bias"]["50256"], -100);
        assert!(json.get("max_tokens").is_none());
    }

    #[test]
    fn empty_conversation_is_rejected() {
        let request = ChatCompletion::model(ChatModel::Gpt4).messages(vec![]).build();
        assert!(matches!(request.validate(), Err(OpenAIError::Parameter(_))));
    }

    #[test]
    fn response_decodes() {
        let response: ChatCompletionResponse = serde_json::from_str(
            r#"{
                "id": "chatcmpl-1",
                "object": "chat.completion",
                "created": 1677649420,
                "model": "gpt-3.5-turbo-0301",
                "usage": {"prompt_tokens": 56, "completion_tokens": 31, "total_tokens": 87},
                "choices": [{
                    "message": {"role": "assistant", "content": "Hello there!"},
                    "finish_reason": "stop",
                    "index": 0
                }]
            }"#,
        )
        .unwrap();
        assert_eq!(response.usage().unwrap().completion_tokens, 31);
        let choice = response.take_first_choice().unwrap();
        assert_eq!(choice.role(), Role::Assistant);
        assert_eq!(choice.finish_reason(), Some(FinishReason::Stop));
        assert_eq!(choice.message(), "Hello there!");
    }
}
