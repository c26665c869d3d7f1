use bon::Builder;
use reqwest::Method;
use serde::{Deserialize, Serialize};

use super::{completions::Choice, OpenAIRequestProvider, RequestBody};
use crate::{validate, OpenAIResult, Usage};

#[derive(Serialize, Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditModel {
    #[serde(rename = "text-davinci-edit-001")]
    TextDavinciEdit001,
    #[serde(rename = "code-davinci-edit-001")]
    CodeDavinciEdit001,
}

/// Asks the model to rewrite `input` following `instruction`.
///
/// Construct with `Edit::instruction`.
#[derive(Serialize, Debug, Clone, Builder)]
#[builder(start_fn = instruction)]
pub struct Edit {
    #[builder(start_fn, into)]
    instruction: String,
    #[builder(default = EditModel::TextDavinciEdit001)]
    model: EditModel,
    #[builder(into)]
    #[serde(skip_serializing_if = "Option::is_none")]
    input: Option<String>,
    #[builder(default = 1)]
    n: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    top_p: Option<f32>,
}

impl OpenAIRequestProvider for Edit {
    type Response = EditResponse;

    const METHOD: Method = Method::POST;

    fn path_with_leading_slash(&self) -> String {
        "/v1/edits".to_string()
    }

    fn validate(&self) -> OpenAIResult<()> {
        validate::require_non_blank("instruction", &self.instruction)
    }

    fn body(&self) -> OpenAIResult<RequestBody> {
        RequestBody::json(self)
    }
}

impl super::private::Sealed for Edit {}

#[derive(Deserialize, Debug, Clone)]
pub struct EditResponse {
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

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn code_edit_serializes() {
        let edit = Edit::instruction("Fix this java code")
            .input("System.out.pri(\"AAAAA\");")
            .model(EditModel::CodeDavinciEdit001)
            .build();
        let json = serde_json::to_value(&edit).unwrap();
        assert_eq!(json["model"], "code-davinci-edit-001");
        assert_eq!(json["instruction"], "Fix this java code");
        assert_eq!(json["n"], 1);
        assert!(json.get("temperature").is_none());
    }

    #[test]
    fn instruction_is_required() {
        assert!(Edit::instruction("").build().validate().is_err());
    }
}
