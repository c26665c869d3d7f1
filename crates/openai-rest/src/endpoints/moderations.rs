use bon::Builder;
use reqwest::Method;
use serde::{Deserialize, Serialize};

use super::{OpenAIRequestProvider, RequestBody};
use crate::{validate, OpenAIResult};

#[derive(Serialize, Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ModerationModel {
    #[default]
    #[serde(rename = "text-moderation-latest")]
    Latest,
    #[serde(rename = "text-moderation-stable")]
    Stable,
}

/// Classifies text against the content policy.
///
/// Construct with `Moderation::input`.
#[derive(Serialize, Debug, Clone, Builder)]
#[builder(start_fn = input)]
pub struct Moderation {
    #[builder(start_fn, into)]
    input: String,
    #[builder(default)]
    model: ModerationModel,
}

impl OpenAIRequestProvider for Moderation {
    type Response = ModerationResponse;

    const METHOD: Method = Method::POST;

    fn path_with_leading_slash(&self) -> String {
        "/v1/moderations".to_string()
    }

    fn validate(&self) -> OpenAIResult<()> {
        validate::require_non_blank("input", &self.input)
    }

    fn body(&self) -> OpenAIResult<RequestBody> {
        RequestBody::json(self)
    }
}

impl super::private::Sealed for Moderation {}

#[derive(Deserialize, Debug, Clone)]
pub struct ModerationResponse {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub model: Option<String>,
    pub results: Vec<ModerationResult>,
}

impl ModerationResponse {
    /// Whether any result was flagged.
    pub fn flagged(&self) -> bool {
        self.results.iter().any(|r| r.flagged)
    }
}

#[derive(Deserialize, Debug, Clone)]
pub struct ModerationResult {
    pub categories: Categories,
    pub category_scores: CategoryScores,
    pub flagged: bool,
}

#[derive(Deserialize, Debug, Clone, Copy, Default)]
pub struct Categories {
    #[serde(default)]
    pub hate: bool,
    #[serde(rename = "hate/threatening", default)]
    pub hate_threatening: bool,
    #[serde(rename = "self-harm", default)]
    pub self_harm: bool,
    #[serde(default)]
    pub sexual: bool,
    #[serde(rename = "sexual/minors", default)]
    pub sexual_minors: bool,
    #[serde(default)]
    pub violence: bool,
    #[serde(rename = "violence/graphic", default)]
    pub violence_graphic: bool,
}

#[derive(Deserialize, Debug, Clone, Copy, Default)]
pub struct CategoryScores {
    #[serde(default)]
    pub hate: f64,
    #[serde(rename = "hate/threatening", default)]
    pub hate_threatening: f64,
    #[serde(rename = "self-harm", default)]
    pub self_harm: f64,
    #[serde(default)]
    pub sexual: f64,
    #[serde(rename = "sexual/minors", default)]
    pub sexual_minors: f64,
    #[serde(default)]
    pub violence: f64,
    #[serde(rename = "violence/graphic", default)]
    pub violence_graphic: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn slashed_category_names_decode() {
        let response: ModerationResponse = serde_json::from_str(
            r#"{
                "id": "modr-5MWoLO",
                "model": "text-moderation-001",
                "results": [{
                    "categories": {"hate": false, "hate/threatening": true, "self-harm": false,
                                   "sexual": false, "sexual/minors": false, "violence": true,
                                   "violence/graphic": false},
                    "category_scores": {"hate": 0.22, "hate/threatening": 0.4, "self-harm": 0.0,
                                        "sexual": 0.01, "sexual/minors": 0.0, "violence": 0.99,
                                        "violence/graphic": 0.0},
                    "flagged": true
                }]
            }"#,
        )
        .unwrap();
        assert!(response.flagged());
        let result = &response.results[0];
        assert!(result.categories.hate_threatening);
        assert!(result.categories.violence);
        assert_eq!(result.category_scores.violence, 0.99);
    }

    #[test]
    fn request_serializes_model_name() {
        let json = serde_json::to_value(Moderation::input("I want to kill them.").build()).unwrap();
        assert_eq!(json["model"], "text-moderation-latest");
    }
}
