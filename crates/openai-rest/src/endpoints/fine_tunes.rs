//! Fine-tune jobs. The jobs run remotely: the API moves them through
//! `pending`, `running`, `succeeded`, `failed` and `cancelled`, and this client
//! only creates, reads and cancels them.

use bon::Builder;
use reqwest::Method;
use serde::{Deserialize, Serialize};

use super::{bodiless_request, files::File, ListResponse, OpenAIRequestProvider, RequestBody};
use crate::{validate, OpenAIResult};

/// The base model a fine-tune starts from.
#[derive(Serialize, Debug, Clone, Copy, Default, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum FineTuneModel {
    Ada,
    Babbage,
    #[default]
    Curie,
    Davinci,
}

/// Creates a fine-tune job from an uploaded training file.
///
/// Construct with `FineTune::training_file`.
#[derive(Serialize, Debug, Clone, Builder)]
#[builder(start_fn = training_file)]
pub struct FineTune {
    #[builder(start_fn, into)]
    training_file: String,
    #[builder(into)]
    #[serde(skip_serializing_if = "Option::is_none")]
    validation_file: Option<String>,
    #[builder(default)]
    model: FineTuneModel,
    #[serde(skip_serializing_if = "Option::is_none")]
    n_epochs: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    batch_size: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    learning_rate_multiplier: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    prompt_loss_weight: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    compute_classification_metrics: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    classification_n_classes: Option<u32>,
    #[builder(into)]
    #[serde(skip_serializing_if = "Option::is_none")]
    classification_positive_class: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    classification_betas: Option<Vec<f64>>,
    /// Up to 40 characters appended to the fine-tuned model's name.
    #[builder(into)]
    #[serde(skip_serializing_if = "Option::is_none")]
    suffix: Option<String>,
}

impl OpenAIRequestProvider for FineTune {
    type Response = FineTuneResponse;

    const METHOD: Method = Method::POST;

    fn path_with_leading_slash(&self) -> String {
        "/v1/fine-tunes".to_string()
    }

    fn validate(&self) -> OpenAIResult<()> {
        validate::require_non_blank("training_file", &self.training_file)
    }

    fn body(&self) -> OpenAIResult<RequestBody> {
        RequestBody::json(self)
    }
}

impl super::private::Sealed for FineTune {}

/// A fine-tune job as reported by the API.
#[derive(Deserialize, Debug, Clone)]
pub struct FineTuneResponse {
    pub id: String,
    #[serde(default)]
    pub object: Option<String>,
    #[serde(default)]
    pub model: Option<String>,
    #[serde(default)]
    pub created_at: Option<u64>,
    #[serde(default)]
    pub updated_at: Option<u64>,
    /// Only included when a single job is retrieved or created.
    #[serde(default)]
    pub events: Vec<FineTuneEvent>,
    #[serde(default)]
    pub fine_tuned_model: Option<String>,
    #[serde(default)]
    pub hyperparams: Option<HyperParams>,
    #[serde(default)]
    pub organization_id: Option<String>,
    #[serde(default)]
    pub result_files: Vec<File>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub validation_files: Vec<File>,
    #[serde(default)]
    pub training_files: Vec<File>,
}

#[derive(Deserialize, Debug, Clone, Default)]
pub struct HyperParams {
    #[serde(default)]
    pub batch_size: Option<u32>,
    #[serde(default)]
    pub learning_rate_multiplier: Option<f64>,
    #[serde(default)]
    pub n_epochs: Option<u32>,
    #[serde(default)]
    pub prompt_loss_weight: Option<f64>,
}

/// A progress message logged by a fine-tune job.
#[derive(Deserialize, Debug, Clone)]
pub struct FineTuneEvent {
    #[serde(default)]
    pub object: Option<String>,
    #[serde(default)]
    pub created_at: Option<u64>,
    #[serde(default)]
    pub level: Option<String>,
    pub message: String,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct ListFineTunes;

bodiless_request!(
    ListFineTunes => ListResponse<FineTuneResponse>,
    GET,
    |_r| "/v1/fine-tunes".to_string(),
    []
);

#[derive(Debug, Clone)]
pub struct RetrieveFineTune {
    pub fine_tune_id: String,
}

impl RetrieveFineTune {
    pub fn new(fine_tune_id: impl Into<String>) -> Self {
        Self {
            fine_tune_id: fine_tune_id.into(),
        }
    }
}

bodiless_request!(
    RetrieveFineTune => FineTuneResponse,
    GET,
    |r| format!("/v1/fine-tunes/{}", r.fine_tune_id),
    ["fine_tune_id": r.fine_tune_id]
);

/// Cancels a job that has not finished yet.
#[derive(Debug, Clone)]
pub struct CancelFineTune {
    pub fine_tune_id: String,
}

impl CancelFineTune {
    pub fn new(fine_tune_id: impl Into<String>) -> Self {
        Self {
            fine_tune_id: fine_tune_id.into(),
        }
    }
}

bodiless_request!(
    CancelFineTune => FineTuneResponse,
    POST,
    |r| format!("/v1/fine-tunes/{}/cancel", r.fine_tune_id),
    ["fine_tune_id": r.fine_tune_id]
);

#[derive(Debug, Clone)]
pub struct ListFineTuneEvents {
    pub fine_tune_id: String,
}

impl ListFineTuneEvents {
    pub fn new(fine_tune_id: impl Into<String>) -> Self {
        Self {
            fine_tune_id: fine_tune_id.into(),
        }
    }
}

bodiless_request!(
    ListFineTuneEvents => ListResponse<FineTuneEvent>,
    GET,
    |r| format!("/v1/fine-tunes/{}/events", r.fine_tune_id),
    ["fine_tune_id": r.fine_tune_id]
);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn create_request_uses_snake_case() {
        let request = FineTune::training_file("file-OcQb9zg35cxa4WLBZJ9K2523")
            .suffix("support-bot")
            .model(FineTuneModel::Ada)
            .learning_rate_multiplier(0.1)
            .build();
        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(json["training_file"], "file-OcQb9zg35cxa4WLBZJ9K2523");
        assert_eq!(json["model"], "ada");
        assert_eq!(json["suffix"], "support-bot");
        assert_eq!(json["learning_rate_multiplier"], 0.1);
        assert!(json.get("validation_file").is_none());
    }

    #[test]
    fn default_model_is_curie() {
        let json = serde_json::to_value(FineTune::training_file("file-1").build()).unwrap();
        assert_eq!(json["model"], "curie");
    }

    #[test]
    fn job_paths() {
        assert_eq!(
            CancelFineTune::new("ft-1").path_with_leading_slash(),
            "/v1/fine-tunes/ft-1/cancel"
        );
        assert_eq!(
            ListFineTuneEvents::new("ft-1").path_with_leading_slash(),
            "/v1/fine-tunes/ft-1/events"
        );
        assert!(RetrieveFineTune::new("").validate().is_err());
    }

    #[test]
    fn job_decodes() {
        let job: FineTuneResponse = serde_json::from_str(
            r#"{
                "id": "ft-AF1WoRqd3aJAHsqc9NY7iL8F",
                "object": "fine-tune",
                "model": "curie",
                "created_at": 1614807352,
                "events": [{"object":"fine-tune-event","created_at":1614807352,"level":"info","message":"Job enqueued."}],
                "fine_tuned_model": null,
                "hyperparams": {"batch_size": 4, "learning_rate_multiplier": 0.1, "n_epochs": 4, "prompt_loss_weight": 0.1},
                "organization_id": "org-123",
                "result_files": [],
                "status": "pending",
                "validation_files": [],
                "training_files": [{"id":"file-1","object":"file","bytes":1547276,"filename":"train.jsonl","purpose":"fine-tune"}],
                "updated_at": 1614807352
            }"#,
        )
        .unwrap();
        assert_eq!(job.status.as_deref(), Some("pending"));
        assert_eq!(job.events[0].message, "Job enqueued.");
        assert_eq!(job.hyperparams.unwrap().n_epochs, Some(4));
        assert_eq!(job.training_files[0].bytes, 1547276);
    }
}
