//! Model listing and lookup, plus the deprecated engine endpoints that predate them.

use serde::Deserialize;

use super::{bodiless_request, DeleteResponse, ListResponse};

/// A model available to the account.
#[derive(Deserialize, Debug, Clone)]
pub struct Model {
    pub id: String,
    #[serde(default)]
    pub object: Option<String>,
    #[serde(default)]
    pub created: Option<u64>,
    #[serde(default)]
    pub owned_by: Option<String>,
    #[serde(default)]
    pub permission: Vec<ModelPermission>,
    #[serde(default)]
    pub root: Option<String>,
    #[serde(default)]
    pub parent: Option<String>,
}

#[derive(Deserialize, Debug, Clone)]
pub struct ModelPermission {
    pub id: String,
    #[serde(default)]
    pub object: Option<String>,
    #[serde(default)]
    pub created: Option<u64>,
    #[serde(default)]
    pub allow_create_engine: bool,
    #[serde(default)]
    pub allow_sampling: bool,
    #[serde(default)]
    pub allow_logprobs: bool,
    #[serde(default)]
    pub allow_search_indices: bool,
    #[serde(default)]
    pub allow_view: bool,
    #[serde(default)]
    pub allow_fine_tuning: bool,
    #[serde(default)]
    pub organization: Option<String>,
    #[serde(default)]
    pub group: Option<String>,
    #[serde(default)]
    pub is_blocking: bool,
}

/// An engine, the older name for a model.
#[derive(Deserialize, Debug, Clone)]
pub struct Engine {
    pub id: String,
    #[serde(default)]
    pub object: Option<String>,
    #[serde(default)]
    pub owner: Option<String>,
    #[serde(default)]
    pub ready: bool,
}

/// Lists the models available to the account.
#[derive(Debug, Clone, Copy, Default)]
pub struct ListModels;

bodiless_request!(ListModels => ListResponse<Model>, GET, |_r| "/v1/models".to_string(), []);

/// Looks up a single model.
#[derive(Debug, Clone)]
pub struct RetrieveModel {
    pub id: String,
}

impl RetrieveModel {
    pub fn new(id: impl Into<String>) -> Self {
        Self { id: id.into() }
    }
}

bodiless_request!(
    RetrieveModel => Model,
    GET,
    |r| format!("/v1/models/{}", r.id),
    ["id": r.id]
);

/// Deletes a model produced by a fine-tune. Only the owning organization may do this.
#[derive(Debug, Clone)]
pub struct DeleteFineTuneModel {
    pub model: String,
}

impl DeleteFineTuneModel {
    pub fn new(model: impl Into<String>) -> Self {
        Self {
            model: model.into(),
        }
    }
}

bodiless_request!(
    DeleteFineTuneModel => DeleteResponse,
    DELETE,
    |r| format!("/v1/models/{}", r.model),
    ["model": r.model]
);

/// Lists engines. Superseded by [`ListModels`].
#[derive(Debug, Clone, Copy, Default)]
pub struct ListEngines;

bodiless_request!(ListEngines => ListResponse<Engine>, GET, |_r| "/v1/engines".to_string(), []);

/// Looks up a single engine. Superseded by [`RetrieveModel`].
#[derive(Debug, Clone)]
pub struct RetrieveEngine {
    pub id: String,
}

impl RetrieveEngine {
    pub fn new(id: impl Into<String>) -> Self {
        Self { id: id.into() }
    }
}

bodiless_request!(
    RetrieveEngine => Engine,
    GET,
    |r| format!("/v1/engines/{}", r.id),
    ["id": r.id]
);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::endpoints::OpenAIRequestProvider;

    #[test]
    fn paths_include_the_id() {
        assert_eq!(
            RetrieveModel::new("code-davinci-002").path_with_leading_slash(),
            "/v1/models/code-davinci-002"
        );
        assert_eq!(
            DeleteFineTuneModel::new("curie:ft-acme-2023").path_with_leading_slash(),
            "/v1/models/curie:ft-acme-2023"
        );
        assert_eq!(ListEngines.path_with_leading_slash(), "/v1/engines");
    }

    #[test]
    fn blank_ids_are_rejected() {
        assert!(RetrieveModel::new("").validate().is_err());
        assert!(RetrieveEngine::new(" ").validate().is_err());
        assert!(ListModels.validate().is_ok());
    }

    #[test]
    fn model_list_decodes() {
        let body = r#"{
            "object": "list",
            "data": [{
                "id": "babbage",
                "object": "model",
                "created": 1649358449,
                "owned_by": "openai",
                "permission": [{"id": "modelperm-1", "allow_sampling": true, "is_blocking": false}],
                "root": "babbage",
                "parent": null
            }]
        }"#;
        let list: ListResponse<Model> = serde_json::from_str(body).unwrap();
        assert_eq!(list.data.len(), 1);
        assert_eq!(list.data[0].owned_by.as_deref(), Some("openai"));
        assert!(list.data[0].permission[0].allow_sampling);
    }
}
