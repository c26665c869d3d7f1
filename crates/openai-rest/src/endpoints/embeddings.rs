use bon::Builder;
use reqwest::Method;
use serde::{Deserialize, Serialize};

use super::{OpenAIRequestProvider, RequestBody};
use crate::{validate, OpenAIResult, Usage};

/// The model used to create text embeddings.
#[derive(Serialize, Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum EmbeddingsModel {
    #[default]
    #[serde(rename = "text-embedding-ada-002")]
    TextEmbeddingAda002,
    #[serde(rename = "text-search-ada-doc-001")]
    TextSearchAdaDoc001,
}

/// A text embeddings creation request.
///
/// Construct with `Embedding::input`.
#[derive(Serialize, Debug, Clone, Builder)]
#[builder(start_fn = input)]
pub struct Embedding {
    #[builder(start_fn, into)]
    input: String,
    #[builder(default)]
    model: EmbeddingsModel,
    #[builder(into)]
    #[serde(skip_serializing_if = "Option::is_none")]
    user: Option<String>,
}

impl OpenAIRequestProvider for Embedding {
    type Response = EmbeddingResponse;

    const METHOD: reqwest::Method = Method::POST;

    fn path_with_leading_slash(&self) -> String {
        "/v1/embeddings".to_string()
    }

    fn validate(&self) -> OpenAIResult<()> {
        validate::require_non_blank("input", &self.input)
    }

    fn body(&self) -> OpenAIResult<RequestBody> {
        RequestBody::json(self)
    }
}

impl super::private::Sealed for Embedding {}

#[derive(Deserialize, Debug, Clone)]
pub struct EmbeddingResponse {
    #[serde(default)]
    pub object: Option<String>,
    pub data: Vec<EmbeddingData>,
    #[serde(default)]
    pub model: Option<String>,
    #[serde(default)]
    pub usage: Option<Usage>,
}

impl EmbeddingResponse {
    /// Consumes the response and gives the first embedding.
    pub fn embedding(self) -> Vec<f32> {
        self.data
            .into_iter()
            .next()
            .map(|d| d.embedding)
            .unwrap_or_default()
    }

    /// Gives a reference to the first embedding, empty if there is none.
    pub fn embedding_ref(&self) -> &[f32] {
        self.data
            .first()
            .map(|d| d.embedding.as_slice())
            .unwrap_or_default()
    }
}

#[derive(Deserialize, Debug, Clone)]
pub struct EmbeddingData {
    #[serde(default)]
    pub object: Option<String>,
    pub embedding: Vec<f32>,
    #[serde(default)]
    pub index: u32,
}
