//! A typed client for the [OpenAI REST API](https://platform.openai.com/docs/api-reference):
//! models, completions, chat, edits, images, embeddings, moderations, files, fine-tunes
//! and speech to text.
//!
//! ```no_run
//! use openai_rest::{endpoints::completions::Completion, OpenAI};
//!
//! # async fn run() -> openai_rest::OpenAIResult<()> {
//! let openai = OpenAI::from_api_key("sk-...")?;
//! let response = openai
//!     .completions(&Completion::prompt("Say hello").max_tokens(16).build())
//!     .await?;
//! println!("{:?}", response.take_first_choice().map(|c| c.text));
//! # Ok(())
//! # }
//! ```

mod auth;
mod client;
pub mod config;
pub mod endpoints;
pub mod error;
pub mod legacy;
pub mod logging;
mod util;
pub mod validate;

use std::sync::Arc;

pub use auth::{KeySelector, KeyStrategy, RandomKey, RoundRobin};
pub use config::{Config, ConfigBuilder, HttpProxy};
use endpoints::OpenAIRequestProvider;
pub use error::{OpenAIAPIError, OpenAIError, OpenAIResult, RetryReason};
pub use legacy::LegacyClient;
pub use logging::{HttpLogger, LogLevel, TracingLogger};
use reqwest::header::{HeaderMap, HeaderName, HeaderValue, AUTHORIZATION};
use serde::Deserialize;
pub use util::FileUpload;

/// A handle to OpenAI. Cheap to clone; clones share the HTTP client and the key rotation.
#[derive(Clone, Debug)]
pub struct OpenAI {
    inner: Arc<Inner>,
}

#[derive(Debug)]
struct Inner {
    client: reqwest::Client,
    keys: auth::ApiKeys,
    base_url: String,
    headers: HeaderMap,
    loggers: Vec<Arc<dyn HttpLogger>>,
}

impl OpenAI {
    /// Creates a new instance of OpenAI from the provided configuration.
    pub fn new(config: Config) -> OpenAIResult<Self> {
        let keys = auth::ApiKeys::new(config.api_keys.clone(), config.selector())
            .ok_or_else(|| OpenAIError::Config("at least one api key is required".to_string()))?;
        let base_url = config.base_url()?;
        let client = config.http_client()?;
        let headers = extra_headers(&config.headers)?;

        Ok(Self {
            inner: Arc::new(Inner {
                client,
                keys,
                base_url,
                headers,
                loggers: config.loggers,
            }),
        })
    }

    /// Creates a client with a single key and default settings.
    pub fn from_api_key(api_key: impl Into<String>) -> OpenAIResult<Self> {
        Self::new(Config::api_key(api_key).build())
    }

    /// Sends a request to the OpenAI API.
    pub async fn req<R: OpenAIRequestProvider>(&self, r: &R) -> OpenAIResult<R::Response> {
        endpoints::send_request(self, r).await
    }
}

fn extra_headers(headers: &[(String, String)]) -> OpenAIResult<HeaderMap> {
    let mut map = HeaderMap::new();
    for (name, value) in headers {
        let name = HeaderName::from_bytes(name.as_bytes())
            .map_err(|err| OpenAIError::Config(format!("invalid header name {name:?}: {err}")))?;
        if name == AUTHORIZATION {
            tracing::warn!("ignoring configured Authorization header, api keys are used instead");
            continue;
        }
        let value = HeaderValue::from_str(value)
            .map_err(|err| OpenAIError::Config(format!("invalid value for header {name}: {err}")))?;
        map.append(name, value);
    }
    Ok(map)
}

/// The token usage of a request.
#[derive(Deserialize, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Usage {
    #[serde(default)]
    pub prompt_tokens: u32,
    #[serde(default)]
    pub completion_tokens: u32,
    #[serde(default)]
    pub total_tokens: u32,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_key_is_a_config_error() {
        let err = OpenAI::new(Config::api_keys(Vec::new()).build()).unwrap_err();
        assert!(matches!(err, OpenAIError::Config(_)));

        let err = OpenAI::from_api_key("   ").unwrap_err();
        assert!(matches!(err, OpenAIError::Config(_)));
    }

    #[test]
    fn invalid_extra_header_is_a_config_error() {
        let config = Config::api_key("sk-test")
            .headers(vec![("bad header".into(), "x".into())])
            .build();
        assert!(matches!(OpenAI::new(config), Err(OpenAIError::Config(_))));
    }

    #[test]
    fn authorization_cannot_be_overridden() {
        let headers = extra_headers(&[
            ("Authorization".into(), "Bearer other".into()),
            ("OpenAI-Organization".into(), "org-1".into()),
        ])
        .unwrap();
        assert!(headers.get(AUTHORIZATION).is_none());
        assert_eq!(headers.get("openai-organization").unwrap(), "org-1");
    }
}
