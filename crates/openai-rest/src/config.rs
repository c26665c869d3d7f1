use std::{sync::Arc, time::Duration};

use bon::Builder;

use crate::{
    auth::{KeySelector, KeyStrategy},
    logging::HttpLogger,
    OpenAIError, OpenAIResult,
};

/// The API origin used when no host is configured.
pub const DEFAULT_API_HOST: &str = "https://api.openai.com/";

/// Default connect, write and read timeout, in seconds.
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// An HTTP proxy that every request is routed through.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpProxy {
    pub host: String,
    pub port: u16,
}

impl HttpProxy {
    pub fn new(host: impl Into<String>, port: u16) -> Self {
        Self {
            host: host.into(),
            port,
        }
    }

    fn url(&self) -> String {
        if self.host.contains("://") {
            format!("{}:{}", self.host, self.port)
        } else {
            format!("http://{}:{}", self.host, self.port)
        }
    }
}

/// Client configuration. Build one with [`Config::api_key`] or [`Config::api_keys`],
/// then hand it to [`crate::OpenAI::new`].
///
/// ```no_run
/// use openai_rest::{Config, HttpProxy, KeyStrategy, OpenAI};
///
/// let openai = OpenAI::new(
///     Config::api_keys(vec!["sk-one".into(), "sk-two".into()])
///         .key_strategy(KeyStrategy::Random)
///         .connect_timeout(50)
///         .proxy(HttpProxy::new("192.168.1.111", 7890))
///         .build(),
/// )?;
/// # Ok::<(), openai_rest::OpenAIError>(())
/// ```
#[derive(Debug, Clone, Builder)]
#[builder(start_fn = api_keys)]
pub struct Config {
    #[builder(start_fn)]
    pub(crate) api_keys: Vec<String>,
    /// Defaults to [`DEFAULT_API_HOST`].
    #[builder(into)]
    pub(crate) api_host: Option<String>,
    #[builder(default = DEFAULT_TIMEOUT_SECS)]
    pub(crate) connect_timeout: u64,
    #[builder(default = DEFAULT_TIMEOUT_SECS)]
    pub(crate) write_timeout: u64,
    #[builder(default = DEFAULT_TIMEOUT_SECS)]
    pub(crate) read_timeout: u64,
    pub(crate) proxy: Option<HttpProxy>,
    #[builder(default)]
    pub(crate) key_strategy: KeyStrategy,
    /// A custom key selector. Takes precedence over `key_strategy`.
    pub(crate) key_selector: Option<Arc<dyn KeySelector>>,
    /// Observers run, in order, for every request and response.
    #[builder(default)]
    pub(crate) loggers: Vec<Arc<dyn HttpLogger>>,
    /// Extra headers sent with every request.
    #[builder(default)]
    pub(crate) headers: Vec<(String, String)>,
}

impl Config {
    /// Starts a configuration with a single API key.
    pub fn api_key(key: impl Into<String>) -> ConfigBuilder {
        Self::api_keys(vec![key.into()])
    }

    pub(crate) fn selector(&self) -> Arc<dyn KeySelector> {
        match &self.key_selector {
            Some(selector) => Arc::clone(selector),
            None => self.key_strategy.selector(),
        }
    }

    pub(crate) fn base_url(&self) -> OpenAIResult<String> {
        let host = self.api_host.as_deref().unwrap_or(DEFAULT_API_HOST).trim();
        reqwest::Url::parse(host)
            .map_err(|err| OpenAIError::Config(format!("invalid api host {host:?}: {err}")))?;
        Ok(host.trim_end_matches('/').to_string())
    }

    /// Builds the one HTTP client owned by a handle created from this configuration.
    pub(crate) fn http_client(&self) -> OpenAIResult<reqwest::Client> {
        let timeouts = [
            ("connect", self.connect_timeout),
            ("write", self.write_timeout),
            ("read", self.read_timeout),
        ];
        if let Some((name, _)) = timeouts.iter().find(|(_, secs)| *secs == 0) {
            return Err(OpenAIError::Config(format!(
                "{name} timeout must be greater than zero"
            )));
        }

        // reqwest has no write timeout, so the overall deadline covers all three phases
        let total = self.connect_timeout + self.write_timeout + self.read_timeout;
        let mut builder = reqwest::Client::builder()
            .connect_timeout(Duration::from_secs(self.connect_timeout))
            .read_timeout(Duration::from_secs(self.read_timeout))
            .timeout(Duration::from_secs(total));

        if let Some(proxy) = &self.proxy {
            let proxy = reqwest::Proxy::all(proxy.url())
                .map_err(|err| OpenAIError::Config(format!("invalid proxy: {err}")))?;
            builder = builder.proxy(proxy);
        }

        builder
            .build()
            .map_err(|err| OpenAIError::Config(format!("failed to build http client: {err}")))
    }
}
