use reqwest::{
    header::{AUTHORIZATION, CONTENT_TYPE},
    multipart::Form,
    Method, StatusCode,
};
use serde::{Deserialize, Serialize};

use crate::{
    error::{classify_failure, decode_success, OpenAIAPIError},
    logging::{LoggedRequest, LoggedResponse},
    util::FileUpload,
    OpenAI, OpenAIResult,
};

pub mod audio;
pub mod chat;
pub mod completions;
pub mod edits;
pub mod embeddings;
pub mod files;
pub mod fine_tunes;
pub mod images;
pub mod models;
pub mod moderations;

/// The generic `{"object": "list", "data": [...]}` envelope used by the list endpoints.
#[derive(Deserialize, Debug, Clone)]
pub struct ListResponse<T> {
    #[serde(default)]
    pub object: Option<String>,
    #[serde(default = "Vec::new")]
    pub data: Vec<T>,
    #[serde(default)]
    pub error: Option<OpenAIAPIError>,
}

/// Returned by the endpoints that delete a file or a fine-tuned model.
#[derive(Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct DeleteResponse {
    pub id: String,
    #[serde(default)]
    pub object: Option<String>,
    pub deleted: bool,
}

/// What goes in the body of a request.
pub enum RequestBody {
    /// No body (GET and DELETE requests, and bodiless POSTs).
    Empty,
    Json(String),
    Multipart(MultipartBody),
}

impl RequestBody {
    pub(crate) fn json<T: Serialize>(value: &T) -> OpenAIResult<Self> {
        Ok(Self::Json(serde_json::to_string(value)?))
    }
}

/// A multipart form plus a readable summary of its parts for the logging hooks.
pub struct MultipartBody {
    form: Form,
    summary: Vec<String>,
}

impl MultipartBody {
    pub(crate) fn new() -> Self {
        Self {
            form: Form::new(),
            summary: Vec::new(),
        }
    }

    pub(crate) fn text(mut self, name: &'static str, value: impl ToString) -> Self {
        let value = value.to_string();
        self.summary.push(format!("{name}={value}"));
        self.form = self.form.text(name, value);
        self
    }

    pub(crate) fn maybe_text(self, name: &'static str, value: Option<impl ToString>) -> Self {
        match value {
            Some(value) => self.text(name, value),
            None => self,
        }
    }

    pub(crate) fn file(
        mut self,
        name: &'static str,
        file: &FileUpload,
        mime: Option<&str>,
    ) -> OpenAIResult<Self> {
        self.summary.push(format!(
            "{name}=<{}, {} bytes>",
            file.file_name(),
            file.len()
        ));
        self.form = self.form.part(name, file.part(mime)?);
        Ok(self)
    }

    fn summary(&self) -> String {
        self.summary.join("&")
    }
}

pub(super) async fn send_request<R>(openai: &OpenAI, request: &R) -> OpenAIResult<R::Response>
where
    R: OpenAIRequestProvider,
{
    request.validate()?;
    let body = request.body()?;

    let (status, bytes) = dispatch(
        openai,
        R::METHOD,
        &request.path_with_leading_slash(),
        body,
    )
    .await?;

    if !status.is_success() {
        return Err(classify_failure(status, &bytes));
    }
    decode_success(&bytes)
}

/// Sends an authenticated request and returns the raw status and body. Failed statuses
/// are not interpreted here.
pub(crate) async fn dispatch(
    openai: &OpenAI,
    method: Method,
    path: &str,
    body: RequestBody,
) -> OpenAIResult<(StatusCode, Vec<u8>)> {
    let inner = &openai.inner;
    let url = format!("{}{path}", inner.base_url);
    let bearer_token = inner.keys.resolve();

    let preview = match &body {
        RequestBody::Empty => None,
        RequestBody::Json(json) => Some(json.clone()),
        RequestBody::Multipart(multipart) => Some(multipart.summary()),
    };
    for logger in &inner.loggers {
        logger.log_request(&LoggedRequest {
            method: &method,
            url: &url,
            body: preview.as_deref(),
        });
    }

    let builder = inner
        .client
        .request(method.clone(), &url)
        .headers(inner.headers.clone())
        .header(AUTHORIZATION, format!("Bearer {bearer_token}"));
    let builder = match body {
        RequestBody::Empty => builder.header(CONTENT_TYPE, "application/json"),
        RequestBody::Json(json) => builder.header(CONTENT_TYPE, "application/json").body(json),
        RequestBody::Multipart(multipart) => builder.multipart(multipart.form),
    };

    tracing::debug!(%method, %url, "sending OpenAI request");
    let response = builder.send().await?;
    let status = response.status();
    let bytes = response.bytes().await?.to_vec();

    for logger in &inner.loggers {
        logger.log_response(&LoggedResponse {
            method: &method,
            url: &url,
            status,
            body: &bytes,
        });
    }

    Ok((status, bytes))
}

/// Fetches a body that is not JSON, such as file contents.
pub(crate) async fn fetch_bytes(openai: &OpenAI, path: &str) -> OpenAIResult<Vec<u8>> {
    let (status, bytes) = dispatch(openai, Method::GET, path, RequestBody::Empty).await?;
    if !status.is_success() {
        return Err(classify_failure(status, &bytes));
    }
    Ok(bytes)
}

mod private {
    pub trait Sealed {}
}

/// Any type that can be sent to the client's `req` method.
pub trait OpenAIRequestProvider: private::Sealed {
    type Response: for<'de> Deserialize<'de>;
    const METHOD: Method;

    fn path_with_leading_slash(&self) -> String;

    /// Checks the request locally. Runs before anything is sent.
    fn validate(&self) -> OpenAIResult<()> {
        Ok(())
    }

    fn body(&self) -> OpenAIResult<RequestBody>;
}

/// Implements [`OpenAIRequestProvider`] for a request without a body. The listed
/// path parameters must each be a single non-blank path segment.
macro_rules! bodiless_request {
    (
        $ty:ty => $response:ty,
        $method:ident,
        |$this:ident| $path:expr,
        [$($field:literal: $value:expr),* $(,)?]
    ) => {
        impl $crate::endpoints::OpenAIRequestProvider for $ty {
            type Response = $response;

            const METHOD: reqwest::Method = reqwest::Method::$method;

            fn path_with_leading_slash(&self) -> String {
                let $this = self;
                $path
            }

            fn validate(&self) -> $crate::OpenAIResult<()> {
                let $this = self;
                $crate::endpoints::validate_path_ids(&[$(($field, $value.as_str())),*])
            }

            fn body(&self) -> $crate::OpenAIResult<$crate::endpoints::RequestBody> {
                Ok($crate::endpoints::RequestBody::Empty)
            }
        }

        impl $crate::endpoints::private::Sealed for $ty {}
    };
}

pub(crate) use bodiless_request;

pub(crate) fn validate_path_ids(ids: &[(&str, &str)]) -> OpenAIResult<()> {
    ids.iter()
        .try_for_each(|(field, value)| crate::validate::require_path_segment(field, value))
}
