use reqwest::StatusCode;
use serde::Deserialize;

pub type OpenAIResult<T> = std::result::Result<T, OpenAIError>;

#[derive(Debug, thiserror::Error)]
pub enum OpenAIError {
    /// A required argument was missing or out of range. Never reaches the network.
    #[error("invalid parameter: {0}")]
    Parameter(String),
    #[error("invalid client configuration: {0}")]
    Config(String),
    /// The API rejected the key (HTTP 401).
    #[error("authentication failed: {0}")]
    Authentication(String),
    #[error("OpenAI API error: {0}")]
    API(OpenAIAPIError),
    /// The request failed for a reason that could not be read from the response.
    /// Callers should back off and try again.
    #[error("request failed, retry later: {0}")]
    Retryable(RetryReason),
    #[error("failed to deserialize api response: {0}")]
    Serde(serde_json::Error),
    #[error("failed to read upload: {0}")]
    Io(std::io::Error),
}

impl OpenAIError {
    /// Whether the caller should retry the request.
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::Retryable(_))
    }

    pub(crate) fn parameter(message: impl Into<String>) -> Self {
        let message = message.into();
        tracing::error!(%message, "rejected request parameters");
        Self::Parameter(message)
    }
}

impl From<reqwest::Error> for OpenAIError {
    fn from(err: reqwest::Error) -> Self {
        Self::Retryable(RetryReason::Transport(err))
    }
}

impl From<serde_json::Error> for OpenAIError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serde(err)
    }
}

impl From<std::io::Error> for OpenAIError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err)
    }
}

/// Why a request ended up in [`OpenAIError::Retryable`].
#[derive(Debug, thiserror::Error)]
pub enum RetryReason {
    #[error("unrecognized error response (status {status}): {body}")]
    UnrecognizedResponse { status: u16, body: String },
    #[error("http error: {0}")]
    Transport(reqwest::Error),
    #[error("no choices")]
    NoChoices,
}

/// The `error` object of an OpenAI error envelope.
#[derive(Debug, Deserialize, Clone, thiserror::Error)]
#[error("{message}")]
pub struct OpenAIAPIError {
    pub message: String,
    #[serde(rename = "type", default)]
    pub kind: Option<String>,
    #[serde(default)]
    pub param: Option<String>,
    /// Usually a string, but some endpoints send numbers.
    #[serde(default)]
    pub code: Option<serde_json::Value>,
}

#[derive(Deserialize)]
struct ErrorEnvelope {
    error: Option<OpenAIAPIError>,
}

/// Pulls `error` out of `{"error": {...}}`, if the body has one with a message.
pub(crate) fn parse_error_envelope(body: &[u8]) -> Option<OpenAIAPIError> {
    serde_json::from_slice::<ErrorEnvelope>(body).ok()?.error
}

/// Maps a non-success status and its body to the matching error.
pub(crate) fn classify_failure(status: StatusCode, body: &[u8]) -> OpenAIError {
    tracing::error!(
        status = status.as_u16(),
        body = %String::from_utf8_lossy(body),
        "OpenAI request failed"
    );

    let envelope = parse_error_envelope(body);
    if status == StatusCode::UNAUTHORIZED {
        let message = envelope.map(|e| e.message).unwrap_or_else(|| {
            status
                .canonical_reason()
                .unwrap_or("Unauthorized")
                .to_string()
        });
        return OpenAIError::Authentication(message);
    }

    match envelope {
        Some(error) => OpenAIError::API(error),
        None => OpenAIError::Retryable(RetryReason::UnrecognizedResponse {
            status: status.as_u16(),
            body: String::from_utf8_lossy(body).into_owned(),
        }),
    }
}

/// Decodes a success body. A 2xx body can still carry an `error` object, in which case
/// that error is returned instead.
pub(crate) fn decode_success<T>(body: &[u8]) -> OpenAIResult<T>
where
    T: for<'de> Deserialize<'de>,
{
    let json = serde_json::from_slice::<serde_json::Value>(body)?;
    match json.get("error") {
        Some(err) if !err.is_null() => {
            let api_err = serde_json::from_value(err.clone())?;
            Err(OpenAIError::API(api_err))
        }
        _ => serde_json::from_value(json).map_err(Into::into),
    }
}
