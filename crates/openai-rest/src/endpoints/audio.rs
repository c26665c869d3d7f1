//! Speech to text. Transcription keeps the spoken language, translation produces
//! English. Both upload the audio as multipart form data.

use bon::Builder;
use reqwest::Method;
use serde::Deserialize;

use super::{MultipartBody, OpenAIRequestProvider, RequestBody};
use crate::{util::FileUpload, validate, OpenAIResult};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum WhisperModel {
    #[default]
    Whisper1,
}

impl WhisperModel {
    pub fn as_str(self) -> &'static str {
        match self {
            WhisperModel::Whisper1 => "whisper-1",
        }
    }
}

/// Transcribes audio in its original language.
///
/// Construct with `Transcription::file`.
#[derive(Debug, Clone, Builder)]
#[builder(start_fn = file)]
pub struct Transcription {
    #[builder(start_fn)]
    file: FileUpload,
    #[builder(default)]
    model: WhisperModel,
    /// Text to guide the model's style, in the audio's language.
    #[builder(into)]
    prompt: Option<String>,
    temperature: Option<f32>,
    /// ISO-639-1 code of the spoken language.
    #[builder(into)]
    language: Option<String>,
}

impl OpenAIRequestProvider for Transcription {
    type Response = WhisperResponse;

    const METHOD: Method = Method::POST;

    fn path_with_leading_slash(&self) -> String {
        "/v1/audio/transcriptions".to_string()
    }

    fn validate(&self) -> OpenAIResult<()> {
        validate::require_file("file", &self.file)
    }

    fn body(&self) -> OpenAIResult<RequestBody> {
        let form = MultipartBody::new()
            .file("file", &self.file, None)?
            .text("model", self.model.as_str())
            .maybe_text("prompt", self.prompt.as_ref())
            .maybe_text("temperature", self.temperature)
            .maybe_text("language", self.language.as_ref());
        Ok(RequestBody::Multipart(form))
    }
}

impl super::private::Sealed for Transcription {}

/// Translates audio into English text.
///
/// Construct with `Translation::file`.
#[derive(Debug, Clone, Builder)]
#[builder(start_fn = file)]
pub struct Translation {
    #[builder(start_fn)]
    file: FileUpload,
    #[builder(default)]
    model: WhisperModel,
    /// Text to guide the model's style, in English.
    #[builder(into)]
    prompt: Option<String>,
    temperature: Option<f32>,
}

impl OpenAIRequestProvider for Translation {
    type Response = WhisperResponse;

    const METHOD: Method = Method::POST;

    fn path_with_leading_slash(&self) -> String {
        "/v1/audio/translations".to_string()
    }

    fn validate(&self) -> OpenAIResult<()> {
        validate::require_file("file", &self.file)
    }

    fn body(&self) -> OpenAIResult<RequestBody> {
        let form = MultipartBody::new()
            .file("file", &self.file, None)?
            .text("model", self.model.as_str())
            .maybe_text("prompt", self.prompt.as_ref())
            .maybe_text("temperature", self.temperature);
        Ok(RequestBody::Multipart(form))
    }
}

impl super::private::Sealed for Translation {}

#[derive(Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct WhisperResponse {
    pub text: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_audio_is_rejected() {
        let empty = FileUpload::new("1.m4a", Vec::new());
        assert!(Transcription::file(empty.clone()).build().validate().is_err());
        assert!(Translation::file(empty).build().validate().is_err());
    }

    #[test]
    fn paths() {
        let audio = FileUpload::new("1.m4a", vec![0, 1, 2]);
        assert_eq!(
            Transcription::file(audio.clone()).build().path_with_leading_slash(),
            "/v1/audio/transcriptions"
        );
        assert_eq!(
            Translation::file(audio).build().path_with_leading_slash(),
            "/v1/audio/translations"
        );
    }
}
