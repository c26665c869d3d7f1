use reqwest::Method;
use serde::Deserialize;

use super::{
    bodiless_request, DeleteResponse, ListResponse, MultipartBody, OpenAIRequestProvider,
    RequestBody,
};
use crate::{util::FileUpload, validate, OpenAIResult};

/// The purpose uploads get when none is given.
pub const DEFAULT_FILE_PURPOSE: &str = "fine-tune";

/// A file stored with the API.
#[derive(Deserialize, Debug, Clone)]
pub struct File {
    pub id: String,
    #[serde(default)]
    pub object: Option<String>,
    #[serde(default)]
    pub bytes: u64,
    #[serde(default)]
    pub created_at: Option<u64>,
    #[serde(default)]
    pub filename: Option<String>,
    #[serde(default)]
    pub purpose: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub status_details: Option<String>,
}

/// The upload endpoint answers with the stored file's metadata.
pub type UploadFileResponse = File;

#[derive(Debug, Clone, Copy, Default)]
pub struct ListFiles;

bodiless_request!(ListFiles => ListResponse<File>, GET, |_r| "/v1/files".to_string(), []);

/// Uploads a file, typically JSON Lines training data for a fine-tune.
#[derive(Debug, Clone)]
pub struct UploadFile {
    purpose: String,
    file: FileUpload,
}

impl UploadFile {
    pub fn new(purpose: impl Into<String>, file: FileUpload) -> Self {
        Self {
            purpose: purpose.into(),
            file,
        }
    }

    /// An upload with the default `fine-tune` purpose.
    pub fn fine_tune(file: FileUpload) -> Self {
        Self::new(DEFAULT_FILE_PURPOSE, file)
    }
}

impl OpenAIRequestProvider for UploadFile {
    type Response = UploadFileResponse;

    const METHOD: Method = Method::POST;

    fn path_with_leading_slash(&self) -> String {
        "/v1/files".to_string()
    }

    fn validate(&self) -> OpenAIResult<()> {
        validate::require_non_blank("purpose", &self.purpose)?;
        validate::require_file("file", &self.file)
    }

    fn body(&self) -> OpenAIResult<RequestBody> {
        let form = MultipartBody::new()
            .text("purpose", &self.purpose)
            .file("file", &self.file, None)?;
        Ok(RequestBody::Multipart(form))
    }
}

impl super::private::Sealed for UploadFile {}

#[derive(Debug, Clone)]
pub struct RetrieveFile {
    pub file_id: String,
}

impl RetrieveFile {
    pub fn new(file_id: impl Into<String>) -> Self {
        Self {
            file_id: file_id.into(),
        }
    }
}

bodiless_request!(
    RetrieveFile => File,
    GET,
    |r| format!("/v1/files/{}", r.file_id),
    ["file_id": r.file_id]
);

#[derive(Debug, Clone)]
pub struct DeleteFile {
    pub file_id: String,
}

impl DeleteFile {
    pub fn new(file_id: impl Into<String>) -> Self {
        Self {
            file_id: file_id.into(),
        }
    }
}

bodiless_request!(
    DeleteFile => DeleteResponse,
    DELETE,
    |r| format!("/v1/files/{}", r.file_id),
    ["file_id": r.file_id]
);

pub(crate) fn content_path(file_id: &str) -> OpenAIResult<String> {
    validate::require_path_segment("file_id", file_id)?;
    Ok(format!("/v1/files/{file_id}/content"))
}
