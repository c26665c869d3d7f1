use std::path::Path;

use reqwest::multipart::Part;

use crate::{OpenAIError, OpenAIResult};

/// A file payload for the multipart endpoints (images, uploads, audio).
///
/// The bytes are owned, so the source file is already closed by the time a request
/// is sent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileUpload {
    file_name: String,
    bytes: Vec<u8>,
}

impl FileUpload {
    pub fn new(file_name: impl Into<String>, bytes: impl Into<Vec<u8>>) -> Self {
        Self {
            file_name: file_name.into(),
            bytes: bytes.into(),
        }
    }

    /// Reads the whole file at `path`. This is a blocking read.
    pub fn from_path(path: impl AsRef<Path>) -> OpenAIResult<Self> {
        let path = path.as_ref();
        let bytes = std::fs::read(path)?;
        let file_name = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_default();
        Ok(Self { file_name, bytes })
    }

    pub fn file_name(&self) -> &str {
        &self.file_name
    }

    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    pub(crate) fn part(&self, mime: Option<&str>) -> OpenAIResult<Part> {
        let part = Part::bytes(self.bytes.clone()).file_name(self.file_name.clone());
        match mime {
            Some(mime) => part
                .mime_str(mime)
                .map_err(|err| OpenAIError::Parameter(format!("invalid mime type {mime}: {err}"))),
            None => Ok(part),
        }
    }
}
