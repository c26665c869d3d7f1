//! Image generation, editing and variations.
//!
//! Edits and variations upload PNG files of at most 4MB. Those limits are checked
//! before anything is sent.

use bon::Builder;
use reqwest::Method;
use serde::{Deserialize, Serialize, Serializer};

use super::{MultipartBody, OpenAIRequestProvider, RequestBody};
use crate::{util::FileUpload, validate, OpenAIResult};

/// Default number of images per request.
pub const DEFAULT_IMAGE_COUNT: u32 = 1;

#[derive(Serialize, Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ImageSize {
    #[serde(rename = "256x256")]
    Small,
    #[default]
    #[serde(rename = "512x512")]
    Medium,
    #[serde(rename = "1024x1024")]
    Large,
}

impl ImageSize {
    pub fn as_str(self) -> &'static str {
        match self {
            ImageSize::Small => "256x256",
            ImageSize::Medium => "512x512",
            ImageSize::Large => "1024x1024",
        }
    }
}

#[derive(Serialize, Debug, Clone, Copy, Default, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ImageResponseFormat {
    #[default]
    Url,
    B64Json,
}

impl ImageResponseFormat {
    pub fn as_str(self) -> &'static str {
        match self {
            ImageResponseFormat::Url => "url",
            ImageResponseFormat::B64Json => "b64_json",
        }
    }
}

fn clamped_count<S: Serializer>(n: &u32, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_u32(validate::clamp_image_count(*n))
}

/// Creates images from a text prompt.
///
/// Construct with `ImageGeneration::prompt`. `n` is clamped into `1..=10`.
#[derive(Serialize, Debug, Clone, Builder)]
#[builder(start_fn = prompt)]
pub struct ImageGeneration {
    #[builder(start_fn, into)]
    prompt: String,
    #[builder(default = DEFAULT_IMAGE_COUNT)]
    #[serde(serialize_with = "clamped_count")]
    n: u32,
    #[builder(default)]
    size: ImageSize,
    #[builder(default)]
    response_format: ImageResponseFormat,
    #[builder(into)]
    #[serde(skip_serializing_if = "Option::is_none")]
    user: Option<String>,
}

impl ImageGeneration {
    /// The number of images that will be requested.
    pub fn n(&self) -> u32 {
        validate::clamp_image_count(self.n)
    }
}

impl OpenAIRequestProvider for ImageGeneration {
    type Response = ImageResponse;

    const METHOD: Method = Method::POST;

    fn path_with_leading_slash(&self) -> String {
        "/v1/images/generations".to_string()
    }

    fn validate(&self) -> OpenAIResult<()> {
        validate::check_image_prompt(&self.prompt)
    }

    fn body(&self) -> OpenAIResult<RequestBody> {
        RequestBody::json(self)
    }
}

impl super::private::Sealed for ImageGeneration {}

/// Edits or extends `image` following `prompt`. Transparent areas of `mask` (or of the
/// image itself when no mask is given) mark where to edit.
///
/// Construct with `ImageEdit::image`.
#[derive(Debug, Clone, Builder)]
#[builder(start_fn = image)]
pub struct ImageEdit {
    #[builder(start_fn)]
    image: FileUpload,
    #[builder(into)]
    prompt: String,
    mask: Option<FileUpload>,
    #[builder(default = DEFAULT_IMAGE_COUNT)]
    n: u32,
    #[builder(default)]
    size: ImageSize,
    #[builder(default)]
    response_format: ImageResponseFormat,
    #[builder(into)]
    user: Option<String>,
}

impl OpenAIRequestProvider for ImageEdit {
    type Response = ImageResponse;

    const METHOD: Method = Method::POST;

    fn path_with_leading_slash(&self) -> String {
        "/v1/images/edits".to_string()
    }

    fn validate(&self) -> OpenAIResult<()> {
        validate::check_png("image", &self.image)?;
        if let Some(mask) = &self.mask {
            validate::check_png("mask", mask)?;
        }
        validate::check_image_prompt(&self.prompt)
    }

    fn body(&self) -> OpenAIResult<RequestBody> {
        let mut form = MultipartBody::new().file("image", &self.image, Some("image/png"))?;
        if let Some(mask) = &self.mask {
            form = form.file("mask", mask, Some("image/png"))?;
        }
        let form = form
            .text("prompt", &self.prompt)
            .text("n", validate::clamp_image_count(self.n))
            .text("size", self.size.as_str())
            .text("response_format", self.response_format.as_str())
            .maybe_text("user", self.user.as_ref());
        Ok(RequestBody::Multipart(form))
    }
}

impl super::private::Sealed for ImageEdit {}

/// Creates variations of `image`.
///
/// Construct with `ImageVariation::image`.
#[derive(Debug, Clone, Builder)]
#[builder(start_fn = image)]
pub struct ImageVariation {
    #[builder(start_fn)]
    image: FileUpload,
    #[builder(default = DEFAULT_IMAGE_COUNT)]
    n: u32,
    #[builder(default)]
    size: ImageSize,
    #[builder(default)]
    response_format: ImageResponseFormat,
    #[builder(into)]
    user: Option<String>,
}

impl OpenAIRequestProvider for ImageVariation {
    type Response = ImageResponse;

    const METHOD: Method = Method::POST;

    fn path_with_leading_slash(&self) -> String {
        "/v1/images/variations".to_string()
    }

    fn validate(&self) -> OpenAIResult<()> {
        validate::check_png("image", &self.image)
    }

    fn body(&self) -> OpenAIResult<RequestBody> {
        let form = MultipartBody::new()
            .file("image", &self.image, Some("image/png"))?
            .text("n", validate::clamp_image_count(self.n))
            .text("size", self.size.as_str())
            .text("response_format", self.response_format.as_str())
            .maybe_text("user", self.user.as_ref());
        Ok(RequestBody::Multipart(form))
    }
}

impl super::private::Sealed for ImageVariation {}

#[derive(Deserialize, Debug, Clone)]
pub struct ImageResponse {
    #[serde(default)]
    pub created: Option<u64>,
    #[serde(default)]
    pub data: Vec<ImageItem>,
}

/// One generated image, as a URL or base64 data depending on the response format.
#[derive(Deserialize, Debug, Clone)]
pub struct ImageItem {
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub b64_json: Option<String>,
}
