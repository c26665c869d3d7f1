//! Precondition checks shared by the request types. Every failure here is an
//! [`OpenAIError::Parameter`] raised before anything is sent.

use crate::{util::FileUpload, OpenAIError, OpenAIResult};

/// Largest image or mask the image edit and variation endpoints accept.
pub const MAX_IMAGE_BYTES: usize = 4 * 1024 * 1024;

/// Longest prompt the image endpoints accept, in characters.
pub const MAX_IMAGE_PROMPT_CHARS: usize = 1000;

pub(crate) fn require_non_blank(field: &str, value: &str) -> OpenAIResult<()> {
    if value.trim().is_empty() {
        return Err(OpenAIError::parameter(format!("{field} must not be empty")));
    }
    Ok(())
}

/// Ids are spliced into URL paths, so they must be a single non-blank segment.
pub(crate) fn require_path_segment(field: &str, value: &str) -> OpenAIResult<()> {
    require_non_blank(field, value)?;
    if value == "." || value == ".." || value.contains(&['/', '\\', '?', '#', '%'][..]) {
        return Err(OpenAIError::parameter(format!(
            "{field} must be a single path segment, got {value:?}"
        )));
    }
    Ok(())
}

pub(crate) fn require_file(field: &str, file: &FileUpload) -> OpenAIResult<()> {
    if file.is_empty() {
        return Err(OpenAIError::parameter(format!("{field} must not be empty")));
    }
    Ok(())
}

pub(crate) fn check_image_prompt(prompt: &str) -> OpenAIResult<()> {
    require_non_blank("prompt", prompt)?;
    if prompt.chars().count() > MAX_IMAGE_PROMPT_CHARS {
        return Err(OpenAIError::parameter(format!(
            "prompt must be at most {MAX_IMAGE_PROMPT_CHARS} characters"
        )));
    }
    Ok(())
}

/// Images and masks must be PNG files of at most [`MAX_IMAGE_BYTES`].
pub(crate) fn check_png(field: &str, file: &FileUpload) -> OpenAIResult<()> {
    require_file(field, file)?;
    if !file.file_name().to_ascii_lowercase().ends_with(".png") {
        return Err(OpenAIError::parameter(format!(
            "{field} must be a png file, got {:?}",
            file.file_name()
        )));
    }
    if file.len() > MAX_IMAGE_BYTES {
        return Err(OpenAIError::parameter(format!(
            "{field} must be at most 4MB, got {} bytes",
            file.len()
        )));
    }
    Ok(())
}

/// Clamps an image count into `1..=10`.
pub(crate) fn clamp_image_count(n: u32) -> u32 {
    match n {
        0 => {
            tracing::warn!(n, "image count below 1, using 1");
            1
        }
        11.. => {
            tracing::warn!(n, "image count above 10, using 10");
            10
        }
        n => n,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_values_are_rejected() {
        assert!(matches!(require_non_blank("id", "  "), Err(OpenAIError::Parameter(_))));
        assert!(require_non_blank("id", "file-123").is_ok());
    }

    #[test]
    fn ids_must_stay_in_their_path_segment() {
        for id in ["../files/file-1", "abc?x=1", "abc#frag", "a%2Fb", "a/b", "..", "a\\b"] {
            assert!(
                matches!(require_path_segment("id", id), Err(OpenAIError::Parameter(_))),
                "{id} should be rejected"
            );
        }
        assert!(require_path_segment("model", "curie:ft-acme-2023-02-16-05-42-02").is_ok());
        assert!(require_path_segment("id", "file-XjGxS3KTG0uNmNOK362iJua3").is_ok());
        assert!(require_path_segment("id", " ").is_err());
    }

    #[test]
    fn png_check_accepts_either_case() {
        assert!(check_png("image", &FileUpload::new("a.png", vec![1])).is_ok());
        assert!(check_png("image", &FileUpload::new("A.PNG", vec![1])).is_ok());
    }

    #[test]
    fn png_check_rejects_other_formats() {
        let err = check_png("image", &FileUpload::new("photo.jpg", vec![1])).unwrap_err();
        assert!(matches!(err, OpenAIError::Parameter(ref m) if m.contains("png")));
    }

    #[test]
    fn png_check_enforces_the_size_limit() {
        assert!(check_png("mask", &FileUpload::new("m.png", vec![0; MAX_IMAGE_BYTES])).is_ok());
        let err = check_png("mask", &FileUpload::new("m.png", vec![0; MAX_IMAGE_BYTES + 1]))
            .unwrap_err();
        assert!(matches!(err, OpenAIError::Parameter(ref m) if m.contains("4MB")));
    }

    #[test]
    fn image_prompt_length_is_bounded() {
        assert!(check_image_prompt(&"a".repeat(1000)).is_ok());
        assert!(check_image_prompt(&"a".repeat(1001)).is_err());
        assert!(check_image_prompt("").is_err());
    }

    #[test]
    fn counts_are_clamped() {
        assert_eq!(clamp_image_count(0), 1);
        assert_eq!(clamp_image_count(4), 4);
        assert_eq!(clamp_image_count(10), 10);
        assert_eq!(clamp_image_count(42), 10);
    }
}
