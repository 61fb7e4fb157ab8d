use crate::{CoreError, Result as CoreErrorResult};

use base64::Engine;
use base64::engine::general_purpose::STANDARD;

/// Largest accepted avatar upload (5 MiB).
pub const MAX_PROFILE_PICTURE_BYTES: usize = 5 * 1024 * 1024;

/// Avatar image encoded as a `data:<mime>;base64,...` URL, the form the
/// profile backend stores.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProfilePicture {
    data_url: String,
}

impl ProfilePicture {
    #[track_caller]
    pub fn from_bytes(mime_type: &str, bytes: &[u8]) -> CoreErrorResult<Self> {
        let mime_type = mime_type.trim().to_ascii_lowercase();

        if !mime_type.starts_with("image/") || mime_type.len() == "image/".len() {
            return Err(CoreError::validation(format!(
                "'{mime_type}' is not an image type"
            )));
        }
        if bytes.is_empty() {
            return Err(CoreError::validation("Image is empty"));
        }
        if bytes.len() > MAX_PROFILE_PICTURE_BYTES {
            return Err(CoreError::validation(format!(
                "Image is too large ({} bytes); the limit is 5MB",
                bytes.len()
            )));
        }

        Ok(Self {
            data_url: format!("data:{mime_type};base64,{}", STANDARD.encode(bytes)),
        })
    }

    pub fn data_url(&self) -> &str {
        &self.data_url
    }

    /// Image type guessed from a file extension.
    pub fn mime_for_extension(extension: &str) -> Option<&'static str> {
        match extension.to_ascii_lowercase().as_str() {
            "png" => Some("image/png"),
            "jpg" | "jpeg" => Some("image/jpeg"),
            "gif" => Some("image/gif"),
            "webp" => Some("image/webp"),
            "bmp" => Some("image/bmp"),
            "svg" => Some("image/svg+xml"),
            _ => None,
        }
    }
}
