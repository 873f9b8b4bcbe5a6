use crate::error::{Result, TitanError};
use crate::models::{ContentResponse, ImagesResponse};
use serde::{Deserialize, Serialize};

/// Text-to-image output is always requested as PNG.
pub const TEXT_TO_IMAGE_MIME: &str = "image/png";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeneratedImage {
    pub data: String, // Base64 encoded
    pub mime_type: String,
}

impl GeneratedImage {
    pub fn data_uri(&self) -> String {
        format!("data:{};base64,{}", self.mime_type, self.data)
    }
}

/// Result of one request, whichever mode produced it.
pub type GenerationOutcome = Result<GeneratedImage>;

/// The first part carrying inline data is the answer, even when it is empty.
pub fn outcome_from_content(response: ContentResponse) -> GenerationOutcome {
    response
        .parts
        .into_iter()
        .find_map(|part| part.inline_data)
        .map(|inline| GeneratedImage {
            data: inline.data,
            mime_type: inline.mime_type,
        })
        .ok_or(TitanError::NoImage)
}

/// Only the first generated entry is considered.
pub fn outcome_from_images(response: ImagesResponse) -> GenerationOutcome {
    response
        .generated_images
        .into_iter()
        .next()
        .and_then(|entry| entry.image)
        .and_then(|image| image.image_bytes)
        .filter(|bytes| !bytes.is_empty())
        .map(|data| GeneratedImage {
            data,
            mime_type: TEXT_TO_IMAGE_MIME.to_string(),
        })
        .ok_or(TitanError::NoImage)
}
