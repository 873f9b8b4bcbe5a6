use crate::{
    error::Result,
    media,
    models::{AspectRatio, Quality, Style},
};
use base64::{engine::general_purpose::STANDARD as BASE64, Engine as _};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Everything the user filled in before pressing generate.
#[derive(Debug, Clone, Default)]
pub struct GenerationForm {
    pub prompt: String,
    pub reference_photo: Option<ReferencePhoto>,
    pub aspect_ratio: AspectRatio,
    pub style: Style,
    pub quality: Quality,
}

impl GenerationForm {
    pub fn new(prompt: impl Into<String>) -> Self {
        Self {
            prompt: prompt.into(),
            ..Default::default()
        }
    }

    pub fn with_reference_photo(mut self, photo: ReferencePhoto) -> Self {
        self.reference_photo = Some(photo);
        self
    }

    pub fn with_aspect_ratio(mut self, aspect_ratio: AspectRatio) -> Self {
        self.aspect_ratio = aspect_ratio;
        self
    }

    pub fn with_style(mut self, style: Style) -> Self {
        self.style = style;
        self
    }

    pub fn with_quality(mut self, quality: Quality) -> Self {
        self.quality = quality;
        self
    }
}

/// Optional photo picked by the user, either still on disk or already encoded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReferencePhoto {
    File(PathBuf),
    Encoded(ReferenceImage),
}

impl ReferencePhoto {
    pub async fn load(&self) -> Result<ReferenceImage> {
        match self {
            ReferencePhoto::File(path) => media::encode_reference_image(path).await,
            ReferencePhoto::Encoded(image) => Ok(image.clone()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReferenceImage {
    pub data: String, // Base64 encoded
    pub mime_type: String,
}

impl ReferenceImage {
    pub fn from_bytes(bytes: &[u8], mime_type: impl Into<String>) -> Self {
        Self {
            data: BASE64.encode(bytes),
            mime_type: mime_type.into(),
        }
    }
}

pub fn compose_prompt(prompt: &str, style: Style, quality: Quality) -> String {
    format!("{}, in a {} style, with {} quality.", prompt, style, quality)
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditRequest {
    pub image: ReferenceImage,
    pub prompt: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextToImageRequest {
    pub prompt: String,
    pub aspect_ratio: AspectRatio,
    pub number_of_images: u32,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GenerationRequest {
    Edit(EditRequest),
    TextToImage(TextToImageRequest),
}

impl GenerationRequest {
    /// The presence of a reference image alone decides the mode.
    pub fn build(form: &GenerationForm, reference: Option<ReferenceImage>) -> Self {
        let prompt = compose_prompt(&form.prompt, form.style, form.quality);
        match reference {
            Some(image) => GenerationRequest::Edit(EditRequest { image, prompt }),
            None => GenerationRequest::TextToImage(TextToImageRequest {
                prompt,
                aspect_ratio: form.aspect_ratio,
                number_of_images: 1,
            }),
        }
    }

    pub fn mode(&self) -> &'static str {
        match self {
            GenerationRequest::Edit(_) => "edit",
            GenerationRequest::TextToImage(_) => "text-to-image",
        }
    }

    pub fn prompt(&self) -> &str {
        match self {
            GenerationRequest::Edit(request) => &request.prompt,
            GenerationRequest::TextToImage(request) => &request.prompt,
        }
    }
}

// Shapes returned across the generation service boundary.

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct InlineData {
    pub data: String,
    #[serde(rename = "mimeType", alias = "mime_type", default)]
    pub mime_type: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContentPart {
    #[serde(default)]
    pub text: Option<String>,
    #[serde(default, rename = "inlineData", alias = "inline_data")]
    pub inline_data: Option<InlineData>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContentResponse {
    pub parts: Vec<ContentPart>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ImagePayload {
    pub image_bytes: Option<String>,
    pub mime_type: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GeneratedImageEntry {
    pub image: Option<ImagePayload>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ImagesResponse {
    pub generated_images: Vec<GeneratedImageEntry>,
}

// Gemini REST payloads.

#[derive(Debug, Deserialize)]
pub struct GenerateContentResponse {
    #[serde(default)]
    pub candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
pub struct Candidate {
    #[serde(default)]
    pub content: Option<CandidateContent>,
}

#[derive(Debug, Deserialize)]
pub struct CandidateContent {
    #[serde(default)]
    pub parts: Vec<ContentPart>,
}

#[derive(Debug, Deserialize)]
pub struct PredictResponse {
    #[serde(default)]
    pub predictions: Vec<Prediction>,
}

#[derive(Debug, Deserialize)]
pub struct Prediction {
    #[serde(rename = "bytesBase64Encoded", default)]
    pub bytes_base64_encoded: Option<String>,
    #[serde(rename = "mimeType", default)]
    pub mime_type: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct ApiErrorEnvelope {
    pub error: ApiErrorBody,
}

#[derive(Debug, Deserialize)]
pub struct ApiErrorBody {
    #[serde(default)]
    pub message: String,
}

impl From<GenerateContentResponse> for ContentResponse {
    fn from(response: GenerateContentResponse) -> Self {
        let parts = response
            .candidates
            .into_iter()
            .next()
            .and_then(|candidate| candidate.content)
            .map(|content| content.parts)
            .unwrap_or_default();
        ContentResponse { parts }
    }
}

impl From<PredictResponse> for ImagesResponse {
    fn from(response: PredictResponse) -> Self {
        let generated_images = response
            .predictions
            .into_iter()
            .map(|prediction| GeneratedImageEntry {
                image: Some(ImagePayload {
                    image_bytes: prediction.bytes_base64_encoded,
                    mime_type: prediction.mime_type,
                }),
            })
            .collect();
        ImagesResponse { generated_images }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_image() -> ReferenceImage {
        ReferenceImage::from_bytes(b"\x89PNG", "image/png")
    }

    #[test]
    fn test_compose_prompt_exact() {
        assert_eq!(
            compose_prompt("a cat on a roof", Style::Watercolor, Quality::High),
            "a cat on a roof, in a watercolor style, with high quality."
        );
    }

    #[test]
    fn test_mode_selection_follows_reference_image() {
        let base = GenerationForm::new("a lighthouse")
            .with_style(Style::Cinematic)
            .with_quality(Quality::Ultra)
            .with_aspect_ratio(AspectRatio::Wide);

        match GenerationRequest::build(&base, None) {
            GenerationRequest::TextToImage(request) => {
                assert_eq!(
                    request.prompt,
                    "a lighthouse, in a cinematic style, with ultra quality."
                );
                assert_eq!(request.aspect_ratio, AspectRatio::Wide);
                assert_eq!(request.number_of_images, 1);
            }
            other => panic!("expected text-to-image, got {:?}", other),
        }

        match GenerationRequest::build(&base, Some(sample_image())) {
            GenerationRequest::Edit(request) => {
                assert_eq!(
                    request.prompt,
                    "a lighthouse, in a cinematic style, with ultra quality."
                );
                assert_eq!(request.image, sample_image());
            }
            other => panic!("expected edit, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_encoded_photo_loads_without_io() {
        let photo = ReferencePhoto::Encoded(sample_image());
        assert_eq!(photo.load().await.unwrap(), sample_image());
    }

    #[test]
    fn test_reference_image_is_base64() {
        let image = ReferenceImage::from_bytes(&[0, 0, 0], "image/jpeg");
        assert_eq!(image.data, "AAAA");
        assert_eq!(image.mime_type, "image/jpeg");
    }

    #[test]
    fn test_generate_content_projection_takes_first_candidate() {
        let raw = r#"{
            "candidates": [
                {"content": {"parts": [
                    {"text": "here you go"},
                    {"inlineData": {"mimeType": "image/png", "data": "AAAA"}}
                ]}},
                {"content": {"parts": [{"inline_data": {"mime_type": "image/jpeg", "data": "ZZZZ"}}]}}
            ]
        }"#;
        let parsed: GenerateContentResponse = serde_json::from_str(raw).unwrap();
        let response = ContentResponse::from(parsed);
        assert_eq!(response.parts.len(), 2);
        assert_eq!(response.parts[0].text.as_deref(), Some("here you go"));
        assert_eq!(
            response.parts[1].inline_data,
            Some(InlineData {
                data: "AAAA".into(),
                mime_type: "image/png".into()
            })
        );
    }

    #[test]
    fn test_inline_data_without_mime_type_parses() {
        let raw = r#"{"candidates": [{"content": {"parts": [{"inlineData": {"data": "AAAA"}}]}}]}"#;
        let parsed: GenerateContentResponse = serde_json::from_str(raw).unwrap();
        let response = ContentResponse::from(parsed);
        assert_eq!(
            response.parts[0].inline_data,
            Some(InlineData {
                data: "AAAA".into(),
                mime_type: String::new()
            })
        );
    }

    #[test]
    fn test_predict_projection() {
        let raw = r#"{"predictions": [{"bytesBase64Encoded": "BBBB", "mimeType": "image/png"}, {}]}"#;
        let parsed: PredictResponse = serde_json::from_str(raw).unwrap();
        let response = ImagesResponse::from(parsed);
        assert_eq!(response.generated_images.len(), 2);
        let first = response.generated_images[0].image.as_ref().unwrap();
        assert_eq!(first.image_bytes.as_deref(), Some("BBBB"));
        let second = response.generated_images[1].image.as_ref().unwrap();
        assert!(second.image_bytes.is_none());
    }

    #[test]
    fn test_empty_payloads_project_to_empty() {
        let parsed: GenerateContentResponse = serde_json::from_str("{}").unwrap();
        assert!(ContentResponse::from(parsed).parts.is_empty());
        let parsed: PredictResponse = serde_json::from_str("{}").unwrap();
        assert!(ImagesResponse::from(parsed).generated_images.is_empty());
    }
}
