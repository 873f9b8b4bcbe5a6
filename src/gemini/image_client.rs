use crate::{
    config::GeminiConfig,
    error::{Result, TitanError},
    gemini::GenerationService,
    models::{
        ApiErrorEnvelope, ContentResponse, EditRequest, GenerateContentResponse, ImagesResponse,
        ModelCategory, ModelInfo, PredictResponse, TextToImageRequest, TEXT_TO_IMAGE_MIME,
    },
    storage::Credential,
};
use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde_json::{json, Value};

const API_KEY_HEADER: &str = "x-goog-api-key";

#[derive(Clone)]
pub struct ImageClient {
    http: reqwest::Client,
    config: GeminiConfig,
}

impl ImageClient {
    pub fn new(http: reqwest::Client, config: GeminiConfig) -> Self {
        Self { http, config }
    }

    pub fn config(&self) -> &GeminiConfig {
        &self.config
    }

    pub fn supported_models() -> Vec<ModelInfo> {
        vec![
            ModelInfo {
                id: crate::config::DEFAULT_EDIT_MODEL.to_string(),
                name: "Gemini 2.5 Flash Image".to_string(),
                provider: "Google".to_string(),
                category: ModelCategory::ImageEdit,
                description: "Reference photo plus prompt; answers with image and text parts"
                    .to_string(),
            },
            ModelInfo {
                id: crate::config::DEFAULT_IMAGE_MODEL.to_string(),
                name: "Imagen 4".to_string(),
                provider: "Google".to_string(),
                category: ModelCategory::TextToImage,
                description: "Prompt only, one PNG at the chosen aspect ratio".to_string(),
            },
        ]
    }

    pub fn endpoint(&self, model: &str, method: &str) -> String {
        let model = model.trim();
        let model_path = if model.starts_with("models/") {
            model.to_string()
        } else {
            format!("models/{}", model)
        };
        format!("{}/{}:{}", self.config.api_base, model_path, method)
    }

    pub fn edit_payload(request: &EditRequest) -> Value {
        json!({
            "contents": [{
                "parts": [
                    {
                        "inlineData": {
                            "mimeType": request.image.mime_type,
                            "data": request.image.data
                        }
                    },
                    { "text": request.prompt }
                ]
            }],
            "generationConfig": {
                "responseModalities": ["IMAGE", "TEXT"]
            }
        })
    }

    pub fn text_payload(request: &TextToImageRequest) -> Value {
        json!({
            "instances": [{ "prompt": request.prompt }],
            "parameters": {
                "sampleCount": request.number_of_images,
                "aspectRatio": request.aspect_ratio.as_str(),
                "outputOptions": { "mimeType": TEXT_TO_IMAGE_MIME }
            }
        })
    }

    async fn post<T: DeserializeOwned>(
        &self,
        endpoint: &str,
        credential: &Credential,
        payload: &Value,
    ) -> Result<T> {
        log::debug!("POST {}", endpoint);

        let response = self
            .http
            .post(endpoint)
            .header(API_KEY_HEADER, credential.as_str())
            .json(payload)
            .send()
            .await
            .map_err(|e| TitanError::RequestError(format!("Gemini request failed: {}", e)))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| TitanError::ResponseError(e.to_string()))?;

        if !status.is_success() {
            log::error!("Gemini returned {} for {}", status, endpoint);
            return Err(service_error(status.as_u16(), &body));
        }

        serde_json::from_str(&body).map_err(|e| TitanError::ResponseError(e.to_string()))
    }
}

/// Prefer the message inside Google's error envelope over the raw body.
pub fn service_error(status: u16, body: &str) -> TitanError {
    let message = serde_json::from_str::<ApiErrorEnvelope>(body)
        .ok()
        .map(|envelope| envelope.error.message)
        .filter(|message| !message.is_empty())
        .unwrap_or_else(|| {
            let trimmed = body.trim();
            if trimmed.is_empty() {
                "empty response body".to_string()
            } else {
                trimmed.to_string()
            }
        });
    TitanError::Service { status, message }
}

#[async_trait]
impl GenerationService for ImageClient {
    async fn generate_from_image_and_text(
        &self,
        credential: &Credential,
        request: &EditRequest,
    ) -> Result<ContentResponse> {
        let endpoint = self.endpoint(&self.config.edit_model, "generateContent");
        log::info!("Editing image with model: {}", self.config.edit_model);

        let response: GenerateContentResponse = self
            .post(&endpoint, credential, &Self::edit_payload(request))
            .await?;
        Ok(response.into())
    }

    async fn generate_from_text(
        &self,
        credential: &Credential,
        request: &TextToImageRequest,
    ) -> Result<ImagesResponse> {
        let endpoint = self.endpoint(&self.config.image_model, "predict");
        log::info!(
            "Generating image with model: {} ({})",
            self.config.image_model,
            request.aspect_ratio
        );

        let response: PredictResponse = self
            .post(&endpoint, credential, &Self::text_payload(request))
            .await?;
        Ok(response.into())
    }
}
