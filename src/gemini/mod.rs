pub mod image_client;

use crate::{
    config::GeminiConfig,
    error::{Result, TitanError},
    models::{ContentResponse, EditRequest, ImagesResponse, TextToImageRequest},
    storage::Credential,
};
use async_trait::async_trait;
use std::time::Duration;

pub use image_client::ImageClient;

/// The remote image generator, as seen by the studio.
#[async_trait]
pub trait GenerationService: Send + Sync {
    async fn generate_from_image_and_text(
        &self,
        credential: &Credential,
        request: &EditRequest,
    ) -> Result<ContentResponse>;

    async fn generate_from_text(
        &self,
        credential: &Credential,
        request: &TextToImageRequest,
    ) -> Result<ImagesResponse>;
}

#[derive(Clone)]
pub struct GeminiClient {
    image_client: ImageClient,
}

impl GeminiClient {
    pub fn new(config: GeminiConfig) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .build()
            .map_err(|e| TitanError::ConfigError(format!("HTTP client: {}", e)))?;

        log::debug!(
            "Gemini client ready (base: {}, edit: {}, image: {})",
            config.api_base,
            config.edit_model,
            config.image_model
        );

        Ok(Self {
            image_client: ImageClient::new(http, config),
        })
    }

    pub fn image(&self) -> &ImageClient {
        &self.image_client
    }
}
