//! Image generation over the OpenRouter API.
//!
//! Not every routed model supports the images endpoint, so generation
//! walks a fallback chain: the configured model first, then the known
//! alternates, returning the first usable image.

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::chat::OpenRouterClient;
use crate::error::{LlmError, Result};

/// Default model for infographic generation.
pub const DEFAULT_IMAGE_MODEL: &str = "black-forest-labs/flux-schnell";

/// Models tried in order when the primary image model fails.
pub const FALLBACK_IMAGE_MODELS: [&str; 2] =
    ["stabilityai/stable-diffusion-3.5-large", "openai/dall-e-2"];

impl OpenRouterClient {
    /// Generate a single image with the given model.
    ///
    /// Returns a `data:image/png;base64,...` URL when the provider sends
    /// inline data, or the provider's own URL otherwise.
    pub async fn generate_image(&self, model: &str, prompt: &str, size: &str) -> Result<String> {
        let url = format!("{}/images/generations", self.config().base_url);

        let body = WireImageRequest {
            model,
            prompt,
            n: 1,
            size,
            response_format: "b64_json",
        };

        let response = self.authorized(self.http().post(&url)).json(&body).send().await?;
        let response = Self::check_status(response).await?;

        let wire: WireImageResponse = response
            .json()
            .await
            .map_err(|e| LlmError::InvalidResponse(e.to_string()))?;

        let datum = wire
            .data
            .into_iter()
            .next()
            .ok_or_else(|| LlmError::InvalidResponse("image response has no data".to_string()))?;

        if let Some(b64) = datum.b64_json {
            return Ok(format!("data:image/png;base64,{}", b64));
        }
        if let Some(url) = datum.url {
            return Ok(url);
        }
        Err(LlmError::InvalidResponse(
            "image response carries neither b64_json nor url".to_string(),
        ))
    }

    /// Generate an image, trying the fallback model chain when `model`
    /// fails. Auth and billing errors abort immediately since no
    /// alternate model will fix those.
    pub async fn generate_image_with_fallback(
        &self,
        model: &str,
        prompt: &str,
        size: &str,
    ) -> Result<String> {
        let mut last_error = None;

        for candidate in std::iter::once(model).chain(FALLBACK_IMAGE_MODELS) {
            match self.generate_image(candidate, prompt, size).await {
                Ok(image) => return Ok(image),
                Err(err) if err.is_auth_error() => return Err(err),
                Err(err) => {
                    warn!("Image model {} failed: {}", candidate, err);
                    last_error = Some(err);
                }
            }
        }

        Err(last_error
            .unwrap_or_else(|| LlmError::ProviderError("all image models failed".to_string())))
    }
}

#[derive(Debug, Serialize)]
struct WireImageRequest<'a> {
    model: &'a str,
    prompt: &'a str,
    n: u8,
    size: &'a str,
    response_format: &'a str,
}

#[derive(Debug, Deserialize)]
struct WireImageResponse {
    data: Vec<WireImageDatum>,
}

#[derive(Debug, Deserialize)]
struct WireImageDatum {
    #[serde(default)]
    b64_json: Option<String>,
    #[serde(default)]
    url: Option<String>,
}
