//! Reqwest-backed Gemini `generateContent` adapter.
//!
//! Used when only a Gemini key is configured. The prompt goes out as a single
//! user turn and the first candidate's text parts come back joined.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, Url};

use super::dto::{ContentDto, GenerateRequestDto, GenerateResponseDto, GenerationConfigDto, PartDto};
use super::http_client::{map_status_error, map_transport_error};
use crate::domain::ports::{AiAugmentation, AiAugmentationError, AiPrompt};

const MAX_OUTPUT_TOKENS: u32 = 150;
const TEMPERATURE: f32 = 0.7;
const API_KEY_HEADER: &str = "x-goog-api-key";

/// Provider identity for Gemini requests.
pub struct GeminiSettings {
    /// Base URL up to and including the API version, e.g.
    /// `https://generativelanguage.googleapis.com/v1beta`.
    pub base_url: Url,
    /// Key sent in the `x-goog-api-key` header.
    pub api_key: String,
    /// Model name, e.g. `gemini-1.5-flash`.
    pub model: String,
}

/// Adapter that POSTs one `generateContent` call per prompt.
pub struct GeminiClient {
    client: Client,
    endpoint: Url,
    api_key: String,
}

impl GeminiClient {
    /// Build an adapter using a reqwest client with an explicit request timeout.
    ///
    /// # Errors
    ///
    /// Returns an error when the reqwest client cannot be constructed.
    pub fn new(settings: GeminiSettings, timeout: Duration) -> Result<Self, reqwest::Error> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            endpoint: generate_endpoint(&settings.base_url, &settings.model),
            api_key: settings.api_key,
        })
    }
}

#[async_trait]
impl AiAugmentation for GeminiClient {
    async fn generate(&self, prompt: &AiPrompt) -> Result<String, AiAugmentationError> {
        let text = prompt.render();
        let request = generate_request(&text);
        let response = self
            .client
            .post(self.endpoint.clone())
            .header(API_KEY_HEADER, self.api_key.as_str())
            .json(&request)
            .send()
            .await
            .map_err(map_transport_error)?;

        let status = response.status();
        let body = response.bytes().await.map_err(map_transport_error)?;
        if !status.is_success() {
            return Err(map_status_error(status, body.as_ref()));
        }
        parse_reply(body.as_ref())
    }
}

fn generate_request(text: &str) -> GenerateRequestDto<'_> {
    GenerateRequestDto {
        contents: [ContentDto {
            role: "user",
            parts: [PartDto { text }],
        }],
        generation_config: GenerationConfigDto {
            max_output_tokens: MAX_OUTPUT_TOKENS,
            temperature: TEMPERATURE,
        },
    }
}

fn generate_endpoint(base_url: &Url, model: &str) -> Url {
    let mut endpoint = base_url.clone();
    let path = format!(
        "{}/models/{model}:generateContent",
        base_url.path().trim_end_matches('/')
    );
    endpoint.set_path(&path);
    endpoint
}

fn parse_reply(body: &[u8]) -> Result<String, AiAugmentationError> {
    let decoded: GenerateResponseDto = serde_json::from_slice(body).map_err(|error| {
        AiAugmentationError::decode(format!("invalid generateContent payload: {error}"))
    })?;
    decoded.into_reply().map_err(AiAugmentationError::decode)
}
