//! Reqwest-backed chat completions adapter.
//!
//! This adapter owns transport details only: request serialisation, timeout
//! and HTTP error mapping, and decoding the first choice into plain text.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, StatusCode, Url};

use super::dto::{ChatMessageDto, ChatRequestDto, ChatResponseDto};
use crate::domain::ports::{AiAugmentation, AiAugmentationError, AiPrompt};

const MAX_TOKENS: u32 = 150;
const TEMPERATURE: f32 = 0.7;

/// Provider identity for chat completion requests.
pub struct OpenAiSettings {
    /// Base URL up to and including the API version, e.g. `https://api.openai.com/v1`.
    pub base_url: Url,
    /// Bearer token sent in the `Authorization` header.
    pub api_key: String,
    /// Model name passed through verbatim.
    pub model: String,
}

/// Adapter that POSTs one chat completion per prompt.
pub struct OpenAiCompatibleClient {
    client: Client,
    endpoint: Url,
    api_key: String,
    model: String,
}

impl OpenAiCompatibleClient {
    /// Build an adapter using a reqwest client with an explicit request timeout.
    ///
    /// # Errors
    ///
    /// Returns an error when the reqwest client cannot be constructed.
    pub fn new(settings: OpenAiSettings, timeout: Duration) -> Result<Self, reqwest::Error> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            endpoint: completions_endpoint(&settings.base_url),
            api_key: settings.api_key,
            model: settings.model,
        })
    }
}

#[async_trait]
impl AiAugmentation for OpenAiCompatibleClient {
    async fn generate(&self, prompt: &AiPrompt) -> Result<String, AiAugmentationError> {
        let user_message = prompt.render();
        let request = ChatRequestDto {
            model: self.model.as_str(),
            messages: [
                ChatMessageDto {
                    role: "system",
                    content: AiPrompt::SYSTEM,
                },
                ChatMessageDto {
                    role: "user",
                    content: user_message.as_str(),
                },
            ],
            max_tokens: MAX_TOKENS,
            temperature: TEMPERATURE,
        };
        let response = self
            .client
            .post(self.endpoint.clone())
            .bearer_auth(self.api_key.as_str())
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

fn completions_endpoint(base_url: &Url) -> Url {
    let mut endpoint = base_url.clone();
    let path = format!("{}/chat/completions", base_url.path().trim_end_matches('/'));
    endpoint.set_path(&path);
    endpoint
}

fn parse_reply(body: &[u8]) -> Result<String, AiAugmentationError> {
    let decoded: ChatResponseDto = serde_json::from_slice(body).map_err(|error| {
        AiAugmentationError::decode(format!("invalid chat completion payload: {error}"))
    })?;
    decoded.into_reply().map_err(AiAugmentationError::decode)
}

pub(super) fn map_transport_error(error: reqwest::Error) -> AiAugmentationError {
    if error.is_timeout() {
        AiAugmentationError::timeout(error.to_string())
    } else {
        AiAugmentationError::transport(error.to_string())
    }
}

pub(super) fn map_status_error(status: StatusCode, body: &[u8]) -> AiAugmentationError {
    match status {
        StatusCode::REQUEST_TIMEOUT | StatusCode::GATEWAY_TIMEOUT => {
            AiAugmentationError::timeout(format!("status {}", status.as_u16()))
        }
        _ => AiAugmentationError::upstream(status.as_u16(), body_preview(body)),
    }
}

fn body_preview(body: &[u8]) -> String {
    const PREVIEW_CHAR_LIMIT: usize = 160;

    let compact = String::from_utf8_lossy(body)
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ");
    let preview = compact.chars().take(PREVIEW_CHAR_LIMIT).collect::<String>();
    if compact.chars().count() > PREVIEW_CHAR_LIMIT {
        format!("{preview}...")
    } else {
        preview
    }
}
