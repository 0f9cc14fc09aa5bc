//! Wire shapes for the chat completions and Gemini `generateContent` APIs.

use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize)]
pub(super) struct ChatRequestDto<'a> {
    pub model: &'a str,
    pub messages: [ChatMessageDto<'a>; 2],
    pub max_tokens: u32,
    pub temperature: f32,
}

#[derive(Debug, Serialize)]
pub(super) struct ChatMessageDto<'a> {
    pub role: &'static str,
    pub content: &'a str,
}

#[derive(Debug, Deserialize)]
pub(super) struct ChatResponseDto {
    #[serde(default)]
    choices: Vec<ChoiceDto>,
}

#[derive(Debug, Deserialize)]
struct ChoiceDto {
    message: ReplyDto,
}

#[derive(Debug, Deserialize)]
struct ReplyDto {
    #[serde(default)]
    content: Option<String>,
}

impl ChatResponseDto {
    /// Trimmed content of the first choice, if any.
    pub fn into_reply(self) -> Result<String, String> {
        let content = self
            .choices
            .into_iter()
            .next()
            .ok_or_else(|| "response contained no choices".to_owned())?
            .message
            .content
            .unwrap_or_default();
        let trimmed = content.trim();
        if trimmed.is_empty() {
            return Err("first choice had no content".to_owned());
        }
        Ok(trimmed.to_owned())
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(super) struct GenerateRequestDto<'a> {
    pub contents: [ContentDto<'a>; 1],
    pub generation_config: GenerationConfigDto,
}

#[derive(Debug, Serialize)]
pub(super) struct ContentDto<'a> {
    pub role: &'static str,
    pub parts: [PartDto<'a>; 1],
}

#[derive(Debug, Serialize)]
pub(super) struct PartDto<'a> {
    pub text: &'a str,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(super) struct GenerationConfigDto {
    pub max_output_tokens: u32,
    pub temperature: f32,
}

#[derive(Debug, Deserialize)]
pub(super) struct GenerateResponseDto {
    #[serde(default)]
    candidates: Vec<CandidateDto>,
}

#[derive(Debug, Deserialize)]
struct CandidateDto {
    #[serde(default)]
    content: Option<CandidateContentDto>,
}

#[derive(Debug, Deserialize)]
struct CandidateContentDto {
    #[serde(default)]
    parts: Vec<ReplyPartDto>,
}

#[derive(Debug, Deserialize)]
struct ReplyPartDto {
    #[serde(default)]
    text: Option<String>,
}

impl GenerateResponseDto {
    /// Trimmed text of the first candidate, its parts joined in order.
    pub fn into_reply(self) -> Result<String, String> {
        let candidate = self
            .candidates
            .into_iter()
            .next()
            .ok_or_else(|| "response contained no candidates".to_owned())?;
        let text: String = candidate
            .content
            .map(|content| content.parts)
            .unwrap_or_default()
            .into_iter()
            .filter_map(|part| part.text)
            .collect();
        let trimmed = text.trim();
        if trimmed.is_empty() {
            return Err("first candidate had no text".to_owned());
        }
        Ok(trimmed.to_owned())
    }
}
