//! AI augmentation outbound adapters.
//!
//! This module provides thin HTTP implementations of the `AiAugmentation`
//! port for OpenAI-compatible chat completion endpoints and for Gemini, plus
//! a stand-in used when no API key is configured.

mod disabled;
mod dto;
mod gemini_client;
mod http_client;

pub use disabled::{DisabledAiAugmentation, NOT_CONFIGURED_REPLY};
pub use gemini_client::{GeminiClient, GeminiSettings};
pub use http_client::{OpenAiCompatibleClient, OpenAiSettings};
