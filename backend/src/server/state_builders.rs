//! Builders for the HTTP state and the AI adapter.

use std::sync::Arc;

use actix_web::web;
use mockable::DefaultClock;
use tracing::{info, warn};

use askboard::domain::ports::AiAugmentation;
use askboard::inbound::http::state::{HttpState, Repositories};
use askboard::outbound::ai::{
    DisabledAiAugmentation, GeminiClient, GeminiSettings, OpenAiCompatibleClient, OpenAiSettings,
};
use askboard::outbound::memory::InMemoryStore;
use askboard::outbound::persistence::{
    DbPool, DieselAnswerRepository, DieselCommentRepository, DieselNotificationRepository,
    DieselQuestionRepository, DieselUserRepository,
};
use askboard::settings::AppSettings;

use super::ServerConfig;

fn diesel_repositories(
    pool: &DbPool,
) -> Repositories<
    DieselUserRepository,
    DieselQuestionRepository,
    DieselAnswerRepository,
    DieselCommentRepository,
    DieselNotificationRepository,
> {
    Repositories {
        users: Arc::new(DieselUserRepository::new(pool.clone())),
        questions: Arc::new(DieselQuestionRepository::new(pool.clone())),
        answers: Arc::new(DieselAnswerRepository::new(pool.clone())),
        comments: Arc::new(DieselCommentRepository::new(pool.clone())),
        notifications: Arc::new(DieselNotificationRepository::new(pool.clone())),
    }
}

fn memory_repositories() -> Repositories<
    InMemoryStore,
    InMemoryStore,
    InMemoryStore,
    InMemoryStore,
    InMemoryStore,
> {
    let store = Arc::new(InMemoryStore::default());
    Repositories {
        users: Arc::clone(&store),
        questions: Arc::clone(&store),
        answers: Arc::clone(&store),
        comments: Arc::clone(&store),
        notifications: store,
    }
}

/// Build the HTTP state, using Diesel repositories when a pool is configured
/// and the in-memory store otherwise.
pub(super) fn build_http_state(config: &ServerConfig) -> web::Data<HttpState> {
    let ai = Arc::clone(&config.ai);
    let clock = Arc::new(DefaultClock);
    let state = match &config.db_pool {
        Some(pool) => HttpState::from_repositories(diesel_repositories(pool), ai, clock),
        None => {
            warn!("no database configured; data lives in memory only");
            HttpState::from_repositories(memory_repositories(), ai, clock)
        }
    };
    web::Data::new(state)
}

/// AI providers in preference order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum AiProvider {
    OpenAi,
    Gemini,
}

/// Providers with a key configured, chat completions first.
fn configured_providers(settings: &AppSettings) -> Vec<AiProvider> {
    let mut providers = Vec::with_capacity(2);
    if settings.ai_api_key().is_some() {
        providers.push(AiProvider::OpenAi);
    }
    if settings.gemini_api_key().is_some() {
        providers.push(AiProvider::Gemini);
    }
    providers
}

fn openai_client(settings: &AppSettings) -> Option<Arc<dyn AiAugmentation>> {
    let api_key = settings.ai_api_key()?;
    let base_url = match settings.ai_base_url().parse() {
        Ok(url) => url,
        Err(error) => {
            warn!(%error, base_url = settings.ai_base_url(), "invalid AI base URL");
            return None;
        }
    };
    let provider = OpenAiSettings {
        base_url,
        api_key: api_key.to_owned(),
        model: settings.ai_model().to_owned(),
    };
    match OpenAiCompatibleClient::new(provider, settings.ai_timeout()) {
        Ok(client) => {
            info!(model = settings.ai_model(), "AI augmentation enabled");
            Some(Arc::new(client))
        }
        Err(error) => {
            warn!(%error, "failed to build AI client");
            None
        }
    }
}

fn gemini_client(settings: &AppSettings) -> Option<Arc<dyn AiAugmentation>> {
    let api_key = settings.gemini_api_key()?;
    let base_url = match settings.gemini_base_url().parse() {
        Ok(url) => url,
        Err(error) => {
            warn!(%error, base_url = settings.gemini_base_url(), "invalid Gemini base URL");
            return None;
        }
    };
    let provider = GeminiSettings {
        base_url,
        api_key: api_key.to_owned(),
        model: settings.gemini_model().to_owned(),
    };
    match GeminiClient::new(provider, settings.ai_timeout()) {
        Ok(client) => {
            info!(model = settings.gemini_model(), "AI augmentation enabled via Gemini");
            Some(Arc::new(client))
        }
        Err(error) => {
            warn!(%error, "failed to build Gemini client");
            None
        }
    }
}

/// Select the AI adapter from settings.
///
/// The chat completions provider wins when its key is set; Gemini is used
/// otherwise. A provider whose URL or HTTP client cannot be built is skipped.
/// With nothing usable, new questions get the not-configured placeholder.
pub fn build_ai_augmentation(settings: &AppSettings) -> Arc<dyn AiAugmentation> {
    let chosen = configured_providers(settings)
        .into_iter()
        .find_map(|provider| match provider {
            AiProvider::OpenAi => openai_client(settings),
            AiProvider::Gemini => gemini_client(settings),
        });
    chosen.unwrap_or_else(|| {
        info!("AI augmentation disabled: no usable provider configured");
        Arc::new(DisabledAiAugmentation)
    })
}
