//! Test helpers for inbound HTTP components.

use std::sync::Arc;

use actix_session::{SessionMiddleware, storage::CookieSessionStore};
use actix_web::cookie::{Cookie, Key};
use actix_web::dev::{Service, ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::http::StatusCode;
use actix_web::{App, test, web};
use serde_json::{Value, json};

use crate::domain::ports::{AiAugmentation, FixtureAiAugmentation};
use crate::inbound::http::configure_api;
use crate::inbound::http::state::{HttpState, Repositories};
use crate::outbound::memory::InMemoryStore;
use crate::test_support::MutableClock;

/// Session middleware with a fresh key and the `Secure` flag off so the
/// cookie survives plain-HTTP test requests.
pub fn test_session_middleware() -> SessionMiddleware<CookieSessionStore> {
    SessionMiddleware::builder(CookieSessionStore::default(), Key::generate())
        .cookie_name("session".to_owned())
        .cookie_secure(false)
        .build()
}

/// The `session` cookie set by a response.
///
/// # Panics
///
/// Panics when the response did not set one.
pub fn session_cookie<B>(res: &ServiceResponse<B>) -> Cookie<'static> {
    res.response()
        .cookies()
        .find(|cookie| cookie.name() == "session")
        .expect("session cookie set")
        .into_owned()
}

/// In-memory services behind an [`HttpState`], plus handles on the store and
/// clock so tests can inspect balances and move time.
pub struct TestBackend {
    pub store: Arc<InMemoryStore>,
    pub clock: Arc<MutableClock>,
    pub state: web::Data<HttpState>,
}

impl TestBackend {
    pub fn new() -> Self {
        Self::with_ai(Arc::new(FixtureAiAugmentation::default()))
    }

    pub fn with_ai(ai: Arc<dyn AiAugmentation>) -> Self {
        let store = Arc::new(InMemoryStore::default());
        let clock = Arc::new(MutableClock::at(2024, 9, 1));
        let state = HttpState::from_repositories(
            Repositories {
                users: Arc::clone(&store),
                questions: Arc::clone(&store),
                answers: Arc::clone(&store),
                comments: Arc::clone(&store),
                notifications: Arc::clone(&store),
            },
            ai,
            clock.clone(),
        );
        Self {
            store,
            clock,
            state: web::Data::new(state),
        }
    }

    /// The full `/api/v1` surface over this backend.
    pub fn app(
        &self,
    ) -> App<
        impl ServiceFactory<
            ServiceRequest,
            Config = (),
            Response = ServiceResponse,
            Error = actix_web::Error,
            InitError = (),
        > + use<>,
    > {
        App::new()
            .app_data(self.state.clone())
            .wrap(test_session_middleware())
            .service(web::scope("/api/v1").configure(configure_api))
    }
}

/// Register `username` through the API and return the created user with the
/// session cookie bound to it.
///
/// # Panics
///
/// Panics when registration fails.
pub async fn register(
    app: &impl Service<actix_http::Request, Response = ServiceResponse, Error = actix_web::Error>,
    username: &str,
) -> (Value, Cookie<'static>) {
    let res = test::call_service(
        app,
        test::TestRequest::post()
            .uri("/api/v1/users/register")
            .set_json(json!({
                "username": username,
                "email": format!("{username}@example.com"),
            }))
            .to_request(),
    )
    .await;
    assert!(res.status().is_success(), "registration failed: {}", res.status());
    let cookie = session_cookie(&res);
    let body: Value = test::read_body_json(res).await;
    (body, cookie)
}

/// Post a question as the cookie's user and return its JSON.
///
/// # Panics
///
/// Panics when the question is rejected.
pub async fn ask(
    app: &impl Service<actix_http::Request, Response = ServiceResponse, Error = actix_web::Error>,
    cookie: &Cookie<'static>,
    points: u32,
) -> Value {
    let res = test::call_service(
        app,
        test::TestRequest::post()
            .uri("/api/v1/questions")
            .cookie(cookie.clone())
            .set_json(json!({
                "title": "How do I invert a binary tree?",
                "content": "Recursively, or is there an iterative way?",
                "subject": "Data Structures",
                "branch": "CSE",
                "year": "2nd Year",
                "tags": ["trees"],
                "points": points,
            }))
            .to_request(),
    )
    .await;
    assert!(res.status().is_success(), "ask failed: {}", res.status());
    test::read_body_json(res).await
}

/// Current balance of the cookie's user.
///
/// # Panics
///
/// Panics when the user cannot be read.
pub async fn balance(
    app: &impl Service<actix_http::Request, Response = ServiceResponse, Error = actix_web::Error>,
    cookie: &Cookie<'static>,
) -> i64 {
    let res = test::call_service(
        app,
        test::TestRequest::get()
            .uri("/api/v1/users/me")
            .cookie(cookie.clone())
            .to_request(),
    )
    .await;
    let body: Value = test::read_body_json(res).await;
    body["points"].as_i64().expect("points are numeric")
}

/// Send `request` and return the status with the JSON body, or `null` for an
/// empty body.
///
/// # Panics
///
/// Panics when a non-empty body is not JSON.
pub async fn call(
    app: &impl Service<actix_http::Request, Response = ServiceResponse, Error = actix_web::Error>,
    request: test::TestRequest,
) -> (StatusCode, Value) {
    let res = test::call_service(app, request.to_request()).await;
    let status = res.status();
    let body = test::read_body(res).await;
    let value = if body.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&body).expect("JSON body")
    };
    (status, value)
}
