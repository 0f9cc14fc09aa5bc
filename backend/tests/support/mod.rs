//! Shared helpers for backend integration tests.
//!
//! Each suite drives the full `/api/v1` surface over the in-memory store with
//! a controllable clock, so balances and tie-breaks are deterministic.

use std::sync::Arc;

use actix_session::{SessionMiddleware, storage::CookieSessionStore};
use actix_web::cookie::{Cookie, Key};
use actix_web::dev::{Service, ServiceResponse};
use actix_web::http::{Method, StatusCode};
use actix_web::{App, test, web};
use askboard::Trace;
use askboard::domain::ports::FixtureAiAugmentation;
use askboard::inbound::http::configure_api;
use askboard::inbound::http::state::{HttpState, Repositories};
use askboard::outbound::memory::InMemoryStore;
use askboard::test_support::MutableClock;
use serde_json::Value;

/// Live services plus the clock that stamps them.
pub struct Harness {
    pub clock: Arc<MutableClock>,
    state: web::Data<HttpState>,
}

impl Harness {
    pub fn new() -> Self {
        let store = Arc::new(InMemoryStore::default());
        let clock = Arc::new(MutableClock::at(2024, 9, 1));
        let state = HttpState::from_repositories(
            Repositories {
                users: Arc::clone(&store),
                questions: Arc::clone(&store),
                answers: Arc::clone(&store),
                comments: Arc::clone(&store),
                notifications: store,
            },
            Arc::new(FixtureAiAugmentation::default()),
            clock.clone(),
        );
        Self {
            clock,
            state: web::Data::new(state),
        }
    }

    /// Initialise the application with the production middleware stack.
    pub async fn service(
        &self,
    ) -> impl Service<actix_http::Request, Response = ServiceResponse, Error = actix_web::Error>
    {
        let session = SessionMiddleware::builder(CookieSessionStore::default(), Key::generate())
            .cookie_name("session".to_owned())
            .cookie_secure(false)
            .build();
        test::init_service(
            App::new()
                .app_data(self.state.clone())
                .wrap(Trace)
                .service(web::scope("/api/v1").wrap(session).configure(configure_api)),
        )
        .await
    }
}

/// Send a JSON request and decode the response body, `null` when empty.
///
/// # Panics
///
/// Panics when a non-empty body is not JSON.
pub async fn send(
    app: &impl Service<actix_http::Request, Response = ServiceResponse, Error = actix_web::Error>,
    method: Method,
    uri: &str,
    cookie: Option<&Cookie<'static>>,
    body: Option<Value>,
) -> (StatusCode, Value) {
    let mut request = test::TestRequest::default().method(method).uri(uri);
    if let Some(cookie) = cookie {
        request = request.cookie(cookie.clone());
    }
    if let Some(body) = body {
        request = request.set_json(body);
    }
    let res = test::call_service(app, request.to_request()).await;
    let status = res.status();
    let bytes = test::read_body(res).await;
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).expect("JSON body")
    };
    (status, value)
}

/// Register a user and return their id with the session cookie.
///
/// # Panics
///
/// Panics when registration fails.
pub async fn register(
    app: &impl Service<actix_http::Request, Response = ServiceResponse, Error = actix_web::Error>,
    username: &str,
) -> (String, Cookie<'static>) {
    let res = test::call_service(
        app,
        test::TestRequest::post()
            .uri("/api/v1/users/register")
            .set_json(serde_json::json!({
                "username": username,
                "email": format!("{username}@example.com"),
            }))
            .to_request(),
    )
    .await;
    assert_eq!(res.status(), StatusCode::CREATED, "register {username}");
    let cookie = res
        .response()
        .cookies()
        .find(|cookie| cookie.name() == "session")
        .expect("session cookie")
        .into_owned();
    let body: Value = test::read_body_json(res).await;
    let id = body["id"].as_str().expect("user id").to_owned();
    (id, cookie)
}

/// Balance of the cookie's user.
///
/// # Panics
///
/// Panics when the profile cannot be read.
pub async fn balance(
    app: &impl Service<actix_http::Request, Response = ServiceResponse, Error = actix_web::Error>,
    cookie: &Cookie<'static>,
) -> i64 {
    let (status, body) = send(app, Method::GET, "/api/v1/users/me", Some(cookie), None).await;
    assert_eq!(status, StatusCode::OK);
    body["points"].as_i64().expect("numeric points")
}
