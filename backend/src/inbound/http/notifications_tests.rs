//! Tests for the notification inbox handlers.

use actix_web::http::StatusCode;
use actix_web::test as actix_test;
use rstest::{fixture, rstest};
use serde_json::{Value, json};

use crate::inbound::http::test_utils::{TestBackend, ask, call, register};

#[fixture]
fn backend() -> TestBackend {
    TestBackend::new()
}

fn id_of(value: &Value) -> &str {
    value["id"].as_str().expect("id")
}

#[rstest]
#[actix_web::test]
async fn answering_and_upvoting_fill_the_askers_inbox(backend: TestBackend) {
    let app = actix_test::init_service(backend.app()).await;
    let (_, asker) = register(&app, "asker").await;
    let (_, helper) = register(&app, "helper").await;
    let question = ask(&app, &asker, 2).await;
    let (_, answer) = call(
        &app,
        actix_test::TestRequest::post()
            .uri("/api/v1/answers")
            .cookie(helper.clone())
            .set_json(json!({"questionId": id_of(&question), "content": "Swap children."})),
    )
    .await;
    call(
        &app,
        actix_test::TestRequest::post()
            .uri(&format!("/api/v1/answers/{}/upvote", id_of(&answer)))
            .cookie(asker.clone()),
    )
    .await;

    let (status, inbox) = call(
        &app,
        actix_test::TestRequest::get()
            .uri("/api/v1/notifications")
            .cookie(asker.clone()),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let inbox = inbox.as_array().expect("array");
    assert_eq!(inbox.len(), 1);
    assert_eq!(inbox[0]["type"], "answer");
    assert_eq!(inbox[0]["isRead"], false);
    assert_eq!(inbox[0]["question"], question["id"]);

    let (_, helper_inbox) = call(
        &app,
        actix_test::TestRequest::get()
            .uri("/api/v1/notifications")
            .cookie(helper.clone()),
    )
    .await;
    assert_eq!(helper_inbox[0]["type"], "upvote");

    let (_, unread) = call(
        &app,
        actix_test::TestRequest::get()
            .uri("/api/v1/notifications/unread-count")
            .cookie(asker),
    )
    .await;
    assert_eq!(unread, json!({"count": 1}));
}

#[rstest]
#[actix_web::test]
async fn only_the_recipient_marks_a_notification_read(backend: TestBackend) {
    let app = actix_test::init_service(backend.app()).await;
    let (_, asker) = register(&app, "asker").await;
    let (_, helper) = register(&app, "helper").await;
    let question = ask(&app, &asker, 1).await;
    call(
        &app,
        actix_test::TestRequest::post()
            .uri("/api/v1/comments")
            .cookie(helper.clone())
            .set_json(json!({"questionId": id_of(&question), "content": "Which language?"})),
    )
    .await;
    let (_, inbox) = call(
        &app,
        actix_test::TestRequest::get()
            .uri("/api/v1/notifications")
            .cookie(asker.clone()),
    )
    .await;
    assert_eq!(inbox[0]["message"], "New comment on your question");
    let uri = format!("/api/v1/notifications/{}/read", id_of(&inbox[0]));

    let (status, body) = call(&app, actix_test::TestRequest::put().uri(&uri).cookie(helper)).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body["code"], "forbidden");

    let (status, read) = call(
        &app,
        actix_test::TestRequest::put().uri(&uri).cookie(asker.clone()),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(read["isRead"], true);

    let (_, unread) = call(
        &app,
        actix_test::TestRequest::get()
            .uri("/api/v1/notifications/unread-count")
            .cookie(asker),
    )
    .await;
    assert_eq!(unread, json!({"count": 0}));
}

#[rstest]
#[actix_web::test]
async fn read_all_reports_how_many_changed(backend: TestBackend) {
    let app = actix_test::init_service(backend.app()).await;
    let (_, asker) = register(&app, "asker").await;
    let (_, helper) = register(&app, "helper").await;
    let question = ask(&app, &asker, 1).await;
    for content in ["One", "Two"] {
        call(
            &app,
            actix_test::TestRequest::post()
                .uri("/api/v1/comments")
                .cookie(helper.clone())
                .set_json(json!({"questionId": id_of(&question), "content": content})),
        )
        .await;
    }

    let request = || {
        actix_test::TestRequest::put()
            .uri("/api/v1/notifications/read-all")
            .cookie(asker.clone())
    };
    let (status, first) = call(&app, request()).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(first, json!({"updated": 2}));
    let (_, second) = call(&app, request()).await;
    assert_eq!(second, json!({"updated": 0}));
}

#[rstest]
#[case(actix_test::TestRequest::get().uri("/api/v1/notifications"))]
#[case(actix_test::TestRequest::get().uri("/api/v1/notifications/unread-count"))]
#[case(actix_test::TestRequest::put().uri("/api/v1/notifications/read-all"))]
#[actix_web::test]
async fn inbox_requires_a_session(backend: TestBackend, #[case] request: actix_test::TestRequest) {
    let app = actix_test::init_service(backend.app()).await;
    let (status, body) = call(&app, request).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["code"], "unauthorized");
}

#[rstest]
#[actix_web::test]
async fn malformed_notification_ids_are_rejected(backend: TestBackend) {
    let app = actix_test::init_service(backend.app()).await;
    let (_, asker) = register(&app, "asker").await;
    let (status, body) = call(
        &app,
        actix_test::TestRequest::put()
            .uri("/api/v1/notifications/not-a-uuid/read")
            .cookie(asker),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["details"]["field"], "id");
}
