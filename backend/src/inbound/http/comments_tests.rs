//! Tests for comment and AI-verification HTTP handlers.

use actix_web::http::StatusCode;
use actix_web::test as actix_test;
use chrono::Utc;
use rstest::{fixture, rstest};
use serde_json::{Value, json};

use crate::domain::ports::AnswerRepository;
use crate::domain::{Answer, AnswerDraft, AnswerId, QuestionId, UserId};
use crate::inbound::http::test_utils::{TestBackend, ask, balance, call, register};

#[fixture]
fn backend() -> TestBackend {
    TestBackend::new()
}

fn id_of(value: &Value) -> &str {
    value["id"].as_str().expect("id")
}

#[rstest]
#[actix_web::test]
async fn question_and_answer_comments_are_listed_separately(backend: TestBackend) {
    let app = actix_test::init_service(backend.app()).await;
    let (_, asker) = register(&app, "asker").await;
    let (_, reader) = register(&app, "reader").await;
    let question = ask(&app, &asker, 1).await;
    let (_, answer) = call(
        &app,
        actix_test::TestRequest::post()
            .uri("/api/v1/answers")
            .cookie(reader.clone())
            .set_json(json!({"questionId": id_of(&question), "content": "Try recursion."})),
    )
    .await;

    let (status, on_question) = call(
        &app,
        actix_test::TestRequest::post()
            .uri("/api/v1/comments")
            .cookie(reader.clone())
            .set_json(json!({"questionId": id_of(&question), "content": " Good question "})),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(on_question["content"], "Good question");
    assert_eq!(on_question["answer"], Value::Null);

    let (status, on_answer) = call(
        &app,
        actix_test::TestRequest::post()
            .uri("/api/v1/comments")
            .cookie(asker.clone())
            .set_json(json!({
                "questionId": id_of(&question),
                "answerId": id_of(&answer),
                "content": "Thanks!",
            })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);

    let (_, question_comments) = call(
        &app,
        actix_test::TestRequest::get()
            .uri(&format!("/api/v1/comments/question/{}", id_of(&question))),
    )
    .await;
    assert_eq!(question_comments, json!([on_question]));

    let (_, answer_comments) = call(
        &app,
        actix_test::TestRequest::get().uri(&format!("/api/v1/comments/answer/{}", id_of(&answer))),
    )
    .await;
    assert_eq!(answer_comments, json!([on_answer]));
    assert_eq!(balance(&app, &asker).await, 48);
}

#[rstest]
#[actix_web::test]
async fn comments_must_target_an_answer_of_the_question(backend: TestBackend) {
    let app = actix_test::init_service(backend.app()).await;
    let (_, asker) = register(&app, "asker").await;
    let first = ask(&app, &asker, 1).await;
    let second = ask(&app, &asker, 1).await;
    let (_, answer) = call(
        &app,
        actix_test::TestRequest::post()
            .uri("/api/v1/answers")
            .cookie(asker.clone())
            .set_json(json!({"questionId": id_of(&first), "content": "Self answer."})),
    )
    .await;

    let (status, body) = call(
        &app,
        actix_test::TestRequest::post()
            .uri("/api/v1/comments")
            .cookie(asker)
            .set_json(json!({
                "questionId": id_of(&second),
                "answerId": id_of(&answer),
                "content": "Wrong thread",
            })),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["code"], "not_found");
}

#[rstest]
#[case(json!({"content": "x".repeat(501)}), "content")]
#[case(json!({"content": "ok", "answerId": "nope"}), "answerId")]
#[case(json!({"content": "ok", "questionId": null}), "questionId")]
#[actix_web::test]
async fn invalid_comments_name_the_field(
    backend: TestBackend,
    #[case] mut payload: Value,
    #[case] field: &str,
) {
    let app = actix_test::init_service(backend.app()).await;
    let (_, asker) = register(&app, "asker").await;
    let question = ask(&app, &asker, 1).await;
    if payload.get("questionId").is_none() {
        payload["questionId"] = json!(id_of(&question));
    }

    let (status, body) = call(
        &app,
        actix_test::TestRequest::post()
            .uri("/api/v1/comments")
            .cookie(asker)
            .set_json(payload),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["details"]["field"], field);
}

#[rstest]
#[actix_web::test]
async fn comment_owners_edit_delete_and_anyone_upvotes(backend: TestBackend) {
    let app = actix_test::init_service(backend.app()).await;
    let (_, asker) = register(&app, "asker").await;
    let (_, reader) = register(&app, "reader").await;
    let question = ask(&app, &asker, 1).await;
    let (_, comment) = call(
        &app,
        actix_test::TestRequest::post()
            .uri("/api/v1/comments")
            .cookie(reader.clone())
            .set_json(json!({"questionId": id_of(&question), "content": "First!"})),
    )
    .await;
    let uri = format!("/api/v1/comments/{}", id_of(&comment));

    let (status, _) = call(
        &app,
        actix_test::TestRequest::put()
            .uri(&uri)
            .cookie(asker.clone())
            .set_json(json!({"content": "edited by someone else"})),
    )
    .await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (_, vote) = call(
        &app,
        actix_test::TestRequest::post()
            .uri(&format!("{uri}/upvote"))
            .cookie(asker.clone()),
    )
    .await;
    assert_eq!(vote, json!({"toggle": "added", "upvotes": 1}));
    assert_eq!(balance(&app, &reader).await, 50);

    let (status, edited) = call(
        &app,
        actix_test::TestRequest::put()
            .uri(&uri)
            .cookie(reader.clone())
            .set_json(json!({"content": "Second, actually."})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(edited["content"], "Second, actually.");

    let (status, _) = call(&app, actix_test::TestRequest::delete().uri(&uri).cookie(reader)).await;
    assert_eq!(status, StatusCode::NO_CONTENT);
    let (_, remaining) = call(
        &app,
        actix_test::TestRequest::get()
            .uri(&format!("/api/v1/comments/question/{}", id_of(&question))),
    )
    .await;
    assert_eq!(remaining, json!([]));
}

#[rstest]
#[actix_web::test]
async fn only_ai_answers_can_be_verified(backend: TestBackend) {
    let app = actix_test::init_service(backend.app()).await;
    let (asker_json, asker) = register(&app, "asker").await;
    let (_, reader) = register(&app, "reader").await;
    let question = ask(&app, &asker, 1).await;
    let (_, human) = call(
        &app,
        actix_test::TestRequest::post()
            .uri("/api/v1/answers")
            .cookie(reader.clone())
            .set_json(json!({"questionId": id_of(&question), "content": "By hand."})),
    )
    .await;

    let (status, body) = call(
        &app,
        actix_test::TestRequest::post()
            .uri(&format!("/api/v1/comments/verify-ai/{}", id_of(&human)))
            .cookie(reader.clone())
            .set_json(json!({"isCorrect": true})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "invalid_operation");

    let mut ai_answer = Answer::create(
        AnswerId::random(),
        UserId::new(id_of(&asker_json)).expect("user id"),
        id_of(&question).parse::<QuestionId>().expect("question id"),
        AnswerDraft {
            content: "Generated answer".to_owned(),
            attachments: Vec::new(),
        },
        Utc::now(),
    );
    ai_answer.is_ai = true;
    AnswerRepository::insert(&*backend.store, &ai_answer)
        .await
        .expect("insert AI answer");

    let (status, verified) = call(
        &app,
        actix_test::TestRequest::post()
            .uri(&format!("/api/v1/comments/verify-ai/{}", ai_answer.id))
            .cookie(reader)
            .set_json(json!({"isCorrect": false, "feedback": "  Off by one.  "})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(verified["isAI"], true);
    let verifications = verified["verifications"].as_array().expect("array");
    assert_eq!(verifications.len(), 1);
    assert_eq!(verifications[0]["isCorrect"], false);
    assert_eq!(verifications[0]["feedback"], "Off by one.");
}
