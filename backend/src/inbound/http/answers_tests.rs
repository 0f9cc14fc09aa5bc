//! Tests for answer HTTP handlers.

use actix_web::cookie::Cookie;
use actix_web::dev::{Service, ServiceResponse};
use actix_web::http::StatusCode;
use actix_web::test as actix_test;
use rstest::{fixture, rstest};
use serde_json::{Value, json};

use crate::inbound::http::test_utils::{TestBackend, ask, balance, call, register};

#[fixture]
fn backend() -> TestBackend {
    TestBackend::new()
}

fn id_of(value: &Value) -> &str {
    value["id"].as_str().expect("id")
}

async fn answer(
    app: &impl Service<actix_http::Request, Response = ServiceResponse, Error = actix_web::Error>,
    cookie: &Cookie<'static>,
    question: &Value,
) -> Value {
    let (status, body) = call(
        app,
        actix_test::TestRequest::post()
            .uri("/api/v1/answers")
            .cookie(cookie.clone())
            .set_json(json!({"questionId": id_of(question), "content": "Swap the children, then recurse."})),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    body
}

#[rstest]
#[actix_web::test]
async fn answering_moves_the_stake_and_acceptance_pays_a_bonus(backend: TestBackend) {
    let app = actix_test::init_service(backend.app()).await;
    let (_, asker) = register(&app, "asker").await;
    let (_, answerer) = register(&app, "answerer").await;
    let question = ask(&app, &asker, 5).await;
    assert_eq!(balance(&app, &asker).await, 45);

    let posted = answer(&app, &answerer, &question).await;
    assert_eq!(posted["isAI"], false);
    assert_eq!(posted["isAccepted"], false);
    assert_eq!(balance(&app, &answerer).await, 55);
    assert_eq!(balance(&app, &asker).await, 40);

    let (status, accepted) = call(
        &app,
        actix_test::TestRequest::post()
            .uri(&format!("/api/v1/answers/{}/accept", id_of(&posted)))
            .cookie(asker),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(accepted["isAccepted"], true);
    assert_eq!(balance(&app, &answerer).await, 65);

    let (_, resolved) = call(
        &app,
        actix_test::TestRequest::get().uri(&format!("/api/v1/questions/{}", id_of(&question))),
    )
    .await;
    assert_eq!(resolved["isResolved"], true);
    assert_eq!(resolved["answers"], json!([id_of(&posted)]));
}

#[rstest]
#[actix_web::test]
async fn only_one_answer_stays_accepted(backend: TestBackend) {
    let app = actix_test::init_service(backend.app()).await;
    let (_, asker) = register(&app, "asker").await;
    let (_, first) = register(&app, "first").await;
    let (_, second) = register(&app, "second").await;
    let question = ask(&app, &asker, 1).await;
    let early = answer(&app, &first, &question).await;
    backend.clock.advance_seconds(5);
    let late = answer(&app, &second, &question).await;

    for target in [&early, &late] {
        call(
            &app,
            actix_test::TestRequest::post()
                .uri(&format!("/api/v1/answers/{}/accept", id_of(target)))
                .cookie(asker.clone()),
        )
        .await;
    }

    let (_, answers) = call(
        &app,
        actix_test::TestRequest::get()
            .uri(&format!("/api/v1/answers/question/{}", id_of(&question))),
    )
    .await;
    let accepted: Vec<&str> = answers
        .as_array()
        .expect("array")
        .iter()
        .filter(|answer| answer["isAccepted"] == json!(true))
        .map(id_of)
        .collect();
    assert_eq!(accepted, [id_of(&late)]);
    assert_eq!(answers[0]["id"], late["id"]);
}

#[rstest]
#[actix_web::test]
async fn only_the_question_author_accepts(backend: TestBackend) {
    let app = actix_test::init_service(backend.app()).await;
    let (_, asker) = register(&app, "asker").await;
    let (_, answerer) = register(&app, "answerer").await;
    let question = ask(&app, &asker, 1).await;
    let posted = answer(&app, &answerer, &question).await;

    let (status, body) = call(
        &app,
        actix_test::TestRequest::post()
            .uri(&format!("/api/v1/answers/{}/accept", id_of(&posted)))
            .cookie(answerer.clone()),
    )
    .await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body["code"], "forbidden");
    assert_eq!(balance(&app, &answerer).await, 51);
}

#[rstest]
#[actix_web::test]
async fn upvote_rewards_are_paid_on_add_only(backend: TestBackend) {
    let app = actix_test::init_service(backend.app()).await;
    let (_, asker) = register(&app, "asker").await;
    let (_, answerer) = register(&app, "answerer").await;
    let question = ask(&app, &asker, 1).await;
    let posted = answer(&app, &answerer, &question).await;
    let uri = format!("/api/v1/answers/{}/upvote", id_of(&posted));

    let (_, added) = call(&app, actix_test::TestRequest::post().uri(&uri).cookie(asker.clone())).await;
    assert_eq!(added["toggle"], "added");
    assert_eq!(balance(&app, &answerer).await, 53);

    let (_, removed) = call(&app, actix_test::TestRequest::post().uri(&uri).cookie(asker)).await;
    assert_eq!(removed["toggle"], "removed");
    assert_eq!(removed["upvotes"], 0);
    assert_eq!(balance(&app, &answerer).await, 53);
}

#[rstest]
#[actix_web::test]
async fn deleting_an_answer_costs_its_author(backend: TestBackend) {
    let app = actix_test::init_service(backend.app()).await;
    let (_, asker) = register(&app, "asker").await;
    let (_, answerer) = register(&app, "answerer").await;
    let question = ask(&app, &asker, 3).await;
    let posted = answer(&app, &answerer, &question).await;
    let uri = format!("/api/v1/answers/{}", id_of(&posted));

    let (status, _) = call(&app, actix_test::TestRequest::delete().uri(&uri).cookie(asker.clone())).await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, _) = call(&app, actix_test::TestRequest::delete().uri(&uri).cookie(answerer.clone())).await;
    assert_eq!(status, StatusCode::NO_CONTENT);
    assert_eq!(balance(&app, &answerer).await, 48);
    assert_eq!(balance(&app, &asker).await, 44);

    let (_, reloaded) = call(
        &app,
        actix_test::TestRequest::get().uri(&format!("/api/v1/questions/{}", id_of(&question))),
    )
    .await;
    assert_eq!(reloaded["answers"], json!([]));
}

#[rstest]
#[actix_web::test]
async fn authors_edit_their_answers(backend: TestBackend) {
    let app = actix_test::init_service(backend.app()).await;
    let (_, asker) = register(&app, "asker").await;
    let (_, answerer) = register(&app, "answerer").await;
    let question = ask(&app, &asker, 1).await;
    let posted = answer(&app, &answerer, &question).await;
    let uri = format!("/api/v1/answers/{}", id_of(&posted));

    let (status, body) = call(
        &app,
        actix_test::TestRequest::put()
            .uri(&uri)
            .cookie(answerer.clone())
            .set_json(json!({"content": "   "})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["content"], posted["content"]);

    let (status, updated) = call(
        &app,
        actix_test::TestRequest::put()
            .uri(&uri)
            .cookie(answerer)
            .set_json(json!({"content": " Use an explicit stack. "})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["content"], "Use an explicit stack.");
}

fn attachment(name: &str) -> Value {
    json!({
        "filename": format!("1727740800000-{name}"),
        "originalName": name,
        "mimetype": "image/png",
        "size": 2048,
        "path": format!("uploads/answers/{name}"),
    })
}

#[rstest]
#[case(json!({"content": "see attached", "attachments": [attachment("a"), attachment("b"), attachment("c"), attachment("d")]}), "attachments")]
#[case(json!({"content": "  "}), "content")]
#[case(json!({"questionId": null, "content": "orphan"}), "questionId")]
#[actix_web::test]
async fn invalid_answers_are_rejected_without_payment(
    backend: TestBackend,
    #[case] mut payload: Value,
    #[case] field: &str,
) {
    let app = actix_test::init_service(backend.app()).await;
    let (_, asker) = register(&app, "asker").await;
    let (_, answerer) = register(&app, "answerer").await;
    let question = ask(&app, &asker, 2).await;
    if payload.get("questionId").is_none() {
        payload["questionId"] = json!(id_of(&question));
    }

    let (status, body) = call(
        &app,
        actix_test::TestRequest::post()
            .uri("/api/v1/answers")
            .cookie(answerer.clone())
            .set_json(payload),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["details"]["field"], field);
    assert_eq!(balance(&app, &answerer).await, 50);
    assert_eq!(balance(&app, &asker).await, 48);
}

#[rstest]
#[actix_web::test]
async fn answering_an_unknown_question_is_not_found(backend: TestBackend) {
    let app = actix_test::init_service(backend.app()).await;
    let (_, answerer) = register(&app, "answerer").await;
    let (status, body) = call(
        &app,
        actix_test::TestRequest::post()
            .uri("/api/v1/answers")
            .cookie(answerer)
            .set_json(json!({
                "questionId": "3fa85f64-5717-4562-b3fc-2c963f66afa6",
                "content": "Into the void",
            })),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["code"], "not_found");

    let (status, answers) = call(
        &app,
        actix_test::TestRequest::get()
            .uri("/api/v1/answers/question/3fa85f64-5717-4562-b3fc-2c963f66afa6"),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(answers, json!([]));
}
