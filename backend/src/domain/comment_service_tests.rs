//! Tests for comments and AI answer verification.

use std::sync::Arc;

use mockable::Clock;
use rstest::rstest;

use super::*;
use crate::domain::ports::{NotificationInbox, UserRepository};
use crate::domain::{
    AnswerDraft, EmailAddress, ErrorCode, NotificationService, Question, QuestionDraft, User,
    Username, VoteToggle,
};
use crate::outbound::memory::InMemoryStore;
use crate::test_support::MutableClock;

struct Harness {
    store: Arc<InMemoryStore>,
    clock: Arc<MutableClock>,
    service: CommentService<InMemoryStore, InMemoryStore, InMemoryStore, InMemoryStore>,
    inbox: NotificationService<InMemoryStore>,
    asker: UserId,
    helper: UserId,
    question: Question,
}

impl Harness {
    async fn new() -> Self {
        let store = Arc::new(InMemoryStore::default());
        let clock = Arc::new(MutableClock::at(2024, 10, 1));
        let asker = register(&store, &clock, "asker").await;
        let helper = register(&store, &clock, "helper").await;
        let question = Question::create(
            QuestionId::random(),
            asker.clone(),
            QuestionDraft {
                title: "Big-O of quicksort?".to_owned(),
                content: "Average and worst case, please.".to_owned(),
                subject: "Algorithms".to_owned(),
                branch: "CSE".to_owned(),
                year: "2nd Year".to_owned(),
                grade: None,
                tags: Vec::new(),
                stake: None,
            }
            .validate()
            .expect("valid question"),
            clock.utc(),
        );
        QuestionRepository::insert(&*store, &question)
            .await
            .expect("insert question");
        Self {
            service: CommentService::new(
                Arc::clone(&store),
                Arc::clone(&store),
                Arc::clone(&store),
                Arc::clone(&store),
                clock.clone(),
            ),
            inbox: NotificationService::new(Arc::clone(&store)),
            store,
            clock,
            asker,
            helper,
            question,
        }
    }

    async fn add_answer(&self, author: &UserId, is_ai: bool) -> Answer {
        let mut answer = Answer::create(
            AnswerId::random(),
            author.clone(),
            self.question.id,
            AnswerDraft {
                content: "n log n on average".to_owned(),
                attachments: Vec::new(),
            },
            self.clock.utc(),
        );
        answer.is_ai = is_ai;
        AnswerRepository::insert(&*self.store, &answer)
            .await
            .expect("insert answer");
        answer
    }

    async fn comment(&self, author: &UserId, answer: Option<AnswerId>, content: &str) -> Comment {
        self.clock.advance_seconds(10);
        self.service
            .create(
                author,
                NewComment {
                    question: self.question.id,
                    answer,
                    parent_comment: None,
                    content: content.to_owned(),
                },
            )
            .await
            .expect("comment created")
    }

    async fn balance(&self, user: &UserId) -> i64 {
        UserRepository::find_by_id(&*self.store, user)
            .await
            .expect("lookup")
            .expect("user")
            .points
    }
}

async fn register(store: &InMemoryStore, clock: &MutableClock, name: &str) -> UserId {
    let user = User::register(
        UserId::random(),
        Username::new(name).expect("username"),
        EmailAddress::new(format!("{name}@example.com")).expect("email"),
        clock.utc(),
    );
    UserRepository::insert(store, &user)
        .await
        .expect("insert user");
    user.id
}

#[tokio::test]
async fn question_comments_notify_the_asker() {
    let harness = Harness::new().await;

    let comment = harness
        .comment(&harness.helper, None, "  Which pivot rule?  ")
        .await;

    assert_eq!(comment.content, "Which pivot rule?");
    assert!(!comment.is_verified);
    let inbox = harness.inbox.list(&harness.asker).await.expect("inbox");
    assert_eq!(inbox.len(), 1);
    assert_eq!(inbox[0].kind, NotificationKind::Comment);
    assert_eq!(inbox[0].comment, Some(comment.id));
}

#[tokio::test]
async fn answer_comments_notify_the_answer_author_and_stay_in_their_thread() {
    let harness = Harness::new().await;
    let answer = harness.add_answer(&harness.helper, false).await;

    let on_answer = harness
        .comment(&harness.asker, Some(answer.id), "Thanks!")
        .await;
    let on_question = harness.comment(&harness.helper, None, "Bump").await;

    assert_eq!(harness.inbox.unread_count(&harness.helper).await, Ok(1));
    let question_thread = harness
        .service
        .list_for_question(&harness.question.id)
        .await
        .expect("question thread");
    let answer_thread = harness
        .service
        .list_for_answer(&answer.id)
        .await
        .expect("answer thread");
    assert_eq!(question_thread, vec![on_question]);
    assert_eq!(answer_thread, vec![on_answer]);
}

#[tokio::test]
async fn comments_on_missing_targets_are_not_found() {
    let harness = Harness::new().await;
    let missing_question = harness
        .service
        .create(
            &harness.helper,
            NewComment {
                question: QuestionId::random(),
                answer: None,
                parent_comment: None,
                content: "hello".to_owned(),
            },
        )
        .await
        .expect_err("missing question");
    let missing_parent = harness
        .service
        .create(
            &harness.helper,
            NewComment {
                question: harness.question.id,
                answer: None,
                parent_comment: Some(CommentId::random()),
                content: "hello".to_owned(),
            },
        )
        .await
        .expect_err("missing parent");

    assert_eq!(missing_question.code(), ErrorCode::NotFound);
    assert_eq!(missing_parent.code(), ErrorCode::NotFound);
}

#[rstest]
#[case("")]
#[case("   ")]
#[tokio::test]
async fn blank_comments_are_rejected(#[case] content: &str) {
    let harness = Harness::new().await;
    let err = harness
        .service
        .create(
            &harness.helper,
            NewComment {
                question: harness.question.id,
                answer: None,
                parent_comment: None,
                content: content.to_owned(),
            },
        )
        .await
        .expect_err("blank");
    assert_eq!(err.code(), ErrorCode::InvalidRequest);
}

#[tokio::test]
async fn overlong_comments_are_rejected() {
    let harness = Harness::new().await;
    let err = harness
        .service
        .create(
            &harness.helper,
            NewComment {
                question: harness.question.id,
                answer: None,
                parent_comment: None,
                content: "a".repeat(501),
            },
        )
        .await
        .expect_err("too long");
    assert_eq!(err.code(), ErrorCode::InvalidRequest);
}

#[tokio::test]
async fn comment_votes_toggle_without_points() {
    let harness = Harness::new().await;
    let comment = harness.comment(&harness.helper, None, "Good question").await;

    let added = harness
        .service
        .upvote(&comment.id, &harness.asker)
        .await
        .expect("upvote");
    let removed = harness
        .service
        .upvote(&comment.id, &harness.asker)
        .await
        .expect("undo");

    assert_eq!(added.toggle, VoteToggle::Added);
    assert_eq!(removed.toggle, VoteToggle::Removed);
    assert_eq!(harness.balance(&harness.helper).await, 50);
}

#[tokio::test]
async fn only_the_author_may_change_a_comment() {
    let harness = Harness::new().await;
    let comment = harness.comment(&harness.helper, None, "First").await;

    let err = harness
        .service
        .delete(&comment.id, &harness.asker)
        .await
        .expect_err("not the author");
    assert_eq!(err.code(), ErrorCode::Forbidden);

    let updated = harness
        .service
        .update(&comment.id, &harness.helper, "Edited".to_owned())
        .await
        .expect("update");
    assert_eq!(updated.content, "Edited");
    harness
        .service
        .delete(&comment.id, &harness.helper)
        .await
        .expect("delete");
    let thread = harness
        .service
        .list_for_question(&harness.question.id)
        .await
        .expect("thread");
    assert!(thread.is_empty());
}

#[tokio::test]
async fn verifying_a_human_answer_is_an_invalid_operation() {
    let harness = Harness::new().await;
    let answer = harness.add_answer(&harness.helper, false).await;

    let err = harness
        .service
        .verify_ai(
            &answer.id,
            &harness.asker,
            AiVerdict {
                is_correct: true,
                feedback: None,
            },
        )
        .await
        .expect_err("human answer");
    assert_eq!(err.code(), ErrorCode::InvalidOperation);
}

#[tokio::test]
async fn verifying_an_ai_answer_records_the_verdict() {
    let harness = Harness::new().await;
    let answer = harness.add_answer(&harness.helper, true).await;

    let verified = harness
        .service
        .verify_ai(
            &answer.id,
            &harness.asker,
            AiVerdict {
                is_correct: false,
                feedback: Some("  Worst case is quadratic.  ".to_owned()),
            },
        )
        .await
        .expect("verified");

    assert_eq!(verified.verifications.len(), 1);
    let verification = &verified.verifications[0];
    assert_eq!(verification.user, harness.asker);
    assert!(!verification.is_correct);
    assert_eq!(
        verification.feedback.as_deref(),
        Some("Worst case is quadratic.")
    );
    assert_eq!(harness.balance(&harness.helper).await, 50);
    let inbox = harness.inbox.list(&harness.helper).await.expect("inbox");
    assert_eq!(inbox[0].kind, NotificationKind::Verification);
}

#[tokio::test]
async fn verifying_a_missing_answer_is_not_found() {
    let harness = Harness::new().await;
    let err = harness
        .service
        .verify_ai(
            &AnswerId::random(),
            &harness.asker,
            AiVerdict {
                is_correct: true,
                feedback: None,
            },
        )
        .await
        .expect_err("missing");
    assert_eq!(err.code(), ErrorCode::NotFound);
}
