//! Integration tests for `DieselAnswerRepository` against embedded PostgreSQL.
//!
//! Covers the statements that must stay atomic in SQL: upvote toggling,
//! exclusive acceptance within a question, and verification appends.

use askboard::domain::ports::{AnswerRepository, QuestionRepository, UserRepository};
use askboard::domain::{
    AiVerification, Answer, AnswerDraft, AnswerId, EmailAddress, Question, QuestionDraft,
    QuestionId, User, UserId, Username, VoteToggle,
};
use askboard::outbound::persistence::{
    DieselAnswerRepository, DieselQuestionRepository, DieselUserRepository,
};
use chrono::{DateTime, Duration, TimeZone, Utc};
use pg_embedded_setup_unpriv::TestCluster;
use rstest::{fixture, rstest};
use tokio::runtime::Runtime;

#[path = "support/pg_embed.rs"]
mod pg_embed;

use pg_embed::{handle_cluster_setup_failure, migrated_pool, test_cluster};

const TEST_DB: &str = "diesel_answer_repo_test";

struct TestContext {
    runtime: Runtime,
    _cluster: TestCluster,
    users: DieselUserRepository,
    questions: DieselQuestionRepository,
    repository: DieselAnswerRepository,
}

fn setup_context() -> Result<TestContext, String> {
    let runtime = Runtime::new().map_err(|err| err.to_string())?;
    let cluster = test_cluster()?;
    let pool = migrated_pool(&runtime, &cluster, TEST_DB)?;
    Ok(TestContext {
        runtime,
        _cluster: cluster,
        users: DieselUserRepository::new(pool.clone()),
        questions: DieselQuestionRepository::new(pool.clone()),
        repository: DieselAnswerRepository::new(pool),
    })
}

#[fixture]
fn repo_context() -> Option<TestContext> {
    match setup_context() {
        Ok(ctx) => Some(ctx),
        Err(reason) => handle_cluster_setup_failure(reason),
    }
}

fn epoch() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 1, 5, 9, 0, 0)
        .single()
        .expect("valid timestamp")
}

impl TestContext {
    async fn seed_user(&self, name: &str) -> UserId {
        let user = User::register(
            UserId::random(),
            Username::new(name).expect("valid username"),
            EmailAddress::new(format!("{name}@example.com")).expect("valid email"),
            epoch(),
        );
        UserRepository::insert(&self.users, &user)
            .await
            .expect("insert user");
        user.id
    }

    async fn seed_question(&self, author: &UserId, title: &str) -> QuestionId {
        let input = QuestionDraft {
            title: title.to_owned(),
            content: "Show the working.".to_owned(),
            subject: "Mathematics".to_owned(),
            branch: "CSE".to_owned(),
            year: "1st Year".to_owned(),
            grade: None,
            tags: vec![],
            stake: Some(5.0),
        }
        .validate()
        .expect("valid question");
        let question = Question::create(QuestionId::random(), author.clone(), input, epoch());
        QuestionRepository::insert(&self.questions, &question)
            .await
            .expect("insert question");
        question.id
    }

    async fn seed_answer(&self, author: &UserId, question: &QuestionId, content: &str) -> Answer {
        let draft = AnswerDraft {
            content: content.to_owned(),
            attachments: vec![],
        }
        .validate()
        .expect("valid answer");
        let answer = Answer::create(
            AnswerId::random(),
            author.clone(),
            *question,
            draft,
            epoch(),
        );
        AnswerRepository::insert(&self.repository, &answer)
            .await
            .expect("insert answer");
        answer
    }

    async fn stored(&self, id: &AnswerId) -> Answer {
        AnswerRepository::find_by_id(&self.repository, id)
            .await
            .expect("lookup")
            .expect("answer stored")
    }
}

#[rstest]
fn upvotes_toggle_per_user(repo_context: Option<TestContext>) {
    let Some(context) = repo_context else {
        return;
    };

    context.runtime.block_on(async {
        let asker = context.seed_user("asker").await;
        let helper = context.seed_user("helper").await;
        let voter = context.seed_user("voter").await;
        let question = context.seed_question(&asker, "Integrate x squared").await;
        let answer = context.seed_answer(&helper, &question, "x cubed over three.").await;

        let first = AnswerRepository::toggle_upvote(&context.repository, &answer.id, &voter)
            .await
            .expect("toggle")
            .expect("answer exists");
        assert_eq!(first.toggle, VoteToggle::Added);
        assert_eq!(first.upvotes, 1);

        let second = AnswerRepository::toggle_upvote(&context.repository, &answer.id, &asker)
            .await
            .expect("toggle")
            .expect("answer exists");
        assert_eq!(second.toggle, VoteToggle::Added);
        assert_eq!(second.upvotes, 2);

        let undo = AnswerRepository::toggle_upvote(&context.repository, &answer.id, &voter)
            .await
            .expect("toggle")
            .expect("answer exists");
        assert_eq!(undo.toggle, VoteToggle::Removed);
        assert_eq!(undo.upvotes, 1);
        assert_eq!(context.stored(&answer.id).await.upvotes, vec![asker.clone()]);

        let missing =
            AnswerRepository::toggle_upvote(&context.repository, &AnswerId::random(), &voter)
                .await
                .expect("unknown answer is not an error");
        assert!(missing.is_none());
    });
}

#[rstest]
fn acceptance_is_exclusive_within_a_question(repo_context: Option<TestContext>) {
    let Some(context) = repo_context else {
        return;
    };
    let first_at = epoch() + Duration::minutes(5);
    let second_at = epoch() + Duration::minutes(10);

    context.runtime.block_on(async {
        let asker = context.seed_user("asker").await;
        let helper = context.seed_user("helper").await;
        let question = context.seed_question(&asker, "Integrate x squared").await;
        let other_question = context.seed_question(&asker, "Differentiate sine").await;
        let early = context.seed_answer(&helper, &question, "x cubed over three.").await;
        let late = context.seed_answer(&asker, &question, "Use the power rule.").await;
        let elsewhere = context.seed_answer(&helper, &other_question, "Cosine.").await;

        let accepted =
            AnswerRepository::mark_accepted(&context.repository, &question, &early.id, first_at)
                .await
                .expect("accept")
                .expect("answer belongs to question");
        assert_eq!(accepted.id, early.id);
        assert!(accepted.is_accepted);
        assert_eq!(accepted.updated_at, first_at);

        let switched =
            AnswerRepository::mark_accepted(&context.repository, &question, &late.id, second_at)
                .await
                .expect("accept")
                .expect("answer belongs to question");
        assert!(switched.is_accepted);
        assert_eq!(switched.updated_at, second_at);

        let demoted = context.stored(&early.id).await;
        assert!(!demoted.is_accepted);
        assert_eq!(demoted.updated_at, first_at, "siblings keep their timestamps");

        let foreign = AnswerRepository::mark_accepted(
            &context.repository,
            &question,
            &elsewhere.id,
            second_at,
        )
        .await
        .expect("foreign answer is not an error");
        assert!(foreign.is_none());
        assert!(context.stored(&late.id).await.is_accepted);
        assert!(!context.stored(&elsewhere.id).await.is_accepted);

        let accepted_count = AnswerRepository::list_for_question(&context.repository, &question)
            .await
            .expect("list")
            .iter()
            .filter(|answer| answer.is_accepted)
            .count();
        assert_eq!(accepted_count, 1);
    });
}

#[rstest]
fn verifications_append_in_order(repo_context: Option<TestContext>) {
    let Some(context) = repo_context else {
        return;
    };

    context.runtime.block_on(async {
        let asker = context.seed_user("asker").await;
        let reviewer = context.seed_user("reviewer").await;
        let question = context.seed_question(&asker, "Integrate x squared").await;
        let answer = context.seed_answer(&asker, &question, "x cubed over three.").await;

        for (is_correct, feedback) in [(true, None), (false, Some("Missing the constant."))] {
            AnswerRepository::add_verification(
                &context.repository,
                &answer.id,
                &AiVerification {
                    user: reviewer.clone(),
                    is_correct,
                    feedback: feedback.map(str::to_owned),
                    created_at: epoch(),
                },
            )
            .await
            .expect("append")
            .expect("answer exists");
        }

        let verdicts: Vec<bool> = context
            .stored(&answer.id)
            .await
            .verifications
            .iter()
            .map(|verification| verification.is_correct)
            .collect();
        assert_eq!(verdicts, [true, false]);
    });
}
