//! Integration tests for `DieselQuestionRepository` against embedded PostgreSQL.

use askboard::domain::ports::{QuestionRepository, UserRepository};
use askboard::domain::{
    AnswerId, EmailAddress, Question, QuestionDraft, QuestionId, User, UserId, Username,
    VoteToggle,
};
use askboard::outbound::persistence::{DieselQuestionRepository, DieselUserRepository};
use chrono::{DateTime, TimeZone, Utc};
use pg_embedded_setup_unpriv::TestCluster;
use rstest::{fixture, rstest};
use tokio::runtime::Runtime;

#[path = "support/pg_embed.rs"]
mod pg_embed;

use pg_embed::{handle_cluster_setup_failure, migrated_pool, test_cluster};

const TEST_DB: &str = "diesel_question_repo_test";

struct TestContext {
    runtime: Runtime,
    _cluster: TestCluster,
    users: DieselUserRepository,
    repository: DieselQuestionRepository,
}

fn setup_context() -> Result<TestContext, String> {
    let runtime = Runtime::new().map_err(|err| err.to_string())?;
    let cluster = test_cluster()?;
    let pool = migrated_pool(&runtime, &cluster, TEST_DB)?;
    Ok(TestContext {
        runtime,
        _cluster: cluster,
        users: DieselUserRepository::new(pool.clone()),
        repository: DieselQuestionRepository::new(pool),
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

    async fn seed_question(&self, author: &UserId) -> Question {
        let input = QuestionDraft {
            title: "Why is the sky blue?".to_owned(),
            content: "Explain Rayleigh scattering.".to_owned(),
            subject: "Physics".to_owned(),
            branch: "ECE".to_owned(),
            year: "1st Year".to_owned(),
            grade: None,
            tags: vec!["optics".to_owned()],
            stake: Some(15.0),
        }
        .validate()
        .expect("valid question");
        let question = Question::create(QuestionId::random(), author.clone(), input, epoch());
        QuestionRepository::insert(&self.repository, &question)
            .await
            .expect("insert question");
        question
    }

    async fn stored(&self, id: &QuestionId) -> Question {
        QuestionRepository::find_by_id(&self.repository, id)
            .await
            .expect("lookup")
            .expect("question stored")
    }
}

#[rstest]
fn insert_keeps_the_stake_and_tags(repo_context: Option<TestContext>) {
    let Some(context) = repo_context else {
        return;
    };

    context.runtime.block_on(async {
        let asker = context.seed_user("asker").await;
        let question = context.seed_question(&asker).await;

        let stored = context.stored(&question.id).await;
        assert_eq!(stored.points, 15);
        assert_eq!(stored.tags, ["optics"]);
        assert_eq!(stored.views, 0);
        assert!(!stored.is_resolved);
        assert_eq!(stored.created_at, epoch());
    });
}

#[rstest]
fn views_increment_once_per_call(repo_context: Option<TestContext>) {
    let Some(context) = repo_context else {
        return;
    };

    context.runtime.block_on(async {
        let asker = context.seed_user("asker").await;
        let question = context.seed_question(&asker).await;

        for expected in 1..=3 {
            let viewed = QuestionRepository::increment_views(&context.repository, &question.id)
                .await
                .expect("increment")
                .expect("question exists");
            assert_eq!(viewed.views, expected);
        }

        let missing =
            QuestionRepository::increment_views(&context.repository, &QuestionId::random())
                .await
                .expect("unknown question is not an error");
        assert!(missing.is_none());
    });
}

#[rstest]
fn upvotes_toggle_per_user(repo_context: Option<TestContext>) {
    let Some(context) = repo_context else {
        return;
    };

    context.runtime.block_on(async {
        let asker = context.seed_user("asker").await;
        let voter = context.seed_user("voter").await;
        let question = context.seed_question(&asker).await;

        let added = QuestionRepository::toggle_upvote(&context.repository, &question.id, &voter)
            .await
            .expect("toggle")
            .expect("question exists");
        assert_eq!(added.toggle, VoteToggle::Added);
        assert_eq!(added.upvotes, 1);
        assert_eq!(context.stored(&question.id).await.upvotes, vec![voter.clone()]);

        let removed = QuestionRepository::toggle_upvote(&context.repository, &question.id, &voter)
            .await
            .expect("toggle")
            .expect("question exists");
        assert_eq!(removed.toggle, VoteToggle::Removed);
        assert_eq!(removed.upvotes, 0);
        assert!(context.stored(&question.id).await.upvotes.is_empty());
    });
}

#[rstest]
fn answer_ids_are_appended_and_removed(repo_context: Option<TestContext>) {
    let Some(context) = repo_context else {
        return;
    };
    let first = AnswerId::random();
    let second = AnswerId::random();

    context.runtime.block_on(async {
        let asker = context.seed_user("asker").await;
        let question = context.seed_question(&asker).await;

        for answer in [&first, &second] {
            QuestionRepository::append_answer(&context.repository, &question.id, answer)
                .await
                .expect("append");
        }
        assert_eq!(context.stored(&question.id).await.answers, [first, second]);

        QuestionRepository::remove_answer(&context.repository, &question.id, &first)
            .await
            .expect("remove");
        assert_eq!(context.stored(&question.id).await.answers, [second]);
    });
}

#[rstest]
fn resolution_flag_round_trips(repo_context: Option<TestContext>) {
    let Some(context) = repo_context else {
        return;
    };
    let later = epoch() + chrono::Duration::hours(1);

    context.runtime.block_on(async {
        let asker = context.seed_user("asker").await;
        let question = context.seed_question(&asker).await;

        let resolved =
            QuestionRepository::set_resolved(&context.repository, &question.id, true, later)
                .await
                .expect("resolve")
                .expect("question exists");
        assert!(resolved.is_resolved);
        assert_eq!(resolved.updated_at, later);

        let reopened =
            QuestionRepository::set_resolved(&context.repository, &question.id, false, later)
                .await
                .expect("reopen")
                .expect("question exists");
        assert!(!reopened.is_resolved);
    });
}
