//! Shared HTTP adapter state.
//!
//! Handlers receive this through `web::Data` and only see the driving ports,
//! so they stay testable against the in-memory store without any I/O.

use std::sync::Arc;

use mockable::Clock;

use crate::domain::ports::{
    AccountCommand, AccountQuery, AiAugmentation, AnswerCommand, AnswerQuery, AnswerRepository,
    CommentCommand, CommentQuery, CommentRepository, NotificationInbox, NotificationRepository,
    QuestionCommand, QuestionQuery, QuestionRepository, RankingQuery, UserRepository,
};
use crate::domain::{
    AccountService, AnswerService, CommentService, NotificationService, QuestionService,
    RankingService,
};

/// Driven adapters the services are assembled from.
///
/// Each slot may hold a different adapter, though in practice they are all
/// Postgres repositories or all the same in-memory store.
pub struct Repositories<U, Q, A, C, N> {
    pub users: Arc<U>,
    pub questions: Arc<Q>,
    pub answers: Arc<A>,
    pub comments: Arc<C>,
    pub notifications: Arc<N>,
}

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    pub questions: Arc<dyn QuestionCommand>,
    pub questions_query: Arc<dyn QuestionQuery>,
    pub answers: Arc<dyn AnswerCommand>,
    pub answers_query: Arc<dyn AnswerQuery>,
    pub comments: Arc<dyn CommentCommand>,
    pub comments_query: Arc<dyn CommentQuery>,
    pub ranking: Arc<dyn RankingQuery>,
    pub notifications: Arc<dyn NotificationInbox>,
    pub accounts: Arc<dyn AccountCommand>,
    pub accounts_query: Arc<dyn AccountQuery>,
}

impl HttpState {
    /// Assemble every domain service over the given repositories.
    ///
    /// # Examples
    /// ```
    /// use std::sync::Arc;
    ///
    /// use askboard::domain::ports::FixtureAiAugmentation;
    /// use askboard::inbound::http::state::{HttpState, Repositories};
    /// use askboard::outbound::memory::InMemoryStore;
    /// use mockable::DefaultClock;
    ///
    /// let store = Arc::new(InMemoryStore::default());
    /// let state = HttpState::from_repositories(
    ///     Repositories {
    ///         users: Arc::clone(&store),
    ///         questions: Arc::clone(&store),
    ///         answers: Arc::clone(&store),
    ///         comments: Arc::clone(&store),
    ///         notifications: store,
    ///     },
    ///     Arc::new(FixtureAiAugmentation::default()),
    ///     Arc::new(DefaultClock),
    /// );
    /// let _ranking = state.ranking.clone();
    /// ```
    pub fn from_repositories<U, Q, A, C, N>(
        repos: Repositories<U, Q, A, C, N>,
        ai: Arc<dyn AiAugmentation>,
        clock: Arc<dyn Clock>,
    ) -> Self
    where
        U: UserRepository + 'static,
        Q: QuestionRepository + 'static,
        A: AnswerRepository + 'static,
        C: CommentRepository + 'static,
        N: NotificationRepository + 'static,
    {
        let Repositories {
            users,
            questions,
            answers,
            comments,
            notifications,
        } = repos;

        let question_service = Arc::new(QuestionService::new(
            Arc::clone(&questions),
            Arc::clone(&answers),
            Arc::clone(&users),
            ai,
            Arc::clone(&clock),
        ));
        let answer_service = Arc::new(AnswerService::new(
            Arc::clone(&answers),
            Arc::clone(&questions),
            Arc::clone(&users),
            Arc::clone(&notifications),
            Arc::clone(&clock),
        ));
        let comment_service = Arc::new(CommentService::new(
            comments,
            answers,
            questions,
            Arc::clone(&notifications),
            Arc::clone(&clock),
        ));
        let account_service = Arc::new(AccountService::new(Arc::clone(&users), clock));

        Self {
            questions: question_service.clone(),
            questions_query: question_service,
            answers: answer_service.clone(),
            answers_query: answer_service,
            comments: comment_service.clone(),
            comments_query: comment_service,
            ranking: Arc::new(RankingService::new(users)),
            notifications: Arc::new(NotificationService::new(notifications)),
            accounts: account_service.clone(),
            accounts_query: account_service,
        }
    }
}
