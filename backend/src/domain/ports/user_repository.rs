//! Port abstraction for user persistence adapters and their errors.
use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::domain::{AvatarSeed, EmailAddress, User, UserId, UserProfile, Username};

use super::define_port_error;

define_port_error! {
    /// Persistence errors raised by user repository adapters.
    pub enum UserPersistenceError {
        /// Repository connection could not be established.
        Connection { message: String } => "user repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } => "user repository query failed: {message}",
        /// A unique column already holds the value.
        Duplicate { field: String } => "a user with this {field} already exists",
    }
}

/// Store of user accounts and point balances.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Insert a new user. Fails with `Duplicate` on a username or email clash.
    async fn insert(&self, user: &User) -> Result<(), UserPersistenceError>;

    /// Fetch a user by identifier.
    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, UserPersistenceError>;

    /// Fetch a user by normalised email address.
    async fn find_by_email(
        &self,
        email: &EmailAddress,
    ) -> Result<Option<User>, UserPersistenceError>;

    /// Whether any user already holds the username or the email.
    async fn exists_with_username_or_email(
        &self,
        username: &Username,
        email: &EmailAddress,
    ) -> Result<bool, UserPersistenceError>;

    /// Atomically add `delta` to the balance.
    ///
    /// Returns the new balance, or `None` when the user does not exist.
    async fn adjust_points(
        &self,
        id: &UserId,
        delta: i64,
    ) -> Result<Option<i64>, UserPersistenceError>;

    /// Replace the profile and onboarding flag, returning the updated user.
    async fn save_profile(
        &self,
        id: &UserId,
        profile: &UserProfile,
        is_onboarded: bool,
    ) -> Result<Option<User>, UserPersistenceError>;

    /// Replace the avatar seed, `None` clearing it, and return the updated user.
    async fn set_avatar_seed(
        &self,
        id: &UserId,
        seed: Option<AvatarSeed>,
    ) -> Result<Option<User>, UserPersistenceError>;

    /// Number of users ordered strictly before `(points, created_at)`.
    async fn count_ranked_above(
        &self,
        points: i64,
        created_at: DateTime<Utc>,
    ) -> Result<u64, UserPersistenceError>;

    /// The first `limit` users by standing.
    async fn top_by_standing(&self, limit: u32) -> Result<Vec<User>, UserPersistenceError>;
}
