//! User repository over the in-memory store.

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use super::InMemoryStore;
use crate::domain::ports::{UserPersistenceError, UserRepository};
use crate::domain::{
    AvatarSeed, EmailAddress, User, UserId, UserProfile, Username, standing_key, standing_order,
};

#[async_trait]
impl UserRepository for InMemoryStore {
    async fn insert(&self, user: &User) -> Result<(), UserPersistenceError> {
        let mut state = self.lock();
        if state.users.iter().any(|existing| existing.username == user.username) {
            return Err(UserPersistenceError::duplicate("username"));
        }
        if state.users.iter().any(|existing| existing.email == user.email) {
            return Err(UserPersistenceError::duplicate("email"));
        }
        state.users.push(user.clone());
        Ok(())
    }

    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, UserPersistenceError> {
        Ok(self.lock().users.iter().find(|user| user.id == *id).cloned())
    }

    async fn find_by_email(
        &self,
        email: &EmailAddress,
    ) -> Result<Option<User>, UserPersistenceError> {
        Ok(self
            .lock()
            .users
            .iter()
            .find(|user| user.email == *email)
            .cloned())
    }

    async fn exists_with_username_or_email(
        &self,
        username: &Username,
        email: &EmailAddress,
    ) -> Result<bool, UserPersistenceError> {
        Ok(self
            .lock()
            .users
            .iter()
            .any(|user| user.username == *username || user.email == *email))
    }

    async fn adjust_points(
        &self,
        id: &UserId,
        delta: i64,
    ) -> Result<Option<i64>, UserPersistenceError> {
        let mut state = self.lock();
        Ok(state.users.iter_mut().find(|user| user.id == *id).map(|user| {
            user.points = user.points.saturating_add(delta);
            user.points
        }))
    }

    async fn save_profile(
        &self,
        id: &UserId,
        profile: &UserProfile,
        is_onboarded: bool,
    ) -> Result<Option<User>, UserPersistenceError> {
        let mut state = self.lock();
        Ok(state.users.iter_mut().find(|user| user.id == *id).map(|user| {
            user.profile = profile.clone();
            user.is_onboarded = is_onboarded;
            user.clone()
        }))
    }

    async fn set_avatar_seed(
        &self,
        id: &UserId,
        seed: Option<AvatarSeed>,
    ) -> Result<Option<User>, UserPersistenceError> {
        let mut state = self.lock();
        Ok(state.users.iter_mut().find(|user| user.id == *id).map(|user| {
            user.custom_avatar_seed = seed;
            user.clone()
        }))
    }

    async fn count_ranked_above(
        &self,
        points: i64,
        created_at: DateTime<Utc>,
    ) -> Result<u64, UserPersistenceError> {
        let count = self
            .lock()
            .users
            .iter()
            .filter(|user| standing_order(standing_key(user), (points, created_at)).is_lt())
            .count();
        Ok(count as u64)
    }

    async fn top_by_standing(&self, limit: u32) -> Result<Vec<User>, UserPersistenceError> {
        let mut users = self.lock().users.clone();
        users.sort_by(|left, right| standing_order(standing_key(left), standing_key(right)));
        users.truncate(limit as usize);
        Ok(users)
    }
}
