//! Driving port for the leaderboard and per-user rank.
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::{AvatarSeed, Error, User, UserId, Username};

/// A user's position in the standing order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Standing {
    pub rank: u64,
    pub id: UserId,
    pub username: Username,
    pub avatar: String,
    pub custom_avatar_seed: Option<AvatarSeed>,
    pub points: i64,
    pub created_at: DateTime<Utc>,
}

impl Standing {
    /// Pair a user with its 1-based rank.
    pub fn new(rank: u64, user: User) -> Self {
        Self {
            rank,
            id: user.id,
            username: user.username,
            avatar: user.avatar,
            custom_avatar_seed: user.custom_avatar_seed,
            points: user.points,
            created_at: user.created_at,
        }
    }
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait RankingQuery: Send + Sync {
    /// Rank of one user: one more than the number of users ahead of them.
    async fn rank(&self, user: &UserId) -> Result<Standing, Error>;

    /// The top users. `limit` defaults to 50 and must be at least 1.
    async fn leaderboard(&self, limit: Option<u32>) -> Result<Vec<Standing>, Error>;
}
