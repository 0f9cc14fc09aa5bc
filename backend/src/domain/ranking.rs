//! Leaderboard order and per-user rank.
//!
//! Users are ordered by points descending; ties go to the account created
//! first. A user's rank is one more than the number of users strictly ahead
//! of them, so equal standings never share a rank.

use std::cmp::Ordering;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::domain::ports::{RankingQuery, Standing, UserRepository};
use crate::domain::service_support::{invalid_field, map_user_error};
use crate::domain::{Error, User, UserId};

/// Leaderboard size when the caller does not ask for one.
pub const DEFAULT_LEADERBOARD_LIMIT: u32 = 50;

/// The fields that decide a user's position.
pub type StandingKey = (i64, DateTime<Utc>);

/// Key of a stored user.
pub fn standing_key(user: &User) -> StandingKey {
    (user.points, user.created_at)
}

/// Total order of the leaderboard: `Less` means `left` ranks higher.
///
/// # Examples
/// ```
/// use std::cmp::Ordering;
/// use askboard::domain::standing_order;
/// use chrono::{TimeZone, Utc};
///
/// let early = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
/// let late = Utc.with_ymd_and_hms(2024, 6, 1, 0, 0, 0).unwrap();
/// assert_eq!(standing_order((60, late), (50, early)), Ordering::Less);
/// assert_eq!(standing_order((50, early), (50, late)), Ordering::Less);
/// ```
pub fn standing_order(left: StandingKey, right: StandingKey) -> Ordering {
    right.0.cmp(&left.0).then_with(|| left.1.cmp(&right.1))
}

/// Service implementing [`RankingQuery`].
pub struct RankingService<U> {
    users: Arc<U>,
}

impl<U> RankingService<U> {
    pub fn new(users: Arc<U>) -> Self {
        Self { users }
    }
}

#[async_trait]
impl<U> RankingQuery for RankingService<U>
where
    U: UserRepository,
{
    async fn rank(&self, user: &UserId) -> Result<Standing, Error> {
        let user = self
            .users
            .find_by_id(user)
            .await
            .map_err(map_user_error)?
            .ok_or_else(|| Error::not_found("user not found"))?;
        let above = self
            .users
            .count_ranked_above(user.points, user.created_at)
            .await
            .map_err(map_user_error)?;
        Ok(Standing::new(above + 1, user))
    }

    async fn leaderboard(&self, limit: Option<u32>) -> Result<Vec<Standing>, Error> {
        let limit = limit.unwrap_or(DEFAULT_LEADERBOARD_LIMIT);
        if limit == 0 {
            return Err(invalid_field(
                "limit",
                "out_of_range",
                "limit must be at least 1",
            ));
        }
        let users = self
            .users
            .top_by_standing(limit)
            .await
            .map_err(map_user_error)?;
        Ok(users
            .into_iter()
            .zip(1_u64..)
            .map(|(user, rank)| Standing::new(rank, user))
            .collect())
    }
}
