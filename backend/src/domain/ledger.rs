//! Point balance mutations.
//!
//! Every credit or debit is a single atomic increment performed by the user
//! store. The ledger never reads a balance and writes it back, and it keeps no
//! record of past deltas: the balance column is the only source of truth.

use std::sync::Arc;

use tracing::debug;

use crate::domain::ports::UserRepository;
use crate::domain::service_support::{invalid_field, map_user_error};
use crate::domain::{Error, UserId};

/// Balance granted to every new account.
pub const INITIAL_POINTS: i64 = 50;
/// Credited to an answer author each time an upvote is added.
pub const ANSWER_UPVOTE_REWARD: u32 = 2;
/// Credited to an answer author each time the answer is accepted.
pub const ACCEPTANCE_BONUS: u32 = 10;
/// Debited from an answer author who deletes their answer.
pub const ANSWER_DELETION_PENALTY: u32 = 5;

/// Credits and debits user balances.
pub struct PointsLedger<U> {
    users: Arc<U>,
}

impl<U> PointsLedger<U> {
    pub fn new(users: Arc<U>) -> Self {
        Self { users }
    }
}

impl<U> PointsLedger<U>
where
    U: UserRepository,
{
    /// Add `amount` to the balance and return the new balance.
    ///
    /// # Errors
    ///
    /// `invalid_request` for a zero amount, `not_found` for an unknown user.
    pub async fn credit(&self, user: &UserId, amount: u32) -> Result<i64, Error> {
        self.apply(user, amount, i64::from(amount)).await
    }

    /// Subtract `amount` from the balance and return the new balance.
    ///
    /// The balance is allowed to go negative.
    pub async fn debit(&self, user: &UserId, amount: u32) -> Result<i64, Error> {
        self.apply(user, amount, -i64::from(amount)).await
    }

    async fn apply(&self, user: &UserId, amount: u32, delta: i64) -> Result<i64, Error> {
        if amount == 0 {
            return Err(invalid_field(
                "amount",
                "zero_amount",
                "point amount must be positive",
            ));
        }
        let balance = self
            .users
            .adjust_points(user, delta)
            .await
            .map_err(map_user_error)?
            .ok_or_else(|| Error::not_found(format!("user {user} not found")))?;
        debug!(user_id = %user, delta, balance, "adjusted point balance");
        Ok(balance)
    }
}
