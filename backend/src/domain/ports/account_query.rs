//! Driving port for reading the signed-in account.
use async_trait::async_trait;

use crate::domain::{Error, User, UserId};

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AccountQuery: Send + Sync {
    async fn current(&self, user: &UserId) -> Result<User, Error>;
}
