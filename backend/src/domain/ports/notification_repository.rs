//! Port abstraction for notification persistence.
use async_trait::async_trait;

use crate::domain::{Notification, NotificationId, UserId};

use super::define_port_error;

define_port_error! {
    /// Errors raised by notification repository adapters.
    pub enum NotificationRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } => "notification repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } => "notification repository query failed: {message}",
    }
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait NotificationRepository: Send + Sync {
    async fn insert(&self, notification: &Notification) -> Result<(), NotificationRepositoryError>;

    /// The recipient's newest `limit` notifications.
    async fn list_for_recipient(
        &self,
        recipient: &UserId,
        limit: u32,
    ) -> Result<Vec<Notification>, NotificationRepositoryError>;

    async fn count_unread(&self, recipient: &UserId) -> Result<u64, NotificationRepositoryError>;

    async fn find_by_id(
        &self,
        id: &NotificationId,
    ) -> Result<Option<Notification>, NotificationRepositoryError>;

    async fn mark_read(
        &self,
        id: &NotificationId,
    ) -> Result<Option<Notification>, NotificationRepositoryError>;

    /// Mark every unread notification for the recipient read. Returns how many
    /// changed.
    async fn mark_all_read(&self, recipient: &UserId) -> Result<u64, NotificationRepositoryError>;
}
