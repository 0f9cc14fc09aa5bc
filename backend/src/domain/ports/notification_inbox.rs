//! Driving port for a recipient's notifications.
use async_trait::async_trait;

use crate::domain::{Error, Notification, NotificationId, UserId};

/// Most notifications returned by [`NotificationInbox::list`].
pub const INBOX_LIMIT: u32 = 50;

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait NotificationInbox: Send + Sync {
    /// The recipient's newest notifications, at most [`INBOX_LIMIT`].
    async fn list(&self, recipient: &UserId) -> Result<Vec<Notification>, Error>;

    async fn unread_count(&self, recipient: &UserId) -> Result<u64, Error>;

    /// Mark one notification read. Only its recipient may do so.
    async fn mark_read(
        &self,
        id: &NotificationId,
        requester: &UserId,
    ) -> Result<Notification, Error>;

    /// Mark everything read, returning how many notifications changed.
    async fn mark_all_read(&self, recipient: &UserId) -> Result<u64, Error>;
}
